//! Platform abstraction layer
//!
//! Renderer and presenter implementations for each target:
//! - `headless`: in-memory scene plus log output (native demo, tests)
//! - `dom`: HTML elements positioned with CSS (browser)

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod headless;

pub use headless::{HeadlessPresenter, HeadlessRenderer};

/// Which overlay controls are on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    /// Start button. Also the restart control after a game over.
    pub start_button: bool,
    pub game_over_menu: bool,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            start_button: true,
            game_over_menu: false,
        }
    }
}

impl MenuState {
    pub fn game_started(&mut self) {
        self.start_button = false;
        self.game_over_menu = false;
    }

    pub fn game_over(&mut self) {
        self.start_button = true;
        self.game_over_menu = true;
    }
}
