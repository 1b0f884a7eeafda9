//! Plane Dodge - A side-scrolling dodge-and-shoot game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, motion, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio, key bindings)
//! - `audio`: Background track control
//! - `platform`: Renderer/presenter implementations (headless and DOM)

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use sim::{GameEngine, GameEvent, Input, SessionPhase};
pub use tuning::{Tuning, TuningError};

/// Default gameplay constants (overridable through [`Tuning`])
pub mod consts {
    /// Arena dimensions (pixels). Projectiles leave at the right edge.
    pub const ARENA_WIDTH: f32 = 1500.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Inward shrink applied to every bounding box before collision tests
    pub const COLLISION_MARGIN: f32 = 10.0;

    /// Player sprite - fixed horizontal position, moves only vertically
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Resting bottom offset of the player
    pub const GROUND_OFFSET: f32 = 100.0;
    /// Height gained by one jump
    pub const JUMP_STEP: f32 = 100.0;
    /// A jump is refused once the player's top is closer than this to the arena top
    pub const JUMP_CEILING: f32 = 50.0;
    pub const JUMP_DURATION_MS: u64 = 500;
    /// Delay between a jump and the start of the fall
    pub const FALL_DELAY_MS: u64 = 400;
    pub const FALL_DURATION_MS: u64 = 2000;

    /// Enemy sprite
    pub const ENEMY_WIDTH: f32 = 80.0;
    pub const ENEMY_HEIGHT: f32 = 60.0;
    /// Bottom offsets enemies spawn at. Duplicates weight the draw toward low lanes.
    pub const ENEMY_LANES: [f32; 8] = [100.0, 100.0, 100.0, 150.0, 150.0, 200.0, 250.0, 300.0];
    pub const ENEMY_SPAWN_MIN_X: u32 = 1390;
    pub const ENEMY_SPAWN_MAX_X: u32 = 2700;
    /// Base enemy step per motion tick
    pub const ENEMY_STEP: f32 = 4.0;
    /// One score point is worth 1/SPEED_SCORE_DIVISOR extra pixels per step
    pub const SPEED_SCORE_DIVISOR: f32 = 65.0;
    /// One extra enemy per spawn tick for every this many points
    pub const SCORE_PER_EXTRA_ENEMY: u64 = 75;

    /// Projectile sprite
    pub const PROJECTILE_WIDTH: f32 = 24.0;
    pub const PROJECTILE_HEIGHT: f32 = 24.0;
    pub const PROJECTILE_ORIGIN_X: f32 = 150.0;
    /// Projectiles leave at the player's bottom offset plus this lift
    pub const PROJECTILE_LIFT: f32 = 20.0;
    /// Base projectile step per motion tick (enemy step minus one)
    pub const PROJECTILE_STEP: f32 = 3.0;

    /// Timer cadences (milliseconds)
    pub const SCORE_INTERVAL_MS: u64 = 180;
    pub const SPAWN_INTERVAL_MS: u64 = 2000;
    pub const ENEMY_MOTION_INTERVAL_MS: u64 = 5;
    pub const PROJECTILE_MOTION_INTERVAL_MS: u64 = 1;

    /// Largest slice of wall-clock time fed to the engine per frame
    pub const MAX_FRAME_MS: f64 = 100.0;
}
