//! Plane Dodge entry point
//!
//! On the web: binds the simulation to the page and drives it from
//! `requestAnimationFrame`. Natively: runs a headless autopilot game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use plane_dodge::consts::MAX_FRAME_MS;
    use plane_dodge::platform::dom::{DomPresenter, DomRenderer};
    use plane_dodge::{GameEngine, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        engine: GameEngine,
        renderer: DomRenderer,
        presenter: DomPresenter,
        settings: Settings,
        last_time: f64,
        /// Sub-millisecond remainder carried between frames
        carry_ms: f64,
    }

    impl Game {
        /// Feed elapsed frame time to the engine and flush its events
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            self.carry_ms += dt;
            let whole = self.carry_ms.floor();
            self.carry_ms -= whole;
            self.engine.advance(whole as u64);
            self.flush();
        }

        fn flush(&mut self) {
            self.engine.dispatch(&mut self.renderer, &mut self.presenter);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Plane Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let renderer = DomRenderer::new(&document).expect("page is missing #enemies, #balls or #player");
        let presenter = DomPresenter::new(&document, &settings);

        let seed = js_sys::Date::now() as u64;
        let engine = GameEngine::new(Tuning::default(), seed);
        // Place the player before the first start
        let offset = engine.player_offset();
        let game = Rc::new(RefCell::new(Game {
            engine,
            renderer,
            presenter,
            settings,
            last_time: 0.0,
            carry_ms: 0.0,
        }));
        {
            use plane_dodge::sim::Renderer;
            game.borrow_mut().renderer.player_moved(offset, 0);
        }

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());
        request_animation_frame(game);

        log::info!("Plane Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let code = event.code();
            if code == g.settings.mute_key {
                event.prevent_default();
                let muted = g.settings.toggle_mute();
                g.settings.save();
                g.presenter.set_muted(muted);
                return;
            }
            let Some(input) = g.settings.action_for_key(&code) else {
                return;
            };
            // Keep Space from scrolling the page
            event.prevent_default();
            g.engine.handle_input(input);
            g.flush();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Some(btn) = document.get_element_by_id("start") else {
            log::warn!("No start button; starting immediately");
            let mut g = game.borrow_mut();
            g.engine.start();
            g.flush();
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.engine.start();
            g.flush();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Longest headless run (virtual milliseconds)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_LIMIT_MS: u64 = 5 * 60 * 1000;

/// Virtual frame length of the headless loop
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAME_MS: u64 = 16;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    let tuning_path = args.next();

    if let Err(err) = run_demo(seed, tuning_path.as_deref()) {
        log::error!("{}", err);
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Play one autopilot game without a screen and print its summary
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(seed: u64, tuning_path: Option<&str>) -> Result<(), plane_dodge::TuningError> {
    use plane_dodge::platform::{HeadlessPresenter, HeadlessRenderer};
    use plane_dodge::sim::Autopilot;
    use plane_dodge::{GameEngine, Settings, Tuning};

    let tuning = match tuning_path {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    log::info!("Plane Dodge (native) starting with seed {}", seed);

    let settings = Settings::load();
    let mut engine = GameEngine::new(tuning, seed);
    let mut renderer = HeadlessRenderer::default();
    let mut presenter = HeadlessPresenter::new(&settings);
    let mut pilot = Autopilot::default();

    engine.start();
    while engine.is_running() && engine.now_ms() < DEMO_LIMIT_MS {
        if let Some(input) = pilot.decide(&engine) {
            engine.handle_input(input);
        }
        engine.advance(DEMO_FRAME_MS);
        engine.dispatch(&mut renderer, &mut presenter);
    }
    if engine.is_running() {
        log::info!("Time limit reached, stopping");
        engine.end_game();
        engine.dispatch(&mut renderer, &mut presenter);
    }

    let summary = serde_json::to_string_pretty(&engine.snapshot())?;
    println!("{summary}");
    Ok(())
}
