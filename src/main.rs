//! Octovolt entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent, TouchEvent};

    use octovolt::audio::AudioManager;
    use octovolt::platform::FixedTimestep;
    use octovolt::renderer::{CanvasSurface, render};
    use octovolt::sim::{GameState, InputEvent, UiUpdate, Viewport, tick};
    use octovolt::{OctovoltError, Result, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        audio: AudioManager,
        clock: FixedTimestep,
        last_time: f64,
        shown_score: Option<u64>,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            for _ in 0..self.clock.advance(dt) {
                let events = tick(&mut self.state);
                for effect in events.sounds() {
                    self.audio.play(effect);
                }
            }
        }

        fn render(&mut self) {
            render(&self.state, &mut self.surface);
        }

        fn apply_input(&mut self, event: InputEvent) {
            let update = self.state.handle_input(event);
            self.apply_ui_update(update);
        }

        fn apply_ui_update(&mut self, update: UiUpdate) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if update.dismiss_overlay {
                if let Some(el) = document.get_element_by_id("start-overlay") {
                    el.remove();
                }
            }
            if let Some(icon) = update.icon {
                if let Some(img) = document
                    .get_element_by_id("sound")
                    .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
                {
                    img.set_src(icon.image_path());
                }
            }
            if let Some(effect) = update.play {
                self.audio.play(effect);
            }
        }

        /// Update the score text when it changes
        fn update_hud(&mut self, document: &Document) {
            let score = self.state.score.displayed();
            if self.shown_score == Some(score) {
                return;
            }
            if let Some(el) = document.get_element_by_id("score") {
                el.set_inner_html(&score.to_string());
            }
            self.shown_score = Some(score);
        }
    }

    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| OctovoltError::Platform(e.to_string()))?;

        log::info!("Octovolt starting...");

        let window = web_sys::window().ok_or_else(|| OctovoltError::Platform("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| OctovoltError::Platform("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .ok_or_else(|| OctovoltError::Platform("no canvas".into()))?
            .dyn_into()
            .map_err(|_| OctovoltError::Platform("not a canvas".into()))?;

        let (width, height) = window_size(&window);
        let surface = CanvasSurface::new(canvas, &document)?;
        surface.resize(width as u32, height as u32);

        let settings = Settings::default();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let state = GameState::from_settings(&settings, seed, Viewport::new(width, height)?)?;
        let audio = AudioManager::new(&state.sound);

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            surface,
            audio,
            clock: FixedTimestep::new(settings.tick_rate),
            last_time: 0.0,
            shown_score: None,
        }));

        setup_input_handlers(&window, game.clone());

        request_animation_frame(game);

        log::info!("Octovolt running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().apply_input(InputEvent::PointerMove {
                    x: event.client_x() as f32,
                    y: event.client_y() as f32,
                });
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().apply_input(InputEvent::PointerMove {
                        x: touch.client_x() as f32,
                        y: touch.client_y() as f32,
                    });
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click and touch start toggle sound
        for kind in ["click", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().apply_input(InputEvent::Toggle);
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    game.borrow_mut().apply_input(InputEvent::Toggle);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else { return };
                let (width, height) = window_size(&window);
                let mut g = game.borrow_mut();
                g.surface.resize(width as u32, height as u32);
                g.apply_input(InputEvent::Resize { width, height });
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                g.clock.dt()
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Octovolt failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use serde::Serialize;

    use octovolt::audio::AudioManager;
    use octovolt::platform::FixedTimestep;
    use octovolt::renderer::{RecordingSurface, render};
    use octovolt::sim::math::average;
    use octovolt::sim::{GameEvent, GameState, InputEvent, Viewport, tick};
    use octovolt::{Result, Settings};

    /// A gameplay event and the tick it happened on
    #[derive(Debug, Serialize)]
    pub struct LoggedEvent {
        pub tick: u64,
        pub event: GameEvent,
    }

    /// What happened during a headless run
    #[derive(Debug, Default, Serialize)]
    pub struct SessionSummary {
        pub seed: u64,
        pub ticks: u64,
        pub coins_collected: u32,
        pub game_overs: u32,
        pub best_score: u64,
        pub final_enemies: usize,
        pub sounds_played: usize,
        /// Captures, spawns and game overs; sounds are only counted
        pub events: Vec<LoggedEvent>,
    }

    /// Scripted pointer: every tick, move halfway toward the coin
    fn chase_coin(state: &GameState) -> InputEvent {
        let target = state.coin.pos;
        let from = state.mouse.pos;
        let next = Vec2::new(average(from.x, target.x), average(from.y, target.y));
        InputEvent::PointerMove {
            x: next.x,
            y: next.y,
        }
    }

    pub fn run(settings_path: Option<&Path>) -> Result<SessionSummary> {
        let settings = match settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        simulate(&settings)
    }

    /// Headless fixed-tick loop driven by the scripted pointer
    pub fn simulate(settings: &Settings) -> Result<SessionSummary> {
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let viewport = Viewport::new(settings.viewport_width, settings.viewport_height)?;
        let mut state = GameState::from_settings(settings, seed, viewport)?;
        let mut audio = AudioManager::new(&state.sound);
        let mut surface = RecordingSurface::default();
        let mut clock = FixedTimestep::new(settings.tick_rate);

        log::info!(
            "Headless run: {} ticks at {} Hz, {}x{}, seed {}",
            settings.run_ticks,
            settings.tick_rate,
            viewport.width(),
            viewport.height(),
            seed
        );

        // Same as the first click on the page: drop the overlay, sound on
        let update = state.handle_input(InputEvent::Toggle);
        if let Some(effect) = update.play {
            audio.play(effect);
        }

        let mut summary = SessionSummary {
            seed,
            ..SessionSummary::default()
        };
        let mut last = Instant::now();

        while summary.ticks < settings.run_ticks {
            let due = if settings.realtime {
                let now = Instant::now();
                let elapsed = now.duration_since(last).as_secs_f32();
                last = now;
                clock.advance(elapsed)
            } else {
                1
            };

            for _ in 0..due {
                if summary.ticks >= settings.run_ticks {
                    break;
                }
                let input = chase_coin(&state);
                state.handle_input(input);

                let events = tick(&mut state);
                summary.ticks += 1;
                for event in events.events {
                    match &event {
                        GameEvent::CoinCollected { score } => {
                            summary.coins_collected += 1;
                            summary.best_score = summary.best_score.max(*score);
                        }
                        GameEvent::GameOver { enemies_cleared } => {
                            summary.game_overs += 1;
                            log::info!(
                                "Caught at tick {} ({} enemies on the field)",
                                state.time_ticks,
                                enemies_cleared
                            );
                        }
                        GameEvent::PlaySound(effect) => {
                            audio.play(*effect);
                            continue;
                        }
                        GameEvent::EnemySpawned { .. } => {}
                    }
                    summary.events.push(LoggedEvent {
                        tick: state.time_ticks,
                        event,
                    });
                }
                render(&state, &mut surface);
            }

            if settings.realtime {
                std::thread::sleep(Duration::from_secs_f32(clock.dt()));
            }
        }

        summary.final_enemies = state.enemies.len();
        summary.sounds_played = audio.played().len();
        log::info!("Rendered {} frames", surface.frames);
        Ok(summary)
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Octovolt (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in the browser");

    let settings_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    match native::run(settings_path.as_deref()) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        },
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
