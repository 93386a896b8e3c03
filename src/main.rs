//! Chain Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//!
//! The web build expects a page with `#gameCanvas`, `#score`, `#level`,
//! `#start-screen`, `#game-screen`, `#game-over`, `#level-complete`,
//! `#level-complete-title` and the buttons `#start-btn`, `#restart-btn`,
//! `#next-level-btn` (see `index.html`).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use chain_breaker::consts::*;
    use chain_breaker::platform::{key_to_move, key_to_toggle, now_ms};
    use chain_breaker::renderer::CanvasRenderer;
    use chain_breaker::sim::GameStatus;
    use chain_breaker::{Session, SessionError, Settings};

    /// Tick timer and key listener of one playing session.
    ///
    /// They are acquired together and dropping this releases both, so no
    /// callback outlives the session it was created for.
    struct PlayLoop {
        interval_id: i32,
        _tick: Closure<dyn FnMut()>,
        keydown: Closure<dyn FnMut(KeyboardEvent)>,
    }

    impl PlayLoop {
        fn start(game: &Rc<RefCell<Game>>, epoch: u64, interval_ms: u32) -> Result<Self, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

            let keydown = {
                let game = game.clone();
                Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                    if let Some(input) = key_to_move(&event.key()) {
                        event.prevent_default();
                        game.borrow_mut().session.move_paddle(input);
                    }
                })
            };
            let tick = {
                let game = game.clone();
                let mut last_ms = now_ms();
                Closure::<dyn FnMut()>::new(move || {
                    // Timers are throttled in background tabs; feed real time
                    let now = now_ms();
                    game.borrow_mut().session.tick_elapsed(epoch, now - last_ms);
                    last_ms = now;
                })
            };

            window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
            let interval_id = match window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                interval_ms as i32,
            ) {
                Ok(id) => id,
                Err(e) => {
                    let _ = window.remove_event_listener_with_callback(
                        "keydown",
                        keydown.as_ref().unchecked_ref(),
                    );
                    return Err(e);
                }
            };

            log::info!("Play loop started (epoch {}, every {} ms)", epoch, interval_ms);
            Ok(Self {
                interval_id,
                _tick: tick,
                keydown,
            })
        }
    }

    impl Drop for PlayLoop {
        fn drop(&mut self) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(self.interval_id);
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    self.keydown.as_ref().unchecked_ref(),
                );
            }
            log::debug!("Play loop released");
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        renderer: CanvasRenderer,
        play_loop: Option<PlayLoop>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track status for HUD overlays
        last_status: Option<GameStatus>,
    }

    impl Game {
        fn new(settings: Settings, renderer: CanvasRenderer) -> Self {
            Self {
                session: Session::new(&settings),
                settings,
                renderer,
                play_loop: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_status: None,
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest sample is the one about to be overwritten
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&self) {
            let fps = self.settings.show_fps.then_some(self.fps);
            self.renderer
                .render(&self.session.frame(), self.settings.high_contrast, fps);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.session.score())));
            }
            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&format!("Level: {}", self.session.level())));
            }

            let status = self.session.status();
            if self.last_status == Some(status) {
                return;
            }
            self.last_status = Some(status);

            set_hidden(document, "start-screen", status != GameStatus::NotStarted);
            set_hidden(document, "game-screen", status == GameStatus::NotStarted);
            set_hidden(document, "game-over", status != GameStatus::Lost);
            set_hidden(document, "level-complete", status != GameStatus::Won);
            if status == GameStatus::Won {
                if let Some(el) = document.get_element_by_id("level-complete-title") {
                    el.set_text_content(Some(&format!(
                        "Level {} Complete!",
                        self.session.level()
                    )));
                }
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Start a fresh play loop for `epoch`, replacing any previous one
    fn begin_play(game: &Rc<RefCell<Game>>, epoch: u64) {
        let interval_ms = {
            let mut g = game.borrow_mut();
            g.play_loop = None;
            g.settings.tick_interval_ms
        };
        match PlayLoop::start(game, epoch, interval_ms) {
            Ok(play_loop) => game.borrow_mut().play_loop = Some(play_loop),
            Err(e) => log::error!("Failed to start play loop: {:?}", e),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Chain Breaker starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("missing #gameCanvas"))?
            .dyn_into()?;

        let settings = Settings::load();
        let renderer =
            CanvasRenderer::new(&canvas, CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32)?;
        let game = Rc::new(RefCell::new(Game::new(settings, renderer)));

        setup_buttons(&document, &game)?;
        setup_preference_keys(&window, &game)?;
        request_animation_frame(game);

        log::info!("Chain Breaker ready");
        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        handler: impl FnMut(MouseEvent) + 'static,
    ) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("Missing button #{}", id);
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            on_click(document, "start-btn", move |_| {
                let started = game.borrow_mut().session.start();
                match started {
                    Ok(epoch) => begin_play(&game, epoch),
                    Err(e) => log::warn!("Start: {}", e),
                }
            })?;
        }
        {
            let game = game.clone();
            on_click(document, "restart-btn", move |_| {
                let epoch = game.borrow_mut().session.reset();
                begin_play(&game, epoch);
            })?;
        }
        {
            let game = game.clone();
            on_click(document, "next-level-btn", move |_| {
                let advanced: Result<u64, SessionError> = game.borrow_mut().session.advance_level();
                match advanced {
                    Ok(epoch) => begin_play(&game, epoch),
                    Err(e) => log::warn!("Next level: {}", e),
                }
            })?;
        }
        Ok(())
    }

    /// F toggles the FPS counter, H the high contrast palette. Live for the
    /// whole page, unlike the paddle keys.
    fn setup_preference_keys(window: &Window, game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            if let Some(toggle) = key_to_toggle(&event.key()) {
                let mut g = game.borrow_mut();
                let enabled = g.settings.toggle(toggle);
                g.settings.save();
                log::info!("{:?} {}", toggle, if enabled { "on" } else { "off" });
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.track_fps(time);
            g.render();

            // Session over: release timer and key listener together
            if g.session.status().is_terminal() && g.play_loop.is_some() {
                g.play_loop = None;
                log::info!(
                    "Session ended {:?} at {:.0} ms",
                    g.session.status(),
                    now_ms()
                );
            }

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

/// Bot-driven session for running the engine without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use chain_breaker::consts::PADDLE_WIDTH;
    use chain_breaker::sim::{GameStatus, PaddleMove};
    use chain_breaker::{Session, Settings};

    /// Ticks between two bot key presses
    const KEY_REPEAT_TICKS: u64 = 4;
    /// Paddle center may be this far off the ball before the bot reacts
    const DEAD_ZONE: f32 = 20.0;

    #[derive(Debug)]
    pub struct DemoReport {
        pub status: GameStatus,
        pub level: u32,
        pub score: u64,
        pub ticks: u64,
    }

    /// Follow the lowest ball with the paddle
    fn choose_move(session: &Session) -> Option<PaddleMove> {
        let state = session.state();
        let target = state
            .balls
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?
            .pos
            .x;
        let center = state.paddle.x + PADDLE_WIDTH / 2.0;
        if target < center - DEAD_ZONE {
            Some(PaddleMove::Left)
        } else if target > center + DEAD_ZONE {
            Some(PaddleMove::Right)
        } else {
            None
        }
    }

    pub fn run_demo(settings: &Settings, max_level: u32, max_ticks: u64) -> DemoReport {
        let mut session = Session::new(settings);
        let mut epoch = match session.start() {
            Ok(epoch) => epoch,
            Err(e) => {
                log::error!("Demo could not start: {}", e);
                session.reset()
            }
        };

        let mut ticks = 0;
        while ticks < max_ticks {
            match session.status() {
                GameStatus::Won if session.level() < max_level => match session.advance_level() {
                    Ok(next) => epoch = next,
                    Err(e) => {
                        log::error!("{}", e);
                        break;
                    }
                },
                GameStatus::Playing => {}
                _ => break,
            }

            if ticks % KEY_REPEAT_TICKS == 0 {
                if let Some(input) = choose_move(&session) {
                    session.move_paddle(input);
                }
            }
            session.tick(epoch);
            ticks += 1;
        }

        DemoReport {
            status: session.status(),
            level: session.level(),
            score: session.score(),
            ticks,
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chain_breaker::Settings;
    use chain_breaker::platform::now_ms;

    const DEMO_MAX_LEVEL: u32 = 3;
    const DEMO_MAX_TICKS: u64 = 200_000;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Chain Breaker (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let started = now_ms();
    let report = headless::run_demo(&settings, DEMO_MAX_LEVEL, DEMO_MAX_TICKS);
    log::info!(
        "Demo finished: {:?} on level {} with score {} after {} ticks ({:.1} ms wall, {:.0} ms game time)",
        report.status,
        report.level,
        report.score,
        report.ticks,
        now_ms() - started,
        report.ticks as f64 * settings.tick_ms()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
