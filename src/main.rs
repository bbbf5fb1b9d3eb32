//! Kanji Ants entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use kanji_ants::platform::GuessQueue;
    use kanji_ants::platform::web::{FontAssets, PerformanceClock};
    use kanji_ants::renderer::CanvasRenderer;
    use kanji_ants::{GameEvent, GameLoop, GameSession, Hud, LoopControl, Settings};

    type WebLoop = GameLoop<PerformanceClock, FontAssets, GuessQueue, CanvasRenderer>;

    fn missing(what: &str) -> JsValue {
        JsValue::from_str(&format!("missing {}", what))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Kanji Ants starting...");

        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = window.document().ok_or_else(|| missing("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| missing("#canvas"))?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let renderer = CanvasRenderer::new(&canvas, &settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(settings, seed);
        log::info!("Game initialized with seed: {}", seed);

        let game: Rc<RefCell<WebLoop>> = Rc::new(RefCell::new(GameLoop::new(
            session,
            PerformanceClock::new(),
            FontAssets::load(&document),
            GuessQueue::new(),
            renderer,
        )));

        setup_guess_form(&document, game.clone())?;

        request_animation_frame(game);
        Ok(())
    }

    fn setup_guess_form(document: &Document, game: Rc<RefCell<WebLoop>>) -> Result<(), JsValue> {
        let form = document
            .get_element_by_id("guess-form")
            .ok_or_else(|| missing("#guess-form"))?;
        let input: HtmlInputElement = document
            .get_element_by_id("guess-input")
            .ok_or_else(|| missing("#guess-input"))?
            .dyn_into()?;

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let text = input.value();
            input.set_value("");
            game.borrow_mut().input_mut().push(text);
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<WebLoop>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebLoop>>) {
        let control = {
            let mut g = game.borrow_mut();
            let control = g.frame();
            let events = g.session_mut().drain_events();
            update_hud(&g.session().hud(), &events);
            control
        };

        match control {
            Ok(LoopControl::Continue) => request_animation_frame(game),
            Ok(LoopControl::Stop) => log::info!("Game loop stopped"),
            Err(e) => show_error(&e.to_string()),
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(hud: &Hud, events: &[GameEvent]) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        set_text(&document, "score", &hud.score.to_string());
        set_text(&document, "cake-pieces", &hud.remaining.to_string());

        for event in events {
            log::debug!("{:?}", event);
            if let GameEvent::GameOver { score } = event {
                set_text(&document, "final-score", &score.to_string());
                if let Some(el) = document.get_element_by_id("game-over") {
                    let _ = el.set_attribute("class", "");
                }
            }
        }
    }

    fn show_error(message: &str) {
        log::error!("{}", message);
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("error") {
            el.set_text_content(Some(message));
            let _ = el.set_attribute("class", "");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clap::Parser;
    use kanji_ants::consts::SIM_DT;
    use kanji_ants::platform::{BundledAssets, GuessQueue, ManualClock};
    use kanji_ants::renderer::{HudLogRenderer, hud_line};
    use kanji_ants::{GameLoop, GameSession, LoopControl, Settings, SpawnTimer};

    /// Headless Kanji Ants: plays a seeded session and prints the final HUD
    #[derive(Parser, Debug, Clone, PartialEq)]
    #[command(name = "kanji-ants", version, about)]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Seconds between auto-typed guesses; no typist when absent
        #[arg(long, value_parser = positive_seconds)]
        pub typist_interval: Option<f64>,
        /// Stop after this many simulated seconds
        #[arg(long, default_value_t = 600.0)]
        pub max_seconds: f64,
    }

    fn positive_seconds(value: &str) -> Result<f64, String> {
        let secs: f64 = value
            .parse()
            .map_err(|_| format!("`{}` is not a number", value))?;
        if secs > 0.0 {
            Ok(secs)
        } else {
            Err(format!("must be positive, got {}", value))
        }
    }

    pub fn run(args: Args) -> Result<String, kanji_ants::GameError> {
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        });
        log::info!("Kanji Ants (headless) starting with seed: {}", seed);

        let session = GameSession::new(Settings::load(), seed);
        let mut game = GameLoop::new(
            session,
            ManualClock::new(),
            BundledAssets,
            GuessQueue::new(),
            HudLogRenderer::new(),
        );
        let mut typist = args.typist_interval.map(SpawnTimer::new);

        loop {
            game.clock_mut().advance(SIM_DT as f64);

            let typed = typist
                .as_mut()
                .is_some_and(|timer| timer.advance(SIM_DT as f64));
            if typed {
                // Oldest ant first
                if let Some(reading) = game.session().ants().first().map(|a| a.reading.clone()) {
                    log::debug!("typing {}", reading);
                    game.input_mut().push(reading);
                }
            }

            let control = game.frame()?;
            for event in game.session_mut().drain_events() {
                log::debug!("{:?}", event);
            }

            if control == LoopControl::Stop {
                break;
            }
            if game.sim_time() >= args.max_seconds {
                log::warn!("Time cap of {}s reached", args.max_seconds);
                break;
            }
        }

        log::info!("Rendered {} frames", game.renderer().frames());
        Ok(hud_line(&game.session().hud()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = headless::Args::parse();

    match headless::run(args) {
        Ok(hud) => println!("{}", hud),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
