//! SoarScape entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

    use soarscape::Viewport;
    use soarscape::audio::WebAudioSink;
    use soarscape::consts::*;
    use soarscape::flow::{GameFlow, Notifier, Phase};
    use soarscape::platform::LocalStore;
    use soarscape::renderer::CanvasRenderer;
    use soarscape::renderer::canvas::draw_player;

    /// Shows coin pickups in the `#toast` element for a moment
    struct DomToast;

    impl Notifier for DomToast {
        fn notify(&mut self, title: &str, body: &str) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            if let Some(el) = document.get_element_by_id("toast-title") {
                el.set_text_content(Some(title));
            }
            if let Some(el) = document.get_element_by_id("toast-body") {
                el.set_text_content(Some(body));
            }
            let Some(el) = document.get_element_by_id("toast") else {
                return;
            };
            let _ = el.set_attribute("class", "toast");
            let closure = Closure::once(move || {
                if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                    if let Some(el) = doc.get_element_by_id("toast") {
                        let _ = el.set_attribute("class", "toast hidden");
                    }
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                2000,
            );
            closure.forget();
        }
    }

    type WebFlow = GameFlow<LocalStore, WebAudioSink, DomToast>;

    /// Game instance holding all state
    struct Game {
        flow: WebFlow,
        renderer: CanvasRenderer,
        accumulator: f64,
        last_time: f64,
        // Track phase to run one-shot work on transitions
        last_phase: Phase,
    }

    impl Game {
        /// Run the simulation ticks that have come due
        fn update(&mut self, dt: f64) {
            self.accumulator += dt.min(0.1);
            let mut ticks = 0;
            while self.accumulator >= TICK_DT && ticks < MAX_TICKS_PER_FRAME {
                self.accumulator -= TICK_DT;
                ticks += 1;
            }
            self.flow.frame(ticks);
        }

        fn render(&self) {
            if let Err(err) = self.renderer.render(self.flow.session()) {
                log::warn!("render error: {err:?}");
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let document = web_sys::window().unwrap().document().unwrap();
            let phase = self.flow.phase();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.flow.score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&self.flow.high_score().to_string()));
            }

            for (id, shown_in) in [
                ("consent-overlay", Phase::Consent),
                ("idle-overlay", Phase::Idle),
                ("game-over", Phase::Over),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if phase == shown_in { "" } else { "hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }

            if phase == Phase::Over && self.last_phase != Phase::Over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.flow.score().to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-best") {
                    el.set_text_content(Some(&self.flow.high_score().to_string()));
                }
                draw_portrait(&document);
            }
            self.last_phase = phase;
        }
    }

    /// Draw the player, upright, in the game-over panel
    fn draw_portrait(document: &web_sys::Document) {
        let Some(canvas) = document
            .get_element_by_id("game-over-portrait")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
        else {
            return;
        };
        ctx.set_image_smoothing_enabled(false);
        let (w, h) = (canvas.width() as f64, canvas.height() as f64);
        ctx.clear_rect(0.0, 0.0, w, h);
        if let Err(err) = draw_player(&ctx, w / 2.0, h / 2.0, 0.0) {
            log::warn!("portrait draw failed: {err:?}");
        }
    }

    fn surface_viewport(canvas: &HtmlCanvasElement) -> Viewport {
        Viewport::new(canvas.client_width() as f32, canvas.client_height() as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("SoarScape starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Gameplay runs in CSS pixels; size the surface to match
        let viewport = surface_viewport(&canvas);
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);

        let audio = WebAudioSink::new(
            "assets/music.mp3",
            "assets/game-over.mp3",
            "assets/pass.mp3",
        )
        .expect("audio init failed");

        let seed = js_sys::Date::now() as u64;
        let flow = GameFlow::new(seed, viewport, LocalStore::new(), audio, DomToast);
        let renderer = CanvasRenderer::new(&canvas).expect("renderer init failed");

        log::info!("Game initialized with seed: {}", seed);

        // Reflect the stored mute preference in the settings checkbox
        if let Some(toggle) = document
            .get_element_by_id("mute-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            toggle.set_checked(flow.muted());
        }

        let game = Rc::new(RefCell::new(Game {
            flow,
            renderer,
            accumulator: 0.0,
            last_time: 0.0,
            last_phase: Phase::Consent,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(canvas.clone(), game.clone());

        request_animation_frame(game);

        log::info!("SoarScape running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Any key jumps
                event.prevent_default();
                game.borrow_mut().flow.jump();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().flow.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().flow.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &web_sys::Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_dialog_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "dialog" } else { "dialog hidden" });
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let game = game.clone();
            on_click(&document, "accept-policy-btn", move |_| {
                game.borrow_mut().flow.accept_consent();
            });
        }

        {
            let game = game.clone();
            on_click(&document, "restart-btn", move |_| {
                game.borrow_mut().flow.restart();
            });
        }

        {
            let game = game.clone();
            on_click(&document, "mute-toggle", move |_| {
                game.borrow_mut().flow.toggle_mute();
            });
        }

        // Settings and help dialogs suppress gameplay input while open
        for (open_btn, close_btn, dialog) in [
            ("settings-btn", "close-settings-btn", "settings-dialog"),
            ("help-btn", "close-help-btn", "help-dialog"),
        ] {
            {
                let game = game.clone();
                let document = document.clone();
                on_click(&document.clone(), open_btn, move |_| {
                    game.borrow_mut().flow.set_modal_open(true);
                    set_dialog_visible(&document, dialog, true);
                });
            }
            {
                let game = game.clone();
                let document = document.clone();
                on_click(&document.clone(), close_btn, move |_| {
                    game.borrow_mut().flow.set_modal_open(false);
                    set_dialog_visible(&document, dialog, false);
                });
            }
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let viewport = surface_viewport(&canvas);
            canvas.set_width(viewport.width as u32);
            canvas.set_height(viewport.height as u32);
            let mut g = game.borrow_mut();
            g.flow.resize(viewport);
            if let Err(err) = g
                .renderer
                .resize(viewport.width as f64, viewport.height as f64)
            {
                log::warn!("resize failed: {err:?}");
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                TICK_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("SoarScape (native) starting...");
    log::info!("Rendering requires a browser - run with `trunk serve` for the web version");

    // Run a short headless session as a smoke check
    println!("\nRunning headless session...");
    run_headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless_session() {
    use soarscape::Viewport;
    use soarscape::sim::{GameEvent, SessionState, TickInput, tick};

    let mut state = SessionState::new(42, Viewport::new(480.0, 640.0));
    let mut input = TickInput { jump: true };
    for n in 0..10_000u32 {
        // Hover: jump whenever the fall gets fast
        input.jump = input.jump || state.player.velocity_y > 7.0;
        let events = tick(&mut state, &input);
        input.jump = false;
        if events.contains(&GameEvent::GameOver) {
            println!(
                "✓ Session ended after {n} ticks with score {}",
                state.score
            );
            return;
        }
    }
    println!("✓ Session survived 10000 ticks with score {}", state.score);
}
