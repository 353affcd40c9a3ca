//! Star Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, EventTarget, HtmlCanvasElement, HtmlElement, HtmlSelectElement, KeyboardEvent};

    use star_jump::renderer::{RenderState, VertexBatch};
    use star_jump::sim::{GamePhase, LevelDocument};
    use star_jump::{Button, FrameDriver, QualityPreset, Settings, Tuning};

    /// DOM listener that unregisters itself when dropped
    struct Listener {
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn new(
            target: &EventTarget,
            event: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Self {
            let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
            if let Err(e) =
                target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to listen for {}: {:?}", event, e);
            }
            Self {
                target: target.clone(),
                event,
                closure,
            }
        }
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        batch: VertexBatch,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        settings: Settings,
        listeners: Vec<Listener>,
        raf_handle: Option<i32>,
        running: bool,
        // Last values pushed to the DOM
        hud: Option<(GamePhase, u64, u8)>,
    }

    impl Game {
        /// Follow the window size; the canvas, the surface and the camera viewport move together
        fn sync_size(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
            let (w, h) = (dim(window.inner_width()), dim(window.inner_height()));
            if w == 0 || h == 0 {
                return;
            }
            if (w, h) != (self.canvas.width(), self.canvas.height()) {
                self.canvas.set_width(w);
                self.canvas.set_height(h);
                if let Some(ref mut render_state) = self.render_state {
                    render_state.resize(w, h);
                }
            }
            self.driver.resize(w as f32, h as f32);
        }

        fn tick(&mut self) {
            self.sync_size();
            self.driver.frame(&mut self.batch);
            self.render();
            self.update_hud();
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let session = self.driver.session();
            let current = (session.phase(), session.score, session.lives);
            if self.hud == Some(current) {
                return;
            }
            self.hud = Some(current);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&current.1.to_string()));
            }
            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&current.2.to_string()));
            }
            // The page styles its menu/game-over/victory overlays off this attribute
            if let Some(el) = document.get_element_by_id("overlay") {
                let phase = match current.0 {
                    GamePhase::Menu => "menu",
                    GamePhase::Playing => "playing",
                    GamePhase::GameOver => "game-over",
                    GamePhase::Victory => "victory",
                };
                let _ = el.set_attribute("data-phase", phase);
            }
        }

        /// Stop ticking and drop every listener before the world goes away
        fn shutdown(&mut self) {
            if !self.running {
                return;
            }
            self.running = false;
            if let (Some(handle), Some(window)) = (self.raf_handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
            self.listeners.clear();
            self.driver.release_all();
            self.render_state = None;
            log::info!("Star Jump stopped after {} frames", self.driver.frames());
        }
    }

    /// Level supplied by the page, if any; falls back to the built-in level
    fn level_from_page(document: &Document) -> LevelDocument {
        let Some(json) = document
            .get_element_by_id("level-data")
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            return LevelDocument::default_level();
        };

        let stamp = format!("generated-{}", js_sys::Date::now() as u64);
        match LevelDocument::from_json_with_id(&json, &stamp) {
            Ok(level) => {
                log::info!("Using page level '{}' ({})", level.name, level.id);
                level
            }
            Err(e) => {
                log::warn!("Rejected page level ({}), using default level", e);
                LevelDocument::default_level()
            }
        }
    }

    fn tuning_from_page(document: &Document) -> Tuning {
        document
            .get_element_by_id("tuning-data")
            .and_then(|el| el.text_content())
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Star Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(800.0) as u32;
        let width = dim(window.inner_width()).max(1);
        let height = dim(window.inner_height()).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let level = level_from_page(&document);
        let tuning = tuning_from_page(&document);

        let game = Rc::new(RefCell::new(Game {
            driver: FrameDriver::new(level, tuning, (width as f32, height as f32)),
            batch: VertexBatch::new(settings.quality.circle_segments()),
            render_state: None,
            canvas: canvas.clone(),
            settings,
            listeners: Vec::new(),
            raf_handle: None,
            running: true,
            hud: None,
        }));

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Renderer unavailable: {}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let listeners = setup_input_handlers(&document, game.clone());
        game.borrow_mut().listeners = listeners;
        setup_teardown(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Star Jump running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) -> Vec<Listener> {
        let mut listeners = Vec::new();
        let Some(window) = web_sys::window() else {
            return listeners;
        };

        // Keyboard (physical key codes, so layouts don't matter)
        {
            let game = game.clone();
            listeners.push(Listener::new(document, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let code = event.code();
                let mut g = game.borrow_mut();
                let playing = g.driver.session().is_playing();
                if code == "Enter" || (code == "Space" && !playing) {
                    if !event.repeat() {
                        g.driver.confirm();
                    }
                    event.prevent_default();
                } else if code == "Escape" && !playing {
                    g.driver.to_menu();
                } else if g.driver.key_down(&code) {
                    event.prevent_default();
                }
            }));
        }
        {
            let game = game.clone();
            listeners.push(Listener::new(document, "keyup", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    game.borrow_mut().driver.key_up(&event.code());
                }
            }));
        }

        // On-screen buttons
        let show_touch = game.borrow().settings.touch_controls;
        for (id, button) in [
            ("touch-left", Button::Left),
            ("touch-right", Button::Right),
            ("touch-jump", Button::Jump),
        ] {
            let Some(el) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            if !show_touch {
                let _ = el.style().set_property("display", "none");
                continue;
            }

            {
                let game = game.clone();
                listeners.push(Listener::new(&el, "pointerdown", move |event| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    // Jump doubles as "continue" on the overlays
                    if button == Button::Jump && !g.driver.session().is_playing() {
                        g.driver.confirm();
                    } else {
                        g.driver.touch(button, true);
                    }
                }));
            }
            for event in ["pointerup", "pointerleave", "pointercancel"] {
                let game = game.clone();
                listeners.push(Listener::new(&el, event, move |_event| {
                    game.borrow_mut().driver.touch(button, false);
                }));
            }
        }

        // Overlay button
        if let Some(btn) = document.get_element_by_id("start-button") {
            let game = game.clone();
            listeners.push(Listener::new(&btn, "click", move |_event| {
                game.borrow_mut().driver.confirm();
            }));
        }

        // Quality selector
        if let Some(select) = document
            .get_element_by_id("quality-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(game.borrow().settings.quality.as_str());
            let game = game.clone();
            let select_clone = select.clone();
            listeners.push(Listener::new(&select, "change", move |_event| {
                let Some(quality) = QualityPreset::parse(&select_clone.value()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.settings.quality = quality;
                g.batch.set_circle_segments(quality.circle_segments());
                g.settings.save();
                log::info!("Quality set to {}", quality.as_str());
            }));
        }

        // Window blur: nothing stays held while we can't see the release
        {
            let game = game.clone();
            listeners.push(Listener::new(&window, "blur", move |_event| {
                game.borrow_mut().driver.release_all();
            }));
        }

        listeners
    }

    /// Page teardown. This one is never removed, since it runs the removal.
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().shutdown();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(next);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.raf_handle = None;
            if !g.running {
                return;
            }
            g.tick();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Jump (native) starting...");
    log::info!("Native mode runs a headless scripted session - use `trunk serve` to play");

    let mut args = std::env::args().skip(1);
    let level = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => star_jump::sim::LevelDocument::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read {}: {}, using default level", path, e);
                star_jump::sim::LevelDocument::default_level()
            }
        },
        None => star_jump::sim::LevelDocument::default_level(),
    };
    let tuning = args
        .next()
        .and_then(|path| std::fs::read_to_string(path).ok())
        .map(|json| star_jump::Tuning::from_json_or_default(&json))
        .unwrap_or_default();

    headless::run(level, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use star_jump::renderer::VertexBatch;
    use star_jump::sim::{GameEvent, GamePhase, LevelDocument};
    use star_jump::{FrameDriver, Settings, Tuning};

    /// Give up after a minute of game time
    const MAX_FRAMES: u64 = 60 * 60;

    /// Run right, hopping every half second, until the run ends
    pub fn run(level: LevelDocument, tuning: Tuning) {
        let settings = Settings::load();
        let mut batch = VertexBatch::new(settings.quality.circle_segments());
        let mut driver = FrameDriver::new(level, tuning, (800.0, 600.0));

        driver.confirm();
        driver.key_down("ArrowRight");

        while driver.frames() < MAX_FRAMES {
            let frame = driver.frames();
            if frame % 30 == 0 {
                driver.key_down("Space");
            } else if frame % 30 == 10 {
                driver.key_up("Space");
            }

            for event in driver.frame(&mut batch) {
                match event {
                    GameEvent::CoinCollected { coin, points } => {
                        log::info!("frame {}: coin {:?} (+{})", frame, coin, points)
                    }
                    GameEvent::EnemyStomped { enemy } => {
                        log::info!("frame {}: stomped enemy {:?}", frame, enemy)
                    }
                    GameEvent::PlayerDied { cause } => {
                        log::info!("frame {}: died ({:?})", frame, cause)
                    }
                    GameEvent::GoalReached => log::info!("frame {}: goal reached", frame),
                }
            }

            if driver.session().phase() != GamePhase::Playing {
                break;
            }
        }

        let session = driver.session();
        let world = driver.simulation().world();
        log::info!(
            "Finished in {:?} after {} frames: score {}, lives {}, player at ({:.1}, {:.1}), {} vertices last frame",
            session.phase(),
            driver.frames(),
            session.score,
            session.lives,
            world.player.pos.x,
            world.player.pos.y,
            batch.vertices().len()
        );
    }
}
