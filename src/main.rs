//! Don't Touch The Line entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

    use dont_touch_the_line::audio::AudioManager;
    use dont_touch_the_line::consts::*;
    use dont_touch_the_line::renderer::{RenderState, build_scene};
    use dont_touch_the_line::sim::{GameEvent, GameState, TickInput, advance_spawners, clamp_joystick, tick};
    use dont_touch_the_line::{MaxScore, Settings};

    /// Joystick knob half-size, and its resting offset inside the pad
    const KNOB_HALF: f64 = 22.0;
    const KNOB_REST: &str = "38px";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        max_score: MaxScore,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(width: f32, height: f32, seed: u64) -> Self {
            let settings = Settings::load();
            let max_score = MaxScore::load();
            Self {
                state: GameState::new(width, height, seed, max_score.value()),
                render_state: None,
                audio: AudioManager::new(settings.effective_volume()),
                settings,
                max_score,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run spawn clocks and simulation steps for one animation frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            advance_spawners(&mut self.state, dt as f64 * 1000.0);

            self.accumulator += dt;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog instead of spiralling
                self.accumulator = 0.0;
            }

            for event in self.state.drain_events() {
                self.handle_event(&event);
            }
        }

        fn handle_event(&mut self, event: &GameEvent) {
            for &cue in event.sounds() {
                self.audio.play(cue);
            }
            if self.max_score.observe(event) {
                self.max_score.save();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.state, &self.settings);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("scoreDisplay") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = document.get_element_by_id("maxScoreDisplay") {
                el.set_text_content(Some(&format!("Max: {}", self.state.max_score)));
            }

            let badges = [
                ("pu-shield", self.state.effects.shield.active),
                ("pu-slow", self.state.effects.slow.active),
            ];
            for (id, active) in badges {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.class_list().toggle_with_force("used", active);
                }
            }

            if let Some(el) = element::<HtmlElement>(document, "gameOverScreen") {
                let display = if self.state.is_over() { "flex" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
            if self.state.is_over() {
                if let Some(el) = document.get_element_by_id("gameOverText") {
                    el.set_text_content(Some(&format!("Score: {}", self.state.score)));
                }
            }
        }

        fn restart(&mut self) {
            if !self.state.is_over() {
                return;
            }
            self.state.restart();
            self.accumulator = 0.0;
            for event in self.state.drain_events() {
                self.handle_event(&event);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.toggle_mute();
            self.audio.set_volume(self.settings.effective_volume());
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    /// Viewport size in CSS pixels
    fn viewport(window: &web_sys::Window) -> (f64, f64) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w, h)
    }

    /// Size the canvas backing store for the current viewport; returns (css, physical) sizes
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Vec2, (u32, u32)) {
        let (w, h) = viewport(window);
        let dpr = window.device_pixel_ratio();
        let physical = ((w * dpr) as u32, (h * dpr) as u32);
        canvas.set_width(physical.0);
        canvas.set_height(physical.1);
        (Vec2::new(w as f32, h as f32), physical)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Don't Touch The Line starting...");

        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        let Some(canvas) = element::<HtmlCanvasElement>(&document, "gameCanvas") else {
            log::error!("No #gameCanvas element");
            return;
        };

        let (view, (width, height)) = fit_canvas(&window, &canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(view.x, view.y, seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, view).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("No suitable graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_resize_handler(&canvas, game.clone());
        setup_keyboard(game.clone());
        setup_joystick(&document, game.clone());
        setup_restart_button(&document, game.clone());

        game.borrow().update_hud(&document);

        // Start game loop
        request_animation_frame(game);

        log::info!("Don't Touch The Line running!");
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let (view, (width, height)) = fit_canvas(&window, &canvas);
            let mut g = game.borrow_mut();
            g.state.resize(view.x, view.y);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height, view);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let key = event.key();
                if g.input.set_key(&key, true) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "Enter" | " " => g.restart(),
                    "m" | "M" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.set_key(&event.key(), false);
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn place_knob(knob: &Option<HtmlElement>, left: &str, top: &str) {
        if let Some(knob) = knob {
            let style = knob.style();
            let _ = style.set_property("left", left);
            let _ = style.set_property("top", top);
        }
    }

    fn setup_joystick(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(outer) = element::<HtmlElement>(document, "joystickOuter") else {
            log::info!("No joystick on this page");
            return;
        };
        let knob = element::<HtmlElement>(document, "joystickInner");

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let g = game.borrow();
                g.audio.resume();
            });
            let _ = outer
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (non-passive so the page doesn't scroll)
        {
            let game = game.clone();
            let knob = knob.clone();
            let pad = outer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some(touch) = event.touches().get(0) else { return };
                let rect = pad.get_bounding_client_rect();
                let (half_w, half_h) = (rect.width() / 2.0, rect.height() / 2.0);
                let offset = Vec2::new(
                    (touch.client_x() as f64 - (rect.left() + half_w)) as f32,
                    (touch.client_y() as f64 - (rect.top() + half_h)) as f32,
                );
                let stick = clamp_joystick(offset);
                game.borrow_mut().input.joystick = Some(stick);

                place_knob(
                    &knob,
                    &format!("{}px", half_w - KNOB_HALF + stick.x as f64),
                    &format!("{}px", half_h - KNOB_HALF + stick.y as f64),
                );
                event.prevent_default();
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = outer.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Touch end / cancel recentre the stick
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let knob = knob.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.joystick = None;
                place_knob(&knob, KNOB_REST, KNOB_REST);
            });
            let _ = outer.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
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
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Don't Touch The Line (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve`; playing a headless session instead");

    headless::run(2024, 60 * 120);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot session for native builds
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use dont_touch_the_line::MaxScore;
    use dont_touch_the_line::consts::SIM_DT;
    use dont_touch_the_line::sim::{GameEvent, GameState, TickInput, advance_spawners, tick};

    /// Dodge sideways away from the closest obstacle heading for the player's lane
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player;
        let center = player.center();
        let lane = player.size * 1.5;

        let threat = state
            .top_obstacles
            .iter()
            .filter(|o| o.pos.y + o.size <= player.pos.y + player.size)
            .chain(
                state
                    .bottom_obstacles
                    .iter()
                    .filter(|o| o.pos.y >= player.pos.y),
            )
            .map(|o| o.pos + Vec2::splat(o.size / 2.0))
            .filter(|c| (c.x - center.x).abs() < lane)
            .min_by(|a, b| {
                a.distance(center)
                    .partial_cmp(&b.distance(center))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let mut input = TickInput::default();
        if let Some(threat) = threat {
            let go_left = threat.x > center.x && center.x > lane;
            let at_right_wall = center.x > state.width - lane;
            input.left = go_left || at_right_wall;
            input.right = !input.left;
        }
        // Drift back toward the middle row
        let mid = state.height / 2.0;
        input.up = center.y > mid + 10.0;
        input.down = center.y < mid - 10.0;
        input
    }

    pub fn run(seed: u64, max_steps: u64) {
        let mut max_score = MaxScore::load();
        let mut state = GameState::new(800.0, 600.0, seed, max_score.value());
        let frame_ms = SIM_DT as f64 * 1000.0;

        for _ in 0..max_steps {
            advance_spawners(&mut state, frame_ms);
            let input = autopilot(&state);
            tick(&mut state, &input);

            for event in state.drain_events() {
                if max_score.observe(&event) {
                    max_score.save();
                }
                match event {
                    GameEvent::PowerUpCollected(kind) => log::info!("Picked up {}", kind.as_str()),
                    GameEvent::ShieldAbsorbed => log::info!("Shield absorbed a hit"),
                    GameEvent::EffectExpired(kind) => log::info!("{} wore off", kind.as_str()),
                    _ => {}
                }
            }
            if state.is_over() {
                break;
            }
        }

        log::info!(
            "Headless session finished: score {} (max {}), {} obstacles on screen",
            state.score,
            state.max_score,
            state.obstacle_count()
        );
    }
}
