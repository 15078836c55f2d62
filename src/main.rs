//! Apex Line entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use apex_line::renderer::pipeline::viewport_to_canvas;
    use apex_line::renderer::{RenderState, scene};
    use apex_line::{GameConfig, PointerInput, RoundState};
    use glam::Vec2;

    /// Game instance holding all state
    struct Game {
        round: RoundState,
        render_state: Option<RenderState>,
        pointer: PointerInput,
        /// Canvas size in CSS pixels (pointer events arrive in these units)
        client_size: (f32, f32),
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                round: RoundState::new(GameConfig::default(), seed),
                render_state: None,
                pointer: PointerInput::default(),
                client_size: (1.0, 1.0),
            }
        }

        /// Convert a pointer position on the canvas element to track coordinates
        fn to_canvas(&self, x: f32, y: f32) -> Vec2 {
            let (cx, cy) = viewport_to_canvas(x, y, self.round.config.canvas_size, self.client_size);
            Vec2::new(cx, cy)
        }

        fn press(&mut self, x: f32, y: f32) {
            self.pointer = PointerInput::pressed(self.to_canvas(x, y));
        }

        fn move_to(&mut self, x: f32, y: f32) {
            self.pointer.pos = self.to_canvas(x, y);
        }

        fn release(&mut self) {
            self.pointer.active = false;
        }

        /// One render tick: poll the pointer once
        fn update(&mut self) {
            if let Some(score) = self.round.poll(&self.pointer) {
                if let Ok(json) = serde_json::to_string(score) {
                    log::debug!("Score: {}", json);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene(&self.round);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            // Stopwatch while drawing
            if let Some(el) = document.get_element_by_id("stopwatch") {
                if self.round.is_drawing() {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{:.2}", self.round.elapsed_seconds())));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Final score panel
            if let Some(el) = document.get_element_by_id("game-over") {
                match self.round.score() {
                    Some(score) => {
                        let _ = el.set_attribute("class", "");
                        let fields = [
                            ("final-score", format!("Final Score: {}", score.total)),
                            ("final-accuracy", format!("Accuracy: {} / 720", score.accuracy)),
                            ("final-time", format!("Time: {} / 480", score.time)),
                            ("final-message", score.message.clone()),
                        ];
                        for (id, text) in fields {
                            if let Some(field) = document.get_element_by_id(id) {
                                field.set_text_content(Some(&text));
                            }
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Start a new round on a new track
        fn restart(&mut self, seed: u64) {
            self.round.restart(seed);
            self.pointer = PointerInput::default();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Apex Line starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().client_size = (client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let canvas_size = game.borrow().round.config.canvas_size;
        match RenderState::new(surface, &adapter, width, height, canvas_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer setup failed: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Apex Line running!");
    }

    /// Touch position relative to the canvas
    fn touch_position(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        let x = touch.client_x() as f32 - rect.left() as f32;
        let y = touch.client_y() as f32 - rect.top() as f32;
        Some((x, y))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - start or continue drawing
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .press(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .move_to(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up (on window so releasing outside the canvas still ends the attempt)
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().release();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_position(&canvas_clone, &event) {
                    game.borrow_mut().press(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_position(&canvas_clone, &event) {
                    game.borrow_mut().move_to(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().release();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), "r" | "R") {
                    let seed = js_sys::Date::now() as u64;
                    game.borrow_mut().restart(seed);
                    log::info!("Round restarted with seed: {}", seed);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
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
    use apex_line::{GameConfig, PointerInput, RoundState};

    env_logger::init();
    log::info!("Apex Line (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(12345);

    // Replay the ideal line as if the player traced it, one sample per tick
    let mut round = RoundState::new(GameConfig::default(), seed);
    let ideal = round.track.ideal_line.clone();
    for p in ideal {
        round.poll(&PointerInput::pressed(p));
    }
    round.poll(&PointerInput::released());

    println!("Seed: {}", seed);
    println!("Control points: {}", round.track.control_points.len());
    println!("Centerline samples: {}", round.track.len());
    println!("Track length: {:.1}", round.track.length());
    if let Some(score) = round.score() {
        match serde_json::to_string_pretty(score) {
            Ok(json) => println!("Ideal line score:\n{}", json),
            Err(e) => log::error!("Failed to serialize score: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
