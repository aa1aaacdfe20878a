//! Sandbag Punch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use sandbag_punch::consts::*;
    use sandbag_punch::input::{InputEvent, Key, SharedInputQueue, TouchButton};
    use sandbag_punch::renderer::RenderState;
    use sandbag_punch::scene::SandbagScene;
    use sandbag_punch::sim::GameEvent;
    use sandbag_punch::{Runner, Tuning, hud};

    /// Game instance holding all state
    struct Game {
        runner: Runner<SandbagScene>,
        render_state: Option<RenderState>,
        last_time: f64,
    }

    impl Game {
        fn new(tuning: Tuning) -> Self {
            Self {
                runner: Runner::sandbag(tuning),
                render_state: None,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            for event in self.runner.frame(dt) {
                match event {
                    GameEvent::Jumped => {}
                    GameEvent::Launched { origin_x } => {
                        log::info!("Punch landed at x={:.1}", origin_x)
                    }
                    GameEvent::Settled { distance } => {
                        log::info!("Final distance: {:.1}", distance)
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.runner.scene.state) {
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

            if let Some(el) = document.get_element_by_id("distance") {
                let text = hud::readout(&self.runner.scene);
                if el.text_content().as_deref() != Some(text.as_str()) {
                    el.set_text_content(Some(&text));
                }
                let _ = el.set_attribute("class", hud::readout_class(&self.runner.scene));
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sandbag Punch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(Tuning::load())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (WORLD_WIDTH, WORLD_HEIGHT))
                .await
                .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        let queue = game.borrow().runner.queue();
        setup_keyboard(queue.clone());
        setup_touch_buttons(queue.clone());
        setup_reset_button(queue.clone());
        setup_blur(queue);

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Sandbag Punch running!");
        Ok(())
    }

    fn setup_keyboard(queue: SharedInputQueue) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    // Arrows and space would otherwise scroll the page
                    event.prevent_default();
                    queue.borrow_mut().push(InputEvent::KeyDown(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    queue.borrow_mut().push(InputEvent::KeyUp(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(queue: SharedInputQueue) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for button in TouchButton::ALL {
            let Some(el) = document.get_element_by_id(button.element_id()) else {
                log::warn!("Touch button #{} missing", button.element_id());
                continue;
            };

            for name in TouchButton::POINTER_EVENTS {
                let queue = queue.clone();
                let target = el.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    if event.type_() == "pointerdown" {
                        // Touch pointers are implicitly captured by the pressed
                        // element; without this, pointerleave waits for the lift
                        let _ = target.release_pointer_capture(event.pointer_id());
                    }
                    if let Some(input) = button.pointer_event(&event.type_()) {
                        queue.borrow_mut().push(input);
                    }
                });
                let _ = el.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_reset_button(queue: SharedInputQueue) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                queue.borrow_mut().push(InputEvent::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur(queue: SharedInputQueue) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key-ups are lost while the window is unfocused
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            queue.borrow_mut().push(InputEvent::Blur);
            log::info!("Window blurred, released held controls");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
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
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sandbag Punch (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless punch demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Walk up to the sandbag, punch it, and report where it lands
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use sandbag_punch::consts::SIM_DT;
    use sandbag_punch::input::{InputEvent, Key};
    use sandbag_punch::sim::GameEvent;
    use sandbag_punch::{Runner, Tuning, hud};

    let mut runner = Runner::sandbag(Tuning::load());

    // Let everything land, then walk right until touching the bag
    for _ in 0..60 {
        runner.frame(SIM_DT);
    }
    runner.push(InputEvent::KeyDown(Key::Right));
    for _ in 0..600 {
        if runner.scene.state.player_overlaps_sandbag() {
            break;
        }
        runner.frame(SIM_DT);
    }
    runner.push(InputEvent::KeyUp(Key::Right));
    runner.push(InputEvent::KeyDown(Key::Space));

    // 60 simulated seconds is far longer than any launch takes to settle
    for _ in 0..60 * 60 {
        let events = runner.frame(SIM_DT);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::Settled { .. }))
        {
            break;
        }
    }

    println!("{}", hud::readout(&runner.scene));
}
