//! Alien Pop entry point
//!
//! Handles platform-specific initialization and drives the per-frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};

    use alien_pop::platform::{Color, KeyValueStore, Sprite, Surface, TextAnchor};
    use alien_pop::render::draw_frame;
    use alien_pop::sim::{GamePhase, SessionState, TickInput, tick};
    use alien_pop::{BestScore, Settings, Tuning};

    /// Canvas-2D implementation of the drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        size: Vec2,
        alien: HtmlImageElement,
        explosion: HtmlImageElement,
    }

    impl Surface for CanvasSurface {
        fn size(&self) -> Vec2 {
            self.size
        }

        fn clear_region(&mut self, origin: Vec2, extent: Vec2) {
            self.ctx.clear_rect(
                origin.x as f64,
                origin.y as f64,
                extent.x as f64,
                extent.y as f64,
            );
        }

        fn draw_disc(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill();
        }

        fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, radius: f32) {
            let size = (radius * 2.0) as f64;
            let x = (center.x - radius) as f64;
            let y = (center.y - radius) as f64;
            match sprite {
                Sprite::Alien => {
                    let _ = self
                        .ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(
                            &self.alien,
                            x,
                            y,
                            size,
                            size,
                        );
                }
                Sprite::ExplosionFrame { frame, of } => {
                    // Horizontal strip, one frame per cell
                    let frame_width = self.explosion.width() as f64 / of.max(1) as f64;
                    let _ = self
                        .ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            &self.explosion,
                            frame as f64 * frame_width,
                            0.0,
                            frame_width,
                            self.explosion.height() as f64,
                            x,
                            y,
                            size,
                            size,
                        );
                }
            }
        }

        fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, anchor: TextAnchor) {
            self.ctx.set_font("20px Arial");
            self.ctx.set_fill_style_str(&color.css());
            match anchor {
                TextAnchor::Center => {
                    self.ctx.set_text_align("center");
                    self.ctx.set_text_baseline("middle");
                }
                TextAnchor::TopLeft => {
                    self.ctx.set_text_align("left");
                    self.ctx.set_text_baseline("top");
                }
            }
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }
    }

    /// LocalStorage-backed store
    struct LocalStore {
        storage: web_sys::Storage,
    }

    impl KeyValueStore for LocalStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) {
            let _ = self.storage.set_item(key, value);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: SessionState,
        surface: CanvasSurface,
        store: LocalStore,
        record: BestScore,
        input: TickInput,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Alien Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fill the browser window, like the original page did
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let alien = HtmlImageElement::new().expect("image element");
        alien.set_src("/img/Alien.png");
        let explosion = HtmlImageElement::new().expect("image element");
        explosion.set_src("/img/Explosion.png");

        let bounds = Vec2::new(width as f32, height as f32);
        let surface = CanvasSurface {
            ctx,
            size: bounds,
            alien,
            explosion,
        };

        let storage = window
            .local_storage()
            .expect("storage lookup failed")
            .expect("no local storage");
        let store = LocalStore { storage };

        let settings = Settings::load(&store);
        let record = BestScore::load(&store);

        let seed = js_sys::Date::now() as u64;
        let state = SessionState::new(
            settings.mode.mode(),
            Tuning::default(),
            bounds,
            seed,
            record.best,
        );
        log::info!(
            "session started: mode {}, seed {}",
            settings.mode.as_str(),
            seed
        );

        let game = Rc::new(RefCell::new(Game {
            state,
            surface,
            store,
            record,
            input: TickInput::default(),
        }));

        setup_pointer_handlers(&canvas, game.clone());
        request_animation_frame(game);
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click: pop targets. Coordinates are viewport-relative; translate
        // by the canvas origin into drawing-surface space.
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().input.pointer_downs.push(Vec2::new(x, y));
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move: circle-variant coordinate readout
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().input.pointer_move = Some(Vec2::new(x, y));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let finished = {
            let mut g = game.borrow_mut();
            let input = std::mem::take(&mut g.input);
            let g = &mut *g;
            tick(&mut g.state, &input);
            draw_frame(&mut g.surface, &g.state);
            g.state.phase == GamePhase::GameOver
        };

        // Reschedule unless terminal
        if finished {
            finish(&game);
        } else {
            request_animation_frame(game);
        }
    }

    /// One-shot terminal transition: persist the record, notify, and force
    /// a full restart (no in-place resume).
    fn finish(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        let score = g.state.score;
        let g = &mut *g;
        if g.record.submit(score, &mut g.store) {
            log::info!("new best score: {}", score);
        }

        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("Game Over! Score: {score}"));
            let _ = window.location().reload();
        }
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;

    use alien_pop::platform::MemStore;
    use alien_pop::sim::{GameMode, GamePhase, SessionState, TickInput, tick};
    use alien_pop::{BestScore, Tuning};

    env_logger::init();
    log::info!("Alien Pop (native) starting...");

    // Headless smoke run: a scripted player clicks the oldest target once
    // every 30 ticks until something slips past the top edge.
    let mut store = MemStore::new();
    let mut record = BestScore::load(&store);

    let bounds = Vec2::new(1280.0, 800.0);
    let mut state = SessionState::new(GameMode::aliens(), Tuning::default(), bounds, 42, record.best);

    while state.phase == GamePhase::Running && state.ticks < 100_000 {
        let input = if state.ticks % 30 == 0 {
            TickInput {
                pointer_downs: state
                    .population
                    .targets()
                    .first()
                    .map(|t| vec![t.pos])
                    .unwrap_or_default(),
                ..Default::default()
            }
        } else {
            TickInput::default()
        };
        tick(&mut state, &input);
    }

    log::info!(
        "demo run ended after {} ticks: score {}, level {}",
        state.ticks,
        state.score,
        state.level
    );
    if record.submit(state.score, &mut store) {
        log::info!("demo best score recorded: {}", record.best);
    }
}
