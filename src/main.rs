//! Neon Pinball entry point
//!
//! Browser: binds the canvas, buttons and keyboard, then runs the frame loop
//! on `requestAnimationFrame`. Native: plays a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use neon_pinball::Game;
    use neon_pinball::render::DrawCmd;
    use neon_pinball::ui::HudUpdate;

    /// Replay a draw list on the 2D context
    fn paint(ctx: &CanvasRenderingContext2d, canvas_w: f64, canvas_h: f64, cmds: &[DrawCmd]) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, 0.0, canvas_w, canvas_h);
                }
                DrawCmd::Line {
                    from,
                    to,
                    color,
                    width,
                    round_cap,
                } => {
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    ctx.set_line_cap(if *round_cap { "round" } else { "butt" });
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    fill,
                    outline,
                } => {
                    ctx.set_fill_style_str(fill);
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                    if let Some((color, line_width)) = outline {
                        ctx.set_stroke_style_str(color);
                        ctx.set_line_width(*line_width as f64);
                        ctx.stroke();
                    }
                }
                DrawCmd::DashedRect {
                    origin,
                    size,
                    color,
                    width,
                    dash,
                } => {
                    let pattern = js_sys::Array::of2(&dash[0].into(), &dash[1].into());
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    let _ = ctx.set_line_dash(&pattern);
                    ctx.stroke_rect(
                        origin.x as f64,
                        origin.y as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                    let _ = ctx.set_line_dash(&js_sys::Array::new());
                }
            }
        }
    }

    /// Push HUD changes into the page
    fn apply_hud(document: &Document, updates: &[HudUpdate]) {
        for update in updates {
            match update {
                HudUpdate::Score(v) => set_text(document, "score", &v.to_string()),
                HudUpdate::Level(v) => set_text(document, "level", &v.to_string()),
                HudUpdate::Lives(v) => set_text(document, "lives", &v.to_string()),
                HudUpdate::ShowOverlay(text) => {
                    if let Some(el) = document.get_element_by_id("gameOverMessage") {
                        el.set_text_content(Some(text));
                        let _ = el.class_list().add_1("show");
                    }
                }
                HudUpdate::HideOverlay => {
                    if let Some(el) = document.get_element_by_id("gameOverMessage") {
                        let _ = el.class_list().remove_1("show");
                    }
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    struct Page {
        game: Game,
        ctx: CanvasRenderingContext2d,
        document: Document,
        width: f64,
        height: f64,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Neon Pinball starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let page = Rc::new(RefCell::new(Page {
            game: Game::new(seed),
            ctx,
            document: document.clone(),
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_buttons(&document, page.clone())?;
        setup_keyboard(&document, page.clone())?;

        request_animation_frame(page);

        log::info!("Neon Pinball running!");
        Ok(())
    }

    fn setup_buttons(document: &Document, page: Rc<RefCell<Page>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                page.borrow_mut().game.start();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("No #startBtn element");
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                page.borrow_mut().game.reset();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("No #resetBtn element");
        }
        Ok(())
    }

    fn setup_keyboard(document: &Document, page: Rc<RefCell<Page>>) -> Result<(), JsValue> {
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = page.borrow_mut().game.key_down(&event.key()) {
                    if control.prevents_default() {
                        event.prevent_default();
                    }
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            page.borrow_mut().game.key_up(&event.key());
        });
        document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(page, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(page: Rc<RefCell<Page>>, time: f64) {
        {
            let mut p = page.borrow_mut();
            let frame = p.game.frame(time);
            paint(&p.ctx, p.width, p.height, &frame.draw);
            apply_hud(&p.document, &frame.hud);
        }

        request_animation_frame(page);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::ops::ControlFlow;

    use neon_pinball::sim::GameEvent;
    use neon_pinball::{FixedClock, Game, Tuning, run};

    env_logger::init();
    log::info!("Neon Pinball (native) starting...");
    log::info!("Native mode plays a headless demo - serve the wasm build for the real table");

    // Usage: neon-pinball [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let mut game = Game::with_tuning(seed, tuning);
    game.autoplay = true;
    game.start();

    // Ten minutes of play at 60 Hz, or until the last ball drains
    let mut clock = FixedClock::new().limit(60 * 60 * 10);
    let mut over = false;
    let frames = run(&mut game, &mut clock, |_, frame| {
        for event in &frame.events {
            match event {
                GameEvent::BallLost { lives_left } => log::info!("Ball lost, {} left", lives_left),
                GameEvent::GameOver { score } => {
                    log::info!("Game over, final score {}", score);
                    over = true;
                }
                _ => {}
            }
        }
        if over {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    let state = game.state();
    println!(
        "Played {} frames: score {}, lives {}{}",
        frames,
        state.score,
        state.lives,
        if over { " (game over)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
