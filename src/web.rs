//! Browser bindings: canvas setup, the resize subscription and the
//! `requestAnimationFrame` driver loop.
//!
//! The field, the RNG and the canvas surface live together in one `App`
//! value behind a shared `Rc<RefCell<..>>` handle; the frame closure and the
//! resize listener each hold a clone. Frames are never re-entrant (the next
//! one is only scheduled after the current one returns), so a resize landing
//! between frames simply means the next frame sees the re-seeded field.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window, window};

use crate::field::{PARTICLE_COUNT, ParticleField};
use crate::render::{Rgba, Surface, render};

const CANVAS_ID: &str = "constellation-canvas";
const CANVAS_STYLE: &str =
    "position:fixed; inset:0; width:100%; height:100%; z-index:-1; pointer-events:none;";

// --- Canvas surface ----------------------------------------------------------

/// [`Surface`] over a canvas 2D context.
struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

fn css_color(color: Rgba) -> String {
    format!("rgba({},{},{},{})", color.r, color.g, color.b, color.a)
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        self.ctx.fill();
    }

    fn line_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgba, width: f64) {
        self.ctx.set_stroke_style_str(&css_color(color));
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
    }
}

// --- App state & entry -------------------------------------------------------

struct App {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    field: ParticleField,
    rng: SmallRng,
}

/// Mount the backdrop: create (or reuse) the fullscreen canvas, seed the
/// field from the current viewport, hook the resize listener and start the
/// frame loop.
pub(crate) fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the backdrop canvas (a second mount must not stack another).
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_attribute("style", CANVAS_STYLE).ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };

    let (width, height) = viewport_size(&win)?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let mut rng = seeded_rng(&win);
    let field = ParticleField::new(PARTICLE_COUNT, width, height, &mut rng)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let app = Rc::new(RefCell::new(App {
        canvas,
        surface: CanvasSurface { ctx },
        field,
        rng,
    }));

    hook_resize(&win, app.clone())?;
    schedule_frames(app);
    Ok(())
}

fn viewport_size(win: &Window) -> Result<(f64, f64), JsValue> {
    let width = win.inner_width()?.as_f64().unwrap_or(0.0);
    let height = win.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

/// Seed from `performance.now()`; the sub-millisecond fraction differs per
/// page load (not crypto secure).
fn seeded_rng(win: &Window) -> SmallRng {
    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    SmallRng::seed_from_u64(now.to_bits())
}

// --- Resize subscription -----------------------------------------------------

fn hook_resize(win: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let Some(win) = window() else { return };
        let Ok((width, height)) = viewport_size(&win) else { return };
        if let Ok(mut app) = app.try_borrow_mut() {
            let app = &mut *app;
            app.canvas.set_width(width as u32);
            app.canvas.set_height(height as u32);
            // A collapsed viewport (0x0 mid-rotation) keeps the previous
            // field until a real size arrives.
            let _ = app.field.resize(width, height, &mut app.rng);
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- Frame loop --------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// One `advance` + `render` cycle per animation frame, forever. Pacing is
/// owned entirely by `requestAnimationFrame`; the closure re-requests itself
/// at the end of every cycle.
fn schedule_frames(app: Rc<RefCell<App>>) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if let Ok(mut app) = app.try_borrow_mut() {
            let app = &mut *app;
            let width = app.canvas.width() as f64;
            let height = app.canvas.height() as f64;
            app.surface.clear(width, height);
            app.field.advance();
            render(&app.field, &mut app.surface);
        }
        if let Some(w) = window() {
            let _ = w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
