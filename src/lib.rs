//! Constellation backdrop core crate.
//!
//! A full-viewport canvas particle field for the portfolio page: drifting
//! dots, proximity links between nearby dots, re-seeded on every window
//! resize. The simulation (`field`) and the drawing pass (`render`) are pure
//! Rust and test natively; `web` binds them to the canvas, the resize event
//! and `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

pub mod field;
pub mod render;
mod web;

pub use field::{FieldError, PARTICLE_COUNT, Particle, ParticleField};
pub use render::{LINK_DISTANCE, LINK_WIDTH, Rgba, Surface, link_alpha, render};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Mount the animated backdrop into the current page.
#[wasm_bindgen]
pub fn start_backdrop() -> Result<(), JsValue> {
    web::mount()
}
