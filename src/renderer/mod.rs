//! Pixel-art rendering
//!
//! [`sprites`] holds the platform-free sprite geometry and palettes;
//! [`canvas`] draws them onto a 2D canvas and only exists on WASM.

pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
