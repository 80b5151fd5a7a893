//! Diagnostic drawing of a frustum and a query point into a CPU canvas.
//!
//! Purely a consumer of the classification core: it never feeds anything back.

pub mod canvas;
mod line_clip;
pub mod scene;

pub use canvas::{Canvas, Rect};
pub use scene::{render_scene, Panel};
