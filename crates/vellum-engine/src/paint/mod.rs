//! Paint model shared between the scene decoder and the rasterizer.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - paint sources (solid, angle-based linear gradients)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, LinearGradient, StopOffset};

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Paint {
    /// True when painting this source can never change a pixel.
    #[inline]
    pub fn is_invisible(&self) -> bool {
        match self {
            Paint::Solid(c) => c.is_transparent(),
            Paint::LinearGradient(g) => g.stops.iter().all(|s| s.color.is_transparent()),
        }
    }
}
