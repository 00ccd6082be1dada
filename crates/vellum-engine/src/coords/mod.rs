//! Coordinate and geometry types shared by the layout pass and the rasterizer.
//!
//! Canonical space:
//! - Pixels of the output canvas
//! - Origin top-left
//! - +X right, +Y down

mod corner_radii;
mod rect;
mod vec2;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
