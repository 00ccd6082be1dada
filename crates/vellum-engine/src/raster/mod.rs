//! CPU rasterization subsystem.
//!
//! The [`Rasterizer`] consumes a `scene` draw stream and paints it into a
//! tiny-skia pixmap. Each shape module under `raster::shapes` owns the
//! drawing of its own command variant.
//!
//! Convention:
//! - geometry is in canvas pixels (top-left origin, +Y down)
//! - the pixmap holds premultiplied RGBA8
//! - clip scopes become coverage masks built on first use

mod blur;
mod canvas;
mod common;
mod shapes;

pub use canvas::{RasterOptions, Rasterizer};

use thiserror::Error;

use crate::text::FontId;

/// Failure while painting a draw list.
///
/// These indicate an inconsistent draw list or an allocation problem, never
/// bad user input: geometry that cannot be drawn (empty, degenerate) is
/// skipped silently.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RasterError {
    #[error("cannot allocate a {width}×{height} surface")]
    Surface { width: u32, height: u32 },
    #[error("draw command references unknown font {0:?}")]
    UnknownFont(FontId),
    #[error("draw command references unknown clip scope #{0}")]
    UnknownClip(usize),
}
