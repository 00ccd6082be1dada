//! Vellum engine crate.
//!
//! Renderer-agnostic pieces below the scene format: geometry, paint sources,
//! fonts and glyph shaping, the draw stream, the tiny-skia rasterizer and the
//! PNG encoder. The scene crate builds on these; nothing here knows about
//! JSON documents.

pub mod coords;
pub mod encode;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod scene;
pub mod text;
