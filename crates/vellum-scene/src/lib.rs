//! Vellum scene: JSON scene documents rendered to PNG on top of `vellum-engine`.
//!
//! # Quick start
//!
//! ```rust
//! use vellum_scene::{FontMap, render};
//!
//! let scene = r#"{
//!     "size": [64, 32],
//!     "background": [255, 255, 255, 255],
//!     "graphics": [
//!         {"type": "Rectangle", "value": {
//!             "position": [8, 8], "size": [48, 16], "corner": 8,
//!             "color": {"type": "Gradient", "value": {"angle": 90, "stops": [
//!                 {"position": 0, "color": [255, 0, 0, 255]},
//!                 {"position": 1, "color": [0, 0, 255, 255]}
//!             ]}}
//!         }}
//!     ]
//! }"#;
//!
//! let png = render(scene, &FontMap::new()).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```
//!
//! # Pipeline
//!
//! [`decode`] → [`layout::resolve`] → [`Painter`] (records a draw list) →
//! `vellum_engine::raster::Rasterizer` → `vellum_engine::encode`. Hosts that
//! render many documents with the same fonts can parse them once into a
//! `FontSystem` and call [`Renderer::render_document`].

use std::collections::HashMap;

pub mod decode;
pub mod error;
pub mod layout;
pub mod model;
pub mod painter;
pub mod renderer;

pub use decode::{decode, decode_with_options, load_fonts};
pub use error::RenderError;
pub use model::SceneDocument;
pub use painter::Painter;
pub use renderer::{RenderOptions, Renderer};
pub use vellum_engine::encode::Compression;

/// Font name → raw TrueType/OpenType bytes.
pub type FontMap = HashMap<String, Vec<u8>>;

/// Renders `document` to PNG bytes with default options.
pub fn render(document: &str, fonts: &FontMap) -> Result<Vec<u8>, RenderError> {
    Renderer::default().render(document, fonts)
}

/// Renders `document` to PNG bytes with `options`.
pub fn render_with_options(
    document: &str,
    fonts: &FontMap,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    Renderer::new(options.clone()).render(document, fonts)
}
