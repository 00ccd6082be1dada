//! Font loading and glyph shaping.
//!
//! [`FontSystem`] owns parsed fonts addressed by name or [`FontId`].
//! [`GlyphRun`] turns a string into positioned glyphs lazily; the layout pass
//! measures text with the same iterator the rasterizer draws from.

mod font_system;
mod shaper;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use shaper::{GlyphPlacement, GlyphRun, TextAlign, TextStyle};
