use log::debug;
use vellum_engine::encode::{Compression, encode_png};
use vellum_engine::raster::{RasterOptions, Rasterizer};
use vellum_engine::scene::DrawList;
use vellum_engine::text::FontSystem;

use crate::FontMap;
use crate::decode::{self, canvas_pixels};
use crate::error::RenderError;
use crate::layout;
use crate::model::SceneDocument;
use crate::painter::Painter;

/// Knobs for a render call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Largest accepted canvas side in pixels.
    pub max_canvas_side: u32,
    pub compression: Compression,
    pub anti_alias: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { max_canvas_side: 16_384, compression: Compression::Default, anti_alias: true }
    }
}

/// Document → PNG pipeline with fixed options.
///
/// Holds no per-render state; one `Renderer` may serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Decodes `json`, parses its fonts and renders it.
    pub fn render(&self, json: &str, fonts: &FontMap) -> Result<Vec<u8>, RenderError> {
        let document = decode::decode_with_options(json, fonts, &self.options)?;
        let fonts = decode::load_fonts(&document)?;
        self.render_document(&document, &fonts)
    }

    /// Renders an already decoded document with fonts parsed by the caller.
    ///
    /// The document's own `font_set` is not consulted; text resolves against
    /// `fonts` only.
    pub fn render_document(&self, document: &SceneDocument, fonts: &FontSystem) -> Result<Vec<u8>, RenderError> {
        decode::validate(document, &self.options)?;

        let tree = layout::resolve(document, fonts)?;

        let mut list = DrawList::new();
        Painter::new(&mut list).paint_tree(&tree)?;

        let (width, height) = canvas_pixels(document);
        let raster_options = RasterOptions { anti_alias: self.options.anti_alias };
        let mut rasterizer = Rasterizer::new(width, height, fonts, raster_options)?;
        if let Some(background) = &document.background {
            rasterizer.fill_background(&background.to_paint());
        }
        rasterizer.draw_list(&list)?;

        let png = encode_png(&rasterizer.finish(), self.options.compression)?;
        debug!("rendered {width}×{height} scene into {} PNG bytes", png.len());
        Ok(png)
    }
}
