use fontdue::layout::GlyphRasterConfig;
use tiny_skia::{Mask, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

use crate::paint::Color;
use crate::raster::common::CachedGlyph;
use crate::raster::{RasterError, Rasterizer};
use crate::scene::shapes::TextCmd;

impl Rasterizer<'_> {
    /// Fills each glyph's coverage with the text color.
    ///
    /// Glyphs absent from the font come through as glyph 0 and draw the
    /// font's `.notdef` shape. Glyphs whose box misses the canvas are never
    /// rasterized.
    pub(in crate::raster) fn draw_text(&mut self, cmd: &TextCmd, mask: Option<&Mask>) -> Result<(), RasterError> {
        if cmd.color.is_transparent() || cmd.text.is_empty() || !(cmd.style.size > 0.0) {
            return Ok(());
        }
        let fonts = self.fonts;
        let font = fonts.get(cmd.font).ok_or(RasterError::UnknownFont(cmd.font))?;
        let run = fonts
            .shape(cmd.font, &cmd.text, cmd.style, cmd.block)
            .ok_or(RasterError::UnknownFont(cmd.font))?;
        let font_hash = font.file_hash();
        let px = cmd.style.size;
        let (canvas_w, canvas_h) = (self.width() as i64, self.height() as i64);

        for placement in run {
            let m = font.metrics_indexed(placement.glyph, px);
            if m.width == 0 || m.height == 0 {
                continue;
            }
            let left = placement.x.round() as i64 + i64::from(m.xmin);
            let top = placement.baseline.round() as i64 - (i64::from(m.ymin) + m.height as i64);
            let visible = left < canvas_w
                && top < canvas_h
                && left + m.width as i64 > 0
                && top + m.height as i64 > 0;
            if !visible {
                continue;
            }

            let key = GlyphRasterConfig { glyph_index: placement.glyph, px, font_hash };
            let glyph = self.glyph_cache.entry(key).or_insert_with(|| {
                let (metrics, coverage) = font.rasterize_indexed(placement.glyph, px);
                CachedGlyph { metrics, coverage }
            });
            let Some(layer) = glyph_layer(glyph, cmd.color) else {
                continue;
            };
            self.pixmap.draw_pixmap(left as i32, top as i32, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), mask);
        }
        Ok(())
    }
}

/// Tints a coverage bitmap into a premultiplied pixmap.
fn glyph_layer(glyph: &CachedGlyph, color: Color) -> Option<Pixmap> {
    let m = glyph.metrics;
    let mut layer = Pixmap::new(m.width as u32, m.height as u32)?;
    for (px, &coverage) in layer.pixels_mut().iter_mut().zip(&glyph.coverage) {
        if coverage == 0 {
            continue;
        }
        let k = coverage as f32;
        let q = |v: f32| (v * k).round().clamp(0.0, 255.0) as u8;
        *px = PremultipliedColorU8::from_rgba(q(color.r), q(color.g), q(color.b), q(color.a))
            .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
    Some(layer)
}
