use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;
use tiny_skia::{Mask, Pixmap};

use crate::paint::Paint;
use crate::scene::{ClipId, DrawCmd, DrawList};
use crate::text::FontSystem;

use super::RasterError;
use super::common::{self, CachedGlyph};

/// Rasterizer configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RasterOptions {
    /// Anti-alias shape edges and clip masks.
    pub anti_alias: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { anti_alias: true }
    }
}

/// Paints draw lists into an owned pixmap.
///
/// One rasterizer serves one render: create it at canvas size, fill the
/// background, draw, then [`finish`](Self::finish) to take the pixels.
/// Glyph coverage bitmaps are cached for the rasterizer's lifetime, keyed by
/// `fontdue::layout::GlyphRasterConfig` (font, glyph, pixel size).
pub struct Rasterizer<'f> {
    pub(super) pixmap: Pixmap,
    pub(super) fonts: &'f FontSystem,
    pub(super) options: RasterOptions,

    // one slot per clip scope of the list being drawn
    masks: Vec<Option<Mask>>,

    pub(super) glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
}

impl<'f> Rasterizer<'f> {
    pub fn new(
        width: u32,
        height: u32,
        fonts: &'f FontSystem,
        options: RasterOptions,
    ) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::Surface { width, height })?;
        Ok(Self {
            pixmap,
            fonts,
            options,
            masks: Vec::new(),
            glyph_cache: HashMap::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Replaces every pixel with `paint`. Gradients span the whole canvas.
    pub fn fill_background(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.pixmap.fill(common::sk_color(*color)),
            Paint::LinearGradient(_) => {
                self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
                let canvas = crate::coords::Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32);
                let Some(rect) = common::sk_rect(canvas) else {
                    return;
                };
                let Some(shader) = common::shader(paint, canvas) else {
                    return;
                };
                let sk_paint = tiny_skia::Paint { shader, anti_alias: false, ..tiny_skia::Paint::default() };
                self.pixmap.fill_rect(rect, &sk_paint, tiny_skia::Transform::identity(), None);
            }
        }
    }

    /// Paints every item of `list` in order.
    pub fn draw_list(&mut self, list: &DrawList) -> Result<(), RasterError> {
        self.masks.clear();
        self.masks.resize_with(list.clips().len(), || None);

        for item in list.items() {
            if let Some(clip) = item.clip {
                self.ensure_mask(list, clip)?;
            }
            // Take the mask out so shape code can borrow the pixmap mutably.
            let mask = match item.clip {
                Some(id) => self.masks.get_mut(id.index()).and_then(Option::take),
                None => None,
            };
            let result = self.draw(&item.cmd, mask.as_ref());
            if let (Some(id), Some(mask)) = (item.clip, mask) {
                self.masks[id.index()] = Some(mask);
            }
            result?;
        }

        log::trace!(
            "rasterized {} items ({} clip scopes, {} cached glyphs)",
            list.len(),
            list.clips().len(),
            self.glyph_cache.len()
        );
        Ok(())
    }

    fn draw(&mut self, cmd: &DrawCmd, mask: Option<&Mask>) -> Result<(), RasterError> {
        match cmd {
            DrawCmd::RoundedRect(c) => self.draw_rounded_rect(c, mask),
            DrawCmd::Shadow(c) => self.draw_shadow(c, mask),
            DrawCmd::Line(c) => self.draw_line(c, mask),
            DrawCmd::Text(c) => self.draw_text(c, mask),
        }
    }

    /// Builds the coverage mask of `id`: its outline intersected with every
    /// enclosing scope. An outline with no area hides everything inside it.
    fn ensure_mask(&mut self, list: &DrawList, id: ClipId) -> Result<(), RasterError> {
        if self.masks.get(id.index()).is_some_and(Option::is_some) {
            return Ok(());
        }
        let clip = list.clip(id).ok_or(RasterError::UnknownClip(id.index()))?;

        let (width, height) = (self.width(), self.height());
        let inherited = match clip.parent {
            Some(parent) => {
                self.ensure_mask(list, parent)?;
                self.masks.get(parent.index()).cloned().flatten()
            }
            None => None,
        };

        let path = common::outline_path(clip.outline);
        let aa = self.options.anti_alias;
        let identity = tiny_skia::Transform::identity();
        let mask = match (inherited, path) {
            (Some(mut mask), Some(path)) => {
                mask.intersect_path(&path, tiny_skia::FillRule::Winding, aa, identity);
                mask
            }
            (None, Some(path)) => {
                let mut mask = Mask::new(width, height).ok_or(RasterError::Surface { width, height })?;
                mask.fill_path(&path, tiny_skia::FillRule::Winding, aa, identity);
                mask
            }
            (_, None) => Mask::new(width, height).ok_or(RasterError::Surface { width, height })?,
        };

        let slot = self.masks.get_mut(id.index()).ok_or(RasterError::UnknownClip(id.index()))?;
        *slot = Some(mask);
        Ok(())
    }

    /// Hands over the painted pixels (premultiplied RGBA8).
    pub fn finish(self) -> Pixmap {
        self.pixmap
    }
}
