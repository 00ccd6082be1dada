use tiny_skia::{FillRule, Mask, Stroke, Transform};

use crate::raster::common;
use crate::raster::{RasterError, Rasterizer};
use crate::scene::shapes::RoundedRectCmd;

impl Rasterizer<'_> {
    /// Fill, then border stroked centered on the same outline.
    pub(in crate::raster) fn draw_rounded_rect(
        &mut self,
        cmd: &RoundedRectCmd,
        mask: Option<&Mask>,
    ) -> Result<(), RasterError> {
        let Some(path) = common::rounded_rect_path(cmd.rect, cmd.radii) else {
            return Ok(());
        };

        if let Some(paint) = cmd.paint.as_ref().filter(|p| !p.is_invisible()) {
            if let Some(shader) = common::shader(paint, cmd.rect.normalized()) {
                let sk_paint = tiny_skia::Paint {
                    shader,
                    anti_alias: self.options.anti_alias,
                    ..tiny_skia::Paint::default()
                };
                self.pixmap.fill_path(&path, &sk_paint, FillRule::Winding, Transform::identity(), mask);
            }
        }

        if let Some(border) = cmd.border.as_ref().filter(|b| !b.is_invisible()) {
            let mut sk_paint = tiny_skia::Paint::default();
            sk_paint.set_color(common::sk_color(border.color));
            sk_paint.anti_alias = self.options.anti_alias;
            let stroke = Stroke { width: border.width, ..Stroke::default() };
            self.pixmap.stroke_path(&path, &sk_paint, &stroke, Transform::identity(), mask);
        }

        Ok(())
    }
}
