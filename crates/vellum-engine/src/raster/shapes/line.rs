use tiny_skia::{LineCap, Mask, Stroke, Transform};

use crate::raster::{RasterError, Rasterizer, common};
use crate::scene::shapes::LineCmd;

impl Rasterizer<'_> {
    /// Strokes the segment with butt caps.
    pub(in crate::raster) fn draw_line(&mut self, cmd: &LineCmd, mask: Option<&Mask>) -> Result<(), RasterError> {
        if !(cmd.width > 0.0) || cmd.color.is_transparent() {
            return Ok(());
        }
        let Some(path) = common::line_path(cmd.from, cmd.to) else {
            return Ok(());
        };

        let mut sk_paint = tiny_skia::Paint::default();
        sk_paint.set_color(common::sk_color(cmd.color));
        sk_paint.anti_alias = self.options.anti_alias;
        let stroke = Stroke { width: cmd.width, line_cap: LineCap::Butt, ..Stroke::default() };

        self.pixmap.stroke_path(&path, &sk_paint, &stroke, Transform::identity(), mask);
        Ok(())
    }
}
