use tiny_skia::{FillRule, Mask, Pixmap, PixmapPaint, Transform};

use crate::coords::Rect;
use crate::raster::{RasterError, Rasterizer, blur, common};
use crate::scene::shapes::ShadowCmd;

/// Smallest pixel budget granted to a shadow layer.
const MIN_LAYER_PIXELS: u64 = 1 << 24;

/// Blur radius → Gaussian standard deviation (box-shadow convention).
#[inline]
fn sigma_for(blur: f32) -> f32 {
    blur * 0.5
}

/// Largest useful sigma on a `width × height` canvas.
///
/// Once the 3σ falloff spans the canvas diagonal a wider blur only fades
/// the shadow further, so larger values are clamped here.
#[inline]
fn max_sigma(width: u32, height: u32) -> f32 {
    (width as f32).hypot(height as f32) / 3.0
}

/// Pixel budget for one shadow layer on a canvas of `canvas_pixels`.
#[inline]
fn layer_budget(canvas_pixels: u64) -> u64 {
    canvas_pixels.saturating_mul(4).max(MIN_LAYER_PIXELS)
}

impl Rasterizer<'_> {
    /// Paints the offset, spread silhouette, blurred through an offscreen
    /// pixmap large enough to hold the blur falloff.
    pub(in crate::raster) fn draw_shadow(
        &mut self,
        cmd: &ShadowCmd,
        mask: Option<&Mask>,
    ) -> Result<(), RasterError> {
        let silhouette = cmd.silhouette();
        if cmd.color.is_transparent() || silhouette.is_empty() {
            return Ok(());
        }
        let Some(path) = common::outline_path(silhouette) else {
            return Ok(());
        };

        let mut sk_paint = tiny_skia::Paint::default();
        sk_paint.set_color(common::sk_color(cmd.color));
        sk_paint.anti_alias = self.options.anti_alias;

        let sigma = sigma_for(cmd.blur).min(max_sigma(self.width(), self.height()));
        if !(sigma > 0.0) {
            self.pixmap.fill_path(&path, &sk_paint, FillRule::Winding, Transform::identity(), mask);
            return Ok(());
        }

        // 3σ covers the visible falloff on every side.
        let margin = (sigma * 3.0).ceil();
        let canvas = Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32).inflate(margin);
        let bounds = silhouette.bounds().inflate(margin);
        let Some(region) = intersect(bounds, canvas) else {
            return Ok(());
        };

        let x0 = region.origin.x.floor();
        let y0 = region.origin.y.floor();
        let w = (region.right() - x0).ceil().max(1.0) as u32;
        let h = (region.bottom() - y0).ceil().max(1.0) as u32;
        let canvas_pixels = u64::from(self.width()) * u64::from(self.height());
        if u64::from(w) * u64::from(h) > layer_budget(canvas_pixels) {
            return Err(RasterError::Surface { width: w, height: h });
        }
        let mut layer = Pixmap::new(w, h).ok_or(RasterError::Surface { width: w, height: h })?;

        layer.fill_path(&path, &sk_paint, FillRule::Winding, Transform::from_translate(-x0, -y0), None);
        blur::gaussian_blur(layer.data_mut(), w as usize, h as usize, sigma);

        self.pixmap.draw_pixmap(
            x0 as i32,
            y0 as i32,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            mask,
        );
        Ok(())
    }
}

fn intersect(a: Rect, b: Rect) -> Option<Rect> {
    let x0 = a.origin.x.max(b.origin.x);
    let y0 = a.origin.y.max(b.origin.y);
    let x1 = a.right().min(b.right());
    let y1 = a.bottom().min(b.bottom());
    (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Vec2};
    use crate::paint::Color;
    use crate::raster::RasterOptions;
    use crate::scene::{DrawList, Outline};
    use crate::text::FontSystem;

    fn render(list: &DrawList, w: u32, h: u32) -> Pixmap {
        let fonts = FontSystem::new();
        let mut r = Rasterizer::new(w, h, &fonts, RasterOptions::default()).unwrap();
        r.draw_list(list).unwrap();
        r.finish()
    }

    fn alpha(p: &Pixmap, x: u32, y: u32) -> u8 {
        p.pixel(x, y).map(|c| c.alpha()).unwrap_or(0)
    }

    #[test]
    fn hard_shadow_is_offset_silhouette() {
        let mut list = DrawList::new();
        list.push_shadow(
            Outline::rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), CornerRadii::zero()),
            Vec2::new(10.0, 10.0),
            0.0,
            0.0,
            Color::black(),
        );
        let p = render(&list, 30, 30);
        assert_eq!(alpha(&p, 5, 5), 0);
        assert_eq!(alpha(&p, 15, 15), 255);
    }

    #[test]
    fn blurred_shadow_fades_past_the_edge() {
        let mut list = DrawList::new();
        list.push_shadow(
            Outline::rounded_rect(Rect::new(20.0, 20.0, 40.0, 40.0), CornerRadii::zero()),
            Vec2::zero(),
            8.0,
            0.0,
            Color::black(),
        );
        let p = render(&list, 80, 80);
        let inside = alpha(&p, 40, 40);
        let edge = alpha(&p, 20, 40);
        let outside = alpha(&p, 16, 40);
        assert!(inside > edge, "{inside} {edge}");
        assert!(edge > outside, "{edge} {outside}");
        assert!(outside > 0);
        assert_eq!(alpha(&p, 2, 2), 0);
    }

    #[test]
    fn spread_widens_segment_shadow() {
        let mut list = DrawList::new();
        list.push_shadow(
            Outline::segment(Vec2::new(0.0, 10.0), Vec2::new(40.0, 10.0), 2.0),
            Vec2::zero(),
            0.0,
            4.0,
            Color::black(),
        );
        let p = render(&list, 40, 20);
        assert_eq!(alpha(&p, 20, 14), 255);
        assert_eq!(alpha(&p, 20, 17), 0);
    }

    #[test]
    fn huge_blur_is_clamped_to_the_canvas() {
        let mut list = DrawList::new();
        list.push_shadow(
            Outline::rounded_rect(Rect::new(2.0, 2.0, 5.0, 5.0), CornerRadii::zero()),
            Vec2::zero(),
            1.0e7,
            0.0,
            Color::black(),
        );
        let p = render(&list, 10, 10);
        assert_eq!((p.width(), p.height()), (10, 10));
        assert!(alpha(&p, 4, 4) > 0);
    }

    #[test]
    fn infinite_blur_is_clamped_too() {
        let mut list = DrawList::new();
        list.push_shadow(
            Outline::rounded_rect(Rect::new(2.0, 2.0, 5.0, 5.0), CornerRadii::zero()),
            Vec2::zero(),
            f32::INFINITY,
            0.0,
            Color::black(),
        );
        let p = render(&list, 10, 10);
        assert!(alpha(&p, 4, 4) > 0);
    }

    #[test]
    fn sigma_cap_follows_the_diagonal() {
        assert_eq!(max_sigma(30, 40), 50.0 / 3.0);
        assert_eq!(layer_budget(10), MIN_LAYER_PIXELS);
        assert_eq!(layer_budget(1 << 24), 1 << 26);
    }

    #[test]
    fn intersect_disjoint_is_none() {
        assert!(intersect(Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(10.0, 10.0, 5.0, 5.0)).is_none());
    }
}
