//! Shared tiny-skia conversions used by all shape painters.

use tiny_skia::{GradientStop, Path, PathBuilder, Point, Shader, SpreadMode, Transform};

use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::{Color, Paint};
use crate::scene::Outline;

/// Cubic control-point offset approximating a quarter circle.
pub(super) const KAPPA: f32 = 0.552_284_8;

// ── colors and shaders ────────────────────────────────────────────────────

pub(super) fn sk_color(color: Color) -> tiny_skia::Color {
    let (r, g, b, a) = color.to_straight();
    tiny_skia::Color::from_rgba(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0), a.clamp(0.0, 1.0))
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

pub(super) fn sk_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.normalized();
    tiny_skia::Rect::from_xywh(rect.origin.x, rect.origin.y, rect.width(), rect.height())
}

/// Shader painting `paint` across `rect`.
///
/// Gradients are laid along their angle through `rect`. A box too thin to
/// carry a gradient line, or a gradient that cannot build a shader, fills
/// with its first stop's color.
pub(super) fn shader(paint: &Paint, rect: Rect) -> Option<Shader<'static>> {
    match paint {
        Paint::Solid(color) => Some(Shader::SolidColor(sk_color(*color))),
        Paint::LinearGradient(gradient) => {
            let length = crate::paint::LinearGradient::line_length(rect, gradient.angle);
            let stops = gradient.resolved_stops(length);
            if stops.is_empty() {
                return None;
            }
            let start_color = Shader::SolidColor(sk_color(gradient.start_color(length)));
            if !(length > f32::EPSILON) || !gradient.is_valid() {
                return Some(start_color);
            }

            let (start, end) = gradient.line(rect);
            let sk_stops: Vec<GradientStop> =
                stops.iter().map(|&(t, c)| GradientStop::new(t, sk_color(c))).collect();
            tiny_skia::LinearGradient::new(
                Point::from_xy(start.x, start.y),
                Point::from_xy(end.x, end.y),
                sk_stops,
                SpreadMode::Pad,
                Transform::identity(),
            )
            .or(Some(start_color))
        }
    }
}

// ── paths ─────────────────────────────────────────────────────────────────

/// Closed path of an outline, `None` when it covers no area.
pub(super) fn outline_path(outline: Outline) -> Option<Path> {
    match outline {
        Outline::RoundedRect { rect, radii } => rounded_rect_path(rect, radii),
        Outline::Segment { from, to, width } => segment_path(from, to, width),
    }
}

/// Rounded rectangle path with radii fitted to the box.
pub(super) fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> Option<Path> {
    let rect = rect.normalized();
    if rect.is_empty() || !rect.is_finite() {
        return None;
    }
    let r = radii.fitted(rect.size);
    if r.is_zero() {
        return sk_rect(rect).map(PathBuilder::from_rect);
    }

    let (x0, y0, x1, y1) = (rect.origin.x, rect.origin.y, rect.right(), rect.bottom());
    // Distance from a corner's tangent point to its nearest control point.
    let k = |radius: f32| radius * (1.0 - KAPPA);

    let mut pb = PathBuilder::new();
    pb.move_to(x0 + r.top_left, y0);

    pb.line_to(x1 - r.top_right, y0);
    if r.top_right > 0.0 {
        let t = r.top_right;
        pb.cubic_to(x1 - k(t), y0, x1, y0 + k(t), x1, y0 + t);
    }

    pb.line_to(x1, y1 - r.bottom_right);
    if r.bottom_right > 0.0 {
        let t = r.bottom_right;
        pb.cubic_to(x1, y1 - k(t), x1 - k(t), y1, x1 - t, y1);
    }

    pb.line_to(x0 + r.bottom_left, y1);
    if r.bottom_left > 0.0 {
        let t = r.bottom_left;
        pb.cubic_to(x0 + k(t), y1, x0, y1 - k(t), x0, y1 - t);
    }

    pb.line_to(x0, y0 + r.top_left);
    if r.top_left > 0.0 {
        let t = r.top_left;
        pb.cubic_to(x0, y0 + k(t), x0 + k(t), y0, x0 + t, y0);
    }

    pb.close();
    pb.finish()
}

/// Butt-capped segment as a filled quadrilateral.
pub(super) fn segment_path(from: Vec2, to: Vec2, width: f32) -> Option<Path> {
    let d = to - from;
    let len = d.length();
    if !(width > 0.0) || !(len > 0.0) || !len.is_finite() {
        return None;
    }
    // Unit normal scaled to half the stroke width.
    let n = Vec2::new(-d.y, d.x) * (width * 0.5 / len);

    let mut pb = PathBuilder::new();
    let corners = [from + n, to + n, to - n, from - n];
    pb.move_to(corners[0].x, corners[0].y);
    for c in &corners[1..] {
        pb.line_to(c.x, c.y);
    }
    pb.close();
    pb.finish()
}

/// Open two-point path for stroking.
pub(super) fn line_path(from: Vec2, to: Vec2) -> Option<Path> {
    if from == to || !from.is_finite() || !to.is_finite() {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    pb.finish()
}

// ── glyph cache ───────────────────────────────────────────────────────────

/// Coverage bitmap of one glyph at one pixel size.
#[derive(Debug, Clone)]
pub(super) struct CachedGlyph {
    pub metrics: fontdue::Metrics,
    pub coverage: Vec<u8>,
}
