use crate::coords::{Rect, Vec2};

use super::Color;

/// Where a stop sits along the gradient line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StopOffset {
    /// Fraction of the gradient line, `0.0` at the start and `1.0` at the end.
    Fraction(f32),
    /// Absolute distance in pixels from the start of the gradient line.
    Pixels(f32),
}

impl StopOffset {
    /// Resolves the offset to a fraction of a line `length` pixels long.
    #[inline]
    pub fn resolve(self, length: f32) -> f32 {
        match self {
            StopOffset::Fraction(t) => t,
            StopOffset::Pixels(px) if length > 0.0 => px / length,
            StopOffset::Pixels(_) => 0.0,
        }
    }
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: StopOffset,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: StopOffset, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Angle-based linear gradient, resolved against the box it fills.
///
/// Angle convention (degrees, CSS): `0` points up, `90` right, `180` down.
/// The gradient line passes through the box center and is
/// `|w·sin θ| + |h·cos θ|` long, so offsets `0.0` and `1.0` land exactly on
/// opposite corners (or edges, for axis-aligned angles).
///
/// Stops may be given in any order; [`resolved_stops`](Self::resolved_stops)
/// sorts them stably by resolved position.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub angle: f32,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(angle: f32, stops: Vec<ColorStop>) -> Self {
        Self { angle, stops }
    }

    /// Start and end points of the gradient line across `rect`.
    pub fn line(&self, rect: Rect) -> (Vec2, Vec2) {
        let theta = self.angle.to_radians();
        let (sin, cos) = theta.sin_cos();
        let dir = Vec2::new(sin, -cos);
        let half = Self::line_length(rect, self.angle) * 0.5;
        let center = rect.center();
        (center - dir * half, center + dir * half)
    }

    /// Length of the gradient line for `angle` across `rect`.
    #[inline]
    pub fn line_length(rect: Rect, angle: f32) -> f32 {
        let (sin, cos) = angle.to_radians().sin_cos();
        (rect.width() * sin).abs() + (rect.height() * cos).abs()
    }

    /// Stops as `(t, color)` pairs for a line `length` pixels long.
    ///
    /// Positions are clamped into `[0, 1]` and sorted; equal positions keep
    /// their document order.
    pub fn resolved_stops(&self, length: f32) -> Vec<(f32, Color)> {
        let mut out: Vec<(f32, Color)> = self
            .stops
            .iter()
            .map(|s| {
                let t = s.offset.resolve(length);
                (if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }, s.color)
            })
            .collect();
        out.sort_by(|a, b| a.0.total_cmp(&b.0));
        out
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.angle.is_finite()
            && self.stops.len() >= 2
            && self.stops.iter().all(|s| s.color.is_finite())
    }

    /// Color of the first stop along a line `length` pixels long.
    ///
    /// Fills boxes too thin to carry a gradient line. Transparent when there
    /// are no stops.
    pub fn start_color(&self, length: f32) -> Color {
        self.resolved_stops(length).first().map_or(Color::transparent(), |&(_, c)| c)
    }
}
