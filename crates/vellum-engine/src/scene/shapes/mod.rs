pub(crate) mod line;
pub(crate) mod rounded_rect;
pub(crate) mod shadow;
pub(crate) mod text;

pub use line::LineCmd;
pub use rounded_rect::RoundedRectCmd;
pub use shadow::ShadowCmd;
pub use text::TextCmd;

use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::Color;

/// Stroke drawn centered on the outline of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }

    /// True when stroking this border cannot change a pixel.
    #[inline]
    pub fn is_invisible(&self) -> bool {
        !(self.width > 0.0) || self.color.is_transparent()
    }
}

/// Closed silhouette used for shadows and clip scopes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Outline {
    /// Rounded rectangle; radii are fitted to the rect when rasterized.
    RoundedRect { rect: Rect, radii: CornerRadii },
    /// Butt-capped stroked segment.
    Segment { from: Vec2, to: Vec2, width: f32 },
}

impl Outline {
    #[inline]
    pub fn rounded_rect(rect: Rect, radii: CornerRadii) -> Self {
        Outline::RoundedRect { rect, radii }
    }

    #[inline]
    pub fn segment(from: Vec2, to: Vec2, width: f32) -> Self {
        Outline::Segment { from, to, width }
    }

    /// Grows the silhouette by `spread` pixels on every side.
    ///
    /// Negative spread shrinks it, never below zero extent.
    #[must_use]
    pub fn spread(self, spread: f32) -> Self {
        if spread == 0.0 {
            return self;
        }
        match self {
            Outline::RoundedRect { rect, radii } => Outline::RoundedRect {
                rect: rect.inflate(spread),
                radii: radii.expanded(spread),
            },
            Outline::Segment { from, to, width } => Outline::Segment {
                from,
                to,
                width: (width + 2.0 * spread).max(0.0),
            },
        }
    }

    /// Conservative axis-aligned bounds.
    pub fn bounds(self) -> Rect {
        match self {
            Outline::RoundedRect { rect, .. } => rect.normalized(),
            Outline::Segment { from, to, width } => {
                Rect::from_points(from, to).inflate(width.max(0.0) * 0.5)
            }
        }
    }

    /// True when the silhouette covers no area.
    pub fn is_empty(self) -> bool {
        match self {
            Outline::RoundedRect { rect, .. } => rect.is_empty(),
            Outline::Segment { from, to, width } => !(width > 0.0) || (to - from).length() == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_grows_rect_and_radii() {
        let o = Outline::rounded_rect(Rect::new(10.0, 10.0, 20.0, 20.0), CornerRadii::all(4.0));
        assert_eq!(
            o.spread(2.0),
            Outline::rounded_rect(Rect::new(8.0, 8.0, 24.0, 24.0), CornerRadii::all(6.0))
        );
    }

    #[test]
    fn spread_widens_segment() {
        let o = Outline::segment(Vec2::zero(), Vec2::new(10.0, 0.0), 4.0).spread(3.0);
        assert_eq!(o, Outline::segment(Vec2::zero(), Vec2::new(10.0, 0.0), 10.0));
    }

    #[test]
    fn segment_bounds_include_half_width() {
        let o = Outline::segment(Vec2::new(20.0, 20.0), Vec2::new(500.0, 80.0), 20.0);
        assert_eq!(o.bounds(), Rect::new(10.0, 10.0, 500.0, 80.0));
    }

    #[test]
    fn degenerate_outlines_are_empty() {
        assert!(Outline::segment(Vec2::zero(), Vec2::zero(), 5.0).is_empty());
        assert!(Outline::rounded_rect(Rect::new(0.0, 0.0, 0.0, 10.0), CornerRadii::zero()).is_empty());
    }
}
