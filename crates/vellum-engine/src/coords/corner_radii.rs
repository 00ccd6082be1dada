use super::Vec2;

/// Per-corner radii for a rounded rectangle (pixels).
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
/// Use [`fitted`](Self::fitted) before building geometry; raw values may be
/// negative or larger than the box.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// No rounding.
    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.top_left <= 0.0
            && self.top_right <= 0.0
            && self.bottom_right <= 0.0
            && self.bottom_left <= 0.0
    }

    /// Clamps every radius into `[0, min(w, h) / 2]`.
    ///
    /// Oversized radii therefore degrade into a pill (or a circle for square
    /// boxes). A zero-sized box yields zero radii.
    #[must_use]
    pub fn fitted(self, size: Vec2) -> Self {
        let limit = (size.x.min(size.y) * 0.5).max(0.0);
        let fit = |r: f32| if r.is_finite() { r.clamp(0.0, limit) } else { limit };
        Self::new(
            fit(self.top_left),
            fit(self.top_right),
            fit(self.bottom_right),
            fit(self.bottom_left),
        )
    }

    /// Grows (or shrinks) every non-zero radius by `d`, as box-shadow spread does.
    #[must_use]
    pub fn expanded(self, d: f32) -> Self {
        let grow = |r: f32| if r > 0.0 { (r + d).max(0.0) } else { 0.0 };
        Self::new(
            grow(self.top_left),
            grow(self.top_right),
            grow(self.bottom_right),
            grow(self.bottom_left),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_clamps_to_half_shorter_side() {
        let radii = CornerRadii::all(500.0).fitted(Vec2::new(200.0, 60.0));
        assert_eq!(radii, CornerRadii::all(30.0));
    }

    #[test]
    fn fitted_keeps_small_radii_and_drops_negative() {
        let radii = CornerRadii::new(4.0, -3.0, 12.0, 0.0).fitted(Vec2::new(100.0, 100.0));
        assert_eq!(radii, CornerRadii::new(4.0, 0.0, 12.0, 0.0));
    }

    #[test]
    fn fitted_zero_box_is_zero() {
        let radii = CornerRadii::all(24.0).fitted(Vec2::zero());
        assert!(radii.is_zero());
    }

    #[test]
    fn expanded_leaves_square_corners_square() {
        let radii = CornerRadii::new(10.0, 0.0, 10.0, 0.0).expanded(5.0);
        assert_eq!(radii, CornerRadii::new(15.0, 0.0, 15.0, 0.0));
    }
}
