use super::Vec2;

/// Axis-aligned rectangle in canvas pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Smallest rectangle containing both points.
    #[inline]
    pub fn from_points(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Rect::from_origin_size(min, max - min)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    #[inline]
    pub fn translate(self, offset: Vec2) -> Self {
        Rect::from_origin_size(self.origin + offset, self.size)
    }

    /// Grows the rectangle by `d` on every side. Negative `d` shrinks it,
    /// never past a zero size (the center is kept).
    #[inline]
    pub fn inflate(self, d: f32) -> Self {
        let w = self.size.x + 2.0 * d;
        let h = self.size.y + 2.0 * d;
        let x = if w < 0.0 { self.center().x } else { self.origin.x - d };
        let y = if h < 0.0 { self.center().y } else { self.origin.y - d };
        Rect::new(x, y, w.max(0.0), h.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n, r(6.0, 0.0, 4.0, 5.0));
    }

    #[test]
    fn from_points_orders_corners() {
        let rect = Rect::from_points(Vec2::new(500.0, 80.0), Vec2::new(20.0, 20.0));
        assert_eq!(rect, r(20.0, 20.0, 480.0, 60.0));
    }

    // ── inflate ───────────────────────────────────────────────────────────

    #[test]
    fn inflate_grows_every_side() {
        assert_eq!(r(10.0, 10.0, 20.0, 20.0).inflate(5.0), r(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn inflate_negative_collapses_at_center() {
        let rect = r(0.0, 0.0, 10.0, 40.0).inflate(-8.0);
        assert_eq!(rect.size.x, 0.0);
        assert_eq!(rect.origin.x, 5.0);
        assert_eq!(rect.size.y, 24.0);
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
