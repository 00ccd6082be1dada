use vellum_engine::coords::{Rect, Vec2};

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides (padding).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// Every inset clamped to be non-negative.
    #[inline]
    #[must_use]
    pub fn non_negative(self) -> Self {
        Self {
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
            left: self.left.max(0.0),
        }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }

    /// Both totals as a size.
    #[inline]
    pub fn total(self) -> Vec2 {
        Vec2::new(self.h(), self.v())
    }

    /// Offset from a box origin to its content origin.
    #[inline]
    pub fn origin(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

// ── rect helper ──────────────────────────────────────────────────────────

/// Shrink a rect by `edges`, never below zero size.
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}
