use super::{DrawCmd, Outline};

/// Index of a clip scope inside a [`DrawList`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClipId(pub(crate) usize);

impl ClipId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One clip scope: an outline plus the scope it was opened inside.
///
/// The effective clip region of a scope is its outline intersected with the
/// regions of all its ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub outline: Outline,
    pub parent: Option<ClipId>,
}

/// A single draw item: command + innermost clip scope.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// `None` = no clipping (draw everywhere on the canvas).
    pub clip: Option<ClipId>,
}

/// Recorded draw stream for one render.
///
/// Items are painted in insertion order; later items land on top.
///
/// # Clipping
///
/// Use [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) to scope
/// commands to an outline. Scopes nest, so a clipped container inside a
/// clipped container only shows what both outlines cover.
///
/// ```
/// # use vellum_engine::coords::{CornerRadii, Rect};
/// # use vellum_engine::scene::{DrawList, Outline};
/// let mut list = DrawList::new();
/// list.push_clip(Outline::rounded_rect(Rect::new(0.0, 0.0, 100.0, 100.0), CornerRadii::all(8.0)));
/// // ... push children ...
/// list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    clips: Vec<Clip>,

    /// Open scopes, innermost last.
    clip_stack: Vec<ClipId>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All clip scopes ever opened, indexed by [`ClipId`].
    #[inline]
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    #[inline]
    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.get(id.0)
    }

    /// Innermost open clip scope.
    #[inline]
    pub fn current_clip(&self) -> Option<ClipId> {
        self.clip_stack.last().copied()
    }

    /// Appends a draw command. The item inherits the innermost open clip scope.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        let clip = self.current_clip();
        self.items.push(DrawItem { cmd, clip });
    }

    /// Opens a clip scope. All commands pushed until [`pop_clip`](Self::pop_clip)
    /// are clipped to `outline`, intersected with any enclosing scope.
    ///
    /// Calls must be balanced with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, outline: Outline) -> ClipId {
        let id = ClipId(self.clips.len());
        self.clips.push(Clip { outline, parent: self.current_clip() });
        self.clip_stack.push(id);
        id
    }

    /// Closes the most recent scope opened by [`push_clip`](Self::push_clip).
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_clip`.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect, Vec2};
    use crate::paint::Color;

    fn outline(x: f32) -> Outline {
        Outline::rounded_rect(Rect::new(x, 0.0, 10.0, 10.0), CornerRadii::zero())
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn items_keep_insertion_order() {
        let mut list = DrawList::new();
        list.push_line(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 1.0, Color::black());
        list.push_solid_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::black());
        let kinds: Vec<_> = list.items().iter().map(|i| i.cmd.kind()).collect();
        assert_eq!(kinds, ["line", "rounded_rect"]);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn nested_clips_link_to_parent() {
        let mut list = DrawList::new();
        let outer = list.push_clip(outline(0.0));
        let inner = list.push_clip(outline(5.0));
        list.push_solid_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::black());
        list.pop_clip();
        list.push_solid_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::black());
        list.pop_clip();
        list.push_solid_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::black());

        let clips: Vec<_> = list.items().iter().map(|i| i.clip).collect();
        assert_eq!(clips, [Some(inner), Some(outer), None]);
        assert_eq!(list.clip(inner).and_then(|c| c.parent), Some(outer));
    }

    #[test]
    fn scope_closes_after_pop() {
        let mut list = DrawList::new();
        list.push_clip(outline(0.0));
        list.pop_clip();
        assert!(list.current_clip().is_none());
        assert_eq!(list.clips().len(), 1);
        assert!(list.is_empty());
    }
}
