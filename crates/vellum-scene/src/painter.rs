use log::{debug, trace};
use vellum_engine::coords::{CornerRadii, Rect, Vec2};
use vellum_engine::paint::Color;
use vellum_engine::scene::{Border, DrawList, Outline};

use crate::error::RenderError;
use crate::layout::{LayoutNode, LayoutTree, Resolved};
use crate::model::{BoxNode, Corner, LineNode, Rgba, Shadow, TextNode};

/// Records a resolved layout tree into a [`DrawList`].
///
/// Paint order is depth-first in document order. Per box: shadow, fill and
/// border, then the children inside an optional clip scope.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self { draw_list }
    }

    /// Records every node of `tree`.
    pub fn paint_tree(&mut self, tree: &LayoutTree<'_>) -> Result<(), RenderError> {
        for node in &tree.roots {
            self.paint_node(node)?;
        }
        debug!(
            "recorded {} draw commands in {} clip scopes",
            self.draw_list.len(),
            self.draw_list.clips().len()
        );
        Ok(())
    }

    fn paint_node(&mut self, node: &LayoutNode<'_>) -> Result<(), RenderError> {
        match &node.resolved {
            Resolved::Box { node: payload, children, .. } => {
                self.paint_box(payload, node.rect, children)
            }
            Resolved::Line { node: payload, from, to } => {
                self.paint_line(payload, *from, *to);
                Ok(())
            }
            Resolved::Text { node: payload, font, style } => {
                let color = text_color(payload)?;
                self.draw_list.push_text(payload.content.as_str(), *font, *style, color, node.rect);
                Ok(())
            }
        }
    }

    // ── boxes ─────────────────────────────────────────────────────────────

    fn paint_box(
        &mut self,
        payload: &BoxNode,
        rect: Rect,
        children: &[LayoutNode<'_>],
    ) -> Result<(), RenderError> {
        let radii = payload.corner.map_or(CornerRadii::zero(), Corner::radii).fitted(rect.size);
        let outline = Outline::rounded_rect(rect, radii);

        if let Some(shadow) = &payload.shadow {
            self.shadow(outline, shadow);
        }

        let paint = payload.color.as_ref().map(|fill| fill.to_paint());
        let border = payload.border.map(|b| Border::new(b.width, b.color.color()));
        if paint.is_some() || border.is_some() {
            self.draw_list.push_rounded_rect(rect, radii, paint, border);
        }

        if payload.clip {
            let id = self.draw_list.push_clip(outline);
            trace!("clip scope #{} around {} children", id.index(), children.len());
        }
        let result = children.iter().try_for_each(|child| self.paint_node(child));
        if payload.clip {
            self.draw_list.pop_clip();
        }
        result
    }

    // ── lines ─────────────────────────────────────────────────────────────

    fn paint_line(&mut self, payload: &LineNode, from: Vec2, to: Vec2) {
        let width = payload.width.max(0.0);
        if let Some(shadow) = &payload.shadow {
            self.shadow(Outline::segment(from, to, width), shadow);
        }
        self.draw_list.push_line(from, to, width, payload.color.color());
    }

    fn shadow(&mut self, outline: Outline, shadow: &Shadow) {
        self.draw_list.push_shadow(
            outline,
            Vec2::new(shadow.x, shadow.y),
            shadow.blur.max(0.0),
            shadow.spread,
            shadow.color.color(),
        );
    }
}

fn text_color(node: &TextNode) -> Result<Color, RenderError> {
    match &node.color {
        None => Ok(Rgba::BLACK.color()),
        Some(fill) => fill
            .as_solid()
            .map(Rgba::color)
            .ok_or_else(|| RenderError::UnsupportedStyle("text color must be a solid color".into())),
    }
}
