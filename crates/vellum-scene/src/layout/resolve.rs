use log::{debug, trace};
use vellum_engine::coords::{Rect, Vec2};
use vellum_engine::text::{FontId, FontSystem, TextStyle};

use crate::error::RenderError;
use crate::model::{BoxNode, LineNode, Node, Padding, Position, SceneDocument, TextNode};

use super::constraints::{Edges, inset_rect};

// ── output tree ───────────────────────────────────────────────────────────

/// Absolute boxes for every laid-out node, congruent with the document.
#[derive(Debug)]
pub struct LayoutTree<'a> {
    /// The implicit root's box.
    pub canvas: Rect,
    pub roots: Vec<LayoutNode<'a>>,
}

impl<'a> LayoutTree<'a> {
    /// Visits every node depth-first in paint order.
    pub fn walk<'t>(&'t self, f: &mut impl FnMut(&'t LayoutNode<'a>)) {
        for node in &self.roots {
            node.walk(f);
        }
    }

    /// Number of laid-out nodes. Children dropped by a collapsed content box
    /// are not counted.
    pub fn len(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// One node with its resolved box.
#[derive(Debug)]
pub struct LayoutNode<'a> {
    /// Border box in canvas pixels. For lines: endpoints' bounding box grown
    /// by half the stroke width.
    pub rect: Rect,
    pub resolved: Resolved<'a>,
}

#[derive(Debug)]
pub enum Resolved<'a> {
    Box {
        node: &'a BoxNode,
        /// Rect after padding; children are positioned relative to its origin.
        content: Rect,
        children: Vec<LayoutNode<'a>>,
    },
    Line {
        node: &'a LineNode,
        from: Vec2,
        to: Vec2,
    },
    Text {
        node: &'a TextNode,
        font: FontId,
        style: TextStyle,
    },
}

impl<'a> LayoutNode<'a> {
    #[inline]
    pub fn children(&self) -> &[LayoutNode<'a>] {
        match &self.resolved {
            Resolved::Box { children, .. } => children,
            Resolved::Line { .. } | Resolved::Text { .. } => &[],
        }
    }

    fn walk<'t>(&'t self, f: &mut impl FnMut(&'t LayoutNode<'a>)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

// ── measure pass ──────────────────────────────────────────────────────────

/// Post-order result: own size plus the explicit offset within the parent.
struct Measured<'a> {
    size: Vec2,
    x: Option<f32>,
    y: Option<f32>,
    kind: MeasuredKind<'a>,
}

enum MeasuredKind<'a> {
    Box { node: &'a BoxNode, padding: Edges, children: Vec<Measured<'a>> },
    /// Endpoints relative to the line's own box origin.
    Line { node: &'a LineNode, from: Vec2, to: Vec2 },
    Text { node: &'a TextNode, font: FontId, style: TextStyle },
}

impl Measured<'_> {
    #[inline]
    fn flows(&self) -> bool {
        self.x.is_none()
    }
}

fn point(p: Position) -> Vec2 {
    Vec2::new(p.x.unwrap_or(0.0), p.y.unwrap_or(0.0))
}

/// Font for a text node: by name, or the only loaded font when unnamed.
fn text_font(node: &TextNode, fonts: &FontSystem) -> Result<FontId, RenderError> {
    match node.font.as_deref() {
        Some(name) => fonts
            .id(name)
            .ok_or_else(|| RenderError::RenderFailed(format!("font `{name}` is not loaded"))),
        None => fonts.sole().ok_or_else(|| {
            RenderError::RenderFailed(format!(
                "text without a font needs exactly one loaded font, found {}",
                fonts.len()
            ))
        }),
    }
}

/// Far corner of the children when placed with `Start` alignment.
fn children_extent(children: &[Measured<'_>]) -> Vec2 {
    let mut cursor = 0.0;
    let mut extent = Vec2::zero();
    for child in children {
        let x = match child.x {
            Some(x) => x,
            None => {
                let x = cursor;
                cursor += child.size.x;
                x
            }
        };
        let y = child.y.unwrap_or(0.0);
        extent = extent.max(Vec2::new(x, y) + child.size);
    }
    extent
}

fn measure<'a>(node: &'a Node, fonts: &FontSystem) -> Result<Measured<'a>, RenderError> {
    match node {
        Node::Container(b) | Node::Rectangle(b) => measure_box(b, fonts),
        Node::Line(line) => Ok(measure_line(line)),
        Node::Text(text) => measure_text(text, fonts),
    }
}

fn measure_box<'a>(node: &'a BoxNode, fonts: &FontSystem) -> Result<Measured<'a>, RenderError> {
    let mut children = node
        .children
        .iter()
        .map(|child| measure(child, fonts))
        .collect::<Result<Vec<_>, _>>()?;

    let padding = node.padding.map(Padding::edges).unwrap_or_default();
    let extent = children_extent(&children);
    let size = Vec2::new(
        node.size.width.map_or(extent.x + padding.h(), |w| w.max(0.0)),
        node.size.height.map_or(extent.y + padding.v(), |h| h.max(0.0)),
    );

    let content = (size - padding.total()).non_negative();
    let collapsed = (node.size.width.is_some() && content.x <= 0.0)
        || (node.size.height.is_some() && content.y <= 0.0);
    if collapsed && !children.is_empty() {
        debug!(
            "content box collapsed to {}×{}; dropping {} children",
            content.x,
            content.y,
            children.len()
        );
        children.clear();
    }

    Ok(Measured {
        size,
        x: node.position.x,
        y: node.position.y,
        kind: MeasuredKind::Box { node, padding, children },
    })
}

fn measure_line(node: &LineNode) -> Measured<'_> {
    let from = point(node.from);
    let to = point(node.to);
    let bounds = Rect::from_points(from, to).inflate(node.width.max(0.0) * 0.5);
    Measured {
        size: bounds.size,
        x: Some(bounds.origin.x),
        y: Some(bounds.origin.y),
        kind: MeasuredKind::Line { node, from: from - bounds.origin, to: to - bounds.origin },
    }
}

fn measure_text<'a>(node: &'a TextNode, fonts: &FontSystem) -> Result<Measured<'a>, RenderError> {
    let font = text_font(node, fonts)?;
    let style = TextStyle::new(node.size.max(0.0), node.line_height(), node.align.into());
    let size = fonts
        .measure(font, &node.content, style)
        .ok_or_else(|| RenderError::RenderFailed(format!("font {font:?} vanished during layout")))?;
    Ok(Measured {
        size,
        x: node.position.x,
        y: node.position.y,
        kind: MeasuredKind::Text { node, font, style },
    })
}

// ── place pass ────────────────────────────────────────────────────────────

/// Positions `children` inside `content`: explicit offsets as given, the rest
/// flowing left to right as one run placed by `align_factor`.
fn place_children(children: Vec<Measured<'_>>, content: Rect, align_factor: f32) -> Vec<LayoutNode<'_>> {
    let run: f32 = children.iter().filter(|c| c.flows()).map(|c| c.size.x).sum();
    let mut cursor = (content.width() - run) * align_factor;

    children
        .into_iter()
        .map(|child| {
            let x = match child.x {
                Some(x) => x,
                None => {
                    let x = cursor;
                    cursor += child.size.x;
                    x
                }
            };
            let y = child.y.unwrap_or(0.0);
            place(child, content.origin + Vec2::new(x, y))
        })
        .collect()
}

fn place(measured: Measured<'_>, origin: Vec2) -> LayoutNode<'_> {
    let rect = Rect::from_origin_size(origin, measured.size);
    trace!("placed at ({}, {}) size {}×{}", rect.origin.x, rect.origin.y, rect.width(), rect.height());

    let resolved = match measured.kind {
        MeasuredKind::Box { node, padding, children } => {
            let content = inset_rect(rect, padding);
            let children = place_children(children, content, node.align.factor());
            Resolved::Box { node, content, children }
        }
        MeasuredKind::Line { node, from, to } => {
            Resolved::Line { node, from: origin + from, to: origin + to }
        }
        MeasuredKind::Text { node, font, style } => Resolved::Text { node, font, style },
    };
    LayoutNode { rect, resolved }
}

// ── entry ─────────────────────────────────────────────────────────────────

/// Resolves an absolute box for every node of `document`.
///
/// Top-level nodes are children of an implicit root whose box is the canvas
/// (no padding, start-aligned). Fails only when a text node's font cannot be
/// found in `fonts`.
pub fn resolve<'a>(document: &'a SceneDocument, fonts: &FontSystem) -> Result<LayoutTree<'a>, RenderError> {
    let canvas = Rect::new(0.0, 0.0, document.size.width, document.size.height);
    let measured = document
        .nodes
        .iter()
        .map(|node| measure(node, fonts))
        .collect::<Result<Vec<_>, _>>()?;

    let tree = LayoutTree { canvas, roots: place_children(measured, canvas, 0.0) };
    debug!("layout resolved: {} nodes", tree.len());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> SceneDocument {
        serde_json::from_str(json).unwrap()
    }

    fn rects(tree: &LayoutTree<'_>) -> Vec<Rect> {
        let mut out = Vec::new();
        tree.walk(&mut |n| out.push(n.rect));
        out
    }

    fn layout(json: &str) -> Vec<Rect> {
        let d = doc(json);
        let fonts = FontSystem::new();
        let tree = resolve(&d, &fonts).unwrap();
        rects(&tree)
    }

    // ── box sizing ────────────────────────────────────────────────────────

    #[test]
    fn padded_rectangle_wraps_flowing_children() {
        let r = layout(
            r#"{"size": [1000, 1000], "graphics": [
                {"type": "Rectangle", "value": {
                    "position": {"x": 80, "y": 200}, "padding": 24,
                    "children": [
                        {"type": "Rectangle", "value": {"size": [200, 200]}},
                        {"type": "Rectangle", "value": {"size": [200, 200]}}
                    ]}}
            ]}"#,
        );
        assert_eq!(
            r,
            [
                Rect::new(80.0, 200.0, 448.0, 248.0),
                Rect::new(104.0, 224.0, 200.0, 200.0),
                Rect::new(304.0, 224.0, 200.0, 200.0),
            ]
        );
    }

    #[test]
    fn empty_container_has_zero_size() {
        let r = layout(r#"{"size": [10, 10], "graphics": [{"type": "Container", "value": {}}]}"#);
        assert_eq!(r, [Rect::new(0.0, 0.0, 0.0, 0.0)]);
    }

    #[test]
    fn negative_explicit_size_clamps_to_zero() {
        let r = layout(
            r#"{"size": [10, 10], "graphics": [
                {"type": "Rectangle", "value": {"size": {"width": -5, "height": 4}}}
            ]}"#,
        );
        assert_eq!(r[0].size, Vec2::new(0.0, 4.0));
    }

    #[test]
    fn explicit_children_extend_the_extent() {
        let r = layout(
            r#"{"size": [500, 500], "graphics": [
                {"type": "Container", "value": {"children": [
                    {"type": "Rectangle", "value": {"position": [30, 40], "size": [10, 10]}},
                    {"type": "Rectangle", "value": {"size": [5, 5]}}
                ]}}
            ]}"#,
        );
        assert_eq!(r[0].size, Vec2::new(40.0, 50.0));
        assert_eq!(r[2].origin, Vec2::zero());
    }

    #[test]
    fn collapsed_padding_drops_children() {
        let d = doc(
            r#"{"size": [100, 100], "graphics": [
                {"type": "Rectangle", "value": {"size": [20, 20], "padding": 10,
                    "children": [{"type": "Rectangle", "value": {"size": [5, 5]}}]}}
            ]}"#,
        );
        let fonts = FontSystem::new();
        let tree = resolve(&d, &fonts).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.roots[0].children().is_empty());
    }

    // ── alignment ─────────────────────────────────────────────────────────

    #[test]
    fn center_and_end_place_the_flow_run() {
        let json = |align: &str| {
            format!(
                r#"{{"size": [300, 100], "graphics": [
                    {{"type": "Container", "value": {{"size": [300, 100], "align": "{align}",
                        "children": [
                            {{"type": "Rectangle", "value": {{"size": [40, 10]}}}},
                            {{"type": "Rectangle", "value": {{"size": [60, 10]}}}},
                            {{"type": "Rectangle", "value": {{"position": {{"x": 5}}, "size": [1, 1]}}}}
                        ]}}}}
                ]}}"#
            )
        };
        let center = layout(&json("Center"));
        assert_eq!(center[1].origin.x, 100.0);
        assert_eq!(center[2].origin.x, 140.0);
        assert_eq!(center[3].origin.x, 5.0);

        let end = layout(&json("Right"));
        assert_eq!(end[1].origin.x, 200.0);
        assert_eq!(end[2].origin.x, 240.0);
    }

    #[test]
    fn top_level_nodes_flow_from_the_canvas_origin() {
        let r = layout(
            r#"{"size": [100, 100], "graphics": [
                {"type": "Rectangle", "value": {"size": [10, 10]}},
                {"type": "Rectangle", "value": {"size": [10, 10], "position": {"y": 7}}}
            ]}"#,
        );
        assert_eq!(r[1].origin, Vec2::new(10.0, 7.0));
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn line_box_is_stroke_bounds_relative_to_content() {
        let d = doc(
            r#"{"size": [600, 600], "graphics": [
                {"type": "Container", "value": {"position": [10, 10], "padding": 5, "children": [
                    {"type": "Line", "value": {"from": {"x": 20, "y": 20}, "to": {"x": 500, "y": 80}, "width": 20}}
                ]}}
            ]}"#,
        );
        let fonts = FontSystem::new();
        let tree = resolve(&d, &fonts).unwrap();
        let line = &tree.roots[0].children()[0];
        assert_eq!(line.rect, Rect::new(25.0, 25.0, 500.0, 80.0));
        let Resolved::Line { from, to, .. } = line.resolved else { panic!("expected a line") };
        assert_eq!(from, Vec2::new(35.0, 35.0));
        assert_eq!(to, Vec2::new(515.0, 95.0));
        // Container wraps the line's far corner plus padding.
        assert_eq!(tree.roots[0].rect.size, Vec2::new(520.0, 100.0));
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn text_without_fonts_fails() {
        let d = doc(r#"{"size": [10, 10], "graphics": [{"type": "Text", "value": {"content": "a", "size": 12}}]}"#);
        let fonts = FontSystem::new();
        let err = resolve(&d, &fonts).unwrap_err();
        assert!(matches!(err, RenderError::RenderFailed(_)));
    }
}
