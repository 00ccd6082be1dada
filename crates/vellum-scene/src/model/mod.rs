//! Typed scene graph.
//!
//! Pure data mirroring the JSON document. Every node is `{"type": …,
//! "value": {…}}`; optional fields are `Option`s (or carry a documented
//! default) and unknown fields are ignored.

mod style;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

pub use style::{
    Align, Border, Corner, Fill, Gradient, GradientStop, Padding, Position, Rgba, Shadow, Size,
    StopPosition, TaggedStop, TextAlign,
};

// ── document ──────────────────────────────────────────────────────────────

/// Decoded scene: canvas configuration plus top-level nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "DocumentRepr")]
pub struct SceneDocument {
    pub size: CanvasSize,
    /// `None` = fully transparent.
    pub background: Option<Fill>,
    /// Font name → raw font file bytes.
    pub font_set: BTreeMap<String, Vec<u8>>,
    /// Top-level nodes, painted in order.
    pub nodes: Vec<Node>,
}

impl SceneDocument {
    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(Node::count).sum()
    }

    /// Visits every node depth-first in document order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        for node in &self.nodes {
            node.walk(f);
        }
    }
}

/// Canvas size in pixels, written `[width, height]` or `{"width", "height"}`.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRepr {
    size: CanvasSize,
    #[serde(default)]
    background: Option<Fill>,
    #[serde(default, alias = "font_set", deserialize_with = "null_as_default")]
    font_set: BTreeMap<String, Vec<u8>>,
    #[serde(default, deserialize_with = "null_as_default")]
    graphics: Vec<Node>,
    #[serde(default)]
    graphic: Option<Node>,
}

impl From<DocumentRepr> for SceneDocument {
    fn from(repr: DocumentRepr) -> Self {
        let mut nodes = repr.graphics;
        nodes.extend(repr.graphic);
        Self { size: repr.size, background: repr.background, font_set: repr.font_set, nodes }
    }
}

/// Reads `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── nodes ─────────────────────────────────────────────────────────────────

/// One scene node. The JSON tag selects the variant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Node {
    Container(BoxNode),
    Rectangle(BoxNode),
    Line(LineNode),
    Text(TextNode),
}

impl Node {
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Container(_) => "Container",
            Node::Rectangle(_) => "Rectangle",
            Node::Line(_) => "Line",
            Node::Text(_) => "Text",
        }
    }

    /// Children of a box node; empty for leaves.
    #[inline]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Container(b) | Node::Rectangle(b) => &b.children,
            Node::Line(_) | Node::Text(_) => &[],
        }
    }

    fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

/// Payload shared by `Container` and `Rectangle`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BoxNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: Position,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: Size,
    #[serde(default)]
    pub padding: Option<Padding>,
    #[serde(default)]
    pub corner: Option<Corner>,
    /// Fill; `None` paints no background.
    #[serde(default)]
    pub color: Option<Fill>,
    #[serde(default)]
    pub border: Option<Border>,
    #[serde(default)]
    pub shadow: Option<Shadow>,
    /// Restrict descendants to this node's outline.
    #[serde(default, deserialize_with = "null_as_default")]
    pub clip: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub align: Align,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Node>,
}

/// Straight segment. Endpoints are offsets from the parent's content box
/// origin; a missing coordinate is 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: Position,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: Position,
    #[serde(default = "LineNode::default_width")]
    pub width: f32,
    #[serde(default = "LineNode::default_color")]
    pub color: Rgba,
    #[serde(default)]
    pub shadow: Option<Shadow>,
}

impl LineNode {
    fn default_width() -> f32 {
        1.0
    }

    fn default_color() -> Rgba {
        Rgba::BLACK
    }
}

/// Unwrapped text block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextNode {
    pub content: String,
    /// Glyph ink; must be a solid color. Defaults to opaque black.
    #[serde(default)]
    pub color: Option<Fill>,
    /// Font size in pixels.
    pub size: f32,
    /// Font name in the font set. May be omitted when exactly one font is loaded.
    #[serde(default)]
    pub font: Option<String>,
    /// Baseline-to-baseline distance; defaults to `size`.
    #[serde(default, alias = "lineHeight")]
    pub line_height: Option<f32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: Position,
    #[serde(default, deserialize_with = "null_as_default")]
    pub align: TextAlign,
}

impl TextNode {
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height.unwrap_or(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> SceneDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn document_reads_graphics_and_graphic() {
        let d = doc(
            r#"{"size": [10, 10],
                "graphics": [{"type": "Rectangle", "value": {}}],
                "graphic": {"type": "Line", "value": {"from": {"x": 1}}}}"#,
        );
        let kinds: Vec<_> = d.nodes.iter().map(Node::kind).collect();
        assert_eq!(kinds, ["Rectangle", "Line"]);
        assert!(d.background.is_none());
    }

    #[test]
    fn nested_children_are_counted() {
        let d = doc(
            r#"{"size": {"width": 10, "height": 10}, "graphics": [
                {"type": "Container", "value": {"children": [
                    {"type": "Text", "value": {"content": "a", "size": 12}},
                    {"type": "Container", "value": {"children": null}}
                ]}}
            ]}"#,
        );
        assert_eq!(d.node_count(), 3);
    }

    #[test]
    fn value_before_type_still_decodes() {
        let d = doc(r#"{"size": [1, 1], "graphics": [{"value": {"clip": true}, "type": "Container"}]}"#);
        let Node::Container(b) = &d.nodes[0] else { panic!("expected a container") };
        assert!(b.clip);
    }

    #[test]
    fn line_defaults() {
        let d = doc(r#"{"size": [1, 1], "graphics": [{"type": "Line", "value": {}}]}"#);
        let Node::Line(l) = &d.nodes[0] else { panic!("expected a line") };
        assert_eq!(l.width, 1.0);
        assert_eq!(l.color, Rgba::BLACK);
        assert_eq!(l.from, Position::default());
    }

    #[test]
    fn text_line_height_aliases_and_default() {
        let d = doc(
            r#"{"size": [1, 1], "graphics": [
                {"type": "Text", "value": {"content": "a", "size": 12, "lineHeight": 20}},
                {"type": "Text", "value": {"content": "b", "size": 12, "line_height": 18}},
                {"type": "Text", "value": {"content": "c", "size": 12, "corner": 4}}
            ]}"#,
        );
        let heights: Vec<_> = d
            .nodes
            .iter()
            .map(|n| match n {
                Node::Text(t) => t.line_height(),
                _ => 0.0,
            })
            .collect();
        assert_eq!(heights, [20.0, 18.0, 12.0]);
    }

    #[test]
    fn unknown_node_type_is_an_error() {
        let err = serde_json::from_str::<SceneDocument>(
            r#"{"size": [1, 1], "graphics": [{"type": "Circle", "value": {}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Circle"), "{err}");
    }

    #[test]
    fn font_set_accepts_snake_case() {
        let d = doc(r#"{"size": [1, 1], "font_set": {"Body": [0, 1, 2]}}"#);
        assert_eq!(d.font_set.get("Body").map(Vec::len), Some(3));
    }
}
