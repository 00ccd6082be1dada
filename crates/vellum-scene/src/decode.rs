//! JSON → validated [`SceneDocument`].
//!
//! Serde does the shape checks (required fields, node tags, color arity);
//! this module adds the checks that need the whole document: canvas bounds,
//! gradient stop counts and font references.

use log::debug;
use vellum_engine::text::FontSystem;

use crate::FontMap;
use crate::error::RenderError;
use crate::model::{Fill, Node, SceneDocument, TextNode};
use crate::renderer::RenderOptions;

/// Decodes `json` with default options. Fonts in `fonts` override
/// same-named entries of the document's `fontSet`.
pub fn decode(json: &str, fonts: &FontMap) -> Result<SceneDocument, RenderError> {
    decode_with_options(json, fonts, &RenderOptions::default())
}

/// Decodes and validates `json`; see [`decode`].
pub fn decode_with_options(
    json: &str,
    fonts: &FontMap,
    options: &RenderOptions,
) -> Result<SceneDocument, RenderError> {
    let mut document: SceneDocument = serde_json::from_str(json)?;
    for (name, bytes) in fonts {
        document.font_set.insert(name.clone(), bytes.clone());
    }
    validate(&document, options)?;
    check_fonts(&document)?;
    debug!(
        "decoded scene: {}×{} canvas, {} nodes, {} fonts",
        document.size.width,
        document.size.height,
        document.node_count(),
        document.font_set.len()
    );
    Ok(document)
}

/// Parses every font of the document's font set.
pub fn load_fonts(document: &SceneDocument) -> Result<FontSystem, RenderError> {
    let mut fonts = FontSystem::new();
    for (name, bytes) in &document.font_set {
        fonts.load_font(name.as_str(), bytes)?;
    }
    debug!("parsed {} fonts: {:?}", fonts.len(), fonts.names());
    Ok(fonts)
}

/// Canvas dimensions in whole pixels (fractional sizes round up).
pub(crate) fn canvas_pixels(document: &SceneDocument) -> (u32, u32) {
    // Saturating casts; validated documents are far below u32::MAX.
    (document.size.width.ceil() as u32, document.size.height.ceil() as u32)
}

// ── validation ────────────────────────────────────────────────────────────

fn malformed(msg: impl Into<String>) -> RenderError {
    RenderError::MalformedInput(msg.into())
}

/// Checks everything that does not depend on the font set: canvas bounds,
/// gradient stop counts, text sizes and text ink.
pub(crate) fn validate(document: &SceneDocument, options: &RenderOptions) -> Result<(), RenderError> {
    let max = options.max_canvas_side as f32;
    for (axis, v) in [("width", document.size.width), ("height", document.size.height)] {
        if !v.is_finite() || v <= 0.0 {
            return Err(malformed(format!("canvas {axis} must be positive, got {v}")));
        }
        if v.ceil() > max {
            return Err(malformed(format!("canvas {axis} {v} exceeds the maximum of {max}")));
        }
    }

    if let Some(background) = &document.background {
        check_fill(background, "background")?;
    }
    visit(document, |node| check_node(node, max))
}

/// Every text node must name a font of the font set, or the set must hold
/// exactly one font.
fn check_fonts(document: &SceneDocument) -> Result<(), RenderError> {
    visit(document, |node| match node {
        Node::Text(text) => check_text_font(text, document),
        _ => Ok(()),
    })
}

/// Runs `check` on every node, stopping at the first error.
fn visit(
    document: &SceneDocument,
    mut check: impl FnMut(&Node) -> Result<(), RenderError>,
) -> Result<(), RenderError> {
    let mut result = Ok(());
    document.walk(&mut |node| {
        if result.is_ok() {
            result = check(node);
        }
    });
    result
}

fn check_fill(fill: &Fill, what: &str) -> Result<(), RenderError> {
    match fill {
        Fill::Gradient(g) if g.stops.len() < 2 => Err(malformed(format!(
            "{what}: a gradient needs at least 2 stops, got {}",
            g.stops.len()
        ))),
        _ => Ok(()),
    }
}

/// `max_side` bounds text sizes the same way it bounds the canvas.
fn check_node(node: &Node, max_side: f32) -> Result<(), RenderError> {
    match node {
        Node::Container(b) | Node::Rectangle(b) => match &b.color {
            Some(fill) => check_fill(fill, node.kind()),
            None => Ok(()),
        },
        Node::Line(_) => Ok(()),
        Node::Text(text) => {
            check_text_size(text, max_side)?;
            match &text.color {
                Some(fill) => {
                    check_fill(fill, "Text")?;
                    if fill.as_solid().is_none() {
                        return Err(RenderError::UnsupportedStyle(
                            "text color must be a solid color, not a gradient".into(),
                        ));
                    }
                    Ok(())
                }
                None => Ok(()),
            }
        }
    }
}

fn check_text_size(text: &TextNode, max_side: f32) -> Result<(), RenderError> {
    let size = text.size;
    if !size.is_finite() {
        return Err(malformed(format!("text size must be finite, got {size}")));
    }
    if size > max_side {
        return Err(RenderError::UnsupportedStyle(format!(
            "text size {size} exceeds the maximum of {max_side}"
        )));
    }
    let line_height = text.line_height();
    if !line_height.is_finite() {
        return Err(malformed(format!("text line height must be finite, got {line_height}")));
    }
    Ok(())
}

fn check_text_font(text: &TextNode, document: &SceneDocument) -> Result<(), RenderError> {
    match text.font.as_deref() {
        Some(name) if !document.font_set.contains_key(name) => {
            Err(malformed(format!("text references unknown font `{name}`")))
        }
        Some(_) => Ok(()),
        None if document.font_set.len() == 1 => Ok(()),
        None => Err(malformed(format!(
            "text without a font needs exactly one font in the font set, found {}",
            document.font_set.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(json: &str) -> Result<SceneDocument, RenderError> {
        decode(json, &FontMap::new())
    }

    fn is_malformed(r: Result<SceneDocument, RenderError>) -> bool {
        matches!(r, Err(RenderError::MalformedInput(_)))
    }

    // ── canvas ────────────────────────────────────────────────────────────

    #[test]
    fn canvas_must_be_positive() {
        assert!(is_malformed(decode_str(r#"{"size": [0, 10]}"#)));
        assert!(is_malformed(decode_str(r#"{"size": [10, -1]}"#)));
        assert!(decode_str(r#"{"size": [10, 10]}"#).is_ok());
    }

    #[test]
    fn canvas_size_is_required() {
        assert!(is_malformed(decode_str(r#"{"graphics": []}"#)));
    }

    #[test]
    fn canvas_above_the_limit_is_rejected() {
        let options = RenderOptions { max_canvas_side: 64, ..RenderOptions::default() };
        let r = decode_with_options(r#"{"size": [65, 10]}"#, &FontMap::new(), &options);
        assert!(is_malformed(r));
    }

    #[test]
    fn fractional_canvas_rounds_up() {
        let d = decode_str(r#"{"size": [10.2, 3]}"#).unwrap();
        assert_eq!(canvas_pixels(&d), (11, 3));
    }

    #[test]
    fn unparseable_json_is_malformed() {
        assert!(is_malformed(decode_str("{ size: ")));
    }

    // ── gradients ─────────────────────────────────────────────────────────

    #[test]
    fn single_stop_gradient_is_rejected_anywhere() {
        let one_stop = r#"{"type": "Gradient", "value": {"stops": [
            {"position": 0.0, "color": [0, 0, 0, 255]}]}}"#;
        let bg = format!(r#"{{"size": [4, 4], "background": {one_stop}}}"#);
        assert!(is_malformed(decode_str(&bg)));

        let nested = format!(
            r#"{{"size": [4, 4], "graphics": [{{"type": "Container", "value": {{"children": [
                {{"type": "Rectangle", "value": {{"color": {one_stop}}}}}]}}}}]}}"#
        );
        assert!(is_malformed(decode_str(&nested)));
    }

    // ── fonts ─────────────────────────────────────────────────────────────

    #[test]
    fn text_font_must_exist() {
        let mut fonts = FontMap::new();
        fonts.insert("Body".into(), vec![1, 2, 3]);
        let json = r#"{"size": [4, 4], "graphics": [
            {"type": "Text", "value": {"content": "a", "size": 12, "font": "Heading"}}]}"#;
        assert!(is_malformed(decode(json, &fonts)));
    }

    #[test]
    fn unnamed_text_needs_exactly_one_font() {
        let json = r#"{"size": [4, 4], "graphics": [
            {"type": "Text", "value": {"content": "a", "size": 12}}]}"#;
        let mut fonts = FontMap::new();
        assert!(is_malformed(decode(json, &fonts)));
        fonts.insert("A".into(), vec![0]);
        assert!(decode(json, &fonts).is_ok());
        fonts.insert("B".into(), vec![0]);
        assert!(is_malformed(decode(json, &fonts)));
    }

    #[test]
    fn font_argument_overrides_font_set() {
        let mut fonts = FontMap::new();
        fonts.insert("Body".into(), vec![9]);
        let d = decode(r#"{"size": [4, 4], "fontSet": {"Body": [1, 2], "Mono": [3]}}"#, &fonts).unwrap();
        assert_eq!(d.font_set["Body"], [9]);
        assert_eq!(d.font_set["Mono"], [3]);
    }

    #[test]
    fn unparseable_font_is_malformed() {
        let d = decode_str(r#"{"size": [4, 4], "fontSet": {"Body": [1, 2]}}"#).unwrap();
        assert!(matches!(load_fonts(&d), Err(RenderError::MalformedInput(_))));
    }

    #[test]
    fn oversized_text_is_unsupported() {
        let json = r#"{"size": [4, 4], "fontSet": {"A": [0]}, "graphics": [
            {"type": "Text", "value": {"content": "a", "size": 1e9}}]}"#;
        assert!(matches!(decode_str(json), Err(RenderError::UnsupportedStyle(_))));

        let options = RenderOptions { max_canvas_side: 64, ..RenderOptions::default() };
        let json = r#"{"size": [4, 4], "fontSet": {"A": [0]}, "graphics": [
            {"type": "Text", "value": {"content": "a", "size": 65}}]}"#;
        let r = decode_with_options(json, &FontMap::new(), &options);
        assert!(matches!(r, Err(RenderError::UnsupportedStyle(_))));
    }

    #[test]
    fn text_size_at_the_limit_is_accepted() {
        let options = RenderOptions { max_canvas_side: 64, ..RenderOptions::default() };
        let json = r#"{"size": [4, 4], "fontSet": {"A": [0]}, "graphics": [
            {"type": "Text", "value": {"content": "a", "size": 64}}]}"#;
        assert!(decode_with_options(json, &FontMap::new(), &options).is_ok());
    }

    #[test]
    fn gradient_text_is_unsupported() {
        let json = r#"{"size": [4, 4], "fontSet": {"A": [0]}, "graphics": [
            {"type": "Text", "value": {"content": "a", "size": 12, "color":
                {"type": "Gradient", "value": {"stops": [
                    {"position": 0, "color": [0, 0, 0, 255]},
                    {"position": 1, "color": [255, 255, 255, 255]}]}}}}]}"#;
        assert!(matches!(decode_str(json), Err(RenderError::UnsupportedStyle(_))));
    }
}
