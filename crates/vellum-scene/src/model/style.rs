//! Style value types shared by node payloads.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use vellum_engine::coords::CornerRadii;
use vellum_engine::paint::{Color, ColorStop, LinearGradient, Paint, StopOffset};

use crate::layout::Edges;

// ── Rgba ──────────────────────────────────────────────────────────────────

/// Straight-alpha sRGB color, one byte per channel.
///
/// Written as `[r, g, b, a]` or `{"type": "Rgba", "value": [r, g, b, a]}`.
/// Channels are rounded and clamped into `0..=255`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);

    #[inline]
    pub fn color(self) -> Color {
        let [r, g, b, a] = self.0;
        Color::from_srgb_u8(r, g, b, a)
    }

    fn from_channels(values: &[f64]) -> Result<Self, String> {
        if values.len() != 4 {
            return Err(format!("a color needs 4 channels, found {}", values.len()));
        }
        let mut out = [0u8; 4];
        for (slot, v) in out.iter_mut().zip(values) {
            *slot = clamp_channel(*v);
        }
        Ok(Rgba(out))
    }
}

#[inline]
fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() { 0 } else { v.round().clamp(0.0, 255.0) as u8 }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RgbaVisitor)
    }
}

struct RgbaVisitor;

impl<'de> Visitor<'de> for RgbaVisitor {
    type Value = Rgba;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an [r, g, b, a] array or a {\"type\": \"Rgba\", \"value\": [...]} object")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Rgba, A::Error> {
        let mut values = Vec::with_capacity(4);
        while let Some(v) = seq.next_element::<f64>()? {
            values.push(v);
        }
        Rgba::from_channels(&values).map_err(de::Error::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Rgba, A::Error> {
        let mut tag: Option<String> = None;
        let mut value: Option<Vec<f64>> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "type" => tag = Some(map.next_value()?),
                "value" => value = Some(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        match tag.as_deref() {
            Some("Rgba") => {}
            Some(other) => return Err(de::Error::custom(format!("expected an Rgba color, found `{other}`"))),
            None => return Err(de::Error::missing_field("type")),
        }
        let value = value.ok_or_else(|| de::Error::missing_field("value"))?;
        Rgba::from_channels(&value).map_err(de::Error::custom)
    }
}

// ── Fill ──────────────────────────────────────────────────────────────────

/// Solid color or linear gradient.
///
/// Accepted shapes: a bare `[r, g, b, a]`, `{"type": "Rgba", "value": …}` or
/// `{"type": "Gradient", "value": {"angle": …, "stops": […]}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    Gradient(Gradient),
}

impl Fill {
    pub fn to_paint(&self) -> Paint {
        match self {
            Fill::Solid(rgba) => Paint::Solid(rgba.color()),
            Fill::Gradient(g) => Paint::LinearGradient(g.to_linear_gradient()),
        }
    }

    #[inline]
    pub fn as_solid(&self) -> Option<Rgba> {
        match self {
            Fill::Solid(rgba) => Some(*rgba),
            Fill::Gradient(_) => None,
        }
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Array(_) => serde_json::from_value(value).map(Fill::Solid).map_err(|e| e.to_string()),
            Value::Object(mut map) => {
                let tag = map
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| "a fill needs a string `type`".to_string())?
                    .to_owned();
                let payload = map.remove("value").ok_or_else(|| format!("`{tag}` fill has no `value`"))?;
                match tag.as_str() {
                    "Rgba" => serde_json::from_value(payload).map(Fill::Solid),
                    "Gradient" => serde_json::from_value(payload).map(Fill::Gradient),
                    other => return Err(format!("unknown fill type `{other}`, expected `Rgba` or `Gradient`")),
                }
                .map_err(|e| format!("{tag}: {e}"))
            }
            other => Err(format!("expected a color or gradient, found {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for Fill {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Fill::from_value(value).map_err(de::Error::custom)
    }
}

/// Linear gradient: CSS angle in degrees plus color stops.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gradient {
    #[serde(default)]
    pub angle: f32,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn to_linear_gradient(&self) -> LinearGradient {
        let stops = self
            .stops
            .iter()
            .map(|s| ColorStop::new(s.position.offset(), s.color.color()))
            .collect();
        LinearGradient::new(self.angle, stops)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradientStop {
    pub position: StopPosition,
    pub color: Rgba,
}

/// Stop position along the gradient line.
///
/// `Percent` is a fraction (`0.0` start, `1.0` end); `Pixel` is a distance
/// from the start of the line. A bare number is read as `Percent`.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StopPosition {
    Tagged(TaggedStop),
    Bare(f32),
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum TaggedStop {
    Percent(f32),
    Pixel(f32),
}

impl StopPosition {
    #[inline]
    pub fn offset(self) -> StopOffset {
        match self {
            StopPosition::Tagged(TaggedStop::Percent(t)) | StopPosition::Bare(t) => StopOffset::Fraction(t),
            StopPosition::Tagged(TaggedStop::Pixel(px)) => StopOffset::Pixels(px),
        }
    }
}

// ── Border / Shadow ───────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct Border {
    #[serde(default = "one")]
    pub width: f32,
    pub color: Rgba,
}

#[inline]
fn one() -> f32 {
    1.0
}

/// Box or drop shadow. Lines carry no `spread` in practice; it defaults to 0.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct Shadow {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub blur: f32,
    #[serde(default)]
    pub spread: f32,
    pub color: Rgba,
}

// ── Geometry ──────────────────────────────────────────────────────────────

/// Offset inside the parent's content box, per axis optional.
///
/// Written as `{"x": …, "y": …}` or `[x, y]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

/// Width and height, per axis optional.
///
/// Written as `{"width": …, "height": …}` or `[w, h]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
pub struct Size {
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

/// Corner radii `[top-left, top-right, bottom-right, bottom-left]` or one
/// radius for all corners.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Corner {
    Uniform(f32),
    Each([f32; 4]),
}

impl Corner {
    pub fn radii(self) -> CornerRadii {
        match self {
            Corner::Uniform(r) => CornerRadii::all(r),
            Corner::Each([tl, tr, br, bl]) => CornerRadii::new(tl, tr, br, bl),
        }
    }
}

/// Insets `[top, right, bottom, left]` or one inset for all sides.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f32),
    Each([f32; 4]),
}

impl Padding {
    /// Insets with negative values clamped to zero.
    pub fn edges(self) -> Edges {
        let edges = match self {
            Padding::Uniform(v) => Edges::all(v),
            Padding::Each([top, right, bottom, left]) => Edges { top, right, bottom, left },
        };
        edges.non_negative()
    }
}

// ── Alignment ─────────────────────────────────────────────────────────────

/// Placement of the flowing children run inside a container's content box.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
pub enum Align {
    #[default]
    #[serde(alias = "Left")]
    Start,
    Center,
    #[serde(alias = "Right")]
    End,
}

impl Align {
    #[inline]
    pub fn factor(self) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => 0.5,
            Align::End => 1.0,
        }
    }
}

/// Alignment of each line inside a text block.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
pub enum TextAlign {
    #[default]
    #[serde(alias = "Start")]
    Left,
    Center,
    #[serde(alias = "End")]
    Right,
}

impl From<TextAlign> for vellum_engine::text::TextAlign {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => Self::Left,
            TextAlign::Center => Self::Center,
            TextAlign::Right => Self::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, serde_json::Error> {
        serde_json::from_str(json)
    }

    // ── Rgba ──────────────────────────────────────────────────────────────

    #[test]
    fn rgba_bare_and_tagged() {
        assert_eq!(parse::<Rgba>("[1, 2, 3, 4]").unwrap(), Rgba([1, 2, 3, 4]));
        assert_eq!(
            parse::<Rgba>(r#"{"value": [1, 2, 3, 4], "type": "Rgba"}"#).unwrap(),
            Rgba([1, 2, 3, 4])
        );
    }

    #[test]
    fn rgba_channels_are_rounded_and_clamped() {
        assert_eq!(parse::<Rgba>("[-20, 300, 127.6, 255]").unwrap(), Rgba([0, 255, 128, 255]));
    }

    #[test]
    fn rgba_wrong_arity_is_rejected() {
        let err = parse::<Rgba>("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("4 channels"), "{err}");
        assert!(parse::<Rgba>("[1, 2, 3, 4, 5]").is_err());
        assert!(parse::<Rgba>(r#"{"type": "Gradient", "value": []}"#).is_err());
    }

    // ── Fill ──────────────────────────────────────────────────────────────

    #[test]
    fn fill_accepts_all_shapes() {
        assert_eq!(parse::<Fill>("[0, 0, 0, 255]").unwrap(), Fill::Solid(Rgba::BLACK));
        assert_eq!(
            parse::<Fill>(r#"{"type": "Rgba", "value": [0, 0, 0, 255]}"#).unwrap(),
            Fill::Solid(Rgba::BLACK)
        );
        let g = parse::<Fill>(
            r#"{"type": "Gradient", "value": {"angle": 225, "stops": [
                {"position": {"type": "Percent", "value": 0}, "color": [255, 0, 0, 255]},
                {"position": {"type": "Pixel", "value": 40}, "color": {"type": "Rgba", "value": [0, 0, 255, 255]}}
            ]}}"#,
        )
        .unwrap();
        let Fill::Gradient(g) = g else { panic!("expected a gradient") };
        assert_eq!(g.angle, 225.0);
        assert_eq!(g.stops[1].position.offset(), StopOffset::Pixels(40.0));
    }

    #[test]
    fn fill_unknown_type_is_rejected() {
        let err = parse::<Fill>(r#"{"type": "Radial", "value": {}}"#).unwrap_err();
        assert!(err.to_string().contains("Radial"), "{err}");
    }

    #[test]
    fn gradient_stop_errors_are_reported() {
        let err = parse::<Fill>(
            r#"{"type": "Gradient", "value": {"angle": 0, "stops": [{"position": 0, "color": [1, 2]}]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("4 channels"), "{err}");
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn position_and_size_accept_arrays() {
        assert_eq!(parse::<Position>("[80, 200]").unwrap(), Position { x: Some(80.0), y: Some(200.0) });
        assert_eq!(parse::<Position>(r#"{"y": 5}"#).unwrap(), Position { x: None, y: Some(5.0) });
        assert_eq!(parse::<Size>("[200, 200]").unwrap(), Size { width: Some(200.0), height: Some(200.0) });
    }

    #[test]
    fn corner_and_padding_accept_uniform_numbers() {
        assert_eq!(parse::<Corner>("8").unwrap().radii(), CornerRadii::all(8.0));
        assert_eq!(parse::<Corner>("[1, 2, 3, 4]").unwrap().radii(), CornerRadii::new(1.0, 2.0, 3.0, 4.0));
        let e = parse::<Padding>("[1, 2, 3, 4]").unwrap().edges();
        assert_eq!((e.top, e.right, e.bottom, e.left), (1.0, 2.0, 3.0, 4.0));
        assert!(parse::<Padding>("[1, 2, 3]").is_err());
        assert_eq!(parse::<Padding>("-5").unwrap().edges(), Edges::default());
    }

    #[test]
    fn align_aliases() {
        assert_eq!(parse::<Align>(r#""Left""#).unwrap(), Align::Start);
        assert_eq!(parse::<Align>(r#""Right""#).unwrap(), Align::End);
        assert_eq!(parse::<TextAlign>(r#""End""#).unwrap(), TextAlign::Right);
    }
}
