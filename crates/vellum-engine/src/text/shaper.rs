use core::iter::Peekable;
use core::str::{Chars, Split};

use fontdue::Font;

use crate::coords::{Rect, Vec2};

/// Horizontal alignment of each line inside the text block.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    #[inline]
    fn factor(self) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => 0.5,
            TextAlign::Right => 1.0,
        }
    }
}

/// Font size, line spacing and alignment for one text block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Distance between consecutive baselines in pixels.
    pub line_height: f32,
    pub align: TextAlign,
}

impl TextStyle {
    #[inline]
    pub fn new(size: f32, line_height: f32, align: TextAlign) -> Self {
        Self { size, line_height, align }
    }
}

/// One positioned glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphPlacement {
    /// Glyph index in the font; `0` is `.notdef`.
    pub glyph: u16,
    /// Pen position on the baseline, canvas pixels.
    pub x: f32,
    pub baseline: f32,
    /// Advance actually used, when kerning changed the font's default.
    pub advance: Option<f32>,
}

/// Glyphs of one line with pen positions relative to the line start.
struct LineGlyphs<'a> {
    font: &'a Font,
    px: f32,
    chars: Peekable<Chars<'a>>,
    pen: f32,
}

impl<'a> LineGlyphs<'a> {
    fn new(font: &'a Font, px: f32, line: &'a str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        Self { font, px, chars: line.chars().peekable(), pen: 0.0 }
    }

    /// Total advance of the line.
    fn width(mut self) -> f32 {
        while self.next().is_some() {}
        self.pen
    }
}

impl Iterator for LineGlyphs<'_> {
    /// `(glyph, x, advance override)`
    type Item = (u16, f32, Option<f32>);

    fn next(&mut self) -> Option<Self::Item> {
        let ch = self.chars.next()?;
        let glyph = self.font.lookup_glyph_index(ch);
        let default_advance = self.font.metrics_indexed(glyph, self.px).advance_width;

        let kern = self
            .chars
            .peek()
            .map(|&next| self.font.lookup_glyph_index(next))
            .and_then(|next| self.font.horizontal_kern_indexed(glyph, next, self.px))
            .filter(|k| *k != 0.0);
        let advance = kern.map(|k| default_advance + k);

        let x = self.pen;
        self.pen += advance.unwrap_or(default_advance);
        Some((glyph, x, advance))
    }
}

/// Vertical metrics used to place baselines.
#[derive(Debug, Copy, Clone)]
struct VerticalMetrics {
    ascent: f32,
    /// Negative below the baseline, like fontdue reports it.
    descent: f32,
}

impl VerticalMetrics {
    fn of(font: &Font, px: f32) -> Self {
        match font.horizontal_line_metrics(px) {
            Some(m) => Self { ascent: m.ascent, descent: m.descent },
            None => Self { ascent: px * 0.8, descent: -px * 0.2 },
        }
    }

    /// Baseline offset from the top of a line box `line_height` tall,
    /// centering the glyph extent inside the box.
    #[inline]
    fn baseline(self, line_height: f32) -> f32 {
        (line_height - (self.ascent - self.descent)) * 0.5 + self.ascent
    }
}

/// Lazy iterator over the glyph placements of a text block.
///
/// Lines are split on `\n` and never wrapped. Each line is aligned inside
/// the block width according to [`TextStyle::align`]; line `i` has its top
/// at `block.y + i * line_height`.
pub struct GlyphRun<'a> {
    font: &'a Font,
    style: TextStyle,
    block: Rect,
    first_baseline: f32,
    lines: Split<'a, char>,
    line_index: usize,
    current: Option<(LineGlyphs<'a>, f32, f32)>,
}

impl<'a> GlyphRun<'a> {
    pub fn new(font: &'a Font, text: &'a str, style: TextStyle, block: Rect) -> Self {
        let first_baseline = VerticalMetrics::of(font, style.size).baseline(style.line_height);
        Self {
            font,
            style,
            block,
            first_baseline,
            lines: text.split('\n'),
            line_index: 0,
            current: None,
        }
    }

    fn start_line(&mut self) -> bool {
        let Some(line) = self.lines.next() else {
            return false;
        };
        let width = LineGlyphs::new(self.font, self.style.size, line).width();
        let x = self.block.origin.x + (self.block.width() - width) * self.style.align.factor();
        let baseline = self.block.origin.y
            + self.line_index as f32 * self.style.line_height
            + self.first_baseline;
        self.line_index += 1;
        self.current = Some((LineGlyphs::new(self.font, self.style.size, line), x, baseline));
        true
    }
}

impl Iterator for GlyphRun<'_> {
    type Item = GlyphPlacement;

    fn next(&mut self) -> Option<GlyphPlacement> {
        loop {
            if let Some((glyphs, x, baseline)) = self.current.as_mut() {
                if let Some((glyph, dx, advance)) = glyphs.next() {
                    return Some(GlyphPlacement { glyph, x: *x + dx, baseline: *baseline, advance });
                }
            }
            if !self.start_line() {
                return None;
            }
        }
    }
}

/// Extent of the unwrapped block: widest line by line count × line height.
pub(crate) fn measure(font: &Font, text: &str, style: TextStyle) -> Vec2 {
    let mut widest = 0.0f32;
    let mut lines = 0usize;
    for line in text.split('\n') {
        widest = widest.max(LineGlyphs::new(font, style.size, line).width());
        lines += 1;
    }
    Vec2::new(widest.max(0.0), lines as f32 * style.line_height.max(0.0))
}
