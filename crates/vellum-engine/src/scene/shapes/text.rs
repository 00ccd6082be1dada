use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};
use crate::text::{FontId, TextStyle};

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    pub style: TextStyle,
    pub color: Color,
    /// Text block in canvas pixels. Lines align inside its width; the first
    /// line box starts at its top.
    pub block: Rect,
}

impl DrawList {
    /// Records a text draw command.
    pub fn push_text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        style: TextStyle,
        color: Color,
        block: Rect,
    ) {
        self.push(DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            style,
            color,
            block,
        }));
    }
}
