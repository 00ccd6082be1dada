use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;
use crate::scene::shapes::shadow::ShadowCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - handle the variant in `raster::Rasterizer::draw`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    RoundedRect(RoundedRectCmd),
    Shadow(ShadowCmd),
    Line(LineCmd),
    Text(TextCmd),
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::RoundedRect(_) => "rounded_rect",
            DrawCmd::Shadow(_) => "shadow",
            DrawCmd::Line(_) => "line",
            DrawCmd::Text(_) => "text",
        }
    }
}
