use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

use super::Outline;

/// Blurred, offset silhouette painted beneath a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCmd {
    /// Silhouette before spread and offset are applied.
    pub outline: Outline,
    pub offset: Vec2,
    /// Blur radius in pixels; `0` = hard edge.
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl ShadowCmd {
    /// Silhouette after spread and offset.
    pub fn silhouette(&self) -> Outline {
        match self.outline.spread(self.spread) {
            Outline::RoundedRect { rect, radii } => {
                Outline::RoundedRect { rect: rect.translate(self.offset), radii }
            }
            Outline::Segment { from, to, width } => Outline::Segment {
                from: from + self.offset,
                to: to + self.offset,
                width,
            },
        }
    }
}

impl DrawList {
    /// Records a drop shadow for `outline`.
    #[inline]
    pub fn push_shadow(&mut self, outline: Outline, offset: Vec2, blur: f32, spread: f32, color: Color) {
        self.push(DrawCmd::Shadow(ShadowCmd { outline, offset, blur, spread, color }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect};

    #[test]
    fn silhouette_applies_spread_then_offset() {
        let cmd = ShadowCmd {
            outline: Outline::rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), CornerRadii::zero()),
            offset: Vec2::new(5.0, 7.0),
            blur: 0.0,
            spread: 1.0,
            color: Color::black(),
        };
        assert_eq!(
            cmd.silhouette(),
            Outline::rounded_rect(Rect::new(4.0, 6.0, 12.0, 12.0), CornerRadii::zero())
        );
    }
}
