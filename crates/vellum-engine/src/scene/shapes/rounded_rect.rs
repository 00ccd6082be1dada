use crate::coords::{CornerRadii, Rect};
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList};

use super::Border;

/// Filled and/or stroked rounded rectangle.
///
/// Plain rectangles are rounded rectangles with zero radii.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    /// `None` = stroke only.
    pub paint: Option<Paint>,
    pub border: Option<Border>,
}

impl RoundedRectCmd {
    #[inline]
    pub fn new(rect: Rect, radii: CornerRadii, paint: Option<Paint>, border: Option<Border>) -> Self {
        Self { rect, radii, paint, border }
    }
}

impl DrawList {
    /// Records a rounded rectangle draw command.
    #[inline]
    pub fn push_rounded_rect(
        &mut self,
        rect: Rect,
        radii: CornerRadii,
        paint: Option<Paint>,
        border: Option<Border>,
    ) {
        self.push(DrawCmd::RoundedRect(RoundedRectCmd::new(rect, radii, paint, border)));
    }

    /// Records a solid rectangle with square corners.
    #[inline]
    pub fn push_solid_rect(&mut self, rect: Rect, color: Color) {
        self.push_rounded_rect(rect, CornerRadii::zero(), Some(Paint::Solid(color)), None);
    }
}
