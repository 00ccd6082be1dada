//! Per-command painters. Each file adds one `draw_*` method to the rasterizer.

mod line;
mod rounded_rect;
mod shadow;
mod text;
