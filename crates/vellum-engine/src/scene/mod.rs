//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in paint order
//! - record clip scopes as a tree so nested clips intersect
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{Clip, ClipId, DrawItem, DrawList};
pub use shapes::{Border, Outline};
