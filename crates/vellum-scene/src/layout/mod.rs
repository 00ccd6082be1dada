//! Layout resolution.
//!
//! Two passes over the document: a post-order measure that fixes every
//! node's own size, then a pre-order placement that turns offsets into
//! absolute canvas boxes. The result borrows the document.

mod constraints;
mod resolve;

pub use constraints::{Edges, inset_rect};
pub use resolve::{LayoutNode, LayoutTree, Resolved, resolve};
