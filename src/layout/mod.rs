//! Layout: box model, flex/grid placement, and the layout tree builder.

pub mod box_model;
pub mod flex;
pub mod grid;
pub mod rect;
pub mod tree;

pub use rect::{LayoutRect, ViewportInfo};
pub use tree::{build, LayoutNode};
