//! Element tree: the caller-owned description of the UI.

pub mod element;

pub use element::{Element, ElementKind, StructuralError, MAX_TREE_DEPTH};
