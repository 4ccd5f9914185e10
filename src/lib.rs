//! tuft: a terminal UI engine driven by utility classes.
//!
//! Describe a view as a tree of [`dom::Element`]s carrying utility-style
//! class names (`flex-row`, `w-1/2`, `grid-cols-3`, …).  The engine
//! resolves classes to computed styles, lays the tree out in character
//! cells with flex/grid/block flow, and renders it as an ordered stream of
//! draw operations, with z-ordered overlays and visual-order keyboard
//! focus.  A crossterm-backed writer turns the stream into escape
//! sequences; everything above it is pure and testable.
//!
//! The whole tree is relaid out and repainted on every event; there is no
//! incremental relayout.

pub mod app;
pub mod dom;
pub mod focus;
pub mod layout;
pub mod render;
pub mod style;

pub use app::{App, AppEvent, Message};
pub use dom::{Element, ElementKind, StructuralError};
pub use focus::{Direction, FocusIndex, FocusState, InteractionState};
pub use layout::{LayoutNode, LayoutRect, ViewportInfo};
pub use render::{CellStyle, DrawOp, Renderer};
pub use style::ComputedStyle;
