//! Style resolution: utility classes to computed, unit-resolved styles.

pub mod computed;
pub mod resolver;

pub use computed::{
    Align, Color, ComputedStyle, Dimension, Display, Edges, FlexDirection, Justify, Layer,
    Position, TextAttrs,
};
pub use resolver::resolve;
