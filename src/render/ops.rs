//! The draw-operation stream, the engine's only output.
//!
//! The renderer emits these; a terminal-writer collaborator turns them into
//! escape sequences.  The engine itself never touches the output device.

use crate::style::{Color, ComputedStyle, TextAttrs};

/// Cell appearance for subsequent `Print` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub attrs: TextAttrs,
}

impl CellStyle {
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self { fg: style.fg, bg: style.bg, attrs: style.attrs }
    }

    /// Dimmed variant, used for drop shadows and backdrops.
    pub fn dimmed() -> Self {
        Self {
            fg: Color::DarkGray,
            bg: Color::Default,
            attrs: TextAttrs { dim: true, ..TextAttrs::default() },
        }
    }
}

/// One drawing instruction, in emit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    MoveTo { x: u16, y: u16 },
    SetStyle(CellStyle),
    Print(String),
}
