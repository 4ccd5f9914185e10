//! Terminal writer: converts the draw-op stream into crossterm commands.
//!
//! This is the collaborator boundary from the engine's point of view: the
//! renderer knows nothing about escape sequences, and nothing else in the
//! crate writes to the output device.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::style::Color;

use super::ops::{CellStyle, DrawOp};

/// Queue a whole frame's operations and flush them in one write.
pub fn flush_frame(out: &mut impl Write, ops: &[DrawOp]) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for op in ops {
        match op {
            DrawOp::MoveTo { x, y } => queue!(out, MoveTo(*x, *y))?,
            DrawOp::SetStyle(style) => queue_style(out, style)?,
            DrawOp::Print(text) => queue!(out, Print(text))?,
        }
    }
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    out.flush()
}

fn queue_style(out: &mut impl Write, style: &CellStyle) -> io::Result<()> {
    queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_crossterm(style.fg)),
        SetBackgroundColor(to_crossterm(style.bg)),
    )?;
    if style.attrs.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.attrs.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.attrs.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.attrs.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_crossterm(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as Ct;
    match color {
        Color::Default => Ct::Reset,
        Color::Black => Ct::Black,
        Color::Red => Ct::Red,
        Color::Green => Ct::Green,
        Color::Yellow => Ct::Yellow,
        Color::Blue => Ct::Blue,
        Color::Magenta => Ct::Magenta,
        Color::Cyan => Ct::Cyan,
        Color::White => Ct::White,
        Color::Gray => Ct::Grey,
        Color::DarkGray => Ct::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextAttrs;

    #[test]
    fn frame_writes_and_flushes() {
        let ops = vec![
            DrawOp::MoveTo { x: 2, y: 1 },
            DrawOp::SetStyle(CellStyle {
                fg: Color::Cyan,
                bg: Color::Default,
                attrs: TextAttrs { bold: true, ..TextAttrs::default() },
            }),
            DrawOp::Print("hello".into()),
        ];
        let mut buf = Vec::new();
        flush_frame(&mut buf, &ops).unwrap();

        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("hello"));
        // Cursor addressing is 1-based in the emitted escape sequence.
        assert!(text.contains("\u{1b}[2;3H"));
    }
}
