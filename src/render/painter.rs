//! Per-kind paint routines: one node's style + content + interaction
//! state to draw operations.
//!
//! All emission goes through clipping helpers: layout never clips, so rects
//! can legitimately hang off any edge of the viewport and the painter trims
//! them at emit time.  A routine that cannot paint its control returns an
//! error; the renderer swaps in a placeholder block at the node boundary.

use thiserror::Error;
use unicode_width::UnicodeWidthChar;

use crate::dom::ElementKind;
use crate::focus::{FocusState, InteractionState};
use crate::layout::rect::{LayoutRect, ViewportInfo};
use crate::layout::tree::LayoutNode;
use crate::style::{Color, TextAttrs};

use super::ops::{CellStyle, DrawOp};

/// Glyph used for drop-shadow copies.
pub const SHADOW_GLYPH: char = '░';

/// Glyph used when a paint routine fails.
pub const ERROR_GLYPH: char = '▒';

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("rect {width}x{height} too small to paint a {kind:?}")]
    TooSmall { kind: ElementKind, width: u16, height: u16 },
}

/// Paint one node (children are separate jobs in the renderer's walk).
pub fn paint_node(
    node: &LayoutNode,
    state: &InteractionState,
    viewport: &ViewportInfo,
) -> Result<Vec<DrawOp>, PaintError> {
    let mut ops = Vec::new();
    let focus = node
        .id
        .as_deref()
        .map(|id| state.focus_of(id))
        .unwrap_or_default();

    match node.kind {
        ElementKind::Box => paint_box(node, viewport, &mut ops),
        ElementKind::Text => paint_text(node, viewport, &mut ops),
        ElementKind::Button => paint_button(node, focus, viewport, &mut ops)?,
        ElementKind::Input => paint_input(node, state, focus, viewport, &mut ops)?,
        ElementKind::Checkbox => paint_checkable(node, state, focus, viewport, &mut ops, '[', 'x', ']')?,
        ElementKind::Radio => paint_checkable(node, state, focus, viewport, &mut ops, '(', '•', ')')?,
    }
    Ok(ops)
}

/// The dimmed, glyph-substituted drop-shadow copy of a node, offset one
/// cell down-right.  Painted before its source.
pub fn paint_shadow(node: &LayoutNode, viewport: &ViewportInfo) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    let rect = LayoutRect::new(
        node.rect.x + 1,
        node.rect.y + 1,
        node.rect.width,
        node.rect.height,
    );
    fill_rect(&mut ops, viewport, rect, SHADOW_GLYPH, CellStyle::dimmed());
    ops
}

/// Fallback for a failed paint routine: an error placeholder block.
pub fn paint_placeholder(rect: LayoutRect, viewport: &ViewportInfo) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    let style = CellStyle {
        fg: Color::Red,
        bg: Color::Default,
        attrs: TextAttrs::default(),
    };
    fill_rect(&mut ops, viewport, rect, ERROR_GLYPH, style);
    ops
}

/// Full-viewport dim backdrop painted beneath modal/overlay content.
pub fn paint_backdrop(viewport: &ViewportInfo) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    fill_rect(
        &mut ops,
        viewport,
        viewport.rect(),
        SHADOW_GLYPH,
        CellStyle::dimmed(),
    );
    ops
}

// ───────────────────────────────────────── routines ──────────

fn paint_box(node: &LayoutNode, viewport: &ViewportInfo, ops: &mut Vec<DrawOp>) {
    let style = CellStyle::from_computed(&node.style);
    if node.style.bg != Color::Default {
        fill_rect(ops, viewport, node.rect, ' ', style);
    }
    if let Some(text) = node.text.as_deref() {
        let content = node.rect.inset(&node.style.padding);
        emit_lines(ops, viewport, content, text, style);
    }
}

fn paint_text(node: &LayoutNode, viewport: &ViewportInfo, ops: &mut Vec<DrawOp>) {
    let style = CellStyle::from_computed(&node.style);
    if node.style.bg != Color::Default {
        fill_rect(ops, viewport, node.rect, ' ', style);
    }
    let content = node.rect.inset(&node.style.padding);
    if let Some(text) = node.text.as_deref() {
        emit_lines(ops, viewport, content, text, style);
    }
}

fn paint_button(
    node: &LayoutNode,
    focus: FocusState,
    viewport: &ViewportInfo,
    ops: &mut Vec<DrawOp>,
) -> Result<(), PaintError> {
    let rect = node.rect.inset(&node.style.padding);
    if rect.height == 0 || rect.width == 0 {
        return Ok(()); // nothing visible, not an error
    }
    if rect.width < 4 {
        return Err(PaintError::TooSmall {
            kind: node.kind,
            width: rect.width,
            height: rect.height,
        });
    }

    let style = interactive_style(node, focus);
    let label = node.text.as_deref().unwrap_or("");
    let line = format!("[ {label} ]");
    emit_text(ops, viewport, rect.x, rect.y, &line, usize::from(rect.width), style);
    Ok(())
}

fn paint_input(
    node: &LayoutNode,
    state: &InteractionState,
    focus: FocusState,
    viewport: &ViewportInfo,
    ops: &mut Vec<DrawOp>,
) -> Result<(), PaintError> {
    let rect = node.rect.inset(&node.style.padding);
    if rect.height == 0 || rect.width == 0 {
        return Ok(());
    }
    if rect.width < 2 {
        return Err(PaintError::TooSmall {
            kind: node.kind,
            width: rect.width,
            height: rect.height,
        });
    }

    let style = interactive_style(node, focus);
    let field = usize::from(rect.width) - 2;
    let value = node
        .id
        .as_deref()
        .and_then(|id| state.value(id))
        .or(node.text.as_deref())
        .unwrap_or("");
    let line = format!("[{value:<field$}]");
    emit_text(ops, viewport, rect.x, rect.y, &line, usize::from(rect.width), style);
    Ok(())
}

fn paint_checkable(
    node: &LayoutNode,
    state: &InteractionState,
    focus: FocusState,
    viewport: &ViewportInfo,
    ops: &mut Vec<DrawOp>,
    open: char,
    mark: char,
    close: char,
) -> Result<(), PaintError> {
    let rect = node.rect.inset(&node.style.padding);
    if rect.height == 0 || rect.width == 0 {
        return Ok(());
    }
    if rect.width < 3 {
        return Err(PaintError::TooSmall {
            kind: node.kind,
            width: rect.width,
            height: rect.height,
        });
    }

    let style = interactive_style(node, focus);
    let checked = node
        .id
        .as_deref()
        .map(|id| state.is_checked(id))
        .unwrap_or(false);
    let marker = if checked { mark } else { ' ' };
    let label = node.text.as_deref().unwrap_or("");
    let line = format!("{open}{marker}{close} {label}");
    emit_text(ops, viewport, rect.x, rect.y, &line, usize::from(rect.width), style);
    Ok(())
}

/// Style for buttons and other interactive controls, reflecting focus.
fn interactive_style(node: &LayoutNode, focus: FocusState) -> CellStyle {
    let mut style = CellStyle::from_computed(&node.style);
    match focus {
        FocusState::Normal => {}
        FocusState::Focused => {
            style.bg = Color::DarkGray;
            style.attrs.bold = true;
        }
        FocusState::Activated => {
            style.bg = Color::Cyan;
            style.fg = Color::Black;
            style.attrs.bold = true;
        }
    }
    style
}

// ───────────────────────────────────────── emit helpers ──────

/// Emit each line of `text` starting at the content-box origin, clipped to
/// the content width and height.
fn emit_lines(
    ops: &mut Vec<DrawOp>,
    viewport: &ViewportInfo,
    content: LayoutRect,
    text: &str,
    style: CellStyle,
) {
    for (i, line) in text.lines().enumerate() {
        if i >= usize::from(content.height) {
            break;
        }
        emit_text(
            ops,
            viewport,
            content.x,
            content.y + i as i32,
            line,
            usize::from(content.width),
            style,
        );
    }
}

/// Emit one styled line at (x, y), trimmed to `max_width` cells and to the
/// viewport on every side.
fn emit_text(
    ops: &mut Vec<DrawOp>,
    viewport: &ViewportInfo,
    x: i32,
    y: i32,
    text: &str,
    max_width: usize,
    style: CellStyle,
) {
    if y < 0 || y >= i32::from(viewport.height) {
        return;
    }

    // Trim cells hanging off the left edge, then off the right edge.
    let skip = (-x).max(0) as usize;
    let start_x = x.max(0) as usize;
    let budget = max_width
        .saturating_sub(skip)
        .min(usize::from(viewport.width).saturating_sub(start_x));
    if budget == 0 {
        return;
    }

    let mut out = String::new();
    let mut seen = 0usize;
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if seen < skip {
            seen += w;
            // A double-width char straddling the clip edge cannot be
            // half-printed; pad its visible cells so the rest of the
            // line keeps its columns.
            let overhang = seen.saturating_sub(skip).min(budget - used);
            for _ in 0..overhang {
                out.push(' ');
                used += 1;
            }
            continue;
        }
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    if out.is_empty() {
        return;
    }

    ops.push(DrawOp::MoveTo { x: start_x as u16, y: y as u16 });
    ops.push(DrawOp::SetStyle(style));
    ops.push(DrawOp::Print(out));
}

/// Fill a rect with one glyph, clipped to the viewport.
fn fill_rect(
    ops: &mut Vec<DrawOp>,
    viewport: &ViewportInfo,
    rect: LayoutRect,
    glyph: char,
    style: CellStyle,
) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let row: String = std::iter::repeat(glyph)
        .take(usize::from(rect.width))
        .collect();
    for dy in 0..i32::from(rect.height) {
        emit_text(
            ops,
            viewport,
            rect.x,
            rect.y + dy,
            &row,
            usize::from(rect.width),
            style,
        );
    }
}

// ───────────────────────────────────────── tests ─────────────
