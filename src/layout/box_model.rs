//! Box-model sizing: symbolic dimensions to concrete cell counts.
//!
//! Resolution order for each axis: an explicit dimension (cells or a
//! viewport ratio) wins; otherwise the element kind's intrinsic default
//! applies; otherwise generic content-based auto sizing.  The result is
//! clamped to `[min, max]` and finally to the viewport.  Ratios always
//! resolve against the viewport, never the immediate parent.

use unicode_width::UnicodeWidthStr;

use crate::dom::ElementKind;
use crate::layout::rect::ViewportInfo;
use crate::style::{ComputedStyle, Dimension};

/// Intrinsic field width of an [`ElementKind::Input`]: `[` + 20 cells + `]`.
pub const INPUT_INTRINSIC_WIDTH: u16 = 22;

/// Cells a button adds around its label: `[ ` and ` ]`.
pub const BUTTON_CHROME_WIDTH: u16 = 4;

/// Cells a checkbox/radio marker occupies before the label: `[x] ` / `(•) `.
pub const MARKER_WIDTH: u16 = 4;

/// What the sizer needs to know about the element being measured.
#[derive(Debug, Clone, Copy)]
pub struct SizeContext<'a> {
    pub kind: ElementKind,
    pub text: Option<&'a str>,
    pub is_leaf: bool,
}

/// Display width of the widest line of `text`, in cells.
pub fn text_width(text: &str) -> u16 {
    text.lines()
        .map(|line| line.width().min(u16::MAX as usize) as u16)
        .max()
        .unwrap_or(0)
}

/// Number of lines in `text`, at least one.
pub fn text_height(text: &str) -> u16 {
    text.lines().count().max(1).min(u16::MAX as usize) as u16
}

/// Resolve a symbolic dimension; `None` means auto.
fn resolve_dimension(dim: Dimension, viewport_axis: u16) -> Option<u16> {
    match dim {
        Dimension::Cells(n) => Some(n),
        Dimension::Auto => None,
        Dimension::Ratio(num, den) => {
            if den == 0 {
                return None;
            }
            Some(((u32::from(viewport_axis) * u32::from(num)) / u32::from(den)).min(u32::from(u16::MAX)) as u16)
        }
    }
}

/// Clamp a size to optional `[min, max]` bounds (min wins on conflict).
pub fn clamp_size(value: u16, min: Option<u16>, max: Option<u16>) -> u16 {
    let mut v = value;
    if let Some(max) = max {
        v = v.min(max);
    }
    if let Some(min) = min {
        v = v.max(min);
    }
    v
}

/// Width an element takes when its width is `auto`.
fn auto_width(style: &ComputedStyle, ctx: &SizeContext, available: u16) -> u16 {
    let pad = style.padding.horizontal();
    let label = ctx.text.map(text_width).unwrap_or(0);
    match ctx.kind {
        ElementKind::Input => INPUT_INTRINSIC_WIDTH.saturating_add(pad),
        ElementKind::Button => label
            .saturating_add(BUTTON_CHROME_WIDTH)
            .saturating_add(pad),
        ElementKind::Checkbox | ElementKind::Radio => {
            MARKER_WIDTH.saturating_add(label).saturating_add(pad)
        }
        ElementKind::Text => label.saturating_add(pad),
        // Containers fill the offered space, children or not; only
        // text-bearing kinds size to content.
        ElementKind::Box => available,
    }
}

/// Height an element takes when its height is `auto`.  `None` means the
/// layout builder must derive it from the children after placing them.
fn auto_height(style: &ComputedStyle, ctx: &SizeContext) -> Option<u16> {
    let pad = style.padding.vertical();
    match ctx.kind {
        ElementKind::Box => {
            if ctx.is_leaf {
                Some(pad)
            } else {
                None
            }
        }
        ElementKind::Text => {
            let lines = ctx.text.map(text_height).unwrap_or(0);
            Some(lines.saturating_add(pad))
        }
        // One-line controls.
        _ => Some(1u16.saturating_add(pad)),
    }
}

/// Concrete width for an element, given the space its parent offers.
pub fn resolve_width(
    style: &ComputedStyle,
    ctx: &SizeContext,
    available: u16,
    viewport: &ViewportInfo,
) -> u16 {
    let base = resolve_dimension(style.width, viewport.width)
        .unwrap_or_else(|| auto_width(style, ctx, available));
    clamp_size(base, style.min_w, style.max_w).min(viewport.width)
}

/// Concrete height, or `None` when it must come from laid-out children.
pub fn resolve_height(
    style: &ComputedStyle,
    ctx: &SizeContext,
    viewport: &ViewportInfo,
) -> Option<u16> {
    let base = match resolve_dimension(style.height, viewport.height) {
        Some(h) => h,
        None => auto_height(style, ctx)?,
    };
    Some(clamp_size(base, style.min_h, style.max_h).min(viewport.height))
}

/// Clamp an already-derived (content-based) height to the element's bounds.
pub fn clamp_derived_height(style: &ComputedStyle, height: u16, viewport: &ViewportInfo) -> u16 {
    clamp_size(height, style.min_h, style.max_h).min(viewport.height)
}

// ───────────────────────────────────────── tests ─────────────
