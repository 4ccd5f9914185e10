//! Utility-class resolution: class list to [`ComputedStyle`].
//!
//! A left-to-right fold over the element's classes: each token is matched
//! against a fixed rule table and mutates one or more style fields.  Later
//! classes win on conflicting properties (last-write-wins, not CSS
//! specificity).  Unknown tokens are silently ignored so an out-of-date
//! theme never breaks layout.

use super::computed::{
    Align, Color, ComputedStyle, Dimension, Display, Edges, FlexDirection, Justify, Layer,
    Position,
};

/// Fold `classes` over `base` and return the resolved style.
pub fn resolve(classes: &[String], base: ComputedStyle) -> ComputedStyle {
    let mut style = base;
    for class in classes {
        apply_class(&mut style, class);
    }
    style
}

/// Apply a single class token.  Unrecognized tokens leave `style` untouched.
fn apply_class(style: &mut ComputedStyle, token: &str) {
    // Exact-match keywords first; prefixed (parameterized) rules after.
    match token {
        // ── display ────────────────────────────────────────────
        "block" => style.display = Display::Block,
        "inline" => style.display = Display::Inline,
        "flex" => style.display = Display::Flex,
        "grid" => style.display = Display::Grid,
        "hidden" => style.display = Display::None,

        // ── flex axis / wrap ───────────────────────────────────
        "flex-row" => {
            style.display = Display::Flex;
            style.flex_direction = FlexDirection::Row;
        }
        "flex-col" => {
            style.display = Display::Flex;
            style.flex_direction = FlexDirection::Column;
        }
        "flex-wrap" => style.wrap = true,
        "flex-nowrap" => style.wrap = false,

        // ── justify / align ────────────────────────────────────
        "justify-start" => style.justify = Justify::Start,
        "justify-center" => style.justify = Justify::Center,
        "justify-end" => style.justify = Justify::End,
        "justify-between" => style.justify = Justify::SpaceBetween,
        "justify-around" => style.justify = Justify::SpaceAround,
        "items-start" => style.align = Align::Start,
        "items-center" => style.align = Align::Center,
        "items-end" => style.align = Align::End,
        "items-stretch" => style.align = Align::Stretch,

        // ── position ───────────────────────────────────────────
        "static" => style.position = Position::Static,
        "relative" => style.position = Position::Relative,
        "absolute" => style.position = Position::Absolute,
        "fixed" => style.position = Position::Fixed,

        // ── sizing keywords ────────────────────────────────────
        "w-auto" => style.width = Dimension::Auto,
        "w-full" => style.width = Dimension::Ratio(1, 1),
        "h-auto" => style.height = Dimension::Auto,
        "h-full" => style.height = Dimension::Ratio(1, 1),

        // ── text attributes ────────────────────────────────────
        "bold" => style.attrs.bold = true,
        "italic" => style.attrs.italic = true,
        "underline" => style.attrs.underline = true,
        "dim" => style.attrs.dim = true,

        // ── layers / shadow ────────────────────────────────────
        "elevated" => style.layer = Layer::Elevated,
        "floating" => style.layer = Layer::Floating,
        "tooltip" => style.layer = Layer::Tooltip,
        "modal" => style.layer = Layer::Modal,
        "overlay" => style.layer = Layer::Overlay,
        "shadow" => style.shadow = true,

        // ── semantic shortcuts ─────────────────────────────────
        "title" => style.attrs.bold = true,
        "muted" => {
            style.attrs.dim = true;
            style.fg = Color::Gray;
        }
        "card" => {
            style.padding = Edges::all(1);
            style.layer = Layer::Elevated;
        }

        _ => apply_prefixed(style, token),
    }
}

/// Parameterized rules: `w-10`, `mx-2`, `grid-cols-3`, `text-red`, …
fn apply_prefixed(style: &mut ComputedStyle, token: &str) {
    // Sizing: dimension values (number, fraction).
    if let Some(rest) = token.strip_prefix("min-w-") {
        if let Ok(n) = rest.parse() {
            style.min_w = Some(n);
        }
    } else if let Some(rest) = token.strip_prefix("max-w-") {
        if let Ok(n) = rest.parse() {
            style.max_w = Some(n);
        }
    } else if let Some(rest) = token.strip_prefix("min-h-") {
        if let Ok(n) = rest.parse() {
            style.min_h = Some(n);
        }
    } else if let Some(rest) = token.strip_prefix("max-h-") {
        if let Ok(n) = rest.parse() {
            style.max_h = Some(n);
        }
    } else if let Some(rest) = token.strip_prefix("w-") {
        if let Some(dim) = parse_dimension(rest) {
            style.width = dim;
        }
    } else if let Some(rest) = token.strip_prefix("h-") {
        if let Some(dim) = parse_dimension(rest) {
            style.height = dim;
        }
    }
    // Spacing: margin then padding, axis and per-side forms.
    else if let Some(rest) = token.strip_prefix("mx-") {
        if let Ok(n) = rest.parse::<u16>() {
            style.margin.left = n;
            style.margin.right = n;
        }
    } else if let Some(rest) = token.strip_prefix("my-") {
        if let Ok(n) = rest.parse::<u16>() {
            style.margin.top = n;
            style.margin.bottom = n;
        }
    } else if let Some(rest) = token.strip_prefix("mt-") {
        if let Ok(n) = rest.parse() {
            style.margin.top = n;
        }
    } else if let Some(rest) = token.strip_prefix("mr-") {
        if let Ok(n) = rest.parse() {
            style.margin.right = n;
        }
    } else if let Some(rest) = token.strip_prefix("mb-") {
        if let Ok(n) = rest.parse() {
            style.margin.bottom = n;
        }
    } else if let Some(rest) = token.strip_prefix("ml-") {
        if let Ok(n) = rest.parse() {
            style.margin.left = n;
        }
    } else if let Some(rest) = token.strip_prefix("m-") {
        if let Ok(n) = rest.parse() {
            style.margin = Edges::all(n);
        }
    } else if let Some(rest) = token.strip_prefix("px-") {
        if let Ok(n) = rest.parse::<u16>() {
            style.padding.left = n;
            style.padding.right = n;
        }
    } else if let Some(rest) = token.strip_prefix("py-") {
        if let Ok(n) = rest.parse::<u16>() {
            style.padding.top = n;
            style.padding.bottom = n;
        }
    } else if let Some(rest) = token.strip_prefix("pt-") {
        if let Ok(n) = rest.parse() {
            style.padding.top = n;
        }
    } else if let Some(rest) = token.strip_prefix("pr-") {
        if let Ok(n) = rest.parse() {
            style.padding.right = n;
        }
    } else if let Some(rest) = token.strip_prefix("pb-") {
        if let Ok(n) = rest.parse() {
            style.padding.bottom = n;
        }
    } else if let Some(rest) = token.strip_prefix("pl-") {
        if let Ok(n) = rest.parse() {
            style.padding.left = n;
        }
    } else if let Some(rest) = token.strip_prefix("p-") {
        if let Ok(n) = rest.parse() {
            style.padding = Edges::all(n);
        }
    }
    // Grid container + item placement.
    else if let Some(rest) = token.strip_prefix("grid-cols-") {
        if let Ok(n) = rest.parse::<u16>() {
            if n > 0 {
                style.display = Display::Grid;
                style.grid_cols = Some(n);
            }
        }
    } else if let Some(rest) = token.strip_prefix("grid-rows-") {
        if let Ok(n) = rest.parse::<u16>() {
            if n > 0 {
                style.grid_rows = Some(n);
            }
        }
    } else if let Some(rest) = token.strip_prefix("gap-x-") {
        if let Ok(n) = rest.parse() {
            style.gap_x = n;
        }
    } else if let Some(rest) = token.strip_prefix("gap-y-") {
        if let Ok(n) = rest.parse() {
            style.gap_y = n;
        }
    } else if let Some(rest) = token.strip_prefix("gap-") {
        if let Ok(n) = rest.parse::<u16>() {
            style.gap_x = n;
            style.gap_y = n;
        }
    } else if let Some(rest) = token.strip_prefix("col-span-") {
        if let Ok(n) = rest.parse() {
            style.col_span = n;
        }
    } else if let Some(rest) = token.strip_prefix("row-span-") {
        if let Ok(n) = rest.parse() {
            style.row_span = n;
        }
    } else if let Some(rest) = token.strip_prefix("col-start-") {
        if let Ok(n) = rest.parse() {
            style.col_start = Some(n);
        }
    } else if let Some(rest) = token.strip_prefix("row-start-") {
        if let Ok(n) = rest.parse() {
            style.row_start = Some(n);
        }
    }
    // Absolute/fixed offsets.
    else if let Some(rest) = token.strip_prefix("top-") {
        if let Ok(n) = rest.parse() {
            style.top = Some(n);
        }
    } else if let Some(rest) = token.strip_prefix("left-") {
        if let Ok(n) = rest.parse() {
            style.left = Some(n);
        }
    }
    // Colours.
    else if let Some(rest) = token.strip_prefix("text-") {
        if let Some(c) = parse_color(rest) {
            style.fg = c;
        }
    } else if let Some(rest) = token.strip_prefix("bg-") {
        if let Some(c) = parse_color(rest) {
            style.bg = c;
        }
    }
    // Anything else: inert.
}

/// Parse the value part of a sizing class: `10`, `1/2`, `full`, `auto`.
fn parse_dimension(s: &str) -> Option<Dimension> {
    match s {
        "auto" => return Some(Dimension::Auto),
        "full" => return Some(Dimension::Ratio(1, 1)),
        _ => {}
    }
    if let Some((num, den)) = s.split_once('/') {
        let num: u16 = num.parse().ok()?;
        let den: u16 = den.parse().ok()?;
        if den == 0 {
            return None;
        }
        return Some(Dimension::Ratio(num, den));
    }
    s.parse().ok().map(Dimension::Cells)
}

fn parse_color(s: &str) -> Option<Color> {
    let c = match s {
        "default" => Color::Default,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        _ => return None,
    };
    Some(c)
}

// ───────────────────────────────────────── tests ─────────────
