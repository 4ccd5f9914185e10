//! The fully resolved style record produced by the class resolver.
//!
//! A [`ComputedStyle`] starts from [`ComputedStyle::default`] and is folded
//! over an element's class list, left to right.  Every field is already in
//! character-cell units except [`Dimension::Ratio`], which stays symbolic
//! until the box-model pass resolves it against the viewport.

// ───────────────────────────────────────── enums ─────────────

/// How an element participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    Inline,
    Flex,
    Grid,
    /// Removed from layout entirely; no [`crate::layout::LayoutNode`] is produced.
    None,
}

/// Positioning scheme.  `Absolute`/`Fixed` elements are computed but
/// excluded from normal-flow cursor advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

/// Flex main-axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

/// Main-axis free-space distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

/// Cross-axis alignment, applied to each child independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Currently laid out as `Start`; stretch does not resize children.
    Stretch,
}

/// A width or height as written in a class, before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    /// Fixed size in character cells.
    Cells(u16),
    /// Content-based (leaves) or fill-available (containers).
    #[default]
    Auto,
    /// Fraction of the viewport axis, e.g. `w-1/2` → `Ratio(1, 2)`.
    /// Resolved at box-model time, always against the viewport.
    Ratio(u16, u16),
}

/// Paint-ordering layer.  Variants are declared in ascending paint order,
/// so deriving `Ord` gives the z-order directly: higher layers paint last
/// and therefore over lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Layer {
    /// Drop-shadow copies, always painted first, beneath everything.
    Shadow,
    #[default]
    Normal,
    Elevated,
    Floating,
    Tooltip,
    Modal,
    Overlay,
}

/// The 16 ANSI terminal colours plus the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
}

// ───────────────────────────────────────── edges ─────────────

/// Four-sided spacing in cells (margin or padding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub fn all(n: u16) -> Self {
        Self { top: n, right: n, bottom: n, left: n }
    }

    /// Combined left + right spacing.
    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Combined top + bottom spacing.
    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

// ───────────────────────────────────────── attrs ─────────────

/// Text decoration flags carried into the draw stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAttrs {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dim: bool,
}

// ───────────────────────────────────────── computed style ────

/// Fully resolved style for one element.
///
/// Invariant: sizes that come out of the box-model pass are non-negative
/// and clamped to the viewport; nothing here enforces that, the layout
/// passes do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputedStyle {
    pub display: Display,
    pub position: Position,
    pub margin: Edges,
    pub padding: Edges,
    pub width: Dimension,
    pub height: Dimension,
    pub min_w: Option<u16>,
    pub max_w: Option<u16>,
    pub min_h: Option<u16>,
    pub max_h: Option<u16>,
    pub flex_direction: FlexDirection,
    pub justify: Justify,
    pub align: Align,
    pub wrap: bool,
    pub grid_cols: Option<u16>,
    pub grid_rows: Option<u16>,
    pub gap_x: u16,
    pub gap_y: u16,
    /// Grid item placement.  Spans below 1 are treated as 1.
    pub col_span: u16,
    pub row_span: u16,
    pub col_start: Option<u16>,
    pub row_start: Option<u16>,
    /// Verbatim offsets for absolute/fixed positioning.
    pub top: Option<i32>,
    pub left: Option<i32>,
    pub fg: Color,
    pub bg: Color,
    pub attrs: TextAttrs,
    pub layer: Layer,
    /// Marks the element for a drop-shadow duplicate on the shadow layer.
    pub shadow: bool,
}

impl ComputedStyle {
    /// Effective grid span, never zero.
    pub fn col_span(&self) -> u16 {
        self.col_span.max(1)
    }

    pub fn row_span(&self) -> u16 {
        self.row_span.max(1)
    }
}
