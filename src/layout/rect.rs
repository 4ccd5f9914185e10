//! Geometry primitives: integer character-cell rectangles and the viewport.

use crate::style::Edges;

/// A rectangle in character cells, top-left origin.
///
/// `x`/`y` are signed so that centering an oversized child or offsetting a
/// shadow can legitimately go out of bounds; layout never clips.  Width and
/// height are always ≥ 0 by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl LayoutRect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// One past the right edge.
    pub fn right(&self) -> i32 {
        self.x + i32::from(self.width)
    }

    /// One past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + i32::from(self.height)
    }

    /// Geometric centre, used by directional focus navigation.
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + i32::from(self.width) / 2,
            self.y + i32::from(self.height) / 2,
        )
    }

    /// The content box: this rect inset by `padding` on all sides.
    pub fn inset(&self, padding: &Edges) -> LayoutRect {
        LayoutRect {
            x: self.x + i32::from(padding.left),
            y: self.y + i32::from(padding.top),
            width: self.width.saturating_sub(padding.horizontal()),
            height: self.height.saturating_sub(padding.vertical()),
        }
    }

    /// Whether `other` lies entirely inside this rect.
    pub fn contains(&self, other: &LayoutRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Terminal dimensions in character cells.
///
/// Snapshotted once at the start of every frame so a resize arriving
/// mid-layout can never tear a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportInfo {
    pub width: u16,
    pub height: u16,
}

impl ViewportInfo {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The full viewport as a rect at the origin.
    pub fn rect(&self) -> LayoutRect {
        LayoutRect::new(0, 0, self.width, self.height)
    }
}
