//! Grid placement: row-major cursor placement into fixed column tracks.
//!
//! Track width is `floor((available − gap·(cols−1)) / cols)`; division
//! remainders are dropped, not redistributed.  There is no occupancy map:
//! the cursor advances by the current item's column span and wraps using
//! the current item's row span, so mixed spans within one row can overlap.
//! The engine never rejects input.

use crate::layout::rect::LayoutRect;
use crate::style::ComputedStyle;

/// Grid placement inputs for one child.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridItem {
    pub col_span: u16,
    pub row_span: u16,
    pub col_start: Option<u16>,
    pub row_start: Option<u16>,
}

impl GridItem {
    pub fn from_style(style: &ComputedStyle) -> Self {
        Self {
            col_span: style.col_span(),
            row_span: style.row_span(),
            col_start: style.col_start,
            row_start: style.row_start,
        }
    }
}

/// Place `items` into `content` divided into `cols` column tracks.
///
/// `rows` is the explicit row count; when absent it is derived from the
/// item count (`ceil(n / cols)`).  Row height divides the available height
/// by that count.
pub fn place(
    content: LayoutRect,
    cols: u16,
    rows: Option<u16>,
    gap: (u16, u16),
    items: &[GridItem],
) -> Vec<LayoutRect> {
    if items.is_empty() {
        return Vec::new();
    }
    let cols = cols.max(1);
    let (gap_x, gap_y) = gap;

    let row_count = rows
        .filter(|&r| r > 0)
        .unwrap_or_else(|| (items.len() as u16).div_ceil(cols))
        .max(1);

    let track_w = content
        .width
        .saturating_sub(gap_x.saturating_mul(cols - 1))
        / cols;
    let track_h = content
        .height
        .saturating_sub(gap_y.saturating_mul(row_count - 1))
        / row_count;

    let span_extent = |track: u16, gap: u16, span: u16| -> u16 {
        track
            .saturating_mul(span)
            .saturating_add(gap.saturating_mul(span - 1))
    };

    let mut col: u16 = 0;
    let mut row: u16 = 0;
    let mut out = Vec::with_capacity(items.len());

    for item in items {
        let col_span = item.col_span.max(1).min(cols);
        let row_span = item.row_span.max(1);

        // Explicit placement overrides the cursor for this item.
        if let Some(start) = item.col_start {
            col = start.min(cols - 1);
        }
        if let Some(start) = item.row_start {
            row = start;
        }

        let x = content.x + i32::from(col) * i32::from(track_w.saturating_add(gap_x));
        let y = content.y + i32::from(row) * i32::from(track_h.saturating_add(gap_y));
        out.push(LayoutRect::new(
            x,
            y,
            span_extent(track_w, gap_x, col_span),
            span_extent(track_h, gap_y, row_span),
        ));

        // Advance the cursor; wrap with the *current* item's row span.
        col += col_span;
        if col >= cols {
            col = 0;
            row += row_span;
        }
    }
    out
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn item(col_span: u16, row_span: u16) -> GridItem {
        GridItem { col_span, row_span, col_start: None, row_start: None }
    }

    #[test]
    fn track_width_drops_the_remainder() {
        // (80 − 2·2) / 3 = 25 with remainder 1 dropped.
        let content = LayoutRect::new(0, 0, 80, 12);
        let rects = place(content, 3, None, (2, 0), &[item(1, 1); 3]);
        assert_eq!(rects[0].width, 25);
        assert_eq!(rects[1].x, 27);
        assert_eq!(rects[2].x, 54);
    }

    #[test]
    fn column_span_absorbs_interior_gaps() {
        // Span-2 item at column 0: 25·2 + 2 = 52.
        let content = LayoutRect::new(0, 0, 80, 12);
        let rects = place(content, 3, None, (2, 0), &[item(2, 1), item(1, 1)]);
        assert_eq!(rects[0].width, 52);
        assert_eq!(rects[1].x, 54);
    }

    #[test]
    fn row_major_wrapping() {
        let content = LayoutRect::new(0, 0, 60, 20);
        let rects = place(content, 2, None, (0, 0), &[item(1, 1); 4]);
        // rows derived: ceil(4/2) = 2, track_h = 10.
        assert_eq!(rects[0].y, 0);
        assert_eq!(rects[1].y, 0);
        assert_eq!(rects[2].y, 10);
        assert_eq!(rects[2].x, 0);
        assert_eq!(rects[3].x, 30);
    }

    #[test]
    fn wrap_advances_by_current_item_row_span() {
        let content = LayoutRect::new(0, 0, 40, 30);
        let items = [item(1, 1), item(1, 2), item(1, 1)];
        let rects = place(content, 2, Some(3), (0, 0), &items);
        // Item 1 wraps the row and carries its own span of 2: the next item
        // lands two rows down (track_h = 10).
        assert_eq!(rects[1].y, 0);
        assert_eq!(rects[2].y, 20);
    }

    #[test]
    fn mixed_spans_may_overlap_without_error() {
        let content = LayoutRect::new(0, 0, 40, 30);
        // Item 0 spans two rows, but item 1 wraps with span 1, so item 2
        // lands inside item 0's footprint.  Permitted.
        let items = [item(1, 2), item(1, 1), item(1, 1)];
        let rects = place(content, 2, Some(3), (0, 0), &items);
        assert_eq!(rects[0].bottom(), 20);
        assert_eq!(rects[2].y, 10);
        assert_eq!(rects[2].x, rects[0].x);
    }

    #[test]
    fn items_stay_within_the_derived_row_bound() {
        let content = LayoutRect::new(0, 0, 60, 24);
        let rects = place(content, 3, None, (1, 1), &[item(1, 1); 6]);
        // 2 derived rows; every bottom edge is within the content box.
        for r in &rects {
            assert!(r.bottom() <= content.bottom());
        }
    }

    #[test]
    fn explicit_start_overrides_the_cursor() {
        let content = LayoutRect::new(0, 0, 60, 10);
        let mut third = item(1, 1);
        third.col_start = Some(2);
        let rects = place(content, 3, Some(1), (0, 0), &[item(1, 1), third]);
        assert_eq!(rects[1].x, 40);
    }

    #[test]
    fn zero_items_no_division_errors() {
        let content = LayoutRect::new(0, 0, 0, 0);
        assert!(place(content, 3, None, (2, 2), &[]).is_empty());
    }
}
