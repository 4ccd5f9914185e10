//! Flex placement: distribute independently-sized children along a main
//! axis inside a parent's content box.
//!
//! The engine only places; it never resizes.  Children arrive already
//! sized, and negative free space simply produces overlapping rects;
//! callers get no clipping and no errors.

use crate::layout::rect::LayoutRect;
use crate::style::{Align, FlexDirection, Justify};

/// Place `sizes` (width, height per child) inside `content`.
///
/// `gap` is a fixed main-axis gap between adjacent children, applied before
/// justify distribution of whatever space remains.
pub fn place(
    content: LayoutRect,
    direction: FlexDirection,
    justify: Justify,
    align: Align,
    gap: u16,
    sizes: &[(u16, u16)],
) -> Vec<LayoutRect> {
    let n = sizes.len();
    if n == 0 {
        return Vec::new();
    }

    let (main_avail, cross_avail) = match direction {
        FlexDirection::Row => (content.width, content.height),
        FlexDirection::Column => (content.height, content.width),
    };

    let main_size = |&(w, h): &(u16, u16)| match direction {
        FlexDirection::Row => w,
        FlexDirection::Column => h,
    };
    let cross_size = |&(w, h): &(u16, u16)| match direction {
        FlexDirection::Row => h,
        FlexDirection::Column => w,
    };

    let used: i32 = sizes.iter().map(|s| i32::from(main_size(s))).sum::<i32>()
        + i32::from(gap) * (n as i32 - 1);
    let free = i32::from(main_avail) - used;

    // Leading offset plus extra spacing inserted after every child.
    let (lead, step) = match justify {
        Justify::Start => (0, 0),
        Justify::Center => (free / 2, 0),
        Justify::End => (free, 0),
        Justify::SpaceBetween => {
            if n > 1 {
                (0, free / (n as i32 - 1))
            } else {
                (0, 0)
            }
        }
        Justify::SpaceAround => {
            let slice = free / n as i32;
            (slice / 2, slice)
        }
    };

    let (main_origin, cross_origin) = match direction {
        FlexDirection::Row => (content.x, content.y),
        FlexDirection::Column => (content.y, content.x),
    };

    let mut cursor = main_origin + lead;
    let mut out = Vec::with_capacity(n);
    for size in sizes {
        let cross = match align {
            // Stretch does not resize children yet; it falls back to start.
            Align::Start | Align::Stretch => cross_origin,
            Align::Center => {
                cross_origin + (i32::from(cross_avail) - i32::from(cross_size(size))) / 2
            }
            Align::End => cross_origin + i32::from(cross_avail) - i32::from(cross_size(size)),
        };

        let (w, h) = *size;
        let rect = match direction {
            FlexDirection::Row => LayoutRect::new(cursor, cross, w, h),
            FlexDirection::Column => LayoutRect::new(cross, cursor, w, h),
        };
        out.push(rect);

        cursor += i32::from(main_size(size)) + i32::from(gap) + step;
    }
    out
}

// ───────────────────────────────────────── tests ─────────────
