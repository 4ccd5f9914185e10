//! Keyboard-focus index: visual-order traversal and directional jumps.
//!
//! The index is rebuilt from the layout tree every frame, so focus order
//! always follows what is on screen (ascending y, then x), never element
//! declaration order.  The previously focused element is re-found by id.

pub mod interaction;

pub use interaction::{FocusState, InteractionState};

use crate::layout::rect::LayoutRect;
use crate::layout::tree::LayoutNode;

/// Direction of a focus jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One focusable node as seen by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusEntry {
    pub id: String,
    pub rect: LayoutRect,
    tab_order: i32,
}

/// Ordered list of focusable nodes plus the current-focus pointer.
///
/// Focusable nodes without an id cannot be tracked across frames and are
/// skipped.  Every operation is a no-op on an empty index.
#[derive(Debug, Default)]
pub struct FocusIndex {
    entries: Vec<FocusEntry>,
    current: Option<usize>,
}

impl FocusIndex {
    /// Scan the layout tree and build the visual-order index.
    pub fn from_layout(root: &LayoutNode) -> Self {
        let mut entries = Vec::new();
        root.walk(&mut |node| {
            if !node.focusable {
                return;
            }
            let Some(id) = node.id.clone() else {
                return;
            };
            entries.push(FocusEntry {
                id,
                rect: node.rect,
                tab_order: node.tab_order.unwrap_or(0),
            });
        });
        // Screen position decides; the tab-order hint only breaks exact ties.
        entries.sort_by_key(|e| (e.rect.y, e.rect.x, e.tab_order));
        Self { entries, current: None }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[FocusEntry] {
        &self.entries
    }

    /// Id of the currently focused node, if any.
    pub fn current_id(&self) -> Option<&str> {
        self.current.map(|i| self.entries[i].id.as_str())
    }

    /// Re-point at `id` after a rebuild.  If the node is gone, focus clears.
    pub fn restore(&mut self, id: Option<&str>) {
        self.current = id.and_then(|id| self.entries.iter().position(|e| e.id == id));
    }

    /// Advance to the next node in visual order, wrapping.
    pub fn focus_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current = Some(match self.current {
            Some(i) => (i + 1) % self.entries.len(),
            None => 0,
        });
    }

    /// Step back to the previous node in visual order, wrapping.
    pub fn focus_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current = Some(match self.current {
            Some(i) => (i + self.entries.len() - 1) % self.entries.len(),
            None => self.entries.len() - 1,
        });
    }

    /// Jump to the nearest node strictly in `dir` from the current node's
    /// rect centre.  With no candidate in that direction, fall back to the
    /// next (down/right) or previous (up/left) node in sorted order.
    pub fn focus_move(&mut self, dir: Direction) {
        if self.entries.is_empty() {
            return;
        }
        let Some(cur) = self.current else {
            // Nothing focused yet: land on the first node.
            self.current = Some(0);
            return;
        };

        let (cx, cy) = self.entries[cur].rect.center();
        let best = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != cur)
            .filter_map(|(i, e)| {
                let (ex, ey) = e.rect.center();
                // Strictly in the requested direction; distance is primary
                // axis first, perpendicular drift second.
                let key = match dir {
                    Direction::Up if ey < cy => (cy - ey, (ex - cx).abs()),
                    Direction::Down if ey > cy => (ey - cy, (ex - cx).abs()),
                    Direction::Left if ex < cx => (cx - ex, (ey - cy).abs()),
                    Direction::Right if ex > cx => (ex - cx, (ey - cy).abs()),
                    _ => return None,
                };
                Some((key, i))
            })
            .min()
            .map(|(_, i)| i);

        match best {
            Some(i) => self.current = Some(i),
            None => match dir {
                Direction::Down | Direction::Right => self.focus_next(),
                Direction::Up | Direction::Left => self.focus_prev(),
            },
        }
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, ElementKind};
    use crate::layout::rect::ViewportInfo;
    use crate::layout::tree;

    fn focusable_at(id: &str, classes: &[&str]) -> Element {
        Element::new(ElementKind::Button)
            .with_id(id)
            .with_classes(classes)
            .focusable()
    }

    fn index_of(root: &Element) -> FocusIndex {
        let tree = tree::build(root, ViewportInfo::new(80, 24)).unwrap();
        FocusIndex::from_layout(&tree)
    }

    #[test]
    fn order_follows_screen_position_not_declaration() {
        // Declared b-then-a, but `a` is absolutely positioned above `b`.
        let root = Element::new(ElementKind::Box)
            .with_classes(&["h-full"])
            .with_child(focusable_at("b", &["absolute", "top-5", "left-0", "w-8", "h-1"]))
            .with_child(focusable_at("a", &["absolute", "top-1", "left-0", "w-8", "h-1"]));
        let index = index_of(&root);
        let ids: Vec<&str> = index.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn same_row_sorts_left_to_right() {
        let root = Element::new(ElementKind::Box)
            .with_classes(&["h-full"])
            .with_child(focusable_at("right", &["absolute", "top-0", "left-20", "w-5", "h-1"]))
            .with_child(focusable_at("left", &["absolute", "top-0", "left-2", "w-5", "h-1"]));
        let index = index_of(&root);
        let ids: Vec<&str> = index.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["left", "right"]);
    }

    #[test]
    fn next_and_prev_wrap() {
        let root = Element::new(ElementKind::Box)
            .with_classes(&["h-full"])
            .with_child(focusable_at("a", &["h-1"]))
            .with_child(focusable_at("b", &["h-1"]));
        let mut index = index_of(&root);

        index.focus_next();
        assert_eq!(index.current_id(), Some("a"));
        index.focus_next();
        assert_eq!(index.current_id(), Some("b"));
        index.focus_next();
        assert_eq!(index.current_id(), Some("a"));
        index.focus_prev();
        assert_eq!(index.current_id(), Some("b"));
    }

    #[test]
    fn empty_index_is_a_noop() {
        let root = Element::new(ElementKind::Box).with_classes(&["h-full"]);
        let mut index = index_of(&root);
        index.focus_next();
        index.focus_move(Direction::Down);
        assert_eq!(index.current_id(), None);
    }

    #[test]
    fn directional_move_picks_nearest_in_direction() {
        // a . b
        // .   .
        // c . d       (b is right of a; c below a; d below b)
        let root = Element::new(ElementKind::Box)
            .with_classes(&["h-full"])
            .with_child(focusable_at("a", &["absolute", "top-0", "left-0", "w-4", "h-1"]))
            .with_child(focusable_at("b", &["absolute", "top-0", "left-20", "w-4", "h-1"]))
            .with_child(focusable_at("c", &["absolute", "top-6", "left-0", "w-4", "h-1"]))
            .with_child(focusable_at("d", &["absolute", "top-6", "left-20", "w-4", "h-1"]));
        let mut index = index_of(&root);

        index.restore(Some("a"));
        index.focus_move(Direction::Right);
        assert_eq!(index.current_id(), Some("b"));
        index.focus_move(Direction::Down);
        assert_eq!(index.current_id(), Some("d"));
        index.focus_move(Direction::Left);
        assert_eq!(index.current_id(), Some("c"));
        index.focus_move(Direction::Up);
        assert_eq!(index.current_id(), Some("a"));
    }

    #[test]
    fn directional_move_falls_back_to_sorted_order() {
        let root = Element::new(ElementKind::Box)
            .with_classes(&["h-full"])
            .with_child(focusable_at("a", &["absolute", "top-0", "left-0", "w-4", "h-1"]))
            .with_child(focusable_at("b", &["absolute", "top-6", "left-0", "w-4", "h-1"]));
        let mut index = index_of(&root);

        // Nothing to the right of `a` → fall back to next in order.
        index.restore(Some("a"));
        index.focus_move(Direction::Right);
        assert_eq!(index.current_id(), Some("b"));

        // Nothing above `a` → previous in order, wrapping to `b`.
        index.restore(Some("a"));
        index.focus_move(Direction::Up);
        assert_eq!(index.current_id(), Some("b"));
    }

    #[test]
    fn restore_survives_relayout_and_clears_when_gone() {
        let root = Element::new(ElementKind::Box)
            .with_classes(&["h-full"])
            .with_child(focusable_at("a", &["h-1"]))
            .with_child(focusable_at("b", &["h-1"]));
        let mut index = index_of(&root);
        index.restore(Some("b"));
        assert_eq!(index.current_id(), Some("b"));
        index.restore(Some("vanished"));
        assert_eq!(index.current_id(), None);
    }
}
