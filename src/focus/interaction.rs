//! Per-node interaction state: focus machine, checked flags, input values.
//!
//! State is keyed by element id and survives relayout; the layout tree is
//! rebuilt every frame but ids are stable.  The state machine per node is
//! Normal → Focused (navigation landing) → Activated (confirm) → Focused;
//! the frame loop calls `settle` after rendering, so the confirm flash is
//! visible for exactly one frame.

use std::collections::HashMap;

use crate::dom::{Element, ElementKind};

/// Where a node sits in the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
    /// Transient confirm flash; demoted back to `Focused` on `settle`.
    Activated,
}

/// Mutable interaction state for one identified node.
#[derive(Debug, Clone, Default)]
pub struct NodeState {
    pub kind: ElementKind,
    pub focus: FocusState,
    pub checked: bool,
    pub value: String,
    pub group: Option<String>,
}

/// All interaction state, keyed by element id.
#[derive(Debug, Default)]
pub struct InteractionState {
    nodes: HashMap<String, NodeState>,
}

impl InteractionState {
    /// Register every identified interactive element, seeding initial state
    /// from attributes (`checked`, `value`, `group`).  Existing entries keep
    /// their runtime state; only kind and group are refreshed.
    pub fn sync(&mut self, root: &Element) {
        root.walk(&mut |el| {
            let Some(id) = el.id.as_ref() else {
                return;
            };
            let interactive = el.focusable
                || matches!(
                    el.kind,
                    ElementKind::Button
                        | ElementKind::Input
                        | ElementKind::Checkbox
                        | ElementKind::Radio
                );
            if !interactive {
                return;
            }

            let group = el.group().map(str::to_string);
            let entry = self.nodes.entry(id.clone()).or_insert_with(|| NodeState {
                kind: el.kind,
                focus: FocusState::Normal,
                checked: el.attrs.get("checked").map(String::as_str) == Some("true"),
                value: el
                    .attrs
                    .get("value")
                    .cloned()
                    .or_else(|| el.text.clone())
                    .unwrap_or_default(),
                group: group.clone(),
            });
            entry.kind = el.kind;
            entry.group = group;
        });
    }

    /// Move keyboard focus to `id` (or clear it), demoting the old holder.
    pub fn set_focused(&mut self, id: Option<&str>) {
        for (key, node) in &mut self.nodes {
            if Some(key.as_str()) == id {
                if node.focus == FocusState::Normal {
                    node.focus = FocusState::Focused;
                }
            } else if node.focus != FocusState::Normal {
                node.focus = FocusState::Normal;
            }
        }
    }

    /// Demote any `Activated` node back to `Focused`.  Called after each
    /// frame is rendered so the confirm flash lasts exactly one frame.
    pub fn settle(&mut self) {
        for node in self.nodes.values_mut() {
            if node.focus == FocusState::Activated {
                node.focus = FocusState::Focused;
            }
        }
    }

    /// Confirm the node: buttons flash, checkboxes toggle, radios become
    /// the sole checked member of their group.
    pub fn activate(&mut self, id: &str) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        match node.kind {
            ElementKind::Checkbox => {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.checked = !node.checked;
                    node.focus = FocusState::Activated;
                }
            }
            ElementKind::Radio => {
                let group = node.group.clone();
                // Clear siblings sharing the group key before checking.
                if let Some(group) = &group {
                    for (key, other) in &mut self.nodes {
                        if other.kind == ElementKind::Radio
                            && other.group.as_deref() == Some(group)
                            && key != id
                        {
                            other.checked = false;
                        }
                    }
                }
                if let Some(node) = self.nodes.get_mut(id) {
                    node.checked = true;
                    node.focus = FocusState::Activated;
                }
            }
            _ => {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.focus = FocusState::Activated;
                }
            }
        }
    }

    /// Flip a checkable node.  Radios keep exclusive-group semantics.
    pub fn toggle(&mut self, id: &str) {
        match self.nodes.get(id).map(|n| n.kind) {
            Some(ElementKind::Checkbox) => {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.checked = !node.checked;
                }
            }
            Some(ElementKind::Radio) => self.activate(id),
            _ => {}
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.nodes.get(id).map(|n| n.checked).unwrap_or(false)
    }

    pub fn focus_of(&self, id: &str) -> FocusState {
        self.nodes.get(id).map(|n| n.focus).unwrap_or_default()
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|n| n.value.as_str())
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.value = value.into();
        }
    }
}

// ───────────────────────────────────────── tests ─────────────
