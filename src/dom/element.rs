//! The caller-facing element tree.
//!
//! An [`Element`] is a plain owned tree; children are held by value, so the
//! structure is acyclic by construction.  The engine treats it as read-only
//! input: every frame re-derives a fresh layout tree from it.

use std::collections::HashMap;

use thiserror::Error;

/// Layout recursion deeper than this raises [`StructuralError`].  Ownership
/// already rules out true cycles; the guard catches runaway generated trees
/// before they overflow the stack.
pub const MAX_TREE_DEPTH: usize = 256;

/// Raised when an element tree cannot be laid out at all.  This is the only
/// fatal condition in the engine; everything else degrades.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("element tree exceeds maximum depth of {MAX_TREE_DEPTH}")]
    TooDeep,
}

/// Closed set of element kinds the engine knows how to size and paint.
///
/// Anything richer (tables, spinners, …) is a collaborator concern built
/// out of these primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    /// Generic container.
    #[default]
    Box,
    Text,
    Button,
    /// Single-line bracketed text field.
    Input,
    Checkbox,
    /// Checkbox variant with exclusive selection per group key.
    Radio,
}

/// One node in the caller's UI description.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub kind: ElementKind,
    /// Stable identity, used to preserve focus and interaction state
    /// across relayouts.  Uniqueness is the caller's responsibility.
    pub id: Option<String>,
    /// Ordered utility-class list; resolution is last-write-wins.
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
    pub focusable: bool,
    pub tab_order: Option<i32>,
    /// Opaque key-binding hints forwarded to the external input router.
    pub key_bindings: Vec<String>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, ..Default::default() }
    }

    // ── builder-style constructors ──────────────────────────────

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub fn with_tab_order(mut self, order: i32) -> Self {
        self.tab_order = Some(order);
        self
    }

    // ── accessors ───────────────────────────────────────────────

    /// Attribute parsed as an integer; missing or malformed → `default`.
    pub fn attr_u16(&self, key: &str, default: u16) -> u16 {
        self.attrs
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Radio-group key (the `group` attribute).
    pub fn group(&self) -> Option<&str> {
        self.attrs.get("group").map(String::as_str)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first search for the element carrying `id`.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(id) {
                return Some(found);
            }
        }
        None
    }

    /// Visit every element in document order.
    pub fn walk(&self, visit: &mut impl FnMut(&Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
