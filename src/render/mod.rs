//! Rendering: layout tree to an ordered draw-operation stream.
//!
//! The walk tags every node with an effective layer (a child never paints
//! below the layer its ancestor raised it to), stable-sorts ascending by
//! layer so higher layers paint last and over, and then runs each node's
//! paint routine.  Shadow-marked nodes enqueue a dimmed duplicate on the
//! lowest layer; modal/overlay nodes dim the whole viewport first.

pub mod ops;
pub mod painter;
pub mod writer;

pub use ops::{CellStyle, DrawOp};
pub use painter::PaintError;

use crate::focus::InteractionState;
use crate::layout::rect::ViewportInfo;
use crate::layout::tree::LayoutNode;
use crate::style::Layer;

/// One entry in the paint queue.
struct PaintJob<'a> {
    node: &'a LayoutNode,
    layer: Layer,
    /// Render the dimmed shadow duplicate instead of the node itself.
    shadow: bool,
    /// The node itself declared modal/overlay (not inherited) and owns a
    /// backdrop.
    backdrop: bool,
}

/// Walks layout trees and emits draw operations in z-order.
pub struct Renderer {
    viewport: ViewportInfo,
}

impl Renderer {
    pub fn new(viewport: ViewportInfo) -> Self {
        Self { viewport }
    }

    /// Produce the full frame's draw stream.
    pub fn render(&self, root: &LayoutNode, state: &InteractionState) -> Vec<DrawOp> {
        let mut jobs = Vec::new();
        collect_jobs(root, Layer::Normal, &mut jobs);

        // Stable sort: equal layers keep document order, so parents painted
        // before their children and shadows before their sources.
        jobs.sort_by_key(|job| job.layer);

        let mut out = Vec::new();
        for job in jobs {
            if job.shadow {
                out.extend(painter::paint_shadow(job.node, &self.viewport));
                continue;
            }
            if job.backdrop {
                out.extend(painter::paint_backdrop(&self.viewport));
            }
            match painter::paint_node(job.node, state, &self.viewport) {
                Ok(ops) => out.extend(ops),
                Err(err) => {
                    // One broken element must not blank the frame.
                    tracing::warn!(%err, "paint routine failed, using placeholder");
                    out.extend(painter::paint_placeholder(job.node.rect, &self.viewport));
                }
            }
        }
        out
    }
}

fn collect_jobs<'a>(node: &'a LayoutNode, inherited: Layer, jobs: &mut Vec<PaintJob<'a>>) {
    let effective = inherited.max(node.style.layer);

    if node.style.shadow {
        jobs.push(PaintJob { node, layer: Layer::Shadow, shadow: true, backdrop: false });
    }
    jobs.push(PaintJob {
        node,
        layer: effective,
        shadow: false,
        backdrop: node.style.layer >= Layer::Modal,
    });

    for child in &node.children {
        collect_jobs(child, effective, jobs);
    }
}

// ───────────────────────────────────────── tests ─────────────
