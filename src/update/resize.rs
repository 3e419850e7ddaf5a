//! Resizing two adjacent siblings
//!
//! Dragging the boundary after child `i` moves weight between child `i` and
//! child `i + 1`. All other siblings keep their weights, so the container's
//! total never changes.

use crate::commands::Cmd;
use crate::messages::ResizeMsg;
use crate::model::{ContainerKind, ContainerNode, DockModel, Gesture, LayoutNode};

/// Neither side of a boundary drops below this share of the pair's weight
const MIN_PAIR_SHARE: f64 = 0.001;

/// Sibling weights captured when a boundary drag begins
///
/// Every move is applied against these saved weights, not the current ones,
/// so a drag never accumulates rounding drift.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    index: usize,
    saved: Vec<f64>,
}

impl ResizeSession {
    /// Start dragging the boundary after child `index`. `None` if there is no
    /// child after it.
    pub fn begin(container: &ContainerNode, index: usize) -> Option<Self> {
        if index + 1 >= container.children.len() {
            return None;
        }
        Some(Self {
            index,
            saved: container.children.iter().map(LayoutNode::size).collect(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn saved_sizes(&self) -> &[f64] {
        &self.saved
    }

    /// Scale child `index` to `ratio` times its saved weight, taking the
    /// difference from (or giving it to) the next child
    ///
    /// In a column, neither child may get shorter than `min_extent(i)` pixels
    /// out of `container_extent`. When both can't be satisfied the first
    /// child wins.
    pub fn apply(
        &self,
        container: &mut ContainerNode,
        ratio: f64,
        container_extent: f64,
        min_extent: impl Fn(usize) -> f64,
    ) -> bool {
        if container.children.len() != self.saved.len() {
            tracing::warn!(
                container = %container.id,
                "children changed during resize, ignoring move"
            );
            return false;
        }
        if !ratio.is_finite() {
            return false;
        }

        let i = self.index;
        let (first, second) = (self.saved[i], self.saved[i + 1]);
        let pair = first + second;
        if pair <= 0.0 {
            return false;
        }

        let max_ratio = if first > 0.0 { pair / first } else { 0.0 };
        let mut size = first * ratio.clamp(0.0, max_ratio);

        if container.kind == ContainerKind::Column && container_extent > 0.0 {
            let total: f64 = self.saved.iter().sum();
            let to_weight = |px: f64| px / container_extent * total;
            let min_first = to_weight(min_extent(i));
            let min_second = to_weight(min_extent(i + 1));
            if pair - size < min_second {
                size = pair - min_second;
            }
            if size < min_first {
                size = min_first;
            }
        }

        let floor = pair * MIN_PAIR_SHARE;
        let size = size.clamp(floor, pair - floor);
        container.children[i].set_size(size);
        container.children[i + 1].set_size(pair - size);
        true
    }
}

/// Smallest on-axis pixel extent a node can be squeezed to
///
/// A leaf needs its tab strip; a row needs its tallest child; a column needs
/// all its children stacked.
pub fn min_extent_for(node: &LayoutNode, header_height: f64) -> f64 {
    match node {
        LayoutNode::Leaf(_) => header_height,
        LayoutNode::Container(container) => {
            let mins = container
                .children
                .iter()
                .map(|child| min_extent_for(child, header_height));
            match container.kind {
                ContainerKind::Row => mins.fold(0.0, f64::max),
                ContainerKind::Column => mins.sum(),
            }
        }
    }
}

// ============================================================================
// Gesture handling
// ============================================================================

/// Handle resize messages
pub fn update_resize(model: &mut DockModel, msg: ResizeMsg) -> Option<Cmd> {
    match msg {
        ResizeMsg::Begin { container, index } => {
            if !model.gesture.is_idle() {
                tracing::debug!(gesture = model.gesture.name(), "resize begin ignored");
                return None;
            }
            let session = model
                .root
                .as_ref()
                .and_then(|root| root.find(container))
                .and_then(LayoutNode::as_container)
                .and_then(|c| ResizeSession::begin(c, index));
            match session {
                Some(session) => {
                    tracing::debug!(%container, index = session.index(), "resize started");
                    model.gesture = Gesture::Resizing { container, session };
                }
                None => {
                    tracing::debug!(%container, index, "no boundary to resize");
                }
            }
            None
        }

        ResizeMsg::Move {
            ratio,
            container_extent,
        } => {
            let DockModel {
                root,
                gesture,
                config,
                ..
            } = model;
            let Gesture::Resizing { container, session } = gesture else {
                tracing::debug!("resize move outside a resize gesture ignored");
                return None;
            };
            let Some(node) = root
                .as_mut()
                .and_then(|r| r.find_mut(*container))
                .and_then(LayoutNode::as_container_mut)
            else {
                tracing::debug!(container = %container, "resized container is gone");
                return None;
            };

            let mins: Vec<f64> = node
                .children
                .iter()
                .map(|child| min_extent_for(child, config.header_height))
                .collect();
            let changed = session.apply(node, ratio, container_extent, |i| {
                mins.get(i).copied().unwrap_or(0.0)
            });
            changed.then_some(Cmd::Redraw)
        }

        ResizeMsg::End => {
            if matches!(model.gesture, Gesture::Resizing { .. }) {
                model.gesture = Gesture::Idle;
            }
            None
        }
    }
}
