//! Pixel geometry of a layout
//!
//! The engine itself only knows relative weights. Hosts either measure their
//! rendered panels and fill a [`LayoutGeometry`] themselves, or let
//! [`compute_geometry`] lay the tree out proportionally inside a viewport.
//!
//! All functions here are pure and can be tested without any rendering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::DockConfig;
use crate::model::{ContainerKind, LayoutNode, NodeId, PanelName};

// ============================================================================
// Primitives
// ============================================================================

/// A point in host pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in host pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// Extent along a container's axis
    pub fn extent(&self, kind: ContainerKind) -> f64 {
        match kind {
            ContainerKind::Row => self.width,
            ContainerKind::Column => self.height,
        }
    }
}

// ============================================================================
// Geometry map
// ============================================================================

/// Insertion point in a leaf's tab strip
#[derive(Debug, Clone, PartialEq)]
pub struct TabPlaceholder {
    /// Tab the placeholder sits in front of, `None` for the trailing slot
    pub before: Option<PanelName>,
    pub center_x: f64,
}

/// Measured geometry of one node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGeometry {
    pub rect: Rect,
    pub header_height: f64,
    /// Leaves only: one slot before each tab plus a trailing one
    pub tab_placeholders: Vec<TabPlaceholder>,
}

/// Draggable boundary between two siblings of a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splitter {
    pub container: NodeId,
    /// Boundary between child `index` and `index + 1`
    pub index: usize,
    pub kind: ContainerKind,
    pub rect: Rect,
}

/// Node id → measured geometry, plus the splitters between siblings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutGeometry {
    nodes: HashMap<NodeId, NodeGeometry>,
    pub splitters: Vec<Splitter>,
}

impl LayoutGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, geometry: NodeGeometry) {
        self.nodes.insert(id, geometry);
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeGeometry> {
        self.nodes.get(&id)
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(&id).map(|g| g.rect)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Splitter under a point, if any
    pub fn splitter_at(&self, p: Point) -> Option<&Splitter> {
        self.splitters.iter().find(|s| s.rect.contains(p))
    }
}

// ============================================================================
// Proportional layout
// ============================================================================

/// Lay the tree out inside `viewport`, sharing space by weight
///
/// Siblings are separated by `config.grid_gap` pixels. Tab slots are
/// estimated at `config.tab_width` each.
pub fn compute_geometry(root: &LayoutNode, viewport: Rect, config: &DockConfig) -> LayoutGeometry {
    let mut geometry = LayoutGeometry::new();
    layout_node(root, viewport, config, &mut geometry);
    geometry
}

fn layout_node(node: &LayoutNode, rect: Rect, config: &DockConfig, out: &mut LayoutGeometry) {
    match node {
        LayoutNode::Leaf(leaf) => {
            let mut tab_placeholders: Vec<TabPlaceholder> = leaf
                .tabs
                .iter()
                .enumerate()
                .map(|(i, tab)| TabPlaceholder {
                    before: Some(tab.clone()),
                    center_x: rect.left + i as f64 * config.tab_width,
                })
                .collect();
            tab_placeholders.push(TabPlaceholder {
                before: None,
                center_x: rect.left + leaf.tabs.len() as f64 * config.tab_width,
            });
            out.insert(
                leaf.id,
                NodeGeometry {
                    rect,
                    header_height: config.header_height,
                    tab_placeholders,
                },
            );
        }
        LayoutNode::Container(container) => {
            out.insert(
                container.id,
                NodeGeometry {
                    rect,
                    header_height: 0.0,
                    tab_placeholders: Vec::new(),
                },
            );

            let count = container.children.len();
            if count == 0 {
                return;
            }

            let gaps = config.grid_gap * (count - 1) as f64;
            let available = (rect.extent(container.kind) - gaps).max(0.0);
            let total = container.total_weight();

            let mut offset = 0.0;
            for (i, child) in container.children.iter().enumerate() {
                let share = if total > 0.0 {
                    child.size() / total
                } else {
                    1.0 / count as f64
                };
                let child_extent = available * share;

                let child_rect = match container.kind {
                    ContainerKind::Row => {
                        Rect::new(rect.left + offset, rect.top, child_extent, rect.height)
                    }
                    ContainerKind::Column => {
                        Rect::new(rect.left, rect.top + offset, rect.width, child_extent)
                    }
                };

                // Splitter fills the gap after every child but the last
                if i + 1 < count {
                    let gap_start = offset + child_extent;
                    let splitter_rect = match container.kind {
                        ContainerKind::Row => Rect::new(
                            rect.left + gap_start,
                            rect.top,
                            config.grid_gap,
                            rect.height,
                        ),
                        ContainerKind::Column => Rect::new(
                            rect.left,
                            rect.top + gap_start,
                            rect.width,
                            config.grid_gap,
                        ),
                    };
                    out.splitters.push(Splitter {
                        container: container.id,
                        index: i,
                        kind: container.kind,
                        rect: splitter_rect,
                    });
                }

                layout_node(child, child_rect, config, out);
                offset += child_extent + config.grid_gap;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_layout;

    fn config() -> DockConfig {
        DockConfig {
            grid_gap: 0.0,
            ..DockConfig::default()
        }
    }

    #[test]
    fn test_row_splits_width_by_weight() {
        let root = parse_layout("[{tabs: [A], size: 25}, {tabs: [B], size: 75}]").unwrap();
        let geometry = compute_geometry(&root, Rect::new(0.0, 0.0, 400.0, 300.0), &config());

        let a = geometry.rect(root.children()[0].id()).unwrap();
        let b = geometry.rect(root.children()[1].id()).unwrap();
        assert_eq!(a, Rect::new(0.0, 0.0, 100.0, 300.0));
        assert_eq!(b, Rect::new(100.0, 0.0, 300.0, 300.0));
        assert_eq!(geometry.len(), 3);
    }

    #[test]
    fn test_gap_between_siblings() {
        let root = parse_layout("[A, B]").unwrap();
        let cfg = DockConfig {
            grid_gap: 4.0,
            ..DockConfig::default()
        };
        let geometry = compute_geometry(&root, Rect::new(0.0, 0.0, 104.0, 50.0), &cfg);
        let b = geometry.rect(root.children()[1].id()).unwrap();
        assert_eq!(b.left, 54.0);
        assert_eq!(b.width, 50.0);

        assert_eq!(geometry.splitters.len(), 1);
        let splitter = geometry.splitters[0];
        assert_eq!(splitter.rect.left, 50.0);
        assert_eq!(
            geometry.splitter_at(Point::new(52.0, 10.0)).map(|s| s.index),
            Some(0)
        );
    }

    #[test]
    fn test_leaf_tab_placeholders() {
        let root = parse_layout("{tabs: [A, B]}").unwrap();
        let cfg = DockConfig {
            tab_width: 80.0,
            ..config()
        };
        let geometry = compute_geometry(&root, Rect::new(10.0, 0.0, 400.0, 300.0), &cfg);
        let leaf = geometry.get(root.id()).unwrap();
        let slots: Vec<(Option<&str>, f64)> = leaf
            .tab_placeholders
            .iter()
            .map(|p| (p.before.as_deref(), p.center_x))
            .collect();
        assert_eq!(
            slots,
            vec![(Some("A"), 10.0), (Some("B"), 90.0), (None, 170.0)]
        );
    }
}
