//! Shared helpers for benchmarks

use simple_dock::config::DockConfig;
use simple_dock::model::{ContainerKind, ContainerNode, DockModel, LayoutNode, LeafNode};
use simple_dock::update::recompute_nesting;

/// A balanced tree of alternating rows and columns
///
/// Every container has `fanout` children and leaves sit at `depth`; each
/// leaf holds two tabs named `P<n>` and `P<n>b`.
#[allow(dead_code)]
pub fn make_tree(depth: usize, fanout: usize) -> LayoutNode {
    let mut next = 0;
    let mut root = build(0, depth, fanout, 100.0, &mut next);
    recompute_nesting(&mut root, 0);
    root
}

fn build(level: usize, depth: usize, fanout: usize, size: f64, next: &mut usize) -> LayoutNode {
    if level == depth {
        *next += 1;
        let tabs = vec![format!("P{}", next), format!("P{}b", next)];
        return LeafNode::new(tabs, size).into();
    }
    let children = (0..fanout)
        .map(|_| build(level + 1, depth, fanout, 100.0 / fanout as f64, next))
        .collect();
    ContainerNode::new(ContainerKind::for_depth(level), children, size).into()
}

/// Dock model over a generated tree with default metrics
#[allow(dead_code)]
pub fn make_model(depth: usize, fanout: usize) -> DockModel {
    DockModel::new(Some(make_tree(depth, fanout)), DockConfig::default())
}

/// Name of the first panel in the tree
#[allow(dead_code)]
pub fn first_panel(root: &LayoutNode) -> String {
    root.panel_names()
        .first()
        .map(|s| s.to_string())
        .unwrap_or_default()
}
