//! Canonical form of a layout tree
//!
//! Structural edits can leave a row directly inside a row (or a column inside
//! a column), or a container with a single child. Both render the same as a
//! flatter tree, so they are collapsed after every edit.

use crate::model::{ContainerNode, LayoutNode};

/// Simplify one node, assuming its children are already simplified
///
/// - A child container of the same kind is replaced by its own children,
///   each taking its proportional share of the child's weight.
/// - A container left with one child is replaced by that child, which takes
///   over the container's weight.
pub fn simplify(node: LayoutNode) -> LayoutNode {
    let LayoutNode::Container(mut container) = node else {
        return node;
    };

    if container
        .children
        .iter()
        .any(|child| child.container_kind() == Some(container.kind))
    {
        container.children = flatten_children(container.kind, container.children);
    }

    if container.children.len() == 1 {
        let mut only = container.children.remove(0);
        only.set_size(container.size);
        return only;
    }

    LayoutNode::Container(container)
}

fn flatten_children(
    kind: crate::model::ContainerKind,
    children: Vec<LayoutNode>,
) -> Vec<LayoutNode> {
    let mut expanded = Vec::with_capacity(children.len());
    for child in children {
        match child {
            LayoutNode::Container(inner) if inner.kind == kind => {
                expanded.extend(redistribute(inner));
            }
            other => expanded.push(other),
        }
    }
    expanded
}

/// Hand a container's weight to its children in proportion to theirs
fn redistribute(container: ContainerNode) -> Vec<LayoutNode> {
    let total = container.total_weight();
    let count = container.children.len() as f64;
    let weight = container.size;
    container
        .children
        .into_iter()
        .map(|mut child| {
            let share = if total > 0.0 {
                child.size() / total
            } else {
                1.0 / count
            };
            child.set_size(weight * share);
            child
        })
        .collect()
}

/// Simplify a whole subtree, bottom-up
pub fn simplify_deep(node: LayoutNode) -> LayoutNode {
    match node {
        LayoutNode::Leaf(_) => node,
        LayoutNode::Container(mut container) => {
            container.children = container.children.into_iter().map(simplify_deep).collect();
            simplify(LayoutNode::Container(container))
        }
    }
}

/// Stamp every node with its distance from `node`, which gets `depth`
pub fn recompute_nesting(node: &mut LayoutNode, depth: usize) {
    node.set_nesting(depth);
    if let LayoutNode::Container(container) = node {
        for child in &mut container.children {
            recompute_nesting(child, depth + 1);
        }
    }
}
