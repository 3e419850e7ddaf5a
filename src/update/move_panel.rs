//! Moving a panel to a drop zone
//!
//! A move is a single recursive rewrite of the tree: the panel is taken out
//! of the leaf that holds it, and the node the zone targets receives it.
//! Both happen in the same walk, so the zone is matched by node id against
//! the tree as it was before the edit.

use super::simplify::{recompute_nesting, simplify};
use crate::model::{ContainerKind, ContainerNode, LayoutNode, LeafNode, PanelName};
use crate::view::{Zone, ZoneKind};

/// Weight of each half when a node is split in two
const SPLIT_WEIGHT: f64 = 50.0;

/// Take `panel` out of the tree and insert it at `zone`
///
/// With no zone the panel is only removed. Returns `None` when the tree ends
/// up empty. If the zone's target is no longer in the tree the panel is
/// removed and not reinserted.
pub fn move_panel(zone: Option<&Zone>, panel: &str, tree: &LayoutNode) -> Option<LayoutNode> {
    let mut edited = edit_node(tree, zone, panel)?;
    recompute_nesting(&mut edited, 0);
    Some(edited)
}

fn edit_node(visited: &LayoutNode, zone: Option<&Zone>, panel: &str) -> Option<LayoutNode> {
    if let Some(zone) = zone.filter(|z| z.target == visited.id()) {
        return Some(insert_at(visited, zone, panel));
    }

    match visited {
        LayoutNode::Leaf(leaf) => without_panel(leaf, panel).map(LayoutNode::Leaf),
        LayoutNode::Container(container) => {
            let children = edit_children(container, zone, panel);
            if children.is_empty() {
                return None;
            }
            Some(simplify(rebuild(container, children).into()))
        }
    }
}

fn edit_children(container: &ContainerNode, zone: Option<&Zone>, panel: &str) -> Vec<LayoutNode> {
    container
        .children
        .iter()
        .filter_map(|child| edit_node(child, zone, panel))
        .collect()
}

/// The leaf with the panel's tab removed, `None` if that empties it
fn without_panel(leaf: &LeafNode, panel: &str) -> Option<LeafNode> {
    let mut leaf = leaf.clone();
    leaf.remove_tab(panel);
    (!leaf.tabs.is_empty()).then_some(leaf)
}

/// Same header, new children
fn rebuild(container: &ContainerNode, children: Vec<LayoutNode>) -> ContainerNode {
    ContainerNode {
        id: container.id,
        kind: container.kind,
        children,
        size: container.size,
        nesting: container.nesting,
    }
}

// ============================================================================
// Insertion
// ============================================================================

fn insert_at(target: &LayoutNode, zone: &Zone, panel: &str) -> LayoutNode {
    match target {
        LayoutNode::Leaf(leaf) => match without_panel(leaf, panel) {
            // The target held only the dragged panel: it comes back as itself
            None => LeafNode::single(panel, leaf.size).into(),
            Some(remaining) => insert_into_leaf(remaining, zone, panel),
        },
        LayoutNode::Container(container) => {
            let children = edit_children(container, Some(zone), panel);
            if children.is_empty() {
                return LeafNode::single(panel, container.size).into();
            }
            // Taking the panel out may leave a single child behind
            let inserted = match simplify(rebuild(container, children).into()) {
                LayoutNode::Leaf(leaf) => insert_into_leaf(leaf, zone, panel),
                LayoutNode::Container(rest) => insert_into_container(rest, zone, panel),
            };
            simplify(inserted)
        }
    }
}

fn insert_into_leaf(mut leaf: LeafNode, zone: &Zone, panel: &str) -> LayoutNode {
    match zone.kind {
        ZoneKind::Center => {
            leaf.insert_tab(panel.to_string(), None);
            leaf.into()
        }
        ZoneKind::Tab => {
            leaf.insert_tab(panel.to_string(), zone.before.as_deref());
            leaf.into()
        }
        ZoneKind::Left | ZoneKind::Right | ZoneKind::Top | ZoneKind::Bottom => {
            let axis = axis_of(zone.kind);
            let size = leaf.size;
            leaf.size = SPLIT_WEIGHT;
            wrap(axis, zone.kind, leaf.into(), panel, size)
        }
    }
}

fn insert_into_container(mut container: ContainerNode, zone: &Zone, panel: &str) -> LayoutNode {
    let axis = match zone.kind.axis() {
        Some(axis) => axis,
        None => {
            // Containers never offer center or tab zones; keep the panel by
            // appending it along the container's own axis.
            tracing::error!(
                zone = %zone.kind,
                target = %zone.target,
                "zone kind not valid for a container"
            );
            debug_assert!(false, "{} zone targeting a container", zone.kind);
            container.kind
        }
    };

    if container.kind == axis {
        let total = container.total_weight();
        let weight = new_pane_weight(total, container.children.len(), zone.fraction);
        let fresh = LeafNode::single(panel, weight).into();
        if zone.kind.is_leading() {
            container.children.insert(0, fresh);
        } else {
            container.children.push(fresh);
        }
        return container.into();
    }

    let size = container.size;
    container.size = SPLIT_WEIGHT;
    wrap(axis, zone.kind, container.into(), panel, size)
}

/// Put `existing` and a fresh leaf for `panel` side by side in a new container
fn wrap(
    axis: ContainerKind,
    kind: ZoneKind,
    existing: LayoutNode,
    panel: &str,
    size: f64,
) -> LayoutNode {
    let fresh: LayoutNode = LeafNode::single(panel, SPLIT_WEIGHT).into();
    let children = if kind.is_leading() {
        vec![fresh, existing]
    } else {
        vec![existing, fresh]
    };
    ContainerNode::new(axis, children, size).into()
}

fn axis_of(kind: ZoneKind) -> ContainerKind {
    kind.axis().unwrap_or(ContainerKind::Row)
}

/// Weight that makes a new sibling take `fraction` of the container
///
/// Falls back to the mean sibling weight when the fraction is unusable.
pub fn new_pane_weight(total: f64, siblings: usize, fraction: f64) -> f64 {
    if fraction > 0.0 && fraction < 1.0 && total > 0.0 {
        total * fraction / (1.0 - fraction)
    } else if siblings > 0 && total > 0.0 {
        total / siblings as f64
    } else {
        SPLIT_WEIGHT
    }
}

/// Edge zone used when docking a panel without a pointer
pub fn edge_zone(target: &LayoutNode, kind: ZoneKind) -> Zone {
    let siblings = target.children().len();
    let mut zone = Zone::new(target.id(), kind, Default::default());
    zone.fraction = 1.0 / (siblings + 1) as f64;
    zone
}

/// Panels in `names` that the tree does not hold yet
pub fn missing_panels<'a>(tree: Option<&LayoutNode>, names: &'a [PanelName]) -> Vec<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| tree.map_or(true, |t| t.find_panel(name).is_none()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_layout;
    use crate::update::simplify_deep;
    use crate::view::Rect;

    fn zone(target: &LayoutNode, kind: ZoneKind) -> Zone {
        Zone::new(target.id(), kind, Rect::default())
    }

    #[test]
    fn test_null_zone_removes() {
        let tree = parse_layout("[A, {tabs: [B, C]}]").unwrap();
        let result = move_panel(None, "B", &tree).unwrap();
        assert_eq!(result.to_string(), "row[leaf(A*)@50, leaf(C*)@50]@100");
    }

    #[test]
    fn test_removing_last_panel_empties_tree() {
        let tree = parse_layout("A").unwrap();
        assert!(move_panel(None, "A", &tree).is_none());
    }

    #[test]
    fn test_center_appends_and_activates() {
        let tree = parse_layout("[A, B]").unwrap();
        let target = &tree.children()[1];
        let result = move_panel(Some(&zone(target, ZoneKind::Center)), "A", &tree).unwrap();
        assert_eq!(result.to_string(), "leaf(B, A*)@100");
        assert_eq!(result.id(), target.id());
    }

    #[test]
    fn test_center_on_own_leaf_is_no_op() {
        let tree = parse_layout("[A, B]").unwrap();
        let target = &tree.children()[0];
        let result = move_panel(Some(&zone(target, ZoneKind::Center)), "A", &tree).unwrap();
        assert_eq!(result.to_string(), tree.to_string());
    }

    #[test]
    fn test_tab_inserts_before() {
        let tree = parse_layout("[A, {tabs: [B, C]}]").unwrap();
        let target = &tree.children()[1];
        let mut z = zone(target, ZoneKind::Tab);
        z.before = Some("C".into());
        let result = move_panel(Some(&z), "A", &tree).unwrap();
        assert_eq!(result.to_string(), "leaf(B, A*, C)@100");
    }

    #[test]
    fn test_tab_reorder_within_leaf() {
        let tree = parse_layout("{tabs: [A, B, C]}").unwrap();
        let mut z = zone(&tree, ZoneKind::Tab);
        z.before = None;
        let result = move_panel(Some(&z), "A", &tree).unwrap();
        assert_eq!(result.to_string(), "leaf(B, C, A*)@100");
        assert_eq!(result.id(), tree.id());
    }

    #[test]
    fn test_edge_on_leaf_wraps_half_and_half() {
        let tree = parse_layout("[{tabs: [A, B]}, C]").unwrap();
        let target = &tree.children()[0];
        let result = move_panel(Some(&zone(target, ZoneKind::Top)), "B", &tree).unwrap();
        assert_eq!(
            result.to_string(),
            "row[column[leaf(B*)@50, leaf(A*)@50]@50, leaf(C*)@50]@100"
        );
        result.assert_invariants();
    }

    #[test]
    fn test_same_axis_leaf_split_flattens() {
        let tree = parse_layout("[{tabs: [A, B]}, C]").unwrap();
        let target = &tree.children()[1];
        let result = move_panel(Some(&zone(target, ZoneKind::Right)), "B", &tree).unwrap();
        assert_eq!(
            result.to_string(),
            "row[leaf(A*)@50, leaf(C*)@25, leaf(B*)@25]@100"
        );
    }

    #[test]
    fn test_container_edge_uses_fraction() {
        let tree = parse_layout("[A, B]").unwrap();
        let mut z = zone(&tree, ZoneKind::Right);
        z.fraction = 1.0 / 3.0;
        let result = move_panel(Some(&z), "C", &tree).unwrap();
        assert_eq!(
            result.to_string(),
            "row[leaf(A*)@50, leaf(B*)@50, leaf(C*)@50]@100"
        );
    }

    #[test]
    fn test_container_edge_without_fraction_uses_mean() {
        let tree = parse_layout("[{tabs: [A], size: 20}, {tabs: [B], size: 60}]").unwrap();
        let z = zone(&tree, ZoneKind::Left);
        let result = move_panel(Some(&z), "C", &tree).unwrap();
        assert_eq!(
            result.to_string(),
            "row[leaf(C*)@40, leaf(A*)@20, leaf(B*)@60]@100"
        );
    }

    #[test]
    fn test_container_cross_axis_wraps() {
        let tree = parse_layout("[A, B]").unwrap();
        let result = move_panel(Some(&zone(&tree, ZoneKind::Bottom)), "C", &tree).unwrap();
        assert_eq!(
            result.to_string(),
            "column[row[leaf(A*)@50, leaf(B*)@50]@50, leaf(C*)@50]@100"
        );
        result.assert_invariants();
    }

    #[test]
    fn test_cross_axis_edge_collapses_emptied_container() {
        let tree = parse_layout("[A, B]").unwrap();
        let result = move_panel(Some(&edge_zone(&tree, ZoneKind::Bottom)), "A", &tree).unwrap();
        assert_eq!(result.to_string(), "column[leaf(B*)@50, leaf(A*)@50]@100");
        assert_eq!(result, simplify_deep(result.clone()));
        result.assert_invariants();
    }

    #[test]
    fn test_cross_axis_edge_joins_surviving_container() {
        // Removing A leaves the row holding only the column
        let tree = parse_layout("[A, [B, C]]").unwrap();
        let result = move_panel(Some(&zone(&tree, ZoneKind::Bottom)), "A", &tree).unwrap();
        assert_eq!(
            result.to_string(),
            "column[leaf(B*)@50, leaf(C*)@50, leaf(A*)@50]@100"
        );
        assert_eq!(result, simplify_deep(result.clone()));
        result.assert_invariants();
    }

    #[test]
    fn test_stale_zone_only_removes() {
        let tree = parse_layout("[A, B, C]").unwrap();
        let other = parse_layout("X").unwrap();
        let result = move_panel(Some(&zone(&other, ZoneKind::Center)), "A", &tree).unwrap();
        assert_eq!(result.to_string(), "row[leaf(B*)@33.33, leaf(C*)@33.33]@100");
    }

    #[test]
    fn test_target_emptied_by_removal() {
        // The target leaf held only the dragged panel
        let tree = parse_layout("[A, [B]]").unwrap();
        let b = &tree.children()[1];
        let result = move_panel(Some(&zone(b, ZoneKind::Left)), "B", &tree).unwrap();
        assert_eq!(result.to_string(), "row[leaf(A*)@50, leaf(B*)@50]@100");
    }

    #[test]
    fn test_new_pane_weight() {
        assert_eq!(new_pane_weight(100.0, 2, 0.5), 100.0);
        assert_eq!(new_pane_weight(100.0, 2, 0.75), 300.0);
        assert_eq!(new_pane_weight(90.0, 3, 0.0), 30.0);
        assert_eq!(new_pane_weight(90.0, 3, 1.0), 30.0);
        assert_eq!(new_pane_weight(0.0, 0, 0.5), SPLIT_WEIGHT);
    }

    #[test]
    fn test_missing_panels() {
        let tree = parse_layout("[A, B]").unwrap();
        let names: Vec<PanelName> = vec!["A".into(), "C".into()];
        assert_eq!(missing_panels(Some(&tree), &names), vec!["C"]);
        assert_eq!(missing_panels(None, &names), vec!["A", "C"]);
    }
}
