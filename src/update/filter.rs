//! Pruning panels the host no longer provides

use std::borrow::Cow;
use std::collections::HashSet;

use super::simplify::{recompute_nesting, simplify};
use crate::model::{ContainerNode, LayoutNode};

/// Drop every tab whose panel is not in `live`
///
/// Returns `None` when nothing is left, `Cow::Borrowed` when the tree was
/// already clean (so callers can skip a redraw), `Cow::Owned` otherwise.
pub fn filter_panels<'a, S: AsRef<str>>(
    live: &[S],
    tree: &'a LayoutNode,
) -> Option<Cow<'a, LayoutNode>> {
    let live: HashSet<&str> = live.iter().map(AsRef::as_ref).collect();
    match filter_node(&live, tree)? {
        Cow::Borrowed(node) => Some(Cow::Borrowed(node)),
        Cow::Owned(mut node) => {
            recompute_nesting(&mut node, 0);
            Some(Cow::Owned(node))
        }
    }
}

fn filter_node<'a>(live: &HashSet<&str>, node: &'a LayoutNode) -> Option<Cow<'a, LayoutNode>> {
    match node {
        LayoutNode::Leaf(leaf) => {
            if leaf.tabs.iter().all(|tab| live.contains(tab.as_str())) {
                return Some(Cow::Borrowed(node));
            }
            let mut leaf = leaf.clone();
            leaf.tabs.retain(|tab| live.contains(tab.as_str()));
            if leaf.tabs.is_empty() {
                return None;
            }
            leaf.clamp_tab_index();
            Some(Cow::Owned(LayoutNode::Leaf(leaf)))
        }
        LayoutNode::Container(container) => {
            let filtered: Vec<Option<Cow<'a, LayoutNode>>> = container
                .children
                .iter()
                .map(|child| filter_node(live, child))
                .collect();

            let unchanged = filtered
                .iter()
                .all(|child| matches!(child, Some(Cow::Borrowed(_))));
            if unchanged {
                return Some(Cow::Borrowed(node));
            }

            let children: Vec<LayoutNode> = filtered
                .into_iter()
                .flatten()
                .map(Cow::into_owned)
                .collect();
            if children.is_empty() {
                return None;
            }

            let rebuilt = ContainerNode {
                id: container.id,
                kind: container.kind,
                children,
                size: container.size,
                nesting: container.nesting,
            };
            Some(Cow::Owned(simplify(rebuilt.into())))
        }
    }
}
