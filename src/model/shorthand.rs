//! Shorthand layout descriptions
//!
//! Hosts describe an initial layout in YAML or JSON without spelling out every
//! field. Any node may be written as:
//!
//! - a bare panel name: a leaf holding that one panel
//! - a list: a container whose kind alternates with depth (root is a row)
//! - a map with `kind`, `tabs`, `children`, `size` and `tab_index`, where
//!   every field but `tabs`/`children` may be left out
//!
//! ```yaml
//! - Explorer
//! - [Editor, { tabs: [Terminal, Output], size: 30 }]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::layout::{ContainerKind, ContainerNode, LayoutNode, LeafNode};
use crate::update::{recompute_nesting, simplify_deep};

/// Weight shared out between siblings that don't state their own size
const DEFAULT_TOTAL: f64 = 100.0;

/// A node of a shorthand layout description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutSpec {
    Name(String),
    List(Vec<LayoutSpec>),
    Node(NodeSpec),
}

/// Long form of a shorthand node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<LayoutSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, alias = "tabIndex", skip_serializing_if = "Option::is_none")]
    pub tab_index: Option<usize>,
}

impl LayoutSpec {
    /// Parse a description from YAML (JSON is valid YAML too)
    pub fn from_yaml(text: &str) -> Result<Self, LayoutError> {
        serde_yaml::from_str(text).map_err(|e| LayoutError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LayoutError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&text)
    }

    /// Build a canonical tree: defaults filled in, same-kind nesting
    /// flattened, nesting depths stamped.
    pub fn normalize(&self) -> Result<LayoutNode, LayoutError> {
        let mut seen = HashSet::new();
        let node = build(self, 0, DEFAULT_TOTAL, &mut seen)?;
        let mut node = simplify_deep(node);
        recompute_nesting(&mut node, 0);
        Ok(node)
    }
}

/// Parse and normalize in one step
pub fn parse_layout(text: &str) -> Result<LayoutNode, LayoutError> {
    LayoutSpec::from_yaml(text)?.normalize()
}

/// One leaf per panel, side by side in a row. `None` when there are no panels.
pub fn default_layout<S: AsRef<str>>(panels: &[S]) -> Option<LayoutNode> {
    if panels.is_empty() {
        return None;
    }
    let share = DEFAULT_TOTAL / panels.len() as f64;
    let children = panels
        .iter()
        .map(|p| LeafNode::single(p.as_ref(), share).into())
        .collect();
    let row = ContainerNode::new(ContainerKind::Row, children, DEFAULT_TOTAL);
    let mut root = simplify_deep(row.into());
    recompute_nesting(&mut root, 0);
    Some(root)
}

fn build<'a>(
    spec: &'a LayoutSpec,
    depth: usize,
    default_size: f64,
    seen: &mut HashSet<&'a str>,
) -> Result<LayoutNode, LayoutError> {
    match spec {
        LayoutSpec::Name(name) => {
            claim(name, seen)?;
            Ok(LeafNode::single(name.as_str(), default_size).into())
        }
        LayoutSpec::List(items) => {
            let children = build_children(items, depth, seen)?;
            Ok(ContainerNode::new(ContainerKind::for_depth(depth), children, default_size).into())
        }
        LayoutSpec::Node(node) => build_node(node, depth, default_size, seen),
    }
}

fn build_children<'a>(
    items: &'a [LayoutSpec],
    depth: usize,
    seen: &mut HashSet<&'a str>,
) -> Result<Vec<LayoutNode>, LayoutError> {
    if items.is_empty() {
        return Err(LayoutError::EmptyNode("container with no children".into()));
    }
    let share = DEFAULT_TOTAL / items.len() as f64;
    items
        .iter()
        .map(|item| build(item, depth + 1, share, seen))
        .collect()
}

fn build_node<'a>(
    node: &'a NodeSpec,
    depth: usize,
    default_size: f64,
    seen: &mut HashSet<&'a str>,
) -> Result<LayoutNode, LayoutError> {
    let size = match node.size {
        Some(size) if size.is_finite() && size > 0.0 => size,
        Some(size) => return Err(LayoutError::InvalidSize(size)),
        None => default_size,
    };

    let kind = match node.kind.as_deref() {
        None => None,
        Some("leaf") => Some(None),
        Some("row") => Some(Some(ContainerKind::Row)),
        Some("column") => Some(Some(ContainerKind::Column)),
        Some(other) => return Err(LayoutError::UnknownKind(other.to_string())),
    };

    // `Some(None)` is an explicit leaf, `Some(Some(k))` an explicit container
    let kind = match (kind, &node.tabs, &node.children) {
        (None, Some(_), Some(_)) => {
            return Err(LayoutError::AmbiguousNode(describe(node)));
        }
        (None, Some(_), None) => None,
        (None, None, Some(_)) => Some(ContainerKind::for_depth(depth)),
        (None, None, None) => {
            return Err(LayoutError::EmptyNode(describe(node)));
        }
        (Some(None), _, Some(_)) => {
            return Err(LayoutError::MisplacedField("children on a leaf".into()));
        }
        (Some(Some(k)), Some(_), _) => {
            return Err(LayoutError::MisplacedField(format!("tabs on a {}", k.name())));
        }
        (Some(explicit), _, _) => explicit,
    };

    match kind {
        None => {
            let tabs = node.tabs.as_deref().unwrap_or_default();
            if tabs.is_empty() {
                return Err(LayoutError::EmptyNode("leaf with no tabs".into()));
            }
            for tab in tabs {
                claim(tab, seen)?;
            }
            let mut leaf = LeafNode::new(tabs.to_vec(), size);
            leaf.tab_index = node.tab_index.unwrap_or(0);
            leaf.clamp_tab_index();
            Ok(leaf.into())
        }
        Some(kind) => {
            let items = node.children.as_deref().unwrap_or_default();
            let children = build_children(items, depth, seen)?;
            Ok(ContainerNode::new(kind, children, size).into())
        }
    }
}

fn claim<'a>(name: &'a str, seen: &mut HashSet<&'a str>) -> Result<(), LayoutError> {
    if seen.insert(name) {
        Ok(())
    } else {
        Err(LayoutError::DuplicatePanel(name.to_string()))
    }
}

fn describe(node: &NodeSpec) -> String {
    serde_json::to_string(node).unwrap_or_else(|_| format!("{:?}", node))
}
