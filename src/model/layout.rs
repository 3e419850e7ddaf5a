//! Layout tree types
//!
//! A dock layout is a tree: leaves hold one or more tabbed panels, containers
//! arrange their children in a row (side by side) or a column (stacked).
//! Sibling sizes are relative weights, not pixels.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Name of a hosted panel. Unique across the whole tree.
pub type PanelName = String;

// ============================================================================
// Identifiers
// ============================================================================

/// Stable identity of a layout node
///
/// Ids are minted from a process-wide counter, so an id that refers to a node
/// which has since been replaced can never match a freshly created node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Arrangement axis of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Children side by side, left to right
    Row,
    /// Children stacked, top to bottom
    Column,
}

impl ContainerKind {
    /// Kind a container gets when none is given: root is a row, then alternating
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            ContainerKind::Row
        } else {
            ContainerKind::Column
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Row => "row",
            ContainerKind::Column => "column",
        }
    }
}

/// A tab group showing one of its panels at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub tabs: Vec<PanelName>,
    #[serde(default, alias = "tabIndex")]
    pub tab_index: usize,
    pub size: f64,
    #[serde(skip)]
    pub nesting: usize,
}

impl LeafNode {
    pub fn new(tabs: Vec<PanelName>, size: f64) -> Self {
        Self {
            id: NodeId::fresh(),
            tabs,
            tab_index: 0,
            size,
            nesting: 0,
        }
    }

    /// A fresh leaf holding a single panel
    pub fn single(panel: impl Into<PanelName>, size: f64) -> Self {
        Self::new(vec![panel.into()], size)
    }

    pub fn contains(&self, panel: &str) -> bool {
        self.tabs.iter().any(|t| t == panel)
    }

    pub fn is_only(&self, panel: &str) -> bool {
        self.tabs.len() == 1 && self.tabs[0] == panel
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.tabs.get(self.tab_index).map(String::as_str)
    }

    /// Remove a panel's tab. Returns true if it was present.
    pub fn remove_tab(&mut self, panel: &str) -> bool {
        let before = self.tabs.len();
        self.tabs.retain(|t| t != panel);
        let removed = self.tabs.len() != before;
        if removed {
            self.clamp_tab_index();
        }
        removed
    }

    /// Insert a tab before `before` (or at the end when absent or unknown) and
    /// make it active. Returns the insertion index.
    pub fn insert_tab(&mut self, panel: PanelName, before: Option<&str>) -> usize {
        let index = before
            .and_then(|b| self.tabs.iter().position(|t| t == b))
            .unwrap_or(self.tabs.len());
        self.tabs.insert(index, panel);
        self.tab_index = index;
        index
    }

    pub fn clamp_tab_index(&mut self) {
        self.tab_index = self.tab_index.min(self.tabs.len().saturating_sub(1));
    }
}

/// A row or column of child nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerNode {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub kind: ContainerKind,
    pub children: Vec<LayoutNode>,
    pub size: f64,
    #[serde(skip)]
    pub nesting: usize,
}

impl ContainerNode {
    pub fn new(kind: ContainerKind, children: Vec<LayoutNode>, size: f64) -> Self {
        Self {
            id: NodeId::fresh(),
            kind,
            children,
            size,
            nesting: 0,
        }
    }

    /// Sum of the children's weights
    pub fn total_weight(&self) -> f64 {
        self.children.iter().map(LayoutNode::size).sum()
    }
}

/// A node in the layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutNode {
    Leaf(LeafNode),
    Container(ContainerNode),
}

impl From<LeafNode> for LayoutNode {
    fn from(leaf: LeafNode) -> Self {
        LayoutNode::Leaf(leaf)
    }
}

impl From<ContainerNode> for LayoutNode {
    fn from(container: ContainerNode) -> Self {
        LayoutNode::Container(container)
    }
}

impl LayoutNode {
    pub fn id(&self) -> NodeId {
        match self {
            LayoutNode::Leaf(leaf) => leaf.id,
            LayoutNode::Container(container) => container.id,
        }
    }

    pub fn size(&self) -> f64 {
        match self {
            LayoutNode::Leaf(leaf) => leaf.size,
            LayoutNode::Container(container) => container.size,
        }
    }

    pub fn set_size(&mut self, size: f64) {
        match self {
            LayoutNode::Leaf(leaf) => leaf.size = size,
            LayoutNode::Container(container) => container.size = size,
        }
    }

    pub fn nesting(&self) -> usize {
        match self {
            LayoutNode::Leaf(leaf) => leaf.nesting,
            LayoutNode::Container(container) => container.nesting,
        }
    }

    pub fn set_nesting(&mut self, nesting: usize) {
        match self {
            LayoutNode::Leaf(leaf) => leaf.nesting = nesting,
            LayoutNode::Container(container) => container.nesting = nesting,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, LayoutNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            LayoutNode::Leaf(leaf) => Some(leaf),
            LayoutNode::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            LayoutNode::Container(container) => Some(container),
            LayoutNode::Leaf(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut ContainerNode> {
        match self {
            LayoutNode::Container(container) => Some(container),
            LayoutNode::Leaf(_) => None,
        }
    }

    /// Kind of a container node, `None` for leaves
    pub fn container_kind(&self) -> Option<ContainerKind> {
        self.as_container().map(|c| c.kind)
    }

    pub fn children(&self) -> &[LayoutNode] {
        match self {
            LayoutNode::Container(container) => &container.children,
            LayoutNode::Leaf(_) => &[],
        }
    }

    /// Find a node anywhere in this subtree
    pub fn find(&self, id: NodeId) -> Option<&LayoutNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut LayoutNode> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            LayoutNode::Container(container) => container
                .children
                .iter_mut()
                .find_map(|child| child.find_mut(id)),
            LayoutNode::Leaf(_) => None,
        }
    }

    /// The leaf that hosts a panel
    pub fn find_panel(&self, panel: &str) -> Option<&LeafNode> {
        match self {
            LayoutNode::Leaf(leaf) => leaf.contains(panel).then_some(leaf),
            LayoutNode::Container(container) => container
                .children
                .iter()
                .find_map(|child| child.find_panel(panel)),
        }
    }

    /// All leaves in depth-first, left-to-right order
    pub fn leaves(&self) -> Vec<&LeafNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafNode>) {
        match self {
            LayoutNode::Leaf(leaf) => out.push(leaf),
            LayoutNode::Container(container) => {
                for child in &container.children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Every panel name in the tree, in tab order
    pub fn panel_names(&self) -> Vec<&str> {
        self.leaves()
            .into_iter()
            .flat_map(|leaf| leaf.tabs.iter().map(String::as_str))
            .collect()
    }

    /// Follow child indices from this node
    pub fn node_at_path(&self, path: &[usize]) -> Option<&LayoutNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    /// Number of nodes in the subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(LayoutNode::node_count)
            .sum::<usize>()
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Describe every structural rule this tree breaks. Empty means valid.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();
        self.check_node(None, &mut seen, &mut problems);
        problems
    }

    fn check_node<'a>(
        &'a self,
        parent: Option<ContainerKind>,
        seen: &mut HashSet<&'a str>,
        problems: &mut Vec<String>,
    ) {
        let id = self.id();
        let size = self.size();
        if !(size.is_finite() && size > 0.0) {
            problems.push(format!("{id}: size {size} is not a positive number"));
        }

        match self {
            LayoutNode::Leaf(leaf) => {
                if leaf.tabs.is_empty() {
                    problems.push(format!("{id}: leaf has no tabs"));
                } else if leaf.tab_index >= leaf.tabs.len() {
                    problems.push(format!(
                        "{id}: tab index {} out of range for {} tabs",
                        leaf.tab_index,
                        leaf.tabs.len()
                    ));
                }
                for tab in &leaf.tabs {
                    if !seen.insert(tab.as_str()) {
                        problems.push(format!("{id}: panel {tab:?} appears more than once"));
                    }
                }
            }
            LayoutNode::Container(container) => {
                if container.children.is_empty() {
                    problems.push(format!("{id}: {} has no children", container.kind.name()));
                }
                if parent == Some(container.kind) {
                    problems.push(format!(
                        "{id}: {} nested directly in a {}",
                        container.kind.name(),
                        container.kind.name()
                    ));
                }
                for child in &container.children {
                    if child.nesting() != container.nesting + 1 {
                        problems.push(format!(
                            "{}: nesting {} under parent nesting {}",
                            child.id(),
                            child.nesting(),
                            container.nesting
                        ));
                    }
                    child.check_node(Some(container.kind), seen, problems);
                }
            }
        }
    }

    /// Panic if the tree breaks a structural rule
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let problems = self.invariant_violations();
        assert!(
            problems.is_empty(),
            "Layout invariants violated in {}:\n  {}",
            self,
            problems.join("\n  ")
        );
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

// ============================================================================
// Outline
// ============================================================================

/// Weights rounded to two decimals, whole numbers without a fraction
fn weight(size: f64) -> f64 {
    (size * 100.0).round() / 100.0
}

/// Compact one-line outline, e.g. `row[leaf(A*)@50, leaf(B*, C)@50]@100`.
/// The active tab carries a `*`.
impl fmt::Display for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutNode::Leaf(leaf) => {
                write!(f, "leaf(")?;
                for (i, tab) in leaf.tabs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{tab}")?;
                    if i == leaf.tab_index {
                        write!(f, "*")?;
                    }
                }
                write!(f, ")@{}", weight(leaf.size))
            }
            LayoutNode::Container(container) => {
                write!(f, "{}[", container.kind.name())?;
                for (i, child) in container.children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, "]@{}", weight(container.size))
            }
        }
    }
}
