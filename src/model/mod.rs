//! Model module - core data structures for the dock
//!
//! The model holds the layout tree, the host's panel set and the state of
//! the pointer gesture in progress.

pub mod error;
pub mod layout;
pub mod shorthand;

pub use error::LayoutError;
pub use layout::{ContainerKind, ContainerNode, LayoutNode, LeafNode, NodeId, PanelName};
pub use shorthand::{default_layout, parse_layout, LayoutSpec, NodeSpec};

use crate::config::DockConfig;
use crate::update::ResizeSession;
use crate::view::{compute_geometry, LayoutGeometry, Rect, Zone};

/// Pointer gesture in progress
///
/// At most one gesture is active; messages that don't fit the current
/// gesture are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// A tab is being dragged; `zone` is the drop target under the pointer
    Dragging { panel: PanelName, zone: Option<Zone> },
    /// A sibling boundary is being dragged
    Resizing {
        container: NodeId,
        session: ResizeSession,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Dragging { .. } => "dragging",
            Gesture::Resizing { .. } => "resizing",
        }
    }
}

/// The complete dock state
#[derive(Debug, Clone)]
pub struct DockModel {
    /// Layout tree, `None` when no panel is docked
    pub root: Option<LayoutNode>,
    /// Panels the host provides, in the order it listed them
    pub panels: Vec<PanelName>,
    pub gesture: Gesture,
    pub config: DockConfig,
}

impl DockModel {
    /// Dock an existing tree; the panel set is whatever the tree holds
    pub fn new(root: Option<LayoutNode>, config: DockConfig) -> Self {
        let panels = root
            .as_ref()
            .map(|r| r.panel_names().into_iter().map(String::from).collect())
            .unwrap_or_default();
        Self {
            root,
            panels,
            gesture: Gesture::Idle,
            config,
        }
    }

    /// One leaf per panel, side by side
    pub fn with_panels<S: AsRef<str>>(panels: &[S], config: DockConfig) -> Self {
        let mut model = Self::new(default_layout(panels), config);
        model.panels = panels.iter().map(|p| p.as_ref().to_string()).collect();
        model
    }

    pub fn from_spec(spec: &LayoutSpec, config: DockConfig) -> Result<Self, LayoutError> {
        Ok(Self::new(Some(spec.normalize()?), config))
    }

    /// Panel currently showing in each leaf, left to right
    pub fn visible_panels(&self) -> Vec<&str> {
        self.root
            .as_ref()
            .map(|root| root.leaves().into_iter().filter_map(|l| l.active_tab()).collect())
            .unwrap_or_default()
    }

    /// Proportional geometry for a viewport of the given size
    pub fn geometry(&self, viewport: Rect) -> LayoutGeometry {
        match &self.root {
            Some(root) => compute_geometry(root, viewport, &self.config),
            None => LayoutGeometry::new(),
        }
    }

    /// The configured default viewport
    pub fn default_viewport(&self) -> Rect {
        let [width, height] = self.config.viewport;
        Rect::new(0.0, 0.0, width, height)
    }

    /// Check the tree's structural rules (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        if let Some(root) = &self.root {
            root.assert_invariants();
            debug_assert_eq!(root.nesting(), 0, "Root must have nesting 0");
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}
