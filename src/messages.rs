//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::model::{NodeId, PanelName};
use crate::view::{LayoutGeometry, Point, Zone};

/// Tab drag-and-drop gesture
#[derive(Debug, Clone)]
pub enum DragMsg {
    /// Pointer pressed on a panel's tab and started moving
    Begin(PanelName),
    /// Pointer moved; geometry is a fresh measurement of the rendered tree
    Move {
        pointer: Point,
        geometry: LayoutGeometry,
    },
    /// Select a zone directly, for hosts that do their own hit testing
    Hover(Zone),
    /// Pointer released: move the panel to the selected zone, if any
    Drop,
    /// Drag abandoned (escape, released outside the dock)
    Cancel,
}

/// Dragging the boundary between two siblings
#[derive(Debug, Clone)]
pub enum ResizeMsg {
    /// Grabbed the boundary after child `index` of `container`
    Begin { container: NodeId, index: usize },
    /// `ratio` scales child `index` relative to its size when the drag began;
    /// `container_extent` is the container's on-axis size in pixels
    Move { ratio: f64, container_extent: f64 },
    /// Released
    End,
}

/// Changes to which panels exist and which tab is showing
#[derive(Debug, Clone)]
pub enum LayoutMsg {
    /// The host's set of live panels changed
    SetPanels(Vec<PanelName>),
    /// A panel was closed by the user
    ClosePanel(PanelName),
    /// Show tab `index` of a leaf
    SelectTab { leaf: NodeId, index: usize },
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Drag(DragMsg),
    Resize(ResizeMsg),
    Layout(LayoutMsg),
}
