//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use simple_dock::config::DockConfig;
use simple_dock::messages::{DragMsg, LayoutMsg, Msg, ResizeMsg};
use simple_dock::model::{
    parse_layout, ContainerKind, ContainerNode, DockModel, LayoutNode, LeafNode, NodeId,
};
use simple_dock::update::{recompute_nesting, update};
use simple_dock::view::{LayoutGeometry, Point, Rect, Zone, ZoneKind};
use simple_dock::Cmd;

/// Config with round numbers: no gaps, 20px headers, 50px tabs, 400x200 viewport
pub fn test_config() -> DockConfig {
    DockConfig {
        header_height: 20.0,
        grid_gap: 0.0,
        tab_width: 50.0,
        viewport: [400.0, 200.0],
    }
}

/// Normalized tree from shorthand YAML
pub fn tree(yaml: &str) -> LayoutNode {
    parse_layout(yaml).unwrap_or_else(|e| panic!("bad test layout {yaml:?}: {e}"))
}

/// Dock model over a shorthand layout with the test config
pub fn test_model(yaml: &str) -> DockModel {
    DockModel::new(Some(tree(yaml)), test_config())
}

pub fn leaf(tabs: &[&str], size: f64) -> LayoutNode {
    LeafNode::new(tabs.iter().map(|t| t.to_string()).collect(), size).into()
}

pub fn row(children: Vec<LayoutNode>, size: f64) -> LayoutNode {
    ContainerNode::new(ContainerKind::Row, children, size).into()
}

pub fn column(children: Vec<LayoutNode>, size: f64) -> LayoutNode {
    ContainerNode::new(ContainerKind::Column, children, size).into()
}

/// Stamp nesting depths on a hand-built tree
pub fn stamped(mut node: LayoutNode) -> LayoutNode {
    recompute_nesting(&mut node, 0);
    node
}

/// Outline of the model's tree, or `(empty)`
pub fn outline(model: &DockModel) -> String {
    model
        .root
        .as_ref()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "(empty)".to_string())
}

/// Id of the node at a child-index path
pub fn id_at(model: &DockModel, path: &[usize]) -> NodeId {
    model
        .root
        .as_ref()
        .and_then(|r| r.node_at_path(path))
        .map(LayoutNode::id)
        .unwrap_or_else(|| panic!("no node at {path:?}"))
}

/// Geometry of the model's tree in its configured viewport
pub fn geometry(model: &DockModel) -> LayoutGeometry {
    model.geometry(model.default_viewport())
}

pub fn zone(target: NodeId, kind: ZoneKind) -> Zone {
    Zone::new(target, kind, Rect::default())
}

/// Full drag gesture: begin, one pointer move, drop
pub fn drag_to(model: &mut DockModel, panel: &str, x: f64, y: f64) -> Option<Cmd> {
    let geometry = geometry(model);
    update(model, Msg::Drag(DragMsg::Begin(panel.to_string())));
    update(
        model,
        Msg::Drag(DragMsg::Move {
            pointer: Point::new(x, y),
            geometry,
        }),
    );
    update(model, Msg::Drag(DragMsg::Drop))
}

/// Full resize gesture on the container at `path`
pub fn resize(model: &mut DockModel, path: &[usize], index: usize, ratio: f64, extent: f64) {
    let container = id_at(model, path);
    update(model, Msg::Resize(ResizeMsg::Begin { container, index }));
    update(
        model,
        Msg::Resize(ResizeMsg::Move {
            ratio,
            container_extent: extent,
        }),
    );
    update(model, Msg::Resize(ResizeMsg::End));
}

pub fn set_panels(model: &mut DockModel, panels: &[&str]) -> Option<Cmd> {
    update(
        model,
        Msg::Layout(LayoutMsg::SetPanels(
            panels.iter().map(|p| p.to_string()).collect(),
        )),
    )
}
