//! Panel set changes and tab selection

use std::borrow::Cow;

use super::filter::filter_panels;
use super::move_panel::{edge_zone, missing_panels, move_panel};
use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::{DockModel, Gesture, LayoutNode, LeafNode, PanelName};
use crate::view::ZoneKind;

/// Handle panel set and tab selection messages
pub fn update_layout(model: &mut DockModel, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::SetPanels(panels) => set_panels(model, panels),

        LayoutMsg::ClosePanel(panel) => {
            model.panels.retain(|p| *p != panel);
            let Some(root) = model.root.as_ref() else {
                return None;
            };
            if root.find_panel(&panel).is_none() {
                tracing::debug!(%panel, "close for a panel that is not docked");
                return None;
            }
            cancel_drag_of(model, &panel);
            model.root = model
                .root
                .as_ref()
                .and_then(|root| move_panel(None, &panel, root));
            tracing::debug!(%panel, "panel closed");
            Some(Cmd::Redraw)
        }

        LayoutMsg::SelectTab { leaf, index } => {
            let Some(LayoutNode::Leaf(node)) = model.root.as_mut().and_then(|r| r.find_mut(leaf))
            else {
                tracing::debug!(%leaf, "select tab on a node that is not a leaf");
                return None;
            };
            if index >= node.tabs.len() || index == node.tab_index {
                return None;
            }
            node.tab_index = index;
            Some(Cmd::Redraw)
        }
    }
}

/// Prune panels the host dropped, dock the ones it added
fn set_panels(model: &mut DockModel, panels: Vec<PanelName>) -> Option<Cmd> {
    let mut changed = false;

    if let Some(root) = model.root.as_ref() {
        match filter_panels(&panels, root) {
            Some(Cow::Borrowed(_)) => {}
            Some(Cow::Owned(filtered)) => {
                model.root = Some(filtered);
                changed = true;
            }
            None => {
                model.root = None;
                changed = true;
            }
        }
    }

    let missing: Vec<PanelName> = missing_panels(model.root.as_ref(), &panels)
        .into_iter()
        .map(String::from)
        .collect();
    for panel in missing {
        tracing::debug!(%panel, "docking new panel");
        model.root = Some(match model.root.take() {
            None => LeafNode::single(panel, 100.0).into(),
            Some(root) => {
                let zone = edge_zone(&root, ZoneKind::Right);
                // Only removal can empty a tree; the panel is not in it
                move_panel(Some(&zone), &panel, &root).unwrap_or(root)
            }
        });
        changed = true;
    }

    if let Gesture::Dragging { panel, .. } = &model.gesture {
        if !panels.contains(panel) {
            tracing::debug!(%panel, "dragged panel went away");
            model.gesture = Gesture::Idle;
        }
    }

    model.panels = panels;
    changed.then_some(Cmd::Redraw)
}

fn cancel_drag_of(model: &mut DockModel, panel: &str) {
    if matches!(&model.gesture, Gesture::Dragging { panel: p, .. } if p == panel) {
        model.gesture = Gesture::Idle;
    }
}
