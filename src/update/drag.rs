//! Tab drag-and-drop gesture

use super::move_panel::move_panel;
use crate::commands::Cmd;
use crate::messages::DragMsg;
use crate::model::{DockModel, Gesture};
use crate::view::{compute_zones, resolve_nearest};

/// Handle drag messages
pub fn update_drag(model: &mut DockModel, msg: DragMsg) -> Option<Cmd> {
    match msg {
        DragMsg::Begin(panel) => {
            if !model.gesture.is_idle() {
                tracing::debug!(gesture = model.gesture.name(), %panel, "drag begin ignored");
                return None;
            }
            let docked = model
                .root
                .as_ref()
                .is_some_and(|root| root.find_panel(&panel).is_some());
            if !docked {
                tracing::debug!(%panel, "drag begin for a panel that is not docked");
                return None;
            }
            tracing::debug!(%panel, "drag started");
            model.gesture = Gesture::Dragging { panel, zone: None };
            None
        }

        DragMsg::Move { pointer, geometry } => {
            let DockModel { root, gesture, .. } = model;
            let (Gesture::Dragging { panel, zone }, Some(root)) = (gesture, root.as_ref()) else {
                return None;
            };

            let zones = compute_zones(&geometry, root, panel);
            *zone = resolve_nearest(&zones, pointer, &geometry, panel);
            Some(match zone {
                Some(zone) => Cmd::ShowDropPreview(zone.rect),
                None => Cmd::HideDropPreview,
            })
        }

        DragMsg::Hover(selected) => {
            let Gesture::Dragging { zone, .. } = &mut model.gesture else {
                return None;
            };
            let rect = selected.rect;
            *zone = Some(selected);
            Some(Cmd::ShowDropPreview(rect))
        }

        DragMsg::Drop => {
            if !matches!(model.gesture, Gesture::Dragging { .. }) {
                tracing::debug!(gesture = model.gesture.name(), "drop outside a drag ignored");
                return None;
            }
            let Gesture::Dragging { panel, zone } = std::mem::take(&mut model.gesture) else {
                return None;
            };
            let (Some(zone), Some(root)) = (zone, model.root.as_ref()) else {
                tracing::debug!(%panel, "dropped outside any zone");
                return Some(Cmd::HideDropPreview);
            };

            // A zone measured before the tree last changed may point at a node
            // that no longer exists; treat that like a drop outside the dock.
            if root.find(zone.target).is_none() {
                tracing::debug!(%panel, target = %zone.target, "drop zone is stale");
                return Some(Cmd::HideDropPreview);
            }

            tracing::debug!(%panel, zone = %zone.kind, target = %zone.target, "dropping panel");
            model.root = move_panel(Some(&zone), &panel, root);
            Some(Cmd::Batch(vec![Cmd::HideDropPreview, Cmd::Redraw]))
        }

        DragMsg::Cancel => {
            if !matches!(model.gesture, Gesture::Dragging { .. }) {
                return None;
            }
            model.gesture = Gesture::Idle;
            Some(Cmd::HideDropPreview)
        }
    }
}
