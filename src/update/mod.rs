//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. The tree editing
//! algorithms live here too, as pure functions the handlers compose.

mod drag;
mod filter;
mod layout;
mod move_panel;
mod resize;
mod simplify;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::DockModel;

#[cfg(debug_assertions)]
use crate::tracing::LayoutSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use drag::update_drag;
pub use filter::filter_panels;
pub use layout::update_layout;
pub use move_panel::{edge_zone, missing_panels, move_panel, new_pane_weight};
pub use resize::{min_extent_for, update_resize, ResizeSession};
pub use simplify::{recompute_nesting, simplify, simplify_deep};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut DockModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut DockModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Drag(m) => drag::update_drag(model, m),
        Msg::Resize(m) => resize::update_resize(model, m),
        Msg::Layout(m) => layout::update_layout(model, m),
    }
}

/// Update with tracing instrumentation (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut DockModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::DragMsg;

    // Pointer moves arrive on every mouse event
    let is_noisy = matches!(&msg, Msg::Drag(DragMsg::Move { .. }));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = LayoutSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = LayoutSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "layout", %diff, "state changed");
    }

    model.assert_invariants();

    result
}

/// Get a display name for a message type
///
/// Pointer moves omit the geometry map, which can be large.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::DragMsg;

    match msg {
        Msg::Drag(DragMsg::Move { pointer, .. }) => {
            format!("Drag::Move({}, {})", pointer.x, pointer.y)
        }
        Msg::Drag(m) => format!("Drag::{:?}", m),
        Msg::Resize(m) => format!("Resize::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
    }
}
