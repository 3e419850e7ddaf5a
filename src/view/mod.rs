//! View module - geometry and hit testing
//!
//! Turns a layout tree plus measured rectangles into drop zones and picks the
//! one under the pointer. Actual drawing belongs to the host.

pub mod geometry;
pub mod zones;

pub use geometry::{
    compute_geometry, LayoutGeometry, NodeGeometry, Point, Rect, Splitter, TabPlaceholder,
};
pub use zones::{compute_zones, resolve_nearest, Zone, ZoneKind};
