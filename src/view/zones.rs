//! Drop zones and nearest-zone hit testing
//!
//! While a tab is dragged, every node offers a set of zones where the panel
//! could land. The zone closest to the pointer wins, except that a tab strip
//! the pointer is over always beats everything else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::{LayoutGeometry, Point, Rect};
use crate::model::{
    ContainerKind, ContainerNode, LayoutError, LayoutNode, LeafNode, NodeId, PanelName,
};

/// Bias that ranks a tab strip under the pointer ahead of all other zones
const TAB_PRIORITY: f64 = 1e12;

/// Where a dragged panel lands relative to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneKind {
    Left,
    Right,
    Top,
    Bottom,
    /// Join the leaf as a new tab at the end
    Center,
    /// Join the leaf's tab strip at a chosen position
    Tab,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 6] = [
        ZoneKind::Left,
        ZoneKind::Right,
        ZoneKind::Top,
        ZoneKind::Bottom,
        ZoneKind::Center,
        ZoneKind::Tab,
    ];

    /// Container kind an edge zone splits along, `None` for center and tab
    pub fn axis(self) -> Option<ContainerKind> {
        match self {
            ZoneKind::Left | ZoneKind::Right => Some(ContainerKind::Row),
            ZoneKind::Top | ZoneKind::Bottom => Some(ContainerKind::Column),
            ZoneKind::Center | ZoneKind::Tab => None,
        }
    }

    /// Whether the new pane goes before the target (left or above)
    pub fn is_leading(self) -> bool {
        matches!(self, ZoneKind::Left | ZoneKind::Top)
    }

    pub fn name(self) -> &'static str {
        match self {
            ZoneKind::Left => "LEFT",
            ZoneKind::Right => "RIGHT",
            ZoneKind::Top => "TOP",
            ZoneKind::Bottom => "BOTTOM",
            ZoneKind::Center => "CENTER",
            ZoneKind::Tab => "TAB",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZoneKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LayoutError::UnknownZone(s.to_string()))
    }
}

/// A candidate drop location
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub target: NodeId,
    pub kind: ZoneKind,
    /// Preview rectangle shown while the zone is selected
    pub rect: Rect,
    /// Tab zones only: the tab to insert in front of, `None` to append
    pub before: Option<PanelName>,
    /// Edge zones on containers: share of the container the new pane should
    /// take. Outside `(0, 1)` the new pane gets the mean sibling weight.
    pub fraction: f64,
}

impl Zone {
    pub fn new(target: NodeId, kind: ZoneKind, rect: Rect) -> Self {
        Self {
            target,
            kind,
            rect,
            before: None,
            fraction: 0.0,
        }
    }

    fn with_fraction(mut self, fraction: f64) -> Self {
        self.fraction = fraction;
        self
    }
}

// ============================================================================
// Zone detection
// ============================================================================

/// Every zone offered for dropping `dragged`, in tree order
///
/// Nodes without a measured rectangle offer nothing.
pub fn compute_zones(geometry: &LayoutGeometry, root: &LayoutNode, dragged: &str) -> Vec<Zone> {
    let mut zones = Vec::new();
    collect_zones(geometry, root, dragged, &mut zones);
    zones
}

fn collect_zones(
    geometry: &LayoutGeometry,
    node: &LayoutNode,
    dragged: &str,
    out: &mut Vec<Zone>,
) {
    if let Some(measured) = geometry.get(node.id()) {
        match node {
            LayoutNode::Leaf(leaf) => {
                leaf_zones(leaf, measured.rect, measured.header_height, dragged, out)
            }
            LayoutNode::Container(container) => {
                let is_root = node.nesting() == 0;
                container_zones(container, measured.rect, is_root, dragged, out)
            }
        }
    }

    for child in node.children() {
        collect_zones(geometry, child, dragged, out);
    }
}

fn container_zones(
    container: &ContainerNode,
    rect: Rect,
    is_root: bool,
    dragged: &str,
    out: &mut Vec<Zone>,
) {
    let first = container.children.first();
    let last = container.children.last();
    let slots = (container.children.len() + 1) as f64;
    let fraction = 1.0 / slots;

    // An edge only duplicates the dragged pane when it lies along the container's axis
    let skip_first = |axis: ContainerKind| container.kind == axis && is_only_tab(first, dragged);
    let skip_last = |axis: ContainerKind| container.kind == axis && is_only_tab(last, dragged);

    if container.kind == ContainerKind::Row || is_root {
        let width = rect.width / slots;
        if !skip_first(ContainerKind::Row) {
            let left = Rect::new(rect.left, rect.top, width, rect.height);
            out.push(Zone::new(container.id, ZoneKind::Left, left).with_fraction(fraction));
        }
        if !skip_last(ContainerKind::Row) {
            let right = Rect::new(rect.right() - width, rect.top, width, rect.height);
            out.push(Zone::new(container.id, ZoneKind::Right, right).with_fraction(fraction));
        }
    }

    if container.kind == ContainerKind::Column || is_root {
        let height = rect.height / slots;
        if !skip_first(ContainerKind::Column) {
            let top = Rect::new(rect.left, rect.top, rect.width, height);
            out.push(Zone::new(container.id, ZoneKind::Top, top).with_fraction(fraction));
        }
        if !skip_last(ContainerKind::Column) {
            let bottom = Rect::new(rect.left, rect.bottom() - height, rect.width, height);
            out.push(Zone::new(container.id, ZoneKind::Bottom, bottom).with_fraction(fraction));
        }
    }
}

fn leaf_zones(
    leaf: &LeafNode,
    rect: Rect,
    header_height: f64,
    dragged: &str,
    out: &mut Vec<Zone>,
) {
    let id = leaf.id;
    if leaf.is_only(dragged) {
        out.push(Zone::new(id, ZoneKind::Center, rect));
    } else {
        let half_height = rect.height / 2.0;
        let half_width = rect.width / 2.0;
        let halves = [
            (
                ZoneKind::Top,
                Rect::new(rect.left, rect.top, rect.width, half_height),
            ),
            (
                ZoneKind::Bottom,
                Rect::new(rect.left, rect.top + half_height, rect.width, half_height),
            ),
            (
                ZoneKind::Left,
                Rect::new(rect.left, rect.top, half_width, rect.height),
            ),
            (
                ZoneKind::Right,
                Rect::new(rect.left + half_width, rect.top, half_width, rect.height),
            ),
        ];
        for (kind, half) in halves {
            out.push(Zone::new(id, kind, half).with_fraction(0.5));
        }
    }
    let strip = Rect::new(rect.left, rect.top, rect.width, header_height);
    out.push(Zone::new(id, ZoneKind::Tab, strip));
}

fn is_only_tab(node: Option<&LayoutNode>, dragged: &str) -> bool {
    node.and_then(LayoutNode::as_leaf)
        .is_some_and(|leaf| leaf.is_only(dragged))
}

// ============================================================================
// Nearest zone
// ============================================================================

/// Score a zone against the pointer; lower is closer
fn zone_distance(zone: &Zone, pointer: Point) -> f64 {
    let rect = zone.rect;
    if zone.kind == ZoneKind::Tab {
        let band = rect.height;
        let over_strip = pointer.x > rect.left
            && pointer.x < rect.right()
            && pointer.y > rect.top - band
            && pointer.y < rect.bottom() + band;
        return if over_strip {
            -TAB_PRIORITY + (rect.top - pointer.y).abs()
        } else {
            f64::INFINITY
        };
    }
    let center = rect.center();
    let dx = center.x - pointer.x;
    let dy = center.y - pointer.y;
    dx * dx + dy * dy
}

/// Pick the zone nearest the pointer
///
/// Ties go to the zone listed first. A winning tab zone is resolved to a
/// concrete insertion slot; if the leaf has no usable slot there is no
/// drop target at all.
pub fn resolve_nearest(
    zones: &[Zone],
    pointer: Point,
    geometry: &LayoutGeometry,
    dragged: &str,
) -> Option<Zone> {
    let (_, nearest) = zones
        .iter()
        .map(|zone| (zone_distance(zone, pointer), zone))
        .min_by(|a, b| a.0.total_cmp(&b.0))?;

    if nearest.kind != ZoneKind::Tab {
        return Some(nearest.clone());
    }

    let slots = &geometry.get(nearest.target)?.tab_placeholders;
    let slot = slots
        .iter()
        .filter(|slot| slot.before.as_deref() != Some(dragged))
        .min_by(|a, b| {
            (a.center_x - pointer.x)
                .abs()
                .total_cmp(&(b.center_x - pointer.x).abs())
        })?;

    Some(Zone {
        before: slot.before.clone(),
        ..nearest.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DockConfig;
    use crate::model::parse_layout;
    use crate::view::compute_geometry;

    fn setup(yaml: &str) -> (LayoutNode, LayoutGeometry) {
        let root = parse_layout(yaml).unwrap();
        let config = DockConfig {
            grid_gap: 0.0,
            header_height: 20.0,
            tab_width: 50.0,
            ..DockConfig::default()
        };
        let geometry = compute_geometry(&root, Rect::new(0.0, 0.0, 400.0, 200.0), &config);
        (root, geometry)
    }

    #[test]
    fn test_zone_kind_parse() {
        assert_eq!("left".parse::<ZoneKind>().unwrap(), ZoneKind::Left);
        assert_eq!("TAB".parse::<ZoneKind>().unwrap(), ZoneKind::Tab);
        assert!(matches!(
            "middle".parse::<ZoneKind>(),
            Err(LayoutError::UnknownZone(_))
        ));
    }

    #[test]
    fn test_leaf_offers_edges_and_tab() {
        let (root, geometry) = setup("{tabs: [A, B]}");
        let kinds: Vec<ZoneKind> = compute_zones(&geometry, &root, "A")
            .iter()
            .map(|z| z.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ZoneKind::Top,
                ZoneKind::Bottom,
                ZoneKind::Left,
                ZoneKind::Right,
                ZoneKind::Tab
            ]
        );
    }

    #[test]
    fn test_single_dragged_leaf_offers_center() {
        let (root, geometry) = setup("{tabs: [A]}");
        let kinds: Vec<ZoneKind> = compute_zones(&geometry, &root, "A")
            .iter()
            .map(|z| z.kind)
            .collect();
        assert_eq!(kinds, vec![ZoneKind::Center, ZoneKind::Tab]);
    }

    #[test]
    fn test_root_row_skips_edge_holding_dragged_panel() {
        let (root, geometry) = setup("[A, B, C]");
        let root_zones: Vec<Zone> = compute_zones(&geometry, &root, "A")
            .into_iter()
            .filter(|z| z.target == root.id())
            .collect();
        let kinds: Vec<ZoneKind> = root_zones.iter().map(|z| z.kind).collect();
        assert_eq!(kinds, vec![ZoneKind::Right, ZoneKind::Top, ZoneKind::Bottom]);
        assert_eq!(root_zones[0].rect.width, 100.0);
        assert_eq!(root_zones[0].fraction, 0.25);
    }

    #[test]
    fn test_nested_column_offers_only_vertical_edges() {
        let (root, geometry) = setup("[A, [B, C]]");
        let column = &root.children()[1];
        let kinds: Vec<ZoneKind> = compute_zones(&geometry, &root, "A")
            .into_iter()
            .filter(|z| z.target == column.id())
            .map(|z| z.kind)
            .collect();
        assert_eq!(kinds, vec![ZoneKind::Top, ZoneKind::Bottom]);
    }

    #[test]
    fn test_unmeasured_nodes_offer_nothing() {
        let root = parse_layout("[A, B]").unwrap();
        assert!(compute_zones(&LayoutGeometry::new(), &root, "A").is_empty());
    }

    #[test]
    fn test_tab_strip_beats_nearer_zone() {
        let (root, geometry) = setup("[{tabs: [A, B]}, C]");
        let zones = compute_zones(&geometry, &root, "A");
        // Over the right leaf's header strip
        let zone = resolve_nearest(&zones, Point::new(260.0, 5.0), &geometry, "A").unwrap();
        assert_eq!(zone.kind, ZoneKind::Tab);
        assert_eq!(zone.target, root.children()[1].id());
        assert_eq!(zone.before, None);
    }

    #[test]
    fn test_tab_slot_excludes_dragged_panel() {
        let (root, geometry) = setup("{tabs: [A, B, C]}");
        let zones = compute_zones(&geometry, &root, "B");
        // Closest slot is the one before B itself (x = 50), which is skipped
        let zone = resolve_nearest(&zones, Point::new(40.0, 10.0), &geometry, "B").unwrap();
        assert_eq!(zone.kind, ZoneKind::Tab);
        assert_eq!(zone.before.as_deref(), Some("A"));
    }

    #[test]
    fn test_body_picks_nearest_center() {
        let (root, geometry) = setup("[A, B]");
        let zones = compute_zones(&geometry, &root, "A");
        // Lower half of B, well below the header band
        let zone = resolve_nearest(&zones, Point::new(300.0, 160.0), &geometry, "A").unwrap();
        assert_eq!(zone.kind, ZoneKind::Bottom);
        assert_eq!(zone.target, root.children()[1].id());
    }

    #[test]
    fn test_far_pointer_never_picks_tab() {
        let (root, geometry) = setup("[A, B]");
        let zones = compute_zones(&geometry, &root, "A");
        let zone = resolve_nearest(&zones, Point::new(5e6, 100.0), &geometry, "A").unwrap();
        assert_ne!(zone.kind, ZoneKind::Tab);
    }

    #[test]
    fn test_no_zones_no_target() {
        assert!(resolve_nearest(&[], Point::new(0.0, 0.0), &LayoutGeometry::new(), "A").is_none());
    }
}
