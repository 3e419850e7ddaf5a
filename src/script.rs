//! Scripted gestures
//!
//! A script replays pointer gestures against a dock without a window, the
//! same way a host would deliver them:
//!
//! ```yaml
//! viewport: [1200, 800]
//! steps:
//!   - drag: { panel: Terminal, to: [900, 700] }
//!   - place: { panel: Output, target: [1], zone: TAB, before: Terminal }
//!   - resize: { path: [], index: 0, ratio: 0.8 }
//!   - select: { panel: Output }
//!   - close: Explorer
//!   - panels: [Editor, Terminal, Output, Search]
//! ```

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::commands::Cmd;
use crate::messages::{DragMsg, LayoutMsg, Msg, ResizeMsg};
use crate::model::{DockModel, Gesture, LayoutNode, PanelName};
use crate::update::update;
use crate::view::{compute_zones, Point, Rect, ZoneKind};

/// A sequence of gestures
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Size the layout is measured at, defaults to the configured viewport
    #[serde(default)]
    pub viewport: Option<[f64; 2]>,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// One gesture
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Drag a panel's tab and release it at a point
    Drag { panel: PanelName, to: [f64; 2] },
    /// Drop a panel on a named zone of the node at `target` (child indices)
    Place {
        panel: PanelName,
        #[serde(default)]
        target: Vec<usize>,
        zone: String,
        #[serde(default)]
        before: Option<PanelName>,
    },
    /// Close a panel
    Close(PanelName),
    /// Replace the host's panel set
    Panels(Vec<PanelName>),
    /// Drag the boundary after child `index` of the container at `path`
    Resize {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
        ratio: f64,
    },
    /// Bring a panel's tab to the front
    Select { panel: PanelName },
}

impl Script {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Run every step, returning the commands the dock issued
    pub fn run(&self, model: &mut DockModel) -> Result<Vec<Cmd>> {
        let viewport = match self.viewport {
            Some([width, height]) => Rect::new(0.0, 0.0, width, height),
            None => model.default_viewport(),
        };

        let mut cmds = Vec::new();
        for (i, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = i, ?step, "running script step");
            let issued = run_step(model, step, viewport)
                .with_context(|| format!("Script step {} failed", i + 1))?;
            cmds.extend(issued);
        }
        Ok(cmds)
    }
}

fn run_step(model: &mut DockModel, step: &Step, viewport: Rect) -> Result<Vec<Cmd>> {
    let mut cmds = Vec::new();
    let mut send = |model: &mut DockModel, msg: Msg| {
        if let Some(cmd) = update(model, msg) {
            cmds.extend(cmd.flatten());
        }
    };

    match step {
        Step::Drag { panel, to } => {
            docked_root(model, panel)?;
            let geometry = model.geometry(viewport);
            send(model, Msg::Drag(DragMsg::Begin(panel.clone())));
            send(
                model,
                Msg::Drag(DragMsg::Move {
                    pointer: Point::new(to[0], to[1]),
                    geometry,
                }),
            );
            send(model, Msg::Drag(DragMsg::Drop));
        }

        Step::Place {
            panel,
            target,
            zone,
            before,
        } => {
            let kind: ZoneKind = zone.parse()?;
            let root = docked_root(model, panel)?;
            let node = node_at(root, target)?;
            let geometry = model.geometry(viewport);
            let mut selected = compute_zones(&geometry, root, panel)
                .into_iter()
                .find(|z| z.target == node.id() && z.kind == kind)
                .ok_or_else(|| {
                    anyhow!("No {} zone at {:?} while dragging {}", kind, target, panel)
                })?;
            if kind == ZoneKind::Tab {
                selected.before = before.clone();
            }
            send(model, Msg::Drag(DragMsg::Begin(panel.clone())));
            send(model, Msg::Drag(DragMsg::Hover(selected)));
            send(model, Msg::Drag(DragMsg::Drop));
        }

        Step::Close(panel) => {
            send(model, Msg::Layout(LayoutMsg::ClosePanel(panel.clone())));
        }

        Step::Panels(panels) => {
            send(model, Msg::Layout(LayoutMsg::SetPanels(panels.clone())));
        }

        Step::Resize { path, index, ratio } => {
            let root = model.root.as_ref().ok_or_else(|| anyhow!("Layout is empty"))?;
            let node = node_at(root, path)?;
            let Some(container) = node.as_container() else {
                bail!("Node at {:?} is a leaf, not a row or column", path);
            };
            let id = container.id;
            let extent = model
                .geometry(viewport)
                .rect(id)
                .map(|r| r.extent(container.kind))
                .unwrap_or(0.0);

            send(
                model,
                Msg::Resize(ResizeMsg::Begin {
                    container: id,
                    index: *index,
                }),
            );
            if !matches!(model.gesture, Gesture::Resizing { .. }) {
                bail!("No boundary after child {} at {:?}", index, path);
            }
            send(
                model,
                Msg::Resize(ResizeMsg::Move {
                    ratio: *ratio,
                    container_extent: extent,
                }),
            );
            send(model, Msg::Resize(ResizeMsg::End));
        }

        Step::Select { panel } => {
            let root = docked_root(model, panel)?;
            let (leaf, index) = root
                .leaves()
                .into_iter()
                .find_map(|l| l.tabs.iter().position(|t| t == panel).map(|i| (l.id, i)))
                .ok_or_else(|| anyhow!("Panel {} is not docked", panel))?;
            send(model, Msg::Layout(LayoutMsg::SelectTab { leaf, index }));
        }
    }

    Ok(cmds)
}

fn docked_root<'a>(model: &'a DockModel, panel: &str) -> Result<&'a LayoutNode> {
    model
        .root
        .as_ref()
        .filter(|root| root.find_panel(panel).is_some())
        .ok_or_else(|| anyhow!("Panel {} is not docked", panel))
}

fn node_at<'a>(root: &'a LayoutNode, path: &[usize]) -> Result<&'a LayoutNode> {
    root.node_at_path(path)
        .ok_or_else(|| anyhow!("No node at path {:?}", path))
}
