//! Tests for layout files and scripted sessions

use std::path::PathBuf;

use simple_dock::config::DockConfig;
use simple_dock::model::{DockModel, LayoutSpec};
use simple_dock::script::Script;
use simple_dock::Cmd;

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples").join(name)
}

fn sample_model() -> DockModel {
    let spec = LayoutSpec::load(&sample("layout.yaml")).unwrap();
    DockModel::from_spec(&spec, DockConfig::default()).unwrap()
}

#[test]
fn test_sample_layout_loads() {
    let model = sample_model();
    let root = model.root.as_ref().unwrap();
    assert_eq!(
        root.to_string(),
        "row[leaf(Explorer*, Search)@20, column[leaf(Editor*)@70, \
         leaf(Terminal, Output*, Problems)@30]@60, leaf(Outline*)@20]@100"
    );
    assert_eq!(model.panels.len(), 7);
}

#[test]
fn test_sample_script_runs() {
    let mut model = sample_model();
    let script = Script::load(&sample("script.yaml")).unwrap();
    let cmds = script.run(&mut model).unwrap();
    assert!(cmds.contains(&Cmd::Redraw));

    let root = model.root.as_ref().unwrap();
    assert!(root.invariant_violations().is_empty());
    assert!(root.find_panel("Output").is_none());
    assert!(root.find_panel("Debug").is_some());

    let sidebar = root.find_panel("Explorer").unwrap();
    assert_eq!(sidebar.tabs, vec!["Explorer", "Problems", "Search"]);
    assert_eq!(sidebar.active_tab(), Some("Explorer"));
    assert!(model.gesture.is_idle());
}

#[test]
fn test_script_step_errors_name_the_step() {
    let mut model = sample_model();
    let script = Script::from_yaml(
        "steps:\n  - select: { panel: Editor }\n  - drag: { panel: Nope, to: [0, 0] }\n",
    )
    .unwrap();
    let err = script.run(&mut model).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("step 2"), "{message}");
    assert!(message.contains("Nope"), "{message}");
}

#[test]
fn test_resize_step_on_leaf_fails() {
    let mut model = sample_model();
    let script =
        Script::from_yaml("steps:\n  - resize: { path: [0], index: 0, ratio: 1.0 }\n").unwrap();
    assert!(script.run(&mut model).is_err());
}
