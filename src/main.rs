//! simple-dock - command-line driver for the docking layout engine

use anyhow::{Context, Result};
use clap::Parser;

use simple_dock::cli::{CliArgs, LayoutSource, OutputFormat, StartupConfig};
use simple_dock::config::DockConfig;
use simple_dock::model::{DockModel, LayoutSpec};
use simple_dock::script::Script;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let startup = args.into_config().map_err(anyhow::Error::msg)?;

    simple_dock::tracing::init();

    let model = run(&startup)?;
    print_layout(&model, startup.format)
}

/// Build the dock and replay the script, if any
fn run(startup: &StartupConfig) -> Result<DockModel> {
    let config = match &startup.config {
        Some(path) => DockConfig::load_from(path),
        None => DockConfig::load(),
    };

    let mut model = match &startup.source {
        LayoutSource::File(path) => {
            let spec = LayoutSpec::load(path)?;
            DockModel::from_spec(&spec, config)
                .with_context(|| format!("Invalid layout in {}", path.display()))?
        }
        LayoutSource::Panels(panels) => DockModel::with_panels(panels, config),
    };
    tracing::info!(panels = model.panels.len(), "dock ready");

    if let Some(path) = &startup.script {
        let script = Script::load(path)?;
        let cmds = script.run(&mut model)?;
        tracing::info!(steps = script.steps.len(), commands = cmds.len(), "script finished");
    }

    Ok(model)
}

fn print_layout(model: &DockModel, format: OutputFormat) -> Result<()> {
    let Some(root) = &model.root else {
        println!("(empty)");
        return Ok(());
    };
    match format {
        OutputFormat::Outline => println!("{}", root),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(root)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(root)?),
    }
    Ok(())
}
