//! Command-line argument parsing for the dock driver
//!
//! Supports:
//! - Starting from a layout file or a plain list of panels
//! - Replaying a script of gestures against the layout
//! - Printing the result as an outline, YAML or JSON

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Rearrange a docking layout from the command line
#[derive(Parser, Debug)]
#[command(
    name = "simple-dock",
    version,
    about = "Rearrange a docking-panel layout"
)]
pub struct CliArgs {
    /// Layout description (YAML or JSON shorthand)
    #[arg(short, long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Panels to dock side by side, comma separated
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub panels: Vec<String>,

    /// Script of gestures to replay
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Config file to use instead of the user config
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How to print the final layout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Outline)]
    pub format: OutputFormat,
}

/// Output format for the final layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One-line outline, e.g. `row[leaf(A*)@50, leaf(B*)@50]@100`
    Outline,
    Yaml,
    Json,
}

/// Where the initial layout comes from
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutSource {
    File(PathBuf),
    Panels(Vec<String>),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub source: LayoutSource,
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let panels: Vec<String> = self
            .panels
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        let source = match (self.layout, panels.is_empty()) {
            (Some(_), false) => {
                return Err("Use either --layout or --panels, not both".to_string());
            }
            (Some(path), true) => LayoutSource::File(path),
            (None, false) => LayoutSource::Panels(panels),
            (None, true) => {
                return Err("Either --layout or --panels is required".to_string());
            }
        };

        Ok(StartupConfig {
            source,
            script: self.script,
            config: self.config,
            format: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StartupConfig, String> {
        let mut full = vec!["simple-dock"];
        full.extend_from_slice(args);
        CliArgs::parse_from(full).into_config()
    }

    #[test]
    fn test_panels_list() {
        let config = parse(&["--panels", "A, B,C"]).unwrap();
        assert_eq!(
            config.source,
            LayoutSource::Panels(vec!["A".into(), "B".into(), "C".into()])
        );
        assert_eq!(config.format, OutputFormat::Outline);
    }

    #[test]
    fn test_layout_file_with_format() {
        let config = parse(&["--layout", "dock.yaml", "--format", "json"]).unwrap();
        assert_eq!(config.source, LayoutSource::File(PathBuf::from("dock.yaml")));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_source_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--layout", "a.yaml", "--panels", "A"]).is_err());
    }
}
