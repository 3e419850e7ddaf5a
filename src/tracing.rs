//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging tree
//! edits and gesture state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=layout=debug,message=debug` - scoped filtering
//! - `RUST_LOG=simple_dock::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/simple-dock/logs/simple-dock.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::DockModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG env var for filtering and goes to
/// stderr, leaving stdout for the layout output.
///
/// File logging writes to `~/.config/simple-dock/logs/simple-dock.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "simple-dock.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of dock state for diffing
#[derive(Debug, Clone)]
pub struct LayoutSnapshot {
    pub outline: Option<String>,
    pub gesture: &'static str,
    pub panel_count: usize,
}

impl LayoutSnapshot {
    pub fn from_model(model: &DockModel) -> Self {
        Self {
            outline: model.root.as_ref().map(|root| root.to_string()),
            gesture: model.gesture.name(),
            panel_count: model.panels.len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.gesture != other.gesture {
            changes.push(format!("gesture: {} → {}", self.gesture, other.gesture));
        }
        if self.panel_count != other.panel_count {
            changes.push(format!(
                "panels: {} → {}",
                self.panel_count, other.panel_count
            ));
        }
        if self.outline != other.outline {
            let show = |o: &Option<String>| o.clone().unwrap_or_else(|| "(empty)".to_string());
            changes.push(format!(
                "tree: {} → {}",
                show(&self.outline),
                show(&other.outline)
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DockConfig;

    #[test]
    fn test_snapshot_diff() {
        let mut model = DockModel::with_panels(&["A", "B"], DockConfig::default());
        let before = LayoutSnapshot::from_model(&model);
        assert!(before.diff(&before).is_none());

        model.root = None;
        let after = LayoutSnapshot::from_model(&model);
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("(empty)"));
        assert!(!diff.contains("gesture"));
    }
}
