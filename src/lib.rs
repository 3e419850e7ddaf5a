//! Simple Dock - Elm-style docking layout engine
//!
//! This crate provides the core types and logic for a docking-panel layout:
//! a tree of resizable rows, columns and tab groups, rearranged by dragging
//! tabs onto drop zones.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod script;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DockConfig;
pub use messages::Msg;
pub use model::{DockModel, LayoutNode};
