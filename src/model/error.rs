//! Errors raised while turning user input into a layout

use std::fmt;

/// Error parsing or validating a layout description
#[derive(Debug)]
pub enum LayoutError {
    /// The text is not valid YAML/JSON of a recognizable shape
    Parse(String),
    /// A layout file could not be read
    Io(String),
    /// A node with no tabs or no children
    EmptyNode(String),
    /// A node giving both tabs and children
    AmbiguousNode(String),
    /// A `kind` other than leaf, row or column
    UnknownKind(String),
    /// `tabs` on a container or `children` on a leaf
    MisplacedField(String),
    /// A size that is zero, negative or not a number
    InvalidSize(f64),
    /// The same panel named twice
    DuplicatePanel(String),
    /// A zone kind name that is not one of the six known zones
    UnknownZone(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Parse(msg) => write!(f, "Parse error: {}", msg),
            LayoutError::Io(msg) => write!(f, "IO error: {}", msg),
            LayoutError::EmptyNode(what) => write!(f, "Empty node: {}", what),
            LayoutError::AmbiguousNode(what) => {
                write!(f, "Node has both tabs and children: {}", what)
            }
            LayoutError::UnknownKind(kind) => write!(f, "Unknown node kind: {}", kind),
            LayoutError::MisplacedField(msg) => write!(f, "Misplaced field: {}", msg),
            LayoutError::InvalidSize(size) => write!(f, "Invalid size: {}", size),
            LayoutError::DuplicatePanel(name) => write!(f, "Duplicate panel: {}", name),
            LayoutError::UnknownZone(name) => write!(f, "Unknown zone: {}", name),
        }
    }
}

impl std::error::Error for LayoutError {}
