//! Command types for the Elm-style architecture
//!
//! Commands tell the host what to do after an update. The engine never
//! renders anything itself.

use crate::view::Rect;

/// Side effects requested by an update
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// The tree changed and must be rendered again
    Redraw,
    /// Show the drop overlay over this rectangle
    ShowDropPreview(Rect),
    /// Hide the drop overlay
    HideDropPreview,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::ShowDropPreview(_) | Cmd::HideDropPreview => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Flatten nested batches into a list of primitive commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_needs_redraw() {
        let cmd = Cmd::Batch(vec![Cmd::HideDropPreview, Cmd::Redraw]);
        assert!(cmd.needs_redraw());
        assert!(!Cmd::HideDropPreview.needs_redraw());
    }

    #[test]
    fn test_flatten() {
        let cmd = Cmd::Batch(vec![
            Cmd::None,
            Cmd::Batch(vec![Cmd::HideDropPreview]),
            Cmd::Redraw,
        ]);
        assert_eq!(cmd.flatten(), vec![Cmd::HideDropPreview, Cmd::Redraw]);
    }
}
