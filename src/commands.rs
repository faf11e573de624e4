//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;
use std::time::Duration;

use crate::messages::Msg;
use crate::raster::{ExportScene, RasterOptions};
use crate::scheduler::TimerKey;
use crate::theme::EditorThemeDefinition;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the UI
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Register and activate a theme in the code widget (errors are ignored)
    ApplyTheme(EditorThemeDefinition),
    /// Deliver `msg` after `delay`; replaces any pending timer with the same key
    Schedule {
        key: TimerKey,
        delay: Duration,
        msg: Box<Msg>,
    },
    /// Drop a pending timer (no-op if it already fired)
    CancelTimer(TimerKey),
    /// Rasterize the export target in the background.
    /// Sends Msg::Export(Rendered) when done
    Rasterize {
        scene: ExportScene,
        options: RasterOptions,
    },
    /// Write exported PNG bytes. Sends Msg::Export(Saved) when done
    SaveImage { path: PathBuf, bytes: Vec<u8> },
    /// Read an uploaded file. Sends Msg::App(FileLoaded) when done
    ReadFile { path: PathBuf },
    /// Put text on the system clipboard. Sends Msg::App(ClipboardResult)
    CopyToClipboard { text: String },
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            Cmd::ApplyTheme(_) => true,
            Cmd::Schedule { .. } | Cmd::CancelTimer(_) => false,
            Cmd::Rasterize { .. } => false,
            Cmd::SaveImage { .. } | Cmd::ReadFile { .. } => false,
            Cmd::CopyToClipboard { .. } => false,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(Cmd::Redraw.needs_redraw());
        assert!(Cmd::batch(vec![Cmd::CancelTimer(TimerKey::ExportFrame), Cmd::Redraw]).needs_redraw());
        assert!(!Cmd::CancelTimer(TimerKey::ExportFrame).needs_redraw());
    }

    #[test]
    fn test_flatten_nested_batches() {
        let cmd = Cmd::batch(vec![
            Cmd::None,
            Cmd::batch(vec![Cmd::Redraw, Cmd::CancelTimer(TimerKey::ToastExpiry(3))]),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![Cmd::Redraw, Cmd::CancelTimer(TimerKey::ToastExpiry(3))]
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Cmd::from(None), Cmd::None);
        assert_eq!(Cmd::from(Some(Cmd::Redraw)), Cmd::Redraw);
    }
}
