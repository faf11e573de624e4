//! UI state - busy flags, mount status and notifications

use std::path::PathBuf;

use super::toast::ToastQueue;

/// UI state that is not part of the exported picture
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// An export is in flight; the export control is disabled
    pub is_exporting: bool,
    /// An uploaded file is being read
    pub is_loading: bool,
    /// The export target region is on screen
    pub canvas_mounted: bool,
    /// The embedded code widget has reported mount
    pub widget_mounted: bool,
    /// Notifications, in display order
    pub toasts: ToastQueue,
    /// Where the most recent export was written
    pub last_export: Option<PathBuf>,
}

impl UiState {
    /// Create a new UI state with nothing mounted
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the UI is busy (exporting or loading)
    pub fn is_busy(&self) -> bool {
        self.is_exporting || self.is_loading
    }

    /// Label of the export control
    pub fn export_label(&self) -> &'static str {
        if self.is_exporting {
            "Rendering..."
        } else {
            "Export"
        }
    }
}
