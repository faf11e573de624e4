//! Application model - the complete state of the canvas
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod state;
pub mod toast;
pub mod ui;

pub use state::{EditorState, DEFAULT_FONT_SIZE, DEFAULT_PADDING, INITIAL_CODE};
pub use toast::{ToastItem, ToastKind, ToastQueue, TOAST_DURATION};
pub use ui::UiState;

use crate::config::AppConfig;
use crate::filename::sync_filename;
use crate::language::Language;
use crate::theme::{derive_editor_theme, EditorThemeDefinition, ThemeId, ThemeTable};
use crate::util::is_blank;

/// What changed when a new snapshot was installed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// `(previous, new)` language, when it differs
    pub language: Option<(Language, Language)>,
    /// `(previous, new)` theme, when it differs
    pub theme: Option<(ThemeId, ThemeId)>,
    /// The filename was rewritten to follow the language
    pub filename_synced: bool,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.language.is_none() && self.theme.is_none()
    }
}

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    state: EditorState,
    /// UI state (busy flags, mount status, toasts)
    pub ui: UiState,
    /// Theme descriptors (built-ins plus user overrides)
    pub themes: ThemeTable,
    /// Startup preferences
    pub config: AppConfig,
}

impl AppModel {
    /// Create a model whose initial state comes from `config`
    pub fn new(config: AppConfig, themes: ThemeTable) -> Self {
        Self {
            state: EditorState::from_config(&config),
            ui: UiState::new(),
            themes,
            config,
        }
    }

    /// Model with an explicit initial state (tests, scripted sessions)
    pub fn with_state(state: EditorState) -> Self {
        Self {
            state,
            ui: UiState::new(),
            themes: ThemeTable::builtin(),
            config: AppConfig::default(),
        }
    }

    /// The current snapshot
    #[inline]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Install `next` as the current snapshot in a single step.
    ///
    /// Derivations run against the `(old, new)` pair before installation:
    /// a language transition rewrites the filename extension when the name
    /// still follows the previous language. Each transition is evaluated
    /// exactly once, so re-installing an equal state never rewrites again.
    pub fn replace_state(&mut self, mut next: EditorState) -> Transition {
        let mut transition = Transition::default();

        if next.language != self.state.language {
            let prev = self.state.language;
            transition.language = Some((prev, next.language));
            if let Some(renamed) = sync_filename(&next.filename, prev, next.language) {
                tracing::debug!(
                    from = %next.filename,
                    to = %renamed,
                    "filename follows language {} -> {}",
                    prev,
                    next.language
                );
                next.filename = renamed;
                transition.filename_synced = true;
            }
        }

        if next.theme != self.state.theme {
            transition.theme = Some((self.state.theme, next.theme));
        }

        self.state = next;
        transition
    }

    /// Derived widget theme for the current theme id
    pub fn editor_theme(&self) -> EditorThemeDefinition {
        derive_editor_theme(&self.themes, self.state.theme)
    }

    /// Whether the export control is enabled
    pub fn can_export(&self) -> bool {
        !self.ui.is_exporting && !is_blank(&self.state.code)
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::with_state(EditorState::default())
    }
}
