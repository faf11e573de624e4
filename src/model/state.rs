//! The editor state snapshot
//!
//! Everything the user can adjust about the canvas lives in one value.
//! Updates build a new `EditorState` and hand it to
//! [`AppModel::replace_state`](super::AppModel::replace_state); fields are
//! never patched in place on the installed snapshot.

use serde::Serialize;

use crate::background::{background_at, BACKGROUNDS};
use crate::config::AppConfig;
use crate::language::Language;
use crate::theme::ThemeId;

/// Code shown on a fresh canvas
pub const INITIAL_CODE: &str = "const pluckDeep = key => obj => key.split('.').reduce((acc, k) => acc[k], obj)

const compose = (...fns) => res => fns.reduceRight((acc, f) => f(acc), res)

// Create something beautiful...";

pub const DEFAULT_PADDING: i32 = 64;
pub const DEFAULT_FONT_SIZE: i32 = 14;

/// All user-adjustable content and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorState {
    pub code: String,
    pub language: Language,
    pub theme: ThemeId,
    /// Padding around the code window, in logical pixels (not clamped)
    pub padding: i32,
    /// Gradient descriptor, one of [`BACKGROUNDS`] in practice
    pub background: String,
    pub show_line_numbers: bool,
    /// Font size in logical pixels (not clamped)
    pub font_size: i32,
    /// Window title; user-editable
    pub filename: String,
}

impl EditorState {
    /// Initial state with startup preferences applied
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            theme: config.theme,
            padding: config.padding,
            background: background_at(config.background).to_string(),
            show_line_numbers: config.show_line_numbers,
            font_size: config.font_size,
            ..Self::default()
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        let language = Language::default();
        Self {
            code: INITIAL_CODE.to_string(),
            language,
            theme: ThemeId::default(),
            padding: DEFAULT_PADDING,
            background: BACKGROUNDS[0].to_string(),
            show_line_numbers: false,
            font_size: DEFAULT_FONT_SIZE,
            filename: language.default_filename(),
        }
    }
}
