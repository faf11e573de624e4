//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::language::Language;
use crate::model::ToastKind;
use crate::theme::ThemeId;

/// Edits to the editor state snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMsg {
    /// Replace the code buffer (typing in the widget)
    SetCode(String),
    /// Pick a language
    SetLanguage(Language),
    /// Pick a theme
    SetTheme(ThemeId),
    /// Set canvas padding in logical pixels
    SetPadding(i32),
    /// Set code font size in logical pixels
    SetFontSize(i32),
    /// Flip the line-number gutter
    ToggleLineNumbers,
    /// Show or hide the line-number gutter
    SetShowLineNumbers(bool),
    /// Edit the window filename
    Rename(String),
    /// Use a specific background descriptor
    SetBackground(String),
    /// Advance to the next background, wrapping around
    RotateBackground,
    /// Replace code and language together (uploads)
    ReplaceContent { code: String, language: Language },
}

/// Export procedure messages
#[derive(Debug, Clone, PartialEq)]
pub enum ExportMsg {
    /// User pressed the export control
    Request,
    /// One frame has passed since the export started
    FrameReady,
    /// Rasterization finished (PNG bytes or an error)
    Rendered(Result<Vec<u8>, String>),
    /// The image was written (path or an error)
    Saved(Result<PathBuf, String>),
}

/// Notification queue messages
#[derive(Debug, Clone, PartialEq)]
pub enum ToastMsg {
    /// Show a new toast
    Push { message: String, kind: ToastKind },
    /// User closed a toast
    Dismiss(u64),
    /// A toast's display time ran out
    Expire(u64),
}

/// Mount and widget lifecycle messages
#[derive(Debug, Clone, PartialEq)]
pub enum UiMsg {
    /// The export target region appeared
    CanvasMounted,
    /// The export target region went away
    CanvasUnmounted,
    /// The embedded code widget finished mounting
    WidgetMounted,
    /// The widget reported a new value (None when it has no model yet)
    WidgetChanged(Option<String>),
}

/// Application-level messages (uploads, clipboard)
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// User picked a file to load
    UploadFile(PathBuf),
    /// File read completed (async result)
    FileLoaded {
        name: String,
        result: Result<String, String>,
    },
    /// Copy the code buffer to the system clipboard
    CopyCode,
    /// Clipboard write completed
    ClipboardResult(Result<(), String>),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Editor state edits
    Editor(EditorMsg),
    /// Export procedure
    Export(ExportMsg),
    /// Notifications
    Toast(ToastMsg),
    /// Mount/widget lifecycle
    Ui(UiMsg),
    /// Uploads and clipboard
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn set_language(language: Language) -> Self {
        Msg::Editor(EditorMsg::SetLanguage(language))
    }

    pub fn set_theme(theme: ThemeId) -> Self {
        Msg::Editor(EditorMsg::SetTheme(theme))
    }

    pub fn rename(filename: impl Into<String>) -> Self {
        Msg::Editor(EditorMsg::Rename(filename.into()))
    }

    pub fn export() -> Self {
        Msg::Export(ExportMsg::Request)
    }

    pub fn toast(message: impl Into<String>, kind: ToastKind) -> Self {
        Msg::Toast(ToastMsg::Push {
            message: message.into(),
            kind,
        })
    }
}
