//! Embedded code widget adapter
//!
//! The canvas talks to its code widget only through [`EditorWidget`]:
//! read and write the buffer, register a theme definition and switch to it.
//! [`BufferWidget`] is the in-process implementation used by the CLI and tests.

use std::collections::HashMap;
use std::fmt;

use crate::theme::EditorThemeDefinition;

/// Errors reported by a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The widget has not finished mounting
    NotMounted,
    /// `activate_theme` named a theme that was never registered
    UnknownTheme(String),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::NotMounted => write!(f, "Editor widget is not mounted"),
            WidgetError::UnknownTheme(name) => write!(f, "Theme not registered: {}", name),
        }
    }
}

impl std::error::Error for WidgetError {}

/// Operations the canvas needs from a code-editing widget
pub trait EditorWidget: Send {
    /// Current buffer text, `None` when the widget has no model yet
    fn value(&self) -> Option<String>;

    /// Replace the buffer text
    fn set_value(&mut self, text: &str);

    /// Register (or re-register) a theme under `definition.name`
    fn register_theme(&mut self, definition: &EditorThemeDefinition) -> Result<(), WidgetError>;

    /// Make a registered theme active
    fn activate_theme(&mut self, name: &str) -> Result<(), WidgetError>;
}

/// Plain text buffer with a theme registry
#[derive(Debug, Default)]
pub struct BufferWidget {
    mounted: bool,
    text: String,
    themes: HashMap<String, EditorThemeDefinition>,
    active: Option<String>,
}

impl BufferWidget {
    /// An unmounted widget; theme calls fail until [`mount`](Self::mount)
    pub fn new() -> Self {
        Self::default()
    }

    /// A widget that is already mounted with `text`
    pub fn mounted(text: impl Into<String>) -> Self {
        let mut widget = Self::new();
        widget.mount(text);
        widget
    }

    pub fn mount(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.mounted = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Name of the active theme
    pub fn active_theme(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn registered_theme(&self, name: &str) -> Option<&EditorThemeDefinition> {
        self.themes.get(name)
    }
}

impl EditorWidget for BufferWidget {
    fn value(&self) -> Option<String> {
        self.mounted.then(|| self.text.clone())
    }

    fn set_value(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
        }
    }

    fn register_theme(&mut self, definition: &EditorThemeDefinition) -> Result<(), WidgetError> {
        if !self.mounted {
            return Err(WidgetError::NotMounted);
        }
        self.themes
            .insert(definition.name.clone(), definition.clone());
        Ok(())
    }

    fn activate_theme(&mut self, name: &str) -> Result<(), WidgetError> {
        if !self.mounted {
            return Err(WidgetError::NotMounted);
        }
        if !self.themes.contains_key(name) {
            return Err(WidgetError::UnknownTheme(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }
}

/// Register and activate `definition`, ignoring widget errors.
///
/// Returns whether the theme became active.
pub fn apply_theme(widget: &mut dyn EditorWidget, definition: &EditorThemeDefinition) -> bool {
    let result = widget
        .register_theme(definition)
        .and_then(|_| widget.activate_theme(&definition.name));
    match result {
        Ok(()) => {
            tracing::debug!(target: "widget", theme = %definition.name, "theme applied");
            true
        }
        Err(e) => {
            tracing::trace!(target: "widget", theme = %definition.name, "theme not applied: {}", e);
            false
        }
    }
}
