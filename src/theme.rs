//! Theme system for the canvas
//!
//! Provides YAML-based theme descriptors with compile-time embedded themes
//! and user overrides from the config directory, plus the derived editor
//! theme (background + contrast foreground) pushed into the code widget.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/codecanvas/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{contrast_foreground, is_light, Color, LINE_NUMBER_ALPHA};

// Embed theme YAML files at compile time
pub const NIGHT_OWL_YAML: &str = include_str!("../themes/night-owl.yaml");
pub const ONE_DARK_YAML: &str = include_str!("../themes/one-dark.yaml");
pub const DRACULA_YAML: &str = include_str!("../themes/dracula.yaml");
pub const NORD_YAML: &str = include_str!("../themes/nord.yaml");

/// Base theme every derived editor theme inherits from
pub const WIDGET_BASE_THEME: &str = "vs-dark";

/// Background used when a descriptor color cannot be parsed
pub const FALLBACK_BACKGROUND: Color = Color::rgb(0x15, 0x15, 0x15);

/// Theme identifiers selectable in the theme picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    #[default]
    NightOwl,
    OneDark,
    Dracula,
    Nord,
}

impl ThemeId {
    /// Stable identifier (e.g. "night-owl")
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::NightOwl => "night-owl",
            ThemeId::OneDark => "one-dark",
            ThemeId::Dracula => "dracula",
            ThemeId::Nord => "nord",
        }
    }

    /// Name under which the derived theme is registered in the widget
    pub fn widget_theme_name(&self) -> String {
        format!("custom-{}", self.as_str())
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BUILTIN_THEMES
            .iter()
            .map(|b| b.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown theme id: {}", s))
    }
}

/// A built-in theme entry
pub struct BuiltinTheme {
    pub id: ThemeId,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes, in picker order
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: ThemeId::NightOwl,
        yaml: NIGHT_OWL_YAML,
    },
    BuiltinTheme {
        id: ThemeId::OneDark,
        yaml: ONE_DARK_YAML,
    },
    BuiltinTheme {
        id: ThemeId::Dracula,
        yaml: DRACULA_YAML,
    },
    BuiltinTheme {
        id: ThemeId::Nord,
        yaml: NORD_YAML,
    },
];

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub background: String,
}

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined override in ~/.config/codecanvas/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Static description of a theme: id, label and window background
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDescriptor {
    pub id: ThemeId,
    pub label: String,
    pub background: Color,
    pub source: ThemeSource,
}

impl ThemeDescriptor {
    /// Parse a descriptor for `id` from YAML
    pub fn from_yaml(id: ThemeId, yaml: &str, source: ThemeSource) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Ok(Self {
            id,
            label: data.name,
            background: Color::from_hex(&data.background)?,
            source,
        })
    }

    /// Load a built-in descriptor
    pub fn from_builtin(id: ThemeId) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Self::from_yaml(id, entry.yaml, ThemeSource::Builtin)
    }

    /// Load an override descriptor from a YAML file
    pub fn from_file(id: ThemeId, path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
        Self::from_yaml(id, &content, ThemeSource::User)
    }
}

/// The ordered theme table consulted by the theme rule
#[derive(Debug, Clone)]
pub struct ThemeTable {
    entries: Vec<ThemeDescriptor>,
}

impl ThemeTable {
    /// Built-in descriptors only
    pub fn builtin() -> Self {
        let entries = BUILTIN_THEMES
            .iter()
            .filter_map(|b| match ThemeDescriptor::from_builtin(b.id) {
                Ok(d) => Some(d),
                Err(e) => {
                    tracing::error!("Built-in theme '{}' failed to parse: {}", b.id, e);
                    None
                }
            })
            .collect();
        Self { entries }
    }

    /// Built-ins, with any `<themes_dir>/{id}.yaml` taking priority
    pub fn load(themes_dir: Option<&Path>) -> Self {
        let mut table = Self::builtin();
        let Some(dir) = themes_dir else {
            return table;
        };

        for entry in table.entries.iter_mut() {
            let user_path = dir.join(format!("{}.yaml", entry.id));
            if !user_path.exists() {
                continue;
            }
            match ThemeDescriptor::from_file(entry.id, &user_path) {
                Ok(descriptor) => {
                    tracing::info!("Loading user theme from {}", user_path.display());
                    *entry = descriptor;
                }
                Err(e) => {
                    tracing::warn!("Ignoring theme override {}: {}", user_path.display(), e);
                }
            }
        }
        table
    }

    pub fn entries(&self) -> &[ThemeDescriptor] {
        &self.entries
    }

    /// Descriptor for `id`, falling back to the first entry of the table
    pub fn descriptor(&self, id: ThemeId) -> Option<&ThemeDescriptor> {
        self.entries
            .iter()
            .find(|d| d.id == id)
            .or_else(|| self.entries.first())
    }

    /// Window background for `id`
    pub fn background(&self, id: ThemeId) -> Color {
        self.descriptor(id)
            .map(|d| d.background)
            .unwrap_or(FALLBACK_BACKGROUND)
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Theme definition registered with the embedded code widget
#[derive(Debug, Clone, PartialEq)]
pub struct EditorThemeDefinition {
    /// Registration name, `custom-<theme id>`
    pub name: String,
    pub base: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub line_number_foreground: Color,
}

impl EditorThemeDefinition {
    /// Whether the filename label should use dark text
    pub fn is_light(&self) -> bool {
        is_light(self.background)
    }
}

/// Derive the widget theme for `id`: descriptor background, contrast
/// foreground, and the foreground at ~60% alpha for line numbers.
pub fn derive_editor_theme(table: &ThemeTable, id: ThemeId) -> EditorThemeDefinition {
    let background = table.background(id);
    let foreground = contrast_foreground(background);
    EditorThemeDefinition {
        name: id.widget_theme_name(),
        base: WIDGET_BASE_THEME,
        background,
        foreground,
        line_number_foreground: foreground.with_alpha(LINE_NUMBER_ALPHA),
    }
}
