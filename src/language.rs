//! Language identification
//!
//! Maps language ids to their canonical file extension (used to keep the
//! window filename in sync) and infers a language from an uploaded file name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the canvas can present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
    Python,
    Rust,
    Html,
    Css,
    Go,
    Cpp,
    Json,
}

/// Every language, in declaration order
pub const ALL_LANGUAGES: &[Language] = &[
    Language::JavaScript,
    Language::TypeScript,
    Language::Python,
    Language::Rust,
    Language::Html,
    Language::Css,
    Language::Go,
    Language::Cpp,
    Language::Json,
];

/// Languages offered by the language picker, in display order.
/// CSS is reachable only programmatically; uploaded `.css` files open as HTML.
pub const LANGUAGE_CHOICES: &[Language] = &[
    Language::JavaScript,
    Language::TypeScript,
    Language::Python,
    Language::Rust,
    Language::Html,
    Language::Cpp,
    Language::Go,
    Language::Json,
];

impl Language {
    /// Stable identifier (e.g. "javascript", "cpp")
    pub fn id(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Html => "html",
            Language::Css => "css",
            Language::Go => "go",
            Language::Cpp => "cpp",
            Language::Json => "json",
        }
    }

    /// Display name for pickers
    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Html => "HTML/CSS",
            Language::Css => "CSS",
            Language::Go => "Go",
            Language::Cpp => "C++",
            Language::Json => "JSON",
        }
    }

    /// Canonical file extension without the dot, or "" when unmapped
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
            Language::Python => "py",
            Language::Rust => "rs",
            Language::Html => "html",
            Language::Go => "go",
            Language::Cpp => "cpp",
            Language::Json => "json",
            Language::Css => "",
        }
    }

    /// Default window filename for this language, e.g. "rust.rs"
    pub fn default_filename(&self) -> String {
        format!("{}.{}", self.id(), self.extension())
    }

    /// Look up a language by its id (exact match)
    pub fn from_id(id: &str) -> Option<Self> {
        ALL_LANGUAGES.iter().copied().find(|l| l.id() == id)
    }

    /// Infer a language from a file extension (case-insensitive).
    /// Unrecognized extensions fall back to JavaScript.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "ts" | "tsx" => Language::TypeScript,
            "py" => Language::Python,
            "rs" => Language::Rust,
            "html" | "css" => Language::Html,
            "cpp" | "h" => Language::Cpp,
            "go" => Language::Go,
            "json" => Language::Json,
            _ => Language::JavaScript,
        }
    }

    /// Infer a language from an uploaded file's name.
    ///
    /// The extension is whatever follows the last `.`; a name without a dot
    /// is looked up whole (so a file called `go` reads as Go).
    pub fn infer_from_file_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or(name);
        Self::from_extension(ext)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_id(&s.to_lowercase()).ok_or_else(|| {
            let known: Vec<&str> = ALL_LANGUAGES.iter().map(|l| l.id()).collect();
            format!("Unknown language '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}
