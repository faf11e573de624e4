//! Command-line argument parsing
//!
//! Supports:
//! - Loading a source file (language inferred from its extension)
//! - Overriding every canvas setting
//! - Copying the code to the clipboard
//! - Dumping the final state instead of exporting

use clap::Parser;
use std::path::PathBuf;

use crate::background::background_at;
use crate::config::AppConfig;
use crate::language::Language;
use crate::messages::{EditorMsg, Msg};
use crate::theme::ThemeId;

/// Render source code into a shareable PNG
#[derive(Parser, Debug, Default)]
#[command(name = "codecanvas", version, about = "Render source code into a shareable PNG")]
pub struct CliArgs {
    /// Source file to load
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Theme id (night-owl, one-dark, dracula, nord)
    #[arg(long, value_name = "ID")]
    pub theme: Option<ThemeId>,

    /// Language id, overriding the one inferred from FILE
    #[arg(long, value_name = "ID")]
    pub language: Option<Language>,

    /// Canvas padding in pixels
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub padding: Option<i32>,

    /// Code font size in pixels
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub font_size: Option<i32>,

    /// Show line numbers
    #[arg(long)]
    pub line_numbers: bool,

    /// Window title shown above the code
    #[arg(long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Background index (wraps around the list)
    #[arg(long, value_name = "N")]
    pub background: Option<usize>,

    /// Rotate the background N times after other settings
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub rotate: usize,

    /// Monospace TTF/OTF used to draw the code
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Directory the PNG is written to
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Also copy the code to the system clipboard
    #[arg(long)]
    pub copy: bool,

    /// Print the final editor state as JSON instead of exporting
    #[arg(long)]
    pub dump_state: bool,

    /// Persist theme, padding, font size, line numbers and paths as defaults
    #[arg(long)]
    pub save_config: bool,
}

impl CliArgs {
    /// Fold startup preferences into `config`
    pub fn apply_to_config(&self, config: &mut AppConfig) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
        if self.line_numbers {
            config.show_line_numbers = true;
        }
        if let Some(index) = self.background {
            config.background = index;
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(dir) = &self.out_dir {
            config.output_dir = Some(dir.clone());
        }
    }

    /// Messages applied after FILE has been loaded.
    ///
    /// Language comes before the filename so an explicit name is kept as given.
    pub fn overrides(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if let Some(language) = self.language {
            msgs.push(Msg::set_language(language));
        }
        if let Some(theme) = self.theme {
            msgs.push(Msg::set_theme(theme));
        }
        if let Some(padding) = self.padding {
            msgs.push(Msg::Editor(EditorMsg::SetPadding(padding)));
        }
        if let Some(font_size) = self.font_size {
            msgs.push(Msg::Editor(EditorMsg::SetFontSize(font_size)));
        }
        if self.line_numbers {
            msgs.push(Msg::Editor(EditorMsg::SetShowLineNumbers(true)));
        }
        if let Some(index) = self.background {
            msgs.push(Msg::Editor(EditorMsg::SetBackground(
                background_at(index).to_string(),
            )));
        }
        for _ in 0..self.rotate {
            msgs.push(Msg::Editor(EditorMsg::RotateBackground));
        }
        if let Some(filename) = &self.filename {
            msgs.push(Msg::rename(filename.clone()));
        }
        msgs
    }
}
