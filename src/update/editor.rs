//! Editor state edits
//!
//! Each message builds a complete new snapshot from the installed one and
//! hands it to `AppModel::replace_state`; derived rules then run once on the
//! reported transition.

use crate::background::next_background;
use crate::commands::Cmd;
use crate::messages::EditorMsg;
use crate::model::{AppModel, EditorState, Transition};

/// Handle editor state messages
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    let current = model.state().clone();

    let next = match msg {
        EditorMsg::SetCode(code) => EditorState { code, ..current },
        EditorMsg::SetLanguage(language) => EditorState { language, ..current },
        EditorMsg::SetTheme(theme) => EditorState { theme, ..current },
        EditorMsg::SetPadding(padding) => EditorState { padding, ..current },
        EditorMsg::SetFontSize(font_size) => EditorState {
            font_size,
            ..current
        },
        EditorMsg::ToggleLineNumbers => EditorState {
            show_line_numbers: !current.show_line_numbers,
            ..current
        },
        EditorMsg::SetShowLineNumbers(show_line_numbers) => EditorState {
            show_line_numbers,
            ..current
        },
        EditorMsg::Rename(filename) => EditorState { filename, ..current },
        EditorMsg::SetBackground(background) => EditorState {
            background,
            ..current
        },
        EditorMsg::RotateBackground => {
            let background = next_background(&current.background).to_string();
            EditorState {
                background,
                ..current
            }
        }
        // Code and language land in one snapshot
        EditorMsg::ReplaceContent { code, language } => EditorState {
            code,
            language,
            ..current
        },
    };

    if &next == model.state() {
        return None;
    }

    let transition = model.replace_state(next);
    Some(after_transition(model, &transition))
}

/// Side effects of an installed transition.
///
/// A theme change pushes the derived definition into the widget.
pub fn after_transition(model: &AppModel, transition: &Transition) -> Cmd {
    match transition.theme {
        Some((from, to)) => {
            tracing::debug!("theme {} -> {}", from, to);
            Cmd::batch(vec![Cmd::ApplyTheme(model.editor_theme()), Cmd::Redraw])
        }
        None => Cmd::Redraw,
    }
}
