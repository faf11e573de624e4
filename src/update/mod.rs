//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod editor;
mod export;
mod toast;
mod ui;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::{update_app, COPY_FAILED_MESSAGE, COPY_SUCCEEDED_MESSAGE};
pub use editor::{after_transition, update_editor};
pub use export::{
    export_file_name, update_export, EXPORT_FAILED_MESSAGE, EXPORT_FRAME_DELAY, SAVE_FAILED_MESSAGE,
};
pub use toast::{push_toast, update_toast};
pub use ui::update_ui;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Export(m) => export::update_export(model, m),
        Msg::Toast(m) => toast::update_toast(model, m),
        Msg::Ui(m) => ui::update_ui(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::UiMsg;

    // Typing reports every keystroke
    let is_noisy = matches!(&msg, Msg::Ui(UiMsg::WidgetChanged(_)));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let before = model.state().clone();
    let result = update_inner(model, msg);

    if &before != model.state() {
        debug!(
            target: "state",
            language = %model.state().language,
            theme = %model.state().theme,
            filename = %model.state().filename,
            "state replaced"
        );
    }

    result
}

/// Get a display name for a message type
///
/// Payloads that can be large (code, file contents, image bytes) are
/// summarized by length.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, EditorMsg, ExportMsg, UiMsg};

    match msg {
        Msg::Editor(EditorMsg::SetCode(code)) => format!("Editor::SetCode({} bytes)", code.len()),
        Msg::Editor(EditorMsg::ReplaceContent { code, language }) => {
            format!("Editor::ReplaceContent({} bytes, {})", code.len(), language)
        }
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Export(ExportMsg::Rendered(Ok(bytes))) => {
            format!("Export::Rendered(Ok({} bytes))", bytes.len())
        }
        Msg::Export(m) => format!("Export::{:?}", m),
        Msg::Toast(m) => format!("Toast::{:?}", m),
        Msg::Ui(UiMsg::WidgetChanged(value)) => format!(
            "Ui::WidgetChanged({:?} bytes)",
            value.as_ref().map(String::len)
        ),
        Msg::Ui(m) => format!("Ui::{:?}", m),
        Msg::App(AppMsg::FileLoaded { name, result }) => {
            format!("App::FileLoaded({}, ok={})", name, result.is_ok())
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
