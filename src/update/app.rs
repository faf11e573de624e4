//! Upload and clipboard messages

use crate::commands::Cmd;
use crate::language::Language;
use crate::messages::{AppMsg, EditorMsg};
use crate::model::{AppModel, ToastKind};

use super::editor::update_editor;
use super::toast::push_toast;

pub const COPY_SUCCEEDED_MESSAGE: &str = "Code copied to clipboard!";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::UploadFile(path) => {
            tracing::debug!(target: "upload", "reading {}", path.display());
            model.ui.is_loading = true;
            Some(Cmd::ReadFile { path })
        }

        AppMsg::FileLoaded { name, result } => {
            model.ui.is_loading = false;
            match result {
                Ok(code) => {
                    let language = Language::infer_from_file_name(&name);
                    tracing::info!(target: "upload", "loaded {} as {}", name, language);
                    // Applied to whatever state is installed now
                    update_editor(model, EditorMsg::ReplaceContent { code, language })
                }
                Err(message) => {
                    tracing::warn!(target: "upload", "{}", message);
                    Some(push_toast(model, message, ToastKind::Error))
                }
            }
        }

        AppMsg::CopyCode => Some(Cmd::CopyToClipboard {
            text: model.state().code.clone(),
        }),

        AppMsg::ClipboardResult(Ok(())) => {
            Some(push_toast(model, COPY_SUCCEEDED_MESSAGE, ToastKind::Success))
        }

        AppMsg::ClipboardResult(Err(e)) => {
            tracing::warn!("Clipboard write failed: {}", e);
            Some(push_toast(model, COPY_FAILED_MESSAGE, ToastKind::Error))
        }
    }
}
