//! Mount and widget lifecycle messages

use crate::commands::Cmd;
use crate::messages::{EditorMsg, UiMsg};
use crate::model::AppModel;

use super::editor::update_editor;

/// Handle UI messages
pub fn update_ui(model: &mut AppModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::CanvasMounted => {
            model.ui.canvas_mounted = true;
            Some(Cmd::Redraw)
        }
        UiMsg::CanvasUnmounted => {
            model.ui.canvas_mounted = false;
            None
        }
        UiMsg::WidgetMounted => {
            model.ui.widget_mounted = true;
            tracing::debug!(target: "widget", "mounted");
            Some(Cmd::ApplyTheme(model.editor_theme()))
        }
        UiMsg::WidgetChanged(Some(text)) => update_editor(model, EditorMsg::SetCode(text)),
        // Widget without a model yet
        UiMsg::WidgetChanged(None) => None,
    }
}
