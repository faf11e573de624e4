//! Export procedure
//!
//! `Idle -> Exporting -> Idle`. A request sets the busy flag and waits one
//! frame; rasterization and saving run as commands and report back. The
//! flag is cleared on every terminal message, success or failure.

use std::time::Duration;

use crate::commands::Cmd;
use crate::messages::{ExportMsg, Msg};
use crate::model::{AppModel, ToastKind};
use crate::raster::{ExportScene, RasterOptions};
use crate::scheduler::TimerKey;
use crate::util::{is_blank, unix_millis};

use super::toast::push_toast;

/// Delay between showing the busy state and capturing
pub const EXPORT_FRAME_DELAY: Duration = Duration::from_millis(100);

pub const EXPORT_FAILED_MESSAGE: &str = "Failed to generate image. Please try again.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save image";

/// `code-canvas-<unix ms>.png`
pub fn export_file_name(timestamp_ms: u64) -> String {
    format!("code-canvas-{}.png", timestamp_ms)
}

/// Handle export messages
pub fn update_export(model: &mut AppModel, msg: ExportMsg) -> Option<Cmd> {
    match msg {
        ExportMsg::Request => {
            if !model.ui.canvas_mounted {
                tracing::debug!(target: "export", "no export target mounted");
                return None;
            }
            if model.ui.is_exporting {
                tracing::debug!(target: "export", "export already in flight");
                return None;
            }
            if is_blank(&model.state().code) {
                return None;
            }

            model.ui.is_exporting = true;
            Some(Cmd::batch(vec![
                Cmd::Redraw,
                Cmd::Schedule {
                    key: TimerKey::ExportFrame,
                    delay: EXPORT_FRAME_DELAY,
                    msg: Box::new(Msg::Export(ExportMsg::FrameReady)),
                },
            ]))
        }

        ExportMsg::FrameReady => {
            if !model.ui.is_exporting {
                return None;
            }
            if !model.ui.canvas_mounted {
                tracing::error!(target: "export", "export target went away before capture");
                return Some(fail(model, EXPORT_FAILED_MESSAGE));
            }
            Some(Cmd::Rasterize {
                scene: ExportScene::capture(model),
                options: RasterOptions::export(),
            })
        }

        ExportMsg::Rendered(Ok(bytes)) => {
            if !model.ui.is_exporting {
                return None;
            }
            let path = model
                .config
                .output_dir()
                .join(export_file_name(unix_millis()));
            tracing::info!(target: "export", bytes = bytes.len(), "rendered {}", path.display());
            Some(Cmd::SaveImage { path, bytes })
        }

        ExportMsg::Rendered(Err(e)) => {
            tracing::error!(target: "export", "Failed to export image: {}", e);
            Some(fail(model, EXPORT_FAILED_MESSAGE))
        }

        ExportMsg::Saved(Ok(path)) => {
            tracing::info!(target: "export", "saved {}", path.display());
            model.ui.is_exporting = false;
            model.ui.last_export = Some(path);
            Some(Cmd::Redraw)
        }

        ExportMsg::Saved(Err(e)) => {
            tracing::error!(target: "export", "Failed to save image: {}", e);
            Some(fail(model, SAVE_FAILED_MESSAGE))
        }
    }
}

/// Return to idle and report `message`
fn fail(model: &mut AppModel, message: &str) -> Cmd {
    model.ui.is_exporting = false;
    push_toast(model, message, ToastKind::Error)
}
