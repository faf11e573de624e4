//! Notification queue messages

use crate::commands::Cmd;
use crate::messages::{Msg, ToastMsg};
use crate::model::{AppModel, ToastKind, TOAST_DURATION};
use crate::scheduler::TimerKey;
use crate::util::unix_millis;

/// Handle toast messages
pub fn update_toast(model: &mut AppModel, msg: ToastMsg) -> Option<Cmd> {
    match msg {
        ToastMsg::Push { message, kind } => Some(push_toast(model, message, kind)),

        ToastMsg::Dismiss(id) => {
            if !model.ui.toasts.remove(id) {
                return None;
            }
            Some(Cmd::batch(vec![
                Cmd::CancelTimer(TimerKey::ToastExpiry(id)),
                Cmd::Redraw,
            ]))
        }

        ToastMsg::Expire(id) => {
            if model.ui.toasts.remove(id) {
                Some(Cmd::Redraw)
            } else {
                tracing::trace!("toast {} already gone", id);
                None
            }
        }
    }
}

/// Append a toast and schedule its expiry
pub fn push_toast(model: &mut AppModel, message: impl Into<String>, kind: ToastKind) -> Cmd {
    let id = model.ui.toasts.push(message, kind, unix_millis());
    Cmd::batch(vec![
        Cmd::Schedule {
            key: TimerKey::ToastExpiry(id),
            delay: TOAST_DURATION,
            msg: Box::new(Msg::Toast(ToastMsg::Expire(id))),
        },
        Cmd::Redraw,
    ])
}
