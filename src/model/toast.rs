//! Toast notifications
//!
//! An ordered queue of short-lived messages. Each toast is removed
//! automatically after [`TOAST_DURATION`] or earlier when dismissed.

use std::time::Duration;

use serde::Serialize;

/// How long a toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Visual category of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

impl ToastKind {
    /// Heading shown above the message
    pub fn title(&self) -> &'static str {
        match self {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
            ToastKind::Info => "Info",
        }
    }
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastItem {
    /// Creation time in unix milliseconds, bumped to stay unique
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Toasts in display (= insertion) order
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    items: Vec<ToastItem>,
    last_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast created at `now_ms` and return its id.
    ///
    /// Identical messages are not merged. Two toasts created in the same
    /// millisecond get consecutive ids.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        self.items.push(ToastItem {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove a toast; returns false if it was already gone
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&ToastItem> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn items(&self) -> &[ToastItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
