//! Runtime - owns the model and executes commands
//!
//! The runtime is the only place side effects happen. File reads,
//! rasterization and saving run on spawned threads and report back as
//! messages over an mpsc channel; timers fire from [`Runtime::pump`].

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clipboard::Clipboard;
use crate::commands::Cmd;
use crate::messages::{AppMsg, ExportMsg, Msg, UiMsg};
use crate::model::AppModel;
use crate::raster::Rasterizer;
use crate::scheduler::Scheduler;
use crate::update::update;
use crate::upload::{filename_for_display, read_upload};
use crate::widget::{apply_theme, EditorWidget};

/// Longest single wait inside [`Runtime::run_until_settled`]
const SETTLE_POLL: Duration = Duration::from_millis(25);

pub struct Runtime {
    model: AppModel,
    widget: Option<Box<dyn EditorWidget>>,
    rasterizer: Arc<dyn Rasterizer>,
    clipboard: Box<dyn Clipboard>,
    scheduler: Scheduler,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Spawned operations that haven't reported back
    in_flight: usize,
    needs_redraw: bool,
}

impl Runtime {
    pub fn new(
        model: AppModel,
        rasterizer: Arc<dyn Rasterizer>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            widget: None,
            rasterizer,
            clipboard,
            scheduler: Scheduler::new(),
            msg_tx,
            msg_rx,
            in_flight: 0,
            needs_redraw: true,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn widget(&self) -> Option<&dyn EditorWidget> {
        self.widget.as_deref()
    }

    /// Whether a redraw was requested since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// The export target region appeared
    pub fn mount_canvas(&mut self) {
        self.dispatch(Msg::Ui(UiMsg::CanvasMounted));
    }

    pub fn unmount_canvas(&mut self) {
        self.dispatch(Msg::Ui(UiMsg::CanvasUnmounted));
    }

    /// Attach the code widget and report its mount
    pub fn mount_widget(&mut self, widget: Box<dyn EditorWidget>) {
        self.widget = Some(widget);
        self.dispatch(Msg::Ui(UiMsg::WidgetMounted));
    }

    /// The user typed into the widget: replace its text and report the change
    pub fn widget_input(&mut self, text: &str) {
        let Some(widget) = self.widget.as_mut() else {
            tracing::trace!(target: "widget", "input before mount ignored");
            return;
        };
        widget.set_value(text);
        let value = widget.value();
        self.dispatch(Msg::Ui(UiMsg::WidgetChanged(value)));
    }

    /// Run one message through update and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            if cmd.needs_redraw() {
                self.needs_redraw = true;
            }
            self.process_cmd(cmd);
        }
        self.sync_widget();
    }

    /// Keep the widget buffer equal to the installed code
    fn sync_widget(&mut self) {
        if !self.model.ui.widget_mounted {
            return;
        }
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        let code = &self.model.state().code;
        if widget.value().as_deref() != Some(code.as_str()) {
            widget.set_value(code);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.needs_redraw = true,
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::ApplyTheme(definition) => match self.widget.as_mut() {
                Some(widget) => {
                    apply_theme(widget.as_mut(), &definition);
                }
                None => {
                    tracing::trace!(target: "widget", theme = %definition.name, "no widget yet");
                }
            },
            Cmd::Schedule { key, delay, msg } => {
                self.scheduler.schedule(key, Instant::now(), delay, *msg);
            }
            Cmd::CancelTimer(key) => {
                self.scheduler.cancel(key);
            }
            Cmd::Rasterize { scene, options } => {
                let rasterizer = Arc::clone(&self.rasterizer);
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result =
                        panic::catch_unwind(AssertUnwindSafe(|| rasterizer.render(&scene, &options)))
                            .unwrap_or_else(|payload| Err(panic_message(payload.as_ref())));
                    let _ = tx.send(Msg::Export(ExportMsg::Rendered(result)));
                });
            }
            Cmd::SaveImage { path, bytes } => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result = write_image(&path, &bytes).map(|_| path);
                    let _ = tx.send(Msg::Export(ExportMsg::Saved(result)));
                });
            }
            Cmd::ReadFile { path } => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let name = filename_for_display(&path);
                    let result = read_upload(&path)
                        .map(|file| file.content)
                        .map_err(|e| e.user_message(&name));
                    let _ = tx.send(Msg::App(AppMsg::FileLoaded { name, result }));
                });
            }
            Cmd::CopyToClipboard { text } => {
                let result = self.clipboard.set_text(&text);
                self.in_flight += 1;
                let _ = self
                    .msg_tx
                    .send(Msg::App(AppMsg::ClipboardResult(result)));
            }
        }
    }

    /// Handle messages sent back by finished operations
    fn process_async_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(msg);
        }
    }

    /// Deliver finished operations and every timer due at `now`.
    ///
    /// Returns whether a redraw is pending.
    pub fn pump(&mut self, now: Instant) -> bool {
        self.process_async_messages();
        for msg in self.scheduler.take_due(now) {
            self.dispatch(msg);
        }
        self.needs_redraw
    }

    /// Block until no operation is in flight and no foreground timer is
    /// pending. Toast expiry timers are left running.
    pub fn run_until_settled(&mut self, timeout: Duration) -> Result<(), String> {
        let give_up = Instant::now() + timeout;
        loop {
            self.pump(Instant::now());
            if self.in_flight == 0 && !self.scheduler.has_foreground() {
                return Ok(());
            }

            let now = Instant::now();
            if now >= give_up {
                return Err(format!(
                    "Timed out after {:?} with {} operation(s) in flight",
                    timeout, self.in_flight
                ));
            }

            let mut wait = SETTLE_POLL.min(give_up - now);
            if let Some(deadline) = self.scheduler.next_deadline(false) {
                wait = wait.min(deadline.saturating_duration_since(now));
            }

            if self.in_flight > 0 {
                match self.msg_rx.recv_timeout(wait) {
                    Ok(msg) => {
                        self.in_flight = self.in_flight.saturating_sub(1);
                        self.dispatch(msg);
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err("Message channel closed".to_string());
                    }
                }
            } else {
                std::thread::sleep(wait);
            }
        }
    }
}

/// Write PNG bytes, creating the parent directory if needed
fn write_image(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("creating directory {}: {}", parent.display(), e))?;
    }
    std::fs::write(path, bytes).map_err(|e| format!("writing {}: {}", path.display(), e))
}

/// Text of a caught panic payload
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("rasterizer panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("rasterizer panicked: {}", s)
    } else {
        "rasterizer panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("bad glyph");
        assert_eq!(panic_message(payload.as_ref()), "rasterizer panicked: bad glyph");
    }

    #[test]
    fn test_write_image_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/out.png");
        write_image(&path, b"png").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
    }
}
