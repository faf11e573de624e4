//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use codecanvas::clipboard::Clipboard;
use codecanvas::config::AppConfig;
use codecanvas::language::Language;
use codecanvas::model::{AppModel, EditorState};
use codecanvas::raster::{ExportScene, RasterOptions, Rasterizer};
use codecanvas::runtime::Runtime;
use codecanvas::theme::{EditorThemeDefinition, ThemeTable};
use codecanvas::widget::{EditorWidget, WidgetError};

pub const SETTLE: Duration = Duration::from_secs(5);

/// Model with the given code and language, filename following the language
pub fn test_model(code: &str, language: Language) -> AppModel {
    AppModel::with_state(EditorState {
        code: code.to_string(),
        language,
        filename: language.default_filename(),
        ..EditorState::default()
    })
}

/// Model whose exports go to `dir`
pub fn model_with_output(dir: PathBuf) -> AppModel {
    let config = AppConfig {
        output_dir: Some(dir),
        ..AppConfig::default()
    };
    AppModel::new(config, ThemeTable::builtin())
}

/// A moment after every pending timer, including toast expiry
pub fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(10)
}

// ----------------------------------------------------------------------------
// Widget
// ----------------------------------------------------------------------------

/// Everything a [`FakeWidget`] was asked to do
#[derive(Debug, Default)]
pub struct WidgetLog {
    pub mounted: bool,
    pub text: String,
    pub registered: Vec<EditorThemeDefinition>,
    pub active: Option<String>,
    pub set_value_calls: usize,
}

/// Widget that records calls into a shared log
#[derive(Clone, Default)]
pub struct FakeWidget {
    pub log: Arc<Mutex<WidgetLog>>,
}

impl FakeWidget {
    pub fn mounted() -> Self {
        let widget = Self::default();
        widget.log.lock().unwrap().mounted = true;
        widget
    }

    pub fn active(&self) -> Option<String> {
        self.log.lock().unwrap().active.clone()
    }

    pub fn text(&self) -> String {
        self.log.lock().unwrap().text.clone()
    }
}

impl EditorWidget for FakeWidget {
    fn value(&self) -> Option<String> {
        let log = self.log.lock().unwrap();
        log.mounted.then(|| log.text.clone())
    }

    fn set_value(&mut self, text: &str) {
        let mut log = self.log.lock().unwrap();
        log.text = text.to_string();
        log.set_value_calls += 1;
    }

    fn register_theme(&mut self, definition: &EditorThemeDefinition) -> Result<(), WidgetError> {
        let mut log = self.log.lock().unwrap();
        if !log.mounted {
            return Err(WidgetError::NotMounted);
        }
        log.registered.push(definition.clone());
        Ok(())
    }

    fn activate_theme(&mut self, name: &str) -> Result<(), WidgetError> {
        let mut log = self.log.lock().unwrap();
        if !log.mounted {
            return Err(WidgetError::NotMounted);
        }
        log.active = Some(name.to_string());
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Rasterizer
// ----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum RasterBehavior {
    Succeed(Vec<u8>),
    Fail(String),
    Panic,
}

/// Rasterizer with scripted results that counts and records calls
pub struct FakeRasterizer {
    pub behavior: RasterBehavior,
    pub delay: Duration,
    pub calls: AtomicUsize,
    pub last_scene: Mutex<Option<(ExportScene, RasterOptions)>>,
}

impl FakeRasterizer {
    pub fn new(behavior: RasterBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_scene: Mutex::new(None),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::new(RasterBehavior::Succeed(b"\x89PNG fake".to_vec()))
    }

    pub fn slow(behavior: RasterBehavior, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            delay,
            calls: AtomicUsize::new(0),
            last_scene: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rasterizer for FakeRasterizer {
    fn render(&self, scene: &ExportScene, options: &RasterOptions) -> Result<Vec<u8>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_scene.lock().unwrap() = Some((scene.clone(), *options));
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        match &self.behavior {
            RasterBehavior::Succeed(bytes) => Ok(bytes.clone()),
            RasterBehavior::Fail(message) => Err(message.clone()),
            RasterBehavior::Panic => panic!("rasterizer exploded"),
        }
    }
}

// ----------------------------------------------------------------------------
// Clipboard
// ----------------------------------------------------------------------------

/// Clipboard that stores writes, or fails every write
#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub writes: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl FakeClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Clipboard for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.fail {
            return Err("clipboard unavailable".to_string());
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Runtime
// ----------------------------------------------------------------------------

/// Runtime with the canvas and a fake widget mounted
pub fn mounted_runtime(model: AppModel, rasterizer: Arc<FakeRasterizer>) -> (Runtime, FakeWidget) {
    mounted_runtime_with_clipboard(model, rasterizer, FakeClipboard::default())
}

pub fn mounted_runtime_with_clipboard(
    model: AppModel,
    rasterizer: Arc<FakeRasterizer>,
    clipboard: FakeClipboard,
) -> (Runtime, FakeWidget) {
    let mut runtime = Runtime::new(model, rasterizer, Box::new(clipboard));
    runtime.mount_canvas();
    let widget = FakeWidget::mounted();
    runtime.mount_widget(Box::new(widget.clone()));
    (runtime, widget)
}
