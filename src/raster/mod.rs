//! Rasterization of the export target region
//!
//! An [`ExportScene`] is a frozen copy of everything visible in the export
//! region. A [`Rasterizer`] turns it into PNG bytes; it runs off the update
//! thread, so the scene is owned data.

pub mod frame;
pub mod layout;
pub mod png;

pub use frame::{Frame, GlyphCache, TextPainter};
pub use layout::CanvasLayout;
pub use png::PngRasterizer;

use crate::model::{AppModel, EditorState};
use crate::theme::EditorThemeDefinition;

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Capture parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Physical pixels per logical pixel
    pub pixel_ratio: f32,
    /// Encoder quality in 0.0..=1.0 (PNG output is lossless)
    pub quality: f32,
    /// Override for the code window corner radius; `Some(0.0)` draws square corners
    pub corner_radius: Option<f32>,
}

impl RasterOptions {
    /// Options used for image export: 3x density, full quality, no rounding
    pub fn export() -> Self {
        Self {
            pixel_ratio: 3.0,
            quality: 1.0,
            corner_radius: Some(0.0),
        }
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            quality: 1.0,
            corner_radius: None,
        }
    }
}

/// Everything the export region shows, detached from the model
#[derive(Debug, Clone, PartialEq)]
pub struct ExportScene {
    pub state: EditorState,
    pub theme: EditorThemeDefinition,
}

impl ExportScene {
    /// Freeze the currently painted state
    pub fn capture(model: &AppModel) -> Self {
        Self {
            state: model.state().clone(),
            theme: model.editor_theme(),
        }
    }
}

/// Turns a scene into encoded image bytes
pub trait Rasterizer: Send + Sync {
    fn render(&self, scene: &ExportScene, options: &RasterOptions) -> Result<Vec<u8>, String>;
}
