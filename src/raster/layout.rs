//! Geometry of the export target region
//!
//! All constants are logical pixels; [`CanvasLayout::compute`] multiplies
//! them by the pixel ratio.

use super::Rect;
use crate::model::EditorState;

/// Code window width
pub const WINDOW_WIDTH: f32 = 768.0;
/// Minimum height of the padded canvas
pub const CANVAS_MIN_HEIGHT: f32 = 520.0;
/// Minimum height of the code area below the title bar
pub const EDITOR_MIN_HEIGHT: f32 = 420.0;
/// Corner radius of the code window when not suppressed
pub const WINDOW_RADIUS: f32 = 12.0;

const TITLE_BAR_PADDING: f32 = 16.0;
const DOT_DIAMETER: f32 = 14.0;
const DOT_GAP: f32 = 8.0;
const LABEL_MARGIN: f32 = 16.0;
pub const LABEL_FONT_SIZE: f32 = 12.0;
const CODE_PADDING_Y: f32 = 24.0;
const CODE_INSET_X: f32 = 16.0;
const LINE_HEIGHT_FACTOR: f32 = 1.35;

/// Traffic-light dot colors, left to right
pub const DOT_COLORS: [u32; 3] = [0xFFFF5F56, 0xFFFFBD2E, 0xFF27C93F];

/// Title bar overlay (black at 30%)
pub const TITLE_BAR_OVERLAY: u32 = 0x4D000000;

/// Largest canvas side in physical pixels
pub const MAX_CANVAS_SIDE: usize = 16_384;
/// Largest canvas area in physical pixels
pub const MAX_CANVAS_PIXELS: usize = 268_435_456;

/// Physical-pixel positions of everything the rasterizer paints
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLayout {
    pub width: usize,
    pub height: usize,
    pub window: Rect,
    pub title_bar: Rect,
    /// Centers of the three dots
    pub dots: [(f32, f32); 3],
    pub dot_radius: f32,
    /// Top-left of the filename label and the width it may use
    pub label: Rect,
    pub label_font_size: f32,
    /// Region code (and gutter) is drawn in
    pub code_area: Rect,
    pub gutter_width: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub char_width: f32,
    pub line_count: usize,
}

impl CanvasLayout {
    /// Lay out `state` at `scale` physical pixels per logical pixel.
    ///
    /// `advance_ratio` is the glyph advance divided by font size for the
    /// monospace font in use. Negative padding lays out as zero and font
    /// sizes below one as one.
    pub fn compute(state: &EditorState, scale: f32, advance_ratio: f32) -> Self {
        let scale = scale.max(0.1);
        let font_size = state.font_size.max(1) as f32 * scale;
        let line_height = (font_size * LINE_HEIGHT_FACTOR).ceil();
        let char_width = font_size * advance_ratio;
        let padding = state.padding.max(0) as f32 * scale;

        let line_count = state.code.lines().count().max(1);
        let gutter_width = if state.show_line_numbers {
            let digits = line_count.to_string().len().max(2);
            (digits + 2) as f32 * char_width
        } else {
            0.0
        };

        let title_height = (TITLE_BAR_PADDING * 2.0 + DOT_DIAMETER) * scale;
        let code_height = (EDITOR_MIN_HEIGHT * scale).max(line_count as f32 * line_height);
        let window_width = WINDOW_WIDTH * scale;
        let window_height = title_height + CODE_PADDING_Y * 2.0 * scale + code_height;

        let width = (window_width + padding * 2.0).ceil();
        let height = (CANVAS_MIN_HEIGHT * scale)
            .max(window_height + padding * 2.0)
            .ceil();

        // Window is centered vertically, as in a flex container
        let window = Rect::new(
            padding,
            ((height - window_height) / 2.0).floor(),
            window_width,
            window_height,
        );
        let title_bar = Rect::new(window.x, window.y, window.width, title_height);

        let dot_radius = DOT_DIAMETER * scale / 2.0;
        let dot_y = title_bar.y + title_height / 2.0;
        let first_dot_x = window.x + TITLE_BAR_PADDING * scale + dot_radius;
        let step = (DOT_DIAMETER + DOT_GAP) * scale;
        let dots = [
            (first_dot_x, dot_y),
            (first_dot_x + step, dot_y),
            (first_dot_x + step * 2.0, dot_y),
        ];

        let label_font_size = LABEL_FONT_SIZE * scale;
        let label_x = dots[2].0 + dot_radius + (DOT_GAP + LABEL_MARGIN) * scale;
        let label = Rect::new(
            label_x,
            dot_y - label_font_size / 2.0,
            window_width * 0.4,
            label_font_size * LINE_HEIGHT_FACTOR,
        );

        let code_area = Rect::new(
            window.x + CODE_INSET_X * scale,
            title_bar.y + title_height + CODE_PADDING_Y * scale,
            window_width - CODE_INSET_X * 2.0 * scale,
            code_height,
        );

        Self {
            width: width as usize,
            height: height as usize,
            window,
            title_bar,
            dots,
            dot_radius,
            label,
            label_font_size,
            code_area,
            gutter_width,
            font_size,
            line_height,
            char_width,
            line_count,
        }
    }

    /// Number of pixels in the canvas, or an error when it exceeds the
    /// paintable limits
    pub fn pixel_count(&self) -> Result<usize, String> {
        let too_large = || format!("canvas too large: {}x{}", self.width, self.height);
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(too_large());
        }
        self.width
            .checked_mul(self.height)
            .filter(|&pixels| pixels <= MAX_CANVAS_PIXELS)
            .ok_or_else(too_large)
    }
}
