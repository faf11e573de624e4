//! Software rasterizer producing PNG bytes
//!
//! Paints the padded gradient canvas, the code window with its title bar,
//! and the code itself into an ARGB buffer, then encodes it with `image`.

use std::io::Cursor;
use std::path::Path;

use fontdue::{Font, FontSettings};

use super::frame::{argb_to_rgba, Frame, GlyphCache, TextPainter};
use super::layout::{CanvasLayout, DOT_COLORS, TITLE_BAR_OVERLAY, WINDOW_RADIUS};
use super::{ExportScene, RasterOptions, Rasterizer};
use crate::background::Gradient;
use crate::color::Color;
use crate::util::{expand_tabs, TAB_WIDTH};

/// Canvas color when the background descriptor can't be parsed
pub const CANVAS_FALLBACK: Color = Color::rgb(0x18, 0x18, 0x1B);

/// Advance/size ratio assumed when no font is loaded
const FALLBACK_ADVANCE_RATIO: f32 = 0.6;
const FALLBACK_ASCENT_RATIO: f32 = 0.8;

/// Filename label colors on light and dark windows
const LABEL_ON_LIGHT: u32 = 0xB3000000;
const LABEL_ON_DARK: u32 = 0xCCFFFFFF;

/// Rasterizer backed by fontdue glyphs and the `image` PNG encoder
#[derive(Default)]
pub struct PngRasterizer {
    font: Option<Font>,
}

impl std::fmt::Debug for PngRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PngRasterizer")
            .field("font", &self.font.as_ref().and_then(|font| font.name()))
            .finish()
    }
}

impl PngRasterizer {
    /// Rasterizer without glyphs: shapes and layout only
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(font: Font) -> Self {
        Self { font: Some(font) }
    }

    pub fn from_font_bytes(bytes: &[u8]) -> Result<Self, String> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| format!("Failed to parse font: {}", e))?;
        Ok(Self::with_font(font))
    }

    /// Load a TTF/OTF monospace font from disk
    pub fn from_font_file(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read font {}: {}", path.display(), e))?;
        Self::from_font_bytes(&bytes)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Glyph advance and ascent as fractions of the font size
    fn font_ratios(&self) -> (f32, f32) {
        let Some(font) = &self.font else {
            return (FALLBACK_ADVANCE_RATIO, FALLBACK_ASCENT_RATIO);
        };
        let probe = 100.0;
        let advance = font.metrics('M', probe).advance_width / probe;
        let ascent = font
            .horizontal_line_metrics(probe)
            .map_or(FALLBACK_ASCENT_RATIO, |m| m.ascent / probe);
        (advance, ascent)
    }

    /// Paint the scene into an ARGB buffer, returning it with its layout.
    ///
    /// Fails when the canvas exceeds the size limits or its buffer can't be
    /// allocated.
    pub fn paint(
        &self,
        scene: &ExportScene,
        options: &RasterOptions,
    ) -> Result<(Vec<u32>, CanvasLayout), String> {
        let (advance_ratio, ascent_ratio) = self.font_ratios();
        let layout = CanvasLayout::compute(&scene.state, options.pixel_ratio, advance_ratio);
        let scale = options.pixel_ratio.max(0.1);

        let pixels = layout.pixel_count()?;
        let mut buffer: Vec<u32> = Vec::new();
        buffer.try_reserve_exact(pixels).map_err(|e| {
            format!("canvas {}x{} could not be allocated: {}", layout.width, layout.height, e)
        })?;
        buffer.resize(pixels, 0);
        let mut frame = Frame::new(&mut buffer, layout.width, layout.height);

        let gradient = Gradient::parse(&scene.state.background).unwrap_or_else(|e| {
            tracing::warn!(target: "export", "{}; using fallback canvas color", e);
            Gradient::solid(CANVAS_FALLBACK)
        });
        frame.fill_gradient(&gradient);

        let radius = options.corner_radius.unwrap_or(WINDOW_RADIUS) * scale;
        frame.fill_rounded_rect(layout.window, radius, scene.theme.background.with_alpha(0xFF).to_argb_u32());

        // Title bar darkens only the part of the window shape it covers
        frame.set_clip(layout.title_bar);
        frame.fill_rounded_rect(layout.window, radius, TITLE_BAR_OVERLAY);
        frame.clear_clip();

        for ((cx, cy), color) in layout.dots.iter().zip(DOT_COLORS) {
            frame.fill_circle(*cx, *cy, layout.dot_radius, color);
        }

        let mut glyph_cache = GlyphCache::new();
        let font = self.font.as_ref();

        let label_color = if scene.theme.is_light() {
            LABEL_ON_LIGHT
        } else {
            LABEL_ON_DARK
        };
        {
            let mut painter = TextPainter::new(
                font,
                &mut glyph_cache,
                layout.label_font_size,
                layout.label_font_size * ascent_ratio,
                layout.label_font_size * advance_ratio,
            );
            frame.set_clip(layout.label);
            painter.draw(
                &mut frame,
                layout.label.x,
                layout.label.y,
                &scene.state.filename,
                label_color,
            );
            frame.clear_clip();
        }

        let mut painter = TextPainter::new(
            font,
            &mut glyph_cache,
            layout.font_size,
            layout.font_size * ascent_ratio,
            layout.char_width,
        );
        let code = layout.code_area;
        frame.set_clip(code);
        let foreground = scene.theme.foreground.to_argb_u32();
        let line_number_color = scene.theme.line_number_foreground.to_argb_u32();
        let text_x = code.x + layout.gutter_width;

        for (i, line) in scene.state.code.lines().enumerate() {
            let y = code.y + i as f32 * layout.line_height;
            if y >= code.bottom() {
                break;
            }
            if layout.gutter_width > 0.0 {
                let number = (i + 1).to_string();
                // Right-aligned with one cell of margin before the code
                let x = text_x - painter.measure_width(&number) - painter.char_width();
                painter.draw(&mut frame, x, y, &number, line_number_color);
            }
            painter.draw(&mut frame, text_x, y, &expand_tabs(line, TAB_WIDTH), foreground);
        }
        frame.clear_clip();

        Ok((buffer, layout))
    }
}

/// Encode an ARGB buffer as PNG
pub fn encode_png(buffer: &[u32], width: usize, height: usize) -> Result<Vec<u8>, String> {
    let rgba = argb_to_rgba(buffer)?;
    let img =
        image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(width as u32, height as u32, rgba)
            .ok_or_else(|| "failed to create image buffer".to_string())?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| format!("PNG encoding failed: {}", e))?;
    Ok(bytes)
}

impl Rasterizer for PngRasterizer {
    fn render(&self, scene: &ExportScene, options: &RasterOptions) -> Result<Vec<u8>, String> {
        let (buffer, layout) = self.paint(scene, options)?;
        tracing::debug!(
            target: "export",
            width = layout.width,
            height = layout.height,
            lines = layout.line_count,
            "canvas painted"
        );
        encode_png(&buffer, layout.width, layout.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppModel;

    fn pixel(buffer: &[u32], layout: &CanvasLayout, x: f32, y: f32) -> u32 {
        buffer[y as usize * layout.width + x as usize]
    }

    #[test]
    fn test_window_uses_theme_background() {
        let scene = ExportScene::capture(&AppModel::default());
        let (buffer, layout) = PngRasterizer::new().paint(&scene, &RasterOptions::default()).unwrap();

        // Below the title bar, away from any text
        let x = layout.window.right() - 4.0;
        let y = layout.window.bottom() - 4.0;
        assert_eq!(pixel(&buffer, &layout, x, y), 0xFF011627);
    }

    #[test]
    fn test_title_bar_is_darker() {
        let scene = ExportScene::capture(&AppModel::default());
        let (buffer, layout) = PngRasterizer::new().paint(&scene, &RasterOptions::default()).unwrap();

        let bar = pixel(&buffer, &layout, layout.window.right() - 4.0, layout.title_bar.y + 4.0);
        let body = pixel(&buffer, &layout, layout.window.right() - 4.0, layout.window.bottom() - 4.0);
        assert!((bar & 0xFF) < (body & 0xFF));
    }

    #[test]
    fn test_export_options_square_corners() {
        let scene = ExportScene::capture(&AppModel::default());
        let (buffer, layout) = PngRasterizer::new().paint(&scene, &RasterOptions::export()).unwrap();

        let corner = pixel(&buffer, &layout, layout.window.x, layout.window.bottom() - 1.0);
        assert_eq!(corner, 0xFF011627);
    }

    #[test]
    fn test_render_produces_png() {
        let scene = ExportScene::capture(&AppModel::default());
        let bytes = PngRasterizer::new()
            .render(&scene, &RasterOptions::default())
            .unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 768 + 128);
    }

    #[test]
    fn test_oversized_canvas_is_an_error() {
        let model = AppModel::with_state(crate::model::EditorState {
            padding: 40_000,
            ..Default::default()
        });
        let scene = ExportScene::capture(&model);
        let rasterizer = PngRasterizer::new();

        assert!(rasterizer.paint(&scene, &RasterOptions::export()).is_err());
        let err = rasterizer.render(&scene, &RasterOptions::export()).unwrap_err();
        assert!(err.starts_with("canvas too large"), "{}", err);
    }

    #[test]
    fn test_invalid_font_bytes() {
        assert!(PngRasterizer::from_font_bytes(b"not a font").is_err());
        assert!(!PngRasterizer::new().has_font());
    }
}
