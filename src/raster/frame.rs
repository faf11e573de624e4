//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code.

use std::collections::HashMap;

use fontdue::{Font, Metrics};

use super::Rect;
use crate::background::Gradient;

/// Rasterized glyphs keyed by character and font size bits
pub type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). The alpha value from the
/// foreground color determines the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Alpha channel of an ARGB color as 0.0..=1.0
#[inline]
fn alpha_of(color: u32) -> f32 {
    ((color >> 24) & 0xFF) as f32 / 255.0
}

/// Convert an ARGB buffer to tightly packed RGBA bytes
pub fn argb_to_rgba(buffer: &[u32]) -> Result<Vec<u8>, String> {
    let len = buffer
        .len()
        .checked_mul(4)
        .ok_or_else(|| "image too large to encode".to_string())?;
    let mut rgba = Vec::new();
    rgba.try_reserve_exact(len)
        .map_err(|e| format!("image buffer could not be allocated: {}", e))?;
    for &pixel in buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }
    Ok(rgba)
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are safely clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a clipping rectangle. All subsequent drawing operations will be
    /// constrained to this region.
    pub fn set_clip(&mut self, rect: Rect) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = ((rect.x + rect.width).max(0.0) as usize).min(self.width);
        let y1 = ((rect.y + rect.height).max(0.0) as usize).min(self.height);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    /// Remove the clipping rectangle, restoring full-frame drawing.
    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    #[inline]
    fn max_x(&self) -> usize {
        self.clip.map_or(self.width, |c| c.x1)
    }

    #[inline]
    fn max_y(&self) -> usize {
        self.clip.map_or(self.height, |c| c.y1)
    }

    #[inline]
    fn min_x(&self) -> usize {
        self.clip.map_or(0, |c| c.x0)
    }

    #[inline]
    fn min_y(&self) -> usize {
        self.clip.map_or(0, |c| c.y0)
    }

    /// Pixel bounds of `rect` after clipping: (x0, y0, x1, y1)
    fn span(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width).max(self.min_x());
        let y0 = (rect.y.max(0.0) as usize).min(self.height).max(self.min_y());
        let x1 = ((rect.x + rect.width).ceil().max(0.0) as usize).min(self.max_x());
        let y1 = ((rect.y + rect.height).ceil().max(0.0) as usize).min(self.max_y());
        (x0, y0, x1, y1)
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            self.buffer[row_start + x0..row_start + x1.max(x0)].fill(color);
        }
    }

    /// Set a single pixel (bounds-checked, respects clip rect)
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x >= self.min_x() && x < self.max_x() && y >= self.min_y() && y < self.max_y() {
            self.buffer[y * self.width + x] = color;
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend a pixel with alpha (ARGB format, alpha in high byte)
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        self.blend_pixel_coverage(x, y, color, 1.0);
    }

    /// Blend a pixel with the color's alpha scaled by `coverage`
    #[inline]
    fn blend_pixel_coverage(&mut self, x: usize, y: usize, color: u32, coverage: f32) {
        if x < self.min_x() || x >= self.max_x() || y < self.min_y() || y >= self.max_y() {
            return;
        }

        let idx = y * self.width + x;
        let alpha = alpha_of(color) * coverage;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            self.buffer[idx] = color | 0xFF000000;
            return;
        }

        self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
    }

    /// Fill a rectangle with alpha blending
    pub fn blend_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Fill the whole frame (ignoring clip) with a gradient
    pub fn fill_gradient(&mut self, gradient: &Gradient) {
        let (w, h) = (self.width as f32, self.height as f32);
        for y in 0..self.height {
            let row_start = y * self.width;
            for x in 0..self.width {
                let color = gradient.sample(x as f32 + 0.5, y as f32 + 0.5, w, h);
                self.buffer[row_start + x] = color.with_alpha(0xFF).to_argb_u32();
            }
        }
    }

    /// Fill a rectangle with rounded corners, anti-aliased along the curve.
    /// A radius of zero draws square corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32) {
        let radius = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = rounded_coverage(rect, radius, x as f32 + 0.5, y as f32 + 0.5);
                self.blend_pixel_coverage(x, y, color, coverage);
            }
        }
    }

    /// Fill an anti-aliased circle
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: u32) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::new(cx - radius - 1.0, cy - radius - 1.0, radius * 2.0 + 2.0, radius * 2.0 + 2.0);
        let (x0, y0, x1, y1) = self.span(bounds);
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
                self.blend_pixel_coverage(x, y, color, coverage);
            }
        }
    }
}

/// Fraction of the pixel centered at `(px, py)` inside a rounded rectangle
fn rounded_coverage(rect: Rect, radius: f32, px: f32, py: f32) -> f32 {
    if px < rect.x || py < rect.y || px > rect.x + rect.width || py > rect.y + rect.height {
        return 0.0;
    }
    if radius <= 0.0 {
        return 1.0;
    }
    let left = rect.x + radius;
    let right = rect.x + rect.width - radius;
    let top = rect.y + radius;
    let bottom = rect.y + rect.height - radius;

    let cx = px.clamp(left, right);
    let cy = py.clamp(top, bottom);
    if cx == px || cy == py {
        return 1.0;
    }
    let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
    (radius - dist + 0.5).clamp(0.0, 1.0)
}

/// Text rendering context wrapping an optional font and glyph cache.
///
/// Without a font, layout still advances by `char_width` per character
/// but nothing is drawn.
pub struct TextPainter<'a> {
    font: Option<&'a Font>,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
    char_width: f32,
}

impl<'a> TextPainter<'a> {
    pub fn new(
        font: Option<&'a Font>,
        glyph_cache: &'a mut GlyphCache,
        font_size: f32,
        ascent: f32,
        char_width: f32,
    ) -> Self {
        Self {
            font,
            glyph_cache,
            font_size,
            ascent,
            char_width,
        }
    }

    /// Get the character width for monospace layout calculations
    #[inline]
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    /// Get the number of cached glyphs
    #[inline]
    pub fn glyph_cache_size(&self) -> usize {
        self.glyph_cache.len()
    }

    /// Draw text with its top-left corner at `(x, y)`.
    ///
    /// Characters are placed on the monospace grid. The color's alpha
    /// multiplies glyph coverage. Returns the x position after the text.
    pub fn draw(&mut self, frame: &mut Frame, x: f32, y: f32, text: &str, color: u32) -> f32 {
        let mut current_x = x;
        let Some(font) = self.font else {
            return current_x + text.chars().count() as f32 * self.char_width;
        };
        let baseline = y + self.ascent;
        let color_alpha = alpha_of(color);
        let font_size = self.font_size;

        for ch in text.chars() {
            let key = (ch, font_size.to_bits());
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| font.rasterize(ch, font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let Some(&alpha) = bitmap.get(bitmap_y * metrics.width + bitmap_x) else {
                        continue;
                    };
                    if alpha == 0 {
                        continue;
                    }
                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px >= 0 && py >= 0 {
                        let coverage = alpha as f32 / 255.0;
                        frame.blend_pixel_coverage(
                            px as usize,
                            py as usize,
                            color | 0xFF000000,
                            coverage * color_alpha,
                        );
                    }
                }
            }

            current_x += self.char_width;
        }
        current_x
    }

    /// Measure text width in pixels
    pub fn measure_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}
