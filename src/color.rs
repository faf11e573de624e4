//! Colors and contrast
//!
//! Hex parsing, sRGB relative luminance and the black/white foreground
//! choice used to keep code readable on any theme background.

use std::fmt;

/// Luminance above which a background counts as "light"
pub const LIGHT_BACKGROUND_THRESHOLD: f64 = 0.5;

/// Alpha applied to the foreground color for line numbers (0x99 ≈ 60%)
pub const LINE_NUMBER_ALPHA: u8 = 0x99;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for the pixel buffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RGB", "#RRGGBB" or "#RRGGBBAA" (the `#` is optional)
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| format!("Invalid color {}: {}", s, e))
        };
        match s.len() {
            3 => {
                let mut expanded = String::with_capacity(6);
                for c in s.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                Color::from_hex(&expanded)
            }
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as lowercase "#rrggbb", or "#rrggbbaa" when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Relative luminance of this color (alpha is ignored)
    pub fn luminance(&self) -> f64 {
        relative_luminance(*self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Gamma-expand one 8-bit sRGB channel to linear light
fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB relative luminance in `[0, 1]`
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Relative luminance of a hex color string
pub fn luminance_of_hex(hex: &str) -> Result<f64, String> {
    Color::from_hex(hex).map(relative_luminance)
}

/// Whether text on this background should be dark
pub fn is_light(background: Color) -> bool {
    relative_luminance(background) > LIGHT_BACKGROUND_THRESHOLD
}

/// Pure black on light backgrounds, pure white otherwise
pub fn contrast_foreground(background: Color) -> Color {
    if is_light(background) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}
