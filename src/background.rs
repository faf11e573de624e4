//! Canvas backgrounds
//!
//! The fixed, ordered list of gradient descriptors the canvas rotates
//! through, and a small parser turning a descriptor into something the
//! rasterizer can sample.

use crate::color::Color;

/// Background descriptors, in rotation order
pub const BACKGROUNDS: &[&str] = &[
    "linear-gradient(135deg, #71717a 0%, #3f3f46 100%)",
    "linear-gradient(135deg, #ee9ca7 0%, #ffdde1 100%)",
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #C0FF00 0%, #22c55e 100%)",
    "linear-gradient(to right, #833ab4, #fd1d1d, #fcb045)",
    "linear-gradient(to right, #00c6ff, #0072ff)",
    "linear-gradient(to right, #f8ff00, #3ad59f)",
];

/// Position of `descriptor` in [`BACKGROUNDS`]
pub fn background_index(descriptor: &str) -> Option<usize> {
    BACKGROUNDS.iter().position(|b| *b == descriptor)
}

/// The descriptor after `current`, wrapping from the last back to the first.
/// A descriptor not in the list rotates to the first entry.
pub fn next_background(current: &str) -> &'static str {
    let next = background_index(current).map_or(0, |i| (i + 1) % BACKGROUNDS.len());
    BACKGROUNDS[next]
}

/// Descriptor at `index`, wrapping around the list
pub fn background_at(index: usize) -> &'static str {
    BACKGROUNDS[index % BACKGROUNDS.len()]
}

/// A color stop at a position in `[0, 1]` along the gradient line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Color,
    pub position: f32,
}

/// A parsed linear gradient.
///
/// `angle_deg` follows CSS: 0deg points up, 90deg points right, and the
/// default when no direction is given is 180deg (top to bottom).
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub angle_deg: f32,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    /// A single flat color
    pub fn solid(color: Color) -> Self {
        Self {
            angle_deg: 180.0,
            stops: vec![
                ColorStop {
                    color,
                    position: 0.0,
                },
                ColorStop {
                    color,
                    position: 1.0,
                },
            ],
        }
    }

    /// Parse a `linear-gradient(...)` descriptor or a plain hex color
    pub fn parse(descriptor: &str) -> Result<Self, String> {
        let descriptor = descriptor.trim();
        let Some(body) = descriptor
            .strip_prefix("linear-gradient(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Color::from_hex(descriptor)
                .map(Gradient::solid)
                .map_err(|_| format!("Unsupported background: {}", descriptor));
        };

        let mut parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.is_empty() {
            return Err(format!("Empty gradient: {}", descriptor));
        }

        let angle_deg = match parse_direction(parts[0]) {
            Some(angle) => {
                parts.remove(0);
                angle
            }
            None => 180.0,
        };

        if parts.len() < 2 {
            return Err(format!("Gradient needs at least two stops: {}", descriptor));
        }

        let mut raw: Vec<(Color, Option<f32>)> = Vec::with_capacity(parts.len());
        for part in parts {
            let mut tokens = part.split_whitespace();
            let color = tokens
                .next()
                .ok_or_else(|| format!("Empty color stop in {}", descriptor))
                .and_then(Color::from_hex)?;
            let position = match tokens.next() {
                Some(pos) => {
                    let pct = pos
                        .strip_suffix('%')
                        .and_then(|p| p.parse::<f32>().ok())
                        .ok_or_else(|| format!("Invalid stop position '{}'", pos))?;
                    Some(pct / 100.0)
                }
                None => None,
            };
            raw.push((color, position));
        }

        // Stops without a position are spread evenly along the line
        let last = (raw.len() - 1) as f32;
        let stops = raw
            .into_iter()
            .enumerate()
            .map(|(i, (color, position))| ColorStop {
                color,
                position: position.unwrap_or(i as f32 / last),
            })
            .collect();

        Ok(Self { angle_deg, stops })
    }

    /// Color at parameter `t` along the gradient line
    pub fn color_at(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let Some(first) = self.stops.first() else {
            return Color::BLACK;
        };
        if t <= first.position {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                let local = if span > 0.0 {
                    (t - a.position) / span
                } else {
                    1.0
                };
                return lerp(a.color, b.color, local);
            }
        }
        self.stops.last().map_or(first.color, |s| s.color)
    }

    /// Color of pixel `(x, y)` in a `width` x `height` box
    pub fn sample(&self, x: f32, y: f32, width: f32, height: f32) -> Color {
        let (dx, dy) = self.direction();
        let length = (width * dx).abs() + (height * dy).abs();
        if length <= f32::EPSILON {
            return self.color_at(0.0);
        }
        let rel_x = x - width / 2.0;
        let rel_y = y - height / 2.0;
        let t = (rel_x * dx + rel_y * dy) / length + 0.5;
        self.color_at(t)
    }

    /// Unit vector of the gradient line in screen space (y grows downward)
    fn direction(&self) -> (f32, f32) {
        let rad = self.angle_deg.to_radians();
        (rad.sin(), -rad.cos())
    }
}

fn parse_direction(token: &str) -> Option<f32> {
    if let Some(deg) = token.strip_suffix("deg") {
        return deg.trim().parse::<f32>().ok();
    }
    match token {
        "to top" => Some(0.0),
        "to right" => Some(90.0),
        "to bottom" => Some(180.0),
        "to left" => Some(270.0),
        "to top right" | "to right top" => Some(45.0),
        "to bottom right" | "to right bottom" => Some(135.0),
        "to bottom left" | "to left bottom" => Some(225.0),
        "to top left" | "to left top" => Some(315.0),
        _ => None,
    }
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}
