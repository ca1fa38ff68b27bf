//! Drawing-surface abstraction and the per-star styling used to paint a frame.
//!
//! The renderer never owns a backend. Hosts hand it anything implementing
//! [`DrawingSurface`]; the crate ships a command recorder and an SVG writer.

mod recording;
mod svg;

use serde::{Deserialize, Serialize};

use crate::{config::StarfieldConfig, star::Star};

pub use recording::{DrawCommand, RecordingSurface};
pub use svg::SvgSurface;

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer pixel rectangle describing the area being painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Immediate-mode 2D target the starfield is painted onto.
pub trait DrawingSurface {
    fn set_antialiasing(&mut self, enabled: bool);

    fn clear(&mut self, color: Color);

    fn draw_line(&mut self, color: Color, thickness: f32, from: Point, to: Point);

    /// Fills a circle of the given `diameter` centred on `center`.
    fn fill_circle(&mut self, color: Color, center: Point, diameter: f32);
}

/// Size and opacity derived from a star's depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarStyle {
    pub diameter: f32,
    pub alpha: u8,
}

impl StarStyle {
    /// Interpolates size and alpha between the configured bounds.
    ///
    /// The depth fraction is `1 - z / max_depth`, so stars brighten and grow
    /// as they approach. Inverted or out-of-range bounds are absorbed by the
    /// one-pixel size floor and the alpha clamp.
    pub fn for_depth(z: f32, config: &StarfieldConfig) -> Self {
        let t = 1.0 - z / config.max_depth;

        let diameter = (config.star_size_min
            + t * (config.star_size_max - config.star_size_min))
            .max(1.0);

        let alpha_min = config.star_alpha_min as f32;
        let alpha_max = config.star_alpha_max as f32;
        let alpha = (alpha_min + t * (alpha_max - alpha_min)).clamp(0.0, 255.0) as u8;

        Self { diameter, alpha }
    }
}

/// Paints a full frame: clear, then a trail and a dot per star.
pub fn draw_stars<S>(surface: &mut S, stars: &[Star], config: &StarfieldConfig)
where
    S: DrawingSurface + ?Sized,
{
    surface.set_antialiasing(config.smooth);
    surface.clear(config.background_color);

    for star in stars {
        let style = StarStyle::for_depth(star.z, config);
        let color = Color::WHITE.with_alpha(style.alpha);
        let position = Point::new(star.px, star.py);

        if config.draw_trails {
            surface.draw_line(
                color,
                config.trail_thickness,
                Point::new(star.prev_px, star.prev_py),
                position,
            );
        }

        surface.fill_circle(color, position, style.diameter);
    }
}
