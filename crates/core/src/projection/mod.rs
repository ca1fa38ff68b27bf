//! Stylised perspective projection from simulation space to screen pixels.

/// Depth at or below which a star is considered to have passed the viewer.
/// Nothing is ever projected closer than this.
pub const NEAR_PLANE: f32 = 0.8;

/// Pixel dimensions of the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A viewport with no drawable area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// Maps a simulation-space point to screen coordinates.
///
/// Lateral offsets are divided by depth and scaled by `fov`, so a larger
/// field of view exaggerates parallax. Callers guarantee `z > NEAR_PLANE`.
pub fn project(x: f32, y: f32, z: f32, viewport: Viewport, fov: f32) -> (f32, f32) {
    let (cx, cy) = viewport.center();
    let inv_z = 1.0 / z;
    (cx + x * inv_z * fov, cy + y * inv_z * fov)
}
