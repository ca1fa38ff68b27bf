use crate::projection::{self, Viewport};

/// One particle of the starfield.
///
/// `x`/`y` are simulation-space lateral offsets, `z` is depth. `px`/`py` hold
/// the projected screen position and `prev_px`/`prev_py` the position at the
/// start of the current tick, which together form the trail segment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub px: f32,
    pub py: f32,
    pub prev_px: f32,
    pub prev_py: f32,
}

impl Star {
    /// Places the star at the viewport centre with a zero-length trail.
    pub(crate) fn reset_to_center(&mut self, viewport: Viewport) {
        let (cx, cy) = viewport.center();
        self.px = cx;
        self.py = cy;
        self.prev_px = cx;
        self.prev_py = cy;
    }

    /// Remembers the current screen position as the trail origin.
    pub(crate) fn begin_tick(&mut self) {
        self.prev_px = self.px;
        self.prev_py = self.py;
    }

    /// Whether the star's projected position lies more than `margin` pixels
    /// outside the viewport on either axis.
    pub fn is_off_screen(&self, viewport: Viewport, margin: f32) -> bool {
        let width = viewport.width as f32;
        let height = viewport.height as f32;
        self.px < -margin
            || self.px > width + margin
            || self.py < -margin
            || self.py > height + margin
    }

    /// Length of the trail drawn for this star in the current frame.
    pub fn trail_length(&self) -> f32 {
        (self.px - self.prev_px).hypot(self.py - self.prev_py)
    }

    pub fn project(&mut self, viewport: Viewport, fov: f32) {
        let (px, py) = projection::project(self.x, self.y, self.z, viewport, fov);
        self.px = px;
        self.py = py;
    }
}
