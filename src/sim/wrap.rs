//! Toroidal play field
//!
//! Bodies leaving one edge re-enter at the opposite edge. The fold is a
//! single add/subtract of the extent, so it assumes nothing travels more
//! than one field width in a frame.

use glam::Vec2;

/// Fold a coordinate into `[0, extent)` with one step of wraparound
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        let folded = value + extent;
        // -ε + extent rounds to extent in f32
        if folded >= extent { 0.0 } else { folded }
    } else if value >= extent {
        value - extent
    } else {
        value
    }
}

/// Dimensions of the play field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fold a position into `[0, width) × [0, height)`
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            wrap_coordinate(pos.x, self.width),
            wrap_coordinate(pos.y, self.height),
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a bullet at `pos` is still on the field.
    ///
    /// The lower bound is 1 rather than 0: a bullet sitting on the first
    /// row or column is already considered gone.
    pub fn holds_bullet(&self, pos: Vec2) -> bool {
        pos.x >= 1.0 && pos.x < self.width && pos.y >= 1.0 && pos.y < self.height
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
    }
}
