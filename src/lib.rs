//! Wireroids - A wrap-around asteroids shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, entity lifecycle)
//! - `renderer`: Draw-call contract, wireframe pipeline and a headless console
//! - `platform`: Input events and the frame loop driver
//! - `settings`: Runtime tuning

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Console dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 450.0;
    pub const WINDOW_TITLE: &str = "Asteroids";

    /// Ship thrust acceleration (pixels/s²)
    pub const SHIP_ACCELERATION: f32 = 40.0;
    /// Ship rotation per key press (radians/s, scaled by dt)
    pub const SHIP_ROTATION_SPEED: f32 = 5.0;
    /// Ship wireframe scale and collision size
    pub const SHIP_SCALE: f32 = 1.0;

    pub const BULLET_SPEED: f32 = 50.0;
    /// Bullets are tiny points; radius only matters for rendering
    pub const BULLET_RADIUS: f32 = 1.0;
    /// Health removed from an asteroid per bullet hit
    pub const BULLET_DAMAGE: u32 = 100;
    /// Minimum seconds between shots (0 = unbounded)
    pub const FIRE_COOLDOWN: f32 = 0.0;

    /// Asteroid health per unit of radius
    pub const HEALTH_PER_RADIUS: i32 = 10;
    /// Asteroids larger than this split in two when destroyed
    pub const SPLIT_THRESHOLD: f32 = 4.0;
    /// Offset of each split child from the parent centre
    pub const SPLIT_OFFSET: f32 = 2.0;
    /// Score awarded per destroyed asteroid
    pub const DESTROY_BONUS: u64 = 20;
    /// Passive asteroid rotation (radians/s)
    pub const ASTEROID_SPIN: f32 = 0.5;

    /// Below this centre distance a collision normal is undefined
    pub const DEGENERATE_DISTANCE: f32 = 1.0e-4;
    /// Edge count of the asteroid outline polygon
    pub const ASTEROID_VERTICES: usize = 20;
}

/// Fold a heading into [-π, π) so spinning bodies keep full f32 precision
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let folded = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU itself
    if folded >= PI { -PI } else { folded }
}

/// Unit vector a body with the given angle points along.
///
/// Angle 0 faces "up" the screen (negative y), positive angles turn clockwise.
#[inline]
pub fn facing_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle() {
        // 3π lands on the seam
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!((normalize_angle(2.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert_eq!(normalize_angle(PI), -PI);
        assert!((-PI..PI).contains(&normalize_angle(-1000.0)));
    }

    #[test]
    fn test_facing_direction() {
        let up = facing_direction(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y + 1.0).abs() < 1e-6);

        let right = facing_direction(FRAC_PI_2);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
    }
}
