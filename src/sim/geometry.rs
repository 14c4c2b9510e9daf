//! Point transforms and circle tests
//!
//! Pure helpers shared by the collision engine and the wireframe pipeline.

use glam::Vec2;

/// Rotate a point about the origin using the standard rotation matrix
#[inline]
pub fn rotate(p: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Uniform scale about the origin
#[inline]
pub fn scale(p: Vec2, s: f32) -> Vec2 {
    p * s
}

#[inline]
pub fn translate(p: Vec2, offset: Vec2) -> Vec2 {
    p + offset
}

/// Strict point-in-circle test: a point on the boundary is outside
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Circle overlap test: touching circles overlap
#[inline]
pub fn circles_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    c1.distance_squared(c2) <= reach * reach
}
