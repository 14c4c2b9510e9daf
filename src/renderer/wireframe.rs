//! Wireframe transform pipeline
//!
//! Model-space polygons are rotated, scaled and translated (in that order)
//! into world space, then drawn as a closed outline: vertex `i` connects to
//! vertex `(i + 1) % n`, so an n-vertex model always yields n edges.

use glam::Vec2;
use std::f32::consts::TAU;

use super::{RenderError, Renderer};
use crate::sim::Color;
use crate::sim::geometry::{point_in_circle, rotate, scale, translate};

/// Placement of a model in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    /// Rotation (radians)
    pub angle: f32,
    /// Uniform scale
    pub scale: f32,
}

impl Pose {
    pub fn new(pos: Vec2, angle: f32, scale: f32) -> Self {
        Self { pos, angle, scale }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, 1.0)
    }
}

/// Rotate, then scale, then translate every model point
pub fn transform_model(model: &[Vec2], pose: &Pose) -> Vec<Vec2> {
    model
        .iter()
        .map(|&p| translate(scale(rotate(p, pose.angle), pose.scale), pose.pos))
        .collect()
}

/// Edges of the closed polygon through `points`, in draw order
pub fn closed_edges(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Transform a model and draw it as a closed outline, returning the edge count
pub fn draw_wireframe<R: Renderer + ?Sized>(
    renderer: &mut R,
    model: &[Vec2],
    pose: &Pose,
    color: Color,
) -> Result<usize, RenderError> {
    let points = transform_model(model, pose);
    let mut edges = 0;
    for (a, b) in closed_edges(&points) {
        renderer.draw_line(
            a.x.round() as i32,
            a.y.round() as i32,
            b.x.round() as i32,
            b.y.round() as i32,
            color,
        )?;
        edges += 1;
    }
    Ok(edges)
}

/// Rasterize a filled disc by scanning its bounding box
pub fn fill_circle<R: Renderer + ?Sized>(
    renderer: &mut R,
    center: Vec2,
    radius: f32,
    color: Color,
) -> Result<usize, RenderError> {
    if radius <= 0.0 {
        return Ok(0);
    }

    let x0 = (center.x - radius).floor() as i32;
    let x1 = (center.x + radius).ceil() as i32;
    let y0 = (center.y - radius).floor() as i32;
    let y1 = (center.y + radius).ceil() as i32;

    let mut filled = 0;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if point_in_circle(Vec2::new(x as f32, y as f32), center, radius) {
                renderer.draw_point(x, y, color)?;
                filled += 1;
            }
        }
    }
    Ok(filled)
}

/// Player ship, nose pointing up
pub fn ship_model() -> [Vec2; 3] {
    [
        Vec2::new(0.0, -11.0),
        Vec2::new(-5.0, 5.0),
        Vec2::new(5.0, 5.0),
    ]
}

/// Unit-radius polygon used for asteroid outlines (drawn at scale = radius)
pub fn asteroid_model(vertices: usize) -> Vec<Vec2> {
    (0..vertices)
        .map(|i| {
            let theta = i as f32 / vertices as f32 * TAU;
            Vec2::new(theta.sin(), theta.cos())
        })
        .collect()
}
