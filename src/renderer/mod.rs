//! Rendering boundary
//!
//! The simulation draws through three primitives only: points, lines and
//! text. Anything that owns pixels (a window, a GPU surface, the headless
//! console here) implements `Renderer`; the frame loop additionally needs
//! `Surface` to clear and present.

pub mod console;
pub mod scene;
pub mod wireframe;

pub use console::{Console, ConsoleError};
pub use scene::{SceneStyle, draw_scene};
pub use wireframe::{Pose, draw_wireframe, fill_circle, transform_model};

use std::fmt;

use crate::sim::Color;

/// Failure reported by a rendering backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The output surface went away (window closed, device lost)
    SurfaceLost,
    /// Any other backend failure, with the backend's message
    Backend(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "render surface lost"),
            RenderError::Backend(msg) => write!(f, "render backend error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Draw primitives consumed by the simulation's renderer-facing code
pub trait Renderer {
    fn draw_point(&mut self, x: i32, y: i32, color: Color) -> Result<(), RenderError>;

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<(), RenderError>;

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), RenderError>;
}

/// A renderer that can also start and finish frames
pub trait Surface: Renderer {
    fn clear(&mut self);

    fn present(&mut self) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_point(&mut self, x: i32, y: i32, color: Color) -> Result<(), RenderError> {
        (**self).draw_point(x, y, color)
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<(), RenderError> {
        (**self).draw_line(x1, y1, x2, y2, color)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), RenderError> {
        (**self).draw_text(x, y, text)
    }
}
