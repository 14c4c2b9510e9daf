//! Headless software console
//!
//! A fixed-size RGBA framebuffer with a window title, standing in for a real
//! window. Lines use Bresenham rasterization; text is recorded as runs since
//! glyph rendering belongs to the presenting backend.

use bytemuck::{Pod, Zeroable};
use std::fmt;

use super::{RenderError, Renderer, Surface};
use crate::sim::Color;

/// One framebuffer pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0xFF };

    pub const fn from_color(color: Color) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 0xFF,
        }
    }
}

/// A string drawn at a screen position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Console construction failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// Width or height is zero
    ZeroSize { width: u32, height: u32 },
    /// Larger than the biggest supported display
    TooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
    EmptyTitle,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::ZeroSize { width, height } => {
                write!(f, "console size {}x{} has a zero dimension", width, height)
            }
            ConsoleError::TooLarge {
                width,
                height,
                max_width,
                max_height,
            } => write!(
                f,
                "console size {}x{} too large (max {}x{})",
                width, height, max_width, max_height
            ),
            ConsoleError::EmptyTitle => write!(f, "console title is empty"),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// Headless framebuffer console
pub struct Console {
    width: u32,
    height: u32,
    title: String,
    pixels: Vec<Pixel>,
    text: Vec<TextRun>,
    frames_presented: u64,
}

impl Console {
    pub const MAX_WIDTH: u32 = 3840;
    pub const MAX_HEIGHT: u32 = 2160;

    pub fn new(width: u32, height: u32, title: &str) -> Result<Self, ConsoleError> {
        if width == 0 || height == 0 {
            return Err(ConsoleError::ZeroSize { width, height });
        }
        if width > Self::MAX_WIDTH || height > Self::MAX_HEIGHT {
            return Err(ConsoleError::TooLarge {
                width,
                height,
                max_width: Self::MAX_WIDTH,
                max_height: Self::MAX_HEIGHT,
            });
        }
        if title.trim().is_empty() {
            return Err(ConsoleError::EmptyTitle);
        }

        log::info!("Console '{}' created ({}x{})", title, width, height);
        Ok(Self {
            width,
            height,
            title: title.to_string(),
            pixels: vec![Pixel::BLACK; (width * height) as usize],
            text: Vec::new(),
            frames_presented: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Number of pixels that differ from the background
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != Pixel::BLACK).count()
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    fn plot(&mut self, x: i32, y: i32, color: Color) {
        // Off-surface pixels are clipped
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = Pixel::from_color(color);
        }
    }
}

impl Renderer for Console {
    fn draw_point(&mut self, x: i32, y: i32, color: Color) -> Result<(), RenderError> {
        self.plot(x, y, color);
        Ok(())
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<(), RenderError> {
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.plot(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), RenderError> {
        if self.index(x, y).is_none() {
            log::warn!("Text '{}' anchored off-surface at ({}, {})", text, x, y);
        }
        self.text.push(TextRun {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }
}

impl Surface for Console {
    fn clear(&mut self) {
        self.pixels.fill(Pixel::BLACK);
        self.text.clear();
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.frames_presented += 1;
        log::trace!(
            "Presented frame {} ({} lit pixels)",
            self.frames_presented,
            self.lit_pixels()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_rejects_bad_sizes() {
        assert_eq!(
            Console::new(0, 450, "Asteroids").err(),
            Some(ConsoleError::ZeroSize { width: 0, height: 450 })
        );
        assert!(matches!(
            Console::new(10_000, 450, "Asteroids"),
            Err(ConsoleError::TooLarge { .. })
        ));
        assert_eq!(Console::new(80, 40, "  ").err(), Some(ConsoleError::EmptyTitle));
    }

    #[test]
    fn test_line_endpoints_and_clipping() {
        let mut console = Console::new(32, 32, "test").expect("console");
        console.draw_line(2, 3, 20, 9, Color::WHITE).expect("line");
        assert_eq!(console.pixel(2, 3), Some(Pixel::from_color(Color::WHITE)));
        assert_eq!(console.pixel(20, 9), Some(Pixel::from_color(Color::WHITE)));

        // Partly off-surface lines are clipped, not errors
        console.draw_line(-10, 5, 40, 5, Color::YELLOW).expect("clipped line");
        assert_eq!(console.pixel(0, 5), Some(Pixel::from_color(Color::YELLOW)));
        assert_eq!(console.pixel(31, 5), Some(Pixel::from_color(Color::YELLOW)));
    }

    #[test]
    fn test_clear_and_present() {
        let mut console = Console::new(16, 16, "test").expect("console");
        console.draw_point(1, 1, Color::WHITE).expect("point");
        console.draw_text(0, 0, "SCORE: 0").expect("text");
        assert_eq!(console.lit_pixels(), 1);
        assert_eq!(console.text_runs().len(), 1);

        console.present().expect("present");
        console.clear();
        assert_eq!(console.lit_pixels(), 0);
        assert!(console.text_runs().is_empty());
        assert_eq!(console.frames_presented(), 1);
    }

    #[test]
    fn test_byte_view_is_rgba() {
        let mut console = Console::new(2, 1, "test").expect("console");
        console.draw_point(1, 0, Color::rgb(1, 2, 3)).expect("point");
        assert_eq!(console.as_bytes(), &[0, 0, 0, 0xFF, 1, 2, 3, 0xFF]);
    }
}
