//! Draws a `GameState` through the renderer primitives

use glam::Vec2;

use super::wireframe::{Pose, asteroid_model, draw_wireframe, fill_circle, ship_model};
use super::{RenderError, Renderer};
use crate::consts::{ASTEROID_VERTICES, SHIP_SCALE};
use crate::sim::{Color, Field, GameState};

/// Visual options for the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    /// Fill asteroid silhouettes on top of their outline
    pub fill_asteroids: bool,
    pub show_score: bool,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            fill_asteroids: true,
            show_score: true,
        }
    }
}

/// Folds points into the field before forwarding them, so fills crossing an
/// edge reappear on the opposite side. Lines and text pass through.
struct WrapPoints<'a, R: Renderer + ?Sized> {
    inner: &'a mut R,
    field: Field,
}

impl<R: Renderer + ?Sized> Renderer for WrapPoints<'_, R> {
    fn draw_point(&mut self, x: i32, y: i32, color: Color) -> Result<(), RenderError> {
        let p = self.field.wrap(Vec2::new(x as f32, y as f32));
        self.inner
            .draw_point(p.x.round() as i32, p.y.round() as i32, color)
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<(), RenderError> {
        self.inner.draw_line(x1, y1, x2, y2, color)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), RenderError> {
        self.inner.draw_text(x, y, text)
    }
}

/// Draw asteroids, bullets, the ship and the HUD
pub fn draw_scene<R: Renderer + ?Sized>(
    renderer: &mut R,
    state: &GameState,
    style: &SceneStyle,
) -> Result<(), RenderError> {
    let mut out = WrapPoints {
        inner: renderer,
        field: state.field,
    };

    let rock_model = asteroid_model(ASTEROID_VERTICES);
    for rock in state.active_asteroids() {
        let pose = Pose::new(rock.pos, rock.angle, rock.radius);
        draw_wireframe(&mut out, &rock_model, &pose, rock.color)?;
        if style.fill_asteroids {
            fill_circle(&mut out, rock.pos, rock.radius, rock.color)?;
        }
    }

    for bullet in state.bullets.iter_active() {
        out.draw_point(
            bullet.pos.x.round() as i32,
            bullet.pos.y.round() as i32,
            bullet.color,
        )?;
    }

    let ship = &state.ship.body;
    let pose = Pose::new(ship.pos, ship.angle, SHIP_SCALE);
    draw_wireframe(&mut out, &ship_model(), &pose, ship.color)?;

    if style.show_score {
        out.draw_text(8, 8, &format!("SCORE: {}", state.score))?;
    }
    if !state.ship.is_alive() {
        let center = state.field.center();
        out.draw_text(center.x as i32 - 40, center.y as i32, "GAME OVER")?;
    }

    Ok(())
}
