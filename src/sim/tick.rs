//! Simulation step
//!
//! Advances the game by one frame of `dt` seconds. `dt` is used as given for
//! every kinematic and collision computation; there is no fixed-step
//! accumulator, so very large frames can tunnel.

use glam::Vec2;

use super::collision::{asteroid_containing, resolve_contact_velocities, separate_overlaps, sweep_bullets};
use super::lifecycle;
use super::state::{GameEvent, GameState, ShipState};
use crate::{facing_direction, normalize_angle};

/// Input gathered for a single frame: how many key-downs of each kind
/// arrived since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub rotate_left: u32,
    pub rotate_right: u32,
    pub thrust: u32,
    pub fire: u32,
    /// Mouse-down position, if any
    pub click: Option<Vec2>,
}

impl TickInput {
    pub fn is_idle(&self) -> bool {
        self.rotate_left == 0
            && self.rotate_right == 0
            && self.thrust == 0
            && self.fire == 0
            && self.click.is_none()
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.frame += 1;
    let was_clear = state.is_field_clear();

    state.ship.fire_cooldown = (state.ship.fire_cooldown - dt).max(0.0);
    if state.ship.is_alive() {
        apply_controls(state, input, dt);
    }
    if let Some(pos) = input.click {
        log::debug!("Mouse down at ({}, {})", pos.x, pos.y);
        state.last_click = Some(pos);
        state.events.push(GameEvent::Clicked { pos });
    }

    integrate(state, dt);

    // --- POINT-IN-CIRCLE ---
    if state.ship.is_alive() {
        if let Some(rock) = asteroid_containing(&state.asteroids, state.ship.body.pos) {
            log::info!("Ship destroyed by asteroid {} on frame {}", rock.id, state.frame);
            state.ship.state = ShipState::Dead;
            state.events.push(GameEvent::ShipDestroyed);
        }
    }

    let sweep = sweep_bullets(
        &mut state.bullets,
        &mut state.asteroids,
        state.tuning.bullet_damage,
    );
    state.events.extend(sweep.events);
    for slot in sweep.destroyed {
        lifecycle::destroy_asteroid(state, slot);
    }

    // --- CIRCLE-CIRCLE ---
    let rocks = state.asteroids.as_mut_slice();
    let contacts = separate_overlaps(rocks);
    resolve_contact_velocities(rocks, &contacts);
    let field = state.field;
    for rock in rocks.iter_mut() {
        rock.pos = field.wrap(rock.pos);
    }

    lifecycle::cull_bullets(state);
    lifecycle::compact(state);

    if !was_clear && state.is_field_clear() {
        log::info!("Asteroid field cleared on frame {}, score {}", state.frame, state.score);
        state.events.push(GameEvent::FieldCleared);
    }

    log::trace!(
        "Frame {}: {} asteroids, {} bullets, {} contacts, score {}",
        state.frame,
        state.asteroids.len(),
        state.bullets.len(),
        contacts.len(),
        state.score
    );
}

/// Each key-down counts once: three repeats rotate three steps, fire three shots
fn apply_controls(state: &mut GameState, input: &TickInput, dt: f32) {
    let turn = state.tuning.ship_rotation_speed * dt;
    let ship = &mut state.ship.body;
    // Right is clockwise (+), left counter-clockwise (-) on a y-down screen
    let steps = input.rotate_right as f32 - input.rotate_left as f32;
    ship.angle = normalize_angle(ship.angle + steps * turn);
    if input.thrust > 0 {
        let accel = state.tuning.ship_acceleration * dt * input.thrust as f32;
        ship.vel += facing_direction(ship.angle) * accel;
    }
    for _ in 0..input.fire {
        if lifecycle::fire_bullet(state).is_none() {
            break;
        }
    }
}

/// Semi-implicit Euler for every body; bullets are not wrapped
fn integrate(state: &mut GameState, dt: f32) {
    let field = state.field;

    let ship = &mut state.ship.body;
    ship.integrate(dt);
    ship.pos = field.wrap(ship.pos);

    let spin = state.tuning.asteroid_spin * dt;
    for rock in state.asteroids.iter_mut().filter(|r| r.is_live()) {
        rock.integrate(dt);
        rock.pos = field.wrap(rock.pos);
        rock.angle = normalize_angle(rock.angle + spin);
    }

    for bullet in state.bullets.iter_mut().filter(|b| b.is_live()) {
        bullet.integrate(dt);
    }
}
