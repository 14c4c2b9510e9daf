//! Entity lifecycle: spawning, splitting, culling and scoring

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{BodyKind, BodyStatus, Color, GameEvent, GameState, RigidBody, initial_health};
use crate::facing_direction;

/// Opening asteroid: position, velocity, radius
const OPENING_ASTEROID: (Vec2, Vec2, f32) = (Vec2::new(20.0, 20.0), Vec2::new(8.0, -6.0), 32.0);

/// Populate a fresh game with the opening asteroid field
pub fn seed_field(state: &mut GameState) {
    let (pos, vel, radius) = OPENING_ASTEROID;
    spawn_asteroid(state, pos, vel, radius, Color::ROCK);
    log::info!(
        "Seeded field {}x{} with {} asteroid(s) (seed {})",
        state.field.width,
        state.field.height,
        state.asteroids.len(),
        state.seed
    );
}

/// Add an asteroid to the live field, returning its ID
pub fn spawn_asteroid(state: &mut GameState, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> u32 {
    let id = state.next_entity_id();
    let mut rock = RigidBody::asteroid(id, state.field.wrap(pos), vel, radius, color);
    rock.health = initial_health(radius, state.tuning.health_per_radius);
    state.asteroids.push(rock);
    id
}

/// Fire a bullet from the ship's nose direction.
///
/// Returns `None` when the ship is dead or the cooldown has not elapsed.
pub fn fire_bullet(state: &mut GameState) -> Option<u32> {
    if !state.ship.is_alive() || !state.tuning.can_fire(state.ship.fire_cooldown) {
        return None;
    }

    let id = state.next_entity_id();
    let ship = &state.ship.body;
    let vel = facing_direction(ship.angle) * state.tuning.bullet_speed;
    let mut bullet = RigidBody::new(
        id,
        BodyKind::Bullet,
        ship.pos,
        vel,
        crate::consts::BULLET_RADIUS,
    );
    bullet.color = Color::YELLOW;
    bullet.angle = ship.angle;
    state.bullets.push(bullet);

    state.ship.fire_cooldown = state.tuning.fire_cooldown;
    state.events.push(GameEvent::BulletFired { id });
    log::trace!("Bullet {} fired", id);
    Some(id)
}

/// Two half-size children of a destroyed asteroid, or none below the threshold.
///
/// Each child gets an independent random heading; the parent's velocity
/// components are scaled by its sine and cosine. This is not momentum
/// conserving.
pub fn split_products(state: &mut GameState, parent: &RigidBody) -> Vec<RigidBody> {
    if parent.radius <= state.tuning.split_threshold {
        return Vec::new();
    }

    let radius = parent.radius / 2.0;
    let offsets = [-state.tuning.split_offset, state.tuning.split_offset];

    offsets
        .into_iter()
        .map(|dx| {
            let heading = state.rng.random::<f32>() * TAU;
            let vel = Vec2::new(parent.vel.x * heading.sin(), parent.vel.y * heading.cos());
            let pos = state.field.wrap(parent.pos + Vec2::new(dx, 0.0));
            let id = state.next_entity_id();
            let mut child = RigidBody::asteroid(id, pos, vel, radius, parent.color);
            child.health = initial_health(radius, state.tuning.health_per_radius);
            child
        })
        .collect()
}

/// Score a destroyed asteroid and queue its split products for the next frame
pub fn destroy_asteroid(state: &mut GameState, slot: usize) {
    let Some(parent) = state.asteroids.get(slot).cloned() else {
        return;
    };

    state.score += state.tuning.destroy_bonus;
    let children = split_products(state, &parent);
    let split = !children.is_empty();
    log::debug!(
        "Asteroid {} (r={}) destroyed, {} children, score {}",
        parent.id,
        parent.radius,
        children.len(),
        state.score
    );

    state.pending_asteroids.extend(children);
    state.events.push(GameEvent::AsteroidDestroyed { id: parent.id, split });
}

/// Mark bullets that left the field for removal
pub fn cull_bullets(state: &mut GameState) {
    let field = state.field;
    for bullet in state.bullets.iter_mut() {
        if bullet.is_live() && !field.holds_bullet(bullet.pos) {
            bullet.status = BodyStatus::PendingRemoval;
            log::debug!("Bullet {} left the field", bullet.id);
        }
    }
}

/// End-of-frame bookkeeping: drop removed bodies, then admit split products
pub fn compact(state: &mut GameState) {
    let bullets = state.bullets.compact();
    let asteroids = state.asteroids.compact();
    if !asteroids.is_empty() {
        log::debug!(
            "Removed {} asteroid(s), {} bullet(s)",
            asteroids.len(),
            bullets.len()
        );
    }

    for child in state.pending_asteroids.drain(..) {
        state.asteroids.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::wrap::Field;

    fn state_with(asteroids: &[(Vec2, Vec2, f32)]) -> GameState {
        GameState::with_asteroids(42, Field::default(), Tuning::default(), asteroids)
    }

    #[test]
    fn test_split_above_threshold() {
        let mut state = state_with(&[(Vec2::new(100.0, 100.0), Vec2::new(8.0, -6.0), 32.0)]);
        let parent = state.asteroids.get(0).cloned().expect("asteroid");

        let children = split_products(&mut state, &parent);
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.radius, 16.0);
            assert_eq!(child.health, 160);
            assert_eq!(child.color, parent.color);
            assert!(child.pos.distance(parent.pos) <= state.tuning.split_offset + 1e-4);
            assert!(child.vel.x.abs() <= 8.0 && child.vel.y.abs() <= 6.0);
        }
        assert_ne!(children[0].id, children[1].id);
    }

    #[test]
    fn test_odd_radius_split_keeps_health_per_radius() {
        let mut state = state_with(&[(Vec2::new(100.0, 100.0), Vec2::new(3.0, 4.0), 5.0)]);
        let parent = state.asteroids.get(0).cloned().expect("asteroid");
        assert_eq!(parent.health, 50);

        let children = split_products(&mut state, &parent);
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.radius, 2.5);
            assert_eq!(child.health, 25);
        }
    }

    #[test]
    fn test_no_split_at_threshold() {
        let mut state = state_with(&[(Vec2::new(100.0, 100.0), Vec2::ZERO, 4.0)]);
        let parent = state.asteroids.get(0).cloned().expect("asteroid");
        assert!(split_products(&mut state, &parent).is_empty());
    }

    #[test]
    fn test_destroy_scores_and_defers_children() {
        let mut state = state_with(&[(Vec2::new(100.0, 100.0), Vec2::new(1.0, 1.0), 16.0)]);
        state.asteroids.mark_for_removal(0);
        destroy_asteroid(&mut state, 0);

        assert_eq!(state.score, 20);
        assert_eq!(state.pending_asteroids.len(), 2);
        // Children only join at compaction
        assert_eq!(state.asteroids.len(), 1);

        compact(&mut state);
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.radius == 8.0));
    }

    #[test]
    fn test_fire_bullet_along_facing() {
        let mut state = state_with(&[]);
        state.ship.body.angle = std::f32::consts::FRAC_PI_2;

        let id = fire_bullet(&mut state).expect("ship alive");
        let bullet = state.bullets.find(id).expect("bullet stored");
        assert_eq!(bullet.pos, state.ship.body.pos);
        assert!((bullet.vel.x - state.tuning.bullet_speed).abs() < 1e-4);
        assert!(bullet.vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_dead_ship_cannot_fire() {
        let mut state = state_with(&[]);
        state.ship.state = crate::sim::state::ShipState::Dead;
        assert!(fire_bullet(&mut state).is_none());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_cull_off_field_bullets() {
        let mut state = state_with(&[]);
        fire_bullet(&mut state);
        fire_bullet(&mut state);
        state.bullets.iter_mut().next().expect("bullet").pos = Vec2::new(0.5, 200.0);

        cull_bullets(&mut state);
        let statuses: Vec<_> = state.bullets.iter().map(|b| b.status).collect();
        assert_eq!(statuses, vec![BodyStatus::PendingRemoval, BodyStatus::Active]);

        compact(&mut state);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut state = state_with(&[(Vec2::new(100.0, 100.0), Vec2::ZERO, 32.0)]);
        let first = state.asteroids.get(0).map(|a| a.id).expect("asteroid");
        state.asteroids.mark_for_removal(0);
        destroy_asteroid(&mut state, 0);
        compact(&mut state);
        assert!(state.asteroids.iter().all(|a| a.id > first));
    }
}
