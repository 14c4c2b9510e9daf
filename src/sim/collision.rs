//! Collision detection and response
//!
//! Two independent classes run once per frame:
//! - point-in-circle: ship vs asteroid, bullet vs asteroid
//! - circle-circle: asteroid vs asteroid, resolved in two passes (all
//!   positions first, then all velocities over the same contact list)

use glam::Vec2;

use super::geometry::{circles_overlap, point_in_circle};
use super::state::{BodySet, BodyStatus, GameEvent, RigidBody};
use crate::consts::DEGENERATE_DISTANCE;

/// A pair of overlapping asteroids, by slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
}

/// First live asteroid whose circle contains `point`
pub fn asteroid_containing(asteroids: &BodySet, point: Vec2) -> Option<&RigidBody> {
    asteroids
        .iter_active()
        .find(|a| point_in_circle(point, a.pos, a.radius))
}

/// Outcome of the bullet sweep
#[derive(Debug, Default)]
pub struct BulletSweep {
    /// Asteroid slots whose health dropped to zero or below, in hit order
    pub destroyed: Vec<usize>,
    pub events: Vec<GameEvent>,
}

/// Test every bullet against every asteroid.
///
/// A bullet stops at the first asteroid it is inside: it is marked for
/// removal and the asteroid loses `damage` health. Destroyed asteroids are
/// marked for removal too, so later bullets in the same sweep pass through.
pub fn sweep_bullets(bullets: &mut BodySet, asteroids: &mut BodySet, damage: u32) -> BulletSweep {
    let mut sweep = BulletSweep::default();
    let rocks = asteroids.as_mut_slice();

    for bullet in bullets.iter_mut() {
        if !bullet.is_live() {
            continue;
        }

        for (slot, rock) in rocks.iter_mut().enumerate() {
            if !rock.is_live() || !point_in_circle(bullet.pos, rock.pos, rock.radius) {
                continue;
            }

            bullet.status = BodyStatus::PendingRemoval;
            let destroyed = rock.take_damage(damage);
            sweep.events.push(GameEvent::AsteroidHit {
                id: rock.id,
                health: rock.health,
            });
            if destroyed {
                rock.status = BodyStatus::PendingRemoval;
                sweep.destroyed.push(slot);
            }
            break;
        }
    }

    sweep
}

/// Positional pass: push overlapping asteroids apart.
///
/// Every unordered pair is visited once, in slot order. Each body moves half
/// the penetration depth along the line of centres. The second body's
/// displacement is computed from the first body's already-updated position,
/// which keeps results reproducible for a given slot order.
pub fn separate_overlaps(bodies: &mut [RigidBody]) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            if !a.is_live() || !b.is_live() || a.id == b.id {
                continue;
            }
            if !circles_overlap(a.pos, a.radius, b.pos, b.radius) {
                continue;
            }

            let distance = a.pos.distance(b.pos);
            if distance < DEGENERATE_DISTANCE {
                log::warn!(
                    "asteroids {} and {} share a centre, skipping resolution",
                    a.id,
                    b.id
                );
                continue;
            }

            let overlap = 0.5 * (distance - a.radius - b.radius);
            a.pos -= overlap * (a.pos - b.pos) / distance;
            b.pos += overlap * (a.pos - b.pos) / distance;

            contacts.push(Contact { a: i, b: j });
        }
    }

    contacts
}

/// 1-D elastic collision along the contact normal
#[inline]
pub fn elastic_normal_speeds(v1: f32, v2: f32, m1: f32, m2: f32) -> (f32, f32) {
    let total = m1 + m2;
    (
        (v1 * (m1 - m2) + 2.0 * m2 * v2) / total,
        (v2 * (m2 - m1) + 2.0 * m1 * v1) / total,
    )
}

/// Velocity pass: elastic response for every contact from the positional pass.
///
/// Tangential components are kept, normal components are exchanged using
/// each body's mass.
pub fn resolve_contact_velocities(bodies: &mut [RigidBody], contacts: &[Contact]) {
    for contact in contacts {
        let (head, tail) = bodies.split_at_mut(contact.b);
        let a = &mut head[contact.a];
        let b = &mut tail[0];

        let delta = b.pos - a.pos;
        let distance = delta.length();
        if distance < DEGENERATE_DISTANCE {
            continue;
        }

        let normal = delta / distance;
        let tangent = Vec2::new(-normal.y, normal.x);

        let tan_a = a.vel.dot(tangent);
        let tan_b = b.vel.dot(tangent);
        let norm_a = a.vel.dot(normal);
        let norm_b = b.vel.dot(normal);

        let (new_a, new_b) = elastic_normal_speeds(norm_a, norm_b, a.mass(), b.mass());

        a.vel = tangent * tan_a + normal * new_a;
        b.vel = tangent * tan_b + normal * new_b;
    }
}
