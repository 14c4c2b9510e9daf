//! Game state and core simulation types
//!
//! Every entity (asteroid, bullet, ship) is one `RigidBody` record
//! discriminated by `BodyKind`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::wrap::Field;
use crate::consts::*;
use crate::settings::Tuning;

/// RGB colour handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xE0, 0x40);
    pub const ROCK: Color = Color::rgb(0xC8, 0xC8, 0xB4);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Asteroid,
    Bullet,
    Ship,
}

/// Removal bookkeeping for a body slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyStatus {
    #[default]
    Active,
    /// Will be dropped at the end of the current frame
    PendingRemoval,
    /// Dropped from its collection; only seen on bodies returned by `compact`
    Removed,
}

/// A circular rigid body
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub id: u32,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius and render scale
    pub radius: f32,
    pub angle: f32,
    pub health: i32,
    pub color: Color,
    pub status: BodyStatus,
}

impl RigidBody {
    pub fn new(id: u32, kind: BodyKind, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            radius,
            angle: 0.0,
            health: 0,
            color: Color::WHITE,
            status: BodyStatus::Active,
        }
    }

    /// Asteroid with health derived from its radius
    pub fn asteroid(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        let mut body = Self::new(id, BodyKind::Asteroid, pos, vel, radius);
        body.health = initial_health(radius, HEALTH_PER_RADIUS);
        body.color = color;
        body
    }

    /// Mass used in elastic collisions; always twice the radius
    #[inline]
    pub fn mass(&self) -> f32 {
        2.0 * self.radius
    }

    /// Eligible for collision and rendering this frame
    #[inline]
    pub fn is_live(&self) -> bool {
        self.status == BodyStatus::Active && self.radius > 0.0
    }

    /// Advance position by one explicit Euler step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Apply damage, returning true when the body is destroyed
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub_unsigned(amount);
        self.health <= 0
    }
}

/// Starting health for an asteroid of the given radius.
///
/// Uses the real radius, so a split child of radius 2.5 gets 25 at 10 per unit.
#[inline]
pub fn initial_health(radius: f32, per_radius: i32) -> i32 {
    (radius * per_radius as f32) as i32
}

/// Hands out entity IDs; IDs are never reused
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Dense, slot-stable body storage.
///
/// Bodies are never erased while a frame iterates over them: they are marked
/// `PendingRemoval` and dropped together by `compact`.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<RigidBody>,
}

impl BodySet {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    pub fn push(&mut self, body: RigidBody) {
        self.bodies.push(body);
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&RigidBody> {
        self.bodies.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> {
        self.bodies.iter_mut()
    }

    /// Bodies still taking part in the frame
    pub fn iter_active(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter().filter(|b| b.is_live())
    }

    pub fn find(&self, id: u32) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn mark_for_removal(&mut self, slot: usize) {
        if let Some(body) = self.bodies.get_mut(slot) {
            body.status = BodyStatus::PendingRemoval;
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }

    /// Drop every body that is not live, returning them marked `Removed`
    pub fn compact(&mut self) -> Vec<RigidBody> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.bodies.len());
        for mut body in self.bodies.drain(..) {
            if body.is_live() {
                kept.push(body);
            } else {
                body.status = BodyStatus::Removed;
                removed.push(body);
            }
        }
        self.bodies = kept;
        removed
    }
}

/// Player ship states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipState {
    Alive,
    /// Terminal: controls are frozen, the rest of the scene keeps running
    Dead,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: RigidBody,
    pub state: ShipState,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
}

impl Ship {
    pub fn is_alive(&self) -> bool {
        self.state == ShipState::Alive
    }
}

/// Notable things that happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BulletFired { id: u32 },
    AsteroidHit { id: u32, health: i32 },
    AsteroidDestroyed { id: u32, split: bool },
    ShipDestroyed,
    /// The last asteroid left the field
    FieldCleared,
    Clicked { pos: Vec2 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub field: Field,
    pub tuning: Tuning,
    pub score: u64,
    /// Simulated frames so far
    pub frame: u64,
    pub ship: Ship,
    pub asteroids: BodySet,
    pub bullets: BodySet,
    /// Split products waiting to join the field next frame
    pub(crate) pending_asteroids: Vec<RigidBody>,
    /// Events raised by the most recent frame
    pub events: Vec<GameEvent>,
    /// Last mouse-down position
    pub last_click: Option<Vec2>,
    pub ids: IdAllocator,
}

impl GameState {
    /// New game with the default opening asteroid
    pub fn new(seed: u64, field: Field, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, field, tuning);
        super::lifecycle::seed_field(&mut state);
        state
    }

    /// New game with a custom asteroid field of `(pos, vel, radius)`
    pub fn with_asteroids(
        seed: u64,
        field: Field,
        tuning: Tuning,
        asteroids: &[(Vec2, Vec2, f32)],
    ) -> Self {
        let mut state = Self::empty(seed, field, tuning);
        for &(pos, vel, radius) in asteroids {
            super::lifecycle::spawn_asteroid(&mut state, pos, vel, radius, Color::ROCK);
        }
        state
    }

    fn empty(seed: u64, field: Field, tuning: Tuning) -> Self {
        let mut ids = IdAllocator::new();
        let ship_id = ids.next();
        let ship = Ship {
            body: RigidBody::new(ship_id, BodyKind::Ship, field.center(), Vec2::ZERO, SHIP_SCALE),
            state: ShipState::Alive,
            fire_cooldown: 0.0,
        };

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            tuning,
            score: 0,
            frame: 0,
            ship,
            asteroids: BodySet::new(),
            bullets: BodySet::new(),
            pending_asteroids: Vec::new(),
            events: Vec::new(),
            last_click: None,
            ids,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next()
    }

    pub fn active_asteroids(&self) -> impl Iterator<Item = &RigidBody> {
        self.asteroids.iter_active()
    }

    /// No live asteroid remains and no split product is waiting to join
    pub fn is_field_clear(&self) -> bool {
        self.asteroids.iter_active().next().is_none() && self.pending_asteroids.is_empty()
    }
}
