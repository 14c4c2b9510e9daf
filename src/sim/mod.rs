//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Elapsed time is supplied by the caller, once per frame
//! - Seeded RNG only
//! - Stable iteration order (by slot, bodies are only appended)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod lifecycle;
pub mod state;
pub mod tick;
pub mod wrap;

pub use collision::{Contact, elastic_normal_speeds, resolve_contact_velocities, separate_overlaps};
pub use geometry::{circles_overlap, point_in_circle};
pub use state::{
    BodyKind, BodySet, BodyStatus, Color, GameEvent, GameState, IdAllocator, RigidBody, Ship,
    ShipState,
};
pub use tick::{TickInput, tick};
pub use wrap::{Field, wrap_coordinate};
