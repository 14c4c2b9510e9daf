//! Platform layer
//!
//! Owns everything the simulation must not touch: event polling, key
//! mapping, wall-clock timing and the frame loop that ties the core to a
//! rendering surface.

pub mod game_loop;
pub mod input;

pub use game_loop::{GameLoop, LoopControl, LoopStats};
pub use input::{EventSource, InputEvent, Key, ScriptedEvents, collect_input};
