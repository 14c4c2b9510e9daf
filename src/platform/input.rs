//! Input events and key mapping

use glam::Vec2;
use std::collections::VecDeque;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    /// Anything unmapped
    Other,
}

impl Key {
    /// Map a DOM-style key name ("ArrowLeft", " ", ...) to a key
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" | "a" | "A" => Key::Left,
            "ArrowRight" | "Right" | "d" | "D" => Key::Right,
            "ArrowUp" | "Up" | "w" | "W" => Key::Up,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// One event delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    MouseDown { x: f32, y: f32 },
    Quit,
}

/// Fold a frame's events into the step input. Returns the input and
/// whether a quit was requested.
///
/// Every key-down is counted, so three Space presses in one batch fire three
/// shots. With several clicks the last one wins.
pub fn collect_input(events: &[InputEvent]) -> (TickInput, bool) {
    let mut input = TickInput::default();
    let mut quit = false;

    for event in events {
        match *event {
            InputEvent::KeyDown(Key::Left) => input.rotate_left += 1,
            InputEvent::KeyDown(Key::Right) => input.rotate_right += 1,
            InputEvent::KeyDown(Key::Up) => input.thrust += 1,
            InputEvent::KeyDown(Key::Space) => input.fire += 1,
            InputEvent::KeyDown(Key::Other) => {}
            InputEvent::MouseDown { x, y } => input.click = Some(Vec2::new(x, y)),
            InputEvent::Quit => quit = true,
        }
    }

    (input, quit)
}

/// Anything that can hand over the events pending for the next frame
pub trait EventSource {
    /// Drain all events queued since the previous poll
    fn poll_frame(&mut self) -> Vec<InputEvent>;
}

/// Pre-recorded events, one batch per frame. Empty once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a script of `frames` batches from a per-frame generator
    pub fn from_fn(frames: u64, f: impl FnMut(u64) -> Vec<InputEvent>) -> Self {
        Self {
            frames: (0..frames).map(f).collect(),
        }
    }

    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Batches not yet polled
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll_frame(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}
