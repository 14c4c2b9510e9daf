//! Frame loop driver
//!
//! Each frame: clear, poll, step, draw, present. `dt` is measured at the
//! top of the loop and handed to the step unchanged. A quit event ends the
//! loop before that frame's step runs.

use std::time::{Duration, Instant};

use super::input::{EventSource, InputEvent, collect_input};
use crate::renderer::{RenderError, SceneStyle, Surface, draw_scene};
use crate::sim::{GameState, tick};

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopStats {
    /// Frames stepped and presented
    pub frames: u64,
    pub elapsed: Duration,
    pub score: u64,
    pub ship_alive: bool,
    /// Ended by a quit event rather than the frame limit
    pub quit_requested: bool,
}

impl LoopStats {
    pub fn average_fps(&self) -> f32 {
        let secs = self.elapsed.as_secs_f32();
        if secs > 0.0 { self.frames as f32 / secs } else { 0.0 }
    }
}

pub struct GameLoop<S: Surface> {
    state: GameState,
    surface: S,
    style: SceneStyle,
    frame_budget: Option<Duration>,
}

impl<S: Surface> GameLoop<S> {
    pub fn new(state: GameState, surface: S) -> Self {
        Self {
            state,
            surface,
            style: SceneStyle::default(),
            frame_budget: None,
        }
    }

    /// Sleep out the rest of each frame so frames take at least `budget`
    pub fn with_frame_budget(mut self, budget: Duration) -> Self {
        self.frame_budget = Some(budget);
        self
    }

    pub fn with_style(mut self, style: SceneStyle) -> Self {
        self.style = style;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &S {
        &self.surface
    }

    pub fn into_parts(self) -> (GameState, S) {
        (self.state, self.surface)
    }

    /// Run one frame with an explicit `dt` and event batch
    pub fn step_frame(&mut self, dt: f32, events: &[InputEvent]) -> Result<LoopControl, RenderError> {
        self.surface.clear();

        let (input, quit) = collect_input(events);
        if quit {
            return Ok(LoopControl::Quit);
        }

        tick(&mut self.state, &input, dt);
        draw_scene(&mut self.surface, &self.state, &self.style)?;
        self.surface.present()?;
        Ok(LoopControl::Continue)
    }

    /// Drive frames from `source` until it asks to quit or `max_frames`
    /// have run. A render failure aborts the loop and is returned.
    pub fn run<E: EventSource + ?Sized>(
        &mut self,
        source: &mut E,
        max_frames: Option<u64>,
    ) -> Result<LoopStats, RenderError> {
        log::info!(
            "Game loop starting (seed {}, frame budget {:?})",
            self.state.seed,
            self.frame_budget
        );

        let start = Instant::now();
        let mut last = start;
        let mut frames = 0u64;
        let mut quit_requested = false;

        while max_frames.is_none_or(|max| frames < max) {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            let events = source.poll_frame();
            match self.step_frame(dt, &events) {
                Ok(LoopControl::Continue) => frames += 1,
                Ok(LoopControl::Quit) => {
                    quit_requested = true;
                    break;
                }
                Err(e) => {
                    log::error!("Render error on frame {}: {}", frames + 1, e);
                    return Err(e);
                }
            }

            if let Some(budget) = self.frame_budget {
                let spent = now.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
        }

        let stats = LoopStats {
            frames,
            elapsed: start.elapsed(),
            score: self.state.score,
            ship_alive: self.state.ship.is_alive(),
            quit_requested,
        };
        log::info!(
            "Game loop stopped after {} frames ({:.1} fps), score {}",
            stats.frames,
            stats.average_fps(),
            stats.score
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Key, ScriptedEvents};
    use crate::renderer::{Console, Renderer};
    use crate::settings::Tuning;
    use crate::sim::{Color, Field};

    fn new_loop() -> GameLoop<Console> {
        let state = GameState::new(7, Field::default(), Tuning::default());
        let console = Console::new(800, 450, "Asteroids").expect("console");
        GameLoop::new(state, console)
    }

    /// Surface that loses its output after a few presents
    struct FlakySurface {
        presents_left: u32,
    }

    impl Renderer for FlakySurface {
        fn draw_point(&mut self, _x: i32, _y: i32, _color: Color) -> Result<(), RenderError> {
            Ok(())
        }

        fn draw_line(&mut self, _x1: i32, _y1: i32, _x2: i32, _y2: i32, _color: Color) -> Result<(), RenderError> {
            Ok(())
        }

        fn draw_text(&mut self, _x: i32, _y: i32, _text: &str) -> Result<(), RenderError> {
            Ok(())
        }
    }

    impl Surface for FlakySurface {
        fn clear(&mut self) {}

        fn present(&mut self) -> Result<(), RenderError> {
            if self.presents_left == 0 {
                return Err(RenderError::SurfaceLost);
            }
            self.presents_left -= 1;
            Ok(())
        }
    }

    #[test]
    fn test_step_frame_draws_and_presents() {
        let mut game = new_loop();
        let control = game
            .step_frame(1.0 / 60.0, &[InputEvent::KeyDown(Key::Space)])
            .expect("frame");

        assert_eq!(control, LoopControl::Continue);
        assert_eq!(game.state().frame, 1);
        assert_eq!(game.state().bullets.len(), 1);
        assert_eq!(game.renderer().frames_presented(), 1);
        assert!(game.renderer().lit_pixels() > 0);
        assert_eq!(game.renderer().text_runs()[0].text, "SCORE: 0");
    }

    #[test]
    fn test_every_fire_key_down_spawns_a_bullet() {
        let mut game = new_loop();
        game.step_frame(0.016, &[InputEvent::KeyDown(Key::Space); 3])
            .expect("frame");
        assert_eq!(game.state().bullets.len(), 3);
    }

    #[test]
    fn test_quit_skips_the_step() {
        let mut game = new_loop();
        let control = game
            .step_frame(0.016, &[InputEvent::KeyDown(Key::Up), InputEvent::Quit])
            .expect("frame");
        assert_eq!(control, LoopControl::Quit);
        assert_eq!(game.state().frame, 0);
        assert_eq!(game.renderer().frames_presented(), 0);
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut game = new_loop();
        let mut source = ScriptedEvents::from_fn(5, |i| {
            if i == 3 { vec![InputEvent::Quit] } else { Vec::new() }
        });

        let stats = game.run(&mut source, None).expect("run");
        assert_eq!(stats.frames, 3);
        assert!(stats.quit_requested);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_run_honours_frame_limit() {
        let mut game = new_loop();
        let mut source = ScriptedEvents::new();
        let stats = game.run(&mut source, Some(4)).expect("run");
        assert_eq!(stats.frames, 4);
        assert!(!stats.quit_requested);
        assert!(stats.ship_alive);

        let (state, console) = game.into_parts();
        assert_eq!(state.frame, 4);
        assert_eq!(console.frames_presented(), 4);
    }

    #[test]
    fn test_render_failure_aborts_loop() {
        let state = GameState::new(7, Field::default(), Tuning::default());
        let mut game = GameLoop::new(state, FlakySurface { presents_left: 2 });
        let mut source = ScriptedEvents::new();

        let result = game.run(&mut source, Some(10));
        assert_eq!(result, Err(RenderError::SurfaceLost));
        assert_eq!(game.state().frame, 3);
    }

    #[test]
    fn test_frame_budget_paces_loop() {
        let mut game = new_loop().with_frame_budget(Duration::from_millis(5));
        let stats = game.run(&mut ScriptedEvents::new(), Some(3)).expect("run");
        assert!(stats.elapsed >= Duration::from_millis(10));
    }
}
