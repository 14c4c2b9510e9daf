//! Wireroids entry point
//!
//! Runs a scripted session on the headless console and logs the outcome.

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use wireroids::Tuning;
    use wireroids::consts::{FIELD_HEIGHT, FIELD_WIDTH, WINDOW_TITLE};
    use wireroids::platform::{GameLoop, InputEvent, Key, ScriptedEvents};
    use wireroids::renderer::Console;
    use wireroids::sim::{Field, GameState};

    const DEMO_FRAMES: u64 = 600;

    env_logger::init();
    log::info!("Wireroids (native) starting...");

    let console = match Console::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32, WINDOW_TITLE) {
        Ok(console) => console,
        Err(e) => {
            log::error!("Failed to open console: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let state = GameState::new(seed, Field::default(), Tuning::default());
    log::info!("Game initialized with seed: {}", seed);

    // Spin a little, shoot regularly, quit at the end
    let mut script = ScriptedEvents::from_fn(DEMO_FRAMES, |frame| {
        let mut events = Vec::new();
        if frame % 40 < 4 {
            events.push(InputEvent::KeyDown(Key::Left));
        }
        if frame % 15 == 0 {
            events.push(InputEvent::KeyDown(Key::Space));
        }
        if frame + 1 == DEMO_FRAMES {
            events.push(InputEvent::Quit);
        }
        events
    });

    let mut game = GameLoop::new(state, console).with_frame_budget(Duration::from_secs_f32(1.0 / 60.0));
    match game.run(&mut script, None) {
        Ok(stats) => {
            log::info!(
                "Session over: {} frames, score {}, ship {}",
                stats.frames,
                stats.score,
                if stats.ship_alive { "alive" } else { "destroyed" }
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Game loop aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the wasm surface
}
