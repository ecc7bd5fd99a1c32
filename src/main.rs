//! Heart Maze entry point
//!
//! The web build is driven from JS through `platform::web::WebGame`.
//! Natively this plays one scripted level in the terminal.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heart_maze::Settings;
    use heart_maze::sim::{GameState, TickInput, tick};

    /// ~60 Hz display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames between scripted d-pad presses
    const FRAMES_PER_STEP: u32 = 15;
    const MAX_STEPS: u32 = 500;

    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    log::info!("Heart Maze (native) starting with seed {seed}");
    log::info!("Native mode plays a scripted level - build for wasm32 for the web version");

    let mut state = GameState::with_settings(seed, Settings::load());
    let mut now = 0.0;
    println!("{}", draw(&state));

    while !state.level.won && state.level.step_count < MAX_STEPS {
        let Some(dir) = state.hint() else {
            break;
        };
        let input = TickInput {
            step: Some(dir),
            ..Default::default()
        };
        tick(&mut state, &input, now);
        for _ in 0..FRAMES_PER_STEP {
            now += FRAME_MS;
            tick(&mut state, &TickInput::default(), now);
        }
        println!("step {} ({})", state.level.step_count, dir.as_str());
        println!("{}", draw(&state));
    }

    if state.level.won {
        println!("Found each other in {} steps!", state.level.step_count);
    } else {
        println!("Gave up after {} steps", state.level.step_count);
    }
}

/// ASCII maze with `P` for the player, `C` for the pursuer, `*` when together
#[cfg(not(target_arch = "wasm32"))]
fn draw(state: &heart_maze::sim::GameState) -> String {
    use heart_maze::sim::GridPos;

    let level = &state.level;
    let mut out = String::new();
    for (y, line) in level.maze.to_string().lines().enumerate() {
        for (x, c) in line.chars().enumerate() {
            let pos = GridPos::new(x as i32, y as i32);
            let c = match (pos == level.player, pos == level.pursuer) {
                (true, true) => '*',
                (true, false) => 'P',
                (false, true) => 'C',
                _ => c,
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
