//! Heart Maze - the "find each other" maze mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, pathing, pursuit, animation, levels)
//! - `platform`: Browser clock and wasm facade
//! - `settings`: Data-driven tuning, persisted as JSON

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Smallest maze edge length the generator will produce
    pub const MIN_MAZE_SIZE: usize = 5;

    /// Random draws before the floor sampler gives up
    pub const FLOOR_SAMPLE_TRIALS: u32 = 5000;
    /// Candidate draws when searching for a far-apart start/goal pair
    pub const FAR_PAIR_TRIALS: u32 = 1200;
    /// Fallback cell when sampling exhausts its budget
    pub const DEFAULT_FLOOR: (i32, i32) = (1, 1);

    /// Level size policy: base + (level - 1) * step, capped at max
    pub const BASE_MAZE_SIZE: usize = 9;
    pub const MAZE_SIZE_STEP: usize = 2;
    pub const MAX_MAZE_SIZE: usize = 11;
    /// Hard ceiling on any configured edge length (odd)
    pub const MAZE_SIZE_LIMIT: usize = 101;

    /// Sprite cadence while walking
    pub const ANIMATION_FPS: f32 = 8.0;
    /// Pursuer glides between cells over this many milliseconds
    pub const PURSUER_TWEEN_MS: f64 = 160.0;
    /// Player snaps, but keeps its walking pose for this long after a step
    pub const PLAYER_MOVE_HOLD_MS: f64 = 180.0;
}

/// Manhattan distance between two grid cells
#[inline]
pub fn manhattan(a: sim::GridPos, b: sim::GridPos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
