//! Level and game state
//!
//! A run is reproducible from its seed: every level draws its own seed from
//! the run RNG, and everything inside a level derives from that.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, GridPos};
use super::maze::Maze;
use super::motion::AnimationState;
use super::path::next_step;
use super::sampler::sample_far_pair_with;
use crate::settings::{Settings, TimingPreset};

/// Rules state of the level being played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    /// 1-based level number
    pub level: u32,
    pub maze: Maze,
    pub player: GridPos,
    pub pursuer: GridPos,
    /// Committed player moves this level
    pub step_count: u32,
    /// Terminal for this level instance
    pub won: bool,
}

impl LevelState {
    pub fn new(level: u32, maze: Maze, player: GridPos, pursuer: GridPos) -> Self {
        Self {
            level,
            maze,
            player,
            pursuer,
            step_count: 0,
            won: player == pursuer,
        }
    }

    /// Build level `level` from a level seed: maze first, then a far-apart
    /// start (player) and goal (pursuer).
    pub fn generate(level: u32, seed: u64, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let size = settings.levels.maze_size(level);
        let maze = Maze::generate(size, rng.random());
        let (start, goal) = sample_far_pair_with(&maze, rng.random(), &settings.sampling);
        Self::new(level, maze, start, goal)
    }
}

/// Complete game state: current level plus per-character animation
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub level: LevelState,
    pub player_anim: AnimationState,
    pub pursuer_anim: AnimationState,
    rng: Pcg32,
}

impl GameState {
    /// Create a new run at level 1 with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = LevelState::generate(1, rng.random(), &settings);
        log_level_start(&level);
        Self {
            seed,
            settings,
            player_anim: AnimationState::new(level.player),
            pursuer_anim: AnimationState::new(level.pursuer),
            level,
            rng,
        }
    }

    /// Generate and enter level `n` (clamped to at least 1)
    pub fn start_level(&mut self, n: u32) -> &LevelState {
        let level = LevelState::generate(n.max(1), self.rng.random(), &self.settings);
        log_level_start(&level);
        self.load_level(level)
    }

    /// Enter a prepared level, standing both characters idle on their cells
    pub fn load_level(&mut self, level: LevelState) -> &LevelState {
        self.player_anim.reset(level.player);
        self.pursuer_anim.reset(level.pursuer);
        self.level = level;
        &self.level
    }

    /// Next level
    pub fn advance(&mut self) -> &LevelState {
        self.start_level(self.level.level.saturating_add(1))
    }

    /// Fresh maze at the same level
    pub fn retry(&mut self) -> &LevelState {
        self.start_level(self.level.level)
    }

    /// Back to level 1
    pub fn restart(&mut self) -> &LevelState {
        self.start_level(1)
    }

    /// Switch walk-cycle clocks; takes effect on the next frame
    pub fn set_timing(&mut self, preset: TimingPreset) {
        self.settings.apply_timing(preset);
        log::info!("Timing preset: {}", preset.as_str());
    }

    /// First step of the player's shortest route to the pursuer
    pub fn hint(&self) -> Option<Direction> {
        if self.level.won {
            return None;
        }
        next_step(&self.level.maze, self.level.player, self.level.pursuer)
            .map(|step| Direction::from_step(self.level.player, step))
    }
}

fn log_level_start(level: &LevelState) {
    log::info!(
        "Level {}: {}x{} maze, player ({}, {}), pursuer ({}, {})",
        level.level,
        level.maze.size(),
        level.maze.size(),
        level.player.x,
        level.player.y,
        level.pursuer.x,
        level.pursuer.y,
    );
}
