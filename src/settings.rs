//! Game tuning and preferences
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::maze::coerce_size;
use crate::sim::motion::{Cadence, FrameSequences};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the two characters drive their walk cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimingPreset {
    /// Both characters cycle on time spent moving
    #[default]
    Unified,
    /// Player cycles on elapsed time, pursuer on a fixed-interval counter
    Reference,
}

impl TimingPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingPreset::Unified => "Unified",
            TimingPreset::Reference => "Reference",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unified" => Some(TimingPreset::Unified),
            "reference" | "ref" => Some(TimingPreset::Reference),
            _ => None,
        }
    }
}

/// Maze growth across levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    pub base_size: usize,
    pub size_step: usize,
    pub max_size: usize,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            base_size: BASE_MAZE_SIZE,
            size_step: MAZE_SIZE_STEP,
            max_size: MAX_MAZE_SIZE,
        }
    }
}

impl LevelTuning {
    /// Maze edge length for a 1-based level number
    pub fn maze_size(&self, level: u32) -> usize {
        let growth = (level.max(1) - 1) as usize;
        let size = self
            .base_size
            .saturating_add(growth.saturating_mul(self.size_step));
        coerce_size(size.min(self.max_size).max(self.base_size))
    }
}

/// Trial budgets for the floor sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingTuning {
    pub floor_trials: u32,
    pub far_pair_trials: u32,
}

impl Default for SamplingTuning {
    fn default() -> Self {
        Self {
            floor_trials: FLOOR_SAMPLE_TRIALS,
            far_pair_trials: FAR_PAIR_TRIALS,
        }
    }
}

/// Motion and sprite configuration for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Render glide duration per step (0 = snap)
    pub tween_ms: f64,
    /// Minimum time the walk cycle keeps running after a step
    pub hold_ms: f64,
    /// Walk cycle frames per second
    pub fps: f32,
    pub cadence: Cadence,
    pub frames: FrameSequences,
}

impl CharacterProfile {
    /// The player: snaps between cells, walks for a short moment after each step
    pub fn player() -> Self {
        Self {
            tween_ms: 0.0,
            hold_ms: PLAYER_MOVE_HOLD_MS,
            fps: ANIMATION_FPS,
            cadence: Cadence::Elapsed,
            frames: FrameSequences::player(),
        }
    }

    /// The pursuer: glides between cells and walks only while gliding
    pub fn pursuer() -> Self {
        Self {
            tween_ms: PURSUER_TWEEN_MS,
            hold_ms: 0.0,
            fps: ANIMATION_FPS,
            cadence: Cadence::Elapsed,
            frames: FrameSequences::pursuer(),
        }
    }

    /// How long the walk cycle runs after a commit
    pub fn moving_ms(&self) -> f64 {
        self.tween_ms.max(self.hold_ms)
    }

    fn sanitize(&mut self) {
        if !self.tween_ms.is_finite() || self.tween_ms < 0.0 {
            self.tween_ms = 0.0;
        }
        if !self.hold_ms.is_finite() || self.hold_ms < 0.0 {
            self.hold_ms = 0.0;
        }
        if !self.fps.is_finite() || self.fps < 1.0 {
            self.fps = 1.0;
        }
        self.frames.sanitize();
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timing: TimingPreset,
    pub levels: LevelTuning,
    pub sampling: SamplingTuning,
    pub player: CharacterProfile,
    pub pursuer: CharacterProfile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timing: TimingPreset::Unified,
            levels: LevelTuning::default(),
            sampling: SamplingTuning::default(),
            player: CharacterProfile::player(),
            pursuer: CharacterProfile::pursuer(),
        }
    }
}

impl Settings {
    /// Create settings from a timing preset
    pub fn from_preset(preset: TimingPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_timing(preset);
        settings
    }

    /// Switch walk-cycle clocks for both characters
    pub fn apply_timing(&mut self, preset: TimingPreset) {
        self.timing = preset;
        self.player.cadence = Cadence::Elapsed;
        self.pursuer.cadence = match preset {
            TimingPreset::Unified => Cadence::Elapsed,
            TimingPreset::Reference => Cadence::Ticks,
        };
    }

    /// Copy with degenerate values replaced by the nearest usable ones.
    ///
    /// The timing preset owns both characters' cadences.
    pub fn sanitized(mut self) -> Self {
        self.apply_timing(self.timing);
        self.levels.base_size = coerce_size(self.levels.base_size.min(MAZE_SIZE_LIMIT));
        self.levels.max_size =
            coerce_size(self.levels.max_size.clamp(self.levels.base_size, MAZE_SIZE_LIMIT));
        self.sampling.floor_trials = self.sampling.floor_trials.max(1);
        self.sampling.far_pair_trials = self.sampling.far_pair_trials.max(1);
        self.player.sanitize();
        self.pursuer.sanitize();
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "heart_maze_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
