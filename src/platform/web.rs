//! JS-facing game handle
//!
//! The page owns rendering and input. It forwards d-pad presses to
//! `tryMove`, calls `tick` from `requestAnimationFrame`, and draws whatever
//! `snapshot` returns.

use wasm_bindgen::prelude::*;

use super::now_ms;
use crate::settings::{Settings, TimingPreset};
use crate::sim::{Direction, GameState, RenderSnapshot, TickInput, tick, try_move};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Heart Maze starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// New run; a missing seed is drawn from `Math.random()`
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> WebGame {
        let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u32);
        log::info!("Started new game with seed: {}", seed);
        WebGame {
            state: GameState::with_settings(seed as u64, Settings::load()),
        }
    }

    /// Apply a d-pad press immediately; returns `{moved, reason}` as JSON
    #[wasm_bindgen(js_name = tryMove)]
    pub fn try_move(&mut self, dir: &str) -> Result<String, JsError> {
        let dir = Direction::from_str(dir)
            .ok_or_else(|| JsError::new(&format!("unknown direction: {dir}")))?;
        let outcome = try_move(&mut self.state, dir, now_ms());
        Ok(serde_json::to_string(&outcome)?)
    }

    /// Per-frame update; pass the `requestAnimationFrame` timestamp
    pub fn tick(&mut self, now_ms: f64) {
        tick(&mut self.state, &TickInput::default(), now_ms);
    }

    /// Render state as JSON
    pub fn snapshot(&self, now_ms: f64) -> Result<String, JsError> {
        let snapshot = RenderSnapshot::capture(&self.state, now_ms);
        Ok(serde_json::to_string(&snapshot)?)
    }

    // Level commands apply immediately so a following `tryMove` or
    // `snapshot` already sees the new level.

    pub fn advance(&mut self) {
        self.state.advance();
    }

    pub fn retry(&mut self) {
        self.state.retry();
    }

    pub fn restart(&mut self) {
        self.state.restart();
    }

    /// Switch timing preset (`"unified"` / `"reference"`) and persist it
    #[wasm_bindgen(js_name = setTiming)]
    pub fn set_timing(&mut self, preset: &str) -> Result<(), JsError> {
        let preset = TimingPreset::from_str(preset)
            .ok_or_else(|| JsError::new(&format!("unknown timing preset: {preset}")))?;
        self.state.set_timing(preset);
        self.state.settings.save();
        Ok(())
    }

    /// Suggested d-pad direction toward the pursuer
    pub fn hint(&self) -> Option<String> {
        self.state.hint().map(|d| d.as_str().to_string())
    }
}
