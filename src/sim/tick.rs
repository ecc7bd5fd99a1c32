//! Input handling and the per-frame tick
//!
//! Moves are applied synchronously: by the time `try_move` returns, both
//! characters' logical cells and animations reflect the move. `tick` only
//! advances derived render state.

use serde::{Deserialize, Serialize};

use super::fault::SimFault;
use super::grid::Direction;
use super::pursuit::{PursuitStep, pursue};
use super::state::GameState;

/// Why a move was or wasn't applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveReason {
    Ok,
    BlockedByWall,
    AlreadyWon,
}

/// Response to a move intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: bool,
    pub reason: MoveReason,
}

impl MoveOutcome {
    fn rejected(reason: MoveReason) -> Self {
        Self {
            moved: false,
            reason,
        }
    }
}

/// One-shot commands collected between frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// D-pad press
    pub step: Option<Direction>,
    /// Next level (win screen)
    pub advance: bool,
    /// Same level, new maze
    pub retry: bool,
    /// Back to level 1 (win screen)
    pub restart: bool,
}

/// Apply a player move, then the pursuer's answer, then the win check
pub fn try_move(state: &mut GameState, dir: Direction, now_ms: f64) -> MoveOutcome {
    if state.level.won {
        return MoveOutcome::rejected(MoveReason::AlreadyWon);
    }

    let from = state.level.player;
    let to = from.step(dir);
    if !state.level.maze.is_floor(to) {
        SimFault::InvalidMove { from, to }.report();
        return MoveOutcome::rejected(MoveReason::BlockedByWall);
    }

    state.level.player = to;
    state.level.step_count += 1;
    state.player_anim.commit(to, now_ms, &state.settings.player);
    log::debug!("Player {} to ({}, {})", dir.as_str(), to.x, to.y);

    if let PursuitStep::Stepped { to: next, facing, .. } =
        pursue(&state.level.maze, state.level.pursuer, to)
    {
        state.level.pursuer = next;
        state.pursuer_anim.commit(next, now_ms, &state.settings.pursuer);
        log::debug!("Pursuer {} to ({}, {})", facing.as_str(), next.x, next.y);
    }

    if state.level.pursuer == state.level.player {
        state.level.won = true;
        log::info!(
            "Level {} won in {} steps",
            state.level.level,
            state.level.step_count
        );
    }

    MoveOutcome {
        moved: true,
        reason: MoveReason::Ok,
    }
}

/// Advance one display frame: apply queued commands, then animate
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Option<MoveOutcome> {
    if input.restart {
        state.restart();
    } else if input.advance {
        state.advance();
    } else if input.retry {
        state.retry();
    }

    let outcome = input.step.map(|dir| try_move(state, dir, now_ms));

    state.player_anim.update(now_ms, &state.settings.player);
    state.pursuer_anim.update(now_ms, &state.settings.pursuer);

    outcome
}
