//! Read-only view of the game for the render layer

use glam::Vec2;
use serde::Serialize;

use super::grid::{Direction, GridPos};
use super::maze::Maze;
use super::motion::AnimationState;
use super::state::GameState;
use crate::settings::CharacterProfile;

/// How to draw one character this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterView {
    pub cell: GridPos,
    /// Continuous position in grid units
    pub render: Vec2,
    pub facing: Direction,
    pub frame: u32,
    pub mirrored: bool,
    pub walking: bool,
}

impl CharacterView {
    pub fn of(anim: &AnimationState, profile: &CharacterProfile, now_ms: f64) -> Self {
        let frame = anim.frame(now_ms, profile);
        Self {
            cell: anim.logical(),
            render: anim.render_at(now_ms),
            facing: anim.facing(),
            frame: frame.index,
            mirrored: frame.mirrored,
            walking: anim.is_walking(now_ms),
        }
    }
}

/// Everything the render layer reads once per frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub level: u32,
    pub step_count: u32,
    pub won: bool,
    pub maze: &'a Maze,
    pub player: CharacterView,
    pub pursuer: CharacterView,
}

impl<'a> RenderSnapshot<'a> {
    pub fn capture(state: &'a GameState, now_ms: f64) -> Self {
        Self {
            level: state.level.level,
            step_count: state.level.step_count,
            won: state.level.won,
            maze: &state.level.maze,
            player: CharacterView::of(&state.player_anim, &state.settings.player, now_ms),
            pursuer: CharacterView::of(&state.pursuer_anim, &state.settings.pursuer, now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::try_move;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(555);
        let dir = Direction::ALL
            .into_iter()
            .find(|d| state.level.maze.is_floor(state.level.player.step(*d)))
            .unwrap();
        try_move(&mut state, dir, 0.0);

        let snap = RenderSnapshot::capture(&state, 50.0);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.step_count, 1);
        assert_eq!(snap.player.cell, state.level.player);
        assert_eq!(snap.player.facing, dir);
        assert!(snap.player.walking);
        assert_eq!(snap.player.mirrored, dir == Direction::Left);
        assert_eq!(snap.pursuer.cell, state.level.pursuer);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(9);
        let json = serde_json::to_value(RenderSnapshot::capture(&state, 0.0)).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["won"], false);
        assert_eq!(json["player"]["facing"], "down");
        assert_eq!(json["maze"]["size"], 9);
    }
}
