//! Pursuer steering: one shortest-path step per player action

use super::fault::SimFault;
use super::grid::{Direction, GridPos};
use super::maze::Maze;
use super::path::next_step;

/// What the pursuer did in response to a player move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitStep {
    /// Already on the target, or no path exists
    Held,
    Stepped {
        from: GridPos,
        to: GridPos,
        facing: Direction,
    },
}

/// Decide the pursuer's single step toward `target`.
///
/// Pursuit speed is capped at one cell per call; callers invoke this once
/// per committed player move.
pub fn pursue(maze: &Maze, pursuer: GridPos, target: GridPos) -> PursuitStep {
    match next_step(maze, pursuer, target) {
        Some(to) if to != pursuer => PursuitStep::Stepped {
            from: pursuer,
            to,
            facing: Direction::from_step(pursuer, to),
        },
        Some(_) => PursuitStep::Held,
        None => {
            if pursuer != target {
                SimFault::Unreachable {
                    from: pursuer,
                    to: target,
                }
                .report();
            }
            PursuitStep::Held
        }
    }
}
