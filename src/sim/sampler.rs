//! Random floor placement for start/goal cells

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::fault::SimFault;
use super::grid::GridPos;
use super::maze::Maze;
use crate::consts::DEFAULT_FLOOR;
use crate::manhattan;
use crate::settings::SamplingTuning;

/// Draw uniformly over the whole grid until a floor cell turns up.
///
/// Falls back to `(1, 1)` once the trial budget is spent.
fn draw_floor(maze: &Maze, rng: &mut Pcg32, trials: u32) -> GridPos {
    let size = maze.size() as i32;
    for _ in 0..trials {
        let pos = GridPos::new(rng.random_range(0..size), rng.random_range(0..size));
        if maze.is_floor(pos) {
            return pos;
        }
    }
    SimFault::DegenerateSample { trials }.report();
    DEFAULT_FLOOR.into()
}

/// A random floor cell of `maze`
pub fn sample_floor(maze: &Maze, seed: u64) -> GridPos {
    sample_floor_with(maze, seed, &SamplingTuning::default())
}

pub fn sample_floor_with(maze: &Maze, seed: u64, tuning: &SamplingTuning) -> GridPos {
    let mut rng = Pcg32::seed_from_u64(seed);
    draw_floor(maze, &mut rng, tuning.floor_trials)
}

/// Two floor cells that are far apart in Manhattan distance.
///
/// This is a sampled approximation; it does not compute the maze diameter.
pub fn sample_far_pair(maze: &Maze, seed: u64) -> (GridPos, GridPos) {
    sample_far_pair_with(maze, seed, &SamplingTuning::default())
}

pub fn sample_far_pair_with(
    maze: &Maze,
    seed: u64,
    tuning: &SamplingTuning,
) -> (GridPos, GridPos) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let a = draw_floor(maze, &mut rng, tuning.floor_trials);
    let mut b = draw_floor(maze, &mut rng, tuning.floor_trials);
    let mut best = None;

    for _ in 0..tuning.far_pair_trials {
        let candidate = draw_floor(maze, &mut rng, tuning.floor_trials);
        let d = manhattan(a, candidate);
        if best.is_none_or(|best| d > best) {
            best = Some(d);
            b = candidate;
        }
    }

    log::debug!(
        "Far pair ({}, {}) -> ({}, {}), manhattan {}",
        a.x,
        a.y,
        b.x,
        b.y,
        manhattan(a, b)
    );
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_floor_hits_floor() {
        let maze = Maze::generate(11, 5);
        for seed in 0..50 {
            assert!(maze.is_floor(sample_floor(&maze, seed)));
        }
    }

    #[test]
    fn test_sample_floor_is_deterministic() {
        let maze = Maze::generate(9, 5);
        assert_eq!(sample_floor(&maze, 42), sample_floor(&maze, 42));
    }

    #[test]
    fn test_degenerate_maze_falls_back() {
        let solid = Maze::from_ascii(&["#####"; 5]).unwrap();
        assert_eq!(sample_floor(&solid, 1), GridPos::new(1, 1));

        let tuning = SamplingTuning {
            floor_trials: 10,
            far_pair_trials: 3,
        };
        assert_eq!(
            sample_far_pair_with(&solid, 1, &tuning),
            (GridPos::new(1, 1), GridPos::new(1, 1))
        );
    }

    #[test]
    fn test_far_pair_is_far() {
        let maze = Maze::generate(11, 17);
        let (a, b) = sample_far_pair(&maze, 3);
        assert!(maze.is_floor(a));
        assert!(maze.is_floor(b));

        // With 1200 candidates the best one should beat a typical single draw
        let farthest = maze.floor_cells().map(|c| manhattan(a, c)).max().unwrap();
        assert!(manhattan(a, b) * 2 >= farthest);
        assert!(manhattan(a, b) > 0);
    }

    #[test]
    fn test_far_pair_is_deterministic() {
        let maze = Maze::generate(9, 8);
        assert_eq!(sample_far_pair(&maze, 77), sample_far_pair(&maze, 77));
    }
}
