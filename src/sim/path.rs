//! Breadth-first shortest paths over the maze floor
//!
//! Every query searches from scratch. The maze is static within a level and
//! a search touches at most `size²` cells.

use std::collections::VecDeque;

use super::grid::GridPos;
use super::maze::Maze;

/// Predecessor table of a BFS rooted at `from`, stopped once `to` is dequeued
struct Search {
    prev: Vec<Option<usize>>,
    start: usize,
    goal: usize,
}

impl Search {
    fn run(maze: &Maze, from: GridPos, to: GridPos) -> Option<Self> {
        if !maze.is_floor(from) || !maze.is_floor(to) {
            return None;
        }
        let start = maze.index(from)?;
        let goal = maze.index(to)?;

        let mut prev = vec![None; maze.size() * maze.size()];
        let mut seen = vec![false; prev.len()];
        let mut queue = VecDeque::from([start]);
        seen[start] = true;

        while let Some(cur) = queue.pop_front() {
            if cur == goal {
                break;
            }
            for next in maze.open_neighbors(maze.pos_at(cur)) {
                let Some(ni) = maze.index(next) else {
                    continue;
                };
                if seen[ni] {
                    continue;
                }
                seen[ni] = true;
                prev[ni] = Some(cur);
                queue.push_back(ni);
            }
        }

        seen[goal].then_some(Self { prev, start, goal })
    }

    /// Cells from goal back to (excluding) start
    fn backtrack(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.goal), move |&i| self.prev[i])
            .take_while(move |&i| i != self.start)
    }
}

/// First cell after `from` on a shortest path to `to`.
///
/// `None` when `from == to` or `to` is unreachable.
pub fn next_step(maze: &Maze, from: GridPos, to: GridPos) -> Option<GridPos> {
    if from == to {
        return None;
    }
    let search = Search::run(maze, from, to)?;
    search.backtrack().last().map(|i| maze.pos_at(i))
}

/// Number of steps on a shortest path, `Some(0)` for identical floor cells
pub fn distance(maze: &Maze, from: GridPos, to: GridPos) -> Option<usize> {
    let search = Search::run(maze, from, to)?;
    Some(search.backtrack().count())
}

/// Full shortest path including both endpoints
pub fn shortest_path(maze: &Maze, from: GridPos, to: GridPos) -> Option<Vec<GridPos>> {
    let search = Search::run(maze, from, to)?;
    let mut path: Vec<GridPos> = search.backtrack().map(|i| maze.pos_at(i)).collect();
    path.push(from);
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn corridor() -> Maze {
        Maze::from_ascii(&[
            "#######",
            "#.....#",
            "#####.#",
            "#.....#",
            "#.#####",
            "#.....#",
            "#######",
        ])
        .unwrap()
    }

    #[test]
    fn test_next_step_follows_corridor() {
        let maze = corridor();
        let from = GridPos::new(1, 1);
        let to = GridPos::new(5, 5);
        assert_eq!(next_step(&maze, from, to), Some(GridPos::new(2, 1)));
        assert_eq!(distance(&maze, from, to), Some(16));
    }

    #[test]
    fn test_same_cell_has_no_step() {
        let maze = corridor();
        let p = GridPos::new(3, 3);
        assert_eq!(next_step(&maze, p, p), None);
        assert_eq!(distance(&maze, p, p), Some(0));
        assert_eq!(shortest_path(&maze, p, p), Some(vec![p]));
    }

    #[test]
    fn test_unreachable_and_walls() {
        let maze = Maze::from_ascii(&["#####", "#.#.#", "#####", "#...#", "#####"]).unwrap();
        let a = GridPos::new(1, 1);
        let b = GridPos::new(3, 1);
        assert_eq!(next_step(&maze, a, b), None);
        assert_eq!(distance(&maze, a, b), None);
        // Wall and out-of-bounds endpoints never resolve
        assert_eq!(next_step(&maze, a, GridPos::new(2, 1)), None);
        assert_eq!(next_step(&maze, GridPos::new(-1, 0), a), None);
    }

    #[test]
    fn test_expansion_order_breaks_ties() {
        // Open room: +x is expanded first, so the first step goes right
        let maze = Maze::from_ascii(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap();
        let step = next_step(&maze, GridPos::new(1, 1), GridPos::new(3, 3));
        assert_eq!(step, Some(GridPos::new(2, 1)));
    }

    #[test]
    fn test_shortest_path_endpoints() {
        let maze = corridor();
        let path = shortest_path(&maze, GridPos::new(1, 1), GridPos::new(1, 5)).unwrap();
        assert_eq!(path.first(), Some(&GridPos::new(1, 1)));
        assert_eq!(path.last(), Some(&GridPos::new(1, 5)));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    proptest! {
        #[test]
        fn prop_iterated_steps_match_distance(
            size in 5usize..17,
            seed in any::<u64>(),
            pick_a in any::<prop::sample::Index>(),
            pick_b in any::<prop::sample::Index>(),
        ) {
            let maze = Maze::generate(size, seed);
            let floors: Vec<GridPos> = maze.floor_cells().collect();
            let a = floors[pick_a.index(floors.len())];
            let b = floors[pick_b.index(floors.len())];

            prop_assert_eq!(next_step(&maze, a, b).is_none(), a == b);

            let expected = distance(&maze, a, b).unwrap();
            let mut cur = a;
            let mut steps = 0;
            while let Some(next) = next_step(&maze, cur, b) {
                prop_assert!(cur.is_adjacent(next));
                prop_assert!(maze.is_floor(next));
                cur = next;
                steps += 1;
                prop_assert!(steps <= expected);
            }
            prop_assert_eq!(cur, b);
            prop_assert_eq!(steps, expected);
        }
    }
}
