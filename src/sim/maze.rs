//! Perfect maze generation
//!
//! The grid is `size × size` with an odd `size`. Lattice cell `(cx, cy)`
//! lives at grid `(2cx + 1, 2cy + 1)`; the cell between two neighbouring
//! lattice cells is their connector. Carving opens every lattice cell and
//! exactly `L - 1` connectors, so the floor is a spanning tree.

use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, GridPos};
use crate::consts::MIN_MAZE_SIZE;

/// A single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

/// Immutable wall/floor grid for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    size: usize,
    /// Seed the grid was carved from
    seed: u64,
    /// Row-major tiles
    tiles: Vec<Tile>,
}

/// Coerce a requested edge length to an odd value of at least 5
pub fn coerce_size(requested: usize) -> usize {
    (requested | 1).max(MIN_MAZE_SIZE)
}

/// DFS frame standing in for one level of the recursive carve
struct CarveFrame {
    cell: (usize, usize),
    dirs: [Direction; 4],
    next: usize,
}

impl Maze {
    /// Carve a perfect maze. Same `(size, seed)` always yields the same grid.
    pub fn generate(odd_size: usize, seed: u64) -> Self {
        let size = coerce_size(odd_size);
        let lattice = (size - 1) / 2;
        let mut maze = Self {
            size,
            seed,
            tiles: vec![Tile::Wall; size * size],
        };

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut visited = vec![false; lattice * lattice];

        let start = (rng.random_range(0..lattice), rng.random_range(0..lattice));
        let mut stack = vec![maze.open_lattice_cell(start, &mut visited, lattice, &mut rng)];

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.dirs.len() {
                stack.pop();
                continue;
            }
            let dir = frame.dirs[frame.next];
            frame.next += 1;
            let (cx, cy) = frame.cell;

            let (dx, dy) = dir.delta();
            let nx = cx as i32 + dx;
            let ny = cy as i32 + dy;
            if nx < 0 || ny < 0 || nx >= lattice as i32 || ny >= lattice as i32 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if visited[ny * lattice + nx] {
                continue;
            }

            // Knock down the connector between the two lattice cells
            let connector = GridPos::new(2 * cx as i32 + 1 + dx, 2 * cy as i32 + 1 + dy);
            maze.set(connector, Tile::Floor);

            let frame = maze.open_lattice_cell((nx, ny), &mut visited, lattice, &mut rng);
            stack.push(frame);
        }

        maze
    }

    fn open_lattice_cell(
        &mut self,
        cell: (usize, usize),
        visited: &mut [bool],
        lattice: usize,
        rng: &mut Pcg32,
    ) -> CarveFrame {
        let (cx, cy) = cell;
        visited[cy * lattice + cx] = true;
        self.set(Self::lattice_to_grid(cx, cy), Tile::Floor);

        let mut dirs = [
            Direction::Right,
            Direction::Left,
            Direction::Down,
            Direction::Up,
        ];
        dirs.shuffle(rng);
        CarveFrame { cell, dirs, next: 0 }
    }

    /// Build a maze from ASCII rows (`#` wall, anything else floor).
    ///
    /// Returns `None` unless the rows form a square.
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.chars().count() != size) {
            return None;
        }
        let tiles = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|c| if c == '#' { Tile::Wall } else { Tile::Floor })
            .collect();
        Some(Self {
            size,
            seed: 0,
            tiles,
        })
    }

    /// Grid position of lattice cell `(cx, cy)`
    #[inline]
    pub fn lattice_to_grid(cx: usize, cy: usize) -> GridPos {
        GridPos::new(2 * cx as i32 + 1, 2 * cy as i32 + 1)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Lattice cells per edge
    pub fn lattice_size(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Row-major index of `pos`, `None` when out of bounds
    #[inline]
    pub fn index(&self, pos: GridPos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    /// Inverse of [`Maze::index`]
    #[inline]
    pub fn pos_at(&self, index: usize) -> GridPos {
        GridPos::new((index % self.size) as i32, (index / self.size) as i32)
    }

    pub fn tile(&self, pos: GridPos) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// In bounds and open
    #[inline]
    pub fn is_floor(&self, pos: GridPos) -> bool {
        self.tile(pos) == Some(Tile::Floor)
    }

    fn set(&mut self, pos: GridPos, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Tile::Floor)
            .map(move |(i, _)| self.pos_at(i))
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Floor).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size)
    }

    /// Floor neighbours of `pos` in the fixed expansion order `+x, -x, +y, -y`
    pub fn open_neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        [
            Direction::Right,
            Direction::Left,
            Direction::Down,
            Direction::Up,
        ]
        .into_iter()
        .map(move |d| pos.step(d))
        .filter(move |p| self.is_floor(*p))
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for tile in row {
                let c = match tile {
                    Tile::Wall => '#',
                    Tile::Floor => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
