//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Fixed neighbour expansion order
//! - Time passed in by the caller, never read from a global clock
//! - No rendering or platform dependencies

pub mod fault;
pub mod grid;
pub mod maze;
pub mod motion;
pub mod path;
pub mod pursuit;
pub mod sampler;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use fault::SimFault;
pub use grid::{Direction, GridPos};
pub use maze::{Maze, Tile};
pub use motion::{AnimationState, Cadence, FrameSequences, MotionPhase, MovementTween, SpriteFrame};
pub use path::{distance, next_step, shortest_path};
pub use pursuit::{PursuitStep, pursue};
pub use sampler::{sample_far_pair, sample_floor};
pub use snapshot::{CharacterView, RenderSnapshot};
pub use state::{GameState, LevelState};
pub use tick::{MoveOutcome, MoveReason, TickInput, tick, try_move};
