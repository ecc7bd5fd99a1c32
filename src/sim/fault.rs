//! Faults the simulation absorbs instead of failing
//!
//! Gameplay never hard-fails mid-session: each fault has a safe default at
//! the site that detects it, and is only logged.

use thiserror::Error;

use super::grid::GridPos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimFault {
    #[error("move from {from} to {to} is blocked")]
    InvalidMove { from: GridPos, to: GridPos },

    #[error("no path from {from} to {to}")]
    Unreachable { from: GridPos, to: GridPos },

    #[error("no floor cell found after {trials} trials")]
    DegenerateSample { trials: u32 },
}

impl SimFault {
    /// Log at a level matching how surprising the fault is.
    ///
    /// Blocked moves are ordinary player input; the others mean a maze
    /// invariant was broken upstream.
    pub fn report(&self) {
        match self {
            SimFault::InvalidMove { .. } => log::debug!("{self}"),
            SimFault::Unreachable { .. } | SimFault::DegenerateSample { .. } => {
                log::warn!("{self}")
            }
        }
    }
}
