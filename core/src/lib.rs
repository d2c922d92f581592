#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use color::*;
pub use coverage::*;
pub use engine::*;
pub use entities::*;
pub use error::*;
pub use grid::*;
pub use level::*;
pub use observation::*;
pub use tile::*;
pub use types::*;

pub mod resolver;

mod color;
mod coverage;
mod engine;
mod entities;
mod error;
mod grid;
mod level;
mod observation;
mod tile;
mod types;

/// When the engine accepts the next move after one has been accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveGuard {
    /// Every accepted move stays in flight until [`PuzzleEngine::settle`] is called.
    UntilSettled,
    /// Moves settle as soon as they are applied.
    Immediate,
}

impl Default for MoveGuard {
    fn default() -> Self {
        Self::UntilSettled
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub move_guard: MoveGuard,
}

impl EngineConfig {
    pub const fn immediate() -> Self {
        Self {
            move_guard: MoveGuard::Immediate,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// A previous move has not settled yet.
    AlreadyMoving,
    /// The player would walk into a wall or off the grid.
    Wall,
    /// The box in front of the player has a wall, another box or the grid edge behind it.
    BoxBlocked,
}

/// Outcome of a move request, telling the presentation layer what to animate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Rejected(RejectReason),
    PlayerMoved {
        from: Coord2,
        to: Coord2,
    },
    PlayerAndBoxMoved {
        player_from: Coord2,
        player_to: Coord2,
        box_id: BoxId,
        box_from: Coord2,
        box_to: Coord2,
    },
}

impl MoveOutcome {
    /// Whether this outcome changed any entity position
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub const fn is_push(self) -> bool {
        matches!(self, Self::PlayerAndBoxMoved { .. })
    }

    pub const fn rejection(self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    /// The same movement played backwards.
    pub const fn reversed(self) -> Self {
        use MoveOutcome::*;
        match self {
            Rejected(reason) => Rejected(reason),
            PlayerMoved { from, to } => PlayerMoved { from: to, to: from },
            PlayerAndBoxMoved {
                player_from,
                player_to,
                box_id,
                box_from,
                box_to,
            } => PlayerAndBoxMoved {
                player_from: player_to,
                player_to: player_from,
                box_id,
                box_from: box_to,
                box_to: box_from,
            },
        }
    }
}
