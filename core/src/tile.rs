use serde::{Deserialize, Serialize};

use crate::{Color, GameError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum CellKind {
    Floor,
    Wall,
}

/// Static classification of a single grid cell.
///
/// Only floor cells can be targets; the constructors and deserialization keep walls target-free.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    kind: CellKind,
    target: Option<Color>,
}

impl Cell {
    pub const FLOOR: Cell = Cell {
        kind: CellKind::Floor,
        target: None,
    };

    pub const WALL: Cell = Cell {
        kind: CellKind::Wall,
        target: None,
    };

    pub const fn target(color: Color) -> Self {
        Self {
            kind: CellKind::Floor,
            target: Some(color),
        }
    }

    pub const fn is_wall(self) -> bool {
        matches!(self.kind, CellKind::Wall)
    }

    pub const fn target_color(self) -> Option<Color> {
        self.target
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::FLOOR
    }
}

#[derive(Deserialize)]
struct RawCell {
    kind: CellKind,
    target: Option<Color>,
}

impl TryFrom<RawCell> for Cell {
    type Error = GameError;

    fn try_from(raw: RawCell) -> Result<Self> {
        match (raw.kind, raw.target) {
            (CellKind::Wall, Some(_)) => Err(GameError::TargetOnWall),
            (CellKind::Wall, None) => Ok(Self::WALL),
            (CellKind::Floor, None) => Ok(Self::FLOOR),
            (CellKind::Floor, Some(color)) => Ok(Self::target(color)),
        }
    }
}
