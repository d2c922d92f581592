use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only snapshot of an engine for presentation layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub player: Player,
    pub boxes: Vec<PushBox>,
    pub coverage: ColorMap<CellCount>,
    pub targets: ColorMap<CellCount>,
    pub solved: bool,
    pub move_in_progress: bool,
    pub moves: u32,
    pub pushes: u32,
}

impl Observation {
    pub fn from_engine(engine: &PuzzleEngine) -> Self {
        Self {
            size: engine.grid().size(),
            player: engine.entities().player(),
            boxes: engine.boxes().to_vec(),
            coverage: engine.coverage_snapshot(),
            targets: engine.target_counts(),
            solved: engine.is_solved(),
            move_in_progress: engine.is_move_in_progress(),
            moves: engine.move_count(),
            pushes: engine.push_count(),
        }
    }

    /// Targets of `color` still waiting for a box.
    pub fn uncovered(&self, color: Color) -> CellCount {
        self.targets[color].saturating_sub(self.coverage[color])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_reports_progress() {
        let mut engine = PuzzleEngine::with_config(Level::sample(), EngineConfig::immediate());
        engine.request_move(Direction::Left);

        let obs = Observation::from_engine(&engine);

        assert_eq!(obs.size, (10, 8));
        assert_eq!(obs.player.position, (6, 3));
        assert_eq!(obs.player.facing, Direction::Left);
        assert_eq!(obs.targets[Color::Blue], 1);
        assert_eq!(obs.uncovered(Color::Blue), 1);
        assert!(!obs.solved);
        assert_eq!(obs.moves, 1);

        engine.request_move(Direction::Left);
        let obs = Observation::from_engine(&engine);

        assert_eq!(obs.boxes[0].position, (4, 3));
        assert_eq!(obs.coverage[Color::Blue], 1);
        assert_eq!(obs.uncovered(Color::Blue), 0);
        assert!(obs.solved);
        assert_eq!(obs.pushes, 1);
    }
}
