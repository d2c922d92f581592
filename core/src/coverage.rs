use serde::Serialize;

use crate::*;

/// Per-color count of boxes resting on a target of their own color.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CoverageTracker {
    counts: ColorMap<CellCount>,
}

impl CoverageTracker {
    pub fn new(grid: &Grid, entities: &EntityState) -> Self {
        Self {
            counts: Self::rescan(grid, entities),
        }
    }

    /// Computes coverage from scratch.
    pub fn rescan(grid: &Grid, entities: &EntityState) -> ColorMap<CellCount> {
        let mut counts: ColorMap<CellCount> = ColorMap::default();
        for pushed in entities.boxes() {
            if is_satisfied_at(grid, pushed.color, pushed.position) {
                counts[pushed.color] += 1;
            }
        }
        counts
    }

    /// Both ends are checked independently so a move onto the same cell nets out to zero.
    pub fn on_box_moved(&mut self, grid: &Grid, color: Color, from: Coord2, to: Coord2) {
        if is_satisfied_at(grid, color, from) {
            let count = &mut self.counts[color];
            debug_assert!(*count > 0, "coverage underflow for {color:?}");
            *count = count.saturating_sub(1);
        }
        if is_satisfied_at(grid, color, to) {
            self.counts[color] += 1;
        }
    }

    pub fn count(&self, color: Color) -> CellCount {
        self.counts[color]
    }

    pub fn total_satisfied(&self) -> CellCount {
        self.counts.values().sum()
    }

    pub fn snapshot(&self) -> ColorMap<CellCount> {
        self.counts
    }

    pub fn is_complete(&self, grid: &Grid) -> bool {
        grid.target_counts()
            .iter()
            .all(|(color, &targets)| self.counts[color] == targets)
    }
}

fn is_satisfied_at(grid: &Grid, color: Color, coords: Coord2) -> bool {
    grid.target_color_at(coords)
        .is_some_and(|target| color.satisfies(target))
}
