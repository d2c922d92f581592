use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Static floor, wall and target layout of a level.
///
/// Only the cells are serialized; deserialization runs the same checks as [`Grid::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawGrid", try_from = "RawGrid")]
pub struct Grid {
    cells: Array2<Cell>,
    target_counts: ColorMap<CellCount>,
}

#[derive(Serialize, Deserialize)]
struct RawGrid {
    cells: Array2<Cell>,
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self { cells: grid.cells }
    }
}

impl TryFrom<RawGrid> for Grid {
    type Error = GameError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Self::new(raw.cells)
    }
}

impl Grid {
    /// Wraps a `[col, row]` shaped cell array.
    pub fn new(cells: Array2<Cell>) -> Result<Self> {
        let (width, height) = cells.dim();
        if width == 0 || height == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if width > Coord::MAX as usize || height > Coord::MAX as usize {
            return Err(GameError::LevelTooLarge);
        }

        let mut target_counts: ColorMap<CellCount> = ColorMap::default();
        for color in cells.iter().filter_map(|cell| cell.target_color()) {
            target_counts[color] += 1;
        }

        let grid = Self {
            cells,
            target_counts,
        };
        if !grid.is_boundary_walled() {
            log::warn!("Level boundary is not fully walled, grid edges will block movement");
        }
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        // `new` guarantees both axes fit in a `Coord`
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Out of range coordinates count as walls.
    pub fn is_wall(&self, coords: Coord2) -> bool {
        self.cell_at(coords).map_or(true, Cell::is_wall)
    }

    pub fn target_color_at(&self, coords: Coord2) -> Option<Color> {
        self.cell_at(coords).ok().and_then(Cell::target_color)
    }

    /// The cell next to `coords` in `direction`, if it is part of the grid.
    pub fn neighbor(&self, coords: Coord2, direction: Direction) -> Option<Coord2> {
        apply_delta(coords, direction.delta(), self.size())
    }

    pub fn target_counts(&self) -> ColorMap<CellCount> {
        self.target_counts
    }

    pub fn total_targets(&self) -> CellCount {
        self.target_counts.values().sum()
    }

    pub fn iter_targets(&self) -> impl Iterator<Item = (Coord2, Color)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((x, y), cell)| Some(((x as Coord, y as Coord), cell.target_color()?)))
    }

    pub fn is_boundary_walled(&self) -> bool {
        let (width, height) = self.size();
        let is_wall = |coords: Coord2| self[coords].is_wall();
        let horizontal = (0..width).all(|x| is_wall((x, 0)) && is_wall((x, height - 1)));
        let vertical = (0..height).all(|y| is_wall((0, y)) && is_wall((width - 1, y)));
        horizontal && vertical
    }
}

/// Panics when `coords` lies outside the grid; use [`Grid::cell_at`] for checked access.
impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
