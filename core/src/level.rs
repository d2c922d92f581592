use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

const WALL: char = '#';
const PLAYER: char = '@';
const FLOOR: char = ' ';
const FLOOR_ALIASES: [char; 3] = [FLOOR, '-', '_'];
/// Box resting on a target of its own color, in [`Color::ALL`] order.
const BOX_ON_TARGET: [char; Color::COUNT] = ['1', '2', '3', '4', '5'];
/// Player standing on a target of each color, in [`Color::ALL`] order.
const PLAYER_ON_TARGET: [char; Color::COUNT] = ['6', '7', '8', '9', '0'];

/// The demo room the game originally shipped with.
const SAMPLE: &str = "\
##########
#        #
#        #
#   bB @ #
#        #
#        #
#        #
##########";

/// Level description: the static grid plus the initial player and box placements.
///
/// Box ids are assigned in placement order. Deserialization goes through [`Level::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLevel")]
pub struct Level {
    grid: Grid,
    player: Coord2,
    boxes: Vec<(Color, Coord2)>,
}

#[derive(Deserialize)]
struct RawLevel {
    grid: Grid,
    player: Coord2,
    boxes: Vec<(Color, Coord2)>,
}

impl TryFrom<RawLevel> for Level {
    type Error = GameError;

    fn try_from(raw: RawLevel) -> Result<Self> {
        Self::new(raw.grid, raw.player, raw.boxes)
    }
}

impl Level {
    pub fn new(grid: Grid, player: Coord2, boxes: Vec<(Color, Coord2)>) -> Result<Self> {
        if boxes.len() > usize::from(u16::MAX) {
            return Err(GameError::LevelTooLarge);
        }

        let mut occupied: Array2<bool> = Array2::default(grid.size().to_nd_index());
        let positions = core::iter::once(player).chain(boxes.iter().map(|&(_, pos)| pos));
        for coords in positions {
            if grid.cell_at(coords)?.is_wall() {
                return Err(GameError::EntityOnWall);
            }
            let slot = &mut occupied[coords.to_nd_index()];
            if *slot {
                return Err(GameError::OverlappingEntities);
            }
            *slot = true;
        }

        Ok(Self {
            grid,
            player,
            boxes,
        })
    }

    pub fn sample() -> Self {
        SAMPLE.parse().expect("built-in sample level is valid")
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn boxes(&self) -> &[(Color, Coord2)] {
        &self.boxes
    }

    pub fn box_counts(&self) -> ColorMap<CellCount> {
        let mut counts: ColorMap<CellCount> = ColorMap::default();
        for &(color, _) in &self.boxes {
            counts[color] += 1;
        }
        counts
    }

    /// Fresh entity state with every entity at its initial placement.
    pub fn entity_state(&self) -> EntityState {
        EntityState::new(self.grid.size(), self.player, &self.boxes)
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self> {
        let mut rows: Vec<&str> = text
            .lines()
            .skip_while(|line| line.is_empty())
            .collect();
        while rows.last().is_some_and(|line| line.is_empty()) {
            rows.pop();
        }

        let width = rows.first().map_or(0, |row| row.chars().count());
        let height = rows.len();
        if width == 0 || rows.iter().any(|row| row.chars().count() != width) {
            return Err(GameError::InvalidBoardShape);
        }
        if width > Coord::MAX as usize || height > Coord::MAX as usize {
            return Err(GameError::LevelTooLarge);
        }

        let mut cells = Array2::from_elem([width, height], Cell::FLOOR);
        let mut player = None;
        let mut boxes = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let coords = (x as Coord, y as Coord);
                let (cell, placed) = read_symbol(symbol)?;
                cells[coords.to_nd_index()] = cell;
                match placed {
                    Some(Placed::Player) if player.is_some() => {
                        return Err(GameError::MultiplePlayers);
                    }
                    Some(Placed::Player) => player = Some(coords),
                    Some(Placed::Box(color)) => boxes.push((color, coords)),
                    None => {}
                }
            }
        }

        let player = player.ok_or(GameError::MissingPlayer)?;
        Self::new(Grid::new(cells)?, player, boxes)
    }
}

enum Placed {
    Player,
    Box(Color),
}

fn read_symbol(symbol: char) -> Result<(Cell, Option<Placed>)> {
    let on_target = |symbols: &[char; Color::COUNT]| {
        Color::ALL
            .into_iter()
            .find(|color| symbols[color.index()] == symbol)
    };

    if symbol == WALL {
        Ok((Cell::WALL, None))
    } else if symbol == PLAYER {
        Ok((Cell::FLOOR, Some(Placed::Player)))
    } else if FLOOR_ALIASES.contains(&symbol) {
        Ok((Cell::FLOOR, None))
    } else if let Some(color) = on_target(&PLAYER_ON_TARGET) {
        Ok((Cell::target(color), Some(Placed::Player)))
    } else if let Some(color) = on_target(&BOX_ON_TARGET) {
        Ok((Cell::target(color.target_color()), Some(Placed::Box(color))))
    } else {
        let color = Color::from_letter(symbol).ok_or(GameError::UnknownTile(symbol))?;
        if symbol.is_ascii_uppercase() {
            Ok((Cell::FLOOR, Some(Placed::Box(color))))
        } else {
            Ok((Cell::target(color), None))
        }
    }
}

/// Writes one symbol per cell for the given placements.
///
/// A box on a target of another color is written as the bare box and loses the target.
pub(crate) fn write_board(
    f: &mut fmt::Formatter<'_>,
    grid: &Grid,
    player: Coord2,
    boxes: impl Iterator<Item = (Color, Coord2)> + Clone,
) -> fmt::Result {
    let (width, height) = grid.size();
    for y in 0..height {
        if y > 0 {
            f.write_str("\n")?;
        }
        for x in 0..width {
            let coords = (x, y);
            let cell = grid[coords];
            let symbol = if coords == player {
                cell.target_color()
                    .map_or(PLAYER, |target| PLAYER_ON_TARGET[target.index()])
            } else if let Some((color, _)) = boxes.clone().find(|&(_, pos)| pos == coords) {
                match cell.target_color() {
                    Some(target) if color.satisfies(target) => BOX_ON_TARGET[color.index()],
                    _ => color.letter(),
                }
            } else if cell.is_wall() {
                WALL
            } else if let Some(color) = cell.target_color() {
                color.letter().to_ascii_lowercase()
            } else {
                FLOOR
            };
            write!(f, "{symbol}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_board(f, &self.grid, self.player, self.boxes.iter().copied())
    }
}
