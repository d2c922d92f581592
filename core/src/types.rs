use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for box, target and move counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// One of the four directions the player can be asked to move in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit displacement `(dcol, drow)`, rows growing downwards.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Down
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_stays_in_bounds() {
        let bounds = (3, 2);

        assert_eq!(apply_delta((0, 0), Direction::Right.delta(), bounds), Some((1, 0)));
        assert_eq!(apply_delta((0, 0), Direction::Left.delta(), bounds), None);
        assert_eq!(apply_delta((0, 0), Direction::Up.delta(), bounds), None);
        assert_eq!(apply_delta((2, 1), Direction::Right.delta(), bounds), None);
        assert_eq!(apply_delta((2, 1), Direction::Down.delta(), bounds), None);
        assert_eq!(apply_delta((2, 1), Direction::Up.delta(), bounds), Some((2, 0)));
    }

    #[test]
    fn opposite_directions_cancel_out() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn direction_symbols_parse_case_insensitively() {
        assert_eq!(Direction::from_symbol('u'), Some(Direction::Up));
        assert_eq!(Direction::from_symbol('R'), Some(Direction::Right));
        assert_eq!(Direction::from_symbol('x'), None);
        for direction in Direction::ALL {
            assert_eq!(Direction::from_symbol(direction.symbol()), Some(direction));
        }
    }
}
