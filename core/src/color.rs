use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

/// Color shared by boxes and the targets they score on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Orange,
    Red,
    Blue,
    Green,
    Grey,
}

impl Color {
    pub const COUNT: usize = 5;

    pub const ALL: [Color; Self::COUNT] = [
        Self::Orange,
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Grey,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Color of the targets a box of this color is satisfied on.
    pub const fn target_color(self) -> Color {
        match self {
            Self::Orange => Self::Orange,
            Self::Red => Self::Red,
            Self::Blue => Self::Blue,
            Self::Green => Self::Green,
            Self::Grey => Self::Grey,
        }
    }

    /// Whether a box of this color scores on a target of `target`.
    pub const fn satisfies(self, target: Color) -> bool {
        self.target_color().index() == target.index()
    }

    /// Letter used for this color in the level text format, uppercase for boxes and lowercase
    /// for targets.
    pub const fn letter(self) -> char {
        match self {
            Self::Orange => 'O',
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Grey => 'Y',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.letter() == letter.to_ascii_uppercase())
    }
}

/// Total map from [`Color`] to `T`, backed by a fixed array.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap<T> {
    values: [T; Color::COUNT],
}

impl<T> ColorMap<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.values.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Copy> ColorMap<T> {
    pub const fn splat(value: T) -> Self {
        Self {
            values: [value; Color::COUNT],
        }
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        &self.values[color.index()]
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.values[color.index()]
    }
}
