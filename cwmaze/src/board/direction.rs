use std::fmt;

use crate::dims::Dims;

/// Move between two grid-adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Every direction in the order neighbours are enumerated.
    ///
    /// Both solvers break ties with this order, so traces depend on it.
    pub const fn get_in_order() -> [Direction; 4] {
        use Direction::*;
        [Up, Left, Down, Right]
    }

    pub fn to_coord(self) -> Dims {
        match self {
            Self::Up => Dims(-1, 0),
            Self::Left => Dims(0, -1),
            Self::Down => Dims(1, 0),
            Self::Right => Dims(0, 1),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Left => "left",
            Self::Down => "down",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selects one of the two wall matrices of a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallKind {
    /// Walls above and below cells, `(rows + 1) x cols`.
    Horizontal,
    /// Walls left and right of cells, `rows x (cols + 1)`.
    Vertical,
}

impl WallKind {
    /// Character marking a present wall of this kind in maze files.
    pub fn marker(self) -> char {
        match self {
            Self::Horizontal => '-',
            Self::Vertical => '|',
        }
    }
}

impl fmt::Display for WallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}
