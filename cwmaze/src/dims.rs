use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Pair of `(row, col)`.
///
/// Used both for cell positions and for grid sizes, where it reads as `(rows, cols)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    pub fn manhattan(self, other: Dims) -> i32 {
        (self - other).abs_sum()
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    /// Row-major iteration over `from..to` in both axes.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.0..to.0).flat_map(move |row| (from.1..to.1).map(move |col| Dims(row, col)))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}

impl AddAssign for Dims {
    fn add_assign(&mut self, other: Dims) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl SubAssign for Dims {
    fn sub_assign(&mut self, other: Dims) {
        self.0 -= other.0;
        self.1 -= other.1;
    }
}

impl From<(i32, i32)> for Dims {
    fn from(tuple: (i32, i32)) -> Self {
        Dims(tuple.0, tuple.1)
    }
}

impl From<Dims> for (i32, i32) {
    fn from(val: Dims) -> Self {
        (val.0, val.1)
    }
}

impl From<(usize, usize)> for Dims {
    fn from(tuple: (usize, usize)) -> Self {
        Dims(tuple.0 as i32, tuple.1 as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::Dims;

    #[test]
    fn manhattan_distance() {
        assert_eq!(Dims(0, 0).manhattan(Dims(2, 3)), 5);
        assert_eq!(Dims(4, 1).manhattan(Dims(3, 1)), 1);
        assert_eq!(Dims(1, 1).manhattan(Dims(1, 1)), 0);
    }

    #[test]
    fn iter_fill_is_row_major() {
        let cells: Vec<_> = Dims::iter_fill(Dims::ZERO, Dims(2, 2)).collect();
        assert_eq!(cells, vec![Dims(0, 0), Dims(0, 1), Dims(1, 0), Dims(1, 1)]);
    }

    #[test]
    fn display_matches_file_notation() {
        assert_eq!(Dims(3, 12).to_string(), "3,12");
    }
}
