use std::ops;

use crate::dims::Dims;

/// Dense row-major grid indexed by `Dims(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Dims {
        Dims(self.rows as i32, self.cols as i32)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        if !pos.all_non_negative() {
            return None;
        }

        let (row, col) = (pos.0 as usize, pos.1 as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }

        Some(row * self.cols + col)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Dims((idx / self.cols) as i32, (idx % self.cols) as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }

        let start = row * self.cols;
        Some(&self.buf[start..start + self.cols])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, cols: usize) -> Self {
        Self {
            buf: vec![item; rows * cols],
            rows,
            cols,
        }
    }

    pub fn fill(&mut self, value: T) {
        self.buf.fill(value);
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::{Array2D, Dims};

    #[test]
    fn negative_positions_are_out_of_bounds() {
        let grid = Array2D::new(0u8, 2, 3);
        assert_eq!(grid.get(Dims(-1, 0)), None);
        assert_eq!(grid.get(Dims(0, -1)), None);
        assert_eq!(grid.get(Dims(2, 0)), None);
        assert_eq!(grid.get(Dims(1, 2)), Some(&0));
    }

    #[test]
    fn rows_are_contiguous() {
        let mut grid = Array2D::new(false, 2, 3);
        grid[Dims(1, 2)] = true;
        assert_eq!(grid.row(1), Some(&[false, false, true][..]));
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.idx_to_dim(5), Some(Dims(1, 2)));
    }
}
