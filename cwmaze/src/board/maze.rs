use smallvec::SmallVec;
use thiserror::Error;

use super::{Direction, WallKind};
use crate::{array::Array2D, dims::*};

/// Neighbours reachable from a cell, at most one per direction.
pub type Moves = SmallVec<[(Dims, Direction); 4]>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze needs at least one row and one column, got {rows}x{cols}")]
    InvalidSize { rows: usize, cols: usize },
    #[error("cell {pos} is outside of the {rows}x{cols} maze")]
    OutOfBounds { pos: Dims, rows: usize, cols: usize },
    #[error("there is no {kind} wall at {pos}")]
    NoSuchWall { kind: WallKind, pos: Dims },
}

/// Grid maze described by its walls.
///
/// `horizontal[i][j]` separates cell `(i - 1, j)` from `(i, j)`, `vertical[i][j]` separates
/// `(i, j - 1)` from `(i, j)`. Row `0` and row `rows` of the horizontal matrix, and column `0`
/// and column `cols` of the vertical one, are the outer border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub(crate) horizontal: Array2D<bool>,
    pub(crate) vertical: Array2D<bool>,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) entrance: Dims,
    pub(crate) exit: Dims,
}

impl Maze {
    /// Creates a maze without interior walls, closed by its border.
    ///
    /// Entrance is the top-left cell, exit the bottom-right one.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidSize { rows, cols });
        }

        Ok(Self::bordered(rows, cols))
    }

    fn bordered(rows: usize, cols: usize) -> Self {
        let mut horizontal = Array2D::new(false, rows + 1, cols);
        let mut vertical = Array2D::new(false, rows, cols + 1);

        for col in 0..cols as i32 {
            horizontal[Dims(0, col)] = true;
            horizontal[Dims(rows as i32, col)] = true;
        }

        for row in 0..rows as i32 {
            vertical[Dims(row, 0)] = true;
            vertical[Dims(row, cols as i32)] = true;
        }

        Maze {
            horizontal,
            vertical,
            rows,
            cols,
            entrance: Dims::ZERO,
            exit: Dims(rows as i32 - 1, cols as i32 - 1),
        }
    }

    pub(crate) fn from_walls(
        horizontal: Array2D<bool>,
        vertical: Array2D<bool>,
        entrance: Dims,
        exit: Dims,
    ) -> Self {
        let rows = vertical.rows();
        let cols = horizontal.cols();
        debug_assert_eq!(horizontal.size(), Dims(rows as i32 + 1, cols as i32));
        debug_assert_eq!(vertical.size(), Dims(rows as i32, cols as i32 + 1));

        Maze {
            horizontal,
            vertical,
            rows,
            cols,
            entrance,
            exit,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `Dims(rows, cols)`
    pub fn size(&self) -> Dims {
        Dims(self.rows as i32, self.cols as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn entrance(&self) -> Dims {
        self.entrance
    }

    pub fn exit(&self) -> Dims {
        self.exit
    }

    pub fn horizontal_walls(&self) -> &Array2D<bool> {
        &self.horizontal
    }

    pub fn vertical_walls(&self) -> &Array2D<bool> {
        &self.vertical
    }

    pub fn walls(&self, kind: WallKind) -> &Array2D<bool> {
        match kind {
            WallKind::Horizontal => &self.horizontal,
            WallKind::Vertical => &self.vertical,
        }
    }

    fn walls_mut(&mut self, kind: WallKind) -> &mut Array2D<bool> {
        match kind {
            WallKind::Horizontal => &mut self.horizontal,
            WallKind::Vertical => &mut self.vertical,
        }
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        0 <= pos.0 && pos.0 < self.rows as i32 && 0 <= pos.1 && pos.1 < self.cols as i32
    }

    pub fn is_exit(&self, cell: Dims) -> bool {
        cell == self.exit
    }

    /// Whether every border wall is present.
    pub fn is_closed(&self) -> bool {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        (0..cols).all(|col| self.horizontal[Dims(0, col)] && self.horizontal[Dims(rows, col)])
            && (0..rows).all(|row| self.vertical[Dims(row, 0)] && self.vertical[Dims(row, cols)])
    }

    /// Returns the direction leading from `cell` to `cell2`.
    /// If the cells are not adjacent, returns None
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<Direction> {
        let offset = (cell2.0.checked_sub(cell.0)?, cell2.1.checked_sub(cell.1)?);
        match offset {
            (-1, 0) => Some(Direction::Up),
            (0, -1) => Some(Direction::Left),
            (1, 0) => Some(Direction::Down),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Matrix and index of the wall on the `dir` side of `cell`.
    pub fn wall_position(cell: Dims, dir: Direction) -> (WallKind, Dims) {
        match dir {
            Direction::Up => (WallKind::Horizontal, cell),
            Direction::Down => (WallKind::Horizontal, cell + Dims(1, 0)),
            Direction::Left => (WallKind::Vertical, cell),
            Direction::Right => (WallKind::Vertical, cell + Dims(0, 1)),
        }
    }

    /// Walls outside of both matrices count as present, and so do all sides of a cell
    /// outside of the grid.
    pub fn has_wall(&self, cell: Dims, dir: Direction) -> bool {
        if !self.is_in_bounds(cell) {
            return true;
        }

        let (kind, pos) = Self::wall_position(cell, dir);
        self.walls(kind).get(pos).copied().unwrap_or(true)
    }

    /// Non-adjacent cells are always reported as blocked.
    pub fn has_wall_between(&self, cell: Dims, cell2: Dims) -> bool {
        match Self::which_wall_between(cell, cell2) {
            Some(dir) => self.has_wall(cell, dir),
            None => true,
        }
    }

    /// Open neighbours of `cell`, in up, left, down, right order.
    ///
    /// A cell outside of the grid has none.
    pub fn get_valid_moves(&self, cell: Dims) -> Moves {
        if !self.is_in_bounds(cell) {
            return Moves::new();
        }

        Direction::get_in_order()
            .into_iter()
            .map(|dir| (cell + dir.to_coord(), dir))
            .filter(|&(next, _)| self.is_in_bounds(next) && !self.has_wall_between(cell, next))
            .collect()
    }

    pub fn get_wall(&self, kind: WallKind, pos: Dims) -> Option<bool> {
        self.walls(kind).get(pos).copied()
    }

    pub fn set_wall(&mut self, kind: WallKind, pos: Dims, present: bool) -> Result<(), MazeError> {
        let wall = self
            .walls_mut(kind)
            .get_mut(pos)
            .ok_or(MazeError::NoSuchWall { kind, pos })?;
        *wall = present;
        Ok(())
    }

    /// Flips a single wall, returning its new state.
    pub fn toggle_wall(&mut self, kind: WallKind, pos: Dims) -> Result<bool, MazeError> {
        let wall = self
            .walls_mut(kind)
            .get_mut(pos)
            .ok_or(MazeError::NoSuchWall { kind, pos })?;
        *wall = !*wall;
        Ok(*wall)
    }

    pub fn set_entrance(&mut self, cell: Dims) -> Result<(), MazeError> {
        self.check_cell(cell)?;
        self.entrance = cell;
        Ok(())
    }

    pub fn set_exit(&mut self, cell: Dims) -> Result<(), MazeError> {
        self.check_cell(cell)?;
        self.exit = cell;
        Ok(())
    }

    fn check_cell(&self, pos: Dims) -> Result<(), MazeError> {
        if self.is_in_bounds(pos) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::bordered(8, 8)
    }
}
