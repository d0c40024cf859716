//! Text rendering of mazes.
//!
//! A maze of `rows x cols` cells becomes a `(2 * rows + 1) x (2 * cols + 1)` grid of
//! characters: even rows and columns hold walls and their corners, odd ones hold cells.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, PrintStyledContent, Stylize},
};
use cwmaze::{
    array::Array2D,
    board::WallKind,
    solver::{Mark, Replay},
    Algorithm, Dims, Maze,
};

use crate::settings::ColorScheme;

pub const ENTRANCE: char = 'S';
pub const EXIT: char = 'E';
pub const PATH: char = '•';
pub const VISITED: char = '·';
pub const FRONTIER: char = '○';

pub fn maze_render_size(maze: &Maze) -> Dims {
    Dims(maze.rows() as i32 * 2 + 1, maze.cols() as i32 * 2 + 1)
}

/// Glyph joining the walls that meet at one corner.
pub fn double_line_corner(left: bool, top: bool, right: bool, bottom: bool) -> char {
    match (left, top, right, bottom) {
        (false, false, false, false) => ' ',
        (false, false, false, true) => '║',
        (false, false, true, false) => '═',
        (false, false, true, true) => '╔',
        (false, true, false, false) => '║',
        (false, true, false, true) => '║',
        (false, true, true, false) => '╚',
        (false, true, true, true) => '╠',
        (true, false, false, false) => '═',
        (true, false, false, true) => '╗',
        (true, false, true, false) => '═',
        (true, false, true, true) => '╦',
        (true, true, false, false) => '╝',
        (true, true, false, true) => '╣',
        (true, true, true, false) => '╩',
        (true, true, true, true) => '╬',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall(char),
    Empty,
    Entrance,
    Exit,
    Path(Algorithm),
    Visited,
    Frontier,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall(glyph) => glyph,
            Tile::Empty => ' ',
            Tile::Entrance => ENTRANCE,
            Tile::Exit => EXIT,
            Tile::Path(_) => PATH,
            Tile::Visited => VISITED,
            Tile::Frontier => FRONTIER,
        }
    }

    fn color(self, scheme: &ColorScheme) -> Option<Color> {
        let color = match self {
            Tile::Wall(_) => scheme.walls,
            Tile::Empty => return None,
            Tile::Entrance => scheme.entrance,
            Tile::Exit => scheme.exit,
            Tile::Path(Algorithm::DepthFirst) => scheme.dfs_path,
            Tile::Path(Algorithm::BreadthFirst) => scheme.bfs_path,
            Tile::Visited => scheme.visited,
            Tile::Frontier => scheme.frontier,
        };
        Some(color.into())
    }

    /// Entrance and exit stay on top, a path hides exploration marks.
    fn priority(self) -> u8 {
        match self {
            Tile::Wall(_) | Tile::Entrance | Tile::Exit => 3,
            Tile::Path(_) => 2,
            Tile::Visited | Tile::Frontier => 1,
            Tile::Empty => 0,
        }
    }
}

/// Maze drawn as tiles, with solver results laid over it.
#[derive(Debug, Clone)]
pub struct MazeView {
    tiles: Array2D<Tile>,
}

impl MazeView {
    pub fn new(maze: &Maze) -> Self {
        let Dims(height, width) = maze_render_size(maze);
        let mut tiles = Array2D::new(Tile::Empty, height as usize, width as usize);

        let h = maze.walls(WallKind::Horizontal);
        let v = maze.walls(WallKind::Vertical);
        let is_set = |walls: &Array2D<bool>, pos: Dims| walls.get(pos).copied().unwrap_or(false);

        for i in 0..=maze.rows() as i32 {
            for j in 0..=maze.cols() as i32 {
                let glyph = double_line_corner(
                    is_set(h, Dims(i, j - 1)),
                    is_set(v, Dims(i - 1, j)),
                    is_set(h, Dims(i, j)),
                    is_set(v, Dims(i, j)),
                );
                if glyph != ' ' {
                    tiles[Dims(i * 2, j * 2)] = Tile::Wall(glyph);
                }
            }
        }

        for pos in h.iter_pos().filter(|&pos| h[pos]) {
            tiles[Dims(pos.0 * 2, pos.1 * 2 + 1)] = Tile::Wall('═');
        }
        for pos in v.iter_pos().filter(|&pos| v[pos]) {
            tiles[Dims(pos.0 * 2 + 1, pos.1 * 2)] = Tile::Wall('║');
        }

        let mut view = MazeView { tiles };
        view.place_cell(maze.entrance(), Tile::Entrance);
        view.place_cell(maze.exit(), Tile::Exit);
        view
    }

    /// Position of a cell's tile, `None` for cells outside of the grid.
    fn cell_to_render(&self, cell: Dims) -> Option<Dims> {
        let Dims(height, width) = self.tiles.size();
        let inside = (0..height / 2).contains(&cell.0) && (0..width / 2).contains(&cell.1);
        inside.then(|| Dims(cell.0 * 2 + 1, cell.1 * 2 + 1))
    }

    fn place_cell(&mut self, cell: Dims, tile: Tile) {
        if let Some(pos) = self.cell_to_render(cell) {
            self.place(pos, tile);
        }
    }

    fn place(&mut self, pos: Dims, tile: Tile) {
        if let Some(current) = self.tiles.get_mut(pos) {
            if tile.priority() >= current.priority() {
                *current = tile;
            }
        }
    }

    pub fn size(&self) -> Dims {
        self.tiles.size()
    }

    pub fn tile(&self, pos: Dims) -> Option<Tile> {
        self.tiles.get(pos).copied()
    }

    pub fn with_visited<'a>(mut self, cells: impl IntoIterator<Item = &'a Dims>) -> Self {
        for &cell in cells {
            self.place_cell(cell, Tile::Visited);
        }
        self
    }

    pub fn with_marks(mut self, marks: &Array2D<Mark>) -> Self {
        for pos in marks.iter_pos() {
            let tile = match marks[pos] {
                Mark::Empty => continue,
                Mark::Frontier => Tile::Frontier,
                Mark::Visited => Tile::Visited,
            };
            self.place_cell(pos, tile);
        }
        self
    }

    pub fn with_replay(self, replay: &Replay) -> Self {
        self.with_marks(replay.marks())
    }

    /// Marks the path cells and the passages between consecutive ones.
    pub fn with_path(mut self, path: &[Dims], algorithm: Algorithm) -> Self {
        let tile = Tile::Path(algorithm);
        for &cell in path {
            self.place_cell(cell, tile);
        }
        for pair in path.windows(2) {
            let from = self.cell_to_render(pair[0]);
            let to = self.cell_to_render(pair[1]);
            if let (Some(a), Some(b)) = (from, to) {
                self.place(Dims((a.0 + b.0) / 2, (a.1 + b.1) / 2), tile);
            }
        }
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.tiles.rows()).filter_map(|row| {
            self.tiles
                .row(row)
                .map(|tiles| tiles.iter().map(|tile| tile.glyph()).collect())
        })
    }

    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Queues the coloured maze. `line_end` is `"\r\n"` in raw mode.
    pub fn write_styled(
        &self,
        out: &mut impl Write,
        scheme: &ColorScheme,
        line_end: &str,
    ) -> io::Result<()> {
        for row in 0..self.tiles.rows() {
            let Some(tiles) = self.tiles.row(row) else {
                continue;
            };

            for &tile in tiles {
                match tile.color(scheme) {
                    Some(color) => queue!(out, PrintStyledContent(tile.glyph().with(color)))?,
                    None => queue!(out, Print(tile.glyph()))?,
                }
            }
            queue!(out, Print(line_end))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwmaze::solver;

    #[test]
    fn empty_two_by_two() {
        let maze = Maze::new(2, 2).unwrap();
        let view = MazeView::new(&maze);

        assert_eq!(view.size(), Dims(5, 5));
        assert_eq!(
            view.render_plain(),
            concat!(
                "╔═══╗\n", //
                "║S  ║\n",
                "║   ║\n",
                "║  E║\n",
                "╚═══╝\n",
            )
        );
    }

    #[test]
    fn inner_walls_join_the_border() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.set_wall(WallKind::Vertical, Dims(0, 1), true).unwrap();
        maze.set_wall(WallKind::Horizontal, Dims(1, 1), true).unwrap();

        let lines: Vec<_> = MazeView::new(&maze).lines().collect();
        assert_eq!(lines[0], "╔═╦═╗");
        assert_eq!(lines[1], "║S║ ║");
        assert_eq!(lines[2], "║ ╚═╣");
        assert_eq!(lines[4], "╚═══╝");
    }

    #[test]
    fn path_covers_cells_and_passages() {
        let maze = Maze::new(2, 2).unwrap();
        let solution = solver::solve(&maze, Algorithm::BreadthFirst, false);
        let view = MazeView::new(&maze).with_path(&solution.path, solution.algorithm);

        assert_eq!(
            view.render_plain(),
            concat!(
                "╔═══╗\n", //
                "║S  ║\n",
                "║•  ║\n",
                "║••E║\n",
                "╚═══╝\n",
            )
        );
        assert_eq!(view.tile(Dims(3, 1)), Some(Tile::Path(Algorithm::BreadthFirst)));
        assert_eq!(view.tile(Dims(1, 1)), Some(Tile::Entrance));
    }

    #[test]
    fn replay_marks_show_under_the_path() {
        let maze = Maze::new(1, 3).unwrap();
        let solution = solver::solve(&maze, Algorithm::DepthFirst, true);

        let mut replay = Replay::new(&solution.exploration_order, maze.size());
        replay.step();
        replay.step();
        let view = MazeView::new(&maze).with_replay(&replay);
        assert_eq!(view.lines().nth(1).unwrap(), "║S ○ E║");

        let view = view.with_visited(&[Dims(0, 1)]);
        assert_eq!(view.lines().nth(1).unwrap(), "║S · E║");
    }

    #[test]
    fn cells_outside_the_grid_are_not_drawn() {
        use cwmaze::board::ParseMode;

        let text = "- -\n|   |\n- -\n2147483647,0\n0,0\n";
        let maze = Maze::parse_str(text, ParseMode::Lenient).unwrap();
        let path = [Dims(i32::MAX, 0), Dims(0, 0), Dims(0, i32::MIN)];
        let view = MazeView::new(&maze)
            .with_visited(&[Dims(i32::MAX, 0), Dims(-1, 0)])
            .with_path(&path, Algorithm::DepthFirst);

        assert_eq!(view.render_plain(), "╔═══╗\n║E  ║\n╚═══╝\n");
        assert!(!view.render_plain().contains(ENTRANCE));
    }

    #[test]
    fn styled_output_uses_scheme() {
        let maze = Maze::new(1, 1).unwrap();
        let mut out = Vec::new();
        MazeView::new(&maze)
            .write_styled(&mut out, &ColorScheme::default(), "\n")
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('╔'));
        assert!(text.contains('\u{1b}'));
        assert_eq!(text.matches('\n').count(), 3);
    }
}
