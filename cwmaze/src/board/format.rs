//! Plain-text maze files.
//!
//! A file holds `2 * rows + 1` wall lines, alternating horizontal and vertical walls and
//! starting and ending with a horizontal one, followed by the entrance and exit cells:
//!
//! ```text
//! - -
//! |   |
//!
//! |   |
//! - -
//! 0,0
//! 1,1
//! ```
//!
//! Tokens are single characters separated by one space, `-` marks a horizontal wall and
//! `|` a vertical one.

use std::{
    fmt,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use thiserror::Error;

use super::{Maze, WallKind};
use crate::{array::Array2D, dims::Dims};

/// How strictly wall tokens are checked while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Anything but the wall marker means "no wall".
    #[default]
    Lenient,
    /// Only the wall marker and a space are accepted.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Entrance,
    Exit,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Entrance => f.write_str("entrance"),
            Endpoint::Exit => f.write_str("exit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to read/write maze file: {0}")]
    Io(#[from] io::Error),
    #[error("missing {0} coordinates")]
    MissingCoordinates(Endpoint),
    #[error("invalid {which} coordinates {line:?}, expected `row,col`")]
    InvalidCoordinates { which: Endpoint, line: String },
    #[error("maze file contains no wall lines")]
    EmptyGrid,
    #[error("unexpected token {token:?} at line {line}, column {column}")]
    UnexpectedToken {
        line: usize,
        column: usize,
        token: char,
    },
}

impl Maze {
    /// Loads a maze file, treating unknown wall tokens as missing walls.
    pub fn load(path: impl AsRef<Path>) -> Result<Maze, FormatError> {
        Self::load_with(path, ParseMode::Lenient)
    }

    pub fn load_with(path: impl AsRef<Path>, mode: ParseMode) -> Result<Maze, FormatError> {
        let path = path.as_ref();
        let maze = Self::parse_str(&fs::read_to_string(path)?, mode)?;
        log::debug!(
            "Loaded {}x{} maze from {}",
            maze.rows,
            maze.cols,
            path.display()
        );

        Ok(maze)
    }

    pub fn parse_str(input: &str, mode: ParseMode) -> Result<Maze, FormatError> {
        let lines: Vec<&str> = input.lines().collect();

        let coords_start = lines
            .iter()
            .position(|line| line.contains(','))
            .ok_or(FormatError::MissingCoordinates(Endpoint::Entrance))?;
        let wall_lines = &lines[..coords_start];

        let rows = wall_lines.len() / 2;
        if rows == 0 {
            return Err(FormatError::EmptyGrid);
        }

        let first = wall_lines.first().map_or(0, |line| token_count(line));
        let second = wall_lines.get(1).map_or(0, |line| token_count(line));
        let cols = first.max(second.saturating_sub(1)).max(1);

        let mut horizontal = Array2D::new(false, rows + 1, cols);
        let mut vertical = Array2D::new(false, rows, cols + 1);

        for (i, line) in wall_lines.iter().enumerate() {
            let (kind, walls) = if i % 2 == 0 {
                (WallKind::Horizontal, &mut horizontal)
            } else {
                (WallKind::Vertical, &mut vertical)
            };

            if mode == ParseMode::Strict {
                check_tokens(line, i + 1, kind)?;
            }

            let row = (i / 2) as i32;
            for (col, token) in line.chars().step_by(2).enumerate() {
                if let Some(wall) = walls.get_mut(Dims(row, col as i32)) {
                    *wall = token == kind.marker();
                }
            }
        }

        let entrance = parse_coords(lines.get(coords_start), Endpoint::Entrance)?;
        let exit = parse_coords(lines.get(coords_start + 1), Endpoint::Exit)?;

        let maze = Maze::from_walls(horizontal, vertical, entrance, exit);
        for (which, cell) in [(Endpoint::Entrance, entrance), (Endpoint::Exit, exit)] {
            if !maze.is_in_bounds(cell) {
                log::warn!(
                    "The {} {} lies outside of the {}x{} maze",
                    which,
                    cell,
                    rows,
                    cols
                );
            }
        }

        Ok(maze)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FormatError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::debug!("Saved {}x{} maze to {}", self.rows, self.cols, path.display());

        Ok(())
    }

    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        for row in 0..=self.rows {
            write_wall_line(w, self.horizontal.row(row).unwrap_or(&[]), WallKind::Horizontal)?;
            if let Some(walls) = self.vertical.row(row) {
                write_wall_line(w, walls, WallKind::Vertical)?;
            }
        }

        writeln!(w, "{}", self.entrance)?;
        writeln!(w, "{}", self.exit)
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // writing into a Vec can't fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn token_count(line: &str) -> usize {
    (line.chars().count() + 1) / 2
}

fn check_tokens(line: &str, line_no: usize, kind: WallKind) -> Result<(), FormatError> {
    for (i, token) in line.chars().enumerate() {
        let allowed = token == ' ' || (i % 2 == 0 && token == kind.marker());
        if !allowed {
            return Err(FormatError::UnexpectedToken {
                line: line_no,
                column: i + 1,
                token,
            });
        }
    }

    Ok(())
}

fn parse_coords(line: Option<&&str>, which: Endpoint) -> Result<Dims, FormatError> {
    let line = line.ok_or(FormatError::MissingCoordinates(which))?.trim();
    let invalid = || FormatError::InvalidCoordinates {
        which,
        line: line.to_owned(),
    };

    let (row, col) = line.split_once(',').ok_or_else(invalid)?;
    let row = row.trim().parse().map_err(|_| invalid())?;
    let col = col.trim().parse().map_err(|_| invalid())?;

    Ok(Dims(row, col))
}

fn write_wall_line(w: &mut impl Write, walls: &[bool], kind: WallKind) -> io::Result<()> {
    let mut line = String::with_capacity(walls.len() * 2);
    for (i, &wall) in walls.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push(if wall { kind.marker() } else { ' ' });
    }

    writeln!(w, "{}", line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = concat!(
        "- - -\n",
        "|   | |\n",
        "  -  \n",
        "| |   |\n",
        "- - -\n",
        "0,0\n",
        "1,2\n",
    );

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("cwmaze-{}-{}.txt", name, std::process::id()))
    }

    #[test]
    fn parses_walls_positionally() {
        let maze = Maze::parse_str(SMALL, ParseMode::Lenient).unwrap();
        assert_eq!(maze.size(), Dims(2, 3));
        assert_eq!(maze.entrance(), Dims(0, 0));
        assert_eq!(maze.exit(), Dims(1, 2));

        assert!(maze.is_closed());
        assert!(maze.has_wall_between(Dims(0, 1), Dims(1, 1)));
        assert!(!maze.has_wall_between(Dims(0, 0), Dims(1, 0)));
        assert!(!maze.has_wall_between(Dims(0, 2), Dims(1, 2)));
        assert!(!maze.has_wall_between(Dims(0, 0), Dims(0, 1)));
        assert!(maze.has_wall_between(Dims(0, 1), Dims(0, 2)));
        assert!(maze.has_wall_between(Dims(1, 0), Dims(1, 1)));
        assert!(!maze.has_wall_between(Dims(1, 1), Dims(1, 2)));
    }

    #[test]
    fn writer_is_inverse_of_parser() {
        let maze = Maze::parse_str(SMALL, ParseMode::Strict).unwrap();
        assert_eq!(maze.to_text(), SMALL);
    }

    #[test]
    fn empty_mazes_survive_a_file_round_trip() {
        for (rows, cols) in [(1, 1), (2, 2), (4, 7), (9, 3)] {
            let maze = Maze::new(rows, cols).unwrap();
            let path = temp_path(&format!("round-trip-{rows}x{cols}"));

            maze.save(&path).unwrap();
            let loaded = Maze::load(&path).unwrap();
            let _ = fs::remove_file(&path);

            assert_eq!(loaded, maze);
        }
    }

    #[test]
    fn edited_mazes_survive_a_round_trip() {
        let mut maze = Maze::new(3, 4).unwrap();
        maze.toggle_wall(WallKind::Horizontal, Dims(2, 1)).unwrap();
        maze.toggle_wall(WallKind::Vertical, Dims(0, 3)).unwrap();
        maze.toggle_wall(WallKind::Vertical, Dims(1, 4)).unwrap();
        maze.set_entrance(Dims(2, 3)).unwrap();
        maze.set_exit(Dims(0, 1)).unwrap();

        let parsed = Maze::parse_str(&maze.to_text(), ParseMode::Strict).unwrap();
        assert_eq!(parsed, maze);
    }

    #[test]
    fn unknown_tokens_are_open_in_lenient_mode() {
        let text = "- x -\n| . . |\n- - -\n0,0\n0,2\n";
        let maze = Maze::parse_str(text, ParseMode::Lenient).unwrap();
        assert_eq!(maze.size(), Dims(1, 3));
        assert_eq!(maze.get_wall(WallKind::Horizontal, Dims(0, 1)), Some(false));
        assert!(!maze.has_wall_between(Dims(0, 0), Dims(0, 1)));

        match Maze::parse_str(text, ParseMode::Strict) {
            Err(FormatError::UnexpectedToken {
                line: 1,
                column: 3,
                token: 'x',
            }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn column_count_prefers_vertical_line() {
        // top border shortened, the vertical line still tells the width
        let text = "-\n|   |   |\n- - -\n0,0\n0,1\n";
        let maze = Maze::parse_str(text, ParseMode::Lenient).unwrap();
        assert_eq!(maze.size(), Dims(1, 4));
        assert_eq!(maze.get_wall(WallKind::Horizontal, Dims(0, 1)), Some(false));
        assert_eq!(maze.get_wall(WallKind::Vertical, Dims(0, 2)), Some(true));
        assert_eq!(maze.get_wall(WallKind::Vertical, Dims(0, 4)), Some(true));
        assert_eq!(maze.get_wall(WallKind::Horizontal, Dims(1, 3)), Some(false));
    }

    #[test]
    fn missing_coordinates_are_rejected() {
        assert!(matches!(
            Maze::parse_str("- -\n|   |\n- -\n", ParseMode::Lenient),
            Err(FormatError::MissingCoordinates(Endpoint::Entrance))
        ));
        assert!(matches!(
            Maze::parse_str("- -\n|   |\n- -\n0,0\n", ParseMode::Lenient),
            Err(FormatError::MissingCoordinates(Endpoint::Exit))
        ));
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        for bad in ["a,1", "1,", "1,2,3", "1, x"] {
            let text = format!("- -\n|   |\n- -\n0,0\n{bad}\n");
            match Maze::parse_str(&text, ParseMode::Lenient) {
                Err(FormatError::InvalidCoordinates { which, line }) => {
                    assert_eq!(which, Endpoint::Exit);
                    assert_eq!(line, bad.trim());
                }
                other => panic!("{bad:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn coordinates_tolerate_whitespace() {
        let maze = Maze::parse_str("- -\n|   |\n- -\n 0 , 1 \n0,0\n", ParseMode::Lenient).unwrap();
        assert_eq!(maze.entrance(), Dims(0, 1));
    }

    #[test]
    fn no_wall_lines_is_an_empty_grid() {
        assert!(matches!(
            Maze::parse_str("0,0\n0,0\n", ParseMode::Lenient),
            Err(FormatError::EmptyGrid)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = temp_path("does-not-exist");
        assert!(matches!(Maze::load(path), Err(FormatError::Io(_))));
    }
}
