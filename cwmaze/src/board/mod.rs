pub mod direction;
pub mod format;
pub mod maze;

pub use direction::{Direction, WallKind};
pub use format::{Endpoint, FormatError, ParseMode};
pub use maze::{Maze, MazeError, Moves};
