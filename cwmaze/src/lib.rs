pub mod array;
pub mod board;
pub mod dims;
pub mod job;
pub mod progress;
pub mod solver;

pub use board::{Maze, MazeError};
pub use dims::Dims;
pub use solver::{Algorithm, MazeSolver, Solution};
