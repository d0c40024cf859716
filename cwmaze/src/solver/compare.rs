use std::fmt;

use super::{solve, Algorithm, Solution};
use crate::board::Maze;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    DfsShorter,
    BfsShorter,
    Equal,
    /// At least one of the searches didn't reach the exit.
    Incomplete,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::DfsShorter => f.write_str("DFS found shorter path!"),
            Verdict::BfsShorter => f.write_str("BFS found shorter path!"),
            Verdict::Equal => f.write_str("Both algorithms found paths of equal length!"),
            Verdict::Incomplete => f.write_str("Not both algorithms found a path."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub dfs: Solution,
    pub bfs: Solution,
}

impl Comparison {
    pub fn verdict(&self) -> Verdict {
        if !self.dfs.found || !self.bfs.found {
            return Verdict::Incomplete;
        }

        match self.dfs.path_length().cmp(&self.bfs.path_length()) {
            std::cmp::Ordering::Less => Verdict::DfsShorter,
            std::cmp::Ordering::Greater => Verdict::BfsShorter,
            std::cmp::Ordering::Equal => Verdict::Equal,
        }
    }

    pub fn solutions(&self) -> [&Solution; 2] {
        [&self.dfs, &self.bfs]
    }
}

/// Solves the maze with both algorithms, each with its own solver.
///
/// The searches only read the maze, so they run side by side.
pub fn compare(maze: &Maze, record_trace: bool) -> Comparison {
    let (dfs, bfs) = rayon::join(
        || solve(maze, Algorithm::DepthFirst, record_trace),
        || solve(maze, Algorithm::BreadthFirst, record_trace),
    );

    Comparison { dfs, bfs }
}
