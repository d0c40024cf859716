mod compare;
mod frontier;
pub mod replay;

use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use self::frontier::{Frontier, Queue, Stack};
use crate::{board::Maze, dims::Dims};

pub use compare::{compare, Comparison, Verdict};
pub use replay::{Mark, Replay};

#[cfg(feature = "hashbrown")]
pub type CellSet = hashbrown::HashSet<Dims>;
#[cfg(not(feature = "hashbrown"))]
pub type CellSet = std::collections::HashSet<Dims>;

#[cfg(feature = "hashbrown")]
type CellMap<V> = hashbrown::HashMap<Dims, V>;
#[cfg(not(feature = "hashbrown"))]
type CellMap<V> = std::collections::HashMap<Dims, V>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    DepthFirst,
    BreadthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::DepthFirst, Algorithm::BreadthFirst];

    pub fn short_name(self) -> &'static str {
        match self {
            Algorithm::DepthFirst => "DFS",
            Algorithm::BreadthFirst => "BFS",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown algorithm {0:?}, expected `dfs` or `bfs`")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Algorithm::DepthFirst),
            "bfs" | "breadth-first" => Ok(Algorithm::BreadthFirst),
            _ => Err(ParseAlgorithmError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Cell taken from the frontier for the first time.
    Visit,
    /// Cell pushed to the frontier.
    Explore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceStep {
    pub action: Action,
    pub cell: Dims,
}

impl TraceStep {
    pub fn visit(cell: Dims) -> Self {
        TraceStep {
            action: Action::Visit,
            cell,
        }
    }

    pub fn explore(cell: Dims) -> Self {
        TraceStep {
            action: Action::Explore,
            cell,
        }
    }
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            Action::Visit => "visit",
            Action::Explore => "explore",
        };
        write!(f, "{} {}", action, self.cell)
    }
}

/// Searches a path from the entrance to the exit of a borrowed maze.
///
/// Every search resets the previous results, so a solver holds the outcome of its last
/// run only.
#[derive(Debug)]
pub struct MazeSolver<'a> {
    maze: &'a Maze,
    algorithm: Option<Algorithm>,
    found: bool,
    path: Vec<Dims>,
    visited: CellSet,
    steps_taken: usize,
    exploration_order: Vec<TraceStep>,
    solve_time: Duration,
}

impl<'a> MazeSolver<'a> {
    pub fn new(maze: &'a Maze) -> Self {
        MazeSolver {
            maze,
            algorithm: None,
            found: false,
            path: Vec::new(),
            visited: CellSet::default(),
            steps_taken: 0,
            exploration_order: Vec::new(),
            solve_time: Duration::ZERO,
        }
    }

    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    /// Depth-first search, returns whether the exit was reached.
    pub fn dfs(&mut self, record_trace: bool) -> bool {
        self.search::<Stack>(Algorithm::DepthFirst, record_trace)
    }

    /// Breadth-first search, the found path has the fewest possible moves.
    pub fn bfs(&mut self, record_trace: bool) -> bool {
        self.search::<Queue>(Algorithm::BreadthFirst, record_trace)
    }

    pub fn solve(&mut self, algorithm: Algorithm, record_trace: bool) -> bool {
        match algorithm {
            Algorithm::DepthFirst => self.dfs(record_trace),
            Algorithm::BreadthFirst => self.bfs(record_trace),
        }
    }

    fn reset(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
        self.found = false;
        self.path.clear();
        self.visited.clear();
        self.steps_taken = 0;
        self.exploration_order.clear();
        self.solve_time = Duration::ZERO;
    }

    fn search<F: Frontier>(&mut self, algorithm: Algorithm, record_trace: bool) -> bool {
        let start = Instant::now();
        self.reset(algorithm);

        // predecessor of every visited cell, as it was when the cell got visited
        let mut came_from = CellMap::<Option<Dims>>::default();
        let mut frontier = F::default();
        frontier.push((self.maze.entrance(), None));

        while let Some((cell, parent)) = frontier.pop() {
            self.steps_taken += 1;

            if !self.visited.insert(cell) {
                continue;
            }
            came_from.insert(cell, parent);

            if record_trace {
                self.exploration_order.push(TraceStep::visit(cell));
            }

            if self.maze.is_exit(cell) {
                self.path = reconstruct_path(&came_from, cell);
                self.found = true;
                break;
            }

            let mut moves = self.maze.get_valid_moves(cell);
            if F::REVERSED {
                moves.reverse();
            }

            for (next, _) in moves {
                if !self.visited.contains(&next) {
                    frontier.push((next, Some(cell)));
                    if record_trace {
                        self.exploration_order.push(TraceStep::explore(next));
                    }
                }
            }
        }

        self.solve_time = start.elapsed();
        log::debug!(
            "{} finished in {:?}: found={}, steps={}, visited={}",
            algorithm,
            self.solve_time,
            self.found,
            self.steps_taken,
            self.visited.len()
        );

        self.found
    }

    /// Algorithm of the last run, `None` if nothing has been run yet.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn found(&self) -> bool {
        self.found
    }

    /// Cells from the entrance to the exit, both included. Empty when unsolved.
    pub fn path(&self) -> &[Dims] {
        &self.path
    }

    pub fn visited(&self) -> &CellSet {
        &self.visited
    }

    /// Number of frontier pops, including cells that were already visited.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Empty unless the last run recorded a trace.
    pub fn exploration_order(&self) -> &[TraceStep] {
        &self.exploration_order
    }

    pub fn solve_time(&self) -> Duration {
        self.solve_time
    }

    /// Number of moves along the path, 0 when unsolved.
    pub fn get_path_length(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn report(&self) -> Option<SolveReport> {
        let algorithm = self.algorithm?;
        Some(SolveReport {
            algorithm,
            found: self.found,
            path_length: self.get_path_length(),
            steps_taken: self.steps_taken,
            visited: self.visited.len(),
            seconds: self.solve_time.as_secs_f64(),
            path: self.path.clone(),
            trace: self.exploration_order.clone(),
        })
    }

    /// Detaches the results of the last run from the maze borrow.
    pub fn into_solution(self) -> Option<Solution> {
        let algorithm = self.algorithm?;
        Some(self.take_solution(algorithm))
    }

    fn take_solution(self, algorithm: Algorithm) -> Solution {
        Solution {
            algorithm,
            found: self.found,
            path: self.path,
            visited: self.visited,
            steps_taken: self.steps_taken,
            exploration_order: self.exploration_order,
            solve_time: self.solve_time,
        }
    }
}

fn reconstruct_path(came_from: &CellMap<Option<Dims>>, end: Dims) -> Vec<Dims> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&Some(prev)) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

/// Results of one search, owned.
#[derive(Debug, Clone)]
pub struct Solution {
    pub algorithm: Algorithm,
    pub found: bool,
    pub path: Vec<Dims>,
    pub visited: CellSet,
    pub steps_taken: usize,
    pub exploration_order: Vec<TraceStep>,
    pub solve_time: Duration,
}

impl Solution {
    pub fn path_length(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn report(&self) -> SolveReport {
        SolveReport {
            algorithm: self.algorithm,
            found: self.found,
            path_length: self.path_length(),
            steps_taken: self.steps_taken,
            visited: self.visited.len(),
            seconds: self.solve_time.as_secs_f64(),
            path: self.path.clone(),
            trace: self.exploration_order.clone(),
        }
    }
}

/// Runs one search with a fresh solver.
pub fn solve(maze: &Maze, algorithm: Algorithm, record_trace: bool) -> Solution {
    let mut solver = MazeSolver::new(maze);
    solver.solve(algorithm, record_trace);
    solver.take_solution(algorithm)
}

/// Summary of a search, suitable for printing or serializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub algorithm: Algorithm,
    pub found: bool,
    pub path_length: usize,
    pub steps_taken: usize,
    pub visited: usize,
    pub seconds: f64,
    pub path: Vec<Dims>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceStep>,
}
