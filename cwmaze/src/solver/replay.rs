//! Step-by-step playback of a recorded exploration trace.

use super::{Action, TraceStep};
use crate::{array::Array2D, dims::Dims, progress::Flag};

/// What a replay has shown about a cell so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mark {
    #[default]
    Empty,
    Frontier,
    Visited,
}

/// Cursor over a finished search's trace.
///
/// The search itself is long over, this only replays what it recorded. The stop flag is
/// checked before every step, never in the middle of one.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    steps: &'a [TraceStep],
    cursor: usize,
    marks: Array2D<Mark>,
    stop: Flag,
}

impl<'a> Replay<'a> {
    /// `size` is the size of the maze the trace was recorded on.
    pub fn new(steps: &'a [TraceStep], size: Dims) -> Self {
        Replay {
            steps,
            cursor: 0,
            marks: Array2D::new(Mark::Empty, size.0.max(0) as usize, size.1.max(0) as usize),
            stop: Flag::new(),
        }
    }

    pub fn with_flag(mut self, stop: Flag) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_flag(&self) -> Flag {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Applies the next trace event to the overlay and returns it.
    ///
    /// Returns `None` once the trace is exhausted or the replay was stopped.
    pub fn step(&mut self) -> Option<TraceStep> {
        if self.is_stopped() {
            return None;
        }

        let step = *self.steps.get(self.cursor)?;
        self.cursor += 1;

        if let Some(mark) = self.marks.get_mut(step.cell) {
            *mark = match (step.action, *mark) {
                (Action::Visit, _) => Mark::Visited,
                (Action::Explore, Mark::Visited) => Mark::Visited,
                (Action::Explore, _) => Mark::Frontier,
            };
        }

        Some(step)
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.marks.fill(Mark::Empty);
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    pub fn marks(&self) -> &Array2D<Mark> {
        &self.marks
    }

    pub fn mark(&self, cell: Dims) -> Mark {
        self.marks.get(cell).copied().unwrap_or_default()
    }
}

impl Iterator for Replay<'_> {
    type Item = TraceStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Maze, solver::MazeSolver};

    #[test]
    fn marks_follow_the_trace() {
        let maze = Maze::new(2, 2).unwrap();
        let mut solver = MazeSolver::new(&maze);
        solver.bfs(true);

        let mut replay = Replay::new(solver.exploration_order(), maze.size());
        assert_eq!(replay.len(), 8);

        assert_eq!(replay.step(), Some(TraceStep::visit(Dims(0, 0))));
        replay.step();
        replay.step();
        assert_eq!(replay.mark(Dims(0, 0)), Mark::Visited);
        assert_eq!(replay.mark(Dims(1, 0)), Mark::Frontier);
        assert_eq!(replay.mark(Dims(0, 1)), Mark::Frontier);
        assert_eq!(replay.mark(Dims(1, 1)), Mark::Empty);
        assert_eq!(replay.position(), 3);

        assert_eq!(replay.by_ref().count(), 5);
        assert!(replay.is_finished());
        assert!(replay.marks().iter().all(|&mark| mark == Mark::Visited));
        assert_eq!(replay.step(), None);

        replay.rewind();
        assert_eq!(replay.position(), 0);
        assert_eq!(replay.mark(Dims(0, 0)), Mark::Empty);
    }

    #[test]
    fn stopping_halts_between_steps() {
        let maze = Maze::new(3, 3).unwrap();
        let mut solver = MazeSolver::new(&maze);
        solver.dfs(true);

        let stop = Flag::new();
        let mut replay =
            Replay::new(solver.exploration_order(), maze.size()).with_flag(stop.clone());
        replay.step();
        replay.step();

        stop.stop();
        assert!(replay.is_stopped());
        assert_eq!(replay.step(), None);
        assert_eq!(replay.position(), 2);
        assert!(!replay.is_finished());
    }

    #[test]
    fn cells_outside_the_grid_are_ignored() {
        let steps = [TraceStep::visit(Dims(-1, 0)), TraceStep::visit(Dims(0, 0))];
        let mut replay = Replay::new(&steps, Dims(1, 1));
        assert_eq!(replay.by_ref().count(), 2);
        assert_eq!(replay.mark(Dims(-1, 0)), Mark::Empty);
        assert_eq!(replay.mark(Dims(0, 0)), Mark::Visited);
    }
}
