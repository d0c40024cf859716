use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam::channel::{bounded, Receiver, TryRecvError};
use thiserror::Error;

use crate::{
    board::Maze,
    progress::Flag,
    solver::{self, Algorithm, Solution},
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum JobError {
    #[error("job was abandoned")]
    Abandoned,
    #[error("worker exited without a result")]
    Disconnected,
}

/// Solve running on its own thread.
///
/// A running search can't be interrupted. Abandoning the job only makes sure its
/// result is thrown away instead of delivered.
pub struct SolveJob {
    handle: JoinHandle<()>,
    flag: Flag,
    receiver: Receiver<Solution>,
    algorithm: Algorithm,
}

impl SolveJob {
    pub fn spawn(maze: Arc<Maze>, algorithm: Algorithm, record_trace: bool) -> Self {
        let flag = Flag::new();
        let (sender, receiver) = bounded(1);

        let flag_clone = flag.clone();
        let handle = thread::spawn(move || {
            let solution = solver::solve(&maze, algorithm, record_trace);

            if flag_clone.is_stopped() {
                log::debug!("{} job abandoned, dropping its result", algorithm);
                return;
            }

            // receiver may be gone already, nobody to deliver to then
            let _ = sender.send(solution);
        });

        SolveJob {
            handle,
            flag,
            receiver,
            algorithm,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the solution if it's ready, without blocking.
    pub fn try_result(&self) -> Result<Option<Solution>, JobError> {
        if self.is_abandoned() {
            return Err(JobError::Abandoned);
        }

        match self.receiver.try_recv() {
            Ok(solution) => Ok(Some(solution)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(JobError::Disconnected),
        }
    }

    /// Blocks until the worker is done.
    pub fn wait(self) -> Result<Solution, JobError> {
        if self.is_abandoned() {
            return Err(JobError::Abandoned);
        }

        self.receiver.recv().map_err(|_| JobError::Disconnected)
    }

    pub fn abandon(&self) {
        self.flag.stop();
    }

    pub fn is_abandoned(&self) -> bool {
        self.flag.is_stopped()
    }

    /// Whether the worker thread has exited, delivered or not.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::dims::Dims;

    #[test]
    fn delivers_the_solution() {
        let maze = Arc::new(Maze::new(5, 7).unwrap());
        let job = SolveJob::spawn(maze.clone(), Algorithm::BreadthFirst, true);
        assert_eq!(job.algorithm(), Algorithm::BreadthFirst);

        let solution = job.wait().unwrap();
        assert!(solution.found);
        assert_eq!(solution.path_length(), 10);
        assert_eq!(solution.path.last(), Some(&Dims(4, 6)));
        assert!(!solution.exploration_order.is_empty());
    }

    #[test]
    fn try_result_eventually_returns_once() {
        let maze = Arc::new(Maze::new(3, 3).unwrap());
        let job = SolveJob::spawn(maze, Algorithm::DepthFirst, false);

        let solution = loop {
            if let Some(solution) = job.try_result().unwrap() {
                break solution;
            }
            thread::sleep(Duration::from_millis(1));
        };
        assert_eq!(solution.path_length(), 8);

        while !job.is_finished() {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(job.try_result().unwrap_err(), JobError::Disconnected);
    }

    #[test]
    fn abandoned_job_never_delivers() {
        let maze = Arc::new(Maze::new(40, 40).unwrap());
        let job = SolveJob::spawn(maze, Algorithm::BreadthFirst, false);
        job.abandon();

        assert!(job.is_abandoned());
        assert_eq!(job.try_result().unwrap_err(), JobError::Abandoned);
        assert_eq!(job.wait().unwrap_err(), JobError::Abandoned);
    }
}
