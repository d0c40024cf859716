use std::{io, path::PathBuf};

use cwmaze::{board::FormatError, job::JobError, MazeError};
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("solve failed: {0}")]
    Job(#[from] JobError),
    #[error("{} already exists, use --force to overwrite it", .0.display())]
    FileExists(PathBuf),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
