pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod render;
pub mod replay;
pub mod settings;

pub use error::AppError;
