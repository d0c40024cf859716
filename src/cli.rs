use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use cwmaze::{board::WallKind, Algorithm, Dims};

#[derive(Parser, Debug)]
#[clap(version, about, name = "wmaze")]
pub struct Args {
    #[clap(long, global = true, help = "Reject anything but walls and spaces in wall lines")]
    pub strict: bool,
    #[clap(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Log more, can be repeated"
    )]
    pub verbose: u8,
    #[clap(long, action, help = "Show config path and quit")]
    pub show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    pub reset_config: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    pub debug_config: bool,
    #[clap(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Configured level, raised one step per `-v`.
    pub fn log_level(&self, configured: log::LevelFilter) -> log::LevelFilter {
        const LEVELS: [log::LevelFilter; 6] = [
            log::LevelFilter::Off,
            log::LevelFilter::Error,
            log::LevelFilter::Warn,
            log::LevelFilter::Info,
            log::LevelFilter::Debug,
            log::LevelFilter::Trace,
        ];

        let index = configured as usize + self.verbose as usize;
        LEVELS[index.min(LEVELS.len() - 1)]
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty bordered maze
    New {
        file: PathBuf,
        #[clap(long)]
        rows: Option<usize>,
        #[clap(long)]
        cols: Option<usize>,
        #[clap(short, long, help = "Overwrite an existing file")]
        force: bool,
    },
    /// Draw a maze
    Show { file: PathBuf },
    /// Find a path from the entrance to the exit
    Solve {
        file: PathBuf,
        #[clap(short, long, help = "dfs or bfs")]
        algorithm: Option<Algorithm>,
        #[clap(long, help = "Print every visit and explore step")]
        trace: bool,
        #[clap(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Solve with both algorithms and compare the paths
    Compare { file: PathBuf },
    /// Animate the exploration step by step, q or Esc stops
    Replay {
        file: PathBuf,
        #[clap(short, long, help = "dfs or bfs")]
        algorithm: Option<Algorithm>,
        #[clap(short, long, help = "Milliseconds between steps")]
        delay: Option<u64>,
    },
    /// Change a maze and save it back
    Edit {
        file: PathBuf,
        #[clap(subcommand)]
        edit: Edit,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Add or remove one wall
    ToggleWall {
        #[clap(long, conflicts_with = "vertical", required_unless_present = "vertical")]
        horizontal: bool,
        #[clap(long)]
        vertical: bool,
        row: i32,
        col: i32,
    },
    /// Move the entrance
    Entrance { row: i32, col: i32 },
    /// Move the exit
    Exit { row: i32, col: i32 },
}

impl Edit {
    pub fn target(&self) -> Dims {
        match *self {
            Edit::ToggleWall { row, col, .. }
            | Edit::Entrance { row, col }
            | Edit::Exit { row, col } => Dims(row, col),
        }
    }

    pub fn wall_kind(&self) -> Option<WallKind> {
        match self {
            Edit::ToggleWall { horizontal: true, .. } => Some(WallKind::Horizontal),
            Edit::ToggleWall { .. } => Some(WallKind::Vertical),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn solve_arguments() {
        let args = Args::parse_from([
            "wmaze", "solve", "maze.txt", "-a", "dfs", "--json", "--strict",
        ]);
        assert!(args.strict);
        match args.command {
            Some(Command::Solve {
                file,
                algorithm,
                trace,
                json,
            }) => {
                assert_eq!(file, PathBuf::from("maze.txt"));
                assert_eq!(algorithm, Some(Algorithm::DepthFirst));
                assert!(!trace);
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        assert!(Args::try_parse_from(["wmaze", "solve", "maze.txt", "-a", "astar"]).is_err());
    }

    #[test]
    fn toggle_wall_needs_a_kind() {
        assert!(Args::try_parse_from(["wmaze", "edit", "m.txt", "toggle-wall", "1", "2"]).is_err());
        assert!(Args::try_parse_from([
            "wmaze",
            "edit",
            "m.txt",
            "toggle-wall",
            "--horizontal",
            "--vertical",
            "1",
            "2"
        ])
        .is_err());

        let args = Args::parse_from([
            "wmaze",
            "edit",
            "m.txt",
            "toggle-wall",
            "--vertical",
            "1",
            "2",
        ]);
        let Some(Command::Edit { edit, .. }) = args.command else {
            panic!("expected edit");
        };
        assert_eq!(edit.wall_kind(), Some(WallKind::Vertical));
        assert_eq!(edit.target(), Dims(1, 2));
    }

    #[test]
    fn verbosity_raises_log_level() {
        let args = Args::parse_from(["wmaze", "-vv"]);
        assert!(args.command.is_none());
        assert_eq!(args.log_level(log::LevelFilter::Warn), log::LevelFilter::Debug);
        assert_eq!(args.log_level(log::LevelFilter::Debug), log::LevelFilter::Trace);

        let quiet = Args::parse_from(["wmaze"]);
        assert_eq!(quiet.log_level(log::LevelFilter::Off), log::LevelFilter::Off);
    }
}
