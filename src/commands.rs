use std::{
    io::{self, Write},
    path::Path,
    sync::Arc,
    time::Duration,
};

use crossterm::tty::IsTty;
use cwmaze::{
    board::ParseMode,
    job::SolveJob,
    solver,
    Algorithm, Maze, Solution,
};

use crate::{
    cli::{Command, Edit},
    error::AppError,
    render::MazeView,
    replay,
    settings::{ColorScheme, Settings},
};

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub settings: Settings,
    pub parse_mode: ParseMode,
}

impl Context {
    pub fn new(settings: Settings, strict: bool) -> Self {
        let parse_mode = if strict || settings.get_strict_parsing() {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };

        Context {
            settings,
            parse_mode,
        }
    }

    fn load(&self, path: &Path) -> Result<Maze, AppError> {
        Ok(Maze::load_with(path, self.parse_mode)?)
    }

    fn scheme(&self) -> ColorScheme {
        self.settings.get_color_scheme()
    }
}

pub fn run(command: Command, ctx: &Context) -> Result<(), AppError> {
    match command {
        Command::New {
            file,
            rows,
            cols,
            force,
        } => {
            let rows = rows.unwrap_or(ctx.settings.get_default_rows());
            let cols = cols.unwrap_or(ctx.settings.get_default_cols());
            new_maze(&file, rows, cols, force)
        }
        Command::Show { file } => {
            let maze = ctx.load(&file)?;
            print_view(&MazeView::new(&maze), &ctx.scheme())?;
            println!("Entrance: {}, Exit: {}", maze.entrance(), maze.exit());
            Ok(())
        }
        Command::Solve {
            file,
            algorithm,
            trace,
            json,
        } => {
            let algorithm = algorithm.unwrap_or(ctx.settings.get_default_algorithm());
            solve(ctx, &file, algorithm, trace, json)
        }
        Command::Compare { file } => compare(ctx, &file),
        Command::Replay {
            file,
            algorithm,
            delay,
        } => {
            let algorithm = algorithm.unwrap_or(ctx.settings.get_default_algorithm());
            let delay = Duration::from_millis(delay.unwrap_or(ctx.settings.get_replay_delay_ms()));
            replay(ctx, &file, algorithm, delay)
        }
        Command::Edit { file, edit } => {
            let mut maze = ctx.load(&file)?;
            println!("{}", apply_edit(&mut maze, &edit)?);
            maze.save(&file)?;
            Ok(())
        }
    }
}

fn new_maze(path: &Path, rows: usize, cols: usize, force: bool) -> Result<(), AppError> {
    if path.exists() && !force {
        return Err(AppError::FileExists(path.to_owned()));
    }

    let maze = Maze::new(rows, cols)?;
    maze.save(path)?;
    println!("Created {}x{} maze at {}", rows, cols, path.display());
    Ok(())
}

/// Runs the search on a worker, like any front-end that mustn't block on it.
fn solve_in_background(
    maze: Maze,
    algorithm: Algorithm,
    record_trace: bool,
) -> Result<Solution, AppError> {
    let job = SolveJob::spawn(Arc::new(maze), algorithm, record_trace);
    log::debug!("Solving with {}", job.algorithm());
    Ok(job.wait()?)
}

pub fn solution_summary(solution: &Solution) -> String {
    if solution.found {
        format!(
            "{} Solution - Path Length: {}, Steps Explored: {}, Time: {:.4}s",
            solution.algorithm,
            solution.path_length(),
            solution.steps_taken,
            solution.solve_time.as_secs_f64()
        )
    } else {
        format!("{}: No solution found!", solution.algorithm)
    }
}

fn solve(
    ctx: &Context,
    path: &Path,
    algorithm: Algorithm,
    trace: bool,
    json: bool,
) -> Result<(), AppError> {
    let maze = ctx.load(path)?;
    let solution = solve_in_background(maze.clone(), algorithm, trace)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&solution.report())?);
        return Ok(());
    }

    let view = MazeView::new(&maze).with_path(&solution.path, algorithm);
    print_view(&view, &ctx.scheme())?;
    println!("{}", solution_summary(&solution));

    if trace {
        for (i, step) in solution.exploration_order.iter().enumerate() {
            println!("{:>6} {}", i, step);
        }
    }
    Ok(())
}

pub fn comparison_summary(comparison: &solver::Comparison) -> String {
    let mut out = String::from("Algorithm Comparison:\n");
    for solution in comparison.solutions() {
        if solution.found {
            out += &format!(
                "{} - Length: {}, Steps: {}, Time: {:.4}s\n",
                solution.algorithm,
                solution.path_length(),
                solution.steps_taken,
                solution.solve_time.as_secs_f64()
            );
        } else {
            out += &format!("{} - No solution found\n", solution.algorithm);
        }
    }

    out += &comparison.verdict().to_string();
    out
}

fn compare(ctx: &Context, path: &Path) -> Result<(), AppError> {
    let maze = ctx.load(path)?;
    let comparison = solver::compare(&maze, false);

    let view = comparison
        .solutions()
        .into_iter()
        .fold(MazeView::new(&maze), |view, solution| {
            view.with_path(&solution.path, solution.algorithm)
        });
    print_view(&view, &ctx.scheme())?;
    println!("{}", comparison_summary(&comparison).trim_end());
    Ok(())
}

fn replay(
    ctx: &Context,
    path: &Path,
    algorithm: Algorithm,
    delay: Duration,
) -> Result<(), AppError> {
    let maze = ctx.load(path)?;
    let solution = solve_in_background(maze.clone(), algorithm, true)?;

    if !solution.found {
        println!("{}: No solution found!", algorithm);
        return Ok(());
    }

    let outcome = replay::run(&maze, &solution, &ctx.scheme(), delay)?;
    if outcome.stopped {
        println!("Replay stopped after {} of {} steps", outcome.shown, outcome.total);
    } else {
        println!(
            "{} Animation Complete - Path Length: {}, Steps Explored: {}",
            algorithm,
            solution.path_length(),
            solution.steps_taken
        );
    }
    Ok(())
}

/// Applies one editor operation, returns a line describing the result.
pub fn apply_edit(maze: &mut Maze, edit: &Edit) -> Result<String, AppError> {
    let target = edit.target();
    let message = if let Some(kind) = edit.wall_kind() {
        let present = maze.toggle_wall(kind, target)?;
        let state = if present { "added" } else { "removed" };
        format!("{} wall at {} {}", kind, target, state)
    } else if let Edit::Entrance { .. } = edit {
        maze.set_entrance(target)?;
        format!("Entrance moved to {}", target)
    } else {
        maze.set_exit(target)?;
        format!("Exit moved to {}", target)
    };

    log::info!("{}", message);
    Ok(message)
}

fn print_view(view: &MazeView, scheme: &ColorScheme) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if stdout.is_tty() {
        view.write_styled(&mut out, scheme, "\n")?;
    } else {
        out.write_all(view.render_plain().as_bytes())?;
    }
    out.flush()
}
