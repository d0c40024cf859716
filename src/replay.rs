use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use cwmaze::{progress::Flag, solver::Replay, Maze, Solution};

use crate::{logging, render::MazeView, settings::ColorScheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub shown: usize,
    pub total: usize,
    pub stopped: bool,
}

/// Raw mode and the alternate screen, for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // from here on, dropping the guard undoes whatever part of the setup ran
        let guard = TerminalGuard;
        logging::get_logger().suspend();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        logging::get_logger().resume();
    }
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Sleeps for `delay`, raising the flag as soon as a quit key comes in.
fn wait_or_stop(delay: Duration, stop: &Flag) -> io::Result<()> {
    let deadline = Instant::now() + delay;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if !event::poll(left)? {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if is_quit_key(&key) {
                stop.stop();
                return Ok(());
            }
        }

        if left.is_zero() {
            return Ok(());
        }
    }
}

fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(());
        }
    }
}

fn draw(
    out: &mut impl Write,
    view: &MazeView,
    scheme: &ColorScheme,
    status: &str,
) -> io::Result<()> {
    queue!(out, MoveTo(0, 0))?;
    view.write_styled(out, scheme, "\r\n")?;
    queue!(out, Print(status), Clear(ClearType::UntilNewLine))?;
    out.flush()
}

/// Plays the recorded trace of `solution` in the terminal, then shows the found path.
pub fn run(
    maze: &Maze,
    solution: &Solution,
    scheme: &ColorScheme,
    delay: Duration,
) -> io::Result<ReplayOutcome> {
    let mut out = io::stdout();
    let _guard = TerminalGuard::enter(&mut out)?;

    let mut replay = Replay::new(&solution.exploration_order, maze.size());
    let stop = replay.stop_flag();
    let algorithm = solution.algorithm;

    draw(&mut out, &MazeView::new(maze), scheme, "q or Esc to stop")?;
    wait_or_stop(delay, &stop)?;

    while let Some(step) = replay.step() {
        let status = format!(
            "{} step {}/{}: {}  (q to stop)",
            algorithm,
            replay.position(),
            replay.len(),
            step
        );
        draw(&mut out, &MazeView::new(maze).with_replay(&replay), scheme, &status)?;
        wait_or_stop(delay, &stop)?;
    }

    let outcome = ReplayOutcome {
        shown: replay.position(),
        total: replay.len(),
        stopped: replay.is_stopped(),
    };

    if !outcome.stopped {
        let view = MazeView::new(maze)
            .with_replay(&replay)
            .with_path(&solution.path, algorithm);
        let status = format!("{} done, press any key", algorithm);
        draw(&mut out, &view, scheme, &status)?;
        wait_for_key()?;
    }

    log::debug!("Replay ended: {:?}", outcome);
    Ok(outcome)
}
