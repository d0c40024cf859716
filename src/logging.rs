use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, OnceLock, PoisonError,
    },
};

use crossterm::{
    style::{Color, Stylize},
    tty::IsTty,
};
use log::{Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(io::stderr().is_tty()))
}

pub fn init(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(get_logger())?;
    log::set_max_level(level);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Message {
    pub level: log::Level,
    pub message: String,
    pub source: String,
}

impl Message {
    fn color(&self) -> Color {
        match self.level {
            log::Level::Error => Color::Red,
            log::Level::Warn => Color::Yellow,
            log::Level::Info => Color::White,
            log::Level::Debug => Color::Blue,
            log::Level::Trace => Color::Grey,
        }
    }

    fn write_to(&self, out: &mut impl Write, colored: bool) -> io::Result<()> {
        let tag = format!("{:>5}", self.level);
        if colored {
            writeln!(
                out,
                "{} {} -> {}",
                tag.with(self.color()).bold(),
                self.source.as_str().dim(),
                self.message
            )
        } else {
            writeln!(out, "{} {} -> {}", tag, self.source, self.message)
        }
    }
}

/// Writes log records to stderr.
///
/// While suspended, e.g. when the terminal is taken over by a replay, records are kept
/// and written out on [`AppLogger::resume`].
pub struct AppLogger {
    colored: bool,
    suspended: AtomicBool,
    held: Mutex<Vec<Message>>,
}

impl AppLogger {
    fn new(colored: bool) -> Self {
        Self {
            colored,
            suspended: AtomicBool::new(false),
            held: Mutex::new(Vec::new()),
        }
    }

    fn held(&self) -> MutexGuard<'_, Vec<Message>> {
        // a panic while holding the lock only loses the messages of that moment
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn suspend(&self) {
        self.suspended.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.suspended.store(false, Ordering::Release);
        let held: Vec<_> = self.held().drain(..).collect();

        let mut stderr = io::stderr().lock();
        for message in held {
            let _ = message.write_to(&mut stderr, self.colored);
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Acquire)
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = Message {
            level: record.level(),
            message: record.args().to_string(),
            source: record.module_path().unwrap_or("unknown").to_string(),
        };

        if self.is_suspended() {
            self.held().push(message);
        } else {
            let _ = message.write_to(&mut io::stderr().lock(), self.colored);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
