use std::sync::OnceLock;
#[cfg(test)]
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

enum Sink {
    Stderr,
    /// Captured lines, used to assert on log output.
    #[cfg(test)]
    Memory(Mutex<Vec<String>>),
}

pub struct Logger {
    level: Level,
    sink: Sink,
}

impl Logger {
    pub fn stderr(level: Level) -> Self {
        Self {
            level,
            sink: Sink::Stderr,
        }
    }

    #[cfg(test)]
    pub fn in_memory(level: Level) -> Self {
        Self {
            level,
            sink: Sink::Memory(Mutex::new(Vec::new())),
        }
    }

    /// Lines captured by an in-memory logger. Always empty for stderr.
    #[cfg(test)]
    pub fn captured(&self) -> Vec<String> {
        match &self.sink {
            Sink::Stderr => Vec::new(),
            Sink::Memory(lines) => lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

fn format_line(record: &Record<'_>) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!(
        "{} {} [{}] {}",
        timestamp,
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record);
        match &self.sink {
            Sink::Stderr => eprintln!("{line}"),
            #[cfg(test)]
            Sink::Memory(lines) => lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line),
        }
    }

    fn flush(&self) {}
}

fn level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

/// Install the stderr logger, level taken from `DIRCACHE_LOG_LEVEL`.
/// Repeated calls are no-ops.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(level_from_env())
}

pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first caller installs; later levels would disagree with the
    // level the stored logger was built with.
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let logger = LOGGER.get_or_init(|| Logger::stderr(level));
    log::set_logger(logger)?;
    log::set_max_level(level.to_level_filter());

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
