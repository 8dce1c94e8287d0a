/// Process-wide engine state
///
/// Holds the two pieces of global state the scene core keeps: the active
/// logger and the last-error slot. Everything else (render configuration,
/// graphics device, physics worlds) is passed explicitly.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::Error;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Last reported error
static LAST_ERROR: OnceLock<RwLock<Option<Error>>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn last_error_slot() -> &'static RwLock<Option<Error>> {
    LAST_ERROR.get_or_init(|| RwLock::new(None))
}

// ===== PUBLIC API =====

/// Engine facade (logging and last-error reporting)
pub struct Engine;

impl Engine {
    // ----- Logging -----

    /// Install a custom logger, replacing the current one
    pub fn set_logger<L: Logger + 'static>(new_logger: L) {
        if let Ok(mut guard) = logger().write() {
            *guard = Box::new(new_logger);
        }
    }

    /// Restore the colored console logger
    pub fn reset_logger() {
        Self::set_logger(DefaultLogger);
    }

    /// Log a message (used by the `engine_*!` macros)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let entry = LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        };
        if let Ok(guard) = logger().read() {
            guard.log(&entry);
        }
    }

    /// Log a message with file:line (used by `engine_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let entry = LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        };
        if let Ok(guard) = logger().read() {
            guard.log(&entry);
        }
    }

    // ----- Last error -----

    /// Overwrite the last-error slot
    pub fn set_last_error(error: Error) {
        if let Ok(mut slot) = last_error_slot().write() {
            *slot = Some(error);
        }
    }

    /// Most recently reported error, if any
    pub fn last_error() -> Option<Error> {
        last_error_slot().read().ok().and_then(|slot| slot.clone())
    }

    pub fn clear_last_error() {
        if let Ok(mut slot) = last_error_slot().write() {
            *slot = None;
        }
    }

    /// Log an error, record it in the last-error slot and hand it back
    ///
    /// ```no_run
    /// # use stellar_scene::stellar::{Engine, Error, Result};
    /// fn open(path: &str) -> Result<()> {
    ///     Err(Engine::report("stellar::Scene", Error::CantOpenFile(path.to_string())))
    /// }
    /// ```
    pub fn report(source: &str, error: Error) -> Error {
        crate::engine_error!(source, "{}", error);
        Self::set_last_error(error.clone());
        error
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
