//! Unit tests for the Engine facade
//!
//! The logger and last-error slot are process-wide, so every test here is
//! marked #[serial].

use crate::stellar::{Engine, Error};
use crate::stellar::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String, bool)>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        // other test threads may log concurrently
        if entry.source != "stellar::Test" {
            return;
        }
        self.entries
            .lock()
            .unwrap()
            .push((entry.severity, entry.message.clone(), entry.file.is_some()));
    }
}

fn capture() -> Arc<Mutex<Vec<(LogSeverity, String, bool)>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

// ============================================================================
// LOGGING
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_entries() {
    let entries = capture();

    crate::engine_info!("stellar::Test", "loaded {} entities", 4);
    crate::engine_warn!("stellar::Test", "missing texture");

    let logged = entries.lock().unwrap().clone();
    assert_eq!(logged.len(), 2);
    assert_eq!(logged[0], (LogSeverity::Info, "loaded 4 entities".to_string(), false));
    assert_eq!(logged[1].0, LogSeverity::Warn);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_error_macro_carries_location() {
    let entries = capture();

    crate::engine_error!("stellar::Test", "boom");

    let logged = entries.lock().unwrap().clone();
    assert_eq!(logged.len(), 1);
    assert!(logged[0].2, "error entries carry file:line");

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = capture();
    Engine::reset_logger();

    crate::engine_debug!("stellar::Test", "not captured");

    assert!(entries.lock().unwrap().is_empty());
}

// ============================================================================
// LAST ERROR SLOT
// ============================================================================

#[test]
#[serial]
fn test_last_error_roundtrip() {
    Engine::clear_last_error();
    assert!(Engine::last_error().is_none());

    Engine::set_last_error(Error::InvalidFile("x".to_string()));
    assert_eq!(Engine::last_error(), Some(Error::InvalidFile("x".to_string())));

    Engine::clear_last_error();
    assert!(Engine::last_error().is_none());
}

#[test]
#[serial]
fn test_report_logs_and_records() {
    let entries = capture();
    Engine::clear_last_error();

    let err = Engine::report("stellar::Test", Error::CantOpenFile("level.pak".to_string()));

    assert_eq!(err, Error::CantOpenFile("level.pak".to_string()));
    assert_eq!(Engine::last_error(), Some(err));
    assert_eq!(entries.lock().unwrap()[0].0, LogSeverity::Error);

    Engine::clear_last_error();
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_report_overwrites_previous_error() {
    Engine::clear_last_error();
    Engine::set_last_error(Error::InvalidMesh("face".to_string()));
    let _ = Engine::report("stellar::Test", Error::CorruptPackage("index".to_string()));
    assert_eq!(Engine::last_error().map(|e| e.code()), Some(crate::stellar::ErrorCode::CorruptPackage));
    Engine::clear_last_error();
}
