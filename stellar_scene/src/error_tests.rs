//! Unit tests for error.rs

use crate::error::{Error, ErrorCode, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_cant_open_file_display() {
    let err = Error::CantOpenFile("level1".to_string());
    assert_eq!(format!("{}", err), "Can't open file: level1");
}

#[test]
fn test_invalid_file_display() {
    let err = Error::InvalidFile("can't open \"a.xyz\", unsupported format".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Invalid file"));
    assert!(display.contains("unsupported format"));
}

#[test]
fn test_invalid_mesh_display() {
    let err = Error::InvalidMesh("non triangular face".to_string());
    assert!(format!("{}", err).contains("Invalid mesh"));
}

// ============================================================================
// ERROR CODES
// ============================================================================

#[test]
fn test_error_codes() {
    assert_eq!(Error::CantOpenFile(String::new()).code(), ErrorCode::CantOpenFile);
    assert_eq!(Error::InvalidFile(String::new()).code(), ErrorCode::InvalidFile);
    assert_eq!(Error::InvalidMesh(String::new()).code(), ErrorCode::InvalidMesh);
    assert_eq!(Error::CorruptPackage(String::new()).code(), ErrorCode::CorruptPackage);
    assert_eq!(Error::InvalidResource(String::new()).code(), ErrorCode::InvalidResource);
    assert_eq!(Error::BackendError(String::new()).code(), ErrorCode::Backend);
}

#[test]
fn test_error_message_strips_prefix() {
    let err = Error::CorruptPackage("entry 'rock' truncated".to_string());
    assert_eq!(err.message(), "entry 'rock' truncated");
}

#[test]
fn test_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pak");
    let err: Error = io.into();
    assert_eq!(err.code(), ErrorCode::CantOpenFile);
    assert!(err.message().contains("missing.pak"));
}

#[test]
fn test_error_is_std_error() {
    let err = Error::BackendError("query pool exhausted".to_string());
    let _: &dyn std::error::Error = &err;
}

// ============================================================================
// MACROS AND PROPAGATION
// ============================================================================

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("stellar::Test", "device lost after {} frames", 3);
    assert_eq!(err, Error::BackendError("device lost after 3 frames".to_string()));
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails() -> Result<u32> {
        crate::engine_bail!("stellar::Test", "bail {}", "now");
    }
    assert_eq!(fails(), Err(Error::BackendError("bail now".to_string())));
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidResource("model".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}
