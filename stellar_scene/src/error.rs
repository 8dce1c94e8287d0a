//! Error types for the scene core
//!
//! Loading failures (unreadable file, unsupported format, corrupt package
//! entry) are returned as [`Error`] values and also recorded in the engine's
//! last-error slot, see `Engine::report`. Contract violations such as
//! removing an actor that is not in the scene are reported as `bool`.

use std::fmt;

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    CantOpenFile,
    InvalidFile,
    InvalidMesh,
    CorruptPackage,
    InvalidResource,
    Backend,
}

/// Scene core errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// File is missing, unreadable, or has no extension
    CantOpenFile(String),

    /// File exists but its format is not supported
    InvalidFile(String),

    /// Imported geometry is malformed (e.g. a non-triangular face)
    InvalidMesh(String),

    /// A package index points at data that cannot be deserialized
    CorruptPackage(String),

    /// A referenced resource is missing or invalid
    InvalidResource(String),

    /// Graphics device or physics backend failure
    BackendError(String),
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::CantOpenFile(_) => ErrorCode::CantOpenFile,
            Error::InvalidFile(_) => ErrorCode::InvalidFile,
            Error::InvalidMesh(_) => ErrorCode::InvalidMesh,
            Error::CorruptPackage(_) => ErrorCode::CorruptPackage,
            Error::InvalidResource(_) => ErrorCode::InvalidResource,
            Error::BackendError(_) => ErrorCode::Backend,
        }
    }

    /// Human-readable message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            Error::CantOpenFile(msg)
            | Error::InvalidFile(msg)
            | Error::InvalidMesh(msg)
            | Error::CorruptPackage(msg)
            | Error::InvalidResource(msg)
            | Error::BackendError(msg) => msg,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CantOpenFile(msg) => write!(f, "Can't open file: {}", msg),
            Error::InvalidFile(msg) => write!(f, "Invalid file: {}", msg),
            Error::InvalidMesh(msg) => write!(f, "Invalid mesh: {}", msg),
            Error::CorruptPackage(msg) => write!(f, "Corrupt package: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::CantOpenFile(err.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an error and evaluate to `Error::BackendError` with the same message
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::stellar::Error::BackendError(message)
    }};
}

/// Log an error and return `Err(Error::BackendError(..))` from the current function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
