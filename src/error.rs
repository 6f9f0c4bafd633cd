//! Error types for proclog
//!
//! Centralized error handling using thiserror. Only conditions that break the
//! log itself live here; validation conditions are returned as values.

use std::path::PathBuf;

use thiserror::Error;

/// All hard failures that can occur in proclog
#[derive(Debug, Error)]
pub enum ProclogError {
    /// Log path was empty or whitespace
    #[error("Invalid log path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log was deleted and no longer has a path to create
    #[error("Log path was cleared by a previous delete")]
    PathCleared,

    /// IO error on the log file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for proclog operations
pub type Result<T> = std::result::Result<T, ProclogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_error() {
        let err = ProclogError::InvalidPath(PathBuf::from("  "));
        assert_eq!(err.to_string(), "Invalid log path: \"  \"");
    }

    #[test]
    fn test_path_cleared_error() {
        let err = ProclogError::PathCleared;
        assert_eq!(err.to_string(), "Log path was cleared by a previous delete");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only disk");
        let err: ProclogError = io_err.into();
        assert!(matches!(err, ProclogError::Io(_)));
        assert!(err.to_string().contains("read-only disk"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ProclogError::PathCleared)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
