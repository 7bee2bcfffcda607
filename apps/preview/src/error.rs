//! # App Error Type
//!
//! Unified error type for the preview tool.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ConfigError ───────┐                                                   │
//! │  std::io::Error ────┤                                                   │
//! │  CoreError ─────────┼──► AppError ──► main: log + stderr + exit code    │
//! │  ValidationError ───┤                                                   │
//! │  bad arguments ─────┘                                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use folio_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop a preview run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not read document: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Strict mode rejected the document.
    #[error("Document rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("Usage: {0}")]
    Usage(String),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// - `2`: bad arguments or configuration
    /// - `3`: document could not be read or parsed
    /// - `4`: strict validation failed
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) | AppError::Config(_) => 2,
            AppError::Io(_) | AppError::Core(_) => 3,
            AppError::Rejected(_) => 4,
        }
    }
}

/// Result type for preview operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Usage("x".to_string()).exit_code(), 2);
        assert_eq!(
            AppError::from(ValidationError::UnknownCurrency("XYZ".to_string())).exit_code(),
            4
        );
        let core = CoreError::LineItemNotFound { index: 0, len: 0 };
        assert_eq!(AppError::from(core).exit_code(), 3);
    }

    #[test]
    fn test_messages() {
        let err = AppError::from(ValidationError::UnknownCurrency("XYZ".to_string()));
        assert_eq!(err.to_string(), "Document rejected: Unknown currency code: XYZ");
    }
}
