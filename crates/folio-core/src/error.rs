//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── CoreError        - Document operations (index misses, JSON)       │
//! │  └── ValidationError  - Strict-mode input failures                     │
//! │                                                                         │
//! │  preview app errors (separate crate)                                   │
//! │  └── AppError         - What the CLI reports before exiting            │
//! │                                                                         │
//! │  NOTE: the totals engine and currency formatter have NO error channel. │
//! │        Bad numbers become zero, unknown currencies echo their code.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the document model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item index is past the end of the item list.
    ///
    /// ## When This Occurs
    /// - The form removed a row and a stale edit arrives for it
    /// - A caller addresses a row that was never added
    #[error("Line item {index} not found (document has {len} items)")]
    LineItemNotFound { index: usize, len: usize },

    /// Document JSON could not be read or written.
    #[error("Invalid document JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Strict-mode input validation errors.
///
/// The permissive engine never produces these. They only appear when a
/// caller opts into [`crate::validation`].
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field holds text that is not a finite number.
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: String, value: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Currency code is not in the registry.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
