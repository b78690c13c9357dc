//! # Error Types
//!
//! Domain-specific error types for coupon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  coupon-core errors (this file)                                        │
//! │  ├── CoreError        - Catalog construction failures                  │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  coupon-cli errors (separate crate)                                    │
//! │  └── CliError         - Config, catalog file, terminal I/O             │
//! │                                                                         │
//! │  NOT errors: a rejected coupon (NOT_FOUND, EXPIRED, ...) is an         │
//! │  ordinary ValidationOutcome value, never an Err.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building a catalog or engine.
///
/// Everything here is a configuration problem: the engine refuses to start
/// with a bad catalog instead of misbehaving at checkout time.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A catalog entry failed field validation.
    ///
    /// ## When This Occurs
    /// ```text
    /// [[coupons]]
    /// code = "HALF OFF"        ◄── space is not allowed
    /// discount_percent = 150   ◄── above 100
    ///      │
    ///      ▼
    /// InvalidCoupon { code: "HALF OFF", source: InvalidFormat { .. } }
    /// ```
    #[error("Invalid coupon '{code}': {source}")]
    InvalidCoupon {
        code: String,
        #[source]
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (bad characters, unparseable amount or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same code twice in a catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
