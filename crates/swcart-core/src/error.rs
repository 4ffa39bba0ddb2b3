//! # Error Types
//!
//! Domain-specific error types for swcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  swcart-core errors (this file)                                        │
//! │  ├── CoreError        - Strict-mode domain errors                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  swcart-session errors (separate crate)                                │
//! │  └── SessionError     - Config loading, command log parsing            │
//! │                                                                         │
//! │  Cart operations themselves never return these: invalid input flows   │
//! │  through to the derived totals instead.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// Only the strict helpers produce these (`Vehicle::try_cost`,
/// `QuantityMode::from_str`). The fold and the totals are total functions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A vehicle's cost cannot be read as a number.
    ///
    /// ## When This Occurs
    /// The catalog reports costs as text and uses `"unknown"` for vehicles
    /// without a list price.
    #[error("Vehicle {vehicle} has a non-numeric cost: {raw:?}")]
    InvalidCost { vehicle: String, raw: String },

    /// Quantity mode name not recognized.
    #[error("Unknown quantity mode: '{0}'. Valid options: permissive, normalize")]
    UnknownQuantityMode(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidCost {
            vehicle: "Sand Crawler".to_string(),
            raw: "unknown".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Vehicle Sand Crawler has a non-numeric cost: \"unknown\""
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "tax_rate_bps".to_string(),
            min: 0,
            max: 10_000,
        };
        assert_eq!(err.to_string(), "tax_rate_bps must be between 0 and 10000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustNotBeNegative {
            field: "delivery_fee".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
