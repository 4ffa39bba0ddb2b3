//! # Validation Module
//!
//! Opt-in input checks. Cart operations accept anything; these helpers are
//! for the configuration layer and for callers that choose to harden input.
//!
//! ```rust
//! use swcart_core::validation::validate_quantity;
//!
//! assert!(validate_quantity(3).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::credits::Credits;
use crate::error::ValidationError;
use crate::MAX_TAX_RATE_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a line quantity: must be at least 1.
pub fn validate_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(quantity)
}

/// Validates a tax rate in basis points (0 to 10000).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate_bps".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

/// Validates a configured amount: finite and not negative.
pub fn validate_amount(field: &str, amount: Credits) -> ValidationResult<()> {
    if amount.is_nan() || amount.is_negative() || amount.value().is_infinite() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(999).unwrap(), 999);
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1075).is_ok());
        assert!(validate_tax_rate_bps(10_000).is_ok());
        assert!(validate_tax_rate_bps(10_001).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("delivery_fee", Credits::new(999.0)).is_ok());
        assert!(validate_amount("delivery_fee", Credits::zero()).is_ok());
        assert!(validate_amount("delivery_fee", Credits::new(-1.0)).is_err());
        assert!(validate_amount("delivery_fee", Credits::nan()).is_err());
    }
}
