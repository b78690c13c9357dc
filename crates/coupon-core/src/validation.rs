//! # Validation Module
//!
//! Field validators for catalog entries.
//!
//! These run once, when a [`Catalog`](crate::catalog::Catalog) is built. They
//! are unrelated to coupon *eligibility* (expiry, minimum, single-use), which
//! lives in [`engine`](crate::engine) and never produces an error.
//!
//! ## Usage
//! ```rust
//! use coupon_core::validation::{canonical_code, validate_coupon_code};
//!
//! let code = canonical_code("  welcome10 ");
//! assert_eq!(code, "WELCOME10");
//! validate_coupon_code(&code).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_CODE_LENGTH, MAX_DESCRIPTION_LENGTH};

/// Result type for field validators.
pub type FieldResult<T> = Result<T, ValidationError>;

// =============================================================================
// Coupon Code
// =============================================================================

/// Canonical form of a coupon code: trimmed and upper-cased.
///
/// Every lookup and every catalog key goes through this, which is what makes
/// `" welcome10"` and `"WELCOME10"` the same coupon.
pub fn canonical_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validates a canonical coupon code.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_CODE_LENGTH` (32) characters
/// - Only letters, digits, hyphens and underscores
///
/// ## Example
/// ```rust
/// use coupon_core::validation::validate_coupon_code;
///
/// assert!(validate_coupon_code("FREESHIP").is_ok());
/// assert!(validate_coupon_code("SUMMER-25").is_ok());
/// assert!(validate_coupon_code("HALF OFF").is_err());
/// assert!(validate_coupon_code("").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> FieldResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a discount percentage.
///
/// ## Rules
/// - 0 to 100 inclusive
/// - 0 is allowed: a free-shipping-only coupon carries no percentage
pub fn validate_discount_percent(percent: u8) -> FieldResult<()> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a minimum cart amount in cents.
///
/// ## Rules
/// - Must be non-negative
/// - Zero means "no minimum"
pub fn validate_minimum_cents(cents: i64) -> FieldResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "minimum_cart_cents".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Display Metadata
// =============================================================================

/// Validates a coupon description. Empty is fine; it is display-only.
pub fn validate_description(description: &str) -> FieldResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_code() {
        assert_eq!(canonical_code("welcome10"), "WELCOME10");
        assert_eq!(canonical_code("  Save15\t"), "SAVE15");
        assert_eq!(canonical_code("   "), "");
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("WELCOME10").is_ok());
        assert!(validate_coupon_code("BLACK_FRIDAY-2025").is_ok());

        assert!(matches!(
            validate_coupon_code(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_coupon_code("HALF OFF"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_coupon_code(&"A".repeat(33)),
            Err(ValidationError::TooLong { max: 32, .. })
        ));
        assert!(validate_coupon_code(&"A".repeat(32)).is_ok());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(0).is_ok());
        assert!(validate_discount_percent(25).is_ok());
        assert!(validate_discount_percent(100).is_ok());
        assert!(validate_discount_percent(101).is_err());
    }

    #[test]
    fn test_validate_minimum_cents() {
        assert!(validate_minimum_cents(0).is_ok());
        assert!(validate_minimum_cents(5000).is_ok());
        assert!(validate_minimum_cents(-1).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("Welcome discount for new customers").is_ok());
        assert!(validate_description(&"x".repeat(201)).is_err());
    }
}
