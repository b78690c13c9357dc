//! # Money Module
//!
//! Provides the `Money` type used for cart totals and coupon minimums.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Coupon minimum: $75.00   Cart: $74.99                                  │
//! │    75.0 - 74.99 = 0.010000000000005116  ❌ "You're $0.01 away" breaks   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    7500 - 7499 = 1 cent, exactly                                       │
//! │                                                                         │
//! │  The boundary check `cart < minimum` must be exact, so every amount    │
//! │  the engine sees is already in cents.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::money::Money;
//!
//! let minimum = Money::from_cents(7500); // $75.00
//! let cart: Money = "50".parse().unwrap();
//!
//! assert_eq!((minimum - cart).cents(), 2500);
//! assert_eq!(minimum.percentage_of(15).cents(), 1125);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  "75.50" typed at checkout ──► Money::parse ──► CouponEngine::validate  │
/// │                                                                         │
/// │  CouponDefinition.minimum_cart_cents ──► minimum_cart() ──┐             │
/// │                                                           ▼             │
/// │                             amount_needed = minimum - cart (shortfall)  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(75, 50).cents(), 7550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a user-entered amount such as `50`, `75.5`, `75.50` or `$75.50`.
    ///
    /// ## Rules
    /// - Surrounding whitespace and a single leading `$` are ignored
    /// - At most two decimal places
    /// - A leading `-` is accepted; deciding what a negative cart means is
    ///   left to the engine
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// assert_eq!(Money::parse("75.5").unwrap().cents(), 7550);
    /// assert_eq!(Money::parse("$0.99").unwrap().cents(), 99);
    /// assert!(Money::parse("abc").is_err());
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let trimmed = input.trim();
        let unsigned = trimmed.strip_prefix('-');
        let negative = unsigned.is_some();
        let body = unsigned.unwrap_or(trimmed);
        let body = body.strip_prefix('$').unwrap_or(body).trim();

        if body.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (body, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must contain at least one digit"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a number like 50 or 75.50"));
        }
        if frac.len() > 2 {
            return Err(invalid("must have at most two decimal places"));
        }

        let out_of_range = || ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: i64::MIN / 100,
            max: i64::MAX / 100,
        };

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };
        // "7.5" means 50 cents, not 5
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| out_of_range())? * 10,
            _ => frac.parse().map_err(|_| out_of_range())?,
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .ok_or_else(out_of_range)?;

        Ok(Money(if negative { -total } else { total }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative amounts to zero.
    ///
    /// A cart can never be worth less than nothing, so the engine runs every
    /// incoming cart amount through this before comparing against minimums.
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Returns `percent`% of this amount, rounded half-up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// // 15% of $33.33 = $4.9995 → $5.00
    /// assert_eq!(Money::from_cents(3333).percentage_of(15).cents(), 500);
    /// ```
    pub fn percentage_of(&self, percent: u8) -> Money {
        // i128 keeps large carts from overflowing before the division
        let scaled = self.0 as i128 * percent as i128;
        let rounded = if scaled >= 0 { (scaled + 50) / 100 } else { (scaled - 50) / 100 };
        Money::from_cents(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$12.34`. Front ends with other currencies format cents themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(7550);
        assert_eq!(money.cents(), 7550);
        assert_eq!(money.dollars(), 75);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2500).to_string(), "$25.00");
        assert_eq!(Money::from_cents(1).to_string(), "$0.01");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_parse_accepts_common_inputs() {
        assert_eq!(Money::parse("50").unwrap().cents(), 5000);
        assert_eq!(Money::parse("75.50").unwrap().cents(), 7550);
        assert_eq!(Money::parse("75.5").unwrap().cents(), 7550);
        assert_eq!(Money::parse(" $49.99 ").unwrap().cents(), 4999);
        assert_eq!(Money::parse(".99").unwrap().cents(), 99);
        assert_eq!(Money::parse("10.").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-5").unwrap().cents(), -500);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("fifty"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Money::parse("1.234"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Money::parse("."),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Money::parse("1e5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_str_matches_parse() {
        let parsed: Money = "12.34".parse().unwrap();
        assert_eq!(parsed, Money::from_major_minor(12, 34));
    }

    #[test]
    fn test_arithmetic() {
        let minimum = Money::from_cents(7500);
        let cart = Money::from_cents(5000);
        assert_eq!((minimum - cart).cents(), 2500);
        assert_eq!((minimum + cart).cents(), 12500);

        let mut running = Money::zero();
        running += minimum;
        running -= cart;
        assert_eq!(running.cents(), 2500);
    }

    #[test]
    fn test_non_negative_clamps() {
        assert_eq!(Money::from_cents(-100).non_negative(), Money::zero());
        assert_eq!(Money::from_cents(100).non_negative().cents(), 100);
        assert!(Money::from_cents(-1).is_negative());
        assert!(Money::zero().non_negative().is_zero());
    }

    #[test]
    fn test_percentage_of_rounds_half_up() {
        assert_eq!(Money::from_cents(6000).percentage_of(10).cents(), 600);
        assert_eq!(Money::from_cents(3333).percentage_of(15).cents(), 500);
        // 5% of $0.10 = 0.5 cents → 1 cent
        assert_eq!(Money::from_cents(10).percentage_of(5).cents(), 1);
        assert_eq!(Money::from_cents(6000).percentage_of(0).cents(), 0);
        assert_eq!(Money::from_cents(6000).percentage_of(100).cents(), 6000);
    }
}
