//! # Domain Types
//!
//! Core domain types for coupon validation.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────────────────┐    │
//! │  │  CouponDefinition   │        │  ValidationOutcome              │    │
//! │  │  ─────────────────  │        │  ─────────────────────────────  │    │
//! │  │  code (key)         │───────►│  reason: ReasonCode             │    │
//! │  │  discount_percent   │        │  discount_percent/free_shipping │    │
//! │  │  minimum_cart_cents │        │  days_past_expiry (EXPIRED)     │    │
//! │  │  expiry_date        │        │  amount_needed (BELOW_MINIMUM)  │    │
//! │  │  free_shipping      │        └─────────────────────────────────┘    │
//! │  └─────────────────────┘                                               │
//! │            │                                                            │
//! │            ├──────────► CouponStatus     (list_all rows)               │
//! │            └──────────► AvailableCoupons (list_available + UnlockHint) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these types carry user-facing text. Front ends render
//! `ReasonCode` plus the numeric facts however they like.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Coupon Definition
// =============================================================================

/// A coupon offer as configured in the catalog.
///
/// Immutable once the catalog is built. The catalog canonicalizes `code`, so
/// any definition obtained from a catalog or engine has an upper-case code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponDefinition {
    /// Code the customer types. Case-insensitive.
    pub code: String,

    /// Percentage off the cart, 0-100.
    #[serde(default)]
    pub discount_percent: u8,

    /// Cart total required before the coupon applies, in cents.
    #[serde(default)]
    pub minimum_cart_cents: i64,

    /// Last day the coupon can be used (inclusive).
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,

    /// Whether the coupon waives delivery charges.
    #[serde(default)]
    pub free_shipping: bool,

    /// Display-only description.
    #[serde(default)]
    pub description: String,

    /// Display-only grouping.
    #[serde(default)]
    pub category: Option<String>,
}

impl CouponDefinition {
    /// Creates a percentage coupon with no description or category.
    pub fn new(
        code: impl Into<String>,
        discount_percent: u8,
        minimum_cart: Money,
        expiry_date: NaiveDate,
    ) -> Self {
        CouponDefinition {
            code: code.into(),
            discount_percent,
            minimum_cart_cents: minimum_cart.cents(),
            expiry_date,
            free_shipping: false,
            description: String::new(),
            category: None,
        }
    }

    /// Marks the coupon as a free-shipping coupon.
    pub fn with_free_shipping(mut self) -> Self {
        self.free_shipping = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns the minimum cart amount as Money.
    #[inline]
    pub fn minimum_cart(&self) -> Money {
        Money::from_cents(self.minimum_cart_cents)
    }

    /// True once `today` is past the expiry date. The expiry day itself is valid.
    #[inline]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today > self.expiry_date
    }

    /// Whole days between the expiry date and `today`.
    ///
    /// Positive once expired, zero on the expiry day, negative before it.
    pub fn days_past_expiry(&self, today: NaiveDate) -> i64 {
        (today - self.expiry_date).num_days()
    }

    /// What the coupon gives, for display.
    ///
    /// Free shipping wins when both flags are set.
    pub fn offer(&self) -> Offer {
        if self.free_shipping {
            Offer::FreeShipping
        } else {
            Offer::PercentOff(self.discount_percent)
        }
    }

    /// Amount the percentage discount takes off `cart`.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use coupon_core::{CouponDefinition, Money};
    ///
    /// let expiry = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    /// let coupon = CouponDefinition::new("WELCOME10", 10, Money::from_cents(5000), expiry);
    /// assert_eq!(coupon.savings_on(Money::from_cents(6000)).cents(), 600);
    /// ```
    pub fn savings_on(&self, cart: Money) -> Money {
        cart.non_negative().percentage_of(self.discount_percent)
    }
}

// =============================================================================
// Offer
// =============================================================================

/// Display summary of what a coupon gives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Offer {
    FreeShipping,
    PercentOff(u8),
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offer::FreeShipping => write!(f, "Free Shipping"),
            Offer::PercentOff(percent) => write!(f, "{}% Off", percent),
        }
    }
}

// =============================================================================
// Reason Code
// =============================================================================

/// Why a validation succeeded or failed.
///
/// ## Check Order
/// ```text
/// NOT_FOUND ──► ALREADY_USED ──► EXPIRED ──► BELOW_MINIMUM ──► OK
///  (most fundamental)                                (all checks passed)
/// ```
/// The first failing check wins, so a customer always hears the most
/// fundamental reason first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    NotFound,
    AlreadyUsed,
    Expired,
    BelowMinimum,
    Ok,
}

impl ReasonCode {
    /// Wire name, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::NotFound => "NOT_FOUND",
            ReasonCode::AlreadyUsed => "ALREADY_USED",
            ReasonCode::Expired => "EXPIRED",
            ReasonCode::BelowMinimum => "BELOW_MINIMUM",
            ReasonCode::Ok => "OK",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Validation Outcome
// =============================================================================

/// Result of one `CouponEngine::validate` call.
///
/// `discount_percent` and `free_shipping` are only populated when `valid`.
/// Each rejection carries just the fact needed to explain it:
///
/// | reason          | fact                |
/// |-----------------|---------------------|
/// | `EXPIRED`       | `days_past_expiry`  |
/// | `BELOW_MINIMUM` | `amount_needed`     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationOutcome {
    /// The canonical code that was checked.
    pub code: String,

    pub valid: bool,

    pub reason: ReasonCode,

    pub discount_percent: u8,

    pub free_shipping: bool,

    /// Days since the coupon expired.
    pub days_past_expiry: Option<i64>,

    /// How much more the cart needs to reach the minimum.
    pub amount_needed: Option<Money>,
}

impl ValidationOutcome {
    /// A rejection with no numeric fact (NOT_FOUND, ALREADY_USED).
    pub(crate) fn rejected(code: String, reason: ReasonCode) -> Self {
        ValidationOutcome {
            code,
            valid: false,
            reason,
            discount_percent: 0,
            free_shipping: false,
            days_past_expiry: None,
            amount_needed: None,
        }
    }

    pub(crate) fn expired(code: String, days_past_expiry: i64) -> Self {
        ValidationOutcome {
            days_past_expiry: Some(days_past_expiry),
            ..Self::rejected(code, ReasonCode::Expired)
        }
    }

    pub(crate) fn below_minimum(code: String, amount_needed: Money) -> Self {
        ValidationOutcome {
            amount_needed: Some(amount_needed),
            ..Self::rejected(code, ReasonCode::BelowMinimum)
        }
    }

    pub(crate) fn accepted(coupon: &CouponDefinition) -> Self {
        ValidationOutcome {
            code: coupon.code.clone(),
            valid: true,
            reason: ReasonCode::Ok,
            discount_percent: coupon.discount_percent,
            free_shipping: coupon.free_shipping,
            days_past_expiry: None,
            amount_needed: None,
        }
    }
}

// =============================================================================
// Listing Types
// =============================================================================

/// One row of `CouponEngine::list_all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponStatus {
    pub definition: CouponDefinition,
    pub used: bool,
    pub expired: bool,
}

impl CouponStatus {
    /// Neither used nor expired (the cart minimum is not considered).
    pub fn is_redeemable(&self) -> bool {
        !self.used && !self.expired
    }
}

/// Result of `CouponEngine::list_available`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AvailableCoupons {
    /// Cart amount the listing was computed for (after clamping).
    pub cart: Money,

    /// Coupons usable right now, in catalog order.
    pub coupons: Vec<CouponDefinition>,

    /// Only present when `coupons` is empty and spending more would help.
    pub unlock_hint: Option<UnlockHint>,
}

impl AvailableCoupons {
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

/// The cheapest way to unlock at least one coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnlockHint {
    /// `minimum - cart`
    pub amount_needed: Money,

    /// The lowest unmet minimum.
    pub minimum: Money,

    /// Every coupon whose minimum equals `minimum`, in catalog order.
    pub coupons: Vec<CouponDefinition>,
}

// =============================================================================
// Unit Tests
// =============================================================================
