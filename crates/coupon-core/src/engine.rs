//! # Coupon Engine
//!
//! Validates coupon codes against a [`Catalog`] and remembers which codes
//! have been redeemed.
//!
//! ## Validation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate(code, cart, today)                                            │
//! │                                                                         │
//! │  canonical_code(code)                                                   │
//! │       │                                                                 │
//! │       ├── not in catalog? ─────────────► NOT_FOUND                      │
//! │       │                                                                 │
//! │       ├── in used_codes? ──────────────► ALREADY_USED                   │
//! │       │                                                                 │
//! │       ├── today > expiry_date? ────────► EXPIRED { days_past_expiry }   │
//! │       │                                                                 │
//! │       ├── cart < minimum? ─────────────► BELOW_MINIMUM { amount_needed }│
//! │       │                                                                 │
//! │       └── used_codes.insert(code) ─────► OK { discount, free_shipping } │
//! │                                                                         │
//! │  Only the last step writes. Every rejection is a pure read, so a       │
//! │  failed attempt can be retried without consuming the coupon.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Clock
//! The engine never reads the wall clock. Callers pass `today`, which keeps
//! expiry checks deterministic across day boundaries in tests.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{AvailableCoupons, CouponDefinition, CouponStatus, UnlockHint, ValidationOutcome};
use crate::types::ReasonCode;
use crate::validation::canonical_code;

/// A catalog plus its redemption state.
///
/// ## Invariants
/// - `used_codes` only ever holds canonical codes present in `catalog`
/// - A code is inserted once, by a successful `validate`, and never removed
#[derive(Debug, Clone, Default)]
pub struct CouponEngine {
    catalog: Catalog,
    used_codes: HashSet<String>,
}

impl CouponEngine {
    /// Creates an engine with no redeemed codes.
    pub fn new(catalog: Catalog) -> Self {
        CouponEngine {
            catalog,
            used_codes: HashSet::new(),
        }
    }

    /// Checks a coupon code against a cart and, if every rule passes,
    /// marks it as used.
    ///
    /// A negative `cart` is treated as an empty ($0.00) cart.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use coupon_core::{Catalog, CouponDefinition, CouponEngine, Money, ReasonCode};
    ///
    /// let expiry = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    /// let catalog = Catalog::new(vec![
    ///     CouponDefinition::new("WELCOME10", 10, Money::from_cents(5000), expiry),
    /// ]).unwrap();
    /// let mut engine = CouponEngine::new(catalog);
    /// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    ///
    /// let first = engine.validate("welcome10", Money::from_cents(6000), today);
    /// assert_eq!(first.reason, ReasonCode::Ok);
    /// assert_eq!(first.discount_percent, 10);
    ///
    /// let second = engine.validate("welcome10", Money::from_cents(6000), today);
    /// assert_eq!(second.reason, ReasonCode::AlreadyUsed);
    /// ```
    pub fn validate(&mut self, code: &str, cart: Money, today: NaiveDate) -> ValidationOutcome {
        let code = canonical_code(code);
        let cart = cart.non_negative();

        let outcome = match self.check(&code, cart, today) {
            Ok(coupon) => {
                let outcome = ValidationOutcome::accepted(coupon);
                self.used_codes.insert(code);
                info!(
                    code = %outcome.code,
                    discount_percent = outcome.discount_percent,
                    free_shipping = outcome.free_shipping,
                    "Coupon redeemed"
                );
                outcome
            }
            Err(rejection) => rejection,
        };

        debug!(code = %outcome.code, reason = %outcome.reason, cart = %cart, %today, "Coupon validated");
        outcome
    }

    /// Runs checks 1-4 without touching state.
    fn check(
        &self,
        code: &str,
        cart: Money,
        today: NaiveDate,
    ) -> Result<&CouponDefinition, ValidationOutcome> {
        let coupon = self
            .catalog
            .get_canonical(code)
            .ok_or_else(|| ValidationOutcome::rejected(code.to_string(), ReasonCode::NotFound))?;

        if self.used_codes.contains(code) {
            return Err(ValidationOutcome::rejected(
                code.to_string(),
                ReasonCode::AlreadyUsed,
            ));
        }

        if coupon.is_expired(today) {
            return Err(ValidationOutcome::expired(
                code.to_string(),
                coupon.days_past_expiry(today),
            ));
        }

        if cart < coupon.minimum_cart() {
            return Err(ValidationOutcome::below_minimum(
                code.to_string(),
                coupon.minimum_cart() - cart,
            ));
        }

        Ok(coupon)
    }

    /// Coupons the customer could redeem right now, in catalog order.
    ///
    /// When nothing qualifies, the result carries an [`UnlockHint`] naming the
    /// smallest top-up that would unlock a coupon that is neither used nor
    /// expired. No hint is given if no such coupon exists.
    pub fn list_available(&self, cart: Money, today: NaiveDate) -> AvailableCoupons {
        let cart = cart.non_negative();

        let coupons: Vec<CouponDefinition> = self
            .redeemable(today)
            .filter(|coupon| coupon.minimum_cart() <= cart)
            .cloned()
            .collect();

        let unlock_hint = if coupons.is_empty() {
            self.unlock_hint(cart, today)
        } else {
            None
        };

        debug!(
            cart = %cart,
            %today,
            available = coupons.len(),
            has_hint = unlock_hint.is_some(),
            "Listed available coupons"
        );

        AvailableCoupons {
            cart,
            coupons,
            unlock_hint,
        }
    }

    fn unlock_hint(&self, cart: Money, today: NaiveDate) -> Option<UnlockHint> {
        let minimum = self
            .redeemable(today)
            .map(CouponDefinition::minimum_cart)
            .filter(|minimum| *minimum > cart)
            .min()?;

        let coupons = self
            .redeemable(today)
            .filter(|coupon| coupon.minimum_cart() == minimum)
            .cloned()
            .collect();

        Some(UnlockHint {
            amount_needed: minimum - cart,
            minimum,
            coupons,
        })
    }

    /// Catalog entries that are neither used nor expired.
    fn redeemable(&self, today: NaiveDate) -> impl Iterator<Item = &CouponDefinition> + '_ {
        self.catalog
            .iter()
            .filter(move |coupon| !self.used_codes.contains(&coupon.code) && !coupon.is_expired(today))
    }

    /// Every coupon with its used/expired flags, in catalog order.
    pub fn list_all(&self, today: NaiveDate) -> Vec<CouponStatus> {
        self.catalog
            .iter()
            .map(|coupon| CouponStatus {
                definition: coupon.clone(),
                used: self.used_codes.contains(&coupon.code),
                expired: coupon.is_expired(today),
            })
            .collect()
    }

    /// Looks up a definition, ignoring case and surrounding whitespace.
    pub fn definition(&self, code: &str) -> Option<&CouponDefinition> {
        self.catalog.get(code)
    }

    pub fn is_used(&self, code: &str) -> bool {
        self.used_codes.contains(&canonical_code(code))
    }

    /// Number of codes redeemed so far.
    pub fn used_count(&self) -> usize {
        self.used_codes.len()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dollars(amount: i64) -> Money {
        Money::from_major_minor(amount, 0)
    }

    /// The five offers the checkout launched with.
    fn starter_engine() -> CouponEngine {
        let catalog = Catalog::new(vec![
            CouponDefinition::new("WELCOME10", 10, dollars(50), date(2025, 12, 31))
                .with_description("Welcome discount for new customers"),
            CouponDefinition::new("SAVE15", 15, dollars(75), date(2026, 8, 31))
                .with_description("Perfect for larger orders"),
            CouponDefinition::new("FREESHIP", 0, dollars(40), date(2028, 12, 31))
                .with_free_shipping()
                .with_description("Free shipping on your order"),
            CouponDefinition::new("SUMMER25", 25, dollars(100), date(2022, 6, 30))
                .with_description("Summer special (expired)"),
            CouponDefinition::new("FIRST5", 5, dollars(20), date(2024, 12, 31))
                .with_description("Small discount for any order"),
        ])
        .unwrap();
        CouponEngine::new(catalog)
    }

    fn codes(coupons: &[CouponDefinition]) -> Vec<&str> {
        coupons.iter().map(|c| c.code.as_str()).collect()
    }

    #[test]
    fn test_welcome_then_already_used() {
        let mut engine = starter_engine();
        let today = date(2025, 6, 1);

        let first = engine.validate("welcome10", dollars(60), today);
        assert!(first.valid);
        assert_eq!(first.reason, ReasonCode::Ok);
        assert_eq!(first.code, "WELCOME10");
        assert_eq!(first.discount_percent, 10);
        assert!(!first.free_shipping);

        let second = engine.validate("welcome10", dollars(60), today);
        assert!(!second.valid);
        assert_eq!(second.reason, ReasonCode::AlreadyUsed);
        assert_eq!(second.discount_percent, 0);

        // a different amount does not matter either
        let third = engine.validate("WELCOME10", dollars(500), today);
        assert_eq!(third.reason, ReasonCode::AlreadyUsed);
    }

    #[test]
    fn test_unknown_code_is_not_found_and_pure() {
        let mut engine = starter_engine();
        let today = date(2025, 6, 1);

        for code in ["NOPE", "", "   ", "welcome 10", "SAVE"] {
            let outcome = engine.validate(code, dollars(1000), today);
            assert_eq!(outcome.reason, ReasonCode::NotFound, "code {:?}", code);
            assert!(!outcome.valid);
        }
        assert_eq!(engine.used_count(), 0);
    }

    #[test]
    fn test_below_minimum_reports_shortfall() {
        let mut engine = starter_engine();
        let outcome = engine.validate("SAVE15", dollars(50), date(2025, 6, 1));

        assert_eq!(outcome.reason, ReasonCode::BelowMinimum);
        assert_eq!(outcome.amount_needed, Some(Money::from_cents(2500)));
        assert_eq!(outcome.days_past_expiry, None);
        assert!(!engine.is_used("SAVE15"));
    }

    #[test]
    fn test_minimum_boundary() {
        let today = date(2025, 6, 1);

        let mut engine = starter_engine();
        let short = engine.validate("SAVE15", Money::from_cents(7499), today);
        assert_eq!(short.reason, ReasonCode::BelowMinimum);
        assert_eq!(short.amount_needed, Some(Money::from_cents(1)));

        let exact = engine.validate("SAVE15", Money::from_cents(7500), today);
        assert_eq!(exact.reason, ReasonCode::Ok);
        assert_eq!(exact.discount_percent, 15);
    }

    #[test]
    fn test_expired_reports_days_past() {
        let mut engine = starter_engine();
        let today = date(2025, 1, 1);
        let outcome = engine.validate("SUMMER25", dollars(150), today);

        assert_eq!(outcome.reason, ReasonCode::Expired);
        let expected = (today - date(2022, 6, 30)).num_days();
        assert_eq!(outcome.days_past_expiry, Some(expected));
        assert_eq!(outcome.days_past_expiry, Some(916));
        assert!(!engine.is_used("SUMMER25"));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let mut on_expiry = starter_engine();
        let outcome = on_expiry.validate("WELCOME10", dollars(60), date(2025, 12, 31));
        assert_eq!(outcome.reason, ReasonCode::Ok);

        let mut day_after = starter_engine();
        let outcome = day_after.validate("WELCOME10", dollars(60), date(2026, 1, 1));
        assert_eq!(outcome.reason, ReasonCode::Expired);
        assert_eq!(outcome.days_past_expiry, Some(1));
    }

    #[test]
    fn test_failed_attempts_do_not_consume_coupon() {
        let mut engine = starter_engine();

        // too small, then expired, then valid
        assert_eq!(
            engine.validate("WELCOME10", dollars(10), date(2025, 6, 1)).reason,
            ReasonCode::BelowMinimum
        );
        assert_eq!(
            engine.validate("WELCOME10", dollars(60), date(2026, 3, 1)).reason,
            ReasonCode::Expired
        );
        assert_eq!(engine.used_count(), 0);

        assert_eq!(
            engine.validate("WELCOME10", dollars(60), date(2025, 6, 1)).reason,
            ReasonCode::Ok
        );
        assert_eq!(engine.used_count(), 1);
        assert!(engine.is_used(" welcome10"));
    }

    #[test]
    fn test_check_order_used_before_expired() {
        let mut engine = starter_engine();
        assert!(engine.validate("WELCOME10", dollars(60), date(2025, 6, 1)).valid);

        // used AND expired AND below minimum: used is reported first
        let outcome = engine.validate("WELCOME10", dollars(1), date(2027, 1, 1));
        assert_eq!(outcome.reason, ReasonCode::AlreadyUsed);
        assert_eq!(outcome.days_past_expiry, None);
    }

    #[test]
    fn test_check_order_expired_before_minimum() {
        let mut engine = starter_engine();
        let outcome = engine.validate("SUMMER25", dollars(1), date(2025, 1, 1));
        assert_eq!(outcome.reason, ReasonCode::Expired);
        assert_eq!(outcome.amount_needed, None);
    }

    #[test]
    fn test_free_shipping_coupon() {
        let mut engine = starter_engine();
        let outcome = engine.validate("freeship", dollars(40), date(2025, 6, 1));

        assert!(outcome.valid);
        assert!(outcome.free_shipping);
        assert_eq!(outcome.discount_percent, 0);
    }

    #[test]
    fn test_negative_cart_treated_as_zero() {
        let catalog = Catalog::new(vec![CouponDefinition::new(
            "ANY",
            5,
            Money::zero(),
            date(2030, 1, 1),
        )])
        .unwrap();
        let mut engine = CouponEngine::new(catalog);

        let outcome = engine.validate("ANY", Money::from_cents(-500), date(2025, 6, 1));
        assert_eq!(outcome.reason, ReasonCode::Ok);

        let mut engine = starter_engine();
        let outcome = engine.validate("SAVE15", Money::from_cents(-500), date(2025, 6, 1));
        assert_eq!(outcome.amount_needed, Some(dollars(75)));
    }

    #[test]
    fn test_list_available_filters_and_keeps_order() {
        let engine = starter_engine();
        let available = engine.list_available(dollars(80), date(2025, 6, 1));

        // SUMMER25 and FIRST5 expired; catalog order, not discount order
        assert_eq!(codes(&available.coupons), ["WELCOME10", "SAVE15", "FREESHIP"]);
        assert!(available.unlock_hint.is_none());
        assert_eq!(available.cart, dollars(80));
    }

    #[test]
    fn test_list_available_excludes_used() {
        let mut engine = starter_engine();
        let today = date(2025, 6, 1);
        assert!(engine.validate("WELCOME10", dollars(60), today).valid);

        let available = engine.list_available(dollars(60), today);
        assert_eq!(codes(&available.coupons), ["FREESHIP"]);
    }

    #[test]
    fn test_list_available_unlock_hint() {
        let engine = starter_engine();
        let available = engine.list_available(dollars(30), date(2025, 6, 1));

        assert!(available.is_empty());
        let hint = available.unlock_hint.expect("hint when nothing qualifies");
        assert_eq!(hint.amount_needed, Money::from_cents(1000));
        assert_eq!(hint.minimum, dollars(40));
        assert_eq!(codes(&hint.coupons), ["FREESHIP"]);
    }

    #[test]
    fn test_unlock_hint_skips_used_and_reports_ties() {
        let today = date(2025, 6, 1);
        let catalog = Catalog::new(vec![
            CouponDefinition::new("CHEAP", 5, dollars(20), date(2030, 1, 1)),
            CouponDefinition::new("TIE-A", 10, dollars(50), date(2030, 1, 1)),
            CouponDefinition::new("OLD", 30, dollars(25), date(2020, 1, 1)),
            CouponDefinition::new("TIE-B", 0, dollars(50), date(2030, 1, 1)).with_free_shipping(),
        ])
        .unwrap();
        let mut engine = CouponEngine::new(catalog);
        assert!(engine.validate("CHEAP", dollars(20), today).valid);

        let available = engine.list_available(dollars(10), today);
        let hint = available.unlock_hint.unwrap();
        assert_eq!(hint.amount_needed, dollars(40));
        assert_eq!(codes(&hint.coupons), ["TIE-A", "TIE-B"]);
    }

    #[test]
    fn test_no_hint_when_nothing_can_be_unlocked() {
        let engine = starter_engine();
        // everything expired
        let available = engine.list_available(dollars(10), date(2029, 1, 1));
        assert!(available.is_empty());
        assert!(available.unlock_hint.is_none());
    }

    #[test]
    fn test_list_all_reports_flags_without_filtering() {
        let mut engine = starter_engine();
        let today = date(2025, 6, 1);
        assert!(engine.validate("SAVE15", dollars(100), today).valid);

        let all = engine.list_all(today);
        assert_eq!(all.len(), engine.catalog().len());

        let flags: Vec<(&str, bool, bool)> = all
            .iter()
            .map(|s| (s.definition.code.as_str(), s.used, s.expired))
            .collect();
        assert_eq!(
            flags,
            [
                ("WELCOME10", false, false),
                ("SAVE15", true, false),
                ("FREESHIP", false, false),
                ("SUMMER25", false, true),
                ("FIRST5", false, true),
            ]
        );
        assert!(all[0].is_redeemable());
        assert!(!all[1].is_redeemable());
    }

    #[test]
    fn test_available_is_subset_of_redeemable_rows() {
        let mut engine = starter_engine();
        let today = date(2025, 6, 1);
        assert!(engine.validate("FREESHIP", dollars(45), today).valid);

        for cents in [0, 1999, 4000, 5000, 7500, 100_000] {
            let cart = Money::from_cents(cents);
            let available = engine.list_available(cart, today);
            let all = engine.list_all(today);

            for coupon in &available.coupons {
                let row = all
                    .iter()
                    .find(|s| s.definition.code == coupon.code)
                    .unwrap();
                assert!(row.is_redeemable());
                assert!(coupon.minimum_cart() <= cart);
            }
        }
    }

    #[test]
    fn test_expiry_recomputed_per_call() {
        let engine = starter_engine();
        let before = engine.list_all(date(2025, 12, 31));
        let after = engine.list_all(date(2026, 1, 1));

        assert!(!before[0].expired);
        assert!(after[0].expired);
    }

    #[test]
    fn test_definition_lookup() {
        let engine = starter_engine();
        let coupon = engine.definition(" save15 ").unwrap();
        assert_eq!(coupon.code, "SAVE15");
        assert_eq!(coupon.description, "Perfect for larger orders");
        assert!(engine.definition("MISSING").is_none());
    }
}
