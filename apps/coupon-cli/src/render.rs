//! # Rendering
//!
//! Turns engine results into the text the customer reads.
//!
//! The engine answers with a `ReasonCode` plus numbers; every sentence lives
//! here. Swapping wording (or language) never touches `coupon-core`.
//!
//! ## Outcome → Message
//! ```text
//! ┌────────────────┬───────────────────────────────────────────────────────┐
//! │ NOT_FOUND      │ couldn't find that coupon code                        │
//! │ ALREADY_USED   │ already been used (single use)                        │
//! │ EXPIRED        │ expired {days_past_expiry} days ago                   │
//! │ BELOW_MINIMUM  │ {amount_needed} away, unlock your {offer}             │
//! │ OK             │ free shipping, or {percent}% = {savings} off          │
//! └────────────────┴───────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use coupon_core::{
    AvailableCoupons, CouponDefinition, CouponStatus, Money, Offer, ReasonCode, ValidationOutcome,
};

const HEAVY_RULE: char = '━';

/// Formats results using the configured currency symbol.
#[derive(Debug, Clone)]
pub struct Renderer {
    currency_symbol: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new("$")
    }
}

impl Renderer {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Renderer {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Formats an amount as `$12.34`.
    pub fn money(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }

    /// Message for one `validate` call.
    ///
    /// `coupon` is the catalog entry for the code, when there is one. It only
    /// adds detail (the offer being missed, the savings); every message can be
    /// rendered without it.
    pub fn validation(
        &self,
        outcome: &ValidationOutcome,
        coupon: Option<&CouponDefinition>,
        cart: Money,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Checking your coupon: '{}'...", outcome.code);
        let _ = writeln!(out, "{}", rule(40));

        match outcome.reason {
            ReasonCode::NotFound => {
                let _ = writeln!(out, "✗ Oops! We couldn't find that coupon code.");
                let _ = writeln!(out, "   Please check the spelling and try again.");
            }
            ReasonCode::AlreadyUsed => {
                let _ = writeln!(out, "✗ This coupon has already been used.");
                let _ = writeln!(out, "   Each coupon can only be used once!");
            }
            ReasonCode::Expired => {
                let days = outcome.days_past_expiry.unwrap_or_default();
                let _ = writeln!(
                    out,
                    "✗ This coupon expired {} {} ago.",
                    days,
                    if days == 1 { "day" } else { "days" }
                );
                let _ = writeln!(out, "   Check out our current offers from the menu!");
            }
            ReasonCode::BelowMinimum => {
                let needed = outcome.amount_needed.unwrap_or_default();
                let _ = writeln!(
                    out,
                    "✗ You're {} away from using this coupon!",
                    self.money(needed)
                );
                match coupon.map(CouponDefinition::offer) {
                    Some(offer) => {
                        let _ = writeln!(
                            out,
                            "   Add a few more items to unlock your {}!",
                            unlock_phrase(offer)
                        );
                    }
                    None => {
                        let _ = writeln!(out, "   Add a few more items to unlock it!");
                    }
                }
            }
            ReasonCode::Ok if outcome.free_shipping => {
                let _ = writeln!(out, "✓ Amazing! You've unlocked FREE shipping!");
                let _ = writeln!(out, "   Your delivery charges are on us!");
            }
            ReasonCode::Ok => {
                let _ = writeln!(
                    out,
                    "✓ Fantastic! You save {}% on your order!",
                    outcome.discount_percent
                );
                if let Some(coupon) = coupon {
                    let _ = writeln!(
                        out,
                        "   That's {} off your {} cart!",
                        self.money(coupon.savings_on(cart)),
                        self.money(cart.non_negative())
                    );
                }
            }
        }

        if outcome.valid {
            let _ = writeln!(out);
            let _ = writeln!(out, "COUPON APPLIED SUCCESSFULLY!");
        }

        out
    }

    /// Numbered list of coupons usable for the cart, or how to qualify.
    pub fn available(&self, available: &AvailableCoupons) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Available coupons for a {} order:",
            self.money(available.cart)
        );
        let _ = writeln!(out, "{}", rule(45));

        if !available.is_empty() {
            for (i, coupon) in available.coupons.iter().enumerate() {
                let _ = writeln!(out, "{}. {} - {}", i + 1, coupon.code, listing_offer(coupon.offer()));
                if !coupon.description.is_empty() {
                    let _ = writeln!(out, "    {}", coupon.description);
                }
                let _ = writeln!(out);
            }
            return out;
        }

        let _ = writeln!(out, "No coupons available for your cart amount yet...");
        if let Some(hint) = &available.unlock_hint {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Pro tip: Add {} more to your cart and you'll qualify for:",
                self.money(hint.amount_needed)
            );
            for coupon in &hint.coupons {
                let _ = writeln!(out, "    {}!", hint_offer(coupon.offer()));
            }
        }

        out
    }

    /// Every coupon with its status.
    pub fn all(&self, rows: &[CouponStatus]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "All coupon codes:");
        let _ = writeln!(out, "{}", rule(25));

        if rows.is_empty() {
            let _ = writeln!(out, "   (the catalog is empty)");
            return out;
        }

        for row in rows {
            let coupon = &row.definition;
            let _ = writeln!(
                out,
                "   {}: {} (min {}) - {}{}",
                coupon.code,
                coupon.offer(),
                self.money(coupon.minimum_cart()),
                if row.used { "Used" } else { "Available" },
                if row.expired { " (Expired)" } else { "" }
            );
        }

        out
    }
}

fn rule(width: usize) -> String {
    std::iter::repeat(HEAVY_RULE).take(width).collect()
}

/// "unlock your ..." wording.
fn unlock_phrase(offer: Offer) -> String {
    match offer {
        Offer::FreeShipping => "free shipping".to_string(),
        Offer::PercentOff(percent) => format!("{}% discount", percent),
    }
}

/// Numbered-list wording.
fn listing_offer(offer: Offer) -> String {
    match offer {
        Offer::FreeShipping => "FREE Shipping".to_string(),
        Offer::PercentOff(percent) => format!("{}% OFF", percent),
    }
}

/// "you'll qualify for ..." wording.
fn hint_offer(offer: Offer) -> String {
    match offer {
        Offer::FreeShipping => "free shipping".to_string(),
        Offer::PercentOff(percent) => format!("{}% off", percent),
    }
}
