//! # Coupon Catalog
//!
//! The fixed set of offers an engine validates against.
//!
//! ## Construction Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Vec<CouponDefinition>  (from a file, a test, or code)                  │
//! │        │                                                                │
//! │        ▼  for each entry, in order                                      │
//! │  canonical_code()          " welcome10" → "WELCOME10"                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  field validators          code / discount / minimum / description     │
//! │        │                   └── fail → CoreError::InvalidCoupon         │
//! │        ▼                                                                │
//! │  duplicate check           └── fail → ValidationError::Duplicate       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Catalog { ordered entries + code index }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bad entry stops construction. Nothing downstream re-checks these fields.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::CouponDefinition;
use crate::validation::{
    canonical_code, validate_coupon_code, validate_description, validate_discount_percent,
    validate_minimum_cents, FieldResult,
};

/// Ordered, validated, read-only collection of coupon definitions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Entries in insertion order. Listing order is this order.
    coupons: Vec<CouponDefinition>,

    /// Canonical code → position in `coupons`.
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, canonicalizing and validating every entry.
    ///
    /// ## Errors
    /// - `CoreError::InvalidCoupon` for an entry with a bad field
    /// - `CoreError::Validation(Duplicate)` when two entries share a code
    ///   after canonicalization
    pub fn new(entries: impl IntoIterator<Item = CouponDefinition>) -> CoreResult<Self> {
        let mut catalog = Catalog::default();

        for mut entry in entries {
            let code = canonical_code(&entry.code);

            check_entry(&code, &entry).map_err(|source| CoreError::InvalidCoupon {
                code: code.clone(),
                source,
            })?;

            if catalog.index.contains_key(&code) {
                return Err(ValidationError::Duplicate {
                    field: "code".to_string(),
                    value: code,
                }
                .into());
            }

            entry.code = code.clone();
            catalog.index.insert(code, catalog.coupons.len());
            catalog.coupons.push(entry);
        }

        Ok(catalog)
    }

    /// A catalog with no offers. Every code validates as NOT_FOUND.
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Looks up a coupon by code, ignoring case and surrounding whitespace.
    pub fn get(&self, code: &str) -> Option<&CouponDefinition> {
        self.get_canonical(&canonical_code(code))
    }

    /// Lookup for a code that is already canonical.
    pub(crate) fn get_canonical(&self, code: &str) -> Option<&CouponDefinition> {
        self.index.get(code).map(|&i| &self.coupons[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Iterates entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CouponDefinition> {
        self.coupons.iter()
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl TryFrom<Vec<CouponDefinition>> for Catalog {
    type Error = CoreError;

    fn try_from(entries: Vec<CouponDefinition>) -> CoreResult<Self> {
        Catalog::new(entries)
    }
}

fn check_entry(code: &str, entry: &CouponDefinition) -> FieldResult<()> {
    validate_coupon_code(code)?;
    validate_discount_percent(entry.discount_percent)?;
    validate_minimum_cents(entry.minimum_cart_cents)?;
    validate_description(&entry.description)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
