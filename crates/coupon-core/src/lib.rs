//! # coupon-core: Pure Coupon Validation Logic
//!
//! This crate decides whether a coupon code can be applied to a cart. It
//! contains the catalog model, the validation rules and the redemption state,
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Coupon Validator Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Front ends (console menu, GUI, checkout page)        │   │
//! │  │     read input ──► call engine ──► render ReasonCode + facts    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ coupon-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  engine   │  │  shared   │  │   money   │  │   │
//! │  │   │ Catalog   │  │ validate  │  │ Arc<Mutex>│  │  Money    │  │   │
//! │  │   │ lookup    │  │ list_*    │  │ handle    │  │  parse    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO WALL CLOCK • NO MESSAGE TEXT                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Coupon definitions, reason codes, validation outcomes
//! - [`money`] - Integer-cent money type
//! - [`catalog`] - Validated, ordered coupon catalog
//! - [`engine`] - The validation rules and redemption state
//! - [`shared`] - Thread-safe engine handle
//! - [`validation`] - Catalog field validators
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Injected Clock**: every date-dependent call takes `today`
//! 2. **Integer Money**: amounts are cents (i64), never floats
//! 3. **Decisions, Not Messages**: outcomes are reason codes plus numbers
//! 4. **Fail Fast**: a bad catalog entry is an error at construction time
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use coupon_core::{Catalog, CouponDefinition, CouponEngine, Money, ReasonCode};
//!
//! let expiry = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
//! let catalog = Catalog::new(vec![
//!     CouponDefinition::new("SAVE15", 15, Money::from_cents(7500), expiry),
//! ]).unwrap();
//! let mut engine = CouponEngine::new(catalog);
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let outcome = engine.validate("save15", Money::from_cents(5000), today);
//!
//! assert_eq!(outcome.reason, ReasonCode::BelowMinimum);
//! assert_eq!(outcome.amount_needed, Some(Money::from_cents(2500)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod money;
pub mod shared;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use engine::CouponEngine;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use shared::SharedCouponEngine;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a coupon code.
///
/// ## Business Reason
/// Codes are typed by hand at checkout. Anything longer is a pasted token,
/// not a promotional code.
pub const MAX_CODE_LENGTH: usize = 32;

/// Maximum length of a coupon description.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;
