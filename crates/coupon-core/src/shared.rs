//! # Shared Engine
//!
//! A cloneable, thread-safe handle around one [`CouponEngine`].
//!
//! ## Why a Lock Around the Whole Check?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Without one critical section (lost update):                            │
//! │                                                                         │
//! │  Till A: is WELCOME10 used? no ─┐                                       │
//! │  Till B: is WELCOME10 used? no ─┼─► both insert ─► redeemed TWICE ❌    │
//! │                                                                         │
//! │  With SharedCouponEngine::validate:                                     │
//! │                                                                         │
//! │  Till A: lock ─► check ─► insert ─► unlock ─► OK                        │
//! │  Till B:        (waits)            lock ─► check ─► ALREADY_USED ✅     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Poisoning
//! The engine's only write is the final `HashSet::insert`, so a panic while the
//! lock is held cannot leave it half-updated. A poisoned lock is recovered
//! rather than propagated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::engine::CouponEngine;
use crate::money::Money;
use crate::types::{AvailableCoupons, CouponStatus, ValidationOutcome};

#[derive(Debug, Clone)]
pub struct SharedCouponEngine {
    engine: Arc<Mutex<CouponEngine>>,
}

impl SharedCouponEngine {
    pub fn new(engine: CouponEngine) -> Self {
        SharedCouponEngine {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CouponEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates and redeems under a single lock acquisition.
    pub fn validate(&self, code: &str, cart: Money, today: NaiveDate) -> ValidationOutcome {
        self.lock().validate(code, cart, today)
    }

    pub fn list_available(&self, cart: Money, today: NaiveDate) -> AvailableCoupons {
        self.lock().list_available(cart, today)
    }

    pub fn list_all(&self, today: NaiveDate) -> Vec<CouponStatus> {
        self.lock().list_all(today)
    }

    /// Executes a function with read access to the engine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let used = shared.with_engine(|engine| engine.used_count());
    /// ```
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CouponEngine) -> R,
    {
        let engine = self.lock();
        f(&engine)
    }
}

impl From<CouponEngine> for SharedCouponEngine {
    fn from(engine: CouponEngine) -> Self {
        SharedCouponEngine::new(engine)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
