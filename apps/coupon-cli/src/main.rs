//! # Coupon Helper Entry Point
//!
//! ```text
//! $ coupons --today 2025-06-01
//! Welcome to Your Coupon Helper!
//! ...
//! ```
//!
//! Setup lives in `lib.rs` so it can be tested.

fn main() -> anyhow::Result<()> {
    coupon_cli::run()?;
    Ok(())
}
