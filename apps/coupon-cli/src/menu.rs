//! # Console Menu
//!
//! The interactive loop the `coupons` binary runs.
//!
//! ## Loop
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  banner                                                            │
//! │    │                                                               │
//! │    ▼                                                               │
//! │  menu ──► "1" ─► code + cart ─► engine.validate ─► render          │
//! │    ▲      "2" ─► cart ───────► engine.list_available ─► render     │
//! │    │      "3" ─────────────► engine.list_all ─► render             │
//! │    │      "4" / EOF ─► farewell, return                            │
//! │    │      other ─► "choose 1, 2, 3, or 4"                          │
//! │    └───────────────────────────────────────────────────────────────┘
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so tests drive the loop with in-memory
//! buffers.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use coupon_core::{CouponEngine, Money};
use tracing::debug;

use crate::error::CliResult;
use crate::render::Renderer;

/// Interactive session over one engine.
pub struct Menu<'a, R, W> {
    engine: &'a mut CouponEngine,
    renderer: &'a Renderer,
    today: NaiveDate,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        engine: &'a mut CouponEngine,
        renderer: &'a Renderer,
        today: NaiveDate,
        input: R,
        output: W,
    ) -> Self {
        Menu {
            engine,
            renderer,
            today,
            input,
            output,
        }
    }

    /// Runs until the customer picks Exit or input ends.
    pub fn run(mut self) -> CliResult<()> {
        writeln!(self.output, "Welcome to Your Coupon Helper!")?;
        writeln!(self.output, "Find the best discounts for your shopping!")?;
        writeln!(self.output, "{}", "=".repeat(50))?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "What would you like to do?")?;
            writeln!(self.output, "1. Check a coupon code")?;
            writeln!(self.output, "2. See available coupons for my cart")?;
            writeln!(self.output, "3. View all coupon codes")?;
            writeln!(self.output, "4. Exit")?;

            let Some(choice) = self.prompt("\nEnter your choice (1-4): ")? else {
                break;
            };
            debug!(choice = %choice, "Menu choice");

            match choice.as_str() {
                "1" => {
                    if !self.check_coupon()? {
                        break;
                    }
                }
                "2" => {
                    if !self.show_available()? {
                        break;
                    }
                }
                "3" => self.show_all()?,
                "4" => break,
                _ => writeln!(self.output, "✗ Please choose 1, 2, 3, or 4")?,
            }
        }

        writeln!(self.output)?;
        writeln!(self.output, "Thank you for shopping with us!")?;
        writeln!(self.output, "Hope you found great savings!")?;
        self.output.flush()?;
        Ok(())
    }

    // =========================================================================
    // Menu Actions
    // =========================================================================
    // Each returns Ok(false) when input ended mid-action.

    fn check_coupon(&mut self) -> CliResult<bool> {
        writeln!(self.output, "\nLet's check your coupon!")?;
        let Some(code) = self.prompt("Enter your coupon code: ")? else {
            return Ok(false);
        };
        if code.is_empty() {
            writeln!(self.output, "✗ Please enter a coupon code to check")?;
            return Ok(true);
        }

        let Some(cart) = self.prompt_amount("✗ Please enter a valid amount (like 50 or 75.50)")?
        else {
            return Ok(false);
        };
        let Some(cart) = cart else {
            return Ok(true);
        };

        let outcome = self.engine.validate(&code, cart, self.today);
        let text = self
            .renderer
            .validation(&outcome, self.engine.definition(&code), cart);
        write!(self.output, "\n{}", text)?;
        Ok(true)
    }

    fn show_available(&mut self) -> CliResult<bool> {
        writeln!(self.output, "\nLet's find coupons for your cart!")?;
        let Some(cart) = self.prompt_amount("✗ Please enter a valid amount")? else {
            return Ok(false);
        };
        let Some(cart) = cart else {
            return Ok(true);
        };

        let available = self.engine.list_available(cart, self.today);
        write!(self.output, "\n{}", self.renderer.available(&available))?;
        Ok(true)
    }

    fn show_all(&mut self) -> CliResult<()> {
        let rows = self.engine.list_all(self.today);
        write!(self.output, "\n{}", self.renderer.all(&rows))?;
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads a cart total. The outer `None` is end of input; the inner one is
    /// an unparseable amount, already reported with `complaint`.
    fn prompt_amount(&mut self, complaint: &str) -> CliResult<Option<Option<Money>>> {
        let label = format!("Enter your cart total: {}", self.renderer.symbol());
        let Some(raw) = self.prompt(&label)? else {
            return Ok(None);
        };

        match Money::parse(&raw) {
            Ok(cart) => Ok(Some(Some(cart))),
            Err(err) => {
                debug!(input = %raw, error = %err, "Rejected cart amount");
                writeln!(self.output, "{}", complaint)?;
                Ok(Some(None))
            }
        }
    }
}
