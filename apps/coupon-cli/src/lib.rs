//! # Coupon CLI Library
//!
//! Console front end for `coupon-core`. The `coupons` binary is a thin
//! wrapper around [`run`].
//!
//! ## Module Organization
//! ```text
//! coupon_cli/
//! ├── lib.rs           ◄─── You are here (startup & wiring)
//! ├── config.rs        ◄─── Settings file, env overrides, flags
//! ├── catalog_file.rs  ◄─── TOML/JSON catalog loading, built-in offers
//! ├── menu.rs          ◄─── Interactive 1-4 menu loop
//! ├── render.rs        ◄─── All customer-facing wording
//! └── error.rs         ◄─── CliError
//! ```
//!
//! ## Startup
//! ```text
//! args ──► CliConfig::load ──► apply_args ──► load_catalog ──► CouponEngine
//!                                                                   │
//!                                      stdin/stdout ──► Menu::run ◄─┘
//! ```
//!
//! Logs go to stderr so they never interleave with the menu on stdout.

pub mod catalog_file;
pub mod config;
pub mod error;
pub mod menu;
pub mod render;

use std::io;

use coupon_core::CouponEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{CliArgs, CliConfig, USAGE};
pub use error::{CliError, CliResult};

use menu::Menu;
use render::Renderer;

/// Runs the console app with the process arguments.
pub fn run() -> CliResult<()> {
    let args = CliArgs::parse(std::env::args())?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();

    let mut config = CliConfig::load(args.config.clone())?;
    config.apply_args(&args);

    let catalog = catalog_file::load_catalog(config.catalog.path.as_deref())?;
    let today = config.today();
    info!(coupons = catalog.len(), %today, "Starting coupon helper");

    let mut engine = CouponEngine::new(catalog);
    let renderer = Renderer::new(config.display.currency_symbol.trim());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut engine, &renderer, today, stdin.lock(), stdout.lock()).run()?;

    info!(redeemed = engine.used_count(), "Session ended");
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,coupon_core=info,coupon_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
