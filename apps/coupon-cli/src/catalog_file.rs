//! # Catalog Files
//!
//! Reads coupon definitions from disk and hands them to [`Catalog::new`],
//! which does all the validation.
//!
//! ## Accepted Formats
//! ```text
//! offers.toml                      offers.json
//! ───────────                      ───────────
//! [[coupons]]                      [ { "code": "WELCOME10", ... } ]
//! code = "WELCOME10"                      or
//! discount_percent = 10            { "coupons": [ { ... } ] }
//! minimum_cart_cents = 5000
//! expiry_date = "2025-12-31"
//! ```

use std::path::Path;

use coupon_core::{Catalog, CouponDefinition};
use serde::Deserialize;
use tracing::info;

use crate::error::{CliError, CliResult};

/// The offers the app ships with.
const BUILTIN_CATALOG: &str = include_str!("../catalog.toml");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    coupons: Vec<CouponDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    List(Vec<CouponDefinition>),
    Document(CatalogDocument),
}

/// Loads the catalog at `path`, or the built-in one when `path` is `None`.
pub fn load_catalog(path: Option<&Path>) -> CliResult<Catalog> {
    let Some(path) = path else {
        let catalog = builtin_catalog()?;
        info!(coupons = catalog.len(), "Using built-in catalog");
        return Ok(catalog);
    };

    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let contents = std::fs::read_to_string(path)?;
    let catalog = match extension.as_deref() {
        Some("toml") => parse_toml(&contents)?,
        Some("json") => parse_json(&contents)?,
        _ => return Err(CliError::UnsupportedCatalogFormat(path.to_path_buf())),
    };

    info!(?path, coupons = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

pub fn builtin_catalog() -> CliResult<Catalog> {
    parse_toml(BUILTIN_CATALOG)
}

/// Parses a `[[coupons]]` TOML document.
pub fn parse_toml(contents: &str) -> CliResult<Catalog> {
    let document: CatalogDocument = toml::from_str(contents)?;
    Ok(Catalog::new(document.coupons)?)
}

/// Parses a JSON array of coupons, or an object with a `coupons` array.
pub fn parse_json(contents: &str) -> CliResult<Catalog> {
    let parsed: JsonCatalog = serde_json::from_str(contents)?;
    let coupons = match parsed {
        JsonCatalog::List(coupons) => coupons,
        JsonCatalog::Document(document) => document.coupons,
    };
    Ok(Catalog::new(coupons)?)
}
