//! # CLI Configuration
//!
//! Settings for the console front end.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                               │
//! │     --catalog offers.toml   --today 2025-06-01                          │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     COUPON_CATALOG_PATH, COUPON_CURRENCY_SYMBOL, COUPON_TODAY           │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <PATH>, or the platform config dir:                        │
//! │     ~/.config/coupons/coupons.toml (Linux)                              │
//! │     ~/Library/Application Support/com.coupons.coupons/coupons.toml      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     built-in catalog, "$", wall-clock date                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! path = "/etc/shop/offers.toml"
//!
//! [display]
//! currency_symbol = "$"
//!
//! [clock]
//! today = "2025-06-01"   # pin the date for demos and tests
//! ```

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Environment variable naming the catalog file.
pub const ENV_CATALOG_PATH: &str = "COUPON_CATALOG_PATH";
/// Environment variable overriding the currency symbol.
pub const ENV_CURRENCY_SYMBOL: &str = "COUPON_CURRENCY_SYMBOL";
/// Environment variable pinning "today" (YYYY-MM-DD).
pub const ENV_TODAY: &str = "COUPON_TODAY";

// =============================================================================
// Sections
// =============================================================================

/// Where the coupon catalog comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// TOML or JSON catalog file. `None` uses the built-in starter catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// How amounts are shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Source of the date passed to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClockSettings {
    /// Fixed date. `None` means the local wall-clock date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

// =============================================================================
// CliConfig
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub clock: ClockSettings,
}

impl CliConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location just means "use defaults".
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(CliError::FileNotFound(path)),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: PathBuf) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `COUPON_*` environment variables.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are logged
    /// and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CATALOG_PATH) {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            self.display.currency_symbol = symbol;
        }

        if let Some(today) = lookup(ENV_TODAY) {
            match parse_date(&today) {
                Ok(date) => {
                    debug!(%date, "Pinning today from environment");
                    self.clock.today = Some(date);
                }
                Err(_) => warn!(value = %today, "Ignoring unparseable {}", ENV_TODAY),
            }
        }
    }

    /// Applies command-line flags, which win over everything else.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(path) = &args.catalog {
            self.catalog.path = Some(path.clone());
        }
        if let Some(today) = args.today {
            self.clock.today = Some(today);
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let symbol = self.display.currency_symbol.trim();
        if symbol.is_empty() {
            return Err(CliError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }
        if symbol.chars().count() > 4 {
            return Err(CliError::InvalidConfig(format!(
                "currency_symbol must be at most 4 characters, got '{}'",
                symbol
            )));
        }

        Ok(())
    }

    /// The date handed to the engine: the pinned date, or the local date.
    pub fn today(&self) -> NaiveDate {
        self.clock
            .today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "coupons", "coupons")
            .map(|dirs| dirs.config_dir().join("coupons.toml"))
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CliError::InvalidConfig(format!("'{}' is not a date (expected YYYY-MM-DD)", input))
    })
}

// =============================================================================
// Command-Line Arguments
// =============================================================================

pub const USAGE: &str = "\
Coupon Validator

Usage: coupons [OPTIONS]

Options:
  -c, --config <PATH>     Config file (default: platform config dir)
      --catalog <PATH>    Catalog file, .toml or .json (default: built-in offers)
      --today <DATE>      Pretend today is DATE (YYYY-MM-DD)
  -h, --help              Show this help message";

/// Parsed command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub help: bool,
}

impl CliArgs {
    /// Parses flags, skipping the program name.
    pub fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter().skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => parsed.config = Some(PathBuf::from(value_for(&arg, args.next())?)),
                "--catalog" => parsed.catalog = Some(PathBuf::from(value_for(&arg, args.next())?)),
                "--today" => parsed.today = Some(parse_date(&value_for(&arg, args.next())?)?),
                "--help" | "-h" => parsed.help = true,
                other => {
                    return Err(CliError::InvalidConfig(format!(
                        "unknown argument '{}'",
                        other
                    )))
                }
            }
        }

        Ok(parsed)
    }
}

fn value_for(flag: &str, value: Option<String>) -> CliResult<String> {
    value.ok_or_else(|| CliError::InvalidConfig(format!("{} requires a value", flag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> CliResult<CliArgs> {
        CliArgs::parse(
            std::iter::once("coupons")
                .chain(list.iter().copied())
                .map(String::from),
        )
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.catalog.path.is_none());
        assert_eq!(config.display.currency_symbol, "$");
        assert!(config.clock.today.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_sections_are_optional() {
        let config: CliConfig = toml::from_str("[display]\ncurrency_symbol = \"€\"\n").unwrap();
        assert_eq!(config.display.currency_symbol, "€");
        assert!(config.catalog.path.is_none());

        let config: CliConfig = toml::from_str(
            "[catalog]\npath = \"offers.json\"\n\n[clock]\ntoday = \"2025-06-01\"\n",
        )
        .unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("offers.json")));
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_CATALOG_PATH, "/tmp/offers.toml"),
            (ENV_CURRENCY_SYMBOL, "£"),
            (ENV_TODAY, "2026-01-01"),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/offers.toml")));
        assert_eq!(config.display.currency_symbol, "£");
        assert_eq!(config.clock.today, NaiveDate::from_ymd_opt(2026, 1, 1));
    }

    #[test]
    fn test_bad_today_override_is_ignored() {
        let mut config = CliConfig::default();
        config.apply_overrides_from(|key| (key == ENV_TODAY).then(|| "tomorrow".to_string()));
        assert!(config.clock.today.is_none());
    }

    #[test]
    fn test_validate_currency_symbol() {
        let mut config = CliConfig::default();
        config.display.currency_symbol = "  ".to_string();
        assert!(config.validate().is_err());

        config.display.currency_symbol = "EURO$".to_string();
        assert!(config.validate().is_err());

        config.display.currency_symbol = "CHF".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = CliConfig::load(Some(PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--catalog", "offers.toml", "--today", "2025-06-01", "-c", "cfg.toml"]).unwrap();
        assert_eq!(parsed.catalog, Some(PathBuf::from("offers.toml")));
        assert_eq!(parsed.config, Some(PathBuf::from("cfg.toml")));
        assert_eq!(parsed.today, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert!(!parsed.help);

        assert!(args(&["-h"]).unwrap().help);
        assert_eq!(args(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--catalog"]).is_err());
        assert!(args(&["--today", "06/01/2025"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = CliConfig::default();
        config.catalog.path = Some(PathBuf::from("from-file.toml"));

        let parsed = args(&["--catalog", "from-flag.json", "--today", "2030-02-03"]).unwrap();
        config.apply_args(&parsed);

        assert_eq!(config.catalog.path, Some(PathBuf::from("from-flag.json")));
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2030, 2, 3).unwrap());
    }
}
