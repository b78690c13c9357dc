//! # CLI Error Type
//!
//! Everything that can stop the console app from starting or running.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  config file ── toml::de::Error ──────┐                                 │
//! │  catalog file ─ toml / serde_json ────┤                                 │
//! │  catalog entry ─ CoreError ───────────┼──► CliError ──► main exits      │
//! │  terminal ───── std::io::Error ───────┤        (non-zero, logged)       │
//! │  bad flag / env ─ InvalidConfig ──────┘                                 │
//! │                                                                         │
//! │  NOT here: a bad amount typed at the prompt. The menu reports it and   │
//! │  asks again.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use coupon_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A setting has an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An explicitly requested file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Catalog file extension is not `.toml` or `.json`.
    #[error("Unsupported catalog format '{}': use .toml or .json", .0.display())]
    UnsupportedCatalogFormat(PathBuf),

    /// The catalog parsed but an entry was rejected.
    #[error("Catalog rejected: {0}")]
    Catalog(#[from] CoreError),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
