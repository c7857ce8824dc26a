//! Error types for cocktail scraping and dataset operations.
//!
//! This module defines the main error type [`CocktailError`] which represents
//! everything that can go wrong while fetching pages, extracting fields,
//! reading or writing the dataset, and querying the places endpoint.
//!
//! Most extraction problems are not errors at all: a missing content
//! container or infobox degrades to an empty result. Only failures the caller
//! has to act on surface here.
//!
//! # Example
//!
//! ```rust
//! use cocktails_core::{CocktailError, Result};
//!
//! fn require_key(api_key: &str) -> Result<()> {
//!     if api_key.is_empty() {
//!         return Err(CocktailError::ConfigError("places API key is not set".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the cocktail scraper.
#[derive(Error, Debug)]
pub enum CocktailError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues,
    /// and other transport-level problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status code.
    #[error("GET {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File and stdin I/O errors.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV encoding or decoding errors.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON decoding errors (places endpoint responses).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid or missing configuration, such as an absent API key.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The places endpoint answered with an error status.
    #[error("Places API returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    PlacesApi { status: String, message: Option<String> },
}

/// Result type alias for CocktailError.
pub type Result<T> = std::result::Result<T, CocktailError>;
