//! The scrape pipeline: listing page, then one infobox page per cocktail.
//!
//! Everything runs sequentially. The listing pass completes before any
//! cocktail page is requested, and successive cocktail requests are separated
//! by [`COURTESY_DELAY`]. Failed requests are not retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use cocktails_core::{HttpFetcher, ScrapeConfig, scrape_catalog, write_csv_file};
//!
//! # #[tokio::main]
//! # async fn main() -> cocktails_core::Result<()> {
//! let config = ScrapeConfig::default();
//! let fetcher = HttpFetcher::new(&config.fetch)?;
//! let rows = scrape_catalog(&fetcher, &config).await?;
//! write_csv_file(&rows, "cocktails_categorized_detailed.csv")?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::categories::{Category, extract_categories, total_cocktails};
use crate::dataset::CocktailRow;
use crate::fetch::{Fetch, FetchConfig};
use crate::infobox::{InfoboxRecord, extract_infobox};
use crate::parse::Document;
use crate::{CocktailError, Result};

/// Pause before each cocktail page request.
pub const COURTESY_DELAY: Duration = Duration::from_millis(500);

/// Site and transport settings for a scrape run.
///
/// # Example
///
/// ```rust
/// use cocktails_core::ScrapeConfig;
///
/// let config = ScrapeConfig::builder().origin("https://en.m.wikipedia.org").timeout(20).build();
/// assert_eq!(config.listing_url(), "https://en.m.wikipedia.org/wiki/List_of_cocktails");
/// ```
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Scheme and host that article paths are resolved against (default: `https://en.wikipedia.org`).
    pub origin: String,

    /// Path of the listing page (default: `/wiki/List_of_cocktails`).
    pub listing_path: String,

    /// HTTP settings.
    pub fetch: FetchConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            origin: "https://en.wikipedia.org".to_string(),
            listing_path: "/wiki/List_of_cocktails".to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl ScrapeConfig {
    /// Creates a new builder for ScrapeConfig.
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::new()
    }

    /// Absolute URL of the listing page.
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.listing_path)
    }

    /// Checks that the origin is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let origin = Url::parse(&self.origin).map_err(|e| CocktailError::InvalidUrl(format!("{}: {e}", self.origin)))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(CocktailError::InvalidUrl(format!("{}: origin must be http or https", self.origin)));
        }
        if !self.listing_path.starts_with('/') {
            return Err(CocktailError::ConfigError(format!(
                "listing path must start with '/': {}",
                self.listing_path
            )));
        }
        Ok(())
    }
}

/// Builder for ScrapeConfig.
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    pub fn new() -> Self {
        Self { config: ScrapeConfig::default() }
    }

    /// Sets the site origin.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Sets the listing page path.
    pub fn listing_path(mut self, path: impl Into<String>) -> Self {
        self.config.listing_path = path.into();
        self
    }

    /// Sets the per-request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout = seconds;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ScrapeConfig {
        self.config
    }
}

impl Default for ScrapeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches the listing page and partitions it into categories.
///
/// # Errors
///
/// A failed listing fetch is fatal for the run and is returned as is.
pub async fn scrape_categories<F: Fetch>(fetcher: &F, config: &ScrapeConfig) -> Result<Vec<Category>> {
    let url = config.listing_url();
    info!(%url, "Fetching cocktail listing");

    let html = fetcher.fetch(&url).await?;
    let categories = extract_categories(&Document::parse(&html), &config.origin);

    info!(
        categories = categories.len(),
        cocktails = total_cocktails(&categories),
        "Listing scanned"
    );
    Ok(categories)
}

/// Fetches one cocktail page and extracts its infobox.
///
/// Waits [`COURTESY_DELAY`] first. Any fetch error is logged and reported as
/// an absent record.
pub async fn scrape_infobox<F: Fetch>(fetcher: &F, url: &str, config: &ScrapeConfig) -> Option<InfoboxRecord> {
    tokio::time::sleep(COURTESY_DELAY).await;

    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(url, error = %e, "Error scraping cocktail page");
            return None;
        }
    };

    let doc = match Url::parse(url) {
        Ok(parsed) => Document::parse_with_url(&html, parsed),
        Err(_) => Document::parse(&html),
    };
    extract_infobox(&doc, &config.origin)
}

/// Runs the full scrape and returns one row per cocktail in listing order.
///
/// Cocktails whose page failed, or has no infobox, still get a row with empty
/// infobox columns.
pub async fn scrape_catalog<F: Fetch>(fetcher: &F, config: &ScrapeConfig) -> Result<Vec<CocktailRow>> {
    let categories = scrape_categories(fetcher, config).await?;
    let total = total_cocktails(&categories);
    let mut rows = Vec::with_capacity(total);

    for category in &categories {
        info!("Category: {} ({} cocktails)", category.name, category.cocktails.len());

        for entry in category.entries() {
            info!("[{}/{}] {}", rows.len() + 1, total, entry.name);
            let record = scrape_infobox(fetcher, &entry.url, config).await;
            rows.push(CocktailRow::new(&entry, record.as_ref()));
        }
    }

    Ok(rows)
}
