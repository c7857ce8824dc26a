//! Page fetching from URLs, files, and stdin.
//!
//! Network access goes through the [`Fetch`] trait so the scrape loop and the
//! bar search can run against a fake transport in tests. [`HttpFetcher`] is the
//! real implementation (feature `fetch`).

use std::fs;
use std::future::Future;
use std::path::PathBuf;

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
#[cfg(feature = "fetch")]
use url::Url;

use crate::{CocktailError, Result};

/// Descriptive client identifier sent with every request.
pub const DEFAULT_USER_AGENT: &str = "(Educational Cocktail Scraper v1.0)";

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header.
    pub user_agent: String,
    /// Accept header.
    pub accept: String,
    /// Accept-Language header.
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

/// Source of page bodies keyed by absolute URL.
pub trait Fetch {
    /// Fetches the body at `url` as text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// reqwest-backed [`Fetch`] implementation.
///
/// One client is built up front with the configured timeout and default
/// headers, then reused for every request. Failed requests are not retried.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: u64,
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    /// Builds a fetcher from a [`FetchConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CocktailError::ConfigError`] when a header value is not
    /// valid, or [`CocktailError::HttpError`] when the client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(CocktailError::HttpError)?;

        Ok(Self { client, timeout: config.timeout })
    }
}

#[cfg(feature = "fetch")]
fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| CocktailError::ConfigError(format!("Invalid header value {value:?}: {e}")))
}

#[cfg(feature = "fetch")]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| CocktailError::InvalidUrl(format!("{url}: {e}")))?;

        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(CocktailError::InvalidUrl(format!("{url}: scheme must be http or https")));
        }

        tracing::debug!(url, "GET");

        let response = self.client.get(parsed_url).send().await.map_err(|e| {
            if e.is_timeout() { CocktailError::Timeout { timeout: self.timeout } } else { CocktailError::HttpError(e) }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CocktailError::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        Ok(response.text().await?)
    }
}

/// Reads a page from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(CocktailError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(CocktailError::from)
    }
}

/// Reads a page from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(CocktailError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 10);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.accept.starts_with("text/html"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let result = tokio::runtime::Runtime::new().unwrap().block_on(fetcher.fetch("not-a-url"));

        assert!(matches!(result, Err(CocktailError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_rejects_non_http_scheme() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(fetcher.fetch("ftp://example.com/page"));

        assert!(matches!(result, Err(CocktailError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_invalid_header_is_config_error() {
        let config = FetchConfig { accept_language: "en\nUS".to_string(), ..Default::default() };
        assert!(matches!(HttpFetcher::new(&config), Err(CocktailError::ConfigError(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(CocktailError::FileNotFound(_))));
    }
}
