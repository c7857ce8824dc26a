//! Bar lookup through a places text-search endpoint.
//!
//! One request per search. The ranked views (top 5, top 10) and the map
//! centre are all derived from that single result set.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::fetch::Fetch;
use crate::{CocktailError, Result};

/// Default text-search endpoint.
pub const DEFAULT_PLACES_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

/// Zoom level used for the map view.
pub const MAP_ZOOM: u8 = 11;

/// Settings for the places search.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub endpoint: String,
    /// Results kept from a response (default: 20).
    pub max_results: usize,
}

impl PlacesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), endpoint: DEFAULT_PLACES_ENDPOINT.to_string(), max_results: 20 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Place {
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.map(|g| g.location)
    }
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<Place>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Results of one bar search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarSearch {
    pub places: Vec<Place>,
}

/// Larger values first, missing values after every present one.
fn descending<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl BarSearch {
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// The `n` best places by rating, then by number of ratings.
    pub fn top(&self, n: usize) -> Vec<&Place> {
        let mut ranked: Vec<&Place> = self.places.iter().collect();
        ranked.sort_by(|a, b| {
            descending(a.rating, b.rating).then_with(|| descending(a.user_ratings_total, b.user_ratings_total))
        });
        ranked.truncate(n);
        ranked
    }
}

/// A marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Map centre and markers for a set of places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub points: Vec<MapPoint>,
}

/// Centres a map on the mean position of the places that have coordinates.
///
/// Returns `None` when no place has a location.
pub fn map_view<'a>(places: impl IntoIterator<Item = &'a Place>) -> Option<MapView> {
    let points: Vec<MapPoint> = places
        .into_iter()
        .filter_map(|place| {
            place
                .location()
                .map(|loc| MapPoint { name: place.name.clone(), lat: loc.lat, lng: loc.lng })
        })
        .collect();

    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let center = LatLng {
        lat: points.iter().map(|p| p.lat).sum::<f64>() / count,
        lng: points.iter().map(|p| p.lng).sum::<f64>() / count,
    };
    Some(MapView { center, zoom: MAP_ZOOM, points })
}

/// Builds the request URL for a search.
pub fn search_url(cocktail: &str, city: &str, config: &PlacesConfig) -> Result<Url> {
    let query = format!("{cocktail} cocktail bar in {city}");
    Url::parse_with_params(&config.endpoint, [("query", query.as_str()), ("key", config.api_key.as_str())])
        .map_err(|e| CocktailError::InvalidUrl(format!("{}: {e}", config.endpoint)))
}

/// Searches for bars serving `cocktail` in `city`.
///
/// # Errors
///
/// Returns [`CocktailError::ConfigError`] without an API key,
/// [`CocktailError::JsonError`] for an unreadable body and
/// [`CocktailError::PlacesApi`] when the service reports a failure status.
pub async fn search_bars<F: Fetch>(fetcher: &F, cocktail: &str, city: &str, config: &PlacesConfig) -> Result<BarSearch> {
    if config.api_key.trim().is_empty() {
        return Err(CocktailError::ConfigError("places API key is not set".to_string()));
    }

    let url = search_url(cocktail, city, config)?;
    debug!(cocktail, city, "Searching places");

    let body = fetcher.fetch(url.as_str()).await?;
    let response: TextSearchResponse = serde_json::from_str(&body)?;

    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        _ => {
            return Err(CocktailError::PlacesApi { status: response.status, message: response.error_message });
        }
    }

    let mut places = response.results;
    places.truncate(config.max_results);
    debug!(results = places.len(), "Places search complete");
    Ok(BarSearch { places })
}
