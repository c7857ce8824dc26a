pub mod catalog;
pub mod categories;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod infobox;
pub mod normalize;
pub mod parse;
pub mod places;
pub mod popularity;
pub mod scrape;

pub use catalog::{Catalog, CategoryCount, CocktailCard, FilterMode, MIXER_CATEGORIES, NO_IMAGE_URL};
pub use categories::{
    Category, CategoryEntry, CocktailLink, SKIP_SECTIONS, extract_categories, total_cocktails,
};
pub use dataset::{COLUMNS, CocktailRow, DEFAULT_OUTPUT, read_csv, read_csv_file, write_csv, write_csv_file};
pub use error::{CocktailError, Result};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{Fetch, FetchConfig, fetch_file, fetch_stdin};
pub use infobox::{InfoboxField, InfoboxRecord, extract_infobox};
pub use normalize::{clean_field, normalize_text};
pub use parse::{Document, Element};
pub use places::{BarSearch, MapView, Place, PlacesConfig, map_view, search_bars};
pub use popularity::{DrinkTotal, PopularityRecord, read_popularity, read_popularity_file, top_drinks, year_bounds};
pub use scrape::{COURTESY_DELAY, ScrapeConfig, ScrapeConfigBuilder, scrape_catalog, scrape_categories, scrape_infobox};
