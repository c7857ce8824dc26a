//! Browsing queries over a loaded cocktail table.
//!
//! Categories split into two families: mixer categories (juices, sodas, tonic)
//! and everything else, which is treated as an alcohol base.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::Result;
use crate::dataset::{CocktailRow, read_csv_file};

/// Categories named after a mixer rather than a spirit.
pub const MIXER_CATEGORIES: [&str; 10] = [
    "Carrot juice",
    "Pineapple juice",
    "Lemonade",
    "Lemon-lime soda",
    "Apple juice",
    "Grape juice",
    "Orange juice",
    "Ginger soda",
    "Cola",
    "Tonic",
];

/// Shown on a card when the row has no image.
pub const NO_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/a/ac/No_image_available.svg";

const MISSING: &str = "N/A";

/// Which family of categories to browse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FilterMode {
    #[default]
    AlcoholBase,
    Mixer,
}

impl FilterMode {
    /// Whether `category` belongs to this family.
    pub fn includes(self, category: &str) -> bool {
        let is_mixer = MIXER_CATEGORIES.contains(&category);
        match self {
            FilterMode::AlcoholBase => !is_mixer,
            FilterMode::Mixer => is_mixer,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::AlcoholBase => write!(f, "Alcohol Base"),
            FilterMode::Mixer => write!(f, "Mixer"),
        }
    }
}

/// All rows of a cocktail table, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rows: Vec<CocktailRow>,
}

/// Number of cocktails listed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl Catalog {
    pub fn new(rows: Vec<CocktailRow>) -> Self {
        Self { rows }
    }

    /// Loads a catalog from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(read_csv_file(path)?))
    }

    pub fn rows(&self) -> &[CocktailRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn rows_in(&self, mode: FilterMode) -> impl Iterator<Item = &CocktailRow> {
        self.rows.iter().filter(move |row| mode.includes(&row.category))
    }

    /// Distinct category names for `mode`, in first-seen order.
    pub fn categories(&self, mode: FilterMode) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in self.rows_in(mode) {
            if !seen.contains(&row.category.as_str()) {
                seen.push(row.category.as_str());
            }
        }
        seen
    }

    /// Distinct cocktail names listed under `category`, in first-seen order.
    pub fn cocktails(&self, mode: FilterMode, category: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in self.rows_in(mode).filter(|row| row.category == category) {
            if !seen.contains(&row.name.as_str()) {
                seen.push(row.name.as_str());
            }
        }
        seen
    }

    /// First row matching the category and cocktail name.
    pub fn find(&self, mode: FilterMode, category: &str, name: &str) -> Option<&CocktailRow> {
        self.rows_in(mode)
            .find(|row| row.category == category && row.name == name)
    }

    /// Resolves a selection the way a pair of select boxes would: a missing
    /// category defaults to the first one for `mode`, a missing name to the
    /// first cocktail of that category.
    pub fn select(&self, mode: FilterMode, category: Option<&str>, name: Option<&str>) -> Option<&CocktailRow> {
        let category = match category {
            Some(category) => category,
            None => self.categories(mode).first().copied()?,
        };
        let name = match name {
            Some(name) => name,
            None => self.cocktails(mode, category).first().copied()?,
        };
        self.find(mode, category, name)
    }

    /// Cocktails per alcohol-base category, largest first. Ties keep
    /// first-seen order.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for row in self.rows_in(FilterMode::AlcoholBase) {
            match counts.iter_mut().find(|c| c.category == row.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount { category: row.category.clone(), count: 1 }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}

/// Display form of a single cocktail row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CocktailCard<'a> {
    pub name: &'a str,
    pub image_url: &'a str,
    pub recipe_url: &'a str,
    /// Labelled detail lines, `N/A` for empty values.
    pub details: Vec<(&'static str, &'a str)>,
}

impl<'a> CocktailCard<'a> {
    pub fn new(row: &'a CocktailRow) -> Self {
        let or_missing = |value: &'a str| if value.trim().is_empty() { MISSING } else { value };
        let image_url = if row.image_url.trim().is_empty() { NO_IMAGE_URL } else { row.image_url.as_str() };

        Self {
            name: &row.name,
            image_url,
            recipe_url: &row.url,
            details: vec![
                ("Type", or_missing(row.kind.as_str())),
                ("Base spirit", or_missing(row.base_spirit.as_str())),
                ("Ingredients", or_missing(row.ingredients.as_str())),
                ("Preparation", or_missing(row.preparation.as_str())),
                ("Served", or_missing(row.served.as_str())),
                ("Glassware", or_missing(row.standard_drinkware.as_str())),
                ("Garnish", or_missing(row.standard_garnish.as_str())),
            ],
        }
    }
}

impl fmt::Display for CocktailCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Image: {}", self.image_url)?;
        writeln!(f, "Recipe: {}", self.recipe_url)?;
        for (label, value) in &self.details {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}
