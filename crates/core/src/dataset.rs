//! The flat cocktail table and its CSV encoding.
//!
//! One [`CocktailRow`] per cocktail, columns in a fixed order. Absent infobox
//! fields are written as empty strings, never omitted.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::categories::CategoryEntry;
use crate::infobox::InfoboxRecord;
use crate::{CocktailError, Result};

/// Output column order.
pub const COLUMNS: [&str; 11] = [
    "category",
    "name",
    "url",
    "Image URL",
    "Type",
    "Base spirit",
    "Ingredients",
    "Preparation",
    "Served",
    "Standard drinkware",
    "Standard garnish",
];

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "cocktails_categorized_detailed.csv";

/// A category entry joined with its infobox fields.
///
/// Field order matches [`COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CocktailRow {
    pub category: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "Image URL")]
    pub image_url: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Base spirit")]
    pub base_spirit: String,
    #[serde(rename = "Ingredients")]
    pub ingredients: String,
    #[serde(rename = "Preparation")]
    pub preparation: String,
    #[serde(rename = "Served")]
    pub served: String,
    #[serde(rename = "Standard drinkware")]
    pub standard_drinkware: String,
    #[serde(rename = "Standard garnish")]
    pub standard_garnish: String,
}

impl CocktailRow {
    /// Joins an entry with its infobox record; `None` leaves every infobox
    /// column empty.
    pub fn new(entry: &CategoryEntry, record: Option<&InfoboxRecord>) -> Self {
        let mut row = Self {
            category: entry.category.clone(),
            name: entry.name.clone(),
            url: entry.url.clone(),
            ..Default::default()
        };

        if let Some(record) = record {
            let text = |value: &Option<String>| value.clone().unwrap_or_default();
            row.image_url = record.image_url.clone();
            row.kind = text(&record.kind);
            row.base_spirit = text(&record.base_spirit);
            row.ingredients = text(&record.ingredients);
            row.preparation = text(&record.preparation);
            row.served = text(&record.served);
            row.standard_drinkware = text(&record.standard_drinkware);
            row.standard_garnish = text(&record.standard_garnish);
        }

        row
    }
}

/// Writes the header and all rows as CSV.
///
/// The header is written even when `rows` is empty.
pub fn write_csv<W: Write>(rows: &[CocktailRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes the table to `path`, replacing any existing file.
pub fn write_csv_file(rows: &[CocktailRow], path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv(rows, file)
}

/// Reads a cocktail table. Missing columns and empty cells become empty strings.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CocktailRow>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader)
        .deserialize()
        .map(|row| row.map_err(CocktailError::from))
        .collect()
}

/// Reads a cocktail table from `path`.
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<CocktailRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CocktailError::FileNotFound(path.to_path_buf()));
    }
    read_csv(File::open(path)?)
}
