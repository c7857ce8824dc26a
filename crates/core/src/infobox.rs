//! Infobox field extraction for a single cocktail article.
//!
//! The infobox is the summary table on the right of a cocktail article. Each
//! row pairs a header cell with a data cell; rows whose header maps to one of
//! the known fields are kept, first occurrence wins.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::Result;
use crate::normalize::{clean_field, normalize_text};
use crate::parse::{Document, Element};

/// Infobox tables, in order of preference.
const INFOBOX_SELECTORS: [&str; 2] = ["table.infobox.hrecipe.hproduct", "table.infobox"];

/// The fields kept from an infobox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InfoboxField {
    BaseSpirit,
    Ingredients,
    Preparation,
    Served,
    StandardDrinkware,
    StandardGarnish,
    Type,
    ImageUrl,
}

impl InfoboxField {
    /// Maps a lowercased row header to its field.
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "base spirit" | "primary alcohol" | "primary alcohol by volume" => Some(InfoboxField::BaseSpirit),
            "ingredients" => Some(InfoboxField::Ingredients),
            "preparation" => Some(InfoboxField::Preparation),
            "served" => Some(InfoboxField::Served),
            "standard drinkware" | "drinkware" => Some(InfoboxField::StandardDrinkware),
            "standard garnish" | "garnish" => Some(InfoboxField::StandardGarnish),
            "type" => Some(InfoboxField::Type),
            _ => None,
        }
    }
}

/// Fields extracted from one infobox.
///
/// `image_url` is empty when the infobox has no image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InfoboxRecord {
    #[serde(rename = "Base spirit")]
    pub base_spirit: Option<String>,
    #[serde(rename = "Ingredients")]
    pub ingredients: Option<String>,
    #[serde(rename = "Preparation")]
    pub preparation: Option<String>,
    #[serde(rename = "Served")]
    pub served: Option<String>,
    #[serde(rename = "Standard drinkware")]
    pub standard_drinkware: Option<String>,
    #[serde(rename = "Standard garnish")]
    pub standard_garnish: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "Image URL")]
    pub image_url: String,
}

impl InfoboxRecord {
    /// Gets a field's value, `None` when absent or empty.
    pub fn get(&self, field: InfoboxField) -> Option<&str> {
        let value = match field {
            InfoboxField::BaseSpirit => self.base_spirit.as_deref(),
            InfoboxField::Ingredients => self.ingredients.as_deref(),
            InfoboxField::Preparation => self.preparation.as_deref(),
            InfoboxField::Served => self.served.as_deref(),
            InfoboxField::StandardDrinkware => self.standard_drinkware.as_deref(),
            InfoboxField::StandardGarnish => self.standard_garnish.as_deref(),
            InfoboxField::Type => self.kind.as_deref(),
            InfoboxField::ImageUrl => Some(self.image_url.as_str()),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Stores `value` unless the field already has one.
    ///
    /// Returns whether the value was stored.
    pub fn insert_first(&mut self, field: InfoboxField, value: String) -> bool {
        let slot = match field {
            InfoboxField::BaseSpirit => &mut self.base_spirit,
            InfoboxField::Ingredients => &mut self.ingredients,
            InfoboxField::Preparation => &mut self.preparation,
            InfoboxField::Served => &mut self.served,
            InfoboxField::StandardDrinkware => &mut self.standard_drinkware,
            InfoboxField::StandardGarnish => &mut self.standard_garnish,
            InfoboxField::Type => &mut self.kind,
            InfoboxField::ImageUrl => {
                if self.image_url.is_empty() {
                    self.image_url = value;
                    return true;
                }
                return false;
            }
        };

        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }
}

/// Resolves an image `src` against the site origin.
///
/// Protocol-relative sources get `https:`, site-relative ones get the origin,
/// anything else is returned unchanged.
pub fn resolve_url(src: &str, origin: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), src)
    } else {
        src.to_string()
    }
}

/// Summarizes an Ingredients cell as one string.
///
/// Bullet items are normalized one by one and deduplicated case-insensitively,
/// keeping first-seen order and casing, then joined with a space. The joined
/// value is normalized once more so a word repeated across an item boundary
/// is dropped too. A cell without bullets is normalized as a single blob.
pub fn ingredients_value(cell: &Element) -> Result<String> {
    let items = cell.select("li")?;

    if items.is_empty() {
        return Ok(normalize_text(&cell.text()));
    }

    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for item in items {
        let text = normalize_text(&item.inline_fragments().join(" "));
        if !text.is_empty() && seen.insert(text.to_lowercase()) {
            kept.push(text);
        }
    }

    Ok(normalize_text(&kept.join(" ")))
}

fn extract_row(row: &Element) -> Result<Option<(InfoboxField, String)>> {
    let (Some(header), Some(data)) = (row.select_first("th")?, row.select_first("td")?) else {
        return Ok(None);
    };

    let key = clean_field(&header.text()).to_lowercase();
    let Some(field) = InfoboxField::from_header(&key) else {
        return Ok(None);
    };

    let value = match field {
        InfoboxField::Ingredients => ingredients_value(&data)?,
        _ => clean_field(&data.text()),
    };

    Ok(Some((field, value)))
}

fn find_infobox(doc: &Document) -> Option<Element<'_>> {
    INFOBOX_SELECTORS
        .iter()
        .find_map(|selector| doc.select_first(selector).ok().flatten())
}

fn image_src(table: &Element) -> Result<Option<String>> {
    Ok(table
        .select_first("td.infobox-image img[src]")?
        .and_then(|img| img.attr("src").map(str::to_string)))
}

/// Extracts the known infobox fields from a cocktail article.
///
/// Returns `None` only when the page has no infobox table. A row that fails
/// to extract is logged and skipped; the remaining rows are still read.
pub fn extract_infobox(doc: &Document, origin: &str) -> Option<InfoboxRecord> {
    let table = find_infobox(doc)?;
    let page = doc.source_url().map(|u| u.as_str()).unwrap_or("<unknown>");
    let mut record = InfoboxRecord::default();

    let rows = table.select("tr").unwrap_or_else(|e| {
        warn!(page, error = %e, "Could not list infobox rows");
        Vec::new()
    });

    for (index, row) in rows.iter().enumerate() {
        match extract_row(row) {
            Ok(Some((field, value))) => {
                record.insert_first(field, value);
            }
            Ok(None) => {}
            Err(e) => warn!(page, row = index, error = %e, "Could not process infobox field"),
        }
    }

    match image_src(&table) {
        Ok(Some(src)) => {
            record.insert_first(InfoboxField::ImageUrl, resolve_url(&src, origin));
        }
        Ok(None) => {}
        Err(e) => warn!(page, error = %e, "Could not read infobox image"),
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://en.wikipedia.org";

    fn article(table: &str) -> Document {
        Document::parse(&format!("<html><body><p>Intro</p>{table}</body></html>"))
    }

    #[test]
    fn test_from_header_synonyms() {
        assert_eq!(InfoboxField::from_header("primary alcohol by volume"), Some(InfoboxField::BaseSpirit));
        assert_eq!(InfoboxField::from_header("drinkware"), Some(InfoboxField::StandardDrinkware));
        assert_eq!(InfoboxField::from_header("garnish"), Some(InfoboxField::StandardGarnish));
        assert_eq!(InfoboxField::from_header("commonly used ingredients"), None);
        assert_eq!(InfoboxField::from_header("Type"), None);
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url("//upload.wikimedia.org/a.jpg", ORIGIN),
            "https://upload.wikimedia.org/a.jpg"
        );
        assert_eq!(resolve_url("/static/a.png", ORIGIN), "https://en.wikipedia.org/static/a.png");
        assert_eq!(resolve_url("https://cdn.example/a.png", ORIGIN), "https://cdn.example/a.png");
    }

    #[test]
    fn test_no_table_is_none() {
        let doc = article("<table class=\"wikitable\"><tr><th>Type</th><td>Cocktail</td></tr></table>");
        assert_eq!(extract_infobox(&doc, ORIGIN), None);
    }

    #[test]
    fn test_empty_table_is_record() {
        let doc = article("<table class=\"infobox\"></table>");
        assert_eq!(extract_infobox(&doc, ORIGIN), Some(InfoboxRecord::default()));
    }

    #[test]
    fn test_prefers_recipe_infobox() {
        let doc = article(
            r#"<table class="infobox"><tr><th>Type</th><td>Wrong</td></tr></table>
               <table class="infobox hrecipe hproduct"><tr><th>Type</th><td>Cocktail</td></tr></table>"#,
        );
        let record = extract_infobox(&doc, ORIGIN).unwrap();
        assert_eq!(record.kind.as_deref(), Some("Cocktail"));
    }

    #[test]
    fn test_first_synonym_wins() {
        let doc = article(
            r#"<table class="infobox">
                <tr><th>Drinkware</th><td>Old Fashioned glass</td></tr>
                <tr><th>Standard drinkware</th><td>Cocktail glass</td></tr>
            </table>"#,
        );
        let record = extract_infobox(&doc, ORIGIN).unwrap();
        assert_eq!(record.get(InfoboxField::StandardDrinkware), Some("Old Fashioned glass"));
    }

    #[test]
    fn test_plain_fields_are_whitespace_cleaned() {
        let doc = article(
            "<table class=\"infobox\"><tr><th>Served</th><td>\n  On the\u{a0}rocks:\n poured over ice</td></tr></table>",
        );
        let record = extract_infobox(&doc, ORIGIN).unwrap();
        assert_eq!(record.served.as_deref(), Some("On the rocks: poured over ice"));
    }

    #[test]
    fn test_ingredient_list_dedup() {
        let doc = article(
            r#"<table class="infobox"><tr><th>Ingredients</th><td><ul>
                <li>Gin</li><li>gin</li><li>Tonic water</li>
            </ul></td></tr></table>"#,
        );
        let record = extract_infobox(&doc, ORIGIN).unwrap();
        assert_eq!(record.ingredients.as_deref(), Some("Gin Tonic water"));
    }

    #[test]
    fn test_ingredient_items_with_links() {
        let doc = article(
            r#"<table class="infobox"><tr><th>Ingredients</th><td><ul>
                <li>3&nbsp;cl <a href="/wiki/Gin">gin</a></li>
                <li>3 cl <a href="/wiki/Campari">Campari</a></li>
                <li>1 OZ <a href="/wiki/Vermouth">sweet red vermouth</a></li>
            </ul></td></tr></table>"#,
        );
        let record = extract_infobox(&doc, ORIGIN).unwrap();
        assert_eq!(
            record.ingredients.as_deref(),
            Some("3 cL gin 3 cL Campari 1 oz sweet red vermouth")
        );
    }

    #[test]
    fn test_ingredient_items_drop_repeats_across_items() {
        let doc = article(
            r#"<table class="infobox"><tr><th>Ingredients</th><td><ul>
                <li>2 cl <a href="/wiki/Lime">lime</a></li>
                <li>Lime juice</li>
                <li>Soda water</li>
                <li>Water</li>
            </ul></td></tr></table>"#,
        );
        let ingredients = extract_infobox(&doc, ORIGIN).unwrap().ingredients.unwrap();
        assert_eq!(ingredients, "2 cL lime juice Soda water");

        let words: Vec<String> = ingredients.split_whitespace().map(str::to_lowercase).collect();
        assert!(words.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn test_ingredient_prose_fallback() {
        let doc = article(
            r#"<table class="infobox"><tr><th>Ingredients</th><td>6 ml <a href="/wiki/Gin">Gin</a> and 1 cl vermouth</td></tr></table>"#,
        );
        let record = extract_infobox(&doc, ORIGIN).unwrap();
        assert_eq!(record.ingredients.as_deref(), Some("6 mL Gin and 1 cL vermouth"));
    }

    #[test]
    fn test_image_url_resolution() {
        let doc = article(
            r#"<table class="infobox hrecipe hproduct">
                <tr><td class="infobox-image" colspan="2"><img src="//upload.wikimedia.org/negroni.jpg"></td></tr>
                <tr><th>Type</th><td>Cocktail</td></tr>
            </table>"#,
        );
        let record = extract_infobox(&doc, ORIGIN).unwrap();
        assert_eq!(record.image_url, "https://upload.wikimedia.org/negroni.jpg");
        assert_eq!(record.get(InfoboxField::ImageUrl), Some("https://upload.wikimedia.org/negroni.jpg"));
    }

    #[test]
    fn test_insert_first() {
        let mut record = InfoboxRecord::default();
        assert!(record.insert_first(InfoboxField::Type, "Cocktail".into()));
        assert!(!record.insert_first(InfoboxField::Type, "Mixed drink".into()));
        assert_eq!(record.get(InfoboxField::Type), Some("Cocktail"));
        assert_eq!(record.get(InfoboxField::Served), None);

        assert!(record.insert_first(InfoboxField::ImageUrl, "https://upload.wikimedia.org/a.jpg".into()));
        assert!(!record.insert_first(InfoboxField::ImageUrl, "https://upload.wikimedia.org/b.jpg".into()));
        assert_eq!(record.image_url, "https://upload.wikimedia.org/a.jpg");
    }
}
