//! Category extraction from the cocktail listing page.
//!
//! The listing is a sequence of section headings, each followed by one or more
//! bullet lists of cocktail links. Headings open a category; list items under
//! an open category contribute one cocktail each. Scanning stops for good at
//! the first back-matter heading ("See also", "References", ...).

use serde::Serialize;
use tracing::{debug, warn};

use crate::normalize::{clean_field, collapse_whitespace};
use crate::parse::{Document, Element};

/// Headings that mark the end of the cocktail sections.
pub const SKIP_SECTIONS: [&str; 8] = [
    "See also",
    "References",
    "External links",
    "Navigation menu",
    "Notes",
    "Further reading",
    "Bibliography",
    "Contents",
];

/// Content containers, in order of preference.
const CONTENT_SELECTORS: [&str; 2] = ["div.mw-parser-output", "div#mw-content-text"];

const EDIT_MARKER: &str = "[edit]";

/// A cocktail link found under a category heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CocktailLink {
    pub name: String,
    /// Absolute article URL.
    pub url: String,
}

/// A named category with its cocktails in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub cocktails: Vec<CocktailLink>,
}

/// One cocktail together with the category it was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub category: String,
    pub name: String,
    pub url: String,
}

impl Category {
    fn new(name: String) -> Self {
        Self { name, cocktails: Vec::new() }
    }

    /// Adds a link unless the same `(name, url)` pair is already present.
    fn push(&mut self, link: CocktailLink) -> bool {
        if self.cocktails.contains(&link) {
            return false;
        }
        self.cocktails.push(link);
        true
    }

    /// The category's cocktails as flat entries.
    pub fn entries(&self) -> impl Iterator<Item = CategoryEntry> + '_ {
        self.cocktails.iter().map(|link| CategoryEntry {
            category: self.name.clone(),
            name: link.name.clone(),
            url: link.url.clone(),
        })
    }
}

/// Total number of cocktails across all categories.
pub fn total_cocktails(categories: &[Category]) -> usize {
    categories.iter().map(|c| c.cocktails.len()).sum()
}

/// Whether an href points at a plain article: `/wiki/` prefix, no namespace
/// separator, not an edit action.
pub fn is_article_path(href: &str) -> bool {
    href.starts_with("/wiki/") && !href.contains(':') && !href.contains("action=edit")
}

fn content_root(doc: &Document) -> Option<Element<'_>> {
    CONTENT_SELECTORS
        .iter()
        .find_map(|selector| doc.select_first(selector).ok().flatten())
}

/// Resolves the display name of a section heading.
///
/// Priority:
/// 1. `span.mw-headline`
/// 2. any `span` carrying an `id`
/// 3. the heading's own text with the `[edit]` marker removed
fn heading_name(heading: &Element) -> Option<String> {
    let span_text = |selector: &str| {
        heading
            .select_first(selector)
            .ok()
            .flatten()
            .map(|span| clean_field(&span.text()))
            .filter(|text| !text.is_empty())
    };

    span_text("span.mw-headline")
        .or_else(|| span_text("span[id]"))
        .or_else(|| {
            let text = collapse_whitespace(&clean_field(&heading.text()).replace(EDIT_MARKER, ""));
            (!text.is_empty()).then_some(text)
        })
}

fn cocktail_link(item: &Element, origin: &str) -> Option<CocktailLink> {
    let link = item.select_first("a[href]").ok().flatten()?;
    let href = link.attr("href")?;

    if !is_article_path(href) {
        return None;
    }

    Some(CocktailLink { name: clean_field(&link.text()), url: format!("{}{}", origin.trim_end_matches('/'), href) })
}

/// Partitions the listing page's cocktail links into categories.
///
/// Categories keep the order of their first heading; a heading that repeats
/// an earlier name reopens that category. Categories left without cocktails
/// are dropped. When the page has no content container the result is empty
/// and a warning is logged.
pub fn extract_categories(doc: &Document, origin: &str) -> Vec<Category> {
    let Some(content) = content_root(doc) else {
        warn!("Could not find main content area");
        return Vec::new();
    };
    scan_content(&content, origin)
}

fn scan_content(content: &Element, origin: &str) -> Vec<Category> {
    let elements = match content.select("h2, h3, ul") {
        Ok(elements) => elements,
        Err(e) => {
            warn!(error = %e, "Could not scan content area");
            return Vec::new();
        }
    };

    let mut categories: Vec<Category> = Vec::new();
    let mut current: Option<usize> = None;

    for element in elements {
        match element.tag_name().as_str() {
            "h2" | "h3" => {
                let Some(name) = heading_name(&element) else {
                    continue;
                };

                if SKIP_SECTIONS.contains(&name.as_str()) {
                    debug!(section = %name, "Reached back matter, stopping");
                    break;
                }

                let index = match categories.iter().position(|c| c.name == name) {
                    Some(index) => index,
                    None => {
                        categories.push(Category::new(name));
                        categories.len() - 1
                    }
                };
                current = Some(index);
            }
            "ul" => {
                let Some(index) = current else {
                    continue;
                };
                for item in element.children_named("li") {
                    if let Some(link) = cocktail_link(&item, origin) {
                        categories[index].push(link);
                    }
                }
            }
            _ => {}
        }
    }

    categories.retain(|c| !c.cocktails.is_empty());
    categories
}
