//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! category and infobox extractors. Both wrap `scraper` types and expose the
//! handful of queries the extractors need.
//!
//! # Example
//!
//! ```rust
//! use cocktails_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h2>Gin</h2>
//!             <ul><li><a href="/wiki/Negroni">Negroni</a></li></ul>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let links = doc.select("ul a").unwrap();
//! assert_eq!(links[0].text(), "Negroni");
//! ```

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::{CocktailError, Result};

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| CocktailError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
    source_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient and never fails: malformed markup is repaired the
    /// way a browser would repair it.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html), source_url: None }
    }

    /// Parses HTML and remembers the URL it was fetched from.
    pub fn parse_with_url(html: &str, source_url: Url) -> Self {
        Self { html: Html::parse_document(html), source_url: Some(source_url) }
    }

    /// Gets the URL this document was fetched from, if known.
    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`CocktailError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element,
    /// with entities already decoded.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`CocktailError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first descendant matching a CSS selector.
    pub fn select_first(&self, selector: &str) -> Result<Option<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Direct child elements with the given tag name.
    pub fn children_named(&self, tag: &str) -> Vec<Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name().eq_ignore_ascii_case(tag))
            .map(|element| Element { element })
            .collect()
    }

    /// Collects trimmed, non-empty text pieces in document order.
    ///
    /// Text nodes contribute their own text. An `<a>` element contributes its
    /// whole visible text as one piece and is not descended into.
    pub fn inline_fragments(&self) -> Vec<String> {
        let mut fragments = Vec::new();
        collect_fragments(self.element, &mut fragments);
        fragments
    }
}

fn push_trimmed(fragments: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        fragments.push(text.to_string());
    }
}

fn collect_fragments(element: ElementRef<'_>, fragments: &mut Vec<String>) {
    for child in element.children() {
        if let Node::Text(text) = child.value() {
            push_trimmed(fragments, text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if child.value().name() == "a" {
                push_trimmed(fragments, &child.text().collect::<String>());
            } else {
                collect_fragments(child, fragments);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Negroni - Wikipedia</title>
        </head>
        <body>
            <table class="infobox hrecipe">
                <tr><th>Served</th><td>On the rocks</td></tr>
            </table>
            <ul id="list">
                <li>3 cl <a href="/wiki/Gin">Gin</a></li>
                <li>3 cl <a href="/wiki/Campari">Campari</a><ul><li>nested</li></ul></li>
            </ul>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML);
        let title = doc.select_first("title").unwrap().unwrap();
        assert_eq!(title.text(), "Negroni - Wikipedia");
        assert!(doc.source_url().is_none());
    }

    #[test]
    fn test_parse_with_url() {
        let url = Url::parse("https://en.wikipedia.org/wiki/Negroni").unwrap();
        let doc = Document::parse_with_url(SAMPLE_HTML, url.clone());
        assert_eq!(doc.source_url(), Some(&url));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let cells = doc.select("td").unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].text(), "On the rocks");
    }

    #[test]
    fn test_children_named_is_direct_only() {
        let doc = Document::parse(SAMPLE_HTML);
        let list = doc.select_first("ul#list").unwrap().unwrap();
        assert_eq!(list.children_named("li").len(), 2);
        assert_eq!(list.select("li").unwrap().len(), 3);
    }

    #[test]
    fn test_inline_fragments_take_link_text_once() {
        let doc = Document::parse(SAMPLE_HTML);
        let first = doc.select_first("ul#list > li").unwrap().unwrap();
        assert_eq!(first.inline_fragments(), vec!["3 cl", "Gin"]);
    }

    #[test]
    fn test_inline_fragments_descend_into_other_elements() {
        let doc = Document::parse(r#"<ul><li><b>Lime</b> <a href="/wiki/Lime">Lime juice</a><style>.x{}</style></li></ul>"#);
        let item = doc.select_first("li").unwrap().unwrap();
        assert_eq!(item.inline_fragments(), vec!["Lime", "Lime juice", ".x{}"]);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");
        assert!(matches!(result, Err(CocktailError::HtmlParseError(_))));
    }
}
