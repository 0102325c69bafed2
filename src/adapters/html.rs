//! Thin document-tree layer over `scraper`.
//!
//! Lookups return `Option`/`Vec` for optional content; the `find_required`
//! variants turn "no match" into [`ScrapeError::TagNotFound`] so callers never
//! carry a missing element further down the extraction.

use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// A parsed HTML page.
///
/// Not `Send`: parse, extract owned values, and drop it before the next await.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn find(&self, selector: &str) -> Result<Option<Node<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).next().map(Node))
    }

    pub fn find_all(&self, selector: &str) -> Result<Vec<Node<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).map(Node).collect())
    }

    pub fn find_required(&self, selector: &str) -> Result<Node<'_>> {
        self.find(selector)?.ok_or_else(|| ScrapeError::TagNotFound {
            selector: selector.to_string(),
        })
    }
}

/// An element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// First descendant matching `selector`.
    pub fn find(&self, selector: &str) -> Result<Option<Node<'a>>> {
        let selector = parse_selector(selector)?;
        Ok(self.0.select(&selector).next().map(Node))
    }

    pub fn find_all(&self, selector: &str) -> Result<Vec<Node<'a>>> {
        let selector = parse_selector(selector)?;
        Ok(self.0.select(&selector).map(Node).collect())
    }

    pub fn find_required(&self, selector: &str) -> Result<Node<'a>> {
        self.find(selector)?.ok_or_else(|| ScrapeError::TagNotFound {
            selector: selector.to_string(),
        })
    }

    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Like `attr`, but a missing attribute is a `TagNotFound` for `tag[name]`.
    pub fn required_attr(&self, name: &str) -> Result<&'a str> {
        self.attr(name).ok_or_else(|| ScrapeError::TagNotFound {
            selector: format!("{}[{}]", self.name(), name),
        })
    }

    /// Concatenated text of all descendants, untrimmed.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    pub fn next_sibling_element(&self) -> Option<Node<'a>> {
        self.0.next_siblings().find_map(ElementRef::wrap).map(Node)
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Node").field(&self.name()).finish()
    }
}
