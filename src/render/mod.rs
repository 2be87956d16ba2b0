//! Renderer for downloaded books
//!
//! Turns cleaned plain text into a standalone HTML page:
//! - Title and author come from the header of the raw download
//! - The slug derived from the title names the output file
//! - `CHAPTER`/`BOOK`/`PART` lines become anchors listed in a sidebar

mod headings;
mod metadata;
mod page;

pub use headings::{anchor_headings, find_headings, Heading};
pub use metadata::{extract_metadata, slugify, BookMetadata, DEFAULT_AUTHOR, DEFAULT_TITLE};
pub use page::format_page;

use crate::config::SiteConfig;

/// A book ready to be written to `<slug>.html`
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub slug: String,
    pub metadata: BookMetadata,
    pub headings: Vec<Heading>,
    pub html: String,
}

/// Renders `body` as an HTML page described by `metadata`
///
/// # Arguments
///
/// * `metadata` - Title and author, usually from `extract_metadata` on the raw download
/// * `body` - Cleaned book text
/// * `site` - Site-wide title and attribution
///
/// # Example
///
/// ```
/// use shelf_press::config::SiteConfig;
/// use shelf_press::render::{render, BookMetadata};
///
/// let metadata = BookMetadata {
///     title: "The Wealth Of Nations".to_string(),
///     author: "Adam Smith".to_string(),
/// };
/// let doc = render(&metadata, "CHAPTER I\nlabour\nCHAPTER II\nmoney\n", &SiteConfig::default());
/// assert_eq!(doc.slug, "the-wealth-of-nations");
/// assert_eq!(doc.headings.len(), 2);
/// ```
pub fn render(metadata: &BookMetadata, body: &str, site: &SiteConfig) -> RenderedDocument {
    let headings = find_headings(body);
    let anchored = anchor_headings(body, &headings);
    let html = format_page(metadata, &headings, &anchored, site);

    RenderedDocument {
        slug: slugify(&metadata.title),
        metadata: metadata.clone(),
        headings,
        html,
    }
}
