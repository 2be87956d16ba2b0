//! Site index generation
//!
//! This module regenerates the top-level listing page that links every
//! rendered book. The page is rebuilt from scratch on every call and contains
//! nothing time-dependent, so an unchanged library produces the same bytes.

use crate::config::SiteConfig;
use crate::output::traits::{Library, OutputResult, StoredPage};
use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{Html, Selector};

/// One line of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub href: String,
    pub label: String,
}

impl IndexEntry {
    /// Builds an entry from a stored page, labelled by its first `<h1>`
    ///
    /// Pages without a usable heading are labelled by their file stem.
    pub fn from_page(page: &StoredPage) -> Self {
        let label = extract_heading(&page.html).unwrap_or_else(|| {
            page.file_name
                .strip_suffix(".html")
                .unwrap_or(&page.file_name)
                .to_string()
        });

        Self {
            href: page.href.clone(),
            label,
        }
    }
}

/// Rebuilds the index page from everything currently in the library
///
/// # Returns
///
/// * `Ok(usize)` - Number of books listed
/// * `Err(OutputError)` - Failed to enumerate pages or write the index
pub fn rebuild_index<L: Library + ?Sized>(library: &mut L, site: &SiteConfig) -> OutputResult<usize> {
    let entries: Vec<IndexEntry> = library.pages()?.iter().map(IndexEntry::from_page).collect();

    let html = format_index(&entries, site);
    library.write_index(&html)?;

    tracing::info!("Index rebuilt with {} books", entries.len());
    Ok(entries.len())
}

/// Formats the index page
pub fn format_index(entries: &[IndexEntry], site: &SiteConfig) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", encode_text(&site.title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", encode_text(&site.heading)));

    html.push_str("<ul>\n");
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_double_quoted_attribute(&entry.href),
            encode_text(&entry.label)
        ));
    }
    html.push_str("</ul>\n");

    html.push_str(&format!("<p>{}</p>\n", encode_text(&site.source_note)));
    html.push_str("</body>\n</html>\n");

    html
}

/// Extracts the text of the first `<h1>` in a document
fn extract_heading(html: &str) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
