//! HTML parser for catalog pages
//!
//! This module handles the two kinds of catalog pages the crawler reads:
//! - Listing pages: item links plus an optional "next" pagination link
//! - Detail pages: the link to an item's plain-text download

use crate::config::CatalogConfig;
use crate::ConfigError;
use scraper::{Html, Selector};
use url::Url;

/// Items and pagination extracted from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute detail-page URLs, in document order
    pub items: Vec<String>,

    /// Absolute URL of the next listing page, if any
    pub next: Option<String>,
}

/// Compiled link-matching rules for catalog pages
#[derive(Debug, Clone)]
pub struct LinkRules {
    item_selector: Selector,
    anchor_selector: Selector,
    item_prefix: String,
    next_link_text: String,
    asset_suffix: String,
}

impl LinkRules {
    /// Compiles the selectors named in the catalog configuration
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        let item_selector = Selector::parse(&config.item_selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("'{}': {:?}", config.item_selector, e))
        })?;
        let anchor_selector = Selector::parse("a[href]")
            .map_err(|e| ConfigError::InvalidSelector(format!("'a[href]': {:?}", e)))?;

        Ok(Self {
            item_selector,
            anchor_selector,
            item_prefix: config.item_prefix.clone(),
            next_link_text: config.next_link_text.trim().to_lowercase(),
            asset_suffix: config.asset_suffix.clone(),
        })
    }
}

/// Parses a listing page
///
/// # Link Extraction Rules
///
/// - Items are elements matching the item selector whose raw `href` starts
///   with the item prefix (e.g. `/ebooks/`)
/// - The next page is any `<a href>` whose trimmed text equals the next-link
///   text, ignoring case; when several match, the last one wins
///
/// # Example
///
/// ```
/// use shelf_press::config::CatalogConfig;
/// use shelf_press::crawler::{parse_listing, LinkRules};
/// use url::Url;
///
/// let rules = LinkRules::from_config(&CatalogConfig::default()).unwrap();
/// let html = r#"<ul><li class="booklink"><a class="link" href="/ebooks/3300">Wealth</a></li></ul>
///               <a href="/ebooks/bookshelf/696?start=26">Next</a>"#;
/// let base = Url::parse("https://www.gutenberg.org/ebooks/bookshelf/696").unwrap();
/// let page = parse_listing(html, &base, &rules);
/// assert_eq!(page.items, vec!["https://www.gutenberg.org/ebooks/3300".to_string()]);
/// assert!(page.next.is_some());
/// ```
pub fn parse_listing(html: &str, base_url: &Url, rules: &LinkRules) -> ListingPage {
    let document = Html::parse_document(html);

    let items = document
        .select(&rules.item_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.trim().starts_with(&rules.item_prefix))
        .filter_map(|href| resolve_link(href, base_url))
        .collect();

    let next = document
        .select(&rules.anchor_selector)
        .filter(|element| {
            element.text().collect::<String>().trim().to_lowercase() == rules.next_link_text
        })
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .last();

    ListingPage { items, next }
}

/// Finds the plain-text asset on an item's detail page
///
/// Returns the first link whose `href` ends with the asset suffix. Other
/// encodings are not considered as a fallback.
pub fn find_text_asset(html: &str, base_url: &Url, rules: &LinkRules) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&rules.anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .find(|href| href.trim().ends_with(&rules.asset_suffix))
        .and_then(|href| resolve_link(href, base_url))
}

/// Derives an item identifier from its detail-page URL
///
/// The identifier is the last non-empty path segment, so
/// `https://www.gutenberg.org/ebooks/3300` becomes `3300`.
pub fn item_id(item_url: &str) -> String {
    Url::parse(item_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(String::from))
        })
        .unwrap_or_else(|| {
            item_url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or(item_url)
                .to_string()
        })
}

/// Resolves a link href to an absolute URL
///
/// Returns None for empty hrefs, fragment-only links, non-navigational
/// schemes, and anything that does not resolve to http(s).
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
