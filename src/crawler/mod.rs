//! Crawler module for walking the bookshelf
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listing pages, detail pages and text assets
//! - HTML parsing for item, pagination and asset links
//! - Boilerplate trimming of downloaded books
//! - The resumable run loop

mod cleaner;
mod coordinator;
mod fetcher;
mod parser;

pub use cleaner::clean_text;
pub use coordinator::{run_crawl, run_once, step, StepReport};
pub use fetcher::{build_http_client, Catalog, HttpCatalog};
pub use parser::{find_text_asset, item_id, parse_listing, LinkRules, ListingPage};

use crate::config::Config;
use crate::ShelfError;

/// Runs one crawl pass
///
/// This is the main entry point for the binary. It will:
/// 1. Open the checkpoint (or discard it when `fresh`)
/// 2. Build the HTTP client
/// 3. Walk up to `per_run_quota` books from the current listing page
/// 4. Rebuild the site index
/// 5. Save the checkpoint
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - Hash of the config file, recorded in the checkpoint
/// * `fresh` - Start again from the first listing page
pub async fn crawl(
    config: &Config,
    config_hash: Option<&str>,
    fresh: bool,
) -> Result<StepReport, ShelfError> {
    run_crawl(config, config_hash, fresh).await
}
