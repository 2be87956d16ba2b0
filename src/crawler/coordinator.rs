//! Crawler coordinator - the resumable run loop
//!
//! A run picks up the checkpoint, walks the remaining items of the current
//! listing page until the per-run quota is met, turns the page (or finishes)
//! when it runs out of items, rebuilds the index, and writes the checkpoint
//! back. The state is an explicit value passed into `step` and returned from
//! it; network, output files and persistence are all injected.

use crate::config::Config;
use crate::crawler::cleaner::clean_text;
use crate::crawler::fetcher::{Catalog, HttpCatalog};
use crate::crawler::parser::item_id;
use crate::output::{rebuild_index, FsLibrary, Library};
use crate::render::{extract_metadata, render};
use crate::state::CrawlState;
use crate::storage::{open_state_store, StateStore};
use crate::ShelfError;
use chrono::Utc;
use std::time::Duration;

/// What one call to `step` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Slugs of books rendered this run, in processing order
    pub rendered: Vec<String>,

    /// Items skipped because their detail page had no text asset
    pub missing_asset: usize,

    /// Items skipped because their text was saved by an earlier run
    pub already_saved: usize,

    /// Whether the run moved on to the next listing page
    pub page_turned: bool,

    /// Whether the crawl is finished after this run
    pub finished: bool,

    /// True if the state was already finished and nothing was attempted
    pub idle: bool,
}

/// Result of handling a single item
#[derive(Debug, Clone, PartialEq, Eq)]
enum ItemOutcome {
    Rendered { slug: String },
    MissingAsset,
    AlreadySaved,
}

/// Advances the crawl by one run
///
/// # Flow
///
/// 1. A finished state is returned untouched
/// 2. The current listing page is fetched
/// 3. Items from `page_index` on are resolved, downloaded, cleaned, saved
///    and rendered; the index advances for every item, whatever happened
/// 4. The loop stops once `per_run_quota` books were rendered
/// 5. An exhausted page turns to the next one, or finishes the crawl
///
/// Missing text assets are skipped. Network failures end the step with an
/// error; the returned state is then lost, but texts already saved are
/// recognised and skipped next time.
///
/// # Example
///
/// ```no_run
/// use shelf_press::config::Config;
/// use shelf_press::crawler::{step, HttpCatalog};
/// use shelf_press::output::MemoryLibrary;
/// use shelf_press::state::CrawlState;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let catalog = HttpCatalog::new(&config)?;
/// let mut library = MemoryLibrary::new();
/// let state = CrawlState::new(config.crawler.start_url.clone());
///
/// let (state, report) = step(state, &catalog, &mut library, &config).await?;
/// println!("rendered {:?}, now at index {}", report.rendered, state.page_index);
/// # Ok(())
/// # }
/// ```
pub async fn step<C, L>(
    mut state: CrawlState,
    catalog: &C,
    library: &mut L,
    config: &Config,
) -> Result<(CrawlState, StepReport), ShelfError>
where
    C: Catalog + ?Sized,
    L: Library + ?Sized,
{
    let mut report = StepReport::default();

    if state.is_finished() {
        tracing::info!("Bookshelf already fully crawled, nothing to do");
        report.finished = true;
        report.idle = true;
        return Ok((state, report));
    }

    tracing::info!(
        "Fetching listing {} (resuming at item {})",
        state.current_page_url,
        state.page_index
    );
    let listing = catalog.listing(&state.current_page_url).await?;
    tracing::debug!(
        "Listing has {} items, next page: {:?}",
        listing.items.len(),
        listing.next
    );

    let quota = config.crawler.per_run_quota as usize;
    let delay = Duration::from_millis(config.crawler.item_delay_ms);
    let remaining = listing.items.get(state.page_index..).unwrap_or_default();

    for (position, item_url) in remaining.iter().enumerate() {
        let outcome = process_item(item_url, catalog, library, config).await?;
        state.advance();

        match outcome {
            ItemOutcome::Rendered { slug } => {
                report.rendered.push(slug);

                let more_items = position + 1 < remaining.len();
                if report.rendered.len() < quota && more_items && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            ItemOutcome::MissingAsset => report.missing_asset += 1,
            ItemOutcome::AlreadySaved => report.already_saved += 1,
        }

        if report.rendered.len() >= quota {
            tracing::info!("Per-run quota of {} reached", quota);
            break;
        }
    }

    if state.is_page_exhausted(listing.items.len()) {
        match &listing.next {
            Some(next) => tracing::info!("Listing exhausted, moving on to {}", next),
            None => tracing::info!("Last listing page exhausted, crawl finished"),
        }
        report.page_turned = listing.next.is_some();
        state.turn_page(listing.next);
    }

    report.finished = state.is_finished();
    Ok((state, report))
}

/// Resolves, downloads, cleans, saves and renders one item
async fn process_item<C, L>(
    item_url: &str,
    catalog: &C,
    library: &mut L,
    config: &Config,
) -> Result<ItemOutcome, ShelfError>
where
    C: Catalog + ?Sized,
    L: Library + ?Sized,
{
    let id = item_id(item_url);

    if library.has_text(&id)? {
        tracing::debug!("Item {} already saved, skipping", id);
        return Ok(ItemOutcome::AlreadySaved);
    }

    let Some(text_url) = catalog.text_link(item_url).await? else {
        tracing::warn!("No plain-text asset on {}, skipping", item_url);
        return Ok(ItemOutcome::MissingAsset);
    };

    tracing::debug!("Downloading {} from {}", id, text_url);
    let raw = catalog.download_text(&text_url).await?;
    let body = clean_text(&raw, &config.catalog.start_markers, &config.catalog.end_markers);

    if !library.save_text(&id, body)? {
        return Ok(ItemOutcome::AlreadySaved);
    }

    let metadata = extract_metadata(&raw, config.catalog.metadata_lines);
    let document = render(&metadata, body, &config.site);

    if library.save_page(&document.slug, &document.html)? {
        tracing::info!(
            "Rendered \"{}\" by {} as {}.html ({} headings)",
            document.metadata.title,
            document.metadata.author,
            document.slug,
            document.headings.len()
        );
    } else {
        tracing::warn!(
            "Page {}.html already exists, item {} was not rendered over it",
            document.slug,
            id
        );
    }

    Ok(ItemOutcome::Rendered {
        slug: document.slug,
    })
}

/// Runs one full crawl pass against injected collaborators
///
/// Loads the checkpoint, steps, rebuilds the index and saves the checkpoint.
/// When the checkpoint is already finished nothing is rebuilt or saved.
pub async fn run_once<C, L, S>(
    config: &Config,
    config_hash: Option<&str>,
    catalog: &C,
    library: &mut L,
    store: &mut S,
) -> Result<StepReport, ShelfError>
where
    C: Catalog + ?Sized,
    L: Library + ?Sized,
    S: StateStore + ?Sized,
{
    let state = store.load()?;

    if let (Some(previous), Some(current)) = (state.config_hash.as_deref(), config_hash) {
        if previous != current {
            tracing::warn!(
                "Configuration changed since the last run; resuming {} at item {} anyway",
                state.current_page_url,
                state.page_index
            );
        }
    }

    let (mut state, report) = step(state, catalog, library, config).await?;
    if report.idle {
        return Ok(report);
    }

    rebuild_index(library, &config.site)?;

    if let Some(hash) = config_hash {
        state.config_hash = Some(hash.to_string());
    }
    state.updated_at = Some(Utc::now());
    store.save(&state)?;

    tracing::info!(
        "Run complete: {} rendered, {} without text, {} already saved; next item {} on {}",
        report.rendered.len(),
        report.missing_asset,
        report.already_saved,
        state.page_index,
        state.current_page_url
    );

    Ok(report)
}

/// Runs the crawler against the real catalog and the configured directories
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - Hash of the config file, if one was loaded
/// * `fresh` - Discard the checkpoint and start from the first listing page
pub async fn run_crawl(
    config: &Config,
    config_hash: Option<&str>,
    fresh: bool,
) -> Result<StepReport, ShelfError> {
    let catalog = HttpCatalog::new(config)?;
    let mut library = FsLibrary::open(&config.output)?;
    let mut store = open_state_store(config);

    if fresh {
        tracing::info!("Discarding checkpoint {}", store.path().display());
        store.reset()?;
    }

    run_once(config, config_hash, &catalog, &mut library, &mut store).await
}
