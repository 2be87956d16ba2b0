/// Crawl progress checkpoint
///
/// This module defines the small piece of state that survives between runs:
/// which listing page we are on, how far into it we got, and whether the
/// bookshelf has been walked to the end.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resumable position of the crawler within the bookshelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlState {
    /// URL of the listing page currently being walked
    #[serde(rename = "current_page", alias = "current_page_url")]
    pub current_page_url: String,

    /// Index of the next item to look at on the current listing page
    pub page_index: usize,

    /// Set once the last listing page has been exhausted
    #[serde(default)]
    pub finished: bool,

    /// Hash of the config file used by the last run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,

    /// When this state was last written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CrawlState {
    /// Creates a fresh state positioned at the first item of `start_url`
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            current_page_url: start_url.into(),
            page_index: 0,
            finished: false,
            config_hash: None,
            updated_at: None,
        }
    }

    /// Returns true once there is nothing left to crawl
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Moves past the current item, whatever happened to it
    pub fn advance(&mut self) {
        self.page_index += 1;
    }

    /// Returns true if every item of a listing with `item_count` entries was visited
    pub fn is_page_exhausted(&self, item_count: usize) -> bool {
        self.page_index >= item_count
    }

    /// Leaves an exhausted listing page
    ///
    /// Moves to `next` with the index reset, or marks the crawl finished when
    /// there is no further page.
    pub fn turn_page(&mut self, next: Option<String>) {
        match next {
            Some(url) => {
                self.current_page_url = url;
                self.page_index = 0;
            }
            None => self.finished = true,
        }
    }
}
