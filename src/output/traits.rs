//! Output traits and types
//!
//! This module defines the trait interface for the book library (the place
//! where cleaned texts, rendered pages and the index end up) and associated
//! error types.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A rendered page as found in the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPage {
    /// File name, e.g. `the-wealth-of-nations.html`
    pub file_name: String,

    /// Link target relative to the index page
    pub href: String,

    /// Full HTML of the page
    pub html: String,
}

/// Destination for crawl output
///
/// Writes are create-once: saving to a name that already exists leaves the
/// existing file alone and reports `false`.
pub trait Library {
    /// Returns true if cleaned text for `item_id` has already been saved
    fn has_text(&self, item_id: &str) -> OutputResult<bool>;

    /// Saves cleaned text for `item_id`; returns false if it already existed
    fn save_text(&mut self, item_id: &str, text: &str) -> OutputResult<bool>;

    /// Saves a rendered page as `<slug>.html`; returns false if it already existed
    fn save_page(&mut self, slug: &str, html: &str) -> OutputResult<bool>;

    /// Lists every rendered page, sorted by file name
    fn pages(&self) -> OutputResult<Vec<StoredPage>>;

    /// Replaces the aggregate index page
    fn write_index(&mut self, html: &str) -> OutputResult<()>;
}
