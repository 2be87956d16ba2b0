//! State module for tracking crawl progress
//!
//! The crawler keeps exactly one piece of state between runs: a `CrawlState`
//! checkpoint. It is loaded at start, threaded through `crawler::step`, and
//! written back at the end of the run by a `storage::StateStore`.

mod crawl_state;

pub use crawl_state::CrawlState;
