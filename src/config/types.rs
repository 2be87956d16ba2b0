use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Shelf-Press
///
/// Every section is optional; a missing section falls back to the built-in
/// defaults, which describe the economics bookshelf on Project Gutenberg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
    pub site: SiteConfig,
    pub leagues: LeagueConfig,
}

/// Crawl loop behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// First listing page of the bookshelf
    pub start_url: String,

    /// Maximum number of books rendered per run
    pub per_run_quota: u32,

    /// Pause between rendered books (milliseconds)
    pub item_delay_ms: u64,

    /// Timeout for listing and detail pages (seconds)
    pub page_timeout_secs: u64,

    /// Timeout for plain-text downloads (seconds)
    pub asset_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: "https://www.gutenberg.org/ebooks/bookshelf/696".to_string(),
            per_run_quota: 3,
            item_delay_ms: 2000,
            page_timeout_secs: 15,
            asset_timeout_secs: 20,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Header value sent with every request, e.g. `Gutenberg-Economics-Crawler/1.0`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "Gutenberg-Economics-Crawler".to_string(),
            crawler_version: "1.0".to_string(),
        }
    }
}

/// Where things live on catalog pages and inside downloaded books
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// CSS selector for item links on a listing page
    pub item_selector: String,

    /// Required href prefix for item links
    pub item_prefix: String,

    /// Link text of the pagination link, compared case-insensitively
    pub next_link_text: String,

    /// Suffix identifying the plain-text asset on a detail page
    pub asset_suffix: String,

    /// Boilerplate start markers, tried in order
    pub start_markers: Vec<String>,

    /// Boilerplate end markers, tried in order
    pub end_markers: Vec<String>,

    /// Number of leading lines searched for `Title:` and `Author:`
    pub metadata_lines: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            item_selector: "li.booklink a.link".to_string(),
            item_prefix: "/ebooks/".to_string(),
            next_link_text: "next".to_string(),
            asset_suffix: ".txt.utf-8".to_string(),
            start_markers: vec![
                "*** START OF THIS PROJECT GUTENBERG EBOOK".to_string(),
                "*** START OF THE PROJECT GUTENBERG EBOOK".to_string(),
            ],
            end_markers: vec![
                "*** END OF THIS PROJECT GUTENBERG EBOOK".to_string(),
                "*** END OF THE PROJECT GUTENBERG EBOOK".to_string(),
            ],
            metadata_lines: 100,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// JSON checkpoint of crawl progress
    pub state_path: PathBuf,

    /// Directory for cleaned plain-text books
    pub txt_dir: PathBuf,

    /// Directory for rendered HTML books
    pub html_dir: PathBuf,

    /// Aggregate index page
    pub index_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("state.json"),
            txt_dir: PathBuf::from("books/txt"),
            html_dir: PathBuf::from("books/html"),
            index_path: PathBuf::from("index.html"),
        }
    }
}

/// Text used on generated pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// `<title>` of the index and suffix of book page titles
    pub title: String,

    /// `<h1>` of the index page
    pub heading: String,

    /// Attribution footer
    pub source_note: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Economics Books - Project Gutenberg".to_string(),
            heading: "Public Domain Economics Books".to_string(),
            source_note: "Source: Project Gutenberg (Public Domain)".to_string(),
        }
    }
}

/// Player-profile converter settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LeagueConfig {
    /// Directory receiving one JSON document per league
    pub output_dir: PathBuf,

    /// Season stamped on newly created league documents
    pub default_season: String,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data_output"),
            default_season: "2024/2025".to_string(),
        }
    }
}
