//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small mock catalog and run the full
//! crawl cycle end-to-end against real files in a temporary directory.

use shelf_press::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use shelf_press::crawler::{run_crawl, run_once, HttpCatalog};
use shelf_press::output::FsLibrary;
use shelf_press::storage::{JsonStateStore, StateStore};
use shelf_press::ShelfError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHELF: &str = "/ebooks/bookshelf/1";
const SHELF_PAGE_2: &str = "/ebooks/bookshelf/1/2";

/// Creates a test configuration pointing at the mock server and a temp dir
fn create_test_config(base_url: &str, root: &Path, quota: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_url: format!("{}{}", base_url, SHELF),
            per_run_quota: quota,
            item_delay_ms: 0, // No politeness delay in tests
            page_timeout_secs: 5,
            asset_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestShelf".to_string(),
            crawler_version: "0.1".to_string(),
        },
        output: OutputConfig {
            state_path: root.join("state.json"),
            txt_dir: root.join("books/txt"),
            html_dir: root.join("books/html"),
            index_path: root.join("index.html"),
        },
        ..Config::default()
    }
}

fn listing_html(ids: &[&str], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><ul class=\"results\">\n");
    for id in ids {
        html.push_str(&format!(
            "<li class=\"booklink\"><a class=\"link\" href=\"/ebooks/{}\">Book {}</a></li>\n",
            id, id
        ));
    }
    html.push_str("</ul>\n");
    if let Some(next) = next {
        html.push_str(&format!("<a href=\"{}\" title=\"Go to the next page\">Next</a>\n", next));
    }
    html.push_str("<a href=\"/ebooks/search/\">Search</a>\n</body></html>");
    html
}

fn book_text(title: &str, author: &str) -> String {
    format!(
        "The Project Gutenberg eBook of {title}\n\nTitle: {title}\nAuthor: {author}\n\n\
         *** START OF THE PROJECT GUTENBERG EBOOK {upper} ***\n\n\
         CHAPTER I\nOf the division of labour.\n\n\
         CHAPTER II\nOf the principle which gives occasion to it.\n\n\
         *** END OF THE PROJECT GUTENBERG EBOOK {upper} ***\n\
         Full license text follows.\n",
        title = title,
        author = author,
        upper = title.to_uppercase()
    )
}

async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts a detail page and its text asset; the asset is fetched at most once
async fn mount_book(server: &MockServer, id: &str, title: &str, author: &str) {
    mount_html(
        server,
        &format!("/ebooks/{}", id),
        format!(
            "<html><body><h1>{}</h1>\
             <a href=\"/ebooks/{}.html.images\">Read online</a>\
             <a href=\"/ebooks/{}.txt.utf-8\">Plain Text UTF-8</a></body></html>",
            title, id, id
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path(format!("/ebooks/{}.txt.utf-8", id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(book_text(title, author))
                .insert_header("content-type", "text/plain; charset=utf-8"),
        )
        .expect(0..=1)
        .mount(server)
        .await;
}

/// Two listing pages: 101, 102, 103 (no text) then 104
async fn mount_catalog(server: &MockServer) {
    mount_html(server, SHELF, listing_html(&["101", "102", "103"], Some(SHELF_PAGE_2))).await;
    mount_html(server, SHELF_PAGE_2, listing_html(&["104"], None)).await;

    mount_book(server, "101", "The Wealth of Nations", "Adam Smith").await;
    mount_book(server, "102", "Principles of Economics", "Alfred Marshall").await;
    mount_html(
        server,
        "/ebooks/103",
        "<html><body><a href=\"/ebooks/103.epub\">EPUB</a></body></html>".to_string(),
    )
    .await;
    mount_book(server, "104", "The Theory of the Leisure Class", "Thorstein Veblen").await;
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("Failed to read output file")
}

fn load_state(config: &Config) -> shelf_press::CrawlState {
    JsonStateStore::new(&config.output.state_path, &config.crawler.start_url)
        .load()
        .expect("Failed to load state")
}

#[tokio::test]
async fn test_run_respects_quota() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 2);

    let report = run_crawl(&config, None, false).await.expect("Crawl failed");

    assert_eq!(
        report.rendered,
        vec!["the-wealth-of-nations", "principles-of-economics"]
    );
    assert!(!report.page_turned);
    assert!(!report.finished);

    let state = load_state(&config);
    assert_eq!(state.current_page_url, config.crawler.start_url);
    assert_eq!(state.page_index, 2);
    assert!(!state.finished);
    assert!(state.updated_at.is_some());

    let text = read(&dir.path().join("books/txt/101.txt"));
    assert!(text.starts_with("*** START OF THE PROJECT GUTENBERG EBOOK"));
    assert!(text.contains("CHAPTER II"));
    assert!(!text.contains("END OF THE PROJECT GUTENBERG"));
    assert!(!text.contains("license"));
    assert!(!text.contains("Author: Adam Smith"));

    let page = read(&dir.path().join("books/html/the-wealth-of-nations.html"));
    assert!(page.contains("<h1>The Wealth of Nations</h1>"));
    assert!(page.contains("Adam Smith"));
    assert!(page.contains("href=\"#chapter-i\""));
    assert!(page.contains("id=\"chapter-ii\""));

    let index = read(&dir.path().join("index.html"));
    let principles = index
        .find("books/html/principles-of-economics.html")
        .expect("index lists principles");
    let wealth = index
        .find("books/html/the-wealth-of-nations.html")
        .expect("index lists wealth");
    assert!(principles < wealth, "index entries are sorted by file name");
}

#[tokio::test]
async fn test_pagination_to_completion() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 2);

    // First run renders 101 and 102
    let first = run_crawl(&config, None, false).await.unwrap();
    assert_eq!(first.rendered.len(), 2);

    // Second run skips 103 (no text asset) and turns the page
    let second = run_crawl(&config, None, false).await.unwrap();
    assert!(second.rendered.is_empty());
    assert_eq!(second.missing_asset, 1);
    assert!(second.page_turned);

    let state = load_state(&config);
    assert_eq!(state.current_page_url, format!("{}{}", server.uri(), SHELF_PAGE_2));
    assert_eq!(state.page_index, 0);
    assert!(!state.finished);

    // Third run renders 104 and finishes the bookshelf
    let third = run_crawl(&config, None, false).await.unwrap();
    assert_eq!(third.rendered, vec!["the-theory-of-the-leisure-class"]);
    assert!(third.finished);

    let state = load_state(&config);
    assert!(state.finished);
    assert_eq!(state.page_index, 1);

    let index_before = read(&dir.path().join("index.html"));
    let state_before = read(&config.output.state_path);
    assert_eq!(index_before.matches("<li>").count(), 3);

    // A finished crawl is a no-op
    let fourth = run_crawl(&config, None, false).await.unwrap();
    assert!(fourth.idle);
    assert_eq!(read(&dir.path().join("index.html")), index_before);
    assert_eq!(read(&config.output.state_path), state_before);
}

#[tokio::test]
async fn test_fresh_rerun_is_idempotent() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 5);

    let first = run_crawl(&config, None, false).await.unwrap();
    assert_eq!(first.rendered.len(), 2);
    assert_eq!(first.missing_asset, 1);
    let index_before = read(&dir.path().join("index.html"));

    // Starting over finds every text already saved; assets are not fetched again
    let again = run_crawl(&config, None, true).await.unwrap();
    assert!(again.rendered.is_empty());
    assert_eq!(again.already_saved, 2);
    assert_eq!(again.missing_asset, 1);
    assert!(again.page_turned);

    assert_eq!(read(&dir.path().join("index.html")), index_before);
    let pages = std::fs::read_dir(dir.path().join("books/html")).unwrap().count();
    assert_eq!(pages, 2);
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHELF))
        .and(header("user-agent", "TestShelf/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[], None)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 1);

    let report = run_crawl(&config, None, false).await.expect("Crawl failed");
    assert!(report.finished);
    assert!(report.rendered.is_empty());
}

#[tokio::test]
async fn test_listing_error_stops_run_without_saving() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHELF))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 1);

    let result = run_crawl(&config, None, false).await;
    match result {
        Err(ShelfError::Http { url, .. }) => assert!(url.ends_with(SHELF)),
        other => panic!("Expected HTTP error, got {:?}", other),
    }
    assert!(!config.output.state_path.exists());
}

#[tokio::test]
async fn test_asset_error_keeps_earlier_texts() {
    let server = MockServer::start().await;
    mount_html(&server, SHELF, listing_html(&["101", "102"], None)).await;
    mount_book(&server, "101", "The Wealth of Nations", "Adam Smith").await;
    mount_html(
        &server,
        "/ebooks/102",
        "<a href=\"/ebooks/102.txt.utf-8\">Plain Text UTF-8</a>".to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/ebooks/102.txt.utf-8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 5);

    assert!(run_crawl(&config, None, false).await.is_err());
    assert!(!config.output.state_path.exists());
    assert!(dir.path().join("books/txt/101.txt").exists());
}

#[tokio::test]
async fn test_config_hash_is_recorded() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 1);

    let catalog = HttpCatalog::new(&config).unwrap();
    let mut library = FsLibrary::open(&config.output).unwrap();
    let mut store = JsonStateStore::new(&config.output.state_path, &config.crawler.start_url);

    let report = run_once(&config, Some("abc123"), &catalog, &mut library, &mut store)
        .await
        .unwrap();
    assert_eq!(report.rendered, vec!["the-wealth-of-nations"]);

    let state = store.load().unwrap();
    assert_eq!(state.config_hash.as_deref(), Some("abc123"));
    assert_eq!(state.page_index, 1);

    let raw = read(&config.output.state_path);
    assert!(raw.contains("\"current_page\""));
}
