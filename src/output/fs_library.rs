//! Filesystem-backed library
//!
//! Layout (defaults):
//!
//! ```text
//! books/txt/<item-id>.txt
//! books/html/<slug>.html
//! index.html
//! ```

use crate::config::OutputConfig;
use crate::output::traits::{Library, OutputError, OutputResult, StoredPage};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

/// `Library` writing plain files under the configured directories
#[derive(Debug, Clone)]
pub struct FsLibrary {
    txt_dir: PathBuf,
    html_dir: PathBuf,
    index_path: PathBuf,
}

impl FsLibrary {
    /// Creates the library, making sure both book directories exist
    pub fn open(config: &OutputConfig) -> OutputResult<Self> {
        fs::create_dir_all(&config.txt_dir)?;
        fs::create_dir_all(&config.html_dir)?;

        Ok(Self {
            txt_dir: config.txt_dir.clone(),
            html_dir: config.html_dir.clone(),
            index_path: config.index_path.clone(),
        })
    }

    fn text_path(&self, item_id: &str) -> PathBuf {
        self.txt_dir.join(format!("{}.txt", item_id))
    }

    /// Link prefix from the index page to the html directory
    ///
    /// The html directory may sit below, beside or above the index; a relative
    /// and an absolute path are compared from the working directory.
    fn html_href_prefix(&self) -> String {
        let index_dir = self.index_path.parent().unwrap_or(Path::new(""));

        if index_dir.is_absolute() == self.html_dir.is_absolute() {
            relative_href(index_dir, &self.html_dir)
        } else {
            let cwd = std::env::current_dir().unwrap_or_default();
            relative_href(&cwd.join(index_dir), &cwd.join(&self.html_dir))
        }
    }
}

/// Relative URL path from directory `from` to directory `to`
fn relative_href(from: &Path, to: &Path) -> String {
    fn significant(path: &Path) -> Vec<Component<'_>> {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    let from = significant(from);
    let to = significant(to);

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let up = from[common..].iter().map(|_| "..".to_string());
    let down = to[common..].iter().filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        Component::ParentDir => Some("..".to_string()),
        _ => None,
    });

    up.chain(down).collect::<Vec<_>>().join("/")
}

/// Writes `contents` to `path` unless the file already exists
fn create_new(path: &Path, contents: &str) -> OutputResult<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(source) => {
            return Err(OutputError::Write {
                path: path.display().to_string(),
                source,
            })
        }
    };

    file.write_all(contents.as_bytes())
        .map_err(|source| OutputError::Write {
            path: path.display().to_string(),
            source,
        })?;
    Ok(true)
}

impl Library for FsLibrary {
    fn has_text(&self, item_id: &str) -> OutputResult<bool> {
        Ok(self.text_path(item_id).exists())
    }

    fn save_text(&mut self, item_id: &str, text: &str) -> OutputResult<bool> {
        create_new(&self.text_path(item_id), text)
    }

    fn save_page(&mut self, slug: &str, html: &str) -> OutputResult<bool> {
        create_new(&self.html_dir.join(format!("{}.html", slug)), html)
    }

    fn pages(&self) -> OutputResult<Vec<StoredPage>> {
        let prefix = self.html_href_prefix();
        let mut pages = Vec::new();

        for entry in fs::read_dir(&self.html_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
                continue;
            }

            let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };

            let href = if prefix.is_empty() {
                file_name.clone()
            } else {
                format!("{}/{}", prefix, file_name)
            };

            pages.push(StoredPage {
                html: fs::read_to_string(&path)?,
                file_name,
                href,
            });
        }

        pages.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(pages)
    }

    fn write_index(&mut self, html: &str) -> OutputResult<()> {
        if let Some(parent) = self.index_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.index_path, html).map_err(|source| OutputError::Write {
            path: self.index_path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn library_in(dir: &Path) -> FsLibrary {
        FsLibrary::open(&OutputConfig {
            state_path: dir.join("state.json"),
            txt_dir: dir.join("books/txt"),
            html_dir: dir.join("books/html"),
            index_path: dir.join("index.html"),
        })
        .unwrap()
    }

    #[test]
    fn test_save_text_is_create_once() {
        let dir = TempDir::new().unwrap();
        let mut library = library_in(dir.path());

        assert!(!library.has_text("3300").unwrap());
        assert!(library.save_text("3300", "first").unwrap());
        assert!(library.has_text("3300").unwrap());
        assert!(!library.save_text("3300", "second").unwrap());

        let saved = fs::read_to_string(dir.path().join("books/txt/3300.txt")).unwrap();
        assert_eq!(saved, "first");
    }

    #[test]
    fn test_save_page_collision_keeps_original() {
        let dir = TempDir::new().unwrap();
        let mut library = library_in(dir.path());

        assert!(library.save_page("wealth", "<h1>A</h1>").unwrap());
        assert!(!library.save_page("wealth", "<h1>B</h1>").unwrap());

        let pages = library.pages().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].html, "<h1>A</h1>");
    }

    #[test]
    fn test_pages_sorted_with_relative_href() {
        let dir = TempDir::new().unwrap();
        let mut library = library_in(dir.path());

        library.save_page("zeta", "z").unwrap();
        library.save_page("alpha", "a").unwrap();
        fs::write(dir.path().join("books/html/notes.txt"), "ignored").unwrap();

        let pages = library.pages().unwrap();
        let names: Vec<_> = pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["alpha.html", "zeta.html"]);
        assert_eq!(pages[0].href, "books/html/alpha.html");
    }

    #[test]
    fn test_default_layout_href() {
        let library = FsLibrary {
            txt_dir: PathBuf::from("books/txt"),
            html_dir: PathBuf::from("books/html"),
            index_path: PathBuf::from("index.html"),
        };
        assert_eq!(library.html_href_prefix(), "books/html");
    }

    fn layout(html_dir: &str, index_path: &str) -> FsLibrary {
        FsLibrary {
            txt_dir: PathBuf::from("books/txt"),
            html_dir: PathBuf::from(html_dir),
            index_path: PathBuf::from(index_path),
        }
    }

    #[test]
    fn test_html_dir_beside_index_dir() {
        assert_eq!(layout("books/html", "site/index.html").html_href_prefix(), "../books/html");
        assert_eq!(layout("/srv/books", "/srv/site/index.html").html_href_prefix(), "../books");
        assert_eq!(layout("./books/html", "./index.html").html_href_prefix(), "books/html");
        assert_eq!(layout("site", "site/index.html").html_href_prefix(), "");
    }

    #[test]
    fn test_absolute_html_dir_with_relative_index() {
        let cwd = std::env::current_dir().unwrap();
        let library = layout(cwd.join("books/html").to_str().unwrap(), "index.html");
        assert_eq!(library.html_href_prefix(), "books/html");
    }

    #[test]
    fn test_sibling_layout_links_resolve() {
        let dir = TempDir::new().unwrap();
        let mut library = FsLibrary::open(&OutputConfig {
            state_path: dir.path().join("state.json"),
            txt_dir: dir.path().join("books/txt"),
            html_dir: dir.path().join("books/html"),
            index_path: dir.path().join("site/index.html"),
        })
        .unwrap();
        library.save_page("alpha", "a").unwrap();
        library.write_index("index").unwrap();

        let pages = library.pages().unwrap();
        assert_eq!(pages[0].href, "../books/html/alpha.html");
        let target = dir.path().join("site").join(&pages[0].href);
        assert!(target.exists());
    }

    #[test]
    fn test_write_index_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut library = library_in(dir.path());

        library.write_index("old").unwrap();
        library.write_index("new").unwrap();

        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(index, "new");
    }
}
