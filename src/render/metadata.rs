//! Title/author extraction and slugs

/// Title used when the header has no `Title:` line
pub const DEFAULT_TITLE: &str = "Unknown Title";

/// Author used when the header has no `Author:` line
pub const DEFAULT_AUTHOR: &str = "Unknown Author";

/// Bibliographic header of a downloaded book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
}

impl Default for BookMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// Reads `Title:` and `Author:` from the first `max_lines` lines of `text`
///
/// The first occurrence of each prefix wins. Empty values count as absent.
pub fn extract_metadata(text: &str, max_lines: usize) -> BookMetadata {
    let mut title = None;
    let mut author = None;

    for line in text.lines().take(max_lines) {
        let line = line.trim();
        if title.is_none() {
            title = prefixed_value(line, "Title:");
        }
        if author.is_none() {
            author = prefixed_value(line, "Author:");
        }
        if title.is_some() && author.is_some() {
            break;
        }
    }

    BookMetadata {
        title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        author: author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
    }
}

fn prefixed_value(line: &str, prefix: &str) -> Option<String> {
    line.strip_prefix(prefix)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// Derives a filesystem and URL safe identifier from a title
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, and trims hyphens from both ends.
///
/// # Example
///
/// ```
/// use shelf_press::render::slugify;
///
/// assert_eq!(slugify("The Wealth Of Nations"), "the-wealth-of-nations");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}
