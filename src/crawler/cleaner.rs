//! Boilerplate trimming for downloaded books
//!
//! Plain-text books carry a license preamble and a long legal trailer. The
//! body sits between a start marker and an end marker; anything outside that
//! range is dropped.

/// Returns the part of `raw` between the boilerplate markers
///
/// The range starts at the first start marker found (trying `start_markers`
/// in order) and ends just before the first end marker found after it. The
/// start marker line stays in the result. If either marker is missing the
/// text is returned unchanged.
///
/// # Example
///
/// ```
/// use shelf_press::crawler::clean_text;
///
/// let raw = "license\n*** START OF THIS BOOK\nbody\n*** END OF THIS BOOK\ntrailer";
/// let cleaned = clean_text(
///     raw,
///     &["*** START OF THIS BOOK".to_string()],
///     &["*** END OF THIS BOOK".to_string()],
/// );
/// assert_eq!(cleaned, "*** START OF THIS BOOK\nbody\n");
/// ```
pub fn clean_text<'a>(raw: &'a str, start_markers: &[String], end_markers: &[String]) -> &'a str {
    let Some(start) = find_first(raw, start_markers) else {
        return raw;
    };

    match find_first(&raw[start..], end_markers) {
        Some(end) => &raw[start..start + end],
        None => raw,
    }
}

fn find_first(haystack: &str, markers: &[String]) -> Option<usize> {
    markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .find_map(|marker| haystack.find(marker.as_str()))
}
