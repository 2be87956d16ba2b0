//! Chapter heading detection and anchoring

use crate::render::metadata::slugify;
use regex::Regex;
use html_escape::encode_text;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// A heading line and the anchor id it links to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub text: String,
    pub anchor: String,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*((?:CHAPTER|BOOK|PART)[ \t]+(?:[IVXLCDM]+|\d+)\b[^\r\n]*)")
            .expect("heading pattern is a valid regex")
    })
}

/// Scans `text` for `CHAPTER`/`BOOK`/`PART` lines followed by a roman or
/// arabic numeral
///
/// Headings are returned in order of first appearance. A heading whose text
/// repeats an earlier one is only listed once. Its anchor is the slug of the
/// heading text, suffixed `-2`, `-3`, ... when a different heading already
/// took that slug (`CHAPTER I.` and `CHAPTER I` both slug to `chapter-i`).
pub fn find_headings(text: &str) -> Vec<Heading> {
    let mut seen = HashSet::new();
    let mut anchors = HashSet::new();
    let mut headings = Vec::new();

    for line in heading_pattern().captures_iter(text).filter_map(|caps| caps.get(1)) {
        let text = line.as_str().trim().to_string();
        if !seen.insert(text.clone()) {
            continue;
        }

        let base = slugify(&text);
        let mut anchor = base.clone();
        let mut n = 2;
        while !anchors.insert(anchor.clone()) {
            anchor = format!("{}-{}", base, n);
            n += 1;
        }

        headings.push(Heading { text, anchor });
    }

    headings
}

/// Escapes `body` for HTML and wraps each heading's first line in an anchor
///
/// Heading lines are located with the same pattern `find_headings` uses, so
/// a heading that is a prefix of another (`CHAPTER I`, `CHAPTER II`) or a
/// mention inside running prose never receives the anchor. Later repeats of a
/// heading line keep their plain form.
pub fn anchor_headings(body: &str, headings: &[Heading]) -> String {
    let mut pending: HashMap<&str, &str> = headings
        .iter()
        .map(|h| (h.text.as_str(), h.anchor.as_str()))
        .collect();

    let mut html = String::with_capacity(body.len() + headings.len() * 48);
    let mut copied = 0;

    for line in heading_pattern().captures_iter(body).filter_map(|caps| caps.get(1)) {
        let text = line.as_str().trim_end();
        let Some(anchor) = pending.remove(text) else {
            continue;
        };

        html.push_str(&encode_text(&body[copied..line.start()]));
        html.push_str(&format!(
            "<span class=\"heading\" id=\"{}\">{}</span>",
            anchor,
            encode_text(text)
        ));
        copied = line.start() + text.len();
    }

    html.push_str(&encode_text(&body[copied..]));
    html
}
