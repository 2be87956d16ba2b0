//! HTML page template for a single book

use crate::config::SiteConfig;
use crate::render::headings::Heading;
use crate::render::metadata::BookMetadata;
use html_escape::encode_text;

const STYLE: &str = "\
body{margin:0;font-family:Georgia,serif;line-height:1.6;color:#222}
.layout{display:flex;max-width:1100px;margin:auto}
nav{width:240px;flex-shrink:0;padding:20px;position:sticky;top:0;height:100vh;overflow-y:auto;border-right:1px solid #ddd;font-size:0.9em}
nav ol{padding-left:1.2em}
main{flex:1;min-width:0;padding:20px 40px}
.author{font-style:italic;color:#555}
pre{white-space:pre-wrap;font-family:inherit}
.heading{display:inline-block;font-weight:bold;margin-top:1em}
footer{margin-top:40px;font-size:0.9em;color:#555}
@media (max-width:800px){.layout{display:block}nav{position:static;width:auto;height:auto;border-right:none;border-bottom:1px solid #ddd}}
";

/// Assembles the full HTML document
///
/// `anchored_body` is the escaped body text with heading spans already
/// inserted.
pub fn format_page(
    metadata: &BookMetadata,
    headings: &[Heading],
    anchored_body: &str,
    site: &SiteConfig,
) -> String {
    let title = encode_text(&metadata.title);
    let author = encode_text(&metadata.author);

    let mut html = String::with_capacity(anchored_body.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!(
        "<title>{} | {}</title>\n",
        title,
        encode_text(&site.title)
    ));
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<style>\n{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n<div class=\"layout\">\n");

    html.push_str("<nav>\n<h2>Contents</h2>\n<ol>\n");
    for heading in headings {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            heading.anchor,
            encode_text(&heading.text)
        ));
    }
    html.push_str("</ol>\n</nav>\n");

    html.push_str("<main>\n");
    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(&format!("<p class=\"author\">{}</p>\n", author));
    html.push_str("<pre>");
    html.push_str(anchored_body);
    html.push_str("</pre>\n");
    html.push_str(&format!(
        "<footer>\n<p>{}</p>\n</footer>\n",
        encode_text(&site.source_note)
    ));
    html.push_str("</main>\n</div>\n</body>\n</html>\n");

    html
}
