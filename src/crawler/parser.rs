//! HTML parsing: text cleaning and link extraction
//!
//! One parsed document serves both needs so a page is never fetched twice:
//! - `clean_text` strips navigation chrome, scripts, and styling noise, and
//!   collapses the remaining visible text into a single normalized string
//! - `extract_links` walks every hyperlink in document order and keeps the
//!   admissible ones

use crate::url::is_admissible;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Element kinds removed wholesale, descendants included
const NOISE_TAGS: [&str; 6] = ["script", "style", "nav", "header", "footer", "aside"];

/// Class-name fragments that mark navigation and boilerplate containers
const NOISE_CLASS_HINTS: [&str; 9] = [
    "nav",
    "menu",
    "sidebar",
    "footer",
    "header",
    "breadcrumb",
    "pagination",
    "social",
    "share",
];

/// Extracts cleaned, whitespace-normalized text from a parsed document
///
/// Subtrees rooted at script/style/nav/header/footer/aside elements are
/// skipped entirely, as is any element whose class attribute contains one of
/// the boilerplate hints (case-insensitive). The remaining text nodes are
/// joined with single spaces, with runs of whitespace collapsed.
///
/// Pure function: cleaning the same document twice yields identical text.
pub fn clean_text(document: &Html) -> String {
    let mut text = String::new();
    collect_text(document.root_element(), &mut text);
    text
}

/// Convenience wrapper that parses and cleans in one step
pub fn clean_html(html: &str) -> String {
    clean_text(&Html::parse_document(html))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                for word in text.split_whitespace() {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(word);
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    if !is_noise_element(&child_element) {
                        collect_text(child_element, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Decides whether an element (and its whole subtree) is boilerplate
fn is_noise_element(element: &ElementRef<'_>) -> bool {
    let value = element.value();

    if NOISE_TAGS.contains(&value.name()) {
        return true;
    }

    value.classes().any(|class| {
        let class = class.to_lowercase();
        NOISE_CLASS_HINTS.iter().any(|hint| class.contains(hint))
    })
}

/// Extracts admissible links from a parsed document
///
/// Every `<a href>` is resolved against `page_url`; the result is kept when
/// [`is_admissible`] accepts it relative to the seed. Document order is
/// preserved and nothing is deduplicated here - the crawl loop does that via
/// its visited and queued checks.
pub fn extract_links(document: &Html, page_url: &Url, seed: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Ok(absolute) = page_url.join(href.trim()) {
                    if is_admissible(&absolute, seed) {
                        links.push(absolute);
                    }
                }
            }
        }
    }

    links
}

/// Truncates a string to at most `max_chars` Unicode scalars
///
/// All crawl budgets count characters, not bytes, so truncation must land on
/// a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
