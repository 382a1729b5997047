//! HTML content extraction
//!
//! Reduces raw HTML to representative plain text using CSS selectors.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Elements whose subtrees never contribute text
const STRIP_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "iframe",
];

/// Candidate content regions, tried in order; the first match wins.
///
/// Order encodes specificity: semantic HTML5 tags, then the ARIA role
/// marker, then common CMS class/id conventions, then generic "post"
/// conventions, then microdata/markdown conventions.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    ".content",
    "#content",
    ".main-content",
    "#main-content",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".page-content",
    "#page-content",
    ".post-body",
    ".article-body",
    ".content-area",
    ".site-content",
    "#site-content",
    ".blog-post",
    ".single-post",
    ".post",
    "#post",
    "[itemprop='articleBody']",
    ".markdown-body",
];

/// Extracted text plus truncation metadata
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Whitespace-collapsed text, hard-capped at the requested length
    pub text: String,
    /// Character count before truncation
    pub original_chars: usize,
    /// Whether the cap cut anything off
    pub truncated: bool,
}

/// Extract main content from HTML
///
/// Tries each candidate selector in priority order and returns the first
/// matching region's text; falls back to whole-document text when nothing
/// matches (or the match is empty). Never fails: malformed HTML degrades
/// into whatever the parser can salvage.
///
/// # Arguments
/// * `html` - Raw HTML string
/// * `max_chars` - Hard cap on returned characters
pub fn extract_main_content(html: &str, max_chars: usize) -> ExtractedText {
    let document = Html::parse_document(html);

    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document
            .select(&selector)
            .find(|el| !in_stripped_subtree(*el))
        {
            let text = clean_text(&element_text(element));
            if text.is_empty() {
                // Matched region carries no text; use the whole document
                break;
            }
            debug!("Content selector matched: {}", selector_str);
            return truncate_chars(text, max_chars);
        }
    }

    let text = clean_text(&element_text(document.root_element()));
    truncate_chars(text, max_chars)
}

/// Extract the page `<title>` text, if present
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Collect an element's text, skipping stripped subtrees at any depth
fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    if STRIP_TAGS.contains(&element.value().name()) {
        return;
    }
    for node in element.children() {
        match node.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(node) {
                    push_text(child, out);
                }
            }
            _ => {}
        }
    }
}

/// True when any ancestor is a stripped element, so selector matches inside
/// removed regions are ignored
fn in_stripped_subtree(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| STRIP_TAGS.contains(&ancestor.value().name()))
}

/// Collapse all whitespace runs (including newlines) to single spaces; trim
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hard character slice at `max_chars`; no word-boundary awareness
fn truncate_chars(text: String, max_chars: usize) -> ExtractedText {
    let original_chars = text.chars().count();
    if original_chars <= max_chars {
        return ExtractedText {
            text,
            original_chars,
            truncated: false,
        };
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    ExtractedText {
        text: text[..cut].to_string(),
        original_chars,
        truncated: true,
    }
}
