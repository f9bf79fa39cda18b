//! Plain-text content extraction with ordered fallback strategies.
//!
//! Extraction tries a prioritized list of pure strategies against the parsed
//! document and keeps the first result whose normalized text is long enough
//! to be worth saving: the `<article>` body first, then common main-content
//! containers, then every `<p>` tag on the page. If nothing clears the
//! threshold the page is reported as unparseable rather than written out as
//! a near-empty file.

use crate::parse::Document;
use crate::{ColligoError, Result};

/// Configuration for content extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum character count for extracted text to be considered content.
    pub min_text_length: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { min_text_length: 200 }
    }
}

/// The result of a successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Normalized plain text.
    pub text: String,
    /// Name of the strategy that produced it.
    pub strategy: &'static str,
}

/// A pure extraction strategy: parsed document in, candidate text out.
type StrategyFn = fn(&Document) -> Option<String>;

/// Strategies in priority order. First non-trivial result wins.
const STRATEGIES: &[(&str, StrategyFn)] = &[
    ("article", article_body),
    ("main-container", main_container),
    ("paragraphs", all_paragraphs),
];

/// Selectors tried by the main-container strategy, most specific first.
const CONTAINER_SELECTORS: &[&str] =
    &["main", "#content", "#main-content", ".post-content", ".entry-content", ".article-body"];

/// Extracts the main textual content from raw HTML.
///
/// A pure function of the input bytes: identical HTML yields identical text.
///
/// # Errors
///
/// Returns [`ColligoError::ContentTooShort`] when every strategy produces
/// empty or too-short text; `length` reports the best length seen.
pub fn extract_text(html: &str, config: &ExtractConfig) -> Result<Extraction> {
    let doc = Document::parse(html);
    let mut best_length = 0usize;

    for &(name, strategy) in STRATEGIES {
        if let Some(raw) = strategy(&doc) {
            let text = normalize_whitespace(&raw);
            let length = text.chars().count();

            if length >= config.min_text_length {
                tracing::debug!(strategy = name, chars = length, "extraction strategy matched");
                return Ok(Extraction { text, strategy: name });
            }
            best_length = best_length.max(length);
        }
    }

    Err(ColligoError::ContentTooShort { length: best_length, minimum: config.min_text_length })
}

/// Text of every `<article>` element, joined.
fn article_body(doc: &Document) -> Option<String> {
    let articles = doc.select("article").ok()?;
    if articles.is_empty() {
        return None;
    }
    Some(articles.iter().map(|el| el.text()).collect::<Vec<_>>().join("\n\n"))
}

/// Text of the first matching main-content container.
fn main_container(doc: &Document) -> Option<String> {
    for selector in CONTAINER_SELECTORS {
        let elements = doc.select(selector).ok()?;
        if !elements.is_empty() {
            return Some(elements.iter().map(|el| el.text()).collect::<Vec<_>>().join("\n\n"));
        }
    }
    None
}

/// Last resort: every `<p>` on the page.
fn all_paragraphs(doc: &Document) -> Option<String> {
    let paragraphs = doc.select("p").ok()?;
    if paragraphs.is_empty() {
        return None;
    }
    Some(paragraphs.iter().map(|el| el.text()).collect::<Vec<_>>().join("\n\n"))
}

/// Trims each line, collapses internal whitespace runs, and squeezes blank
/// runs down to single blank lines.
fn normalize_whitespace(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_blank_run = true;

    for line in raw.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !in_blank_run {
                lines.push(String::new());
                in_blank_run = true;
            }
        } else {
            lines.push(collapsed);
            in_blank_run = false;
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
