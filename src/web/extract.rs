//! Main-body text extraction from blog HTML.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Containers commonly holding the article body, tried in order.
const CONTENT_SELECTORS: &[&str] = &[
    "article.content",
    "article.post-content",
    "div.entry-content",
    "div.post-content",
    "div.blog-content",
    "div.main-content",
    "main#content",
];

/// Elements whose text never belongs in the article.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Extract the readable article text from a blog page.
///
/// Text from every element matching a known content selector is collected,
/// duplicates removed. Without any match the whole `<body>` is used. Returns
/// `None` when nothing readable is left.
pub fn extract_blog_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let mut parts: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for selector in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector) else { continue };
        for element in document.select(&selector) {
            let text = element_text(element);
            if seen.insert(text.clone()) {
                parts.push(text);
            }
        }
    }

    if parts.is_empty() {
        warn!("No specific content elements found. Extracting text from body.");
        let body = Selector::parse("body").ok().and_then(|sel| document.select(&sel).next());
        match body {
            Some(body) => parts.push(element_text(body)),
            None => {
                warn!("No <body> found in page.");
                return None;
            }
        }
    }

    let text = parts.join("\n\n").trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Trimmed, non-empty text nodes of `element` (minus script/style), one per line.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| a.value().as_element().is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name())));
            if hidden {
                return None;
            }
            let text = text.trim();
            (!text.is_empty()).then_some(text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
