//! Tagged-region extraction over plain substring search.
//!
//! Matching is exact and case-sensitive. The first opening tag wins and the
//! block ends at the first closing tag after it; blocks are never nested.

use super::DirectiveKind;

/// Returns the trimmed text between `<tag>` and the first `</tag>` that
/// follows it, or `None` when either tag is missing.
pub fn extract_block<'a>(text: &'a str, opening_tag: &str, closing_tag: &str) -> Option<&'a str> {
    let start = text.find(opening_tag)? + opening_tag.len();
    let end = start + text[start..].find(closing_tag)?;
    Some(text[start..end].trim())
}

pub fn extract_directive(text: &str, kind: DirectiveKind) -> Option<&str> {
    let (opening_tag, closing_tag) = (kind.opening_tag()?, kind.closing_tag()?);
    extract_block(text, opening_tag, closing_tag)
}

/// True iff at least one recognized opening tag occurs anywhere in `text`.
pub fn contains_directive(text: &str) -> bool {
    DirectiveKind::RECOGNIZED
        .iter()
        .filter_map(DirectiveKind::opening_tag)
        .any(|opening_tag| text.contains(opening_tag))
}

/// First complete directive block in priority order.
pub fn detect(text: &str) -> Option<(DirectiveKind, &str)> {
    DirectiveKind::RECOGNIZED
        .into_iter()
        .find_map(|kind| extract_directive(text, kind).map(|block| (kind, block)))
}
