//! Small helpers over `scraper` shared by the listing and work extractors.

use scraper::{ElementRef, Selector};

use crate::error::{ArchiveError, Result};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|err| ArchiveError::extraction("selector", format!("`{css}` is invalid: {err}")))
}

/// Concatenated descendant text, trimmed.
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Trimmed text of the first match, or `None` when nothing matches or the
/// match has no visible text.
pub fn first_text(scope: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|element| text_of(&element))
        .filter(|text| !text.is_empty())
}

/// Trimmed, non-empty texts of every match, in document order.
pub fn all_texts(scope: &ElementRef<'_>, selector: &Selector) -> Vec<String> {
    scope
        .select(selector)
        .map(|element| text_of(&element))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Direct element children with the given tag name.
pub fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}
