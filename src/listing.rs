//! Work listings on tag pages.
//!
//! A canonical tag renders its works as an ordered index directly under
//! `#main` on `/tags/{tag}/works`. A tag that has not been canonicalized has
//! no such page; its works only show up in the listbox of the tag profile at
//! `/tags/{tag}`. Which of the two applies is only knowable by looking, so the
//! canonical layout is probed first and the profile layout second.

use scraper::{ElementRef, Html, Selector};

use crate::dom::{all_texts, child_elements, first_text, selector, text_of};
use crate::error::{ArchiveError, Result};
use crate::formats::{
    ANONYMOUS, MISSING_WORK_ID, NO_CHARACTERS, NO_FREEFORMS, NO_RELATIONSHIPS, NO_SUMMARY,
    NO_TITLE, WorkSummary,
};

const CANONICAL_INDEX: &str = r#"html > body > div#outer > div#inner > div#main > ol[class="work index group"]"#;
const PROFILE_INDEX: &str = r#"html > body > div#outer > div#inner > div#main > div[class="tag home profile"] > div[class="work listbox group"] > ul[class="index group"]"#;

const TITLE_LINK: &str = r#"div[class="header module"] > h4[class="heading"] > a:not([rel="author"])"#;
const AUTHOR_LINKS: &str = r#"div[class="header module"] > h4[class="heading"] > a[rel="author"]"#;
const FANDOM_LINKS: &str = r#"div > h5 > a[class="tag"]"#;
const WARNING_LINKS: &str =
    r#"ul[class="tags commas"] > li[class="warnings"] > strong > a[class="tag"]"#;
const RELATIONSHIP_LINKS: &str = r#"ul[class="tags commas"] > li[class="relationships"] > a[class="tag"]"#;
const CHARACTER_LINKS: &str = r#"ul[class="tags commas"] > li[class="characters"] > a[class="tag"]"#;
const FREEFORM_LINKS: &str = r#"ul[class="tags commas"] > li[class="freeforms"] > a[class="tag"]"#;
const SUMMARY_PARAGRAPH: &str = r#"blockquote[class="userstuff summary"] > p"#;
const WORD_COUNT: &str = r#"dl[class="stats"] > dd[class="words"]"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Canonical,
    NonCanonical,
}

/// Outcome of probing both page layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Canonical(Vec<WorkSummary>),
    NonCanonical(Vec<WorkSummary>),
    Neither,
}

impl Listing {
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        match self {
            Self::Canonical(_) => Some(Layout::Canonical),
            Self::NonCanonical(_) => Some(Layout::NonCanonical),
            Self::Neither => None,
        }
    }

    pub fn into_works(self) -> Result<Vec<WorkSummary>> {
        match self {
            Self::Canonical(works) | Self::NonCanonical(works) => Ok(works),
            Self::Neither => Err(ArchiveError::extraction(
                "tag listing",
                "no works found: the tag is neither canonical nor non-canonical, \
                 does not exist, or the page is past the last one",
            )),
        }
    }
}

struct EntrySelectors {
    title: Selector,
    authors: Selector,
    fandoms: Selector,
    warnings: Selector,
    relationships: Selector,
    characters: Selector,
    freeforms: Selector,
    summary: Selector,
    word_count: Selector,
}

impl EntrySelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            title: selector(TITLE_LINK)?,
            authors: selector(AUTHOR_LINKS)?,
            fandoms: selector(FANDOM_LINKS)?,
            warnings: selector(WARNING_LINKS)?,
            relationships: selector(RELATIONSHIP_LINKS)?,
            characters: selector(CHARACTER_LINKS)?,
            freeforms: selector(FREEFORM_LINKS)?,
            summary: selector(SUMMARY_PARAGRAPH)?,
            word_count: selector(WORD_COUNT)?,
        })
    }
}

/// Tries the canonical layout on `works_html`, then the tag-profile layout on
/// `tag_identity_html`. The second document is only parsed when the first
/// probe fails.
pub fn classify_listing(works_html: &str, tag_identity_html: &str) -> Result<Listing> {
    let selectors = EntrySelectors::new()?;

    let works_page = Html::parse_document(works_html);
    if let Some(index) = probe(&works_page, CANONICAL_INDEX, &selectors)? {
        let works = extract_entries(index, &selectors)?;
        tracing::debug!(works = works.len(), "extracted canonical tag listing");
        return Ok(Listing::Canonical(works));
    }

    tracing::debug!("canonical work index not usable; trying tag profile layout");
    let identity_page = Html::parse_document(tag_identity_html);
    if let Some(index) = probe(&identity_page, PROFILE_INDEX, &selectors)? {
        let works = extract_entries(index, &selectors)?;
        tracing::debug!(works = works.len(), "extracted non-canonical tag listing");
        return Ok(Listing::NonCanonical(works));
    }

    Ok(Listing::Neither)
}

pub fn extract_listing(works_html: &str, tag_identity_html: &str) -> Result<Vec<WorkSummary>> {
    classify_listing(works_html, tag_identity_html)?.into_works()
}

/// Returns the index container when it exists and its first entry has a
/// readable title.
fn probe<'a>(
    page: &'a Html,
    index_css: &str,
    selectors: &EntrySelectors,
) -> Result<Option<ElementRef<'a>>> {
    let index_selector = selector(index_css)?;
    let Some(index) = page.select(&index_selector).next() else {
        tracing::debug!(index = index_css, "work index not present");
        return Ok(None);
    };
    let Some(first_entry) = child_elements(index, "li").next() else {
        tracing::debug!(index = index_css, "work index has no entries");
        return Ok(None);
    };
    if first_text(&first_entry, &selectors.title).is_none() {
        tracing::debug!(index = index_css, "first entry has no readable title");
        return Ok(None);
    }
    Ok(Some(index))
}

fn extract_entries(index: ElementRef<'_>, selectors: &EntrySelectors) -> Result<Vec<WorkSummary>> {
    child_elements(index, "li")
        .enumerate()
        .map(|(position, entry)| extract_entry(entry, position + 1, selectors))
        .collect()
}

fn extract_entry(
    entry: ElementRef<'_>,
    position: usize,
    selectors: &EntrySelectors,
) -> Result<WorkSummary> {
    let title_link = entry.select(&selectors.title).next();
    let title = title_link
        .map(|link| text_of(&link))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_owned());
    let work_id = title_link
        .and_then(|link| link.value().attr("href"))
        .map_or(MISSING_WORK_ID, work_id_from_href)
        .to_owned();

    let context = format!("work entry {position} (id {work_id})");

    Ok(WorkSummary {
        title,
        authors: or_sentinel(all_texts(&entry, &selectors.authors), ANONYMOUS),
        work_id,
        fandoms: required(all_texts(&entry, &selectors.fandoms), &context, "fandom tags")?,
        warnings: required(
            all_texts(&entry, &selectors.warnings),
            &context,
            "archive warning tags",
        )?,
        relationships: or_sentinel(
            all_texts(&entry, &selectors.relationships),
            NO_RELATIONSHIPS,
        ),
        characters: or_sentinel(all_texts(&entry, &selectors.characters), NO_CHARACTERS),
        tags: or_sentinel(all_texts(&entry, &selectors.freeforms), NO_FREEFORMS),
        summary: first_text(&entry, &selectors.summary).unwrap_or_else(|| NO_SUMMARY.to_owned()),
        word_count: first_text(&entry, &selectors.word_count)
            .ok_or_else(|| ArchiveError::extraction(&context, "missing word count"))?,
    })
}

/// Last `/`-delimited segment, e.g. `/works/123` -> `123`.
fn work_id_from_href(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or_default()
}

fn or_sentinel(values: Vec<String>, sentinel: &str) -> Vec<String> {
    if values.is_empty() {
        vec![sentinel.to_owned()]
    } else {
        values
    }
}

fn required(values: Vec<String>, context: &str, what: &str) -> Result<Vec<String>> {
    if values.is_empty() {
        return Err(ArchiveError::extraction(context, format!("missing {what}")));
    }
    Ok(values)
}
