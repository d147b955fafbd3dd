use scraper::Html;

use crate::dom::{all_texts, first_text, selector};
use crate::error::{ArchiveError, Result};
use crate::formats::{ANONYMOUS, NO_NOTES, NO_SUMMARY, WorkDetail};

const WORK_SKIN: &str = r#"html > body > div#outer > div#inner > div#main > div#workskin"#;
const TITLE: &str = r#"div[class="preface group"] > h2[class="title heading"]"#;
const AUTHOR_LINKS: &str = r#"div[class="preface group"] > h3[class="byline heading"] > a[rel="author"]"#;
const SUMMARY: &str =
    r#"div[class="preface group"] > div[class="summary module"] > blockquote[class="userstuff"]"#;
const NOTES: &str =
    r#"div[class="preface group"] > div[class="notes module"] > blockquote[class="userstuff"]"#;
const SINGLE_CHAPTER_BODY: &str = r#"div#chapters > div[class="userstuff"]"#;
const CHAPTER_MODULE_BODIES: &str = r#"div#chapters > div.chapter > div[class="userstuff module"]"#;

const CONTEXT: &str = "work page";

/// Pulls the preface fields and body markup out of a `/works/{id}` page.
pub fn extract_work(page_html: &str) -> Result<WorkDetail> {
    let page = Html::parse_document(page_html);

    let work_skin = page.select(&selector(WORK_SKIN)?).next().ok_or_else(|| {
        ArchiveError::extraction(
            CONTEXT,
            "work content not found; the work may not exist or the id is wrong",
        )
    })?;

    let title = first_text(&work_skin, &selector(TITLE)?)
        .ok_or_else(|| ArchiveError::extraction(CONTEXT, "missing work title"))?;

    let authors = all_texts(&work_skin, &selector(AUTHOR_LINKS)?);
    let authors = if authors.is_empty() {
        ANONYMOUS.to_owned()
    } else {
        authors.join(", ")
    };

    let summary =
        first_text(&work_skin, &selector(SUMMARY)?).unwrap_or_else(|| NO_SUMMARY.to_owned());
    let notes = first_text(&work_skin, &selector(NOTES)?).unwrap_or_else(|| NO_NOTES.to_owned());

    let text = match work_skin.select(&selector(SINGLE_CHAPTER_BODY)?).next() {
        Some(body) => body.inner_html().trim().to_owned(),
        None => work_skin
            .select(&selector(CHAPTER_MODULE_BODIES)?)
            .map(|body| body.inner_html().trim().to_owned())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    if text.is_empty() {
        return Err(ArchiveError::extraction(
            CONTEXT,
            "no content found; the work may not exist or the id is wrong",
        ));
    }

    tracing::debug!(title = %title, bytes = text.len(), "extracted work page");

    Ok(WorkDetail {
        title,
        authors,
        summary,
        notes,
        text,
    })
}
