use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No Title Provided";
pub const NO_RELATIONSHIPS: &str = "No Relationship Tags";
pub const NO_CHARACTERS: &str = "No Character Tags";
pub const NO_FREEFORMS: &str = "No Freeform Tags";
pub const NO_SUMMARY: &str = "No Summary Provided";
pub const NO_NOTES: &str = "No Notes Provided";
pub const ANONYMOUS: &str = "Anonymous";
/// Last path segment of the fallback href used when a title link has none.
pub const MISSING_WORK_ID: &str = "404";

/// One entry of a tag's work listing.
///
/// Every field is populated: absent optional data is replaced by the
/// matching sentinel constant above, absent required data fails extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSummary {
    pub title: String,
    pub authors: Vec<String>,
    pub work_id: String,
    pub fandoms: Vec<String>,
    pub warnings: Vec<String>,
    pub relationships: Vec<String>,
    pub characters: Vec<String>,
    pub tags: Vec<String>,
    pub summary: String,
    pub word_count: String,
}

/// [`WorkSummary`] with every list joined for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatWorkSummary {
    pub title: String,
    pub authors: String,
    pub work_id: String,
    pub fandoms: String,
    pub warnings: String,
    pub relationships: String,
    pub characters: String,
    pub tags: String,
    pub summary: String,
    pub word_count: String,
}

/// A single work page. `text` is the body's inner HTML until it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDetail {
    pub title: String,
    pub authors: String,
    pub summary: String,
    pub notes: String,
    pub text: String,
}

impl From<&WorkSummary> for FlatWorkSummary {
    fn from(work: &WorkSummary) -> Self {
        Self {
            title: work.title.clone(),
            authors: work.authors.join(", "),
            work_id: work.work_id.clone(),
            fandoms: work.fandoms.join(", "),
            warnings: work.warnings.join(", "),
            // Relationship tags are the ones that routinely carry a raw `&amp;`.
            relationships: work.relationships.join(", ").replace("&amp;", "&"),
            characters: work.characters.join(", "),
            tags: work.tags.join(", "),
            summary: work.summary.clone(),
            word_count: work.word_count.clone(),
        }
    }
}

pub fn project(works: &[WorkSummary]) -> Vec<FlatWorkSummary> {
    works.iter().map(FlatWorkSummary::from).collect()
}
