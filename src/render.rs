use crate::error::{ArchiveError, Result};
use crate::formats::WorkDetail;

/// Replaces `detail.text` (HTML) with its Markdown conversion.
pub fn convert_text_to_markdown(detail: &mut WorkDetail) -> Result<()> {
    if detail.text.trim().is_empty() {
        return Err(ArchiveError::argument("text", "HTML content cannot be empty"));
    }
    detail.text = html2md::parse_html(&detail.text);
    Ok(())
}

pub fn render_markdown(mut detail: WorkDetail) -> Result<String> {
    convert_text_to_markdown(&mut detail)?;

    let WorkDetail {
        title,
        authors,
        summary,
        notes,
        text,
    } = detail;
    Ok(format!(
        "# {title}\n\n**Authors:** {authors}\n\n## Summary\n{summary}\n\n## Notes\n{notes}\n\n{text}"
    ))
}

/// Minimal standalone document. Fields are embedded verbatim: the body is
/// already HTML, and the preface fields are not escaped.
#[must_use]
pub fn render_html(detail: &WorkDetail) -> String {
    let WorkDetail {
        title,
        authors,
        summary,
        notes,
        text,
    } = detail;
    format!(
        "<html>\n<head>\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n\
         <p><strong>Authors:</strong> {authors}</p>\n<h2>Summary</h2>\n<p>{summary}</p>\n\
         <h2>Notes</h2>\n<p>{notes}</p>\n<h2>Content</h2>\n{text}\n</body>\n</html>"
    )
}
