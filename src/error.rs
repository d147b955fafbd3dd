use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Failures surfaced by the archive client.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Bad base path or identification header at construction time.
    #[error("invalid archive client configuration: {reason}")]
    Config { reason: String },

    /// Caller passed an unusable argument (empty tag, empty work id, page 0).
    #[error("invalid argument `{name}`: {reason}")]
    Argument { name: &'static str, reason: String },

    /// Non-success HTTP status or transport failure.
    #[error("request to {url} failed: {reason}")]
    Network {
        url: String,
        reason: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A node the archive markup is assumed to guarantee was not found.
    #[error("could not extract {context}: {reason}")]
    Extraction { context: String, reason: String },
}

impl ArchiveError {
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Argument {
            name,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn status(url: &str, status: reqwest::StatusCode) -> Self {
        let reason = match status.canonical_reason() {
            Some(phrase) => format!("{} {phrase}", status.as_u16()),
            None => status.as_u16().to_string(),
        };
        Self::Network {
            url: url.to_owned(),
            reason,
            source: None,
        }
    }

    #[must_use]
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        let reason = if source.is_timeout() {
            "request timed out".to_owned()
        } else if source.is_connect() {
            "could not connect".to_owned()
        } else {
            "transport error".to_owned()
        };
        Self::Network {
            url: url.to_owned(),
            reason,
            source: Some(source),
        }
    }

    #[must_use]
    pub fn extraction(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an extraction failure with the operation that triggered it.
    #[must_use]
    pub(crate) fn within(self, outer: &str) -> Self {
        match self {
            Self::Extraction { context, reason } => Self::Extraction {
                context: format!("{outer}: {context}"),
                reason,
            },
            other => other,
        }
    }
}
