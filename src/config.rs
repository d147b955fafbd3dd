use std::time::Duration;

use reqwest::header::HeaderValue;
use url::Url;

use crate::error::{ArchiveError, Result};

pub const DEFAULT_ARCHIVE_PATH: &str = "https://archiveofourown.org/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one [`crate::client::ArchiveClient`].
///
/// OTW-archive is open source and hosted by more than one site, so the base
/// path is configurable. Nothing is checked until [`Self::validate`] runs
/// (which [`crate::client::ArchiveClient::new`] does).
#[derive(Debug, Clone)]
pub struct ArchiveClientConfig {
    pub app_name: String,
    pub app_version: String,
    pub archive_path: String,
    pub timeout: Duration,
}

/// A config that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub base_url: Url,
    pub user_agent: HeaderValue,
    pub timeout: Duration,
}

impl ArchiveClientConfig {
    #[must_use]
    pub fn new(app_name: impl Into<String>, app_version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            app_version: app_version.into(),
            archive_path: DEFAULT_ARCHIVE_PATH.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_archive_path(mut self, archive_path: impl Into<String>) -> Self {
        self.archive_path = archive_path.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<ValidatedConfig> {
        let base_url = normalize_archive_path(&self.archive_path)?;
        let user_agent = identification_header(&self.app_name, &self.app_version)?;
        if self.timeout.is_zero() {
            return Err(ArchiveError::config("timeout must be greater than zero"));
        }

        Ok(ValidatedConfig {
            base_url,
            user_agent,
            timeout: self.timeout,
        })
    }
}

/// Requires an `http://`/`https://` prefix and appends the trailing slash
/// the URL templates rely on.
pub fn normalize_archive_path(archive_path: &str) -> Result<Url> {
    if !(archive_path.starts_with("https://") || archive_path.starts_with("http://")) {
        return Err(ArchiveError::config(format!(
            "archive path must start with http:// or https://: {archive_path}"
        )));
    }

    let mut normalized = archive_path.to_owned();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    let url = Url::parse(&normalized).map_err(|err| {
        ArchiveError::config(format!("archive path is not a valid url ({err}): {archive_path}"))
    })?;
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ArchiveError::config(format!(
            "archive path must not carry a query or fragment: {archive_path}"
        )));
    }

    Ok(url)
}

/// Builds the `User-Agent` value `{app_name}/{app_version}`.
pub fn identification_header(app_name: &str, app_version: &str) -> Result<HeaderValue> {
    ensure_token("app name", app_name)?;
    ensure_token("app version", app_version)?;

    HeaderValue::from_str(&format!("{app_name}/{app_version}")).map_err(|err| {
        ArchiveError::config(format!("identification header is not a valid header value: {err}"))
    })
}

// RFC 9110 token characters.
fn is_tchar(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

fn ensure_token(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ArchiveError::config(format!("{what} must not be empty")));
    }
    if let Some(bad) = value.chars().find(|ch| !is_tchar(*ch)) {
        return Err(ArchiveError::config(format!(
            "{what} {value:?} contains {bad:?}, which is not allowed in a User-Agent product token"
        )));
    }
    Ok(())
}
