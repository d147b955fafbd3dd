use reqwest::Client;
use url::Url;

use crate::config::ArchiveClientConfig;
use crate::error::{ArchiveError, Result};
use crate::formats::{FlatWorkSummary, WorkDetail, WorkSummary, project};
use crate::listing::classify_listing;
use crate::render::{render_html, render_markdown};
use crate::work::extract_work;

/// Result of [`ArchiveClient::test_connection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub status: u16,
    pub success: bool,
}

/// Client for one OTW-archive instance. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    http: Client,
    base_url: Url,
}

impl ArchiveClient {
    pub fn new(config: &ArchiveClientConfig) -> Result<Self> {
        let validated = config.validate()?;

        let http = Client::builder()
            .timeout(validated.timeout)
            .user_agent(validated.user_agent)
            .build()
            .map_err(|err| ArchiveError::config(format!("build http client: {err}")))?;

        Ok(Self {
            http,
            base_url: validated.base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn listing_url(&self, tag: &str, page: u32) -> String {
        format!(
            "{}tags/{}/works?page={page}",
            self.base_url,
            urlencoding::encode(tag)
        )
    }

    #[must_use]
    pub fn tag_identity_url(&self, tag: &str, page: u32) -> String {
        format!(
            "{}tags/{}?page={page}",
            self.base_url,
            urlencoding::encode(tag)
        )
    }

    #[must_use]
    pub fn work_url(&self, work_id: &str) -> String {
        format!("{}works/{work_id}", self.base_url)
    }

    /// GETs the archive root. Any HTTP answer is reported; only transport
    /// failures are errors.
    pub async fn test_connection(&self) -> Result<ConnectionStatus> {
        let url = self.base_url.as_str();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ArchiveError::transport(url, err))?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "connection test answered");
        Ok(ConnectionStatus {
            status: status.as_u16(),
            success: status.is_success(),
        })
    }

    /// Works listed under `tag` on the given 1-based page.
    pub async fn get_listing(&self, tag: &str, page: u32) -> Result<Vec<WorkSummary>> {
        if tag.is_empty() {
            return Err(ArchiveError::argument("tag", "tag name cannot be empty"));
        }
        if page == 0 {
            return Err(ArchiveError::argument("page", "pages are numbered from 1"));
        }

        let works_url = self.listing_url(tag, page);
        let identity_url = self.tag_identity_url(tag, page);
        let (works_page, identity_page) =
            tokio::join!(self.fetch(&works_url), self.fetch(&identity_url));
        let (works_page, identity_page) = (works_page?, identity_page?);

        let context = format!("tag {tag:?} page {page}");
        let listing =
            classify_listing(&works_page, &identity_page).map_err(|err| err.within(&context))?;
        let layout = listing.layout();
        let works = listing.into_works().map_err(|err| err.within(&context))?;

        tracing::info!(tag, page, ?layout, works = works.len(), "retrieved tag listing");
        Ok(works)
    }

    /// [`Self::get_listing`] with every record flattened for display.
    pub async fn get_listing_flat(&self, tag: &str, page: u32) -> Result<Vec<FlatWorkSummary>> {
        let works = self.get_listing(tag, page).await?;
        Ok(project(&works))
    }

    pub async fn get_work_detail(&self, work_id: &str) -> Result<WorkDetail> {
        if work_id.trim().is_empty() {
            return Err(ArchiveError::argument("work_id", "work id cannot be empty"));
        }

        let url = self.work_url(work_id);
        let page = self.fetch(&url).await?;
        let work = extract_work(&page).map_err(|err| err.within(&format!("work {work_id}")))?;

        tracing::info!(work_id, title = %work.title, "retrieved work");
        Ok(work)
    }

    pub async fn get_work_markdown(&self, work_id: &str) -> Result<String> {
        let work = self.get_work_detail(work_id).await?;
        render_markdown(work)
    }

    pub async fn get_work_html(&self, work_id: &str) -> Result<String> {
        let work = self.get_work_detail(work_id).await?;
        Ok(render_html(&work))
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ArchiveError::transport(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::status(url, status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| ArchiveError::transport(url, err))?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(archive_path: &str) -> anyhow::Result<ArchiveClient> {
        let config = ArchiveClientConfig::new("ReaderApp", "0.5.0").with_archive_path(archive_path);
        Ok(ArchiveClient::new(&config)?)
    }

    #[test]
    fn urls_follow_archive_routes() -> anyhow::Result<()> {
        let client = client("https://archive.example.org")?;

        assert_eq!(
            client.listing_url("Ada/Bell & Co", 2),
            "https://archive.example.org/tags/Ada%2FBell%20%26%20Co/works?page=2"
        );
        assert_eq!(
            client.tag_identity_url("Fluff", 1),
            "https://archive.example.org/tags/Fluff?page=1"
        );
        assert_eq!(
            client.work_url("4821"),
            "https://archive.example.org/works/4821"
        );
        Ok(())
    }

    #[test]
    fn mirror_path_is_kept() -> anyhow::Result<()> {
        let client = client("http://localhost:3000/otw")?;

        assert_eq!(client.work_url("1"), "http://localhost:3000/otw/works/1");
        Ok(())
    }

    #[test]
    fn ftp_path_fails_construction() {
        let err = client("ftp://example.com").unwrap_err();
        let err = err.downcast::<ArchiveError>().expect("archive error");
        assert!(matches!(err, ArchiveError::Config { .. }));
    }

    #[tokio::test]
    async fn empty_arguments_are_rejected_before_any_request() -> anyhow::Result<()> {
        let client = client("http://127.0.0.1:9")?;

        let err = client.get_listing("", 1).await.unwrap_err();
        assert!(matches!(err, ArchiveError::Argument { name: "tag", .. }));

        let err = client.get_listing("Fluff", 0).await.unwrap_err();
        assert!(matches!(err, ArchiveError::Argument { name: "page", .. }));

        let err = client.get_work_markdown("").await.unwrap_err();
        assert!(matches!(err, ArchiveError::Argument { name: "work_id", .. }));
        Ok(())
    }
}
