use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Where `path` ends up once written, for logging.
    fn location(&self, path: &str) -> PathBuf;
}

/// Retrieves page content by URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Page body decoded as UTF-8.
    async fn fetch_text(&self, url: &Url) -> Result<String>;

    /// Raw body, never served from a cache.
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Yields the status a proposal declares on its own detail page.
#[async_trait]
pub trait DetailStatusSource: Send + Sync {
    async fn detail_status(&self, url: &Url) -> Result<String>;
}
