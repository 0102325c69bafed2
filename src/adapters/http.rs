//! HTTP fetching with an optional on-disk response cache.

use crate::domain::ports::PageFetcher;
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("docs-scraper/", env!("CARGO_PKG_VERSION"));
const BODY_EXT: &str = "body";
const META_EXT: &str = "json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub size: usize,
}

/// Response bodies stored as `<sha256(url)>.body` with a JSON sidecar.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key(url: &Url) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn entry_path(&self, url: &Url, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", Self::key(url), ext))
    }

    pub fn get(&self, url: &Url) -> Option<String> {
        let path = self.entry_path(url, BODY_EXT);
        match fs::read(&path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn metadata(&self, url: &Url) -> Option<CacheMetadata> {
        let raw = fs::read(self.entry_path(url, META_EXT)).ok()?;
        serde_json::from_slice(&raw).ok()
    }

    pub fn put(&self, url: &Url, body: &str) -> Result<()> {
        fs::write(self.entry_path(url, BODY_EXT), body.as_bytes())?;
        let meta = CacheMetadata {
            url: url.to_string(),
            fetched_at: Utc::now(),
            size: body.len(),
        };
        fs::write(
            self.entry_path(url, META_EXT),
            serde_json::to_vec_pretty(&meta)?,
        )?;
        Ok(())
    }

    /// Removes every cached entry; returns how many responses were dropped.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if ext == Some(BODY_EXT) {
                removed += 1;
            }
            if matches!(ext, Some(BODY_EXT) | Some(META_EXT)) {
                fs::remove_file(&path)?;
            }
        }
        Ok(removed)
    }
}

pub struct HttpFetcher {
    client: Client,
    cache: Option<ResponseCache>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, cache: Option<ResponseCache>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::ConfigError {
                message: format!("Cannot build HTTP client: {}", e),
            })?;
        Ok(Self { client, cache })
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);
        let fetch_err = |source: reqwest::Error| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(fetch_err)?;
        let status = response.status();
        tracing::debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(fetch_err)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        if let Some(body) = self.cache.as_ref().and_then(|cache| cache.get(url)) {
            tracing::debug!("Cache hit: {}", url);
            return Ok(body);
        }

        // 一律以 UTF-8 解碼
        let body = String::from_utf8_lossy(&self.get(url).await?).into_owned();

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &body) {
                tracing::warn!("Could not cache {}: {}", url, e);
            }
        }
        Ok(body)
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        self.get(url).await
    }
}
