use crate::core::dispatch::Mode;
use crate::core::report::OutputMode;
use crate::domain::model::ExpectedStatusTable;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_range, validate_status_code, validate_url, Validate,
};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_URL: &str = "https://peps.python.org/";

pub const RESULTS_DIR: &str = "results";
pub const DOWNLOADS_DIR: &str = "downloads";
pub const CACHE_DIR: &str = ".http_cache";
pub const LOGS_DIR: &str = "logs";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// What the scraping modes need: where to look and what to expect.
#[derive(Debug, Clone)]
pub struct Settings {
    pub docs_url: Url,
    pub pep_url: Url,
    pub expected_status: ExpectedStatusTable,
    pub show_progress: bool,
}

impl Settings {
    pub fn new(docs_url: Url, pep_url: Url) -> Self {
        Self {
            docs_url,
            pep_url,
            expected_status: ExpectedStatusTable::default(),
            show_progress: false,
        }
    }

    /// The public documentation and proposal sites.
    pub fn python_org() -> Result<Self> {
        Ok(Self::new(base_url(MAIN_DOC_URL)?, base_url(PEP_URL)?))
    }
}

/// Parses a site root; the path always ends in `/` so relative links join under it.
pub fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: Mode,
    pub settings: Settings,
    pub output: OutputMode,
    pub results_dir: PathBuf,
    pub downloads_dir: PathBuf,
    /// `None` disables the response cache.
    pub cache_dir: Option<PathBuf>,
    pub clear_cache: bool,
    pub timeout: Duration,
}

impl RunConfig {
    pub fn new(mode: Mode, settings: Settings) -> Self {
        Self {
            mode,
            settings,
            output: OutputMode::default(),
            results_dir: PathBuf::from(RESULTS_DIR),
            downloads_dir: PathBuf::from(DOWNLOADS_DIR),
            cache_dir: Some(PathBuf::from(CACHE_DIR)),
            clear_cache: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_url("docs_url", self.settings.docs_url.as_str())?;
        validate_url("pep_url", self.settings.pep_url.as_str())?;
        validate_path("results_dir", &self.results_dir.to_string_lossy())?;
        validate_path("downloads_dir", &self.downloads_dir.to_string_lossy())?;
        if let Some(cache_dir) = &self.cache_dir {
            validate_path("cache_dir", &cache_dir.to_string_lossy())?;
        }
        validate_range("timeout_seconds", self.timeout.as_secs(), 1, 600)?;
        for code in self.settings.expected_status.codes() {
            validate_status_code("expected_status", code)?;
        }
        Ok(())
    }
}
