use crate::config::settings::{
    base_url, RunConfig, Settings, CACHE_DIR, DEFAULT_TIMEOUT_SECONDS, DOWNLOADS_DIR, LOGS_DIR,
    MAIN_DOC_URL, PEP_URL, RESULTS_DIR,
};
use crate::config::toml_config::TomlConfig;
use crate::core::dispatch::Mode;
use crate::core::report::OutputMode;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "docs-scraper")]
#[command(about = "Scrapes the Python documentation and PEP index into reports")]
pub struct CliConfig {
    /// Parser mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Additional output format (defaults to plain console output)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,

    /// Directory for CSV results [default: results]
    #[arg(long)]
    pub results_dir: Option<String>,

    /// Directory for downloaded archives [default: downloads]
    #[arg(long)]
    pub downloads_dir: Option<String>,

    #[arg(long, default_value = CACHE_DIR)]
    pub cache_dir: String,

    /// Always go to the network
    #[arg(long)]
    pub no_cache: bool,

    #[arg(long, default_value = LOGS_DIR)]
    pub log_dir: String,

    /// TOML settings file
    #[arg(long)]
    pub config: Option<String>,

    /// Documentation site root [default: https://docs.python.org/3/]
    #[arg(long)]
    pub docs_url: Option<String>,

    /// PEP index root [default: https://peps.python.org/]
    #[arg(long)]
    pub pep_url: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Log as JSON lines instead of the compact console format
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.log_dir)
    }

    fn settings_file(&self) -> Result<TomlConfig> {
        let Some(path) = &self.config else {
            return Ok(TomlConfig::default());
        };
        tracing::info!("Loading settings from {}", path);
        let file = TomlConfig::from_file(path)?;
        file.validate()?;
        Ok(file)
    }

    /// Command-line flags win over the settings file, which wins over defaults.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let file = self.settings_file()?;
        let source = file.source();
        let output = file.output();

        let docs_url = self
            .docs_url
            .as_deref()
            .or(source.docs_url.as_deref())
            .unwrap_or(MAIN_DOC_URL);
        let pep_url = self
            .pep_url
            .as_deref()
            .or(source.pep_url.as_deref())
            .unwrap_or(PEP_URL);

        let mut settings = Settings::new(base_url(docs_url)?, base_url(pep_url)?);
        if let Some(table) = file.expected_status_table() {
            settings.expected_status = table;
        }
        settings.show_progress = !self.no_progress;

        let mut config = RunConfig::new(self.mode, settings);
        config.output = self.output.or(output.format).unwrap_or_default();
        config.results_dir = self
            .results_dir
            .or(output.results_dir)
            .unwrap_or_else(|| RESULTS_DIR.to_string())
            .into();
        config.downloads_dir = self
            .downloads_dir
            .or(output.downloads_dir)
            .unwrap_or_else(|| DOWNLOADS_DIR.to_string())
            .into();
        config.cache_dir = (!self.no_cache).then(|| PathBuf::from(self.cache_dir));
        config.clear_cache = self.clear_cache;
        config.timeout = Duration::from_secs(
            self.timeout_seconds
                .or(source.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        );
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("log_dir", &self.log_dir)?;
        validate_path("cache_dir", &self.cache_dir)?;
        Ok(())
    }
}
