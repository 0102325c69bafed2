use crate::core::report::OutputMode;
use crate::domain::model::ExpectedStatusTable;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_status_code, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Optional settings file; every section and key may be omitted.
///
/// ```toml
/// [source]
/// docs_url = "https://docs.python.org/3/"
/// pep_url = "https://peps.python.org/"
/// timeout_seconds = 30
///
/// [output]
/// format = "pretty"
/// results_dir = "results"
/// downloads_dir = "downloads"
///
/// [expected_status]
/// A = ["Active", "Accepted"]
/// "" = ["Draft", "Active"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub output: Option<OutputConfig>,
    /// Replaces the built-in table entirely when present.
    pub expected_status: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub docs_url: Option<String>,
    pub pep_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputMode>,
    pub results_dir: Option<String>,
    pub downloads_dir: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScrapeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn source(&self) -> SourceConfig {
        self.source.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    pub fn expected_status_table(&self) -> Option<ExpectedStatusTable> {
        self.expected_status.clone().map(ExpectedStatusTable::new)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let source = self.source();
        if let Some(url) = &source.docs_url {
            validate_url("source.docs_url", url)?;
        }
        if let Some(url) = &source.pep_url {
            validate_url("source.pep_url", url)?;
        }
        if let Some(timeout) = source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }

        let output = self.output();
        if let Some(dir) = &output.results_dir {
            validate_path("output.results_dir", dir)?;
        }
        if let Some(dir) = &output.downloads_dir {
            validate_path("output.downloads_dir", dir)?;
        }

        if let Some(table) = &self.expected_status {
            if table.is_empty() {
                return Err(ScrapeError::ValidationError {
                    message: "[expected_status] must list at least one status code".to_string(),
                });
            }
            for (code, names) in table {
                validate_status_code("expected_status", code)?;
                if names.is_empty() {
                    return Err(ScrapeError::ValidationError {
                        message: format!("expected_status.{:?} has no accepted statuses", code),
                    });
                }
                for name in names {
                    validate_non_empty_string("expected_status", name)?;
                }
            }
        }
        Ok(())
    }
}
