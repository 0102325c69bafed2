use crate::app::modes::{download, latest_versions, pep, whats_new};
use crate::config::settings::Settings;
use crate::domain::model::ReportTable;
use crate::domain::ports::{PageFetcher, Storage};
use crate::utils::error::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Mode {
    /// Release notes for every Python version
    WhatsNew,
    /// Documentation links with version status
    LatestVersions,
    /// Save the PDF (A4) documentation archive
    Download,
    /// Count proposals by status and flag mismatches
    Pep,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::WhatsNew, Mode::LatestVersions, Mode::Download, Mode::Pep];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs a mode against a fetcher; `downloads` receives saved archives.
pub struct ParserEngine<F: PageFetcher, S: Storage> {
    fetcher: F,
    downloads: S,
    settings: Settings,
}

impl<F: PageFetcher, S: Storage> ParserEngine<F, S> {
    pub fn new(fetcher: F, downloads: S, settings: Settings) -> Self {
        Self {
            fetcher,
            downloads,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// `download` yields no table; every other mode does.
    pub async fn dispatch(&self, mode: Mode) -> Result<Option<ReportTable>> {
        tracing::debug!("Dispatching mode {}", mode);
        match mode {
            Mode::WhatsNew => whats_new::whats_new(&self.fetcher, &self.settings)
                .await
                .map(Some),
            Mode::LatestVersions => latest_versions::latest_versions(&self.fetcher, &self.settings)
                .await
                .map(Some),
            Mode::Download => {
                download::download(&self.fetcher, &self.settings, &self.downloads).await?;
                Ok(None)
            }
            Mode::Pep => pep::pep(&self.fetcher, &self.settings).await.map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        let names: Vec<_> = Mode::ALL.iter().map(Mode::name).collect();
        assert_eq!(names, vec!["whats-new", "latest-versions", "download", "pep"]);
        assert_eq!(Mode::LatestVersions.to_string(), "latest-versions");
    }

    #[tokio::test]
    async fn test_dispatch_pep_returns_status_table() {
        use crate::adapters::storage::LocalStorage;
        use crate::app::modes::test_support::MockFetcher;

        let index = r#"<section id="numerical-index"><table><tbody>
            <tr><td><abbr>IF</abbr></td><td><a href="pep-0020/">20</a></td></tr>
            </tbody></table></section>"#;
        let detail = r#"<dl class="rfc2822 field-list">
            <dt>Status<span class="colon">:</span></dt><dd><abbr>Final</abbr></dd></dl>"#;
        let fetcher = MockFetcher::new()
            .page("https://peps.python.org/", index)
            .page("https://peps.python.org/pep-0020/", detail);
        let downloads = tempfile::TempDir::new().unwrap();
        let mut settings = Settings::python_org().unwrap();
        settings.show_progress = false;
        let engine = ParserEngine::new(fetcher, LocalStorage::new(downloads.path()), settings);

        let table = engine.dispatch(Mode::Pep).await.unwrap().unwrap();
        assert_eq!(table.header(), ["Status", "Count"]);
        assert_eq!(table.row(1).unwrap(), ["Final", "1"]);
        assert_eq!(table.row(2).unwrap(), ["Total", "1"]);
    }

    #[tokio::test]
    async fn test_dispatch_propagates_fetch_errors() {
        use crate::adapters::storage::LocalStorage;
        use crate::app::modes::test_support::MockFetcher;
        use crate::utils::error::ScrapeError;

        let downloads = tempfile::TempDir::new().unwrap();
        let engine = ParserEngine::new(
            MockFetcher::new(),
            LocalStorage::new(downloads.path()),
            Settings::python_org().unwrap(),
        );

        let err = engine.dispatch(Mode::Download).await.unwrap_err();
        assert!(matches!(err, ScrapeError::HttpStatus { status: 404, .. }));
        assert!(std::fs::read_dir(downloads.path()).unwrap().next().is_none());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_names_match_mode_names() {
        use clap::ValueEnum;
        for mode in Mode::ALL {
            let parsed = <Mode as ValueEnum>::from_str(mode.name(), false).unwrap();
            assert_eq!(parsed, mode);
        }
    }
}
