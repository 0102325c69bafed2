use crate::adapters::http::{HttpFetcher, ResponseCache};
use crate::adapters::storage::LocalStorage;
use crate::config::settings::RunConfig;
use crate::core::dispatch::ParserEngine;
use crate::core::report::control_output;
use crate::domain::model::ReportTable;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::PathBuf;

/// What a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub table: Option<ReportTable>,
    /// Set when the table was written to a results file.
    pub results_file: Option<PathBuf>,
}

fn open_cache(config: &RunConfig) -> Result<Option<ResponseCache>> {
    let Some(dir) = &config.cache_dir else {
        tracing::debug!("Response cache disabled");
        return Ok(None);
    };

    let cache = ResponseCache::open(dir)?;
    if config.clear_cache {
        let removed = cache.clear()?;
        tracing::info!("Cleared {} cached responses from {}", removed, dir.display());
    }
    Ok(Some(cache))
}

/// Validates `config`, runs its mode and emits the resulting table.
pub async fn run(config: &RunConfig) -> Result<RunOutcome> {
    config.validate()?;

    let fetcher = HttpFetcher::new(config.timeout, open_cache(config)?)?;
    let engine = ParserEngine::new(
        fetcher,
        LocalStorage::new(&config.downloads_dir),
        config.settings.clone(),
    );

    let table = engine.dispatch(config.mode).await?;

    let results_file = match &table {
        Some(table) => {
            let results = LocalStorage::new(&config.results_dir);
            control_output(table, config.output, config.mode.name(), &results).await?
        }
        None => None,
    };

    Ok(RunOutcome {
        table,
        results_file,
    })
}
