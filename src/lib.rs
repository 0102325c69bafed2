pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use app::runner::{run, RunOutcome};
pub use config::{RunConfig, Settings};
pub use crate::core::{dispatch::Mode, dispatch::ParserEngine, report::OutputMode};
pub use utils::error::{Result, ScrapeError};
