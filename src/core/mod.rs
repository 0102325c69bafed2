pub mod dispatch;
pub mod reconcile;
pub mod report;

pub use crate::domain::model::{ExpectedStatusTable, ProposalRow, ReportTable, StatusTally};
pub use crate::domain::ports::{DetailStatusSource, PageFetcher, Storage};
pub use crate::utils::error::Result;
