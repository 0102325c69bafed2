//! Cross-checks index status codes against the status each proposal declares.

use crate::domain::model::{ExpectedStatusTable, ProposalRow, StatusTally};
use crate::domain::ports::DetailStatusSource;
use crate::utils::error::{Result, ScrapeError};
use indicatif::ProgressBar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation<'t> {
    Matched,
    Mismatched { expected: &'t [String] },
    UnknownCode { code: String },
}

/// Decides how one row relates to the expected table. Pure; no logging.
pub fn classify<'t>(
    code: &str,
    detail_status: &str,
    table: &'t ExpectedStatusTable,
) -> Reconciliation<'t> {
    let Some(expected) = table.get(code) else {
        return Reconciliation::UnknownCode {
            code: code.to_string(),
        };
    };

    if expected.iter().any(|status| status == detail_status) {
        Reconciliation::Matched
    } else if code.chars().count() > 1 {
        Reconciliation::UnknownCode {
            code: code.to_string(),
        }
    } else {
        Reconciliation::Mismatched { expected }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub tally: StatusTally,
    /// Rows that made it into the tally; rows with unknown codes are excluded.
    pub total: usize,
    pub mismatched: usize,
    pub unknown: usize,
}

/// Walks `rows` in order, fetching each detail page through `source`.
///
/// Mismatches are logged and counted; unknown codes are logged and dropped
/// from both the tally and the total. Fetch or markup failures abort.
pub async fn reconcile<S>(
    rows: &[ProposalRow],
    source: &S,
    table: &ExpectedStatusTable,
    progress: &ProgressBar,
) -> Result<ReconcileSummary>
where
    S: DetailStatusSource + ?Sized,
{
    let mut summary = ReconcileSummary::default();

    for row in rows {
        let detail_status = source.detail_status(&row.link).await?;
        progress.inc(1);

        match classify(&row.status_code, &detail_status, table) {
            Reconciliation::Matched => {}
            Reconciliation::Mismatched { expected } => {
                tracing::info!(
                    url = %row.link,
                    detail_status = %detail_status,
                    expected = ?expected,
                    "Mismatched statuses"
                );
                summary.mismatched += 1;
            }
            Reconciliation::UnknownCode { code } => {
                let err = ScrapeError::UnexpectedStatusCode { code };
                tracing::warn!(url = %row.link, "{}", err);
                summary.unknown += 1;
                continue;
            }
        }

        summary.tally.increment(&detail_status);
        summary.total += 1;
    }

    Ok(summary)
}
