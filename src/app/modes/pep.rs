use crate::adapters::html::Document;
use crate::config::settings::Settings;
use crate::core::reconcile::{reconcile, ReconcileSummary};
use crate::domain::model::{ProposalRow, ReportTable};
use crate::domain::ports::{DetailStatusSource, PageFetcher};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::progress::progress_bar;
use async_trait::async_trait;
use url::Url;

pub const HEADER: [&str; 2] = ["Status", "Count"];
pub const TOTAL_LABEL: &str = "Total";

const INDEX_ROWS: &str = "#numerical-index tbody tr";
const STATUS_FIELD: &str = "Status";

/// Rows of the numerical index with links resolved against `index_url`.
pub fn parse_index_rows(html: &str, index_url: &Url) -> Result<Vec<ProposalRow>> {
    let doc = Document::parse(html);
    let mut rows = Vec::new();
    for tr in doc.find_all(INDEX_ROWS)? {
        let abbreviation = tr.find_required("td")?;
        let number_cell = abbreviation
            .next_sibling_element()
            .filter(|cell| cell.name() == "td")
            .ok_or_else(|| ScrapeError::TagNotFound {
                selector: "td + td".to_string(),
            })?;
        let href = number_cell.find_required("a")?.required_attr("href")?;
        rows.push(ProposalRow::from_abbreviation(
            &abbreviation.text(),
            index_url.join(href)?,
        ));
    }
    Ok(rows)
}

/// The value of the `Status` field in a proposal's header field list.
pub fn parse_detail_status(html: &str) -> Result<String> {
    let doc = Document::parse(html);
    let fields = doc.find_required("dl.rfc2822.field-list")?;
    let status_label = fields
        .find_all("dt")?
        .into_iter()
        .find(|dt| dt.text().trim().trim_end_matches(':').trim() == STATUS_FIELD)
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: format!("dl.rfc2822 dt:{}", STATUS_FIELD),
        })?;
    let value = status_label
        .next_sibling_element()
        .filter(|node| node.name() == "dd")
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: format!("dl.rfc2822 dt:{} + dd", STATUS_FIELD),
        })?;
    Ok(value.text().trim().to_string())
}

/// Reads declared statuses from proposal pages through a [`PageFetcher`].
pub struct ProposalPages<'a, F: ?Sized> {
    fetcher: &'a F,
}

impl<'a, F: PageFetcher + ?Sized> ProposalPages<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<'a, F: PageFetcher + ?Sized> DetailStatusSource for ProposalPages<'a, F> {
    async fn detail_status(&self, url: &Url) -> Result<String> {
        let page = self.fetcher.fetch_text(url).await?;
        parse_detail_status(&page)
    }
}

/// Tally rows in first-seen order, then the total row.
pub fn status_report(summary: &ReconcileSummary) -> ReportTable {
    let mut rows: Vec<Vec<String>> = summary
        .tally
        .iter()
        .map(|(status, count)| vec![status.to_string(), count.to_string()])
        .collect();
    rows.push(vec![TOTAL_LABEL.to_string(), summary.total.to_string()]);
    ReportTable::to_table(HEADER, rows)
}

pub async fn pep<F>(fetcher: &F, settings: &Settings) -> Result<ReportTable>
where
    F: PageFetcher + ?Sized,
{
    let index = fetcher.fetch_text(&settings.pep_url).await?;
    let rows = parse_index_rows(&index, &settings.pep_url)?;
    tracing::info!("Found {} proposals in the index", rows.len());

    let progress = progress_bar(rows.len(), "pep", settings.show_progress);
    let summary = reconcile(
        &rows,
        &ProposalPages::new(fetcher),
        &settings.expected_status,
        &progress,
    )
    .await?;
    progress.finish_and_clear();

    if summary.unknown > 0 {
        tracing::warn!(
            "{} of {} proposals had unexpected status codes and were left out of the total",
            summary.unknown,
            rows.len()
        );
    }
    tracing::info!(
        "Reconciled {} proposals, {} with mismatched statuses",
        summary.total,
        summary.mismatched
    );

    Ok(status_report(&summary))
}
