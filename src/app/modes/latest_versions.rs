use crate::adapters::html::Document;
use crate::config::settings::Settings;
use crate::domain::model::ReportTable;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use url::Url;

pub const HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];

const VERSION_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";
const VERSIONS_LIST_MARKER: &str = "All versions";

pub fn parse_versions(html: &str, base: &Url) -> Result<Vec<Vec<String>>> {
    let pattern = Regex::new(VERSION_PATTERN).map_err(|e| ScrapeError::ConfigError {
        message: format!("Bad version pattern: {}", e),
    })?;

    let doc = Document::parse(html);
    let sidebar = doc.find_required("div.sphinxsidebarwrapper")?;
    let versions_list = sidebar
        .find_all("ul")?
        .into_iter()
        .find(|ul| ul.text().contains(VERSIONS_LIST_MARKER))
        .ok_or_else(|| ScrapeError::SectionNotFound {
            section: format!("sidebar list containing '{}'", VERSIONS_LIST_MARKER),
        })?;

    let mut rows = Vec::new();
    for link in versions_list.find_all("a")? {
        let href = link.required_attr("href")?;
        let text = link.text();
        let (version, status) = match pattern.captures(&text) {
            Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
            None => (text.trim().to_string(), String::new()),
        };
        rows.push(vec![base.join(href)?.to_string(), version, status]);
    }
    Ok(rows)
}

pub async fn latest_versions<F>(fetcher: &F, settings: &Settings) -> Result<ReportTable>
where
    F: PageFetcher + ?Sized,
{
    let page = fetcher.fetch_text(&settings.docs_url).await?;
    let rows = parse_versions(&page, &settings.docs_url)?;
    tracing::info!("Found {} documentation versions", rows.len());
    Ok(ReportTable::to_table(HEADER, rows))
}
