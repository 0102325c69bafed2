use crate::adapters::html::Document;
use crate::config::settings::Settings;
use crate::domain::ports::{PageFetcher, Storage};
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use std::io::Cursor;
use std::path::PathBuf;
use url::Url;

const ARCHIVE_PATTERN: &str = r".+pdf-a4\.zip$";

/// Absolute URL of the PDF (A4) archive listed on the download page.
pub fn parse_archive_link(html: &str, page_url: &Url) -> Result<Url> {
    let pattern = Regex::new(ARCHIVE_PATTERN).map_err(|e| ScrapeError::ConfigError {
        message: format!("Bad archive pattern: {}", e),
    })?;

    let doc = Document::parse(html);
    let main = doc.find_required(r#"div[role="main"]"#)?;
    let table = main.find_required("table.docutils")?;
    let href = table
        .find_all("a[href]")?
        .into_iter()
        .filter_map(|a| a.attr("href"))
        .find(|href| pattern.is_match(href))
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: format!("table.docutils a[href~={}]", ARCHIVE_PATTERN),
        })?;

    Ok(page_url.join(href)?)
}

/// Last path segment of the archive URL.
pub fn archive_file_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::ValidationError {
            message: format!("Archive URL has no file name: {}", url),
        })
}

/// Number of entries in the ZIP payload; fails if it is not a ZIP archive.
pub fn verify_archive(bytes: &[u8]) -> Result<usize> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    Ok(archive.len())
}

pub async fn download<F, S>(fetcher: &F, settings: &Settings, storage: &S) -> Result<PathBuf>
where
    F: PageFetcher + ?Sized,
    S: Storage,
{
    let downloads_url = settings.docs_url.join("download.html")?;
    let page = fetcher.fetch_text(&downloads_url).await?;
    let archive_url = parse_archive_link(&page, &downloads_url)?;
    let file_name = archive_file_name(&archive_url)?;

    tracing::info!("Downloading {}", archive_url);
    let bytes = fetcher.fetch_bytes(&archive_url).await?;
    let entries = verify_archive(&bytes)?;

    storage.write_file(&file_name, &bytes).await?;
    let path = storage.location(&file_name);
    tracing::info!(
        "Archive downloaded and saved: {} ({} entries, {} bytes)",
        path.display(),
        entries,
        bytes.len()
    );
    Ok(path)
}
