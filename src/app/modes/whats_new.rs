use crate::adapters::html::Document;
use crate::config::settings::Settings;
use crate::domain::model::ReportTable;
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use crate::utils::progress::progress_bar;
use url::Url;

pub const HEADER: [&str; 3] = ["Article link", "Title", "Editor, Author"];

const SECTIONS: &str = "#what-s-new-in-python div.toctree-wrapper li.toctree-l1";

/// Absolute links to each version's "What's New" article, in page order.
pub fn parse_version_links(index_html: &str, index_url: &Url) -> Result<Vec<Url>> {
    let doc = Document::parse(index_html);
    let mut links = Vec::new();
    for section in doc.find_all(SECTIONS)? {
        let href = section.find_required("a")?.required_attr("href")?;
        links.push(index_url.join(href)?);
    }
    Ok(links)
}

/// Title and editor/author line of one version article.
pub fn parse_version_page(html: &str) -> Result<(String, String)> {
    let doc = Document::parse(html);
    let title = doc.find_required("h1")?.text().trim().to_string();
    let editors = doc
        .find_required("dl")?
        .text()
        .replace('\n', " ")
        .trim()
        .to_string();
    Ok((title, editors))
}

pub async fn whats_new<F>(fetcher: &F, settings: &Settings) -> Result<ReportTable>
where
    F: PageFetcher + ?Sized,
{
    let index_url = settings.docs_url.join("whatsnew/")?;
    let index = fetcher.fetch_text(&index_url).await?;
    let links = parse_version_links(&index, &index_url)?;
    tracing::info!("Found {} release notes", links.len());

    let progress = progress_bar(links.len(), "whats-new", settings.show_progress);
    let mut rows = Vec::with_capacity(links.len());
    for link in links {
        progress.inc(1);
        let page = match fetcher.fetch_text(&link).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to load page {}: {}", link, e);
                continue;
            }
        };

        let (title, editors) = parse_version_page(&page)?;
        rows.push(vec![link.to_string(), title, editors]);
    }
    progress.finish_and_clear();

    Ok(ReportTable::to_table(HEADER, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::test_support::MockFetcher;

    const INDEX: &str = r#"
        <section id="what-s-new-in-python">
          <h1>What's New in Python</h1>
          <div class="toctree-wrapper compound">
            <ul>
              <li class="toctree-l1"><a class="reference internal" href="3.13.html">What's New In Python 3.13</a>
                <ul><li class="toctree-l2"><a href="3.13.html#summary">Summary</a></li></ul>
              </li>
              <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a></li>
            </ul>
          </div>
        </section>
    "#;

    fn article(version: &str) -> String {
        format!(
            r#"<section><h1>What's New In Python {version}</h1>
            <dl class="field-list simple">
              <dt class="field-odd">Editor<span class="colon">:</span></dt>
              <dd class="field-odd"><p>Some
Editor</p></dd>
            </dl>
            <dl><dt>second list</dt></dl></section>"#
        )
    }

    fn settings() -> Settings {
        Settings::new(
            Url::parse("https://docs.example.org/3/").unwrap(),
            Url::parse("https://peps.example.org/").unwrap(),
        )
    }

    #[test]
    fn test_parse_version_links_only_top_level() {
        let index_url = Url::parse("https://docs.example.org/3/whatsnew/").unwrap();
        let links = parse_version_links(INDEX, &index_url).unwrap();
        let links: Vec<_> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            links,
            vec![
                "https://docs.example.org/3/whatsnew/3.13.html",
                "https://docs.example.org/3/whatsnew/3.12.html",
            ]
        );
    }

    #[test]
    fn test_parse_version_page_flattens_newlines() {
        let (title, editors) = parse_version_page(&article("3.12")).unwrap();
        assert_eq!(title, "What's New In Python 3.12");
        assert!(editors.starts_with("Editor:"));
        assert!(editors.contains("Some Editor"));
        assert!(!editors.contains('\n'));
        assert!(!editors.contains("second list"));
    }

    #[test]
    fn test_parse_version_page_without_dl_is_not_found() {
        let err = parse_version_page("<h1>Title</h1>").unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_whats_new_skips_pages_that_fail_to_load() {
        let fetcher = MockFetcher::new()
            .page("https://docs.example.org/3/whatsnew/", INDEX)
            .page("https://docs.example.org/3/whatsnew/3.12.html", &article("3.12"));

        let table = whats_new(&fetcher, &settings()).await.unwrap();

        assert_eq!(table.header(), &HEADER.map(String::from));
        assert_eq!(table.len(), 2);
        let row = table.row(1).unwrap();
        assert_eq!(row[0], "https://docs.example.org/3/whatsnew/3.12.html");
        assert_eq!(row[1], "What's New In Python 3.12");
        assert_eq!(fetcher.requested.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn test_whats_new_missing_index_aborts() {
        let fetcher = MockFetcher::new();
        let err = whats_new(&fetcher, &settings()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::ScrapeError::HttpStatus { status: 404, .. }
        ));
    }
}
