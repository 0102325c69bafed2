use docs_scraper::config::settings::base_url;
use docs_scraper::{run, Mode, OutputMode, RunConfig, ScrapeError, Settings};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::TempDir;

const WHATS_NEW_INDEX: &str = r#"<html><body>
<section id="what-s-new-in-python">
  <div class="toctree-wrapper compound"><ul>
    <li class="toctree-l1"><a class="reference internal" href="3.13.html">What's New In Python 3.13</a></li>
    <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a></li>
  </ul></div>
</section></body></html>"#;

const DOCS_INDEX: &str = r#"<html><body>
<div class="sphinxsidebarwrapper">
  <ul>
    <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
    <li><a href="https://docs.python.org/3.12/">Python 3.12 (security-fixes)</a></li>
    <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
  </ul>
</div></body></html>"#;

const DOWNLOAD_PAGE: &str = r#"<html><body><div role="main">
<table class="docutils"><tbody>
  <tr><td>PDF (A4 paper size)</td><td><a href="archives/python-3.13-docs-pdf-a4.zip">Download</a></td></tr>
</tbody></table></div></body></html>"#;

const PEP_INDEX: &str = r#"<html><body><section id="numerical-index"><table>
<thead><tr><th>Type</th><th>PEP</th><th>Title</th></tr></thead>
<tbody>
  <tr><td><abbr>PA</abbr></td><td><a href="pep-0001/">1</a></td><td>Purpose</td></tr>
  <tr><td><abbr>SF</abbr></td><td><a href="pep-0008/">8</a></td><td>Style</td></tr>
  <tr><td><abbr>SX</abbr></td><td><a href="pep-0099/">99</a></td><td>Broken</td></tr>
</tbody></table></section></body></html>"#;

fn whats_new_article(version: &str) -> String {
    format!(
        "<html><body><h1>What's New In Python {version}</h1>\
         <dl class=\"field-list simple\"><dt>Editor:</dt><dd>Release\nManager</dd></dl></body></html>"
    )
}

fn pep_page(status: &str) -> String {
    format!(
        r#"<html><body><dl class="rfc2822 field-list simple">
        <dt class="field-odd">Author<span class="colon">:</span></dt><dd class="field-odd">A</dd>
        <dt class="field-even">Status<span class="colon">:</span></dt><dd class="field-even"><abbr>{status}</abbr></dd>
        </dl></body></html>"#
    )
}

fn zip_archive() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("library.pdf", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(b"%PDF").unwrap();
    zip.finish().unwrap().into_inner()
}

fn html(then: httpmock::Then, body: &str) {
    then.status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(body);
}

fn run_config(server: &MockServer, mode: Mode, work: &TempDir) -> RunConfig {
    let settings = Settings::new(
        base_url(&server.url("/docs/")).unwrap(),
        base_url(&server.url("/peps/")).unwrap(),
    );
    let mut config = RunConfig::new(mode, settings);
    config.output = OutputMode::File;
    config.results_dir = work.path().join("results");
    config.downloads_dir = work.path().join("downloads");
    config.cache_dir = Some(work.path().join("cache"));
    config
}

fn read_csv(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_whats_new_end_to_end() {
    let work = TempDir::new().unwrap();
    let server = MockServer::start();
    let index = server.mock(|when, then| {
        when.method(GET).path("/docs/whatsnew/");
        html(then, WHATS_NEW_INDEX);
    });
    let article = server.mock(|when, then| {
        when.method(GET).path("/docs/whatsnew/3.13.html");
        html(then, &whats_new_article("3.13"));
    });
    let broken = server.mock(|when, then| {
        when.method(GET).path("/docs/whatsnew/3.12.html");
        then.status(500);
    });

    let outcome = run(&run_config(&server, Mode::WhatsNew, &work)).await.unwrap();

    index.assert();
    article.assert();
    broken.assert();

    let table = outcome.table.unwrap();
    assert_eq!(table.len(), 2);

    let rows = read_csv(&outcome.results_file.unwrap());
    assert_eq!(rows[0], vec!["Article link", "Title", "Editor, Author"]);
    assert_eq!(rows[1][0], server.url("/docs/whatsnew/3.13.html"));
    assert_eq!(rows[1][1], "What's New In Python 3.13");
    assert_eq!(rows[1][2], "Editor:Release Manager");
}

#[tokio::test]
async fn test_latest_versions_end_to_end() {
    let work = TempDir::new().unwrap();
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET).path("/docs/");
        html(then, DOCS_INDEX);
    });

    let outcome = run(&run_config(&server, Mode::LatestVersions, &work))
        .await
        .unwrap();

    page.assert();
    let rows = read_csv(&outcome.results_file.unwrap());
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1], vec!["https://docs.python.org/3.13/", "3.13", "stable"]);
    assert_eq!(rows[2][2], "security-fixes");
    assert_eq!(rows[3][1], "All versions");
}

#[tokio::test]
async fn test_download_end_to_end() -> anyhow::Result<()> {
    let work = TempDir::new()?;
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET).path("/docs/download.html");
        html(then, DOWNLOAD_PAGE);
    });
    let archive = server.mock(|when, then| {
        when.method(GET)
            .path("/docs/archives/python-3.13-docs-pdf-a4.zip");
        then.status(200)
            .header("Content-Type", "application/zip")
            .body(zip_archive());
    });

    let config = run_config(&server, Mode::Download, &work);
    let outcome = run(&config).await?;

    page.assert();
    archive.assert();
    assert!(outcome.table.is_none());
    assert!(outcome.results_file.is_none());

    let saved = config.downloads_dir.join("python-3.13-docs-pdf-a4.zip");
    assert_eq!(std::fs::read(saved)?, zip_archive());
    assert!(!config.results_dir.exists());
    Ok(())
}

#[tokio::test]
async fn test_pep_end_to_end() {
    let work = TempDir::new().unwrap();
    let server = MockServer::start();
    let index = server.mock(|when, then| {
        when.method(GET).path("/peps/");
        html(then, PEP_INDEX);
    });
    let pep_1 = server.mock(|when, then| {
        when.method(GET).path("/peps/pep-0001/");
        html(then, &pep_page("Active"));
    });
    let pep_8 = server.mock(|when, then| {
        when.method(GET).path("/peps/pep-0008/");
        html(then, &pep_page("Active"));
    });
    let pep_99 = server.mock(|when, then| {
        when.method(GET).path("/peps/pep-0099/");
        html(then, &pep_page("Final"));
    });

    let outcome = run(&run_config(&server, Mode::Pep, &work)).await.unwrap();

    index.assert();
    pep_1.assert();
    pep_8.assert();
    // Unknown status codes are still fetched, then dropped from the tally.
    pep_99.assert();

    let rows = read_csv(&outcome.results_file.unwrap());
    assert_eq!(
        rows,
        vec![
            vec!["Status", "Count"],
            vec!["Active", "2"],
            vec!["Total", "2"],
        ]
    );
}

#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let work = TempDir::new().unwrap();
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET).path("/docs/");
        html(then, DOCS_INDEX);
    });

    let config = run_config(&server, Mode::LatestVersions, &work);
    run(&config).await.unwrap();
    run(&config).await.unwrap();
    page.assert_hits(1);

    let mut clearing = config.clone();
    clearing.clear_cache = true;
    run(&clearing).await.unwrap();
    page.assert_hits(2);
}

#[tokio::test]
async fn test_missing_markup_aborts_run() {
    let work = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/docs/");
        html(then, "<html><body><p>maintenance</p></body></html>");
    });

    let err = run(&run_config(&server, Mode::LatestVersions, &work))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::TagNotFound { .. }));
    assert!(!work.path().join("results").exists());
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_fetching() {
    let work = TempDir::new().unwrap();
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET).path("/peps/");
        html(then, PEP_INDEX);
    });

    let mut config = run_config(&server, Mode::Pep, &work);
    config.timeout = std::time::Duration::from_secs(0);

    assert!(run(&config).await.is_err());
    page.assert_hits(0);
}
