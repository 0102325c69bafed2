use crate::domain::model::ReportTable;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScrapeError};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Space-separated rows on stdout
    #[default]
    Console,
    /// Bordered table on stdout
    Pretty,
    /// CSV file in the results directory
    File,
}

pub fn render_console(table: &ReportTable) -> String {
    table
        .rows()
        .map(|row| row.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_pretty(table: &ReportTable) -> String {
    let columns = table.rows().map(<[String]>::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in table.rows() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let format_row = |row: &[String]| {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = width - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect();
        format!("|{}|", cells.join("|"))
    };

    let mut lines = vec![border.clone(), format_row(table.header()), border.clone()];
    lines.extend(table.data_rows().iter().map(|row| format_row(row.as_slice())));
    lines.push(border);
    lines.join("\n")
}

pub fn to_csv(table: &ReportTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ScrapeError::IoError(e.into_error()))
}

pub fn results_file_name(mode_name: &str) -> String {
    format!("{}_{}.csv", mode_name, Local::now().format(DATETIME_FORMAT))
}

/// Emits `table` the way `output` asks; returns the file path for file output.
pub async fn control_output<S: Storage>(
    table: &ReportTable,
    output: OutputMode,
    mode_name: &str,
    results: &S,
) -> Result<Option<PathBuf>> {
    match output {
        OutputMode::Console => {
            println!("{}", render_console(table));
            Ok(None)
        }
        OutputMode::Pretty => {
            println!("{}", render_pretty(table));
            Ok(None)
        }
        OutputMode::File => {
            let file_name = results_file_name(mode_name);
            results.write_file(&file_name, &to_csv(table)?).await?;
            let path = results.location(&file_name);
            tracing::info!("Results saved to file: {}", path.display());
            Ok(Some(path))
        }
    }
}
