use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Accepted detail-page statuses for each index status code.
///
/// The empty code stands for index rows that carry no status letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedStatusTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ExpectedStatusTable {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(code, names)| (code.into(), names.into_iter().map(Into::into).collect()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, code: &str) -> Option<&[String]> {
        self.entries.get(code).map(Vec::as_slice)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExpectedStatusTable {
    fn default() -> Self {
        Self::from_pairs([
            ("A", vec!["Active", "Accepted"]),
            ("D", vec!["Deferred"]),
            ("F", vec!["Final"]),
            ("P", vec!["Provisional"]),
            ("R", vec!["Rejected"]),
            ("S", vec!["Superseded"]),
            ("W", vec!["Withdrawn"]),
            ("", vec!["Draft", "Active"]),
        ])
    }
}

/// One row of the numerical proposal index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRow {
    pub status_code: String,
    pub link: Url,
}

impl ProposalRow {
    /// Builds a row from the index abbreviation cell (e.g. `SF`, `IA`, `P`).
    ///
    /// The first letter is the proposal type; whatever follows is the status
    /// code, kept verbatim (case-sensitive, possibly empty).
    pub fn from_abbreviation(abbreviation: &str, link: Url) -> Self {
        let status_code = abbreviation.trim().chars().skip(1).collect();
        Self { status_code, link }
    }
}

/// Occurrence count per detail-page status, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(name, _)| name == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn get(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| name == status)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn sum(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Header row followed by data rows; every report mode produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn to_table<H, R, C>(header: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Row `0` is the header.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        match index {
            0 => Some(&self.header),
            i => self.rows.get(i - 1).map(Vec::as_slice),
        }
    }

    /// All rows, header first.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }

    /// Number of rows including the header.
    pub fn len(&self) -> usize {
        self.rows.len() + 1
    }

    /// A table always holds at least its header.
    pub fn is_empty(&self) -> bool {
        false
    }
}
