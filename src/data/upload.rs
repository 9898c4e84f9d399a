//! # Uploaded Files
//!
//! Turns CSV and plain-text uploads into text records.

use super::timestamps::parse_timestamp;
use crate::error::{DashboardError, Result};
use crate::models::TextRecord;
use csv::ReaderBuilder;
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Csv,
    Text,
}

impl UploadKind {
    /// Detect the format from the file name extension
    pub fn from_filename(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".csv") {
            Ok(UploadKind::Csv)
        } else if lower.ends_with(".txt") {
            Ok(UploadKind::Text)
        } else {
            Err(DashboardError::UnsupportedUpload(name.to_string()))
        }
    }
}

/// Split a text upload into one record per line
///
/// Interior blank lines are kept as (empty) records; a trailing newline does
/// not produce an extra record.
pub fn parse_text_lines(bytes: &[u8]) -> Result<Vec<TextRecord>> {
    let content = String::from_utf8(strip_bom(bytes).to_vec())?;
    Ok(content
        .lines()
        .map(|line| TextRecord::new(line.trim_end_matches('\r')))
        .collect())
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// In-memory CSV table with string cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse CSV bytes with a header row
    ///
    /// Short rows are padded with empty cells.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(strip_bom(bytes));

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        debug!(columns = headers.len(), rows = rows.len(), "parsed CSV upload");
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DashboardError::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// All cells of one column
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[index].clone()).collect())
    }

    /// Records from a text column, with timestamps when the column exists
    ///
    /// A missing text column is an error; a missing timestamp column yields
    /// records without timestamps. Unparseable timestamps become `None`.
    pub fn records(&self, text_column: &str, timestamp_column: Option<&str>) -> Result<Vec<TextRecord>> {
        let text_index = self.column_index(text_column)?;
        let timestamp_index = timestamp_column.and_then(|name| self.column_index(name).ok());

        Ok(self
            .rows
            .iter()
            .map(|row| TextRecord {
                text: row[text_index].clone(),
                timestamp: timestamp_index.and_then(|i| parse_timestamp(&row[i])),
            })
            .collect())
    }
}
