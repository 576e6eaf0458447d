//! Row Parser
//!
//! Turns comma-delimited text with a header row into [`RawRecord`]s, lazily
//! and in file order.

use super::error::{ImportError, ImportResult};
use std::collections::HashMap;

/// One CSV data row keyed by header name
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 0-based index among data rows (header excluded)
    pub row: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// Value of a column, if the header declared it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Single-pass iterator over the data rows of a CSV document
pub struct RowParser<'a> {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<&'a [u8]>,
    next_row: usize,
}

impl<'a> RowParser<'a> {
    /// Read the header row and prepare to stream the data rows
    pub fn new(text: &'a str) -> ImportResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::Parse("missing header row".to_string()));
        }

        Ok(Self {
            headers,
            records: reader.into_records(),
            next_row: 0,
        })
    }

    /// Column names exactly as written in the header row
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for RowParser<'_> {
    type Item = ImportResult<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        let row = self.next_row;
        self.next_row += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Some(Err(ImportError::Parse(format!("row {}: {}", row, e)))),
        };

        // Duplicate header names: the later column overwrites the earlier one
        let fields = self
            .headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();

        Some(Ok(RawRecord { row, fields }))
    }
}
