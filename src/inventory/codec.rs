//! Spreadsheet codec: binary workbook in, labelled records out.
//!
//! The decoder itself is calamine; this module only defines the contract the
//! rest of the pipeline relies on:
//!
//! - only the first worksheet is read;
//! - its first row supplies the column labels;
//! - every later, non-blank row becomes one [`RawRecord`], in sheet order.

use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use thiserror::Error;

/// A decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Whether the cell holds something a lookup should stop at.
    ///
    /// Empty cells, blank text, zero and `false` count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.trim().is_empty(),
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Bool(b) => *b,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One decoded row: column label → cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    cells: HashMap<String, CellValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(label.into(), value.into());
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells.get(label)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Error type for decoding a workbook.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a workbook calamine can open.
    #[error("unreadable workbook: {0}")]
    Open(#[from] calamine::Error),
    /// The workbook contains no worksheets.
    #[error("workbook has no worksheets")]
    NoWorksheet,
}

/// Decodes a binary spreadsheet into labelled records.
pub trait SpreadsheetCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRecord>, DecodeError>;
}

/// calamine-backed codec; sniffs xlsx, xls, xlsb and ods.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineCodec;

impl SpreadsheetCodec for CalamineCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRecord>, DecodeError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let first = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(DecodeError::NoWorksheet)?;
        let range = workbook.worksheet_range(&first)?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let labels = column_labels(header);

        let records = rows
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|row| {
                let mut record = RawRecord::new();
                for (label, cell) in labels.iter().zip(row) {
                    record.insert(label.clone(), CellValue::from(cell));
                }
                record
            })
            .collect();

        Ok(records)
    }
}

/// Turn the header row into unique labels.
///
/// Blank headers become `__EMPTY`, and repeated labels get a `_1`, `_2`, ...
/// suffix, so every column stays addressable.
fn column_labels(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .map(|cell| {
            let base = match CellValue::from(cell).to_string() {
                text if text.is_empty() => "__EMPTY".to_string(),
                text => text,
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let label = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            label
        })
        .collect()
}
