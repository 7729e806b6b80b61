//! In-memory worksheet: coerced cell values plus per-row outline metadata.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A coerced spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

const EMPTY_CELL: &CellValue = &CellValue::Empty;

impl CellValue {
    /// Empty cell or empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Render the cell as a label (header names, identifiers).
    ///
    /// Integral numbers are written without a fractional part, so an
    /// identifier stored as the number `1234` reads `"1234"`.
    pub fn to_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{value}")
                }
            }
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// A worksheet as seen by the outline decomposition.
///
/// Rows are indexed from 0. Outline levels are only stored for rows that
/// carry grouping metadata; other rows report `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<CellValue>>,
    outline: BTreeMap<usize, u8>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row and return its index.
    pub fn push_row(&mut self, cells: Vec<CellValue>, outline_level: Option<u8>) -> usize {
        let index = self.rows.len();
        self.rows.push(cells);
        if let Some(level) = outline_level {
            self.outline.insert(index, level);
        }
        index
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of `row`; an empty slice past the end of the sheet.
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cell at (`row`, `col`); [`CellValue::Empty`] when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.row(row).get(col).unwrap_or(EMPTY_CELL)
    }

    /// Grouping level recorded for `row`, if any.
    pub fn outline_level(&self, row: usize) -> Option<u8> {
        self.outline.get(&row).copied()
    }

    /// Labels of `row`, used as header names.
    pub fn labels(&self, row: usize) -> Vec<String> {
        self.row(row).iter().map(CellValue::to_label).collect()
    }
}
