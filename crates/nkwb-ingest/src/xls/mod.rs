//! Excel 97-2003 (`.xls`) reader.
//!
//! The compound document container is opened with `cfb`; a container that
//! does not parse is reported as [`IngestError::Corrupted`] before anything
//! else runs. Row grouping comes from a scan of the BIFF stream; cell values
//! and dates come from calamine.

mod biff;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, Xls, open_workbook};
use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::sheet::{CellValue, Sheet};

use self::biff::BiffLayout;

/// BIFF8 stream name, then the BIFF5 one.
const WORKBOOK_STREAMS: [(&str, bool); 2] = [("/Workbook", false), ("/Book", true)];

/// Open the first worksheet of the export at `path`.
pub fn open_sheet(path: &Path) -> Result<Sheet> {
    let layout = read_layout(path)?;
    let Some(sheet_name) = layout.sheet_name.as_deref() else {
        return Err(IngestError::NoWorksheet {
            path: path.to_path_buf(),
        });
    };
    debug!(sheet = %sheet_name, grouped_rows = layout.row_levels.len(), "opened workbook");

    let mut workbook = open_workbook::<Xls<_>, _>(path).map_err(|err| {
        IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|err| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut sheet = Sheet::new();
    if let Some((last_row, last_col)) = range.end() {
        for row in 0..=last_row {
            let cells = (0..=last_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map_or(CellValue::Empty, coerce_cell)
                })
                .collect();
            let level = layout.row_levels.get(&(row as usize)).copied();
            sheet.push_row(cells, level);
        }
    }
    Ok(sheet)
}

/// Open the container and scan its workbook stream.
fn read_layout(path: &Path) -> Result<BiffLayout> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut container =
        cfb::CompoundFile::open(file).map_err(|source| IngestError::Corrupted {
            path: path.to_path_buf(),
            source,
        })?;

    let Some((stream_name, biff5)) = WORKBOOK_STREAMS
        .into_iter()
        .find(|(name, _)| container.is_stream(name))
    else {
        return Err(IngestError::InvalidWorkbook {
            path: path.to_path_buf(),
            reason: "no workbook stream in container".to_string(),
        });
    };

    let mut bytes = Vec::new();
    container
        .open_stream(stream_name)
        .and_then(|mut stream| stream.read_to_end(&mut bytes))
        .map_err(|source| IngestError::Corrupted {
            path: path.to_path_buf(),
            source,
        })?;

    biff::scan(&bytes, biff5).map_err(|err| IngestError::InvalidWorkbook {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Coerce a calamine cell: dates become timestamps, the texts `TRUE` and
/// `FALSE` become booleans, everything else keeps its scalar type. A date
/// serial outside chrono's range stays a number.
pub(crate) fn coerce_cell(value: &Data) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) => match text.as_str() {
            "TRUE" => CellValue::Bool(true),
            "FALSE" => CellValue::Bool(false),
            _ => CellValue::Text(text.clone()),
        },
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::Bool(*flag),
        Data::DateTime(date) => date
            .as_datetime()
            .map_or(CellValue::Number(date.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .map_or_else(|_| CellValue::Text(text.clone()), CellValue::DateTime),
        Data::DurationIso(text) => CellValue::Text(text.clone()),
    }
}
