//! BIFF record scan.
//!
//! Cell values and dates come from calamine, which does not expose row
//! grouping. This scan walks the raw workbook stream for the first worksheet
//! and the outline level of every row carrying a `ROW` record.

use std::collections::BTreeMap;

use thiserror::Error;

const RECORD_HEADER_LEN: usize = 4;

const RECORD_BOF: u16 = 0x0809;
const RECORD_EOF: u16 = 0x000A;
const RECORD_FILEPASS: u16 = 0x002F;
const RECORD_BOUNDSHEET: u16 = 0x0085;
const RECORD_ROW: u16 = 0x0208;

const SHEET_TYPE_WORKSHEET: u8 = 0x00;
const ROW_OUTLINE_MASK: u16 = 0x0007;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum BiffError {
    #[error("record at offset {offset} runs past the end of the stream")]
    Truncated { offset: usize },
    #[error("expected BOF record at offset {offset}")]
    MissingBof { offset: usize },
    #[error("workbook is encrypted")]
    Encrypted,
    #[error("sheet offset {offset} is outside the stream")]
    BadSheetOffset { offset: usize },
}

/// What the scan extracts from a workbook stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BiffLayout {
    /// Name of the first worksheet, `None` if the workbook has none.
    pub sheet_name: Option<String>,
    /// Outline level per row index, only for rows with a `ROW` record.
    pub row_levels: BTreeMap<usize, u8>,
}

struct Record<'a> {
    kind: u16,
    data: &'a [u8],
}

struct Records<'a> {
    stream: &'a [u8],
    offset: usize,
}

impl<'a> Records<'a> {
    fn at(stream: &'a [u8], offset: usize) -> Self {
        Self { stream, offset }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>, BiffError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset + RECORD_HEADER_LEN > self.stream.len() {
            return None;
        }
        let offset = self.offset;
        let kind = read_u16(self.stream, offset);
        let len = read_u16(self.stream, offset + 2) as usize;
        let start = offset + RECORD_HEADER_LEN;
        let end = start + len;
        if end > self.stream.len() {
            self.offset = self.stream.len();
            return Some(Err(BiffError::Truncated { offset }));
        }
        self.offset = end;
        Some(Ok(Record {
            kind,
            data: &self.stream[start..end],
        }))
    }
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

struct BoundSheet {
    position: usize,
    kind: u8,
    name: String,
}

fn parse_boundsheet(data: &[u8], biff5: bool) -> Option<BoundSheet> {
    if data.len() < 7 {
        return None;
    }
    let position = read_u32(data, 0) as usize;
    let kind = data[5];
    let len = data[6] as usize;
    let name = if biff5 {
        decode_latin1(data.get(7..7 + len)?)
    } else {
        let high_byte = data.get(7)? & 0x01 == 0x01;
        if high_byte {
            decode_utf16(data.get(8..8 + 2 * len)?)
        } else {
            decode_latin1(data.get(8..8 + len)?)
        }
    };
    Some(BoundSheet {
        position,
        kind,
        name,
    })
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn decode_utf16(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Scan a workbook stream. `biff5` selects the pre-Excel-97 string layout.
pub(crate) fn scan(stream: &[u8], biff5: bool) -> Result<BiffLayout, BiffError> {
    let mut layout = BiffLayout::default();
    let mut sheets = Vec::new();

    let mut records = Records::at(stream, 0);
    match records.next() {
        Some(Ok(record)) if record.kind == RECORD_BOF => {}
        Some(Err(err)) => return Err(err),
        _ => return Err(BiffError::MissingBof { offset: 0 }),
    }
    for record in records {
        let record = record?;
        match record.kind {
            RECORD_EOF => break,
            RECORD_FILEPASS => return Err(BiffError::Encrypted),
            RECORD_BOUNDSHEET => {
                if let Some(sheet) = parse_boundsheet(record.data, biff5) {
                    sheets.push(sheet);
                }
            }
            _ => {}
        }
    }

    let Some(sheet) = sheets
        .into_iter()
        .find(|sheet| sheet.kind == SHEET_TYPE_WORKSHEET)
    else {
        return Ok(layout);
    };
    if sheet.position >= stream.len() {
        return Err(BiffError::BadSheetOffset {
            offset: sheet.position,
        });
    }
    layout.row_levels = scan_rows(stream, sheet.position)?;
    layout.sheet_name = Some(sheet.name);
    Ok(layout)
}

/// Collect `ROW` outline levels of the substream starting at `position`.
/// Nested substreams (embedded charts) are skipped.
fn scan_rows(stream: &[u8], position: usize) -> Result<BTreeMap<usize, u8>, BiffError> {
    let mut levels = BTreeMap::new();
    let mut depth = 0usize;
    for record in Records::at(stream, position) {
        let record = record?;
        match record.kind {
            RECORD_BOF => depth += 1,
            RECORD_EOF => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            RECORD_ROW if depth == 1 && record.data.len() >= 14 => {
                let row = read_u16(record.data, 0) as usize;
                let flags = read_u16(record.data, 12);
                levels.insert(row, (flags & ROW_OUTLINE_MASK) as u8);
            }
            _ if depth == 0 => return Err(BiffError::MissingBof { offset: position }),
            _ => {}
        }
    }
    Ok(levels)
}
