//! Record assembly: header-aligned rows to domain records.
//!
//! Each data row is zipped with the header row of its level, then the
//! required fields are pulled out by name. Rows that cannot produce a record
//! come back as [`RowOutcome::Skipped`] with the reason, never as an error.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use nkwb_model::{EegFile, Patient, VideoFile};

use crate::sheet::CellValue;

/// Column names of the patient header (sheet row 0).
pub mod patient_fields {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Patient Name";
    pub const SEX: &str = "Sex";
    pub const BIRTH_DATE: &str = "Birth Date";
}

/// Column names of the EEG section header.
pub mod eeg_fields {
    pub const PATH: &str = "Path";
    pub const DATA_NAME: &str = "Data Name";
    pub const START: &str = "Start";
    pub const END: &str = "End";
    pub const EXAM_NUMBER: &str = "Exam. No.";
}

/// Column names of the video section header.
pub mod video_fields {
    pub const PATH: &str = "Path";
    pub const VIDEO_NAME: &str = "Video Name";
    pub const START: &str = "Start";
    pub const END: &str = "End";
    pub const CLIPPED: &str = "Clipped";
}

/// Why a row or block produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The section header does not carry the expected label.
    HeaderMismatch { expected: String, found: String },
    /// EEG entry without a path (disabled or clipped placeholder).
    EmptyPath,
    /// A required column is absent from the row.
    MissingField { field: String },
    /// A required column holds a value of the wrong type.
    InvalidField { field: String, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderMismatch { expected, found } => {
                write!(f, "header mismatch: expected '{expected}', found '{found}'")
            }
            Self::EmptyPath => f.write_str("empty path"),
            Self::MissingField { field } => write!(f, "missing field '{field}'"),
            Self::InvalidField { field, value } => {
                write!(f, "invalid value '{value}' for field '{field}'")
            }
        }
    }
}

/// Result of assembling one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome<T> {
    Parsed(T),
    Skipped(SkipReason),
}

impl<T> RowOutcome<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }
}

impl<T> From<Result<T, SkipReason>> for RowOutcome<T> {
    fn from(result: Result<T, SkipReason>) -> Self {
        match result {
            Ok(value) => Self::Parsed(value),
            Err(reason) => Self::Skipped(reason),
        }
    }
}

/// Field name to cell value mapping for one row.
#[derive(Debug, Clone, Default)]
pub struct FieldMap<'a> {
    fields: BTreeMap<&'a str, &'a CellValue>,
}

impl<'a> FieldMap<'a> {
    /// Zip `header` with `row` by position. A repeated header name keeps the
    /// last value; header names past the end of the row are absent.
    pub fn zip(header: &'a [String], row: &'a [CellValue]) -> Self {
        let fields = header
            .iter()
            .map(String::as_str)
            .zip(row.iter())
            .collect();
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&'a CellValue> {
        self.fields.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn require(&self, field: &str) -> Result<&'a CellValue, SkipReason> {
        self.get(field).ok_or_else(|| SkipReason::MissingField {
            field: field.to_string(),
        })
    }

    fn label(&self, field: &str) -> Result<String, SkipReason> {
        self.require(field).map(CellValue::to_label)
    }

    fn non_blank_label(&self, field: &str) -> Result<String, SkipReason> {
        let value = self.require(field)?;
        if value.is_blank() {
            return Err(SkipReason::MissingField {
                field: field.to_string(),
            });
        }
        Ok(value.to_label())
    }

    fn text(&self, field: &str) -> Result<&'a str, SkipReason> {
        let value = self.require(field)?;
        value.as_text().ok_or_else(|| invalid(field, value))
    }

    fn datetime(&self, field: &str) -> Result<NaiveDateTime, SkipReason> {
        let value = self.require(field)?;
        value.as_datetime().ok_or_else(|| invalid(field, value))
    }

    fn flag(&self, field: &str) -> Result<bool, SkipReason> {
        let value = self.require(field)?;
        value.as_bool().ok_or_else(|| invalid(field, value))
    }
}

fn invalid(field: &str, value: &CellValue) -> SkipReason {
    SkipReason::InvalidField {
        field: field.to_string(),
        value: value.to_label(),
    }
}

/// Build a patient (without recordings) from its header row.
pub fn assemble_patient(fields: &FieldMap<'_>) -> RowOutcome<Patient> {
    let build = || -> Result<Patient, SkipReason> {
        let birth_date = fields
            .get(patient_fields::BIRTH_DATE)
            .and_then(CellValue::as_datetime)
            .map(|value| value.date());
        Ok(Patient::new(
            fields.non_blank_label(patient_fields::ID)?,
            fields.label(patient_fields::NAME)?,
            fields.label(patient_fields::SEX)?,
            birth_date,
        ))
    };
    build().into()
}

/// Build an EEG entry. The path is `Path` joined with `Data Name`, with its
/// extension replaced by `extension`.
pub fn assemble_eeg(fields: &FieldMap<'_>, extension: &str) -> RowOutcome<EegFile> {
    let build = || -> Result<EegFile, SkipReason> {
        let directory = match fields.get(eeg_fields::PATH) {
            Some(CellValue::Text(text)) if !text.is_empty() => text,
            _ => return Err(SkipReason::EmptyPath),
        };
        let data_name = fields.non_blank_label(eeg_fields::DATA_NAME)?;
        let mut path = PathBuf::from(directory).join(data_name);
        path.set_extension(extension);
        Ok(EegFile {
            path,
            start: fields.datetime(eeg_fields::START)?,
            end: fields.datetime(eeg_fields::END)?,
            exam_number: fields.label(eeg_fields::EXAM_NUMBER)?,
        })
    };
    build().into()
}

/// Build a video entry. The path is `Path` joined with `Video Name`.
pub fn assemble_video(fields: &FieldMap<'_>) -> RowOutcome<VideoFile> {
    let build = || -> Result<VideoFile, SkipReason> {
        let directory = fields.text(video_fields::PATH)?;
        let video_name = fields.non_blank_label(video_fields::VIDEO_NAME)?;
        Ok(VideoFile {
            path: PathBuf::from(directory).join(video_name),
            start: fields.datetime(video_fields::START)?,
            end: fields.datetime(video_fields::END)?,
            clipped: fields.flag(video_fields::CLIPPED)?,
        })
    };
    build().into()
}
