//! NeuroWorkbench export ingestion.
//!
//! An export is one worksheet whose rows are grouped into collapsible
//! outline blocks: patients at the top, EEG and video sections nested inside
//! each patient. [`open_sheet`] reads the worksheet with its outline levels,
//! [`walk_sheet`] turns it into patients and recordings, and the
//! [`read_export`] family wraps both and merges several files.

pub mod assemble;
pub mod blocks;
pub mod discovery;
pub mod error;
pub mod options;
pub mod outline;
pub mod reader;
pub mod report;
pub mod sheet;
pub mod walker;
pub mod xls;

pub use assemble::{
    FieldMap, RowOutcome, SkipReason, assemble_eeg, assemble_patient, assemble_video,
    eeg_fields, patient_fields, video_fields,
};
pub use blocks::find_blocks;
pub use discovery::{is_export_file, list_export_files};
pub use error::{IngestError, Result};
pub use options::{DEFAULT_EEG_EXTENSION, DEFAULT_EEG_HEADER_LABEL, ExportLayout, IngestOptions};
pub use outline::outline_levels;
pub use reader::{read_export, read_export_with, read_exports, read_exports_with};
pub use report::{ExportReport, Section, SkippedRow};
pub use sheet::{CellValue, Sheet};
pub use walker::{
    EEG_HEADER_OFFSET, ParseContext, VIDEO_HEADER_OFFSET, VIDEO_HEADER_ROWS, walk_sheet,
};
pub use xls::open_sheet;
