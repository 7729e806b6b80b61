use std::path::PathBuf;

use serde::Serialize;

use nkwb_ingest::SkippedRow;
use nkwb_model::{EegFile, PatientMap, TimeWindow, VideoFile};

/// One export as read by a command.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub patients: usize,
    pub recordings: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Every export of a command, merged.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedExports {
    pub files: Vec<FileSummary>,
    pub patients: PatientMap,
}

impl LoadedExports {
    /// Skipped rows of `patient_id` across all files.
    pub fn skipped_for(&self, patient_id: &str) -> usize {
        self.files
            .iter()
            .flat_map(|file| &file.skipped)
            .filter(|skip| skip.patient_id.as_deref() == Some(patient_id))
            .count()
    }

    pub fn skipped_total(&self) -> usize {
        self.files.iter().map(|file| file.skipped.len()).sum()
    }
}

/// Recordings of one patient selected by a time window.
#[derive(Debug, Clone, Serialize)]
pub struct RecordingListing {
    pub patient_id: String,
    pub window: TimeWindow,
    pub eegs: Vec<EegFile>,
    pub videos: Vec<VideoFile>,
}
