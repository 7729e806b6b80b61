//! Outcome of parsing one export.

use std::fmt;

use serde::{Deserialize, Serialize};

use nkwb_model::PatientMap;

use crate::assemble::SkipReason;

/// Hierarchy level a skipped row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Patient,
    Eeg,
    Video,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Patient => "patient",
            Self::Eeg => "EEG",
            Self::Video => "video",
        })
    }
}

/// A row (or whole section, for header mismatches) that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Sheet row index (0-based).
    pub row: usize,
    pub section: Section,
    /// Owning patient, when its header row could be read.
    pub patient_id: Option<String>,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Patients read from one export plus everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub patients: PatientMap,
    pub skipped: Vec<SkippedRow>,
}

impl ExportReport {
    /// True when no row or section was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped_for<'a>(&'a self, patient_id: &'a str) -> impl Iterator<Item = &'a SkippedRow> {
        self.skipped
            .iter()
            .filter(move |skip| skip.patient_id.as_deref() == Some(patient_id))
    }

    pub(crate) fn skip(
        &mut self,
        row: usize,
        section: Section,
        patient_id: Option<&str>,
        reason: SkipReason,
    ) {
        self.skipped.push(SkippedRow {
            row,
            section,
            patient_id: patient_id.map(str::to_string),
            reason,
        });
    }
}
