//! Hierarchy walk: patient blocks, then EEG and video sections inside them.

use std::ops::Range;

use tracing::{debug, warn};

use nkwb_model::{EegFile, VideoFile};

use crate::assemble::{
    FieldMap, RowOutcome, SkipReason, assemble_eeg, assemble_patient, assemble_video,
};
use crate::blocks::find_blocks;
use crate::options::{ExportLayout, IngestOptions};
use crate::outline::outline_levels;
use crate::report::{ExportReport, Section};
use crate::sheet::Sheet;

/// Offset of the EEG section header from the start of its patient block.
pub const EEG_HEADER_OFFSET: usize = 2;
/// Offset of the video section header from the start of its video block.
pub const VIDEO_HEADER_OFFSET: usize = 1;
/// Leading rows of every video block that hold headers.
pub const VIDEO_HEADER_ROWS: usize = 2;

/// Header rows of one parse, one per hierarchy level.
///
/// EEG and video headers are read from the first section that needs them and
/// reused for every later section of the same sheet. A context belongs to a
/// single parse and is never shared between sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    patient_header: Vec<String>,
    eeg_header: Option<Vec<String>>,
    video_header: Option<Vec<String>>,
}

impl ParseContext {
    /// Start a parse of `sheet`; its first row is the patient header.
    pub fn new(sheet: &Sheet) -> Self {
        debug!("reading patient header");
        Self {
            patient_header: sheet.labels(0),
            eeg_header: None,
            video_header: None,
        }
    }

    pub fn patient_header(&self) -> &[String] {
        &self.patient_header
    }

    pub fn eeg_header(&self) -> Option<&[String]> {
        self.eeg_header.as_deref()
    }

    pub fn video_header(&self) -> Option<&[String]> {
        self.video_header.as_deref()
    }
}

/// Decompose `sheet` into patients and their recordings.
pub fn walk_sheet(sheet: &Sheet, options: &IngestOptions) -> ExportReport {
    let levels = outline_levels(sheet);
    let mask = |keep: fn(u8) -> bool| -> Vec<bool> {
        levels.iter().map(|level| level.is_some_and(keep)).collect()
    };
    let grouped = mask(|_| true);
    let mut walker = Walker {
        sheet,
        options,
        eeg_mask: mask(|level| level == 1),
        video_mask: mask(|level| level == 2),
        recording_mask: mask(|level| level >= 2),
        ctx: ParseContext::new(sheet),
        report: ExportReport::default(),
    };
    for block in find_blocks(&grouped, None) {
        walker.patient_block(block);
    }
    walker.report
}

struct Walker<'a> {
    sheet: &'a Sheet,
    options: &'a IngestOptions,
    eeg_mask: Vec<bool>,
    video_mask: Vec<bool>,
    recording_mask: Vec<bool>,
    ctx: ParseContext,
    report: ExportReport,
}

impl Walker<'_> {
    fn patient_block(&mut self, block: Range<usize>) {
        let fields = FieldMap::zip(&self.ctx.patient_header, self.sheet.row(block.start));
        let patient = match assemble_patient(&fields) {
            RowOutcome::Parsed(patient) => patient,
            RowOutcome::Skipped(reason) => {
                warn!(row = block.start, %reason, "skipping patient block");
                self.report.skip(block.start, Section::Patient, None, reason);
                return;
            }
        };
        let patient_id = patient.patient_id.clone();

        let mut eegs = Vec::new();
        let mut videos = Vec::new();
        match self.options.layout {
            ExportLayout::Split => {
                for section in find_blocks(&self.eeg_mask, Some(block.clone())) {
                    self.eeg_section(block.start, section, &patient_id, &mut eegs);
                }
                for section in find_blocks(&self.video_mask, Some(block.clone())) {
                    self.video_section(section, &patient_id, &mut videos);
                }
            }
            ExportLayout::Combined => {
                for section in find_blocks(&self.recording_mask, Some(block.clone())) {
                    self.video_section(section, &patient_id, &mut videos);
                }
            }
        }

        let entry = self
            .report
            .patients
            .get_or_insert_with(&patient_id, || patient);
        entry.eegs.extend(eegs);
        entry.videos.extend(videos);
        entry.sort_recordings();
        debug!(
            patient_id = %patient_id,
            eegs = entry.eegs.len(),
            videos = entry.videos.len(),
            "patient block read"
        );
    }

    fn eeg_section(
        &mut self,
        patient_start: usize,
        section: Range<usize>,
        patient_id: &str,
        eegs: &mut Vec<EegFile>,
    ) {
        if self.ctx.eeg_header.is_none() {
            let header_row = patient_start + EEG_HEADER_OFFSET;
            let candidate = self.sheet.labels(header_row);
            let found = candidate.get(2).cloned().unwrap_or_default();
            if found != self.options.eeg_header_label {
                warn!(row = header_row, found = %found, "skipping EEG section with foreign header");
                self.report.skip(
                    section.start,
                    Section::Eeg,
                    Some(patient_id),
                    SkipReason::HeaderMismatch {
                        expected: self.options.eeg_header_label.clone(),
                        found,
                    },
                );
                return;
            }
            debug!(row = header_row, "reading EEG header");
            self.ctx.eeg_header = Some(candidate);
        }
        let Some(header) = self.ctx.eeg_header.as_deref() else {
            return;
        };
        let placeholder = header.get(1).map(String::as_str).unwrap_or_default();

        for row in section {
            let second = self.sheet.cell(row, 1);
            if second.is_blank() || second.to_label() == placeholder {
                continue;
            }
            let fields = FieldMap::zip(header, self.sheet.row(row));
            match assemble_eeg(&fields, &self.options.eeg_extension) {
                RowOutcome::Parsed(eeg) => eegs.push(eeg),
                RowOutcome::Skipped(reason) => {
                    debug!(row, %reason, "skipping EEG row");
                    self.report
                        .skip(row, Section::Eeg, Some(patient_id), reason);
                }
            }
        }
    }

    fn video_section(
        &mut self,
        section: Range<usize>,
        patient_id: &str,
        videos: &mut Vec<VideoFile>,
    ) {
        if self.ctx.video_header.is_none() {
            let header_row = section.start + VIDEO_HEADER_OFFSET;
            debug!(row = header_row, "reading video header");
            self.ctx.video_header = Some(self.sheet.labels(header_row));
        }
        let Some(header) = self.ctx.video_header.as_deref() else {
            return;
        };

        for row in section.skip(VIDEO_HEADER_ROWS) {
            let fields = FieldMap::zip(header, self.sheet.row(row));
            match assemble_video(&fields) {
                RowOutcome::Parsed(video) => videos.push(video),
                RowOutcome::Skipped(reason) => {
                    warn!(row, %reason, "skipping video row");
                    self.report
                        .skip(row, Section::Video, Some(patient_id), reason);
                }
            }
        }
    }
}
