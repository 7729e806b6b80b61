//! Export readers: open, decompose, merge.

use std::path::Path;

use tracing::{info, info_span, warn};

use nkwb_model::{PatientMap, merge_patient_maps};

use crate::error::Result;
use crate::options::IngestOptions;
use crate::report::ExportReport;
use crate::walker::walk_sheet;
use crate::xls::open_sheet;

/// Read the patients of one export with default options.
pub fn read_export(path: &Path) -> Result<PatientMap> {
    read_export_with(path, &IngestOptions::default()).map(|report| report.patients)
}

/// Read one export, keeping the record of skipped rows.
pub fn read_export_with(path: &Path, options: &IngestOptions) -> Result<ExportReport> {
    let span = info_span!("export", path = %path.display(), layout = ?options.layout);
    let _guard = span.enter();

    let sheet = open_sheet(path)?;
    let report = walk_sheet(&sheet, options);
    if !report.is_clean() {
        warn!(skipped = report.skipped.len(), "rows skipped");
    }
    info!(
        rows = sheet.row_count(),
        patients = report.patients.len(),
        recordings = report.patients.recording_count(),
        "export read"
    );
    Ok(report)
}

/// Read several exports with default options and merge them in order.
pub fn read_exports<P: AsRef<Path>>(paths: &[P]) -> Result<PatientMap> {
    read_exports_with(paths, &IngestOptions::default())
}

/// Read several exports and merge them in order.
///
/// The first failing file aborts the whole read.
pub fn read_exports_with<P: AsRef<Path>>(
    paths: &[P],
    options: &IngestOptions,
) -> Result<PatientMap> {
    let maps = paths
        .iter()
        .map(|path| read_export_with(path.as_ref(), options).map(|report| report.patients))
        .collect::<Result<Vec<_>>>()?;
    Ok(merge_patient_maps(&maps))
}
