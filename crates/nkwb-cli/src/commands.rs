use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use nkwb_cli::logging::redact_value;
use nkwb_ingest::{IngestOptions, list_export_files, read_export_with};
use nkwb_model::{PatientMap, merge_patient_maps};

use crate::cli::{ExportArgs, RecordingsArgs};
use crate::types::{FileSummary, LoadedExports, RecordingListing};

pub fn run_patients(args: &ExportArgs) -> Result<LoadedExports> {
    load_exports(args)
}

pub fn run_recordings(args: &RecordingsArgs) -> Result<RecordingListing> {
    let loaded = load_exports(&args.export)?;
    let patient = loaded
        .patients
        .get(&args.patient)
        .ok_or_else(|| anyhow!("patient {} not found in the exports", args.patient))?;
    info!(
        patient_id = %patient.patient_id,
        patient_name = %redact_value(&patient.patient_name),
        "selecting recordings"
    );

    let window = args.window();
    let eegs = if args.kind.includes_eeg() {
        patient.eegs_within(window).into_iter().cloned().collect()
    } else {
        Vec::new()
    };
    let videos = if args.kind.includes_video() {
        patient.videos_within(window).into_iter().cloned().collect()
    } else {
        Vec::new()
    };
    Ok(RecordingListing {
        patient_id: patient.patient_id.clone(),
        window,
        eegs,
        videos,
    })
}

/// Read every export named by `args` and merge them in argument order.
pub fn load_exports(args: &ExportArgs) -> Result<LoadedExports> {
    let options = args.ingest_options();
    let paths = expand_inputs(&args.inputs)?;
    let span = info_span!("load", files = paths.len());
    let _guard = span.enter();

    let mut files = Vec::with_capacity(paths.len());
    let mut maps = Vec::with_capacity(paths.len());
    for path in &paths {
        let (summary, patients) = load_export(path, &options)?;
        files.push(summary);
        maps.push(patients);
    }
    let patients = merge_patient_maps(&maps);
    info!(
        files = files.len(),
        patients = patients.len(),
        recordings = patients.recording_count(),
        "exports merged"
    );
    Ok(LoadedExports { files, patients })
}

fn load_export(path: &Path, options: &IngestOptions) -> Result<(FileSummary, PatientMap)> {
    let report = read_export_with(path, options)
        .with_context(|| format!("read export {}", path.display()))?;
    let summary = FileSummary {
        path: path.to_path_buf(),
        patients: report.patients.len(),
        recordings: report.patients.recording_count(),
        skipped: report.skipped,
    };
    Ok((summary, report.patients))
}

/// Replace directory arguments by the exports they hold.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = list_export_files(input)
                .with_context(|| format!("list exports in {}", input.display()))?;
            debug!(dir = %input.display(), count = found.len(), "expanded directory");
            if found.is_empty() {
                return Err(anyhow!("no .xls exports in {}", input.display()));
            }
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}
