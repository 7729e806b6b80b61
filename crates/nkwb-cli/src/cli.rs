//! CLI argument definitions for the NeuroWorkbench export reader.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use nkwb_ingest::{DEFAULT_EEG_EXTENSION, DEFAULT_EEG_HEADER_LABEL, ExportLayout, IngestOptions};
use nkwb_model::TimeWindow;

use nkwb_cli::window::parse_timestamp;

#[derive(Parser)]
#[command(
    name = "nkwb",
    version,
    about = "Read NeuroWorkbench patient exports",
    long_about = "Read patient, EEG and video listings from NeuroWorkbench `.xls` exports.\n\n\
                  Several exports (or directories of exports) are merged by patient ID."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient names and other identifying values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the patients of one or more exports.
    Patients(PatientsArgs),

    /// List the recordings of one patient, optionally within a time window.
    Recordings(RecordingsArgs),
}

/// Export inputs and how to decompose them.
#[derive(Args)]
pub struct ExportArgs {
    /// Export files, or directories holding `.xls` exports.
    #[arg(value_name = "EXPORT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Outline layout of the exports.
    #[arg(long = "layout", value_enum, default_value = "split")]
    pub layout: LayoutArg,

    /// Third-column label of a genuine EEG section header.
    #[arg(long = "eeg-header-label", value_name = "LABEL", default_value = DEFAULT_EEG_HEADER_LABEL)]
    pub eeg_header_label: String,

    /// Extension given to EEG file paths.
    #[arg(long = "eeg-extension", value_name = "EXT", default_value = DEFAULT_EEG_EXTENSION)]
    pub eeg_extension: String,
}

impl ExportArgs {
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::default()
            .with_layout(self.layout.into())
            .with_eeg_header_label(self.eeg_header_label.as_str())
            .with_eeg_extension(self.eeg_extension.trim_start_matches('.'))
    }
}

#[derive(Args)]
pub struct PatientsArgs {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Print the merged patients as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct RecordingsArgs {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Patient identifier.
    #[arg(long = "patient", value_name = "ID")]
    pub patient: String,

    /// Which recordings to list.
    #[arg(long = "kind", value_enum, default_value = "all")]
    pub kind: RecordingKindArg,

    /// Keep recordings ending at or after this time (YYYY-MM-DD[THH:MM[:SS]]).
    #[arg(long = "after", value_name = "TIME", value_parser = parse_timestamp)]
    pub after: Option<NaiveDateTime>,

    /// Keep recordings starting at or before this time (YYYY-MM-DD[THH:MM[:SS]]).
    #[arg(long = "before", value_name = "TIME", value_parser = parse_timestamp)]
    pub before: Option<NaiveDateTime>,

    /// Print the selection as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

impl RecordingsArgs {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.after, self.before)
    }
}

/// CLI layout choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// EEG sections at outline level 1, video sections at level 2.
    Split,
    /// Every section at level 2 or deeper is a video section.
    Combined,
}

impl From<LayoutArg> for ExportLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Split => ExportLayout::Split,
            LayoutArg::Combined => ExportLayout::Combined,
        }
    }
}

/// CLI recording kind choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordingKindArg {
    Eeg,
    Video,
    All,
}

impl RecordingKindArg {
    pub fn includes_eeg(self) -> bool {
        matches!(self, Self::Eeg | Self::All)
    }

    pub fn includes_video(self) -> bool {
        matches!(self, Self::Video | Self::All)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
