//! Data model for NeuroWorkbench patient exports.
//!
//! A [`PatientMap`] holds every [`Patient`] read from one or more exports,
//! each with its [`EegFile`] and [`VideoFile`] entries sorted by start time.

pub mod merge;
pub mod patient;
pub mod recording;
pub mod window;

pub use merge::merge_patient_maps;
pub use patient::{Patient, PatientMap};
pub use recording::{EegFile, Recording, VideoFile, sort_by_start};
pub use window::{TimeWindow, select_recordings};
