use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::recording::{EegFile, VideoFile, sort_by_start};

/// A patient in the NeuroWorkbench database.
///
/// Patients are built by the export reader; the recording lists only ever
/// grow (parsing appends, merging extends).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Hospital patient identifier, the merge key.
    pub patient_id: String,
    /// Name in `LAST NAME, FIRST NAME` form.
    pub patient_name: String,
    /// Biological sex label as exported ("Male", "Female", "Unknown").
    pub sex: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub eegs: Vec<EegFile>,
    #[serde(default)]
    pub videos: Vec<VideoFile>,
}

impl Patient {
    pub fn new(
        patient_id: impl Into<String>,
        patient_name: impl Into<String>,
        sex: impl Into<String>,
        birth_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            patient_name: patient_name.into(),
            sex: sex.into(),
            birth_date,
            eegs: Vec::new(),
            videos: Vec::new(),
        }
    }

    /// Sort both recording lists by start time (stable).
    pub fn sort_recordings(&mut self) {
        sort_by_start(&mut self.eegs);
        sort_by_start(&mut self.videos);
    }

    pub fn recording_count(&self) -> usize {
        self.eegs.len() + self.videos.len()
    }
}

/// Patients keyed by identifier, iterated in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Patient>", into = "Vec<Patient>")]
pub struct PatientMap {
    patients: Vec<Patient>,
    index: BTreeMap<String, usize>,
}

impl PatientMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn get(&self, patient_id: &str) -> Option<&Patient> {
        self.index.get(patient_id).map(|&idx| &self.patients[idx])
    }

    pub fn get_mut(&mut self, patient_id: &str) -> Option<&mut Patient> {
        let idx = *self.index.get(patient_id)?;
        self.patients.get_mut(idx)
    }

    /// Return the patient with `patient_id`, inserting the one built by
    /// `make` if the identifier has not been seen yet.
    ///
    /// The identifier of the inserted patient is forced to `patient_id`.
    pub fn get_or_insert_with(
        &mut self,
        patient_id: &str,
        make: impl FnOnce() -> Patient,
    ) -> &mut Patient {
        let idx = match self.index.get(patient_id) {
            Some(&idx) => idx,
            None => {
                let mut patient = make();
                patient.patient_id = patient_id.to_string();
                self.patients.push(patient);
                let idx = self.patients.len() - 1;
                self.index.insert(patient_id.to_string(), idx);
                idx
            }
        };
        &mut self.patients[idx]
    }

    /// Insert a patient, replacing any previous entry with the same
    /// identifier in place (its position is kept).
    pub fn insert(&mut self, patient: Patient) -> Option<Patient> {
        match self.index.get(&patient.patient_id) {
            Some(&idx) => Some(std::mem::replace(&mut self.patients[idx], patient)),
            None => {
                self.index
                    .insert(patient.patient_id.clone(), self.patients.len());
                self.patients.push(patient);
                None
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.patients.iter().map(|p| p.patient_id.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Patient> {
        self.patients.iter()
    }

    /// Total number of EEG and video entries across all patients.
    pub fn recording_count(&self) -> usize {
        self.patients.iter().map(Patient::recording_count).sum()
    }
}

impl<'a> IntoIterator for &'a PatientMap {
    type Item = &'a Patient;
    type IntoIter = std::slice::Iter<'a, Patient>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for PatientMap {
    type Item = Patient;
    type IntoIter = std::vec::IntoIter<Patient>;

    fn into_iter(self) -> Self::IntoIter {
        self.patients.into_iter()
    }
}

impl FromIterator<Patient> for PatientMap {
    /// Later patients with an already seen identifier replace the earlier one.
    fn from_iter<I: IntoIterator<Item = Patient>>(iter: I) -> Self {
        let mut map = Self::new();
        for patient in iter {
            map.insert(patient);
        }
        map
    }
}

impl From<Vec<Patient>> for PatientMap {
    fn from(patients: Vec<Patient>) -> Self {
        patients.into_iter().collect()
    }
}

impl From<PatientMap> for Vec<Patient> {
    fn from(map: PatientMap) -> Self {
        map.patients
    }
}
