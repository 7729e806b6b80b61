//! Merging per-export patient maps.

use crate::patient::{Patient, PatientMap};

/// Merge several patient maps, typically read from several exports.
///
/// Maps are visited in order. The first occurrence of an identifier creates
/// a new [`Patient`] owning copies of the source recordings; later
/// occurrences append their EEG and video entries to it. Lists are neither
/// re-sorted nor de-duplicated, so merging a map with itself doubles every
/// recording count.
pub fn merge_patient_maps<'a, I>(maps: I) -> PatientMap
where
    I: IntoIterator<Item = &'a PatientMap>,
{
    let mut merged = PatientMap::new();
    for map in maps {
        for patient in map {
            match merged.get_mut(&patient.patient_id) {
                Some(existing) => {
                    existing.eegs.extend(patient.eegs.iter().cloned());
                    existing.videos.extend(patient.videos.iter().cloned());
                }
                None => {
                    merged.insert(Patient {
                        patient_id: patient.patient_id.clone(),
                        patient_name: patient.patient_name.clone(),
                        sex: patient.sex.clone(),
                        birth_date: patient.birth_date,
                        eegs: patient.eegs.clone(),
                        videos: patient.videos.clone(),
                    });
                }
            }
        }
    }
    merged
}
