//! Tests for nkwb-model types.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use nkwb_model::{
    EegFile, Patient, PatientMap, TimeWindow, VideoFile, merge_patient_maps, sort_by_start,
};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn eeg(hour: u32) -> EegFile {
    EegFile {
        path: PathBuf::from(format!("/data/EEG2100/FA{hour:04}.EEG")),
        start: at(hour, 0),
        end: at(hour, 59),
        exam_number: "NE0123456789".to_string(),
    }
}

fn video(hour: u32) -> VideoFile {
    VideoFile {
        path: PathBuf::from(format!("/data/VIDEO/V{hour:04}.m2t")),
        start: at(hour, 0),
        end: at(hour, 59),
        clipped: false,
    }
}

/// Six hourly recordings, pushed out of order then sorted.
fn patient() -> Patient {
    let mut patient = Patient::new("notanid", "NOT A NAME, BOB", "Unknown", None);
    for hour in [3, 0, 5, 1, 4, 2] {
        patient.eegs.push(eeg(hour));
        patient.videos.push(video(hour));
    }
    patient.sort_recordings();
    patient
}

fn map_of(patients: Vec<Patient>) -> PatientMap {
    patients.into_iter().collect()
}

#[test]
fn sort_recordings_orders_by_start() {
    let patient = patient();
    let hours: Vec<_> = patient.eegs.iter().map(|e| e.start).collect();
    assert_eq!(hours, (0..6).map(|h| at(h, 0)).collect::<Vec<_>>());
}

#[test]
fn unbounded_window_selects_everything() {
    let patient = patient();
    let selected = patient.eegs_within(TimeWindow::unbounded());
    assert_eq!(selected, patient.eegs.iter().collect::<Vec<_>>());
}

#[test]
fn before_bound_selects_prefix() {
    let patient = patient();
    let window = TimeWindow::unbounded().with_before(at(3, 30));
    assert_eq!(
        patient.eegs_within(window),
        patient.eegs[..4].iter().collect::<Vec<_>>()
    );
    assert_eq!(
        patient.videos_within(window),
        patient.videos[..4].iter().collect::<Vec<_>>()
    );
}

#[test]
fn after_bound_selects_suffix() {
    let patient = patient();
    let window = TimeWindow::unbounded().with_after(at(3, 30));
    assert_eq!(
        patient.eegs_within(window),
        patient.eegs[3..].iter().collect::<Vec<_>>()
    );
    assert_eq!(
        patient.videos_within(window),
        patient.videos[3..].iter().collect::<Vec<_>>()
    );
}

#[test]
fn both_bounds_select_intersection() {
    let patient = patient();
    let window = TimeWindow::new(Some(at(1, 30)), Some(at(4, 30)));
    assert_eq!(
        patient.eegs_within(window),
        patient.eegs[1..5].iter().collect::<Vec<_>>()
    );
    assert_eq!(
        patient.videos_within(window),
        patient.videos[1..5].iter().collect::<Vec<_>>()
    );
}

#[test]
fn window_bounds_are_inclusive() {
    let patient = patient();
    // Starts exactly at `before`, ends exactly at `after`.
    let window = TimeWindow::new(Some(at(2, 59)), Some(at(3, 0)));
    let selected = patient.eegs_within(window);
    assert_eq!(selected, vec![&patient.eegs[2], &patient.eegs[3]]);
}

#[test]
fn merge_unions_ids_and_concatenates_recordings() {
    let mut first = Patient::new("S1", "DOE, JANE", "Female", None);
    first.eegs.push(eeg(1));
    let mut second = Patient::new("S1", "DOE, JANE", "Female", None);
    second.eegs.push(eeg(2));
    second.videos.push(video(2));
    let other = Patient::new("S2", "ROE, RICHARD", "Male", None);

    let left = map_of(vec![first]);
    let right = map_of(vec![other, second]);
    let merged = merge_patient_maps([&left, &right]);

    assert_eq!(merged.ids().collect::<Vec<_>>(), vec!["S1", "S2"]);
    let s1 = merged.get("S1").unwrap();
    assert_eq!(s1.eegs, vec![eeg(1), eeg(2)]);
    assert_eq!(s1.videos, vec![video(2)]);
}

#[test]
fn merge_does_not_alias_inputs() {
    let source = map_of(vec![patient()]);
    let mut merged = merge_patient_maps([&source]);

    merged.get_mut("notanid").unwrap().eegs.clear();
    merged.get_mut("notanid").unwrap().videos.push(video(9));

    let original = source.get("notanid").unwrap();
    assert_eq!(original.eegs.len(), 6);
    assert_eq!(original.videos.len(), 6);
}

#[test]
fn merging_a_map_with_itself_doubles_recordings() {
    let source = map_of(vec![patient()]);
    let merged = merge_patient_maps([&source, &source]);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged.recording_count(), 2 * source.recording_count());
}

#[test]
fn merge_keeps_identity_of_first_seen_patient() {
    let left = map_of(vec![Patient::new("S1", "FIRST", "Male", None)]);
    let right = map_of(vec![Patient::new("S1", "SECOND", "Male", None)]);
    let merged = merge_patient_maps([&left, &right]);
    assert_eq!(merged.get("S1").unwrap().patient_name, "FIRST");
}

#[test]
fn patient_serializes() {
    let mut patient = Patient::new(
        "S00000001",
        "DOE, JANE",
        "Female",
        NaiveDate::from_ymd_opt(1990, 5, 17),
    );
    patient.eegs.push(EegFile {
        path: PathBuf::from("/data/EEG2100/FA0001.EEG"),
        start: at(8, 0),
        end: at(9, 30),
        exam_number: "NE0000000001".to_string(),
    });
    insta::assert_json_snapshot!(patient, @r#"
    {
      "patient_id": "S00000001",
      "patient_name": "DOE, JANE",
      "sex": "Female",
      "birth_date": "1990-05-17",
      "eegs": [
        {
          "path": "/data/EEG2100/FA0001.EEG",
          "start": "2024-01-01T08:00:00",
          "end": "2024-01-01T09:30:00",
          "exam_number": "NE0000000001"
        }
      ],
      "videos": []
    }
    "#);
}

#[test]
fn patient_map_round_trips_as_list() {
    let map = map_of(vec![patient(), Patient::new("S2", "ROE", "Male", None)]);
    let json = serde_json::to_string(&map).expect("serialize map");
    assert!(json.starts_with('['));
    let round: PatientMap = serde_json::from_str(&json).expect("deserialize map");
    assert_eq!(round, map);
}

proptest! {
    #[test]
    fn sorting_is_permutation_invariant(
        (hours, shuffled) in proptest::collection::btree_set(0u32..24, 0..24)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_flat_map(|hours| (Just(hours.clone()), Just(hours).prop_shuffle()))
    ) {
        let mut sorted: Vec<EegFile> = hours.iter().map(|&h| eeg(h)).collect();
        let mut permuted: Vec<EegFile> = shuffled.iter().map(|&h| eeg(h)).collect();
        sort_by_start(&mut sorted);
        sort_by_start(&mut permuted);
        prop_assert_eq!(sorted, permuted);
    }

    #[test]
    fn merge_counts_are_additive(
        counts in proptest::collection::vec((0usize..4, 0usize..4), 1..6)
    ) {
        let maps: Vec<PatientMap> = counts
            .iter()
            .map(|&(eegs, videos)| {
                let mut patient = Patient::new("S1", "DOE, JANE", "Female", None);
                patient.eegs = (0..eegs as u32).map(eeg).collect();
                patient.videos = (0..videos as u32).map(video).collect();
                map_of(vec![patient])
            })
            .collect();
        let merged = merge_patient_maps(&maps);
        let expected: usize = counts.iter().map(|(e, v)| e + v).sum();
        prop_assert_eq!(merged.recording_count(), expected);
        prop_assert_eq!(merged.len(), 1);
    }
}
