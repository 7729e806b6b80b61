//! EEG and video recording entries.
//!
//! Recordings of the same kind are ordered by start time only. There is no
//! `Ord` implementation: two entries with the same start but different paths
//! are not equal, so ordering is exposed through [`Recording::cmp_start`] and
//! [`sort_by_start`] instead.

use std::cmp::Ordering;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Common view over recording entries of one kind.
pub trait Recording {
    /// Start of the recording.
    fn start(&self) -> NaiveDateTime;

    /// End of the recording.
    fn end(&self) -> NaiveDateTime;

    /// Compare two recordings of the same kind by start time.
    fn cmp_start(&self, other: &Self) -> Ordering
    where
        Self: Sized,
    {
        self.start().cmp(&other.start())
    }
}

/// An EEG file registered in the NeuroWorkbench database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EegFile {
    /// Full path to the `.EEG` file.
    pub path: PathBuf,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Exam number of the recording (e.g. `NE0123456789`).
    pub exam_number: String,
}

/// A video file registered in the NeuroWorkbench database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoFile {
    /// Full path to the video file.
    pub path: PathBuf,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// `true` for a clipped event, `false` for a full recording.
    pub clipped: bool,
}

impl Recording for EegFile {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl Recording for VideoFile {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Stable sort by ascending start time. Ties keep their input order.
pub fn sort_by_start<R: Recording>(recordings: &mut [R]) {
    recordings.sort_by(R::cmp_start);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn video(name: &str, hour: u32) -> VideoFile {
        VideoFile {
            path: PathBuf::from(name),
            start: at(hour),
            end: at(hour + 1),
            clipped: false,
        }
    }

    #[test]
    fn sort_keeps_ties_in_input_order() {
        let mut videos = vec![video("c", 3), video("a", 1), video("b", 1)];
        sort_by_start(&mut videos);
        let names: Vec<_> = videos.iter().map(|v| v.path.to_str().unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn cmp_start_ignores_other_fields() {
        let left = video("left", 2);
        let mut right = video("right", 2);
        right.clipped = true;
        assert_eq!(left.cmp_start(&right), Ordering::Equal);
        assert_ne!(left, right);
    }
}
