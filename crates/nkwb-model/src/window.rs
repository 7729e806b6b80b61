//! Time-window selection over a patient's recordings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::patient::Patient;
use crate::recording::{EegFile, Recording, VideoFile};

/// Inclusive `[after, before]` window. A missing bound is unconstrained.
///
/// A recording matches when it starts at or before `before` and ends at or
/// after `after`, i.e. when it overlaps the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub after: Option<NaiveDateTime>,
    pub before: Option<NaiveDateTime>,
}

impl TimeWindow {
    pub fn new(after: Option<NaiveDateTime>, before: Option<NaiveDateTime>) -> Self {
        Self { after, before }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_after(mut self, after: NaiveDateTime) -> Self {
        self.after = Some(after);
        self
    }

    #[must_use]
    pub fn with_before(mut self, before: NaiveDateTime) -> Self {
        self.before = Some(before);
        self
    }

    pub fn contains<R: Recording>(&self, recording: &R) -> bool {
        let started = self.before.is_none_or(|before| recording.start() <= before);
        let not_ended = self.after.is_none_or(|after| after <= recording.end());
        started && not_ended
    }
}

/// Select the recordings overlapping `window`, keeping their order.
pub fn select_recordings<R: Recording>(recordings: &[R], window: TimeWindow) -> Vec<&R> {
    recordings.iter().filter(|r| window.contains(*r)).collect()
}

impl Patient {
    pub fn eegs_within(&self, window: TimeWindow) -> Vec<&EegFile> {
        select_recordings(&self.eegs, window)
    }

    pub fn videos_within(&self, window: TimeWindow) -> Vec<&VideoFile> {
        select_recordings(&self.videos, window)
    }
}
