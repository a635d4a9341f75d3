//! Playback progress for watch tasks.

use serde::{Deserialize, Serialize};

/// Percentage of a video watched. Only moves forward and tops out at 100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProgress {
    percent: u8,
    watched_secs: u32,
    duration_secs: Option<u32>,
}

impl WatchProgress {
    pub fn new(duration_secs: Option<u32>) -> Self {
        Self {
            percent: 0,
            watched_secs: 0,
            duration_secs,
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }

    pub fn duration_secs(&self) -> Option<u32> {
        self.duration_secs
    }

    /// Record a reported percentage; lower values than already seen are ignored.
    pub fn record_percent(&mut self, percent: u8) -> u8 {
        self.percent = self.percent.max(percent.min(100));
        self.percent
    }

    /// Add watched seconds. Returns `None` when the duration is unknown.
    pub fn advance_secs(&mut self, secs: u32) -> Option<u8> {
        let duration = self.duration_secs?;
        self.watched_secs = self.watched_secs.saturating_add(secs).min(duration);
        let percent = if duration == 0 {
            100
        } else {
            (self.watched_secs as u64 * 100 / duration as u64) as u8
        };
        Some(self.record_percent(percent))
    }
}
