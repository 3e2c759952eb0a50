use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Figures shown while a run is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiveStats {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed: Duration,
}

/// Final record of a completed run, handed to the completion handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeStats {
    pub wpm: u32,
    pub accuracy: u32,
    pub time_elapsed_ms: u64,
    pub total_strokes: usize,
    pub correct_strokes: usize,
}

impl PracticeStats {
    /// Whole seconds, rounded, as shown on the completion banner.
    pub fn elapsed_secs_rounded(&self) -> u64 {
        (self.time_elapsed_ms + 500) / 1000
    }

    /// Toast line, e.g. `42 WPM • 97% accuracy`.
    pub fn summary_line(&self) -> String {
        format!("{} WPM \u{2022} {}% accuracy", self.wpm, self.accuracy)
    }
}
