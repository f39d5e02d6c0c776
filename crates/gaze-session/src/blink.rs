//! Blink detection
//!
//! Debounce over consecutive frames' EAR against a fixed threshold.
//! A blink is counted on the recovery edge: only once the eye reopens
//! after having been below the threshold for at least the minimum run
//! length. Sub-minimum dips (open-eye noise) are discarded.

use serde::{Deserialize, Serialize};
use tracing::info;

/// One detected blink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkEvent {
    /// Running blink count for the session, this event included
    pub count: u32,
    /// Wall-clock time of the recovery frame (Unix millis)
    pub timestamp_ms: u64,
}

/// Debounce state machine over the EAR stream
#[derive(Debug, Clone)]
pub struct BlinkDetector {
    threshold: f32,
    min_run: u32,
    consecutive_below: u32,
    total_blinks: u32,
    last_blink_ms: Option<u64>,
}

impl BlinkDetector {
    pub fn new(threshold: f32, min_run: u32) -> Self {
        Self {
            threshold,
            min_run,
            consecutive_below: 0,
            total_blinks: 0,
            last_blink_ms: None,
        }
    }

    /// Feed one EAR sample; returns at most one event per frame.
    pub fn update(&mut self, ear: f32, timestamp_ms: u64) -> Option<BlinkEvent> {
        if ear < self.threshold {
            self.consecutive_below += 1;
            return None;
        }

        let run = self.consecutive_below;
        self.consecutive_below = 0;

        if run >= self.min_run {
            self.total_blinks += 1;
            self.last_blink_ms = Some(timestamp_ms);
            info!(count = self.total_blinks, run, "blink detected");
            return Some(BlinkEvent {
                count: self.total_blinks,
                timestamp_ms,
            });
        }

        None
    }

    /// Total blinks emitted this session
    pub fn total_blinks(&self) -> u32 {
        self.total_blinks
    }

    /// Timestamp of the most recent blink, if any
    pub fn last_blink_ms(&self) -> Option<u64> {
        self.last_blink_ms
    }

    pub fn reset(&mut self) {
        self.consecutive_below = 0;
        self.total_blinks = 0;
        self.last_blink_ms = None;
    }
}
