//! Session configuration

use serde::{Deserialize, Serialize};

/// Gaze session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// EAR below this counts the frame as eye-closed
    pub blink_threshold: f32,

    /// Minimum consecutive closed frames for a blink
    pub blink_min_run: u32,

    /// Smoothed horizontal gaze above this qualifies for LookLeft
    /// (the gaze-to-ratio mapping is horizontally inverted)
    pub look_left_threshold: f32,

    /// Smoothed horizontal gaze below this qualifies for LookRight
    pub look_right_threshold: f32,

    /// Consecutive qualifying frames required to satisfy a phase
    pub sustain_frames: u32,

    /// Counter decrement applied on a non-qualifying frame
    pub dropout_decay: u32,

    /// EAR history capacity (blink detection and charting)
    pub ear_history: usize,

    /// Gaze ratio smoothing window
    pub gaze_window: usize,

    /// Pupil diameter smoothing window
    pub pupil_window: usize,

    /// Screen dimensions for gaze point mapping
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            blink_threshold: 0.21,
            blink_min_run: 2,
            look_left_threshold: 0.65,
            look_right_threshold: 0.42,
            sustain_frames: 10,
            dropout_decay: 2,
            ear_history: 100,
            gaze_window: 5,
            pupil_window: 30,
            screen_width: 1920,
            screen_height: 1080,
        }
    }
}

impl SessionConfig {
    /// Strict config: longer sustain, less dropout tolerance
    pub fn strict() -> Self {
        Self {
            sustain_frames: 15,
            dropout_decay: 4,
            look_left_threshold: 0.70,
            look_right_threshold: 0.35,
            ..Default::default()
        }
    }

    /// Lenient config: shorter sustain, gentler thresholds
    pub fn lenient() -> Self {
        Self {
            sustain_frames: 6,
            dropout_decay: 1,
            look_left_threshold: 0.60,
            look_right_threshold: 0.45,
            ..Default::default()
        }
    }
}
