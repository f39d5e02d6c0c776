//! Per-frame analysis output

use crate::blink::BlinkEvent;
use crate::phase::{Phase, PhaseTrigger};
use serde::{Deserialize, Serialize};

/// Screen-mapped gaze position plus the underlying smoothed ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazePoint {
    pub x: i32,
    pub y: i32,
    pub h: f32,
    pub v: f32,
}

/// Everything the rendering/UI layer needs from one processed frame.
///
/// Recomputed every frame, idempotent to re-read. `None` fields mean
/// "insufficient data yet" (session start) or "no event this frame".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Smoothed EAR; None until at least 2 samples exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothed_ear: Option<f32>,

    /// Blink event, at most one per frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blink: Option<BlinkEvent>,

    /// Running blink count for the session
    pub blink_count: u32,

    /// Smoothed gaze point; None until a gaze sample exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaze: Option<GazePoint>,

    /// Smoothed pupil diameter in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pupil_diameter: Option<f32>,

    /// Phase trigger fired this frame, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_trigger: Option<PhaseTrigger>,

    /// The phase currently being evaluated
    pub phase: Phase,

    /// Completion flags for LookLeft, LookRight, DrawCircle
    pub phase_completed: [bool; 3],
}

impl FrameAnalysis {
    /// Whether this frame carried a discrete event
    pub fn has_event(&self) -> bool {
        self.blink.is_some() || self.phase_trigger.is_some()
    }
}
