//! Gesture-phase state machine
//!
//! An ordered choreography the user is guided through: look left,
//! look right, draw a circle. Phases advance strictly in order, each
//! gated by a sustained-gaze predicate with partial decay on dropout
//! frames. Completion flags are monotonic for the session lifetime.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Choreography phases, in strict order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    LookLeft,
    LookRight,
    DrawCircle,
    Done,
}

impl Phase {
    /// Integer progress marker (0..=3)
    pub fn id(self) -> u8 {
        match self {
            Phase::LookLeft => 0,
            Phase::LookRight => 1,
            Phase::DrawCircle => 2,
            Phase::Done => 3,
        }
    }

    fn next(self) -> Phase {
        match self {
            Phase::LookLeft => Phase::LookRight,
            Phase::LookRight => Phase::DrawCircle,
            Phase::DrawCircle => Phase::Done,
            Phase::Done => Phase::Done,
        }
    }
}

/// Fired once when a phase completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTrigger {
    pub phase: Phase,
}

/// Ordered phase progression with sustain counters
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    current: Phase,
    completed: [bool; 3],
    sustain: [u32; 3],
    sustain_frames: u32,
    dropout_decay: u32,
    left_threshold: f32,
    right_threshold: f32,
}

impl PhaseTracker {
    pub fn new(
        sustain_frames: u32,
        dropout_decay: u32,
        left_threshold: f32,
        right_threshold: f32,
    ) -> Self {
        Self {
            current: Phase::LookLeft,
            completed: [false; 3],
            sustain: [0; 3],
            sustain_frames,
            dropout_decay,
            left_threshold,
            right_threshold,
        }
    }

    /// Evaluate one frame's smoothed horizontal gaze ratio.
    ///
    /// Only the active phase's predicate is consulted; the other
    /// phases are inert even if their predicate would hold. DrawCircle
    /// has no gaze predicate (its trail is consumed externally) and
    /// Done is terminal, so both leave the tracker untouched.
    pub fn evaluate(&mut self, gaze_h: f32) -> Option<PhaseTrigger> {
        let qualifies = match self.current {
            // Strict inequality: exact threshold equality does not qualify.
            // The comparisons look reversed because the gaze-to-ratio
            // mapping is horizontally inverted.
            Phase::LookLeft => gaze_h > self.left_threshold,
            Phase::LookRight => gaze_h < self.right_threshold,
            Phase::DrawCircle | Phase::Done => return None,
        };

        let idx = self.current.id() as usize;
        if qualifies {
            self.sustain[idx] += 1;
            debug!(phase = ?self.current, sustain = self.sustain[idx], "gaze qualifying");
            if self.sustain[idx] >= self.sustain_frames {
                return Some(self.complete_current());
            }
        } else {
            // Decay instead of reset: one noisy frame should not
            // discard all accumulated progress.
            self.sustain[idx] = self.sustain[idx].saturating_sub(self.dropout_decay);
        }

        None
    }

    /// Complete the DrawCircle phase.
    ///
    /// The circle trail is rendered and judged by the external layer,
    /// which calls this when the trail duration has elapsed. Inert in
    /// any other phase, so repeated calls cannot double-trigger.
    pub fn finish_circle(&mut self) -> Option<PhaseTrigger> {
        if self.current != Phase::DrawCircle {
            return None;
        }
        Some(self.complete_current())
    }

    fn complete_current(&mut self) -> PhaseTrigger {
        let phase = self.current;
        let idx = phase.id() as usize;
        self.completed[idx] = true;
        self.sustain[idx] = 0;
        self.current = phase.next();
        info!(?phase, next = ?self.current, "phase completed");
        PhaseTrigger { phase }
    }

    /// The phase currently being evaluated
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Per-phase completion flags (LookLeft, LookRight, DrawCircle)
    pub fn completed(&self) -> [bool; 3] {
        self.completed
    }

    /// Whether the whole choreography has finished
    pub fn is_done(&self) -> bool {
        self.current == Phase::Done
    }

    /// Sustain counter of the active phase (0 once Done)
    pub fn active_sustain(&self) -> u32 {
        match self.current {
            Phase::Done => 0,
            p => self.sustain[p.id() as usize],
        }
    }
}
