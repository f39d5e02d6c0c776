//! Gaze Choreography Session
//!
//! Consumes per-frame face-mesh landmark snapshots and derives
//! behavioral signals:
//! - Eyelid openness (EAR) and blink events
//! - Smoothed gaze direction and screen-mapped gaze point
//! - Pupil diameter
//! - Gesture-phase progression (look left, look right, draw a circle)
//!
//! The session is the only mutable state; one synchronous call per
//! frame, no buffering beyond the fixed smoothing windows. Landmark
//! acquisition and all rendering are external collaborators.

pub mod analysis;
pub mod blink;
pub mod config;
pub mod phase;

pub use analysis::{FrameAnalysis, GazePoint};
pub use blink::{BlinkDetector, BlinkEvent};
pub use config::SessionConfig;
pub use phase::{Phase, PhaseTracker, PhaseTrigger};

use face_metrics::{
    binocular_ear, binocular_gaze_ratio, binocular_pupil_diameter, LandmarkFrame, MetricsError,
};
use history_buffer::HistoryBuffer;
use landmark_geometry::Point2D;
use thiserror::Error;
use tracing::{debug, warn};

/// Session error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Detector contract mismatch (wrong landmark count)
    #[error("Landmark contract violation: {0}")]
    Landmarks(#[from] MetricsError),
}

/// One tracking session: all history buffers and phase state.
///
/// Created when tracking starts, mutated once per processed frame,
/// discarded when tracking stops. No state survives stop/start.
pub struct GazeSession {
    config: SessionConfig,
    blink: BlinkDetector,
    phases: PhaseTracker,
    ear_history: HistoryBuffer<f32>,
    gaze_history: HistoryBuffer<(f32, f32)>,
    pupil_history: HistoryBuffer<f32>,
    frames_processed: u64,
}

impl GazeSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            blink: BlinkDetector::new(config.blink_threshold, config.blink_min_run),
            phases: PhaseTracker::new(
                config.sustain_frames,
                config.dropout_decay,
                config.look_left_threshold,
                config.look_right_threshold,
            ),
            ear_history: HistoryBuffer::new(config.ear_history),
            gaze_history: HistoryBuffer::new(config.gaze_window),
            pupil_history: HistoryBuffer::new(config.pupil_window),
            frames_processed: 0,
            config,
        }
    }

    /// Process one landmark snapshot. The sole per-frame entry point:
    /// extract, smooth, then evaluate blink and phase state, all
    /// synchronously before the next frame arrives.
    ///
    /// `landmarks` must be the detector's full normalized point set;
    /// a wrong count is a contract mismatch and fails loudly.
    pub fn process_frame(
        &mut self,
        landmarks: &[Point2D],
        frame_width: u32,
        frame_height: u32,
    ) -> Result<FrameAnalysis, SessionError> {
        let frame = LandmarkFrame::new(landmarks.to_vec())?;
        let width = frame_width as f32;
        let height = frame_height as f32;
        self.frames_processed += 1;

        // EAR and blink. Non-finite EAR (coincident eye corners) is
        // dropped at this boundary so smoothing and blink state never
        // ingest NaN or infinity.
        let ear = binocular_ear(&frame, width, height);
        let blink = if ear.is_finite() {
            self.ear_history.push(ear);
            self.blink.update(ear, now_ms())
        } else {
            warn!(frame = self.frames_processed, "non-finite EAR sample dropped");
            None
        };

        // Gaze and pupil smoothing
        let gaze_ratio = binocular_gaze_ratio(&frame, width, height);
        self.gaze_history.push((gaze_ratio.h, gaze_ratio.v));

        let pupil = binocular_pupil_diameter(&frame, width, height);
        if pupil.is_finite() {
            self.pupil_history.push(pupil);
        }

        // Fewer than 2 EAR samples is "insufficient data", not an error
        let smoothed_ear = if self.ear_history.len() >= 2 {
            self.ear_history.mean()
        } else {
            None
        };

        let gaze = self.gaze_history.mean().map(|(h, v)| GazePoint {
            // The gaze-to-ratio mapping is horizontally inverted
            x: ((1.0 - h) * self.config.screen_width as f32).round() as i32,
            y: (v * self.config.screen_height as f32).round() as i32,
            h,
            v,
        });

        // Only the active phase's predicate sees the smoothed gaze
        let phase_trigger = gaze.and_then(|g| self.phases.evaluate(g.h));

        debug!(
            frame = self.frames_processed,
            ear,
            gaze_h = gaze_ratio.h,
            phase = ?self.phases.current(),
            "frame processed"
        );

        Ok(FrameAnalysis {
            smoothed_ear,
            blink,
            blink_count: self.blink.total_blinks(),
            gaze,
            pupil_diameter: self.pupil_history.mean(),
            phase_trigger,
            phase: self.phases.current(),
            phase_completed: self.phases.completed(),
        })
    }

    /// Complete the DrawCircle phase (called by the external
    /// choreography layer once the trail duration elapses).
    pub fn finish_circle(&mut self) -> Option<PhaseTrigger> {
        self.phases.finish_circle()
    }

    /// The phase currently being evaluated
    pub fn current_phase(&self) -> Phase {
        self.phases.current()
    }

    /// Whether the choreography has reached its terminal phase
    pub fn is_done(&self) -> bool {
        self.phases.is_done()
    }

    /// Total blinks detected this session
    pub fn blink_count(&self) -> u32 {
        self.blink.total_blinks()
    }

    /// Frames processed this session
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Discard all mutable state, as if tracking restarted
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_metrics::LANDMARK_COUNT;

    const FRAME_W: u32 = 640;
    const FRAME_H: u32 = 480;

    /// Build a full 478-point snapshot with both eyes at a controlled
    /// openness and iris position. `gaze_h` steers the iris within the
    /// eye box (same ratio both eyes, so the binocular average equals
    /// it); `open` toggles lid separation across the blink threshold.
    fn synthetic_frame(gaze_h: f32, open: bool) -> Vec<Point2D> {
        let mut points = vec![Point2D::default(); LANDMARK_COUNT];
        let lid = if open { 0.02 } else { 0.001 };

        // (corner_x, contour indices, iris indices) per eye
        let eyes: [(f32, [usize; 6], [usize; 4]); 2] = [
            (0.10, [33, 160, 158, 133, 153, 144], [469, 470, 471, 472]),
            (0.30, [362, 385, 387, 263, 373, 380], [474, 475, 476, 477]),
        ];

        for (x0, contour, iris) in eyes {
            points[contour[0]] = Point2D::new(x0, 0.50);
            points[contour[1]] = Point2D::new(x0 + 0.03, 0.50 - lid);
            points[contour[2]] = Point2D::new(x0 + 0.07, 0.50 - lid);
            points[contour[3]] = Point2D::new(x0 + 0.10, 0.50);
            points[contour[4]] = Point2D::new(x0 + 0.07, 0.50 + lid);
            points[contour[5]] = Point2D::new(x0 + 0.03, 0.50 + lid);

            let cx = x0 + gaze_h * 0.10;
            points[iris[0]] = Point2D::new(cx - 0.01, 0.50);
            points[iris[1]] = Point2D::new(cx, 0.50 - 0.01);
            points[iris[2]] = Point2D::new(cx + 0.01, 0.50);
            points[iris[3]] = Point2D::new(cx, 0.50 + 0.01);
        }

        points
    }

    fn session() -> GazeSession {
        GazeSession::new(SessionConfig::default())
    }

    #[test]
    fn test_rejects_wrong_landmark_count() {
        let mut s = session();
        let err = s
            .process_frame(&[Point2D::default(); 10], FRAME_W, FRAME_H)
            .unwrap_err();
        assert!(matches!(err, SessionError::Landmarks(_)));
    }

    #[test]
    fn test_first_frame_insufficient_ear_history() {
        let mut s = session();
        let frame = synthetic_frame(0.5, true);
        let analysis = s.process_frame(&frame, FRAME_W, FRAME_H).unwrap();
        assert!(analysis.smoothed_ear.is_none());
        assert!(analysis.gaze.is_some());
        assert!(analysis.pupil_diameter.is_some());

        let analysis = s.process_frame(&frame, FRAME_W, FRAME_H).unwrap();
        assert!(analysis.smoothed_ear.is_some());
    }

    #[test]
    fn test_blink_through_full_pipeline() {
        let mut s = session();
        let open = synthetic_frame(0.5, true);
        let closed = synthetic_frame(0.5, false);

        let mut blinks = Vec::new();
        for frame in [&open, &open, &closed, &closed, &closed, &open, &open] {
            let analysis = s.process_frame(frame, FRAME_W, FRAME_H).unwrap();
            if let Some(b) = analysis.blink {
                blinks.push(b);
            }
        }
        assert_eq!(blinks.len(), 1);
        assert_eq!(blinks[0].count, 1);
        assert_eq!(s.blink_count(), 1);
    }

    #[test]
    fn test_gaze_point_screen_mapping() {
        let mut s = session();
        let frame = synthetic_frame(0.7, true);
        let analysis = s.process_frame(&frame, FRAME_W, FRAME_H).unwrap();
        let gaze = analysis.gaze.unwrap();
        assert!((gaze.h - 0.7).abs() < 1e-3);
        // Horizontally inverted mapping onto the 1920-wide default screen
        assert_eq!(gaze.x, ((1.0 - gaze.h) * 1920.0).round() as i32);
        assert_eq!(gaze.y, (gaze.v * 1080.0).round() as i32);
    }

    #[test]
    fn test_phase_progression_end_to_end() {
        let mut s = session();
        let left = synthetic_frame(0.8, true);
        let right = synthetic_frame(0.2, true);

        let mut triggers = Vec::new();
        for _ in 0..10 {
            let analysis = s.process_frame(&left, FRAME_W, FRAME_H).unwrap();
            if let Some(t) = analysis.phase_trigger {
                triggers.push(t.phase);
            }
        }
        assert_eq!(triggers, vec![Phase::LookLeft]);
        assert_eq!(s.current_phase(), Phase::LookRight);

        // The 5-frame smoothing window still holds leftward samples,
        // so the first few rightward frames do not qualify yet: the
        // smoothed mean crosses 0.42 on the 4th frame, and 10
        // qualifying frames later the phase completes (frame 13).
        for _ in 0..13 {
            let analysis = s.process_frame(&right, FRAME_W, FRAME_H).unwrap();
            if let Some(t) = analysis.phase_trigger {
                triggers.push(t.phase);
            }
        }
        assert_eq!(triggers, vec![Phase::LookLeft, Phase::LookRight]);
        assert_eq!(s.current_phase(), Phase::DrawCircle);

        let t = s.finish_circle().unwrap();
        assert_eq!(t.phase, Phase::DrawCircle);
        assert!(s.is_done());
    }

    #[test]
    fn test_non_finite_ear_filtered_at_boundary() {
        let mut s = session();
        let good = synthetic_frame(0.5, true);
        s.process_frame(&good, FRAME_W, FRAME_H).unwrap();
        s.process_frame(&good, FRAME_W, FRAME_H).unwrap();
        let baseline = s.process_frame(&good, FRAME_W, FRAME_H).unwrap();

        // Collapse both eyes' corners onto each other: EAR divides by zero
        let mut degenerate = synthetic_frame(0.5, true);
        degenerate[133] = degenerate[33];
        degenerate[263] = degenerate[362];
        let analysis = s.process_frame(&degenerate, FRAME_W, FRAME_H).unwrap();

        // Sample dropped: smoothed EAR unchanged and still finite,
        // blink state untouched
        assert_eq!(analysis.smoothed_ear, baseline.smoothed_ear);
        assert!(analysis.smoothed_ear.unwrap().is_finite());
        assert!(analysis.blink.is_none());
        assert_eq!(s.blink_count(), 0);
    }

    #[test]
    fn test_reset_discards_all_state() {
        let mut s = session();
        let left = synthetic_frame(0.8, true);
        for _ in 0..10 {
            s.process_frame(&left, FRAME_W, FRAME_H).unwrap();
        }
        assert_eq!(s.current_phase(), Phase::LookRight);

        s.reset();
        assert_eq!(s.current_phase(), Phase::LookLeft);
        assert_eq!(s.blink_count(), 0);
        assert_eq!(s.frames_processed(), 0);

        let analysis = s.process_frame(&left, FRAME_W, FRAME_H).unwrap();
        assert!(analysis.smoothed_ear.is_none());
    }

    #[test]
    fn test_analysis_serializes_without_absent_events() {
        let mut s = session();
        let frame = synthetic_frame(0.5, true);
        let analysis = s.process_frame(&frame, FRAME_W, FRAME_H).unwrap();
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["phase"], "LookLeft");
        assert_eq!(json["blink_count"], 0);
        assert!(json.get("blink").is_none());
        assert!(json.get("phase_trigger").is_none());
    }
}
