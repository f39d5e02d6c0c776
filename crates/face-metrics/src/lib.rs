//! Face Metrics
//!
//! Turns a face-mesh landmark snapshot into per-frame behavioral
//! signals:
//! - Eye-Aspect-Ratio (EAR) per eye (eyelid openness)
//! - Gaze ratio per eye (iris position within the eye bounding box)
//! - Pupil diameter per eye
//!
//! Landmark acquisition is external; this crate only consumes the
//! 478-point snapshot the detector delivers once per frame.

pub mod landmarks;
pub mod metrics;

pub use landmarks::{EyeSide, LandmarkFrame, LANDMARK_COUNT};
pub use metrics::{
    binocular_ear, binocular_gaze_ratio, binocular_pupil_diameter, compute_ear,
    compute_gaze_ratio, compute_pupil_diameter, GazeRatio,
};

use thiserror::Error;

/// Face metrics error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// Snapshot does not carry the full face-mesh point set.
    /// Indicates a detector contract mismatch, not a bad frame.
    #[error("Landmark count mismatch: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },
}
