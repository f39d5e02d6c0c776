//! Per-frame feature extractors
//!
//! Each function takes semantically-ordered point arrays (see
//! [`crate::landmarks`]) plus the frame dimensions, scales the
//! normalized landmarks into pixel space, and computes one signal.

use crate::landmarks::{EyeSide, LandmarkFrame};
use landmark_geometry::{bounding_box, centroid, distance, Point2D};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Iris center position normalized within the eye bounding box.
///
/// Nominally in [0,1] per axis but deliberately unclamped: the iris
/// can be detected outside the eye box under eyelid occlusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeRatio {
    pub h: f32,
    pub v: f32,
}

impl GazeRatio {
    /// Centered gaze, the fallback for a degenerate eye box
    pub const NEUTRAL: GazeRatio = GazeRatio { h: 0.5, v: 0.5 };
}

/// Eye-Aspect-Ratio from the six contour points.
///
/// `(v1 + v2) / (2h)` where v1/v2 are the lid spans and h the corner
/// span, all in pixel space. Coincident corners (`h == 0`) yield a
/// non-finite value which is returned as-is; the session layer filters
/// non-finite samples before smoothing.
pub fn compute_ear(eye: &[Point2D; 6], width: f32, height: f32) -> f32 {
    let p = eye.map(|pt| pt.scaled(width, height));

    let v1 = distance(p[1], p[5]);
    let v2 = distance(p[2], p[4]);
    let h = distance(p[0], p[3]);

    (v1 + v2) / (2.0 * h)
}

/// Iris position within the eye bounding box.
///
/// Never fails the frame: a zero-width or zero-height eye box (fully
/// occluded eye) degrades to [`GazeRatio::NEUTRAL`].
pub fn compute_gaze_ratio(
    iris: &[Point2D; 4],
    eye: &[Point2D; 6],
    width: f32,
    height: f32,
) -> GazeRatio {
    let iris_px = iris.map(|pt| pt.scaled(width, height));
    let eye_px = eye.map(|pt| pt.scaled(width, height));

    // Both inputs are fixed-size non-empty arrays; the EmptyInput arm
    // is unreachable but still degrades to neutral rather than failing.
    let (iris_center, eye_box) = match (centroid(&iris_px), bounding_box(&eye_px)) {
        (Ok(c), Ok(b)) => (c, b),
        _ => return GazeRatio::NEUTRAL,
    };

    let eye_width = eye_box.width();
    let eye_height = eye_box.height();
    if eye_width <= 0.0 || eye_height <= 0.0 {
        warn!(eye_width, eye_height, "degenerate eye box, gaze degraded to neutral");
        return GazeRatio::NEUTRAL;
    }

    GazeRatio {
        h: (iris_center.x - eye_box.min_x) / eye_width,
        v: (iris_center.y - eye_box.min_y) / eye_height,
    }
}

/// Pupil diameter as the mean of the two opposing compass spans
pub fn compute_pupil_diameter(iris: &[Point2D; 4], width: f32, height: f32) -> f32 {
    let p = iris.map(|pt| pt.scaled(width, height));

    let h_dist = distance(p[0], p[2]);
    let v_dist = distance(p[1], p[3]);

    (h_dist + v_dist) / 2.0
}

/// EAR averaged over both eyes
pub fn binocular_ear(frame: &LandmarkFrame, width: f32, height: f32) -> f32 {
    let left = compute_ear(&frame.eye_contour(EyeSide::Left), width, height);
    let right = compute_ear(&frame.eye_contour(EyeSide::Right), width, height);
    (left + right) / 2.0
}

/// Gaze ratio averaged over both eyes, componentwise
pub fn binocular_gaze_ratio(frame: &LandmarkFrame, width: f32, height: f32) -> GazeRatio {
    let left = compute_gaze_ratio(
        &frame.iris_ring(EyeSide::Left),
        &frame.eye_contour(EyeSide::Left),
        width,
        height,
    );
    let right = compute_gaze_ratio(
        &frame.iris_ring(EyeSide::Right),
        &frame.eye_contour(EyeSide::Right),
        width,
        height,
    );

    GazeRatio {
        h: (left.h + right.h) / 2.0,
        v: (left.v + right.v) / 2.0,
    }
}

/// Pupil diameter averaged over both eyes
pub fn binocular_pupil_diameter(frame: &LandmarkFrame, width: f32, height: f32) -> f32 {
    let left = compute_pupil_diameter(&frame.iris_ring(EyeSide::Left), width, height);
    let right = compute_pupil_diameter(&frame.iris_ring(EyeSide::Right), width, height);
    (left + right) / 2.0
}
