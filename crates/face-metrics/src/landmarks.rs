//! Landmark index tables
//!
//! The face-mesh detector emits 478 points per frame, indexed by a
//! fixed numeric id. All detector-specific ids live here; the metric
//! functions only ever see semantically-ordered point arrays.

use crate::MetricsError;
use landmark_geometry::Point2D;
use serde::{Deserialize, Serialize};

/// Points per face-mesh snapshot (468 mesh + 10 refined iris points)
pub const LANDMARK_COUNT: usize = 478;

/// Eye contour indices, slot order significant:
/// slot 0 and 3 are the horizontal eye corners, slots 1/5 and 2/4 are
/// the upper/lower lid pairs used for the vertical spans.
const LEFT_EYE_CONTOUR: [usize; 6] = [362, 385, 387, 263, 373, 380];
const RIGHT_EYE_CONTOUR: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Iris ring indices, slot order significant: slots 0/2 and 1/3 are
/// opposing compass points of the iris ellipse.
const LEFT_IRIS_RING: [usize; 4] = [474, 475, 476, 477];
const RIGHT_IRIS_RING: [usize; 4] = [469, 470, 471, 472];

/// Which eye a landmark subset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EyeSide {
    Left,
    Right,
}

impl EyeSide {
    fn contour_indices(self) -> &'static [usize; 6] {
        match self {
            EyeSide::Left => &LEFT_EYE_CONTOUR,
            EyeSide::Right => &RIGHT_EYE_CONTOUR,
        }
    }

    fn iris_indices(self) -> &'static [usize; 4] {
        match self {
            EyeSide::Left => &LEFT_IRIS_RING,
            EyeSide::Right => &RIGHT_IRIS_RING,
        }
    }
}

/// One face-mesh snapshot: exactly [`LANDMARK_COUNT`] normalized points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkFrame {
    points: Vec<Point2D>,
}

impl LandmarkFrame {
    /// Validate and wrap a detector snapshot.
    ///
    /// A wrong point count means the detector contract is broken and
    /// fails loudly rather than being tolerated.
    pub fn new(points: Vec<Point2D>) -> Result<Self, MetricsError> {
        if points.len() != LANDMARK_COUNT {
            return Err(MetricsError::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// The six eye-contour points for one eye, in slot order
    pub fn eye_contour(&self, side: EyeSide) -> [Point2D; 6] {
        side.contour_indices().map(|i| self.points[i])
    }

    /// The four iris-ring points for one eye, in slot order
    pub fn iris_ring(&self, side: EyeSide) -> [Point2D; 4] {
        side.iris_indices().map(|i| self.points[i])
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rejects_wrong_count() {
        let err = LandmarkFrame::new(vec![Point2D::default(); 100]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::LandmarkCount {
                expected: 478,
                actual: 100
            }
        );
    }

    #[test]
    fn test_frame_accepts_full_mesh() {
        let frame = LandmarkFrame::new(vec![Point2D::default(); LANDMARK_COUNT]).unwrap();
        assert_eq!(frame.points().len(), LANDMARK_COUNT);
    }

    #[test]
    fn test_subset_extraction_slot_order() {
        let mut points = vec![Point2D::default(); LANDMARK_COUNT];
        points[33] = Point2D::new(0.1, 0.5);
        points[133] = Point2D::new(0.2, 0.5);
        points[469] = Point2D::new(0.15, 0.5);
        let frame = LandmarkFrame::new(points).unwrap();

        let contour = frame.eye_contour(EyeSide::Right);
        assert_eq!(contour[0], Point2D::new(0.1, 0.5)); // outer corner
        assert_eq!(contour[3], Point2D::new(0.2, 0.5)); // inner corner

        let iris = frame.iris_ring(EyeSide::Right);
        assert_eq!(iris[0], Point2D::new(0.15, 0.5));
    }
}
