//! Synthetic face-mesh frames
//!
//! Stands in for the external face-mesh detector: produces full
//! 478-point snapshots with a steerable iris position and lid
//! separation, so the demo loop can walk the whole choreography
//! without a camera.

use face_metrics::LANDMARK_COUNT;
use landmark_geometry::Point2D;

/// Lid half-separation of an open eye (normalized units)
const OPEN_LID: f32 = 0.02;
/// Lid half-separation of a closed eye
const CLOSED_LID: f32 = 0.001;

/// Synthetic face with two eyes on a horizontal line.
///
/// `gaze_h` steers the iris within each eye box (0 = inner edge,
/// 1 = outer edge, both eyes identical so the binocular average is
/// the same value).
pub struct SyntheticFace {
    gaze_h: f32,
    open: bool,
}

impl SyntheticFace {
    pub fn new() -> Self {
        Self {
            gaze_h: 0.5,
            open: true,
        }
    }

    pub fn look(&mut self, gaze_h: f32) -> &mut Self {
        self.gaze_h = gaze_h;
        self
    }

    pub fn eyes_open(&mut self, open: bool) -> &mut Self {
        self.open = open;
        self
    }

    /// Emit one full landmark snapshot in normalized coordinates
    pub fn frame(&self) -> Vec<Point2D> {
        let mut points = vec![Point2D::default(); LANDMARK_COUNT];
        let lid = if self.open { OPEN_LID } else { CLOSED_LID };

        // (corner_x, eye contour slots, iris ring slots) per eye
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

            let cx = x0 + self.gaze_h * 0.10;
            points[iris[0]] = Point2D::new(cx - 0.01, 0.50);
            points[iris[1]] = Point2D::new(cx, 0.50 - 0.01);
            points[iris[2]] = Point2D::new(cx + 0.01, 0.50);
            points[iris[3]] = Point2D::new(cx, 0.50 + 0.01);
        }

        points
    }
}

impl Default for SyntheticFace {
    fn default() -> Self {
        Self::new()
    }
}
