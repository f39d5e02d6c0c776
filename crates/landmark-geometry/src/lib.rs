//! 2D Geometry Primitives
//!
//! Pure, stateless helpers shared by the landmark feature extractors:
//! Euclidean distance, centroid, and axis-aligned bounding box.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geometry error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Aggregate operation called on an empty point set
    #[error("Empty point set: {0} requires at least one point")]
    EmptyInput(&'static str),
}

/// A 2D point in pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale a normalized landmark into pixel space
    pub fn scaled(&self, width: f32, height: f32) -> Self {
        Self {
            x: self.x * width,
            y: self.y * height,
        }
    }
}

/// Axis-aligned bounding box of a point set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point2D, b: Point2D) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Arithmetic mean of a point set
pub fn centroid(points: &[Point2D]) -> Result<Point2D, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyInput("centroid"));
    }

    let n = points.len() as f32;
    let sum_x: f32 = points.iter().map(|p| p.x).sum();
    let sum_y: f32 = points.iter().map(|p| p.y).sum();

    Ok(Point2D {
        x: sum_x / n,
        y: sum_y / n,
    })
}

/// Componentwise min/max bounding box of a point set
pub fn bounding_box(points: &[Point2D]) -> Result<BoundingBox, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyInput("bounding_box"));
    }

    let mut bbox = BoundingBox {
        min_x: f32::MAX,
        max_x: f32::MIN,
        min_y: f32::MAX,
        max_y: f32::MIN,
    };

    for p in points {
        bbox.min_x = bbox.min_x.min(p.x);
        bbox.max_x = bbox.max_x.max(p.x);
        bbox.min_y = bbox.min_y.min(p.y);
        bbox.max_y = bbox.max_y.max(p.y);
    }

    Ok(bbox)
}
