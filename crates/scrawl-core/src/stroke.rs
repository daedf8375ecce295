//! Stroke model and erase hit-testing.

use crate::geometry::{bounding_box, distance_to_segment};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Draw mode a stroke was captured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    #[default]
    Ink,
    Lasso,
}

/// An ordered sequence of points captured during one pointer gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Draw mode tag.
    pub kind: StrokeKind,
    /// Points in surface-local CSS pixels.
    pub points: Vec<Point>,
}

impl Stroke {
    /// Start a stroke at `point`.
    pub fn begin(kind: StrokeKind, point: Point) -> Self {
        Self {
            kind,
            points: vec![point],
        }
    }

    /// Create from existing points.
    pub fn from_points(kind: StrokeKind, points: Vec<Point>) -> Self {
        Self { kind, points }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke needs at least two points to be committed.
    pub fn is_committable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Axis-aligned bounding box of the points.
    pub fn bounds(&self) -> Option<Rect> {
        bounding_box(&self.points)
    }

    /// Whether `point` lies closer than `threshold` to any segment.
    pub fn hit_test(&self, point: Point, threshold: f64) -> bool {
        self.points
            .windows(2)
            .any(|w| distance_to_segment(point, w[0], w[1]) < threshold)
    }

    /// Polyline path through all points.
    pub fn to_path(&self) -> BezPath {
        polyline(&self.points)
    }
}

/// Build a polyline path through `points`.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}

/// Index of the first stroke, in list order, hit by `point`.
///
/// Ties are resolved by list order, not by distance.
pub fn find_hit(strokes: &[Stroke], point: Point, threshold: f64) -> Option<usize> {
    strokes.iter().position(|stroke| stroke.hit_test(point, threshold))
}

/// Source of process-wide unique revisions. Zero is left to the empty default snapshot.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Version token of a caller-owned stroke list.
///
/// Tokens from [`Revision::fresh`] are unique across every stroke list in the
/// process, so handing a surface a different list never reuses a token it has
/// already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Revision(pub u64);

impl Revision {
    /// Allocate a revision no other list has used.
    pub fn fresh() -> Self {
        Self(NEXT_REVISION.fetch_add(1, Ordering::Relaxed))
    }
}

/// An immutable, revision-tagged view of the committed strokes.
///
/// The owner bumps the revision on every change; the surface redraws when it
/// sees a revision it has not drawn yet.
#[derive(Debug, Clone, Default)]
pub struct StrokeSnapshot {
    pub revision: Revision,
    pub strokes: Arc<[Stroke]>,
}

impl StrokeSnapshot {
    pub fn new(revision: Revision, strokes: impl Into<Arc<[Stroke]>>) -> Self {
        Self {
            revision,
            strokes: strokes.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> Stroke {
        Stroke::from_points(
            StrokeKind::Ink,
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        )
    }

    #[test]
    fn test_stroke_creation() {
        let mut stroke = Stroke::begin(StrokeKind::Ink, Point::new(1.0, 2.0));
        assert_eq!(stroke.len(), 1);
        assert!(!stroke.is_committable());
        stroke.add_point(Point::new(3.0, 4.0));
        assert!(stroke.is_committable());
    }

    #[test]
    fn test_hit_test_threshold() {
        let stroke = line(&[(0.0, 0.0), (100.0, 0.0)]);
        assert!(stroke.hit_test(Point::new(50.0, 5.0), 10.0));
        assert!(!stroke.hit_test(Point::new(50.0, 15.0), 10.0));
        // Exactly at the threshold is a miss.
        assert!(!stroke.hit_test(Point::new(50.0, 10.0), 10.0));
    }

    #[test]
    fn test_hit_test_beyond_endpoint() {
        let stroke = line(&[(0.0, 0.0), (100.0, 0.0)]);
        assert!(stroke.hit_test(Point::new(105.0, 0.0), 10.0));
        assert!(!stroke.hit_test(Point::new(115.0, 0.0), 10.0));
    }

    #[test]
    fn test_single_point_never_hits() {
        let stroke = line(&[(0.0, 0.0)]);
        assert!(!stroke.hit_test(Point::new(0.0, 0.0), 10.0));
    }

    #[test]
    fn test_find_hit_prefers_list_order() {
        let strokes = vec![
            line(&[(0.0, 8.0), (100.0, 8.0)]),
            line(&[(0.0, 0.0), (100.0, 0.0)]),
        ];
        // Closer to the second stroke, but the first is also within range.
        assert_eq!(find_hit(&strokes, Point::new(50.0, 1.0), 10.0), Some(0));
        assert_eq!(find_hit(&strokes, Point::new(50.0, -5.0), 10.0), Some(1));
        assert_eq!(find_hit(&strokes, Point::new(50.0, 50.0), 10.0), None);
    }

    #[test]
    fn test_to_path() {
        let stroke = line(&[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0)]);
        assert_eq!(stroke.to_path().elements().len(), 3);
        assert!(polyline(&[]).elements().is_empty());
    }

    #[test]
    fn test_fresh_revisions_are_unique() {
        let a = Revision::fresh();
        let b = Revision::fresh();
        assert_ne!(a, b);
        assert!(b > a);
        assert_ne!(a, Revision::default());
    }

    #[test]
    fn test_stroke_serde() {
        let stroke = line(&[(1.0, 2.0), (3.0, 4.0)]);
        let json = serde_json::to_string(&stroke).unwrap();
        assert!(json.contains("\"ink\""));
        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }
}
