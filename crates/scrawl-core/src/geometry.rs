//! Geometry helpers shared by the stroke surface and the spatial registry.
//!
//! All functions operate on `kurbo` primitives in surface-local CSS pixels.

use kurbo::{Point, Rect};

/// Distance from `point` to the segment `start..end`.
///
/// The projection of `point` onto the line through the segment is clamped to
/// the segment, so points beyond either end measure to that endpoint. A
/// zero-length segment measures to its single point.
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let line_vec = end - start;
    let point_vec = point - start;

    let line_len_sq = line_vec.hypot2();
    if line_len_sq < f64::EPSILON {
        return point_vec.hypot();
    }

    let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = start + line_vec * t;
    (point - projection).hypot()
}

/// Axis-aligned bounding box of a point sequence.
///
/// Returns `None` for an empty slice. A single point yields a zero-area rect.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;

    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;

    for point in &points[1..] {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Some(Rect::new(min_x, min_y, max_x, max_y))
}

/// Strict AABB overlap.
///
/// Intervals are half-open, so rectangles that only share an edge do not
/// overlap.
pub fn aabb_overlaps(a: Rect, b: Rect) -> bool {
    let a = a.abs();
    let b = b.abs();
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Convert a viewport-space point into the local space of a surface whose
/// top-left corner sits at `origin` in the viewport.
pub fn to_local(viewport_point: Point, origin: Point) -> Point {
    viewport_point - origin.to_vec2()
}

/// Translate a viewport-space rectangle into the local space anchored at `origin`.
pub fn rect_to_local(rect: Rect, origin: Point) -> Rect {
    rect - origin.to_vec2()
}

/// Falls back to 1.0 for a non-finite or non-positive device pixel ratio.
pub(crate) fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
