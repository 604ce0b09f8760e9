//! Distances between points, segments and polylines.
//!
//! All distances are squared to avoid square roots in comparisons. Degenerate segments
//! (both end points at the same position) behave like points.

use crate::edges::Edges;
use crate::geom::LineSegment;
use crate::intersection::segments_intersect;
use crate::math::Point;

/// Returns whether the point is within `half_width` of the polyline, as if the polyline
/// was stroked with a line of width `2 * half_width`.
pub fn point_near_polyline(point: Point, points: &[Point], closed: bool, half_width: f64) -> bool {
    point_near_edges(point, Edges::new(points, closed), half_width)
}

/// Returns whether the point is within `half_width` of any of the edges.
pub fn point_near_edges<Iter>(point: Point, edges: Iter, half_width: f64) -> bool
where
    Iter: IntoIterator<Item = LineSegment<f64>>,
{
    let threshold = half_width * half_width;
    edges
        .into_iter()
        .any(|edge| edge.square_distance_to_point(point) <= threshold)
}

/// Squared distance between the point and the closest edge.
///
/// Infinity if there is no edge.
pub fn point_edges_distance_squared<Iter>(point: Point, edges: Iter) -> f64
where
    Iter: IntoIterator<Item = LineSegment<f64>>,
{
    edges
        .into_iter()
        .map(|edge| edge.square_distance_to_point(point))
        .fold(f64::INFINITY, f64::min)
}

/// Squared distance between two segments.
///
/// Zero if they intersect, otherwise the smallest of the distances between an end point
/// of one segment and the other segment.
pub fn segment_distance_squared(a: &LineSegment<f64>, b: &LineSegment<f64>) -> f64 {
    if segments_intersect(a, b) {
        return 0.0;
    }

    a.square_distance_to_point(b.from)
        .min(a.square_distance_to_point(b.to))
        .min(b.square_distance_to_point(a.from))
        .min(b.square_distance_to_point(a.to))
}

/// The smallest squared distance between an edge of `a` and an edge of `b`.
///
/// Infinity if either has no edge.
pub fn polylines_min_distance_squared<A, B>(a: A, b: B) -> f64
where
    A: IntoIterator<Item = LineSegment<f64>>,
    B: Iterator<Item = LineSegment<f64>> + Clone,
{
    let mut min = f64::INFINITY;
    for ea in a {
        for eb in b.clone() {
            min = min.min(segment_distance_squared(&ea, &eb));
            if min == 0.0 {
                return min;
            }
        }
    }

    min
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment<f64> {
    LineSegment {
        from: point(x0, y0),
        to: point(x1, y1),
    }
}

#[test]
fn near_polyline() {
    let points = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];

    assert!(point_near_polyline(point(5.0, 1.0), &points, false, 1.0));
    assert!(!point_near_polyline(point(5.0, 1.5), &points, false, 1.0));
    // The projection is clamped to the segment.
    assert!(!point_near_polyline(point(-1.5, 0.0), &points, false, 1.0));
    assert!(point_near_polyline(point(-0.5, 0.0), &points, false, 1.0));
    // Only the closed polyline has the diagonal edge.
    assert!(!point_near_polyline(point(5.0, 5.0), &points, false, 1.0));
    assert!(point_near_polyline(point(5.0, 5.0), &points, true, 1.0));
}

#[test]
fn near_single_point() {
    let points = [point(3.0, 3.0)];
    assert!(point_near_polyline(point(3.0, 4.0), &points, false, 1.0));
    assert!(!point_near_polyline(point(3.0, 5.0), &points, false, 1.0));
    assert!(!point_near_polyline(point(3.0, 3.0), &[], false, 1.0));
}

#[test]
fn distance_between_segments() {
    // Crossing.
    assert_eq!(
        segment_distance_squared(&seg(0.0, 0.0, 10.0, 10.0), &seg(0.0, 10.0, 10.0, 0.0)),
        0.0
    );
    // Parallel.
    assert_eq!(
        segment_distance_squared(&seg(0.0, 0.0, 10.0, 0.0), &seg(0.0, 3.0, 10.0, 3.0)),
        9.0
    );
    // T shape, not touching.
    assert_eq!(
        segment_distance_squared(&seg(0.0, 0.0, 10.0, 0.0), &seg(5.0, 2.0, 5.0, 10.0)),
        4.0
    );
    // Colinear, disjoint.
    assert_eq!(
        segment_distance_squared(&seg(0.0, 0.0, 1.0, 0.0), &seg(3.0, 0.0, 4.0, 0.0)),
        4.0
    );
    // Degenerate segments.
    assert_eq!(
        segment_distance_squared(&seg(0.0, 0.0, 0.0, 0.0), &seg(3.0, 4.0, 3.0, 4.0)),
        25.0
    );
    assert_eq!(
        segment_distance_squared(&seg(1.0, 1.0, 1.0, 1.0), &seg(0.0, 0.0, 2.0, 2.0)),
        0.0
    );
}

#[test]
fn distance_between_polylines() {
    let a = [point(0.0, 0.0), point(10.0, 0.0)];
    let b = [point(0.0, 5.0), point(4.0, 2.0), point(10.0, 5.0)];

    let d = polylines_min_distance_squared(Edges::new(&a, false), Edges::new(&b, false));
    assert_eq!(d, 4.0);

    assert_eq!(
        polylines_min_distance_squared(Edges::new(&a, false), Edges::new(&[], false)),
        f64::INFINITY
    );
    assert_eq!(
        point_edges_distance_squared(point(4.0, 0.0), Edges::new(&b, false)),
        4.0
    );
}
