//! Segment and polyline intersection tests.

use crate::geom::LineSegment;
use crate::math::Point;

/// Returns whether the two segments share at least one point.
///
/// Uses orientation tests, so touching end points, a point lying on the other segment
/// and overlapping colinear segments all count as intersections. Degenerate segments are
/// treated as points.
pub fn segments_intersect(a: &LineSegment<f64>, b: &LineSegment<f64>) -> bool {
    let o1 = orientation(a.from, a.to, b.from);
    let o2 = orientation(a.from, a.to, b.to);
    let o3 = orientation(b.from, b.to, a.from);
    let o4 = orientation(b.from, b.to, a.to);

    if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
        return true;
    }

    (o1 == 0.0 && on_segment(a, b.from))
        || (o2 == 0.0 && on_segment(a, b.to))
        || (o3 == 0.0 && on_segment(b, a.from))
        || (o4 == 0.0 && on_segment(b, a.to))
}

/// Returns whether any edge of `a` intersects any edge of `b`.
///
/// Does not detect one polyline being entirely inside the other without their edges
/// touching.
pub fn polylines_intersect<A, B>(a: A, b: B) -> bool
where
    A: IntoIterator<Item = LineSegment<f64>>,
    B: Iterator<Item = LineSegment<f64>> + Clone,
{
    for ea in a {
        let (ea_min_x, ea_max_x) = ea.bounding_range_x();
        let (ea_min_y, ea_max_y) = ea.bounding_range_y();
        for eb in b.clone() {
            let (eb_min_x, eb_max_x) = eb.bounding_range_x();
            let (eb_min_y, eb_max_y) = eb.bounding_range_y();
            if eb_min_x > ea_max_x || ea_min_x > eb_max_x || eb_min_y > ea_max_y || ea_min_y > eb_max_y {
                continue;
            }

            if segments_intersect(&ea, &eb) {
                return true;
            }
        }
    }

    false
}

/// Twice the signed area of the triangle `p, q, r`. Zero when the points are aligned.
#[inline]
fn orientation(p: Point, q: Point, r: Point) -> f64 {
    (q - p).cross(r - p)
}

/// Whether `p`, known to be aligned with the segment, lies within its extent.
#[inline]
fn on_segment(segment: &LineSegment<f64>, p: Point) -> bool {
    let (min_x, max_x) = segment.bounding_range_x();
    let (min_y, max_y) = segment.bounding_range_y();

    min_x <= p.x && p.x <= max_x && min_y <= p.y && p.y <= max_y
}

#[cfg(test)]
use crate::edges::Edges;
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
fn crossing_segments() {
    assert!(segments_intersect(&seg(0.0, 0.0, 10.0, 10.0), &seg(0.0, 10.0, 10.0, 0.0)));
    assert!(!segments_intersect(&seg(0.0, 0.0, 10.0, 0.0), &seg(0.0, 1.0, 10.0, 1.0)));
    // The lines cross but not the segments.
    assert!(!segments_intersect(&seg(0.0, 0.0, 1.0, 1.0), &seg(3.0, 0.0, 2.0, 1.0)));
}

#[test]
fn touching_segments() {
    // Shared end point.
    assert!(segments_intersect(&seg(0.0, 0.0, 5.0, 5.0), &seg(5.0, 5.0, 10.0, 0.0)));
    // T junction.
    assert!(segments_intersect(&seg(0.0, 0.0, 10.0, 0.0), &seg(5.0, 0.0, 5.0, 10.0)));
    // Colinear overlap.
    assert!(segments_intersect(&seg(0.0, 0.0, 6.0, 0.0), &seg(4.0, 0.0, 10.0, 0.0)));
    // Colinear, disjoint.
    assert!(!segments_intersect(&seg(0.0, 0.0, 1.0, 0.0), &seg(2.0, 0.0, 3.0, 0.0)));
}

#[test]
fn degenerate_segments() {
    let p = seg(5.0, 5.0, 5.0, 5.0);
    assert!(segments_intersect(&p, &seg(0.0, 0.0, 10.0, 10.0)));
    assert!(!segments_intersect(&p, &seg(0.0, 0.0, 10.0, 0.0)));
    assert!(segments_intersect(&p, &p));
    assert!(!segments_intersect(&p, &seg(6.0, 6.0, 6.0, 6.0)));
}

#[test]
fn symmetric() {
    let segments = [
        seg(0.0, 0.0, 10.0, 10.0),
        seg(0.0, 10.0, 10.0, 0.0),
        seg(5.0, 5.0, 5.0, 5.0),
        seg(0.0, 0.0, 10.0, 0.0),
        seg(10.0, 0.0, 20.0, 0.0),
        seg(-3.0, 4.0, 2.0, -1.0),
    ];

    for a in &segments {
        for b in &segments {
            assert_eq!(segments_intersect(a, b), segments_intersect(b, a));
        }
    }
}

#[test]
fn polylines() {
    let square = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    let crossing = [point(5.0, 5.0), point(15.0, 5.0)];
    let inside = [point(2.0, 2.0), point(8.0, 8.0)];
    let outside = [point(20.0, 0.0), point(30.0, 10.0)];

    assert!(polylines_intersect(
        Edges::new(&square, true),
        Edges::new(&crossing, false)
    ));
    assert!(!polylines_intersect(
        Edges::new(&square, true),
        Edges::new(&inside, false)
    ));
    assert!(!polylines_intersect(
        Edges::new(&square, true),
        Edges::new(&outside, false)
    ));
}
