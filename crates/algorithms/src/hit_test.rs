//! Determine whether a point is inside a filled ring.

use crate::edges::{polyline_edges, Edges};
use crate::geom::LineSegment;
use crate::math::Point;
use crate::path::{FillRule, Polyline};

/// Returns whether the point is inside the ring, which is implicitly closed.
pub fn point_in_polygon(point: Point, ring: &[Point], fill_rule: FillRule) -> bool {
    fill_rule.is_in(winding_number(point, ring))
}

/// Returns whether the point is inside the area covered by filling every sub-path of
/// the polyline. Open sub-paths are implicitly closed.
pub fn point_in_polyline_fill(point: Point, polyline: &Polyline, fill_rule: FillRule) -> bool {
    fill_rule.is_in(edges_winding_number(point, polyline_edges(polyline, true)))
}

/// Compute the winding number of a given position with respect to the implicitly
/// closed ring.
pub fn winding_number(point: Point, ring: &[Point]) -> i32 {
    edges_winding_number(point, Edges::new(ring, true))
}

/// Compute the winding number of a given position with respect to a set of edges that
/// form closed loops.
pub fn edges_winding_number<Iter>(point: Point, edges: Iter) -> i32
where
    Iter: IntoIterator<Item = LineSegment<f64>>,
{
    // Loop over the edges and compute the winding number at that point by accumulating the
    // winding of all edges intersecting the horizontal line passing through our point which are
    // left of it.
    let mut winding = 0;
    for edge in edges {
        test_segment(point, &edge, &mut winding);
    }

    winding
}

fn test_segment(point: Point, segment: &LineSegment<f64>, winding: &mut i32) {
    let y0 = segment.from.y;
    let y1 = segment.to.y;
    let min_y = f64::min(y0, y1);
    let max_y = f64::max(y0, y1);

    // Edges are half-open in y so that a vertex shared by two edges is counted once.
    if min_y > point.y || max_y <= point.y || f64::min(segment.from.x, segment.to.x) > point.x {
        return;
    }

    let d = y1 - y0;
    let t = (point.y - y0) / d;
    let x = segment.sample(t).x;

    if x > point.x {
        return;
    }

    *winding += if d > 0.0 { 1 } else { -1 };
}

#[cfg(test)]
use crate::math::point;

#[test]
fn square_with_hole() {
    let outer = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    let inner = [
        point(0.25, 0.25),
        point(0.75, 0.25),
        point(0.75, 0.75),
        point(0.20, 0.75),
    ];

    let mut polyline = Polyline::new();
    for ring in &[&outer[..], &inner[..]] {
        polyline.begin(ring[0]);
        for p in &ring[1..] {
            polyline.push(*p);
        }
        polyline.close();
    }

    let hit = |p: Point, rule: FillRule| point_in_polyline_fill(p, &polyline, rule);

    assert!(!hit(point(-1.0, 0.5), FillRule::EvenOdd));
    assert!(!hit(point(2.0, 0.5), FillRule::EvenOdd));
    assert!(!hit(point(2.0, 0.0), FillRule::EvenOdd));
    assert!(!hit(point(0.5, -1.0), FillRule::EvenOdd));
    assert!(!hit(point(0.5, 2.0), FillRule::EvenOdd));

    assert!(!hit(point(0.5, 0.5), FillRule::EvenOdd));
    assert!(hit(point(0.5, 0.5), FillRule::NonZero));
    assert!(hit(point(0.2, 0.5), FillRule::EvenOdd));
    assert!(hit(point(0.8, 0.5), FillRule::EvenOdd));
}

#[test]
fn winding_number_of_rings() {
    let square = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    assert_eq!(winding_number(point(5.0, 5.0), &square).abs(), 1);
    assert_eq!(winding_number(point(15.0, 5.0), &square), 0);
    assert_eq!(winding_number(point(5.0, 15.0), &square), 0);

    // The ray passes exactly through a vertex.
    let diamond = [
        point(5.0, 0.0),
        point(10.0, 5.0),
        point(5.0, 10.0),
        point(0.0, 5.0),
    ];
    assert_eq!(winding_number(point(5.0, 5.0), &diamond).abs(), 1);
    assert_eq!(winding_number(point(11.0, 5.0), &diamond), 0);
    assert!(point_in_polygon(point(5.0, 5.0), &diamond, FillRule::EvenOdd));
    assert!(!point_in_polygon(point(-1.0, 5.0), &diamond, FillRule::EvenOdd));
}

#[test]
fn self_intersecting_ring() {
    // A pentagram: the center is covered twice.
    let star = [
        point(50.0, 0.0),
        point(79.0, 90.0),
        point(2.0, 35.0),
        point(98.0, 35.0),
        point(21.0, 90.0),
    ];
    let center = point(50.0, 45.0);
    assert_eq!(winding_number(center, &star).abs(), 2);
    assert!(!point_in_polygon(center, &star, FillRule::EvenOdd));
    assert!(point_in_polygon(center, &star, FillRule::NonZero));
}

#[test]
fn degenerate_rings() {
    assert_eq!(winding_number(point(0.0, 0.0), &[]), 0);
    assert_eq!(winding_number(point(0.0, 0.0), &[point(0.0, 0.0)]), 0);
    let line = [point(0.0, 0.0), point(10.0, 10.0)];
    assert!(!point_in_polygon(point(5.0, 5.0), &line, FillRule::NonZero));
}
