//! Iterating over the edges of point sequences.

use crate::geom::LineSegment;
use crate::math::Point;
use crate::path::Polyline;

/// The edges of a sequence of points, optionally closed by an edge from the last point
/// back to the first.
///
/// A single point produces one degenerate edge starting and ending at that point, so
/// that distance computations still see it. An empty slice produces nothing.
#[derive(Clone, Debug)]
pub struct Edges<'l> {
    points: &'l [Point],
    closed: bool,
    index: usize,
}

impl<'l> Edges<'l> {
    pub fn new(points: &'l [Point], closed: bool) -> Self {
        Edges {
            points,
            closed,
            index: 0,
        }
    }

    fn edge_count(&self) -> usize {
        match self.points.len() {
            0 => 0,
            1 => 1,
            n => {
                let closing = self.closed && self.points[n - 1] != self.points[0];
                n - 1 + closing as usize
            }
        }
    }
}

impl<'l> Iterator for Edges<'l> {
    type Item = LineSegment<f64>;

    fn next(&mut self) -> Option<LineSegment<f64>> {
        if self.index >= self.edge_count() {
            return None;
        }

        let i = self.index;
        self.index += 1;
        let n = self.points.len();

        Some(LineSegment {
            from: self.points[i],
            to: self.points[(i + 1) % n],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.edge_count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

/// The edges of every sub-path of a polyline.
///
/// With `force_closed`, open sub-paths are closed as well, which is what filling them
/// does.
pub fn polyline_edges(
    polyline: &Polyline,
    force_closed: bool,
) -> impl Iterator<Item = LineSegment<f64>> + Clone + '_ {
    polyline
        .iter_subpaths()
        .flat_map(move |(points, closed)| Edges::new(points, closed || force_closed))
}

#[cfg(test)]
use crate::math::point;

#[test]
fn open_and_closed_edges() {
    let points = [point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)];

    assert_eq!(Edges::new(&points, false).count(), 2);

    let closed: Vec<_> = Edges::new(&points, true).collect();
    assert_eq!(closed.len(), 3);
    assert_eq!(closed[2].from, point(1.0, 1.0));
    assert_eq!(closed[2].to, point(0.0, 0.0));

    // An explicit closing point does not produce a zero-length edge.
    let explicit = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 0.0),
    ];
    assert_eq!(Edges::new(&explicit, true).count(), 3);
}

#[test]
fn degenerate_edges() {
    assert_eq!(Edges::new(&[], true).next(), None);

    let single = [point(3.0, 4.0)];
    let edges: Vec<_> = Edges::new(&single, true).collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].from, edges[0].to);
}

#[test]
fn edges_of_subpaths() {
    let mut polyline = Polyline::new();
    polyline.begin(point(0.0, 0.0));
    polyline.push(point(1.0, 0.0));
    polyline.push(point(1.0, 1.0));
    polyline.begin(point(5.0, 5.0));
    polyline.push(point(6.0, 5.0));
    polyline.push(point(6.0, 6.0));
    polyline.close();

    assert_eq!(polyline_edges(&polyline, false).count(), 2 + 3);
    assert_eq!(polyline_edges(&polyline, true).count(), 3 + 3);
}
