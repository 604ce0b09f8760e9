//! Straight segments, the edges of every flattened path.

use crate::scalar::Scalar;
use crate::utils::min_max;
use crate::{Box2D, Point};

/// A straight segment between two points.
///
/// Both end points may be the same, in which case the segment behaves like a point
/// in every distance computation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn bounding_range_x(&self) -> (S, S) {
        min_max(self.from.x, self.to.x)
    }

    #[inline]
    pub fn bounding_range_y(&self) -> (S, S) {
        min_max(self.from.y, self.to.y)
    }

    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        Box2D {
            min: self.from.min(self.to),
            max: self.from.max(self.to),
        }
    }

    /// Where the orthogonal projection of `p` falls on the segment's line, as a curve
    /// parameter: 0 at `from`, 1 at `to`. Not clamped.
    ///
    /// `None` if both end points are the same.
    #[inline]
    pub fn projection_t(&self, p: Point<S>) -> Option<S> {
        let v = self.to - self.from;
        let len2 = v.square_length();
        if len2 == S::ZERO {
            return None;
        }

        Some((p - self.from).dot(v) / len2)
    }

    /// Squared distance between `p` and the closest point of the segment.
    #[inline]
    pub fn square_distance_to_point(&self, p: Point<S>) -> S {
        let t = match self.projection_t(p) {
            Some(t) => t.max(S::ZERO).min(S::ONE),
            None => S::ZERO,
        };

        (self.sample(t) - p).square_length()
    }

    /// Distance between `p` and the infinite line through the segment, positive on the
    /// side `from → to` turns towards with increasing angles.
    ///
    /// Zero if both end points are the same.
    #[inline]
    pub fn signed_line_distance(&self, p: Point<S>) -> S {
        let v = self.to - self.from;
        let len = v.length();
        if len == S::ZERO {
            return S::ZERO;
        }

        v.cross(p - self.from) / len
    }
}

#[cfg(test)]
use crate::point;

#[cfg(test)]
fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment<f64> {
    LineSegment {
        from: point(x0, y0),
        to: point(x1, y1),
    }
}

#[test]
fn bounding_box_of_any_orientation() {
    for (segment, min, max) in [
        (seg(1.0, 5.0, 5.0, 7.0), point(1.0, 5.0), point(5.0, 7.0)),
        (seg(5.0, 5.0, 1.0, 1.0), point(1.0, 1.0), point(5.0, 5.0)),
        (seg(3.0, 3.0, 1.0, 5.0), point(1.0, 3.0), point(3.0, 5.0)),
    ] {
        assert_eq!(segment.bounding_box(), Box2D { min, max });
        assert_eq!(segment.bounding_range_x(), (min.x, max.x));
        assert_eq!(segment.bounding_range_y(), (min.y, max.y));
    }
}

#[test]
fn distance_clamps_to_the_end_points() {
    let l = seg(0.0, 0.0, 10.0, 0.0);

    assert_eq!(l.square_distance_to_point(point(5.0, 3.0)), 9.0);
    assert_eq!(l.square_distance_to_point(point(13.0, 4.0)), 25.0);
    assert_eq!(l.square_distance_to_point(point(-3.0, -4.0)), 25.0);
    assert_eq!(l.projection_t(point(15.0, 1.0)), Some(1.5));
}

#[test]
fn degenerate_segment_is_a_point() {
    let l = seg(2.0, 2.0, 2.0, 2.0);

    assert_eq!(l.projection_t(point(5.0, 6.0)), None);
    assert_eq!(l.square_distance_to_point(point(5.0, 6.0)), 25.0);
    assert_eq!(l.signed_line_distance(point(5.0, 6.0)), 0.0);
}

#[test]
fn signed_distance_to_the_line() {
    let l = seg(0.0, 0.0, 10.0, 0.0);

    assert_eq!(l.signed_line_distance(point(3.0, 2.0)), 2.0);
    assert_eq!(l.signed_line_distance(point(30.0, -4.0)), -4.0);
    assert_eq!(l.signed_line_distance(point(-5.0, 0.0)), 0.0);
}
