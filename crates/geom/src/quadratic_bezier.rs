use crate::flatten::{self, FlatteningOptions};
use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::min_max;
use crate::{point, Box2D, LineSegment, Point};

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        point(
            sample_1d(self.from.x, self.ctrl.x, self.to.x, t),
            sample_1d(self.from.y, self.ctrl.y, self.to.y, t),
        )
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Squared maximum distance between the curve and its baseline.
    ///
    /// Exact when the control point projects inside the baseline, in which case the
    /// farthest point of the curve is at `t = 0.5`. Otherwise the distance between the
    /// control point and the baseline is used, which bounds the curve because it lies
    /// in the triangle formed by its three points.
    pub fn flatness_squared(&self) -> S {
        let baseline = self.baseline();
        match baseline.projection_t(self.ctrl) {
            Some(t) if t >= S::ZERO && t <= S::ONE => {
                baseline.square_distance_to_point(self.sample(S::HALF))
            }
            _ => baseline.square_distance_to_point(self.ctrl),
        }
    }

    /// Approximates the curve with a sequence of line segments, invoking the callback
    /// with the end of each segment.
    pub fn for_each_flattened<F>(&self, options: &FlatteningOptions<S>, callback: &mut F)
    where
        F: FnMut(Point<S>),
    {
        flatten::for_each_flattened(self, options, &mut |p| callback(p));
    }

    /// Returns the smallest rectangle the curve is contained in
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns the smallest range of x that contains this curve.
    pub fn bounding_range_x(&self) -> (S, S) {
        bounding_range_1d(self.from.x, self.ctrl.x, self.to.x)
    }

    /// Returns the smallest range of y that contains this curve.
    pub fn bounding_range_y(&self) -> (S, S) {
        bounding_range_1d(self.from.y, self.ctrl.y, self.to.y)
    }
}

#[inline]
fn sample_1d<S: Scalar>(from: S, ctrl: S, to: S, t: S) -> S {
    let one_t = S::ONE - t;
    from * one_t * one_t + ctrl * S::TWO * one_t * t + to * t * t
}

fn bounding_range_1d<S: Scalar>(from: S, ctrl: S, to: S) -> (S, S) {
    let (mut min, mut max) = min_max(from, to);
    if let Some(t) = local_extremum_t(from, ctrl, to) {
        let v = sample_1d(from, ctrl, to, t);
        min = min.min(v);
        max = max.max(v);
    }

    (min, max)
}

// Root of the derivative of a one-dimensional quadratic bézier, if it lies strictly
// inside the curve.
fn local_extremum_t<S: Scalar>(from: S, ctrl: S, to: S) -> Option<S> {
    let div = from - S::TWO * ctrl + to;
    if div == S::ZERO {
        return None;
    }
    let t = (from - ctrl) / div;
    if t > S::ZERO && t < S::ONE {
        return Some(t);
    }

    None
}

impl<S: Scalar> Segment for QuadraticBezierSegment<S> {
    type Scalar = S;

    fn from(&self) -> Point<S> {
        self.from
    }

    fn to(&self) -> Point<S> {
        self.to
    }

    fn sample(&self, t: S) -> Point<S> {
        self.sample(t)
    }

    fn split(&self, t: S) -> (Self, Self) {
        self.split(t)
    }

    fn flatness_squared(&self) -> S {
        self.flatness_squared()
    }
}

#[test]
fn bounding_box_for_monotonic_quadratic_bezier_segment() {
    let a = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(0.0, 0.0),
        to: Point::new(2.0, 0.0),
    };

    let expected_aabb = Box2D {
        min: point(0.0, 0.0),
        max: point(2.0, 0.0),
    };

    assert_eq!(expected_aabb, a.bounding_box())
}

#[test]
fn minimum_bounding_box_for_quadratic_bezier_segment() {
    let a = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(1.0, 1.0),
        to: Point::new(2.0, 0.0),
    };

    let expected_aabb = Box2D {
        min: point(0.0, 0.0),
        max: point(2.0, 0.5),
    };

    assert_eq!(expected_aabb, a.bounding_box())
}

#[test]
fn local_extrema_for_simple_segment() {
    assert_eq!(local_extremum_t(0.0, 1.0, 0.0), Some(0.5));
    assert_eq!(local_extremum_t(0.0, 1.0, 2.0), None);
    // Control point beyond the end: the extremum sits outside ]0, 1[.
    assert_eq!(local_extremum_t(0.0, -1.0, -3.0), None);
}

#[test]
fn bounding_box_overshoot() {
    // The control point is beyond the end point on the x axis.
    let a = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(4.0, 2.0),
        to: Point::new(2.0, 4.0),
    };

    let (min_x, max_x): (f64, f64) = a.bounding_range_x();
    assert_eq!(min_x, 0.0);
    // x(t) = 8t - 6t², maximal at t = 2/3.
    assert!((max_x - 8.0 / 3.0).abs() < 1e-9);

    let mut x_max = 0.0f64;
    for i in 0..=100 {
        x_max = x_max.max(a.sample(i as f64 / 100.0).x);
    }
    assert!(x_max <= max_x + 1e-12);
}

#[test]
fn split_matches_sampling() {
    let c = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(10.0, 40.0),
        to: Point::new(30.0, 5.0),
    };

    let (a, b) = c.split(0.3);
    assert_eq!(a.to, b.from);
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((a.sample(t) - c.sample(t * 0.3)).length() < 1e-9);
        assert!((b.sample(t) - c.sample(0.3 + t * 0.7)).length() < 1e-9);
    }
}

#[test]
fn flatness_of_symmetric_curve() {
    let c = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(5.0, 10.0),
        to: Point::new(10.0, 0.0),
    };

    // The apex is half way between the baseline and the control point.
    assert_eq!(c.flatness_squared(), 25.0);

    let straight = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(5.0, 0.0),
        to: Point::new(10.0, 0.0),
    };
    assert_eq!(straight.flatness_squared(), 0.0);
}
