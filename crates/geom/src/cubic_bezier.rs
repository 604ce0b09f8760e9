use crate::flatten::{self, FlatteningOptions};
use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::min_max;
use crate::{point, Box2D, LineSegment, Point};

use arrayvec::ArrayVec;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        point(
            sample_1d(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x, t),
            sample_1d(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y, t),
        )
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (Self, Self) {
        let ctrl1a = self.from.lerp(self.ctrl1, t);
        let ctrl2a = self.ctrl1.lerp(self.ctrl2, t);
        let ctrl3a = self.ctrl2.lerp(self.to, t);
        let ctrl1aa = ctrl1a.lerp(ctrl2a, t);
        let ctrl2aa = ctrl2a.lerp(ctrl3a, t);
        let split_point = ctrl1aa.lerp(ctrl2aa, t);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: split_point,
            },
            CubicBezierSegment {
                from: split_point,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
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
    /// When both control points project inside the baseline, the offset of the curve
    /// from the baseline is the one-dimensional cubic `3t(1-t)((1-t)a + tb)` where `a`
    /// and `b` are the signed distances of the control points, and its maximum is found
    /// at the roots of its derivative. This catches S-shaped curves that cross their
    /// baseline in the middle.
    ///
    /// Otherwise the farthest control point is used, which bounds the curve since it
    /// lies in the convex hull of its control polygon.
    pub fn flatness_squared(&self) -> S {
        let baseline = self.baseline();
        let projects_inside =
            |p: Point<S>| matches!(baseline.projection_t(p), Some(t) if t >= S::ZERO && t <= S::ONE);

        if !projects_inside(self.ctrl1) || !projects_inside(self.ctrl2) {
            return baseline
                .square_distance_to_point(self.ctrl1)
                .max(baseline.square_distance_to_point(self.ctrl2));
        }

        let a = baseline.signed_line_distance(self.ctrl1);
        let b = baseline.signed_line_distance(self.ctrl2);

        let mut max = S::ZERO;
        for t in local_extrema(S::ZERO, a, b, S::ZERO) {
            let d = sample_1d(S::ZERO, a, b, S::ZERO, t);
            max = max.max(d * d);
        }

        max
    }

    /// Approximates the curve with a sequence of line segments, invoking the callback
    /// with the end of each segment.
    pub fn for_each_flattened<F>(&self, options: &FlatteningOptions<S>, callback: &mut F)
    where
        F: FnMut(Point<S>),
    {
        flatten::for_each_flattened(self, options, &mut |p| callback(p));
    }

    /// Returns the smallest rectangle that contains the curve.
    #[inline]
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
        bounding_range_1d(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x)
    }

    /// Returns the smallest range of y that contains this curve.
    pub fn bounding_range_y(&self) -> (S, S) {
        bounding_range_1d(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y)
    }
}

#[inline]
fn sample_1d<S: Scalar>(p0: S, p1: S, p2: S, p3: S, t: S) -> S {
    let one_t = S::ONE - t;
    let one_t2 = one_t * one_t;
    let t2 = t * t;

    p0 * one_t2 * one_t + p1 * S::THREE * one_t2 * t + p2 * S::THREE * one_t * t2 + p3 * t2 * t
}

fn bounding_range_1d<S: Scalar>(p0: S, p1: S, p2: S, p3: S) -> (S, S) {
    let (mut min, mut max) = min_max(p0, p3);
    for t in local_extrema(p0, p1, p2, p3) {
        let v = sample_1d(p0, p1, p2, p3, t);
        min = min.min(v);
        max = max.max(v);
    }

    (min, max)
}

// A third of the derivative of a one-dimensional cubic bézier is the second degree
// polynomial a * t² + b * t + c. Its roots in ]0, 1[ are the local extrema, returned
// in increasing order.
fn local_extrema<S: Scalar>(p0: S, p1: S, p2: S, p3: S) -> ArrayVec<S, 2> {
    let a = p3 + S::THREE * (p1 - p2) - p0;
    let b = S::TWO * (p2 - S::TWO * p1 + p0);
    let c = p1 - p0;

    let mut roots = ArrayVec::new();
    if a == S::ZERO {
        if b != S::ZERO {
            roots.push(-c / b);
        }
    } else {
        let discriminant = b * b - S::FOUR * a * c;
        if discriminant == S::ZERO {
            roots.push(-b / (S::TWO * a));
        } else if discriminant > S::ZERO {
            let discriminant_sqrt = discriminant.sqrt();
            let (first, second) = min_max(
                (-b - discriminant_sqrt) / (S::TWO * a),
                (-b + discriminant_sqrt) / (S::TWO * a),
            );
            roots.push(first);
            roots.push(second);
        }
    }

    roots.retain(|t| *t > S::ZERO && *t < S::ONE);
    roots
}

impl<S: Scalar> Segment for CubicBezierSegment<S> {
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
fn minimum_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0f32, 0.0),
        ctrl1: Point::new(0.5, 2.0),
        ctrl2: Point::new(1.5, -2.0),
        to: Point::new(2.0, 0.0),
    };

    let expected_bigger_aabb: Box2D<f32> = Box2D {
        min: point(0.0, -0.6),
        max: point(2.0, 0.6),
    };
    let expected_smaller_aabb: Box2D<f32> = Box2D {
        min: point(0.1, -0.5),
        max: point(2.0, 0.5),
    };

    let actual_minimum_aabb = a.bounding_box();

    assert!(expected_bigger_aabb.contains_box(&actual_minimum_aabb));
    assert!(actual_minimum_aabb.contains_box(&expected_smaller_aabb));
}

#[test]
fn bounding_box_contains_samples() {
    let curves = [
        CubicBezierSegment {
            from: point(0.0f64, 0.0),
            ctrl1: point(150.0, 100.0),
            ctrl2: point(-50.0, 100.0),
            to: point(100.0, 0.0),
        },
        CubicBezierSegment {
            from: point(10.0, 10.0),
            ctrl1: point(-20.0, 60.0),
            ctrl2: point(80.0, -40.0),
            to: point(30.0, 5.0),
        },
    ];

    for curve in &curves {
        let bbox = curve.bounding_box();
        let mut touches_max_y = false;
        for i in 0..=1000 {
            let p = curve.sample(i as f64 / 1000.0);
            assert!(p.x >= bbox.min.x - 1e-9 && p.x <= bbox.max.x + 1e-9);
            assert!(p.y >= bbox.min.y - 1e-9 && p.y <= bbox.max.y + 1e-9);
            touches_max_y |= (p.y - bbox.max.y).abs() < 1e-3;
        }
        // Tight, not just conservative.
        assert!(touches_max_y);
    }
}

#[test]
fn y_extremum_of_arch() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(1.0, 2.0),
        ctrl2: Point::new(2.0, 2.0),
        to: Point::new(3.0, 0.0),
    };

    assert_eq!(local_extrema(a.from.y, a.ctrl1.y, a.ctrl2.y, a.to.y).as_slice(), &[0.5]);
    assert!(local_extrema(a.from.x, a.ctrl1.x, a.ctrl2.x, a.to.x).is_empty());
    assert_eq!(a.bounding_range_y(), (0.0, 1.5));
}

#[test]
fn x_extremum_of_cusp() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(1.0, 2.0),
        ctrl2: Point::new(1.0, 2.0),
        to: Point::new(0.0, 0.0),
    };

    assert_eq!(local_extrema(a.from.x, a.ctrl1.x, a.ctrl2.x, a.to.x).as_slice(), &[0.5]);
    assert_eq!(a.bounding_range_x(), (0.0, 0.75));
}

#[test]
fn two_extrema_in_order() {
    let roots = local_extrema(0.0f64, 2.0, -2.0, 0.0);

    assert_eq!(roots.len(), 2);
    assert!(roots[0] < roots[1]);
}

#[test]
fn split_matches_sampling() {
    let c = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(10.0, 40.0),
        ctrl2: point(50.0, -30.0),
        to: point(60.0, 10.0),
    };

    let (a, b) = c.split(0.4);
    assert_eq!(a.to, b.from);
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((a.sample(t) - c.sample(t * 0.4)).length() < 1e-9);
        assert!((b.sample(t) - c.sample(0.4 + t * 0.6)).length() < 1e-9);
    }
}

#[test]
fn flatness_of_s_curve() {
    // The middle of the curve lies on the baseline but the curve does not.
    let c = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(100.0, 100.0),
        ctrl2: point(200.0, -100.0),
        to: point(300.0, 0.0),
    };

    assert_eq!(c.sample(0.5), point(150.0, 0.0));

    let mut max_d2: f64 = 0.0;
    for i in 0..=1000 {
        let p = c.sample(i as f64 / 1000.0);
        max_d2 = max_d2.max(c.baseline().square_distance_to_point(p));
    }

    let flatness = c.flatness_squared();
    assert!(flatness > 0.0);
    assert!(flatness >= max_d2 - 1e-6);
    assert!(flatness <= max_d2 * 1.01);
}

#[test]
fn flatness_of_straight_cubic() {
    let c = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 0.0),
        to: point(3.0, 0.0),
    };

    assert_eq!(c.flatness_squared(), 0.0);
}
