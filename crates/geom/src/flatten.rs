//! Adaptive flattening by recursive subdivision.
//!
//! A span of a curve is accepted as a line segment when the curve does not stray
//! further than the tolerance from the span's chord, as measured by
//! [`Segment::flatness_squared`]. Otherwise the span is split in the middle of its
//! parameter range and both halves are processed, left half first, so that points
//! are always produced in curve order.
//!
//! The subdivision depth is bounded by the tolerance: each split at least halves the
//! distance between a well-behaved curve and its chord. [`FlatteningOptions::max_depth`]
//! additionally caps the recursion for pathological input (infinite or NaN coordinates).

use crate::scalar::{Float, Scalar};
use crate::segment::Segment;
use crate::Point;

/// Parameters of the flattening algorithms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FlatteningOptions<S> {
    /// Maximum allowed distance between the curve and its approximation.
    ///
    /// Default value: `FlatteningOptions::DEFAULT_TOLERANCE`.
    pub tolerance: S,

    /// Maximum number of times a span can be split.
    ///
    /// A curve never produces more than `2^max_depth` points.
    ///
    /// Default value: `FlatteningOptions::DEFAULT_MAX_DEPTH`.
    pub max_depth: u32,
}

impl<S: Scalar> FlatteningOptions<S> {
    pub const DEFAULT_MAX_DEPTH: u32 = 16;

    /// Default flattening tolerance, corresponding to a quality of 4.
    pub fn default_tolerance() -> S {
        S::value(0.25)
    }

    #[inline]
    pub fn tolerance(tolerance: S) -> Self {
        FlatteningOptions {
            tolerance,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Options for a given quality level. The tolerance is `1 / quality`.
    #[inline]
    pub fn quality(quality: S) -> Self {
        Self::tolerance(S::ONE / quality)
    }

    #[inline]
    pub fn with_tolerance(mut self, tolerance: S) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl<S: Scalar> Default for FlatteningOptions<S> {
    fn default() -> Self {
        Self::tolerance(Self::default_tolerance())
    }
}

/// Approximates the curve with a sequence of line segments, invoking the callback
/// with the end of each segment and the curve parameter at that point.
///
/// The start of the curve is not passed to the callback. The last point is always
/// the end of the curve, at `t = 1`.
pub fn for_each_flattened_with_t<C: Segment>(
    curve: &C,
    options: &FlatteningOptions<C::Scalar>,
    callback: &mut dyn FnMut(Point<C::Scalar>, C::Scalar),
) {
    let tolerance = Float::max(options.tolerance, C::Scalar::EPSILON);
    let tolerance_sq = tolerance * tolerance;
    subdivide(
        curve,
        C::Scalar::ZERO,
        C::Scalar::ONE,
        tolerance_sq,
        options.max_depth,
        callback,
    );
}

/// Approximates the curve with a sequence of line segments, invoking the callback
/// with the end of each segment.
pub fn for_each_flattened<C: Segment>(
    curve: &C,
    options: &FlatteningOptions<C::Scalar>,
    callback: &mut dyn FnMut(Point<C::Scalar>),
) {
    for_each_flattened_with_t(curve, options, &mut |p, _| callback(p));
}

fn subdivide<C: Segment>(
    span: &C,
    t0: C::Scalar,
    t1: C::Scalar,
    tolerance_sq: C::Scalar,
    depth: u32,
    callback: &mut dyn FnMut(Point<C::Scalar>, C::Scalar),
) {
    // `!(a > b)` rather than `a <= b` so that NaN deviations terminate.
    if depth == 0 || !(span.flatness_squared() > tolerance_sq) {
        callback(span.to(), t1);
        return;
    }

    let (left, right) = span.split(C::Scalar::HALF);
    let t_mid = (t0 + t1) * C::Scalar::HALF;
    subdivide(&left, t0, t_mid, tolerance_sq, depth - 1, callback);
    subdivide(&right, t_mid, t1, tolerance_sq, depth - 1, callback);
}

#[cfg(test)]
use crate::{point, CubicBezierSegment, LineSegment, QuadraticBezierSegment};
#[cfg(test)]
use std::vec::Vec;

#[cfg(test)]
fn flattened_points<C: Segment<Scalar = f64>>(curve: &C, tolerance: f64) -> Vec<Point<f64>> {
    let mut points = Vec::new();
    points.push(curve.from());
    for_each_flattened(
        curve,
        &FlatteningOptions::tolerance(tolerance),
        &mut |p| points.push(p),
    );
    points
}

#[cfg(test)]
fn max_distance_to_polyline<C: Segment<Scalar = f64>>(curve: &C, polyline: &[Point<f64>]) -> f64 {
    let mut max_d: f64 = 0.0;
    let n = 2000;
    for i in 0..=n {
        let p = curve.sample(i as f64 / n as f64);
        let mut d = f64::MAX;
        for w in polyline.windows(2) {
            let seg = LineSegment {
                from: w[0],
                to: w[1],
            };
            d = d.min(seg.square_distance_to_point(p).sqrt());
        }
        max_d = max_d.max(d);
    }

    max_d
}

#[test]
fn flattened_quadratic_within_tolerance() {
    let curves = [
        QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(50.0, 100.0),
            to: point(100.0, 0.0),
        },
        QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(200.0, 10.0),
            to: point(10.0, 20.0),
        },
        QuadraticBezierSegment {
            from: point(-30.0, 5.0),
            ctrl: point(1.0, 1.0),
            to: point(30.0, 5.0),
        },
    ];

    for curve in &curves {
        for quality in &[0.5, 1.0, 4.0, 16.0, 100.0] {
            let tolerance = 1.0 / quality;
            let points = flattened_points(curve, tolerance);
            let d = max_distance_to_polyline(curve, &points);
            assert!(d <= tolerance * 1.001, "{:?} quality {}: {} > {}", curve, quality, d, tolerance);
        }
    }
}

#[test]
fn flattened_cubic_within_tolerance() {
    let curves = [
        CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.0, 100.0),
            ctrl2: point(100.0, 100.0),
            to: point(100.0, 0.0),
        },
        // S-shaped: the middle of the curve lies on the chord.
        CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(100.0, 100.0),
            ctrl2: point(200.0, -100.0),
            to: point(300.0, 0.0),
        },
        // Loop.
        CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(150.0, 100.0),
            ctrl2: point(-50.0, 100.0),
            to: point(100.0, 0.0),
        },
    ];

    for curve in &curves {
        for quality in &[0.5, 1.0, 4.0, 16.0, 100.0] {
            let tolerance = 1.0 / quality;
            let points = flattened_points(curve, tolerance);
            let d = max_distance_to_polyline(curve, &points);
            assert!(d <= tolerance * 1.001, "{:?} quality {}: {} > {}", curve, quality, d, tolerance);
        }
    }
}

#[test]
fn flatten_ends_at_t_one() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0, 30.0),
        ctrl2: point(40.0, -20.0),
        to: point(50.0, 5.0),
    };

    let mut last = None;
    let mut previous_t = 0.0;
    for_each_flattened_with_t(&curve, &FlatteningOptions::tolerance(0.01), &mut |p, t| {
        assert!(t > previous_t);
        previous_t = t;
        last = Some((p, t));
    });

    assert_eq!(last, Some((point(50.0, 5.0), 1.0)));
}

#[test]
fn flatten_straight_curve_emits_single_point() {
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 5.0),
        to: point(10.0, 10.0),
    };

    let points = flattened_points(&curve, 0.1);
    assert_eq!(points, [point(0.0, 0.0), point(10.0, 10.0)]);
}

#[test]
fn max_depth_bounds_point_count() {
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0e6, 1.0e6),
        to: point(2.0e6, 0.0),
    };

    let mut count = 0;
    for_each_flattened(
        &curve,
        &FlatteningOptions::tolerance(1e-9).with_max_depth(4),
        &mut |_| count += 1,
    );

    assert_eq!(count, 16);
}
