//! Elliptic arc related maths and tools.

use crate::flatten::{self, FlatteningOptions};
use crate::scalar::{Float, Scalar};
use crate::segment::Segment;
use crate::utils::{angle_in_sweep, directed_angle, normalize_sweep};
use crate::{point, vector, Angle, Box2D, LineSegment, Point, Vector};

/// The direction in which an arc is traversed.
///
/// `Positive` follows increasing angles (clockwise on screen when the y axis points
/// down), `Negative` follows decreasing angles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ArcDirection {
    #[default]
    Positive,
    Negative,
}

impl ArcDirection {
    #[inline]
    pub fn sign<S: Scalar>(self) -> S {
        match self {
            ArcDirection::Positive => S::ONE,
            ArcDirection::Negative => -S::ONE,
        }
    }
}

/// An elliptic arc curve segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc<S> {
    pub center: Point<S>,
    pub radii: Vector<S>,
    pub start_angle: Angle<S>,
    pub sweep_angle: Angle<S>,
    pub x_rotation: Angle<S>,
}

/// An elliptic arc curve segment using the SVG's end-point notation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SvgArc<S> {
    pub from: Point<S>,
    pub to: Point<S>,
    pub radii: Vector<S>,
    pub x_rotation: Angle<S>,
    pub flags: ArcFlags,
}

/// Flag parameters for arcs as described by the SVG specification.
///
/// For most situations using the SVG arc notation, there are four different arcs
/// (two different ellipses, each with two different arc sweeps) that satisfy the
/// arc parameter set. `large_arc` and `sweep` select which one is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    pub large_arc: bool,
    pub sweep: bool,
}

impl<S: Scalar> Arc<S> {
    /// A circular arc going from `start_angle` to `end_angle` in the given direction.
    ///
    /// The sweep is computed by [`normalize_sweep`].
    pub fn circle(
        center: Point<S>,
        radius: S,
        start_angle: Angle<S>,
        end_angle: Angle<S>,
        direction: ArcDirection,
    ) -> Self {
        Self::ellipse(
            center,
            vector(radius, radius),
            Angle::zero(),
            start_angle,
            end_angle,
            direction,
        )
    }

    /// An elliptic arc going from `start_angle` to `end_angle` in the given direction.
    pub fn ellipse(
        center: Point<S>,
        radii: Vector<S>,
        x_rotation: Angle<S>,
        start_angle: Angle<S>,
        end_angle: Angle<S>,
        direction: ArcDirection,
    ) -> Self {
        let sweep = normalize_sweep(start_angle.radians, end_angle.radians, direction);
        Arc {
            center,
            radii: vector(radii.x.abs(), radii.y.abs()),
            start_angle,
            sweep_angle: Angle::radians(sweep),
            x_rotation,
        }
    }

    /// Converts from the SVG arc notation.
    ///
    /// Radii that are too small to connect both end points are scaled up uniformly
    /// until the ellipse fits, as SVG renderers do. The conversion is meaningless when
    /// [`SvgArc::is_straight_line`] is true.
    pub fn from_svg_arc(arc: &SvgArc<S>) -> Arc<S> {
        debug_assert!(!arc.is_straight_line());

        let mut rx = S::abs(arc.radii.x);
        let mut ry = S::abs(arc.radii.y);

        let xr = arc.x_rotation.get() % S::tau();
        let (sin_phi, cos_phi) = Float::sin_cos(xr);
        let hd_x = (arc.from.x - arc.to.x) / S::TWO;
        let hd_y = (arc.from.y - arc.to.y) / S::TWO;
        let hs_x = (arc.from.x + arc.to.x) / S::TWO;
        let hs_y = (arc.from.y + arc.to.y) / S::TWO;

        // F6.5.1
        let p = point(
            cos_phi * hd_x + sin_phi * hd_y,
            -sin_phi * hd_x + cos_phi * hd_y,
        );

        // F6.6 Correction of out-of-range radii.
        let rf = p.x * p.x / (rx * rx) + p.y * p.y / (ry * ry);
        if rf > S::ONE {
            let scale = rf.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rxry = rx * ry;
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;

        debug_assert!(sum_of_sq != S::ZERO);

        // F6.5.2
        let sign_coe = if arc.flags.large_arc == arc.flags.sweep {
            -S::ONE
        } else {
            S::ONE
        };
        let coe = sign_coe * S::sqrt(S::abs((rxry * rxry - sum_of_sq) / sum_of_sq));
        let transformed_cx = coe * rxpy / ry;
        let transformed_cy = -coe * rypx / rx;

        // F6.5.3
        let center = point(
            cos_phi * transformed_cx - sin_phi * transformed_cy + hs_x,
            sin_phi * transformed_cx + cos_phi * transformed_cy + hs_y,
        );

        let start_v = vector(
            (p.x - transformed_cx) / rx,
            (p.y - transformed_cy) / ry,
        );
        let end_v = vector(
            (-p.x - transformed_cx) / rx,
            (-p.y - transformed_cy) / ry,
        );

        let start_angle = Angle::radians(S::atan2(start_v.y, start_v.x));

        // F6.5.6
        let mut sweep_angle = directed_angle(start_v, end_v);
        if !arc.flags.sweep {
            sweep_angle -= S::tau();
        }

        Arc {
            center,
            radii: vector(rx, ry),
            start_angle,
            sweep_angle: Angle::radians(sweep_angle),
            x_rotation: arc.x_rotation,
        }
    }

    /// Whether both radii are zero, in which case the arc is a single point.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.radii.x == S::ZERO && self.radii.y == S::ZERO
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.point_at_angle(self.get_angle(t))
    }

    /// Sample the curve's angle at t (expecting t between 0 and 1).
    #[inline]
    pub fn get_angle(&self, t: S) -> Angle<S> {
        self.start_angle + Angle::radians(self.sweep_angle.get() * t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.sample(S::ZERO)
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.sample(S::ONE)
    }

    /// The point of the ellipse at a given angle of its parametrization.
    #[inline]
    pub fn point_at_angle(&self, angle: Angle<S>) -> Point<S> {
        self.center + sample_ellipse(self.radii, self.x_rotation, angle)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (Arc<S>, Arc<S>) {
        let split_angle = Angle::radians(self.sweep_angle.get() * t);
        (
            Arc {
                sweep_angle: split_angle,
                ..*self
            },
            Arc {
                start_angle: self.start_angle + split_angle,
                sweep_angle: self.sweep_angle - split_angle,
                ..*self
            },
        )
    }

    /// Squared distance between the middle of the arc and its chord.
    ///
    /// The point of an elliptic arc farthest from its chord is the one where the
    /// tangent is parallel to the chord, which is at the middle of the angular span
    /// as long as the span does not exceed half a turn. Spans wider than a quarter
    /// turn are reported as infinitely far from flat so that they always get split.
    pub fn flatness_squared(&self) -> S {
        if self.is_point() {
            return S::ZERO;
        }

        if S::abs(self.sweep_angle.get()) > S::FRAC_PI_2() {
            return S::infinity();
        }

        LineSegment {
            from: self.from(),
            to: self.to(),
        }
        .square_distance_to_point(self.sample(S::HALF))
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
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns the smallest range of x that contains this curve.
    ///
    /// The x coordinate of the ellipse is extremal at `atan2(-ry·sin(φ), rx·cos(φ))` and
    /// half a turn later, `φ` being the x rotation.
    pub fn bounding_range_x(&self) -> (S, S) {
        let (sin, cos) = Float::sin_cos(self.x_rotation.get());
        let extremum = S::atan2(-self.radii.y * sin, self.radii.x * cos);
        self.bounding_range(extremum, |p| p.x)
    }

    /// Returns the smallest range of y that contains this curve.
    ///
    /// The y coordinate of the ellipse is extremal at `atan2(ry·cos(φ), rx·sin(φ))` and
    /// half a turn later.
    pub fn bounding_range_y(&self) -> (S, S) {
        let (sin, cos) = Float::sin_cos(self.x_rotation.get());
        let extremum = S::atan2(self.radii.y * cos, self.radii.x * sin);
        self.bounding_range(extremum, |p| p.y)
    }

    fn bounding_range(&self, extremum: S, coord: impl Fn(Point<S>) -> S) -> (S, S) {
        let from = coord(self.from());
        let to = coord(self.to());
        let mut min = from.min(to);
        let mut max = from.max(to);

        let start = self.start_angle.get();
        let sweep = self.sweep_angle.get();
        for angle in [extremum, extremum + S::PI()] {
            if angle_in_sweep(angle, start, sweep) {
                let v = coord(self.point_at_angle(Angle::radians(angle)));
                min = min.min(v);
                max = max.max(v);
            }
        }

        (min, max)
    }
}

impl<S: Scalar> SvgArc<S> {
    /// Converts this arc to the center parametrization.
    #[inline]
    pub fn to_arc(&self) -> Arc<S> {
        Arc::from_svg_arc(self)
    }

    /// Per SVG, an arc with a zero radius or identical end points is drawn as a
    /// straight line (or nothing at all).
    pub fn is_straight_line(&self) -> bool {
        S::abs(self.radii.x) <= S::EPSILON
            || S::abs(self.radii.y) <= S::EPSILON
            || self.from == self.to
    }
}

/// A circular arc joining two straight lines, as drawn by the canvas `arcTo` command.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TangentArc<S> {
    /// Where the arc touches the first line.
    pub start: Point<S>,
    /// Where the arc touches the second line.
    pub end: Point<S>,
    pub arc: Arc<S>,
}

/// Computes the arc of the given radius tangent to both the `from → corner` and the
/// `corner → to` lines.
///
/// Returns `None` when no such arc exists: zero radius, coincident points or collinear
/// lines. A straight line to `corner` should be drawn instead.
pub fn tangent_arc<S: Scalar>(
    from: Point<S>,
    corner: Point<S>,
    to: Point<S>,
    radius: S,
) -> Option<TangentArc<S>> {
    let radius = S::abs(radius);
    if radius <= S::EPSILON || from == corner || corner == to {
        return None;
    }

    let v1 = (from - corner).normalize();
    let v2 = (to - corner).normalize();
    let cross = v1.cross(v2);
    if S::abs(cross) <= S::EPSILON {
        return None;
    }

    // Half of the angle between the two lines at the corner.
    let half_angle = S::acos(v1.dot(v2).max(-S::ONE).min(S::ONE)) / S::TWO;
    let distance_to_tangent = radius / Float::tan(half_angle);
    let start = corner + v1 * distance_to_tangent;
    let end = corner + v2 * distance_to_tangent;
    let center = corner + (v1 + v2).normalize() * (radius / Float::sin(half_angle));

    // Walking from `from` to `to` turns towards increasing angles when the corner is a
    // right-hand turn in that frame.
    let direction = if cross < S::ZERO {
        ArcDirection::Positive
    } else {
        ArcDirection::Negative
    };

    let start_v = start - center;
    let start_angle = Angle::radians(S::atan2(start_v.y, start_v.x));
    let sweep = (S::PI() - half_angle * S::TWO) * direction.sign();

    Some(TangentArc {
        start,
        end,
        arc: Arc {
            center,
            radii: vector(radius, radius),
            start_angle,
            sweep_angle: Angle::radians(sweep),
            x_rotation: Angle::zero(),
        },
    })
}

fn sample_ellipse<S: Scalar>(radii: Vector<S>, x_rotation: Angle<S>, angle: Angle<S>) -> Vector<S> {
    let (sin, cos) = Float::sin_cos(angle.get());
    let (x, y) = (radii.x * cos, radii.y * sin);
    let (sin_r, cos_r) = Float::sin_cos(x_rotation.get());
    vector(x * cos_r - y * sin_r, x * sin_r + y * cos_r)
}

impl<S: Scalar> Segment for Arc<S> {
    type Scalar = S;

    fn from(&self) -> Point<S> {
        self.from()
    }

    fn to(&self) -> Point<S> {
        self.to()
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

#[cfg(test)]
use core::f64::consts::PI;
#[cfg(test)]
use std::vec::Vec;

#[cfg(test)]
fn assert_box_approx_eq(actual: Box2D<f64>, expected: Box2D<f64>) {
    let eps = 1e-9;
    assert!(
        (actual.min - expected.min).length() < eps && (actual.max - expected.max).length() < eps,
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn half_circle_bounding_box() {
    let arc = Arc::circle(
        point(50.0, 50.0),
        25.0,
        Angle::radians(0.0),
        Angle::radians(PI),
        ArcDirection::Positive,
    );

    assert_box_approx_eq(
        arc.bounding_box(),
        Box2D {
            min: point(25.0, 50.0),
            max: point(75.0, 75.0),
        },
    );

    // The same end points in the other direction cover the other half.
    let arc = Arc::circle(
        point(50.0, 50.0),
        25.0,
        Angle::radians(0.0),
        Angle::radians(PI),
        ArcDirection::Negative,
    );

    assert_box_approx_eq(
        arc.bounding_box(),
        Box2D {
            min: point(25.0, 25.0),
            max: point(75.0, 50.0),
        },
    );
}

#[test]
fn ellipse_bounding_box() {
    let arc = Arc::ellipse(
        point(50.0, 50.0),
        vector(40.0, 20.0),
        Angle::zero(),
        Angle::radians(0.0),
        Angle::radians(2.0 * PI),
        ArcDirection::Positive,
    );

    assert_box_approx_eq(
        arc.bounding_box(),
        Box2D {
            min: point(10.0, 30.0),
            max: point(90.0, 70.0),
        },
    );
}

#[test]
fn rotated_ellipse_bounding_box() {
    let arc = Arc::ellipse(
        point(0.0, 0.0),
        vector(40.0, 20.0),
        Angle::radians(PI / 2.0),
        Angle::radians(0.0),
        Angle::radians(2.0 * PI),
        ArcDirection::Positive,
    );

    assert_box_approx_eq(
        arc.bounding_box(),
        Box2D {
            min: point(-20.0, -40.0),
            max: point(20.0, 40.0),
        },
    );

    // Arbitrary rotation and span: the exact box contains every sample and is tight.
    let arc = Arc {
        center: point(10.0, -5.0),
        radii: vector(30.0, 12.0),
        start_angle: Angle::radians(0.3),
        sweep_angle: Angle::radians(4.0),
        x_rotation: Angle::radians(0.7),
    };

    let bbox = arc.bounding_box();
    let mut sampled = Box2D {
        min: arc.from(),
        max: arc.from(),
    };
    for i in 0..=10_000 {
        let p = arc.sample(i as f64 / 10_000.0);
        assert!(p.x >= bbox.min.x - 1e-9 && p.x <= bbox.max.x + 1e-9);
        assert!(p.y >= bbox.min.y - 1e-9 && p.y <= bbox.max.y + 1e-9);
        sampled.min = sampled.min.min(p);
        sampled.max = sampled.max.max(p);
    }
    assert!((sampled.min - bbox.min).length() < 1e-3);
    assert!((sampled.max - bbox.max).length() < 1e-3);
}

#[test]
fn zero_radius_arc_collapses() {
    let arc = Arc::circle(
        point(5.0, 5.0),
        0.0,
        Angle::radians(0.0),
        Angle::radians(2.0 * PI),
        ArcDirection::Positive,
    );

    assert!(arc.is_point());
    let mut points = Vec::new();
    arc.for_each_flattened(&FlatteningOptions::tolerance(0.1), &mut |p| points.push(p));
    assert_eq!(points, [point(5.0, 5.0)]);
    assert_eq!(
        arc.bounding_box(),
        Box2D {
            min: point(5.0, 5.0),
            max: point(5.0, 5.0)
        }
    );
}

#[test]
fn flattened_arc_within_tolerance() {
    let arc = Arc::circle(
        point(0.0, 0.0),
        100.0,
        Angle::radians(0.0),
        Angle::radians(2.0 * PI),
        ArcDirection::Negative,
    );

    for &tolerance in &[1.0, 0.25, 0.01] {
        let mut points = Vec::new();
        points.push(arc.from());
        arc.for_each_flattened(&FlatteningOptions::tolerance(tolerance), &mut |p| {
            points.push(p)
        });

        assert!((*points.last().unwrap() - arc.to()).length() < 1e-9);
        // Every chord's middle is within tolerance of the circle.
        for w in points.windows(2) {
            let mid = w[0].lerp(w[1], 0.5);
            let d = 100.0 - mid.to_vector().length();
            assert!(d <= tolerance * 1.0001);
        }
    }
}

#[test]
fn from_svg_arc() {
    // A half circle from (0, 0) to (20, 0).
    let svg = SvgArc {
        from: point(0.0, 0.0),
        to: point(20.0, 0.0),
        radii: vector(10.0, 10.0),
        x_rotation: Angle::zero(),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    };

    let arc = svg.to_arc();
    assert!((arc.center - point(10.0, 0.0)).length() < 1e-9);
    assert!((arc.from() - svg.from).length() < 1e-9);
    assert!((arc.to() - svg.to).length() < 1e-9);
    assert!(arc.sweep_angle.get() > 0.0);

    // Radii too small to join the end points get scaled up.
    let svg = SvgArc {
        radii: vector(2.0, 2.0),
        flags: ArcFlags {
            large_arc: true,
            sweep: false,
        },
        ..svg
    };
    let arc = svg.to_arc();
    assert!((arc.radii.x - 10.0).abs() < 1e-9);
    assert!((arc.from() - svg.from).length() < 1e-6);
    assert!((arc.to() - svg.to).length() < 1e-6);
    assert!(arc.sweep_angle.get() < 0.0);

    let line = SvgArc {
        radii: vector(0.0, 5.0),
        ..svg
    };
    assert!(line.is_straight_line());
}

#[test]
fn tangent_arc_right_angle() {
    // Going right then down (y pointing down) around the corner (10, 0).
    let arc = tangent_arc(point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), 5.0).unwrap();

    assert!((arc.start - point(5.0, 0.0)).length() < 1e-9);
    assert!((arc.end - point(10.0, 5.0)).length() < 1e-9);
    assert!((arc.arc.center - point(5.0, 5.0)).length() < 1e-9);
    assert!((arc.arc.from() - arc.start).length() < 1e-9);
    assert!((arc.arc.to() - arc.end).length() < 1e-9);
    assert!((arc.arc.sweep_angle.get() - PI / 2.0).abs() < 1e-9);

    // The mirrored turn sweeps the other way.
    let arc = tangent_arc(point(0.0, 0.0), point(10.0, 0.0), point(10.0, -10.0), 5.0).unwrap();
    assert!((arc.arc.center - point(5.0, -5.0)).length() < 1e-9);
    assert!((arc.arc.to() - arc.end).length() < 1e-9);
    assert!((arc.arc.sweep_angle.get() + PI / 2.0).abs() < 1e-9);
}

#[test]
fn tangent_arc_degenerate() {
    let collinear = tangent_arc(point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0), 5.0);
    assert!(collinear.is_none());
    let zero_radius = tangent_arc(point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), 0.0);
    assert!(zero_radius.is_none());
    let coincident = tangent_arc(point(10.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), 5.0);
    assert!(coincident.is_none());
}
