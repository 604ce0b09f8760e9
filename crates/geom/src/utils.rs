use crate::arc::ArcDirection;
use crate::scalar::Scalar;
use crate::Vector;

#[inline]
pub fn min_max<S: Scalar>(a: S, b: S) -> (S, S) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Angle between vectors v1 and v2, measured in the direction of increasing angles.
/// The result is a number between 0 and 2*PI.
///
/// ex: `directed_angle([1,0], [0,1]) = 1/2 Pi rad`
#[inline]
pub fn directed_angle<S: Scalar>(v1: Vector<S>, v2: Vector<S>) -> S {
    let angle = S::atan2(v2.y, v2.x) - S::atan2(v1.y, v1.x);

    if angle < S::ZERO {
        angle + S::tau()
    } else {
        angle
    }
}

/// `a` modulo `2π`, in `[0, 2π)`.
#[inline]
pub fn positive_angle<S: Scalar>(a: S) -> S {
    let tau = S::tau();
    let r = a % tau;
    let r = if r < S::ZERO { r + tau } else { r };
    // Adding tau to a tiny negative remainder can round up to tau.
    if r >= tau {
        S::ZERO
    } else {
        r
    }
}

/// Computes the signed sweep angle of an arc going from `start` to `end` in the given
/// direction.
///
/// - Differences of at least a full turn in the direction of the arc clamp to a full
///   turn (`2π` or `-2π`).
/// - Non-zero exact multiples of a full turn also produce a full turn.
/// - Otherwise the sweep is the difference reduced to `[0, 2π)` for positive arcs and
///   `(-2π, 0]` for negative arcs.
pub fn normalize_sweep<S: Scalar>(start: S, end: S, direction: ArcDirection) -> S {
    let tau = S::tau();
    let delta = end - start;

    match direction {
        ArcDirection::Positive => {
            if delta >= tau {
                return tau;
            }
            let r = positive_angle(delta);
            if r == S::ZERO && delta != S::ZERO {
                return tau;
            }
            r
        }
        ArcDirection::Negative => {
            if delta <= -tau {
                return -tau;
            }
            let r = positive_angle(-delta);
            if r == S::ZERO && delta != S::ZERO {
                return -tau;
            }
            -r
        }
    }
}

/// Whether `angle` is traversed by an arc starting at `start_angle` and sweeping
/// `sweep_angle` radians (negative sweeps run clockwise). Arcs of a full turn or more
/// contain every angle.
pub fn angle_in_sweep<S: Scalar>(angle: S, start_angle: S, sweep_angle: S) -> bool {
    if sweep_angle.abs() >= S::tau() {
        return true;
    }

    if sweep_angle >= S::ZERO {
        positive_angle(angle - start_angle) <= sweep_angle
    } else {
        positive_angle(start_angle - angle) <= -sweep_angle
    }
}

#[cfg(test)]
use crate::vector;
#[cfg(test)]
use core::f64::consts::PI;

#[test]
fn normalize_sweep_positive() {
    let d = ArcDirection::Positive;
    assert_eq!(normalize_sweep(0.0, PI, d), PI);
    assert_eq!(normalize_sweep(0.0, 0.0, d), 0.0);
    assert_eq!(normalize_sweep(0.0, 2.0 * PI, d), 2.0 * PI);
    assert_eq!(normalize_sweep(0.0, 5.0 * PI, d), 2.0 * PI);
    // Non-zero multiples of a full turn in the opposite direction.
    assert_eq!(normalize_sweep(0.0, -2.0 * PI, d), 2.0 * PI);
    // Going the "wrong way" wraps around.
    assert!((normalize_sweep(0.0, -PI / 2.0, d) - 1.5 * PI).abs() < 1e-12);
    assert!((normalize_sweep(PI, PI / 2.0, d) - 1.5 * PI).abs() < 1e-12);
}

#[test]
fn normalize_sweep_negative() {
    let d = ArcDirection::Negative;
    assert_eq!(normalize_sweep(PI, 0.0, d), -PI);
    assert_eq!(normalize_sweep(1.0, 1.0, d), 0.0);
    assert_eq!(normalize_sweep(0.0, -2.0 * PI, d), -2.0 * PI);
    assert_eq!(normalize_sweep(0.0, -7.0 * PI, d), -2.0 * PI);
    assert_eq!(normalize_sweep(0.0, 2.0 * PI, d), -2.0 * PI);
    assert!((normalize_sweep(0.0, PI / 2.0, d) + 1.5 * PI).abs() < 1e-12);
}

#[test]
fn sweep_membership() {
    // Quarter circle from 0 to π/2.
    assert!(angle_in_sweep(0.0, 0.0, PI / 2.0));
    assert!(angle_in_sweep(PI / 4.0, 0.0, PI / 2.0));
    assert!(angle_in_sweep(PI / 2.0, 0.0, PI / 2.0));
    assert!(!angle_in_sweep(PI, 0.0, PI / 2.0));
    assert!(!angle_in_sweep(-PI / 4.0, 0.0, PI / 2.0));

    // The same quarter walked clockwise from π/2.
    assert!(angle_in_sweep(PI / 4.0, PI / 2.0, -PI / 2.0));
    assert!(!angle_in_sweep(PI, PI / 2.0, -PI / 2.0));

    // Clockwise from 0 to -π/2 covers 7π/4.
    assert!(angle_in_sweep(1.75 * PI, 0.0, -PI / 2.0));
    assert!(!angle_in_sweep(PI / 2.0, 0.0, -PI / 2.0));

    // Full turns contain everything.
    assert!(angle_in_sweep(3.0, 1.0, 2.0 * PI));
    assert!(angle_in_sweep(3.0, 1.0, -2.0 * PI));
}

#[test]
fn directed_angles() {
    let a = directed_angle(vector(1.0, 0.0), vector(0.0, 1.0));
    assert!((a - PI / 2.0).abs() < 1e-12);
    let b = directed_angle(vector(0.0, 1.0), vector(1.0, 0.0));
    assert!((b - 1.5 * PI).abs() < 1e-12);
}
