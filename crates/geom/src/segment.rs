//! The interface the flattening algorithm works against.

use crate::scalar::Scalar;
use crate::Point;

/// A curve parametrized over `t` in `[0, 1]`.
///
/// This is all [`for_each_flattened`](crate::flatten::for_each_flattened) needs: the
/// end points, a way to cut the curve in two and an estimate of how far the curve
/// strays from its chord.
pub trait Segment: Copy {
    type Scalar: Scalar;

    fn from(&self) -> Point<Self::Scalar>;

    fn to(&self) -> Point<Self::Scalar>;

    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// The parts of the curve before and after `t`.
    fn split(&self, t: Self::Scalar) -> (Self, Self);

    /// Squared distance between the curve and the chord from [`Segment::from`] to
    /// [`Segment::to`], or an upper bound of it.
    fn flatness_squared(&self) -> Self::Scalar;
}
