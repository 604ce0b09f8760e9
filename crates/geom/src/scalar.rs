//! The floating point types every curve is generic over.

pub(crate) use num_traits::Float;

use euclid::Trig;
use num_traits::FloatConst;

use core::fmt::{Debug, Display};
use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// `f32` or `f64`, with the handful of constants the curve math needs.
pub trait Scalar:
    Float + FloatConst + Trig + Display + Debug + AddAssign + SubAssign + MulAssign + DivAssign
{
    const ZERO: Self;
    const HALF: Self;
    const ONE: Self;
    const TWO: Self;
    const THREE: Self;
    const FOUR: Self;

    /// Lengths and radii at or below this are treated as zero.
    const EPSILON: Self;

    fn value(v: f32) -> Self;

    /// A full turn, in radians.
    #[inline]
    fn tau() -> Self {
        Self::PI() * Self::TWO
    }
}

macro_rules! impl_scalar {
    ($S:ty, $epsilon:expr) => {
        impl Scalar for $S {
            const ZERO: Self = 0.0;
            const HALF: Self = 0.5;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const THREE: Self = 3.0;
            const FOUR: Self = 4.0;

            const EPSILON: Self = $epsilon;

            #[inline]
            fn value(v: f32) -> Self {
                v as $S
            }
        }
    };
}

impl_scalar!(f32, 1e-4);
impl_scalar!(f64, 1e-8);

#[test]
fn full_turn() {
    assert_eq!(f64::tau(), 2.0 * core::f64::consts::PI);
    assert_eq!(f32::value(0.25), 0.25f32);
    assert_eq!(f64::value(0.5), 0.5f64);
}
