//! The `{x, y, scale, skew, rotation}` description of an affine transform.

use crate::scalar::{Float, Scalar};
use crate::Transform;

/// Decomposed affine transform, as edited through a user interface.
///
/// The matrix it describes scales, then applies the combined skew and rotation, then
/// translates:
///
/// ```text
/// a = cos(rotation + skew_y) * scale_x     c = -sin(rotation - skew_x) * scale_y
/// b = sin(rotation + skew_y) * scale_x     d =  cos(rotation - skew_x) * scale_y
/// tx = x                                   ty = y
/// ```
///
/// `(a, b)` is the image of the x axis and `(c, d)` the image of the y axis. Rotation
/// and the two skews only set the angles of those two columns, so one of the three is
/// redundant. [`TransformProperties::from_transform`] always folds `skew_y` into
/// `rotation`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct TransformProperties<S> {
    pub x: S,
    pub y: S,
    pub scale_x: S,
    pub scale_y: S,
    /// In radians.
    pub skew_x: S,
    /// In radians.
    pub skew_y: S,
    /// In radians.
    pub rotation: S,
}

impl<S: Scalar> TransformProperties<S> {
    pub fn identity() -> Self {
        TransformProperties {
            x: S::ZERO,
            y: S::ZERO,
            scale_x: S::ONE,
            scale_y: S::ONE,
            skew_x: S::ZERO,
            skew_y: S::ZERO,
            rotation: S::ZERO,
        }
    }

    #[inline]
    pub fn with_position(mut self, x: S, y: S) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale_x: S, scale_y: S) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    #[inline]
    pub fn with_skew(mut self, skew_x: S, skew_y: S) -> Self {
        self.skew_x = skew_x;
        self.skew_y = skew_y;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: S) -> Self {
        self.rotation = rotation;
        self
    }

    /// Composes the matrix.
    pub fn to_transform(&self) -> Transform<S> {
        let (sin_x, cos_x) = Float::sin_cos(self.rotation + self.skew_y);
        let (sin_y, cos_y) = Float::sin_cos(self.rotation - self.skew_x);

        Transform::new(
            cos_x * self.scale_x,
            sin_x * self.scale_x,
            -sin_y * self.scale_y,
            cos_y * self.scale_y,
            self.x,
            self.y,
        )
    }

    /// Decomposes a matrix.
    ///
    /// Composing the result always gives back the original matrix. Getting back the
    /// original properties is only guaranteed when `skew_y` is zero, both scales are
    /// positive and the angles are in `(-π, π]`:
    ///
    /// - `skew_y` is folded into `rotation` and `skew_x`.
    /// - A negative scale comes back positive, with the rotation or the skew turned by
    ///   half a turn.
    pub fn from_transform(m: &Transform<S>) -> Self {
        let (a, b, c, d) = (m.m11, m.m12, m.m21, m.m22);

        let scale_x = S::sqrt(a * a + b * b);
        let scale_y = S::sqrt(c * c + d * d);
        let rotation = S::atan2(b, a);
        let skew_x = normalize_angle(rotation - S::atan2(-c, d));

        TransformProperties {
            x: m.m31,
            y: m.m32,
            scale_x,
            scale_y,
            skew_x,
            skew_y: S::ZERO,
            rotation,
        }
    }
}

impl<S: Scalar> Default for TransformProperties<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S: Scalar> From<TransformProperties<S>> for Transform<S> {
    fn from(props: TransformProperties<S>) -> Self {
        props.to_transform()
    }
}

/// Brings an angle in `(-π, π]`.
fn normalize_angle<S: Scalar>(a: S) -> S {
    let tau = S::tau();
    let mut a = a % tau;
    if a > S::PI() {
        a -= tau;
    } else if a <= -S::PI() {
        a += tau;
    }

    a
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use core::f64::consts::PI;

#[cfg(test)]
fn assert_transform_approx_eq(a: &Transform<f64>, b: &Transform<f64>) {
    let a = a.to_array();
    let b = b.to_array();
    for i in 0..6 {
        assert!((a[i] - b[i]).abs() < 1e-9, "{:?} != {:?}", a, b);
    }
}

#[test]
fn identity() {
    let t = TransformProperties::<f64>::default().to_transform();
    assert_transform_approx_eq(&t, &Transform::identity());

    let props = TransformProperties::from_transform(&Transform::<f64>::identity());
    assert_eq!(props, TransformProperties::identity());
}

#[test]
fn composition_order() {
    // Scale, then rotate a quarter turn, then translate.
    let t = TransformProperties::identity()
        .with_scale(2.0, 3.0)
        .with_rotation(PI / 2.0)
        .with_position(10.0, 20.0)
        .to_transform();

    let p = t.transform_point(point(1.0, 1.0));
    assert!((p - point(7.0, 22.0)).length() < 1e-9);

    // skew_x tilts the y axis towards the x axis, without changing its length.
    let t = TransformProperties::identity()
        .with_skew(PI / 4.0, 0.0)
        .to_transform();
    let p = t.transform_point(point(0.0, 1.0));
    let h = core::f64::consts::FRAC_1_SQRT_2;
    assert!((p - point(h, h)).length() < 1e-9);
    assert!((t.transform_point(point(1.0, 0.0)) - point(1.0, 0.0)).length() < 1e-9);
}

#[test]
fn round_trip() {
    let angles = [-3.0, -PI / 2.0, -1.0, -0.25, 0.0, 0.3, 1.2, PI / 2.0, 2.5, PI];
    let scales = [0.1, 0.5, 1.0, 2.0, 7.5];

    for &rotation in &angles {
        for &skew_x in &[-1.2, -0.4, 0.0, 0.6, 1.3] {
            for &scale_x in &scales {
                for &scale_y in &scales {
                    let props = TransformProperties {
                        x: 3.0,
                        y: -4.0,
                        scale_x,
                        scale_y,
                        skew_x,
                        skew_y: 0.0,
                        rotation,
                    };

                    let back = TransformProperties::from_transform(&props.to_transform());
                    assert!((back.x - props.x).abs() < 1e-9);
                    assert!((back.y - props.y).abs() < 1e-9);
                    assert!((back.scale_x - scale_x).abs() < 1e-9);
                    assert!((back.scale_y - scale_y).abs() < 1e-9);
                    assert_eq!(back.skew_y, 0.0);
                    // The angles are compared modulo a full turn so that π and -π match.
                    assert!(normalize_angle(back.rotation - rotation).abs() < 1e-9);
                    assert!(normalize_angle(back.skew_x - skew_x).abs() < 1e-9);
                }
            }
        }
    }
}

#[test]
fn decomposition_reproduces_the_matrix() {
    // Includes the cases that do not round trip: skew_y and negative scales.
    let cases = [
        TransformProperties::identity().with_skew(0.3, 0.5).with_rotation(1.0),
        TransformProperties::identity().with_scale(-2.0, 1.0).with_rotation(0.4),
        TransformProperties::identity().with_scale(1.5, -0.5).with_skew(-0.7, 0.0),
        TransformProperties::identity()
            .with_scale(-1.0, -1.0)
            .with_skew(0.1, -0.2)
            .with_rotation(-2.9)
            .with_position(5.0, 6.0),
    ];

    for props in &cases {
        let m = props.to_transform();
        let back = TransformProperties::from_transform(&m);
        assert_eq!(back.skew_y, 0.0);
        assert!(back.scale_x >= 0.0 && back.scale_y >= 0.0);
        assert_transform_approx_eq(&back.to_transform(), &m);
    }
}
