//! Axis-aligned bounding boxes that can be empty.
//!
//! [`Bounds`] differs from `euclid::Box2D` in how it represents emptiness: the empty
//! box has `min = (+∞, +∞)` and `max = (-∞, -∞)`, which makes it the identity element
//! of [`Bounds::union`]. A box with zero width or height (the bounds of a point or of a
//! horizontal line) is not empty and unions like any other box.

use crate::scalar::Scalar;

use core::borrow::Borrow;
use crate::{point, size, Box2D, Point, Size, Transform};

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Bounds<S> {
    pub min: Point<S>,
    pub max: Point<S>,
}

impl<S: Scalar> Bounds<S> {
    #[inline]
    pub fn new(min: Point<S>, max: Point<S>) -> Self {
        Bounds { min, max }
    }

    /// The canonical empty box: `min = (+∞, +∞), max = (-∞, -∞)`.
    #[inline]
    pub fn empty() -> Self {
        let inf = S::infinity();
        Bounds {
            min: point(inf, inf),
            max: point(-inf, -inf),
        }
    }

    /// The box spanning from the origin to `size`.
    #[inline]
    pub fn from_size(size: Size<S>) -> Self {
        Bounds {
            min: point(S::ZERO, S::ZERO),
            max: point(size.width, size.height),
        }
    }

    /// The smallest box containing all of the points. Empty if there are none.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Point<S>>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include_point(*p.borrow());
        }

        bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    /// Grows the box to contain `p`.
    #[inline]
    pub fn include_point(&mut self, p: Point<S>) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// The smallest box containing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Whether the point is inside the box or on its boundary.
    #[inline]
    pub fn contains_point(&self, p: Point<S>) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Whether `other` lies inside this box, boundaries included.
    ///
    /// An empty box neither contains nor is contained by anything.
    #[inline]
    pub fn contains_bounds(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Whether the boxes share at least one point. Touching edges count.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Grows the box by `amount` in every direction. The empty box stays empty.
    #[inline]
    pub fn inflate(&self, amount: S) -> Self {
        if self.is_empty() {
            return *self;
        }

        Bounds {
            min: point(self.min.x - amount, self.min.y - amount),
            max: point(self.max.x + amount, self.max.y + amount),
        }
    }

    #[inline]
    pub fn width(&self) -> S {
        if self.is_empty() {
            return S::ZERO;
        }
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> S {
        if self.is_empty() {
            return S::ZERO;
        }
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Size<S> {
        size(self.width(), self.height())
    }

    /// The middle of the box. Not meaningful for the empty box.
    #[inline]
    pub fn center(&self) -> Point<S> {
        self.min.lerp(self.max, S::HALF)
    }

    /// The four corners, starting at `min` and going through `(max.x, min.y)`.
    #[inline]
    pub fn corners(&self) -> [Point<S>; 4] {
        [
            self.min,
            point(self.max.x, self.min.y),
            self.max,
            point(self.min.x, self.max.y),
        ]
    }

    /// Returns `None` for the empty box.
    #[inline]
    pub fn to_box2d(&self) -> Option<Box2D<S>> {
        if self.is_empty() {
            return None;
        }

        Some(Box2D {
            min: self.min,
            max: self.max,
        })
    }

    /// Applies the transform to the box.
    pub fn transformed(&self, transform: &Transform<S>) -> TransformedBounds<S> {
        TransformedBounds::new(self, transform)
    }
}

impl<S: Scalar> Default for Bounds<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Scalar> From<Box2D<S>> for Bounds<S> {
    fn from(b: Box2D<S>) -> Self {
        Bounds {
            min: b.min,
            max: b.max,
        }
    }
}

/// A bounding box after a transformation.
///
/// Holds the four transformed corners (an oriented box), their axis-aligned bounds
/// and the transformed center. All three are derived together from the source box and
/// the transform and cannot be changed independently.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformedBounds<S> {
    bounds: Bounds<S>,
    corners: Option<[Point<S>; 4]>,
    center: Option<Point<S>>,
}

impl<S: Scalar> TransformedBounds<S> {
    pub fn new(source: &Bounds<S>, transform: &Transform<S>) -> Self {
        if source.is_empty() {
            return Self::empty();
        }

        let corners = source.corners().map(|p| transform.transform_point(p));

        TransformedBounds {
            bounds: Bounds::from_points(&corners),
            corners: Some(corners),
            center: Some(transform.transform_point(source.center())),
        }
    }

    pub fn empty() -> Self {
        TransformedBounds {
            bounds: Bounds::empty(),
            corners: None,
            center: None,
        }
    }

    /// The box without any transformation applied.
    pub fn untransformed(source: &Bounds<S>) -> Self {
        Self::new(source, &Transform::identity())
    }

    /// The axis-aligned bounds of the transformed box.
    #[inline]
    pub fn bounds(&self) -> &Bounds<S> {
        &self.bounds
    }

    /// The transformed corners, or an empty slice for the empty box.
    #[inline]
    pub fn corners(&self) -> &[Point<S>] {
        match &self.corners {
            Some(corners) => corners,
            None => &[],
        }
    }

    #[inline]
    pub fn center(&self) -> Option<Point<S>> {
        self.center
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }
}

impl<S: Scalar> Default for TransformedBounds<S> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
use crate::{vector, Angle};

#[test]
fn empty_is_union_identity() {
    let a = Bounds::new(point(1.0, 2.0), point(3.0, 5.0));
    let empty = Bounds::empty();

    assert!(empty.is_empty());
    assert_eq!(empty.union(&a), a);
    assert_eq!(a.union(&empty), a);
    assert!(empty.union(&empty).is_empty());
    assert_eq!(empty.width(), 0.0);
}

#[test]
fn union_never_shrinks() {
    let boxes = [
        Bounds::new(point(0.0, 0.0), point(10.0, 10.0)),
        Bounds::new(point(-5.0, 3.0), point(2.0, 4.0)),
        Bounds::new(point(20.0, 20.0), point(20.0, 20.0)),
        Bounds::new(point(1.0, 1.0), point(2.0, 2.0)),
    ];

    for a in &boxes {
        for b in &boxes {
            let u = a.union(b);
            assert!(u.contains_bounds(a));
            assert!(u.contains_bounds(b));
        }
    }
}

#[test]
fn degenerate_boxes_are_not_empty() {
    // A horizontal line has a zero height but still has bounds.
    let line = Bounds::from_points(&[point(0.0, 5.0), point(10.0, 5.0)]);
    assert!(!line.is_empty());
    assert_eq!(line.height(), 0.0);

    let p = Bounds::from_points(&[point(3.0, 3.0)]);
    assert!(!p.is_empty());
    assert_eq!(
        p.union(&line),
        Bounds::new(point(0.0, 3.0), point(10.0, 5.0))
    );
}

#[test]
fn inclusive_tests() {
    let a = Bounds::new(point(0.0, 0.0), point(10.0, 10.0));
    let b = Bounds::new(point(10.0, 0.0), point(20.0, 10.0));
    let c = Bounds::new(point(10.5, 0.0), point(20.0, 10.0));

    assert!(a.contains_point(point(10.0, 10.0)));
    assert!(a.contains_point(point(0.0, 5.0)));
    assert!(!a.contains_point(point(10.1, 5.0)));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
    assert!(a.contains_bounds(&a));
    assert!(!a.intersects(&Bounds::empty()));
    assert!(!a.contains_bounds(&Bounds::empty()));
}

#[test]
fn transformed_bounds() {
    let b = Bounds::new(point(0.0, 0.0), point(10.0, 20.0));
    let transform = Transform::rotation(Angle::radians(core::f64::consts::FRAC_PI_2))
        .then_translate(vector(100.0, 0.0));

    let t = b.transformed(&transform);
    assert!(!t.is_empty());
    assert_eq!(t.corners().len(), 4);

    let expected = Bounds::new(point(80.0, 0.0), point(100.0, 10.0));
    assert!((t.bounds().min - expected.min).length() < 1e-9);
    assert!((t.bounds().max - expected.max).length() < 1e-9);
    assert!((t.center().unwrap() - point(90.0, 5.0)).length() < 1e-9);

    let identity = TransformedBounds::untransformed(&b);
    assert_eq!(*identity.bounds(), b);
    assert_eq!(identity.corners()[2], point(10.0, 20.0));
}

#[test]
fn transformed_empty_bounds() {
    let transform = Transform::scale(2.0, 3.0).then_translate(vector(1.0, 1.0));
    let t = Bounds::<f64>::empty().transformed(&transform);

    assert!(t.is_empty());
    assert!(t.bounds().is_empty());
    assert!(t.corners().is_empty());
    assert_eq!(t.center(), None);
}
