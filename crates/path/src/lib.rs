#![deny(bare_trait_objects)]
#![allow(clippy::match_like_matches_macro)]

//! Declarative 2D paths.
//!
//! This crate is reexported in [sprig](../sprig/index.html).
//!
//! # Overview
//!
//! A [`Path`] is an ordered list of [`PathSegment`]s (move, line, arcs, bézier
//! curves, rectangles and close commands) plus a `quality` parameter. From them the
//! path derives a flattened [`Polyline`] and an exact bounding box.
//!
//! Building the derived state happens in two passes:
//!
//! 1. Linking: every segment is resolved in order against the segment that precedes
//!    it, producing a [`LinkedSegment`]. This is where omitted control points are
//!    mirrored, tangent arcs are solved and sub-path origins are tracked. Malformed
//!    descriptions (a close with nothing to close, a curve with nothing to mirror) are
//!    reported as [`PathError`]s.
//! 2. Sampling: linked segments are flattened with a tolerance of `1 / quality` and
//!    their exact bounds are accumulated.
//!
//! # Examples
//!
//! ```
//! use sprig_path::Path;
//! use sprig_path::math::{point, size};
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.quadratic_bezier_to(point(50.0, 100.0), point(100.0, 0.0));
//! builder.rect(point(200.0, 0.0), size(10.0, 10.0));
//!
//! let path = builder.build().unwrap();
//! assert!(path.bounding_box().contains_point(point(205.0, 5.0)));
//! ```

pub use sprig_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod error;
pub mod path;
pub mod segment;

#[doc(inline)]
pub use crate::builder::PathBuilder;
pub use crate::error::PathError;
#[doc(inline)]
pub use crate::path::{Path, Polyline, SubPath};
#[doc(inline)]
pub use crate::segment::{BorderRadii, LinkedSegment, PathSegment, Primitive};
pub use sprig_geom::{ArcDirection, ArcFlags};

pub mod math {
    //! f64 version of the geometry types used everywhere. Most other sprig crates
    //! reexport them.

    /// Alias for `euclid::default::Point2D<f64>`.
    pub type Point = sprig_geom::Point<f64>;

    /// Alias for `euclid::default::Vector2D<f64>`.
    pub type Vector = sprig_geom::Vector<f64>;

    /// Alias for `euclid::default::Size2D<f64>`.
    pub type Size = sprig_geom::Size<f64>;

    /// Alias for `euclid::default::Box2D<f64>`.
    pub type Box2D = sprig_geom::Box2D<f64>;

    /// Alias for `euclid::default::Transform2D<f64>`.
    pub type Transform = sprig_geom::Transform<f64>;

    /// Alias for `euclid::Angle<f64>`.
    pub type Angle = sprig_geom::Angle<f64>;

    /// Axis-aligned bounds that can be empty.
    pub type Bounds = sprig_geom::Bounds<f64>;

    /// Decomposed transform with f64 components.
    pub type TransformProperties = sprig_geom::TransformProperties<f64>;

    /// Bounds after a transformation, with their oriented corners.
    pub type TransformedBounds = sprig_geom::TransformedBounds<f64>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Size::new(x, y)`.
    #[inline]
    pub fn size(w: f64, h: f64) -> Size {
        Size::new(w, h)
    }
}

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

/// The two possible orientations for the edges of a shape to be built in.
///
/// Positive winding corresponds to the positive orientation in trigonometry, which is
/// clockwise on screen when the y axis points down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Winding {
    Positive,
    Negative,
}

#[test]
fn fill_rules() {
    assert!(FillRule::EvenOdd.is_in(1));
    assert!(FillRule::EvenOdd.is_out(2));
    assert!(FillRule::EvenOdd.is_in(-3));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_in(-1));
    assert!(FillRule::NonZero.is_out(0));
}
