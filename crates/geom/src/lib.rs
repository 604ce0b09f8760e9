#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::let_and_return)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [sprig](../sprig/index.html).
//!
//! # Overview.
//!
//! This crate implements the maths needed to turn declarative path descriptions
//! into something a scene graph can reason about:
//!
//! - line segments,
//! - quadratic and cubic bézier curves,
//! - circular and elliptic arcs,
//! - axis-aligned bounding boxes and their transformed (oriented) counterparts,
//! - the `{x, y, scale, skew, rotation}` description of an affine transform.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//!
//! All curve types in this crate flatten by recursive subdivision: a span of the curve
//! is split in two halves (de Casteljau for béziers, angular bisection for arcs) until
//! the point in the middle of the span is within `tolerance` of the span's chord.
//! The tolerance threshold therefore corresponds to the maximum distance between the
//! curve and its linear approximation, independently of the size of the curve.
//!
//! # Exact bounds
//!
//! Bounding boxes are computed analytically from the curve parameters (derivative
//! roots for béziers, quadrant angles for arcs) rather than from a flattened
//! approximation, which can under-estimate the extent of a curve.

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;
pub mod bounds;
pub mod cubic_bezier;
pub mod flatten;
mod line;
pub mod quadratic_bezier;
mod scalar;
mod segment;
pub mod transform;
pub mod utils;

#[doc(inline)]
pub use crate::arc::{tangent_arc, Arc, ArcDirection, ArcFlags, SvgArc, TangentArc};
#[doc(inline)]
pub use crate::bounds::{Bounds, TransformedBounds};
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::flatten::FlatteningOptions;
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::segment::Segment;
#[doc(inline)]
pub use crate::transform::TransformProperties;

pub use crate::scalar::Scalar;

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Size2D`.
pub use euclid::default::Size2D as Size;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// Alias for `euclid::default::Transform2D`
pub type Transform<S> = euclid::default::Transform2D<S>;

/// An angle in radians.
pub use euclid::Angle;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

/// Shorthand for `Size::new(x, y)`.
#[inline]
pub fn size<S>(w: S, h: S) -> Size<S> {
    Size::new(w, h)
}
