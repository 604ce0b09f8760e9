#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Hit-testing primitives on flattened paths.
//!
//! This crate is reexported in [sprig](../sprig/index.html).
//!
//! Everything here works on the line segments of a [`Polyline`](path::Polyline) or of a
//! plain slice of points:
//!
//! - [`hit_test`]: whether a point is inside a filled ring, using the winding number
//!   and a [`FillRule`].
//! - [`distance`]: distances between points and segments, and between polylines, for
//!   stroked shapes.
//! - [`intersection`]: whether segments or polylines cross or touch.
//!
//! Open sub-paths are implicitly closed when they are tested as filled areas, and are
//! walked as they are when they are tested as strokes.

pub extern crate sprig_path as path;

pub mod distance;
pub mod edges;
pub mod hit_test;
pub mod intersection;

pub use crate::path::geom;
pub use crate::path::math;
pub use crate::path::FillRule;

#[doc(inline)]
pub use crate::distance::{
    point_edges_distance_squared, point_near_edges, point_near_polyline,
    polylines_min_distance_squared, segment_distance_squared,
};
#[doc(inline)]
pub use crate::edges::{polyline_edges, Edges};
#[doc(inline)]
pub use crate::hit_test::{
    edges_winding_number, point_in_polygon, point_in_polyline_fill, winding_number,
};
#[doc(inline)]
pub use crate::intersection::{polylines_intersect, segments_intersect};
