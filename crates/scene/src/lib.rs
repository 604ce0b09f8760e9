#![deny(bare_trait_objects)]

//! A 2D scene graph with memoized geometry and hit-testing.
//!
//! This crate is reexported in [sprig](../sprig/index.html).
//!
//! # Overview
//!
//! A [`Scene`] owns its nodes in an arena and hands out [`NodeId`] handles. Nodes are
//! groups, shapes (a [`Path`](sprig_path::Path) and a [`Style`]), text boxes or
//! images, and each carries its own [`TransformProperties`](math::TransformProperties).
//!
//! Derived geometry (bounding boxes in natural, local and global space, flattened
//! points and composed transforms) is computed on demand and memoized per node. Each
//! memo is keyed by a version stamp: mutating a node through the scene bumps the stamp
//! of the node and of its ancestors, and the next read recomputes what changed.
//!
//! On top of this, [`Scene::contains`], [`Scene::overlaps`] and [`Scene::hit_test`]
//! answer geometric queries between nodes, rectangles and points.
//!
//! # Examples
//!
//! ```
//! use sprig_scene::{Scene, SceneOptions};
//! use sprig_scene::path::PathSegment;
//! use sprig_scene::math::{point, size};
//!
//! let mut scene = Scene::new(SceneOptions::DEFAULT);
//! let group = scene.add_group();
//! let square = scene
//!     .add_shape(vec![PathSegment::Rect { origin: point(0.0, 0.0), size: size(10.0, 10.0) }])
//!     .unwrap();
//! scene.append_child(group, square).unwrap();
//! scene.set_position(group, 100.0, 0.0).unwrap();
//!
//! let bbox = scene.global_bbox(square).unwrap();
//! assert_eq!(bbox.bounds().min, point(100.0, 0.0));
//! assert!(scene.contains(square, point(105.0, 5.0)).unwrap());
//! ```

pub extern crate sprig_algorithms as algorithms;
pub extern crate sprig_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod bounds;
pub mod cache;
mod error;
mod hit;
mod node;
mod options;
mod scene;

pub use crate::cache::{Dirty, Memo, Version, VersionCounter};
pub use crate::error::SceneError;
pub use crate::hit::{HitTestStats, Target};
pub use crate::node::{Image, Node, NodeId, NodeKind, Shape, Style, Text};
pub use crate::options::SceneOptions;
pub use crate::scene::Scene;

pub use sprig_path::geom;
pub use sprig_path::math;
pub use sprig_path::FillRule;
