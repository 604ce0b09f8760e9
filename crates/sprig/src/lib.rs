#![deny(bare_trait_objects)]

//! 2D scene-graph geometry in Rust.
//!
//! # Crates
//!
//! This meta-crate (`sprig`) reexports the following sub-crates for convenience:
//!
//! * **sprig_geom** - Points, lines, bézier curves and arcs, their flattening and
//!   exact bounds, bounding boxes and decomposed transforms.
//! * **sprig_path** - Paths described as segments, with a memoized flattened form and
//!   bounding box.
//! * **sprig_algorithms** - Hit-testing primitives on flattened paths.
//! * **sprig_scene** - A scene graph with memoized bounds and hit-testing.
//!
//! Each `sprig_<name>` crate is reexported as a `<name>` module in `sprig`. For example:
//!
//! ```ignore
//! use sprig_scene::Scene;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use sprig::scene::Scene;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Building a path
//!
//! ```
//! use sprig::math::{point, size};
//! use sprig::path::Path;
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(100.0, 0.0));
//! builder.arc_to(point(150.0, 0.0), point(150.0, 50.0), 20.0);
//! builder.smooth_cubic_bezier_to(point(200.0, 100.0), point(150.0, 150.0));
//! builder.close();
//! builder.rect(point(-50.0, -50.0), size(10.0, 10.0));
//!
//! let path = builder.build().unwrap();
//!
//! println!("{} points, bounds: {:?}", path.points().len(), path.bounding_box());
//! ```
//!
//! ## Querying a scene
//!
//! ```
//! use sprig::math::{point, size};
//! use sprig::path::PathSegment;
//! use sprig::scene::{Scene, Style};
//!
//! let mut scene = Scene::default();
//! let frame = scene.add_group();
//! let card = scene.add_shape(vec![
//!     PathSegment::Rect { origin: point(0.0, 0.0), size: size(100.0, 60.0) },
//! ]).unwrap();
//! let underline = scene.add_shape(vec![
//!     PathSegment::MoveTo { to: point(10.0, 50.0) },
//!     PathSegment::LineTo { to: point(90.0, 50.0) },
//! ]).unwrap();
//! scene.set_style(underline, Style::stroke(2.0)).unwrap();
//!
//! scene.append_child(frame, card).unwrap();
//! scene.append_child(frame, underline).unwrap();
//! scene.set_position(frame, 20.0, 20.0).unwrap();
//!
//! assert!(scene.contains(card, underline).unwrap());
//! assert!(scene.overlaps(underline, point(50.0, 70.5)).unwrap());
//! assert_eq!(scene.hit_test(point(50.0, 70.0)).unwrap(), Some(underline));
//! ```

pub use sprig_algorithms as algorithms;
pub use sprig_geom as geom;
pub use sprig_path as path;
pub use sprig_scene as scene;

pub use sprig_path::math;
pub use sprig_path::FillRule;
