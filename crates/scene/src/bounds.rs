//! Memoized geometry of the nodes: transforms, bounding boxes and flattened points in
//! natural, local and global coordinates.
//!
//! - The natural space of a node is the one its content is described in: the path of a
//!   shape, the `(0, 0) - (width, height)` box of a text or an image, the local spaces of
//!   the children of a group.
//! - The local space is the natural space transformed by the node's own transform, in
//!   other words the natural space of its parent.
//! - The global space is the natural space transformed by the transforms of the node
//!   and of all of its ancestors.
//!
//! Each value is keyed by the version stamps it depends on:
//!
//! | computation                      | key                                             |
//! |----------------------------------|-------------------------------------------------|
//! | natural bbox and points          | content version                                 |
//! | local transform                  | version                                         |
//! | local bbox and points            | max(version, content version)                   |
//! | global transform and its inverse | max of the versions of the node and ancestors   |
//! | global bbox and points           | max(global transform key, content version)      |

use crate::cache::{Memo, Version};
use crate::node::{box_outline, Node, NodeId, NodeKind};
use crate::{Scene, SceneError};
use sprig_path::math::{Bounds, Point, Transform, TransformedBounds};
use sprig_path::Polyline;

use log::trace;
use std::rc::Rc;

impl Scene {
    /// The bounding box of the content of the node in its natural space.
    ///
    /// The union of the local boxes of the children for a group, which is the
    /// empty box for a group without children.
    pub fn natural_bbox(&self, id: NodeId) -> Result<Rc<Bounds>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.natural_bbox,
            node.content_version,
            id,
            "natural bbox",
            || -> Result<Bounds, SceneError> {
                Ok(match &node.kind {
                    NodeKind::Group { children } => {
                        let mut bounds = Bounds::empty();
                        for child in children {
                            bounds = bounds.union(self.local_bbox(*child)?.bounds());
                        }
                        bounds
                    }
                    NodeKind::Shape(shape) => shape.path.bounding_box(),
                    NodeKind::Text(text) => box_bounds(text.width, text.height),
                    NodeKind::Image(image) => box_bounds(image.width, image.height),
                })
            },
        )
    }

    /// The flattened outline of the content of the node in its natural space.
    ///
    /// For a group, the sub-paths of all of its children.
    pub fn natural_points(&self, id: NodeId) -> Result<Rc<Polyline>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.natural_points,
            node.content_version,
            id,
            "natural points",
            || -> Result<Polyline, SceneError> {
                Ok(match &node.kind {
                    NodeKind::Group { children } => {
                        let mut points = Polyline::new();
                        for child in children {
                            points.append(&*self.local_points(*child)?);
                        }
                        points
                    }
                    NodeKind::Shape(shape) => shape.path.polyline().clone(),
                    NodeKind::Text(text) => box_outline(text.width, text.height),
                    NodeKind::Image(image) => box_outline(image.width, image.height),
                })
            },
        )
    }

    /// The matrix of the node's own transform properties.
    pub fn local_transform(&self, id: NodeId) -> Result<Rc<Transform>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.local_transform,
            node.version,
            id,
            "local transform",
            || -> Result<Transform, SceneError> { Ok(node.transform.to_transform()) },
        )
    }

    /// The transform from the natural space of the node to the global space: its own
    /// transform followed by the global transform of its parent.
    pub fn global_transform(&self, id: NodeId) -> Result<Rc<Transform>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.global_transform,
            self.global_key(id)?,
            id,
            "global transform",
            || -> Result<Transform, SceneError> {
                let local = self.local_transform(id)?;
                Ok(match node.parent {
                    Some(parent) => local.then(&*self.global_transform(parent)?),
                    None => *local,
                })
            },
        )
    }

    /// The transform from the global space to the natural space of the node.
    pub fn inverse_global_transform(&self, id: NodeId) -> Result<Transform, SceneError> {
        let node = self.node(id)?;
        let inverse = memoized(
            &node.cache.inverse_global_transform,
            self.global_key(id)?,
            id,
            "inverse global transform",
            || -> Result<Option<Transform>, SceneError> {
                Ok(self.global_transform(id)?.inverse())
            },
        )?;

        match *inverse {
            Some(inverse) => Ok(inverse),
            None => {
                log::debug!("the global transform of {:?} is not invertible", id);
                Err(SceneError::NonInvertibleTransform(id))
            }
        }
    }

    /// Maps a point from the global space to the natural space of the node.
    pub fn global_to_local(&self, id: NodeId, point: Point) -> Result<Point, SceneError> {
        Ok(self.inverse_global_transform(id)?.transform_point(point))
    }

    /// Maps a point from the natural space of the node to the global space.
    pub fn local_to_global(&self, id: NodeId, point: Point) -> Result<Point, SceneError> {
        Ok(self.global_transform(id)?.transform_point(point))
    }

    /// The natural bounding box transformed by the node's own transform.
    pub fn local_bbox(&self, id: NodeId) -> Result<Rc<TransformedBounds>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.local_bbox,
            local_key(node),
            id,
            "local bbox",
            || -> Result<TransformedBounds, SceneError> {
                Ok(self.natural_bbox(id)?.transformed(&*self.local_transform(id)?))
            },
        )
    }

    /// The natural bounding box transformed by the global transform.
    pub fn global_bbox(&self, id: NodeId) -> Result<Rc<TransformedBounds>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.global_bbox,
            self.global_key(id)?.max(node.content_version),
            id,
            "global bbox",
            || -> Result<TransformedBounds, SceneError> {
                Ok(self.natural_bbox(id)?.transformed(&*self.global_transform(id)?))
            },
        )
    }

    pub fn local_points(&self, id: NodeId) -> Result<Rc<Polyline>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.local_points,
            local_key(node),
            id,
            "local points",
            || -> Result<Polyline, SceneError> {
                Ok(self.natural_points(id)?.transformed(&*self.local_transform(id)?))
            },
        )
    }

    pub fn global_points(&self, id: NodeId) -> Result<Rc<Polyline>, SceneError> {
        let node = self.node(id)?;
        memoized(
            &node.cache.global_points,
            self.global_key(id)?.max(node.content_version),
            id,
            "global points",
            || -> Result<Polyline, SceneError> {
                Ok(self.natural_points(id)?.transformed(&*self.global_transform(id)?))
            },
        )
    }

    /// The newest version among the node and its ancestors.
    fn global_key(&self, id: NodeId) -> Result<Version, SceneError> {
        self.ancestors(id)
            .map(|(_, node)| node.version)
            .max()
            .ok_or(SceneError::UnknownNode(id))
    }
}

fn local_key(node: &Node) -> Version {
    node.version.max(node.content_version)
}

fn memoized<T>(
    memo: &Memo<T>,
    version: Version,
    id: NodeId,
    name: &'static str,
    compute: impl FnOnce() -> Result<T, SceneError>,
) -> Result<Rc<T>, SceneError> {
    memo.try_get_or_update(version, || {
        trace!("computing the {} of {:?} at {}", name, id, version);
        compute()
    })
}

fn box_bounds(width: f64, height: f64) -> Bounds {
    Bounds::from_points([Point::new(0.0, 0.0), Point::new(width, height)])
}

#[cfg(test)]
use crate::SceneOptions;
#[cfg(test)]
use sprig_path::math::{point, size};
#[cfg(test)]
use sprig_path::PathSegment;

#[cfg(test)]
fn rect(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64) -> NodeId {
    scene
        .add_shape(vec![PathSegment::Rect {
            origin: point(x, y),
            size: size(w, h),
        }])
        .unwrap()
}

#[cfg(test)]
fn assert_close(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
}

#[test]
fn natural_boxes() {
    let mut scene = Scene::new(SceneOptions::DEFAULT);
    let shape = rect(&mut scene, 10.0, 20.0, 30.0, 40.0);
    let text = scene.add_text("hi", 5.0, 2.0);
    let image = scene.add_image("a.png", -4.0, 3.0);
    let group = scene.add_group();

    assert_eq!(
        *scene.natural_bbox(shape).unwrap(),
        Bounds::new(point(10.0, 20.0), point(40.0, 60.0))
    );
    assert_eq!(
        *scene.natural_bbox(text).unwrap(),
        Bounds::new(point(0.0, 0.0), point(5.0, 2.0))
    );
    assert_eq!(
        *scene.natural_bbox(image).unwrap(),
        Bounds::new(point(-4.0, 0.0), point(0.0, 3.0))
    );

    let empty = scene.natural_bbox(group).unwrap();
    assert!(empty.is_empty());
    assert_eq!(*empty, Bounds::empty());
    assert!(scene.global_bbox(group).unwrap().is_empty());
    assert!(scene.natural_points(group).unwrap().is_empty());
}

#[test]
fn nested_transforms() {
    let mut scene = Scene::default();
    let outer = scene.add_group();
    let inner = scene.add_group();
    let leaf = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    scene.append_child(outer, inner).unwrap();
    scene.append_child(inner, leaf).unwrap();

    scene.set_position(outer, 100.0, 0.0).unwrap();
    scene.set_scale(inner, 2.0, 2.0).unwrap();
    scene.set_position(leaf, 5.0, 0.0).unwrap();

    // The leaf is translated, then scaled, then translated again.
    let global = scene.global_transform(leaf).unwrap();
    assert_close(global.transform_point(point(0.0, 0.0)), point(110.0, 0.0));
    assert_close(global.transform_point(point(10.0, 10.0)), point(130.0, 20.0));

    let bbox = scene.global_bbox(leaf).unwrap();
    assert_close(bbox.bounds().min, point(110.0, 0.0));
    assert_close(bbox.bounds().max, point(130.0, 20.0));

    assert_eq!(
        *scene.natural_bbox(inner).unwrap(),
        Bounds::new(point(5.0, 0.0), point(15.0, 10.0))
    );
    let outer_box = scene.global_bbox(outer).unwrap();
    assert_close(outer_box.bounds().min, point(110.0, 0.0));
    assert_close(outer_box.bounds().max, point(130.0, 20.0));

    let points = scene.global_points(outer).unwrap();
    assert_eq!(points.len(), 5);
    assert_close(points.points()[2], point(130.0, 20.0));
}

#[test]
fn reads_are_memoized() {
    let mut scene = Scene::default();
    let group = scene.add_group();
    let leaf = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let other = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
    scene.append_child(group, leaf).unwrap();

    let a = scene.global_bbox(leaf).unwrap();
    let b = scene.global_bbox(leaf).unwrap();
    assert!(Rc::ptr_eq(&a, &b));

    // Changes elsewhere do not invalidate the leaf.
    scene.set_position(other, 3.0, 3.0).unwrap();
    assert!(Rc::ptr_eq(&a, &scene.global_bbox(leaf).unwrap()));

    // Moving the parent does.
    let natural = scene.natural_bbox(leaf).unwrap();
    scene.set_position(group, 1.0, 0.0).unwrap();
    let c = scene.global_bbox(leaf).unwrap();
    assert!(!Rc::ptr_eq(&a, &c));
    assert_close(c.bounds().min, point(1.0, 0.0));
    // The natural box of the leaf does not depend on its ancestors.
    assert!(Rc::ptr_eq(&natural, &scene.natural_bbox(leaf).unwrap()));

    scene.invalidate_caches();
    let d = scene.global_bbox(leaf).unwrap();
    assert!(!Rc::ptr_eq(&c, &d));
    assert_eq!(*c, *d);
}

#[test]
fn children_changes_propagate() {
    let mut scene = Scene::default();
    let outer = scene.add_group();
    let inner = scene.add_group();
    let leaf = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    scene.append_child(outer, inner).unwrap();
    scene.append_child(inner, leaf).unwrap();

    assert_eq!(scene.natural_bbox(outer).unwrap().max, point(10.0, 10.0));

    scene
        .edit_path(leaf, |path| {
            path.replace(
                0,
                PathSegment::Rect {
                    origin: point(0.0, 0.0),
                    size: size(20.0, 5.0),
                },
            )
        })
        .unwrap();
    assert_eq!(scene.natural_bbox(outer).unwrap().max, point(20.0, 5.0));

    scene.set_rotation(leaf, std::f64::consts::FRAC_PI_2).unwrap();
    let rotated = scene.natural_bbox(outer).unwrap();
    assert!((rotated.min.x + 5.0).abs() < 1e-9);
    assert!((rotated.max.y - 20.0).abs() < 1e-9);

    let second = rect(&mut scene, 50.0, 50.0, 1.0, 1.0);
    scene.append_child(outer, second).unwrap();
    assert_eq!(scene.natural_bbox(outer).unwrap().max, point(51.0, 51.0));

    scene.remove(second).unwrap();
    assert!((scene.natural_bbox(outer).unwrap().max.y - 20.0).abs() < 1e-9);
}

#[test]
fn reparenting_recomputes_global_geometry() {
    let mut scene = Scene::default();
    let left = scene.add_group();
    let right = scene.add_group();
    let leaf = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
    scene.set_position(left, 100.0, 0.0).unwrap();
    scene.set_position(right, 0.0, 100.0).unwrap();

    scene.append_child(left, leaf).unwrap();
    assert_eq!(scene.global_bbox(leaf).unwrap().bounds().min, point(100.0, 0.0));

    scene.append_child(right, leaf).unwrap();
    assert_eq!(scene.global_bbox(leaf).unwrap().bounds().min, point(0.0, 100.0));
    assert!(scene.natural_bbox(left).unwrap().is_empty());

    scene.reparent(leaf, None).unwrap();
    assert_eq!(scene.global_bbox(leaf).unwrap().bounds().min, point(0.0, 0.0));
}

#[test]
fn inverse_transforms() {
    let mut scene = Scene::default();
    let group = scene.add_group();
    let leaf = scene.add_image("img", 10.0, 10.0);
    scene.append_child(group, leaf).unwrap();
    scene.set_rotation(group, 0.3).unwrap();
    scene.set_scale(leaf, 2.0, 0.5).unwrap();
    scene.set_position(leaf, 3.0, -7.0).unwrap();

    for p in [point(0.0, 0.0), point(1.0, 2.0), point(-10.0, 35.5)] {
        let global = scene.local_to_global(leaf, p).unwrap();
        assert_close(scene.global_to_local(leaf, global).unwrap(), p);
    }

    scene.set_scale(group, 0.0, 1.0).unwrap();
    assert_eq!(
        scene.global_to_local(leaf, point(0.0, 0.0)),
        Err(SceneError::NonInvertibleTransform(leaf))
    );
    // Degenerate transforms still produce boxes.
    assert!(!scene.global_bbox(leaf).unwrap().is_empty());
}
