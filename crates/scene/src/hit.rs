//! Geometric queries between nodes, boxes and points.
//!
//! All queries happen in the global space. Each one first compares conservative
//! bounding boxes and only looks at flattened geometry when the boxes allow a
//! positive answer.

use crate::node::{NodeId, NodeKind, Style};
use crate::{Scene, SceneError};
use sprig_algorithms::{
    point_in_polyline_fill, point_near_edges, polyline_edges, polylines_intersect,
    polylines_min_distance_squared,
};
use sprig_path::geom::LineSegment;
use sprig_path::math::{point, Bounds, Point};
use sprig_path::{FillRule, Polyline};

use std::rc::Rc;

/// Points this close to the outline of a filled area count as inside.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Something to test a node against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Target {
    /// A node and all of its descendants.
    Node(NodeId),
    /// An axis-aligned rectangle in global coordinates.
    Bounds(Bounds),
    /// A point in global coordinates.
    Point(Point),
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Target::Node(id)
    }
}

impl From<Bounds> for Target {
    fn from(bounds: Bounds) -> Self {
        Target::Bounds(bounds)
    }
}

impl From<Point> for Target {
    fn from(p: Point) -> Self {
        Target::Point(p)
    }
}

/// Counters of the work done by hit-testing queries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HitTestStats {
    /// Queries answered by comparing bounding boxes alone.
    pub bounds_rejections: u64,
    /// Pairs of leaves whose edges were compared.
    pub edge_tests: u64,
    /// Leaves whose point test ran against a set of sample points.
    pub point_tests: u64,
}

/// The flattened geometry of a leaf, a box or a point, in global coordinates.
struct Region {
    points: Rc<Polyline>,
    fill: Option<FillRule>,
    half_width: f64,
}

impl Region {
    fn from_point(p: Point) -> Self {
        let mut points = Polyline::new();
        points.begin(p);

        Region {
            points: Rc::new(points),
            fill: None,
            half_width: 0.0,
        }
    }

    fn from_bounds(bounds: &Bounds) -> Self {
        Region {
            points: Rc::new(bounds_outline(bounds)),
            fill: Some(FillRule::NonZero),
            half_width: 0.0,
        }
    }

    /// The edges that delimit the region. Filling closes every sub-path.
    fn outline(&self) -> impl Iterator<Item = LineSegment<f64>> + Clone + '_ {
        polyline_edges(&self.points, self.fill.is_some())
    }

    fn contains_point(&self, p: Point) -> bool {
        if let Some(rule) = self.fill {
            if point_in_polyline_fill(p, &self.points, rule) {
                return true;
            }
        }

        point_near_edges(p, self.outline(), self.half_width.max(BOUNDARY_TOLERANCE))
    }

    fn contains_all(&self, points: &Polyline) -> bool {
        !points.is_empty() && points.points().iter().all(|p| self.contains_point(*p))
    }
}

impl Scene {
    /// Returns whether `target` lies entirely within `container`.
    ///
    /// The target's sample points (the flattened points of a node and its descendants,
    /// the corners of a box or the point itself) must all be inside the filled area or
    /// within half the line width of the stroke of the container. A group contains the
    /// target if one of its descendants does. Nothing contains an empty target.
    ///
    /// ```
    /// use sprig_scene::Scene;
    /// use sprig_scene::path::PathSegment;
    /// use sprig_scene::math::{point, size, Bounds};
    ///
    /// let mut scene = Scene::default();
    /// let square = scene
    ///     .add_shape(vec![PathSegment::Rect { origin: point(0.0, 0.0), size: size(10.0, 10.0) }])
    ///     .unwrap();
    ///
    /// assert!(scene.contains(square, point(5.0, 5.0)).unwrap());
    /// assert!(scene.contains(square, Bounds::new(point(1.0, 1.0), point(9.0, 9.0))).unwrap());
    /// assert!(!scene.contains(square, point(15.0, 5.0)).unwrap());
    /// ```
    pub fn contains(
        &self,
        container: impl Into<Target>,
        target: impl Into<Target>,
    ) -> Result<bool, SceneError> {
        let samples = self.sample_points(&target.into())?;
        if samples.is_empty() {
            return Ok(false);
        }

        self.contains_samples(&container.into(), &samples, &samples.bounds())
    }

    /// Returns whether `a` and `b` share at least one point.
    ///
    /// Leaves overlap when their outlines cross, when their strokes come within
    /// reach of each other, or when one lies entirely inside the other. A group
    /// overlaps what one of its descendants overlaps. The relation is symmetric.
    pub fn overlaps(&self, a: impl Into<Target>, b: impl Into<Target>) -> Result<bool, SceneError> {
        self.overlaps_targets(&a.into(), &b.into())
    }

    /// The node drawn on top at the given point, in global coordinates.
    ///
    /// Later roots and later children are drawn above earlier ones. Groups are never
    /// returned themselves, only their leaves.
    pub fn hit_test(&self, p: Point) -> Result<Option<NodeId>, SceneError> {
        for &root in self.roots().iter().rev() {
            if let Some(hit) = self.hit_test_node(root, p)? {
                return Ok(Some(hit));
            }
        }

        Ok(None)
    }

    pub fn hit_test_stats(&self) -> HitTestStats {
        self.stats.get()
    }

    pub fn reset_hit_test_stats(&self) {
        self.stats.set(HitTestStats::default());
    }

    fn count(&self, update: impl FnOnce(&mut HitTestStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    fn hit_test_node(&self, id: NodeId, p: Point) -> Result<Option<NodeId>, SceneError> {
        if !self.hit_bounds(&Target::Node(id))?.contains_point(p) {
            return Ok(None);
        }

        if let Some(children) = self.group_children(&Target::Node(id))? {
            for &child in children.iter().rev() {
                if let Some(hit) = self.hit_test_node(child, p)? {
                    return Ok(Some(hit));
                }
            }
            return Ok(None);
        }

        let region = self.leaf_region(&Target::Node(id))?;
        Ok(region.contains_point(p).then_some(id))
    }

    fn contains_samples(
        &self,
        container: &Target,
        samples: &Polyline,
        sample_bounds: &Bounds,
    ) -> Result<bool, SceneError> {
        if !self.hit_bounds(container)?.contains_bounds(sample_bounds) {
            self.count(|stats| stats.bounds_rejections += 1);
            return Ok(false);
        }

        if let Some(children) = self.group_children(container)? {
            for &child in children {
                if self.contains_samples(&Target::Node(child), samples, sample_bounds)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        self.count(|stats| stats.point_tests += 1);
        Ok(self.leaf_region(container)?.contains_all(samples))
    }

    fn overlaps_targets(&self, a: &Target, b: &Target) -> Result<bool, SceneError> {
        if !self.hit_bounds(a)?.intersects(&self.hit_bounds(b)?) {
            self.count(|stats| stats.bounds_rejections += 1);
            return Ok(false);
        }

        if let Some(children) = self.group_children(a)? {
            for &child in children {
                if self.overlaps_targets(&Target::Node(child), b)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        if let Some(children) = self.group_children(b)? {
            for &child in children {
                if self.overlaps_targets(a, &Target::Node(child))? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        self.count(|stats| stats.edge_tests += 1);
        let a = self.leaf_region(a)?;
        let b = self.leaf_region(b)?;

        Ok(regions_overlap(&a, &b))
    }

    /// A box containing everything the target covers, strokes included.
    fn hit_bounds(&self, target: &Target) -> Result<Bounds, SceneError> {
        let id = match *target {
            Target::Point(p) => return Ok(Bounds::new(p, p)),
            Target::Bounds(bounds) => return Ok(bounds),
            Target::Node(id) => id,
        };

        Ok(match &self.node(id)?.kind {
            NodeKind::Group { children } => {
                let mut bounds = Bounds::empty();
                for &child in children {
                    bounds = bounds.union(&self.hit_bounds(&Target::Node(child))?);
                }
                bounds
            }
            NodeKind::Shape(shape) => self
                .global_bbox(id)?
                .bounds()
                .inflate(self.global_half_width(id, &shape.style)?),
            NodeKind::Text(_) | NodeKind::Image(_) => *self.global_bbox(id)?.bounds(),
        })
    }

    /// Half the line width of a shape, scaled by its global transform like the outline
    /// it strokes. Non-uniform scales use the geometric mean of the two axes.
    fn global_half_width(&self, id: NodeId, style: &Style) -> Result<f64, SceneError> {
        let half_width = style.half_line_width();
        if half_width == 0.0 {
            return Ok(0.0);
        }

        let scale = self.global_transform(id)?.determinant().abs().sqrt();
        Ok(half_width * scale)
    }

    fn sample_points(&self, target: &Target) -> Result<Rc<Polyline>, SceneError> {
        match *target {
            Target::Node(id) => self.global_points(id),
            Target::Bounds(bounds) if bounds.is_empty() => Ok(Rc::new(Polyline::new())),
            Target::Bounds(bounds) => Ok(Region::from_bounds(&bounds).points),
            Target::Point(p) => Ok(Region::from_point(p).points),
        }
    }

    fn group_children(&self, target: &Target) -> Result<Option<&[NodeId]>, SceneError> {
        match *target {
            Target::Node(id) => match &self.node(id)?.kind {
                NodeKind::Group { children } => Ok(Some(children)),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn leaf_region(&self, target: &Target) -> Result<Region, SceneError> {
        let id = match *target {
            Target::Point(p) => return Ok(Region::from_point(p)),
            Target::Bounds(bounds) => return Ok(Region::from_bounds(&bounds)),
            Target::Node(id) => id,
        };

        let points = self.global_points(id)?;
        Ok(match &self.node(id)?.kind {
            NodeKind::Shape(shape) => Region {
                points,
                fill: shape.style.fill,
                half_width: self.global_half_width(id, &shape.style)?,
            },
            _ => Region {
                points,
                fill: Some(FillRule::NonZero),
                half_width: 0.0,
            },
        })
    }
}

fn regions_overlap(a: &Region, b: &Region) -> bool {
    let reach = a.half_width + b.half_width;
    let outlines_meet = if reach > 0.0 {
        polylines_min_distance_squared(a.outline(), b.outline()) <= reach * reach
    } else {
        polylines_intersect(a.outline(), b.outline())
    };

    outlines_meet || a.contains_all(&b.points) || b.contains_all(&a.points)
}

fn bounds_outline(bounds: &Bounds) -> Polyline {
    let mut outline = Polyline::new();
    outline.begin(bounds.min);
    outline.push(point(bounds.max.x, bounds.min.y));
    outline.push(bounds.max);
    outline.push(point(bounds.min.x, bounds.max.y));
    outline.close();

    outline
}

#[cfg(test)]
use sprig_path::math::size;
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
fn bounds(x0: f64, y0: f64, x1: f64, y1: f64) -> Bounds {
    Bounds::new(point(x0, y0), point(x1, y1))
}

#[test]
fn shape_contains_itself() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let text = scene.add_text("t", 4.0, 4.0);
    scene.set_rotation(text, 0.7).unwrap();

    assert!(scene.contains(a, a).unwrap());
    assert!(scene.contains(text, text).unwrap());
    assert!(scene.overlaps(a, a).unwrap());
}

#[test]
fn containment_of_points_and_boxes() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);

    assert!(scene.contains(a, point(0.0, 5.0)).unwrap());
    assert!(scene.contains(a, bounds(2.0, 2.0, 8.0, 8.0)).unwrap());
    assert!(!scene.contains(a, bounds(2.0, 2.0, 12.0, 8.0)).unwrap());
    assert!(!scene.contains(a, Bounds::empty()).unwrap());
    assert!(scene.contains(bounds(-1.0, -1.0, 11.0, 11.0), a).unwrap());
    assert!(scene.contains(point(3.0, 3.0), point(3.0, 3.0)).unwrap());
    assert!(!scene.contains(point(3.0, 3.0), point(3.0, 4.0)).unwrap());
}

#[test]
fn fill_rules_decide_containment() {
    let mut scene = Scene::default();
    let ring = scene
        .add_shape(vec![
            PathSegment::Rect {
                origin: point(0.0, 0.0),
                size: size(10.0, 10.0),
            },
            PathSegment::Rect {
                origin: point(3.0, 3.0),
                size: size(4.0, 4.0),
            },
        ])
        .unwrap();

    // Both squares wind the same way: the center is a hole with even-odd only.
    assert!(!scene.contains(ring, point(5.0, 5.0)).unwrap());
    assert!(scene.contains(ring, point(1.0, 5.0)).unwrap());

    scene.set_style(ring, Style::fill(FillRule::NonZero)).unwrap();
    assert!(scene.contains(ring, point(5.0, 5.0)).unwrap());
}

#[test]
fn strokes() {
    let mut scene = Scene::default();
    let line = scene
        .add_shape(vec![
            PathSegment::MoveTo { to: point(0.0, 0.0) },
            PathSegment::LineTo {
                to: point(10.0, 0.0),
            },
        ])
        .unwrap();
    scene.set_style(line, Style::stroke(2.0)).unwrap();

    assert!(scene.contains(line, point(5.0, 0.9)).unwrap());
    assert!(!scene.contains(line, point(5.0, 1.1)).unwrap());
    assert!(scene.contains(line, point(-0.5, 0.0)).unwrap());

    let above = rect(&mut scene, 0.0, 1.5, 10.0, 5.0);
    assert!(!scene.overlaps(line, above).unwrap());
    scene.set_style(line, Style::stroke(3.2)).unwrap();
    assert!(scene.overlaps(line, above).unwrap());
    assert!(scene.overlaps(above, line).unwrap());
}

#[test]
fn stroke_width_follows_the_transform() {
    let mut scene = Scene::default();
    let line = scene
        .add_shape(vec![
            PathSegment::MoveTo { to: point(0.0, 0.0) },
            PathSegment::LineTo {
                to: point(10.0, 0.0),
            },
        ])
        .unwrap();
    scene.set_style(line, Style::stroke(10.0)).unwrap();

    assert!(!scene.contains(line, point(10.0, 8.0)).unwrap());

    // The outline now runs to (20, 0) and the stroke is 20 wide.
    scene.set_scale(line, 2.0, 2.0).unwrap();
    assert!(scene.contains(line, point(10.0, 8.0)).unwrap());
    assert!(!scene.contains(line, point(10.0, 11.0)).unwrap());
    assert_eq!(scene.hit_test(point(25.0, 0.0)).unwrap(), Some(line));

    // Inside a scaled group as well.
    let group = scene.add_group();
    scene.append_child(group, line).unwrap();
    scene.set_scale(line, 1.0, 1.0).unwrap();
    scene.set_scale(group, 2.0, 2.0).unwrap();
    assert!(scene.contains(line, point(10.0, 8.0)).unwrap());

    let far = rect(&mut scene, 0.0, 9.5, 20.0, 5.0);
    assert!(scene.overlaps(line, far).unwrap());
    assert!(scene.overlaps(far, line).unwrap());
}

#[test]
fn overlapping_leaves() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let crossing = rect(&mut scene, 5.0, 5.0, 10.0, 10.0);
    let inside = rect(&mut scene, 2.0, 2.0, 2.0, 2.0);
    let touching = rect(&mut scene, 10.0, 0.0, 5.0, 5.0);
    let apart = rect(&mut scene, 20.0, 0.0, 5.0, 5.0);

    for (other, expected) in [
        (crossing, true),
        (inside, true),
        (touching, true),
        (apart, false),
    ] {
        assert_eq!(scene.overlaps(a, other).unwrap(), expected);
        assert_eq!(scene.overlaps(other, a).unwrap(), expected);
    }

    assert!(scene.contains(a, inside).unwrap());
    assert!(!scene.contains(inside, a).unwrap());
    assert!(!scene.contains(a, crossing).unwrap());
}

#[test]
fn disjoint_boxes_skip_edge_tests() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect(&mut scene, 100.0, 100.0, 10.0, 10.0);

    scene.reset_hit_test_stats();
    assert!(!scene.overlaps(a, b).unwrap());
    assert!(!scene.contains(a, b).unwrap());
    let stats = scene.hit_test_stats();
    assert_eq!(stats.edge_tests, 0);
    assert_eq!(stats.point_tests, 0);
    assert_eq!(stats.bounds_rejections, 2);
}

#[test]
fn groups_recurse() {
    let mut scene = Scene::default();
    let group = scene.add_group();
    let left = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let right = rect(&mut scene, 20.0, 0.0, 10.0, 10.0);
    scene.append_child(group, left).unwrap();
    scene.append_child(group, right).unwrap();

    // In the gap between the children but inside the box of the group.
    assert!(!scene.contains(group, point(15.0, 5.0)).unwrap());
    assert!(!scene.overlaps(group, point(15.0, 5.0)).unwrap());
    assert!(scene.contains(group, point(25.0, 5.0)).unwrap());
    assert!(scene.overlaps(point(5.0, 5.0), group).unwrap());

    let probe = rect(&mut scene, 8.0, 2.0, 14.0, 2.0);
    assert!(scene.overlaps(group, probe).unwrap());
    assert!(!scene.contains(group, probe).unwrap());

    let empty = scene.add_group();
    assert!(!scene.overlaps(empty, group).unwrap());
    assert!(!scene.contains(group, empty).unwrap());
}

#[test]
fn topmost_hit() {
    let mut scene = Scene::default();
    let below = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let group = scene.add_group();
    let above = rect(&mut scene, 5.0, 5.0, 10.0, 10.0);
    scene.append_child(group, above).unwrap();

    assert_eq!(scene.hit_test(point(7.0, 7.0)).unwrap(), Some(above));
    assert_eq!(scene.hit_test(point(2.0, 2.0)).unwrap(), Some(below));
    assert_eq!(scene.hit_test(point(50.0, 50.0)).unwrap(), None);

    scene.set_position(group, 100.0, 0.0).unwrap();
    assert_eq!(scene.hit_test(point(7.0, 7.0)).unwrap(), Some(below));
    assert_eq!(scene.hit_test(point(107.0, 7.0)).unwrap(), Some(above));
}

#[test]
fn unknown_nodes() {
    let mut scene = Scene::default();
    let a = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
    let b = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
    scene.remove(b).unwrap();

    assert_eq!(scene.contains(a, b), Err(SceneError::UnknownNode(b)));
    assert_eq!(scene.overlaps(b, a), Err(SceneError::UnknownNode(b)));
}
