//! The path data structure and its flattened form.

use crate::builder::PathBuilder;
use crate::geom::FlatteningOptions;
use crate::math::*;
use crate::segment::{LinkedSegment, PathSegment};
use crate::{PathError, Winding};

use std::ops::Range;

/// A flattened path: a list of points split in sub-paths.
///
/// Closed sub-paths end with a copy of their first point.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Polyline {
    points: Vec<Point>,
    subpaths: Vec<SubPath>,
}

/// A range of points of a [`Polyline`] forming one sub-path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SubPath {
    pub range: Range<usize>,
    pub closed: bool,
}

impl Polyline {
    pub fn new() -> Self {
        Polyline::default()
    }

    /// Starts a new sub-path.
    pub fn begin(&mut self, at: Point) {
        let start = self.points.len();
        self.points.push(at);
        self.subpaths.push(SubPath {
            range: start..start + 1,
            closed: false,
        });
    }

    /// Adds a point to the current sub-path, starting one if there is none.
    pub fn push(&mut self, p: Point) {
        match self.subpaths.last_mut() {
            Some(subpath) => {
                self.points.push(p);
                subpath.range.end = self.points.len();
            }
            None => self.begin(p),
        }
    }

    /// Closes the current sub-path, repeating its first point if the last one differs.
    pub fn close(&mut self) {
        let Some(subpath) = self.subpaths.last_mut() else {
            return;
        };

        let first = self.points[subpath.range.start];
        if self.points[subpath.range.end - 1] != first {
            self.points.push(first);
            subpath.range.end = self.points.len();
        }
        subpath.closed = true;
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.subpaths.clear();
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Iterates over the points of each sub-path along with whether it is closed.
    pub fn iter_subpaths(&self) -> impl Iterator<Item = (&[Point], bool)> + Clone + '_ {
        self.subpaths
            .iter()
            .map(move |sp| (&self.points[sp.range.clone()], sp.closed))
    }

    /// The bounds of the points, which can be smaller than the exact bounds of the
    /// curves they approximate.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points)
    }

    /// Appends the sub-paths of another polyline.
    pub fn append(&mut self, other: &Polyline) {
        let offset = self.points.len();
        self.points.extend_from_slice(&other.points);
        self.subpaths.extend(other.subpaths.iter().map(|sp| SubPath {
            range: sp.range.start + offset..sp.range.end + offset,
            closed: sp.closed,
        }));
    }

    /// A copy of the polyline with every point transformed.
    pub fn transformed(&self, transform: &Transform) -> Polyline {
        Polyline {
            points: self
                .points
                .iter()
                .map(|p| transform.transform_point(*p))
                .collect(),
            subpaths: self.subpaths.clone(),
        }
    }

    /// Sum of the lengths of the edges.
    pub fn length(&self) -> f64 {
        self.iter_subpaths()
            .map(|(points, _)| {
                points
                    .windows(2)
                    .map(|edge| (edge[1] - edge[0]).length())
                    .sum::<f64>()
            })
            .sum()
    }
}

/// An ordered list of segments with a memoized flattened form and bounding box.
///
/// The derived state ([`Path::polyline`], [`Path::bounding_box`]) is rebuilt by
/// [`Path::update`] after the segments or the quality change. Segment edits are
/// validated right away: an edit that would make the path malformed is rejected and
/// leaves the path untouched.
#[derive(Clone, Debug)]
pub struct Path {
    segments: Vec<PathSegment>,
    linked: Vec<LinkedSegment>,
    quality: f64,
    polyline: Polyline,
    bounds: Bounds,
    version: u64,
    dirty: bool,
}

impl Path {
    /// The quality paths are built with unless told otherwise. Corresponds to a
    /// flattening tolerance of 0.25.
    pub const DEFAULT_QUALITY: f64 = 4.0;

    /// Creates a path with the default quality.
    pub fn new(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        Self::with_quality(segments, Self::DEFAULT_QUALITY)
    }

    /// Creates a path. The flattening tolerance is `1 / quality`.
    pub fn with_quality(segments: Vec<PathSegment>, quality: f64) -> Result<Self, PathError> {
        check_quality(quality)?;
        let linked = link(&segments)?;
        let mut path = Path {
            segments,
            linked,
            quality,
            polyline: Polyline::new(),
            bounds: Bounds::empty(),
            version: 0,
            dirty: true,
        };
        path.update();

        Ok(path)
    }

    /// A path without any segment.
    pub fn empty() -> Self {
        Path {
            segments: Vec::new(),
            linked: Vec::new(),
            quality: Self::DEFAULT_QUALITY,
            polyline: Polyline::new(),
            bounds: Bounds::empty(),
            version: 0,
            dirty: false,
        }
    }

    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The segments resolved against each other.
    #[inline]
    pub fn linked_segments(&self) -> &[LinkedSegment] {
        &self.linked
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// The flattening tolerance, `1 / quality`.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        1.0 / self.quality
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: PathSegment) -> Result<(), PathError> {
        let linked = segment.link(self.segments.len(), self.linked.last())?;
        self.segments.push(segment);
        self.linked.push(linked);
        self.dirty = true;

        Ok(())
    }

    /// Inserts a segment before the segment at `index`, or at the end if `index` is
    /// the number of segments.
    pub fn insert(&mut self, index: usize, segment: PathSegment) -> Result<(), PathError> {
        if index > self.segments.len() {
            return Err(out_of_range(index, self.segments.len()));
        }

        let mut segments = self.segments.clone();
        segments.insert(index, segment);
        self.relink(segments)
    }

    /// Removes and returns the segment at `index`.
    pub fn remove(&mut self, index: usize) -> Result<PathSegment, PathError> {
        if index >= self.segments.len() {
            return Err(out_of_range(index, self.segments.len()));
        }

        let mut segments = self.segments.clone();
        let removed = segments.remove(index);
        self.relink(segments)?;

        Ok(removed)
    }

    /// Replaces the segment at `index` and returns the previous one.
    pub fn replace(&mut self, index: usize, segment: PathSegment) -> Result<PathSegment, PathError> {
        if index >= self.segments.len() {
            return Err(out_of_range(index, self.segments.len()));
        }

        let mut segments = self.segments.clone();
        let replaced = std::mem::replace(&mut segments[index], segment);
        self.relink(segments)?;

        Ok(replaced)
    }

    /// Replaces all of the segments.
    pub fn set_segments(&mut self, segments: Vec<PathSegment>) -> Result<(), PathError> {
        self.relink(segments)
    }

    pub fn set_quality(&mut self, quality: f64) -> Result<(), PathError> {
        check_quality(quality)?;
        if quality != self.quality {
            self.quality = quality;
            self.dirty = true;
        }

        Ok(())
    }

    /// Removes all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.linked.clear();
        self.dirty = true;
    }

    /// Sets the quality and rebuilds the derived state, even if nothing changed.
    pub fn rebuild(&mut self, quality: f64) -> Result<(), PathError> {
        self.set_quality(quality)?;
        self.dirty = true;
        self.update();

        Ok(())
    }

    /// Rebuilds the flattened points and the bounding box if the path changed since the
    /// last update. Returns whether anything was rebuilt.
    pub fn update(&mut self) -> bool {
        if !self.dirty {
            return false;
        }

        let options = FlatteningOptions::quality(self.quality);
        self.polyline.clear();
        self.bounds = Bounds::empty();
        for segment in &self.linked {
            segment.sample(&options, &mut self.polyline);
            self.bounds = self.bounds.union(&segment.exact_bounds());
        }

        self.version += 1;
        self.dirty = false;

        log::trace!(
            "rebuilt path: {} segments, {} points, quality {}, version {}",
            self.segments.len(),
            self.polyline.len(),
            self.quality,
            self.version
        );

        true
    }

    /// Whether the segments or the quality changed since the last update.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Incremented every time the derived state is rebuilt.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The flattened path, as of the last update.
    #[inline]
    pub fn polyline(&self) -> &Polyline {
        &self.polyline
    }

    /// The flattened points, as of the last update.
    #[inline]
    pub fn points(&self) -> &[Point] {
        self.polyline.points()
    }

    /// The exact bounding box of the path, as of the last update.
    ///
    /// Empty for a path that has no segments.
    #[inline]
    pub fn bounding_box(&self) -> Bounds {
        self.bounds
    }

    /// Length of the flattened path.
    pub fn approximate_length(&self) -> f64 {
        self.polyline.length()
    }

    /// The orientation of the first sub-path, from its signed area.
    ///
    /// `None` if there is no sub-path or if its area is zero.
    pub fn winding(&self) -> Option<Winding> {
        let (points, _) = self.polyline.iter_subpaths().next()?;
        let first = *points.first()?;

        let mut area = 0.0;
        let mut v0 = vector(0.0, 0.0);
        for p in &points[1..] {
            let v1 = *p - first;
            area += v0.cross(v1);
            v0 = v1;
        }

        if area > 0.0 {
            Some(Winding::Positive)
        } else if area < 0.0 {
            Some(Winding::Negative)
        } else {
            None
        }
    }

    fn relink(&mut self, segments: Vec<PathSegment>) -> Result<(), PathError> {
        self.linked = link(&segments)?;
        self.segments = segments;
        self.dirty = true;

        Ok(())
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::empty()
    }
}

impl TryFrom<Vec<PathSegment>> for Path {
    type Error = PathError;

    fn try_from(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        Path::new(segments)
    }
}

/// First pass of the build: resolves every segment against its predecessor.
fn link(segments: &[PathSegment]) -> Result<Vec<LinkedSegment>, PathError> {
    let mut linked: Vec<LinkedSegment> = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        let next = segment.link(index, linked.last())?;
        linked.push(next);
    }

    Ok(linked)
}

fn check_quality(quality: f64) -> Result<(), PathError> {
    if quality.is_finite() && quality > 0.0 {
        return Ok(());
    }

    log::debug!("rejected path quality {}", quality);
    Err(PathError::InvalidQuality(quality))
}

fn out_of_range(index: usize, len: usize) -> PathError {
    log::debug!("segment index {} out of range ({} segments)", index, len);
    PathError::IndexOutOfRange { index, len }
}

#[cfg(test)]
fn square() -> Vec<PathSegment> {
    vec![
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::LineTo { to: point(10.0, 0.0) },
        PathSegment::LineTo { to: point(10.0, 10.0) },
        PathSegment::LineTo { to: point(0.0, 10.0) },
        PathSegment::Close,
    ]
}

#[test]
fn rectangle_bounds() {
    let path = Path::new(vec![PathSegment::Rect {
        origin: point(0.0, 0.0),
        size: size(100.0, 50.0),
    }])
    .unwrap();

    assert_eq!(
        path.bounding_box(),
        Bounds::new(point(0.0, 0.0), point(100.0, 50.0))
    );
    assert_eq!(path.points().len(), 5);
    assert_eq!(path.polyline().subpaths().len(), 1);
    assert!(path.polyline().subpaths()[0].closed);
}

#[test]
fn square_point_count_does_not_depend_on_quality() {
    for &quality in &[0.01, 0.5, 1.0, 4.0, 100.0, 1.0e6] {
        let path = Path::with_quality(square(), quality).unwrap();
        let points = path.points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], points[4]);
        assert_eq!(
            path.polyline().subpaths(),
            &[SubPath {
                range: 0..5,
                closed: true
            }]
        );
    }
}

#[test]
fn invalid_quality() {
    assert_eq!(
        Path::with_quality(square(), 0.0).unwrap_err(),
        PathError::InvalidQuality(0.0)
    );
    assert!(Path::with_quality(square(), f64::NAN).is_err());
    assert!(Path::with_quality(square(), -2.0).is_err());

    let mut path = Path::new(square()).unwrap();
    assert!(path.set_quality(f64::INFINITY).is_err());
    assert_eq!(path.quality(), Path::DEFAULT_QUALITY);
}

#[test]
fn edits_mark_the_path_dirty() {
    let mut path = Path::new(square()).unwrap();
    assert!(!path.is_dirty());
    assert_eq!(path.version(), 1);
    assert!(!path.update());

    path.replace(2, PathSegment::LineTo { to: point(20.0, 20.0) })
        .unwrap();
    assert!(path.is_dirty());
    // Derived state is stale until the next update.
    assert_eq!(path.bounding_box().max, point(10.0, 10.0));

    assert!(path.update());
    assert_eq!(path.version(), 2);
    assert_eq!(path.bounding_box().max, point(20.0, 20.0));

    path.set_quality(10.0).unwrap();
    assert!(path.is_dirty());
    path.update();
    assert_eq!(path.version(), 3);

    // Setting the same quality again is not a change.
    path.set_quality(10.0).unwrap();
    assert!(!path.is_dirty());

    path.rebuild(10.0).unwrap();
    assert_eq!(path.version(), 4);
}

#[test]
fn invalid_edits_are_rejected() {
    let mut path = Path::new(square()).unwrap();

    assert_eq!(
        path.push(PathSegment::Close),
        Err(PathError::AlreadyClosed { index: 5 })
    );
    assert_eq!(
        path.insert(9, PathSegment::Close),
        Err(PathError::IndexOutOfRange { index: 9, len: 5 })
    );
    assert_eq!(
        path.replace(0, PathSegment::Close),
        Err(PathError::CloseWithoutMove { index: 0 })
    );

    // Nothing changed.
    assert_eq!(path.segments(), &square()[..]);
    assert!(!path.is_dirty());
}

#[test]
fn removal_that_breaks_the_path() {
    let mut path = Path::new(vec![
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::LineTo { to: point(10.0, 0.0) },
        PathSegment::Close,
        PathSegment::LineTo { to: point(0.0, 10.0) },
        PathSegment::Close,
    ])
    .unwrap();

    // Without the line, the second close would close the first sub-path again.
    assert_eq!(path.remove(3), Err(PathError::AlreadyClosed { index: 3 }));
    assert_eq!(path.len(), 5);
    assert_eq!(path.polyline().subpaths().len(), 2);
}

#[test]
fn insert_and_remove() {
    let mut path = Path::new(square()).unwrap();
    path.insert(1, PathSegment::LineTo { to: point(5.0, -5.0) })
        .unwrap();
    path.update();
    assert_eq!(path.points().len(), 6);
    assert_eq!(path.bounding_box().min, point(0.0, -5.0));

    let removed = path.remove(1).unwrap();
    assert_eq!(removed, PathSegment::LineTo { to: point(5.0, -5.0) });
    path.update();
    assert_eq!(path.points().len(), 5);

    path.clear();
    path.update();
    assert!(path.points().is_empty());
    assert!(path.bounding_box().is_empty());
}

#[test]
fn exact_bounds_of_curves() {
    let path = Path::new(vec![
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::CubicTo {
            ctrl1: Some(point(0.0, 100.0)),
            ctrl2: point(100.0, 100.0),
            to: point(100.0, 0.0),
        },
    ])
    .unwrap();

    let bounds = path.bounding_box();
    assert!((bounds.max.y - 75.0).abs() < 1e-9);
    assert!(bounds.contains_bounds(&path.polyline().bounds()));
}

#[test]
fn length_and_winding() {
    let path = Path::new(square()).unwrap();
    assert!((path.approximate_length() - 40.0).abs() < 1e-9);
    assert_eq!(path.winding(), Some(Winding::Positive));

    let reversed = Path::new(vec![
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::LineTo { to: point(0.0, 10.0) },
        PathSegment::LineTo { to: point(10.0, 10.0) },
        PathSegment::LineTo { to: point(10.0, 0.0) },
        PathSegment::Close,
    ])
    .unwrap();
    assert_eq!(reversed.winding(), Some(Winding::Negative));

    let line = Path::new(vec![
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::LineTo { to: point(10.0, 0.0) },
    ])
    .unwrap();
    assert_eq!(line.winding(), None);
    assert_eq!(Path::empty().winding(), None);
}

#[test]
fn multiple_subpaths() {
    let path = Path::new(vec![
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::LineTo { to: point(10.0, 0.0) },
        PathSegment::MoveTo { to: point(0.0, 5.0) },
        PathSegment::LineTo { to: point(10.0, 5.0) },
        PathSegment::Close,
    ])
    .unwrap();

    let subpaths: Vec<_> = path.polyline().iter_subpaths().collect();
    assert_eq!(subpaths.len(), 2);
    assert_eq!(subpaths[0], (&[point(0.0, 0.0), point(10.0, 0.0)][..], false));
    assert!(subpaths[1].1);
    assert_eq!(subpaths[1].0.len(), 3);
}

#[test]
fn append_and_transform_polylines() {
    let mut a = Polyline::new();
    a.begin(point(0.0, 0.0));
    a.push(point(1.0, 0.0));

    let mut b = Polyline::new();
    b.begin(point(5.0, 5.0));
    b.push(point(6.0, 5.0));
    b.push(point(6.0, 6.0));
    b.close();

    a.append(&b);
    assert_eq!(a.len(), 6);
    assert_eq!(a.subpaths()[1].range, 2..6);
    assert!(a.subpaths()[1].closed);

    let moved = a.transformed(&Transform::translation(10.0, 0.0));
    assert_eq!(moved.points()[2], point(15.0, 5.0));
    assert_eq!(moved.subpaths(), a.subpaths());
}
