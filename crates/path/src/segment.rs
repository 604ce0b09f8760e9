//! Path segments and their linked form.
//!
//! A [`PathSegment`] is a declarative command as written by the user. Some of its
//! parameters only make sense relative to what precedes it: a smooth curve mirrors the
//! previous control point, a close goes back to the origin of the sub-path, a tangent
//! arc depends on the current point. [`PathSegment::link`] resolves all of that against
//! the previous [`LinkedSegment`] and produces the explicit geometry as a short list
//! of [`Primitive`]s that can be flattened and bounded without looking at any other
//! segment.

use crate::geom::arrayvec::ArrayVec;
use crate::geom::{
    tangent_arc, Arc, ArcDirection, ArcFlags, CubicBezierSegment, FlatteningOptions,
    LineSegment, QuadraticBezierSegment, SvgArc,
};
use crate::math::*;
use crate::path::Polyline;
use crate::PathError;

use std::f64::consts::{FRAC_PI_2, PI};

/// The largest number of primitives a single segment links to (a rounded rectangle).
const MAX_PRIMITIVES: usize = 10;

/// One declarative path command.
///
/// Angles are in radians. With the y axis pointing down, [`ArcDirection::Positive`]
/// arcs run clockwise on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathSegment {
    /// Starts a new sub-path.
    MoveTo { to: Point },
    LineTo { to: Point },
    /// A circular arc. A straight line joins the current point to the start of the arc.
    Arc {
        center: Point,
        radius: f64,
        start_angle: Angle,
        end_angle: Angle,
        direction: ArcDirection,
    },
    /// The arc of the given radius tangent to the `current → corner` and `corner → to`
    /// lines, as drawn by the canvas `arcTo` command.
    ///
    /// The segment ends where the arc touches the second line, not at `to`.
    ArcTo { corner: Point, to: Point, radius: f64 },
    /// An elliptic arc. A straight line joins the current point to the start of the arc.
    Ellipse {
        center: Point,
        radii: Vector,
        rotation: Angle,
        start_angle: Angle,
        end_angle: Angle,
        direction: ArcDirection,
    },
    /// An elliptic arc in the SVG end-point notation.
    SvgArc {
        radii: Vector,
        x_rotation: Angle,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    /// A quadratic bézier curve. When `ctrl` is omitted, the control point of the
    /// previous quadratic curve is mirrored around the current point, or the current
    /// point itself is used.
    QuadraticTo { ctrl: Option<Point>, to: Point },
    /// A cubic bézier curve. When `ctrl1` is omitted, the second control point of the
    /// previous cubic curve is mirrored around the current point, or the current point
    /// itself is used.
    CubicTo {
        ctrl1: Option<Point>,
        ctrl2: Point,
        to: Point,
    },
    /// A closed rectangle sub-path. `origin` becomes the current point afterwards.
    ///
    /// The sub-path is already closed, so a `Close` directly after it fails with
    /// [`PathError::AlreadyClosed`].
    Rect { origin: Point, size: Size },
    /// A closed rectangle sub-path with rounded corners. `origin` becomes the current
    /// point afterwards.
    ///
    /// Like [`PathSegment::Rect`], it cannot be followed by a `Close`.
    RoundRect {
        origin: Point,
        size: Size,
        radii: BorderRadii,
    },
    /// Joins the current point to the origin of the sub-path and closes it.
    Close,
}

/// The radius of each corner of a rounded rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BorderRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl BorderRadii {
    pub fn new(radius: f64) -> Self {
        let r = radius.abs();
        BorderRadii {
            top_left: r,
            top_right: r,
            bottom_left: r,
            bottom_right: r,
        }
    }

    /// Shrinks the radii so that they fit in a `width` by `height` rectangle.
    ///
    /// Each radius is first limited to the smallest side, then the two radii of each side
    /// are reduced by the same amount until their sum fits the side.
    pub fn clamped(&self, width: f64, height: f64) -> Self {
        let w = width.abs();
        let h = height.abs();
        let min_wh = w.min(h);
        let mut tl = self.top_left.abs().min(min_wh);
        let mut tr = self.top_right.abs().min(min_wh);
        let mut bl = self.bottom_left.abs().min(min_wh);
        let mut br = self.bottom_right.abs().min(min_wh);

        if tl + tr > w {
            let x = (tl + tr - w) * 0.5;
            tl -= x;
            tr -= x;
        }
        if bl + br > w {
            let x = (bl + br - w) * 0.5;
            bl -= x;
            br -= x;
        }
        if tr + br > h {
            let x = (tr + br - h) * 0.5;
            tr -= x;
            br -= x;
        }
        if tl + bl > h {
            let x = (tl + bl - h) * 0.5;
            tl -= x;
            bl -= x;
        }

        BorderRadii {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
            bottom_right: br,
        }
    }
}

impl std::fmt::Display for BorderRadii {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // In the order of a well known convention (CSS) clockwise from top left
        write!(
            f,
            "BorderRadii({}, {}, {}, {})",
            self.top_left, self.top_right, self.bottom_right, self.bottom_left
        )
    }
}

/// Explicit geometry produced by linking a segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Starts a new sub-path at the given point.
    Start(Point),
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(Arc<f64>),
}

impl Primitive {
    /// The exact bounds of the primitive.
    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Start(p) => Bounds::new(*p, *p),
            Primitive::Line(line) => line.bounding_box().into(),
            Primitive::Quadratic(curve) => curve.bounding_box().into(),
            Primitive::Cubic(curve) => curve.bounding_box().into(),
            Primitive::Arc(arc) => arc.bounding_box().into(),
        }
    }
}

/// A segment resolved against the segments that precede it.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkedSegment {
    index: usize,
    from: Option<Point>,
    to: Point,
    primitives: ArrayVec<Primitive, MAX_PRIMITIVES>,
    quadratic_ctrl: Option<Point>,
    cubic_ctrl: Option<Point>,
    subpath_start: Point,
    closed: bool,
    closes_subpath: bool,
}

impl PathSegment {
    /// Resolves this segment, which sits at `index` in its path, against the linked form
    /// of the segment right before it (`None` for the first segment).
    pub fn link(
        &self,
        index: usize,
        previous: Option<&LinkedSegment>,
    ) -> Result<LinkedSegment, PathError> {
        let mut linked = LinkedSegment::following(index, previous);

        match *self {
            PathSegment::MoveTo { to } => {
                linked.start(to);
            }
            PathSegment::LineTo { to } => {
                linked.connect(to);
            }
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                direction,
            } => {
                let arc = Arc::circle(center, radius, start_angle, end_angle, direction);
                linked.connect(arc.from());
                linked.arc(arc, arc.to());
            }
            PathSegment::Ellipse {
                center,
                radii,
                rotation,
                start_angle,
                end_angle,
                direction,
            } => {
                let arc = Arc::ellipse(center, radii, rotation, start_angle, end_angle, direction);
                linked.connect(arc.from());
                linked.arc(arc, arc.to());
            }
            PathSegment::ArcTo { corner, to, radius } => match linked.pen() {
                None => linked.start(corner),
                Some(from) => match tangent_arc(from, corner, to, radius) {
                    Some(tangent) => {
                        linked.line(tangent.start);
                        linked.arc(tangent.arc, tangent.end);
                    }
                    None => linked.line(corner),
                },
            },
            PathSegment::SvgArc {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => match linked.pen() {
                None => linked.start(to),
                Some(from) => {
                    let arc = SvgArc {
                        from,
                        to,
                        radii,
                        x_rotation,
                        flags: ArcFlags { large_arc, sweep },
                    };
                    if arc.is_straight_line() {
                        linked.line(to);
                    } else {
                        linked.arc(arc.to_arc(), to);
                    }
                }
            },
            PathSegment::QuadraticTo { ctrl, to } => {
                let mirrored = previous.and_then(|p| p.quadratic_ctrl);
                let from = linked.pen_or_start(ctrl, index)?;
                let ctrl = ctrl.unwrap_or_else(|| mirror(mirrored, from));
                linked.push(Primitive::Quadratic(QuadraticBezierSegment { from, ctrl, to }));
                linked.to = to;
                linked.quadratic_ctrl = Some(ctrl);
            }
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                let mirrored = previous.and_then(|p| p.cubic_ctrl);
                let from = linked.pen_or_start(ctrl1, index)?;
                let ctrl1 = ctrl1.unwrap_or_else(|| mirror(mirrored, from));
                linked.push(Primitive::Cubic(CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                }));
                linked.to = to;
                linked.cubic_ctrl = Some(ctrl2);
            }
            PathSegment::Rect { origin, size } => {
                linked.start(origin);
                linked.line(point(origin.x + size.width, origin.y));
                linked.line(point(origin.x + size.width, origin.y + size.height));
                linked.line(point(origin.x, origin.y + size.height));
                linked.line(origin);
                linked.close_at(origin);
            }
            PathSegment::RoundRect {
                origin,
                size,
                radii,
            } => {
                linked.round_rect(origin, size, &radii);
                linked.close_at(origin);
            }
            PathSegment::Close => {
                if previous.is_none() {
                    log::debug!("segment {}: close at the start of the path", index);
                    return Err(PathError::CloseWithoutMove { index });
                }
                if linked.closed {
                    log::debug!("segment {}: close on a closed sub-path", index);
                    return Err(PathError::AlreadyClosed { index });
                }
                let start = linked.subpath_start;
                linked.line(start);
                linked.closed = true;
                linked.closes_subpath = true;
            }
        }

        Ok(linked)
    }

    /// The end point stated by the segment, if it has one.
    ///
    /// The linked end point can differ: see [`LinkedSegment::to`].
    pub fn to(&self) -> Option<Point> {
        match *self {
            PathSegment::MoveTo { to }
            | PathSegment::LineTo { to }
            | PathSegment::ArcTo { to, .. }
            | PathSegment::SvgArc { to, .. }
            | PathSegment::QuadraticTo { to, .. }
            | PathSegment::CubicTo { to, .. } => Some(to),
            PathSegment::Rect { origin, .. } | PathSegment::RoundRect { origin, .. } => {
                Some(origin)
            }
            PathSegment::Arc { .. } | PathSegment::Ellipse { .. } | PathSegment::Close => None,
        }
    }
}

fn mirror(ctrl: Option<Point>, around: Point) -> Point {
    match ctrl {
        Some(ctrl) => around + (around - ctrl),
        None => around,
    }
}

impl LinkedSegment {
    fn following(index: usize, previous: Option<&LinkedSegment>) -> Self {
        let (to, subpath_start, closed, current) = match previous {
            Some(prev) => (prev.to, prev.subpath_start, prev.closed, Some(prev.to)),
            None => (point(0.0, 0.0), point(0.0, 0.0), false, None),
        };

        LinkedSegment {
            index,
            from: current,
            to,
            primitives: ArrayVec::new(),
            quadratic_ctrl: None,
            cubic_ctrl: None,
            subpath_start,
            closed,
            closes_subpath: false,
        }
    }

    fn push(&mut self, primitive: Primitive) {
        // Every segment links to at most MAX_PRIMITIVES primitives.
        self.primitives.push(primitive);
    }

    fn has_current_point(&self) -> bool {
        self.from.is_some() || !self.primitives.is_empty()
    }

    fn start(&mut self, at: Point) {
        if self.primitives.is_empty() {
            self.from = Some(at);
        }
        self.push(Primitive::Start(at));
        self.to = at;
        self.subpath_start = at;
        self.closed = false;
    }

    /// Line from the current point, which must exist. Zero-length lines are skipped.
    fn line(&mut self, to: Point) {
        let from = self.to;
        if from != to {
            self.push(Primitive::Line(LineSegment { from, to }));
        }
        self.to = to;
    }

    fn arc(&mut self, arc: Arc<f64>, to: Point) {
        self.push(Primitive::Arc(arc));
        self.to = to;
    }

    /// The point drawing continues from, opening a new sub-path there if the previous
    /// one is closed. `None` if there is no current point.
    fn pen(&mut self) -> Option<Point> {
        if !self.has_current_point() {
            return None;
        }
        if self.closed {
            let at = self.to;
            self.start(at);
        }

        Some(self.to)
    }

    /// Like `pen`, but a curve with no current point starts at its first control point.
    fn pen_or_start(&mut self, ctrl: Option<Point>, index: usize) -> Result<Point, PathError> {
        if let Some(from) = self.pen() {
            return Ok(from);
        }

        match ctrl {
            Some(ctrl) => {
                self.start(ctrl);
                Ok(ctrl)
            }
            None => {
                log::debug!("segment {}: curve without a current point to mirror", index);
                Err(PathError::MissingControlPoint { index })
            }
        }
    }

    /// Moves the pen to `to` with a straight line, or starts a sub-path there if there
    /// is no current point.
    fn connect(&mut self, to: Point) {
        match self.pen() {
            Some(_) => self.line(to),
            None => self.start(to),
        }
    }

    fn close_at(&mut self, origin: Point) {
        self.to = origin;
        self.subpath_start = origin;
        self.closed = true;
        self.closes_subpath = true;
    }

    fn round_rect(&mut self, origin: Point, size: Size, radii: &BorderRadii) {
        // Normalized so that the corners are walked in the positive direction.
        let x_min = origin.x.min(origin.x + size.width);
        let y_min = origin.y.min(origin.y + size.height);
        let w = size.width.abs();
        let h = size.height.abs();
        let x_max = x_min + w;
        let y_max = y_min + h;
        let r = radii.clamped(w, h);

        let corner = |linked: &mut Self, center: Point, radius: f64, start_angle: f64| {
            if radius > 0.0 {
                let arc = Arc {
                    center,
                    radii: vector(radius, radius),
                    start_angle: Angle::radians(start_angle),
                    sweep_angle: Angle::radians(FRAC_PI_2),
                    x_rotation: Angle::zero(),
                };
                let end = arc.to();
                linked.arc(arc, end);
            }
        };

        self.start(point(x_min, y_min + r.top_left));
        corner(
            self,
            point(x_min + r.top_left, y_min + r.top_left),
            r.top_left,
            PI,
        );
        self.line(point(x_max - r.top_right, y_min));
        corner(
            self,
            point(x_max - r.top_right, y_min + r.top_right),
            r.top_right,
            -FRAC_PI_2,
        );
        self.line(point(x_max, y_max - r.bottom_right));
        corner(
            self,
            point(x_max - r.bottom_right, y_max - r.bottom_right),
            r.bottom_right,
            0.0,
        );
        self.line(point(x_min + r.bottom_left, y_max));
        corner(
            self,
            point(x_min + r.bottom_left, y_max - r.bottom_left),
            r.bottom_left,
            FRAC_PI_2,
        );
        self.line(point(x_min, y_min + r.top_left));
    }

    /// Index of the segment in its path.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Where the segment starts drawing: its own sub-path start if it opens one,
    /// otherwise the current point it was linked after.
    #[inline]
    pub fn from(&self) -> Option<Point> {
        self.from
    }

    /// The current point after this segment.
    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// The origin of the current sub-path after this segment.
    #[inline]
    pub fn subpath_start(&self) -> Point {
        self.subpath_start
    }

    /// Whether the current sub-path is closed after this segment.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The control point a following smooth quadratic curve mirrors.
    #[inline]
    pub fn quadratic_ctrl(&self) -> Option<Point> {
        self.quadratic_ctrl
    }

    /// The control point a following smooth cubic curve mirrors.
    #[inline]
    pub fn cubic_ctrl(&self) -> Option<Point> {
        self.cubic_ctrl
    }

    /// Appends the flattened segment to the polyline.
    pub fn sample(&self, options: &FlatteningOptions<f64>, out: &mut Polyline) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Start(p) => out.begin(*p),
                Primitive::Line(line) => out.push(line.to),
                Primitive::Quadratic(curve) => curve.for_each_flattened(options, &mut |p| {
                    out.push(p);
                }),
                Primitive::Cubic(curve) => curve.for_each_flattened(options, &mut |p| {
                    out.push(p);
                }),
                // Starts and ends where the pen already is.
                Primitive::Arc(arc) if arc.is_point() => {}
                Primitive::Arc(arc) => arc.for_each_flattened(options, &mut |p| {
                    out.push(p);
                }),
            }
        }

        if self.closes_subpath {
            out.close();
        }
    }

    /// The exact bounds of the segment's geometry.
    ///
    /// Empty for segments that do not draw anything, like a close on a sub-path that is
    /// already back at its origin.
    pub fn exact_bounds(&self) -> Bounds {
        self.primitives
            .iter()
            .fold(Bounds::empty(), |bounds, primitive| {
                bounds.union(&primitive.bounds())
            })
    }
}

#[cfg(test)]
fn link_all(segments: &[PathSegment]) -> Result<Vec<LinkedSegment>, PathError> {
    let mut linked: Vec<LinkedSegment> = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let next = segment.link(index, linked.last())?;
        linked.push(next);
    }

    Ok(linked)
}

#[cfg(test)]
fn assert_point_eq(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
}

#[test]
fn close_goes_back_to_the_move() {
    let linked = link_all(&[
        PathSegment::MoveTo { to: point(1.0, 1.0) },
        PathSegment::LineTo { to: point(5.0, 1.0) },
        PathSegment::LineTo { to: point(5.0, 5.0) },
        PathSegment::Close,
    ])
    .unwrap();

    let close = &linked[3];
    assert!(close.is_closed());
    assert_eq!(close.to(), point(1.0, 1.0));
    assert_eq!(
        close.primitives(),
        &[Primitive::Line(LineSegment {
            from: point(5.0, 5.0),
            to: point(1.0, 1.0)
        })]
    );
}

#[test]
fn structural_errors() {
    assert_eq!(
        link_all(&[PathSegment::Close]),
        Err(PathError::CloseWithoutMove { index: 0 })
    );
    assert_eq!(
        link_all(&[
            PathSegment::MoveTo { to: point(0.0, 0.0) },
            PathSegment::LineTo { to: point(1.0, 0.0) },
            PathSegment::Close,
            PathSegment::Close,
        ]),
        Err(PathError::AlreadyClosed { index: 3 })
    );
    assert_eq!(
        link_all(&[PathSegment::QuadraticTo {
            ctrl: None,
            to: point(1.0, 0.0)
        }]),
        Err(PathError::MissingControlPoint { index: 0 })
    );
    assert_eq!(
        link_all(&[PathSegment::CubicTo {
            ctrl1: None,
            ctrl2: point(1.0, 1.0),
            to: point(1.0, 0.0)
        }]),
        Err(PathError::MissingControlPoint { index: 0 })
    );
    // A rectangle closes its own sub-path.
    assert_eq!(
        link_all(&[
            PathSegment::Rect {
                origin: point(0.0, 0.0),
                size: size(1.0, 1.0)
            },
            PathSegment::Close,
        ]),
        Err(PathError::AlreadyClosed { index: 1 })
    );
    assert_eq!(
        link_all(&[
            PathSegment::RoundRect {
                origin: point(0.0, 0.0),
                size: size(10.0, 10.0),
                radii: BorderRadii::default(),
            },
            PathSegment::Close,
        ]),
        Err(PathError::AlreadyClosed { index: 1 })
    );
}

#[test]
fn first_line_starts_the_subpath() {
    let linked = link_all(&[
        PathSegment::LineTo { to: point(3.0, 4.0) },
        PathSegment::LineTo { to: point(6.0, 4.0) },
        PathSegment::Close,
    ])
    .unwrap();

    assert_eq!(linked[0].primitives(), &[Primitive::Start(point(3.0, 4.0))]);
    assert_eq!(linked[2].to(), point(3.0, 4.0));
}

#[test]
fn first_curve_with_explicit_control_starts_there() {
    let linked = link_all(&[PathSegment::QuadraticTo {
        ctrl: Some(point(0.0, 10.0)),
        to: point(10.0, 10.0),
    }])
    .unwrap();

    assert_eq!(linked[0].from(), Some(point(0.0, 10.0)));
    assert_eq!(linked[0].primitives().len(), 2);
}

#[test]
fn smooth_quadratic_mirrors_previous_control() {
    let linked = link_all(&[
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::QuadraticTo {
            ctrl: Some(point(10.0, 10.0)),
            to: point(20.0, 0.0),
        },
        PathSegment::QuadraticTo {
            ctrl: None,
            to: point(40.0, 0.0),
        },
        PathSegment::LineTo { to: point(40.0, 5.0) },
        PathSegment::QuadraticTo {
            ctrl: None,
            to: point(50.0, 5.0),
        },
    ])
    .unwrap();

    match linked[2].primitives() {
        [Primitive::Quadratic(curve)] => assert_eq!(curve.ctrl, point(30.0, -10.0)),
        other => panic!("unexpected primitives {:?}", other),
    }
    // Nothing to mirror after a line: the control point is the current point.
    match linked[4].primitives() {
        [Primitive::Quadratic(curve)] => assert_eq!(curve.ctrl, point(40.0, 5.0)),
        other => panic!("unexpected primitives {:?}", other),
    }
}

#[test]
fn smooth_cubic_mirrors_previous_control() {
    let linked = link_all(&[
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::CubicTo {
            ctrl1: Some(point(0.0, 10.0)),
            ctrl2: point(10.0, 10.0),
            to: point(10.0, 0.0),
        },
        PathSegment::CubicTo {
            ctrl1: None,
            ctrl2: point(20.0, -10.0),
            to: point(20.0, 0.0),
        },
        // A quadratic control is not mirrored by a cubic.
        PathSegment::QuadraticTo {
            ctrl: Some(point(25.0, 5.0)),
            to: point(30.0, 0.0),
        },
        PathSegment::CubicTo {
            ctrl1: None,
            ctrl2: point(35.0, 5.0),
            to: point(40.0, 0.0),
        },
    ])
    .unwrap();

    match linked[2].primitives() {
        [Primitive::Cubic(curve)] => assert_eq!(curve.ctrl1, point(10.0, -10.0)),
        other => panic!("unexpected primitives {:?}", other),
    }
    match linked[4].primitives() {
        [Primitive::Cubic(curve)] => assert_eq!(curve.ctrl1, point(30.0, 0.0)),
        other => panic!("unexpected primitives {:?}", other),
    }
}

#[test]
fn arc_draws_a_line_to_its_start() {
    let linked = link_all(&[
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::Arc {
            center: point(50.0, 50.0),
            radius: 25.0,
            start_angle: Angle::radians(0.0),
            end_angle: Angle::radians(PI),
            direction: ArcDirection::Positive,
        },
    ])
    .unwrap();

    let arc = &linked[1];
    assert_eq!(arc.primitives().len(), 2);
    match arc.primitives()[0] {
        Primitive::Line(line) => assert_eq!(line.to, point(75.0, 50.0)),
        other => panic!("unexpected primitive {:?}", other),
    }
    assert_point_eq(arc.to(), point(25.0, 50.0));

    let bounds = arc.exact_bounds();
    assert_point_eq(bounds.min, point(0.0, 0.0));
    assert_point_eq(bounds.max, point(75.0, 75.0));
}

#[test]
fn first_arc_starts_the_subpath() {
    let linked = link_all(&[PathSegment::Arc {
        center: point(50.0, 50.0),
        radius: 25.0,
        start_angle: Angle::radians(0.0),
        end_angle: Angle::radians(PI),
        direction: ArcDirection::Positive,
    }])
    .unwrap();

    let bounds = linked[0].exact_bounds();
    assert_point_eq(bounds.min, point(25.0, 50.0));
    assert_point_eq(bounds.max, point(75.0, 75.0));
}

#[test]
fn zero_radius_arc_collapses_to_a_point() {
    let linked = link_all(&[PathSegment::Arc {
        center: point(5.0, 5.0),
        radius: 0.0,
        start_angle: Angle::radians(0.0),
        end_angle: Angle::radians(PI),
        direction: ArcDirection::Positive,
    }])
    .unwrap();

    let bounds = linked[0].exact_bounds();
    assert_eq!(bounds, Bounds::new(point(5.0, 5.0), point(5.0, 5.0)));

    let mut polyline = Polyline::new();
    linked[0].sample(&FlatteningOptions::tolerance(0.1), &mut polyline);
    assert_eq!(polyline.points(), &[point(5.0, 5.0)][..]);
}

#[test]
fn zero_radii_ellipse_collapses_to_a_point() {
    let path = crate::Path::new(vec![PathSegment::Ellipse {
        center: point(0.0, 0.0),
        radii: vector(0.0, 0.0),
        rotation: Angle::zero(),
        start_angle: Angle::radians(0.0),
        end_angle: Angle::radians(PI),
        direction: ArcDirection::Positive,
    }])
    .unwrap();

    assert_eq!(path.points(), &[point(0.0, 0.0)][..]);
    assert_eq!(path.bounding_box(), Bounds::new(point(0.0, 0.0), point(0.0, 0.0)));

    // After a line, the collapsed arc adds nothing beyond the line to its center.
    let path = crate::Path::new(vec![
        PathSegment::MoveTo { to: point(-10.0, 0.0) },
        PathSegment::Arc {
            center: point(0.0, 0.0),
            radius: 0.0,
            start_angle: Angle::radians(0.0),
            end_angle: Angle::radians(PI),
            direction: ArcDirection::Negative,
        },
    ])
    .unwrap();

    assert_eq!(path.points(), &[point(-10.0, 0.0), point(0.0, 0.0)][..]);
}

#[test]
fn arc_to_ends_on_the_second_line() {
    let linked = link_all(&[
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::ArcTo {
            corner: point(10.0, 0.0),
            to: point(10.0, 10.0),
            radius: 2.0,
        },
    ])
    .unwrap();

    let segment = &linked[1];
    assert_point_eq(segment.to(), point(10.0, 2.0));
    match segment.primitives() {
        [Primitive::Line(line), Primitive::Arc(arc)] => {
            assert_point_eq(line.to, point(8.0, 0.0));
            assert_point_eq(arc.center, point(8.0, 2.0));
            assert_point_eq(arc.to(), point(10.0, 2.0));
        }
        other => panic!("unexpected primitives {:?}", other),
    }

    // Collinear points degrade to a line to the corner.
    let linked = link_all(&[
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::ArcTo {
            corner: point(10.0, 0.0),
            to: point(20.0, 0.0),
            radius: 2.0,
        },
    ])
    .unwrap();
    assert_eq!(linked[1].to(), point(10.0, 0.0));
    assert_eq!(linked[1].primitives().len(), 1);
}

#[test]
fn svg_arc() {
    let linked = link_all(&[
        PathSegment::MoveTo { to: point(0.0, 0.0) },
        PathSegment::SvgArc {
            radii: vector(10.0, 10.0),
            x_rotation: Angle::zero(),
            large_arc: false,
            sweep: true,
            to: point(20.0, 0.0),
        },
        PathSegment::SvgArc {
            radii: vector(0.0, 10.0),
            x_rotation: Angle::zero(),
            large_arc: false,
            sweep: true,
            to: point(30.0, 0.0),
        },
    ])
    .unwrap();

    assert_eq!(linked[1].to(), point(20.0, 0.0));
    let bounds = linked[1].exact_bounds();
    assert!((bounds.height() - 10.0).abs() < 1e-9);
    assert!((bounds.width() - 20.0).abs() < 1e-9);

    // A zero radius draws a straight line.
    assert_eq!(
        linked[2].primitives(),
        &[Primitive::Line(LineSegment {
            from: point(20.0, 0.0),
            to: point(30.0, 0.0)
        })]
    );
}

#[test]
fn rect_links_to_a_closed_loop() {
    let linked = link_all(&[
        PathSegment::Rect {
            origin: point(0.0, 0.0),
            size: size(100.0, 50.0),
        },
        PathSegment::LineTo { to: point(-10.0, 0.0) },
    ])
    .unwrap();

    let rect = &linked[0];
    assert!(rect.is_closed());
    assert_eq!(rect.to(), point(0.0, 0.0));
    assert_eq!(rect.primitives().len(), 5);
    assert_eq!(
        rect.exact_bounds(),
        Bounds::new(point(0.0, 0.0), point(100.0, 50.0))
    );

    // Drawing after a closed sub-path starts a new one at the current point.
    assert_eq!(
        linked[1].primitives(),
        &[
            Primitive::Start(point(0.0, 0.0)),
            Primitive::Line(LineSegment {
                from: point(0.0, 0.0),
                to: point(-10.0, 0.0)
            }),
        ]
    );
    assert!(!linked[1].is_closed());
}

#[test]
fn round_rect() {
    let linked = link_all(&[PathSegment::RoundRect {
        origin: point(10.0, 20.0),
        size: size(100.0, 50.0),
        radii: BorderRadii::new(10.0),
    }])
    .unwrap();

    let segment = &linked[0];
    assert!(segment.is_closed());
    assert_eq!(segment.to(), point(10.0, 20.0));
    let bounds = segment.exact_bounds();
    assert_point_eq(bounds.min, point(10.0, 20.0));
    assert_point_eq(bounds.max, point(110.0, 70.0));

    let mut polyline = Polyline::new();
    segment.sample(&FlatteningOptions::tolerance(0.01), &mut polyline);
    // The corners are cut.
    for p in polyline.points() {
        assert!((*p - point(10.0, 20.0)).length() > 2.0);
    }
    assert!(polyline.subpaths()[0].closed);
}

#[test]
fn border_radii_clamping() {
    let r = BorderRadii::new(30.0).clamped(50.0, 100.0);
    assert_eq!(r, BorderRadii::new(25.0));

    let r = BorderRadii {
        top_left: 40.0,
        top_right: 20.0,
        bottom_left: 0.0,
        bottom_right: 0.0,
    }
    .clamped(50.0, 100.0);
    assert_eq!(r.top_left, 35.0);
    assert_eq!(r.top_right, 15.0);
    assert!(r.top_left + r.top_right <= 50.0);
}
