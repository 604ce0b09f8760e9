//! A convenience builder for paths.
//!
//! ```
//! use sprig_path::{ArcDirection, Path};
//! use sprig_path::math::{point, Angle};
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.arc(point(10.0, 10.0), 10.0, Angle::degrees(-90.0), Angle::degrees(90.0), ArcDirection::Positive);
//! builder.close();
//!
//! let path = builder.build().unwrap();
//! assert_eq!(path.segments().len(), 4);
//! ```
//!
//! The builder only records segments: errors are reported by [`PathBuilder::build`].

use crate::math::*;
use crate::segment::{BorderRadii, PathSegment};
use crate::{ArcDirection, Path, PathError};

/// Records segments and builds a [`Path`] out of them.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
    quality: f64,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder {
            segments: Vec::new(),
            quality: Path::DEFAULT_QUALITY,
        }
    }

    pub fn with_capacity(segments: usize) -> Self {
        PathBuilder {
            segments: Vec::with_capacity(segments),
            quality: Path::DEFAULT_QUALITY,
        }
    }

    /// Sets the quality of the built path.
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    pub fn push(&mut self, segment: PathSegment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.push(PathSegment::MoveTo { to })
    }

    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.push(PathSegment::LineTo { to })
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.push(PathSegment::QuadraticTo {
            ctrl: Some(ctrl),
            to,
        })
    }

    /// A quadratic bézier curve mirroring the previous control point.
    pub fn smooth_quadratic_bezier_to(&mut self, to: Point) -> &mut Self {
        self.push(PathSegment::QuadraticTo { ctrl: None, to })
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        self.push(PathSegment::CubicTo {
            ctrl1: Some(ctrl1),
            ctrl2,
            to,
        })
    }

    /// A cubic bézier curve mirroring the previous second control point.
    pub fn smooth_cubic_bezier_to(&mut self, ctrl2: Point, to: Point) -> &mut Self {
        self.push(PathSegment::CubicTo {
            ctrl1: None,
            ctrl2,
            to,
        })
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: Angle,
        end_angle: Angle,
        direction: ArcDirection,
    ) -> &mut Self {
        self.push(PathSegment::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            direction,
        })
    }

    /// Canvas-style tangent arc. See [`PathSegment::ArcTo`].
    pub fn arc_to(&mut self, corner: Point, to: Point, radius: f64) -> &mut Self {
        self.push(PathSegment::ArcTo { corner, to, radius })
    }

    pub fn ellipse(
        &mut self,
        center: Point,
        radii: Vector,
        rotation: Angle,
        start_angle: Angle,
        end_angle: Angle,
        direction: ArcDirection,
    ) -> &mut Self {
        self.push(PathSegment::Ellipse {
            center,
            radii,
            rotation,
            start_angle,
            end_angle,
            direction,
        })
    }

    /// A full circle, as a closed sub-path of its own.
    pub fn circle(&mut self, center: Point, radius: f64) -> &mut Self {
        self.move_to(point(center.x + radius.abs(), center.y));
        self.arc(
            center,
            radius,
            Angle::zero(),
            Angle::two_pi(),
            ArcDirection::Positive,
        );
        self.close()
    }

    pub fn svg_arc(
        &mut self,
        radii: Vector,
        x_rotation: Angle,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) -> &mut Self {
        self.push(PathSegment::SvgArc {
            radii,
            x_rotation,
            large_arc,
            sweep,
            to,
        })
    }

    pub fn rect(&mut self, origin: Point, size: Size) -> &mut Self {
        self.push(PathSegment::Rect { origin, size })
    }

    pub fn rounded_rect(&mut self, origin: Point, size: Size, radii: BorderRadii) -> &mut Self {
        self.push(PathSegment::RoundRect {
            origin,
            size,
            radii,
        })
    }

    pub fn close(&mut self) -> &mut Self {
        self.push(PathSegment::Close)
    }

    /// The segments recorded so far.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Links, flattens and bounds the recorded segments.
    pub fn build(self) -> Result<Path, PathError> {
        Path::with_quality(self.segments, self.quality)
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        PathBuilder::new()
    }
}

impl Extend<PathSegment> for PathBuilder {
    fn extend<T: IntoIterator<Item = PathSegment>>(&mut self, iter: T) {
        self.segments.extend(iter);
    }
}

#[test]
fn builder_records_segments() {
    let mut builder = PathBuilder::new();
    builder
        .move_to(point(0.0, 0.0))
        .quadratic_bezier_to(point(5.0, 5.0), point(10.0, 0.0))
        .smooth_quadratic_bezier_to(point(20.0, 0.0))
        .close();

    assert_eq!(
        builder.segments()[2],
        PathSegment::QuadraticTo {
            ctrl: None,
            to: point(20.0, 0.0)
        }
    );

    let path = builder.with_quality(2.0).build().unwrap();
    assert_eq!(path.quality(), 2.0);
    assert!((path.bounding_box().min.y + 2.5).abs() < 1e-9);
    assert!((path.bounding_box().max.y - 2.5).abs() < 1e-9);
}

#[test]
fn build_reports_errors() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0)).close().close();
    assert_eq!(
        builder.build().unwrap_err(),
        PathError::AlreadyClosed { index: 2 }
    );
}

#[test]
fn circle() {
    let mut builder = PathBuilder::new();
    builder.circle(point(10.0, 10.0), 5.0);
    let path = builder.with_quality(100.0).build().unwrap();

    let bounds = path.bounding_box();
    assert!((bounds.min - point(5.0, 5.0)).length() < 1e-9);
    assert!((bounds.max - point(15.0, 15.0)).length() < 1e-9);
    assert!((path.approximate_length() - 10.0 * std::f64::consts::PI).abs() < 0.05);

    for p in path.points() {
        let d = (*p - point(10.0, 10.0)).length();
        assert!((d - 5.0).abs() < 1e-9);
    }
}
