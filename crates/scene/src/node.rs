//! The nodes of a scene.

use crate::cache::{Memo, Version};
use sprig_path::math::{Bounds, Point, Transform, TransformProperties, TransformedBounds};
use sprig_path::{FillRule, Path, Polyline};

slotmap::new_key_type! {
    /// A handle to a node of a [`Scene`](crate::Scene).
    ///
    /// Handles do not keep nodes alive. Using the handle of a removed node is reported
    /// as [`SceneError::UnknownNode`](crate::SceneError::UnknownNode).
    pub struct NodeId;
}

/// How a shape is drawn, and therefore what hits it.
///
/// A shape with neither fill nor stroke is hit along its outline only.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Style {
    /// Fill the inside of the path with this rule. Open sub-paths are implicitly
    /// closed.
    pub fill: Option<FillRule>,
    /// Stroke the outline of the path with a line of this width, in the shape's own
    /// coordinate space. Transforms scale it along with the outline.
    pub line_width: Option<f64>,
}

impl Style {
    pub fn fill(rule: FillRule) -> Self {
        Style {
            fill: Some(rule),
            line_width: None,
        }
    }

    pub fn stroke(line_width: f64) -> Self {
        Style {
            fill: None,
            line_width: Some(line_width),
        }
    }

    pub fn fill_and_stroke(rule: FillRule, line_width: f64) -> Self {
        Style {
            fill: Some(rule),
            line_width: Some(line_width),
        }
    }

    /// Half of the line width, or zero without a stroke.
    pub fn half_line_width(&self) -> f64 {
        match self.line_width {
            Some(w) if w > 0.0 => w * 0.5,
            _ => 0.0,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::fill(FillRule::default())
    }
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub path: Path,
    pub style: Style,
}

/// A text box. The text itself is not laid out: the box is `width` by `height`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Text {
    pub content: String,
    pub width: f64,
    pub height: f64,
}

/// An image box. `source` is not loaded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Image {
    pub source: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Group { children: Vec<NodeId> },
    Shape(Shape),
    Text(Text),
    Image(Image),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Group { .. } => "group",
            NodeKind::Shape(_) => "shape",
            NodeKind::Text(_) => "text",
            NodeKind::Image(_) => "image",
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, NodeKind::Group { .. })
    }
}

/// A node of the scene, as seen through [`Scene::node`](crate::Scene::node).
///
/// Nodes are only mutated through the scene, which keeps their versions up to date.
#[derive(Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) transform: TransformProperties,
    pub(crate) parent: Option<NodeId>,
    pub(crate) version: Version,
    pub(crate) content_version: Version,
    pub(crate) cache: NodeCache,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, version: Version) -> Self {
        Node {
            kind,
            transform: TransformProperties::identity(),
            parent: None,
            version,
            content_version: version,
            cache: NodeCache::default(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn transform(&self) -> &TransformProperties {
        &self.transform
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The stamp of the last change of the node itself.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// The stamp of the last change of what the node draws, including changes to its
    /// descendants.
    #[inline]
    pub fn content_version(&self) -> Version {
        self.content_version
    }

    /// The children of a group, or an empty slice.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Group { children } => children,
            _ => &[],
        }
    }

    pub fn is_group(&self) -> bool {
        self.kind.is_group()
    }
}

/// The memoized geometry of a node, one entry per computation.
#[derive(Debug, Default)]
pub(crate) struct NodeCache {
    pub natural_bbox: Memo<Bounds>,
    pub natural_points: Memo<Polyline>,
    pub local_transform: Memo<Transform>,
    pub global_transform: Memo<Transform>,
    pub inverse_global_transform: Memo<Option<Transform>>,
    pub local_bbox: Memo<TransformedBounds>,
    pub global_bbox: Memo<TransformedBounds>,
    pub local_points: Memo<Polyline>,
    pub global_points: Memo<Polyline>,
}

impl NodeCache {
    pub fn invalidate(&self) {
        self.natural_bbox.invalidate();
        self.natural_points.invalidate();
        self.local_transform.invalidate();
        self.global_transform.invalidate();
        self.inverse_global_transform.invalidate();
        self.local_bbox.invalidate();
        self.global_bbox.invalidate();
        self.local_points.invalidate();
        self.global_points.invalidate();
    }
}

/// The closed rectangle `(0, 0) - (width, height)`.
pub(crate) fn box_outline(width: f64, height: f64) -> Polyline {
    let mut polyline = Polyline::new();
    polyline.begin(Point::new(0.0, 0.0));
    polyline.push(Point::new(width, 0.0));
    polyline.push(Point::new(width, height));
    polyline.push(Point::new(0.0, height));
    polyline.close();

    polyline
}

#[test]
fn half_line_width() {
    assert_eq!(Style::default().half_line_width(), 0.0);
    assert_eq!(Style::stroke(2.0).half_line_width(), 1.0);
    assert_eq!(Style::fill_and_stroke(FillRule::NonZero, 3.0).half_line_width(), 1.5);
    assert_eq!(Style::stroke(-1.0).half_line_width(), 0.0);
}

#[test]
fn outline_of_a_box() {
    let outline = box_outline(4.0, 2.0);
    assert_eq!(outline.len(), 5);
    assert!(outline.subpaths()[0].closed);
    assert_eq!(outline.bounds(), Bounds::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0)));
}
