//! The scene: an arena of nodes organized in a hierarchy.

use crate::cache::{Dirty, Version, VersionCounter};
use crate::hit::HitTestStats;
use crate::node::{Image, Node, NodeId, NodeKind, Shape, Style, Text};
use crate::{SceneError, SceneOptions};
use sprig_path::math::TransformProperties;
use sprig_path::{Path, PathError, PathSegment};

use slotmap::SlotMap;
use std::cell::Cell;

/// A hierarchy of nodes with memoized geometry.
///
/// Nodes are created detached, as roots. Roots and the children of each group are
/// ordered: later nodes are drawn above earlier ones.
///
/// Every mutation goes through the scene, which calls [`Scene::mark_dirty`] so that
/// the geometry of the node and of its ancestors is recomputed on the next read.
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    versions: VersionCounter,
    options: SceneOptions,
    pub(crate) stats: Cell<HitTestStats>,
}

impl Scene {
    pub fn new(options: SceneOptions) -> Self {
        Scene {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            versions: VersionCounter::new(),
            options,
            stats: Cell::new(HitTestStats::default()),
        }
    }

    #[inline]
    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// Number of nodes, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the handle refers to a node of this scene.
    #[inline]
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The nodes without parent, in paint order.
    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    /// The children of a group, in paint order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        match &self.node(id)?.kind {
            NodeKind::Group { children } => Ok(children),
            _ => Err(SceneError::NotAGroup(id)),
        }
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    /// The stamp of the last change of the node.
    pub fn version(&self, id: NodeId) -> Result<Version, SceneError> {
        Ok(self.node(id)?.version)
    }

    /// Iterates over the node and its ancestors, from the node up to its root.
    pub(crate) fn ancestors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let id = next?;
            let node = self.nodes.get(id)?;
            next = node.parent;
            Some((id, node))
        })
    }

    fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let version = self.versions.next();
        let id = self.nodes.insert(Node::new(kind, version));
        self.roots.push(id);

        id
    }

    pub fn add_group(&mut self) -> NodeId {
        self.add_node(NodeKind::Group {
            children: Vec::new(),
        })
    }

    /// Adds a shape with the default quality and fill rule of the scene.
    pub fn add_shape(&mut self, segments: Vec<PathSegment>) -> Result<NodeId, SceneError> {
        let path = Path::with_quality(segments, self.options.default_quality)?;
        let style = Style::fill(self.options.default_fill_rule);

        Ok(self.add_shape_with_path(path, style))
    }

    /// Adds a shape drawing an existing path.
    pub fn add_shape_with_path(&mut self, mut path: Path, style: Style) -> NodeId {
        path.update();
        self.add_node(NodeKind::Shape(Shape { path, style }))
    }

    pub fn add_text(&mut self, content: impl Into<String>, width: f64, height: f64) -> NodeId {
        self.add_node(NodeKind::Text(Text {
            content: content.into(),
            width,
            height,
        }))
    }

    pub fn add_image(&mut self, source: impl Into<String>, width: f64, height: f64) -> NodeId {
        self.add_node(NodeKind::Image(Image {
            source: source.into(),
            width,
            height,
        }))
    }

    /// Moves `child` to the end of the children of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.attach(parent, None, child)
    }

    /// Moves `child` to position `index` among the children of `parent`.
    ///
    /// The index is taken after `child` is removed from its current place, so moving a
    /// child within its own group works like removing then inserting it.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), SceneError> {
        self.attach(parent, Some(index), child)
    }

    /// Detaches `child` from `parent`. The child becomes a root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.children(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild {
                parent,
                node: child,
            });
        }

        self.detach(child)?;
        self.roots.push(child);
        self.mark_dirty(child, Dirty::TRANSFORM)
    }

    /// Moves a node under a new parent, or makes it a root.
    pub fn reparent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        match parent {
            Some(parent) => self.append_child(parent, node),
            None => match self.node(node)?.parent {
                Some(parent) => self.remove_child(parent, node),
                None => Ok(()),
            },
        }
    }

    /// Removes a node and all of its descendants from the scene.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.detach(id)?;

        let mut stack = vec![id];
        let mut count = 0;
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                stack.extend_from_slice(node.children());
                count += 1;
            }
        }
        log::debug!("removed {:?} and {} descendants", id, count - 1);

        Ok(())
    }

    fn attach(
        &mut self,
        parent: NodeId,
        index: Option<usize>,
        child: NodeId,
    ) -> Result<(), SceneError> {
        let siblings = self.children(parent)?;
        let previous_parent = self.node(child)?.parent;

        if self.ancestors(parent).any(|(ancestor, _)| ancestor == child) {
            return Err(SceneError::CyclicHierarchy {
                node: child,
                parent,
            });
        }

        let len = siblings.len() - (previous_parent == Some(parent)) as usize;
        let index = index.unwrap_or(len);
        if index > len {
            return Err(SceneError::ChildIndexOutOfRange { parent, index, len });
        }

        self.detach(child)?;
        if let NodeKind::Group { children } = &mut self.node_mut(parent)?.kind {
            children.insert(index, child);
        }
        self.node_mut(child)?.parent = Some(parent);
        log::debug!(
            "moved {:?} from {:?} to {:?} at {}",
            child,
            previous_parent,
            parent,
            index
        );

        self.mark_dirty(child, Dirty::TRANSFORM)
    }

    /// Takes the node out of its group or out of the roots. The former parent is
    /// marked dirty.
    fn detach(&mut self, id: NodeId) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        match node.parent.take() {
            Some(parent) => {
                if let NodeKind::Group { children } = &mut self.node_mut(parent)?.kind {
                    children.retain(|c| *c != id);
                }
                self.mark_dirty(parent, Dirty::CONTENT)?;
            }
            None => self.roots.retain(|r| *r != id),
        }

        Ok(())
    }

    /// Records a change of the node.
    ///
    /// Bumps the version of the node, and its content version if the content changed.
    /// Ancestors get their content version bumped since their natural bounds depend on
    /// the local bounds of their children. Derived geometry is recomputed on the next
    /// read.
    ///
    /// All setters call this. It only needs to be called directly after changing data
    /// the scene does not know about.
    pub fn mark_dirty(&mut self, id: NodeId, dirty: Dirty) -> Result<(), SceneError> {
        if dirty.is_empty() {
            self.node(id)?;
            return Ok(());
        }

        let stamp = self.versions.next();
        let node = self.node_mut(id)?;
        node.version = stamp;
        if dirty.content {
            node.content_version = stamp;
        }

        let mut next = node.parent;
        let mut depth = 0;
        while let Some(ancestor) = next {
            let node = self.node_mut(ancestor)?;
            node.content_version = stamp;
            next = node.parent;
            depth += 1;
        }

        log::debug!(
            "invalidated {:?} ({:?}) at {}, {} ancestors",
            id,
            dirty,
            stamp,
            depth
        );

        Ok(())
    }

    /// Drops every memoized value. Versions are unaffected.
    pub fn invalidate_caches(&self) {
        for (_, node) in &self.nodes {
            node.cache.invalidate();
        }
    }

    pub fn set_transform(
        &mut self,
        id: NodeId,
        transform: TransformProperties,
    ) -> Result<(), SceneError> {
        self.node_mut(id)?.transform = transform;
        self.mark_dirty(id, Dirty::TRANSFORM)
    }

    fn edit_transform(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut TransformProperties),
    ) -> Result<(), SceneError> {
        edit(&mut self.node_mut(id)?.transform);
        self.mark_dirty(id, Dirty::TRANSFORM)
    }

    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), SceneError> {
        self.edit_transform(id, |t| {
            t.x = x;
            t.y = y;
        })
    }

    pub fn set_scale(&mut self, id: NodeId, scale_x: f64, scale_y: f64) -> Result<(), SceneError> {
        self.edit_transform(id, |t| {
            t.scale_x = scale_x;
            t.scale_y = scale_y;
        })
    }

    /// Sets the skew angles, in radians.
    pub fn set_skew(&mut self, id: NodeId, skew_x: f64, skew_y: f64) -> Result<(), SceneError> {
        self.edit_transform(id, |t| {
            t.skew_x = skew_x;
            t.skew_y = skew_y;
        })
    }

    /// Sets the rotation, in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) -> Result<(), SceneError> {
        self.edit_transform(id, |t| t.rotation = rotation)
    }

    /// Sets the size of a text or image box.
    pub fn set_size(&mut self, id: NodeId, width: f64, height: f64) -> Result<(), SceneError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(Text {
                width: w,
                height: h,
                ..
            })
            | NodeKind::Image(Image {
                width: w,
                height: h,
                ..
            }) => {
                *w = width;
                *h = height;
            }
            _ => {
                return Err(SceneError::WrongKind {
                    node: id,
                    expected: "a text or an image",
                })
            }
        }

        self.mark_dirty(id, Dirty::CONTENT)
    }

    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> Result<(), SceneError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(text) => text.content = content.into(),
            _ => {
                return Err(SceneError::WrongKind {
                    node: id,
                    expected: "a text",
                })
            }
        }

        self.mark_dirty(id, Dirty::CONTENT)
    }

    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), SceneError> {
        self.shape_mut(id)?.style = style;
        self.mark_dirty(id, Dirty::CONTENT)
    }

    /// Changes the flattening quality of a shape and rebuilds its points.
    pub fn set_quality(&mut self, id: NodeId, quality: f64) -> Result<(), SceneError> {
        self.shape_mut(id)?.path.rebuild(quality)?;
        self.mark_dirty(id, Dirty::CONTENT)
    }

    /// Edits the path of a shape.
    ///
    /// The path is brought up to date and the shape marked dirty afterwards, even if
    /// `edit` fails: edits made before the failure are kept.
    pub fn edit_path<R>(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut Path) -> Result<R, PathError>,
    ) -> Result<R, SceneError> {
        let path = &mut self.shape_mut(id)?.path;
        let result = edit(path);
        path.update();
        self.mark_dirty(id, Dirty::CONTENT)?;

        Ok(result?)
    }

    pub fn shape(&self, id: NodeId) -> Result<&Shape, SceneError> {
        match &self.node(id)?.kind {
            NodeKind::Shape(shape) => Ok(shape),
            _ => Err(SceneError::WrongKind {
                node: id,
                expected: "a shape",
            }),
        }
    }

    fn shape_mut(&mut self, id: NodeId) -> Result<&mut Shape, SceneError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Shape(shape) => Ok(shape),
            _ => Err(SceneError::WrongKind {
                node: id,
                expected: "a shape",
            }),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(SceneOptions::DEFAULT)
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots)
            .field("version", &self.versions.current())
            .finish()
    }
}

#[cfg(test)]
use sprig_path::math::{point, size};

#[cfg(test)]
fn square(scene: &mut Scene) -> NodeId {
    scene
        .add_shape(vec![PathSegment::Rect {
            origin: point(0.0, 0.0),
            size: size(10.0, 10.0),
        }])
        .unwrap()
}

#[test]
fn build_a_hierarchy() {
    let mut scene = Scene::default();
    let group = scene.add_group();
    let a = square(&mut scene);
    let b = scene.add_text("hello", 20.0, 10.0);

    assert_eq!(scene.roots(), &[group, a, b]);

    scene.append_child(group, a).unwrap();
    scene.insert_child(group, 0, b).unwrap();
    assert_eq!(scene.children(group).unwrap(), &[b, a]);
    assert_eq!(scene.parent(a).unwrap(), Some(group));
    assert_eq!(scene.roots(), &[group]);

    // Moving within the same group.
    scene.append_child(group, b).unwrap();
    assert_eq!(scene.children(group).unwrap(), &[a, b]);

    scene.remove_child(group, a).unwrap();
    assert_eq!(scene.children(group).unwrap(), &[b]);
    assert_eq!(scene.parent(a).unwrap(), None);
    assert_eq!(scene.roots(), &[group, a]);

    scene.reparent(a, Some(group)).unwrap();
    scene.reparent(b, None).unwrap();
    assert_eq!(scene.children(group).unwrap(), &[a]);
    assert_eq!(scene.roots(), &[group, b]);
}

#[test]
fn hierarchy_errors() {
    let mut scene = Scene::default();
    let outer = scene.add_group();
    let inner = scene.add_group();
    let leaf = square(&mut scene);
    scene.append_child(outer, inner).unwrap();
    scene.append_child(inner, leaf).unwrap();

    assert_eq!(
        scene.append_child(inner, outer),
        Err(SceneError::CyclicHierarchy {
            node: outer,
            parent: inner
        })
    );
    assert_eq!(
        scene.append_child(outer, outer),
        Err(SceneError::CyclicHierarchy {
            node: outer,
            parent: outer
        })
    );
    assert_eq!(scene.append_child(leaf, inner), Err(SceneError::NotAGroup(leaf)));
    assert_eq!(
        scene.remove_child(outer, leaf),
        Err(SceneError::NotAChild {
            parent: outer,
            node: leaf
        })
    );
    assert_eq!(
        scene.insert_child(outer, 3, leaf),
        Err(SceneError::ChildIndexOutOfRange {
            parent: outer,
            index: 3,
            len: 1
        })
    );
    // Failed operations leave the hierarchy untouched.
    assert_eq!(scene.children(outer).unwrap(), &[inner]);
    assert_eq!(scene.children(inner).unwrap(), &[leaf]);
}

#[test]
fn remove_a_subtree() {
    let mut scene = Scene::default();
    let root = scene.add_group();
    let group = scene.add_group();
    let leaf = square(&mut scene);
    scene.append_child(root, group).unwrap();
    scene.append_child(group, leaf).unwrap();

    scene.remove(group).unwrap();
    assert!(!scene.has_node(group));
    assert!(!scene.has_node(leaf));
    assert_eq!(scene.len(), 1);
    assert!(scene.children(root).unwrap().is_empty());
    assert_eq!(scene.node(leaf).err(), Some(SceneError::UnknownNode(leaf)));
    assert_eq!(scene.set_position(leaf, 1.0, 1.0), Err(SceneError::UnknownNode(leaf)));
}

#[test]
fn setters_bump_versions() {
    let mut scene = Scene::default();
    let group = scene.add_group();
    let leaf = square(&mut scene);
    scene.append_child(group, leaf).unwrap();

    let group_content = scene.node(group).unwrap().content_version();
    let group_version = scene.version(group).unwrap();
    let leaf_version = scene.version(leaf).unwrap();

    scene.set_rotation(leaf, 0.5).unwrap();
    assert!(scene.version(leaf).unwrap() > leaf_version);
    assert!(scene.node(group).unwrap().content_version() > group_content);
    assert_eq!(scene.version(group).unwrap(), group_version);

    let leaf_content = scene.node(leaf).unwrap().content_version();
    scene.set_position(leaf, 3.0, 4.0).unwrap();
    assert_eq!(scene.node(leaf).unwrap().content_version(), leaf_content);
    assert_eq!(scene.node(leaf).unwrap().transform().x, 3.0);

    scene.set_style(leaf, Style::stroke(1.0)).unwrap();
    assert!(scene.node(leaf).unwrap().content_version() > leaf_content);
}

#[test]
fn kind_specific_setters() {
    let mut scene = Scene::default();
    let text = scene.add_text("a", 1.0, 1.0);
    let image = scene.add_image("cat.png", 1.0, 1.0);
    let shape = square(&mut scene);

    scene.set_text(text, "b").unwrap();
    scene.set_size(image, 4.0, 3.0).unwrap();
    match scene.node(image).unwrap().kind() {
        NodeKind::Image(image) => assert_eq!((image.width, image.height), (4.0, 3.0)),
        _ => panic!(),
    }

    assert!(matches!(
        scene.set_text(image, "c"),
        Err(SceneError::WrongKind { .. })
    ));
    assert!(matches!(
        scene.set_size(shape, 1.0, 1.0),
        Err(SceneError::WrongKind { .. })
    ));
    assert!(matches!(
        scene.set_style(text, Style::default()),
        Err(SceneError::WrongKind { .. })
    ));
    assert_eq!(
        scene.set_quality(shape, 0.0),
        Err(SceneError::Path(PathError::InvalidQuality(0.0)))
    );
    scene.set_quality(shape, 10.0).unwrap();
    assert_eq!(scene.shape(shape).unwrap().path.quality(), 10.0);
}

#[test]
fn edit_a_path() {
    let mut scene = Scene::default();
    let shape = square(&mut scene);
    let before = scene.node(shape).unwrap().content_version();

    let removed = scene.edit_path(shape, |path| path.remove(0)).unwrap();
    assert!(matches!(removed, PathSegment::Rect { .. }));
    assert!(scene.shape(shape).unwrap().path.is_empty());
    assert!(scene.node(shape).unwrap().content_version() > before);

    assert_eq!(
        scene.edit_path(shape, |path| path.push(PathSegment::Close)),
        Err(SceneError::Path(PathError::CloseWithoutMove { index: 0 }))
    );
}
