use crate::node::NodeId;
use sprig_path::PathError;
use thiserror::Error;

/// Errors returned by scene operations.
#[derive(Error, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum SceneError {
    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("Node {0:?} is not a group")]
    NotAGroup(NodeId),
    #[error("Node {node:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, node: NodeId },
    #[error("Index {index} is out of range for group {parent:?} with {len} children")]
    ChildIndexOutOfRange {
        parent: NodeId,
        index: usize,
        len: usize,
    },
    #[error("Cannot move node {node:?} under {parent:?} which is itself or one of its descendants")]
    CyclicHierarchy { node: NodeId, parent: NodeId },
    #[error("Node {node:?} is not {expected}")]
    WrongKind { node: NodeId, expected: &'static str },
    #[error("The global transform of node {0:?} is not invertible")]
    NonInvertibleTransform(NodeId),
    #[error(transparent)]
    Path(#[from] PathError),
}

impl SceneError {
    /// The node the error is about, if any.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            SceneError::UnknownNode(node)
            | SceneError::NotAGroup(node)
            | SceneError::NotAChild { node, .. }
            | SceneError::CyclicHierarchy { node, .. }
            | SceneError::WrongKind { node, .. }
            | SceneError::NonInvertibleTransform(node) => Some(node),
            SceneError::ChildIndexOutOfRange { parent, .. } => Some(parent),
            SceneError::Path(_) => None,
        }
    }
}

#[test]
fn path_errors_convert() {
    let err: SceneError = PathError::CloseWithoutMove { index: 0 }.into();
    assert_eq!(err.node(), None);
    assert_eq!(err.to_string(), PathError::CloseWithoutMove { index: 0 }.to_string());
}
