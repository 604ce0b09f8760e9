use thiserror::Error;

/// A malformed path description.
///
/// Degenerate geometry (zero radii, zero-length segments, coincident points) is never an
/// error. These only report segment sequences that cannot be given a meaning.
#[derive(Error, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum PathError {
    #[error("segment {index}: close without a sub-path to close")]
    CloseWithoutMove { index: usize },
    #[error("segment {index}: the sub-path is already closed")]
    AlreadyClosed { index: usize },
    #[error("segment {index}: no control point given and nothing to mirror")]
    MissingControlPoint { index: usize },
    #[error("invalid quality {0}, expected a finite and strictly positive number")]
    InvalidQuality(f64),
    #[error("segment index {index} is out of range for a path of {len} segments")]
    IndexOutOfRange { index: usize, len: usize },
}

impl PathError {
    /// The index of the offending segment, if the error is tied to one.
    pub fn segment_index(&self) -> Option<usize> {
        match *self {
            PathError::CloseWithoutMove { index }
            | PathError::AlreadyClosed { index }
            | PathError::MissingControlPoint { index }
            | PathError::IndexOutOfRange { index, .. } => Some(index),
            PathError::InvalidQuality(_) => None,
        }
    }
}

#[test]
fn error_messages() {
    let err = PathError::AlreadyClosed { index: 3 };
    assert_eq!(err.to_string(), "segment 3: the sub-path is already closed");
    assert_eq!(err.segment_index(), Some(3));
    assert_eq!(PathError::InvalidQuality(0.0).segment_index(), None);
}
