use thiserror::Error;

/// Failures at the embedding/index collaborator boundary.
///
/// The cascade never surfaces these to its caller: the vector stage catches
/// them and contributes nothing. They exist so collaborator implementations
/// have a typed seam to fail through.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("embedding generation failed: {0}")]
    Embedding(String),
    #[error("index search failed: {0}")]
    Search(String),
    #[error("query dimension {actual} does not match index dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
