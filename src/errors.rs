use thiserror::Error;

/// Contract violations raised by the tree core.
///
/// All variants are local and synchronous: nothing is retried and no partial
/// state is observable after one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("depth must be non-negative, got {0}")]
    InvalidDepth(i64),

    #[error("there are no more elements in the iterator")]
    Exhausted,

    #[error("attaching a node below itself or one of its descendants would create a cycle")]
    WouldCycle,
}

pub type TreeResult<T> = Result<T, TreeError>;
