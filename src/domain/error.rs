//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent misuse of the node tree.
/// Rendering itself never fails for a node that exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("cycle detected: {child:?} is {parent:?} or one of its ancestors")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("invalid argument for command '{command}': {reason}")]
    InvalidArgument { command: String, reason: String },

    #[error("unknown accessor: {0}")]
    UnknownAccessor(String),

    #[error("{0} nodes have no name")]
    Unnamed(&'static str),

    #[error("{0} nodes take no argument")]
    NoArgument(&'static str),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
