//! Graph errors
//!
//! Only contract violations are errors. Missing nodes or properties on
//! removal, and merge conflicts, are resolved silently.
//!
//! Author: Moroya Sakamoto

use crate::identity::Identity;

/// Caller contract violation on a graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A node with this identity is already in the graph
    #[error("node {0} already exists")]
    DuplicateNode(Identity),

    /// Strict property change on a property the node does not have
    #[error("property '{property}' is unknown on node {node}")]
    UnknownProperty { node: Identity, property: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
