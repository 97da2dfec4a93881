//! Errors raised while reading or editing the state graph.

use thiserror::Error;

use crate::id::NodeId;

/// Errors from [`StateGraph`](crate::StateGraph) access and mutation.
///
/// Most variants are usage errors (a caller addressed a property that
/// does not have the expected shape). [`StateError::Detached`] and
/// [`StateError::ArrayMembership`] are structural: the graph itself is
/// not in the shape the operation requires.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// The node id does not exist in this graph's arena.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The node was removed from the graph and can no longer be walked.
    #[error("node {0} is detached from the graph")]
    Detached(NodeId),

    /// The property does not exist on the node.
    #[error("node {node} has no property '{key}'")]
    PropertyMissing {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },

    /// An insert targeted a property that already holds a value.
    #[error("property '{key}' on node {node} already holds a value")]
    PropertyExists {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },

    /// An insert supplied a `null` value.
    #[error("cannot insert null at '{key}' on node {node}")]
    NullValue {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },

    /// A scalar property action addressed a composite child.
    #[error("property '{key}' on node {node} holds a state object")]
    CompositeProperty {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },

    /// A state-object action addressed a property that is not a child node.
    #[error("property '{key}' on node {node} is not a state object")]
    NotAStateObject {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },

    /// An array action addressed a property that is not a list.
    #[error("property '{key}' on node {node} is not a list")]
    NotAList {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },

    /// An array index fell outside the permitted range.
    ///
    /// Inserts accept `0..=len`; updates and deletes accept `0..len`.
    #[error("index {index} out of range for '{key}' on node {node} (len {len})")]
    IndexOutOfRange {
        /// Owning node.
        node: NodeId,
        /// List property key.
        key: String,
        /// The requested index.
        index: usize,
        /// The list length at the time of the request.
        len: usize,
    },

    /// A node that is already linked into the graph was inserted again.
    #[error("node {0} is already attached to the graph")]
    AlreadyAttached(NodeId),

    /// A node claims list membership its parent does not confirm.
    #[error("node {node} is not an element of '{key}' on its parent")]
    ArrayMembership {
        /// The element node.
        node: NodeId,
        /// The list property key the node claims.
        key: String,
    },

    /// A graph was built from JSON whose top level is not an object.
    #[error("state root must be a JSON object")]
    RootNotObject,

    /// A dotted path does not lead to a property.
    #[error("path '{0}' does not resolve to a property")]
    UnresolvedPath(String),
}
