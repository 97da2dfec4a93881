//! Error types for action lifecycle and construction.

use ripple_core::{ActionId, NodeId, StateError};
use thiserror::Error;

use crate::kind::ActionKind;

/// Errors raised while building, performing or inverting an action.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ActionError {
    /// The action was already performed and may not be performed again.
    #[error("action {id} ({kind}) is not pristine")]
    NotPristine {
        /// The offending action.
        id: ActionId,
        /// Its kind.
        kind: ActionKind,
    },
    /// Undo was requested for an action that is not currently done.
    #[error("action {id} ({kind}) has not been performed")]
    NotPerformed {
        /// The offending action.
        id: ActionId,
        /// Its kind.
        kind: ActionKind,
    },
    /// Redo was requested for an action that is not currently undone.
    #[error("action {id} ({kind}) has not been undone")]
    NotUndone {
        /// The offending action.
        id: ActionId,
        /// Its kind.
        kind: ActionKind,
    },
    /// The action kind has no inverse.
    #[error("{kind} actions cannot be inverted")]
    NotInvertible {
        /// The kind that was asked for an inverse.
        kind: ActionKind,
    },
    /// A list-scoped creator was built over something that is not the
    /// expected list.
    #[error("node {node} property {key:?} is not the list this creator is bound to")]
    ListMismatch {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },
    /// The state graph rejected the mutation.
    #[error(transparent)]
    State(#[from] StateError),
}
