//! Errors surfaced by dispatch, undo and redo.

use ripple_action::{ActionError, ActionKind};
use ripple_core::{ActionId, RootId};
use thiserror::Error;

use crate::guard::MutationViolation;

/// Errors from the [`Manager`](crate::Manager) and
/// [`ManagerRegistry`](crate::ManagerRegistry).
///
/// Nothing is rolled back on error: actions performed earlier in the
/// failing batch stay applied.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A dispatched action had already been performed.
    #[error("action {id} ({kind}) is not pristine")]
    NotPristine {
        /// The offending action.
        id: ActionId,
        /// Its kind.
        kind: ActionKind,
    },
    /// A batch mixed binding actions with data actions.
    #[error("batch starting with {first} also contains {found}")]
    MixedBatch {
        /// Kind of the first action, which decides the batch class.
        first: ActionKind,
        /// The first action of the other class.
        found: ActionKind,
    },
    /// Performing or inverting an action failed.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// State was changed outside the action pipeline.
    #[error(transparent)]
    Mutation(#[from] MutationViolation),
    /// No manager is registered for this root.
    #[error("no manager registered for root {0}")]
    UnknownRoot(RootId),
}
