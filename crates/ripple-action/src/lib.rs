//! Invertible actions for the Ripple action engine.
//!
//! An [`Action`] is the only sanctioned way to mutate a
//! [`StateGraph`](ripple_core::StateGraph). Every variant of [`Op`] knows
//! how to apply itself, which [`MappingIndex`](ripple_mapping::MappingIndex)
//! bindings it affects, and what its inverse is. Creators in [`creator`]
//! build actions from current state, including conditional no-ops.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod creator;
pub mod error;
pub mod kind;
pub mod op;

pub use action::{Action, ActionState, PostHook};
pub use creator::{Creators, ListCreators};
pub use error::ActionError;
pub use kind::{ActionKind, NoOpKind};
pub use op::Op;
