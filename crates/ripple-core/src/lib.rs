//! Core types for the Ripple action engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! state graph every other crate operates on: strongly-typed identifiers,
//! the [`Value`] stored in node properties, the [`StateNode`] /
//! [`StateGraph`] arena and the [`StateError`] raised by graph access.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod id;
pub mod node;
pub mod value;

pub use error::StateError;
pub use graph::StateGraph;
pub use id::{ActionId, NodeId, ObserverId, RootId};
pub use node::{Parent, StateNode};
pub use value::Value;
