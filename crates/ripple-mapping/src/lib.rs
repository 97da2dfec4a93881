//! Path-keyed observer binding index.
//!
//! The [`MappingIndex`] is the registry a dispatcher consults to decide
//! which observers an action affects. Observers bind to dotted state
//! paths, and optionally to individual elements of a list at a path.
//! Because list elements are renumbered by inserts and deletes, the index
//! actively shifts element bindings (see [`MappingIndex::insert_at`] and
//! [`MappingIndex::delete_at`]) instead of recomputing them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binding;
pub mod index;

pub use binding::{Binding, BindingList};
pub use index::{MappingIndex, Slot};
