//! Ripple: fine-grained, undoable state management with path-based
//! observer notification.
//!
//! Re-exports every Ripple sub-crate under one name. Depend on `ripple`
//! alone unless you need to pin a single layer.
//!
//! # Quick start
//!
//! ```rust
//! use ripple::prelude::*;
//! use serde_json::json;
//!
//! let graph = StateGraph::from_json(json!({"name": {"first": "Matthew"}})).unwrap();
//! let mut manager = Manager::from_state(graph);
//!
//! // An observer is any closure taking the affected actions.
//! let id = manager.register_observer(|actions: &[Action], _: &mut DispatchQueue| {
//!     for a in actions {
//!         println!("{} at {:?}", a.kind(), a.path());
//!     }
//! });
//! manager
//!     .dispatch(vec![Action::map_state_to_prop(Binding::new(id, "first", "name.first"))])
//!     .unwrap();
//!
//! let (name, key) = manager.state().resolve("name.first").unwrap();
//! manager.dispatch(vec![Action::update_property(name, key, "Matt")]).unwrap();
//! assert_eq!(manager.state().to_json(), json!({"name": {"first": "Matt"}}));
//!
//! manager.undo(1).unwrap();
//! assert_eq!(manager.state().to_json(), json!({"name": {"first": "Matthew"}}));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ripple-core` | IDs, values, state nodes and the state graph |
//! | [`mapping`] | `ripple-mapping` | Observer bindings and the mapping index |
//! | [`action`] | `ripple-action` | Actions, inversion and action creators |
//! | [`engine`] | `ripple-engine` | Dispatcher, history, mutation guard, pipeline |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the state graph (`ripple-core`).
///
/// Contains [`types::StateGraph`], [`types::Value`], the id newtypes and
/// [`types::StateError`].
pub use ripple_core as types;

/// Observer bindings and the path-keyed index (`ripple-mapping`).
pub use ripple_mapping as mapping;

/// Actions and action creators (`ripple-action`).
///
/// [`action::Action`] constructors cover every operation; the
/// conditional creators on [`action::Creators`] and
/// [`action::ListCreators`] return no-ops when there is nothing to do.
pub use ripple_action as action;

/// Dispatcher and its supporting machinery (`ripple-engine`).
///
/// [`engine::Manager`] for a single graph, [`engine::ManagerRegistry`]
/// when several graphs are looked up by root id.
pub use ripple_engine as engine;

/// Common imports for typical Ripple usage.
///
/// ```rust
/// use ripple::prelude::*;
/// ```
pub mod prelude {
    // State
    pub use ripple_core::{NodeId, ObserverId, RootId, StateGraph, Value};

    // Mapping
    pub use ripple_mapping::{Binding, MappingIndex};

    // Actions
    pub use ripple_action::{Action, ActionKind, Creators, ListCreators, NoOpKind};

    // Errors
    pub use ripple_action::ActionError;
    pub use ripple_core::StateError;
    pub use ripple_engine::{ConfigError, DispatchError, MutationViolation};

    // Engine
    pub use ripple_engine::{
        DispatchMetrics, DispatchQueue, Manager, ManagerConfig, ManagerRegistry, Observer,
        PostProcessor, PreProcessor,
    };
}
