//! Dispatcher, undo history and mutation guard for the Ripple action
//! engine.
//!
//! The [`Manager`] is the single entry point for changing state: it runs
//! pre-processors, verifies nothing changed behind its back
//! ([`MutationGuard`]), performs each action, notifies affected observers
//! once per dispatch, runs post-processors and records history for
//! [`undo`](Manager::undo) / [`redo`](Manager::redo).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod config;
pub mod error;
pub mod guard;
pub mod history;
pub mod manager;
pub mod metrics;
pub mod observer;
pub mod pipeline;
pub mod registry;

pub use compare::{first_divergence, Divergence};
pub use config::{ConfigError, ManagerConfig, CHECK_MUTATIONS_ENV};
pub use error::DispatchError;
pub use guard::{
    DiffHandler, MutationGuard, MutationViolation, PathOnlyHandler, ViolationHandler,
    ViolationReport, WarnHandler,
};
pub use history::ActionHistory;
pub use manager::Manager;
pub use metrics::DispatchMetrics;
pub use observer::{DispatchQueue, Observer};
pub use pipeline::{PostProcessor, PreProcessor, TraceProcessor};
pub use registry::ManagerRegistry;
