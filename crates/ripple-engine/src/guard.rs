//! Out-of-band mutation detection.
//!
//! When enabled, the [`MutationGuard`] keeps a JSON snapshot of the graph
//! taken after every successful dispatch. Before the next dispatch the
//! live graph is rendered and compared; any difference means something
//! wrote to state without going through an action. What happens then is
//! up to the installed [`ViolationHandler`].
//!
//! Snapshotting renders the whole graph, so each checked dispatch costs
//! O(state size). Enable it in debug and test builds.

use std::fmt;

use serde_json::Value as Json;
use thiserror::Error;

use crate::compare::{first_divergence, render_diff, Divergence};

/// State changed outside the action pipeline.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("state mutated outside an action at '{path}': {before} -> {after}")]
pub struct MutationViolation {
    /// Dotted path of the first differing value.
    pub path: String,
    /// Value in the last snapshot.
    pub before: Json,
    /// Value in the live graph.
    pub after: Json,
    /// Full line diff of the two snapshots, when the handler renders one.
    pub diff: Option<String>,
}

impl MutationViolation {
    fn from_divergence(d: Divergence, diff: Option<String>) -> Self {
        Self {
            path: d.path,
            before: d.before,
            after: d.after,
            diff,
        }
    }
}

/// Everything a handler may want to look at.
#[derive(Debug)]
pub struct ViolationReport<'a> {
    /// First differing location.
    pub divergence: Divergence,
    /// The last snapshot.
    pub snapshot: &'a Json,
    /// The live graph.
    pub live: &'a Json,
}

/// Decides what a detected violation does.
///
/// Returning `Err` aborts the dispatch before any action is performed.
pub trait ViolationHandler {
    /// Handle one detected violation.
    fn handle(&mut self, report: ViolationReport<'_>) -> Result<(), MutationViolation>;
}

/// Fails with a full line diff of both snapshots. The default.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiffHandler;

impl ViolationHandler for DiffHandler {
    fn handle(&mut self, report: ViolationReport<'_>) -> Result<(), MutationViolation> {
        let diff = render_diff(report.snapshot, report.live);
        Err(MutationViolation::from_divergence(report.divergence, Some(diff)))
    }
}

/// Fails with the first differing path only. Cheap.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathOnlyHandler;

impl ViolationHandler for PathOnlyHandler {
    fn handle(&mut self, report: ViolationReport<'_>) -> Result<(), MutationViolation> {
        Err(MutationViolation::from_divergence(report.divergence, None))
    }
}

/// Logs a warning and lets the dispatch continue.
#[derive(Clone, Copy, Debug, Default)]
pub struct WarnHandler;

impl ViolationHandler for WarnHandler {
    fn handle(&mut self, report: ViolationReport<'_>) -> Result<(), MutationViolation> {
        let d = &report.divergence;
        tracing::warn!(
            path = %d.path,
            before = %d.before,
            after = %d.after,
            "state mutated outside an action"
        );
        Ok(())
    }
}

/// Snapshot-and-compare guard.
pub struct MutationGuard {
    snapshot: Option<Json>,
    handler: Box<dyn ViolationHandler>,
}

impl fmt::Debug for MutationGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationGuard")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl Default for MutationGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationGuard {
    /// A disabled guard using [`DiffHandler`].
    pub fn new() -> Self {
        Self::with_handler(DiffHandler)
    }

    /// A disabled guard using `handler`.
    pub fn with_handler(handler: impl ViolationHandler + 'static) -> Self {
        Self {
            snapshot: None,
            handler: Box::new(handler),
        }
    }

    /// Replace the violation handler.
    pub fn set_handler(&mut self, handler: impl ViolationHandler + 'static) {
        self.handler = Box::new(handler);
    }

    /// Take the first snapshot.
    ///
    /// Call once all direct initialization is done; anything written
    /// afterwards without an action is reported.
    pub fn enable(&mut self, live: Json) {
        self.snapshot = Some(live);
    }

    /// Drop the snapshot and stop checking.
    pub fn disable(&mut self) {
        self.snapshot = None;
    }

    /// Whether a snapshot is held.
    pub fn is_enabled(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Compare the live graph against the snapshot.
    ///
    /// A no-op while disabled.
    pub fn check(&mut self, live: &Json) -> Result<(), MutationViolation> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        match first_divergence(snapshot, live) {
            None => Ok(()),
            Some(divergence) => self.handler.handle(ViolationReport {
                divergence,
                snapshot,
                live,
            }),
        }
    }

    /// Replace the snapshot. A no-op while disabled.
    pub fn refresh(&mut self, live: Json) {
        if self.snapshot.is_some() {
            self.snapshot = Some(live);
        }
    }
}
