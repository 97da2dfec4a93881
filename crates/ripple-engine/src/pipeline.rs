//! Pre- and post-processing pipeline stages.
//!
//! Pre-processors see the batch before anything is performed and may
//! rewrite it (add derived actions, drop some, reorder). Post-processors
//! see the performed batch after observers have been notified and may
//! queue follow-up work.

use ripple_action::Action;
use ripple_core::StateGraph;

use crate::observer::DispatchQueue;

/// A stage run before a batch is performed.
pub trait PreProcessor {
    /// Return the batch to perform.
    fn process(&mut self, actions: Vec<Action>, state: &StateGraph) -> Vec<Action>;
}

impl<F> PreProcessor for F
where
    F: FnMut(Vec<Action>, &StateGraph) -> Vec<Action>,
{
    fn process(&mut self, actions: Vec<Action>, state: &StateGraph) -> Vec<Action> {
        self(actions, state)
    }
}

/// A stage run after a batch was performed and observers notified.
pub trait PostProcessor {
    /// Inspect the performed batch.
    fn process(&mut self, actions: &[Action], state: &StateGraph, queue: &mut DispatchQueue);
}

impl<F> PostProcessor for F
where
    F: FnMut(&[Action], &StateGraph, &mut DispatchQueue),
{
    fn process(&mut self, actions: &[Action], state: &StateGraph, queue: &mut DispatchQueue) {
        self(actions, state, queue)
    }
}

/// Logs every batch at `debug` level, before and after performing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceProcessor;

impl TraceProcessor {
    fn kinds(actions: &[Action]) -> String {
        actions
            .iter()
            .map(|a| a.kind().as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl PreProcessor for TraceProcessor {
    fn process(&mut self, actions: Vec<Action>, _state: &StateGraph) -> Vec<Action> {
        tracing::debug!(count = actions.len(), kinds = %Self::kinds(&actions), "batch received");
        actions
    }
}

impl PostProcessor for TraceProcessor {
    fn process(&mut self, actions: &[Action], _state: &StateGraph, _queue: &mut DispatchQueue) {
        let changed = actions.iter().filter(|a| a.changed()).count();
        tracing::debug!(
            count = actions.len(),
            changed,
            kinds = %Self::kinds(actions),
            "batch performed"
        );
    }
}
