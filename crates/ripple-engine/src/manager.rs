//! The [`Manager`] dispatcher.
//!
//! Owns one state graph together with its mapping index, undo history,
//! mutation guard, processor pipeline and observers. Every forward
//! dispatch, undo and redo runs through the same envelope:
//!
//! 1. pre-processors
//! 2. mutation check (if enabled)
//! 3. perform each action in order
//! 4. snapshot refresh (if enabled)
//! 5. action post hooks
//! 6. one notification per affected observer
//! 7. post-processors
//!
//! Dispatch takes `&mut self`, so a dispatch can never start while
//! another is in flight. Observers and post-processors request follow-up
//! work through the [`DispatchQueue`] they are handed; queued data
//! batches run FIFO once the current envelope has finished.

use std::time::Instant;

use indexmap::IndexMap;

use ripple_action::{Action, ActionError};
use ripple_core::{ActionId, ObserverId, RootId, StateGraph};
use ripple_mapping::MappingIndex;

use crate::config::{ConfigError, ManagerConfig};
use crate::error::DispatchError;
use crate::guard::{MutationGuard, ViolationHandler};
use crate::history::ActionHistory;
use crate::metrics::DispatchMetrics;
use crate::observer::{DispatchQueue, Observer};
use crate::pipeline::{PostProcessor, PreProcessor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Perform,
    Redo,
}

/// Dispatcher for one state graph.
///
/// # Examples
///
/// ```
/// use ripple_action::Action;
/// use ripple_core::StateGraph;
/// use ripple_engine::Manager;
/// use serde_json::json;
///
/// let graph = StateGraph::from_json(json!({"count": 1})).unwrap();
/// let mut manager = Manager::from_state(graph);
/// let root = manager.state().root();
///
/// manager.dispatch(vec![Action::update_property(root, "count", 2i64)]).unwrap();
/// assert_eq!(manager.state().to_json(), json!({"count": 2}));
///
/// manager.undo(1).unwrap();
/// assert_eq!(manager.state().to_json(), json!({"count": 1}));
/// ```
pub struct Manager {
    config: ManagerConfig,
    graph: StateGraph,
    mapping: MappingIndex,
    history: ActionHistory,
    guard: MutationGuard,
    pre: Vec<Box<dyn PreProcessor>>,
    post: Vec<Box<dyn PostProcessor>>,
    observers: IndexMap<ObserverId, Box<dyn Observer>>,
    next_observer: u64,
    queue: DispatchQueue,
    metrics: DispatchMetrics,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("root", &self.graph.root_id())
            .field("config", &self.config)
            .field("history", &self.history)
            .field("guard", &self.guard)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

// ── Construction ───────────────────────────────────────────────────

impl Manager {
    /// Create a dispatcher over `graph`.
    ///
    /// With `check_mutations` set, the first snapshot is taken here, so
    /// `graph` must already be fully initialized.
    pub fn new(graph: StateGraph, config: ManagerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(graph, config))
    }

    /// Create a dispatcher with the default configuration.
    pub fn from_state(graph: StateGraph) -> Self {
        Self::build(graph, ManagerConfig::default())
    }

    fn build(graph: StateGraph, config: ManagerConfig) -> Self {
        let mut guard = MutationGuard::new();
        if config.check_mutations {
            guard.enable(graph.to_json());
        }
        Self {
            history: ActionHistory::new(config.action_queue_size),
            config,
            graph,
            mapping: MappingIndex::new(),
            guard,
            pre: Vec::new(),
            post: Vec::new(),
            observers: IndexMap::new(),
            next_observer: 1,
            queue: DispatchQueue::default(),
            metrics: DispatchMetrics::default(),
        }
    }

    /// Append a pre-processor.
    pub fn add_pre_processor(&mut self, stage: impl PreProcessor + 'static) {
        self.pre.push(Box::new(stage));
    }

    /// Append a post-processor.
    pub fn add_post_processor(&mut self, stage: impl PostProcessor + 'static) {
        self.post.push(Box::new(stage));
    }

    /// Register an observer and return the id bindings should name.
    pub fn register_observer(&mut self, observer: impl Observer + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Drop an observer together with every binding it holds.
    ///
    /// Returns `false` if the id was unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let known = self.observers.shift_remove(&id).is_some();
        let unbound = self.mapping.remove_observer(id);
        tracing::debug!(observer = %id, unbound, "observer removed");
        known
    }

    /// Start checking for out-of-band mutation from the current state on.
    pub fn enable_mutation_check(&mut self) {
        self.guard.enable(self.graph.to_json());
    }

    /// Stop checking for out-of-band mutation.
    pub fn disable_mutation_check(&mut self) {
        self.guard.disable();
    }

    /// Replace the handler invoked on a detected mutation violation.
    pub fn set_violation_handler(&mut self, handler: impl ViolationHandler + 'static) {
        self.guard.set_handler(handler);
    }
}

// ── Accessors ──────────────────────────────────────────────────────

impl Manager {
    /// The managed graph.
    pub fn state(&self) -> &StateGraph {
        &self.graph
    }

    /// Direct mutable access to the graph, bypassing the pipeline.
    ///
    /// Writes made here are exactly what the mutation guard reports.
    /// Intended for initialization before the guard is enabled.
    pub fn state_mut(&mut self) -> &mut StateGraph {
        &mut self.graph
    }

    /// Identity of the managed graph.
    pub fn root_id(&self) -> RootId {
        self.graph.root_id()
    }

    /// The binding index.
    pub fn mapping(&self) -> &MappingIndex {
        &self.mapping
    }

    /// Undo history.
    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Active configuration.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Whether the mutation guard is active.
    pub fn is_checking_mutations(&self) -> bool {
        self.guard.is_enabled()
    }

    /// Metrics from the most recent envelope.
    pub fn last_metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Whether anything can be undone.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether anything can be redone.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forget all history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

// ── Dispatch ───────────────────────────────────────────────────────

impl Manager {
    /// Perform a batch of pristine actions.
    ///
    /// No-ops are dropped first; an empty batch returns empty without
    /// touching anything. A batch whose first action is a binding action
    /// only updates the mapping index: no mutation check, no history, no
    /// notification. Otherwise the batch runs through the full envelope
    /// and every performed action is pushed onto history.
    ///
    /// Returns the performed batch. Batches queued by observers or
    /// post-processors run afterwards and are not included.
    pub fn dispatch(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, DispatchError> {
        let performed = self.dispatch_batch(actions);
        self.finish(performed)
    }

    /// Undo up to `n` of the most recent actions, newest first.
    ///
    /// Each inverse runs through the dispatch envelope, so observers are
    /// notified with the inverse actions. Returns the performed inverses.
    pub fn undo(&mut self, n: usize) -> Result<Vec<Action>, DispatchError> {
        let undone = self.undo_batch(n);
        self.finish(undone)
    }

    /// Undo specific, already performed actions.
    ///
    /// The history cursor moves back once per action. Actions that sit on
    /// top of the undo stack become redoable; an action reverted from
    /// further down leaves history, since redoing it in place would skip
    /// the entries recorded after it. Actions history has already undone
    /// are rejected.
    pub fn undo_actions(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, DispatchError> {
        let undone = self.undo_explicit(actions);
        self.finish(undone)
    }

    /// Redo up to `n` undone actions, oldest first.
    pub fn redo(&mut self, n: usize) -> Result<Vec<Action>, DispatchError> {
        let redone = self.redo_batch(n);
        self.finish(redone)
    }

    /// Drain queued batches after a successful envelope, or discard them
    /// after a failed one.
    fn finish(
        &mut self,
        result: Result<Vec<Action>, DispatchError>,
    ) -> Result<Vec<Action>, DispatchError> {
        match result {
            Ok(performed) => {
                while let Some(batch) = self.queue.pop_pending() {
                    self.dispatch_batch(batch).inspect_err(|_| {
                        self.queue.clear();
                    })?;
                }
                Ok(performed)
            }
            Err(e) => {
                let dropped = self.queue.clear();
                if dropped > 0 {
                    tracing::warn!(dropped, error = %e, "discarding queued batches after failed dispatch");
                }
                Err(e)
            }
        }
    }

    fn dispatch_batch(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, DispatchError> {
        if let Some(a) = actions.iter().find(|a| !a.is_pristine()) {
            return Err(DispatchError::NotPristine {
                id: a.id(),
                kind: a.kind(),
            });
        }
        let actions: Vec<Action> = actions
            .into_iter()
            .filter(|a| !a.kind().is_no_op())
            .collect();
        let Some(first) = actions.first().map(Action::kind) else {
            return Ok(Vec::new());
        };
        if let Some(other) = actions
            .iter()
            .map(Action::kind)
            .find(|k| k.is_binding() != first.is_binding())
        {
            return Err(DispatchError::MixedBatch {
                first,
                found: other,
            });
        }
        if first.is_binding() {
            return self.apply_bindings(actions);
        }

        tracing::debug!(count = actions.len(), "dispatch");
        let performed = self.envelope(actions, Mode::Perform)?;
        for action in &performed {
            if let Some(evicted) = self.history.push(action.clone()) {
                tracing::trace!(id = %evicted.id(), "history entry evicted");
            }
        }
        Ok(performed)
    }

    fn undo_batch(&mut self, n: usize) -> Result<Vec<Action>, DispatchError> {
        let count = n.min(self.history.undo_len());
        if count == 0 {
            return Ok(Vec::new());
        }
        let inverses = self
            .history
            .undoable()
            .take(count)
            .map(Action::inverse)
            .collect::<Result<Vec<_>, _>>()?;
        let links: Vec<ActionId> = inverses.iter().map(Action::id).collect();

        tracing::debug!(count, "undo");
        let performed = self.envelope(inverses, Mode::Perform)?;
        for inverse in links {
            let Some(entry) = self.history.step_back() else {
                break;
            };
            settle_undone(entry, &performed, inverse)?;
        }
        Ok(performed)
    }

    fn undo_explicit(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, DispatchError> {
        let actions: Vec<Action> = actions
            .into_iter()
            .filter(|a| !a.kind().is_no_op())
            .collect();
        if actions.is_empty() {
            return Ok(Vec::new());
        }
        for action in &actions {
            let undone = self
                .history
                .position(action.id())
                .is_some_and(|i| i >= self.history.cursor());
            if undone {
                return Err(ActionError::NotPerformed {
                    id: action.id(),
                    kind: action.kind(),
                }
                .into());
            }
        }
        let inverses = actions
            .iter()
            .map(Action::inverse)
            .collect::<Result<Vec<_>, _>>()?;
        let mut pending: Vec<(ActionId, ActionId)> = actions
            .iter()
            .zip(&inverses)
            .map(|(a, inv)| (a.id(), inv.id()))
            .collect();

        tracing::debug!(count = actions.len(), "undo explicit");
        let performed = if actions[0].kind().is_binding() {
            self.apply_bindings(inverses)?
        } else {
            self.envelope(inverses, Mode::Perform)?
        };

        while let Some(top) = self.history.peek_undo().map(Action::id) {
            let Some(at) = pending.iter().position(|(id, _)| *id == top) else {
                break;
            };
            let (_, inverse) = pending.swap_remove(at);
            if let Some(entry) = self.history.step_back() {
                settle_undone(entry, &performed, inverse)?;
            }
        }
        for (id, _) in pending {
            if let Some(removed) = self.history.position(id).and_then(|i| self.history.remove(i)) {
                tracing::debug!(id = %removed.id(), "history entry reverted out of order");
            }
        }
        Ok(performed)
    }

    fn redo_batch(&mut self, n: usize) -> Result<Vec<Action>, DispatchError> {
        let count = n.min(self.history.redo_len());
        if count == 0 {
            return Ok(Vec::new());
        }
        let entries: Vec<Action> = self.history.redoable().take(count).cloned().collect();

        tracing::debug!(count, "redo");
        let performed = self.envelope(entries, Mode::Redo)?;
        for _ in 0..count {
            let Some(entry) = self.history.step_forward() else {
                break;
            };
            if let Some(done) = performed.iter().find(|a| a.id() == entry.id()) {
                *entry = done.clone();
            }
        }
        Ok(performed)
    }

    /// Perform binding actions against the mapping index only.
    fn apply_bindings(&mut self, mut actions: Vec<Action>) -> Result<Vec<Action>, DispatchError> {
        for action in actions.iter_mut() {
            action.perform(&mut self.graph, &mut self.mapping)?;
        }
        tracing::trace!(count = actions.len(), bindings = self.mapping.binding_count(), "bindings applied");
        Ok(actions)
    }

    fn apply_queued_bindings(&mut self) -> Result<(), DispatchError> {
        for batch in self.queue.take_bindings() {
            let batch: Vec<Action> = batch
                .into_iter()
                .filter(|a| !a.kind().is_no_op())
                .collect();
            self.apply_bindings(batch)?;
        }
        Ok(())
    }

    fn envelope(&mut self, actions: Vec<Action>, mode: Mode) -> Result<Vec<Action>, DispatchError> {
        let start = Instant::now();
        let mut metrics = DispatchMetrics::default();

        // Pre-process and check.
        let t = Instant::now();
        let mut actions = actions;
        for stage in self.pre.iter_mut() {
            actions = stage.process(actions, &self.graph);
        }
        if self.guard.is_enabled() {
            self.guard.check(&self.graph.to_json())?;
        }
        metrics.pre_process_us = elapsed_us(t);

        // Perform.
        let t = Instant::now();
        for action in actions.iter_mut() {
            match mode {
                Mode::Perform => action.perform(&mut self.graph, &mut self.mapping)?,
                Mode::Redo => action.redo(&mut self.graph, &mut self.mapping)?,
            }
        }
        metrics.perform_us = elapsed_us(t);
        metrics.action_count = actions.len();

        // Snapshot.
        if self.guard.is_enabled() {
            let t = Instant::now();
            self.guard.refresh(self.graph.to_json());
            metrics.snapshot_us = elapsed_us(t);
        }

        // Post-process.
        let t = Instant::now();
        for action in &actions {
            if let Some(hook) = action.post_hook() {
                hook(action);
            }
        }
        metrics.observers_notified = self.notify(&actions)?;
        for stage in self.post.iter_mut() {
            stage.process(&actions, &self.graph, &mut self.queue);
        }
        self.apply_queued_bindings()?;
        metrics.post_process_us = elapsed_us(t);

        metrics.total_us = elapsed_us(start);
        tracing::trace!(
            actions = metrics.action_count,
            observers = metrics.observers_notified,
            total_us = metrics.total_us,
            "envelope complete"
        );
        self.metrics = metrics;
        Ok(actions)
    }

    /// Group the batch by observer and notify each one once.
    ///
    /// Returns the number of observers notified.
    fn notify(&mut self, actions: &[Action]) -> Result<usize, DispatchError> {
        let mut groups: IndexMap<ObserverId, Vec<Action>> = IndexMap::new();
        for action in actions {
            for binding in action.mapped() {
                let batch = groups.entry(binding.observer).or_default();
                if batch.last().map(Action::id) != Some(action.id()) {
                    batch.push(action.clone());
                }
            }
        }

        let mut notified = 0;
        for (id, batch) in groups {
            match self.observers.get_mut(&id) {
                Some(observer) => {
                    observer.notify(&batch, &mut self.queue);
                    notified += 1;
                }
                None => tracing::warn!(observer = %id, "binding references unknown observer"),
            }
            self.apply_queued_bindings()?;
        }
        Ok(notified)
    }
}

/// Mark a history entry undone, reclaiming the bindings its inverse
/// dropped.
fn settle_undone(entry: &mut Action, performed: &[Action], inverse: ActionId) -> Result<(), ActionError> {
    if let Some(done) = performed.iter().find(|a| a.id() == inverse) {
        entry.reclaim_bindings(done);
    }
    entry.mark_undone()
}

fn elapsed_us(since: Instant) -> u64 {
    since.elapsed().as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_action::{ActionKind, ActionState, NoOpKind};
    use ripple_mapping::Binding;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> Manager {
        Manager::from_state(StateGraph::from_json(json!({"count": 0, "title": "a"})).unwrap())
    }

    #[test]
    fn non_pristine_rejected() {
        let mut m = manager();
        let root = m.state().root();
        let done = m
            .dispatch(vec![Action::update_property(root, "count", 1i64)])
            .unwrap();
        let err = m.dispatch(done).unwrap_err();
        assert!(matches!(err, DispatchError::NotPristine { .. }));
    }

    #[test]
    fn mixed_batch_rejected() {
        let mut m = manager();
        let root = m.state().root();
        let err = m
            .dispatch(vec![
                Action::map_state_to_prop(Binding::new(ObserverId(1), "c", "count")),
                Action::update_property(root, "count", 1i64),
            ])
            .unwrap_err();
        assert!(matches!(err, DispatchError::MixedBatch { .. }));
    }

    #[test]
    fn only_no_ops_is_empty() {
        let mut m = manager();
        let out = m
            .dispatch(vec![Action::no_op(NoOpKind::Update), Action::no_op(NoOpKind::Delete)])
            .unwrap();
        assert!(out.is_empty());
        assert!(!m.can_undo());
    }

    #[test]
    fn observer_notified_once_per_dispatch() {
        let mut m = manager();
        let root = m.state().root();
        let log: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&log);
        let id = m.register_observer(move |actions: &[Action], _: &mut DispatchQueue| {
            sink.borrow_mut().push(actions.len());
        });
        m.dispatch(vec![
            Action::map_state_to_prop(Binding::new(id, "count", "count")),
            Action::map_state_to_prop(Binding::new(id, "title", "title")),
        ])
        .unwrap();
        m.dispatch(vec![
            Action::update_property(root, "count", 1i64),
            Action::update_property(root, "title", "b"),
        ])
        .unwrap();
        assert_eq!(*log.borrow(), vec![2]);
        assert_eq!(m.last_metrics().observers_notified, 1);
        assert_eq!(m.last_metrics().action_count, 2);
    }

    #[test]
    fn queued_batches_run_after_current_dispatch() {
        let mut m = manager();
        let root = m.state().root();
        let id = m.register_observer(move |actions: &[Action], queue: &mut DispatchQueue| {
            if actions[0].kind() == ActionKind::UpdateProperty {
                queue.dispatch(vec![Action::update_property(root, "title", "follow-up")]);
            }
        });
        m.dispatch(vec![Action::map_state_to_prop(Binding::new(id, "c", "count"))])
            .unwrap();
        let out = m
            .dispatch(vec![Action::update_property(root, "count", 5i64)])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(m.state().to_json(), json!({"count": 5, "title": "follow-up"}));
        assert_eq!(m.history().undo_len(), 2);
    }

    #[test]
    fn remove_observer_drops_bindings() {
        let mut m = manager();
        let id = m.register_observer(|_: &[Action], _: &mut DispatchQueue| {});
        m.dispatch(vec![Action::map_state_to_prop(Binding::new(id, "c", "count"))])
            .unwrap();
        assert_eq!(m.mapping().binding_count(), 1);
        assert!(m.remove_observer(id));
        assert_eq!(m.mapping().binding_count(), 0);
        assert!(!m.remove_observer(id));
    }

    #[test]
    fn pre_processor_can_add_actions() {
        let mut m = manager();
        let root = m.state().root();
        m.add_pre_processor(move |mut actions: Vec<Action>, _: &StateGraph| {
            if actions.len() == 1 {
                actions.push(Action::update_property(root, "title", "derived"));
            }
            actions
        });
        let out = m
            .dispatch(vec![Action::update_property(root, "count", 3i64)])
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(m.state().to_json()["title"], json!("derived"));
    }

    #[test]
    fn post_hooks_run_after_perform() {
        let mut m = manager();
        let root = m.state().root();
        let seen = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&seen);
        m.dispatch(vec![Action::update_property(root, "count", 9i64).with_post_hook(
            move |a| *slot.borrow_mut() = a.path().map(str::to_string),
        )])
        .unwrap();
        assert_eq!(seen.borrow().as_deref(), Some("count"));
    }

    #[test]
    fn redo_restores_and_advances() {
        let mut m = manager();
        let root = m.state().root();
        m.dispatch(vec![Action::update_property(root, "count", 1i64)]).unwrap();
        m.dispatch(vec![Action::update_property(root, "count", 2i64)]).unwrap();
        assert_eq!(m.undo(5).unwrap().len(), 2);
        assert_eq!(m.state().to_json()["count"], json!(0));
        assert_eq!(m.redo(1).unwrap().len(), 1);
        assert_eq!(m.state().to_json()["count"], json!(1));
        assert!(m.can_redo());
        m.redo(1).unwrap();
        assert_eq!(m.state().to_json()["count"], json!(2));
        assert!(!m.can_redo());
        // Redone entries are undoable again.
        m.undo(1).unwrap();
        assert_eq!(m.state().to_json()["count"], json!(1));
    }

    #[test]
    fn explicit_undo_moves_cursor_per_action() {
        let mut m = manager();
        let root = m.state().root();
        let first = m
            .dispatch(vec![Action::update_property(root, "count", 1i64)])
            .unwrap();
        let second = m
            .dispatch(vec![Action::update_property(root, "title", "b")])
            .unwrap();

        // Out of order: the reverted entry leaves history.
        m.undo_actions(first).unwrap();
        assert_eq!(m.history().undo_len(), 1);
        assert_eq!(m.history().redo_len(), 0);
        assert_eq!(m.state().to_json(), json!({"count": 0, "title": "b"}));

        // On top: the entry becomes redoable.
        m.undo_actions(second).unwrap();
        assert_eq!(m.history().undo_len(), 0);
        assert_eq!(m.history().redo_len(), 1);
        assert_eq!(m.state().to_json(), json!({"count": 0, "title": "a"}));
        m.redo(1).unwrap();
        assert_eq!(m.state().to_json(), json!({"count": 0, "title": "b"}));
    }

    #[test]
    fn undo_after_out_of_order_explicit_undo_skips_reverted_entry() {
        let mut m = manager();
        let root = m.state().root();
        let first = m
            .dispatch(vec![Action::insert_property(root, "x", 1i64)])
            .unwrap();
        m.dispatch(vec![Action::update_property(root, "title", "b")])
            .unwrap();

        m.undo_actions(first).unwrap();
        assert_eq!(m.state().to_json(), json!({"count": 0, "title": "b"}));
        assert_eq!(m.history().undo_len(), 1);
        assert!(m
            .history()
            .undoable()
            .all(|a| a.state() == ActionState::Done && a.kind() == ActionKind::UpdateProperty));

        let undone = m.undo(2).unwrap();
        assert_eq!(undone.len(), 1);
        assert_eq!(m.state().to_json(), json!({"count": 0, "title": "a"}));
        assert!(!m.can_undo());
    }

    #[test]
    fn explicit_undo_of_top_entries_keeps_both_redoable() {
        let mut m = manager();
        let root = m.state().root();
        let mut batch = m
            .dispatch(vec![Action::update_property(root, "count", 1i64)])
            .unwrap();
        batch.extend(
            m.dispatch(vec![Action::update_property(root, "title", "b")])
                .unwrap(),
        );
        batch.reverse();
        m.undo_actions(batch).unwrap();
        assert_eq!(m.state().to_json(), json!({"count": 0, "title": "a"}));
        assert_eq!(m.history().redo_len(), 2);
        m.redo(2).unwrap();
        assert_eq!(m.state().to_json(), json!({"count": 1, "title": "b"}));
    }

    #[test]
    fn explicit_undo_rejects_already_undone() {
        let mut m = manager();
        let root = m.state().root();
        let done = m
            .dispatch(vec![Action::update_property(root, "count", 1i64)])
            .unwrap();
        m.undo(1).unwrap();
        let err = m.undo_actions(done).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Action(ActionError::NotPerformed { .. })
        ));
        assert_eq!(m.state().to_json()["count"], json!(0));
    }

    #[test]
    fn explicit_undo_rejects_pristine() {
        let mut m = manager();
        let root = m.state().root();
        let err = m
            .undo_actions(vec![Action::update_property(root, "count", 1i64)])
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Action(ActionError::NotPerformed { .. })
        ));
    }
}
