//! Observer notification and the deferred dispatch queue.

use std::collections::VecDeque;

use ripple_action::Action;

/// Batches requested while a dispatch is in flight.
///
/// Observers and post-processors cannot reach the dispatcher directly
/// while it is running; they hand follow-up batches to this queue
/// instead. Data batches run in submission order once the in-flight
/// dispatch completes. Binding batches are applied as soon as the
/// callback that queued them returns, since binding registration is not
/// serialized with data dispatch.
#[derive(Debug, Default)]
pub struct DispatchQueue {
    pending: VecDeque<Vec<Action>>,
    bindings: Vec<Vec<Action>>,
}

impl DispatchQueue {
    /// Queue a batch for dispatch.
    pub fn dispatch(&mut self, actions: Vec<Action>) {
        let binding = actions
            .iter()
            .find(|a| !a.kind().is_no_op())
            .is_some_and(|a| a.kind().is_binding());
        if binding {
            self.bindings.push(actions);
        } else {
            self.pending.push_back(actions);
        }
    }

    /// Number of data batches waiting.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.bindings.is_empty()
    }

    pub(crate) fn pop_pending(&mut self) -> Option<Vec<Action>> {
        self.pending.pop_front()
    }

    pub(crate) fn take_bindings(&mut self) -> Vec<Vec<Action>> {
        std::mem::take(&mut self.bindings)
    }

    pub(crate) fn clear(&mut self) -> usize {
        let dropped = self.pending.len() + self.bindings.len();
        self.pending.clear();
        self.bindings.clear();
        dropped
    }
}

/// Receives the actions that touched an observer's bindings.
///
/// Called at most once per dispatch, with every relevant action in
/// dispatch order.
pub trait Observer {
    /// Handle the actions affecting this observer.
    fn notify(&mut self, actions: &[Action], queue: &mut DispatchQueue);
}

impl<F> Observer for F
where
    F: FnMut(&[Action], &mut DispatchQueue),
{
    fn notify(&mut self, actions: &[Action], queue: &mut DispatchQueue) {
        self(actions, queue)
    }
}
