//! The [`Action`] record and its lifecycle.
//!
//! ```text
//!  Pristine ──perform──▶ Done ──mark_undone──▶ Undone
//!                         ▲                      │
//!                         └────────redo──────────┘
//! ```
//!
//! Undoing is a two-party affair: the dispatcher builds the
//! [`inverse`](Action::inverse), performs it as a fresh action, then marks
//! the original undone.

use std::fmt;
use std::rc::Rc;

use ripple_core::{ActionId, NodeId, StateGraph, Value};
use ripple_mapping::{Binding, BindingList, MappingIndex};

use crate::error::ActionError;
use crate::kind::{ActionKind, NoOpKind};
use crate::op::{self, Op};

/// Callback run by the dispatcher after a batch has been performed.
pub type PostHook = Rc<dyn Fn(&Action)>;

/// Where an action is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionState {
    /// Created, never performed.
    Pristine,
    /// Performed and not undone.
    Done,
    /// Undone; may be redone.
    Undone,
}

/// A single invertible instruction against a [`StateGraph`] and its
/// [`MappingIndex`].
///
/// Clones share the [`ActionId`], so a clone handed to an observer can be
/// matched against the dispatcher's history later.
#[derive(Clone)]
pub struct Action {
    id: ActionId,
    op: Op,
    state: ActionState,
    changed: bool,
    restoring: bool,
    path: Option<String>,
    mapped: Vec<Binding>,
    post_hook: Option<PostHook>,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("op", &self.op)
            .field("state", &self.state)
            .field("changed", &self.changed)
            .field("path", &self.path)
            .field("mapped", &self.mapped.len())
            .field("post_hook", &self.post_hook.is_some())
            .finish()
    }
}

// ── Construction ───────────────────────────────────────────────────

impl Action {
    /// Wrap an operation in a fresh pristine action.
    pub fn new(op: Op) -> Self {
        Self {
            id: ActionId::next(),
            op,
            state: ActionState::Pristine,
            changed: false,
            restoring: false,
            path: None,
            mapped: Vec::new(),
            post_hook: None,
        }
    }

    /// Force re-notification of the bindings of `node.key`.
    pub fn rerender(node: NodeId, key: impl Into<String>) -> Self {
        Self::new(Op::Rerender {
            node,
            key: key.into(),
        })
    }

    /// Add a plain property.
    pub fn insert_property(node: NodeId, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Op::InsertProperty {
            node,
            key: key.into(),
            value: value.into(),
        })
    }

    /// Replace a plain property.
    pub fn update_property(node: NodeId, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Op::UpdateProperty {
            node,
            key: key.into(),
            value: value.into(),
            old: None,
        })
    }

    /// Remove a plain property.
    pub fn delete_property(node: NodeId, key: impl Into<String>) -> Self {
        Self::new(Op::DeleteProperty {
            node,
            key: key.into(),
            old: None,
        })
    }

    /// Link a detached composite node under `node.key`.
    pub fn insert_state_object(node: NodeId, key: impl Into<String>, child: NodeId) -> Self {
        Self::new(Op::InsertStateObject {
            node,
            key: key.into(),
            child,
            rebind: Vec::new(),
        })
    }

    /// Unlink the composite node at `node.key`.
    pub fn delete_state_object(node: NodeId, key: impl Into<String>) -> Self {
        Self::new(Op::DeleteStateObject {
            node,
            key: key.into(),
            old: None,
            unbound: Vec::new(),
        })
    }

    /// Insert into the list at `node.key`.
    pub fn insert_element(
        node: NodeId,
        key: impl Into<String>,
        index: usize,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(Op::InsertElement {
            node,
            key: key.into(),
            index,
            value: value.into(),
            rebind: BindingList::new(),
        })
    }

    /// Replace one element of the list at `node.key`.
    pub fn update_element(
        node: NodeId,
        key: impl Into<String>,
        index: usize,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(Op::UpdateElement {
            node,
            key: key.into(),
            index,
            value: value.into(),
            old: None,
        })
    }

    /// Remove one element of the list at `node.key`.
    pub fn delete_element(node: NodeId, key: impl Into<String>, index: usize) -> Self {
        Self::new(Op::DeleteElement {
            node,
            key: key.into(),
            index,
            old: None,
            unbound: BindingList::new(),
        })
    }

    /// Register an observer binding.
    pub fn map_state_to_prop(binding: Binding) -> Self {
        Self::new(Op::MapStateToProp { binding })
    }

    /// Deregister an observer binding.
    pub fn unmap_state_to_prop(binding: Binding) -> Self {
        Self::new(Op::UnmapStateToProp { binding })
    }

    /// A placeholder the dispatcher filters out.
    pub fn no_op(kind: NoOpKind) -> Self {
        Self::new(Op::NoOp(kind))
    }

    /// Attach a callback run after the batch containing this action has
    /// been performed.
    pub fn with_post_hook(mut self, hook: impl Fn(&Action) + 'static) -> Self {
        self.post_hook = Some(Rc::new(hook));
        self
    }
}

// ── Accessors ──────────────────────────────────────────────────────

impl Action {
    /// Identity shared by all clones.
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// The operation.
    pub fn op(&self) -> &Op {
        &self.op
    }

    /// The kind tag.
    pub fn kind(&self) -> ActionKind {
        self.op.kind()
    }

    /// Lifecycle state.
    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Whether the action has never been performed.
    pub fn is_pristine(&self) -> bool {
        self.state == ActionState::Pristine
    }

    /// Whether the last perform actually changed something.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Fully qualified path of the target, once performed.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Bindings affected by this action, read before it mutated.
    pub fn mapped(&self) -> &[Binding] {
        &self.mapped
    }

    /// The post-perform callback, if any.
    pub fn post_hook(&self) -> Option<&PostHook> {
        self.post_hook.as_ref()
    }

    /// New value carried by the operation, if it has one.
    pub fn value(&self) -> Option<&Value> {
        match &self.op {
            Op::InsertProperty { value, .. }
            | Op::UpdateProperty { value, .. }
            | Op::InsertElement { value, .. }
            | Op::UpdateElement { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Value replaced or removed by the operation, once performed.
    pub fn old_value(&self) -> Option<&Value> {
        match &self.op {
            Op::UpdateProperty { old, .. }
            | Op::DeleteProperty { old, .. }
            | Op::UpdateElement { old, .. }
            | Op::DeleteElement { old, .. } => old.as_ref(),
            _ => None,
        }
    }
}

// ── Lifecycle ──────────────────────────────────────────────────────

impl Action {
    /// Perform a pristine action.
    ///
    /// On error the action stays pristine; state may already be partly
    /// mutated only where the graph itself failed mid-operation.
    pub fn perform(
        &mut self,
        graph: &mut StateGraph,
        mapping: &mut MappingIndex,
    ) -> Result<(), ActionError> {
        if !self.is_pristine() {
            return Err(ActionError::NotPristine {
                id: self.id,
                kind: self.kind(),
            });
        }
        self.run(graph, mapping)
    }

    /// Re-perform an undone action.
    pub fn redo(
        &mut self,
        graph: &mut StateGraph,
        mapping: &mut MappingIndex,
    ) -> Result<(), ActionError> {
        if self.state != ActionState::Undone {
            return Err(ActionError::NotUndone {
                id: self.id,
                kind: self.kind(),
            });
        }
        self.run(graph, mapping)
    }

    fn run(&mut self, graph: &mut StateGraph, mapping: &mut MappingIndex) -> Result<(), ActionError> {
        let applied = op::apply(&mut self.op, graph, mapping, self.restoring)?;
        self.path = applied.path;
        self.mapped = applied.mapped;
        self.changed = applied.changed;
        self.state = ActionState::Done;
        tracing::trace!(
            id = %self.id,
            kind = %self.kind(),
            path = self.path.as_deref().unwrap_or(""),
            changed = self.changed,
            "action performed"
        );
        Ok(())
    }

    /// Build the pristine action that undoes this one.
    ///
    /// # Errors
    ///
    /// [`ActionError::NotInvertible`] for no-ops, and
    /// [`ActionError::NotPerformed`] unless this action is done.
    pub fn inverse(&self) -> Result<Action, ActionError> {
        let kind = self.kind();
        if kind.is_no_op() {
            return Err(ActionError::NotInvertible { kind });
        }
        if self.state != ActionState::Done {
            return Err(ActionError::NotPerformed { id: self.id, kind });
        }
        let op = self
            .op
            .inverse()
            .ok_or(ActionError::NotPerformed { id: self.id, kind })?;
        let mut inverse = Action::new(op);
        inverse.restoring = true;
        Ok(inverse)
    }

    /// Record that this action's inverse has been performed.
    ///
    /// Clears the captured old value; a later [`redo`](Self::redo)
    /// captures it again.
    pub fn mark_undone(&mut self) -> Result<(), ActionError> {
        if self.state != ActionState::Done {
            return Err(ActionError::NotPerformed {
                id: self.id,
                kind: self.kind(),
            });
        }
        self.op.clear_captured();
        self.state = ActionState::Undone;
        Ok(())
    }

    /// Carry over the bindings that `inverse` dropped when it undid this
    /// action, so a [`redo`](Self::redo) restores the mapping along with
    /// the data. Only inserts reclaim anything.
    pub fn reclaim_bindings(&mut self, inverse: &Action) {
        self.op.reclaim_bindings(&inverse.op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::ObserverId;
    use serde_json::json;

    fn setup() -> (StateGraph, MappingIndex) {
        let graph = StateGraph::from_json(json!({"count": 1, "items": ["a"]})).unwrap();
        (graph, MappingIndex::new())
    }

    #[test]
    fn lifecycle_round_trip() {
        let (mut g, mut m) = setup();
        let root = g.root();
        let mut a = Action::update_property(root, "count", 2i64);
        assert!(a.is_pristine());
        a.perform(&mut g, &mut m).unwrap();
        assert_eq!(a.state(), ActionState::Done);
        assert!(a.changed());
        assert_eq!(a.old_value().and_then(Value::as_f64), Some(1.0));

        let err = a.perform(&mut g, &mut m).unwrap_err();
        assert!(matches!(err, ActionError::NotPristine { .. }));

        let mut inv = a.inverse().unwrap();
        inv.perform(&mut g, &mut m).unwrap();
        a.mark_undone().unwrap();
        assert_eq!(g.to_json()["count"], json!(1));
        assert!(a.old_value().is_none());

        a.redo(&mut g, &mut m).unwrap();
        assert_eq!(g.to_json()["count"], json!(2));
    }

    #[test]
    fn undo_of_pristine_and_redo_of_done_are_errors() {
        let (mut g, mut m) = setup();
        let mut a = Action::delete_element(g.root(), "items", 0);
        assert!(matches!(a.inverse(), Err(ActionError::NotPerformed { .. })));
        a.perform(&mut g, &mut m).unwrap();
        assert!(matches!(
            a.redo(&mut g, &mut m),
            Err(ActionError::NotUndone { .. })
        ));
    }

    #[test]
    fn no_ops_have_no_inverse() {
        let a = Action::no_op(NoOpKind::Insert);
        assert_eq!(
            a.inverse().unwrap_err(),
            ActionError::NotInvertible {
                kind: ActionKind::InsertNoOp
            }
        );
    }

    #[test]
    fn deleting_a_null_property_can_be_undone() {
        let mut g = StateGraph::from_json(json!({"gone": null})).unwrap();
        let mut m = MappingIndex::new();
        let mut a = Action::delete_property(g.root(), "gone");
        a.perform(&mut g, &mut m).unwrap();
        a.inverse().unwrap().perform(&mut g, &mut m).unwrap();
        assert_eq!(g.to_json(), json!({"gone": null}));
    }

    #[test]
    fn binding_actions_invert_each_other() {
        let (mut g, mut m) = setup();
        let b = Binding::new(ObserverId(9), "count", "count");
        let mut map = Action::map_state_to_prop(b);
        map.perform(&mut g, &mut m).unwrap();
        assert!(map.changed());
        assert_eq!(m.binding_count(), 1);

        let mut unmap = map.inverse().unwrap();
        assert_eq!(unmap.kind(), ActionKind::UnmapStateToProp);
        unmap.perform(&mut g, &mut m).unwrap();
        assert_eq!(m.binding_count(), 0);
    }

    #[test]
    fn clones_share_identity_and_hooks() {
        use std::cell::Cell;
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let a = Action::rerender(NodeId::ROOT, "count").with_post_hook(move |_| {
            counter.set(counter.get() + 1);
        });
        let b = a.clone();
        assert_eq!(a.id(), b.id());
        (b.post_hook().unwrap())(&b);
        assert_eq!(seen.get(), 1);
    }
}
