//! Action creators that look at current state first.
//!
//! [`Creators`] and [`ListCreators`] borrow the graph read-only and return
//! ready-to-dispatch actions. The conditional forms (`*_if_*`) return a
//! [`NoOpKind`] placeholder instead of branching at the call site; the
//! dispatcher drops those before doing any work.

use ripple_core::{NodeId, StateError, StateGraph, Value};

use crate::action::Action;
use crate::error::ActionError;
use crate::kind::NoOpKind;

/// Creators for the properties of one node.
#[derive(Clone, Copy, Debug)]
pub struct Creators<'g> {
    graph: &'g StateGraph,
    node: NodeId,
}

impl<'g> Creators<'g> {
    /// Creators for `node`.
    pub fn new(graph: &'g StateGraph, node: NodeId) -> Result<Self, ActionError> {
        graph.node(node)?;
        Ok(Self { graph, node })
    }

    /// The node these creators target.
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn current(&self, key: &str) -> Result<Option<&'g Value>, ActionError> {
        Ok(self.graph.value(self.node, key)?)
    }

    /// Insert when absent, update otherwise.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<Action, ActionError> {
        Ok(match self.current(key)? {
            Some(_) => Action::update_property(self.node, key, value),
            None => Action::insert_property(self.node, key, value),
        })
    }

    /// Update, or [`NoOpKind::Update`] if the value is already current.
    pub fn update_if_changed(&self, key: &str, value: impl Into<Value>) -> Result<Action, ActionError> {
        let value = value.into();
        Ok(match self.current(key)? {
            Some(current) if *current == value => Action::no_op(NoOpKind::Update),
            _ => Action::update_property(self.node, key, value),
        })
    }

    /// Insert, or [`NoOpKind::Insert`] if the property already holds a
    /// non-null value.
    pub fn insert_if_empty(&self, key: &str, value: impl Into<Value>) -> Result<Action, ActionError> {
        Ok(match self.current(key)? {
            None => Action::insert_property(self.node, key, value),
            Some(current) if current.is_null() => Action::update_property(self.node, key, value),
            Some(_) => Action::no_op(NoOpKind::Insert),
        })
    }

    /// Delete (through the composite variant when the value is a node),
    /// or [`NoOpKind::Delete`] if the property is absent.
    pub fn remove_if_present(&self, key: &str) -> Result<Action, ActionError> {
        Ok(match self.current(key)? {
            None => Action::no_op(NoOpKind::Delete),
            Some(Value::Node(_)) => Action::delete_state_object(self.node, key),
            Some(_) => Action::delete_property(self.node, key),
        })
    }
}

/// Creators scoped to one list property.
///
/// Construction checks the list is there, so a creator never hands out
/// actions for a property that has since stopped being a list without
/// failing at dispatch.
#[derive(Clone, Debug)]
pub struct ListCreators<'g> {
    graph: &'g StateGraph,
    node: NodeId,
    key: String,
}

impl<'g> ListCreators<'g> {
    /// Creators for the list at `node.key`.
    ///
    /// # Errors
    ///
    /// [`ActionError::ListMismatch`] if the property is missing or not a
    /// list.
    pub fn new(graph: &'g StateGraph, node: NodeId, key: impl Into<String>) -> Result<Self, ActionError> {
        let key = key.into();
        match graph.list(node, &key) {
            Ok(_) => Ok(Self { graph, node, key }),
            Err(StateError::NotAList { node, key }) => Err(ActionError::ListMismatch { node, key }),
            Err(e) => Err(e.into()),
        }
    }

    /// Creators for the list that holds composite `element`.
    pub fn for_element(graph: &'g StateGraph, element: NodeId) -> Result<Self, ActionError> {
        let (owner, key, _) = graph.element_position(element)?;
        Self::new(graph, owner, key)
    }

    fn items(&self) -> &'g [Value] {
        self.graph
            .list(self.node, &self.key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Current list length.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Append an element.
    pub fn push(&self, value: impl Into<Value>) -> Action {
        Action::insert_element(self.node, self.key.as_str(), self.len(), value)
    }

    /// Insert at `index`.
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> Action {
        Action::insert_element(self.node, self.key.as_str(), index, value)
    }

    /// Replace the element at `index`.
    pub fn update(&self, index: usize, value: impl Into<Value>) -> Action {
        Action::update_element(self.node, self.key.as_str(), index, value)
    }

    /// Replace, or [`NoOpKind::Update`] if the element is already equal.
    pub fn update_if_changed(&self, index: usize, value: impl Into<Value>) -> Action {
        let value = value.into();
        match self.items().get(index) {
            Some(current) if *current == value => Action::no_op(NoOpKind::Update),
            _ => self.update(index, value),
        }
    }

    /// Fill `index`: append when it is one past the end, update when the
    /// element there is null, otherwise [`NoOpKind::Insert`].
    pub fn insert_if_empty(&self, index: usize, value: impl Into<Value>) -> Action {
        match self.items().get(index) {
            None if index == self.len() => self.insert(index, value),
            Some(current) if current.is_null() => self.update(index, value),
            _ => Action::no_op(NoOpKind::Insert),
        }
    }

    /// Remove the element at `index`.
    pub fn delete(&self, index: usize) -> Action {
        Action::delete_element(self.node, self.key.as_str(), index)
    }

    /// Remove, or [`NoOpKind::Delete`] if `index` is past the end.
    pub fn remove_if_present(&self, index: usize) -> Action {
        if index < self.len() {
            self.delete(index)
        } else {
            Action::no_op(NoOpKind::Delete)
        }
    }

    /// Remove the composite element `element` from this list.
    ///
    /// # Errors
    ///
    /// [`ActionError::ListMismatch`] if the element belongs to another
    /// list.
    pub fn delete_node(&self, element: NodeId) -> Result<Action, ActionError> {
        let (owner, key, index) = self.graph.element_position(element)?;
        if owner != self.node || key != self.key {
            return Err(ActionError::ListMismatch { node: owner, key });
        }
        Ok(self.delete(index))
    }
}
