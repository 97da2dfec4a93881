//! The [`StateNode`] record and its parent link.

use indexmap::IndexMap;

use crate::id::NodeId;
use crate::value::Value;

/// Where a node hangs in the graph.
///
/// Parent-chain walks terminate on [`Parent::Root`]. [`Parent::Detached`]
/// marks a node removed through a state-object delete; walking through it
/// is an error, so nothing downstream can address a subtree that is no
/// longer part of the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parent {
    /// This node is the graph root.
    Root,
    /// Linked under the given node.
    Node(NodeId),
    /// Not linked into the graph.
    Detached,
}

/// A plain data record participating in the state graph.
///
/// Besides its properties, a node knows its parent and the key under
/// which it is stored there (for list elements, the key of the owning
/// list). Those two fields are maintained only by the graph's
/// attach/detach operations and never appear in serialized state.
#[derive(Clone, Debug)]
pub struct StateNode {
    parent: Parent,
    own_key: String,
    fields: IndexMap<String, Value>,
}

impl StateNode {
    pub(crate) fn new(parent: Parent, own_key: impl Into<String>) -> Self {
        Self {
            parent,
            own_key: own_key.into(),
            fields: IndexMap::new(),
        }
    }

    /// The parent link.
    pub fn parent(&self) -> Parent {
        self.parent
    }

    /// The key under which this node is stored in its parent.
    ///
    /// Empty for the root and for nodes that were never attached.
    pub fn own_key(&self) -> &str {
        &self.own_key
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self) -> bool {
        !matches!(self.parent, Parent::Detached)
    }

    /// Read a property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the property exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// All properties in insertion order.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the node has no properties.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Write a property directly, returning the previous value.
    ///
    /// This bypasses the action pipeline entirely: no history entry, no
    /// notification. Legitimate during state setup before mutation
    /// checking is enabled; afterwards the mutation guard reports it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a property directly, returning its value.
    ///
    /// Same caveats as [`set`](StateNode::set). Remaining properties keep
    /// their relative order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Mutable access to a property's value.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    pub(crate) fn link(&mut self, parent: Parent, own_key: &str) {
        self.parent = parent;
        own_key.clone_into(&mut self.own_key);
    }

    pub(crate) fn unlink(&mut self) {
        self.parent = Parent::Detached;
    }
}
