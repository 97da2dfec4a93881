//! The [`StateGraph`] arena: node storage, linking and path queries.
//!
//! Nodes live in an append-only arena indexed by [`NodeId`]. The root is
//! always `NodeId(0)` with [`Parent::Root`]; every other node is either
//! linked under a parent or detached. Detached nodes stay in the arena so
//! that undoing a delete can re-link the very same node with its subtree
//! intact.
//!
//! # Paths
//!
//! A path is the dotted list of own keys from the root down to a node,
//! followed by a property name: `getFullPath(B, "field") == "a.b.field"`
//! for `root -> a -> b`. List elements carry the list's key as their own
//! key, so a property of any element of `owner.items` has the path
//! `owner.items.<prop>`; per-element addressing uses the list path plus
//! an index.

use serde_json::{Map, Value as Json};

use crate::error::StateError;
use crate::id::{NodeId, RootId};
use crate::node::{Parent, StateNode};
use crate::value::Value;

/// A tree of [`StateNode`]s rooted at [`NodeId::ROOT`].
///
/// # Examples
///
/// ```
/// use ripple_core::StateGraph;
/// use serde_json::json;
///
/// let graph = StateGraph::from_json(json!({"a": {"b": {"field": 1}}})).unwrap();
/// let (b, key) = graph.resolve("a.b.field").unwrap();
/// assert_eq!(key, "field");
/// assert_eq!(graph.full_path(b, "field").unwrap(), "a.b.field");
/// assert_eq!(graph.to_json(), json!({"a": {"b": {"field": 1}}}));
/// ```
#[derive(Clone, Debug)]
pub struct StateGraph {
    root_id: RootId,
    nodes: Vec<StateNode>,
}

impl Default for StateGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl StateGraph {
    /// Create a graph holding only an empty root.
    pub fn new() -> Self {
        Self {
            root_id: RootId::next(),
            nodes: vec![StateNode::new(Parent::Root, "")],
        }
    }

    /// Build a graph from a JSON object.
    ///
    /// Nested objects become linked state nodes; arrays become lists whose
    /// object elements become nodes. Everything else is stored as a plain
    /// value.
    ///
    /// # Errors
    ///
    /// [`StateError::RootNotObject`] if `json` is not an object.
    pub fn from_json(json: Json) -> Result<Self, StateError> {
        let Json::Object(map) = json else {
            return Err(StateError::RootNotObject);
        };
        let mut graph = Self::new();
        graph.fill(NodeId::ROOT, map);
        Ok(graph)
    }

    /// The opaque identity of this graph.
    pub fn root_id(&self) -> RootId {
        self.root_id
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&StateNode, StateError> {
        self.nodes
            .get(id.0 as usize)
            .ok_or(StateError::UnknownNode(id))
    }

    /// Mutably borrow a node.
    ///
    /// Writes through this reference bypass the action pipeline; see
    /// [`StateNode::set`].
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut StateNode, StateError> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(StateError::UnknownNode(id))
    }

    /// Read a property of a node.
    pub fn value(&self, node: NodeId, key: &str) -> Result<Option<&Value>, StateError> {
        Ok(self.node(node)?.get(key))
    }

    /// Allocate a detached composite node from a JSON object.
    ///
    /// The node (and any nested objects, which are linked beneath it) is
    /// not reachable from the root until it is inserted through a
    /// state-object or array-element action.
    ///
    /// # Errors
    ///
    /// [`StateError::RootNotObject`] if `json` is not an object.
    pub fn create_object(&mut self, json: Json) -> Result<NodeId, StateError> {
        let Json::Object(map) = json else {
            return Err(StateError::RootNotObject);
        };
        let id = self.alloc(Parent::Detached, "");
        self.fill(id, map);
        Ok(id)
    }

    fn alloc(&mut self, parent: Parent, own_key: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(StateNode::new(parent, own_key));
        id
    }

    fn fill(&mut self, owner: NodeId, map: Map<String, Json>) {
        for (key, json) in map {
            let value = self.convert(owner, &key, json);
            self.nodes[owner.0 as usize].set(key, value);
        }
    }

    fn convert(&mut self, owner: NodeId, key: &str, json: Json) -> Value {
        match json {
            Json::Object(map) => {
                let child = self.alloc(Parent::Node(owner), key);
                self.fill(child, map);
                Value::Node(child)
            }
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| self.convert(owner, key, item))
                    .collect(),
            ),
            other => Value::Plain(other),
        }
    }

    /// Link a detached node under `parent` with the given own key.
    ///
    /// Only stamps the child's `parent` / `own_key`; storing the
    /// [`Value::Node`] in the parent's property (or list) is up to the
    /// caller.
    ///
    /// # Errors
    ///
    /// [`StateError::AlreadyAttached`] if the child is the root or is
    /// already linked. Nodes are never moved in place.
    pub fn attach(&mut self, child: NodeId, parent: NodeId, key: &str) -> Result<(), StateError> {
        self.node(parent)?;
        let node = self.node_mut(child)?;
        if node.is_attached() {
            return Err(StateError::AlreadyAttached(child));
        }
        node.link(Parent::Node(parent), key);
        Ok(())
    }

    /// Mark a node as detached.
    ///
    /// The subtree below it is left intact so a later [`attach`](Self::attach)
    /// restores it in one step.
    pub fn detach(&mut self, child: NodeId) -> Result<(), StateError> {
        if child.is_root() {
            return Err(StateError::AlreadyAttached(child));
        }
        self.node_mut(child)?.unlink();
        Ok(())
    }

    /// Dotted path of a node from the root. The root's path is empty.
    ///
    /// # Errors
    ///
    /// [`StateError::Detached`] if the chain passes through a detached
    /// node before reaching the root.
    pub fn node_path(&self, node: NodeId) -> Result<String, StateError> {
        let mut segments: Vec<&str> = Vec::new();
        let mut cur = node;
        loop {
            let n = self.node(cur)?;
            match n.parent() {
                Parent::Root => break,
                Parent::Detached => return Err(StateError::Detached(cur)),
                Parent::Node(parent) => {
                    segments.push(n.own_key());
                    cur = parent;
                }
            }
            // A chain longer than the arena can only be a cycle.
            if segments.len() > self.nodes.len() {
                return Err(StateError::Detached(node));
            }
        }
        segments.reverse();
        Ok(segments.join("."))
    }

    /// Fully qualified dotted path of a property on `node`.
    pub fn full_path(&self, node: NodeId, key: &str) -> Result<String, StateError> {
        let prefix = self.node_path(node)?;
        if prefix.is_empty() {
            Ok(key.to_string())
        } else {
            Ok(format!("{prefix}.{key}"))
        }
    }

    /// Resolve a dotted path to the owning node and property key.
    ///
    /// Intermediate segments must name child nodes; a numeric segment
    /// following a list selects that element.
    pub fn resolve(&self, path: &str) -> Result<(NodeId, String), StateError> {
        let unresolved = || StateError::UnresolvedPath(path.to_string());
        let mut segments: Vec<&str> = path.split('.').collect();
        let key = segments.pop().filter(|k| !k.is_empty()).ok_or_else(unresolved)?;

        let mut cur = NodeId::ROOT;
        let mut iter = segments.into_iter();
        while let Some(seg) = iter.next() {
            cur = match self.node(cur)?.get(seg) {
                Some(Value::Node(child)) => *child,
                Some(Value::List(items)) => {
                    let idx: usize = iter
                        .next()
                        .and_then(|s| s.parse().ok())
                        .ok_or_else(unresolved)?;
                    items
                        .get(idx)
                        .and_then(Value::as_node)
                        .ok_or_else(unresolved)?
                }
                _ => return Err(unresolved()),
            };
        }
        Ok((cur, key.to_string()))
    }

    /// Borrow a list property.
    pub fn list(&self, node: NodeId, key: &str) -> Result<&Vec<Value>, StateError> {
        match self.node(node)?.get(key) {
            Some(Value::List(items)) => Ok(items),
            _ => Err(StateError::NotAList {
                node,
                key: key.to_string(),
            }),
        }
    }

    /// Mutably borrow a list property.
    pub fn list_mut(&mut self, node: NodeId, key: &str) -> Result<&mut Vec<Value>, StateError> {
        match self.node_mut(node)?.get_mut(key) {
            Some(Value::List(items)) => Ok(items),
            _ => Err(StateError::NotAList {
                node,
                key: key.to_string(),
            }),
        }
    }

    /// Locate a composite list element within its owning list.
    ///
    /// Returns `(owner, list_key, index)`.
    ///
    /// # Errors
    ///
    /// [`StateError::ArrayMembership`] if the node's parent does not hold
    /// it in the list named by its own key.
    pub fn element_position(&self, element: NodeId) -> Result<(NodeId, String, usize), StateError> {
        let node = self.node(element)?;
        let membership = || StateError::ArrayMembership {
            node: element,
            key: node.own_key().to_string(),
        };
        let Parent::Node(owner) = node.parent() else {
            return Err(membership());
        };
        let items = self.list(owner, node.own_key()).map_err(|_| membership())?;
        let index = items
            .iter()
            .position(|v| v.as_node() == Some(element))
            .ok_or_else(membership)?;
        Ok((owner, node.own_key().to_string(), index))
    }

    /// Render the reachable tree as plain JSON.
    ///
    /// Parent links and own keys are internal and never appear.
    pub fn to_json(&self) -> Json {
        self.render_node(NodeId::ROOT)
    }

    /// Render the subtree rooted at `node` as plain JSON.
    pub fn node_to_json(&self, node: NodeId) -> Result<Json, StateError> {
        self.node(node)?;
        Ok(self.render_node(node))
    }

    /// Render a single value as plain JSON.
    pub fn value_to_json(&self, value: &Value) -> Json {
        match value {
            Value::Plain(json) => json.clone(),
            Value::List(items) => Json::Array(items.iter().map(|v| self.value_to_json(v)).collect()),
            Value::Node(id) => self.render_node(*id),
        }
    }

    fn render_node(&self, id: NodeId) -> Json {
        let Some(node) = self.nodes.get(id.0 as usize) else {
            return Json::Null;
        };
        let map: Map<String, Json> = node
            .fields()
            .iter()
            .map(|(k, v)| (k.clone(), self.value_to_json(v)))
            .collect();
        Json::Object(map)
    }
}
