//! The closed set of action operations and how each one mutates state.
//!
//! An [`Op`] carries its target and payload plus the slots it fills in
//! while performing (`old`, `unbound`), which is what makes its inverse
//! computable afterwards. [`apply`] is the single place state and the
//! mapping index are touched.

use std::mem;

use ripple_core::{NodeId, StateError, StateGraph, Value};
use ripple_mapping::{Binding, BindingList, MappingIndex};

use crate::kind::{ActionKind, NoOpKind};

/// One action operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// Notify the bindings of `node.key` without mutating.
    Rerender {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
    },
    /// Add a property that does not exist yet.
    InsertProperty {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
        /// New value. Must not be null or a composite node.
        value: Value,
    },
    /// Replace an existing plain property.
    UpdateProperty {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
        /// New value.
        value: Value,
        /// Previous value, captured when performed.
        old: Option<Value>,
    },
    /// Remove an existing plain property.
    DeleteProperty {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
        /// Removed value, captured when performed.
        old: Option<Value>,
    },
    /// Link a detached composite node under `node.key`.
    InsertStateObject {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
        /// The detached child (see [`StateGraph::create_object`]).
        child: NodeId,
        /// Bindings re-registered on insert; filled by inverting a delete.
        rebind: Vec<Binding>,
    },
    /// Unlink the composite node at `node.key`.
    DeleteStateObject {
        /// Owning node.
        node: NodeId,
        /// Property key.
        key: String,
        /// The unlinked child, captured when performed.
        old: Option<NodeId>,
        /// Descendant bindings dropped from the mapping index.
        unbound: Vec<Binding>,
    },
    /// Insert into the list at `node.key`.
    InsertElement {
        /// Owning node.
        node: NodeId,
        /// List property key.
        key: String,
        /// Insert position, `0..=len`.
        index: usize,
        /// New element. A [`Value::Node`] is linked under the list key.
        value: Value,
        /// Element bindings placed in the opened slot.
        rebind: BindingList,
    },
    /// Replace one element of the list at `node.key`.
    UpdateElement {
        /// Owning node.
        node: NodeId,
        /// List property key.
        key: String,
        /// Element position, `0..len`.
        index: usize,
        /// New element.
        value: Value,
        /// Previous element, captured when performed.
        old: Option<Value>,
    },
    /// Remove one element of the list at `node.key`.
    DeleteElement {
        /// Owning node.
        node: NodeId,
        /// List property key.
        key: String,
        /// Element position, `0..len`.
        index: usize,
        /// Removed element, captured when performed.
        old: Option<Value>,
        /// Element bindings dropped with the slot.
        unbound: BindingList,
    },
    /// Register an observer binding.
    MapStateToProp {
        /// The binding to add.
        binding: Binding,
    },
    /// Deregister an observer binding.
    UnmapStateToProp {
        /// The binding to remove.
        binding: Binding,
    },
    /// A conditional request that resolved to nothing.
    NoOp(NoOpKind),
}

/// What performing an [`Op`] produced.
#[derive(Debug, Default)]
pub(crate) struct Applied {
    pub path: Option<String>,
    pub mapped: Vec<Binding>,
    pub changed: bool,
}

impl Op {
    /// The tag of this operation.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Rerender { .. } => ActionKind::Rerender,
            Self::InsertProperty { .. } => ActionKind::InsertProperty,
            Self::UpdateProperty { .. } => ActionKind::UpdateProperty,
            Self::DeleteProperty { .. } => ActionKind::DeleteProperty,
            Self::InsertStateObject { .. } => ActionKind::InsertStateObject,
            Self::DeleteStateObject { .. } => ActionKind::DeleteStateObject,
            Self::InsertElement { .. } => ActionKind::InsertElement,
            Self::UpdateElement { .. } => ActionKind::UpdateElement,
            Self::DeleteElement { .. } => ActionKind::DeleteElement,
            Self::MapStateToProp { .. } => ActionKind::MapStateToProp,
            Self::UnmapStateToProp { .. } => ActionKind::UnmapStateToProp,
            Self::NoOp(kind) => (*kind).into(),
        }
    }

    /// Owning node and property key, for data operations.
    pub fn target(&self) -> Option<(NodeId, &str)> {
        match self {
            Self::Rerender { node, key }
            | Self::InsertProperty { node, key, .. }
            | Self::UpdateProperty { node, key, .. }
            | Self::DeleteProperty { node, key, .. }
            | Self::InsertStateObject { node, key, .. }
            | Self::DeleteStateObject { node, key, .. }
            | Self::InsertElement { node, key, .. }
            | Self::UpdateElement { node, key, .. }
            | Self::DeleteElement { node, key, .. } => Some((*node, key)),
            Self::MapStateToProp { .. } | Self::UnmapStateToProp { .. } | Self::NoOp(_) => None,
        }
    }

    /// The operation that undoes this one.
    ///
    /// `None` for no-ops, and for operations whose captured state is
    /// missing because they were never performed.
    pub fn inverse(&self) -> Option<Op> {
        let op = match self {
            Self::Rerender { node, key } => Self::Rerender {
                node: *node,
                key: key.clone(),
            },
            Self::InsertProperty { node, key, .. } => Self::DeleteProperty {
                node: *node,
                key: key.clone(),
                old: None,
            },
            Self::UpdateProperty { node, key, old, .. } => Self::UpdateProperty {
                node: *node,
                key: key.clone(),
                value: old.clone()?,
                old: None,
            },
            Self::DeleteProperty { node, key, old } => Self::InsertProperty {
                node: *node,
                key: key.clone(),
                value: old.clone()?,
            },
            Self::InsertStateObject { node, key, .. } => Self::DeleteStateObject {
                node: *node,
                key: key.clone(),
                old: None,
                unbound: Vec::new(),
            },
            Self::DeleteStateObject {
                node,
                key,
                old,
                unbound,
            } => Self::InsertStateObject {
                node: *node,
                key: key.clone(),
                child: (*old)?,
                rebind: unbound.clone(),
            },
            Self::InsertElement {
                node, key, index, ..
            } => Self::DeleteElement {
                node: *node,
                key: key.clone(),
                index: *index,
                old: None,
                unbound: BindingList::new(),
            },
            Self::UpdateElement {
                node,
                key,
                index,
                old,
                ..
            } => Self::UpdateElement {
                node: *node,
                key: key.clone(),
                index: *index,
                value: old.clone()?,
                old: None,
            },
            Self::DeleteElement {
                node,
                key,
                index,
                old,
                unbound,
            } => Self::InsertElement {
                node: *node,
                key: key.clone(),
                index: *index,
                value: old.clone()?,
                rebind: unbound.clone(),
            },
            Self::MapStateToProp { binding } => Self::UnmapStateToProp {
                binding: binding.clone(),
            },
            Self::UnmapStateToProp { binding } => Self::MapStateToProp {
                binding: binding.clone(),
            },
            Self::NoOp(_) => return None,
        };
        Some(op)
    }

    /// Take the bindings a performed inverse delete dropped back into this
    /// insert, so performing it again re-registers them.
    pub(crate) fn reclaim_bindings(&mut self, inverse: &Op) {
        match (self, inverse) {
            (Self::InsertStateObject { rebind, .. }, Self::DeleteStateObject { unbound, .. }) => {
                rebind.clone_from(unbound);
            }
            (Self::InsertElement { rebind, .. }, Self::DeleteElement { unbound, .. }) => {
                rebind.clone_from(unbound);
            }
            _ => {}
        }
    }

    /// Forget captured state so the op can be performed afresh.
    pub(crate) fn clear_captured(&mut self) {
        match self {
            Self::UpdateProperty { old, .. }
            | Self::DeleteProperty { old, .. }
            | Self::UpdateElement { old, .. }
            | Self::DeleteElement { old, .. } => *old = None,
            Self::DeleteStateObject { old, .. } => *old = None,
            _ => {}
        }
    }
}

// ── Performing ─────────────────────────────────────────────────────

/// Perform `op` against the graph and mapping index.
///
/// Bindings affected by the mutation are read before mutating. A
/// `restoring` op (one produced by inversion) may put back a null value
/// that a fresh insert would reject.
pub(crate) fn apply(
    op: &mut Op,
    graph: &mut StateGraph,
    mapping: &mut MappingIndex,
    restoring: bool,
) -> Result<Applied, StateError> {
    match op {
        Op::Rerender { node, key } => {
            let path = graph.full_path(*node, key)?;
            Ok(Applied {
                mapped: whole(mapping, &path),
                path: Some(path),
                changed: false,
            })
        }

        Op::InsertProperty { node, key, value } => {
            let node = *node;
            if value.is_null() && !restoring {
                return Err(StateError::NullValue {
                    node,
                    key: key.clone(),
                });
            }
            if value.is_node() {
                return Err(composite(node, key));
            }
            if graph.node(node)?.contains_key(key) {
                return Err(StateError::PropertyExists {
                    node,
                    key: key.clone(),
                });
            }
            let path = graph.full_path(node, key)?;
            check_linkable(graph, None, value)?;
            let mapped = whole(mapping, &path);
            link_items(graph, value, node, key)?;
            graph.node_mut(node)?.set(key.as_str(), value.clone());
            Ok(Applied {
                path: Some(path),
                mapped,
                changed: true,
            })
        }

        Op::UpdateProperty {
            node,
            key,
            value,
            old,
        } => {
            let node = *node;
            if value.is_node() {
                return Err(composite(node, key));
            }
            let current = plain_property(graph, node, key)?;
            let path = graph.full_path(node, key)?;
            check_linkable(graph, Some(&current), value)?;
            let mapped = whole(mapping, &path);
            let changed = current != *value;
            unlink_items(graph, &current)?;
            link_items(graph, value, node, key)?;
            graph.node_mut(node)?.set(key.as_str(), value.clone());
            *old = Some(current);
            Ok(Applied {
                path: Some(path),
                mapped,
                changed,
            })
        }

        Op::DeleteProperty { node, key, old } => {
            let node = *node;
            let current = plain_property(graph, node, key)?;
            let path = graph.full_path(node, key)?;
            let mut mapped = mapping.path_bindings(&path);
            if matches!(current, Value::List(_)) {
                mapped.extend(mapping.subtree_bindings(&path));
            }
            unlink_items(graph, &current)?;
            graph.node_mut(node)?.remove(key);
            *old = Some(current);
            Ok(Applied {
                path: Some(path),
                mapped,
                changed: true,
            })
        }

        Op::InsertStateObject {
            node,
            key,
            child,
            rebind,
        } => {
            let node = *node;
            if graph.node(node)?.contains_key(key) {
                return Err(StateError::PropertyExists {
                    node,
                    key: key.clone(),
                });
            }
            graph.attach(*child, node, key)?;
            graph.node_mut(node)?.set(key.as_str(), *child);
            let path = graph.full_path(node, key)?;
            for binding in mem::take(rebind) {
                mapping.register(binding);
            }
            let mut mapped = whole(mapping, &path);
            mapped.extend(mapping.subtree_bindings(&path));
            Ok(Applied {
                path: Some(path),
                mapped,
                changed: true,
            })
        }

        Op::DeleteStateObject {
            node,
            key,
            old,
            unbound,
        } => {
            let node = *node;
            let child = match graph.node(node)?.get(key) {
                Some(Value::Node(child)) => *child,
                Some(_) => {
                    return Err(StateError::NotAStateObject {
                        node,
                        key: key.clone(),
                    })
                }
                None => return Err(missing(node, key)),
            };
            let path = graph.full_path(node, key)?;
            let below = mapping.subtree_bindings(&path);
            let mut mapped = whole(mapping, &path);
            mapped.extend(below.iter().cloned());
            mapping.remove_subtree(&path);
            graph.detach(child)?;
            graph.node_mut(node)?.remove(key);
            *old = Some(child);
            *unbound = below;
            Ok(Applied {
                path: Some(path),
                mapped,
                changed: true,
            })
        }

        Op::InsertElement {
            node,
            key,
            index,
            value,
            rebind,
        } => {
            let (node, index) = (*node, *index);
            if value.is_null() && !restoring {
                return Err(StateError::NullValue {
                    node,
                    key: key.clone(),
                });
            }
            check_index(graph, node, key, index, true)?;
            let path = graph.full_path(node, key)?;
            if let Value::Node(child) = value {
                graph.attach(*child, node, key)?;
            }
            graph.list_mut(node, key)?.insert(index, value.clone());
            mapping.insert_at(&path, index, vec![mem::take(rebind)]);
            let mut mapped = whole(mapping, &path);
            mapped.extend(slot(mapping, &path, index));
            Ok(Applied {
                path: Some(path),
                mapped,
                changed: true,
            })
        }

        Op::UpdateElement {
            node,
            key,
            index,
            value,
            old,
        } => {
            let (node, index) = (*node, *index);
            check_index(graph, node, key, index, false)?;
            let path = graph.full_path(node, key)?;
            let mut mapped = whole(mapping, &path);
            mapped.extend(slot(mapping, &path, index));

            let current = graph.list(node, key)?[index].clone();
            let changed = current != *value;
            if changed {
                check_linkable(graph, Some(&current), value)?;
                if let Value::Node(prev) = current {
                    graph.detach(prev)?;
                }
                if let Value::Node(next) = value {
                    graph.attach(*next, node, key)?;
                }
            }
            graph.list_mut(node, key)?[index] = value.clone();
            *old = Some(current);
            Ok(Applied {
                path: Some(path),
                mapped,
                changed,
            })
        }

        Op::DeleteElement {
            node,
            key,
            index,
            old,
            unbound,
        } => {
            let (node, index) = (*node, *index);
            check_index(graph, node, key, index, false)?;
            let path = graph.full_path(node, key)?;
            let mut mapped = whole(mapping, &path);
            mapped.extend(slot(mapping, &path, index));

            let removed = graph.list_mut(node, key)?.remove(index);
            if let Value::Node(child) = removed {
                graph.detach(child)?;
            }
            *unbound = mapping
                .get(&path, Some(index))
                .cloned()
                .unwrap_or_default();
            mapping.delete_at(&path, index, 1);
            *old = Some(removed);
            Ok(Applied {
                path: Some(path),
                mapped,
                changed: true,
            })
        }

        Op::MapStateToProp { binding } => Ok(Applied {
            path: Some(binding.path.clone()),
            mapped: Vec::new(),
            changed: mapping.register(binding.clone()),
        }),

        Op::UnmapStateToProp { binding } => {
            let removed = mapping.remove_binding(&binding.path, binding, binding.index);
            Ok(Applied {
                path: Some(binding.path.clone()),
                mapped: Vec::new(),
                changed: removed > 0,
            })
        }

        Op::NoOp(_) => Ok(Applied::default()),
    }
}

fn whole(mapping: &MappingIndex, path: &str) -> Vec<Binding> {
    mapping
        .get(path, None)
        .map(|l| l.to_vec())
        .unwrap_or_default()
}

fn slot(mapping: &MappingIndex, path: &str, index: usize) -> Vec<Binding> {
    mapping
        .get(path, Some(index))
        .map(|l| l.to_vec())
        .unwrap_or_default()
}

fn missing(node: NodeId, key: &str) -> StateError {
    StateError::PropertyMissing {
        node,
        key: key.to_string(),
    }
}

fn composite(node: NodeId, key: &str) -> StateError {
    StateError::CompositeProperty {
        node,
        key: key.to_string(),
    }
}

/// Current value of a property reachable through the scalar CRUD path.
fn plain_property(graph: &StateGraph, node: NodeId, key: &str) -> Result<Value, StateError> {
    match graph.node(node)?.get(key) {
        None => Err(missing(node, key)),
        Some(Value::Node(_)) => Err(composite(node, key)),
        Some(value) => Ok(value.clone()),
    }
}

fn check_index(
    graph: &StateGraph,
    node: NodeId,
    key: &str,
    index: usize,
    inserting: bool,
) -> Result<(), StateError> {
    let len = graph.list(node, key)?.len();
    let in_range = if inserting { index <= len } else { index < len };
    if in_range {
        Ok(())
    } else {
        Err(StateError::IndexOutOfRange {
            node,
            key: key.to_string(),
            index,
            len,
        })
    }
}

/// Composite nodes held by a value, directly or as list elements.
fn nodes_of(value: &Value) -> Vec<NodeId> {
    match value {
        Value::Node(id) => vec![*id],
        Value::List(items) => items.iter().filter_map(Value::as_node).collect(),
        Value::Plain(_) => Vec::new(),
    }
}

/// Check that every node in `next` can be linked once the nodes in `prev`
/// are released: each one exists, is detached or held by `prev`, and
/// appears once. Runs before anything is unlinked so a failure leaves the
/// graph untouched.
fn check_linkable(graph: &StateGraph, prev: Option<&Value>, next: &Value) -> Result<(), StateError> {
    let released = prev.map(nodes_of).unwrap_or_default();
    let mut seen = Vec::new();
    for child in nodes_of(next) {
        let free = !graph.node(child)?.is_attached() || released.contains(&child);
        if child.is_root() || !free || seen.contains(&child) {
            return Err(StateError::AlreadyAttached(child));
        }
        seen.push(child);
    }
    Ok(())
}

/// Link composite elements of a list value under `owner.key`.
fn link_items(graph: &mut StateGraph, value: &Value, owner: NodeId, key: &str) -> Result<(), StateError> {
    if let Value::List(items) = value {
        for child in items.iter().filter_map(Value::as_node) {
            graph.attach(child, owner, key)?;
        }
    }
    Ok(())
}

fn unlink_items(graph: &mut StateGraph, value: &Value) -> Result<(), StateError> {
    if let Value::List(items) = value {
        for child in items.iter().filter_map(Value::as_node) {
            graph.detach(child)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::ObserverId;
    use serde_json::json;

    fn graph() -> StateGraph {
        StateGraph::from_json(json!({
            "title": "draft",
            "name": {"first": "Matthew"},
            "addresses": ["A", "B"],
        }))
        .unwrap()
    }

    fn name(graph: &StateGraph) -> NodeId {
        graph.resolve("name.first").unwrap().0
    }

    #[test]
    fn insert_rejects_null_and_existing() {
        let mut g = graph();
        let mut m = MappingIndex::new();
        let mut op = Op::InsertProperty {
            node: g.root(),
            key: "empty".into(),
            value: Value::null(),
        };
        assert!(matches!(
            apply(&mut op, &mut g, &mut m, false),
            Err(StateError::NullValue { .. })
        ));
        assert!(apply(&mut op, &mut g, &mut m, true).is_ok());

        let mut op = Op::InsertProperty {
            node: g.root(),
            key: "title".into(),
            value: "again".into(),
        };
        assert!(matches!(
            apply(&mut op, &mut g, &mut m, false),
            Err(StateError::PropertyExists { .. })
        ));
    }

    #[test]
    fn scalar_path_refuses_composites() {
        let mut g = graph();
        let mut m = MappingIndex::new();
        let mut op = Op::DeleteProperty {
            node: g.root(),
            key: "name".into(),
            old: None,
        };
        assert!(matches!(
            apply(&mut op, &mut g, &mut m, false),
            Err(StateError::CompositeProperty { .. })
        ));
    }

    #[test]
    fn update_captures_old_and_detects_change() {
        let mut g = graph();
        let mut m = MappingIndex::new();
        let node = name(&g);
        m.register(Binding::new(ObserverId(1), "first", "name.first"));

        let mut op = Op::UpdateProperty {
            node,
            key: "first".into(),
            value: "Matt".into(),
            old: None,
        };
        let applied = apply(&mut op, &mut g, &mut m, false).unwrap();
        assert!(applied.changed);
        assert_eq!(applied.path.as_deref(), Some("name.first"));
        assert_eq!(applied.mapped.len(), 1);
        let Op::UpdateProperty { old, .. } = &op else {
            unreachable!()
        };
        assert_eq!(old.as_ref().and_then(Value::as_str), Some("Matthew"));

        let mut same = Op::UpdateProperty {
            node,
            key: "first".into(),
            value: "Matt".into(),
            old: None,
        };
        assert!(!apply(&mut same, &mut g, &mut m, false).unwrap().changed);
    }

    #[test]
    fn element_bounds() {
        let mut g = graph();
        let mut m = MappingIndex::new();
        let root = g.root();
        let mut op = Op::InsertElement {
            node: root,
            key: "addresses".into(),
            index: 3,
            value: "C".into(),
            rebind: BindingList::new(),
        };
        assert!(matches!(
            apply(&mut op, &mut g, &mut m, false),
            Err(StateError::IndexOutOfRange { index: 3, len: 2, .. })
        ));
        let mut op = Op::UpdateElement {
            node: root,
            key: "addresses".into(),
            index: 2,
            value: "C".into(),
            old: None,
        };
        assert!(matches!(
            apply(&mut op, &mut g, &mut m, false),
            Err(StateError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
        let mut op = Op::InsertElement {
            node: root,
            key: "addresses".into(),
            index: 2,
            value: "C".into(),
            rebind: BindingList::new(),
        };
        apply(&mut op, &mut g, &mut m, false).unwrap();
        assert_eq!(g.to_json()["addresses"], json!(["A", "B", "C"]));
    }

    #[test]
    fn delete_state_object_drops_subtree_bindings() {
        let mut g = graph();
        let mut m = MappingIndex::new();
        let obs = ObserverId(4);
        m.register(Binding::new(obs, "name", "name"));
        m.register(Binding::new(obs, "first", "name.first"));

        let mut op = Op::DeleteStateObject {
            node: g.root(),
            key: "name".into(),
            old: None,
            unbound: Vec::new(),
        };
        let applied = apply(&mut op, &mut g, &mut m, false).unwrap();
        assert_eq!(applied.mapped.len(), 2);
        assert!(m.get("name.first", None).is_none());
        assert!(m.get("name", None).is_some());
        assert!(g.to_json().get("name").is_none());

        let inverse = op.inverse().unwrap();
        let Op::InsertStateObject { rebind, .. } = &inverse else {
            unreachable!()
        };
        assert_eq!(rebind.len(), 1);
    }

    #[test]
    fn failed_list_update_leaves_elements_linked() {
        let mut g = StateGraph::from_json(json!({
            "xs": [{"a": 1}],
            "ys": [{"b": 2}],
        }))
        .unwrap();
        let mut m = MappingIndex::new();
        let root = g.root();
        let x0 = g.list(root, "xs").unwrap()[0].as_node().unwrap();
        let y0 = g.list(root, "ys").unwrap()[0].as_node().unwrap();

        let mut op = Op::UpdateProperty {
            node: root,
            key: "xs".into(),
            value: Value::List(vec![Value::Node(y0)]),
            old: None,
        };
        assert!(matches!(
            apply(&mut op, &mut g, &mut m, false),
            Err(StateError::AlreadyAttached(id)) if id == y0
        ));
        assert_eq!(g.full_path(x0, "a").unwrap(), "xs.a");
        assert_eq!(g.full_path(y0, "b").unwrap(), "ys.b");
        assert_eq!(g.to_json(), json!({"xs": [{"a": 1}], "ys": [{"b": 2}]}));

        let mut op = Op::UpdateElement {
            node: root,
            key: "xs".into(),
            index: 0,
            value: Value::Node(y0),
            old: None,
        };
        assert!(apply(&mut op, &mut g, &mut m, false).is_err());
        assert_eq!(g.full_path(x0, "a").unwrap(), "xs.a");
    }

    #[test]
    fn list_update_may_reorder_its_own_elements() {
        let mut g = StateGraph::from_json(json!({"xs": [{"a": 1}, {"a": 2}]})).unwrap();
        let mut m = MappingIndex::new();
        let root = g.root();
        let items = g.list(root, "xs").unwrap().clone();
        let mut op = Op::UpdateProperty {
            node: root,
            key: "xs".into(),
            value: Value::List(items.into_iter().rev().collect()),
            old: None,
        };
        apply(&mut op, &mut g, &mut m, false).unwrap();
        assert_eq!(g.to_json(), json!({"xs": [{"a": 2}, {"a": 1}]}));
    }

    #[test]
    fn inverse_requires_captured_state() {
        let op = Op::UpdateProperty {
            node: NodeId::ROOT,
            key: "x".into(),
            value: 1i64.into(),
            old: None,
        };
        assert!(op.inverse().is_none());
        assert!(Op::NoOp(NoOpKind::Update).inverse().is_none());
        let rerender = Op::Rerender {
            node: NodeId::ROOT,
            key: "x".into(),
        };
        assert_eq!(rerender.inverse(), Some(rerender.clone()));
    }
}
