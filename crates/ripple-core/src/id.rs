//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Index of a [`StateNode`](crate::StateNode) within its owning
/// [`StateGraph`](crate::StateGraph) arena.
///
/// `NodeId(0)` is always the root. Ids are never reused: a node deleted
/// through an action stays in the arena (detached) so that undo can
/// re-link the very same node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node of every graph.
    pub const ROOT: NodeId = NodeId(0);

    /// Whether this is the root node id.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an observer registered with a dispatcher.
///
/// Allocated by the dispatcher at registration; bindings in the mapping
/// index refer to observers only through this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObserverId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Counter for unique [`RootId`] allocation.
static ROOT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a state graph root.
///
/// Allocated from a monotonic atomic counter via [`RootId::next`]. Two
/// graphs always have different ids, even if their contents are equal.
/// Used as the lookup key when several independently constructed
/// dispatchers share a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(u64);

impl RootId {
    /// Allocate a fresh, unique root id. Thread-safe.
    pub fn next() -> Self {
        Self(ROOT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counter for unique [`ActionId`] allocation.
static ACTION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of a single action instance.
///
/// Clones of an action share its id, which lets the dispatcher match an
/// explicitly supplied action against the entry recorded in history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

impl ActionId {
    /// Allocate a fresh, unique action id. Thread-safe.
    pub fn next() -> Self {
        Self(ACTION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
