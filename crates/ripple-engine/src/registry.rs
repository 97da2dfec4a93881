//! Lookup of dispatchers by root identity.
//!
//! Most code holds its [`Manager`] directly. The registry exists for the
//! cases where independently constructed parts only share a
//! [`RootId`] and need to reach the same dispatcher.

use indexmap::IndexMap;

use ripple_action::Action;
use ripple_core::RootId;

use crate::error::DispatchError;
use crate::manager::Manager;

/// Dispatchers keyed by the [`RootId`] of the graph they manage.
#[derive(Debug, Default)]
pub struct ManagerRegistry {
    managers: IndexMap<RootId, Manager>,
}

impl ManagerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dispatcher under its graph's root id.
    ///
    /// Returns the previous dispatcher for that root, if any.
    pub fn insert(&mut self, manager: Manager) -> Option<Manager> {
        self.managers.insert(manager.root_id(), manager)
    }

    /// Look up a dispatcher.
    pub fn get(&self, root: RootId) -> Result<&Manager, DispatchError> {
        self.managers
            .get(&root)
            .ok_or(DispatchError::UnknownRoot(root))
    }

    /// Look up a dispatcher mutably.
    pub fn get_mut(&mut self, root: RootId) -> Result<&mut Manager, DispatchError> {
        self.managers
            .get_mut(&root)
            .ok_or(DispatchError::UnknownRoot(root))
    }

    /// Unregister a dispatcher.
    pub fn remove(&mut self, root: RootId) -> Result<Manager, DispatchError> {
        self.managers
            .shift_remove(&root)
            .ok_or(DispatchError::UnknownRoot(root))
    }

    /// Dispatch to the manager of `root`.
    pub fn dispatch(&mut self, root: RootId, actions: Vec<Action>) -> Result<Vec<Action>, DispatchError> {
        self.get_mut(root)?.dispatch(actions)
    }

    /// Registered root ids in registration order.
    pub fn roots(&self) -> impl Iterator<Item = RootId> + '_ {
        self.managers.keys().copied()
    }

    /// Number of registered dispatchers.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    /// Whether no dispatcher is registered.
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
