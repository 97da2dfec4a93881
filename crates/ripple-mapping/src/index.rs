//! The [`MappingIndex`] registry.
//!
//! Storage per path is one of two shapes:
//!
//! - **Flat**: a single ordered [`BindingList`] for the property or the
//!   list as a whole.
//! - **Indexed**: a sorted map from [`Slot`] to binding list, used once any
//!   binding targets an individual list element. Whole-list bindings live
//!   under [`Slot::Whole`].
//!
//! The first element-level request at a flat path converts it to the
//! indexed shape, carrying the existing bindings over to [`Slot::Whole`].
//! No conversion ever drops a binding.

use std::collections::BTreeMap;
use std::mem;

use indexmap::IndexMap;
use ripple_core::ObserverId;

use crate::binding::{Binding, BindingList};

/// Position of a binding list within an indexed path.
///
/// `Whole` sorts before every element slot, so range operations over
/// `At(n)..` never touch it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// The list (or property) as a whole.
    Whole,
    /// A single list element.
    At(usize),
}

impl From<Option<usize>> for Slot {
    fn from(index: Option<usize>) -> Self {
        match index {
            Some(i) => Self::At(i),
            None => Self::Whole,
        }
    }
}

#[derive(Clone, Debug)]
enum Entry {
    Flat(BindingList),
    Indexed(BTreeMap<Slot, BindingList>),
}

impl Entry {
    fn get(&self, index: Option<usize>) -> Option<&BindingList> {
        match (self, index) {
            (Self::Flat(list), None) => Some(list),
            (Self::Flat(_), Some(_)) => None,
            (Self::Indexed(map), index) => map.get(&Slot::from(index)),
        }
    }

    fn get_mut(&mut self, index: Option<usize>) -> Option<&mut BindingList> {
        match (self, index) {
            (Self::Flat(list), None) => Some(list),
            (Self::Flat(_), Some(_)) => None,
            (Self::Indexed(map), index) => map.get_mut(&Slot::from(index)),
        }
    }

    /// Convert to the indexed shape (if flat) and borrow the slot map.
    fn indexed(&mut self) -> &mut BTreeMap<Slot, BindingList> {
        match self {
            Self::Indexed(map) => map,
            Self::Flat(list) => {
                let whole = mem::take(list);
                let mut map = BTreeMap::new();
                if !whole.is_empty() {
                    map.insert(Slot::Whole, whole);
                }
                *self = Self::Indexed(map);
                self.indexed()
            }
        }
    }

    fn lists(&self) -> Box<dyn Iterator<Item = &BindingList> + '_> {
        match self {
            Self::Flat(list) => Box::new(std::iter::once(list)),
            Self::Indexed(map) => Box::new(map.values()),
        }
    }

    fn binding_count(&self) -> usize {
        self.lists().map(|l| l.len()).sum()
    }

    fn is_empty(&self) -> bool {
        self.lists().all(|l| l.is_empty())
    }
}

/// Registry of observer bindings keyed by dotted state path.
///
/// # Examples
///
/// ```
/// use ripple_core::ObserverId;
/// use ripple_mapping::{Binding, MappingIndex};
///
/// let mut index = MappingIndex::new();
/// let row = ObserverId(1);
/// index.register(Binding::element(row, "row", "addresses", 1));
///
/// // Inserting a new element in front shifts the binding up.
/// index.insert_at("addresses", 0, vec![Default::default()]);
/// let moved = index.get("addresses", Some(2)).unwrap();
/// assert_eq!(moved[0].index, Some(2));
/// assert!(index.get("addresses", Some(1)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MappingIndex {
    entries: IndexMap<String, Entry>,
}

impl MappingIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no path is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of bindings across all paths and slots.
    pub fn binding_count(&self) -> usize {
        self.entries.values().map(Entry::binding_count).sum()
    }

    /// Registered paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every binding, path by path.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries
            .values()
            .flat_map(Entry::lists)
            .flat_map(|l| l.iter())
    }

    /// Whether the path uses the per-element (indexed) representation.
    pub fn is_indexed(&self, path: &str) -> bool {
        matches!(self.entries.get(path), Some(Entry::Indexed(_)))
    }

    /// Bindings at `path`, for one element or (`None`) the whole value.
    pub fn get(&self, path: &str, index: Option<usize>) -> Option<&BindingList> {
        self.entries.get(path)?.get(index)
    }

    /// Bindings at `path`, creating an empty list (and converting a flat
    /// path to the indexed shape) as needed.
    pub fn get_or_create(&mut self, path: &str, index: Option<usize>) -> &mut BindingList {
        let entry = self
            .entries
            .entry(path.to_string())
            .or_insert_with(|| match index {
                None => Entry::Flat(BindingList::new()),
                Some(_) => Entry::Indexed(BTreeMap::new()),
            });
        match (entry, index) {
            (Entry::Flat(list), None) => list,
            (entry, index) => entry.indexed().entry(Slot::from(index)).or_default(),
        }
    }

    /// Register a binding at its own path and index.
    ///
    /// Returns `false` (and changes nothing) if the same observer/target
    /// registration already exists there.
    pub fn register(&mut self, binding: Binding) -> bool {
        let path = binding.path.clone();
        let list = self.get_or_create(&path, binding.index);
        if list.iter().any(|b| b.same_registration(&binding)) {
            return false;
        }
        list.push(binding);
        true
    }

    /// Remove every binding at `path` / `index` matching `binding`'s
    /// observer and target. Returns the number removed.
    pub fn remove_binding(&mut self, path: &str, binding: &Binding, index: Option<usize>) -> usize {
        let Some(list) = self.entries.get_mut(path).and_then(|e| e.get_mut(index)) else {
            return 0;
        };
        let before = list.len();
        list.retain(|b| !b.same_registration(binding));
        let removed = before - list.len();
        self.prune_slot(path, index);
        removed
    }

    /// Drop the bindings of one element, or (`None`) every binding at the
    /// path including all element slots. Returns the number of bindings
    /// removed.
    pub fn remove_path(&mut self, path: &str, index: Option<usize>) -> usize {
        match index {
            None => self
                .entries
                .shift_remove(path)
                .map_or(0, |e| e.binding_count()),
            Some(i) => {
                let removed = match self.entries.get_mut(path) {
                    Some(Entry::Indexed(map)) => map.remove(&Slot::At(i)).map_or(0, |l| l.len()),
                    _ => 0,
                };
                self.prune(path);
                removed
            }
        }
    }

    /// Every binding at `path`, whole-value slot first, then elements in
    /// index order.
    pub fn path_bindings(&self, path: &str) -> Vec<Binding> {
        self.entries
            .get(path)
            .into_iter()
            .flat_map(Entry::lists)
            .flat_map(|l| l.iter().cloned())
            .collect()
    }

    /// Bindings on every path strictly below `prefix`.
    pub fn subtree_bindings(&self, prefix: &str) -> Vec<Binding> {
        self.entries
            .iter()
            .filter(|(path, _)| is_descendant(path, prefix))
            .flat_map(|(_, e)| e.lists())
            .flat_map(|l| l.iter().cloned())
            .collect()
    }

    /// Remove every path strictly below `prefix` (`prefix.` followed by
    /// anything). Used when a composite child is deleted, since any of its
    /// descendant properties may be bound independently. Returns the
    /// number of paths removed.
    pub fn remove_subtree(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| !is_descendant(path, prefix));
        before - self.entries.len()
    }

    /// Open `lists.len()` element slots at `index`, shifting every element
    /// binding at or above `index` up by that amount and updating each
    /// shifted binding's recorded index. Non-empty lists are stored in the
    /// opened slots. Returns the number of bindings shifted.
    pub fn insert_at(&mut self, path: &str, index: usize, lists: Vec<BindingList>) -> usize {
        let count = lists.len();
        if count == 0 {
            return 0;
        }
        let has_new = lists.iter().any(|l| !l.is_empty());
        // Flat or absent with nothing to store: no element slots to shift.
        if !has_new && !self.is_indexed(path) {
            return 0;
        }
        let map = self
            .entries
            .entry(path.to_string())
            .or_insert_with(|| Entry::Indexed(BTreeMap::new()))
            .indexed();

        let mut shifted = 0;
        for (slot, mut list) in map.split_off(&Slot::At(index)) {
            let Slot::At(i) = slot else { continue };
            let to = i + count;
            for b in list.iter_mut() {
                b.index = Some(to);
            }
            shifted += list.len();
            map.insert(Slot::At(to), list);
        }

        for (offset, list) in lists.into_iter().enumerate() {
            if list.is_empty() {
                continue;
            }
            let at = index + offset;
            let dest = map.entry(Slot::At(at)).or_default();
            for mut b in list {
                b.index = Some(at);
                path.clone_into(&mut b.path);
                dest.push(b);
            }
        }

        tracing::trace!(path, index, count, shifted, "mapping slots opened");
        shifted
    }

    /// Close `count` element slots starting at `index`: bindings in the
    /// closed range are dropped, bindings above it move down by `count`
    /// with their recorded index updated. Returns the number of bindings
    /// dropped.
    pub fn delete_at(&mut self, path: &str, index: usize, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let Some(Entry::Indexed(map)) = self.entries.get_mut(path) else {
            return 0;
        };

        let mut removed = 0;
        for (slot, mut list) in map.split_off(&Slot::At(index)) {
            let Slot::At(i) = slot else { continue };
            if i < index + count {
                removed += list.len();
                continue;
            }
            let to = i - count;
            for b in list.iter_mut() {
                b.index = Some(to);
            }
            map.insert(Slot::At(to), list);
        }

        tracing::trace!(path, index, count, removed, "mapping slots closed");
        self.prune(path);
        removed
    }

    /// Remove every binding held by `observer`. Returns the number removed.
    pub fn remove_observer(&mut self, observer: ObserverId) -> usize {
        let mut removed = 0;
        for entry in self.entries.values_mut() {
            let lists: Vec<&mut BindingList> = match entry {
                Entry::Flat(list) => vec![list],
                Entry::Indexed(map) => map.values_mut().collect(),
            };
            for list in lists {
                let before = list.len();
                list.retain(|b| b.observer != observer);
                removed += before - list.len();
            }
            if let Entry::Indexed(map) = entry {
                map.retain(|_, l| !l.is_empty());
            }
        }
        self.entries.retain(|_, e| !e.is_empty());
        removed
    }

    fn prune_slot(&mut self, path: &str, index: Option<usize>) {
        if let Some(Entry::Indexed(map)) = self.entries.get_mut(path) {
            let slot = Slot::from(index);
            if map.get(&slot).is_some_and(|l| l.is_empty()) {
                map.remove(&slot);
            }
        }
        self.prune(path);
    }

    fn prune(&mut self, path: &str) {
        if self.entries.get(path).is_some_and(Entry::is_empty) {
            self.entries.shift_remove(path);
        }
    }
}

fn is_descendant(path: &str, prefix: &str) -> bool {
    path.len() > prefix.len() + 1
        && path.starts_with(prefix)
        && path.as_bytes()[prefix.len()] == b'.'
}
