//! Observer bindings.

use smallvec::SmallVec;

use ripple_core::ObserverId;

/// An observer's registered interest in a state path.
///
/// `target` names the observer-side property the path feeds (the
/// consumer decides what that means). `index` is the list element the
/// binding follows, or `None` for the property / list as a whole; the
/// mapping index keeps it equal to the slot the binding is stored under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// The bound observer.
    pub observer: ObserverId,
    /// Observer-side target identifier.
    pub target: String,
    /// Fully qualified dotted source path.
    pub path: String,
    /// Bound list element, if any.
    pub index: Option<usize>,
}

impl Binding {
    /// A binding to a whole property (or a whole list).
    pub fn new(observer: ObserverId, target: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            observer,
            target: target.into(),
            path: path.into(),
            index: None,
        }
    }

    /// A binding to one element of the list at `path`.
    pub fn element(
        observer: ObserverId,
        target: impl Into<String>,
        path: impl Into<String>,
        index: usize,
    ) -> Self {
        Self {
            index: Some(index),
            ..Self::new(observer, target, path)
        }
    }

    /// Whether two bindings denote the same registration
    /// (same observer and same target), regardless of location.
    pub fn same_registration(&self, other: &Binding) -> bool {
        self.observer == other.observer && self.target == other.target
    }
}

/// Ordered bindings registered at one path (or one list slot).
///
/// Most paths have one or two observers, so the list stays inline.
pub type BindingList = SmallVec<[Binding; 2]>;
