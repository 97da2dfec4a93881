//! Action kind tags.

use std::fmt;

/// Which conditional request produced a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoOpKind {
    /// An update whose value was already current.
    Update,
    /// An insert into a slot that was already filled.
    Insert,
    /// A removal of something that was not there.
    Delete,
}

/// Fieldless tag for every action variant.
///
/// Used in errors, logs and observer-side matching. The string forms are
/// stable and match the names consumers switch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Force re-notification without mutating.
    Rerender,
    /// Add a plain property.
    InsertProperty,
    /// Replace a plain property.
    UpdateProperty,
    /// Remove a plain property.
    DeleteProperty,
    /// Link a composite child node under a key.
    InsertStateObject,
    /// Unlink a composite child node.
    DeleteStateObject,
    /// Insert a list element.
    InsertElement,
    /// Replace a list element.
    UpdateElement,
    /// Remove a list element.
    DeleteElement,
    /// Register an observer binding.
    MapStateToProp,
    /// Deregister an observer binding.
    UnmapStateToProp,
    /// Conditional update that had nothing to do.
    UpdateNoOp,
    /// Conditional insert that had nothing to do.
    InsertNoOp,
    /// Conditional removal that had nothing to do.
    DeleteNoOp,
}

impl ActionKind {
    /// Stable upper-snake-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rerender => "RERENDER",
            Self::InsertProperty => "INSERT_PROPERTY",
            Self::UpdateProperty => "UPDATE_PROPERTY",
            Self::DeleteProperty => "DELETE_PROPERTY",
            Self::InsertStateObject => "INSERT_STATE_OBJECT",
            Self::DeleteStateObject => "DELETE_STATE_OBJECT",
            Self::InsertElement => "INSERT_ELEMENT",
            Self::UpdateElement => "UPDATE_ELEMENT",
            Self::DeleteElement => "DELETE_ELEMENT",
            Self::MapStateToProp => "MAP_STATE_TO_PROP",
            Self::UnmapStateToProp => "UNMAP_STATE_TO_PROP",
            Self::UpdateNoOp => "UPDATE_NO_OP",
            Self::InsertNoOp => "INSERT_NO_OP",
            Self::DeleteNoOp => "DELETE_NO_OP",
        }
    }

    /// Whether this kind is filtered out of a batch before dispatch.
    pub fn is_no_op(self) -> bool {
        matches!(self, Self::UpdateNoOp | Self::InsertNoOp | Self::DeleteNoOp)
    }

    /// Whether this kind touches only the mapping index.
    pub fn is_binding(self) -> bool {
        matches!(self, Self::MapStateToProp | Self::UnmapStateToProp)
    }
}

impl From<NoOpKind> for ActionKind {
    fn from(kind: NoOpKind) -> Self {
        match kind {
            NoOpKind::Update => Self::UpdateNoOp,
            NoOpKind::Insert => Self::InsertNoOp,
            NoOpKind::Delete => Self::DeleteNoOp,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
