//! Bounded undo/redo history.
//!
//! [`ActionHistory`] is a ring of performed actions plus a cursor. Entries
//! below the cursor are done; entries at or above it have been undone and
//! can be redone. Pushing while the cursor is below the end abandons the
//! redo branch first.

use std::collections::VecDeque;

use ripple_action::Action;
use ripple_core::ActionId;

/// Ring buffer of performed actions with an undo cursor.
#[derive(Debug)]
pub struct ActionHistory {
    entries: VecDeque<Action>,
    cursor: usize,
    capacity: usize,
}

impl ActionHistory {
    /// Create an empty history holding at most `capacity` entries
    /// (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Record a performed action.
    ///
    /// Discards any undone entries, then appends. Returns the oldest entry
    /// if it was evicted to stay within capacity.
    pub fn push(&mut self, action: Action) -> Option<Action> {
        self.entries.truncate(self.cursor);
        self.entries.push_back(action);
        let evicted = if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.cursor = self.entries.len();
        evicted
    }

    /// Entries that can be undone, most recent first.
    pub fn undoable(&self) -> impl Iterator<Item = &Action> {
        self.entries.range(..self.cursor).rev()
    }

    /// Entries that can be redone, oldest first.
    pub fn redoable(&self) -> impl Iterator<Item = &Action> {
        self.entries.range(self.cursor..)
    }

    /// The entry the next undo would revert.
    pub fn peek_undo(&self) -> Option<&Action> {
        self.cursor.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Position of the entry with `id`.
    pub fn position(&self, id: ActionId) -> Option<usize> {
        self.entries.iter().position(|a| a.id() == id)
    }

    /// Remove the entry at `index`. The cursor keeps separating the same
    /// done and undone entries.
    pub fn remove(&mut self, index: usize) -> Option<Action> {
        let removed = self.entries.remove(index)?;
        if index < self.cursor {
            self.cursor -= 1;
        }
        Some(removed)
    }

    /// Move the cursor back one entry and return that entry.
    pub fn step_back(&mut self) -> Option<&mut Action> {
        self.cursor = self.cursor.checked_sub(1)?;
        self.entries.get_mut(self.cursor)
    }

    /// Return the entry at the cursor and move the cursor past it.
    pub fn step_forward(&mut self) -> Option<&mut Action> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get_mut(self.cursor - 1)
    }

    /// Whether anything can be undone.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether anything can be redone.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of undoable entries.
    pub fn undo_len(&self) -> usize {
        self.cursor
    }

    /// Number of redoable entries.
    pub fn redo_len(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum entries held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
