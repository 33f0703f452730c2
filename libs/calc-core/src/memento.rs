//! Undo/redo snapshots
//!
//! The caretaker keeps the *current* state on top of the undo stack, so undo has
//! to look one entry below the top rather than restore what it pops:
//!
//! ```text
//! record   undo: [s0, s1, s2]   redo: []          history = s2
//! undo     undo: [s0, s1]       redo: [s2]        history = s1
//! undo     undo: [s0]           redo: [s2, s1]    history = s0
//! undo     (fewer than two snapshots, nothing happens)
//! redo     undo: [s0, s1]       redo: [s2]        history = s1
//! ```

use crate::calculation::Calculation;
use crate::history::History;
use tracing::debug;

/// Immutable snapshot of a [`History`]'s entries
#[derive(Debug, Clone, PartialEq)]
pub struct Memento {
    items: Vec<Calculation>,
}

impl Memento {
    pub(crate) fn new(items: Vec<Calculation>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Calculation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Owns the undo and redo stacks for one history
#[derive(Debug, Default)]
pub struct Caretaker {
    /// Most recent last; the top is the current state
    undo: Vec<Memento>,
    redo: Vec<Memento>,
}

impl Caretaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the history as the new current state and invalidate redo
    pub fn record(&mut self, history: &History) {
        self.undo.push(history.create_memento());
        self.redo.clear();
        debug!(
            undo_depth = self.undo.len(),
            entries = history.len(),
            "recorded history snapshot"
        );
    }

    /// Step back to the previous snapshot; false if there is none
    pub fn undo(&mut self, history: &mut History) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(current) = self.undo.pop() else {
            return false;
        };
        self.redo.push(current);

        let Some(previous) = self.undo.last() else {
            return false;
        };
        history.restore_memento(previous);

        debug!(
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
            entries = history.len(),
            "undo"
        );
        true
    }

    /// Re-apply the most recently undone snapshot; false if there is none
    pub fn redo(&mut self, history: &mut History) -> bool {
        let Some(snapshot) = self.redo.pop() else {
            return false;
        };
        history.restore_memento(&snapshot);
        self.undo.push(snapshot);

        debug!(
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
            entries = history.len(),
            "redo"
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}
