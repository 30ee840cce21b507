//! Edit history: an ordered stack of image snapshots.
//!
//! The base snapshot (the loaded image) is stored apart from the edits pushed
//! on top of it, so the stack can never be empty and undo can never remove the
//! base. Only three operations are exposed: [`push`](HistoryStack::push),
//! [`pop_if_more_than_one`](HistoryStack::pop_if_more_than_one) and
//! [`top`](HistoryStack::top).

use image::RgbImage;
use thiserror::Error;

/// One immutable image in the edit history.
pub type Snapshot = RgbImage;

/// Undo was requested with only the base snapshot left.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("There are no more undo actions.")]
pub struct EmptyHistory;

/// Chronological stack of snapshots; the current image is the last one.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    base: Snapshot,
    edits: Vec<Snapshot>,
}

impl HistoryStack {
    /// Start a history seeded with the loaded image.
    pub fn new(base: Snapshot) -> Self {
        Self {
            base,
            edits: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.edits.push(snapshot);
    }

    /// Remove and return the current snapshot, unless it is the base.
    pub fn pop_if_more_than_one(&mut self) -> Result<Snapshot, EmptyHistory> {
        self.edits.pop().ok_or(EmptyHistory)
    }

    /// The current image.
    pub fn top(&self) -> &Snapshot {
        self.edits.last().unwrap_or(&self.base)
    }

    /// Number of snapshots, base included. Always at least 1.
    pub fn len(&self) -> usize {
        self.edits.len() + 1
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}
