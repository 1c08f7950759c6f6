//! Undo/redo history for the boundary being drawn
//!
//! Every committed step stores a full snapshot of the vertex list rather than
//! a delta. Boundaries rarely have more than a few dozen vertices, so
//! snapshots keep undo trivially correct.
//!
//! The history is linear: committing a new step while some steps are undone
//! discards those undone steps.

use crate::point::{NormalizedPoint, Polygon};

/// Default number of snapshots kept before the oldest are dropped
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// One committed step: the vertex list after the step, plus what the step was
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    points: Polygon,
    description: String,
}

impl HistoryEntry {
    pub fn new(points: Polygon, description: impl Into<String>) -> Self {
        Self {
            points,
            description: description.into(),
        }
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    /// Human-readable description (for UI display)
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Linear snapshot history with a cursor
///
/// `index` is `None` only while the history is empty; otherwise it points at
/// the entry matching the current vertex list.
#[derive(Clone, Debug)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    index: Option<usize>,
    max_depth: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Record a committed step
    ///
    /// Drops any undone entries ahead of the cursor, appends the snapshot and
    /// moves the cursor onto it.
    pub fn push(&mut self, entry: HistoryEntry) {
        match self.index {
            Some(index) => self.entries.truncate(index + 1),
            None => self.entries.clear(),
        }

        self.entries.push(entry);

        if self.entries.len() > self.max_depth {
            let excess = self.entries.len() - self.max_depth;
            self.entries.drain(0..excess);
        }

        self.index = Some(self.entries.len() - 1);
    }

    /// Step back one entry
    ///
    /// Returns the entry that is now current, or `None` when there is nothing
    /// older to go back to. Undo never moves before the oldest entry.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        match self.index {
            Some(index) if index > 0 => {
                self.index = Some(index - 1);
                self.entries.get(index - 1)
            }
            _ => None,
        }
    }

    /// Step forward one entry, if one was undone
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let next = self.index.map_or(0, |index| index + 1);
        if next < self.entries.len() {
            self.index = Some(next);
            self.entries.get(next)
        } else {
            None
        }
    }

    /// The entry matching the current state
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.and_then(|index| self.entries.get(index))
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(index) if index > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |index| index + 1) < self.entries.len()
    }

    /// Description of the step that `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        if self.can_undo() {
            self.current().map(HistoryEntry::description)
        } else {
            None
        }
    }

    /// Description of the step that `redo` would re-apply
    pub fn redo_description(&self) -> Option<&str> {
        let next = self.index.map_or(0, |index| index + 1);
        self.entries.get(next).map(HistoryEntry::description)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }

    /// Change the depth limit, dropping the oldest entries if needed
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);

        if self.entries.len() > self.max_depth {
            let excess = self.entries.len() - self.max_depth;
            self.entries.drain(0..excess);
            self.index = self.index.map(|index| index.saturating_sub(excess));
        }
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(n: usize) -> HistoryEntry {
        let points = (0..n)
            .map(|i| NormalizedPoint::new(i as f64 * 0.1, 0.5))
            .collect();
        HistoryEntry::new(points, format!("Step {}", n))
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = HistoryStack::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
        assert_eq!(history.index(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_undo_redo() {
        let mut history = HistoryStack::new();
        history.push(snapshot(1));
        history.push(snapshot(2));

        assert_eq!(history.undo(), Some(&snapshot(1)));
        assert_eq!(history.redo(), Some(&snapshot(2)));
        assert_eq!(history.current(), Some(&snapshot(2)));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_stops_at_oldest_entry() {
        let mut history = HistoryStack::new();
        history.push(snapshot(1));
        history.push(snapshot(2));

        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
        assert!(history.undo().is_none());
        assert_eq!(history.current(), Some(&snapshot(1)));
        assert_eq!(history.index(), Some(0));
    }

    #[test]
    fn test_push_discards_redo_entries() {
        let mut history = HistoryStack::new();
        for n in 1..=4 {
            history.push(snapshot(n));
        }
        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.push(snapshot(7));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&snapshot(7)));

        history.undo();
        assert_eq!(history.current(), Some(&snapshot(2)));
    }

    #[test]
    fn test_descriptions() {
        let mut history = HistoryStack::new();
        history.push(snapshot(1));
        assert_eq!(history.undo_description(), None);

        history.push(snapshot(2));
        assert_eq!(history.undo_description(), Some("Step 2"));
        assert_eq!(history.redo_description(), None);

        history.undo();
        assert_eq!(history.redo_description(), Some("Step 2"));
    }

    #[test]
    fn test_max_depth() {
        let mut history = HistoryStack::with_max_depth(3);
        for n in 1..=5 {
            history.push(snapshot(n));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&snapshot(5)));
        history.undo();
        history.undo();
        assert!(history.undo().is_none());
        assert_eq!(history.current(), Some(&snapshot(3)));
    }

    #[test]
    fn test_set_max_depth_keeps_cursor_valid() {
        let mut history = HistoryStack::new();
        for n in 1..=6 {
            history.push(snapshot(n));
        }
        history.undo();

        history.set_max_depth(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&snapshot(5)));
        assert!(history.can_redo());
    }
}
