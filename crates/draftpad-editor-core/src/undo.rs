//! Undo/redo management for editor state.
//!
//! Provides:
//! - `UndoManager` trait for abstracting undo implementations
//! - `History` - bounded stacks of whole `ContentState` snapshots

use crate::content::ContentState;

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Perform undo. Returns true if successful.
    fn undo(&mut self) -> bool;

    /// Perform redo. Returns true if successful.
    fn redo(&mut self) -> bool;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);
}

/// Undo and redo stacks of whole content snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    undo_stack: Vec<ContentState>,
    redo_stack: Vec<ContentState>,
    max_steps: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    /// Create empty history keeping at most `max_steps` undo entries.
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Record `content` as an undo boundary.
    pub fn record(&mut self, content: ContentState) {
        self.undo_stack.push(content);

        // Trim if over max
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }

    /// Drop all redo entries (any new edit invalidates them).
    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    /// Pop the previous content, parking `current` for redo.
    pub fn step_back(&mut self, current: ContentState) -> Option<ContentState> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Pop the next content, parking `current` for undo.
    pub fn step_forward(&mut self, current: ContentState) -> Option<ContentState> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> ContentState {
        ContentState::from_text(text)
    }

    #[test]
    fn test_record_and_step_back() {
        let mut history = History::new(100);
        assert!(!history.can_undo());

        history.record(doc("hello"));
        assert!(history.can_undo());

        let previous = history.step_back(doc("hello world")).unwrap();
        assert_eq!(previous.plain_text(), "hello");
        assert!(!history.can_undo());
        assert!(history.can_redo());

        let next = history.step_forward(previous).unwrap();
        assert_eq!(next.plain_text(), "hello world");
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_redo() {
        let mut history = History::new(100);
        history.record(doc("abc"));
        history.step_back(doc("abcd"));
        assert!(history.can_redo());

        history.clear_redo();
        assert!(!history.can_redo());
    }

    #[test]
    fn test_max_steps() {
        let mut history = History::new(3);
        for text in ["a", "ab", "abc", "abcd"] {
            history.record(doc(text)); // "a" gets evicted
        }
        assert_eq!(history.undo_len(), 3);

        let mut current = doc("abcde");
        let mut seen = Vec::new();
        while let Some(previous) = history.step_back(current.clone()) {
            seen.push(previous.plain_text());
            current = previous;
        }
        assert_eq!(seen, vec!["abcd", "abc", "ab"]);
    }

    #[test]
    fn test_empty_stacks() {
        let mut history = History::default();
        assert!(history.step_back(doc("x")).is_none());
        assert!(history.step_forward(doc("x")).is_none());
        assert!(!history.can_redo());
    }
}
