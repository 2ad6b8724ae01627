//! # Undo/Redo Stack
//!
//! Tracks transaction history and enables undo/redo.
//!
//! ## Design
//!
//! - Each transaction carries precomputed `{do, undo}` pairs
//! - Undo applies the `undo` halves in reverse and moves the entry to redo
//! - Redo reapplies the `do` halves in order and moves it back
//! - New transactions clear the redo stack
//! - Each entry also remembers the selection on both sides of it
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! stack.push(Transaction::new(pairs, before, after).with_description("enter"));
//!
//! stack.undo(&mut state)?;
//! stack.redo(&mut state)?;
//! ```

use tracing::debug;

use crate::operations::OperationPair;
use crate::selection::Selection;
use crate::state::EditState;
use crate::EditorError;

/// One history entry: operation pairs applied (and undone) together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Operation pairs in application order
    pub pairs: Vec<OperationPair>,

    /// Selection restored by undo
    pub selection_before: Selection,

    /// Selection restored by redo
    pub selection_after: Selection,

    /// Optional description (the intent name for synthesized edits)
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(pairs: Vec<OperationPair>, selection_before: Selection, selection_after: Selection) -> Self {
        Self {
            pairs,
            selection_before,
            selection_after,
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stacks for one session
#[derive(Debug)]
pub struct UndoStack {
    /// Applied transactions (most recent last)
    undo_stack: Vec<Transaction>,

    /// Undone transactions (most recent last)
    redo_stack: Vec<Transaction>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record an applied transaction. Empty transactions are not recorded.
    pub fn push(&mut self, transaction: Transaction) {
        if transaction.pairs.is_empty() {
            return;
        }

        self.undo_stack.push(transaction);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Undo the most recent transaction, returning how many operations
    /// were reverted. The entry stays on the undo stack if it fails.
    pub fn undo(&mut self, state: &mut EditState) -> Result<usize, EditorError> {
        let transaction = self.undo_stack.pop().ok_or(EditorError::EmptyHistory)?;

        if let Err(err) = state.run_backward(&transaction.pairs) {
            self.undo_stack.push(transaction);
            return Err(err.into());
        }

        state.selection = transaction.selection_before.clone();
        let count = transaction.pairs.len();
        debug!(
            ops = count,
            description = transaction.description.as_deref().unwrap_or(""),
            undo_levels = self.undo_stack.len(),
            "undo"
        );

        self.redo_stack.push(transaction);
        Ok(count)
    }

    /// Redo the most recently undone transaction
    pub fn redo(&mut self, state: &mut EditState) -> Result<usize, EditorError> {
        let transaction = self.redo_stack.pop().ok_or(EditorError::EmptyHistory)?;

        if let Err(err) = state.run_forward(&transaction.pairs) {
            self.redo_stack.push(transaction);
            return Err(err.into());
        }

        state.selection = transaction.selection_after.clone();
        let count = transaction.pairs.len();
        debug!(
            ops = count,
            description = transaction.description.as_deref().unwrap_or(""),
            redo_levels = self.redo_stack.len(),
            "redo"
        );

        self.undo_stack.push(transaction);
        Ok(count)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|transaction| transaction.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|transaction| transaction.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Paragraph, Section};
    use crate::operations::Operation;
    use crate::selection::Position;

    fn state() -> EditState {
        let document = Document::new(vec![
            Section::new("main").with_paragraphs(vec![Paragraph::new("p").with_text("Hello")])
        ])
        .unwrap();
        EditState::new(document, Selection::collapsed(Position::new("p", 5)))
    }

    /// Apply a text replacement and record it the way a session does
    fn edit(stack: &mut UndoStack, state: &mut EditState, value: &str) {
        let before = state.selection.clone();
        let pair = OperationPair::inverting(
            Operation::update_text("p", value, value.chars().count()),
            &state.document,
        )
        .unwrap()
        .with_undo_cursor(before.end.offset);
        state.run_forward(std::slice::from_ref(&pair)).unwrap();
        stack.push(Transaction::new(vec![pair], before, state.selection.clone()));
    }

    fn text(state: &EditState) -> &str {
        &state.document.paragraph("p").unwrap().text
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_and_undo_text_update() {
        let mut state = state();
        let mut stack = UndoStack::new();

        edit(&mut stack, &mut state, "World");
        assert_eq!(stack.undo_levels(), 1);
        assert!(stack.can_undo());

        let undone = stack.undo(&mut state).unwrap();
        assert_eq!(undone, 1);
        assert_eq!(text(&state), "Hello");
        assert_eq!(state.selection, Selection::collapsed(Position::new("p", 5)));
        assert_eq!(stack.redo_levels(), 1);

        stack.redo(&mut state).unwrap();
        assert_eq!(text(&state), "World");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_empty_history_is_signalled() {
        let mut state = state();
        let mut stack = UndoStack::new();
        assert!(matches!(stack.undo(&mut state), Err(EditorError::EmptyHistory)));
        assert!(matches!(stack.redo(&mut state), Err(EditorError::EmptyHistory)));
    }

    #[test]
    fn test_new_transaction_clears_redo() {
        let mut state = state();
        let mut stack = UndoStack::new();

        edit(&mut stack, &mut state, "World");
        stack.undo(&mut state).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        edit(&mut stack, &mut state, "Everyone");
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut state = state();
        let mut stack = UndoStack::with_max_levels(2);

        for i in 0..3 {
            edit(&mut stack, &mut state, &format!("Text {i}"));
        }

        assert_eq!(stack.undo_levels(), 2);
        stack.undo(&mut state).unwrap();
        stack.undo(&mut state).unwrap();
        // the oldest entry was dropped, so the first edit stays
        assert_eq!(text(&state), "Text 0");
    }

    #[test]
    fn test_empty_transactions_are_not_recorded() {
        let state = state();
        let mut stack = UndoStack::new();
        stack.push(Transaction::new(
            Vec::new(),
            state.selection.clone(),
            state.selection.clone(),
        ));
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_failed_undo_keeps_entry() {
        let mut state = state();
        let mut stack = UndoStack::new();
        stack.push(
            Transaction::new(
                vec![OperationPair::new(
                    Operation::insert_paragraph("main", "gone", 1),
                    Operation::delete_paragraph("gone"),
                )],
                state.selection.clone(),
                state.selection.clone(),
            )
            .with_description("enter"),
        );

        assert!(stack.undo(&mut state).is_err());
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("enter"));
    }
}
