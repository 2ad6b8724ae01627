//! # Edit State
//!
//! The document and its single selection, mutated together. Every applied
//! operation also moves the selection:
//!
//! - `updateText` collapses the cursor at its `cursorOffset` (clamped)
//! - `insertParagraph` collapses the cursor at the new paragraph, offset 0
//! - `deleteParagraph` repairs endpoints on the removed paragraph only:
//!   they move to the following paragraph, else the preceding one, offset 0
//!
//! Runs of operations are atomic. If a step fails, the steps already applied
//! are reverted with their paired operations and the selection is restored.

use tracing::warn;

use crate::document::Document;
use crate::operations::{Operation, OperationError, OperationPair};
use crate::selection::{Position, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub document: Document,
    pub selection: Selection,
}

impl EditState {
    pub fn new(document: Document, selection: Selection) -> Self {
        Self {
            document,
            selection,
        }
    }

    /// Apply one operation and move the selection accordingly
    pub fn apply_operation(&mut self, op: &Operation) -> Result<(), OperationError> {
        match op {
            Operation::UpdateText {
                paragraph,
                cursor_offset,
                ..
            } => {
                op.apply(&mut self.document)?;
                let len = self.document.paragraph(paragraph).map_or(0, |p| p.len());
                self.selection
                    .set_cursor(Position::new(paragraph.clone(), (*cursor_offset).min(len)));
            }

            Operation::InsertParagraph { paragraph, .. } => {
                op.apply(&mut self.document)?;
                self.selection.set_cursor(Position::new(paragraph.clone(), 0));
            }

            Operation::DeleteParagraph { paragraph } => {
                let fallback = self
                    .document
                    .next_paragraph(paragraph)
                    .or_else(|| self.document.previous_paragraph(paragraph))
                    .map(|p| p.name.clone());

                op.apply(&mut self.document)?;

                // With no fallback the endpoint stays dangling until a later
                // step in the same run (or the empty-document post-effect)
                // re-targets it.
                if let Some(fallback) = fallback.filter(|_| self.selection.references(paragraph)) {
                    for endpoint in [&mut self.selection.start, &mut self.selection.end] {
                        if endpoint.paragraph == *paragraph {
                            *endpoint = Position::new(fallback.clone(), 0);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Apply the `do` halves in order
    pub fn run_forward(&mut self, pairs: &[OperationPair]) -> Result<(), OperationError> {
        self.run_atomic(pairs.iter().map(|pair| (&pair.forward, &pair.backward)))
    }

    /// Apply the `undo` halves in reverse order
    pub fn run_backward(&mut self, pairs: &[OperationPair]) -> Result<(), OperationError> {
        self.run_atomic(pairs.iter().rev().map(|pair| (&pair.backward, &pair.forward)))
    }

    fn run_atomic<'a>(
        &mut self,
        steps: impl Iterator<Item = (&'a Operation, &'a Operation)>,
    ) -> Result<(), OperationError> {
        let saved_selection = self.selection.clone();
        let mut reverts: Vec<&Operation> = Vec::new();

        for (op, revert) in steps {
            if let Err(err) = self.apply_operation(op) {
                warn!(
                    op = op.name(),
                    paragraph = op.paragraph(),
                    error = %err,
                    rolled_back = reverts.len(),
                    "operation failed, rolling back"
                );

                for revert in reverts.into_iter().rev() {
                    if let Err(rollback_err) = self.apply_operation(revert) {
                        warn!(op = revert.name(), error = %rollback_err, "rollback step failed");
                    }
                }
                self.selection = saved_selection;
                return Err(err);
            }
            reverts.push(revert);
        }

        Ok(())
    }
}
