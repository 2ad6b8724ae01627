//! # Operation Primitives
//!
//! The three atomic edits every higher-level intent compiles down to.
//!
//! ## Design Principles
//!
//! 1. **Self-contained**: Each operation carries everything needed to replay it
//! 2. **Validated**: Structural constraints are checked before anything changes
//! 3. **Paired**: Operations travel as `{do, undo}` pairs; the undo half is
//!    precomputed data, never recomputed at undo time
//!
//! ## Operation Semantics
//!
//! ### InsertParagraph
//! - Inserts an empty paragraph at `index` of `section`
//! - Fails on an out-of-range index or a name already in the document
//!
//! ### DeleteParagraph
//! - Removes the named paragraph from whichever section owns it
//! - Section and index are not stored; the paired insert carries them
//!
//! ### UpdateText
//! - Atomic replacement of the full text (not a diff)
//! - `cursor_offset` is where the cursor lands once applied

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, Paragraph, ParagraphType};
use crate::text::char_len;

/// Atomic, independently invertible document edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    /// Insert an empty paragraph
    #[serde(rename_all = "camelCase")]
    InsertParagraph {
        section: String,
        paragraph: String,
        index: usize,

        /// Restored styling when this re-creates a deleted paragraph
        #[serde(default)]
        paragraph_type: ParagraphType,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder_text: Option<String>,
    },

    /// Remove a paragraph from its section
    DeleteParagraph { paragraph: String },

    /// Replace a paragraph's text (atomic replacement)
    #[serde(rename_all = "camelCase")]
    UpdateText {
        paragraph: String,
        value: String,
        cursor_offset: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("Invalid index {index} (section holds {len} paragraphs)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Duplicate paragraph name: {0}")]
    DuplicateName(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Operation {
    /// Plain insert with default styling
    pub fn insert_paragraph(
        section: impl Into<String>,
        paragraph: impl Into<String>,
        index: usize,
    ) -> Self {
        Operation::InsertParagraph {
            section: section.into(),
            paragraph: paragraph.into(),
            index,
            paragraph_type: ParagraphType::default(),
            placeholder_text: None,
        }
    }

    pub fn delete_paragraph(paragraph: impl Into<String>) -> Self {
        Operation::DeleteParagraph {
            paragraph: paragraph.into(),
        }
    }

    pub fn update_text(
        paragraph: impl Into<String>,
        value: impl Into<String>,
        cursor_offset: usize,
    ) -> Self {
        Operation::UpdateText {
            paragraph: paragraph.into(),
            value: value.into(),
            cursor_offset,
        }
    }

    /// Name of the paragraph this operation targets
    pub fn paragraph(&self) -> &str {
        match self {
            Operation::InsertParagraph { paragraph, .. }
            | Operation::DeleteParagraph { paragraph }
            | Operation::UpdateText { paragraph, .. } => paragraph,
        }
    }

    /// Debug name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::InsertParagraph { .. } => "insertParagraph",
            Operation::DeleteParagraph { .. } => "deleteParagraph",
            Operation::UpdateText { .. } => "updateText",
        }
    }

    /// Apply to the document with validation
    pub fn apply(&self, doc: &mut Document) -> Result<(), OperationError> {
        self.validate(doc)?;

        match self {
            Operation::InsertParagraph {
                section,
                paragraph,
                index,
                paragraph_type,
                placeholder_text,
            } => {
                let mut new_paragraph = Paragraph::new(paragraph.clone()).with_type(*paragraph_type);
                new_paragraph.placeholder_text = placeholder_text.clone();
                doc.insert_paragraph(section, new_paragraph, *index)
            }

            Operation::DeleteParagraph { paragraph } => {
                doc.remove_paragraph(paragraph)?;
                Ok(())
            }

            Operation::UpdateText { paragraph, value, .. } => {
                doc.set_text(paragraph, value)?;
                Ok(())
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), OperationError> {
        match self {
            Operation::InsertParagraph {
                section,
                paragraph,
                index,
                ..
            } => {
                if doc.contains(paragraph) {
                    return Err(OperationError::DuplicateName(paragraph.clone()));
                }

                let len = doc
                    .section(section)
                    .ok_or_else(|| OperationError::NotFound(section.clone()))?
                    .len();

                if *index > len {
                    return Err(OperationError::InvalidIndex { index: *index, len });
                }

                Ok(())
            }

            Operation::DeleteParagraph { paragraph } | Operation::UpdateText { paragraph, .. } => {
                if doc.contains(paragraph) {
                    Ok(())
                } else {
                    Err(OperationError::NotFound(paragraph.clone()))
                }
            }
        }
    }

    /// Build the operation that reverses this one, read against the document
    /// state right before this operation is applied.
    ///
    /// A restoring `UpdateText` places the cursor at the end of the restored
    /// text; callers that need another offset override it with
    /// [`OperationPair::with_undo_cursor`].
    pub fn to_inverse(&self, doc: &Document) -> Result<Operation, OperationError> {
        self.validate(doc)?;

        match self {
            Operation::InsertParagraph { paragraph, .. } => {
                Ok(Operation::delete_paragraph(paragraph.clone()))
            }

            Operation::DeleteParagraph { paragraph } => {
                let loc = doc
                    .locate(paragraph)
                    .ok_or_else(|| OperationError::NotFound(paragraph.clone()))?;
                let section = &doc.sections()[loc.section];
                let existing = &section.paragraphs()[loc.index];

                Ok(Operation::InsertParagraph {
                    section: section.name.clone(),
                    paragraph: paragraph.clone(),
                    index: loc.index,
                    paragraph_type: existing.paragraph_type,
                    placeholder_text: existing.placeholder_text.clone(),
                })
            }

            Operation::UpdateText { paragraph, .. } => {
                let previous = doc
                    .paragraph(paragraph)
                    .ok_or_else(|| OperationError::NotFound(paragraph.clone()))?;

                Ok(Operation::update_text(
                    paragraph.clone(),
                    previous.text.clone(),
                    char_len(&previous.text),
                ))
            }
        }
    }
}

/// A `{do, undo}` record, the fundamental unit of history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationPair {
    #[serde(rename = "do")]
    pub forward: Operation,

    #[serde(rename = "undo")]
    pub backward: Operation,
}

impl OperationPair {
    pub fn new(forward: Operation, backward: Operation) -> Self {
        Self { forward, backward }
    }

    /// Pair an operation with its inverse computed against `doc`
    pub fn inverting(forward: Operation, doc: &Document) -> Result<Self, OperationError> {
        let backward = forward.to_inverse(doc)?;
        Ok(Self { forward, backward })
    }

    /// Set the cursor offset the undo half restores (only meaningful for
    /// `UpdateText`)
    pub fn with_undo_cursor(mut self, offset: usize) -> Self {
        if let Operation::UpdateText { cursor_offset, .. } = &mut self.backward {
            *cursor_offset = offset;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Section;

    fn doc() -> Document {
        Document::new(vec![Section::new("main").with_paragraphs(vec![
            Paragraph::new("a").with_text("foo"),
            Paragraph::new("b")
                .with_type(ParagraphType::MainHeader)
                .with_placeholder("Title"),
        ])])
        .unwrap()
    }

    #[test]
    fn test_operation_serialization() {
        let op = Operation::update_text("p-1", "Hello World", 5);

        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(
            json,
            r#"{"op":"updateText","paragraph":"p-1","value":"Hello World","cursorOffset":5}"#
        );

        let deserialized: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, deserialized);
    }

    #[test]
    fn test_pair_serializes_as_do_undo() {
        let pair = OperationPair::new(
            Operation::insert_paragraph("main", "x", 0),
            Operation::delete_paragraph("x"),
        );
        let value = serde_json::to_value(&pair).unwrap();
        assert_eq!(value["do"]["op"], "insertParagraph");
        assert_eq!(value["undo"]["op"], "deleteParagraph");
    }

    #[test]
    fn test_validation_rejects_missing_paragraph() {
        let doc = doc();
        let op = Operation::update_text("", "test", 0);
        assert_eq!(op.validate(&doc), Err(OperationError::NotFound(String::new())));
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut doc = doc();
        let op = Operation::insert_paragraph("main", "x", 3);
        assert_eq!(
            op.apply(&mut doc),
            Err(OperationError::InvalidIndex { index: 3, len: 2 })
        );
        assert_eq!(doc.paragraph_count(), 2);
    }

    #[test]
    fn test_delete_inverse_restores_metadata() {
        let mut doc = doc();
        let before = doc.clone();

        let pair = OperationPair::inverting(Operation::delete_paragraph("b"), &doc).unwrap();
        pair.forward.apply(&mut doc).unwrap();
        assert!(!doc.contains("b"));

        pair.backward.apply(&mut doc).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_text_inverse_is_snapshot() {
        let mut doc = doc();
        let pair = OperationPair::inverting(Operation::update_text("a", "foobar", 6), &doc)
            .unwrap()
            .with_undo_cursor(1);

        assert_eq!(pair.backward, Operation::update_text("a", "foo", 1));

        pair.forward.apply(&mut doc).unwrap();
        assert_eq!(doc.paragraph("a").unwrap().text, "foobar");
        pair.backward.apply(&mut doc).unwrap();
        assert_eq!(doc.paragraph("a").unwrap().text, "foo");
    }
}
