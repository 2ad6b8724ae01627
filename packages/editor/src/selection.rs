//! # Selection Cursor Model
//!
//! Two endpoints, each a paragraph name plus a code-point offset. `start` is
//! where the user anchored and `end` where they extended to, so `start` may
//! come after `end` in reading order. Range logic goes through
//! [`Selection::ordered`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::EditorError;

/// A point in the document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Paragraph name (a reference, not ownership)
    pub paragraph: String,

    /// Code-point offset into the paragraph text
    pub offset: usize,
}

impl Position {
    pub fn new(paragraph: impl Into<String>, offset: usize) -> Self {
        Self {
            paragraph: paragraph.into(),
            offset,
        }
    }

    pub fn is_at_beginning(&self) -> bool {
        self.offset == 0
    }

    /// At or past the last code point of its paragraph
    pub fn is_at_ending(&self, doc: &Document) -> bool {
        doc.paragraph(&self.paragraph)
            .is_some_and(|p| self.offset >= p.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A caret: both endpoints at one position
    pub fn collapsed(position: Position) -> Self {
        Self {
            start: position.clone(),
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn is_range(&self) -> bool {
        !self.is_collapsed()
    }

    pub fn set_cursor(&mut self, position: Position) {
        *self = Selection::collapsed(position);
    }

    /// Whether either endpoint references `paragraph`
    pub fn references(&self, paragraph: &str) -> bool {
        self.start.paragraph == paragraph || self.end.paragraph == paragraph
    }

    /// Check both endpoints point into existing paragraphs at valid offsets
    pub fn validate(&self, doc: &Document) -> Result<(), EditorError> {
        for endpoint in [&self.start, &self.end] {
            let paragraph = doc.paragraph(&endpoint.paragraph).ok_or_else(|| {
                EditorError::malformed(format!(
                    "selection references unknown paragraph {}",
                    endpoint.paragraph
                ))
            })?;

            if endpoint.offset > paragraph.len() {
                return Err(EditorError::malformed(format!(
                    "offset {} is past the end of paragraph {} ({} code points)",
                    endpoint.offset,
                    endpoint.paragraph,
                    paragraph.len()
                )));
            }
        }
        Ok(())
    }

    /// Endpoints sorted by reading order: section, paragraph index, offset
    pub fn ordered(&self, doc: &Document) -> Result<(&Position, &Position), EditorError> {
        self.validate(doc)?;

        let order = doc
            .compare(&self.start.paragraph, &self.end.paragraph)
            .unwrap_or(Ordering::Equal)
            .then(self.start.offset.cmp(&self.end.offset));

        Ok(match order {
            Ordering::Greater => (&self.end, &self.start),
            _ => (&self.start, &self.end),
        })
    }
}
