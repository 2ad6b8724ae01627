//! # Document Model
//!
//! An ordered tree: the document owns sections, each section owns an ordered
//! list of paragraphs. Position inside a section is implicit (list index),
//! so there are no next/previous links to keep in sync across deletes.
//!
//! ```text
//! Document
//!   ├─ Section "main"
//!   │    ├─ Paragraph "p-1"  (index 0)
//!   │    └─ Paragraph "p-2"  (index 1)
//!   └─ Section "notes"
//!        └─ Paragraph "p-3"  (index 0)
//! ```
//!
//! Reading order is section order, then paragraph index.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::operations::OperationError;
use crate::EditorError;

/// Paragraph styling relevant to operation shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParagraphType {
    #[default]
    Paragraph,
    MainHeader,
    SecondaryHeader,
    ThirdHeader,
}

/// A single paragraph of plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Unique, immutable name
    pub name: String,

    /// Plain text content
    pub text: String,

    pub paragraph_type: ParagraphType,

    /// Hint shown while the paragraph is empty
    pub placeholder_text: Option<String>,

    /// Name of the owning section (back-reference, kept in sync on insert)
    pub section: String,
}

impl Paragraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            paragraph_type: ParagraphType::default(),
            placeholder_text: None,
            section: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_type(mut self, paragraph_type: ParagraphType) -> Self {
        self.paragraph_type = paragraph_type;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder_text = Some(placeholder.into());
        self
    }

    /// Length of the text in code points
    pub fn len(&self) -> usize {
        crate::text::char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Empty and carrying hint text
    pub fn is_placeholder(&self) -> bool {
        self.text.is_empty()
            && self
                .placeholder_text
                .as_deref()
                .is_some_and(|hint| !hint.is_empty())
    }
}

/// Ordered container of paragraphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    paragraphs: Vec<Paragraph>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paragraphs: Vec::new(),
        }
    }

    pub fn with_paragraphs(mut self, paragraphs: Vec<Paragraph>) -> Self {
        for mut paragraph in paragraphs {
            paragraph.section = self.name.clone();
            self.paragraphs.push(paragraph);
        }
        self
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Where a paragraph sits: section index, then paragraph index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub section: usize,
    pub index: usize,
}

/// The paragraph tree of one open article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    /// Build a document, rejecting duplicate paragraph names or an empty
    /// section list
    pub fn new(sections: Vec<Section>) -> Result<Self, EditorError> {
        if sections.is_empty() {
            return Err(EditorError::malformed("a document needs at least one section"));
        }

        let mut seen = HashSet::new();
        for paragraph in sections.iter().flat_map(|s| s.paragraphs.iter()) {
            if !seen.insert(paragraph.name.as_str()) {
                return Err(OperationError::DuplicateName(paragraph.name.clone()).into());
            }
        }

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// All paragraphs in reading order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.sections.iter().flat_map(|s| s.paragraphs.iter())
    }

    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    pub fn first_paragraph(&self) -> Option<&Paragraph> {
        self.paragraphs().next()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    pub fn locate(&self, name: &str) -> Option<Location> {
        self.sections.iter().enumerate().find_map(|(section, s)| {
            s.paragraphs
                .iter()
                .position(|p| p.name == name)
                .map(|index| Location { section, index })
        })
    }

    pub fn paragraph(&self, name: &str) -> Option<&Paragraph> {
        self.locate(name).map(|loc| self.paragraph_at(loc))
    }

    fn paragraph_at(&self, loc: Location) -> &Paragraph {
        &self.sections[loc.section].paragraphs[loc.index]
    }

    /// Paragraph following `name` in reading order, crossing sections
    pub fn next_paragraph(&self, name: &str) -> Option<&Paragraph> {
        let loc = self.locate(name)?;
        self.sections[loc.section]
            .paragraphs
            .get(loc.index + 1)
            .or_else(|| {
                self.sections[loc.section + 1..]
                    .iter()
                    .find_map(|s| s.paragraphs.first())
            })
    }

    /// Paragraph preceding `name` in reading order, crossing sections
    pub fn previous_paragraph(&self, name: &str) -> Option<&Paragraph> {
        let loc = self.locate(name)?;
        if loc.index > 0 {
            return Some(&self.sections[loc.section].paragraphs[loc.index - 1]);
        }
        self.sections[..loc.section]
            .iter()
            .rev()
            .find_map(|s| s.paragraphs.last())
    }

    /// Paragraphs strictly between two paragraphs, in reading order.
    /// Argument order does not matter.
    pub fn paragraphs_between(&self, a: &str, b: &str) -> Vec<&Paragraph> {
        let (Some(la), Some(lb)) = (self.locate(a), self.locate(b)) else {
            return Vec::new();
        };
        let (from, to) = if la <= lb { (la, lb) } else { (lb, la) };

        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, s)| {
                s.paragraphs
                    .iter()
                    .enumerate()
                    .map(move |(index, p)| (Location { section, index }, p))
            })
            .filter(|(loc, _)| *loc > from && *loc < to)
            .map(|(_, p)| p)
            .collect()
    }

    /// Compare two paragraphs by reading order
    pub fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        Some(self.locate(a)?.cmp(&self.locate(b)?))
    }

    pub(crate) fn insert_paragraph(
        &mut self,
        section_name: &str,
        mut paragraph: Paragraph,
        index: usize,
    ) -> Result<(), OperationError> {
        if self.contains(&paragraph.name) {
            return Err(OperationError::DuplicateName(paragraph.name));
        }

        let section = self
            .sections
            .iter_mut()
            .find(|s| s.name == section_name)
            .ok_or_else(|| OperationError::NotFound(section_name.to_string()))?;

        if index > section.paragraphs.len() {
            return Err(OperationError::InvalidIndex {
                index,
                len: section.paragraphs.len(),
            });
        }

        paragraph.section = section.name.clone();
        section.paragraphs.insert(index, paragraph);
        Ok(())
    }

    pub(crate) fn remove_paragraph(
        &mut self,
        name: &str,
    ) -> Result<(Location, Paragraph), OperationError> {
        let loc = self
            .locate(name)
            .ok_or_else(|| OperationError::NotFound(name.to_string()))?;
        let paragraph = self.sections[loc.section].paragraphs.remove(loc.index);
        Ok((loc, paragraph))
    }

    /// Replace a paragraph's text, returning the previous text
    pub(crate) fn set_text(&mut self, name: &str, value: &str) -> Result<String, OperationError> {
        let loc = self
            .locate(name)
            .ok_or_else(|| OperationError::NotFound(name.to_string()))?;
        let paragraph = &mut self.sections[loc.section].paragraphs[loc.index];
        Ok(std::mem::replace(&mut paragraph.text, value.to_string()))
    }
}
