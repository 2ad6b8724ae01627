//! JSON snapshot of a document: the wire and file representation.
//!
//! ```json
//! { "sections": [ { "name": "main",
//!     "paragraphs": [ { "name": "p-1", "type": "paragraph", "text": "Hello" } ] } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::{Document, Paragraph, ParagraphType, Section};
use crate::EditorError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sections: Vec<SectionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSnapshot {
    pub name: String,
    #[serde(default)]
    pub paragraphs: Vec<ParagraphSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphSnapshot {
    pub name: String,

    #[serde(rename = "type", default)]
    pub paragraph_type: ParagraphType,

    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_text: Option<String>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Document {
    /// Field-for-field picture of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sections: self
                .sections()
                .iter()
                .map(|section| SectionSnapshot {
                    name: section.name.clone(),
                    paragraphs: section
                        .paragraphs()
                        .iter()
                        .map(|p| ParagraphSnapshot {
                            name: p.name.clone(),
                            paragraph_type: p.paragraph_type,
                            text: p.text.clone(),
                            placeholder_text: p.placeholder_text.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Build a document from a snapshot, validating names
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, EditorError> {
        let sections = snapshot
            .sections
            .iter()
            .map(|section| {
                Section::new(section.name.clone()).with_paragraphs(
                    section
                        .paragraphs
                        .iter()
                        .map(|p| {
                            let mut paragraph = Paragraph::new(p.name.clone())
                                .with_text(p.text.clone())
                                .with_type(p.paragraph_type);
                            paragraph.placeholder_text = p.placeholder_text.clone();
                            paragraph
                        })
                        .collect(),
                )
            })
            .collect();

        Document::new(sections)
    }
}
