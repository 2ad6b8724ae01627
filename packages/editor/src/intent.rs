use serde::{Deserialize, Serialize};

use crate::selection::Position;

/// High-level editing requests, as raised by the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    /// Typed characters (no line breaks; Enter is its own intent)
    InsertText { text: String },

    /// Split the paragraph at the cursor, or open a new one after it
    Enter,

    /// Delete backward; merges into the previous paragraph at offset 0
    Backspace,

    /// Delete forward; pulls the next paragraph in at the end of text
    Delete,

    /// Clipboard content, plain text or HTML
    Paste { content: String },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::InsertText { .. } => "insertText",
            Intent::Enter => "enter",
            Intent::Backspace => "backspace",
            Intent::Delete => "delete",
            Intent::Paste { .. } => "paste",
        }
    }
}

/// Result of an intent, undo or redo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentOutcome {
    /// Forward operations applied (0 for cursor-only moves)
    pub ops_applied: usize,

    /// Where the cursor ended up
    pub cursor_after: Position,
}
