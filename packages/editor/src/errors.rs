//! Error types for the editor

use thiserror::Error;

use crate::operations::OperationError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Operation error: {0}")]
    Operation(#[from] OperationError),

    #[error("Nothing to undo or redo")]
    EmptyHistory,

    #[error("Malformed intent: {0}")]
    MalformedIntent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    /// `EmptyHistory` is a signal, not a failure: callers may ignore it or
    /// disable the action. Everything else aborts the current step.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EditorError::EmptyHistory)
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        EditorError::MalformedIntent(reason.into())
    }
}
