//! # Folio Editor
//!
//! Operation and undo/redo engine for structured documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ intent: insertText / enter / backspace /    │
//! │         delete / paste                      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ synthesizer: intent × (document, selection) │
//! │   → ordered {do, undo} operation pairs      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: atomic apply + post-effects        │
//! │   → one history entry per transaction       │
//! │   → selection repositioned                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Inverses are data**: every `undo` half is computed before its `do`
//!    half runs and is stored verbatim
//! 2. **All or nothing**: a failing operation rolls back its transaction
//! 3. **LIFO history**: undo and redo replay whole transactions in order
//! 4. **No globals**: each [`EditSession`] owns its document, selection and
//!    history
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{EditSession, EditorConfig, Intent, Position, Snapshot};
//!
//! let snapshot = Snapshot::read("document.json")?;
//! let mut session = EditSession::from_snapshot("editor-1", &snapshot, EditorConfig::default())?;
//!
//! session.set_cursor(Position::new("p-1", 5))?;
//! session.apply_intent(&Intent::Enter)?;
//! session.undo()?;
//!
//! session.save("document.json")?;
//! ```

mod config;
mod document;
mod errors;
mod intent;
mod names;
mod operations;
mod paste;
mod post_effects;
mod selection;
mod session;
mod snapshot;
mod state;
mod synthesizer;
mod text;
mod undo_stack;

pub use config::{EditorConfig, PasteNewlines};
pub use document::{Document, Location, Paragraph, ParagraphType, Section};
pub use errors::EditorError;
pub use intent::{Intent, IntentOutcome};
pub use names::{session_seed, NameGenerator};
pub use operations::{Operation, OperationError, OperationPair};
pub use paste::sanitize;
pub use post_effects::{EnsureParagraph, PostEffect, PostEffectEngine};
pub use selection::{Position, Selection};
pub use session::{EditSession, PendingObservation};
pub use snapshot::{ParagraphSnapshot, SectionSnapshot, Snapshot};
pub use state::EditState;
pub use synthesizer::{synthesize, Synthesis};
pub use undo_stack::{Transaction, UndoStack};
