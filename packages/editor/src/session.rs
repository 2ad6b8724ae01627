//! # Edit Session Management
//!
//! An `EditSession` is one open document: its state, history, name
//! generator and pending live-typing observations. Sessions are independent
//! of each other; there is no global editor.
//!
//! ## Live typing
//!
//! Text the UI has already rendered is reported with
//! [`EditSession::observe_text`] and queued. Nothing changes until
//! [`EditSession::commit_observations`] turns each observation, in order,
//! into its own `updateText` transaction. Every other entry point that
//! touches history commits the queue first, so an observed edit is never
//! recorded after a transaction that came later.

use std::collections::VecDeque;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::document::{Document, Paragraph};
use crate::intent::{Intent, IntentOutcome};
use crate::names::NameGenerator;
use crate::operations::{Operation, OperationPair};
use crate::post_effects::PostEffectEngine;
use crate::selection::{Position, Selection};
use crate::snapshot::Snapshot;
use crate::state::EditState;
use crate::synthesizer::synthesize;
use crate::text::char_len;
use crate::undo_stack::{Transaction, UndoStack};
use crate::EditorError;

/// Observed paragraph text waiting to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingObservation {
    /// Unique observation ID
    pub id: String,

    pub paragraph: String,

    /// Full text as rendered
    pub text: String,

    /// Cursor offset after the rendered change
    pub cursor_offset: usize,

    /// Cursor offset in the model when the change was observed
    pub cursor_before: usize,
}

/// Single open document with its history
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    state: EditState,
    history: UndoStack,
    names: NameGenerator,
    config: EditorConfig,
    post_effects: PostEffectEngine,
    pending_observations: VecDeque<PendingObservation>,
    observation_count: usize,
}

impl EditSession {
    /// Open a document. A document without paragraphs gets one, outside of
    /// history, so the cursor has a home.
    pub fn new(
        id: impl Into<String>,
        mut document: Document,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        let id = id.into();
        let mut names = match &config.name_seed {
            Some(seed) => NameGenerator::from_seed(seed.clone()),
            None => NameGenerator::new(&id),
        };

        if document.paragraph_count() == 0 {
            let section = document
                .sections()
                .first()
                .map(|s| s.name.clone())
                .ok_or_else(|| EditorError::malformed("a document needs at least one section"))?;
            let name = names.next_name(&document);
            document.insert_paragraph(&section, Paragraph::new(name), 0)?;
        }

        let first = document
            .first_paragraph()
            .map(|p| p.name.clone())
            .ok_or_else(|| EditorError::malformed("document has no paragraphs"))?;
        let selection = Selection::collapsed(Position::new(first, 0));

        debug!(
            session = %id,
            paragraphs = document.paragraph_count(),
            history_limit = config.history_limit,
            "opened session"
        );

        Ok(Self {
            id,
            state: EditState::new(document, selection),
            history: UndoStack::with_max_levels(config.history_limit),
            names,
            config,
            post_effects: PostEffectEngine::new(),
            pending_observations: VecDeque::new(),
            observation_count: 0,
        })
    }

    pub fn from_snapshot(
        id: impl Into<String>,
        snapshot: &Snapshot,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        Self::new(id, Document::from_snapshot(snapshot)?, config)
    }

    /// Open a snapshot file
    pub fn load(
        id: impl Into<String>,
        path: impl AsRef<Path>,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        Self::from_snapshot(id, &Snapshot::read(path)?, config)
    }

    /// Write the current document as a snapshot file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        self.snapshot().write(path)
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.document.snapshot()
    }

    /// Replace the selection; both endpoints must be valid against the
    /// text after pending observations commit
    pub fn set_selection(&mut self, selection: Selection) -> Result<(), EditorError> {
        self.commit_observations()?;
        selection.validate(&self.state.document)?;
        self.state.selection = selection;
        Ok(())
    }

    pub fn set_cursor(&mut self, position: Position) -> Result<(), EditorError> {
        self.set_selection(Selection::collapsed(position))
    }

    /// Synthesize and apply an intent as one transaction
    pub fn apply_intent(&mut self, intent: &Intent) -> Result<IntentOutcome, EditorError> {
        self.commit_observations()?;

        let synthesis = synthesize(
            intent,
            &self.state.document,
            &self.state.selection,
            &mut self.names,
            &self.config,
        )?;

        if synthesis.is_empty() {
            if let Some(cursor) = synthesis.cursor_after {
                self.state.selection.set_cursor(cursor);
            }
            debug!(intent = intent.name(), "intent produced no operations");
            return Ok(self.outcome(0));
        }

        self.record(synthesis.pairs, Some(intent.name()), synthesis.cursor_after)
    }

    /// Apply caller-built operation pairs as one transaction
    pub fn apply(
        &mut self,
        pairs: Vec<OperationPair>,
        description: Option<&str>,
    ) -> Result<IntentOutcome, EditorError> {
        self.commit_observations()?;

        if pairs.is_empty() {
            return Ok(self.outcome(0));
        }
        self.record(pairs, description, None)
    }

    fn record(
        &mut self,
        pairs: Vec<OperationPair>,
        description: Option<&str>,
        cursor_after: Option<Position>,
    ) -> Result<IntentOutcome, EditorError> {
        let selection_before = self.state.selection.clone();

        let applied = self
            .post_effects
            .apply_with_effects(pairs, &mut self.state, &mut self.names)?;

        if let Some(cursor) = cursor_after {
            if self.state.document.contains(&cursor.paragraph) {
                self.state.selection.set_cursor(cursor);
            }
        }

        let count = applied.len();
        let mut transaction =
            Transaction::new(applied, selection_before, self.state.selection.clone());
        if let Some(description) = description {
            transaction = transaction.with_description(description);
        }
        self.history.push(transaction);

        debug!(
            ops = count,
            description = description.unwrap_or(""),
            undo_levels = self.history.undo_levels(),
            "applied transaction"
        );

        Ok(self.outcome(count))
    }

    pub fn undo(&mut self) -> Result<IntentOutcome, EditorError> {
        self.commit_observations()?;
        let count = self.history.undo(&mut self.state)?;
        Ok(self.outcome(count))
    }

    pub fn redo(&mut self) -> Result<IntentOutcome, EditorError> {
        self.commit_observations()?;
        let count = self.history.redo(&mut self.state)?;
        Ok(self.outcome(count))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Queue rendered text for a paragraph. Returns the observation ID.
    pub fn observe_text(
        &mut self,
        paragraph: impl Into<String>,
        text: impl Into<String>,
        cursor_offset: usize,
    ) -> Result<String, EditorError> {
        let paragraph = paragraph.into();
        let current = self
            .state
            .document
            .paragraph(&paragraph)
            .ok_or_else(|| EditorError::malformed(format!("unknown paragraph {paragraph}")))?;

        let cursor_before = if self.state.selection.end.paragraph == paragraph {
            self.state.selection.end.offset
        } else {
            current.len()
        };

        self.observation_count += 1;
        let id = format!("{}-{}", self.id, self.observation_count);

        self.pending_observations.push_back(PendingObservation {
            id: id.clone(),
            paragraph,
            text: text.into(),
            cursor_offset,
            cursor_before,
        });

        Ok(id)
    }

    /// Turn every queued observation into its own transaction, oldest
    /// first. Returns how many were recorded.
    pub fn commit_observations(&mut self) -> Result<usize, EditorError> {
        let mut committed = 0;

        while let Some(observation) = self.pending_observations.pop_front() {
            let Some(current) = self.state.document.paragraph(&observation.paragraph) else {
                warn!(
                    id = %observation.id,
                    paragraph = %observation.paragraph,
                    "dropping observation for a paragraph that no longer exists"
                );
                continue;
            };

            if current.text == observation.text {
                continue;
            }

            let undo_cursor = observation.cursor_before.min(current.len());
            let cursor = observation.cursor_offset.min(char_len(&observation.text));
            let pair = OperationPair::inverting(
                Operation::update_text(observation.paragraph.clone(), observation.text, cursor),
                &self.state.document,
            )?
            .with_undo_cursor(undo_cursor);

            self.record(vec![pair], Some("typing"), None)?;
            committed += 1;
        }

        Ok(committed)
    }

    /// Drop a queued observation without committing it
    pub fn discard_observation(&mut self, id: &str) -> bool {
        let before = self.pending_observations.len();
        self.pending_observations.retain(|o| o.id != id);
        self.pending_observations.len() != before
    }

    /// Get number of pending observations
    pub fn pending_count(&self) -> usize {
        self.pending_observations.len()
    }

    fn outcome(&self, ops_applied: usize) -> IntentOutcome {
        IntentOutcome {
            ops_applied,
            cursor_after: self.state.selection.end.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Section;

    fn session(texts: &[(&str, &str)]) -> EditSession {
        let doc = Document::new(vec![Section::new("main").with_paragraphs(
            texts
                .iter()
                .map(|(name, text)| Paragraph::new(*name).with_text(*text))
                .collect(),
        )])
        .unwrap();
        let config = EditorConfig {
            name_seed: Some("n".into()),
            ..EditorConfig::default()
        };
        EditSession::new("client-1", doc, config).unwrap()
    }

    fn texts(session: &EditSession) -> Vec<&str> {
        session.document().paragraphs().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_session_creation() {
        let session = session(&[("a", "hello")]);
        assert_eq!(session.id, "client-1");
        assert_eq!(session.pending_count(), 0);
        assert_eq!(session.selection(), &Selection::collapsed(Position::new("a", 0)));
    }

    #[test]
    fn test_empty_document_gets_a_paragraph() {
        let doc = Document::new(vec![Section::new("main")]).unwrap();
        let session = EditSession::new("s", doc, EditorConfig::default()).unwrap();

        assert_eq!(session.document().paragraph_count(), 1);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_zero_op_intent_leaves_history_alone() {
        let mut session = session(&[("a", "hello")]);
        let outcome = session.apply_intent(&Intent::Backspace).unwrap();

        assert_eq!(outcome.ops_applied, 0);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_intent_description_is_recorded() {
        let mut session = session(&[("a", "hello")]);
        session.set_cursor(Position::new("a", 5)).unwrap();
        session.apply_intent(&Intent::Enter).unwrap();

        assert_eq!(session.history().undo_description(), Some("enter"));
        session.undo().unwrap();
        assert_eq!(session.history().redo_description(), Some("enter"));
    }

    #[test]
    fn test_set_selection_validates() {
        let mut session = session(&[("a", "hello")]);
        assert!(session.set_cursor(Position::new("a", 6)).is_err());
        assert!(session.set_cursor(Position::new("zzz", 0)).is_err());
        assert_eq!(session.selection(), &Selection::collapsed(Position::new("a", 0)));
    }

    #[test]
    fn test_observations_commit_in_order() {
        let mut session = session(&[("a", "")]);

        session.observe_text("a", "h", 1).unwrap();
        session.observe_text("a", "hi", 2).unwrap();
        assert_eq!(session.pending_count(), 2);
        assert_eq!(texts(&session), vec![""]);

        assert_eq!(session.commit_observations().unwrap(), 2);
        assert_eq!(texts(&session), vec!["hi"]);
        assert_eq!(session.history().undo_levels(), 2);

        session.undo().unwrap();
        assert_eq!(texts(&session), vec!["h"]);
    }

    #[test]
    fn test_intent_flushes_observations_first() {
        let mut session = session(&[("a", "")]);
        session.observe_text("a", "ab", 2).unwrap();
        session.observe_text("a", "abc", 3).unwrap();

        // both observations land before the split
        session.apply_intent(&Intent::Enter).unwrap();

        assert_eq!(texts(&session), vec!["abc", ""]);
        assert_eq!(session.history().undo_levels(), 3);
    }

    #[test]
    fn test_cursor_moves_within_observed_text() {
        let mut session = session(&[("a", "")]);
        session.observe_text("a", "abc", 3).unwrap();

        // offset 2 only exists in the rendered text
        session.set_cursor(Position::new("a", 2)).unwrap();
        assert_eq!(session.pending_count(), 0);
        assert_eq!(texts(&session), vec!["abc"]);

        session.apply_intent(&Intent::Enter).unwrap();
        assert_eq!(texts(&session), vec!["ab", "c"]);
        assert_eq!(session.history().undo_levels(), 2);
    }

    #[test]
    fn test_discard_observation() {
        let mut session = session(&[("a", "")]);
        let id = session.observe_text("a", "x", 1).unwrap();

        assert!(session.discard_observation(&id));
        assert!(!session.discard_observation(&id));
        assert_eq!(session.commit_observations().unwrap(), 0);
        assert_eq!(texts(&session), vec![""]);
    }
}
