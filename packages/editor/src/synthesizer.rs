//! # Op Synthesizer
//!
//! Maps an [`Intent`] plus the current document and selection to an ordered
//! list of `{do, undo}` pairs. Applying the `do` halves in order and then the
//! `undo` halves in reverse order leaves the document unchanged.
//!
//! ## Planning against a draft
//!
//! Synthesis works on a scratch copy of the document. Each forward operation
//! has its inverse read from the draft and is then applied to it, so later
//! steps in the same intent see the effect of earlier ones. The inverse of a
//! `deleteParagraph` re-inserts at the paragraph's index *in the draft*,
//! which already excludes the paragraphs this transaction removed before it:
//!
//! ```text
//! [a b c d e], delete b c d then e
//!   b: index 1          (nothing removed yet)
//!   c: index 2 - 1 = 1  (b already gone)
//!   d: index 3 - 2 = 1
//!   e: index 4 - 3 = 1
//! undo in reverse: insert e@1, d@1, c@1, b@1  ->  [a b c d e]
//! ```
//!
//! The same rule covers chained intents (a range deletion followed by a
//! split in one keystroke): the split index is read after the deletions.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::intent::Intent;
use crate::names::NameGenerator;
use crate::operations::{Operation, OperationPair};
use crate::paste::sanitize;
use crate::selection::{Position, Selection};
use crate::text::{char_len, prefix, remove_range, splice, suffix};
use crate::EditorError;

/// Operations for one intent, plus where the caller should put the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub pairs: Vec<OperationPair>,

    /// `None` leaves the selection as it is
    pub cursor_after: Option<Position>,
}

impl Synthesis {
    fn untouched() -> Self {
        Self {
            pairs: Vec::new(),
            cursor_after: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Scratch document that records every operation applied to it
struct Draft {
    doc: Document,
    pairs: Vec<OperationPair>,
}

impl Draft {
    fn new(doc: &Document) -> Self {
        Self {
            doc: doc.clone(),
            pairs: Vec::new(),
        }
    }

    fn push(&mut self, forward: Operation, undo_cursor: Option<usize>) -> Result<(), EditorError> {
        let mut pair = OperationPair::inverting(forward, &self.doc)?;
        if let Some(offset) = undo_cursor {
            pair = pair.with_undo_cursor(offset);
        }
        pair.forward.apply(&mut self.doc)?;
        self.pairs.push(pair);
        Ok(())
    }

    fn text(&self, name: &str) -> Result<String, EditorError> {
        self.doc
            .paragraph(name)
            .map(|p| p.text.clone())
            .ok_or_else(|| EditorError::malformed(format!("unknown paragraph {name}")))
    }

    fn update_text(
        &mut self,
        name: &str,
        value: String,
        cursor: usize,
        undo_cursor: usize,
    ) -> Result<(), EditorError> {
        self.push(Operation::update_text(name, value, cursor), Some(undo_cursor))
    }

    fn insert_paragraph(&mut self, section: &str, name: &str, index: usize) -> Result<(), EditorError> {
        self.push(Operation::insert_paragraph(section, name, index), None)
    }

    /// Clear the text first so the undo side restores it onto the
    /// re-inserted (empty) paragraph
    fn empty_and_delete(&mut self, name: &str, undo_cursor: usize) -> Result<(), EditorError> {
        self.update_text(name, String::new(), 0, undo_cursor)?;
        self.push(Operation::delete_paragraph(name), None)
    }

    fn finish(self, cursor_after: Option<Position>) -> Synthesis {
        Synthesis {
            pairs: self.pairs,
            cursor_after,
        }
    }
}

/// Compile an intent into operation pairs
pub fn synthesize(
    intent: &Intent,
    doc: &Document,
    selection: &Selection,
    names: &mut NameGenerator,
    config: &EditorConfig,
) -> Result<Synthesis, EditorError> {
    selection.validate(doc)?;

    let pasted = match intent {
        Intent::InsertText { text } if text.contains(['\n', '\r']) => {
            return Err(EditorError::malformed(
                "typed text cannot contain line breaks; send Enter instead",
            ));
        }
        Intent::Paste { content } => {
            let text = sanitize(content, config.paste_newlines);
            if text.is_empty() {
                return Ok(Synthesis::untouched());
            }
            Some(text)
        }
        _ => None,
    };

    let mut draft = Draft::new(doc);
    let had_range = selection.is_range();
    let cursor = if had_range {
        delete_range(&mut draft, selection)?
    } else {
        selection.end.clone()
    };

    let cursor_after = match intent {
        Intent::InsertText { text } => Some(insert_text(&mut draft, cursor, text)?),
        Intent::Enter => Some(enter(&mut draft, cursor, names)?),
        Intent::Backspace if had_range => Some(cursor),
        Intent::Delete if had_range => Some(cursor),
        Intent::Backspace => backspace(&mut draft, cursor)?,
        Intent::Delete => delete_forward(&mut draft, cursor)?,
        Intent::Paste { .. } => {
            let text = pasted.unwrap_or_default();
            Some(paste(&mut draft, cursor, &text)?)
        }
    };

    Ok(draft.finish(cursor_after))
}

/// Remove everything between the two selection endpoints; the cursor ends
/// up where the earlier endpoint was
fn delete_range(draft: &mut Draft, selection: &Selection) -> Result<Position, EditorError> {
    let (first, last) = selection.ordered(&draft.doc)?;
    let (first, last) = (first.clone(), last.clone());

    if first.paragraph == last.paragraph {
        let text = draft.text(&first.paragraph)?;
        let value = remove_range(&text, first.offset, last.offset);
        draft.update_text(&first.paragraph, value, first.offset, last.offset)?;
        return Ok(first);
    }

    let between: Vec<(String, usize)> = draft
        .doc
        .paragraphs_between(&first.paragraph, &last.paragraph)
        .into_iter()
        .map(|p| (p.name.clone(), p.len()))
        .collect();

    for (name, len) in &between {
        draft.empty_and_delete(name, *len)?;
    }

    let last_text = draft.text(&last.paragraph)?;
    let tail = suffix(&last_text, last.offset).to_string();
    draft.empty_and_delete(&last.paragraph, last.offset)?;

    let first_text = draft.text(&first.paragraph)?;
    let head = prefix(&first_text, first.offset);
    let offset = char_len(head);
    let value = format!("{head}{tail}");
    draft.update_text(&first.paragraph, value, offset, first.offset)?;

    Ok(Position::new(first.paragraph, offset))
}

fn insert_text(draft: &mut Draft, cursor: Position, text: &str) -> Result<Position, EditorError> {
    if text.is_empty() {
        return Ok(cursor);
    }

    let current = draft.text(&cursor.paragraph)?;
    let value = splice(&current, cursor.offset, text);
    let offset = cursor.offset + char_len(text);
    draft.update_text(&cursor.paragraph, value, offset, cursor.offset)?;

    Ok(Position::new(cursor.paragraph, offset))
}

fn enter(draft: &mut Draft, cursor: Position, names: &mut NameGenerator) -> Result<Position, EditorError> {
    if !cursor.is_at_ending(&draft.doc) {
        let text = draft.text(&cursor.paragraph)?;
        return split(draft, cursor, &text, names);
    }

    if let Some(next) = draft.doc.next_paragraph(&cursor.paragraph) {
        if next.is_placeholder() {
            return Ok(Position::new(next.name.clone(), 0));
        }
    }

    let (section, index) = section_and_index(draft, &cursor.paragraph)?;
    let name = names.next_name(&draft.doc);
    draft.insert_paragraph(&section, &name, index + 1)?;

    Ok(Position::new(name, 0))
}

fn split(
    draft: &mut Draft,
    cursor: Position,
    text: &str,
    names: &mut NameGenerator,
) -> Result<Position, EditorError> {
    let (section, index) = section_and_index(draft, &cursor.paragraph)?;
    let name = names.next_name(&draft.doc);
    let (before, after) = (prefix(text, cursor.offset), suffix(text, cursor.offset));
    let before_len = char_len(before);

    draft.insert_paragraph(&section, &name, index + 1)?;
    draft.update_text(&cursor.paragraph, before.to_string(), before_len, before_len)?;
    draft.update_text(&name, after.to_string(), 0, 0)?;

    Ok(Position::new(name, 0))
}

fn backspace(draft: &mut Draft, cursor: Position) -> Result<Option<Position>, EditorError> {
    if !cursor.is_at_beginning() {
        let text = draft.text(&cursor.paragraph)?;
        let value = remove_range(&text, cursor.offset - 1, cursor.offset);
        draft.update_text(&cursor.paragraph, value, cursor.offset - 1, cursor.offset)?;
        return Ok(Some(Position::new(cursor.paragraph, cursor.offset - 1)));
    }

    let Some(previous) = draft.doc.previous_paragraph(&cursor.paragraph) else {
        return Ok(None);
    };
    let previous = previous.name.clone();

    merge(draft, &previous, &cursor.paragraph).map(Some)
}

fn delete_forward(draft: &mut Draft, cursor: Position) -> Result<Option<Position>, EditorError> {
    if !cursor.is_at_ending(&draft.doc) {
        let text = draft.text(&cursor.paragraph)?;
        let value = remove_range(&text, cursor.offset, cursor.offset + 1);
        draft.update_text(&cursor.paragraph, value, cursor.offset, cursor.offset)?;
        return Ok(Some(cursor));
    }

    let Some(next) = draft.doc.next_paragraph(&cursor.paragraph) else {
        return Ok(None);
    };
    let next = next.name.clone();

    merge(draft, &cursor.paragraph, &next).map(Some)
}

/// Pull `absorbed` onto the end of `absorbing`; the cursor lands at the seam
fn merge(draft: &mut Draft, absorbing: &str, absorbed: &str) -> Result<Position, EditorError> {
    let absorbing_text = draft.text(absorbing)?;
    let absorbed_text = draft.text(absorbed)?;
    let offset = char_len(&absorbing_text);

    draft.empty_and_delete(absorbed, 0)?;
    draft.update_text(
        absorbing,
        format!("{absorbing_text}{absorbed_text}"),
        offset,
        offset,
    )?;

    Ok(Position::new(absorbing, offset))
}

fn paste(draft: &mut Draft, cursor: Position, pasted: &str) -> Result<Position, EditorError> {
    let current = draft.text(&cursor.paragraph)?;
    let head = prefix(&current, cursor.offset);
    let offset = (char_len(head) + char_len(pasted)).saturating_sub(1);
    let value = format!("{head}{pasted}{}", suffix(&current, cursor.offset));

    draft.update_text(&cursor.paragraph, value, offset, cursor.offset)?;

    Ok(Position::new(cursor.paragraph, offset))
}

fn section_and_index(draft: &Draft, paragraph: &str) -> Result<(String, usize), EditorError> {
    let loc = draft
        .doc
        .locate(paragraph)
        .ok_or_else(|| EditorError::malformed(format!("unknown paragraph {paragraph}")))?;
    Ok((draft.doc.sections()[loc.section].name.clone(), loc.index))
}
