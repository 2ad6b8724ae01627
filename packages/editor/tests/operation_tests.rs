//! Operation primitives and the identity law for synthesized pairs

use folio_editor::{
    synthesize, Document, EditorConfig, Intent, NameGenerator, Operation, OperationError,
    OperationPair, Paragraph, ParagraphType, Position, Section, Selection,
};

fn sample() -> Document {
    Document::new(vec![
        Section::new("head").with_paragraphs(vec![Paragraph::new("h1")
            .with_text("Über")
            .with_type(ParagraphType::MainHeader)]),
        Section::new("body").with_paragraphs(vec![
            Paragraph::new("a").with_text("ab"),
            Paragraph::new("b"),
            Paragraph::new("c").with_text("🦀x"),
        ]),
        Section::new("tail").with_paragraphs(vec![
            Paragraph::new("d").with_placeholder("Add a note")
        ]),
    ])
    .unwrap()
}

fn intents() -> Vec<Intent> {
    vec![
        Intent::InsertText { text: "é".into() },
        Intent::InsertText { text: String::new() },
        Intent::Enter,
        Intent::Backspace,
        Intent::Delete,
        Intent::Paste { content: "<em>pasted</em>\nline".into() },
    ]
}

/// Every caret position in the sample document
fn carets(doc: &Document) -> Vec<Position> {
    doc.paragraphs()
        .flat_map(|p| (0..=p.len()).map(move |offset| Position::new(p.name.clone(), offset)))
        .collect()
}

fn run_identity(doc: &Document, selection: &Selection, intent: &Intent) {
    let mut names = NameGenerator::from_seed("t");
    let synthesis = synthesize(intent, doc, selection, &mut names, &EditorConfig::default())
        .unwrap_or_else(|err| panic!("{intent:?} at {selection:?}: {err}"));

    let mut scratch = doc.clone();
    for pair in &synthesis.pairs {
        pair.forward.apply(&mut scratch).unwrap();
    }
    if let Some(cursor) = &synthesis.cursor_after {
        let target = scratch
            .paragraph(&cursor.paragraph)
            .unwrap_or_else(|| panic!("{intent:?}: cursor in missing paragraph"));
        assert!(cursor.offset <= target.len());
    }

    for pair in synthesis.pairs.iter().rev() {
        pair.backward.apply(&mut scratch).unwrap();
    }
    assert_eq!(&scratch, doc, "{intent:?} at {selection:?}");
}

#[test]
fn test_identity_law_for_every_caret() {
    let doc = sample();
    for caret in carets(&doc) {
        let selection = Selection::collapsed(caret);
        for intent in intents() {
            run_identity(&doc, &selection, &intent);
        }
    }
}

#[test]
fn test_identity_law_for_every_range() {
    let doc = sample();
    let positions = carets(&doc);
    for start in &positions {
        for end in &positions {
            let selection = Selection::new(start.clone(), end.clone());
            for intent in intents() {
                run_identity(&doc, &selection, &intent);
            }
        }
    }
}

#[test]
fn test_update_text_operation() {
    let mut doc = sample();
    Operation::update_text("a", "changed", 3)
        .apply(&mut doc)
        .unwrap();
    assert_eq!(doc.paragraph("a").unwrap().text, "changed");
}

#[test]
fn test_insert_paragraph_operation() {
    let mut doc = sample();
    Operation::insert_paragraph("tail", "e", 1)
        .apply(&mut doc)
        .unwrap();

    let inserted = doc.paragraph("e").unwrap();
    assert!(inserted.is_empty());
    assert_eq!(inserted.section, "tail");
    assert_eq!(doc.next_paragraph("d").unwrap().name, "e");
}

#[test]
fn test_structural_errors() {
    let mut doc = sample();

    assert_eq!(
        Operation::insert_paragraph("body", "x", 4).apply(&mut doc),
        Err(OperationError::InvalidIndex { index: 4, len: 3 })
    );
    assert_eq!(
        Operation::insert_paragraph("body", "c", 0).apply(&mut doc),
        Err(OperationError::DuplicateName("c".into()))
    );
    assert_eq!(
        Operation::delete_paragraph("nope").apply(&mut doc),
        Err(OperationError::NotFound("nope".into()))
    );
    assert_eq!(doc, sample());
}

#[test]
fn test_delete_inverse_carries_section_and_index() {
    let doc = sample();
    let pair = OperationPair::inverting(Operation::delete_paragraph("c"), &doc).unwrap();
    assert_eq!(pair.backward, Operation::insert_paragraph("body", "c", 2));

    let header = OperationPair::inverting(Operation::delete_paragraph("h1"), &doc).unwrap();
    match header.backward {
        Operation::InsertParagraph { paragraph_type, .. } => {
            assert_eq!(paragraph_type, ParagraphType::MainHeader)
        }
        other => panic!("unexpected inverse {other:?}"),
    }
}

#[test]
fn test_operation_wire_format() {
    let pair: OperationPair = serde_json::from_str(
        r#"{
            "do": { "op": "insertParagraph", "section": "body", "paragraph": "n", "index": 0 },
            "undo": { "op": "deleteParagraph", "paragraph": "n" }
        }"#,
    )
    .unwrap();

    assert_eq!(pair.forward, Operation::insert_paragraph("body", "n", 0));
    assert_eq!(pair.backward.name(), "deleteParagraph");
    assert_eq!(pair.forward.paragraph(), "n");
}
