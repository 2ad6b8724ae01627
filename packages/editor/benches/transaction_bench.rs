use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_editor::{
    synthesize, Document, EditSession, EditorConfig, Intent, NameGenerator, Paragraph, Position,
    Section, Selection,
};

fn article(paragraphs: usize) -> Document {
    let body = (0..paragraphs)
        .map(|i| {
            Paragraph::new(format!("p{i}"))
                .with_text(format!("Paragraph {i} carries a sentence or two of body text."))
        })
        .collect();
    Document::new(vec![Section::new("body").with_paragraphs(body)]).unwrap()
}

fn synthesize_split(c: &mut Criterion) {
    let doc = article(200);
    let selection = Selection::collapsed(Position::new("p100", 10));
    let config = EditorConfig::default();

    c.bench_function("synthesize_split", |b| {
        b.iter(|| {
            let mut names = NameGenerator::from_seed("bench");
            synthesize(
                black_box(&Intent::Enter),
                black_box(&doc),
                &selection,
                &mut names,
                &config,
            )
        })
    });
}

fn synthesize_wide_range(c: &mut Criterion) {
    let doc = article(200);
    let selection = Selection::new(Position::new("p10", 4), Position::new("p190", 8));
    let config = EditorConfig::default();

    c.bench_function("synthesize_wide_range", |b| {
        b.iter(|| {
            let mut names = NameGenerator::from_seed("bench");
            synthesize(
                black_box(&Intent::Backspace),
                black_box(&doc),
                &selection,
                &mut names,
                &config,
            )
        })
    });
}

fn typing_apply_undo_cycle(c: &mut Criterion) {
    let mut session = EditSession::new("bench", article(50), EditorConfig::default()).unwrap();
    session.set_cursor(Position::new("p25", 0)).unwrap();

    c.bench_function("typing_apply_undo_cycle", |b| {
        b.iter(|| {
            session
                .apply_intent(black_box(&Intent::InsertText { text: "x".into() }))
                .unwrap();
            session.undo().unwrap();
        })
    });
}

fn split_merge_cycle(c: &mut Criterion) {
    let mut session = EditSession::new("bench", article(50), EditorConfig::default()).unwrap();

    c.bench_function("split_merge_cycle", |b| {
        b.iter(|| {
            session.set_cursor(Position::new("p25", 9)).unwrap();
            session.apply_intent(black_box(&Intent::Enter)).unwrap();
            session.apply_intent(black_box(&Intent::Backspace)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    synthesize_split,
    synthesize_wide_range,
    typing_apply_undo_cycle,
    split_merge_cycle
);
criterion_main!(benches);
