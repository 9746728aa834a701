use inkwell_core::{
    Document, EditSession, FileStorage, GenerateError, GenerationMode, GenerationRequest,
    Position, UndoLog, UndoOutcome,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_invariants(doc: &Document) {
    assert!(doc.line_count() >= 1, "document must never be empty");
    let cursor = doc.cursor();
    assert!(
        cursor.row < doc.line_count(),
        "cursor row {} out of range ({} lines)",
        cursor.row,
        doc.line_count()
    );
    assert!(
        cursor.col <= doc.line_len(cursor.row),
        "cursor col {} past end of line {:?}",
        cursor.col,
        doc.line(cursor.row)
    );
    assert!(doc.lines().iter().all(|line| !line.contains('\n')));
}

#[test]
fn test_invariants_hold_for_random_operation_sequences() {
    let alphabet = ['a', 'é', '你', '👋', ' ', '\n'];
    let generator = |_p: &str, context: &str| {
        Ok::<_, GenerateError>(format!("gen[{}]\nline", context.len()))
    };

    for seed in 0..32u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = EditSession::new();

        for _ in 0..400 {
            match rng.gen_range(0..17) {
                0..=3 => session.type_char(alphabet[rng.gen_range(0..alphabet.len())]),
                4 => session.newline(),
                5 | 6 => session.backspace(),
                7 => {
                    session.delete_line();
                }
                8 => session.paste_text("x\ny\n"),
                9 => {
                    session.undo();
                }
                10 => {
                    session.toggle_selection();
                }
                11 => session.document_mut().move_up(),
                12 => session.document_mut().move_down(),
                13 => session.document_mut().move_left(),
                14 => session.document_mut().move_right(),
                15 => {
                    let _ = session.toggle_input_mode();
                }
                _ => {
                    let mode = match rng.gen_range(0..3) {
                        0 => GenerationMode::Insert,
                        1 => GenerationMode::Replace,
                        _ => GenerationMode::Overwrite,
                    };
                    session
                        .generate(&generator, GenerationRequest::new("p", mode))
                        .expect("generator never fails");
                }
            }
            assert_invariants(session.document());
            // Reading the selection must never panic, whatever the anchor history.
            let _ = session.document().selected_text();
        }
    }
}

#[test]
fn test_insert_then_delete_backward_is_identity() {
    let mut doc = Document::from_text("hello\nworld");
    doc.move_to(Position::new(1, 3));
    let before_line = doc.current_line().to_string();
    let before_cursor = doc.cursor();

    doc.insert_rune('x');
    doc.delete_backward();

    assert_eq!(doc.current_line(), before_line);
    assert_eq!(doc.cursor(), before_cursor);
}

#[test]
fn test_newline_then_delete_backward_rejoins() {
    let mut doc = Document::from_text("Hello");
    doc.move_to(Position::new(0, 2));
    doc.insert_newline();
    assert_eq!(doc.cursor(), Position::new(1, 0));
    doc.delete_backward();
    assert_eq!(doc.lines(), ["Hello"]);
    assert_eq!(doc.cursor(), Position::new(0, 2));
}

#[test]
fn test_selection_direction_does_not_matter() {
    let text = "first line\nsecond line\nthird";
    let range = (Position::new(0, 6), Position::new(2, 3));

    let mut forward = Document::from_text(text);
    forward.move_to(range.0);
    forward.toggle_selection();
    forward.move_to(range.1);

    let mut backward = Document::from_text(text);
    backward.move_to(range.1);
    backward.toggle_selection();
    backward.move_to(range.0);

    assert_eq!(forward.selected_text(), "line\nsecond line\nthi");
    assert_eq!(forward.selected_text(), backward.selected_text());
}

#[test]
fn test_multi_line_replace_scenario() {
    let mut doc = Document::from_text("abc\ndef\nghi");
    doc.move_to(Position::new(0, 1));
    doc.toggle_selection();
    doc.move_to(Position::new(2, 2));
    doc.replace_selection("X\nY");
    assert_eq!(doc.lines(), ["aX", "Yi"]);
    assert_eq!(doc.cursor(), Position::new(1, 1));
}

#[test]
fn test_undo_bound_after_sixty_mutations() {
    let mut session = EditSession::new();
    for i in 0..60 {
        session.type_char(char::from(b'a' + (i % 26) as u8));
    }

    let mut undone = 0;
    while session.undo() == UndoOutcome::Restored {
        undone += 1;
    }
    assert_eq!(undone, 50);
    assert_eq!(session.undo(), UndoOutcome::NothingToUndo);
    assert_eq!(session.document().line_len(0), 10);
}

#[test]
fn test_undo_log_with_smaller_bound() {
    let mut session = EditSession::new().with_undo_log(UndoLog::with_capacity(3));
    for ch in "abcdef".chars() {
        session.type_char(ch);
    }
    for _ in 0..3 {
        assert_eq!(session.undo(), UndoOutcome::Restored);
    }
    assert_eq!(session.undo(), UndoOutcome::NothingToUndo);
    assert_eq!(session.document().lines(), ["abc"]);
}

#[test]
fn test_generative_replace_on_empty_selection() {
    let mut session = EditSession::with_document(Document::from_text("something\nelse"));
    session.document_mut().move_to(Position::new(1, 2));
    session.toggle_selection();

    let generator = |_p: &str, _c: &str| Ok::<_, GenerateError>("a\nb".to_string());
    session
        .generate(&generator, GenerationRequest::new("p", GenerationMode::Replace))
        .expect("generation succeeds");

    assert_eq!(session.document().lines(), ["a", "b"]);
    assert_eq!(session.document().cursor(), Position::new(0, 0));
    assert!(!session.document().selection().is_active());
}

#[test]
fn test_file_round_trip_through_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path().join("greeting.txt"));

    let mut session = EditSession::new();
    session.paste_text("Hi\nBye");
    session.save(&storage).expect("save succeeds");
    assert!(!session.document().is_modified());

    let mut reopened = EditSession::new();
    assert!(reopened.load(&storage).expect("load succeeds"));
    assert_eq!(reopened.document().lines(), ["Hi", "Bye"]);
}
