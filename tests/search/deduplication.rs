//! Cross-bank deduplication and provenance.

use quizmatch::{QuestionSearchIndex, QuestionType};

use crate::common::{build_index_from, make_choice, make_question, InMemoryProvider};

#[test]
fn test_duplicate_keeps_first_provenance() {
    let provider = InMemoryProvider::new()
        .with_bank("Alpha", "bank-a", vec![make_choice("Same question?", &["x", "y"])])
        .with_bank("Beta", "bank-b", vec![make_choice("same question", &["X.", "Y."])]);
    let index = build_index_from(provider);

    assert_eq!(index.document_count(), 1);
    let source = index.document_source(0);
    assert_eq!(source.subject, "Alpha");
    assert_eq!(source.bank_name, "bank-a");
    assert_eq!(source.bank_src, "bank-a.json");
    assert_eq!(index.stats().duplicates_skipped, 1);
}

#[test]
fn test_duplicate_within_one_bank() {
    let provider = InMemoryProvider::new().with_bank(
        "S",
        "b",
        vec![
            make_choice("Q one", &["a"]),
            make_choice("Q two", &["a"]),
            make_choice("Q  ONE", &["a"]),
        ],
    );
    let index = build_index_from(provider);
    assert_eq!(index.document_count(), 2);
    assert_eq!(index.document_question(1).question, "Q two");
}

#[test]
fn test_different_choices_are_different_questions() {
    let provider = InMemoryProvider::new().with_bank(
        "S",
        "b",
        vec![
            make_choice("Pick one", &["red", "blue"]),
            make_choice("Pick one", &["cat", "dog"]),
        ],
    );
    assert_eq!(build_index_from(provider).document_count(), 2);
}

#[test]
fn test_type_is_part_of_identity() {
    let provider = InMemoryProvider::new()
        .with_bank("S", "c", vec![make_question(QuestionType::Choice, "statement")])
        .with_bank("S", "t", vec![make_question(QuestionType::TrueOrFalse, "statement")]);
    let index = build_index_from(provider);
    assert_eq!(index.document_count(), 2);
    assert_eq!(index.document_question(1).kind, QuestionType::TrueOrFalse);
}

#[test]
fn test_failed_bank_does_not_shift_later_banks() {
    let provider = InMemoryProvider::new()
        .with_failing_bank("S", "broken")
        .with_bank("S", "good", vec![make_choice("Works", &["yes"])]);
    let mut index = QuestionSearchIndex::new();
    assert_eq!(index.build_from_config(Some(&provider)), Ok(1));
    assert_eq!(index.document_source(0).bank_name, "good");
    assert_eq!(index.stats().banks_failed, 1);
}
