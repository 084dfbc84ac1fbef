//! Bank discovery and loading on disk.

use quizmatch::library::scanner::{load_all_questions, resolve_bank_path, scan_subject_directory};
use quizmatch::{BankLoadError, QuestionType};
use serde_json::json;
use tempfile::TempDir;

use crate::common::{choice, fill_blank, true_false, write_bank};

#[test]
fn test_single_type_file_is_one_bank() {
    let dir = TempDir::new().unwrap();
    write_bank(
        dir.path(),
        "chapter1.json",
        json!([choice("Q1", &["a", "b"], "A"), choice("Q2", &["a", "b"], "B")]),
    );

    let banks = scan_subject_directory(dir.path());
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].name, "chapter1");
    assert_eq!(banks[0].src, "chapter1.json");
    assert_eq!(banks[0].kind, QuestionType::Choice);
    assert_eq!(banks[0].size, 2);
}

#[test]
fn test_mixed_file_yields_one_bank_per_type() {
    let dir = TempDir::new().unwrap();
    write_bank(
        dir.path(),
        "final.json",
        json!([
            fill_blank("___ is a keyword", &["int"]),
            choice("Q1", &["a"], "A"),
            true_false("T1", "T"),
            true_false("T2", "F"),
        ]),
    );

    let banks = scan_subject_directory(dir.path());
    let summary: Vec<(&str, QuestionType, usize)> =
        banks.iter().map(|b| (b.name.as_str(), b.kind, b.size)).collect();
    assert_eq!(
        summary,
        vec![
            ("final (Choice)", QuestionType::Choice, 1),
            ("final (TrueorFalse)", QuestionType::TrueOrFalse, 2),
            ("final (FillBlank)", QuestionType::FillBlank, 1),
        ]
    );
    assert!(banks.iter().all(|b| b.src == "final.json"));
}

#[test]
fn test_banks_ordered_by_type_then_path() {
    let dir = TempDir::new().unwrap();
    write_bank(dir.path(), "a_tf.json", json!([true_false("T", "T")]));
    write_bank(dir.path(), "b_choice.json", json!([choice("Q", &["x"], "A")]));
    write_bank(dir.path(), "c_choice.json", json!([choice("R", &["y"], "A")]));

    let names: Vec<String> = scan_subject_directory(dir.path())
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["b_choice", "c_choice", "a_tf"]);
}

#[test]
fn test_type_folder_prefix_is_stripped() {
    let dir = TempDir::new().unwrap();
    write_bank(dir.path(), "Choice/ch1.json", json!([choice("Q", &["x"], "A")]));
    write_bank(dir.path(), "TrueorFalse/nested/tf.json", json!([true_false("T", "T")]));

    let banks = scan_subject_directory(dir.path());
    assert_eq!(banks[0].src, "ch1.json");
    assert_eq!(banks[1].src, "TrueorFalse/nested/tf.json");
}

#[test]
fn test_non_bank_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.json"), r#"{"title": "not a bank"}"#).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "hello").unwrap();
    write_bank(dir.path(), "empty.json", json!([]));
    write_bank(dir.path(), "essay.json", json!([{ "type": "Essay", "question": "x" }]));

    assert!(scan_subject_directory(dir.path()).is_empty());
}

#[test]
fn test_missing_directory_has_no_banks() {
    let dir = TempDir::new().unwrap();
    assert!(scan_subject_directory(&dir.path().join("nope")).is_empty());
}

#[test]
fn test_load_filters_to_bank_type() {
    let dir = TempDir::new().unwrap();
    write_bank(
        dir.path(),
        "mixed.json",
        json!([choice("Q1", &["a"], "A"), true_false("T1", "T"), choice("Q2", &["b"], "A")]),
    );

    let banks = scan_subject_directory(dir.path());
    let choice_bank = banks.iter().find(|b| b.kind == QuestionType::Choice).unwrap();
    let questions = load_all_questions(dir.path(), choice_bank).unwrap();
    let stems: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(stems, vec!["Q1", "Q2"]);
}

#[test]
fn test_load_falls_back_to_type_folder() {
    let dir = TempDir::new().unwrap();
    let written = write_bank(dir.path(), "FillBlank/fb.json", json!([fill_blank("___", &["x"])]));

    let banks = scan_subject_directory(dir.path());
    assert_eq!(banks[0].src, "fb.json");
    assert_eq!(resolve_bank_path(dir.path(), &banks[0]), written);

    let questions = load_all_questions(dir.path(), &banks[0]).unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].answers, vec!["x"]);
}

#[test]
fn test_relative_images_resolve_against_bank_dir() {
    let dir = TempDir::new().unwrap();
    write_bank(
        dir.path(),
        "ch/imgs.json",
        json!([{
            "type": "Choice",
            "question": "Which figure?",
            "image": {
                "local": "fig/1.png",
                "remote": "https://example.com/2.png"
            }
        }]),
    );

    let banks = scan_subject_directory(dir.path());
    let questions = load_all_questions(dir.path(), &banks[0]).unwrap();
    let images = &questions[0].images;
    assert_eq!(
        images["local"],
        dir.path().join("ch").join("fig/1.png").to_string_lossy()
    );
    assert_eq!(images["remote"], "https://example.com/2.png");
}

#[test]
fn test_missing_bank_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    write_bank(dir.path(), "gone.json", json!([choice("Q", &["x"], "A")]));
    let banks = scan_subject_directory(dir.path());
    std::fs::remove_file(dir.path().join("gone.json")).unwrap();

    let err = load_all_questions(dir.path(), &banks[0]).unwrap_err();
    assert!(matches!(err, BankLoadError::Io { .. }));
}
