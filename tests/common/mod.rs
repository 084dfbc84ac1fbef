//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use quizmatch::{Question, QuestionSearchIndex, QuestionType};
use serde_json::json;

// Re-export canonical test utilities from quizmatch::testing
pub use quizmatch::testing::{make_choice, make_question, InMemoryProvider};

// ============================================================================
// IN-MEMORY INDEXES
// ============================================================================

/// Build an index with one Choice bank holding `stems` in order.
///
/// Panics if the build fails, e.g. when every stem is empty.
pub fn build_index(stems: &[&str]) -> QuestionSearchIndex {
    let questions: Vec<Question> = stems
        .iter()
        .map(|stem| make_question(QuestionType::Choice, stem))
        .collect();
    build_index_from(InMemoryProvider::new().with_bank("Subject", "bank", questions))
}

pub fn build_index_from(provider: InMemoryProvider) -> QuestionSearchIndex {
    let mut index = QuestionSearchIndex::new();
    index
        .build_from_config(Some(&provider))
        .expect("test corpus should build");
    index
}

/// Assert every structural invariant of a built index.
pub fn assert_index_well_formed(index: &QuestionSearchIndex) {
    let num_docs = index.document_count();
    let mut counted = vec![0usize; num_docs];
    for (gram, ids) in index.inverted().iter() {
        assert!(!ids.is_empty(), "gram {:?} has no postings", gram);
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "postings for {:?} not strictly ascending",
            gram
        );
        for id in ids {
            assert!(id.as_usize() < num_docs, "posting out of range");
            counted[id.as_usize()] += 1;
        }
    }
    for (i, doc) in index.documents().iter().enumerate() {
        assert_eq!(doc.gram_count, counted[i], "gram_count mismatch for doc {}", i);
    }
}

// ============================================================================
// ON-DISK LIBRARIES
// ============================================================================

/// Write a bank file (`{"data": [...]}`) under `dir`, creating parents.
pub fn write_bank(dir: &Path, relative: &str, questions: serde_json::Value) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create bank dir");
    }
    let body = json!({ "data": questions });
    fs::write(&path, serde_json::to_string_pretty(&body).expect("serialize bank"))
        .expect("write bank");
    path
}

/// Write `config.json` listing `subjects` as `(name, path)` pairs.
pub fn write_config(dir: &Path, subjects: &[(&str, Option<&str>)]) -> PathBuf {
    let mut map = serde_json::Map::new();
    for (name, path) in subjects {
        let entry = match path {
            Some(path) => json!({ "path": path }),
            None => json!({}),
        };
        map.insert(name.to_string(), entry);
    }
    let config = json!({
        "Subject": subjects.first().map(|(name, _)| *name).unwrap_or(""),
        "QuestionBank": { "Subject": map },
        "Assistant": { "searchTopK": 5, "autoThreshold": 0.85 }
    });
    let path = dir.join("config.json");
    fs::write(&path, serde_json::to_string_pretty(&config).expect("serialize config"))
        .expect("write config");
    path
}

pub fn choice(question: &str, choices: &[&str], answer: &str) -> serde_json::Value {
    json!({ "type": "Choice", "question": question, "choices": choices, "answer": answer })
}

pub fn true_false(question: &str, answer: &str) -> serde_json::Value {
    json!({ "type": "TrueorFalse", "question": question, "answer": answer })
}

pub fn fill_blank(question: &str, answers: &[&str]) -> serde_json::Value {
    json!({
        "type": "FillBlank",
        "question": question,
        "answer": answers,
        "BlankNum": answers.len()
    })
}
