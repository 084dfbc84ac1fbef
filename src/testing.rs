//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::build::{BankInfo, BankProvider};
use crate::error::BankLoadError;
use crate::types::{Question, QuestionType};

/// Create a question with no choices or answers.
pub fn make_question(kind: QuestionType, text: &str) -> Question {
    Question::new(kind, text)
}

/// Create a choice question with options.
pub fn make_choice(text: &str, choices: &[&str]) -> Question {
    Question::new(QuestionType::Choice, text).with_choices(choices.iter().copied())
}

/// A bank provider backed by vectors.
///
/// Subjects and banks are scanned in insertion order. A bank registered with
/// [`InMemoryProvider::with_failing_bank`] errors when loaded.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    subjects: Vec<String>,
    banks: HashMap<String, Vec<(BankInfo, Option<Vec<Question>>)>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, subject: &str) -> &mut Vec<(BankInfo, Option<Vec<Question>>)> {
        if !self.subjects.iter().any(|s| s == subject) {
            self.subjects.push(subject.to_string());
        }
        self.banks.entry(subject.to_string()).or_default()
    }

    /// Add a subject with no banks.
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.register(subject);
        self
    }

    pub fn with_bank(mut self, subject: &str, bank: &str, questions: Vec<Question>) -> Self {
        let kind = questions.first().map(|q| q.kind).unwrap_or_default();
        let info = BankInfo {
            name: bank.to_string(),
            src: format!("{}.json", bank),
            kind,
            size: questions.len(),
        };
        self.register(subject).push((info, Some(questions)));
        self
    }

    pub fn with_failing_bank(mut self, subject: &str, bank: &str) -> Self {
        let info = BankInfo {
            name: bank.to_string(),
            src: format!("{}.json", bank),
            kind: QuestionType::Choice,
            size: 0,
        };
        self.register(subject).push((info, None));
        self
    }
}

impl BankProvider for InMemoryProvider {
    fn list_subjects(&self) -> Vec<String> {
        self.subjects.clone()
    }

    fn list_banks(&self, subject: &str) -> Vec<BankInfo> {
        self.banks
            .get(subject)
            .map(|banks| banks.iter().map(|(info, _)| info.clone()).collect())
            .unwrap_or_default()
    }

    fn subject_path(&self, subject: &str) -> PathBuf {
        PathBuf::from(subject)
    }

    fn load_all_questions(
        &self,
        subject_path: &Path,
        bank: &BankInfo,
    ) -> Result<Vec<Question>, BankLoadError> {
        let path = subject_path.join(&bank.src);
        let subject = subject_path.to_string_lossy();
        self.banks
            .get(subject.as_ref())
            .and_then(|banks| banks.iter().find(|(info, _)| info.name == bank.name))
            .and_then(|(_, questions)| questions.clone())
            .ok_or(BankLoadError::MissingData { path })
    }
}
