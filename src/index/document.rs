// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Documents: one deduplicated question plus where it came from.
//!
//! The searchable text of a question is its stem followed by its choices,
//! one per line. Including the choices matters more than it looks: many
//! true/false and choice stems are near-identical boilerplate ("下列说法正确的
//! 是") and only the options tell them apart.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::Question;
use crate::util::normalize_for_search;

/// Provenance of an indexed question: the first bank it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSource {
    pub subject: String,
    pub bank_name: String,
    /// Bank file path relative to the subject directory.
    pub bank_src: String,
}

/// A question as stored in the index.
#[derive(Debug, Clone)]
pub struct Document {
    pub question: Question,
    pub source: QuestionSource,
    /// `normalize_for_search(document_text(question))`
    pub normalized: String,
    /// Number of distinct search grams. Zero until the inverted index is built.
    pub gram_count: usize,
}

impl Document {
    pub fn new(question: Question, source: QuestionSource) -> Self {
        let normalized = normalize_for_search(&document_text(&question));
        Self {
            question,
            source,
            normalized,
            gram_count: 0,
        }
    }
}

/// Join a stem and its choices into one matchable block.
pub fn compose_text(stem: &str, choices: &[String]) -> String {
    if choices.is_empty() {
        return stem.to_string();
    }
    let mut text = String::with_capacity(stem.len() + choices.iter().map(|c| c.len() + 1).sum::<usize>());
    text.push_str(stem);
    text.push('\n');
    text.push_str(&choices.join("\n"));
    text
}

/// Searchable text of a bank question.
pub fn document_text(question: &Question) -> String {
    compose_text(&question.question, &question.choices)
}

/// Content fingerprint used to suppress duplicates across banks.
///
/// Two questions collide iff they have the same type and the same normalized
/// stem + choices. Formatting differences (spacing, punctuation, case) don't
/// create new documents.
pub fn fingerprint(question: &Question) -> String {
    fingerprint_normalized(question, &normalize_for_search(&document_text(question)))
}

/// Fingerprint when the normalized text is already at hand.
pub fn fingerprint_normalized(question: &Question, normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(question.kind.discriminant().to_string().as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
