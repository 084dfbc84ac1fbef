// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a question index.
//!
//! Questions come from JSON bank files written by several converters over the
//! years, so deserialization is forgiving: unknown types fall back to
//! `Choice`, an answer may be a string or a list, image maps with junk values
//! are cleaned rather than rejected.
//!
//! # Invariants
//!
//! - **DocId**: `doc_id < documents.len()`. Ids are dense and assigned in
//!   ingestion order, so the id doubles as the ranking tie-breaker.
//! - **SearchHit**: `0.0 < score <= 1.0`. A hit only exists if the query and
//!   the document share at least one gram.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Posting lists store millions of these on large corpora, so it's a `u32`
/// rather than a `usize`. That caps an index at 2³² documents; builds past
/// the cap fail with [`crate::BuildError::TooManyDocuments`]. Use
/// `DocId::new()` for runtime-validated construction, `DocId::from_index()`
/// for positions, or `.into()` for trusted sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: usize) -> Option<Self> {
        if (id as usize) < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    /// Id for a document position, `None` past the `u32` id space.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(DocId)
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

// =============================================================================
// QUESTIONS
// =============================================================================

/// Kind of question stored in a bank.
///
/// The discriminant is part of the dedup fingerprint, so the order of the
/// variants is load-bearing. Don't reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum QuestionType {
    #[default]
    Choice = 0,
    TrueOrFalse = 1,
    FillBlank = 2,
    MultipleChoice = 3,
}

impl QuestionType {
    /// Types the bank scanner turns into banks.
    pub const SUPPORTED: [QuestionType; 3] = [
        QuestionType::Choice,
        QuestionType::TrueOrFalse,
        QuestionType::FillBlank,
    ];

    /// Stable numeric discriminant used in fingerprints.
    #[inline]
    pub fn discriminant(self) -> u8 {
        self as u8
    }

    /// Label as written in bank files.
    ///
    /// Note the historical spelling `TrueorFalse`.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Choice => "Choice",
            QuestionType::TrueOrFalse => "TrueorFalse",
            QuestionType::FillBlank => "FillBlank",
            QuestionType::MultipleChoice => "MultipleChoice",
        }
    }

    /// Parse a bank-file label. Unknown labels fall back to `Choice`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "TrueorFalse" | "TrueOrFalse" => QuestionType::TrueOrFalse,
            "FillBlank" => QuestionType::FillBlank,
            "MultipleChoice" => QuestionType::MultipleChoice,
            _ => QuestionType::Choice,
        }
    }

    /// Per-type folder some subject directories use (`Choice/`, `TrueorFalse/`, ...).
    ///
    /// Multiple-choice questions share the `Choice` folder.
    pub fn folder(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => QuestionType::Choice.as_str(),
            other => other.as_str(),
        }
    }
}

impl From<String> for QuestionType {
    fn from(label: String) -> Self {
        QuestionType::from_label(&label)
    }
}

impl From<QuestionType> for &'static str {
    fn from(kind: QuestionType) -> Self {
        kind.as_str()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single question as stored in a bank file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    #[serde(default)]
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// One answer for choice/true-false, one per blank for fill-blank.
    #[serde(rename = "answer", default, deserialize_with = "deserialize_answers")]
    pub answers: Vec<String>,
    #[serde(rename = "BlankNum", default, skip_serializing_if = "is_zero")]
    pub blank_num: u32,
    /// Image name → path. Relative paths are resolved against the bank file
    /// directory at load time.
    #[serde(
        rename = "image",
        default,
        deserialize_with = "deserialize_images",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub images: BTreeMap<String, String>,
}

impl Question {
    pub fn new(kind: QuestionType, question: impl Into<String>) -> Self {
        Self {
            kind,
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answers = vec![answer.into()];
        self
    }

    /// First answer, or "" when the question has none.
    pub fn single_answer(&self) -> &str {
        self.answers.first().map(String::as_str).unwrap_or("")
    }

    pub fn has_image(&self) -> bool {
        !self.images.is_empty()
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// `"answer"` is a string for most types and an array for fill-blank.
/// An empty string means "no answer".
fn deserialize_answers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AnswerValue {
        One(String),
        Many(Vec<String>),
        Other(serde_json::Value),
    }

    Ok(match AnswerValue::deserialize(deserializer)? {
        AnswerValue::One(answer) if answer.is_empty() => Vec::new(),
        AnswerValue::One(answer) => vec![answer],
        AnswerValue::Many(answers) => answers,
        AnswerValue::Other(_) => Vec::new(),
    })
}

/// Keep only entries with a non-blank key and a non-empty string value.
fn deserialize_images<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let mut images = BTreeMap::new();
    if let serde_json::Value::Object(map) = raw {
        for (key, value) in map {
            let key = key.trim();
            if let serde_json::Value::String(path) = value {
                if !key.is_empty() && !path.is_empty() {
                    images.insert(key.to_string(), path);
                }
            }
        }
    }
    Ok(images)
}

// =============================================================================
// RESULTS
// =============================================================================

/// One ranked search result.
///
/// `doc_index` is only meaningful for the index that produced it; a rebuild
/// reassigns ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub doc_index: usize,
    /// Dice coefficient over gram sets, in `(0, 1]`.
    pub score: f64,
}
