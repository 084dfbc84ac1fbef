// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Auto-matching scraped questions against the bank.
//!
//! A scraped question (from an exam page, a pasted list, ...) is turned into
//! the same stem-plus-choices text the index stores, searched, and accepted
//! when the best hit clears a score threshold. Questions that don't clear it
//! are the ones worth adding to a bank, so they can be exported as a bank
//! file of their own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::index::document::compose_text;
use crate::index::QuestionSearchIndex;
use crate::library::AssistantSettings;
use crate::types::{QuestionType, SearchHit};

/// A question as captured from outside the bank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedQuestion {
    #[serde(default)]
    pub id: String,
    /// Label shown on the source page ("1", "2-3", ...).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    #[serde(default)]
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Bank-file spelling, so a bank can be fed straight back in.
    #[serde(rename = "BlankNum", alias = "blankNum", default, skip_serializing_if = "is_zero")]
    pub blank_num: u32,
    #[serde(rename = "image", alias = "images", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionsFile {
    List(Vec<ScrapedQuestion>),
    Bank { data: Vec<ScrapedQuestion> },
}

/// Parse a batch of scraped questions: either a bare array or a bank file
/// (`{"data": [...]}`). Questions without an id get `idx_<position>`.
pub fn parse_questions(json: &str) -> Result<Vec<ScrapedQuestion>, serde_json::Error> {
    let mut questions = match serde_json::from_str::<QuestionsFile>(json)? {
        QuestionsFile::List(questions) | QuestionsFile::Bank { data: questions } => questions,
    };

    for (i, question) in questions.iter_mut().enumerate() {
        if question.id.is_empty() {
            question.id = format!("idx_{}", i);
        }
    }
    Ok(questions)
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl ScrapedQuestion {
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
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

    /// Search text: the stem, then the choices one per line, exactly as bank
    /// documents are composed.
    pub fn query_text(&self) -> String {
        compose_text(&self.question, &self.choices)
    }
}

/// How many hits to fetch and how good the best must be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPolicy {
    pub top_k: usize,
    pub threshold: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        AssistantSettings::default().into()
    }
}

impl From<AssistantSettings> for MatchPolicy {
    fn from(settings: AssistantSettings) -> Self {
        Self {
            top_k: settings.search_top_k,
            threshold: settings.auto_threshold,
        }
    }
}

/// Result of matching one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MatchOutcome {
    /// The best hit reached the threshold.
    Matched { best: SearchHit, hits: Vec<SearchHit> },
    /// There were hits, but none good enough.
    BelowThreshold { best: SearchHit, hits: Vec<SearchHit> },
    /// Nothing in the bank shares a gram with the question.
    NoCandidates,
}

impl MatchOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    pub fn best(&self) -> Option<&SearchHit> {
        match self {
            MatchOutcome::Matched { best, .. } | MatchOutcome::BelowThreshold { best, .. } => Some(best),
            MatchOutcome::NoCandidates => None,
        }
    }

    /// Best score, 0.0 when there were no candidates.
    pub fn best_score(&self) -> f64 {
        self.best().map_or(0.0, |hit| hit.score)
    }

    pub fn hits(&self) -> &[SearchHit] {
        match self {
            MatchOutcome::Matched { hits, .. } | MatchOutcome::BelowThreshold { hits, .. } => hits,
            MatchOutcome::NoCandidates => &[],
        }
    }
}

/// One scraped question together with how it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub question: ScrapedQuestion,
    pub outcome: MatchOutcome,
}

/// Search the index for `question` and decide whether it matched.
pub fn match_question(
    index: &QuestionSearchIndex,
    question: &ScrapedQuestion,
    policy: &MatchPolicy,
) -> MatchOutcome {
    let hits = index.search(&question.query_text(), policy.top_k);
    let Some(best) = hits.first().copied() else {
        return MatchOutcome::NoCandidates;
    };

    if best.score >= policy.threshold {
        MatchOutcome::Matched { best, hits }
    } else {
        MatchOutcome::BelowThreshold { best, hits }
    }
}

/// Match a batch, keeping input order.
pub fn match_all(
    index: &QuestionSearchIndex,
    questions: &[ScrapedQuestion],
    policy: &MatchPolicy,
) -> Vec<MatchReport> {
    questions
        .iter()
        .map(|question| MatchReport {
            question: question.clone(),
            outcome: match_question(index, question, policy),
        })
        .collect()
}

/// Reports whose question found no acceptable match.
pub fn unmatched(reports: &[MatchReport]) -> impl Iterator<Item = &MatchReport> {
    reports.iter().filter(|report| !report.outcome.is_matched())
}

/// Unmatched questions as a bank file (`{"data": [...]}`) ready to be
/// reviewed, answered, and dropped into a subject directory.
pub fn export_unmatched(reports: &[MatchReport]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = unmatched(reports)
        .map(|report| {
            let q = &report.question;
            let mut entry = json!({
                "type": q.kind,
                "question": q.question,
                "answer": null,
                "_id": q.id,
                "_bestScore": report.outcome.best_score(),
            });
            if let Some(object) = entry.as_object_mut() {
                if !q.choices.is_empty() {
                    object.insert("choices".into(), json!(q.choices));
                }
                if q.kind == QuestionType::FillBlank {
                    object.insert("BlankNum".into(), json!(q.blank_num));
                }
                if !q.images.is_empty() {
                    object.insert("image".into(), json!(q.images));
                }
                if !q.label.is_empty() {
                    object.insert("_label".into(), json!(q.label));
                }
            }
            entry
        })
        .collect();

    json!({ "data": data })
}
