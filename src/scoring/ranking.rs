// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering.
//!
//! Two sorts happen per query. The rough cut orders candidates by raw gram
//! overlap so the candidate limit keeps the most promising ones; the final
//! sort orders scored hits by Dice. Both break ties by ascending document id,
//! which makes the output a pure function of (corpus, query).

use std::cmp::Ordering;

use crate::types::SearchHit;

/// A document that shares at least one gram with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub doc_index: usize,
    /// Number of query grams the document contains.
    pub intersection: usize,
}

/// Rough-cut order: more shared grams first, then lower document id.
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.intersection
        .cmp(&a.intersection)
        .then_with(|| a.doc_index.cmp(&b.doc_index))
}

/// Final order: higher score first, then lower document id.
///
/// Scores are finite by construction; `total_cmp` keeps the comparator a
/// total order even if that ever stops being true.
pub fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_index.cmp(&b.doc_index))
}
