// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Top-K search: count, cut, score, rank.
//!
//! ```text
//! query ─► normalize ─► gram set Q
//!                          │
//!          for g in Q: for d in postings(g): hits[d] += 1
//!                          │
//!          rough cut: sort (hits desc, id asc), keep candidate_limit
//!                          │
//!          score: dice(hits[d], |Q|, gram_count[d])
//!                          │
//!          final: sort (score desc, id asc), keep top_k
//! ```
//!
//! The rough cut exists because a very common gram ("的", "th") can make
//! half the corpus a candidate. Overlap count is a cheap upper bound proxy for
//! Dice, so truncating on it rarely drops a document that would have made the
//! final list.

use std::collections::HashMap;

use crate::index::document::Document;
use crate::index::inverted::InvertedIndex;
use crate::scoring::{compare_candidates, compare_hits, dice_coefficient, Candidate};
use crate::types::SearchHit;
use crate::util::gram_set;

/// Rank `documents` against `query`.
///
/// Returns at most `top_k` hits, every one with a positive score. Empty when
/// `top_k` is zero, the query normalizes to nothing, or no document shares a
/// gram with it. A `candidate_limit` of zero keeps no candidates at all.
/// Readiness is the caller's concern.
pub fn search_top_k(
    documents: &[Document],
    inverted: &InvertedIndex,
    query: &str,
    top_k: usize,
    candidate_limit: usize,
) -> Vec<SearchHit> {
    if top_k == 0 {
        return Vec::new();
    }

    let query_grams = gram_set(query);
    if query_grams.is_empty() {
        return Vec::new();
    }

    let mut candidates = count_candidates(inverted, query_grams.iter().map(String::as_str));
    if candidates.is_empty() {
        return Vec::new();
    }

    candidates.sort_unstable_by(compare_candidates);
    candidates.truncate(candidate_limit);

    let mut hits: Vec<SearchHit> = candidates
        .iter()
        .filter_map(|candidate| {
            let doc_grams = documents.get(candidate.doc_index)?.gram_count;
            if doc_grams == 0 {
                return None;
            }
            Some(SearchHit {
                doc_index: candidate.doc_index,
                score: dice_coefficient(candidate.intersection, query_grams.len(), doc_grams),
            })
        })
        .collect();

    hits.sort_unstable_by(compare_hits);
    hits.truncate(top_k);
    hits
}

/// Per-document count of how many query grams it contains.
///
/// Query grams are a set, so each contributes at most one to any document.
pub fn count_candidates<'a, I>(inverted: &InvertedIndex, grams: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for gram in grams {
        for doc_id in inverted.postings(gram) {
            *counts.entry(doc_id.as_usize()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(doc_index, intersection)| Candidate {
            doc_index,
            intersection,
        })
        .collect()
}
