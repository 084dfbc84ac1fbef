// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index over search grams.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: Each posting list is strictly ascending by doc id
//! 2. **NON_EMPTY**: Every gram has at least one posting
//! 3. **GRAM_COUNT_CORRECT**: `documents[d].gram_count` equals the number of
//!    posting lists that contain `d`
//!
//! There is no stopword list and no pruning of long posting lists. For a few
//! thousand questions that's fine; the candidate limit in search bounds the
//! scoring cost of very common grams.

use std::collections::HashMap;
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::document::Document;
use crate::types::DocId;
use crate::util::gram_set;

/// Map from gram to the ids of every document containing it.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    /// Build the index from scratch, recording each document's distinct gram
    /// count along the way.
    ///
    /// Gram extraction runs in parallel when the `parallel` feature is on;
    /// the merge is sequential in document order, which is what keeps every
    /// posting list sorted without a separate sort pass.
    ///
    /// # Panics
    /// Panics if there are more documents than `u32` ids. Callers check the
    /// corpus size first.
    pub fn build(documents: &mut [Document]) -> Self {
        let gram_sets = extract_gram_sets(documents);

        let mut postings: HashMap<String, Vec<DocId>> = HashMap::new();
        for (doc_id, (document, grams)) in documents.iter_mut().zip(gram_sets).enumerate() {
            document.gram_count = grams.len();
            let Some(id) = DocId::from_index(doc_id) else {
                panic!("Contract violation: document {} exceeds the u32 id space", doc_id);
            };
            for gram in grams {
                // INVARIANT: POSTING_LIST_SORTED - ids arrive in ascending order
                postings.entry(gram).or_default().push(id);
            }
        }

        Self { postings }
    }

    /// Posting list for a gram; empty if the gram never occurs.
    #[inline]
    pub fn postings(&self, gram: &str) -> &[DocId] {
        self.postings.get(gram).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct grams.
    pub fn gram_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of postings across all grams.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    /// Length of the longest posting list (the most common gram).
    pub fn max_posting_len(&self) -> usize {
        self.postings.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings
            .iter()
            .map(|(gram, ids)| (gram.as_str(), ids.as_slice()))
    }

    pub fn clear(&mut self) {
        self.postings.clear();
    }
}

#[cfg(feature = "parallel")]
fn extract_gram_sets(documents: &[Document]) -> Vec<HashSet<String>> {
    documents
        .par_iter()
        .map(|document| gram_set(&document.normalized))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn extract_gram_sets(documents: &[Document]) -> Vec<HashSet<String>> {
    documents
        .iter()
        .map(|document| gram_set(&document.normalized))
        .collect()
}
