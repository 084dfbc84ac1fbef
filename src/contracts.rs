// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for a built index.
//!
//! Debug-mode assertions checked after every successful build. They are
//! zero-cost in release builds (`debug_assert!`) and catch an index that
//! would silently mis-rank long before a user notices.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function              | Property                                     |
//! |--------------------------------|----------------------------------------------|
//! | `check_posting_list_sorted`    | posting lists strictly ascending, in range   |
//! | `check_gram_counts`            | `gram_count` = number of lists holding doc   |
//! | `check_index_well_formed`      | all of the above                             |

use crate::index::document::Document;
use crate::index::inverted::InvertedIndex;
use crate::types::DocId;

/// Check that a posting list is strictly ascending and every id is in range.
///
/// # Panics (debug builds only)
/// Panics on a duplicate, out-of-order, or out-of-range id.
#[inline]
pub fn check_posting_list_sorted(gram: &str, ids: &[DocId], num_docs: usize) {
    debug_assert!(
        !ids.is_empty(),
        "Contract violation: gram {:?} has an empty posting list",
        gram
    );
    debug_assert!(
        ids.windows(2).all(|w| w[0] < w[1]),
        "Contract violation: posting list for {:?} is not strictly ascending",
        gram
    );
    debug_assert!(
        ids.iter().all(|id| id.as_usize() < num_docs),
        "Contract violation: posting list for {:?} references a doc >= {}",
        gram,
        num_docs
    );
}

/// Check that each document's `gram_count` matches the inverted index.
///
/// # Panics (debug builds only)
/// Panics if any document's count disagrees with its postings.
pub fn check_gram_counts(documents: &[Document], inverted: &InvertedIndex) {
    if !cfg!(debug_assertions) {
        return;
    }
    let mut counts = vec![0usize; documents.len()];
    for (_, ids) in inverted.iter() {
        for id in ids {
            if let Some(count) = counts.get_mut(id.as_usize()) {
                *count += 1;
            }
        }
    }
    for (doc_id, (document, counted)) in documents.iter().zip(counts).enumerate() {
        debug_assert_eq!(
            document.gram_count, counted,
            "Contract violation: doc {} has gram_count {} but appears in {} posting lists",
            doc_id, document.gram_count, counted
        );
    }
}

/// Check every invariant of a built index.
pub fn check_index_well_formed(documents: &[Document], inverted: &InvertedIndex) {
    if !cfg!(debug_assertions) {
        return;
    }
    for (gram, ids) in inverted.iter() {
        check_posting_list_sorted(gram, ids, documents.len());
    }
    check_gram_counts(documents, inverted);
}
