// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dice similarity over gram sets.
//!
//! ```text
//! dice(Q, D) = 2 · |Q ∩ D| / (|Q| + |D|)
//! ```
//!
//! Symmetric, 1.0 for identical sets, 0.0 for disjoint ones. Unlike Jaccard it
//! doesn't punish a short query against a long document quite as hard, which
//! suits "paste half a question, find the whole one".

/// Dice coefficient from an intersection size and the two set sizes.
///
/// Returns 0.0 when both sets are empty rather than dividing by zero.
#[inline]
pub fn dice_coefficient(intersection: usize, query_grams: usize, doc_grams: usize) -> f64 {
    let denominator = query_grams + doc_grams;
    if denominator == 0 {
        return 0.0;
    }
    (2.0 * intersection as f64) / denominator as f64
}
