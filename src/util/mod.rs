// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by indexing and querying.
//!
//! Both sides of a match have to see the exact same characters, so the
//! normalizer and gram slicer live here and nowhere else. If the index and
//! the query ever disagree on what a gram is, every score silently drops.

pub mod normalize;

pub use normalize::{
    gram_set, is_cjk, is_letter_or_number, make_ngrams, make_search_grams, normalize_for_search,
    search_gram_size,
};
