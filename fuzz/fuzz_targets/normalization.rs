// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for normalization and gram slicing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quizmatch::{
    is_cjk, is_letter_or_number, make_search_grams, normalize_for_search, search_gram_size,
};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let normalized = normalize_for_search(&text);

    assert_eq!(normalize_for_search(&normalized), normalized, "not idempotent");
    assert!(normalized.chars().all(|c| is_letter_or_number(c) || is_cjk(c)));

    let grams = make_search_grams(&text);
    let char_len = normalized.chars().count();
    if char_len == 0 {
        assert!(grams.is_empty());
        return;
    }

    let n = search_gram_size(char_len).min(char_len);
    assert_eq!(grams.len(), char_len - n + 1);
    for gram in &grams {
        assert_eq!(gram.chars().count(), n);
        assert!(normalized.contains(gram.as_str()));
    }
});
