// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Arbitrary queries against a small mixed-script index must never panic, and
//! every hit must be in range, scored in `(0, 1]`, and correctly ordered.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quizmatch::testing::{make_choice, make_question, InMemoryProvider};
use quizmatch::{QuestionSearchIndex, QuestionType};

#[derive(Debug, Arbitrary)]
struct Input {
    query: String,
    top_k: u8,
    candidate_limit: u16,
}

fn corpus() -> QuestionSearchIndex {
    let provider = InMemoryProvider::new().with_bank(
        "fuzz",
        "mixed",
        vec![
            make_choice("What is the capital of France?", &["Paris", "Rome"]),
            make_question(QuestionType::TrueOrFalse, "下列说法正确的是"),
            make_question(QuestionType::FillBlank, "The ___ of a circle"),
            make_question(QuestionType::Choice, "a"),
            make_question(QuestionType::Choice, "İstanbul ÄÖÜ Straße"),
            make_question(QuestionType::Choice, "\u{20000}\u{2A700}x"),
        ],
    );
    let mut index = QuestionSearchIndex::new();
    index
        .build_from_config(Some(&provider))
        .expect("fuzz corpus builds");
    index
}

fuzz_target!(|input: Input| {
    static INDEX: std::sync::OnceLock<QuestionSearchIndex> = std::sync::OnceLock::new();
    let index = INDEX.get_or_init(corpus);

    let top_k = input.top_k as usize;
    let hits = index.search_top_k(&input.query, top_k, input.candidate_limit as usize);

    assert!(hits.len() <= top_k, "{} hits for top_k {}", hits.len(), top_k);

    for hit in &hits {
        assert!(hit.doc_index < index.document_count(), "doc {} out of range", hit.doc_index);
        assert!(hit.score > 0.0 && hit.score <= 1.0, "score {} out of range", hit.score);
    }

    for pair in hits.windows(2) {
        let ordered = pair[0].score > pair[1].score
            || (pair[0].score == pair[1].score && pair[0].doc_index < pair[1].doc_index);
        assert!(ordered, "hits out of order: {:?}", pair);
    }

    // Same query, same answer
    assert_eq!(hits, index.search_top_k(&input.query, top_k, input.candidate_limit as usize));
});
