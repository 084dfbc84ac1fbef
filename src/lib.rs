// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Approximate question matching over question banks.
//!
//! Given a piece of text (a question scraped from an exam page, a pasted
//! stem with its options) find the bank questions it most resembles. Text is
//! normalized down to letters, digits, and CJK ideographs, sliced into
//! character n-grams, looked up in an inverted index, and ranked by the Dice
//! coefficient of the gram sets.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   library    │────▶│    build     │────▶│    index     │
//! │ (config.json,│     │ (BankProvider│     │ (documents,  │
//! │  bank scan)  │     │  load, dedup)│     │  inverted)   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!        ┌─────────────────────────────────────────┤
//!        ▼                                         ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │    assist    │────▶│    search    │────▶│   scoring    │
//! │ (threshold   │     │ (count, cut, │     │ (Dice, order)│
//! │  matching)   │     │  rank top-k) │     │              │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! `util::normalize` sits under everything: the same normalization and gram
//! rule apply to documents and queries, which is what makes an exact
//! resubmission of a bank question score 1.0.
//!
//! # Usage
//!
//! ```ignore
//! use quizmatch::{Library, QuestionSearchIndex};
//!
//! let library = Library::open(Path::new("config.json"))?;
//! let mut index = QuestionSearchIndex::new();
//! index.build_from_config(Some(&library))?;
//!
//! for hit in index.search("What is 2+2?", 5) {
//!     println!("{:.3} {}", hit.score, index.document_question(hit.doc_index).question);
//! }
//! ```

pub mod assist;
pub mod build;
pub mod contracts;
pub mod error;
pub mod index;
pub mod library;
pub mod scoring;
pub mod search;
pub mod shared;
pub mod testing;
mod types;
pub mod util;

pub use build::{BankInfo, BankJob, BankProvider};
pub use error::{BankLoadError, BuildError, LibraryError};
pub use index::{
    document_text, fingerprint, Document, IndexStats, InvertedIndex, QuestionSearchIndex,
    QuestionSource, DEFAULT_CANDIDATE_LIMIT,
};
pub use library::{AssistantSettings, Library, LibraryConfig};
pub use scoring::dice_coefficient;
pub use shared::SharedSearchIndex;
pub use types::{DocId, Question, QuestionType, SearchHit};
pub use util::{
    gram_set, is_cjk, is_letter_or_number, make_ngrams, make_search_grams, normalize_for_search,
    search_gram_size,
};
