// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The question search index.
//!
//! ```text
//!            build_from_config(ok)
//!   Empty ──────────────────────────► Ready
//!     ▲                                 │
//!     └──── clear() / failed build ─────┘
//! ```
//!
//! A build always starts by clearing, so a failed rebuild leaves the index
//! empty rather than serving the previous corpus. Queries against an index
//! that isn't ready return nothing instead of erroring.
//!
//! Document ids are positions in ingestion order and are only stable for the
//! lifetime of one build.

pub mod document;
pub mod inverted;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{info, warn};

use crate::build::{ingest, load_banks, plan_scan, BankJob, BankLoad, BankProvider, Corpus};
use crate::contracts::check_index_well_formed;
use crate::error::BuildError;
use crate::search;
use crate::types::{DocId, Question, SearchHit};

pub use document::{document_text, fingerprint, Document, QuestionSource};
pub use inverted::InvertedIndex;

/// Candidates kept after the overlap rough cut when the caller doesn't say.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 2000;

/// Summary of the most recent build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub documents: usize,
    pub duplicates_skipped: usize,
    pub banks_scanned: usize,
    pub banks_failed: usize,
    pub distinct_grams: usize,
}

/// In-memory n-gram index over every question a provider can supply.
#[derive(Debug, Default)]
pub struct QuestionSearchIndex {
    documents: Vec<Document>,
    inverted: InvertedIndex,
    ready: bool,
    last_error: Option<BuildError>,
    stats: IndexStats,
}

impl QuestionSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every document and posting and go back to the empty state.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.inverted.clear();
        self.ready = false;
        self.last_error = None;
        self.stats = IndexStats::default();
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Why the most recent build failed, if it did.
    pub fn last_error(&self) -> Option<&BuildError> {
        self.last_error.as_ref()
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Rebuild from scratch from everything `provider` offers.
    ///
    /// Returns the number of indexed documents. On error the index is left
    /// empty and not ready, and the error is also kept in [`Self::last_error`].
    pub fn build_from_config(
        &mut self,
        provider: Option<&dyn BankProvider>,
    ) -> Result<usize, BuildError> {
        self.build_with(provider, load_banks)
    }

    /// Same as [`Self::build_from_config`], advancing `progress` once per bank.
    #[cfg(feature = "parallel")]
    pub fn build_from_config_with_progress(
        &mut self,
        provider: Option<&dyn BankProvider>,
        progress: &ProgressBar,
    ) -> Result<usize, BuildError> {
        self.build_with(provider, |provider, jobs| {
            progress.set_length(jobs.len() as u64);
            crate::build::load_banks_with_progress(provider, jobs, progress)
        })
    }

    fn build_with<F>(&mut self, provider: Option<&dyn BankProvider>, load: F) -> Result<usize, BuildError>
    where
        F: FnOnce(&dyn BankProvider, &[BankJob]) -> Vec<BankLoad>,
    {
        self.clear();

        let result = self.try_build(provider, load);
        if let Err(e) = &result {
            warn!("index build failed: {}", e);
            self.last_error = Some(e.clone());
        }
        result
    }

    fn try_build<F>(&mut self, provider: Option<&dyn BankProvider>, load: F) -> Result<usize, BuildError>
    where
        F: FnOnce(&dyn BankProvider, &[BankJob]) -> Vec<BankLoad>,
    {
        let provider = provider
            .ok_or_else(|| BuildError::Configuration("no bank provider available".to_string()))?;
        let jobs = plan_scan(provider)?;
        let loads = load(provider, &jobs);
        let Corpus {
            mut documents,
            duplicates_skipped,
            banks_scanned,
            banks_failed,
        } = ingest(&jobs, loads);

        self.stats = IndexStats {
            documents: 0,
            duplicates_skipped,
            banks_scanned,
            banks_failed,
            distinct_grams: 0,
        };

        if documents.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }
        if DocId::from_index(documents.len() - 1).is_none() {
            return Err(BuildError::TooManyDocuments(documents.len()));
        }

        let inverted = InvertedIndex::build(&mut documents);
        check_index_well_formed(&documents, &inverted);

        self.stats.documents = documents.len();
        self.stats.distinct_grams = inverted.gram_count();
        self.documents = documents;
        self.inverted = inverted;
        self.ready = true;

        info!(
            documents = self.stats.documents,
            duplicates_skipped = self.stats.duplicates_skipped,
            banks = self.stats.banks_scanned,
            failed_banks = self.stats.banks_failed,
            distinct_grams = self.stats.distinct_grams,
            "question index ready"
        );

        Ok(self.documents.len())
    }

    /// Best `top_k` matches for `query`, best first.
    ///
    /// See [`crate::search::search_top_k`] for the algorithm. Empty when the
    /// index isn't ready.
    pub fn search_top_k(&self, query: &str, top_k: usize, candidate_limit: usize) -> Vec<SearchHit> {
        if !self.ready {
            return Vec::new();
        }
        search::search_top_k(&self.documents, &self.inverted, query, top_k, candidate_limit)
    }

    /// [`Self::search_top_k`] with [`DEFAULT_CANDIDATE_LIMIT`].
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        self.search_top_k(query, top_k, DEFAULT_CANDIDATE_LIMIT)
    }

    /// Question behind a hit.
    ///
    /// # Panics
    /// Panics if `doc_index >= document_count()`.
    pub fn document_question(&self, doc_index: usize) -> &Question {
        &self.documents[doc_index].question
    }

    /// Provenance behind a hit.
    ///
    /// # Panics
    /// Panics if `doc_index >= document_count()`.
    pub fn document_source(&self, doc_index: usize) -> &QuestionSource {
        &self.documents[doc_index].source
    }

    pub fn get_document(&self, doc_index: usize) -> Option<&Document> {
        self.documents.get(doc_index)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }
}
