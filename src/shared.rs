// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concurrent access to a question index.
//!
//! [`QuestionSearchIndex`] has no locks of its own: queries take `&self`,
//! builds take `&mut self`. This wrapper lets many threads query while
//! another rebuilds by swapping immutable snapshots:
//!
//! - Readers clone the current `Arc` under a brief read lock and then search
//!   without holding any lock.
//! - A rebuild constructs the new index with no lock held, then takes the
//!   write lock only to swap the pointer.
//! - Rebuilds are serialized among themselves so two concurrent rebuilds
//!   can't interleave their swaps.
//!
//! A failed rebuild installs the failed (empty, not ready) index, so readers
//! see the same state a single-threaded caller would after a failed build.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::build::BankProvider;
use crate::error::BuildError;
use crate::index::{QuestionSearchIndex, DEFAULT_CANDIDATE_LIMIT};
use crate::types::SearchHit;

/// Thread-safe, cheaply clonable handle to a question index.
#[derive(Debug, Clone, Default)]
pub struct SharedSearchIndex {
    current: Arc<RwLock<Arc<QuestionSearchIndex>>>,
    rebuild_lock: Arc<Mutex<()>>,
}

impl SharedSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-built index.
    pub fn from_index(index: QuestionSearchIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
            rebuild_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The index as of now. Later rebuilds don't affect a taken snapshot.
    pub fn snapshot(&self) -> Arc<QuestionSearchIndex> {
        Arc::clone(&self.current.read())
    }

    /// Build a fresh index from `provider` and publish it.
    pub fn rebuild(&self, provider: Option<&dyn BankProvider>) -> Result<usize, BuildError> {
        let _guard = self.rebuild_lock.lock();
        self.rebuild_locked(provider)
    }

    fn rebuild_locked(&self, provider: Option<&dyn BankProvider>) -> Result<usize, BuildError> {
        let mut fresh = QuestionSearchIndex::new();
        let result = fresh.build_from_config(provider);
        *self.current.write() = Arc::new(fresh);
        result
    }

    /// Rebuild if `force` is set or the current index isn't ready.
    ///
    /// Returns the document count of the index now published.
    pub fn ensure_ready(
        &self,
        provider: Option<&dyn BankProvider>,
        force: bool,
    ) -> Result<usize, BuildError> {
        let _guard = self.rebuild_lock.lock();
        let current = self.snapshot();
        if !force && current.is_ready() {
            return Ok(current.document_count());
        }
        self.rebuild_locked(provider)
    }

    pub fn search_top_k(&self, query: &str, top_k: usize, candidate_limit: usize) -> Vec<SearchHit> {
        self.snapshot().search_top_k(query, top_k, candidate_limit)
    }

    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        self.search_top_k(query, top_k, DEFAULT_CANDIDATE_LIMIT)
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_ready()
    }

    pub fn document_count(&self) -> usize {
        self.current.read().document_count()
    }
}
