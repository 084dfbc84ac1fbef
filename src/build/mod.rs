// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus ingestion: provider → banks → questions → deduplicated documents.
//!
//! ```text
//! provider.list_subjects()
//!     └─ plan_jobs()            one BankJob per (subject, bank), scan order
//!          └─ load_banks()      parallel with `parallel`, results in job order
//!               └─ ingest()     fingerprint, first occurrence wins
//! ```
//!
//! A failing bank is logged and skipped. Only a missing provider, a provider
//! without subjects, or a scan that yields nothing fails the build.

pub mod parallel;
pub mod provider;

use std::collections::HashSet;

#[cfg(feature = "parallel")]
use indicatif::ProgressStyle;
use tracing::{debug, warn};

use crate::error::BuildError;
use crate::index::document::{fingerprint_normalized, Document, QuestionSource};

pub use parallel::*;
pub use provider::*;

/// Deduplicated documents plus what it took to get them.
#[derive(Debug, Default)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub duplicates_skipped: usize,
    pub banks_scanned: usize,
    pub banks_failed: usize,
}

/// Plan the scan, failing if the provider knows no subjects.
pub fn plan_scan(provider: &dyn BankProvider) -> Result<Vec<BankJob>, BuildError> {
    let subjects = provider.list_subjects();
    if subjects.is_empty() {
        return Err(BuildError::Configuration("no subjects configured".to_string()));
    }

    Ok(plan_jobs(provider, &subjects))
}

/// Turn per-bank load results into deduplicated documents.
///
/// `loads[i]` must be the result for `jobs[i]`. Documents are appended in job
/// order and, within a bank, in file order; the first question with a given
/// fingerprint wins and later copies are counted as skipped.
pub fn ingest(jobs: &[BankJob], loads: Vec<BankLoad>) -> Corpus {
    debug_assert_eq!(jobs.len(), loads.len(), "Contract violation: one load per job");

    let mut corpus = Corpus::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (job, loaded) in jobs.iter().zip(loads) {
        corpus.banks_scanned += 1;

        let questions = match loaded {
            Ok(questions) => questions,
            Err(e) => {
                corpus.banks_failed += 1;
                warn!(subject = %job.subject, bank = %job.bank.name, "skipping bank: {}", e);
                continue;
            }
        };

        let before = corpus.documents.len();
        for question in questions {
            let source = QuestionSource {
                subject: job.subject.clone(),
                bank_name: job.bank.name.clone(),
                bank_src: job.bank.src.clone(),
            };
            let document = Document::new(question, source);
            if !seen.insert(fingerprint_normalized(&document.question, &document.normalized)) {
                corpus.duplicates_skipped += 1;
                continue;
            }
            corpus.documents.push(document);
        }

        debug!(
            subject = %job.subject,
            bank = %job.bank.name,
            added = corpus.documents.len() - before,
            "loaded bank"
        );
    }

    corpus
}

/// Progress bar style shared by every long-running CLI step.
#[cfg(feature = "parallel")]
pub fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}
