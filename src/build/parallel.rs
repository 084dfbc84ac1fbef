// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bank loading, optionally on the rayon pool.
//!
//! Reading and parsing bank files is the only expensive part of a build, and
//! each bank is independent. The results come back in job order regardless
//! of which thread finished first (`collect` on an indexed parallel iterator
//! preserves order), so deduplication downstream sees exactly what a
//! sequential scan would.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::provider::{BankJob, BankProvider};
use crate::error::BankLoadError;
use crate::types::Question;

/// Outcome of loading one bank.
pub type BankLoad = Result<Vec<Question>, BankLoadError>;

fn load_one(provider: &dyn BankProvider, job: &BankJob) -> BankLoad {
    provider.load_all_questions(&job.subject_path, &job.bank)
}

/// Load every bank, returning one result per job in job order.
#[cfg(feature = "parallel")]
pub fn load_banks(provider: &dyn BankProvider, jobs: &[BankJob]) -> Vec<BankLoad> {
    jobs.par_iter().map(|job| load_one(provider, job)).collect()
}

/// Load every bank, returning one result per job in job order.
/// Non-parallel fallback.
#[cfg(not(feature = "parallel"))]
pub fn load_banks(provider: &dyn BankProvider, jobs: &[BankJob]) -> Vec<BankLoad> {
    jobs.iter().map(|job| load_one(provider, job)).collect()
}

/// Sequential loading, regardless of features.
pub fn load_banks_sequential(provider: &dyn BankProvider, jobs: &[BankJob]) -> Vec<BankLoad> {
    jobs.iter().map(|job| load_one(provider, job)).collect()
}

/// Load every bank in parallel, advancing `progress` once per bank.
#[cfg(feature = "parallel")]
pub fn load_banks_with_progress(
    provider: &dyn BankProvider,
    jobs: &[BankJob],
    progress: &ProgressBar,
) -> Vec<BankLoad> {
    let counter = AtomicUsize::new(0);
    let total = jobs.len();

    jobs.par_iter()
        .map(|job| {
            let loaded = load_one(provider, job);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{} banks", count, total));
            }

            loaded
        })
        .collect()
}
