// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The seam between the index and wherever questions live.
//!
//! The index never touches the filesystem itself. It asks a provider for
//! subjects, asks again for each subject's banks, then asks for the questions
//! of each bank. [`crate::library::Library`] is the filesystem provider;
//! tests use an in-memory one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BankLoadError;
use crate::types::{Question, QuestionType};

/// Descriptor of one question bank: every question of one type in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInfo {
    /// Display name.
    pub name: String,
    /// Bank file path relative to the subject directory.
    pub src: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Number of questions of `kind` in the file when it was scanned.
    pub size: usize,
}

/// Source of subjects, banks, and questions.
///
/// `Sync` because banks are loaded from a thread pool when the `parallel`
/// feature is on.
pub trait BankProvider: Sync {
    /// Subject names, in the order they should be scanned.
    fn list_subjects(&self) -> Vec<String>;

    /// Banks of one subject, in the order they should be scanned.
    fn list_banks(&self, subject: &str) -> Vec<BankInfo>;

    /// Root directory of a subject; `BankInfo::src` is relative to it.
    fn subject_path(&self, subject: &str) -> PathBuf;

    /// Every question of `bank`.
    ///
    /// An error here costs the build one bank, never the whole build.
    fn load_all_questions(
        &self,
        subject_path: &Path,
        bank: &BankInfo,
    ) -> Result<Vec<Question>, BankLoadError>;
}

/// One unit of loading work: a bank together with the subject it belongs to.
#[derive(Debug, Clone)]
pub struct BankJob {
    pub subject: String,
    pub subject_path: PathBuf,
    pub bank: BankInfo,
}

/// Enumerate every bank of every subject, in scan order.
///
/// Scan order is what decides which copy of a duplicated question keeps its
/// provenance, so nothing downstream may reorder this list.
pub fn plan_jobs(provider: &dyn BankProvider, subjects: &[String]) -> Vec<BankJob> {
    let mut jobs = Vec::new();
    for subject in subjects {
        let subject_path = provider.subject_path(subject);
        for bank in provider.list_banks(subject) {
            jobs.push(BankJob {
                subject: subject.clone(),
                subject_path: subject_path.clone(),
                bank,
            });
        }
    }
    jobs
}
