// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Filesystem question library: the [`BankProvider`] the CLI uses.
//!
//! Opening a library reads `config.json` and scans every configured subject
//! directory once. Bank lists are cached; bank contents are read on demand
//! when the index loads them.

pub mod config;
pub mod scanner;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::build::{BankInfo, BankProvider};
use crate::error::{BankLoadError, LibraryError};
use crate::types::Question;

pub use config::{AssistantSettings, LibraryConfig};

#[derive(Debug, Clone)]
struct SubjectBanks {
    path: PathBuf,
    banks: Vec<BankInfo>,
}

/// Subjects and their scanned banks.
#[derive(Debug, Clone)]
pub struct Library {
    config: LibraryConfig,
    subjects: BTreeMap<String, SubjectBanks>,
}

impl Library {
    /// Read `config_path` and scan every subject it lists.
    ///
    /// Relative subject paths resolve against the directory holding the
    /// configuration file.
    pub fn open(config_path: &Path) -> Result<Self, LibraryError> {
        let config = LibraryConfig::load(config_path)?;
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self::from_config(config, base_dir))
    }

    /// Scan every subject of an already-parsed configuration.
    pub fn from_config(config: LibraryConfig, base_dir: &Path) -> Self {
        let subjects = config
            .subject_names()
            .map(|name| {
                let path = base_dir.join(config.subject_dir(name));
                let banks = scanner::scan_subject_directory(&path);
                debug!(subject = name, banks = banks.len(), "scanned subject");
                (name.to_string(), SubjectBanks { path, banks })
            })
            .collect();

        Self { config, subjects }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn assistant_settings(&self) -> AssistantSettings {
        self.config.assistant
    }

    /// Total number of banks across subjects.
    pub fn bank_count(&self) -> usize {
        self.subjects.values().map(|s| s.banks.len()).sum()
    }
}

impl BankProvider for Library {
    fn list_subjects(&self) -> Vec<String> {
        self.subjects.keys().cloned().collect()
    }

    fn list_banks(&self, subject: &str) -> Vec<BankInfo> {
        self.subjects
            .get(subject)
            .map(|s| s.banks.clone())
            .unwrap_or_default()
    }

    fn subject_path(&self, subject: &str) -> PathBuf {
        self.subjects
            .get(subject)
            .map(|s| s.path.clone())
            .unwrap_or_else(|| PathBuf::from(self.config.subject_dir(subject)))
    }

    fn load_all_questions(
        &self,
        subject_path: &Path,
        bank: &BankInfo,
    ) -> Result<Vec<Question>, BankLoadError> {
        scanner::load_all_questions(subject_path, bank)
    }
}
