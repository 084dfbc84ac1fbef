// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `config.json`: which subjects exist and where their banks live.
//!
//! ```json
//! {
//!   "Subject": "C++",
//!   "QuestionBank": { "Subject": { "C++": { "path": "Subject/C++" } } },
//!   "Assistant": { "searchTopK": 5, "autoThreshold": 0.85 }
//! }
//! ```
//!
//! The key casing matches files written by the desktop application, so the
//! same file can be pointed at from both.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

pub const DEFAULT_SEARCH_TOP_K: usize = 5;
pub const DEFAULT_AUTO_THRESHOLD: f64 = 0.85;

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Subject the application last had open. Informational only.
    #[serde(rename = "Subject", default, skip_serializing_if = "Option::is_none")]
    pub current_subject: Option<String>,

    #[serde(rename = "QuestionBank", default)]
    pub question_bank: QuestionBankSection,

    #[serde(rename = "Assistant", default)]
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBankSection {
    /// Subjects by name. A `BTreeMap` so that scan order is alphabetical.
    #[serde(rename = "Subject", default)]
    pub subjects: BTreeMap<String, SubjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Auto-match knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    #[serde(rename = "searchTopK", default = "default_top_k")]
    pub search_top_k: usize,
    #[serde(rename = "autoThreshold", default = "default_threshold")]
    pub auto_threshold: f64,
}

fn default_top_k() -> usize {
    DEFAULT_SEARCH_TOP_K
}

fn default_threshold() -> f64 {
    DEFAULT_AUTO_THRESHOLD
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            search_top_k: DEFAULT_SEARCH_TOP_K,
            auto_threshold: DEFAULT_AUTO_THRESHOLD,
        }
    }
}

impl LibraryConfig {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let content = fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LibraryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Subject names in scan order.
    pub fn subject_names(&self) -> impl Iterator<Item = &str> {
        self.question_bank.subjects.keys().map(String::as_str)
    }

    /// Configured directory of a subject, or `Subject/<name>` when unset.
    ///
    /// Relative; callers resolve it against the configuration file's directory.
    pub fn subject_dir(&self, subject: &str) -> String {
        self.question_bank
            .subjects
            .get(subject)
            .and_then(|entry| entry.path.as_deref())
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Subject/{}", subject))
    }
}
