// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bank discovery and loading on disk.
//!
//! A subject directory is searched recursively for `*.json` files. A file is
//! a bank file iff it is a JSON object with a non-empty `data` array. One
//! file can hold several question types; it then yields one bank per
//! supported type, named `"<stem> (<Type>)"`.
//!
//! Older layouts keep each type in its own folder (`Choice/`,
//! `TrueorFalse/`, `FillBlank/`) and store bank sources relative to that
//! folder. Scanning strips the folder from `src` for single-type files that
//! sit directly in it, and loading falls back to `<TypeFolder>/<src>` when
//! `<src>` doesn't exist, so both layouts resolve.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::build::BankInfo;
use crate::error::BankLoadError;
use crate::types::{Question, QuestionType};

#[derive(Deserialize)]
struct BankFile {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// Read a bank file and return its raw `data` entries.
fn read_bank_entries(path: &Path) -> Result<Vec<serde_json::Value>, BankLoadError> {
    let content = fs::read_to_string(path).map_err(|source| BankLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: BankFile = serde_json::from_str(&content).map_err(|source| BankLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    file.data.ok_or_else(|| BankLoadError::MissingData {
        path: path.to_path_buf(),
    })
}

/// Number of entries of each supported type.
///
/// Counts the raw `type` label; entries with a missing or unknown label
/// don't make a bank on their own.
fn count_supported_types(entries: &[serde_json::Value]) -> BTreeMap<QuestionType, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        let label = entry.get("type").and_then(serde_json::Value::as_str);
        let kind = match label {
            Some("Choice") => QuestionType::Choice,
            Some("TrueorFalse") | Some("TrueOrFalse") => QuestionType::TrueOrFalse,
            Some("FillBlank") => QuestionType::FillBlank,
            _ => continue,
        };
        *counts.entry(kind).or_insert(0) += 1;
    }
    counts
}

/// Path of `file` relative to `root`, with `/` separators.
fn relative_src(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Every bank in a subject directory.
///
/// Ordered Choice banks first, then true/false, then fill-blank; within a
/// type, by path. A missing directory yields no banks.
pub fn scan_subject_directory(dir: &Path) -> Vec<BankInfo> {
    if !dir.is_dir() {
        warn!(path = %dir.display(), "subject directory does not exist");
        return Vec::new();
    }

    let mut by_type: BTreeMap<QuestionType, Vec<BankInfo>> = BTreeMap::new();

    let files = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"));

    for entry in files {
        let path = entry.path();
        let entries = match read_bank_entries(path) {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) => {
                debug!(path = %path.display(), "bank file has no questions");
                continue;
            }
            Err(e) => {
                debug!("not a bank file: {}", e);
                continue;
            }
        };

        let counts = count_supported_types(&entries);
        if counts.is_empty() {
            continue;
        }

        let src = relative_src(dir, path);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let multi_type = counts.len() > 1;

        for (kind, size) in counts {
            let name = if multi_type {
                format!("{} ({})", stem, kind.as_str())
            } else {
                stem.clone()
            };
            by_type.entry(kind).or_default().push(BankInfo {
                name,
                src: strip_type_folder(&src, kind, multi_type),
                kind,
                size,
            });
        }
    }

    QuestionType::SUPPORTED
        .iter()
        .filter_map(|kind| by_type.remove(kind))
        .flatten()
        .collect()
}

/// Drop a leading `<TypeFolder>/` from a single-type file that sits directly
/// in its type folder.
fn strip_type_folder(src: &str, kind: QuestionType, multi_type: bool) -> String {
    if multi_type {
        return src.to_string();
    }
    let prefix = format!("{}/", kind.folder());
    match src.strip_prefix(&prefix) {
        Some(rest) if !rest.contains('/') => rest.to_string(),
        _ => src.to_string(),
    }
}

/// Where a bank's file actually is.
pub fn resolve_bank_path(subject_path: &Path, bank: &BankInfo) -> PathBuf {
    let direct = subject_path.join(&bank.src);
    if direct.exists() {
        return direct;
    }
    subject_path.join(bank.kind.folder()).join(&bank.src)
}

/// Load every question of `bank`'s type from its file.
pub fn load_all_questions(subject_path: &Path, bank: &BankInfo) -> Result<Vec<Question>, BankLoadError> {
    let path = resolve_bank_path(subject_path, bank);
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut questions = Vec::new();
    for entry in read_bank_entries(&path)? {
        if !entry.is_object() {
            continue;
        }
        let mut question: Question = match serde_json::from_value(entry) {
            Ok(question) => question,
            Err(e) => {
                debug!(path = %path.display(), "skipping malformed question: {}", e);
                continue;
            }
        };
        if question.kind != bank.kind {
            continue;
        }
        resolve_images(&mut question, &base_dir);
        questions.push(question);
    }
    Ok(questions)
}

/// Rewrite relative image paths to be relative to the bank file's directory.
fn resolve_images(question: &mut Question, base_dir: &Path) {
    for path in question.images.values_mut() {
        let trimmed = path.trim();
        if trimmed.is_empty() || is_external(trimmed) {
            continue;
        }
        *path = base_dir.join(trimmed).to_string_lossy().into_owned();
    }
}

fn is_external(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("file://")
        || Path::new(path).is_absolute()
}
