// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Three layers fail differently. A whole build fails only for configuration
//! problems or an empty corpus. A single bank file failing is recoverable: it
//! is logged and contributes nothing. Reading the library configuration is a
//! hard error because without it there is nothing to scan.

use std::path::PathBuf;

use thiserror::Error;

/// Why a corpus build produced no usable index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No provider, or the provider knows no subjects.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The scan finished but not a single question survived.
    #[error("no questions loaded from any bank")]
    EmptyCorpus,

    /// More documents than document ids.
    #[error("{0} documents exceed the u32 document id space")]
    TooManyDocuments(usize),
}

/// A single bank file that could not be loaded.
#[derive(Debug, Error)]
pub enum BankLoadError {
    #[error("failed to read bank file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in bank file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bank file {path} has no \"data\" array")]
    MissingData { path: PathBuf },
}

/// The library configuration file could not be read.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
