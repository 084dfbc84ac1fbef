// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quizmatch command-line interface.
//!
//! Three subcommands, all driven by the same `config.json` the question
//! library uses: `search` to look up one question, `match` to auto-match a
//! batch of scraped questions, and `inspect` to see what the library and the
//! built index contain.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quizmatch",
    about = "Find the bank question that best matches a piece of text",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the question banks for the closest questions
    Search {
        /// Path to config.json
        #[arg(short, long)]
        config: PathBuf,

        /// Question text (stem, optionally followed by choices)
        query: String,

        /// Maximum number of results (defaults to the config's searchTopK)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Candidates kept after the overlap rough cut
        #[arg(long, default_value_t = quizmatch::DEFAULT_CANDIDATE_LIMIT)]
        candidates: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Match a batch of scraped questions against the banks
    Match {
        /// Path to config.json
        #[arg(short, long)]
        config: PathBuf,

        /// JSON file with the questions: an array, or {"data": [...]}
        questions: PathBuf,

        /// Minimum score for a match (defaults to the config's autoThreshold)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Hits fetched per question (defaults to the config's searchTopK)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Write unmatched questions to this file as a new bank
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show subjects, banks, and index statistics
    Inspect {
        /// Path to config.json
        #[arg(short, long)]
        config: PathBuf,
    },
}
