// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use quizmatch::{
    assist::{export_unmatched, match_all, parse_questions, unmatched, MatchPolicy, ScrapedQuestion},
    BankProvider, Library, Question, QuestionSearchIndex, QuestionSource,
};

mod cli;
use cli::display::{
    match_badge, pad_right, row, score_value, section_bot, section_top, themed, truncate, BOLD,
    CYAN, DIM, GRAY, YELLOW,
};
use cli::{Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Search {
            config,
            query,
            limit,
            candidates,
            json,
        } => run_search(&config, &query, limit, candidates, json),
        Commands::Match {
            config,
            questions,
            threshold,
            limit,
            json,
            export,
        } => run_match(&config, &questions, threshold, limit, json, export.as_deref()),
        Commands::Inspect { config } => run_inspect(&config),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `QUIZMATCH_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUIZMATCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_library(config: &Path) -> Result<Library> {
    Library::open(config).with_context(|| format!("failed to open library from {}", config.display()))
}

#[cfg(feature = "parallel")]
fn build_index(index: &mut QuestionSearchIndex, library: &Library) -> Result<usize> {
    let progress = ProgressBar::new(library.bank_count() as u64);
    progress.set_style(quizmatch::build::progress_style());
    progress.set_prefix("Loading");
    progress.set_message("banks...");

    match index.build_from_config_with_progress(Some(library), &progress) {
        Ok(count) => {
            progress.finish_with_message(format!("indexed {} questions", count));
            Ok(count)
        }
        Err(e) => {
            progress.abandon();
            Err(e).context("failed to build question index")
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn build_index(index: &mut QuestionSearchIndex, library: &Library) -> Result<usize> {
    index
        .build_from_config(Some(library))
        .context("failed to build question index")
}

fn open_index(config: &Path) -> Result<(Library, QuestionSearchIndex)> {
    let library = open_library(config)?;
    let mut index = QuestionSearchIndex::new();
    build_index(&mut index, &library)?;
    Ok((library, index))
}

/// A hit with the question behind it, for JSON output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HitView<'a> {
    doc_index: usize,
    score: f64,
    question: &'a Question,
    source: &'a QuestionSource,
}

fn source_line(source: &QuestionSource) -> String {
    format!("{} / {} ({})", source.subject, source.bank_name, source.bank_src)
}

fn run_search(
    config: &Path,
    query: &str,
    limit: Option<usize>,
    candidates: usize,
    json: bool,
) -> Result<()> {
    let (library, index) = open_index(config)?;
    let top_k = limit.unwrap_or(library.assistant_settings().search_top_k);
    let hits = index.search_top_k(query, top_k, candidates);

    if json {
        let views: Vec<HitView> = hits
            .iter()
            .map(|hit| HitView {
                doc_index: hit.doc_index,
                score: hit.score,
                question: index.document_question(hit.doc_index),
                source: index.document_source(hit.doc_index),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if hits.is_empty() {
        eprintln!("⚠️  No similar questions found");
        return Ok(());
    }

    section_top("RESULTS");
    for (rank, hit) in hits.iter().enumerate() {
        let question = index.document_question(hit.doc_index);
        let source = index.document_source(hit.doc_index);
        let rank_label = themed(CYAN, &[BOLD], &format!("{:>2}.", rank + 1));
        let text = truncate(&question.question, 64);
        row(&format!(" {} {}  {}", rank_label, score_value(hit.score), text));
        row(&format!(
            "     {}",
            themed(GRAY, &[DIM], &truncate(&source_line(source), 72))
        ));
        if !question.answers.is_empty() {
            let answer = truncate(&question.answers.join(" | "), 64);
            row(&format!("     answer: {}", themed(YELLOW, &[], &answer)));
        }
    }
    section_bot();
    Ok(())
}

fn read_questions(path: &Path) -> Result<Vec<ScrapedQuestion>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_questions(&content).with_context(|| format!("invalid questions JSON in {}", path.display()))
}

fn run_match(
    config: &Path,
    questions_path: &Path,
    threshold: Option<f64>,
    limit: Option<usize>,
    json: bool,
    export: Option<&Path>,
) -> Result<()> {
    if let Some(t) = threshold {
        if !(0.0..=1.0).contains(&t) {
            bail!("threshold must be between 0 and 1, got {}", t);
        }
    }

    let questions = read_questions(questions_path)?;
    let (library, index) = open_index(config)?;

    let mut policy = MatchPolicy::from(library.assistant_settings());
    if let Some(t) = threshold {
        policy.threshold = t;
    }
    if let Some(k) = limit {
        policy.top_k = k;
    }

    let reports = match_all(&index, &questions, &policy);
    let matched = reports.len() - unmatched(&reports).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        section_top("MATCHES");
        for report in &reports {
            let outcome = &report.outcome;
            let id = pad_right(&truncate(&report.question.id, 10), 10);
            let text = truncate(&report.question.question, 52);
            row(&format!(
                " {} {} {}  {}",
                match_badge(outcome.is_matched()),
                score_value(outcome.best_score()),
                id,
                text
            ));
            if let Some(best) = outcome.best().filter(|_| outcome.is_matched()) {
                let bank_question = index.document_question(best.doc_index);
                let answer = truncate(&bank_question.answers.join(" | "), 60);
                row(&format!("   └ answer: {}", themed(YELLOW, &[], &answer)));
            }
        }
        section_bot();
    }

    eprintln!(
        "✅ Matched {}/{} questions (threshold {:.2})",
        matched,
        reports.len(),
        policy.threshold
    );

    if let Some(path) = export {
        let bank = export_unmatched(&reports);
        let count = bank["data"].as_array().map_or(0, Vec::len);
        fs::write(path, serde_json::to_string_pretty(&bank)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("✅ Exported {} unmatched questions to {}", count, path.display());
    }

    Ok(())
}

fn run_inspect(config: &Path) -> Result<()> {
    let library = open_library(config)?;

    section_top("LIBRARY");
    for subject in library.list_subjects() {
        let banks = library.list_banks(&subject);
        let path = library.subject_path(&subject);
        row(&format!(
            " {}  {}",
            themed(CYAN, &[BOLD], &subject),
            themed(GRAY, &[DIM], &truncate(&path.display().to_string(), 60))
        ));
        if banks.is_empty() {
            row(&format!("   {}", themed(YELLOW, &[], "no banks found")));
        }
        for bank in banks {
            row(&format!(
                "   {} {:>5}  {}",
                pad_right(&truncate(&bank.name, 36), 36),
                bank.size,
                pad_right(bank.kind.as_str(), 14)
            ));
        }
    }
    section_bot();

    let mut index = QuestionSearchIndex::new();
    let built = build_index(&mut index, &library);
    let stats = index.stats();

    section_top("INDEX");
    row(&format!(" documents           {:>8}", stats.documents));
    row(&format!(" duplicates skipped  {:>8}", stats.duplicates_skipped));
    row(&format!(" banks scanned       {:>8}", stats.banks_scanned));
    row(&format!(" banks failed        {:>8}", stats.banks_failed));
    row(&format!(" distinct grams      {:>8}", stats.distinct_grams));
    row(&format!(" longest posting     {:>8}", index.inverted().max_posting_len()));
    section_bot();

    built.map(|_| ())
}
