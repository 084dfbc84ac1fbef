// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search hits get their numbers and their order.
//!
//! The score is a plain Dice coefficient over gram sets. Ordering is score
//! first, document id second, so equal scores always come out in ingestion
//! order and two identical queries always produce identical result lists.

mod core;
pub mod ranking;

pub use core::*;
pub use ranking::{compare_candidates, compare_hits, Candidate};
