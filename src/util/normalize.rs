// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search normalization and n-gram slicing.
//!
//! Question text arrives in every shape imaginable: HTML-ish leftovers from a
//! scraped page, full-width punctuation, stray spaces between CJK characters,
//! option labels like "A." glued to the choice. None of that carries meaning
//! for "is this the same question", so normalization throws away everything
//! except letters, digits, and CJK ideographs, then lowercases what remains.
//!
//! # Gram size
//!
//! Normalized text is sliced into overlapping character windows. Short texts
//! (fewer than 4 characters after normalization, think "对" or "A") use
//! unigrams so they can still match something; everything else uses bigrams,
//! which keeps posting lists manageable for prose.
//!
//! # Code points, not code units
//!
//! Iteration is over `char`s (Unicode scalar values), so the supplementary
//! CJK extension blocks (B through F) are recognized as ideographs instead of
//! being split into surrogate halves. All lengths in this module are
//! character counts, never byte counts.

use std::collections::HashSet;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Texts shorter than this (in characters, after normalization) use unigrams.
pub const BIGRAM_MIN_CHARS: usize = 4;

/// Check if a code point is a CJK unified ideograph.
///
/// Covers the Basic block, Extension A, and Extensions B through F.
#[inline]
pub fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF |    // CJK Unified Ideographs
        0x3400..=0x4DBF |    // Extension A
        0x20000..=0x2A6DF |  // Extension B
        0x2A700..=0x2B73F |  // Extension C
        0x2B740..=0x2B81F |  // Extension D
        0x2B820..=0x2CEAF    // Extension E/F
    )
}

/// Check if a code point is a letter (L*) or a number (N*) by general
/// category.
///
/// Narrower than `char::is_alphanumeric`: combining vowel signs (Mc/Mn) and
/// enclosed option labels like Ⓐ (So) are not letters here.
#[inline]
pub fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

#[inline]
fn is_retained(c: char) -> bool {
    is_letter_or_number(c) || is_cjk(c)
}

/// Normalize text for matching: keep letters, digits, and CJK ideographs,
/// lowercased. Everything else (whitespace, punctuation, symbols, markup
/// delimiters) is dropped.
///
/// - "What is 2+2?" → "whatis22"
/// - "下列 说法，正确的是（ ）" → "下列说法正确的是"
/// - "" → ""
///
/// Idempotent: a lowercase expansion that produces a character outside the
/// retained set (e.g. the combining dot from 'İ') is dropped here rather than
/// on a second pass.
pub fn normalize_for_search(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_retained(c)) {
        out.extend(c.to_lowercase().filter(|&lc| is_retained(lc)));
    }
    out
}

/// Slice normalized text into overlapping windows of `n` characters.
///
/// - `n == 0` or empty text: no grams
/// - text no longer than `n`: the whole text is the only gram
/// - otherwise: one gram starting at every offset `0..=len - n`
///
/// Duplicates are kept; callers that want a set should use [`gram_set`].
pub fn make_ngrams(normalized: &str, n: usize) -> Vec<String> {
    if n == 0 || normalized.is_empty() {
        return Vec::new();
    }

    // Byte offset of every char boundary, including the end of the string
    let boundaries: Vec<usize> = normalized
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(normalized.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    if char_len <= n {
        return vec![normalized.to_string()];
    }

    (0..=char_len - n)
        .map(|i| normalized[boundaries[i]..boundaries[i + n]].to_string())
        .collect()
}

/// Gram size used for a normalized text of `char_len` characters.
#[inline]
pub fn search_gram_size(char_len: usize) -> usize {
    if char_len < BIGRAM_MIN_CHARS {
        1
    } else {
        2
    }
}

/// Normalize `text` and slice it with the adaptive gram size.
pub fn make_search_grams(text: &str) -> Vec<String> {
    let normalized = normalize_for_search(text);
    if normalized.is_empty() {
        return Vec::new();
    }
    let n = search_gram_size(normalized.chars().count());
    make_ngrams(&normalized, n)
}

/// Deduplicated search grams of `text`.
///
/// This is the unit both indexing and querying work with: Dice similarity is
/// defined over sets, so a gram repeated ten times in a document counts once.
pub fn gram_set(text: &str) -> HashSet<String> {
    make_search_grams(text).into_iter().collect()
}
