//! Ranking tests: scores and ordering of hits.

use quizmatch::{QuestionSearchIndex, DEFAULT_CANDIDATE_LIMIT};

use crate::common::{build_index, build_index_from, make_choice, InMemoryProvider};

#[test]
fn test_what_is_two_plus_two() {
    let provider = InMemoryProvider::new().with_bank(
        "Math",
        "basics",
        vec![
            make_choice("What is 2+2?", &["3", "4"]),
            make_choice("What is 3+3?", &["5", "6"]),
        ],
    );
    let index = build_index_from(provider);

    let hits = index.search("what is 2 + 2 3 4", 5);
    assert_eq!(hits[0].doc_index, 0);
    assert_eq!(hits[0].score, 1.0);
    assert!(hits.len() <= 2);
    assert!(hits.iter().skip(1).all(|h| h.score < hits[0].score));
}

#[test]
fn test_stem_only_query_scores_against_stem_and_choices() {
    let provider = InMemoryProvider::new().with_bank(
        "Math",
        "basics",
        vec![
            make_choice("What is 2+2?", &["3", "4"]),
            make_choice("What is 3+3?", &["5", "6"]),
        ],
    );
    let index = build_index_from(provider);

    // "whatis22": 7 bigrams. Doc 0 "whatis2234" has 9 and shares all 7,
    // doc 1 "whatis3356" has 9 and shares 5.
    let hits = index.search("what is 2+2", 5);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].doc_index, 0);
    assert!((hits[0].score - 0.875).abs() < 1e-12);
    assert_eq!(hits[1].doc_index, 1);
    assert!((hits[1].score - 0.625).abs() < 1e-12);
}

#[test]
fn test_partial_query_still_finds_question() {
    let index = build_index(&[
        "下列关于指针的说法正确的是",
        "下列关于引用的说法错误的是",
        "以下哪个不是C++关键字",
    ]);
    let hits = index.search("关于指针的说法", 3);
    assert_eq!(hits[0].doc_index, 0);
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn test_scores_are_in_unit_interval() {
    let index = build_index(&["alpha beta", "beta gamma", "gamma delta", "epsilon"]);
    for hit in index.search("beta gamma delta", 10) {
        assert!(hit.score > 0.0 && hit.score <= 1.0, "score {} out of range", hit.score);
    }
}

#[test]
fn test_results_sorted_best_first() {
    let index = build_index(&["abcdefgh", "abcdxxxx", "abxxxxxx", "zzzzzzzz"]);
    let hits = index.search("abcdefgh", 10);
    assert_eq!(
        hits.iter().map(|h| h.doc_index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_disjoint_documents_never_appear() {
    let index = build_index(&["aaaa", "bbbb", "cccc"]);
    let hits = index.search("bbbb", 10);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_index, 1);
}

#[test]
fn test_top_k_limits_results() {
    let index = build_index(&["ab cd", "ab ef", "ab gh", "ab ij", "ab kl"]);
    assert_eq!(index.search("abzz", 10).len(), 5);
    assert_eq!(index.search("abzz", 3).len(), 3);
    assert_eq!(index.search("abzz", 0).len(), 0);
}

#[test]
fn test_candidate_limit_is_a_rough_cut() {
    let index = build_index(&["abcd", "abce", "abxy"]);
    let all = index.search_top_k("abcd", 10, DEFAULT_CANDIDATE_LIMIT);
    assert_eq!(all.len(), 3);

    let cut = index.search_top_k("abcd", 10, 2);
    assert_eq!(
        cut.iter().map(|h| h.doc_index).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert!(index.search_top_k("abcd", 10, 0).is_empty());
}

#[test]
fn test_empty_and_punctuation_queries() {
    let index = build_index(&["hello world"]);
    assert!(index.search("", 5).is_empty());
    assert!(index.search("   ", 5).is_empty());
    assert!(index.search("?!。，", 5).is_empty());
}

#[test]
fn test_unbuilt_index_returns_nothing() {
    let index = QuestionSearchIndex::new();
    assert!(index.search("hello", 5).is_empty());
}

#[test]
fn test_choices_participate_in_matching() {
    let provider = InMemoryProvider::new().with_bank(
        "S",
        "b",
        vec![
            make_choice("下列说法正确的是", &["指针可以为空", "引用可以为空"]),
            make_choice("下列说法正确的是", &["数组长度可变", "向量长度可变"]),
        ],
    );
    let index = build_index_from(provider);
    let hits = index.search("下列说法正确的是 数组长度可变 向量长度可变", 2);
    assert_eq!(hits[0].doc_index, 1);
    assert_eq!(hits[0].score, 1.0);
}
