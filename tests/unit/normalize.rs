//! Normalization and gram slicing through the public API.

use quizmatch::{gram_set, make_ngrams, make_search_grams, normalize_for_search};

#[test]
fn test_mixed_script_question() {
    assert_eq!(
        normalize_for_search("（单选题）C++中，下列 关于 class 的说法正确的是？"),
        "单选题c中下列关于class的说法正确的是"
    );
}

#[test]
fn test_full_width_letters_are_kept_and_lowercased() {
    // Full-width Latin letters are Lu and lowercase to Ll
    assert_eq!(normalize_for_search("ＡＢＣ"), "ａｂｃ");
}

#[test]
fn test_digits_from_other_scripts_are_kept() {
    assert_eq!(normalize_for_search("٣ + ३"), "٣३");
}

#[test]
fn test_html_leftovers_are_dropped_but_tag_names_remain() {
    assert_eq!(normalize_for_search("<b>bold</b>"), "bboldb");
}

#[test]
fn test_three_char_text_uses_unigrams() {
    assert_eq!(make_search_grams("对不对"), vec!["对", "不", "对"]);
    assert_eq!(gram_set("对不对").len(), 2);
}

#[test]
fn test_four_char_text_uses_bigrams() {
    assert_eq!(make_search_grams("正确错误"), vec!["正确", "确错", "错误"]);
}

#[test]
fn test_single_char_text_is_one_unigram() {
    assert_eq!(make_search_grams("A."), vec!["a"]);
}

#[test]
fn test_ngrams_larger_than_text() {
    assert_eq!(make_ngrams("abc", 5), vec!["abc"]);
}

#[test]
fn test_supplementary_plane_ideographs_form_grams() {
    let text = "\u{20000}\u{20001}\u{20002}\u{20003}";
    let grams = make_search_grams(text);
    assert_eq!(grams.len(), 3);
    assert_eq!(grams[0], "\u{20000}\u{20001}");
}
