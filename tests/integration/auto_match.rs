//! Auto-matching scraped questions against an on-disk library.

use quizmatch::assist::{
    export_unmatched, match_all, parse_questions, unmatched, MatchOutcome, MatchPolicy, ScrapedQuestion,
};
use quizmatch::{Library, QuestionSearchIndex};
use serde_json::json;
use tempfile::TempDir;

use crate::common::{choice, fill_blank, true_false, write_bank, write_config};

fn index_with_settings() -> (TempDir, Library, QuestionSearchIndex) {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), &[("Cpp", None)]);
    write_bank(
        &dir.path().join("Subject/Cpp"),
        "exam.json",
        json!([
            choice("以下哪个是C++的关键字", &["virtual", "function", "method"], "A"),
            choice("sizeof(char) 的值是", &["1", "2", "4"], "A"),
            true_false("构造函数可以是虚函数", "F"),
        ]),
    );
    let library = Library::open(&dir.path().join("config.json")).unwrap();
    let mut index = QuestionSearchIndex::new();
    index.build_from_config(Some(&library)).unwrap();
    (dir, library, index)
}

#[test]
fn test_scraped_page_matches_and_exports_new_questions() {
    let (_dir, library, index) = index_with_settings();
    let policy = MatchPolicy::from(library.assistant_settings());
    assert_eq!(policy.top_k, 5);
    assert_eq!(policy.threshold, 0.85);

    let scraped = vec![
        ScrapedQuestion::new("101", "以下哪个是 C++ 的关键字？")
            .with_choices(["A. virtual", "B. function", "C. method"]),
        ScrapedQuestion::new("102", "构造函数可以是虚函数。"),
        ScrapedQuestion::new("103", "析构函数可以是虚函数。"),
    ];

    let reports = match_all(&index, &scraped, &policy);
    assert!(reports[0].outcome.is_matched());
    assert!(reports[1].outcome.is_matched());
    assert!(matches!(reports[2].outcome, MatchOutcome::BelowThreshold { .. }));

    let best = reports[0].outcome.best().unwrap();
    assert_eq!(index.document_question(best.doc_index).single_answer(), "A");

    let new: Vec<&str> = unmatched(&reports).map(|r| r.question.id.as_str()).collect();
    assert_eq!(new, vec!["103"]);

    let exported = export_unmatched(&reports);
    assert_eq!(exported["data"][0]["question"], "析构函数可以是虚函数。");
}

#[test]
fn test_lower_threshold_accepts_near_miss() {
    let (_dir, _library, index) = index_with_settings();
    let q = ScrapedQuestion::new("103", "析构函数可以是虚函数。");
    let strict = match_all(&index, std::slice::from_ref(&q), &MatchPolicy::default());
    let lenient = match_all(
        &index,
        std::slice::from_ref(&q),
        &MatchPolicy {
            top_k: 5,
            threshold: 0.5,
        },
    );
    assert!(!strict[0].outcome.is_matched());
    assert!(lenient[0].outcome.is_matched());
}

#[test]
fn test_reports_serialize_with_status_tag() {
    let (_dir, _library, index) = index_with_settings();
    let reports = match_all(
        &index,
        &[ScrapedQuestion::new("x", "???")],
        &MatchPolicy::default(),
    );
    let value = serde_json::to_value(&reports).unwrap();
    assert_eq!(value[0]["outcome"]["status"], "noCandidates");
    assert_eq!(value[0]["question"]["id"], "x");
}

#[test]
fn test_bank_file_input_keeps_blanks_and_images_on_export() {
    let (dir, _library, index) = index_with_settings();

    let mut blank = fill_blank("面向对象的三大特性是___、___和___", &["封装", "继承", "多态"]);
    blank["image"] = json!({ "fig1": "oop.png" });
    let path = write_bank(dir.path(), "scraped/page.json", json!([blank]));

    let content = std::fs::read_to_string(&path).unwrap();
    let questions = parse_questions(&content).unwrap();
    assert_eq!(questions[0].blank_num, 3);

    let reports = match_all(&index, &questions, &MatchPolicy::default());
    let exported = export_unmatched(&reports);
    let entry = &exported["data"][0];
    assert_eq!(entry["type"], "FillBlank");
    assert_eq!(entry["BlankNum"], 3);
    assert_eq!(entry["image"]["fig1"], "oop.png");
    assert_eq!(entry["_id"], "idx_0");
}
