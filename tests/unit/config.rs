//! Library configuration loading.

use quizmatch::{LibraryConfig, LibraryError};
use tempfile::TempDir;

use crate::common::write_config;

#[test]
fn test_load_written_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), &[("C++", Some("banks/cpp")), ("Java", None)]);

    let config = LibraryConfig::load(&path).unwrap();
    let names: Vec<&str> = config.subject_names().collect();
    assert_eq!(names, vec!["C++", "Java"]);
    assert_eq!(config.subject_dir("C++"), "banks/cpp");
    assert_eq!(config.subject_dir("Java"), "Subject/Java");
    assert_eq!(config.assistant.search_top_k, 5);
}

#[test]
fn test_invalid_json_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = LibraryConfig::load(&path).unwrap_err();
    assert!(matches!(err, LibraryError::Json { .. }));
    assert!(err.to_string().contains("config.json"));
}

#[test]
fn test_empty_path_falls_back_to_default() {
    let config: LibraryConfig =
        serde_json::from_str(r#"{"QuestionBank": {"Subject": {"Go": {"path": ""}}}}"#).unwrap();
    assert_eq!(config.subject_dir("Go"), "Subject/Go");
}
