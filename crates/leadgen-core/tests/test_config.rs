use leadgen_core::config::LeadGenConfig;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_parse_full_config() {
    let json = r#"{
        "gemini": {
            "api_key": "test_key",
            "model": "gemini-2.0-pro",
            "api_url": "http://localhost:8080/v1beta"
        },
        "credits": {
            "state_file": "/tmp/leadgen/credits.json"
        }
    }"#;

    let config = LeadGenConfig::from_json_str(json).expect("Failed to parse config");

    assert_eq!(config.gemini.api_key, "test_key");
    assert_eq!(config.gemini.model, "gemini-2.0-pro");
    assert_eq!(config.gemini.base_url, "http://localhost:8080/v1beta", "api_url should map to base_url");
    assert_eq!(config.credits.state_file(), PathBuf::from("/tmp/leadgen/credits.json"));
}

#[test]
fn test_parse_minimal_config() {
    let config = LeadGenConfig::from_json_str(r#"{"gemini": {"apiKey": "key"}}"#)
        .expect("Failed to parse minimal config");

    assert_eq!(config.gemini.api_key, "key");
    assert_eq!(config.gemini.model, "gemini-2.5-flash", "Default model");
    assert_eq!(
        config.gemini.base_url,
        "https://generativelanguage.googleapis.com/v1beta",
        "Default base URL"
    );
    assert!(config.credits.state_file().ends_with("credits.json"));
}

#[test]
fn test_validate_config() {
    let result = LeadGenConfig::from_json_str(r#"{"gemini": {"api_key": ""}}"#);
    assert!(result.is_err(), "Parsing should fail with an empty API key");
    assert!(result.unwrap_err().to_string().contains("required"), "Error should mention required fields");

    let result = LeadGenConfig::from_json_str(r#"{"gemini": {"api_key": "k", "base_url": "ftp://example.com"}}"#);
    assert!(result.is_err(), "Non-http base URL should be rejected");
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"gemini": {{"api_key": "file_key", "model": "gemini-2.5-flash"}}}}"#).unwrap();

    let config = LeadGenConfig::load(Some(file.path())).expect("Failed to load config file");
    assert!(!config.gemini.api_key.is_empty());
    assert_eq!(config.gemini.model, "gemini-2.5-flash");
}

#[test]
fn test_load_missing_file_fails() {
    let result = LeadGenConfig::load(Some(std::path::Path::new("/nonexistent/leadgen.json")));
    assert!(result.unwrap_err().to_string().contains("not found"));
}
