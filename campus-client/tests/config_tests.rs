use campus_client::config::{ClientConfig, ConfigError};
use proptest::prelude::*;
use std::io::Write;

fn base_config() -> ClientConfig {
    ClientConfig {
        api_base_url: "http://localhost:5000".to_string(),
        request_timeout_ms: 5_000,
        min_code_len: 2,
        log_filter: Some("campus_client=debug".to_string()),
    }
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn config_loads_from_file() {
    let file = write_config(
        r#"
api_base_url = "https://api.campus.example/"
request_timeout_ms = 8000
min_code_len = 3
log_filter = "info"
"#,
    );
    let config = ClientConfig::from_path(file.path()).unwrap();
    assert_eq!(config.api_base_url, "https://api.campus.example/");
    assert_eq!(config.min_code_len, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn config_rejects_unknown_fields() {
    let file = write_config(
        r#"
api_base_url = "http://localhost:5000"
request_timeout_ms = 8000
theme = "dark"
"#,
    );
    assert!(matches!(
        ClientConfig::from_path(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn config_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("campus.toml");
    assert!(matches!(
        ClientConfig::from_path(&missing),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn config_requires_http_scheme() {
    let mut config = base_config();
    config.api_base_url = "localhost:5000".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "api_base_url",
            ..
        })
    ));
}

#[test]
fn config_requires_timeout() {
    let mut config = base_config();
    config.request_timeout_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn config_requires_positive_min_code_len() {
    let mut config = base_config();
    config.min_code_len = 0;
    assert!(config.validate().is_err());
}

#[test]
fn config_rejects_blank_log_filter() {
    let mut config = base_config();
    config.log_filter = Some("  ".to_string());
    assert!(config.validate().is_err());
    config.log_filter = None;
    assert!(config.validate().is_ok());
}

proptest! {
    #[test]
    fn prop_positive_timeouts_are_valid(timeout in 1u64..600_000, min_len in 1usize..8) {
        let mut config = base_config();
        config.request_timeout_ms = timeout;
        config.min_code_len = min_len;
        prop_assert!(config.validate().is_ok());
    }

    #[test]
    fn prop_blank_base_url_is_rejected(spaces in "[ \t]{0,4}") {
        let mut config = base_config();
        config.api_base_url = spaces;
        prop_assert!(config.validate().is_err());
    }
}
