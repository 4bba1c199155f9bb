// tests/config_test.rs
use release_bump::config::{load_config, Config};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
manifest = "app/build.gradle"
remote = "upstream"

[identity]
name = "release-bot"
email = "bot@example.com"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.manifest, "app/build.gradle");
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.identity.name, "release-bot");
    assert_eq!(config.identity.email, "bot@example.com");
}

#[test]
fn test_load_empty_file_uses_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    let defaults = Config::default();
    assert_eq!(config.manifest, defaults.manifest);
    assert_eq!(config.remote, defaults.remote);
    assert_eq!(config.identity, defaults.identity);
}

#[test]
fn test_load_missing_explicit_path_fails() {
    let result = load_config(Some("/nonexistent/releasebump.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_toml_fails() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"manifest = [not valid").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(result.is_err());
}
