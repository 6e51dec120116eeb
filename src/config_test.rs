use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_when_nothing_is_configured() {
    let config = Config::resolve(FileConfig::default(), env_from(&[]), &Overrides::default());

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.aws_cli, DEFAULT_AWS_CLI);
    assert!(matches!(config.region(), Err(ConfigError::MissingRegion)));
    assert!(matches!(config.token(), Err(ConfigError::MissingToken)));
}

#[test]
fn test_environment_overrides_file() {
    let file = FileConfig {
        api_url: Some("https://file.example.com".to_string()),
        token: Some("file-token".to_string()),
        region: Some("eu-west-1".to_string()),
        aws_cli: None,
    };
    let env = env_from(&[
        ("PILVI_API_URL", "https://env.example.com/"),
        ("PILVI_TOKEN", "env-token"),
        ("AWS_REGION", "us-east-2"),
    ]);

    let config = Config::resolve(file, env, &Overrides::default());

    // Trailing slash is dropped so paths can be appended
    assert_eq!(config.api_url, "https://env.example.com");
    assert_eq!(config.token().ok(), Some("env-token"));
    assert_eq!(config.region().ok(), Some("us-east-2"));
}

#[test]
fn test_region_flag_wins_over_environment() {
    let env = env_from(&[("AWS_REGION", "us-east-2"), ("AWS_DEFAULT_REGION", "us-west-1")]);
    let overrides = Overrides {
        region: Some("ap-south-1".to_string()),
    };

    let config = Config::resolve(FileConfig::default(), env, &overrides);

    assert_eq!(config.region().ok(), Some("ap-south-1"));
}

#[test]
fn test_default_region_variable_is_a_fallback() {
    let env = env_from(&[("AWS_DEFAULT_REGION", "us-west-1")]);

    let config = Config::resolve(FileConfig::default(), env, &Overrides::default());

    assert_eq!(config.region().ok(), Some("us-west-1"));
}

#[test]
fn test_empty_environment_values_are_ignored() {
    let file = FileConfig {
        token: Some("file-token".to_string()),
        ..Default::default()
    };
    let env = env_from(&[("PILVI_TOKEN", "")]);

    let config = Config::resolve(file, env, &Overrides::default());

    assert_eq!(config.token().ok(), Some("file-token"));
}

#[test]
fn test_parse_file_reads_known_keys() {
    let raw = r#"
api_url = "https://api.stage.example.com"
token = "abc"
region = "us-east-1"
aws_cli = "/usr/local/bin/aws"
"#;

    let file = parse_file(raw).unwrap();

    assert_eq!(file.api_url.as_deref(), Some("https://api.stage.example.com"));
    assert_eq!(file.token.as_deref(), Some("abc"));
    assert_eq!(file.region.as_deref(), Some("us-east-1"));
    assert_eq!(file.aws_cli.as_deref(), Some("/usr/local/bin/aws"));
}

#[test]
fn test_read_file_reports_parse_errors_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "region = [").unwrap();

    let err = read_file(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}
