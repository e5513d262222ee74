//! Configuration tests
//!
//! Precedence (flags > env > file > defaults) and the file format produced by
//! `to_toml()`. When you add a field, the round-trip test below must learn it
//! or it will fail.

use super::observability::LogRotation;
use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("test TOML should parse")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// Every persisted field must survive `to_toml()` -> parse -> `from_sources()`.
#[test]
fn test_config_roundtrip_values() {
    let mut config = Config::default();
    config.url = Some("https://ci.example.com/job/app".to_string());
    config.user = "builder".to_string();
    config.poll_interval_secs = 2;
    config.request_timeout_secs = 30;
    config.wrap.indent_wrapped = 4;
    config.wrap.keep_newlines = false;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from("/var/log/jt");
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_prefix = "tail".to_string();

    let toml_str = config.to_toml();
    let back = Config::from_sources(parse(&toml_str), no_env);

    assert_eq!(back.url, config.url);
    assert_eq!(back.user, config.user);
    assert_eq!(back.poll_interval_secs, 2);
    assert_eq!(back.request_timeout_secs, 30);
    assert_eq!(back.wrap, config.wrap);
    assert_eq!(back.logging.level, "debug");
    assert!(back.logging.file_enabled);
    assert_eq!(back.logging.file_dir, PathBuf::from("/var/log/jt"));
    assert_eq!(back.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(back.logging.file_prefix, "tail");
}

#[test]
fn test_token_never_serialized() {
    let mut config = Config::default();
    config.token = "s3cr3t-api-token".to_string();

    let toml_str = config.to_toml();
    assert!(!toml_str.contains("s3cr3t-api-token"));
    assert!(toml_str.contains("<set, not shown>"));

    // Commented-out line: the parsed file carries no token
    assert!(parse(&toml_str).token.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_without_file_or_env() {
    let config = Config::from_sources(FileConfig::default(), no_env);
    assert_eq!(config.url, None);
    assert_eq!(config.poll_interval_secs, 5);
    assert_eq!(config.request_timeout_secs, 10);
    assert!(config.enable_tui);
    assert_eq!(config.wrap.indent_wrapped, 0);
    assert!(config.wrap.keep_newlines);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
        url = "https://file.example.com/job/a"
        user = "file-user"
        token = "file-token"
        poll_interval_secs = 30
        "#,
    );
    let env = env_from(&[
        ("JENKINS_URL", "https://env.example.com/job/b"),
        ("JENKINS_TOKEN", "env-token"),
        ("JENKINS_TAIL_INTERVAL", "3"),
        ("JENKINS_TAIL_NO_TUI", "1"),
    ]);

    let config = Config::from_sources(file, env);
    assert_eq!(config.url.as_deref(), Some("https://env.example.com/job/b"));
    assert_eq!(config.user, "file-user");
    assert_eq!(config.token, "env-token");
    assert_eq!(config.poll_interval_secs, 3);
    assert!(!config.enable_tui);
}

#[test]
fn test_unparseable_env_number_falls_back_to_file() {
    let file = parse("request_timeout_secs = 20");
    let env = env_from(&[("JENKINS_TAIL_TIMEOUT", "soon")]);
    assert_eq!(Config::from_sources(file, env).request_timeout_secs, 20);
}

#[test]
fn test_cli_overrides_everything() {
    let env = env_from(&[("JENKINS_URL", "https://env.example.com/job/b")]);
    let mut config = Config::from_sources(parse("poll_interval_secs = 30"), env);

    config.apply_cli(&RunArgs {
        url: Some("https://cli.example.com/job/c".to_string()),
        user: None,
        token: Some("cli-token".to_string()),
        interval: Some(1),
        timeout: None,
        indent: Some(2),
        no_tui: true,
    });

    assert_eq!(config.url.as_deref(), Some("https://cli.example.com/job/c"));
    assert_eq!(config.token, "cli-token");
    assert_eq!(config.poll_interval_secs, 1);
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.wrap.indent_wrapped, 2);
    assert!(!config.enable_tui);
}

#[test]
fn test_zero_interval_is_clamped() {
    let mut config = Config::default();
    config.poll_interval_secs = 0;
    config.request_timeout_secs = 0;
    assert_eq!(config.poll_interval(), Duration::from_secs(1));
    assert_eq!(config.request_timeout(), Duration::from_secs(1));
}

// ─────────────────────────────────────────────────────────────────────────────
// Endpoint
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_url_is_an_error() {
    let err = Config::default().endpoint().unwrap_err();
    assert!(err.to_string().contains("No Jenkins job URL"));

    // Blank values count as missing
    let config = Config::from_sources(parse(r#"url = "  ""#), no_env);
    assert!(config.endpoint().is_err());
}

#[test]
fn test_url_scheme_required() {
    let mut config = Config::default();
    config.url = Some("ci.example.com/job/app".to_string());
    assert!(config.endpoint().is_err());
}

#[test]
fn test_endpoint_carries_credentials() {
    let mut config = Config::default();
    config.url = Some("https://ci.example.com/job/app/".to_string());
    config.user = "me".to_string();
    config.token = "tok".to_string();

    let ep = config.endpoint().unwrap();
    assert_eq!(ep.job_url, "https://ci.example.com/job/app");
    assert_eq!(ep.user, "me");
    assert_eq!(ep.token, "tok");
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::from_str("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::from_str("never"), LogRotation::Never);
    assert_eq!(LogRotation::from_str("weekly"), LogRotation::Daily);
}

#[test]
fn test_log_level_is_normalized() {
    let config = Config::from_sources(parse("[logging]\nlevel = \" DEBUG \"\n"), no_env);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.filter_directive(), "jenkins_tail=debug");

    let config = Config::from_sources(parse("[logging]\nlevel = \"chatty\"\n"), no_env);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_blank_file_prefix_keeps_default() {
    let config = Config::from_sources(parse("[logging]\nfile_prefix = \"  \"\n"), no_env);
    assert_eq!(config.logging.file_prefix, "jenkins-tail");
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::from_sources(
        parse(
            r#"
            [wrap]
            indent_wrapped = 2

            [logging]
            file_enabled = true
            "#,
        ),
        no_env,
    );
    assert_eq!(config.wrap.indent_wrapped, 2);
    assert!(config.wrap.keep_newlines);
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_prefix, "jenkins-tail");
}

#[test]
fn test_wrap_options_use_surface_width() {
    let wrap = WrapConfig {
        indent_wrapped: 2,
        keep_newlines: false,
    };
    let opts = wrap.options(80);
    assert_eq!(opts.limit, 80);
    assert_eq!(opts.indent_wrapped, 2);
    assert!(!opts.keep_newlines);
}

#[test]
fn test_malformed_file_is_rejected() {
    assert!(toml::from_str::<FileConfig>("poll_interval_secs = \"five\"").is_err());
    assert!(toml::from_str::<FileConfig>("[wrap\nindent_wrapped = 1").is_err());
}
