//! Configuration for the log tailer
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. Config file (~/.config/jenkins-tail/config.toml)
//! 4. Built-in defaults (lowest priority)

use crate::cli::RunArgs;
use crate::jenkins::ServerEndpoint;
use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod display;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use display::{FileWrap, WrapConfig};
pub use observability::{FileLogging, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Job URL, e.g. `https://ci.example.com/job/app`
    pub url: Option<String>,

    /// Basic-auth user (empty: anonymous)
    pub user: String,

    /// API token or password
    pub token: String,

    /// Seconds between status polls
    pub poll_interval_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Full-screen view (false streams to stdout)
    pub enable_tui: bool,

    /// Log body wrapping
    pub wrap: WrapConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            user: String::new(),
            token: String::new(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            enable_tui: true,
            wrap: WrapConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,

    /// Optional [wrap] section
    pub wrap: Option<FileWrap>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/jenkins-tail/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("jenkins-tail").join("config.toml"))
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed:
    /// tailing the wrong server with silently defaulted settings is worse.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values (url, user, token)");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Negative or quoted numbers for intervals");
                    eprintln!("    - Typos in section names ([wrap], [logging])\n");
                    eprintln!("  To reset, delete the file and restart jenkins-tail.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Connection: env > file > default
        let url = env("JENKINS_URL").or(file.url).filter(|u| !u.trim().is_empty());
        let user = env("JENKINS_USER").or(file.user).unwrap_or(defaults.user);
        let token = env("JENKINS_TOKEN").or(file.token).unwrap_or(defaults.token);

        // Timing: env > file > default, unparseable env values fall through
        let poll_interval_secs = env("JENKINS_TAIL_INTERVAL")
            .and_then(|v| v.trim().parse().ok())
            .or(file.poll_interval_secs)
            .unwrap_or(defaults.poll_interval_secs);

        let request_timeout_secs = env("JENKINS_TAIL_TIMEOUT")
            .and_then(|v| v.trim().parse().ok())
            .or(file.request_timeout_secs)
            .unwrap_or(defaults.request_timeout_secs);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("JENKINS_TAIL_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(defaults.enable_tui);

        Self {
            url,
            user,
            token,
            poll_interval_secs,
            request_timeout_secs,
            enable_tui,
            wrap: WrapConfig::from_file(file.wrap),
            logging: LoggingConfig::from_file(file.logging),
        }
    }

    /// Overlay command-line flags
    pub fn apply_cli(&mut self, args: &RunArgs) {
        if let Some(url) = &args.url {
            self.url = Some(url.clone());
        }
        if let Some(user) = &args.user {
            self.user = user.clone();
        }
        if let Some(token) = &args.token {
            self.token = token.clone();
        }
        if let Some(secs) = args.interval {
            self.poll_interval_secs = secs;
        }
        if let Some(secs) = args.timeout {
            self.request_timeout_secs = secs;
        }
        if let Some(indent) = args.indent {
            self.wrap.indent_wrapped = indent;
        }
        if args.no_tui {
            self.enable_tui = false;
        }
    }

    /// Time between status polls (never below one second)
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Connection details for the client; fails without a job URL
    pub fn endpoint(&self) -> anyhow::Result<ServerEndpoint> {
        let url = self.url.as_deref().context(
            "No Jenkins job URL configured (use --url, JENKINS_URL, or `url` in the config file)",
        )?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("Job URL must start with http:// or https://, got {:?}", url);
        }

        Ok(ServerEndpoint::new(url, &self.user, &self.token))
    }
}
