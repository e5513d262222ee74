//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the configuration as a config file
    ///
    /// The token is never written out; it is shown as set/unset only.
    pub fn to_toml(&self) -> String {
        let url = match &self.url {
            Some(url) => format!("url = {:?}", url),
            None => "# url = \"https://ci.example.com/job/my-app/job/main\"".to_string(),
        };

        let token = if self.token.is_empty() {
            "# token = \"...\"            # prefer JENKINS_TOKEN".to_string()
        } else {
            "# token = <set, not shown>".to_string()
        };

        format!(
            r#"# jenkins-tail configuration

# Jenkins job to follow (JENKINS_URL overrides)
{url}

# Basic-auth credentials (JENKINS_USER / JENKINS_TOKEN override)
user = {user:?}
{token}

# Seconds between status polls
poll_interval_secs = {interval}

# Per-request timeout in seconds
request_timeout_secs = {timeout}

# Log body wrapping
[wrap]
indent_wrapped = {indent}
keep_newlines = {keep_newlines}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level:?}
# JSON file logging (in addition to the TUI pane or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            url = url,
            user = self.user,
            token = token,
            interval = self.poll_interval_secs,
            timeout = self.request_timeout_secs,
            indent = self.wrap.indent_wrapped,
            keep_newlines = self.wrap.keep_newlines,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
