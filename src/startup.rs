// Startup module - banner and job summary
//
// Printed before the TUI takes over the screen (or at the top of headless
// output), from the preflight status fetch:
// - Version info and the job being followed
// - Config file in use
// - Latest build: name, start time, result, running state

use crate::config::{Config, VERSION};
use crate::jenkins::{BuildResult, ServerEndpoint, StatusSnapshot};
use chrono::Local;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One labelled line of the build summary
pub struct SummaryField {
    pub label: &'static str,
    pub value: String,
}

/// Print the startup banner and build summary to stderr
///
/// stderr keeps stdout clean for `--no-tui` output piped elsewhere.
pub fn print_startup(config: &Config, endpoint: &ServerEndpoint, snapshot: Option<&StatusSnapshot>) {
    use colors::*;

    eprintln!();
    eprintln!("  {BOLD}{CYAN}jenkins-tail{RESET} {DIM}v{VERSION}{RESET}");
    eprintln!("  {DIM}Following{RESET} {BOLD}{}{RESET}", endpoint.job_url);

    if let Some(path) = Config::config_path() {
        if path.exists() {
            eprintln!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            eprintln!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    eprintln!();

    match snapshot {
        Some(snapshot) => {
            for field in summary(snapshot) {
                eprintln!("    {DIM}{:<10}{RESET} {}", field.label, field.value);
            }
            let (color, label) = result_style(snapshot);
            eprintln!("    {DIM}{:<10}{RESET} {color}{label}{RESET}", "Result");
        }
        None => {
            eprintln!("    {YELLOW}○{RESET} {DIM}Job status unavailable, retrying in the background{RESET}");
        }
    }

    eprintln!();
    eprintln!(
        "  {MAGENTA}▸{RESET} Polling every {BOLD}{}s{RESET}",
        config.poll_interval().as_secs()
    );
    eprintln!();
}

/// Repeat the summary into the System Logs pane
pub fn log_startup(endpoint: &ServerEndpoint, snapshot: Option<&StatusSnapshot>) {
    tracing::info!("jenkins-tail v{}", VERSION);
    tracing::info!("▸ Following {}", endpoint.job_url);

    if let Some(snapshot) = snapshot {
        for field in summary(snapshot) {
            tracing::info!("  {}: {}", field.label, field.value);
        }
        tracing::info!("  Result: {}", result_style(snapshot).1);
    }
}

/// Name, start time and running state of a build
pub fn summary(snapshot: &StatusSnapshot) -> Vec<SummaryField> {
    let started = snapshot
        .started_at
        .map(|t| {
            t.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());

    let name = if snapshot.display_name.is_empty() {
        format!("#{}", snapshot.build)
    } else {
        snapshot.display_name.clone()
    };

    vec![
        SummaryField {
            label: "Build",
            value: name,
        },
        SummaryField {
            label: "Started",
            value: started,
        },
        SummaryField {
            label: "Building",
            value: yes_no(snapshot.building).to_string(),
        },
        SummaryField {
            label: "Running",
            value: yes_no(snapshot.in_progress).to_string(),
        },
    ]
}

fn result_style(snapshot: &StatusSnapshot) -> (&'static str, &'static str) {
    use colors::*;

    if snapshot.is_running() {
        return (CYAN, "RUNNING");
    }
    match snapshot.result {
        BuildResult::Success => (GREEN, "SUCCESS"),
        BuildResult::Failure => (RED, "FAILURE"),
        BuildResult::Unstable => (YELLOW, "UNSTABLE"),
        BuildResult::Aborted => (DIM, "ABORTED"),
        BuildResult::Unknown => (DIM, "UNKNOWN"),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            build: 12,
            display_name: String::new(),
            started_at: None,
            result: BuildResult::Failure,
            in_progress: false,
            building: false,
            estimated_duration_ms: 0,
        }
    }

    #[test]
    fn test_summary_falls_back_to_build_number() {
        let fields = summary(&snapshot());
        assert_eq!(fields[0].label, "Build");
        assert_eq!(fields[0].value, "#12");
        assert_eq!(fields[1].value, "-");
        assert_eq!(fields[2].value, "no");
    }

    #[test]
    fn test_running_build_overrides_result() {
        let mut s = snapshot();
        assert_eq!(result_style(&s).1, "FAILURE");
        s.in_progress = true;
        assert_eq!(result_style(&s).1, "RUNNING");
    }
}
