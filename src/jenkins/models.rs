//! Status payload and its decoded snapshot
//!
//! Jenkins' `lastBuild/api/json` returns a large document (actions, change
//! sets, culprits...). Only the fields the viewer shows are mapped; serde
//! ignores the rest.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;

/// Outcome of a build as reported by Jenkins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildResult {
    Success,
    Failure,
    Unstable,
    Aborted,
    /// Still running (`null`), `NOT_BUILT`, or anything unrecognized
    #[default]
    Unknown,
}

impl BuildResult {
    /// Parse Jenkins' result string
    pub fn from_jenkins(s: Option<&str>) -> Self {
        match s {
            Some("SUCCESS") => Self::Success,
            Some("FAILURE") => Self::Failure,
            Some("UNSTABLE") => Self::Unstable,
            Some("ABORTED") => Self::Aborted,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Unstable => "UNSTABLE",
            Self::Aborted => "ABORTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `api/json` document (subset)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobStatus {
    pub number: u64,
    #[serde(default)]
    pub full_display_name: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub building: bool,
    #[serde(default)]
    pub in_progress: bool,
    #[serde(default)]
    pub estimated_duration: i64,
}

/// One status poll's view of the job's latest build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub build: u64,
    pub display_name: String,
    pub started_at: Option<DateTime<Utc>>,
    pub result: BuildResult,
    pub in_progress: bool,
    pub building: bool,
    /// Jenkins' estimate in milliseconds (-1 or 0 when unknown)
    pub estimated_duration_ms: i64,
}

impl From<JobStatus> for StatusSnapshot {
    fn from(raw: JobStatus) -> Self {
        let started_at = if raw.timestamp > 0 {
            Utc.timestamp_millis_opt(raw.timestamp).single()
        } else {
            None
        };

        Self {
            build: raw.number,
            display_name: raw.full_display_name,
            started_at,
            result: BuildResult::from_jenkins(raw.result.as_deref()),
            in_progress: raw.in_progress,
            building: raw.building,
            estimated_duration_ms: raw.estimated_duration,
        }
    }
}

impl StatusSnapshot {
    /// Whether the build is still producing output
    pub fn is_running(&self) -> bool {
        self.in_progress || self.building
    }

    /// Parse an `api/json` body
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<JobStatus>(body).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_running_build() {
        let body = r##"{
            "_class": "org.jenkinsci.plugins.workflow.job.WorkflowRun",
            "actions": [{"_class": "hudson.model.CauseAction", "causes": []}],
            "building": true,
            "displayName": "#42",
            "duration": 0,
            "estimatedDuration": 93000,
            "fullDisplayName": "pipeline #42",
            "id": "42",
            "number": 42,
            "result": null,
            "timestamp": 1700000000000,
            "inProgress": true,
            "changeSets": []
        }"##;

        let snap = StatusSnapshot::from_json(body).unwrap();
        assert_eq!(snap.build, 42);
        assert_eq!(snap.display_name, "pipeline #42");
        assert_eq!(snap.result, BuildResult::Unknown);
        assert!(snap.in_progress);
        assert!(snap.is_running());
        assert_eq!(snap.estimated_duration_ms, 93000);
        assert_eq!(
            snap.started_at.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_decode_finished_build() {
        let body = r#"{"number": 7, "result": "UNSTABLE", "building": false, "inProgress": false, "timestamp": 0}"#;
        let snap = StatusSnapshot::from_json(body).unwrap();
        assert_eq!(snap.result, BuildResult::Unstable);
        assert!(!snap.is_running());
        assert_eq!(snap.started_at, None);
    }

    #[test]
    fn test_missing_number_is_an_error() {
        assert!(StatusSnapshot::from_json(r#"{"result": "SUCCESS"}"#).is_err());
        assert!(StatusSnapshot::from_json("<html>login</html>").is_err());
    }

    #[test]
    fn test_result_strings() {
        assert_eq!(BuildResult::from_jenkins(Some("SUCCESS")), BuildResult::Success);
        assert_eq!(BuildResult::from_jenkins(Some("FAILURE")), BuildResult::Failure);
        assert_eq!(BuildResult::from_jenkins(Some("ABORTED")), BuildResult::Aborted);
        assert_eq!(BuildResult::from_jenkins(Some("NOT_BUILT")), BuildResult::Unknown);
        assert_eq!(BuildResult::from_jenkins(None), BuildResult::Unknown);
    }
}
