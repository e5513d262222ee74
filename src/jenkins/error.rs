//! Fetch error taxonomy

use std::fmt;

/// Errors that can occur while talking to Jenkins
///
/// Only `Auth` ends the session. The other variants are reported for the
/// current tick and the next natural schedule point tries again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Jenkins answered with a non-success status (bad credentials, wrong URL)
    Auth { status: u16, url: String },
    /// Connection failure or timeout
    Transport(String),
    /// Response arrived but could not be understood
    Decode(String),
}

impl FetchError {
    /// Whether this error should terminate the session
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth { status, url } => write!(
                f,
                "Jenkins responded with status {} for GET {}, expecting 200. Bad credentials?",
                status, url
            ),
            Self::Transport(msg) => write!(f, "Network error: {}", msg),
            Self::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if e.is_timeout() {
            Self::Transport(format!("request timed out ({})", e))
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_auth_is_fatal() {
        let auth = FetchError::Auth {
            status: 401,
            url: "http://ci/job/x/lastBuild/api/json".to_string(),
        };
        assert!(auth.is_fatal());
        assert!(!FetchError::Transport("refused".into()).is_fatal());
        assert!(!FetchError::Decode("bad json".into()).is_fatal());
    }

    #[test]
    fn test_auth_message_mentions_status() {
        let auth = FetchError::Auth {
            status: 403,
            url: "http://ci/job/x".to_string(),
        };
        let msg = auth.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("Bad credentials?"));
    }
}
