//! HTTP access to a Jenkins job
//!
//! Two reads are needed:
//! - `{job}/lastBuild/api/json`: status of the latest build
//! - `{job}/{build}/logText/progressiveText?start=N`: console bytes from
//!   offset N, with `X-More-Data` / `X-Text-Size` response headers
//!
//! Logs are read by explicit build number so a chunk can never contain bytes
//! from a build other than the one the tracker asked about.

use super::error::FetchError;
use super::models::StatusSnapshot;
use crate::sync::LogChunk;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

/// Response header: server expects more bytes after this chunk
const MORE_DATA_HEADER: &str = "X-More-Data";
/// Response header: authoritative byte offset for the next read
const TEXT_SIZE_HEADER: &str = "X-Text-Size";

/// Where the job lives and how to authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    /// Job URL, e.g. `https://ci.example.com/job/app/job/main`
    pub job_url: String,
    pub user: String,
    pub token: String,
}

impl ServerEndpoint {
    pub fn new(job_url: &str, user: &str, token: &str) -> Self {
        Self {
            job_url: job_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            token: token.to_string(),
        }
    }

    pub fn status_url(&self) -> String {
        format!("{}/lastBuild/api/json", self.job_url)
    }

    pub fn log_url(&self, build: u64, start: u64) -> String {
        format!(
            "{}/{}/logText/progressiveText?start={}",
            self.job_url, build, start
        )
    }

    fn has_credentials(&self) -> bool {
        !self.user.is_empty() || !self.token.is_empty()
    }
}

/// Jenkins API client
///
/// Cheap to share: the reqwest client is internally reference-counted and
/// the endpoint sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    http: reqwest::Client,
    endpoint: Arc<ServerEndpoint>,
}

impl JenkinsClient {
    /// Create a client whose every request carries `timeout`
    pub fn new(endpoint: ServerEndpoint, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jenkins-tail/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: Arc::new(endpoint),
        })
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    /// Fetch the latest build's status
    pub async fn fetch_status(&self) -> Result<StatusSnapshot, FetchError> {
        let url = self.endpoint.status_url();
        let response = self.get(&url).send().await?;
        let response = check_status(response, &url)?;

        let body = response.text().await?;
        StatusSnapshot::from_json(&body)
            .map_err(|e| FetchError::Decode(format!("status payload: {}", e)))
    }

    /// Read console output of `build` starting at byte `offset`
    pub async fn fetch_log_chunk(&self, build: u64, offset: u64) -> Result<LogChunk, FetchError> {
        let url = self.endpoint.log_url(build, offset);
        let response = self.get(&url).send().await?;
        let response = check_status(response, &url)?;

        let (more_data, new_offset) = parse_progress_headers(response.headers(), offset)?;
        let bytes = response.bytes().await?;

        tracing::trace!(
            "build #{} read {} bytes at {} (next {}, more: {})",
            build,
            bytes.len(),
            offset,
            new_offset,
            more_data
        );

        Ok(LogChunk {
            start: offset,
            text: String::from_utf8_lossy(&bytes).into_owned(),
            more_data,
            new_offset,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self.http.get(url);
        if self.endpoint.has_credentials() {
            req.basic_auth(&self.endpoint.user, Some(&self.endpoint.token))
        } else {
            req
        }
    }
}

/// Map non-success statuses to the fatal error
fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Auth {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Extract `(more_data, new_offset)` from a progressive-read response
///
/// A missing or unparseable `X-More-Data` means no more data. `X-Text-Size`
/// is mandatory and may not move backwards.
pub(crate) fn parse_progress_headers(
    headers: &HeaderMap,
    offset: u64,
) -> Result<(bool, u64), FetchError> {
    let more_data = headers
        .get(MORE_DATA_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "t" | "1"))
        .unwrap_or(false);

    let new_offset = headers
        .get(TEXT_SIZE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or_else(|| FetchError::Decode(format!("missing or invalid {} header", TEXT_SIZE_HEADER)))?;

    if new_offset < offset {
        return Err(FetchError::Decode(format!(
            "{} went backwards ({} < {})",
            TEXT_SIZE_HEADER, new_offset, offset
        )));
    }

    Ok((more_data, new_offset))
}
