//! Jenkins transport
//!
//! Thin adapter between the sync core and the Jenkins REST API: status
//! polling, progressive log reads, and the error taxonomy both share.

mod client;
mod error;
mod models;

pub use client::{JenkinsClient, ServerEndpoint};
pub use error::FetchError;
pub use models::{BuildResult, StatusSnapshot};
