//! The issue tracker capability used by the publisher

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use storyport_core::IssueRequest;

use crate::Result;

static ISSUE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:/issues/|#)(\d+)").unwrap());

/// An issue the tracker reports as created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Issue number, when the tracker reported one
    pub number: Option<u64>,
    /// Issue URL, when the tracker reported one
    pub url: Option<String>,
}

impl CreatedIssue {
    /// Extract the issue URL and number from tool output
    ///
    /// Accepts either an issue URL (`.../issues/42`) or a `#42` reference.
    pub fn from_output(output: &str) -> Self {
        let url = output
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with("http"))
            .map(str::to_string);

        let number = url
            .as_deref()
            .and_then(|u| ISSUE_REFERENCE.captures(u))
            .or_else(|| ISSUE_REFERENCE.captures(output))
            .and_then(|caps| caps[1].parse().ok());

        Self { number, url }
    }
}

/// Something that can create issues
///
/// The publisher only needs these operations, so any tracker client (or a
/// test double) can stand in for the real one.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Check that the tracker can be reached at all
    async fn check_available(&self) -> Result<()>;

    /// Check that we are allowed to create issues
    async fn check_auth(&self) -> Result<()>;

    /// Create one issue
    async fn create_issue(&self, request: &IssueRequest) -> Result<CreatedIssue>;

    /// Run both preflight checks, availability first
    async fn preflight(&self) -> Result<()> {
        self.check_available().await?;
        self.check_auth().await
    }
}
