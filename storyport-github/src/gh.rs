//! Issue tracker backed by the GitHub CLI (`gh`)

use std::process::{Output, Stdio};

use async_trait::async_trait;
use storyport_core::IssueRequest;
use tokio::process::Command;
use tracing::debug;

use crate::{CreatedIssue, Error, IssueTracker, Result};

/// Creates issues by shelling out to `gh issue create`
#[derive(Debug, Clone)]
pub struct GhCli {
    /// Path to the gh executable (defaults to "gh" in PATH)
    gh_path: String,
    /// Repository to target; gh infers it from the working directory when unset
    repo: Option<String>,
}

impl GhCli {
    /// Create a tracker using `gh` from PATH
    pub fn new() -> Self {
        Self {
            gh_path: "gh".to_string(),
            repo: None,
        }
    }

    /// Use a custom gh executable
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.gh_path = path.into();
        self
    }

    /// Target a specific repository (owner/repo)
    pub fn with_repo(mut self, repo: Option<String>) -> Self {
        self.repo = repo;
        self
    }

    /// Arguments for creating one issue
    pub fn create_args(&self, request: &IssueRequest) -> Vec<String> {
        let mut args = vec![
            "issue".to_string(),
            "create".to_string(),
            "--title".to_string(),
            request.title.clone(),
            "--body".to_string(),
            request.body.clone(),
        ];

        for label in &request.labels {
            args.push("--label".to_string());
            args.push(label.clone());
        }

        if let Some(ref repo) = self.repo {
            args.push("--repo".to_string());
            args.push(repo.clone());
        }

        args
    }

    async fn run<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        Command::new(&self.gh_path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ToolUnavailable {
                        tool: self.gh_path.clone(),
                        reason: "executable not found".to_string(),
                    }
                } else {
                    Error::Io(e)
                }
            })
    }
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new()
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

#[async_trait]
impl IssueTracker for GhCli {
    fn name(&self) -> &'static str {
        "gh"
    }

    async fn check_available(&self) -> Result<()> {
        let output = self.run(["--version"]).await?;

        if !output.status.success() {
            return Err(Error::ToolUnavailable {
                tool: self.gh_path.clone(),
                reason: format!("`{} --version` exited with {}", self.gh_path, output.status),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(version = stdout.lines().next().unwrap_or_default(), "Found gh");
        Ok(())
    }

    async fn check_auth(&self) -> Result<()> {
        let output = self.run(["auth", "status"]).await?;

        if !output.status.success() {
            let stderr = stderr_of(&output);
            return Err(Error::NotAuthenticated(if stderr.is_empty() {
                format!("`{} auth status` exited with {}", self.gh_path, output.status)
            } else {
                stderr
            }));
        }

        debug!("gh is authenticated");
        Ok(())
    }

    async fn create_issue(&self, request: &IssueRequest) -> Result<CreatedIssue> {
        debug!(title = %request.title, labels = ?request.labels, "Running gh issue create");

        let output = self.run(self.create_args(request)).await?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: format!("{} issue create", self.gh_path),
                status: output.status.to_string(),
                stderr: stderr_of(&output),
            });
        }

        Ok(CreatedIssue::from_output(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }
}
