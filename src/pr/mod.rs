pub mod types;

pub use types::{PrRef, Repository};

use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Program used to fetch pull request diffs.
pub const DEFAULT_PROGRAM: &str = "gh";

#[derive(Debug, Error)]
pub enum PrError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error fetching PR diff ({status}): {stderr}")]
    CommandFailed { status: ExitStatus, stderr: String },

    #[error("PR diff for #{0} is empty")]
    EmptyDiff(String),
}

/// Fetches pull request diffs by shelling out to the GitHub CLI.
#[derive(Debug, Clone)]
pub struct DiffFetcher {
    program: String,
}

impl Default for DiffFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl DiffFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `<program> pr diff <number> --repo <owner/name>` and return its stdout.
    ///
    /// A non-zero exit surfaces the tool's stderr in the error; an empty diff
    /// is treated as a failure since there is nothing to validate against.
    #[instrument(skip(self, pr), fields(program = %self.program, pr = %pr.number, repo = %pr.repository))]
    pub async fn fetch(&self, pr: &PrRef) -> Result<String, PrError> {
        let output = Command::new(&self.program)
            .args(["pr", "diff", pr.number.as_str(), "--repo"])
            .arg(pr.repository.to_string())
            .output()
            .await
            .map_err(|source| PrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PrError::CommandFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let diff = String::from_utf8_lossy(&output.stdout).into_owned();
        if diff.trim().is_empty() {
            return Err(PrError::EmptyDiff(pr.number.clone()));
        }
        debug!(diff_bytes = diff.len(), "received PR diff");
        Ok(diff)
    }
}
