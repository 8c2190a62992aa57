use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::pr::Repository;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const PR_NUMBER_VAR: &str = "PR_NUMBER";
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
pub const DOC_PATH_VAR: &str = "DOC_FILE_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid GITHUB_REPOSITORY value {0:?}, expected owner/name")]
    InvalidRepository(String),
}

/// Inputs for a single run, read once from the environment.
///
/// Construction is all-or-nothing: either every variable is present and
/// non-empty, or `ConfigError::Missing` lists the ones that are not.
#[derive(Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: String,
    /// Pull request identifier handed to `gh pr diff`
    pub pr_number: String,
    /// Repository hosting the pull request
    pub repository: Repository,
    /// AsciiDoc file under validation
    pub doc_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("pr_number", &self.pr_number)
            .field("repository", &self.repository)
            .field("doc_path", &self.doc_path)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup (useful for testing).
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            let value = lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let api_key = require(API_KEY_VAR);
        let pr_number = require(PR_NUMBER_VAR);
        let repository = require(REPOSITORY_VAR);
        let doc_path = require(DOC_PATH_VAR);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let repository = repository
            .parse::<Repository>()
            .map_err(|_| ConfigError::InvalidRepository(repository.clone()))?;

        Ok(Config {
            api_key,
            pr_number,
            repository,
            doc_path: PathBuf::from(doc_path),
        })
    }
}
