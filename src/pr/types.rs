use std::fmt;
use std::str::FromStr;

/// A GitHub repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .split_once('/')
            .ok_or_else(|| format!("{s}: missing '/' separator"))?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(format!("{s}: expected exactly owner/name"));
        }
        Ok(Repository {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Identifies the pull request whose diff is fetched.
#[derive(Debug, Clone)]
pub struct PrRef {
    /// PR number (or any identifier `gh pr diff` accepts)
    pub number: String,
    pub repository: Repository,
}
