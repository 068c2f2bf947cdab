use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GitpairError;

/// A GitHub repository, identified by owner and name.
///
/// # Examples
///
/// ```
/// use gitpair_core::RepoRef;
///
/// let repo: RepoRef = "rust-lang/cargo".parse().unwrap();
/// assert_eq!(repo.owner, "rust-lang");
/// assert_eq!(repo.repo, "cargo");
/// assert_eq!(repo.to_string(), "rust-lang/cargo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Account or organization that owns the repository.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl RepoRef {
    /// Build a reference from separate parts, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns [`GitpairError::InvalidRepo`] if either part is empty or
    /// contains a `/`.
    pub fn new(owner: &str, repo: &str) -> Result<Self, GitpairError> {
        let owner = owner.trim();
        let repo = repo.trim();
        if owner.is_empty() || repo.is_empty() || owner.contains('/') || repo.contains('/') {
            return Err(GitpairError::InvalidRepo(format!("{owner}/{repo}")));
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoRef {
    type Err = GitpairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((owner, repo)) = s.split_once('/') else {
            return Err(GitpairError::InvalidRepo(s.to_string()));
        };
        Self::new(owner, repo)
    }
}

/// A commit from the commit-list endpoint.
///
/// `author_name` is the GitHub login of the linked account, or the git
/// author name when the commit is not linked to an account.
///
/// # Examples
///
/// ```
/// use gitpair_core::CommitRecord;
///
/// let commit = CommitRecord {
///     sha: "6dcb09b".into(),
///     author_name: "octocat".into(),
/// };
/// assert_eq!(commit.author_name, "octocat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    /// Full commit SHA.
    pub sha: String,
    /// Attributed author.
    pub author_name: String,
}

/// A file touched by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path relative to the repository root.
    pub filename: String,
}

/// Overlap score for one unordered pair of authors.
///
/// The `max_*` and `common_files` fields are only filled when detailed
/// scoring was requested.
///
/// # Examples
///
/// ```
/// use gitpair_core::PairScore;
///
/// let pair = PairScore {
///     author_a: "alice".into(),
///     author_b: "bob".into(),
///     overlap: 2,
///     max_file: None,
///     max_count: None,
///     common_files: None,
/// };
/// assert!(!pair.has_details());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairScore {
    /// Author seen first in commit order.
    pub author_a: String,
    /// Author seen later in commit order.
    pub author_b: String,
    /// Sum of `min(count_a, count_b)` over common files.
    pub overlap: u64,
    /// Common file with the largest min-count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file: Option<String>,
    /// Min-count of `max_file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
    /// Number of files both authors touched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_files: Option<usize>,
}

impl PairScore {
    /// Whether the detail fields were computed for this pair.
    pub fn has_details(&self) -> bool {
        self.common_files.is_some()
    }
}

/// Output format for CLI results.
///
/// # Examples
///
/// ```
/// use gitpair_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Ranked plain-text lines.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown table.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
