use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GitpairError;

/// Environment variables searched for the access token, in priority order.
pub const TOKEN_ENV_VARS: [&str; 3] = ["GITHUB_ACCESS_TOKEN", "GITHUB_TOKEN", "GH_TOKEN"];

/// The largest page GitHub serves for the commit listing.
const MAX_PER_PAGE: u32 = 100;

/// Top-level configuration loaded from `.gitpair.toml`.
///
/// Supports layered resolution: CLI flags > env vars > local config > defaults.
///
/// # Examples
///
/// ```
/// use gitpair_core::GitpairConfig;
///
/// let config = GitpairConfig::default();
/// assert_eq!(config.ranking.commits, 50);
/// assert_eq!(config.ranking.pairs, 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitpairConfig {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,
    /// Ranking behavior settings.
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl GitpairConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GitpairError::FileNotFound`] if the file does not exist,
    /// [`GitpairError::Io`] if it cannot be read, or [`GitpairError::Toml`]
    /// if the content is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, GitpairError> {
        if !path.exists() {
            return Err(GitpairError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GitpairError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitpair_core::GitpairConfig;
    ///
    /// let toml = r#"
    /// [ranking]
    /// pairs = 10
    /// "#;
    /// let config = GitpairConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.ranking.pairs, 10);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, GitpairError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Overlay environment values on top of the file configuration.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; blank values are
    /// ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|key| lookup(*key))
            .find(|value| !value.trim().is_empty());
        if let Some(token) = token {
            self.github.token = Some(token.trim().to_string());
        }
    }

    /// Check value ranges after all layers have been applied.
    ///
    /// # Errors
    ///
    /// Returns [`GitpairError::Config`] for a commit count outside `1..=100`,
    /// a pair count of zero, or an empty API base URL.
    pub fn validate(&self) -> Result<(), GitpairError> {
        if self.ranking.commits == 0 || self.ranking.commits > MAX_PER_PAGE {
            return Err(GitpairError::Config(format!(
                "commits must be between 1 and {MAX_PER_PAGE}, got {}",
                self.ranking.commits
            )));
        }
        if self.ranking.pairs == 0 {
            return Err(GitpairError::Config("pairs must be at least 1".into()));
        }
        if self.github.api_base.trim().is_empty() {
            return Err(GitpairError::Config("github.api_base is empty".into()));
        }
        Ok(())
    }
}

/// GitHub API configuration.
///
/// # Examples
///
/// ```
/// use gitpair_core::GitHubConfig;
///
/// let config = GitHubConfig::default();
/// assert_eq!(config.api_base, "https://api.github.com");
/// assert!(config.token.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API root, without a trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Access token sent as a bearer credential.
    pub token: Option<String>,
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
        }
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Commits to fetch (default: 50).
    #[serde(default = "default_commits")]
    pub commits: u32,
    /// Pairs to display (default: 3).
    #[serde(default = "default_pairs")]
    pub pairs: usize,
    /// Show most-contended file and common-file count (default: false).
    #[serde(default)]
    pub details: bool,
}

fn default_commits() -> u32 {
    50
}

fn default_pairs() -> usize {
    3
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            commits: default_commits(),
            pairs: default_pairs(),
            details: false,
        }
    }
}
