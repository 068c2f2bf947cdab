use gitpair_core::{CommitRecord, CommitSource, FileChange, GitHubConfig, GitpairError, RepoRef};

use crate::payload::{api_error_message, parse_commit_files, parse_commit_list};

/// GitHub REST client for commit listings and commit details.
///
/// The token is taken from the resolved [`GitHubConfig`]; nothing is read
/// from the environment here.
///
/// # Examples
///
/// ```
/// use gitpair_core::GitHubConfig;
/// use gitpair_github::GitHubClient;
///
/// let client = GitHubClient::new(&GitHubConfig::default()).unwrap();
/// assert_eq!(client.api_base(), "https://api.github.com");
/// ```
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client from resolved GitHub settings.
    ///
    /// # Errors
    ///
    /// Returns [`GitpairError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig) -> Result<Self, GitpairError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gitpair/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GitpairError::Http(format!("failed to create HTTP client: {e}")))?;

        if config.token.is_none() {
            tracing::warn!("no GitHub token configured, sending unauthenticated requests");
        }

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// REST API root this client talks to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn commits_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.api_base, repo.owner, repo.repo
        )
    }

    /// Issue a GET and return the body of a successful response.
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, GitpairError> {
        tracing::debug!(%url, "GET");

        let mut request = self
            .http
            .get(url)
            .query(query)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| GitpairError::Http(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match api_error_message(&body) {
                m if m.is_empty() => status.canonical_reason().unwrap_or("").to_string(),
                m => m,
            };
            return Err(GitpairError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| GitpairError::Http(format!("failed to read response from {url}: {e}")))
    }
}

impl CommitSource for GitHubClient {
    async fn list_commits(
        &self,
        repo: &RepoRef,
        per_page: u32,
    ) -> Result<Vec<CommitRecord>, GitpairError> {
        let url = self.commits_url(repo);
        let body = self.get(&url, &[("per_page", per_page.to_string())]).await?;
        parse_commit_list(&body)
    }

    async fn commit_files(
        &self,
        repo: &RepoRef,
        sha: &str,
    ) -> Result<Vec<FileChange>, GitpairError> {
        let url = format!("{}/{sha}", self.commits_url(repo));
        let body = self.get(&url, &[]).await?;
        parse_commit_files(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_api_base() {
        let config = GitHubConfig {
            api_base: "https://github.example.com/api/v3/".into(),
            token: None,
        };
        let client = GitHubClient::new(&config).unwrap();
        assert_eq!(client.api_base(), "https://github.example.com/api/v3");
    }

    #[test]
    fn commits_url_includes_owner_and_repo() {
        let client = GitHubClient::new(&GitHubConfig::default()).unwrap();
        let repo = RepoRef::new("fesh0r", "fernflower").unwrap();
        assert_eq!(
            client.commits_url(&repo),
            "https://api.github.com/repos/fesh0r/fernflower/commits"
        );
    }
}
