//! Wire shapes of the GitHub commit endpoints.
//!
//! Only the fields gitpair reads are modelled; everything else in the
//! response is ignored by serde.

use gitpair_core::{CommitRecord, FileChange, GitpairError};
use serde::Deserialize;

/// One entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Deserialize)]
pub struct CommitListItem {
    /// Full commit SHA.
    pub sha: String,
    /// Git-level commit metadata.
    pub commit: GitCommit,
    /// Linked GitHub account, `null` when the author email is unknown to GitHub.
    pub author: Option<GitHubUser>,
}

/// The `commit` object nested in a listing entry.
#[derive(Debug, Deserialize)]
pub struct GitCommit {
    /// Git author signature.
    pub author: Option<GitSignature>,
}

/// A git author or committer signature.
#[derive(Debug, Deserialize)]
pub struct GitSignature {
    /// Author name as recorded in the commit.
    pub name: String,
}

/// A GitHub account.
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    /// Account login.
    pub login: String,
}

/// Body of `GET /repos/{owner}/{repo}/commits/{sha}`.
#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    /// Files changed by the commit.
    pub files: Vec<FileChange>,
}

/// Error body GitHub sends with non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl CommitListItem {
    /// Attribute the commit to the GitHub login, falling back to the git
    /// author name.
    ///
    /// # Errors
    ///
    /// Returns [`GitpairError::Serialization`] if neither is present.
    pub fn into_record(self) -> Result<CommitRecord, GitpairError> {
        let author_name = match (self.author, self.commit.author) {
            (Some(user), _) => user.login,
            (None, Some(signature)) => signature.name,
            (None, None) => {
                return Err(GitpairError::Serialization(serde::de::Error::custom(
                    format!("commit {} has no author", self.sha),
                )))
            }
        };
        Ok(CommitRecord {
            sha: self.sha,
            author_name,
        })
    }
}

/// Parse a commit listing into records, in the order GitHub returned them.
///
/// # Errors
///
/// Returns [`GitpairError::Serialization`] on malformed JSON or an entry
/// without any author.
pub fn parse_commit_list(body: &str) -> Result<Vec<CommitRecord>, GitpairError> {
    let items: Vec<CommitListItem> = serde_json::from_str(body)?;
    items.into_iter().map(CommitListItem::into_record).collect()
}

/// Parse a commit detail body into its changed files.
///
/// # Errors
///
/// Returns [`GitpairError::Serialization`] on malformed JSON or a missing
/// `files` list.
pub fn parse_commit_files(body: &str) -> Result<Vec<FileChange>, GitpairError> {
    let detail: CommitDetail = serde_json::from_str(body)?;
    Ok(detail.files)
}

/// Extract GitHub's `message` from an error body, or fall back to the raw
/// text.
pub fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
      {
        "sha": "aaa111",
        "commit": { "author": { "name": "Alice Liddell", "email": "alice@example.com" }, "message": "fix" },
        "author": { "login": "alice", "id": 1 }
      },
      {
        "sha": "bbb222",
        "commit": { "author": { "name": "Bob Builder", "email": "bob@example.com" }, "message": "feat" },
        "author": null
      }
    ]"#;

    #[test]
    fn listing_prefers_login_and_keeps_order() {
        let commits = parse_commit_list(LISTING).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha, "aaa111");
        assert_eq!(commits[0].author_name, "alice");
    }

    #[test]
    fn listing_falls_back_to_git_author_name() {
        let commits = parse_commit_list(LISTING).unwrap();
        assert_eq!(commits[1].author_name, "Bob Builder");
    }

    #[test]
    fn listing_without_any_author_is_an_error() {
        let body = r#"[{ "sha": "ccc", "commit": { "author": null }, "author": null }]"#;
        let err = parse_commit_list(body).unwrap_err();
        assert!(err.to_string().contains("ccc"));
    }

    #[test]
    fn empty_listing_is_empty() {
        assert!(parse_commit_list("[]").unwrap().is_empty());
    }

    #[test]
    fn detail_files_are_extracted() {
        let body = r#"{
          "sha": "aaa111",
          "files": [
            { "filename": "src/lib.rs", "status": "modified", "additions": 3 },
            { "filename": "README.md", "status": "added" }
          ]
        }"#;
        let files = parse_commit_files(body).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["src/lib.rs", "README.md"]);
    }

    #[test]
    fn detail_without_files_is_an_error() {
        assert!(parse_commit_files(r#"{ "sha": "aaa111" }"#).is_err());
    }

    #[test]
    fn api_error_message_reads_json_body() {
        let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#;
        assert_eq!(api_error_message(body), "Not Found");
    }

    #[test]
    fn api_error_message_falls_back_to_text() {
        assert_eq!(api_error_message("  bad gateway \n"), "bad gateway");
    }
}
