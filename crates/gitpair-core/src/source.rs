use std::future::Future;

use crate::error::GitpairError;
use crate::types::{CommitRecord, FileChange, RepoRef};

/// Where commit history comes from.
///
/// The GitHub client implements this against the REST API; tests implement
/// it in memory. Calls are awaited one at a time by the callers.
pub trait CommitSource {
    /// Fetch a single page of at most `per_page` commits, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GitpairError::Api`] when the listing is refused.
    fn list_commits(
        &self,
        repo: &RepoRef,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<CommitRecord>, GitpairError>> + Send;

    /// Fetch the files changed by the commit `sha`.
    ///
    /// # Errors
    ///
    /// Any lookup failure is returned as-is; callers do not retry.
    fn commit_files(
        &self,
        repo: &RepoRef,
        sha: &str,
    ) -> impl Future<Output = Result<Vec<FileChange>, GitpairError>> + Send;
}
