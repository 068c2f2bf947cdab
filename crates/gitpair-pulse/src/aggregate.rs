//! Per-author file-change frequency table.
//!
//! Walks commits in the order the source returned them, looks up each
//! commit's changed files, and counts how often every author touched every
//! file.

use gitpair_core::{CommitRecord, CommitSource, FileChange, GitpairError, RepoRef};
use indexmap::IndexMap;
use serde::Serialize;

/// Author -> (filename -> change count).
///
/// Authors and files keep first-seen order. Counts only ever grow.
///
/// # Examples
///
/// ```
/// use gitpair_pulse::aggregate::AuthorFileCounts;
///
/// let mut counts = AuthorFileCounts::default();
/// counts.record("alice", "a.py");
/// counts.record("alice", "a.py");
/// counts.record("bob", "a.py");
/// assert_eq!(counts.count("alice", "a.py"), 2);
/// assert_eq!(counts.authors().collect::<Vec<_>>(), vec!["alice", "bob"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthorFileCounts {
    authors: IndexMap<String, IndexMap<String, u32>>,
}

impl AuthorFileCounts {
    /// Increment `author`'s count for `filename`, starting at 1.
    pub fn record(&mut self, author: &str, filename: &str) {
        *self
            .authors
            .entry(author.to_string())
            .or_default()
            .entry(filename.to_string())
            .or_default() += 1;
    }

    /// Record every file of one commit for `author`.
    pub fn record_commit(&mut self, author: &str, files: &[FileChange]) {
        for file in files {
            self.record(author, &file.filename);
        }
    }

    /// Authors in first-seen order.
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    /// File counts for one author, in first-touched order.
    pub fn files_of(&self, author: &str) -> Option<&IndexMap<String, u32>> {
        self.authors.get(author)
    }

    /// Count for a single cell, 0 when absent.
    pub fn count(&self, author: &str, filename: &str) -> u32 {
        self.authors
            .get(author)
            .and_then(|files| files.get(filename))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all counts for `author`.
    pub fn total_changes(&self, author: &str) -> u64 {
        self.authors
            .get(author)
            .map(|files| files.values().map(|&c| u64::from(c)).sum())
            .unwrap_or(0)
    }

    /// Number of distinct authors.
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    /// Whether no file change has been recorded.
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

impl FromIterator<(String, Vec<(String, u32)>)> for AuthorFileCounts {
    fn from_iter<I: IntoIterator<Item = (String, Vec<(String, u32)>)>>(iter: I) -> Self {
        let mut counts = Self::default();
        for (author, files) in iter {
            let entry = counts.authors.entry(author).or_default();
            for (filename, count) in files {
                if count > 0 {
                    *entry.entry(filename).or_default() += count;
                }
            }
        }
        counts.authors.retain(|_, files| !files.is_empty());
        counts
    }
}

/// Look up each commit's files and aggregate them per author.
///
/// Lookups happen one at a time in commit order. `on_progress(done, total)`
/// runs after every commit.
///
/// # Errors
///
/// The first failed lookup aborts the whole batch and is returned unchanged.
pub async fn collect_author_files<S, F>(
    source: &S,
    repo: &RepoRef,
    commits: &[CommitRecord],
    mut on_progress: F,
) -> Result<AuthorFileCounts, GitpairError>
where
    S: CommitSource + ?Sized,
    F: FnMut(usize, usize),
{
    let mut counts = AuthorFileCounts::default();
    let total = commits.len();

    for (done, commit) in commits.iter().enumerate() {
        let files = source.commit_files(repo, &commit.sha).await?;
        tracing::debug!(
            sha = %commit.sha,
            author = %commit.author_name,
            files = files.len(),
            "attributed commit"
        );
        counts.record_commit(&commit.author_name, &files);
        on_progress(done + 1, total);
    }

    Ok(counts)
}
