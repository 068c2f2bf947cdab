//! List commits, aggregate them per author, rank author pairs.

use gitpair_core::{CommitSource, GitpairError, PairScore, RepoRef};
use serde::Serialize;

use crate::aggregate::{collect_author_files, AuthorFileCounts};
use crate::pairs::{rank_pairs, ScoreOptions};

/// Options for a full analysis run.
///
/// # Examples
///
/// ```
/// use gitpair_pulse::pipeline::AnalysisOptions;
///
/// let opts = AnalysisOptions::default();
/// assert_eq!(opts.commits, 50);
/// assert_eq!(opts.scoring.top_k, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Size of the single commit page to fetch.
    pub commits: u32,
    /// Pair ranking options.
    pub scoring: ScoreOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            commits: 50,
            scoring: ScoreOptions::default(),
        }
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Repository as `owner/repo`.
    pub repository: String,
    /// Commits returned by the listing.
    pub commits_analyzed: usize,
    /// Distinct authors with at least one attributed file.
    pub authors: usize,
    /// Whether the pairs carry detail fields.
    pub details: bool,
    /// Ranked pairs, best first.
    pub pairs: Vec<PairScore>,
    /// The full per-author table the ranking was computed from.
    #[serde(skip)]
    pub counts: AuthorFileCounts,
}

/// Run the whole analysis against `source`.
///
/// `on_progress(done, total)` is called after each per-commit lookup.
///
/// # Errors
///
/// A refused commit listing (for example a 404 for an unknown repository)
/// is returned before any per-commit lookup is made. Any later lookup error
/// aborts the run; no partial result is produced.
pub async fn analyze<S, F>(
    source: &S,
    repo: &RepoRef,
    options: AnalysisOptions,
    on_progress: F,
) -> Result<Analysis, GitpairError>
where
    S: CommitSource + ?Sized,
    F: FnMut(usize, usize),
{
    tracing::info!(%repo, commits = options.commits, "listing commits");
    let commits = source.list_commits(repo, options.commits).await?;

    tracing::info!(%repo, commits = commits.len(), "attributing file changes");
    let counts = collect_author_files(source, repo, &commits, on_progress).await?;

    let pairs = rank_pairs(&counts, options.scoring);

    Ok(Analysis {
        repository: repo.to_string(),
        commits_analyzed: commits.len(),
        authors: counts.len(),
        details: options.scoring.details,
        pairs,
        counts,
    })
}
