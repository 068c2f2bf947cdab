//! Author pair contention scoring.
//!
//! Two authors contend on a file when both changed it; the smaller of their
//! two change counts is how much of that work could have overlapped. A
//! pair's score is that minimum summed over every common file.

use gitpair_core::PairScore;

use crate::aggregate::AuthorFileCounts;

/// How many pairs to keep and whether to compute per-pair details.
///
/// # Examples
///
/// ```
/// use gitpair_pulse::pairs::ScoreOptions;
///
/// let opts = ScoreOptions::default();
/// assert_eq!(opts.top_k, 3);
/// assert!(!opts.details);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOptions {
    /// Maximum number of pairs returned.
    pub top_k: usize,
    /// Fill `max_file`, `max_count` and `common_files`.
    pub details: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            top_k: 3,
            details: false,
        }
    }
}

/// Score a single pair of authors.
///
/// `author_a` is reported first. Unknown authors contribute no files.
///
/// The most contended file is the common file with the largest min-count;
/// equal min-counts resolve to the lexicographically smallest filename.
///
/// # Examples
///
/// ```
/// use gitpair_pulse::aggregate::AuthorFileCounts;
/// use gitpair_pulse::pairs::score_pair;
///
/// let mut counts = AuthorFileCounts::default();
/// counts.record("alice", "a.py");
/// counts.record("bob", "a.py");
/// counts.record("bob", "a.py");
///
/// let pair = score_pair(&counts, "alice", "bob", true);
/// assert_eq!(pair.overlap, 1);
/// assert_eq!(pair.max_file.as_deref(), Some("a.py"));
/// assert_eq!(pair.common_files, Some(1));
/// ```
pub fn score_pair(
    counts: &AuthorFileCounts,
    author_a: &str,
    author_b: &str,
    details: bool,
) -> PairScore {
    let mut overlap = 0u64;
    let mut common = 0usize;
    let mut max: Option<(&str, u32)> = None;

    if let (Some(files_a), Some(files_b)) = (counts.files_of(author_a), counts.files_of(author_b))
    {
        for (filename, &count_a) in files_a {
            let Some(&count_b) = files_b.get(filename) else {
                continue;
            };
            let contention = count_a.min(count_b);
            overlap += u64::from(contention);
            common += 1;

            max = match max {
                Some((best, best_count))
                    if best_count > contention
                        || (best_count == contention && best <= filename.as_str()) =>
                {
                    Some((best, best_count))
                }
                _ => Some((filename.as_str(), contention)),
            };
        }
    }

    let (max_file, max_count, common_files) = if details {
        (
            max.map(|(file, _)| file.to_string()),
            max.map(|(_, count)| count),
            Some(common),
        )
    } else {
        (None, None, None)
    };

    PairScore {
        author_a: author_a.to_string(),
        author_b: author_b.to_string(),
        overlap,
        max_file,
        max_count,
        common_files,
    }
}

/// Score every unordered pair of distinct authors and keep the best `top_k`.
///
/// Pairs are enumerated in first-seen author order, sorted descending by
/// overlap with a stable sort, then truncated. Pairs with no common files
/// score 0 and are kept.
///
/// # Examples
///
/// ```
/// use gitpair_pulse::aggregate::AuthorFileCounts;
/// use gitpair_pulse::pairs::{rank_pairs, ScoreOptions};
///
/// let counts: AuthorFileCounts = vec![
///     ("alice".to_string(), vec![("a.py".to_string(), 2), ("b.py".to_string(), 1)]),
///     ("bob".to_string(), vec![("a.py".to_string(), 3)]),
/// ]
/// .into_iter()
/// .collect();
///
/// let pairs = rank_pairs(&counts, ScoreOptions::default());
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].overlap, 2);
/// ```
pub fn rank_pairs(counts: &AuthorFileCounts, options: ScoreOptions) -> Vec<PairScore> {
    let authors: Vec<&str> = counts.authors().collect();

    let mut pairs = Vec::with_capacity(authors.len() * authors.len().saturating_sub(1) / 2);
    for (i, author_a) in authors.iter().enumerate() {
        for author_b in &authors[i + 1..] {
            pairs.push(score_pair(counts, author_a, author_b, options.details));
        }
    }

    // `sort_by` is stable, so equal scores keep enumeration order.
    pairs.sort_by(|a, b| b.overlap.cmp(&a.overlap));
    pairs.truncate(options.top_k);

    tracing::debug!(
        authors = authors.len(),
        kept = pairs.len(),
        "ranked author pairs"
    );

    pairs
}
