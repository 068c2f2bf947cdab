use std::fmt::Write;

use gitpair_core::{GitpairError, OutputFormat, PairScore};

use crate::pipeline::Analysis;

/// Render an analysis in the requested format.
///
/// # Errors
///
/// Returns [`GitpairError::Serialization`] if JSON encoding fails.
pub fn render(analysis: &Analysis, format: OutputFormat) -> Result<String, GitpairError> {
    match format {
        OutputFormat::Text => Ok(format_text(&analysis.pairs)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
        OutputFormat::Markdown => Ok(format_markdown(analysis)),
    }
}

/// One ranked line per pair, with two indented detail lines when present.
///
/// # Examples
///
/// ```
/// use gitpair_core::PairScore;
/// use gitpair_pulse::output::format_text;
///
/// let pairs = vec![PairScore {
///     author_a: "alice".into(),
///     author_b: "bob".into(),
///     overlap: 2,
///     max_file: None,
///     max_count: None,
///     common_files: None,
/// }];
/// assert_eq!(format_text(&pairs), "1. alice and bob: 2 common contributions\n");
/// ```
pub fn format_text(pairs: &[PairScore]) -> String {
    if pairs.is_empty() {
        return "No author pairs found.\n".into();
    }

    let mut out = String::new();
    for (idx, pair) in pairs.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} and {}: {} common contributions",
            idx + 1,
            pair.author_a,
            pair.author_b,
            pair.overlap
        );
        if let Some(common) = pair.common_files {
            match (&pair.max_file, pair.max_count) {
                (Some(file), Some(count)) => {
                    let _ = writeln!(out, "   Most contended file: {file} ({count} changes each)");
                }
                _ => out.push_str("   Most contended file: none\n"),
            }
            let _ = writeln!(out, "   Common files: {common}");
        }
    }
    out
}

fn format_markdown(analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Author contention: {}\n", analysis.repository);
    let _ = writeln!(
        out,
        "{} commits, {} authors\n",
        analysis.commits_analyzed, analysis.authors
    );

    if analysis.pairs.is_empty() {
        out.push_str("_No author pairs found._\n");
        return out;
    }

    if analysis.details {
        out.push_str("| # | Authors | Score | Most contended file | Common files |\n");
        out.push_str("|---|---------|-------|---------------------|--------------|\n");
    } else {
        out.push_str("| # | Authors | Score |\n");
        out.push_str("|---|---------|-------|\n");
    }

    for (idx, pair) in analysis.pairs.iter().enumerate() {
        let _ = write!(
            out,
            "| {} | {} & {} | {} |",
            idx + 1,
            escape_cell(&pair.author_a),
            escape_cell(&pair.author_b),
            pair.overlap
        );
        if analysis.details {
            let file = match (&pair.max_file, pair.max_count) {
                (Some(file), Some(count)) => format!("`{}` ({count})", escape_cell(file)),
                _ => "-".into(),
            };
            let _ = write!(out, " {file} | {} |", pair.common_files.unwrap_or(0));
        }
        out.push('\n');
    }
    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
