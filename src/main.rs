use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gitpair_core::{GitpairConfig, GitpairError, OutputFormat, RepoRef};
use gitpair_github::GitHubClient;
use gitpair_pulse::output::render;
use gitpair_pulse::pairs::ScoreOptions;
use gitpair_pulse::pipeline::{analyze, AnalysisOptions};

const CONFIG_FILE: &str = ".gitpair.toml";

#[derive(Parser)]
#[command(
    name = "gitpair",
    version,
    about = "Rank GitHub contributors by shared-file contention",
    long_about = "gitpair fetches the latest commits of a GitHub repository, attributes every\n\
                  changed file to its author, and ranks pairs of authors by how much they\n\
                  worked on the same files.\n\n\
                  A pair's score is the sum, over every file both authors changed, of the\n\
                  smaller of their two change counts.\n\n\
                  Examples:\n  \
                    gitpair rust-lang cargo              Top 3 pairs over the last 50 commits\n  \
                    gitpair rust-lang/cargo -n 100 -p 5  Top 5 pairs over 100 commits\n  \
                    gitpair rust-lang cargo --details    Include the most contended file\n  \
                    gitpair init                         Write a default .gitpair.toml",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    rank: RankArgs,

    /// Path to configuration file (default: .gitpair.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for the ranking.\n\n\
                       Formats:\n  \
                         text      One ranked line per pair (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown table"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Args)]
struct RankArgs {
    /// Repository owner, or `owner/repo` (prompted for when omitted)
    #[arg(long_help = "Repository owner, or `owner/repo` (prompted for when omitted).\n\n\
                       An owner named like a subcommand (`init`, `completions`) must be\n\
                       given in the `owner/repo` form, e.g. `gitpair init/repo`.")]
    owner: Option<String>,

    /// Repository name (prompted for when omitted)
    repo: Option<String>,

    /// Number of commits to fetch, 1-100 (default: 50)
    #[arg(short = 'n', long = "commits", value_parser = clap::value_parser!(u32).range(1..=100))]
    commits: Option<u32>,

    /// Number of author pairs to display (default: 3)
    #[arg(short = 'p', long)]
    num_pairs: Option<usize>,

    /// Show the most contended file and the common-file count for each pair
    #[arg(short = 'd', long)]
    details: bool,

    /// GitHub API root (default: https://api.github.com)
    #[arg(
        long,
        long_help = "GitHub API root.\n\nSet this for GitHub Enterprise, e.g. https://github.example.com/api/v3"
    )]
    api_base: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a default .gitpair.toml configuration file
    #[command(long_about = "Create a default .gitpair.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .gitpair.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

const DEFAULT_CONFIG: &str = r#"# gitpair configuration
# Values here are overridden by environment variables and command-line flags.

[github]
# api_base = "https://api.github.com"
# Prefer GITHUB_ACCESS_TOKEN (or a .env file) over storing a token here.
# token = "ghp_..."

[ranking]
# commits = 50
# pairs = 3
# details = false
"#;

fn init_logging(verbose: bool, use_color: bool) {
    let default_filter = if verbose {
        "warn,gitpair=debug,gitpair_core=debug,gitpair_github=debug,gitpair_pulse=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_color)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GitpairConfig, GitpairError> {
    match path {
        Some(path) => GitpairConfig::from_file(path),
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                GitpairConfig::from_file(default_path)
            } else {
                Ok(GitpairConfig::default())
            }
        }
    }
}

/// Ask for a value on stderr and read one line from stdin.
fn prompt(label: &str) -> Result<String, GitpairError> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(GitpairError::Config(format!("{label} is required")));
    }
    Ok(answer.to_string())
}

fn resolve_repo(owner: Option<&str>, repo: Option<&str>) -> Result<RepoRef, GitpairError> {
    match (owner, repo) {
        (Some(owner), None) if owner.contains('/') => owner.parse(),
        (Some(owner), Some(repo)) => RepoRef::new(owner, repo),
        (Some(owner), None) => RepoRef::new(owner, &prompt("Repository name")?),
        (None, _) => {
            let owner = prompt("Repository owner")?;
            let repo = prompt("Repository name")?;
            RepoRef::new(&owner, &repo)
        }
    }
}

fn progress_bar(use_color: bool) -> indicatif::ProgressBar {
    if !std::io::stderr().is_terminal() {
        return indicatif::ProgressBar::hidden();
    }
    let template = if use_color {
        "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} commits ({elapsed})"
    } else {
        "{spinner} [{bar:30}] {pos}/{len} commits ({elapsed})"
    };
    let pb = indicatif::ProgressBar::new(0);
    if let Ok(style) = indicatif::ProgressStyle::with_template(template) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

async fn run_rank(cli: &Cli, use_color: bool) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());

    let args = &cli.rank;
    if let Some(commits) = args.commits {
        config.ranking.commits = commits;
    }
    if let Some(pairs) = args.num_pairs {
        config.ranking.pairs = pairs;
    }
    if args.details {
        config.ranking.details = true;
    }
    if let Some(api_base) = &args.api_base {
        config.github.api_base = api_base.clone();
    }
    config.validate()?;

    let repo = resolve_repo(args.owner.as_deref(), args.repo.as_deref())?;
    let client = GitHubClient::new(&config.github)?;

    let options = AnalysisOptions {
        commits: config.ranking.commits,
        scoring: ScoreOptions {
            top_k: config.ranking.pairs,
            details: config.ranking.details,
        },
    };

    eprintln!(
        "Fetching the last {} commits of {repo}...",
        options.commits
    );
    let pb = progress_bar(use_color);
    let result = analyze(&client, &repo, options, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })
    .await;
    pb.finish_and_clear();
    let analysis = result?;

    eprintln!(
        "Analyzed {} commits from {} authors.",
        analysis.commits_analyzed, analysis.authors
    );
    print!("{}", render(&analysis, cli.format)?);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    // `.env` may carry RUST_LOG, so it is loaded before the filter is built.
    let dotenv = dotenvy::dotenv();
    init_logging(cli.verbose, use_color);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("ignoring unreadable .env file: {e}"),
    }

    match &cli.command {
        Some(Command::Init) => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                miette::bail!("{CONFIG_FILE} already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created {CONFIG_FILE} with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "gitpair", &mut std::io::stdout());
        }
        None => run_rank(&cli, use_color).await?,
    }

    Ok(())
}
