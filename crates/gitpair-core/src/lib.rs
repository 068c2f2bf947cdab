//! Core types, configuration, and error handling for gitpair.
//!
//! This crate provides the shared foundation used by the other gitpair crates:
//! - [`GitpairError`]: unified error type using `thiserror` and `miette`
//! - [`GitpairConfig`]: configuration loaded from `.gitpair.toml`
//! - Shared types: [`RepoRef`], [`CommitRecord`], [`FileChange`], [`PairScore`],
//!   [`OutputFormat`]
//! - [`CommitSource`]: the seam between the analysis and the GitHub API

mod config;
mod error;
mod source;
mod types;

pub use config::{GitHubConfig, GitpairConfig, RankingConfig, TOKEN_ENV_VARS};
pub use error::GitpairError;
pub use source::CommitSource;
pub use types::{CommitRecord, FileChange, OutputFormat, PairScore, RepoRef};

/// A convenience `Result` type for gitpair operations.
pub type Result<T> = std::result::Result<T, GitpairError>;
