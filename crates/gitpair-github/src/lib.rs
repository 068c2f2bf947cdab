//! GitHub REST access for gitpair.
//!
//! Lists a single page of repository commits and looks up the files each
//! commit changed, implementing [`gitpair_core::CommitSource`].

pub mod client;
pub mod payload;

pub use client::GitHubClient;
