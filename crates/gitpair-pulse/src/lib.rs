//! Author contention analysis over recent commit history.
//!
//! Builds a per-author file-change table from commits, scores every pair of
//! authors by how much they worked on the same files, and renders the
//! ranking as text, JSON, or Markdown.

pub mod aggregate;
pub mod output;
pub mod pairs;
pub mod pipeline;
