//! Host-API collaborator for gh-backport
//!
//! This crate provides a trait-based GitHub API client scoped to one
//! repository. The backport engine only sees the [`GitHubClient`]
//! trait; the octocrab-backed implementation lives next to it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_request()                          │
//! │  - create_pull_request()                         │
//! │  - add_labels() / add_assignees()                │
//! │  - set_milestone() / request_reviewers()         │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │
//!              │  (direct API)   │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_backport_github::{GitHubClient, OctocrabClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let octocrab = octocrab::Octocrab::builder()
//!     .personal_token("token".to_string())
//!     .build()?;
//! let client = OctocrabClient::new(Arc::new(octocrab), "owner", "repo");
//! let pr = client.fetch_pull_request(42).await?;
//! println!("backporting '{}'", pr.title);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod octocrab_client;
pub mod token;
pub mod types;

pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use token::TokenResolver;
pub use types::{Commit, Milestone, NewPullRequest, SourcePullRequest};

// Re-export octocrab so the binary doesn't need a direct dependency
// for client construction.
pub use octocrab;
