//! GitHub API data transfer objects
//!
//! These types carry exactly what the backport engine needs from the
//! host API. They are intentionally separate from octocrab's models so
//! the engine and its tests never depend on octocrab directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The source pull request being backported
///
/// Fetched once per run, including its full ordered commit list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR body/description
    pub body: Option<String>,

    /// HEAD branch name (e.g., "feature/foo")
    pub head_branch: String,

    /// Base branch name (e.g., "main")
    pub base_branch: String,

    /// HEAD commit SHA
    pub head_sha: String,

    /// Whether the PR has been merged
    pub merged: bool,

    /// When the PR was merged, if it was
    pub merged_at: Option<DateTime<Utc>>,

    /// Ordered commits of the PR, oldest first
    pub commits: Vec<Commit>,

    /// Label names on the PR
    pub labels: Vec<String>,

    /// Assignee usernames
    pub assignees: Vec<String>,

    /// Milestone, if one is set
    pub milestone: Option<Milestone>,

    /// Usernames with a pending review request
    pub requested_reviewers: Vec<String>,
}

/// One commit in a pull request's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,

    /// Whether the commit has more than one parent
    pub is_merge: bool,
}

/// Milestone reference on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone number (used to set it on another issue/PR)
    pub number: u64,

    /// Milestone title
    pub title: String,
}

/// Parameters for creating a backport pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPullRequest {
    /// Base branch the PR targets (the backport target branch)
    pub base: String,

    /// Head branch with the replayed commits
    pub head: String,

    /// PR title
    pub title: String,

    /// PR body
    pub body: String,

    /// Whether to open the PR as a draft
    pub draft: bool,
}
