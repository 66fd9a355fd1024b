//! GitHub client trait definition

use crate::types::{NewPullRequest, SourcePullRequest};
use async_trait::async_trait;

/// GitHub API capability consumed by the backport engine
///
/// One instance is scoped to one repository (owner/repo are fixed at
/// construction time), mirroring how the engine runs: one invocation,
/// one repository.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing behind an
/// `Arc` across async tasks.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch a pull request with its full ordered commit list
    ///
    /// # Arguments
    ///
    /// * `number` - Pull request number
    ///
    /// # Returns
    ///
    /// The pull request details, or an error if it cannot be read.
    async fn fetch_pull_request(&self, number: u64) -> anyhow::Result<SourcePullRequest>;

    /// Create a pull request, optionally as a draft
    ///
    /// # Returns
    ///
    /// The number of the created pull request.
    async fn create_pull_request(&self, pr: NewPullRequest) -> anyhow::Result<u64>;

    /// Add labels to a pull request
    async fn add_labels(&self, number: u64, labels: &[String]) -> anyhow::Result<()>;

    /// Add assignees to a pull request
    async fn add_assignees(&self, number: u64, assignees: &[String]) -> anyhow::Result<()>;

    /// Set the milestone of a pull request
    async fn set_milestone(&self, number: u64, milestone: u64) -> anyhow::Result<()>;

    /// Request reviews on a pull request
    async fn request_reviewers(&self, number: u64, reviewers: &[String]) -> anyhow::Result<()>;
}
