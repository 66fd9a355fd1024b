//! Git capability trait and error definitions
//!
//! The backport engine consumes git through this trait so it can be
//! tested against an in-memory mock instead of a real checkout.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while running git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be spawned at all.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// A git command ran and exited unsuccessfully.
    #[error("git {command} failed: {stderr}")]
    Command { command: String, stderr: String },

    /// Command output was not valid UTF-8.
    #[error("git {command} produced invalid UTF-8 output")]
    InvalidOutput { command: String },
}

/// Result of applying a single commit to the working branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CherryPick {
    /// The commit applied cleanly
    Applied,
    /// The commit left unmerged paths in the working tree
    Conflict,
}

/// Version-control capability consumed by the backport engine
///
/// One instance operates on one working copy. Operations mutate that
/// working copy's checked-out state, so callers that share an instance
/// across branches must serialize branch-level work (see the engine's
/// aggregator, which runs tasks to completion one at a time).
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared behind
/// an `Arc` across async tasks.
#[async_trait]
pub trait GitClient: Send + Sync {
    /// Fetch a branch from `origin` so `origin/<branch>` is resolvable.
    ///
    /// Fails when the branch does not exist on the remote; the engine
    /// treats that as fatal for the branch's task only.
    async fn fetch_branch(&self, branch: &str) -> Result<(), GitError>;

    /// Create `name` at `from_ref` and check it out.
    ///
    /// `from_ref` is typically a remote-tracking ref such as
    /// `origin/release-1`.
    async fn create_branch(&self, name: &str, from_ref: &str) -> Result<(), GitError>;

    /// Apply one commit to the checked-out branch.
    ///
    /// Returns [`CherryPick::Conflict`] when the pick stops on unmerged
    /// paths; the interrupted cherry-pick state is left in place so the
    /// caller can decide between [`Self::abort_cherry_pick`] and
    /// [`Self::commit_conflicts`]. Any other non-zero exit is an error.
    async fn cherry_pick(&self, sha: &str) -> Result<CherryPick, GitError>;

    /// Abort an interrupted cherry-pick, restoring a clean working tree.
    async fn abort_cherry_pick(&self) -> Result<(), GitError>;

    /// Conclude an interrupted cherry-pick by committing the working
    /// tree as-is, conflict markers included.
    ///
    /// Uses the commit message git prepared for the pick, so the
    /// original subject line stays visible on the draft branch.
    async fn commit_conflicts(&self) -> Result<(), GitError>;

    /// Push `branch` to `origin`, setting the upstream.
    async fn push(&self, branch: &str) -> Result<(), GitError>;
}
