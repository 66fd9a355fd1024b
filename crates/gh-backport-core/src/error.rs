//! Per-task errors
//!
//! Everything here is fatal for one branch's task only; the aggregator
//! records the failure and moves on to the next branch.

use gh_backport_git::GitError;
use thiserror::Error;

/// A fatal error for a single backport task
#[derive(Debug, Error)]
pub enum TaskError {
    /// `merge_commits: fail` and the source PR contains merge commits.
    /// Reported before any replay is attempted.
    #[error(
        "source pull request contains merge commits ({}) and the \
         merge_commits policy is 'fail'",
        .0.join(", ")
    )]
    MergeCommitsPresent(Vec<String>),

    /// The target branch could not be fetched from origin.
    #[error("target branch '{branch}' could not be fetched from origin: {source}")]
    TargetBranchUnavailable {
        branch: String,
        #[source]
        source: GitError,
    },

    /// A git operation failed outside the conflict path.
    #[error(transparent)]
    Git(#[from] GitError),

    /// A host API call that the task cannot proceed without failed.
    #[error("failed to {action}: {source:#}")]
    Host {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
