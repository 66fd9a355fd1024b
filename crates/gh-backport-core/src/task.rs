//! Backport task state machine and run results
//!
//! One [`BackportTask`] exists per target branch, owned by the
//! aggregator for the duration of one run. States execute at most once;
//! there is no retry across states.

use log::debug;
use std::fmt;

/// States of a backport task
///
/// ```text
/// Pending → Resolving → Replaying → Applied → Pushed → MetadataCopied → Succeeded
///                           │
///                           └→ Conflicted → Failed | Drafted
/// ```
///
/// `Failed` is additionally reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Resolving,
    Replaying,
    Conflicted,
    Applied,
    Pushed,
    MetadataCopied,
    Succeeded,
    Drafted,
    Failed,
}

impl TaskState {
    /// Whether the task is finished
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Succeeded | TaskState::Drafted | TaskState::Failed
        )
    }

    /// Legal forward transitions; terminal states have none
    fn can_advance_to(self, next: TaskState) -> bool {
        use TaskState::*;
        match (self, next) {
            (_, Failed) => !self.is_terminal(),
            (Pending, Resolving) => true,
            (Resolving, Replaying) => true,
            (Replaying, Conflicted) | (Replaying, Applied) => true,
            (Conflicted, Drafted) => true,
            (Applied, Pushed) => true,
            (Pushed, MetadataCopied) => true,
            (MetadataCopied, Succeeded) => true,
            _ => false,
        }
    }
}

/// One backport task, bound to a single target branch
#[derive(Debug)]
pub struct BackportTask {
    target_branch: String,
    state: TaskState,
}

impl BackportTask {
    /// Create a task in the `Pending` state
    pub fn new(target_branch: impl Into<String>) -> Self {
        Self {
            target_branch: target_branch.into(),
            state: TaskState::Pending,
        }
    }

    pub fn target_branch(&self) -> &str {
        &self.target_branch
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Move to the next state
    ///
    /// Transitions outside the state diagram indicate an engine bug;
    /// they are asserted in debug builds.
    pub fn advance(&mut self, next: TaskState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal task transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(
            "task[{}]: {:?} -> {:?}",
            self.target_branch, self.state, next
        );
        self.state = next;
    }
}

/// Terminal record of one backport task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackportOutcome {
    /// Commits replayed cleanly and a PR was created
    Succeeded { branch: String, pull_request: u64 },
    /// Replay conflicted; the conflicted branch was pushed and a draft
    /// PR opened for manual resolution
    Drafted {
        branch: String,
        pull_request: u64,
        conflict_sha: String,
    },
    /// The task hit a fatal error; nothing usable was produced
    Failed { branch: String, reason: String },
}

impl BackportOutcome {
    pub fn branch(&self) -> &str {
        match self {
            BackportOutcome::Succeeded { branch, .. }
            | BackportOutcome::Drafted { branch, .. }
            | BackportOutcome::Failed { branch, .. } => branch,
        }
    }

    /// Drafted counts as non-failed: it is the intentional degraded
    /// success path.
    pub fn is_failed(&self) -> bool {
        matches!(self, BackportOutcome::Failed { .. })
    }
}

impl fmt::Display for BackportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackportOutcome::Succeeded {
                branch,
                pull_request,
            } => write!(f, "{branch}: created pull request #{pull_request}"),
            BackportOutcome::Drafted {
                branch,
                pull_request,
                conflict_sha,
            } => write!(
                f,
                "{branch}: created draft pull request #{pull_request} \
                 (conflict on {conflict_sha})"
            ),
            BackportOutcome::Failed { branch, reason } => {
                write!(f, "{branch}: failed - {reason}")
            }
        }
    }
}

/// Aggregated result of one run
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// One outcome per resolved target branch, in resolution order
    pub outcomes: Vec<BackportOutcome>,
}

impl RunResult {
    /// True iff no task failed; an empty run is vacuously successful
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| !o.is_failed())
    }
}
