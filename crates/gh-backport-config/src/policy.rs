//! Policy enums
//!
//! The three policy forks of the engine, modeled as closed enums.
//! Parsing rejects anything outside the enumerated values; there is no
//! catch-all variant.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Which commits of the source PR are replayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CherryPickMode {
    /// Replay the PR's full commit list (minus merge commits, per
    /// [`MergeCommitPolicy`])
    #[default]
    Auto,
    /// Replay only the PR's current head commit
    PullRequestHead,
}

impl CherryPickMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CherryPickMode::Auto => "auto",
            CherryPickMode::PullRequestHead => "pull_request_head",
        }
    }
}

impl FromStr for CherryPickMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(CherryPickMode::Auto),
            "pull_request_head" => Ok(CherryPickMode::PullRequestHead),
            other => Err(ConfigError::InvalidValue {
                field: "cherry_picking",
                expected: "either 'auto' or 'pull_request_head'",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CherryPickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How merge commits in the source PR are treated in `auto` mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeCommitPolicy {
    /// Any merge commit fails the branch's task before replay starts
    #[default]
    Fail,
    /// Merge commits are omitted from the replay sequence
    Skip,
}

impl MergeCommitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeCommitPolicy::Fail => "fail",
            MergeCommitPolicy::Skip => "skip",
        }
    }
}

impl FromStr for MergeCommitPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(MergeCommitPolicy::Fail),
            "skip" => Ok(MergeCommitPolicy::Skip),
            other => Err(ConfigError::InvalidValue {
                field: "merge_commits",
                expected: "either 'fail' or 'skip'",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MergeCommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a cherry-pick stops on a conflict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Fail the branch's task; nothing is pushed
    #[default]
    Fail,
    /// Commit the conflict markers, push, and open a draft PR for
    /// manual resolution
    DraftCommitConflicts,
}

impl ConflictResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictResolution::Fail => "fail",
            ConflictResolution::DraftCommitConflicts => "draft_commit_conflicts",
        }
    }
}

impl FromStr for ConflictResolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(ConflictResolution::Fail),
            "draft_commit_conflicts" => Ok(ConflictResolution::DraftCommitConflicts),
            other => Err(ConfigError::InvalidValue {
                field: "conflict_resolution",
                expected: "either 'fail' or 'draft_commit_conflicts'",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
