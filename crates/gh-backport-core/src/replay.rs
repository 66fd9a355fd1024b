//! Commit replay engine
//!
//! Selects the commit sequence for a target branch (cherry-picking mode
//! × merge-commit policy) and applies it to a fresh working branch,
//! stopping at the first commit that does not apply cleanly.

use crate::error::TaskError;
use gh_backport_config::{CherryPickMode, MergeCommitPolicy};
use gh_backport_git::{CherryPick, GitClient};
use gh_backport_github::SourcePullRequest;
use log::{debug, info};

/// Result of replaying a commit sequence onto a working branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replay {
    /// Every commit applied cleanly; the branch is ready to push
    Applied,
    /// Replay stopped on a conflict; earlier commits are applied and
    /// the interrupted cherry-pick state is left in the working copy
    Conflict { failed_sha: String },
}

/// Determine which commits to replay for one task
///
/// A `merge_commits: fail` violation is reported here, before any
/// branch is created or cherry-pick attempted.
pub fn commits_to_replay(
    pr: &SourcePullRequest,
    mode: CherryPickMode,
    merge_commits: MergeCommitPolicy,
) -> Result<Vec<String>, TaskError> {
    match mode {
        CherryPickMode::PullRequestHead => Ok(vec![pr.head_sha.clone()]),
        CherryPickMode::Auto => {
            let merges: Vec<String> = pr
                .commits
                .iter()
                .filter(|c| c.is_merge)
                .map(|c| c.sha.clone())
                .collect();

            match merge_commits {
                MergeCommitPolicy::Fail if !merges.is_empty() => {
                    Err(TaskError::MergeCommitsPresent(merges))
                }
                _ => Ok(pr
                    .commits
                    .iter()
                    .filter(|c| !c.is_merge)
                    .map(|c| c.sha.clone())
                    .collect()),
            }
        }
    }
}

/// Create the working branch from the target's tip and replay `commits`
/// onto it in order
pub async fn replay_onto(
    git: &dyn GitClient,
    target_branch: &str,
    working_branch: &str,
    commits: &[String],
) -> Result<Replay, TaskError> {
    git.fetch_branch(target_branch)
        .await
        .map_err(|source| TaskError::TargetBranchUnavailable {
            branch: target_branch.to_string(),
            source,
        })?;
    git.create_branch(working_branch, &format!("origin/{target_branch}"))
        .await?;

    info!(
        "replaying {} commit(s) onto {}",
        commits.len(),
        working_branch
    );
    for sha in commits {
        match git.cherry_pick(sha).await? {
            CherryPick::Applied => debug!("applied {}", sha),
            CherryPick::Conflict => {
                return Ok(Replay::Conflict {
                    failed_sha: sha.clone(),
                })
            }
        }
    }

    Ok(Replay::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{sample_pull_request, MockGit};
    use gh_backport_github::Commit;

    fn pr_with_commits(commits: &[(&str, bool)]) -> SourcePullRequest {
        let mut pr = sample_pull_request();
        pr.commits = commits
            .iter()
            .map(|(sha, is_merge)| Commit {
                sha: sha.to_string(),
                is_merge: *is_merge,
            })
            .collect();
        pr
    }

    #[test]
    fn test_head_mode_selects_exactly_one_commit() {
        let pr = pr_with_commits(&[("aaa", false), ("bbb", false), ("ccc", false)]);
        let commits =
            commits_to_replay(&pr, CherryPickMode::PullRequestHead, MergeCommitPolicy::Fail)
                .unwrap();
        assert_eq!(commits, vec![pr.head_sha.clone()]);
    }

    #[test]
    fn test_auto_skip_excludes_merge_commits() {
        let pr = pr_with_commits(&[("aaa", false), ("merge", true), ("bbb", false)]);
        let commits =
            commits_to_replay(&pr, CherryPickMode::Auto, MergeCommitPolicy::Skip).unwrap();
        assert_eq!(commits, vec!["aaa", "bbb"]);
    }

    #[test]
    fn test_auto_fail_rejects_merge_commits_up_front() {
        let pr = pr_with_commits(&[("aaa", false), ("merge", true)]);
        let err =
            commits_to_replay(&pr, CherryPickMode::Auto, MergeCommitPolicy::Fail).unwrap_err();
        assert!(matches!(err, TaskError::MergeCommitsPresent(ref shas) if shas == &["merge"]));
    }

    #[test]
    fn test_auto_fail_accepts_linear_history() {
        let pr = pr_with_commits(&[("aaa", false), ("bbb", false)]);
        let commits =
            commits_to_replay(&pr, CherryPickMode::Auto, MergeCommitPolicy::Fail).unwrap();
        assert_eq!(commits, vec!["aaa", "bbb"]);
    }

    #[tokio::test]
    async fn test_replay_stops_at_first_conflict() {
        let git = MockGit::new().with_conflict_on("bbb");
        let commits = vec!["aaa".to_string(), "bbb".to_string(), "ccc".to_string()];

        let replay = replay_onto(&git, "release-1", "work", &commits)
            .await
            .unwrap();

        assert_eq!(
            replay,
            Replay::Conflict {
                failed_sha: "bbb".to_string()
            }
        );
        // ccc is never attempted.
        assert_eq!(git.picked(), vec!["aaa", "bbb"]);
    }

    #[tokio::test]
    async fn test_replay_missing_target_branch_is_fatal() {
        let git = MockGit::new().with_missing_branch("release-9");
        let err = replay_onto(&git, "release-9", "work", &["aaa".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::TargetBranchUnavailable { .. }));
        assert!(git.picked().is_empty());
    }

    #[tokio::test]
    async fn test_replay_creates_branch_from_remote_tracking_ref() {
        let git = MockGit::new();
        replay_onto(&git, "release-1", "work", &["aaa".to_string()])
            .await
            .unwrap();

        assert_eq!(
            git.created_branches(),
            vec![("work".to_string(), "origin/release-1".to_string())]
        );
    }
}
