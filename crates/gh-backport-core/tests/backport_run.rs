//! End-to-end engine tests against in-memory collaborators

use gh_backport_config::{
    compile_copy_labels_pattern, compile_label_pattern, BackportConfig, CherryPickMode,
    ConflictResolution, Experimental, MergeCommitPolicy,
};
use gh_backport_core::mock::{sample_pull_request, MockGit, MockGitHub};
use gh_backport_core::{Backport, BackportOutcome, RunResult};
use gh_backport_github::Commit;
use std::sync::Arc;

fn label_config() -> BackportConfig {
    BackportConfig {
        label_pattern: Some(compile_label_pattern("^backport-(.+)$").unwrap()),
        pull_number: 42,
        ..BackportConfig::default()
    }
}

fn explicit_config(targets: &str) -> BackportConfig {
    BackportConfig {
        target_branches: Some(targets.to_string()),
        pull_number: 42,
        ..BackportConfig::default()
    }
}

async fn run_backport(
    github: Arc<MockGitHub>,
    git: Arc<MockGit>,
    config: BackportConfig,
) -> anyhow::Result<RunResult> {
    Backport::new(github, git, config).run().await
}

#[tokio::test]
async fn test_two_labels_create_two_backport_prs() {
    // Worked example: labels backport-release-1 / backport-release-2,
    // pattern ^backport-(.+)$, no explicit targets.
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new());

    let result = run_backport(github.clone(), git.clone(), label_config())
        .await
        .unwrap();

    assert!(result.success());
    assert_eq!(result.outcomes.len(), 2);
    assert_eq!(result.outcomes[0].branch(), "release-1");
    assert_eq!(result.outcomes[1].branch(), "release-2");

    let created = github.created();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].base, "release-1");
    assert_eq!(created[0].head, "backport-42-to-release-1");
    assert_eq!(created[0].title, "[Backport release-1] Fix the thing");
    assert!(!created[0].draft);
    assert_eq!(created[1].base, "release-2");

    assert_eq!(
        git.pushed(),
        vec!["backport-42-to-release-1", "backport-42-to-release-2"]
    );
}

#[tokio::test]
async fn test_no_pattern_and_no_targets_is_vacuous_success() {
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new());
    let config = BackportConfig {
        pull_number: 42,
        ..BackportConfig::default()
    };

    let result = run_backport(github.clone(), git.clone(), config)
        .await
        .unwrap();

    assert!(result.success());
    assert!(result.outcomes.is_empty());
    assert!(git.fetched().is_empty());
    assert!(github.created().is_empty());
}

#[tokio::test]
async fn test_unmerged_pull_request_is_rejected_before_any_work() {
    let mut pr = sample_pull_request();
    pr.merged = false;
    let github = Arc::new(MockGitHub::new(pr));
    let git = Arc::new(MockGit::new());

    let err = run_backport(github.clone(), git.clone(), label_config())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("not merged"));
    assert!(git.fetched().is_empty());
    assert!(github.created().is_empty());
}

#[tokio::test]
async fn test_pull_request_head_mode_replays_only_the_head_commit() {
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new());
    let config = BackportConfig {
        cherry_picking: CherryPickMode::PullRequestHead,
        ..explicit_config("release-1")
    };

    let result = run_backport(github, git.clone(), config).await.unwrap();

    assert!(result.success());
    assert_eq!(git.picked(), vec!["bbb"]);
}

#[tokio::test]
async fn test_auto_skip_replays_only_non_merge_commits() {
    let mut pr = sample_pull_request();
    pr.commits = vec![
        Commit {
            sha: "aaa".to_string(),
            is_merge: false,
        },
        Commit {
            sha: "merge1".to_string(),
            is_merge: true,
        },
        Commit {
            sha: "bbb".to_string(),
            is_merge: false,
        },
    ];
    let github = Arc::new(MockGitHub::new(pr));
    let git = Arc::new(MockGit::new());
    let config = BackportConfig {
        merge_commits: MergeCommitPolicy::Skip,
        ..label_config()
    };

    let result = run_backport(github, git.clone(), config).await.unwrap();

    assert!(result.success());
    // Two targets, each replaying the two non-merge commits.
    assert_eq!(git.picked(), vec!["aaa", "bbb", "aaa", "bbb"]);
}

#[tokio::test]
async fn test_auto_fail_fails_task_before_any_cherry_pick() {
    let mut pr = sample_pull_request();
    pr.commits.push(Commit {
        sha: "merge1".to_string(),
        is_merge: true,
    });
    let github = Arc::new(MockGitHub::new(pr));
    let git = Arc::new(MockGit::new());

    let result = run_backport(github.clone(), git.clone(), label_config())
        .await
        .unwrap();

    assert!(!result.success());
    assert!(result.outcomes.iter().all(|o| o.is_failed()));
    assert!(git.picked().is_empty());
    assert!(git.fetched().is_empty());
    assert!(github.created().is_empty());
}

#[tokio::test]
async fn test_conflict_with_fail_policy_pushes_nothing() {
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new().with_conflict_on("aaa"));

    let result = run_backport(github.clone(), git.clone(), explicit_config("release-1"))
        .await
        .unwrap();

    assert!(!result.success());
    assert_eq!(
        result.outcomes,
        vec![BackportOutcome::Failed {
            branch: "release-1".to_string(),
            reason: "merge conflict on commit aaa".to_string(),
        }]
    );
    assert!(git.pushed().is_empty());
    assert!(github.created().is_empty());
}

#[tokio::test]
async fn test_conflict_with_draft_policy_creates_one_draft_pr() {
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new().with_conflict_on("aaa"));
    let config = BackportConfig {
        experimental: Experimental {
            conflict_resolution: ConflictResolution::DraftCommitConflicts,
        },
        ..explicit_config("release-1")
    };

    let result = run_backport(github.clone(), git.clone(), config)
        .await
        .unwrap();

    // Drafted is the intentional degraded-success path.
    assert!(result.success());
    assert!(matches!(
        result.outcomes[0],
        BackportOutcome::Drafted {
            pull_request: 100,
            ..
        }
    ));
    assert_eq!(git.pushed(), vec!["backport-42-to-release-1"]);
    let created = github.created();
    assert_eq!(created.len(), 1);
    assert!(created[0].draft);
}

#[tokio::test]
async fn test_failed_task_does_not_abort_siblings() {
    // release-1 is missing on origin, release-2 backports cleanly.
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new().with_missing_branch("release-1"));

    let result = run_backport(github.clone(), git.clone(), label_config())
        .await
        .unwrap();

    assert!(!result.success());
    assert_eq!(result.outcomes.len(), 2);
    assert!(result.outcomes[0].is_failed());
    assert!(matches!(
        result.outcomes[1],
        BackportOutcome::Succeeded { .. }
    ));
    assert_eq!(git.pushed(), vec!["backport-42-to-release-2"]);
}

#[tokio::test]
async fn test_push_failure_fails_that_task_only() {
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new().failing_push());

    let result = run_backport(github.clone(), git, explicit_config("release-1"))
        .await
        .unwrap();

    assert!(!result.success());
    assert!(result.outcomes[0].is_failed());
    assert!(github.created().is_empty());
}

#[tokio::test]
async fn test_pr_creation_failure_fails_the_task() {
    let github = Arc::new(MockGitHub::new(sample_pull_request()).failing_create());
    let git = Arc::new(MockGit::new());

    let result = run_backport(github, git.clone(), explicit_config("release-1"))
        .await
        .unwrap();

    assert!(!result.success());
    // The branch was pushed before PR creation failed; re-running is
    // documented as at-least-once, not idempotent.
    assert_eq!(git.pushed(), vec!["backport-42-to-release-1"]);
}

#[tokio::test]
async fn test_metadata_is_copied_onto_created_prs() {
    let github = Arc::new(MockGitHub::new(sample_pull_request()));
    let git = Arc::new(MockGit::new());
    let config = BackportConfig {
        copy_labels_pattern: Some(compile_copy_labels_pattern("^bug$").unwrap()),
        copy_assignees: true,
        copy_milestone: true,
        copy_requested_reviewers: true,
        ..explicit_config("release-1")
    };

    let result = run_backport(github.clone(), git, config).await.unwrap();

    assert!(result.success());
    assert_eq!(github.labels_added(), vec![(100, vec!["bug".to_string()])]);
    assert_eq!(
        github.assignees_added(),
        vec![(100, vec!["octocat".to_string()])]
    );
    assert_eq!(github.milestones_set(), vec![(100, 7)]);
    assert_eq!(
        github.reviewers_requested(),
        vec![(100, vec!["hubot".to_string()])]
    );
}
