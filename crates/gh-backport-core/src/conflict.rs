//! Conflict handling
//!
//! The one policy fork that decides whether a replay conflict is
//! terminal or becomes a reviewable artifact: `fail` stops the task,
//! `draft_commit_conflicts` commits the markers, pushes the branch and
//! opens a draft PR for a human to finish.

use crate::error::TaskError;
use crate::metadata::copy_metadata;
use crate::task::BackportOutcome;
use crate::templates::{render, TemplateContext};
use gh_backport_config::{BackportConfig, ConflictResolution};
use gh_backport_git::GitClient;
use gh_backport_github::{GitHubClient, NewPullRequest, SourcePullRequest};
use log::{info, warn};

/// Where the conflict happened
#[derive(Debug, Clone)]
pub struct ConflictContext<'a> {
    pub target_branch: &'a str,
    pub working_branch: &'a str,
    pub failed_sha: &'a str,
}

/// Apply the configured conflict-resolution policy
///
/// Always produces a terminal outcome for the task; errors inside the
/// draft path degrade to `Failed`.
pub async fn handle_conflict(
    git: &dyn GitClient,
    github: &dyn GitHubClient,
    config: &BackportConfig,
    source: &SourcePullRequest,
    ctx: &ConflictContext<'_>,
) -> BackportOutcome {
    match config.experimental.conflict_resolution {
        ConflictResolution::Fail => {
            // Leave the shared working copy clean for the next task.
            if let Err(err) = git.abort_cherry_pick().await {
                warn!("could not abort interrupted cherry-pick: {err}");
            }
            BackportOutcome::Failed {
                branch: ctx.target_branch.to_string(),
                reason: format!("merge conflict on commit {}", ctx.failed_sha),
            }
        }
        ConflictResolution::DraftCommitConflicts => {
            match draft_conflict_pr(git, github, config, source, ctx).await {
                Ok(pull_request) => BackportOutcome::Drafted {
                    branch: ctx.target_branch.to_string(),
                    pull_request,
                    conflict_sha: ctx.failed_sha.to_string(),
                },
                Err(err) => BackportOutcome::Failed {
                    branch: ctx.target_branch.to_string(),
                    reason: err.to_string(),
                },
            }
        }
    }
}

async fn draft_conflict_pr(
    git: &dyn GitClient,
    github: &dyn GitHubClient,
    config: &BackportConfig,
    source: &SourcePullRequest,
    ctx: &ConflictContext<'_>,
) -> Result<u64, TaskError> {
    git.commit_conflicts().await?;
    git.push(ctx.working_branch).await?;

    let template_ctx = TemplateContext::new(source, ctx.target_branch);
    let body = format!(
        "{}\n\nCherry-picking commit {} onto `{}` stopped on conflicts. \
         The conflict markers are committed on this branch; resolve them, \
         then mark this pull request ready for review.",
        render(&config.pull.description, &template_ctx),
        ctx.failed_sha,
        ctx.target_branch,
    );

    let pull_request = github
        .create_pull_request(NewPullRequest {
            base: ctx.target_branch.to_string(),
            head: ctx.working_branch.to_string(),
            title: render(&config.pull.title, &template_ctx),
            body,
            draft: true,
        })
        .await
        .map_err(|source| TaskError::Host {
            action: "create draft pull request",
            source,
        })?;

    info!(
        "opened draft PR #{} for conflicted backport to {}",
        pull_request, ctx.target_branch
    );
    copy_metadata(github, config, source, pull_request).await;
    Ok(pull_request)
}
