//! Backport task aggregator
//!
//! Drives one task per resolved target branch to a terminal state and
//! collects the outcomes. Tasks share one working copy, so they run
//! strictly one at a time; a failing task never aborts its siblings.

use crate::conflict::{handle_conflict, ConflictContext};
use crate::error::TaskError;
use crate::metadata::copy_metadata;
use crate::replay::{commits_to_replay, replay_onto, Replay};
use crate::resolver::resolve_target_branches;
use crate::task::{BackportOutcome, BackportTask, RunResult, TaskState};
use crate::templates::{render, TemplateContext};
use anyhow::Context;
use gh_backport_config::BackportConfig;
use gh_backport_git::GitClient;
use gh_backport_github::{GitHubClient, NewPullRequest, SourcePullRequest};
use log::{error, info};
use std::sync::Arc;

/// One backport run: source PR in, aggregated result out
pub struct Backport {
    github: Arc<dyn GitHubClient>,
    git: Arc<dyn GitClient>,
    config: BackportConfig,
}

impl Backport {
    pub fn new(
        github: Arc<dyn GitHubClient>,
        git: Arc<dyn GitClient>,
        config: BackportConfig,
    ) -> Self {
        Self {
            github,
            git,
            config,
        }
    }

    /// Run the full backport workflow
    ///
    /// Returns `Err` only for whole-run failures (source PR unreadable
    /// or unmerged); per-branch failures are reported inside the
    /// [`RunResult`].
    pub async fn run(&self) -> anyhow::Result<RunResult> {
        let pull_number = self.config.pull_number;
        info!("Backporting pull request #{pull_number}");

        let pr = self
            .github
            .fetch_pull_request(pull_number)
            .await
            .with_context(|| format!("failed to fetch pull request #{pull_number}"))?;

        if !pr.merged {
            anyhow::bail!(
                "pull request #{} is not merged; refusing to backport unmerged commits",
                pr.number
            );
        }

        let targets = resolve_target_branches(&self.config, &pr.labels);
        if targets.is_empty() {
            info!("No target branches resolved; nothing to backport");
            return Ok(RunResult::default());
        }
        info!("Resolved target branches: {}", targets.join(", "));

        let mut outcomes = Vec::with_capacity(targets.len());
        for target in &targets {
            let outcome = self.run_task(&pr, target).await;
            match &outcome {
                BackportOutcome::Failed { .. } => error!("{outcome}"),
                _ => info!("{outcome}"),
            }
            outcomes.push(outcome);
        }

        Ok(RunResult { outcomes })
    }

    /// Execute one task to a terminal state
    async fn run_task(&self, pr: &SourcePullRequest, target: &str) -> BackportOutcome {
        let mut task = BackportTask::new(target);
        let fail = |mut task: BackportTask, reason: String| {
            task.advance(TaskState::Failed);
            BackportOutcome::Failed {
                branch: task.target_branch().to_string(),
                reason,
            }
        };

        task.advance(TaskState::Resolving);
        let commits = match commits_to_replay(pr, self.config.cherry_picking, self.config.merge_commits)
        {
            Ok(commits) => commits,
            Err(err) => return fail(task, err.to_string()),
        };

        let template_ctx = TemplateContext::new(pr, target);
        let working_branch = render(&self.config.pull.branch_name, &template_ctx);

        task.advance(TaskState::Replaying);
        let replay =
            match replay_onto(self.git.as_ref(), target, &working_branch, &commits).await {
                Ok(replay) => replay,
                Err(err) => return fail(task, err.to_string()),
            };

        match replay {
            Replay::Conflict { failed_sha } => {
                task.advance(TaskState::Conflicted);
                let outcome = handle_conflict(
                    self.git.as_ref(),
                    self.github.as_ref(),
                    &self.config,
                    pr,
                    &ConflictContext {
                        target_branch: target,
                        working_branch: &working_branch,
                        failed_sha: &failed_sha,
                    },
                )
                .await;
                task.advance(match outcome {
                    BackportOutcome::Drafted { .. } => TaskState::Drafted,
                    _ => TaskState::Failed,
                });
                outcome
            }
            Replay::Applied => {
                task.advance(TaskState::Applied);

                if let Err(err) = self.git.push(&working_branch).await {
                    return fail(task, TaskError::from(err).to_string());
                }
                task.advance(TaskState::Pushed);

                let new_pr = NewPullRequest {
                    base: target.to_string(),
                    head: working_branch,
                    title: render(&self.config.pull.title, &template_ctx),
                    body: render(&self.config.pull.description, &template_ctx),
                    draft: false,
                };
                let pull_request = match self.github.create_pull_request(new_pr).await {
                    Ok(number) => number,
                    Err(source) => {
                        let err = TaskError::Host {
                            action: "create pull request",
                            source,
                        };
                        return fail(task, err.to_string());
                    }
                };

                copy_metadata(self.github.as_ref(), &self.config, pr, pull_request).await;
                task.advance(TaskState::MetadataCopied);

                task.advance(TaskState::Succeeded);
                BackportOutcome::Succeeded {
                    branch: target.to_string(),
                    pull_request,
                }
            }
        }
    }
}
