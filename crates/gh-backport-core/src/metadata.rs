//! Metadata copying
//!
//! Projects selected metadata from the source PR onto a freshly created
//! backport PR. Every category is independent and best-effort: a failed
//! call is logged and the remaining categories still run, because the
//! pull request itself already exists at this point.

use gh_backport_config::BackportConfig;
use gh_backport_github::{GitHubClient, SourcePullRequest};
use log::{debug, warn};

/// Copy configured metadata from `source` onto PR `target_pr`
pub async fn copy_metadata(
    github: &dyn GitHubClient,
    config: &BackportConfig,
    source: &SourcePullRequest,
    target_pr: u64,
) {
    if let Some(pattern) = &config.copy_labels_pattern {
        // Labels matching the trigger pattern are excluded so the
        // backport PR cannot trigger another backport of itself.
        let labels: Vec<String> = source
            .labels
            .iter()
            .filter(|label| pattern.is_match(label))
            .filter(|label| {
                config
                    .label_pattern
                    .as_ref()
                    .is_none_or(|trigger| !trigger.is_match(label))
            })
            .cloned()
            .collect();
        if labels.is_empty() {
            debug!("no labels to copy to #{target_pr}");
        } else if let Err(err) = github.add_labels(target_pr, &labels).await {
            warn!("could not copy labels to #{target_pr}: {err:#}");
        }
    }

    if config.copy_assignees && !source.assignees.is_empty() {
        if let Err(err) = github.add_assignees(target_pr, &source.assignees).await {
            warn!("could not copy assignees to #{target_pr}: {err:#}");
        }
    }

    if config.copy_milestone {
        if let Some(milestone) = &source.milestone {
            if let Err(err) = github.set_milestone(target_pr, milestone.number).await {
                warn!(
                    "could not set milestone '{}' on #{target_pr}: {err:#}",
                    milestone.title
                );
            }
        }
    }

    if config.copy_requested_reviewers && !source.requested_reviewers.is_empty() {
        if let Err(err) = github
            .request_reviewers(target_pr, &source.requested_reviewers)
            .await
        {
            warn!("could not copy review requests to #{target_pr}: {err:#}");
        }
    }
}
