//! Octocrab-based GitHub API client
//!
//! Direct implementation of the [`GitHubClient`] trait. Typed octocrab
//! builders are used where octocrab models the endpoint; the remaining
//! issue/review mutations go through raw routes.

use crate::client::GitHubClient;
use crate::types::{Commit, Milestone, NewPullRequest, SourcePullRequest};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

/// Direct GitHub API client scoped to one repository
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
    owner: String,
    repo: String,
}

/// Commit entry from the PR commits endpoint
///
/// Deserialized directly from the REST payload; only the fields the
/// engine needs are modeled.
#[derive(Debug, Deserialize)]
struct PullCommit {
    sha: String,
    parents: Vec<ParentRef>,
}

#[derive(Debug, Deserialize)]
struct ParentRef {
    #[allow(dead_code)]
    sha: String,
}

impl OctocrabClient {
    /// Create a client for `owner/repo` with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            octocrab,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Fetch the ordered commit list of a pull request
    ///
    /// Uses the raw REST route so the payload can be deserialized into
    /// exactly what the engine needs (SHA + parent count).
    async fn fetch_commits(&self, number: u64) -> anyhow::Result<Vec<Commit>> {
        let mut commits = Vec::new();
        let mut page = 1u32;

        loop {
            let route = format!(
                "/repos/{}/{}/pulls/{}/commits?per_page=100&page={}",
                self.owner, self.repo, number, page
            );
            let batch: Vec<PullCommit> = self.octocrab.get(route, None::<&()>).await?;
            if batch.is_empty() {
                break;
            }
            let batch_len = batch.len();
            commits.extend(batch.into_iter().map(|c| Commit {
                is_merge: c.parents.len() > 1,
                sha: c.sha,
            }));
            if batch_len < 100 {
                break;
            }
            page += 1;
        }

        Ok(commits)
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_request(&self, number: u64) -> anyhow::Result<SourcePullRequest> {
        debug!("Fetching PR {}/{}#{}", self.owner, self.repo, number);

        let pr = self
            .octocrab
            .pulls(&self.owner, &self.repo)
            .get(number)
            .await?;
        let commits = self.fetch_commits(number).await?;

        debug!("PR #{} has {} commits", number, commits.len());
        Ok(convert_pull_request(&pr, commits))
    }

    async fn create_pull_request(&self, pr: NewPullRequest) -> anyhow::Result<u64> {
        debug!(
            "Creating {}PR {} -> {} in {}/{}",
            if pr.draft { "draft " } else { "" },
            pr.head,
            pr.base,
            self.owner,
            self.repo
        );

        let created = self
            .octocrab
            .pulls(&self.owner, &self.repo)
            .create(&pr.title, &pr.head, &pr.base)
            .body(&pr.body)
            .draft(pr.draft)
            .send()
            .await?;

        Ok(created.number)
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> anyhow::Result<()> {
        debug!("Adding labels {:?} to #{}", labels, number);
        let route = format!(
            "/repos/{}/{}/issues/{}/labels",
            self.owner, self.repo, number
        );
        let _: serde_json::Value = self
            .octocrab
            .post(route, Some(&serde_json::json!({ "labels": labels })))
            .await?;
        Ok(())
    }

    async fn add_assignees(&self, number: u64, assignees: &[String]) -> anyhow::Result<()> {
        debug!("Adding assignees {:?} to #{}", assignees, number);
        let route = format!(
            "/repos/{}/{}/issues/{}/assignees",
            self.owner, self.repo, number
        );
        let _: serde_json::Value = self
            .octocrab
            .post(route, Some(&serde_json::json!({ "assignees": assignees })))
            .await?;
        Ok(())
    }

    async fn set_milestone(&self, number: u64, milestone: u64) -> anyhow::Result<()> {
        debug!("Setting milestone {} on #{}", milestone, number);
        let route = format!("/repos/{}/{}/issues/{}", self.owner, self.repo, number);
        let _: serde_json::Value = self
            .octocrab
            .patch(route, Some(&serde_json::json!({ "milestone": milestone })))
            .await?;
        Ok(())
    }

    async fn request_reviewers(&self, number: u64, reviewers: &[String]) -> anyhow::Result<()> {
        debug!("Requesting reviews from {:?} on #{}", reviewers, number);
        let route = format!(
            "/repos/{}/{}/pulls/{}/requested_reviewers",
            self.owner, self.repo, number
        );
        let _: serde_json::Value = self
            .octocrab
            .post(route, Some(&serde_json::json!({ "reviewers": reviewers })))
            .await?;
        Ok(())
    }
}

/// Convert an octocrab pull request to the engine's source PR type
fn convert_pull_request(
    pr: &octocrab::models::pulls::PullRequest,
    commits: Vec<Commit>,
) -> SourcePullRequest {
    SourcePullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone(),
        head_branch: pr.head.ref_field.clone(),
        base_branch: pr.base.ref_field.clone(),
        head_sha: pr.head.sha.clone(),
        merged: pr.merged_at.is_some(),
        merged_at: pr.merged_at,
        commits,
        labels: pr
            .labels
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|l| l.name.clone())
            .collect(),
        assignees: pr
            .assignees
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|a| a.login.clone())
            .collect(),
        milestone: pr.milestone.as_ref().map(|m| Milestone {
            number: m.number as u64,
            title: m.title.clone(),
        }),
        requested_reviewers: pr
            .requested_reviewers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|r| r.login.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_commit_merge_detection() {
        let json = r#"[
            {"sha": "aaa", "parents": [{"sha": "p1"}]},
            {"sha": "bbb", "parents": [{"sha": "p1"}, {"sha": "p2"}]}
        ]"#;
        let parsed: Vec<PullCommit> = serde_json::from_str(json).unwrap();
        let commits: Vec<Commit> = parsed
            .into_iter()
            .map(|c| Commit {
                is_merge: c.parents.len() > 1,
                sha: c.sha,
            })
            .collect();

        assert!(!commits[0].is_merge);
        assert!(commits[1].is_merge);
    }
}
