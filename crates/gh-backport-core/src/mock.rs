//! In-memory collaborators for engine tests
//!
//! Shipped as a regular module so the inline unit tests and the
//! integration tests under `tests/` share one set of mocks. Both mocks
//! record every call so tests can assert on side effects (or their
//! absence).

use async_trait::async_trait;
use gh_backport_git::{CherryPick, GitClient, GitError};
use gh_backport_github::{
    Commit, GitHubClient, Milestone, NewPullRequest, SourcePullRequest,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A merged two-commit source PR used across the engine tests
pub fn sample_pull_request() -> SourcePullRequest {
    SourcePullRequest {
        number: 42,
        title: "Fix the thing".to_string(),
        body: Some("It was broken".to_string()),
        head_branch: "fix/thing".to_string(),
        base_branch: "main".to_string(),
        head_sha: "bbb".to_string(),
        merged: true,
        merged_at: None,
        commits: vec![
            Commit {
                sha: "aaa".to_string(),
                is_merge: false,
            },
            Commit {
                sha: "bbb".to_string(),
                is_merge: false,
            },
        ],
        labels: vec![
            "backport-release-1".to_string(),
            "backport-release-2".to_string(),
            "bug".to_string(),
        ],
        assignees: vec!["octocat".to_string()],
        milestone: Some(Milestone {
            number: 7,
            title: "1.2.0".to_string(),
        }),
        requested_reviewers: vec!["hubot".to_string()],
    }
}

/// Recording in-memory [`GitClient`]
#[derive(Debug, Default)]
pub struct MockGit {
    conflict_on: HashSet<String>,
    missing_branches: HashSet<String>,
    fail_push: bool,
    fetched: Mutex<Vec<String>>,
    created_branches: Mutex<Vec<(String, String)>>,
    picked: Mutex<Vec<String>>,
    pushed: Mutex<Vec<String>>,
    aborts: AtomicUsize,
    conflict_commits: AtomicUsize,
}

impl MockGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make cherry-picking `sha` report a conflict
    pub fn with_conflict_on(mut self, sha: &str) -> Self {
        self.conflict_on.insert(sha.to_string());
        self
    }

    /// Make fetching `branch` fail as if it did not exist on origin
    pub fn with_missing_branch(mut self, branch: &str) -> Self {
        self.missing_branches.insert(branch.to_string());
        self
    }

    /// Make every push fail as if the remote rejected it
    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn created_branches(&self) -> Vec<(String, String)> {
        self.created_branches.lock().unwrap().clone()
    }

    pub fn picked(&self) -> Vec<String> {
        self.picked.lock().unwrap().clone()
    }

    pub fn pushed(&self) -> Vec<String> {
        self.pushed.lock().unwrap().clone()
    }

    pub fn aborts(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }

    pub fn conflict_commits(&self) -> usize {
        self.conflict_commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GitClient for MockGit {
    async fn fetch_branch(&self, branch: &str) -> Result<(), GitError> {
        if self.missing_branches.contains(branch) {
            return Err(GitError::Command {
                command: format!("fetch origin {branch}"),
                stderr: format!("fatal: couldn't find remote ref {branch}"),
            });
        }
        self.fetched.lock().unwrap().push(branch.to_string());
        Ok(())
    }

    async fn create_branch(&self, name: &str, from_ref: &str) -> Result<(), GitError> {
        self.created_branches
            .lock()
            .unwrap()
            .push((name.to_string(), from_ref.to_string()));
        Ok(())
    }

    async fn cherry_pick(&self, sha: &str) -> Result<CherryPick, GitError> {
        self.picked.lock().unwrap().push(sha.to_string());
        if self.conflict_on.contains(sha) {
            Ok(CherryPick::Conflict)
        } else {
            Ok(CherryPick::Applied)
        }
    }

    async fn abort_cherry_pick(&self) -> Result<(), GitError> {
        self.aborts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn commit_conflicts(&self) -> Result<(), GitError> {
        self.conflict_commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<(), GitError> {
        if self.fail_push {
            return Err(GitError::Command {
                command: format!("push --set-upstream origin {branch}"),
                stderr: "! [remote rejected]".to_string(),
            });
        }
        self.pushed.lock().unwrap().push(branch.to_string());
        Ok(())
    }
}

/// Recording in-memory [`GitHubClient`] serving one source PR
#[derive(Debug)]
pub struct MockGitHub {
    pr: SourcePullRequest,
    next_number: AtomicU64,
    fail_create: bool,
    fail_labels: bool,
    created: Mutex<Vec<NewPullRequest>>,
    labels: Mutex<Vec<(u64, Vec<String>)>>,
    assignees: Mutex<Vec<(u64, Vec<String>)>>,
    milestones: Mutex<Vec<(u64, u64)>>,
    reviewers: Mutex<Vec<(u64, Vec<String>)>>,
}

impl MockGitHub {
    pub fn new(pr: SourcePullRequest) -> Self {
        Self {
            pr,
            next_number: AtomicU64::new(100),
            fail_create: false,
            fail_labels: false,
            created: Mutex::new(Vec::new()),
            labels: Mutex::new(Vec::new()),
            assignees: Mutex::new(Vec::new()),
            milestones: Mutex::new(Vec::new()),
            reviewers: Mutex::new(Vec::new()),
        }
    }

    /// Make PR creation fail
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make label copying fail, for partial-failure tests
    pub fn failing_labels(mut self) -> Self {
        self.fail_labels = true;
        self
    }

    pub fn created(&self) -> Vec<NewPullRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn labels_added(&self) -> Vec<(u64, Vec<String>)> {
        self.labels.lock().unwrap().clone()
    }

    pub fn assignees_added(&self) -> Vec<(u64, Vec<String>)> {
        self.assignees.lock().unwrap().clone()
    }

    pub fn milestones_set(&self) -> Vec<(u64, u64)> {
        self.milestones.lock().unwrap().clone()
    }

    pub fn reviewers_requested(&self) -> Vec<(u64, Vec<String>)> {
        self.reviewers.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubClient for MockGitHub {
    async fn fetch_pull_request(&self, number: u64) -> anyhow::Result<SourcePullRequest> {
        if number == self.pr.number {
            Ok(self.pr.clone())
        } else {
            Err(anyhow::anyhow!("pull request #{number} not found"))
        }
    }

    async fn create_pull_request(&self, pr: NewPullRequest) -> anyhow::Result<u64> {
        if self.fail_create {
            return Err(anyhow::anyhow!("422 Unprocessable Entity"));
        }
        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(pr);
        Ok(number)
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> anyhow::Result<()> {
        if self.fail_labels {
            return Err(anyhow::anyhow!("403 Forbidden"));
        }
        self.labels
            .lock()
            .unwrap()
            .push((number, labels.to_vec()));
        Ok(())
    }

    async fn add_assignees(&self, number: u64, assignees: &[String]) -> anyhow::Result<()> {
        self.assignees
            .lock()
            .unwrap()
            .push((number, assignees.to_vec()));
        Ok(())
    }

    async fn set_milestone(&self, number: u64, milestone: u64) -> anyhow::Result<()> {
        self.milestones.lock().unwrap().push((number, milestone));
        Ok(())
    }

    async fn request_reviewers(&self, number: u64, reviewers: &[String]) -> anyhow::Result<()> {
        self.reviewers
            .lock()
            .unwrap()
            .push((number, reviewers.to_vec()));
        Ok(())
    }
}
