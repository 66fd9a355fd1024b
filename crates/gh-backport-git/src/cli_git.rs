//! `git` subprocess implementation of the [`GitClient`] trait
//!
//! Commands run in the configured working copy (the action workspace)
//! with a bot committer identity, so the conflict-markers commit works
//! in CI environments that have no global git config.

use crate::client::{CherryPick, GitClient, GitError};
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;

const COMMITTER_NAME: &str = "github-actions[bot]";
const COMMITTER_EMAIL: &str = "github-actions[bot]@users.noreply.github.com";

/// Git CLI client bound to one working copy
#[derive(Debug, Clone)]
pub struct CliGit {
    workdir: PathBuf,
}

impl CliGit {
    /// Create a client operating on the checkout at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Run a git command in the working copy and collect its output
    async fn run(&self, args: &[&str]) -> Result<Output, GitError> {
        debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .env("GIT_COMMITTER_NAME", COMMITTER_NAME)
            .env("GIT_COMMITTER_EMAIL", COMMITTER_EMAIL)
            .output()
            .await?;
        Ok(output)
    }

    /// Run a git command that must succeed, returning trimmed stdout
    async fn run_ok(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(command_error(args, &output));
        }
        let stdout =
            String::from_utf8(output.stdout).map_err(|_| GitError::InvalidOutput {
                command: args.join(" "),
            })?;
        Ok(stdout.trim().to_string())
    }

    /// Paths with unresolved merge conflicts in the working tree
    async fn unmerged_paths(&self) -> Result<Vec<String>, GitError> {
        let stdout = self
            .run_ok(&["diff", "--name-only", "--diff-filter=U"])
            .await?;
        Ok(stdout
            .lines()
            .map(str::to_string)
            .filter(|l| !l.is_empty())
            .collect())
    }
}

#[async_trait]
impl GitClient for CliGit {
    async fn fetch_branch(&self, branch: &str) -> Result<(), GitError> {
        self.run_ok(&["fetch", "origin", branch]).await?;
        Ok(())
    }

    async fn create_branch(&self, name: &str, from_ref: &str) -> Result<(), GitError> {
        self.run_ok(&["switch", "--create", name, from_ref]).await?;
        Ok(())
    }

    async fn cherry_pick(&self, sha: &str) -> Result<CherryPick, GitError> {
        let args = ["cherry-pick", sha];
        let output = self.run(&args).await?;
        if output.status.success() {
            return Ok(CherryPick::Applied);
        }

        // Distinguish a conflict (unmerged paths present) from other
        // cherry-pick failures such as an unknown SHA.
        if !self.unmerged_paths().await?.is_empty() {
            debug!("cherry-pick of {} stopped on conflicts", sha);
            return Ok(CherryPick::Conflict);
        }

        Err(command_error(&args, &output))
    }

    async fn abort_cherry_pick(&self) -> Result<(), GitError> {
        self.run_ok(&["cherry-pick", "--abort"]).await?;
        Ok(())
    }

    async fn commit_conflicts(&self) -> Result<(), GitError> {
        self.run_ok(&["add", "--all"]).await?;
        // `git commit` concludes the interrupted pick with the message
        // git prepared for it; authorship of the original commit is kept.
        self.run_ok(&["commit", "--no-edit"]).await?;
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<(), GitError> {
        self.run_ok(&["push", "--set-upstream", "origin", branch])
            .await?;
        Ok(())
    }
}

fn command_error(args: &[&str], output: &Output) -> GitError {
    GitError::Command {
        command: args.join(" "),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
