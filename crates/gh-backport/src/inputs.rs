//! Action input parsing
//!
//! GitHub Actions exposes workflow inputs as `INPUT_*` environment
//! variables. This module turns them into a validated
//! [`BackportConfig`]; every enum value and pattern is checked here,
//! before any branch or API side effect.

use anyhow::{Context, Result};
use gh_backport_config::{
    compile_copy_labels_pattern, compile_label_pattern, BackportConfig, ConfigError,
    Experimental, PullTemplates,
};
use log::debug;
use std::env;
use std::path::PathBuf;

/// Everything the binary needs to wire up a run
#[derive(Debug)]
pub struct RunContext {
    pub config: BackportConfig,
    pub token: Option<String>,
    pub workspace: PathBuf,
}

/// Read and validate all inputs from the environment
pub fn load() -> Result<RunContext> {
    let workspace = input("github_workspace")
        .or_else(|| env::var("GITHUB_WORKSPACE").ok())
        .ok_or(ConfigError::MissingInput("github_workspace"))?;

    let (repo_owner, repo_name) = repository()?;

    let label_pattern = input("label_pattern")
        .map(|p| compile_label_pattern(&p))
        .transpose()?;
    let copy_labels_pattern = input("copy_labels_pattern")
        .map(|p| compile_copy_labels_pattern(&p))
        .transpose()?;

    let defaults = PullTemplates::default();
    let pull = PullTemplates {
        title: input("pull_title").unwrap_or(defaults.title),
        description: input("pull_description").unwrap_or(defaults.description),
        branch_name: input("branch_name").unwrap_or(defaults.branch_name),
    };

    let cherry_picking = match input("cherry_picking") {
        Some(value) => value.parse()?,
        None => Default::default(),
    };
    let merge_commits = match input("merge_commits") {
        Some(value) => value.parse()?,
        None => Default::default(),
    };
    let experimental = Experimental::from_json(&input("experimental").unwrap_or_default())?;

    let pull_number = match input("pull_number") {
        Some(value) => value
            .parse::<u64>()
            .with_context(|| format!("input 'pull_number' is not a number: '{value}'"))?,
        None => 0,
    };
    // 0 is the "infer from the trigger event" sentinel.
    let pull_number = if pull_number == 0 {
        pull_number_from_trigger()?
    } else {
        pull_number
    };

    let config = BackportConfig {
        repo_owner,
        repo_name,
        label_pattern,
        pull,
        copy_labels_pattern,
        target_branches: input("target_branches"),
        cherry_picking,
        merge_commits,
        copy_assignees: bool_input("copy_assignees"),
        copy_milestone: bool_input("copy_milestone"),
        copy_requested_reviewers: bool_input("copy_requested_reviewers"),
        experimental,
        pull_number,
    };

    Ok(RunContext {
        config,
        token: input("github_token"),
        workspace: PathBuf::from(workspace),
    })
}

/// Read one action input; empty values count as absent
fn input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.to_uppercase());
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn bool_input(name: &str) -> bool {
    input(name).as_deref() == Some("true")
}

fn repository() -> Result<(String, String)> {
    let repository =
        env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY is not set")?;
    let (owner, name) = repository
        .split_once('/')
        .with_context(|| format!("GITHUB_REPOSITORY is not 'owner/repo': '{repository}'"))?;
    Ok((owner.to_string(), name.to_string()))
}

/// Infer the source PR number from the workflow's trigger event payload
fn pull_number_from_trigger() -> Result<u64> {
    let path = env::var("GITHUB_EVENT_PATH")
        .context("input 'pull_number' is 0/absent and GITHUB_EVENT_PATH is not set")?;
    debug!("Inferring pull_number from event payload at {path}");
    let payload = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read event payload at {path}"))?;
    let event: serde_json::Value =
        serde_json::from_str(&payload).context("event payload is not valid JSON")?;
    pull_number_from_event(&event)
        .context("event payload carries no pull request number; set input 'pull_number'")
}

/// Extract the PR number from a webhook event payload
///
/// `pull_request` events carry it under `pull_request.number`;
/// `issue_comment`-style triggers only have a top-level `number`.
fn pull_number_from_event(event: &serde_json::Value) -> Option<u64> {
    event["pull_request"]["number"]
        .as_u64()
        .or_else(|| event["number"].as_u64())
}
