//! Run configuration
//!
//! Immutable per-run configuration. Construction validates everything
//! up front: enum inputs go through `FromStr`, patterns through the
//! `compile_*` helpers here.

use crate::error::ConfigError;
use crate::experimental::Experimental;
use crate::policy::{CherryPickMode, MergeCommitPolicy};
use regex::Regex;

/// Templates for the backport PR and its working branch
///
/// Supported placeholders: `${target_branch}`, `${pull_number}`,
/// `${pull_title}`, `${pull_description}` and `${pull_head}`.
#[derive(Debug, Clone)]
pub struct PullTemplates {
    /// Title of the created PR
    pub title: String,

    /// Body of the created PR
    pub description: String,

    /// Name of the working branch pushed to origin
    pub branch_name: String,
}

fn default_title() -> String {
    "[Backport ${target_branch}] ${pull_title}".to_string()
}

fn default_description() -> String {
    "# Description\nBackport of #${pull_number} to `${target_branch}`.".to_string()
}

fn default_branch_name() -> String {
    "backport-${pull_number}-to-${target_branch}".to_string()
}

impl Default for PullTemplates {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            branch_name: default_branch_name(),
        }
    }
}

/// Immutable configuration for one backport run
#[derive(Debug, Clone)]
pub struct BackportConfig {
    /// Repository owner (user or organization)
    pub repo_owner: String,

    /// Repository name
    pub repo_name: String,

    /// Pattern matched against source PR labels; capture group 1 names
    /// the target branch
    pub label_pattern: Option<Regex>,

    /// PR/branch templates
    pub pull: PullTemplates,

    /// Labels matching this pattern are copied to the backport PR
    pub copy_labels_pattern: Option<Regex>,

    /// Explicit target branches, comma or whitespace separated
    pub target_branches: Option<String>,

    /// Which commits to replay
    pub cherry_picking: CherryPickMode,

    /// Merge-commit handling in `auto` mode
    pub merge_commits: MergeCommitPolicy,

    /// Copy assignees from the source PR
    pub copy_assignees: bool,

    /// Copy the milestone from the source PR
    pub copy_milestone: bool,

    /// Copy pending review requests from the source PR
    pub copy_requested_reviewers: bool,

    /// Experimental options
    pub experimental: Experimental,

    /// Source PR number; 0 means "infer from the trigger event" and is
    /// resolved to a concrete number before the engine runs
    pub pull_number: u64,
}

impl Default for BackportConfig {
    fn default() -> Self {
        Self {
            repo_owner: String::new(),
            repo_name: String::new(),
            label_pattern: None,
            pull: PullTemplates::default(),
            copy_labels_pattern: None,
            target_branches: None,
            cherry_picking: CherryPickMode::default(),
            merge_commits: MergeCommitPolicy::default(),
            copy_assignees: false,
            copy_milestone: false,
            copy_requested_reviewers: false,
            experimental: Experimental::default(),
            pull_number: 0,
        }
    }
}

/// Compile the label pattern, requiring a capture group
///
/// Without a capture group the matched label text cannot name a target
/// branch, so that is a configuration error rather than a silent
/// malformed branch name.
pub fn compile_label_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    let regex = compile_pattern("label_pattern", pattern)?;
    if regex.captures_len() < 2 {
        return Err(ConfigError::MissingCaptureGroup {
            field: "label_pattern",
            pattern: pattern.to_string(),
        });
    }
    Ok(regex)
}

/// Compile the copy-labels pattern
pub fn compile_copy_labels_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    compile_pattern("copy_labels_pattern", pattern)
}

fn compile_pattern(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_match_action_defaults() {
        let templates = PullTemplates::default();
        assert_eq!(templates.title, "[Backport ${target_branch}] ${pull_title}");
        assert_eq!(
            templates.branch_name,
            "backport-${pull_number}-to-${target_branch}"
        );
        assert!(templates.description.contains("${pull_number}"));
    }

    #[test]
    fn test_label_pattern_requires_capture_group() {
        assert!(compile_label_pattern("^backport-(.+)$").is_ok());

        let err = compile_label_pattern("^backport-.+$").unwrap_err();
        assert!(matches!(err, ConfigError::MissingCaptureGroup { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_reported_with_field() {
        let err = compile_label_pattern("backport-(").unwrap_err();
        assert!(err.to_string().contains("label_pattern"));
    }

    #[test]
    fn test_copy_labels_pattern_needs_no_capture_group() {
        assert!(compile_copy_labels_pattern("^(?:bug|fix)$").is_ok());
    }
}
