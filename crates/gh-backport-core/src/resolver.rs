//! Target branch resolution
//!
//! The resolved set is the union of the explicitly configured branches
//! and the branches named by matching labels, explicit first, first
//! occurrence winning. Order is preserved so task ordering stays
//! deterministic.

use gh_backport_config::BackportConfig;
use log::debug;

/// Resolve the distinct target branches for a run
///
/// The label pattern's first capture group supplies the branch name;
/// config validation has already guaranteed the group exists.
pub fn resolve_target_branches(config: &BackportConfig, labels: &[String]) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();

    if let Some(explicit) = config.target_branches.as_deref() {
        for name in explicit
            .split([',', ' ', '\t', '\n'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            push_unique(&mut targets, name);
        }
    }

    if let Some(pattern) = &config.label_pattern {
        for label in labels {
            if let Some(captures) = pattern.captures(label) {
                if let Some(branch) = captures.get(1) {
                    debug!("label '{}' names target branch '{}'", label, branch.as_str());
                    push_unique(&mut targets, branch.as_str());
                }
            }
        }
    }

    targets
}

fn push_unique(targets: &mut Vec<String>, name: &str) {
    if !targets.iter().any(|t| t == name) {
        targets.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_backport_config::compile_label_pattern;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_labels_resolve_via_capture_group() {
        // Worked example: two backport labels, no explicit targets.
        let config = BackportConfig {
            label_pattern: Some(compile_label_pattern("^backport-(.+)$").unwrap()),
            ..BackportConfig::default()
        };
        let resolved = resolve_target_branches(
            &config,
            &labels(&["backport-release-1", "backport-release-2", "bug"]),
        );
        assert_eq!(resolved, vec!["release-1", "release-2"]);
    }

    #[test]
    fn test_explicit_branches_come_first() {
        let config = BackportConfig {
            label_pattern: Some(compile_label_pattern("^backport-(.+)$").unwrap()),
            target_branches: Some("release-0, release-1".to_string()),
            ..BackportConfig::default()
        };
        let resolved = resolve_target_branches(&config, &labels(&["backport-release-2"]));
        assert_eq!(resolved, vec!["release-0", "release-1", "release-2"]);
    }

    #[test]
    fn test_duplicates_collapse_to_one_task() {
        let config = BackportConfig {
            label_pattern: Some(compile_label_pattern("^backport-(.+)$").unwrap()),
            target_branches: Some("release-1 release-1".to_string()),
            ..BackportConfig::default()
        };
        let resolved = resolve_target_branches(&config, &labels(&["backport-release-1"]));
        assert_eq!(resolved, vec!["release-1"]);
    }

    #[test]
    fn test_no_pattern_and_no_list_resolves_empty() {
        let config = BackportConfig::default();
        assert!(resolve_target_branches(&config, &labels(&["backport-release-1"])).is_empty());
    }

    #[test]
    fn test_non_matching_labels_are_ignored() {
        let config = BackportConfig {
            label_pattern: Some(compile_label_pattern("^backport-(.+)$").unwrap()),
            ..BackportConfig::default()
        };
        assert!(resolve_target_branches(&config, &labels(&["bug", "needs-review"])).is_empty());
    }
}
