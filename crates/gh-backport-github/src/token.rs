//! GitHub token resolution
//!
//! In CI the token arrives as an action input; for local runs this
//! falls back to the usual env vars and the `gh` CLI.

use anyhow::{Context, Result};
use log::debug;

/// Resolves the GitHub token for a run
///
/// Tries multiple sources in order:
/// 1. An explicit token (the `github_token` action input)
/// 2. `GITHUB_TOKEN` or `GH_TOKEN` env vars
/// 3. `gh auth token` command
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    explicit: Option<String>,
}

impl TokenResolver {
    /// Create a resolver, optionally seeded with an explicit token
    pub fn new(explicit: Option<String>) -> Self {
        Self {
            explicit: explicit.filter(|t| !t.is_empty()),
        }
    }

    /// Resolve a token, or fail with setup instructions
    pub async fn get_token(&self) -> Result<String> {
        if let Some(token) = &self.explicit {
            debug!("Using explicitly provided token");
            return Ok(token.clone());
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN").or_else(|_| std::env::var("GH_TOKEN")) {
            if !token.is_empty() {
                debug!("Using token from GITHUB_TOKEN/GH_TOKEN");
                return Ok(token);
            }
        }

        debug!("Trying gh auth token");
        let output = tokio::process::Command::new("gh")
            .args(["auth", "token"])
            .output()
            .await
            .context("Failed to run 'gh auth token'")?;

        if output.status.success() {
            let token = String::from_utf8(output.stdout)
                .context("Invalid UTF-8 in gh auth token output")?
                .trim()
                .to_string();
            if !token.is_empty() {
                debug!("Using token from gh CLI");
                return Ok(token);
            }
        }

        Err(anyhow::anyhow!(
            "No GitHub token found. Provide the 'github_token' input, \
             set GITHUB_TOKEN, or run 'gh auth login'"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_token_wins() {
        let resolver = TokenResolver::new(Some("tok_explicit".to_string()));
        assert_eq!(resolver.get_token().await.unwrap(), "tok_explicit");
    }

    #[test]
    fn test_empty_explicit_token_is_ignored() {
        let resolver = TokenResolver::new(Some(String::new()));
        assert!(resolver.explicit.is_none());
    }
}
