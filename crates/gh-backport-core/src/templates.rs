//! Placeholder substitution for PR titles, descriptions and branch names

use gh_backport_github::SourcePullRequest;

/// Values substituted into the configured templates
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    pub target_branch: &'a str,
    pub pull_number: u64,
    pub pull_title: &'a str,
    pub pull_description: &'a str,
    pub pull_head: &'a str,
}

impl<'a> TemplateContext<'a> {
    /// Build the context for backporting `pr` onto `target_branch`
    pub fn new(pr: &'a SourcePullRequest, target_branch: &'a str) -> Self {
        Self {
            target_branch,
            pull_number: pr.number,
            pull_title: &pr.title,
            pull_description: pr.body.as_deref().unwrap_or(""),
            pull_head: &pr.head_branch,
        }
    }
}

/// Render a template, replacing every supported `${placeholder}`
pub fn render(template: &str, ctx: &TemplateContext<'_>) -> String {
    template
        .replace("${target_branch}", ctx.target_branch)
        .replace("${pull_number}", &ctx.pull_number.to_string())
        .replace("${pull_title}", ctx.pull_title)
        .replace("${pull_description}", ctx.pull_description)
        .replace("${pull_head}", ctx.pull_head)
}
