use crate::config::{self, GitConfig};
use crate::segments::{PromptContext, SegmentProvider};
use crate::utils::{debug_with_context, ProbeError};
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    pub branch: String,
    pub repo_name: Option<String>,
}

pub struct GitSegment {
    pub show_repo_name: bool,
}

impl GitSegment {
    pub fn new() -> Self {
        Self {
            show_repo_name: false,
        }
    }

    pub fn from_config(config: GitConfig) -> Self {
        Self {
            show_repo_name: config.show_repo_name.unwrap_or(false),
        }
    }

    /// Ask git for the current branch; outside a repository this is `NotApplicable`.
    pub async fn get_git_info(&self, ctx: &PromptContext) -> Result<GitInfo, ProbeError> {
        let mut branch = ctx.run("git", &["rev-parse", "--abbrev-ref", "HEAD"]).await?;

        // Detached HEAD reports the literal "HEAD"; show the short sha instead.
        if branch == "HEAD" {
            branch = ctx.run("git", &["rev-parse", "--short", "HEAD"]).await?;
        }
        if branch.is_empty() {
            return Err(ProbeError::NotApplicable);
        }

        let repo_name = if self.show_repo_name {
            ctx.run("git", &["rev-parse", "--show-toplevel"])
                .await
                .ok()
                .and_then(|top| {
                    Path::new(&top)
                        .file_name()
                        .and_then(|n| n.to_str())
                        .map(str::to_string)
                })
        } else {
            None
        };

        Ok(GitInfo { branch, repo_name })
    }
}

impl Default for GitSegment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SegmentProvider for GitSegment {
    fn name(&self) -> &'static str {
        config::GIT
    }

    async fn produce(&self, ctx: &PromptContext) -> Option<String> {
        match self.get_git_info(ctx).await {
            Ok(GitInfo {
                branch,
                repo_name: Some(repo),
            }) => Some(format!("({}:{})", repo, branch)),
            Ok(info) => Some(format!("({})", info.branch)),
            Err(e) => {
                debug_with_context("git", &format!("No branch: {}", e));
                None
            }
        }
    }
}
