use crate::config;
use crate::segments::{PromptContext, SegmentProvider};
use async_trait::async_trait;
use std::path::Path;

/// Name of the active Python virtual environment.
pub struct VenvSegment;

#[async_trait]
impl SegmentProvider for VenvSegment {
    fn name(&self) -> &'static str {
        config::VENV
    }

    async fn produce(&self, ctx: &PromptContext) -> Option<String> {
        let venv = ctx.virtual_env.as_deref()?;
        let name = Path::new(venv.trim_end_matches('/'))
            .file_name()
            .and_then(|n| n.to_str())?;

        Some(format!("[{}]", name))
    }
}
