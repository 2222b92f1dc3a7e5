use crate::config;
use crate::segments::{PromptContext, SegmentProvider};
use async_trait::async_trait;

pub struct DirStackSegment;

#[async_trait]
impl SegmentProvider for DirStackSegment {
    fn name(&self) -> &'static str {
        config::DIRSTACK
    }

    async fn produce(&self, ctx: &PromptContext) -> Option<String> {
        if ctx.dir_stack_depth == 0 {
            return None;
        }
        Some(format!("+{}", ctx.dir_stack_depth))
    }
}
