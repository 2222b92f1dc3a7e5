use crate::config::{self, ContainerConfig};
use crate::segments::{PromptContext, SegmentProvider};
use crate::utils::truncate_chars;
use async_trait::async_trait;

/// Shows the container id (docker uses it as the hostname) when running inside one.
pub struct ContainerSegment {
    pub id_length: usize,
}

impl ContainerSegment {
    pub fn new() -> Self {
        Self { id_length: 12 }
    }

    pub fn from_config(config: ContainerConfig) -> Self {
        Self {
            id_length: config.id_length.unwrap_or(12),
        }
    }
}

impl Default for ContainerSegment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SegmentProvider for ContainerSegment {
    fn name(&self) -> &'static str {
        config::DOCKER
    }

    async fn produce(&self, ctx: &PromptContext) -> Option<String> {
        if !ctx.in_container {
            return None;
        }

        let id = ctx.run("hostname", &[]).await.ok()?;
        let id = truncate_chars(id.trim(), self.id_length);
        if id.is_empty() {
            return None;
        }

        Some(format!("<{}>", id))
    }
}
