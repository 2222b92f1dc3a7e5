use crate::config::{self, ClockConfig};
use crate::segments::{PromptContext, SegmentProvider};
use async_trait::async_trait;

pub struct ClockSegment {
    pub format: String,
}

impl ClockSegment {
    pub fn new() -> Self {
        Self {
            format: "%H:%M:%S".to_string(),
        }
    }

    pub fn from_config(config: ClockConfig) -> Self {
        Self {
            format: config.format.unwrap_or_else(|| "%H:%M:%S".to_string()),
        }
    }
}

impl Default for ClockSegment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SegmentProvider for ClockSegment {
    fn name(&self) -> &'static str {
        config::CLOCK
    }

    // Formats the snapshot time, not the wall clock, so one redraw is stable.
    async fn produce(&self, ctx: &PromptContext) -> Option<String> {
        use std::fmt::Write;

        let mut out = String::new();
        // chrono reports a bad format string as a fmt error
        write!(out, "{}", ctx.now.format(&self.format)).ok()?;
        Some(out)
    }
}
