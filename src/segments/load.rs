use crate::config;
use crate::segments::{PromptContext, SegmentProvider};
use async_trait::async_trait;

/// One-minute load average.
///
/// Linux snapshots carry `/proc/loadavg` already; elsewhere this falls back
/// to `sysctl -n vm.loadavg`, which prints `{ 1.23 1.10 1.00 }`.
pub struct LoadSegment;

impl LoadSegment {
    pub fn parse_sysctl(output: &str) -> Option<f64> {
        output
            .split_whitespace()
            .find(|field| *field != "{")?
            .parse()
            .ok()
    }
}

#[async_trait]
impl SegmentProvider for LoadSegment {
    fn name(&self) -> &'static str {
        config::LOAD
    }

    async fn produce(&self, ctx: &PromptContext) -> Option<String> {
        let load = match ctx.load_average {
            Some(load) => load,
            None => {
                let output = ctx.run("sysctl", &["-n", "vm.loadavg"]).await.ok()?;
                Self::parse_sysctl(&output)?
            }
        };

        Some(format!("{:.2}", load))
    }
}
