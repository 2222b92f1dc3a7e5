#![allow(dead_code)]

use async_trait::async_trait;
use promptline::{CommandRunner, ProbeError, PromptContext, SegmentProvider};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers from a table keyed by `"program arg1 arg2"`; anything else is unavailable.
#[derive(Default)]
pub struct FakeRunner {
    answers: HashMap<String, Result<String, ProbeError>>,
    delay: Duration,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, command: &str, output: &str) -> Self {
        self.answers
            .insert(command.to_string(), Ok(output.to_string()));
        self
    }

    pub fn fail(mut self, command: &str, error: ProbeError) -> Self {
        self.answers.insert(command.to_string(), Err(error));
        self
    }

    /// Every answer takes this long, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self, command: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == command)
            .count()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        _cwd: &Path,
        _timeout: Duration,
    ) -> Result<String, ProbeError> {
        let mut command = program.to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        self.calls.lock().unwrap().push(command.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.answers
            .get(&command)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::Unavailable(program.to_string())))
    }
}

/// Never answers; only the caller's timeout ends the call.
pub struct HangingRunner;

#[async_trait]
impl CommandRunner for HangingRunner {
    async fn run(
        &self,
        _program: &str,
        _args: &[&str],
        _cwd: &Path,
        _timeout: Duration,
    ) -> Result<String, ProbeError> {
        futures::future::pending().await
    }
}

/// Provider with a fixed answer under a fixed toggle name.
pub struct StaticSegment {
    pub name: &'static str,
    pub output: Option<String>,
}

impl StaticSegment {
    pub fn boxed(name: &'static str, output: Option<&str>) -> Box<dyn SegmentProvider> {
        Box::new(Self {
            name,
            output: output.map(str::to_string),
        })
    }
}

#[async_trait]
impl SegmentProvider for StaticSegment {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn produce(&self, _ctx: &PromptContext) -> Option<String> {
        self.output.clone()
    }
}

/// Sleeps before answering.
pub struct SlowSegment {
    pub name: &'static str,
    pub delay: Duration,
}

impl SlowSegment {
    pub fn boxed(name: &'static str, delay: Duration) -> Box<dyn SegmentProvider> {
        Box::new(Self { name, delay })
    }
}

#[async_trait]
impl SegmentProvider for SlowSegment {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn produce(&self, _ctx: &PromptContext) -> Option<String> {
        tokio::time::sleep(self.delay).await;
        Some("slow".to_string())
    }
}

pub fn context(runner: Arc<dyn CommandRunner>) -> PromptContext {
    PromptContext::new(runner, Duration::from_millis(100), PathBuf::from("/tmp"))
}
