pub mod clock;
pub mod container;
pub mod dirstack;
pub mod git;
pub mod load;
pub mod venv;

pub use clock::*;
pub use container::*;
pub use dirstack::*;
pub use git::*;
pub use load::*;
pub use venv::*;

use crate::config::{self, Config};
use crate::utils::{debug_with_context, CommandMemo, CommandRunner, ProbeError};
use async_trait::async_trait;
use futures::FutureExt;
use chrono::{DateTime, Local};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// A source of one prompt segment.
///
/// `produce` never fails: a missing tool, a timeout or a context where the
/// segment makes no sense all yield `None`.
#[async_trait]
pub trait SegmentProvider: Send + Sync {
    /// Toggle name, also used for theme lookup and logging
    fn name(&self) -> &'static str;

    async fn produce(&self, ctx: &PromptContext) -> Option<String>;
}

/// Environment snapshot for a single redraw.
pub struct PromptContext {
    pub cwd: PathBuf,
    pub virtual_env: Option<String>,
    pub in_container: bool,
    pub dir_stack_depth: usize,
    /// One-minute load average, when the platform exposes it without a subprocess
    pub load_average: Option<f64>,
    pub now: DateTime<Local>,
    timeout: Duration,
    runner: Arc<dyn CommandRunner>,
    memo: CommandMemo,
}

impl PromptContext {
    /// Empty snapshot rooted at `cwd`. Everything else reads as "not applicable".
    pub fn new(runner: Arc<dyn CommandRunner>, timeout: Duration, cwd: PathBuf) -> Self {
        Self {
            cwd,
            virtual_env: None,
            in_container: false,
            dir_stack_depth: 0,
            load_average: None,
            now: Local::now(),
            timeout,
            runner,
            memo: CommandMemo::new(),
        }
    }

    /// Snapshot the host process environment.
    pub async fn capture(
        runner: Arc<dyn CommandRunner>,
        timeout: Duration,
        dir_stack_depth: Option<usize>,
    ) -> Self {
        let cwd = env::current_dir()
            .ok()
            .or_else(|| env::var_os("PWD").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let mut ctx = Self::new(runner, timeout, cwd);
        ctx.virtual_env = env::var("VIRTUAL_ENV").ok().filter(|v| !v.is_empty());
        ctx.in_container = detect_container();
        ctx.dir_stack_depth = dir_stack_depth
            .or_else(|| {
                env::var("PROMPTLINE_DIRSTACK")
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
            })
            .unwrap_or(0);
        ctx.load_average = read_proc_loadavg(Path::new("/proc/loadavg")).await;
        ctx
    }

    pub fn with_virtual_env(mut self, venv: impl Into<String>) -> Self {
        self.virtual_env = Some(venv.into());
        self
    }

    pub fn with_container(mut self, in_container: bool) -> Self {
        self.in_container = in_container;
        self
    }

    pub fn with_dir_stack_depth(mut self, depth: usize) -> Self {
        self.dir_stack_depth = depth;
        self
    }

    pub fn with_load_average(mut self, load: f64) -> Self {
        self.load_average = Some(load);
        self
    }

    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Run an external program in `cwd`, bounded by the configured timeout.
    /// Results are memoized for the lifetime of this snapshot; concurrent
    /// callers of the same command line share one subprocess.
    pub async fn run(&self, program: &str, args: &[&str]) -> Result<String, ProbeError> {
        let key = CommandMemo::key(program, args);
        let shared = self.memo.get_or_start(key, || {
            let runner = self.runner.clone();
            let cwd = self.cwd.clone();
            let timeout = self.timeout;
            let program = program.to_string();
            let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

            async move {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                let result = runner.run(&program, &args, &cwd, timeout).await;
                if let Err(e) = &result {
                    debug_with_context("command", &format!("{} {}: {}", program, args.join(" "), e));
                }
                result
            }
            .boxed()
        });

        shared.await
    }
}

fn detect_container() -> bool {
    Path::new("/.dockerenv").exists()
        || env::var("container").map_or(false, |v| !v.is_empty())
}

pub async fn read_proc_loadavg(path: &Path) -> Option<f64> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    content.split_whitespace().next()?.parse().ok()
}

/// Build the provider registered under `name`, or `None` for unknown names.
pub fn provider_for(name: &str, config: &Config) -> Option<Box<dyn SegmentProvider>> {
    let provider: Box<dyn SegmentProvider> = match name {
        config::GIT => Box::new(GitSegment::from_config(
            config.segments.git.clone().unwrap_or_default(),
        )),
        config::DOCKER => Box::new(ContainerSegment::from_config(
            config.segments.docker.clone().unwrap_or_default(),
        )),
        config::VENV => Box::new(VenvSegment),
        config::LOAD => Box::new(LoadSegment),
        config::DIRSTACK => Box::new(DirStackSegment),
        config::CLOCK => Box::new(ClockSegment::from_config(
            config.segments.clock.clone().unwrap_or_default(),
        )),
        _ => return None,
    };
    Some(provider)
}

/// Providers for the given declared names, in order, skipping unknown names.
pub fn build_providers(names: &[String], config: &Config) -> Vec<Box<dyn SegmentProvider>> {
    names
        .iter()
        .filter_map(|name| {
            let provider = provider_for(name, config);
            if provider.is_none() {
                log::warn!("Unknown segment '{}' in configuration", name);
            }
            provider
        })
        .collect()
}
