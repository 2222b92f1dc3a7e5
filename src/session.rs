use crate::composer::{PromptComposer, PromptState};
use crate::config::{self, Config, ToggleRegistry};
use crate::segments::PromptContext;
use crate::themes;
use crate::tracker::{CommandLifecycleTracker, CommandRun};
use crate::utils::{debug_with_context, format_duration, CommandRunner};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// What a host shell needs for one redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub left: String,
    pub right: String,
    /// Line to print above the prompt: duration and exit status of the last command.
    pub transient: Option<String>,
}

/// Long-lived prompt engine for one shell session.
pub struct PromptSession {
    composer: PromptComposer,
    toggles: ToggleRegistry,
    tracker: CommandLifecycleTracker,
    last_run: Option<CommandRun>,
    runner: Arc<dyn CommandRunner>,
    timeout: Duration,
    dir_stack_depth: Option<usize>,
    paint_transient: bool,
}

impl PromptSession {
    pub fn new(config: &Config, runner: Arc<dyn CommandRunner>) -> Self {
        let toggles = config.toggle_registry();
        let composer = PromptComposer::from_config(config, &toggles, themes::get_theme(&config.theme));
        Self::from_parts(composer, toggles, runner, config.timeout())
    }

    pub fn from_parts(
        composer: PromptComposer,
        toggles: ToggleRegistry,
        runner: Arc<dyn CommandRunner>,
        timeout: Duration,
    ) -> Self {
        debug_with_context(
            "session",
            &format!(
                "left={:?} right={:?}",
                composer.left_names(),
                composer.right_names()
            ),
        );

        Self {
            composer,
            toggles,
            tracker: CommandLifecycleTracker::new(),
            last_run: None,
            runner,
            timeout,
            dir_stack_depth: None,
            paint_transient: true,
        }
    }

    /// Directory-stack depth reported by the host, overriding `PROMPTLINE_DIRSTACK`.
    pub fn set_dir_stack_depth(&mut self, depth: usize) {
        self.dir_stack_depth = Some(depth);
    }

    /// Whether the transient line carries ANSI colors. Hosts that embed it
    /// in their own markup want it plain.
    pub fn set_paint_transient(&mut self, paint: bool) {
        self.paint_transient = paint;
    }

    pub fn tracker(&self) -> &CommandLifecycleTracker {
        &self.tracker
    }

    pub fn last_run(&self) -> Option<&CommandRun> {
        self.last_run.as_ref()
    }

    pub fn on_command_start(&mut self) {
        self.tracker.begin();
    }

    pub fn on_command_complete(&mut self, exit_code: i32) {
        self.last_run = Some(self.tracker.end(exit_code));
    }

    /// Record a command the host timed itself.
    pub fn record_elapsed(&mut self, elapsed: Duration, exit_code: i32) {
        self.last_run = Some(self.tracker.record_elapsed(elapsed, exit_code));
    }

    /// Record what the host reported after a command: `status` is only
    /// present when a command actually ran, `duration` defaults to zero.
    pub fn record_host_timing(&mut self, status: Option<i32>, duration: Option<u64>) {
        if let Some(code) = status {
            self.record_elapsed(Duration::from_secs(duration.unwrap_or(0)), code);
        }
    }

    /// Snapshot the environment and render.
    pub async fn render_prompt(&mut self) -> RenderedPrompt {
        let ctx =
            PromptContext::capture(self.runner.clone(), self.timeout, self.dir_stack_depth).await;
        self.render_with(&ctx).await
    }

    /// Render against a given snapshot. The last command run is consumed only
    /// once composing finishes, so an abandoned render leaves it in place.
    pub async fn render_with(&mut self, ctx: &PromptContext) -> RenderedPrompt {
        let PromptState { left, right } = self.composer.compose(ctx).await;
        let transient = self
            .last_run
            .take()
            .and_then(|run| transient_line(&run, &self.toggles, self.paint_transient));

        RenderedPrompt {
            left,
            right,
            transient,
        }
    }

    /// Right side only; the last command run stays for the next full render.
    pub async fn render_right(&mut self) -> String {
        let ctx =
            PromptContext::capture(self.runner.clone(), self.timeout, self.dir_stack_depth).await;
        self.composer.compose_right(&ctx).await
    }
}

/// One-shot output: transient line to `err`, then the left and right
/// prompts as two lines on `out`.
pub fn write_prompt(
    rendered: &RenderedPrompt,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    if let Some(line) = &rendered.transient {
        writeln!(err, "{}", line)?;
    }
    writeln!(out, "{}", rendered.left)?;
    writeln!(out, "{}", rendered.right)?;
    out.flush()
}

/// `took 5s exit 2`, or `None` when the command was quick and succeeded.
pub fn transient_line(run: &CommandRun, toggles: &ToggleRegistry, paint: bool) -> Option<String> {
    let mut parts = Vec::new();

    if toggles.get(config::DURATION) && run.duration_segment().is_some() {
        let took = format!("took {}", format_duration(run.duration_secs()));
        parts.push(if paint { took.yellow().to_string() } else { took });
    }

    if toggles.get(config::STATUS) {
        if let Some(status) = run.status_segment() {
            let exit = format!("exit {}", status);
            parts.push(if paint { exit.red().bold().to_string() } else { exit });
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
