use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Running { started: Instant },
}

/// Timing and outcome of one finished interactive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRun {
    pub start: Option<Instant>,
    pub end: Instant,
    pub exit_code: i32,
}

impl CommandRun {
    /// Whole seconds between start and end; zero when no start was recorded.
    pub fn duration_secs(&self) -> u64 {
        self.start
            .map(|start| self.end.saturating_duration_since(start).as_secs())
            .unwrap_or(0)
    }

    pub fn duration_segment(&self) -> Option<String> {
        match self.duration_secs() {
            0 => None,
            secs => Some(secs.to_string()),
        }
    }

    pub fn status_segment(&self) -> Option<String> {
        match self.exit_code {
            0 => None,
            code => Some(code.to_string()),
        }
    }
}

/// Two-state machine around each executed command. At most one command is
/// in flight; a second `begin` simply restarts the clock.
#[derive(Debug)]
pub struct CommandLifecycleTracker {
    state: TrackerState,
}

impl CommandLifecycleTracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::Idle,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TrackerState::Running { .. })
    }

    pub fn begin(&mut self) {
        self.begin_at(Instant::now());
    }

    pub fn begin_at(&mut self, started: Instant) {
        self.state = TrackerState::Running { started };
    }

    pub fn end(&mut self, exit_code: i32) -> CommandRun {
        self.end_at(Instant::now(), exit_code)
    }

    pub fn end_at(&mut self, ended: Instant, exit_code: i32) -> CommandRun {
        let start = match std::mem::replace(&mut self.state, TrackerState::Idle) {
            TrackerState::Running { started } => Some(started),
            TrackerState::Idle => None,
        };

        CommandRun {
            start,
            end: ended,
            exit_code,
        }
    }

    /// Record a command the host timed itself: it ended now after `elapsed`.
    pub fn record_elapsed(&mut self, elapsed: Duration, exit_code: i32) -> CommandRun {
        let now = Instant::now();
        // An elapsed time older than the monotonic clock's origin is unreadable; report zero.
        match now.checked_sub(elapsed) {
            Some(started) => self.begin_at(started),
            None => self.state = TrackerState::Idle,
        }
        self.end_at(now, exit_code)
    }
}

impl Default for CommandLifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}
