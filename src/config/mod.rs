pub mod defaults;
pub mod loader;
pub mod toggles;

pub use defaults::*;
pub use loader::*;
pub use toggles::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Toggle names understood by the built-in providers and the tracker.
pub const GIT: &str = "git";
pub const DOCKER: &str = "docker";
pub const VENV: &str = "venv";
pub const LOAD: &str = "load";
pub const DIRSTACK: &str = "dirstack";
pub const CLOCK: &str = "clock";
pub const DURATION: &str = "duration";
pub const STATUS: &str = "status";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    /// Fixed text every left prompt starts with (zsh escapes allowed).
    pub prefix: String,
    /// Trailing prompt glyph, placed after a single space.
    pub glyph: String,
    #[serde(rename = "defaultEnabled")]
    pub default_enabled: bool,
    pub toggles: HashMap<String, bool>,
    /// Declared order of left-side providers.
    pub left: Vec<String>,
    /// Declared order of right-side providers.
    pub right: Vec<String>,
    #[serde(rename = "timeoutMs")]
    pub timeout_ms: u64,
    #[serde(rename = "budgetMs")]
    pub budget_ms: u64,
    pub segments: SegmentConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub git: Option<GitConfig>,
    pub docker: Option<ContainerConfig>,
    pub clock: Option<ClockConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(rename = "showRepoName")]
    pub show_repo_name: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    #[serde(rename = "idLength")]
    pub id_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    pub format: Option<String>,
}

impl Config {
    /// Per-call limit for one external program.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Wall-clock limit for one whole compose pass.
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }

    pub fn toggle_registry(&self) -> ToggleRegistry {
        ToggleRegistry::new(self.toggles.clone(), self.default_enabled)
    }
}
