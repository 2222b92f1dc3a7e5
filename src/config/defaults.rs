use crate::config::*;

pub const DEFAULT_TIMEOUT_MS: u64 = 150;
pub const DEFAULT_BUDGET_MS: u64 = 200;

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            prefix: "%n@%m %~".to_string(),
            glyph: "%#".to_string(),
            default_enabled: true,
            toggles: HashMap::new(),
            left: vec![
                VENV.to_string(),
                DOCKER.to_string(),
                GIT.to_string(),
                DIRSTACK.to_string(),
            ],
            right: vec![LOAD.to_string(), CLOCK.to_string()],
            timeout_ms: DEFAULT_TIMEOUT_MS,
            budget_ms: DEFAULT_BUDGET_MS,
            segments: SegmentConfig::default(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            show_repo_name: Some(false),
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self { id_length: Some(12) }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            format: Some("%H:%M:%S".to_string()),
        }
    }
}
