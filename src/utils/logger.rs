use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;

pub const DEBUG_ENV: &str = "PROMPTLINE_DEBUG";

/// Warnings always reach stderr; debug output only with `PROMPTLINE_DEBUG`.
pub fn log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger. Stdout carries the prompt itself, so nothing
/// may ever be logged there.
pub fn init_logging() {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("promptline")
        .build();

    let _ = TermLogger::init(
        log_level(env::var_os(DEBUG_ENV).is_some()),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

pub fn debug_with_context(context: &str, message: &str) {
    log::debug!("{}: {}", context, message);
}
