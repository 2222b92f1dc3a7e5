mod common;

use common::*;
use promptline::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const PREFIX: &str = "%n@%m %~";

fn registry(pairs: &[(&str, bool)]) -> ToggleRegistry {
    pairs.iter().copied().collect()
}

#[tokio::test]
async fn test_every_toggle_subset_keeps_declared_order() {
    let declared = [
        ("venv", "[env]"),
        ("docker", "<4f2a9c1d0e7b>"),
        ("git", "(main)"),
        ("dirstack", "+2"),
    ];
    let ctx = context(Arc::new(FakeRunner::new()));

    for mask in 0u32..(1 << declared.len()) {
        let toggles: Vec<(&str, bool)> = declared
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (*name, mask & (1 << i) != 0))
            .collect();

        let mut composer = PromptComposer::new(PREFIX, "%#");
        for (name, output) in declared {
            composer = composer.with_left(StaticSegment::boxed(name, Some(output)));
        }
        // Enabled but empty providers must not leave gaps.
        composer = composer
            .with_left(StaticSegment::boxed("load", None))
            .with_left(StaticSegment::boxed("clock", Some("   ")))
            .retain_enabled(&registry(&toggles));

        let state = composer.compose(&ctx).await;

        let mut expected = vec![PREFIX];
        for (i, (_, output)) in declared.iter().enumerate() {
            if mask & (1 << i) != 0 {
                expected.push(*output);
            }
        }
        expected.push("%#");
        let expected = format!("{} ", expected.join(" "));

        assert_eq!(state.left, expected, "mask {:04b}", mask);
        assert!(!state.left.contains("  "), "double space for mask {:04b}", mask);
        assert_eq!(state.right, "");
    }
}

#[tokio::test]
async fn test_compose_is_idempotent() {
    let runner = Arc::new(FakeRunner::new().answer("git rev-parse --abbrev-ref HEAD", "develop"));
    let ctx = context(runner)
        .with_virtual_env("/home/me/.venvs/tools")
        .with_dir_stack_depth(3)
        .with_load_average(0.42);

    let composer = PromptComposer::new(PREFIX, "%#")
        .with_left(Box::new(VenvSegment))
        .with_left(Box::new(GitSegment::new()))
        .with_left(Box::new(DirStackSegment))
        .with_right(Box::new(LoadSegment))
        .with_right(Box::new(ClockSegment::new()));

    let first = composer.compose(&ctx).await;
    let second = composer.compose(&ctx).await;

    assert_eq!(first, second);
    assert_eq!(first.left, "%n@%m %~ [tools] (develop) +3 %# ");
    assert!(first.right.starts_with("0.42 "));
}

#[tokio::test]
async fn test_git_only_scenario() {
    let runner = Arc::new(FakeRunner::new().answer("git rev-parse --abbrev-ref HEAD", "main"));
    let ctx = context(runner)
        .with_virtual_env("/srv/app/.venv")
        .with_container(true);

    let mut config = Config::default();
    config.toggles = HashMap::from([
        ("git".to_string(), true),
        ("docker".to_string(), false),
        ("venv".to_string(), false),
    ]);
    let composer = PromptComposer::from_config(&config, &config.toggle_registry(), Theme::plain());

    let state = composer.compose(&ctx).await;

    assert!(state.left.ends_with("(main) %# "), "got {:?}", state.left);
    assert_eq!(state.left, "%n@%m %~ (main) %# ");
}

#[tokio::test]
async fn test_all_toggles_off_leaves_prefix_and_glyph() {
    let runner = Arc::new(FakeRunner::new().answer("git rev-parse --abbrev-ref HEAD", "main"));
    let ctx = context(runner.clone())
        .with_virtual_env("/srv/app/.venv")
        .with_dir_stack_depth(1)
        .with_load_average(1.0);

    let mut config = Config::default();
    config.default_enabled = false;
    let composer = PromptComposer::from_config(&config, &config.toggle_registry(), Theme::plain());

    let state = composer.compose(&ctx).await;

    assert_eq!(state.left, "%n@%m %~ %# ");
    assert_eq!(state.right, "");
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_hung_subprocess_stays_within_budget() {
    let ctx = context(Arc::new(HangingRunner)).with_container(true);
    let composer = PromptComposer::new(PREFIX, "%#")
        .with_budget(Duration::from_millis(100))
        .with_left(Box::new(ContainerSegment::new()))
        .with_left(Box::new(GitSegment::new()))
        .with_right(Box::new(LoadSegment));

    let started = Instant::now();
    let state = composer.compose(&ctx).await;
    let elapsed = started.elapsed();

    assert_eq!(state.left, "%n@%m %~ %# ");
    assert_eq!(state.right, "");
    assert!(elapsed < Duration::from_millis(500), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_slow_provider_keeps_its_position() {
    let ctx = context(Arc::new(FakeRunner::new()));
    let composer = PromptComposer::new("", "$")
        .with_left(SlowSegment::boxed("venv", Duration::from_millis(30)))
        .with_left(StaticSegment::boxed("git", Some("(main)")));

    let state = composer.compose(&ctx).await;
    assert_eq!(state.left, "slow (main) $ ");
}

#[tokio::test]
async fn test_empty_prefix_and_glyph_never_leave_leading_space() {
    let ctx = context(Arc::new(FakeRunner::new()));
    let composer = PromptComposer::new("", "").with_left(StaticSegment::boxed("git", Some("(main)")));

    assert_eq!(composer.compose(&ctx).await.left, "(main) ");

    let composer = PromptComposer::new("", "");
    assert_eq!(composer.compose(&ctx).await.left, " ");
}

#[tokio::test]
async fn test_theme_paints_segments_and_escapes_percent() {
    let ctx = context(Arc::new(FakeRunner::new()));
    let theme = Theme {
        colors: HashMap::from([("git".to_string(), "green".to_string())]),
    };
    let composer = PromptComposer::new(PREFIX, "%#")
        .with_theme(theme)
        .with_left(StaticSegment::boxed("git", Some("(50%-off)")))
        .with_left(StaticSegment::boxed("venv", Some("[env]")));

    let state = composer.compose(&ctx).await;
    assert_eq!(state.left, "%n@%m %~ %F{green}(50%%-off)%f [env] %# ");
}

#[tokio::test]
async fn test_shell_syntax_in_segment_text_stays_literal() {
    let ctx = context(Arc::new(FakeRunner::new()));
    let composer = PromptComposer::new(PREFIX, "%#")
        .with_left(StaticSegment::boxed("git", Some("($(touch${IFS}pwned)`id`)")));

    let state = composer.compose(&ctx).await;
    assert_eq!(state.left, "%n@%m %~ ($(touch${IFS}pwned)`id`) %# ");
}

#[tokio::test]
async fn test_compose_right_skips_left_providers() {
    let runner = Arc::new(FakeRunner::new().answer("git rev-parse --abbrev-ref HEAD", "main"));
    let ctx = context(runner.clone());
    let composer = PromptComposer::new(PREFIX, "%#")
        .with_left(Box::new(GitSegment::new()))
        .with_right(StaticSegment::boxed("clock", Some("12:00:00")));

    assert_eq!(composer.compose_right(&ctx).await, "12:00:00");
    assert_eq!(runner.call_count("git rev-parse --abbrev-ref HEAD"), 0);
}
