use crate::config::{Config, ToggleRegistry};
use crate::segments::{build_providers, PromptContext, SegmentProvider};
use crate::themes::Theme;
use crate::utils::debug_with_context;
use futures::future::join_all;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// One composed prompt. Recomputed on every redraw, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptState {
    pub left: String,
    pub right: String,
}

pub struct PromptComposer {
    prefix: String,
    glyph: String,
    left: Vec<Box<dyn SegmentProvider>>,
    right: Vec<Box<dyn SegmentProvider>>,
    theme: Theme,
    budget: Duration,
}

impl PromptComposer {
    pub fn new(prefix: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            glyph: glyph.into(),
            left: Vec::new(),
            right: Vec::new(),
            theme: Theme::plain(),
            budget: Duration::from_millis(crate::config::DEFAULT_BUDGET_MS),
        }
    }

    /// Providers for both sides in declared order, keeping only enabled toggles.
    pub fn from_config(config: &Config, toggles: &ToggleRegistry, theme: Theme) -> Self {
        let mut composer = Self::new(config.prefix.clone(), config.glyph.clone())
            .with_theme(theme)
            .with_budget(config.budget());
        composer.left = select_enabled(build_providers(&config.left, config), toggles);
        composer.right = select_enabled(build_providers(&config.right, config), toggles);
        composer
    }

    pub fn with_left(mut self, provider: Box<dyn SegmentProvider>) -> Self {
        self.left.push(provider);
        self
    }

    pub fn with_right(mut self, provider: Box<dyn SegmentProvider>) -> Self {
        self.right.push(provider);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Drop every provider whose toggle is off.
    pub fn retain_enabled(mut self, toggles: &ToggleRegistry) -> Self {
        self.left = select_enabled(self.left, toggles);
        self.right = select_enabled(self.right, toggles);
        self
    }

    pub fn left_names(&self) -> Vec<&'static str> {
        self.left.iter().map(|p| p.name()).collect()
    }

    pub fn right_names(&self) -> Vec<&'static str> {
        self.right.iter().map(|p| p.name()).collect()
    }

    /// Query every provider and assemble both sides.
    ///
    /// Left is `prefix seg.. glyph ` with exactly one space between parts;
    /// right is the right-side segments alone. Providers that have not
    /// answered when the budget runs out count as empty.
    pub async fn compose(&self, ctx: &PromptContext) -> PromptState {
        let deadline = Instant::now() + self.budget;
        let (left, right) = futures::join!(
            self.collect(&self.left, ctx, deadline),
            self.collect(&self.right, ctx, deadline)
        );

        let mut parts: Vec<&str> = Vec::with_capacity(left.len() + 2);
        let prefix = self.prefix.trim();
        if !prefix.is_empty() {
            parts.push(prefix);
        }
        parts.extend(left.iter().map(String::as_str));
        let glyph = self.glyph.trim();
        if !glyph.is_empty() {
            parts.push(glyph);
        }

        let mut left_text = parts.join(" ");
        left_text.push(' ');

        PromptState {
            left: left_text,
            right: right.join(" "),
        }
    }

    /// Right side alone, for hosts that fetch it separately. Left-side
    /// providers are not queried.
    pub async fn compose_right(&self, ctx: &PromptContext) -> String {
        let deadline = Instant::now() + self.budget;
        self.collect(&self.right, ctx, deadline).await.join(" ")
    }

    async fn collect(
        &self,
        providers: &[Box<dyn SegmentProvider>],
        ctx: &PromptContext,
        deadline: Instant,
    ) -> Vec<String> {
        let pending = providers.iter().map(|provider| async move {
            match tokio::time::timeout_at(deadline, provider.produce(ctx)).await {
                Ok(Some(text)) => {
                    let text = text.trim();
                    if text.is_empty() {
                        None
                    } else {
                        Some(self.theme.paint(provider.name(), &escape_prompt(text)))
                    }
                }
                Ok(None) => None,
                Err(_) => {
                    debug_with_context(provider.name(), "Dropped, over the redraw budget");
                    None
                }
            }
        });

        join_all(pending).await.into_iter().flatten().collect()
    }
}

fn select_enabled(
    providers: Vec<Box<dyn SegmentProvider>>,
    toggles: &ToggleRegistry,
) -> Vec<Box<dyn SegmentProvider>> {
    providers
        .into_iter()
        .filter(|provider| toggles.get(provider.name()))
        .collect()
}

/// Segment text is data, not prompt markup: a branch named `50%` must not
/// turn into a zsh escape.
pub fn escape_prompt(text: &str) -> String {
    text.replace('%', "%%")
}
