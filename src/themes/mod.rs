use std::collections::HashMap;
use std::env;

/// Per-segment zsh foreground colors. Segments without an entry stay unpainted.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: HashMap<String, String>,
}

impl Theme {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn get_color(&self, segment: &str) -> Option<&str> {
        self.colors.get(segment).map(String::as_str)
    }

    /// Wrap `text` in zsh `%F{..}`/`%f` prompt escapes.
    pub fn paint(&self, segment: &str, text: &str) -> String {
        match self.get_color(segment) {
            Some(color) => format!("%F{{{}}}{}%f", color, text),
            None => text.to_string(),
        }
    }
}

pub fn get_theme(name: &str) -> Theme {
    if !should_use_colors() {
        return Theme::plain();
    }

    match name {
        "dark" => dark_theme(),
        "light" => light_theme(),
        "nord" => nord_theme(),
        "plain" | "none" => Theme::plain(),
        _ => dark_theme(),
    }
}

pub fn should_use_colors() -> bool {
    env::var_os("NO_COLOR").is_none() && env::var("TERM").map_or(true, |term| term != "dumb")
}

fn theme_from(pairs: &[(&str, &str)]) -> Theme {
    Theme {
        colors: pairs
            .iter()
            .map(|(segment, color)| (segment.to_string(), color.to_string()))
            .collect(),
    }
}

fn dark_theme() -> Theme {
    theme_from(&[
        ("venv", "yellow"),
        ("docker", "cyan"),
        ("git", "green"),
        ("dirstack", "magenta"),
        ("load", "244"),
        ("clock", "244"),
    ])
}

fn light_theme() -> Theme {
    theme_from(&[
        ("venv", "130"),
        ("docker", "25"),
        ("git", "28"),
        ("dirstack", "90"),
        ("load", "240"),
        ("clock", "240"),
    ])
}

fn nord_theme() -> Theme {
    theme_from(&[
        ("venv", "#ebcb8b"),
        ("docker", "#88c0d0"),
        ("git", "#a3be8c"),
        ("dirstack", "#b48ead"),
        ("load", "#4c566a"),
        ("clock", "#4c566a"),
    ])
}
