use std::collections::HashMap;

/// Read-only map of feature name to enabled flag.
///
/// Built once at startup and never mutated. Names that were never mentioned
/// resolve to the registry's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRegistry {
    flags: HashMap<String, bool>,
    default: bool,
}

impl ToggleRegistry {
    pub fn new(flags: HashMap<String, bool>, default: bool) -> Self {
        Self { flags, default }
    }

    pub fn get(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(self.default)
    }

    pub fn default_value(&self) -> bool {
        self.default
    }
}

impl Default for ToggleRegistry {
    fn default() -> Self {
        Self::new(HashMap::new(), true)
    }
}

impl<'a> FromIterator<(&'a str, bool)> for ToggleRegistry {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        let flags = iter
            .into_iter()
            .map(|(name, enabled)| (name.to_string(), enabled))
            .collect();
        Self::new(flags, true)
    }
}
