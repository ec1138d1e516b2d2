use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    #[serde(alias = "match-mode")]
    pub match_mode: MatchModeSetting,
    #[serde(alias = "ignore-assoc")]
    pub ignore_assoc: bool,
    #[serde(alias = "ignore-config-ns")]
    pub ignore_config_ns: bool,
    pub color: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { match_mode: MatchModeSetting::Wildcard, ignore_assoc: false, ignore_config_ns: false, color: true }
    }
}

/// Matcher used when a pattern carries neither a flag nor a sigil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchModeSetting {
    Exact,
    #[default]
    Wildcard,
    Fuzzy,
}
