pub mod general;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use general::{GeneralConfig, MatchModeSetting};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

pub const DEFAULT_CONFIG: &str = include_str!("defaults.toml");

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded defaults must parse")
    }
}

impl AppConfig {
    /// Defaults merged with the user file, if there is one.
    pub fn load() -> Self {
        Self::load_lenient(&Self::default_path())
    }

    /// Like [`AppConfig::load_from`], but a missing file yields the defaults and
    /// an unreadable or invalid one is reported and ignored.
    pub fn load_lenient(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring invalid config at {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let contents = std::fs::read_to_string(path)?;
        let user: AppConfig = toml::from_str(&contents)?;
        config.merge(user);
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("kubensx").join("config.toml")
    }

    fn merge(&mut self, user: AppConfig) {
        self.general = user.general;
    }
}

#[cfg(test)]
mod tests;
