use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ui::theme::DEFAULT_THEME;

pub const MIN_REFRESH_MS: u64 = 50;
pub const MAX_REFRESH_MS: u64 = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_keyboard")]
    pub show_keyboard: bool,
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_show_keyboard() -> bool {
    true
}
fn default_refresh_interval_ms() -> u64 {
    100
}
fn default_toast_secs() -> u64 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_keyboard: default_show_keyboard(),
            refresh_interval_ms: default_refresh_interval_ms(),
            toast_secs: default_toast_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stenomaster")
            .join("config.toml")
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn normalize(&mut self) {
        self.refresh_interval_ms = self.refresh_interval_ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS);
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }
}
