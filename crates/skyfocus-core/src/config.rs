// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::pomodoro::PomodoroConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub pomodoro: PomodoroConfig,
    /// Wall-clock length of one simulated second.
    pub tick_interval_ms: u64,
    pub log_level: String,
    /// Full airport dataset to use instead of the built-in one.
    pub airports_file: Option<PathBuf>,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            pomodoro: PomodoroConfig::default(),
            tick_interval_ms: 1000,
            log_level: "info".to_string(),
            airports_file: None,
        }
    }
}

/// Platform config directory, e.g. `~/.config/skyfocus` on Linux.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "skyfocus", "SkyFocus")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: get_config_root().join(CONFIG_FILE_NAME),
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Missing file means defaults; a present but unreadable file is an error.
    pub fn load(&self) -> Result<FocusConfig> {
        if !self.config_path.exists() {
            log::debug!("No config at {:?}, using defaults", self.config_path);
            return Ok(FocusConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config.json")?;

        serde_json::from_str(&content).context("Failed to parse config.json")
    }

    pub fn save(&self, config: &FocusConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config.json")
    }
}
