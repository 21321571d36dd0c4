use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::platform;

/// Environment override for the settings file location.
pub const CONFIG_ENV: &str = "RADIO_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Station list.  Relative paths are resolved against the program's own
    /// directory.  Defaults to `config.txt` there.
    #[serde(default)]
    pub stations_file: Option<PathBuf>,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Explicit mpv binary.  When unset, `MPV_PATH`, the executable's
    /// directory and `PATH` are searched in that order.
    #[serde(default)]
    pub binary: Option<PathBuf>,
    /// Extra arguments appended to every mpv invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
    #[serde(default = "default_volume")]
    pub volume: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_enabled")]
    pub enabled: bool,
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            binary: None,
            extra_args: Vec::new(),
            volume: default_volume(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: default_probe_enabled(),
            timeout_secs: default_probe_timeout(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            page_size: default_page_size(),
        }
    }
}

fn default_volume() -> u8 {
    100
}

fn default_probe_enabled() -> bool {
    true
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_color() -> bool {
    true
}

fn default_page_size() -> usize {
    15
}

impl Config {
    /// Load settings from [`Config::config_path`].  A missing file is not an
    /// error; the defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => platform::config_dir().join("config.toml"),
        }
    }

    /// mpv volume clamped to what mpv accepts without `--volume-max`.
    pub fn volume(&self) -> u8 {
        self.player.volume.min(130)
    }
}
