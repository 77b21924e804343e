//! Configuration loading for the saekjongi confetti application.
//!
//! Settings live in `config.toml` under the platform configuration
//! directory. A missing file yields the defaults; a malformed one is an
//! error.

use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use saekjongi_core::AnimationSpeed;
use serde::Deserialize;

/// Population size when not configured.
const DEFAULT_AMOUNT: usize = 50;

/// On-disk configuration shape.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    /// Number of confetti particles.
    amount: usize,
    /// Animation speed name ("slow", "medium", "fast").
    speed: String,
    /// Whether the focus-driven backdrop tint is enabled.
    backdrop: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            speed: AnimationSpeed::default().name().to_string(),
            backdrop: true,
        }
    }
}

/// User configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Number of confetti particles.
    pub amount: usize,
    /// Animation speed setting.
    pub speed: AnimationSpeed,
    /// Whether the focus-driven backdrop tint is enabled.
    pub backdrop: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            speed: AnimationSpeed::default(),
            backdrop: true,
        }
    }
}

impl Config {
    /// Load the configuration from the platform config directory.
    ///
    /// Returns the defaults when no file exists.
    pub fn load() -> color_eyre::Result<Self> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .wrap_err_with(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&raw).wrap_err_with(|| format!("parsing config file {}", path.display()))
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> color_eyre::Result<Self> {
        let raw: RawConfig = toml::from_str(text)?;
        let speed = AnimationSpeed::from_name(&raw.speed)
            .ok_or_else(|| eyre!("unknown speed {:?} (expected slow, medium or fast)", raw.speed))?;
        Ok(Self {
            amount: raw.amount,
            speed,
            backdrop: raw.backdrop,
        })
    }
}

/// Path of the configuration file, if a config directory exists.
fn config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "saekjongi")?;
    Some(dirs.config_dir().join("config.toml"))
}
