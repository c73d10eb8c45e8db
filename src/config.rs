//! Tracker configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use ::config::{Config, File, FileFormat};
use event_tracker_core::FilterMode;
use serde::{Deserialize, Serialize};

static DEFAULT_DURATION: &str = "1h";

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}

fn default_color() -> bool {
    true
}

/// Configuration at ~/.config/event-tracker/config.toml
///
/// Every field is optional; a missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Filter selected when a session starts
    #[serde(default)]
    pub default_filter: FilterMode,

    /// Length of new events when no end is given (e.g. "30m", "1h 30m")
    #[serde(default = "default_duration")]
    pub default_duration: String,

    /// Paint events with their background color
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            default_filter: FilterMode::default(),
            default_duration: default_duration(),
            color: default_color(),
        }
    }
}

impl TrackerConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("event-tracker");

        Ok(config_dir.join("config.toml"))
    }

    /// Resolve the config path, honoring a `--config` override (with `~` expanded).
    pub fn resolve_path(override_path: Option<&str>) -> Result<PathBuf> {
        match override_path {
            Some(p) => Ok(PathBuf::from(shellexpand::tilde(p).into_owned())),
            None => Self::config_path(),
        }
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config: TrackerConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .with_context(|| format!("Failed to read config file at {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        // Surface a bad duration at startup rather than on the first event
        config.event_duration()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn event_duration(&self) -> Result<Duration> {
        humantime::parse_duration(&self.default_duration).with_context(|| {
            format!("Invalid default_duration '{}'", self.default_duration)
        })
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# event-tracker configuration

# Filter selected at startup (all, past, upcoming, today, month):
# default_filter = \"all\"

# Length of new events when no end is given:
# default_duration = \"{}\"

# Paint events with their past/upcoming color:
# color = true
",
            DEFAULT_DURATION
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Could not create config directory at {}", parent.display())
            })?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file at {}", path.display()))?;

        Ok(())
    }
}
