use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

static DEFAULT_OUTPUT_PATH: &str = "psb.ics";

/// User configuration at ~/.config/termcal/config.toml
///
/// Every field is optional; command-line flags win over the config file.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Schedule file used when `--schedule` is not given
    pub schedule: Option<PathBuf>,

    /// Output path used when `--output` is not given
    pub output: Option<PathBuf>,

    /// Overrides the term name as the calendar's display name
    pub calendar_name: Option<String>,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("termcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path`, or the default location.
    /// A missing file at the default location yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if !p.exists() => {
                anyhow::bail!("Config file not found at {}", p.display())
            }
            Some(p) => Self::read(p),
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    return Ok(Config::default());
                }
                Self::read(&path)
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.schedule = config.schedule.map(|p| expand_path(&p));
        config.output = config.output.map(|p| expand_path(&p));
        Ok(config)
    }

    /// Schedule file to use: the flag, then the config, else the built-in schedule.
    pub fn schedule_path(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.schedule.clone())
    }

    pub fn output_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}
