// Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ui::registry::NavigationRegistry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub startup: StartupConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Section shown when the dashboard launches
    #[serde(default = "default_tab")]
    pub default_tab: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Terminals narrower than this many columns use the overlay sidebar
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint: u16,

    /// Width of the sidebar column
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_name")]
    pub name: String,

    #[serde(default = "default_department")]
    pub department: String,

    #[serde(default = "default_email")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when neither FACDASH_LOG nor RUST_LOG is set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file location (None = facdash.log under the data directory)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown default tab '{0}'")]
    UnknownTab(String),

    #[error("sidebar width {width} leaves no room below the {breakpoint}-column breakpoint")]
    SidebarTooWide { width: u16, breakpoint: u16 },
}

fn default_tab() -> String {
    "dashboard".to_string()
}

fn default_narrow_breakpoint() -> u16 {
    100
}

fn default_sidebar_width() -> u16 {
    26
}

fn default_profile_name() -> String {
    "Dr. Priya Sharma".to_string()
}

fn default_department() -> String {
    "Computer Science & Engineering".to_string()
}

fn default_email() -> String {
    "priya.sharma@campus.edu".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            default_tab: default_tab(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint: default_narrow_breakpoint(),
            sidebar_width: default_sidebar_width(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            department: default_department(),
            email: default_email(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("facdash")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("facdash")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Default log file location, next to other per-user application data
    pub fn default_log_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join("facdash"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("facdash.log")
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();

            // Running without a writable config dir is fine, defaults still apply
            if let Err(e) = config.save() {
                eprintln!("Warning: Could not create default config file: {}", e);
                eprintln!(
                    "Using built-in defaults. Run 'facdash init-config' to create a config file."
                );
            }

            Ok(config)
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check the settings that depend on the navigation registry and layout
    pub fn validate(&self, registry: &NavigationRegistry) -> std::result::Result<(), ConfigError> {
        if !registry.contains(&self.startup.default_tab) {
            return Err(ConfigError::UnknownTab(self.startup.default_tab.clone()));
        }
        if self.layout.sidebar_width >= self.layout.narrow_breakpoint {
            return Err(ConfigError::SidebarTooWide {
                width: self.layout.sidebar_width,
                breakpoint: self.layout.narrow_breakpoint,
            });
        }
        Ok(())
    }

    /// Resolve the startup tab, falling back to the registry default
    pub fn startup_tab<'a>(&'a self, registry: &'a NavigationRegistry) -> &'a str {
        if registry.contains(&self.startup.default_tab) {
            &self.startup.default_tab
        } else {
            tracing::warn!(
                tab = %self.startup.default_tab,
                "configured default tab is not registered, using {}",
                registry.default_entry().key
            );
            registry.default_entry().key
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(Self::default_log_path)
    }
}
