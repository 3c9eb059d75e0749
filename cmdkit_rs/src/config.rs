//! Configuration file support for cmdkit.
//!
//! Loads optional `.cmdkit/config.toml` from the working directory, and
//! resolves the application name from the environment or that file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the running application.
pub const APP_NAME_ENV: &str = "CMDKIT_APP_NAME";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CmdkitConfig {
    /// Application name, used when `CMDKIT_APP_NAME` is not set.
    pub app_name: Option<String>,
    /// Log level (`EnvFilter` directive) used when `CMDKIT_LOG` is not set.
    pub log_level: Option<String>,
    /// Directory whose `help/` files override the bundled help.
    /// Relative paths are taken from the config file's project root.
    pub help_dir: Option<PathBuf>,
}

impl CmdkitConfig {
    /// Load config from `.cmdkit/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".cmdkit").join("config.toml");
        let mut config = Self::load_from_path(&config_path);
        if let Some(dir) = &config.help_dir
            && dir.is_relative()
        {
            config.help_dir = Some(root.join(dir));
        }
        config
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

// ============================================================================
// Application name
// ============================================================================

/// Where the running application's name comes from.
pub trait AppNameSource {
    fn app_name(&self) -> Option<String>;
}

/// Reads the name from an environment variable (`CMDKIT_APP_NAME` by default).
#[derive(Debug, Clone, Copy)]
pub struct EnvAppName {
    var: &'static str,
}

impl EnvAppName {
    pub fn new(var: &'static str) -> Self {
        Self { var }
    }
}

impl Default for EnvAppName {
    fn default() -> Self {
        Self::new(APP_NAME_ENV)
    }
}

impl AppNameSource for EnvAppName {
    fn app_name(&self) -> Option<String> {
        std::env::var(self.var).ok()
    }
}

/// A fixed name, for embedders and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAppName(pub Option<String>);

impl AppNameSource for StaticAppName {
    fn app_name(&self) -> Option<String> {
        self.0.clone()
    }
}

impl AppNameSource for CmdkitConfig {
    fn app_name(&self) -> Option<String> {
        self.app_name.clone()
    }
}

/// First non-blank name among `sources`, in order.
pub fn resolve_app_name(sources: &[&dyn AppNameSource]) -> Option<String> {
    sources
        .iter()
        .filter_map(|source| source.app_name())
        .find(|name| !name.trim().is_empty())
}
