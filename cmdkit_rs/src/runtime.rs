//! Runtime context handed to commands that ask for one.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::cli::configuration::Configuration;

/// Process-level context built once per invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Runtime {
    pub started_at: DateTime<Utc>,
    pub working_dir: PathBuf,
    pub app_name: String,
}

/// Builds the runtime context from the bound configuration.
pub trait RuntimeProvider {
    fn initialize(&self, config: &Configuration) -> anyhow::Result<Runtime>;
}

/// Runtime rooted at the current working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalRuntime;

impl RuntimeProvider for LocalRuntime {
    fn initialize(&self, config: &Configuration) -> anyhow::Result<Runtime> {
        let working_dir =
            std::env::current_dir().context("cannot determine the working directory")?;
        debug!(dir = %working_dir.display(), app = config.app_name(), "runtime initialized");
        Ok(Runtime {
            started_at: Utc::now(),
            working_dir,
            app_name: config.app_name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_runtime() {
        let config = Configuration::bind(Some("demo".into()), vec![]).unwrap();
        let before = Utc::now();
        let runtime = LocalRuntime.initialize(&config).unwrap();
        assert_eq!(runtime.app_name, "demo");
        assert!(runtime.started_at >= before);
        assert!(runtime.working_dir.is_absolute());
    }
}
