//! Bound global configuration: application name, global options, labels.

use std::collections::BTreeMap;

use crate::error::UsageError;
use crate::option::{CliOption, OptionDef};

/// Result of binding the global options of one invocation.
#[derive(Debug, Clone)]
pub struct Configuration {
    app_name: String,
    options: Vec<CliOption>,
    labels: BTreeMap<String, String>,
}

impl Configuration {
    /// Bind global options under `app_name`. A missing or blank name is a
    /// usage error.
    pub fn bind(app_name: Option<String>, options: Vec<CliOption>) -> Result<Self, UsageError> {
        let app_name = app_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(UsageError::MissingAppName)?;
        Ok(Self {
            app_name,
            options,
            labels: BTreeMap::new(),
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Global options in encounter order.
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    /// Global option matching `model` by kind and literal. Only the model's
    /// identity is used, never a value.
    pub fn option(&self, model: &OptionDef) -> Option<&CliOption> {
        self.options.iter().find(|option| model.is_model_of(option))
    }

    /// True when a verbose flag set to true is among the global options.
    pub fn is_verbose(&self) -> bool {
        self.options
            .iter()
            .any(|option| option.is_verbose() && option.as_bool() == Some(true))
    }

    /// Help option among the global options, if any.
    pub fn help_option(&self) -> Option<&CliOption> {
        self.options.iter().find(|option| option.is_help())
    }

    pub fn set_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(key.into(), value.into());
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }
}
