//! Error types for parsing, binding and dispatch.
//!
//! Two tiers: [`UsageError`] is everything the person at the terminal can fix
//! (bad quoting, unknown options, missing command). [`Error`] wraps those and
//! adds failures that point at a bug in a command implementation or at the
//! environment the framework runs in.

use thiserror::Error;

/// Errors caused by the invocation itself.
///
/// Rendered as a single line by the entrypoint, followed by a non-zero exit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsageError {
    #[error("unbalanced quotes: {0}")]
    UnbalancedQuotes(String),

    #[error("invalid option: '-'")]
    BareDash,

    #[error("invalid option: '{0}'")]
    InvalidOption(String),

    #[error("option does not contain '=': '{0}'")]
    MissingEquals(String),

    #[error("unknown option: '{0}'")]
    UnknownOption(String),

    #[error("unknown command: '{name}'{}", suggestion_hint(.suggestion))]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },

    #[error("no command given{}", suggestion_hint(.suggestion))]
    NoCommand { suggestion: Option<String> },

    #[error("application name is not set (export CMDKIT_APP_NAME or set app_name in .cmdkit/config.toml)")]
    MissingAppName,

    #[error("missing required option: {0}")]
    MissingRequired(String),

    #[error("option {option} expects {expected} value, got '{actual}'")]
    WrongType {
        option: String,
        expected: &'static str,
        actual: String,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(". Did you mean: {}?", s))
        .unwrap_or_default()
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Broken internal contract: a command assigned a value of the wrong kind,
    /// declared an option without literals, and so on.
    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("runtime initialization failed: {0:#}")]
    RuntimeInit(anyhow::Error),

    #[error("command '{name}' failed: {reason:#}")]
    Command { name: String, reason: anyhow::Error },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors the user caused and can fix by changing the invocation.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// Tests
// ============================================================================
