//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing-subscriber`; stdout belongs to
//! command output. The filter comes from `CMDKIT_LOG` when set. Otherwise it
//! starts at `warn` and can be changed later through [`LogHandle`], once the
//! config file and the global options are known.

use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "CMDKIT_LOG";

/// Level used when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "warn";

/// Level the verbose flag switches to.
pub const VERBOSE_LEVEL: &str = "debug";

/// Handle to the installed filter.
pub struct LogHandle {
    reload: Option<reload::Handle<EnvFilter, Registry>>,
    from_env: bool,
}

/// Install the global subscriber. A second call (or a subscriber installed by
/// someone else) leaves the existing one in place and returns an inert handle.
pub fn init() -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_LEVEL), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok();

    LogHandle {
        reload: installed.then_some(handle),
        from_env,
    }
}

impl LogHandle {
    /// Handle that changes nothing.
    pub fn disabled() -> Self {
        Self {
            reload: None,
            from_env: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.reload.is_some()
    }

    /// Switch to `level` (any `EnvFilter` directive). `CMDKIT_LOG` wins.
    pub fn apply_level(&self, level: &str) {
        if !self.from_env {
            self.set(level);
        }
    }

    /// Raise the level for `--verbose`. `CMDKIT_LOG` wins.
    pub fn enable_verbose(&self) {
        self.apply_level(VERBOSE_LEVEL);
    }

    fn set(&self, directive: &str) {
        let Some(handle) = &self.reload else {
            return;
        };
        match EnvFilter::try_new(directive) {
            Ok(filter) => {
                if let Err(err) = handle.reload(filter) {
                    warn!(%err, "failed to change the log level");
                }
            }
            Err(err) => warn!(level = directive, %err, "invalid log level, keeping the current one"),
        }
    }
}
