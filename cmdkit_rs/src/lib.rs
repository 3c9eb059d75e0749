//! # cmdkit
//!
//! **Command-line application framework** - typed option parsing, an explicit
//! command registry and a dispatcher that binds global and per-command options.
//!
//! ## Features
//!
//! - **Typed options** - `-x value` and `--name=value`, values typed as
//!   integer, float, boolean or string, timestamps by declaration
//! - **Quote coalescing** - `"two words"` split by a shell is joined back
//! - **Declarations** - required and optional options, with equivalent forms
//! - **Help** - bundled or on-disk help files with `@MACRO@` expansion
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use cmdkit::cli::{Command, CommandRegistry, Invocation};
//! use cmdkit::cli::entrypoint::{EntryOptions, run};
//!
//! #[derive(Default)]
//! struct Hello;
//!
//! impl Command for Hello {
//!     cmdkit::command_name!(Hello);
//!
//!     fn needs_runtime(&self) -> bool {
//!         false
//!     }
//!
//!     fn execute(&mut self, invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
//!         writeln!(invocation.out, "hello from {}", invocation.config.app_name())?;
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register::<Hello>();
//! let code = run(&EntryOptions {
//!     binary_name: "hello-app",
//!     app_name_var: "HELLO_APP_NAME",
//!     registry: &registry,
//! });
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Option model: literals, typed values, definitions and equivalences.
pub mod option;

/// Commands, parser, dispatcher and entry point.
pub mod cli;

/// Error types.
///
/// # Key Types
///
/// - [`UsageError`] - Mistakes in the invocation, reported to the user
/// - [`Error`] - Crate-level error wrapping usage, command and runtime failures
pub mod error;

// ============================================================================
// Support Modules
// ============================================================================

/// Built-in commands (`version`, `list-commands`, `show-options`, `echo`).
pub mod commands;

/// `.cmdkit/config.toml` loading and application-name sources.
pub mod config;

/// `tracing-subscriber` setup with a reloadable level.
pub mod logging;

/// Runtime context for commands that need one.
pub mod runtime;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{Error, Result, UsageError};
pub use option::{CliOption, Literal, OptionDef, OptionKind, OptionValue};
