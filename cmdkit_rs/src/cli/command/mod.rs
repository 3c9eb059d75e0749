//! Commands: the executable units a process can dispatch to.
//!
//! This module is modularized for maintainability:
//!
//! - `registry`: explicit name → factory registry and the [`CommandLookup`] seam
//! - `declarations`: required/optional option declarations and binding
//! - `help`: help sources and `@MACRO@` expansion
//!
//! A command is usually named after its type with [`command_name!`]:
//! `ShowOptions` is dispatched as `show-options`, `VersionCommand` as
//! `version`. The name is built from the identifier as written, so it does
//! not depend on module paths or compiler output.

mod declarations;
pub mod help;
mod registry;
#[cfg(test)]
pub(crate) mod testing;

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::cli::configuration::Configuration;
use crate::option::{CliOption, OptionDef};
use crate::runtime::Runtime;

pub use declarations::OptionDeclarations;
pub use help::{BundledHelp, DirHelp, HelpSource};
pub use registry::{CommandLookup, CommandRegistry};

/// Suffix dropped from type names when deriving command names.
const TYPE_SUFFIX: &str = "Command";

/// A named, executable unit.
pub trait Command {
    /// Dispatch name. Use [`command_name!`] to derive it from the type.
    fn name(&self) -> String;

    /// One-line summary shown in command listings.
    fn description(&self) -> &str {
        ""
    }

    /// Path of the help file, relative to the help source root.
    fn help_file_path(&self) -> String {
        help_file_path(&self.name())
    }

    /// Whether the runtime context has to be initialized before `execute`.
    fn needs_runtime(&self) -> bool {
        true
    }

    /// Declare required and optional options and their equivalences.
    fn declare(&self, _options: &mut OptionDeclarations) {}

    fn execute(&mut self, invocation: &mut Invocation<'_>) -> anyhow::Result<()>;
}

/// Derive a dash-case command name from a type name or path.
///
/// The last path segment is used, generic arguments and a trailing `Command`
/// are dropped, and every uppercase letter after the first starts a new
/// segment: `my_app::cmds::ShowVersion` becomes `show-version`.
pub fn derive_command_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let base = base.rsplit("::").next().unwrap_or(base);
    let base = match base.strip_suffix(TYPE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => base,
    };

    let mut name = String::with_capacity(base.len() + 4);
    for (i, c) in base.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            name.push('-');
        }
        name.extend(c.to_lowercase());
    }
    name
}

/// Implement [`Command::name`] from a type identifier.
///
/// ```
/// use cmdkit::cli::{Command, Invocation};
///
/// struct ShowVersion;
///
/// impl Command for ShowVersion {
///     cmdkit::command_name!(ShowVersion);
///
///     fn execute(&mut self, _invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// assert_eq!(ShowVersion.name(), "show-version");
/// ```
#[macro_export]
macro_rules! command_name {
    ($ty:ident) => {
        fn name(&self) -> ::std::string::String {
            $crate::cli::command::derive_command_name(::std::stringify!($ty))
        }
    };
}

/// Help file path for a command name: `help/<name>.txt`.
pub fn help_file_path(name: &str) -> String {
    format!("help/{}.txt", name)
}

// ============================================================================
// Invocation
// ============================================================================

/// Everything a command sees while executing.
pub struct Invocation<'a> {
    /// Bound global configuration; its label store is writable.
    pub config: &'a mut Configuration,

    /// The command's own options, in encounter order.
    pub options: &'a CommandOptions,

    /// Runtime context, `None` when the command does not need one.
    pub runtime: Option<&'a Runtime>,

    /// All registered commands.
    pub commands: &'a dyn CommandLookup,

    /// Where command output goes.
    pub out: &'a mut dyn Write,
}

/// Parsed options of one command, after binding against its declarations.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    options: Vec<CliOption>,
}

impl CommandOptions {
    pub fn new(options: Vec<CliOption>) -> Self {
        Self { options }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CliOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn as_slice(&self) -> &[CliOption] {
        &self.options
    }

    /// First option with the identity of `def` (kind and literal).
    pub fn get(&self, def: &OptionDef) -> Option<&CliOption> {
        self.options.iter().find(|o| def.is_model_of(o))
    }

    pub fn contains(&self, def: &OptionDef) -> bool {
        self.get(def).is_some()
    }

    pub fn flag(&self, def: &OptionDef) -> bool {
        self.get(def).and_then(CliOption::as_bool).unwrap_or(false)
    }

    pub fn long(&self, def: &OptionDef) -> Option<i64> {
        self.get(def).and_then(CliOption::as_long)
    }

    pub fn double(&self, def: &OptionDef) -> Option<f64> {
        self.get(def).and_then(CliOption::as_double)
    }

    pub fn text(&self, def: &OptionDef) -> Option<&str> {
        self.get(def).and_then(CliOption::as_text)
    }

    pub fn timestamp(&self, def: &OptionDef) -> Option<DateTime<Utc>> {
        self.get(def).and_then(CliOption::as_timestamp)
    }
}

// ============================================================================
// Tests
// ============================================================================
