//! Help text: where it comes from and how its `@MACRO@` placeholders expand.
//!
//! Help files live under `help/` (see [`super::help_file_path`]). The ones
//! shipped with the crate are compiled in; a help directory configured at
//! runtime overrides them file by file.
//!
//! Placeholders: `@APP@`, `@VERSION@`, `@COMMANDS@` everywhere, plus
//! `@COMMAND@`, `@DESCRIPTION@` and `@OPTIONS@` in command help. Unknown
//! placeholders are left as written.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{Command, CommandLookup, OptionDeclarations};

/// Path of the help shown when no command is named.
pub const GENERAL_HELP_PATH: &str = "help/general.txt";

const FALLBACK_GENERAL: &str =
    "Usage: @APP@ [GLOBAL OPTIONS] <command> [OPTIONS]\n\nCommands:\n@COMMANDS@\n";
const FALLBACK_COMMAND: &str = "@APP@ @COMMAND@ - @DESCRIPTION@\n\nOptions:\n@OPTIONS@\n";

const BUNDLED: &[(&str, &str)] = &[
    (GENERAL_HELP_PATH, include_str!("../../../help/general.txt")),
    ("help/echo.txt", include_str!("../../../help/echo.txt")),
    (
        "help/list-commands.txt",
        include_str!("../../../help/list-commands.txt"),
    ),
    (
        "help/show-options.txt",
        include_str!("../../../help/show-options.txt"),
    ),
    ("help/version.txt", include_str!("../../../help/version.txt")),
];

/// Loader for help file contents.
pub trait HelpSource {
    /// Raw contents of the help file at `path`; empty when there is none.
    fn load_help_bytes(&self, path: &str) -> Vec<u8>;
}

/// Help files compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledHelp;

impl HelpSource for BundledHelp {
    fn load_help_bytes(&self, path: &str) -> Vec<u8> {
        BUNDLED
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, text)| text.as_bytes().to_vec())
            .unwrap_or_default()
    }
}

/// Help files read from a directory, falling back to the bundled ones.
#[derive(Debug, Clone)]
pub struct DirHelp {
    root: PathBuf,
}

impl DirHelp {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl HelpSource for DirHelp {
    fn load_help_bytes(&self, path: &str) -> Vec<u8> {
        let full = self.root.join(path);
        match fs::read(&full) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %full.display(), %err, "help file not readable, using bundled help");
                BundledHelp.load_help_bytes(path)
            }
        }
    }
}

/// Renders general and per-command help.
pub struct HelpRenderer<'a> {
    source: &'a dyn HelpSource,
    commands: &'a dyn CommandLookup,
    app_name: &'a str,
}

impl<'a> HelpRenderer<'a> {
    pub fn new(
        source: &'a dyn HelpSource,
        commands: &'a dyn CommandLookup,
        app_name: &'a str,
    ) -> Self {
        Self {
            source,
            commands,
            app_name,
        }
    }

    pub fn general(&self) -> String {
        let text = self
            .load(GENERAL_HELP_PATH)
            .unwrap_or_else(|| FALLBACK_GENERAL.to_string());
        expand_macros(&text, |name| self.common_macro(name))
    }

    pub fn command(&self, command: &dyn Command) -> String {
        let mut declarations = OptionDeclarations::new();
        command.declare(&mut declarations);

        let text = self
            .load(&command.help_file_path())
            .unwrap_or_else(|| FALLBACK_COMMAND.to_string());
        expand_macros(&text, |name| match name {
            "COMMAND" => Some(command.name()),
            "DESCRIPTION" => Some(command.description().to_string()),
            "OPTIONS" => Some(options_table(&declarations)),
            other => self.common_macro(other),
        })
    }

    fn load(&self, path: &str) -> Option<String> {
        let bytes = self.source.load_help_bytes(path);
        if bytes.is_empty() {
            return None;
        }
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn common_macro(&self, name: &str) -> Option<String> {
        match name {
            "APP" => Some(self.app_name.to_string()),
            "VERSION" => Some(env!("CARGO_PKG_VERSION").to_string()),
            "COMMANDS" => Some(commands_table(self.commands)),
            _ => None,
        }
    }
}

fn commands_table(commands: &dyn CommandLookup) -> String {
    commands
        .all_commands()
        .iter()
        .map(|cmd| format!("  {:<16} {}", cmd.name(), cmd.description()).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn options_table(declarations: &OptionDeclarations) -> String {
    let mut lines = Vec::new();
    for def in declarations.iter() {
        let mut line = format!("  {:<24} {} value", def.to_string(), def.kind().describe());
        if declarations.is_required(def) {
            line.push_str(", required");
        }
        let same: Vec<String> = declarations
            .equivalences()
            .of(def)
            .map(ToString::to_string)
            .collect();
        if !same.is_empty() {
            line.push_str(&format!(" (same as {})", same.join(", ")));
        }
        lines.push(line);
    }
    if lines.is_empty() {
        return "  (none)".to_string();
    }
    lines.join("\n")
}

fn is_macro_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Replace `@NAME@` placeholders for which `lookup` has a value.
pub fn expand_macros(text: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('@') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('@') {
            Some(end) if is_macro_name(&after[..end]) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('@');
                        out.push_str(name);
                        out.push('@');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('@');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// ============================================================================
// Tests
// ============================================================================
