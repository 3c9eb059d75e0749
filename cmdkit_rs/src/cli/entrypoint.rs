//! Shared CLI entry point.
//!
//! Wires logging, the config file, the application name, the help source and
//! the dispatcher together, and turns the outcome into an exit code. Binaries
//! only build their registry and call [`run`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::debug;

use crate::cli::command::{BundledHelp, CommandRegistry, DirHelp, HelpSource};
use crate::cli::dispatch::Dispatcher;
use crate::config::{CmdkitConfig, EnvAppName, resolve_app_name};
use crate::error::Error;
use crate::logging;
use crate::runtime::LocalRuntime;

/// Exit code for usage errors.
pub const EXIT_USAGE: u8 = 1;
/// Exit code for everything else that went wrong.
pub const EXIT_INTERNAL: u8 = 2;

/// Options controlling binary-specific behavior.
pub struct EntryOptions<'a> {
    /// Name used in messages until the application name is known.
    pub binary_name: &'static str,
    /// Environment variable holding the application name.
    pub app_name_var: &'static str,
    pub registry: &'a CommandRegistry,
}

/// Run the CLI with the given options. This is the shared main() body.
pub fn run(opts: &EntryOptions<'_>) -> ExitCode {
    // args[0] is the executable path.
    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ExitCode::from(run_with(opts, raw_args, &root, &mut out))
}

/// [`run`] with explicit arguments, project root and output; returns the
/// exit code.
pub fn run_with(
    opts: &EntryOptions<'_>,
    args: Vec<String>,
    root: &Path,
    out: &mut dyn Write,
) -> u8 {
    let log = logging::init();
    let config = CmdkitConfig::load(root);
    if let Some(level) = &config.log_level {
        log.apply_level(level);
    }

    let env = EnvAppName::new(opts.app_name_var);
    let app_name = resolve_app_name(&[&env, &config]);
    let label = app_name
        .clone()
        .unwrap_or_else(|| opts.binary_name.to_string());

    let dir_help;
    let help: &dyn HelpSource = match &config.help_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "using help directory");
            dir_help = DirHelp::new(dir);
            &dir_help
        }
        None => &BundledHelp,
    };

    let dispatcher = Dispatcher::new(opts.registry, &LocalRuntime, help);
    let result = dispatcher.prepare(args, app_name).and_then(|plan| {
        if plan.config().is_verbose() {
            log.enable_verbose();
        }
        dispatcher.finish(plan, out)
    });

    match result {
        Ok(_) => 0,
        Err(err) => report(&label, &err),
    }
}

fn report(app: &str, err: &Error) -> u8 {
    if is_broken_pipe(err) {
        // Downstream closed the pipe (e.g. piping to `head`).
        return 0;
    }
    if err.is_usage() {
        eprintln!("[{}] error: {}", app, err);
        eprintln!("Run '{} --help' for usage.", app);
        return EXIT_USAGE;
    }
    eprintln!("[{}] internal error: {}", app, err);
    EXIT_INTERNAL
}

fn is_broken_pipe(err: &Error) -> bool {
    match err {
        Error::Io(e) => e.kind() == io::ErrorKind::BrokenPipe,
        Error::Command { reason, .. } => reason
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe),
        _ => false,
    }
}
