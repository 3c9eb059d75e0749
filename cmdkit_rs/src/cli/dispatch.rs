//! Command dispatcher.
//!
//! Dispatching happens in two steps so the caller can act on the bound
//! configuration (log level, verbosity) before anything runs:
//!
//! 1. [`Dispatcher::prepare`] finds the command token, parses command and
//!    global options, binds the configuration and decides between showing
//!    help and running the command.
//! 2. [`Dispatcher::finish`] renders the help, or validates the command's
//!    options, initializes the runtime when needed and executes it.

use std::io::Write;

use tracing::{debug, info};

use super::command::help::HelpRenderer;
use super::command::{Command, CommandLookup, HelpSource, Invocation, OptionDeclarations};
use super::configuration::Configuration;
use super::parser::OptionParser;
use crate::error::{Error, Result, UsageError};
use crate::option::CliOption;
use crate::runtime::RuntimeProvider;

/// What [`Dispatcher::finish`] did.
#[derive(Debug)]
pub enum DispatchResult {
    /// The named command ran to completion. Carries the configuration as the
    /// command left it, labels included.
    Executed {
        command: String,
        config: Configuration,
    },
    /// Help text was written instead of running anything.
    HelpShown,
}

/// Decision taken by [`Dispatcher::prepare`].
pub enum Plan {
    Help(HelpRequest),
    Run(Prepared),
}

impl Plan {
    pub fn config(&self) -> &Configuration {
        match self {
            Plan::Help(request) => &request.config,
            Plan::Run(prepared) => &prepared.config,
        }
    }
}

/// Help for `command`, or general help when there is none.
pub struct HelpRequest {
    pub config: Configuration,
    pub command: Option<Box<dyn Command>>,
}

/// A command ready to be validated and run.
pub struct Prepared {
    pub command: Box<dyn Command>,
    pub config: Configuration,
    /// Command options as parsed, before binding to the declarations.
    pub options: Vec<CliOption>,
}

pub struct Dispatcher<'a> {
    commands: &'a dyn CommandLookup,
    runtime: &'a dyn RuntimeProvider,
    help: &'a dyn HelpSource,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        commands: &'a dyn CommandLookup,
        runtime: &'a dyn RuntimeProvider,
        help: &'a dyn HelpSource,
    ) -> Self {
        Self {
            commands,
            runtime,
            help,
        }
    }

    /// Split `args` at the first token naming a registered command. Tokens
    /// after it are the command's options, tokens before it are global.
    pub fn prepare(&self, mut args: Vec<String>, app_name: Option<String>) -> Result<Plan> {
        let parser = OptionParser::new(self.commands);

        let found = args
            .iter()
            .enumerate()
            .find_map(|(i, token)| self.commands.find(token).map(|cmd| (i, cmd)));

        let Some((position, command)) = found else {
            return self.prepare_without_command(&parser, args, app_name);
        };

        debug!(command = %command.name(), position, "command token found");
        args.remove(position);
        let command_options = parser.parse(&mut args, position)?;
        let globals = parser.parse(&mut args, 0)?;
        let config = Configuration::bind(app_name, globals)?;

        let help_target = command_options
            .iter()
            .chain(config.options())
            .find(|option| option.is_help())
            .map(|option| option.help_target().map(str::to_string));

        if let Some(target) = help_target {
            let command = match target {
                Some(name) => self.commands.find(&name),
                None => Some(command),
            };
            return Ok(Plan::Help(HelpRequest { config, command }));
        }

        Ok(Plan::Run(Prepared {
            command,
            config,
            options: command_options,
        }))
    }

    fn prepare_without_command(
        &self,
        parser: &OptionParser<'_>,
        mut args: Vec<String>,
        app_name: Option<String>,
    ) -> Result<Plan> {
        let globals = match parser.parse(&mut args, 0) {
            Ok(globals) => globals,
            // A stray word with no command around it is most likely a
            // mistyped command name.
            Err(UsageError::UnknownOption(token)) => {
                return Err(UsageError::NoCommand {
                    suggestion: self.commands.suggest(&token),
                }
                .into());
            }
            Err(err) => return Err(err.into()),
        };
        let config = Configuration::bind(app_name, globals)?;

        let help_target = config
            .help_option()
            .map(|option| option.help_target().map(str::to_string));
        match help_target {
            Some(target) => {
                let command = target.and_then(|name| self.commands.find(&name));
                Ok(Plan::Help(HelpRequest { config, command }))
            }
            None => Err(UsageError::NoCommand { suggestion: None }.into()),
        }
    }

    /// Carry out a plan, writing help or command output to `out`.
    pub fn finish(&self, plan: Plan, out: &mut dyn Write) -> Result<DispatchResult> {
        match plan {
            Plan::Help(request) => {
                let renderer =
                    HelpRenderer::new(self.help, self.commands, request.config.app_name());
                let text = match &request.command {
                    Some(command) => renderer.command(command.as_ref()),
                    None => renderer.general(),
                };
                out.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    writeln!(out)?;
                }
                Ok(DispatchResult::HelpShown)
            }
            Plan::Run(prepared) => self.execute(prepared, out),
        }
    }

    /// [`prepare`](Self::prepare) then [`finish`](Self::finish).
    pub fn dispatch(
        &self,
        args: Vec<String>,
        app_name: Option<String>,
        out: &mut dyn Write,
    ) -> Result<DispatchResult> {
        let plan = self.prepare(args, app_name)?;
        self.finish(plan, out)
    }

    fn execute(&self, prepared: Prepared, out: &mut dyn Write) -> Result<DispatchResult> {
        let Prepared {
            mut command,
            mut config,
            options,
        } = prepared;
        let name = command.name();

        let mut declarations = OptionDeclarations::new();
        command.declare(&mut declarations);
        let options = declarations.bind(options)?;

        let runtime = if command.needs_runtime() {
            Some(
                self.runtime
                    .initialize(&config)
                    .map_err(Error::RuntimeInit)?,
            )
        } else {
            debug!(command = %name, "command needs no runtime, skipping initialization");
            None
        };

        let mut invocation = Invocation {
            config: &mut config,
            options: &options,
            runtime: runtime.as_ref(),
            commands: self.commands,
            out,
        };
        command
            .execute(&mut invocation)
            .map_err(|reason| match reason.downcast::<UsageError>() {
                Ok(usage) => Error::Usage(usage),
                Err(reason) => Error::Command {
                    name: name.clone(),
                    reason,
                },
            })?;

        info!(command = %name, "command finished");
        Ok(DispatchResult::Executed {
            command: name,
            config,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
