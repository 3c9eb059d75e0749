use crate::cli::command::{Command, Invocation};

/// Lists every registered command with its description.
#[derive(Debug, Default)]
pub struct ListCommands;

impl Command for ListCommands {
    crate::command_name!(ListCommands);

    fn description(&self) -> &str {
        "List available commands"
    }

    fn needs_runtime(&self) -> bool {
        false
    }

    fn execute(&mut self, invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
        let commands = invocation.commands.all_commands();
        let width = commands.iter().map(|c| c.name().len()).max().unwrap_or(0);
        for command in commands {
            let line = format!("{:<width$}  {}", command.name(), command.description());
            writeln!(invocation.out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
