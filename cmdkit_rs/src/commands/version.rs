use crate::cli::command::{Command, Invocation};

/// Prints the application name and the framework version.
#[derive(Debug, Default)]
pub struct Version;

impl Command for Version {
    crate::command_name!(Version);

    fn description(&self) -> &str {
        "Print the version"
    }

    fn needs_runtime(&self) -> bool {
        false
    }

    fn execute(&mut self, invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
        writeln!(
            invocation.out,
            "{} {}",
            invocation.config.app_name(),
            env!("CARGO_PKG_VERSION")
        )?;
        Ok(())
    }
}
