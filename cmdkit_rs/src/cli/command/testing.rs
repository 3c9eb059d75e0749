//! Test doubles for the command seams.

use super::{Command, CommandLookup, Invocation};

/// A command that only has a name.
pub(crate) struct NamedCommand(pub String);

impl Command for NamedCommand {
    fn name(&self) -> String {
        self.0.clone()
    }

    fn description(&self) -> &str {
        "test command"
    }

    fn needs_runtime(&self) -> bool {
        false
    }

    fn execute(&mut self, _invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Lookup over a fixed list of names.
pub(crate) struct FakeLookup {
    names: Vec<String>,
}

impl FakeLookup {
    pub(crate) fn new(names: &[&str]) -> Self {
        let mut names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        names.sort();
        Self { names }
    }
}

impl CommandLookup for FakeLookup {
    fn find(&self, name: &str) -> Option<Box<dyn Command>> {
        self.names
            .iter()
            .find(|n| *n == name)
            .map(|n| Box::new(NamedCommand(n.clone())) as Box<dyn Command>)
    }

    fn all_commands(&self) -> Vec<Box<dyn Command>> {
        self.names
            .iter()
            .map(|n| Box::new(NamedCommand(n.clone())) as Box<dyn Command>)
            .collect()
    }
}
