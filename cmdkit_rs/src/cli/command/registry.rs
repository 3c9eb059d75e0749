//! Explicit command registry.
//!
//! Commands are registered up front as factories keyed by their derived
//! name. Every lookup builds a fresh instance.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use super::Command;
use crate::cli::parser::helpers::suggest_similar;

/// Name-based access to the available commands.
pub trait CommandLookup {
    /// A fresh instance of the command called `name`, if registered.
    fn find(&self, name: &str) -> Option<Box<dyn Command>>;

    /// One instance of every command, ordered by name.
    fn all_commands(&self) -> Vec<Box<dyn Command>>;

    fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Closest registered name to `input`, for "did you mean" hints.
    fn suggest(&self, input: &str) -> Option<String> {
        suggest_similar(input, self.all_commands().iter().map(|c| c.name()))
    }
}

type Factory = Box<dyn Fn() -> Box<dyn Command>>;

/// Name → factory map.
#[derive(Default)]
pub struct CommandRegistry {
    factories: BTreeMap<String, Factory>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command type, built with `Default`.
    pub fn register<C>(&mut self) -> &mut Self
    where
        C: Command + Default + 'static,
    {
        self.register_with(|| Box::new(C::default()))
    }

    /// Register a factory. The name is taken from one instance it builds; a
    /// second registration under the same name replaces the first.
    pub fn register_with<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Command> + 'static,
    {
        let name = factory().name();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            warn!(command = %name, "command registered twice, keeping the latest");
        } else {
            debug!(command = %name, "registered command");
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl CommandLookup for CommandRegistry {
    fn find(&self, name: &str) -> Option<Box<dyn Command>> {
        self.factories.get(name).map(|factory| factory())
    }

    fn all_commands(&self) -> Vec<Box<dyn Command>> {
        self.factories.values().map(|factory| factory()).collect()
    }

    fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    fn suggest(&self, input: &str) -> Option<String> {
        suggest_similar(input, self.names())
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::Invocation;

    #[derive(Default)]
    struct Deploy;

    impl Command for Deploy {
        crate::command_name!(Deploy);

        fn description(&self) -> &str {
            "Deploy things"
        }

        fn execute(&mut self, _invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct ListTargets;

    impl Command for ListTargets {
        crate::command_name!(ListTargets);

        fn execute(&mut self, _invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register::<ListTargets>().register::<Deploy>();
        registry
    }

    #[test]
    fn test_find_by_derived_name() {
        let registry = registry();
        let found = registry.find("deploy").expect("deploy registered");
        assert_eq!(found.description(), "Deploy things");
        assert!(registry.contains("list-targets"));
        assert!(registry.find("ListTargets").is_none());
    }

    #[test]
    fn test_all_commands_ordered_by_name() {
        let registry = registry();
        let names: Vec<_> = registry.all_commands().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["deploy", "list-targets"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), names);
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let mut registry = registry();
        registry.register::<Deploy>();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_suggest() {
        let registry = registry();
        assert_eq!(registry.suggest("deplyo"), Some("deploy".into()));
        assert_eq!(registry.suggest("frobnicate"), None);
    }
}
