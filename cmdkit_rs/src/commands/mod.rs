//! Built-in commands shipped with the `cmdkit` binary.

mod echo;
mod list_commands;
mod show_options;
mod version;

pub use echo::Echo;
pub use list_commands::ListCommands;
pub use show_options::ShowOptions;
pub use version::Version;

use crate::cli::command::CommandRegistry;

/// Register every built-in command.
pub fn register_builtins(registry: &mut CommandRegistry) -> &mut CommandRegistry {
    registry
        .register::<Echo>()
        .register::<ListCommands>()
        .register::<ShowOptions>()
        .register::<Version>()
}
