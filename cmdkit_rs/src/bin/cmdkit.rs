use std::any::Any;
use std::panic;
use std::process::ExitCode;

use cmdkit::cli::CommandRegistry;
use cmdkit::cli::entrypoint::{EntryOptions, run};
use cmdkit::commands::register_builtins;
use cmdkit::config::APP_NAME_ENV;

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn main() -> ExitCode {
    install_broken_pipe_handler();

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);

    run(&EntryOptions {
        binary_name: "cmdkit",
        app_name_var: APP_NAME_ENV,
        registry: &registry,
    })
}
