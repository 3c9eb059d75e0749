use anyhow::Context;

use crate::cli::command::{Command, Invocation, OptionDeclarations};
use crate::error::UsageError;
use crate::option::{Literal, OptionDef};

fn message_def() -> OptionDef {
    OptionDef::text(Literal::both('m', "message"))
}

fn text_def() -> OptionDef {
    OptionDef::text(Literal::long("text"))
}

fn times_def() -> OptionDef {
    OptionDef::long(Literal::both('n', "times"))
}

fn upper_def() -> OptionDef {
    OptionDef::boolean(Literal::both('u', "upper"))
}

/// Prints a message, optionally repeated and upper-cased.
#[derive(Debug, Default)]
pub struct Echo;

impl Command for Echo {
    crate::command_name!(Echo);

    fn description(&self) -> &str {
        "Print a message"
    }

    fn declare(&self, options: &mut OptionDeclarations) {
        options
            .require(message_def())
            .equivalent(&message_def(), &text_def())
            .optional(times_def())
            .optional(upper_def());
    }

    fn execute(&mut self, invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
        let options = invocation.options;
        let message = options
            .text(&message_def())
            .or_else(|| options.text(&text_def()))
            .context("message option vanished after validation")?;
        let times = options.long(&times_def()).unwrap_or(1);
        if times < 0 {
            return Err(UsageError::WrongType {
                option: times_def().to_string(),
                expected: "a non-negative integer",
                actual: times.to_string(),
            }
            .into());
        }

        let message = if options.flag(&upper_def()) {
            message.to_uppercase()
        } else {
            message.to_string()
        };
        for _ in 0..times {
            writeln!(invocation.out, "{}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::{BundledHelp, CommandRegistry};
    use crate::cli::dispatch::Dispatcher;
    use crate::error::Error;
    use crate::runtime::LocalRuntime;

    fn run(args: &[&str]) -> (crate::Result<()>, String) {
        let mut registry = CommandRegistry::new();
        registry.register::<Echo>();
        let dispatcher = Dispatcher::new(&registry, &LocalRuntime, &BundledHelp);
        let mut out = Vec::new();
        let result = dispatcher
            .dispatch(
                args.iter().map(|s| s.to_string()).collect(),
                Some("demo".into()),
                &mut out,
            )
            .map(|_| ());
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_echo_quoted_message() {
        let (result, out) = run(&["echo", "-m", "\"hello", "there\"", "-n", "2"]);
        assert!(result.is_ok());
        assert_eq!(out, "hello there\nhello there\n");
    }

    #[test]
    fn test_echo_equivalent_and_upper() {
        let (result, out) = run(&["echo", "--text=hi", "-u"]);
        assert!(result.is_ok());
        assert_eq!(out, "HI\n");
    }

    #[test]
    fn test_echo_numeric_message_is_text() {
        let (result, out) = run(&["echo", "-m", "42"]);
        assert!(result.is_ok());
        assert_eq!(out, "42\n");
    }

    #[test]
    fn test_echo_prints_value_as_typed() {
        for (args, expected) in [
            (["echo", "--text=007"], "007\n"),
            (["echo", "--text=true"], "true\n"),
            (["echo", "--text=1e3"], "1e3\n"),
        ] {
            let (result, out) = run(&args);
            assert!(result.is_ok(), "{:?}", args);
            assert_eq!(out, expected);
        }

        let (result, out) = run(&["echo", "-m", "1e3"]);
        assert!(result.is_ok());
        assert_eq!(out, "1e3\n");
    }

    #[test]
    fn test_echo_requires_message() {
        let (result, _) = run(&["echo", "-u"]);
        assert!(matches!(
            result.unwrap_err(),
            Error::Usage(UsageError::MissingRequired(ref name)) if name == "-m/--message"
        ));
    }

    #[test]
    fn test_echo_negative_times() {
        let (result, out) = run(&["echo", "-m", "x", "--times=-1"]);
        assert!(result.unwrap_err().is_usage());
        assert!(out.is_empty());
    }
}
