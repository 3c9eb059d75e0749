//! Option parser: turns the tail of an argument list into typed options.
//!
//! Recognized forms, checked in this order at every position:
//!
//! 1. `help`, `--help`, `-h` and `--help=<command>`
//! 2. `--name=value` (long literal)
//! 3. `-x [value]` (short literal)
//!
//! Anything else is an error. Parsing runs over a cursor on the coalesced
//! tokens; whatever the cursor has not consumed when parsing stops is written
//! back after the untouched prefix of the caller's list.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::helpers::{HELP_PREFIX, is_help_token};
use super::quotes;
use crate::cli::command::CommandLookup;
use crate::error::UsageError;
use crate::option::{CliOption, Literal, OptionValue, Resolved, VERBOSE_LONG, resolve};

/// Cursor over the tokens being parsed.
#[derive(Debug)]
struct Cursor {
    tokens: VecDeque<String>,
}

impl Cursor {
    fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    fn next(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Next token if it can serve as a value (present, not dash-prefixed).
    fn next_value(&mut self) -> Option<String> {
        match self.peek() {
            Some(token) if !token.starts_with('-') => self.next(),
            _ => None,
        }
    }

    fn into_remaining(self) -> Vec<String> {
        self.tokens.into()
    }
}

/// Parser for command-line options.
pub struct OptionParser<'a> {
    commands: &'a dyn CommandLookup,
}

impl<'a> OptionParser<'a> {
    /// `commands` resolves the target of `--help=<command>`.
    pub fn new(commands: &'a dyn CommandLookup) -> Self {
        Self { commands }
    }

    /// Parse `args[offset..]` into options, in encounter order.
    ///
    /// On success every token from `offset` on has been consumed and `args`
    /// holds only `args[..offset]`. On failure `args` holds the prefix plus
    /// the tokens not consumed before the error; a quoting error consumes
    /// nothing.
    pub fn parse(
        &self,
        args: &mut Vec<String>,
        offset: usize,
    ) -> Result<Vec<CliOption>, UsageError> {
        let offset = offset.min(args.len());
        let tokens = quotes::coalesce(&args[offset..])?;
        let mut cursor = Cursor::new(tokens);

        let mut options = Vec::new();
        let outcome = loop {
            match self.next_option(&mut cursor) {
                Ok(Some(option)) => {
                    trace!(option = %option, "parsed option");
                    options.push(option);
                }
                Ok(None) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        args.truncate(offset);
        args.extend(cursor.into_remaining());
        outcome?;

        debug!(count = options.len(), offset, "parsed options");
        Ok(options)
    }

    fn next_option(&self, cursor: &mut Cursor) -> Result<Option<CliOption>, UsageError> {
        let Some(token) = cursor.peek().map(str::to_string) else {
            return Ok(None);
        };

        if is_help_token(&token) {
            cursor.next();
            return Ok(Some(CliOption::help(None)));
        }

        if let Some(name) = token.strip_prefix(HELP_PREFIX) {
            // The token is gone even when the lookup fails.
            cursor.next();
            return match self.commands.find(name) {
                Some(command) => Ok(Some(CliOption::help(Some(command.name())))),
                None => Err(UsageError::UnknownCommand {
                    name: name.to_string(),
                    suggestion: self.commands.suggest(name),
                }),
            };
        }

        if let Some(body) = token.strip_prefix("--") {
            return self.long_literal(cursor, &token, body).map(Some);
        }

        if let Some(body) = token.strip_prefix('-') {
            return self.short_literal(cursor, &token, body).map(Some);
        }

        Err(UsageError::UnknownOption(token))
    }

    /// `--name=value`; the value is typed by the resolver.
    fn long_literal(
        &self,
        cursor: &mut Cursor,
        token: &str,
        body: &str,
    ) -> Result<CliOption, UsageError> {
        let Some((name, raw)) = body.split_once('=') else {
            if body == VERBOSE_LONG {
                cursor.next();
                return Ok(CliOption::verbose());
            }
            return Err(UsageError::MissingEquals(token.to_string()));
        };
        if name.is_empty() || name.starts_with('-') {
            return Err(UsageError::InvalidOption(token.to_string()));
        }

        cursor.next();
        Ok(CliOption::new(Literal::long(name), OptionValue::from(resolve(raw))).with_raw(raw))
    }

    /// `-x` alone is a boolean; `-x value` takes the next token as its value.
    fn short_literal(
        &self,
        cursor: &mut Cursor,
        token: &str,
        body: &str,
    ) -> Result<CliOption, UsageError> {
        let mut chars = body.chars();
        let (Some(short), None) = (chars.next(), chars.next()) else {
            return Err(if body.is_empty() {
                UsageError::BareDash
            } else {
                UsageError::InvalidOption(token.to_string())
            });
        };

        cursor.next();
        let literal = Literal::short(short);
        let Some(raw) = cursor.next_value() else {
            return Ok(CliOption::boolean(literal, true));
        };

        // The short form only yields numbers or text; "true" stays text.
        let value = match resolve(&raw) {
            Resolved::Long(n) => OptionValue::Long(n),
            Resolved::Double(n) => OptionValue::Double(n),
            Resolved::Boolean(_) | Resolved::Text(_) => OptionValue::Text(raw.clone()),
        };
        Ok(CliOption::new(literal, value).with_raw(raw))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::testing::FakeLookup;
    use crate::option::OptionKind;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn parse(args: &mut Vec<String>, offset: usize) -> Result<Vec<CliOption>, UsageError> {
        let lookup = FakeLookup::new(&["version", "show-options"]);
        OptionParser::new(&lookup).parse(args, offset)
    }

    #[test]
    fn test_bare_short_is_boolean() {
        let mut args = strings(&["-t"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].kind(), OptionKind::Boolean);
        assert_eq!(options[0].literal().short_literal(), Some('t'));
        assert_eq!(options[0].as_bool(), Some(true));
        assert!(args.is_empty());
    }

    #[test]
    fn test_short_with_text_value() {
        let mut args = strings(&["-t", "test"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].literal().short_literal(), Some('t'));
        assert_eq!(options[0].as_text(), Some("test"));
        assert!(args.is_empty());
    }

    #[test]
    fn test_offset_keeps_prefix() {
        let mut args = strings(&[
            "global1",
            "global2",
            "-c",
            "command-value",
            "--command2=command2-value",
        ]);
        let options = parse(&mut args, 2).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].literal().short_literal(), Some('c'));
        assert_eq!(options[0].as_text(), Some("command-value"));
        assert_eq!(options[1].literal().long_literal(), Some("command2"));
        assert_eq!(options[1].as_text(), Some("command2-value"));
        assert_eq!(args, strings(&["global1", "global2"]));
    }

    #[test]
    fn test_quoted_value() {
        let mut args = strings(&["-f", "\"something something else\""]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].as_text(), Some("something something else"));
    }

    #[test]
    fn test_split_quoted_value() {
        let mut args = strings(&["-f", "'a", "b'", "-g"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].as_text(), Some("a b"));
        assert_eq!(options[1].as_bool(), Some(true));
    }

    #[test]
    fn test_numeric_values() {
        let mut args = strings(&["-t", "2"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options[0].kind(), OptionKind::Long);
        assert_eq!(options[0].as_long(), Some(2));

        let mut args = strings(&["-t", "2.1"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options[0].kind(), OptionKind::Double);
        assert_eq!(options[0].as_double(), Some(2.1));
    }

    #[test]
    fn test_short_never_yields_boolean_value() {
        let mut args = strings(&["-t", "TRUE"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options[0].as_text(), Some("TRUE"));
    }

    #[test]
    fn test_long_literal_types() {
        let mut args = strings(&["--a=007", "--b=1e10", "--c=FALSE", "--d=x=y", "--e="]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options[0].as_long(), Some(7));
        assert_eq!(options[1].as_double(), Some(1e10));
        assert_eq!(options[2].as_bool(), Some(false));
        assert_eq!(options[3].as_text(), Some("x=y"));
        assert_eq!(options[4].as_text(), Some(""));
    }

    #[test]
    fn test_raw_token_kept() {
        let mut args = strings(&["-a", "007", "--b=1e3", "--c=TRUE", "-d"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options[0].as_long(), Some(7));
        assert_eq!(options[0].raw(), Some("007"));
        assert_eq!(options[1].raw(), Some("1e3"));
        assert_eq!(options[2].raw(), Some("TRUE"));
        assert_eq!(options[3].raw(), None);
    }

    #[test]
    fn test_verbose_forms() {
        let mut args = strings(&["--verbose"]);
        let options = parse(&mut args, 0).unwrap();
        assert!(options[0].is_verbose());
        assert_eq!(options[0].as_bool(), Some(true));
        assert_eq!(options[0], CliOption::verbose());

        let mut args = strings(&["-v", "--verbose=true"]);
        let options = parse(&mut args, 0).unwrap();
        assert!(options.iter().all(CliOption::is_verbose));
        assert_eq!(options[0], options[1]);
    }

    #[test]
    fn test_value_followed_by_flag() {
        let mut args = strings(&["-a", "-b", "value", "-c"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].as_bool(), Some(true));
        assert_eq!(options[1].as_text(), Some("value"));
        assert_eq!(options[2].as_bool(), Some(true));
        assert!(args.is_empty());
    }

    #[test]
    fn test_help_forms() {
        let mut args = strings(&["help", "--help", "-h", "--help=version"]);
        let options = parse(&mut args, 0).unwrap();
        assert_eq!(options.len(), 4);
        assert!(options.iter().all(CliOption::is_help));
        assert_eq!(options[0].help_target(), None);
        assert_eq!(options[3].help_target(), Some("version"));
    }

    #[test]
    fn test_help_for_unknown_command_consumes_token() {
        let mut args = strings(&["keep", "-x", "--help=verison", "-y"]);
        let err = parse(&mut args, 1).unwrap_err();
        assert_eq!(
            err,
            UsageError::UnknownCommand {
                name: "verison".into(),
                suggestion: Some("version".into()),
            }
        );
        // -x and the failing token are consumed, -y is not.
        assert_eq!(args, strings(&["keep", "-y"]));
    }

    #[test]
    fn test_bare_dash() {
        let mut args = strings(&["-a", "-"]);
        assert_eq!(parse(&mut args, 0).unwrap_err(), UsageError::BareDash);
        assert_eq!(args, strings(&["-"]));
    }

    #[test]
    fn test_long_without_equals() {
        let mut args = strings(&["--name"]);
        assert_eq!(
            parse(&mut args, 0).unwrap_err(),
            UsageError::MissingEquals("--name".into())
        );
        assert_eq!(args, strings(&["--name"]));
    }

    #[test]
    fn test_invalid_literals() {
        let mut args = strings(&["--=x"]);
        assert_eq!(
            parse(&mut args, 0).unwrap_err(),
            UsageError::InvalidOption("--=x".into())
        );
        let mut args = strings(&["-abc"]);
        assert_eq!(
            parse(&mut args, 0).unwrap_err(),
            UsageError::InvalidOption("-abc".into())
        );
    }

    #[test]
    fn test_unknown_bare_token() {
        let mut args = strings(&["-a", "1", "stray", "-b"]);
        assert_eq!(
            parse(&mut args, 0).unwrap_err(),
            UsageError::UnknownOption("stray".into())
        );
        assert_eq!(args, strings(&["stray", "-b"]));
    }

    #[test]
    fn test_unbalanced_quotes_leave_list_intact() {
        let mut args = strings(&["a", "\"b", "\"c"]);
        let err = parse(&mut args, 0).unwrap_err();
        assert!(matches!(err, UsageError::UnbalancedQuotes(_)));
        assert_eq!(args, strings(&["a", "\"b", "\"c"]));

        let mut args = strings(&["-m", "\"a", "'b", "'c", "d\""]);
        let err = parse(&mut args, 0).unwrap_err();
        assert_eq!(err, UsageError::UnbalancedQuotes("'c".into()));
        assert_eq!(args, strings(&["-m", "\"a", "'b", "'c", "d\""]));
    }

    #[test]
    fn test_rescans_position_after_removal() {
        // Every option starts right where the previous one was removed.
        let mut args = strings(&["-a", "1", "-b", "-c", "2", "--d=3"]);
        let options = parse(&mut args, 0).unwrap();
        let shorts: Vec<_> = options
            .iter()
            .map(|o| o.literal().short_literal())
            .collect();
        assert_eq!(shorts, vec![Some('a'), Some('b'), Some('c'), None]);
        assert_eq!(options[3].as_long(), Some(3));
    }

    #[test]
    fn test_offset_past_end() {
        let mut args = strings(&["a"]);
        let options = parse(&mut args, 3).unwrap();
        assert!(options.is_empty());
        assert_eq!(args, strings(&["a"]));
    }
}
