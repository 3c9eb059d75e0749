//! Option model shared by the parser, the declarations and the configuration.
//!
//! A parsed option is a [`CliOption`]: a [`Literal`] (short and/or long form)
//! plus a typed [`OptionValue`]. Commands declare what they accept with
//! [`OptionDef`], which carries only the literal and the expected kind.
//!
//! Equality of options never looks at the value: two options are equal when
//! they are of the same kind and share a short or a long literal. Every
//! verbose option equals every other verbose option.

mod equivalence;
mod resolve;

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

pub use equivalence::Equivalences;
pub use resolve::{Resolved, resolve};

/// Long literal of the distinguished verbose flag.
pub const VERBOSE_LONG: &str = "verbose";
/// Short literal of the distinguished verbose flag.
pub const VERBOSE_SHORT: char = 'v';
/// Long literal of help options.
pub const HELP_LONG: &str = "help";
/// Short literal of help options.
pub const HELP_SHORT: char = 'h';

// ============================================================================
// Literal
// ============================================================================

/// Short (`-x`) and long (`--name`) spelling of an option, without dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Literal {
    short: Option<char>,
    long: Option<String>,
}

impl Literal {
    /// Checked constructor: at least one form, long form non-empty and dash-free.
    pub fn new(short: Option<char>, long: Option<&str>) -> Result<Self> {
        if short.is_none() && long.is_none() {
            return Err(Error::Invariant(
                "option literal needs a short or a long form".to_string(),
            ));
        }
        if let Some(c) = short
            && (c == '-' || c.is_whitespace())
        {
            return Err(Error::Invariant(format!("invalid short literal '{}'", c)));
        }
        if let Some(name) = long
            && (name.is_empty() || name.starts_with('-'))
        {
            return Err(Error::Invariant(format!("invalid long literal '{}'", name)));
        }
        Ok(Self {
            short,
            long: long.map(str::to_string),
        })
    }

    pub fn short(c: char) -> Self {
        Self {
            short: Some(c),
            long: None,
        }
    }

    pub fn long(name: impl Into<String>) -> Self {
        Self {
            short: None,
            long: Some(name.into()),
        }
    }

    pub fn both(c: char, name: impl Into<String>) -> Self {
        Self {
            short: Some(c),
            long: Some(name.into()),
        }
    }

    pub fn short_literal(&self) -> Option<char> {
        self.short
    }

    pub fn long_literal(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// True when both sides carry the same short form, or the same long form.
    pub fn matches(&self, other: &Literal) -> bool {
        let short = matches!((self.short, other.short), (Some(a), Some(b)) if a == b);
        let long = matches!((&self.long, &other.long), (Some(a), Some(b)) if a == b);
        short || long
    }

    fn is_verbose(&self) -> bool {
        self.short == Some(VERBOSE_SHORT) || self.long.as_deref() == Some(VERBOSE_LONG)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.short, &self.long) {
            (Some(s), Some(l)) => write!(f, "-{}/--{}", s, l),
            (Some(s), None) => write!(f, "-{}", s),
            (None, Some(l)) => write!(f, "--{}", l),
            (None, None) => f.write_str("<unnamed>"),
        }
    }
}

// ============================================================================
// Kinds and values
// ============================================================================

/// The concrete kind of an option. Part of option identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Boolean,
    Verbose,
    Long,
    Double,
    Text,
    Timestamp,
    Help,
}

impl OptionKind {
    /// Human wording used in error messages ("expects an integer value").
    pub fn describe(self) -> &'static str {
        match self {
            OptionKind::Boolean | OptionKind::Verbose => "a boolean",
            OptionKind::Long => "an integer",
            OptionKind::Double => "a number",
            OptionKind::Text => "a string",
            OptionKind::Timestamp => "a timestamp",
            OptionKind::Help => "no",
        }
    }
}

/// Typed payload of a parsed option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum OptionValue {
    Boolean(bool),
    Verbose(bool),
    Long(i64),
    Double(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Help request, optionally bound to a command name.
    Help(Option<String>),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Boolean(_) => OptionKind::Boolean,
            OptionValue::Verbose(_) => OptionKind::Verbose,
            OptionValue::Long(_) => OptionKind::Long,
            OptionValue::Double(_) => OptionKind::Double,
            OptionValue::Text(_) => OptionKind::Text,
            OptionValue::Timestamp(_) => OptionKind::Timestamp,
            OptionValue::Help(_) => OptionKind::Help,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Boolean(b) | OptionValue::Verbose(b) => write!(f, "{}", b),
            OptionValue::Long(n) => write!(f, "{}", n),
            // Debug keeps a trailing ".0" so the text resolves back to a double.
            OptionValue::Double(n) => write!(f, "{:?}", n),
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::Timestamp(t) => {
                f.write_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            OptionValue::Help(Some(cmd)) => f.write_str(cmd),
            OptionValue::Help(None) => Ok(()),
        }
    }
}

// ============================================================================
// Parsed option
// ============================================================================

/// One parsed command-line option.
#[derive(Debug, Clone, Serialize)]
pub struct CliOption {
    literal: Literal,
    value: OptionValue,
    /// Token the value was read from, when it came from the command line.
    #[serde(skip)]
    raw: Option<String>,
}

impl CliOption {
    /// Build an option. A boolean spelled `--verbose` or `-v` becomes the
    /// distinguished verbose kind.
    pub fn new(literal: Literal, value: OptionValue) -> Self {
        let value = match value {
            OptionValue::Boolean(b) if literal.is_verbose() => OptionValue::Verbose(b),
            other => other,
        };
        Self {
            literal,
            value,
            raw: None,
        }
    }

    /// Remember the token the value was resolved from.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Value exactly as typed, if it was parsed from a token.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn boolean(literal: Literal, value: bool) -> Self {
        Self::new(literal, OptionValue::Boolean(value))
    }

    pub fn long(literal: Literal, value: i64) -> Self {
        Self::new(literal, OptionValue::Long(value))
    }

    pub fn double(literal: Literal, value: f64) -> Self {
        Self::new(literal, OptionValue::Double(value))
    }

    pub fn text(literal: Literal, value: impl Into<String>) -> Self {
        Self::new(literal, OptionValue::Text(value.into()))
    }

    /// Timestamps are never inferred from input; they only come from here or
    /// from a declaration that asks for one.
    pub fn timestamp(literal: Literal, value: DateTime<Utc>) -> Self {
        Self::new(literal, OptionValue::Timestamp(value))
    }

    pub fn verbose() -> Self {
        Self::new(Literal::both(VERBOSE_SHORT, VERBOSE_LONG), OptionValue::Verbose(true))
    }

    /// Help request, bound to `command` when given.
    pub fn help(command: Option<String>) -> Self {
        Self::new(Literal::both(HELP_SHORT, HELP_LONG), OptionValue::Help(command))
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    pub fn kind(&self) -> OptionKind {
        self.value.kind()
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Replace the value. The new value must be of the same kind; anything
    /// else is a bug in the caller.
    pub fn set_value(&mut self, value: OptionValue) -> Result<()> {
        if value.kind() != self.kind() {
            return Err(Error::Invariant(format!(
                "cannot assign {} value to {} option {}",
                value.kind().describe(),
                self.kind().describe(),
                self.literal
            )));
        }
        self.value = value;
        self.raw = None;
        Ok(())
    }

    pub fn is_verbose(&self) -> bool {
        self.kind() == OptionKind::Verbose
    }

    pub fn is_help(&self) -> bool {
        self.kind() == OptionKind::Help
    }

    /// Command a help option is bound to (`--help=<name>`).
    pub fn help_target(&self) -> Option<&str> {
        match &self.value {
            OptionValue::Help(target) => target.as_deref(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            OptionValue::Boolean(b) | OptionValue::Verbose(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self.value {
            OptionValue::Long(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            OptionValue::Double(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self.value {
            OptionValue::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

impl PartialEq for CliOption {
    fn eq(&self, other: &Self) -> bool {
        let kind = self.kind();
        kind == other.kind()
            && (kind == OptionKind::Verbose || self.literal.matches(&other.literal))
    }
}

// Consistent with `eq`: equal options always share a kind, literals may differ.
impl Hash for CliOption {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
    }
}

impl fmt::Display for CliOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            OptionValue::Help(None) => write!(f, "{}", self.literal),
            value => write!(f, "{}={}", self.literal, value),
        }
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// Declared option: literal plus expected kind, no value.
///
/// Used as a model for lookups and as the unit of required/optional
/// declarations. Never mutated once declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OptionDef {
    literal: Literal,
    kind: OptionKind,
}

impl OptionDef {
    pub fn new(kind: OptionKind, literal: Literal) -> Self {
        Self { literal, kind }
    }

    pub fn boolean(literal: Literal) -> Self {
        Self::new(OptionKind::Boolean, literal)
    }

    pub fn long(literal: Literal) -> Self {
        Self::new(OptionKind::Long, literal)
    }

    pub fn double(literal: Literal) -> Self {
        Self::new(OptionKind::Double, literal)
    }

    pub fn text(literal: Literal) -> Self {
        Self::new(OptionKind::Text, literal)
    }

    pub fn timestamp(literal: Literal) -> Self {
        Self::new(OptionKind::Timestamp, literal)
    }

    pub fn verbose() -> Self {
        Self::new(
            OptionKind::Verbose,
            Literal::both(VERBOSE_SHORT, VERBOSE_LONG),
        )
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Same identity as `option`: kind and literal, as in `CliOption` equality.
    pub fn is_model_of(&self, option: &CliOption) -> bool {
        self.kind == option.kind() && self.names(option)
    }

    /// Same spelling as `option`, whatever kind the user's value resolved to.
    pub fn names(&self, option: &CliOption) -> bool {
        if self.kind == OptionKind::Verbose && option.is_verbose() {
            return true;
        }
        self.literal.matches(option.literal())
    }
}

impl fmt::Display for OptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.literal, f)
    }
}

// ============================================================================
// Tests
// ============================================================================
