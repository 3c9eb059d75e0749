//! Option declarations of a command and binding of parsed options to them.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::CommandOptions;
use crate::error::UsageError;
use crate::option::{CliOption, Equivalences, OptionDef, OptionKind, OptionValue};

/// Required and optional options of one command.
#[derive(Debug, Clone, Default)]
pub struct OptionDeclarations {
    required: Vec<OptionDef>,
    optional: Vec<OptionDef>,
    equivalences: Equivalences,
}

impl OptionDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, def: OptionDef) -> &mut Self {
        if !self.is_declared(&def) {
            self.required.push(def);
        }
        self
    }

    pub fn optional(&mut self, def: OptionDef) -> &mut Self {
        if !self.is_declared(&def) {
            self.optional.push(def);
        }
        self
    }

    /// Mark `a` and `b` as satisfying the same requirement. A side that is
    /// not declared yet becomes optional.
    pub fn equivalent(&mut self, a: &OptionDef, b: &OptionDef) -> &mut Self {
        for def in [a, b] {
            if !self.is_declared(def) {
                self.optional.push(def.clone());
            }
        }
        self.equivalences.add(a, b);
        self
    }

    pub fn required(&self) -> &[OptionDef] {
        &self.required
    }

    pub fn optionals(&self) -> &[OptionDef] {
        &self.optional
    }

    pub fn equivalences(&self) -> &Equivalences {
        &self.equivalences
    }

    /// Every declaration, required first.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.required.iter().chain(self.optional.iter())
    }

    pub fn is_required(&self, def: &OptionDef) -> bool {
        self.required.contains(def)
    }

    fn is_declared(&self, def: &OptionDef) -> bool {
        self.iter().any(|d| d == def)
    }

    /// Declaration spelled like `option`, if any.
    pub fn find(&self, option: &CliOption) -> Option<&OptionDef> {
        self.iter().find(|def| def.names(option))
    }

    /// Check parsed options against the declarations.
    ///
    /// Declared options are converted to their declared kind where that is
    /// lossless or explicit (integer to double, numbers to text, text to
    /// timestamp); any other mismatch is an error. Undeclared options are
    /// kept as parsed. Every required option must then be present, directly
    /// or through an equivalent.
    pub fn bind(&self, parsed: Vec<CliOption>) -> Result<CommandOptions, UsageError> {
        let mut options = Vec::with_capacity(parsed.len());
        for option in parsed {
            match self.find(&option) {
                Some(def) => options.push(coerce(def, option)?),
                None => {
                    debug!(option = %option, "option not declared by command, kept as parsed");
                    options.push(option);
                }
            }
        }

        for def in &self.required {
            if !self.is_satisfied(def, &options) {
                return Err(UsageError::MissingRequired(def.to_string()));
            }
        }
        Ok(CommandOptions::new(options))
    }

    fn is_satisfied(&self, def: &OptionDef, options: &[CliOption]) -> bool {
        options.iter().any(|option| {
            def.names(option) || self.equivalences.of(def).any(|eq| eq.names(option))
        })
    }
}

fn coerce(def: &OptionDef, option: CliOption) -> Result<CliOption, UsageError> {
    if option.kind() == def.kind() {
        return Ok(option);
    }
    let value = match (def.kind(), option.value()) {
        (OptionKind::Double, OptionValue::Long(n)) => OptionValue::Double(*n as f64),
        // Text is taken as typed; a bare flag has nothing to offer.
        (OptionKind::Text, value) => match (option.raw(), value) {
            (Some(raw), _) => OptionValue::Text(raw.to_string()),
            (None, OptionValue::Long(_) | OptionValue::Double(_)) => {
                OptionValue::Text(value.to_string())
            }
            _ => return Err(wrong_type(def, &option)),
        },
        (OptionKind::Timestamp, OptionValue::Text(raw)) => match parse_timestamp(raw) {
            Some(ts) => OptionValue::Timestamp(ts),
            None => return Err(wrong_type(def, &option)),
        },
        _ => return Err(wrong_type(def, &option)),
    };
    let coerced = CliOption::new(option.literal().clone(), value);
    Ok(match option.raw() {
        Some(raw) => coerced.with_raw(raw),
        None => coerced,
    })
}

fn wrong_type(def: &OptionDef, option: &CliOption) -> UsageError {
    UsageError::WrongType {
        option: def.to_string(),
        expected: def.kind().describe(),
        actual: option.value().to_string(),
    }
}

/// RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Literal;
    use chrono::TimeZone;

    fn format() -> OptionDef {
        OptionDef::text(Literal::both('f', "format"))
    }

    fn format_file() -> OptionDef {
        OptionDef::text(Literal::long("format-file"))
    }

    fn declarations() -> OptionDeclarations {
        let mut decl = OptionDeclarations::new();
        decl.require(format())
            .equivalent(&format(), &format_file())
            .optional(OptionDef::double(Literal::long("ratio")))
            .optional(OptionDef::timestamp(Literal::long("since")));
        decl
    }

    #[test]
    fn test_required_present() {
        let bound = declarations()
            .bind(vec![CliOption::text(Literal::short('f'), "json")])
            .unwrap();
        assert_eq!(bound.text(&format()), Some("json"));
    }

    #[test]
    fn test_required_missing() {
        let err = declarations().bind(vec![]).unwrap_err();
        assert_eq!(err, UsageError::MissingRequired("-f/--format".into()));
    }

    #[test]
    fn test_equivalent_satisfies_requirement() {
        let bound = declarations()
            .bind(vec![CliOption::text(Literal::long("format-file"), "fmt.toml")])
            .unwrap();
        assert_eq!(bound.text(&format_file()), Some("fmt.toml"));

        // Either side of the relation counts, whichever was declared required.
        let mut decl = OptionDeclarations::new();
        decl.require(format_file()).equivalent(&format(), &format_file());
        assert!(decl.bind(vec![CliOption::text(Literal::long("format"), "x")]).is_ok());
    }

    #[test]
    fn test_equivalent_declares_optional() {
        let decl = declarations();
        assert_eq!(decl.required(), &[format()]);
        assert!(decl.optionals().contains(&format_file()));
        assert!(decl.equivalences().are_equivalent(&format_file(), &format()));
    }

    #[test]
    fn test_coerce_long_to_double() {
        let bound = declarations()
            .bind(vec![
                CliOption::text(Literal::short('f'), "x"),
                CliOption::long(Literal::long("ratio"), 2),
            ])
            .unwrap();
        assert_eq!(bound.double(&OptionDef::double(Literal::long("ratio"))), Some(2.0));
    }

    #[test]
    fn test_coerce_number_to_text() {
        let bound = declarations()
            .bind(vec![CliOption::long(Literal::long("format"), 42)])
            .unwrap();
        assert_eq!(bound.text(&format()), Some("42"));
    }

    #[test]
    fn test_coerce_to_text_keeps_token() {
        let cases = [
            CliOption::long(Literal::long("format"), 7).with_raw("007"),
            CliOption::double(Literal::short('f'), 1000.0).with_raw("1e3"),
            CliOption::boolean(Literal::long("format"), true).with_raw("true"),
        ];
        for (option, expected) in cases.into_iter().zip(["007", "1e3", "true"]) {
            let bound = declarations().bind(vec![option]).unwrap();
            assert_eq!(bound.text(&format()), Some(expected));
        }
    }

    #[test]
    fn test_coerce_text_to_timestamp() {
        let since = OptionDef::timestamp(Literal::long("since"));
        let bound = declarations()
            .bind(vec![
                CliOption::text(Literal::short('f'), "x"),
                CliOption::text(Literal::long("since"), "2024-03-01"),
            ])
            .unwrap();
        assert_eq!(
            bound.timestamp(&since),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );

        let bound = declarations()
            .bind(vec![
                CliOption::text(Literal::short('f'), "x"),
                CliOption::text(Literal::long("since"), "2024-03-01T12:30:00+02:00"),
            ])
            .unwrap();
        assert_eq!(
            bound.timestamp(&since),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_wrong_type() {
        let err = declarations()
            .bind(vec![
                CliOption::text(Literal::short('f'), "x"),
                CliOption::text(Literal::long("since"), "yesterday"),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            UsageError::WrongType {
                option: "--since".into(),
                expected: "a timestamp",
                actual: "yesterday".into(),
            }
        );

        // A bare `-f` is a boolean, not the text the declaration wants.
        let err = declarations()
            .bind(vec![CliOption::boolean(Literal::short('f'), true)])
            .unwrap_err();
        assert!(matches!(err, UsageError::WrongType { .. }));
    }

    #[test]
    fn test_undeclared_kept() {
        let bound = declarations()
            .bind(vec![
                CliOption::text(Literal::short('f'), "x"),
                CliOption::boolean(Literal::long("extra"), true),
            ])
            .unwrap();
        assert_eq!(bound.len(), 2);
        assert!(bound.flag(&OptionDef::boolean(Literal::long("extra"))));
    }

    #[test]
    fn test_duplicate_declarations_ignored() {
        let mut decl = OptionDeclarations::new();
        decl.require(format()).optional(format()).require(format());
        assert_eq!(decl.iter().count(), 1);
        assert!(decl.is_required(&format()));
    }
}
