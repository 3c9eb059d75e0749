//! Type heuristics for raw option values.
//!
//! Attempts, in order: 64-bit integer, double, case-insensitive
//! `true`/`false`, and finally the string as given. So `"007"` is the integer
//! 7, `"1e10"` is a double and `"TRUE"` is a boolean.

use std::fmt;

use super::OptionValue;

/// Most specific type a token could be read as.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Long(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
}

/// Resolve `token` into the most specific plausible type.
///
/// For an optional token use `token.map(resolve)`: nothing in, nothing out.
pub fn resolve(token: &str) -> Resolved {
    if let Ok(n) = token.parse::<i64>() {
        return Resolved::Long(n);
    }
    if looks_numeric(token)
        && let Ok(n) = token.parse::<f64>()
        && n.is_finite()
    {
        return Resolved::Double(n);
    }
    if token.eq_ignore_ascii_case("true") {
        return Resolved::Boolean(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Resolved::Boolean(false);
    }
    Resolved::Text(token.to_string())
}

/// Digits, sign, point and exponent only, with at least one digit. Keeps
/// `nan`, `inf` and `infinity` out of the float step.
fn looks_numeric(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit())
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

impl From<Resolved> for OptionValue {
    fn from(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Long(n) => OptionValue::Long(n),
            Resolved::Double(n) => OptionValue::Double(n),
            Resolved::Boolean(b) => OptionValue::Boolean(b),
            Resolved::Text(s) => OptionValue::Text(s),
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Long(n) => write!(f, "{}", n),
            Resolved::Double(n) => write!(f, "{:?}", n),
            Resolved::Boolean(b) => write!(f, "{}", b),
            Resolved::Text(s) => f.write_str(s),
        }
    }
}
