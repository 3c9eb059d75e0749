//! Quote coalescing: glue shell-split tokens of a quoted run back together.
//!
//! `["-f", "\"a", "b\""]` becomes `["-f", "a b"]`. Double and single quotes are
//! tracked separately; a quote of one kind may open and close inside a run of
//! the other kind, but neither kind may reopen before it is closed.
//!
//! A quote preceded by a backslash never closes a run. Once the runs are
//! merged every backslash in the processed tokens is dropped, escape marker
//! or not (a `C:\dir` argument loses its separator).

use crate::error::UsageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
}

impl Quote {
    fn ch(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }

    fn opening(token: &str) -> Option<Quote> {
        match token.chars().next() {
            Some('"') => Some(Quote::Double),
            Some('\'') => Some(Quote::Single),
            _ => None,
        }
    }

    /// Whether `token` ends the run with an unescaped quote. For the token
    /// that opened the run, its leading quote does not count.
    fn closes(self, token: &str, opening: bool) -> bool {
        // Quotes are ASCII, slicing after one is on a char boundary.
        let body = if opening { &token[1..] } else { token };
        match body.strip_suffix(self.ch()) {
            Some(rest) => !rest.ends_with('\\'),
            None => false,
        }
    }
}

/// Open quoted run being accumulated.
#[derive(Debug)]
struct OpenRun {
    quote: Quote,
    parts: Vec<String>,
    /// Quote of the other kind opened inside this run, not yet closed.
    inner: Option<Quote>,
}

impl OpenRun {
    fn new(quote: Quote, token: &str) -> Self {
        Self {
            quote,
            parts: vec![token.to_string()],
            inner: None,
        }
    }

    fn unbalanced(&self) -> UsageError {
        unbalanced(&self.parts[0])
    }
}

/// Error naming the offending token, cut at its first interior space.
fn unbalanced(token: &str) -> UsageError {
    let prefix = token.split(' ').next().unwrap_or(token);
    UsageError::UnbalancedQuotes(prefix.to_string())
}

fn unquote(joined: &str) -> String {
    let mut chars = joined.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

/// Merge quoted runs in `tokens` and return the new token list.
///
/// The input is left alone; on error nothing has been merged.
pub fn coalesce(tokens: &[String]) -> Result<Vec<String>, UsageError> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut current: Option<OpenRun> = None;

    for token in tokens {
        let Some(mut run) = current.take() else {
            match Quote::opening(token) {
                Some(q) if q.closes(token, true) => out.push(unquote(token)),
                Some(q) => current = Some(OpenRun::new(q, token)),
                None => out.push(token.clone()),
            }
            continue;
        };

        let opening = Quote::opening(token).filter(|_| token.len() > 1);
        if opening == Some(run.quote) {
            return Err(run.unbalanced());
        }
        match (opening, run.inner) {
            (Some(q), Some(inner)) if q == inner => return Err(unbalanced(token)),
            (Some(q), None) if !q.closes(token, true) => run.inner = Some(q),
            (_, Some(inner)) if inner.closes(token, false) => run.inner = None,
            _ => {}
        }

        run.parts.push(token.clone());
        if run.quote.closes(token, false) {
            out.push(unquote(&run.parts.join(" ")));
        } else {
            current = Some(run);
        }
    }

    if let Some(run) = current {
        return Err(run.unbalanced());
    }

    for token in out.iter_mut() {
        if token.contains('\\') {
            *token = token.replace('\\', "");
        }
    }
    Ok(out)
}

/// In-place variant over `args[start..]`; tokens before `start` are untouched
/// and the list is unchanged when an error is returned.
pub fn coalesce_in_place(args: &mut Vec<String>, start: usize) -> Result<(), UsageError> {
    let start = start.min(args.len());
    let merged = coalesce(&args[start..])?;
    args.truncate(start);
    args.extend(merged);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
