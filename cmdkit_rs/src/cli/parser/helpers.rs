//! Helper functions shared by the parser and the command registry.
//!
//! - Help token detection
//! - Command suggestion via Levenshtein distance

use strsim::levenshtein;

/// Tokens that request help without naming a command.
pub(crate) const HELP_TOKENS: &[&str] = &["help", "--help", "-h"];

/// Prefix of the long help form bound to a command (`--help=<name>`).
pub(crate) const HELP_PREFIX: &str = "--help=";

pub(crate) fn is_help_token(arg: &str) -> bool {
    HELP_TOKENS.contains(&arg)
}

/// Suggest a similar name using Levenshtein distance.
/// Returns Some(suggestion) if a close match is found (distance <= 2).
pub(crate) fn suggest_similar<I, S>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let input_lower = input.to_lowercase();
    let mut best_match: Option<(String, usize)> = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let distance = levenshtein(&input_lower, candidate);
        // Only suggest if distance is small (max 2 for reasonable similarity)
        if distance <= 2 && best_match.as_ref().is_none_or(|(_, best)| distance < *best) {
            best_match = Some((candidate.to_string(), distance));
        }
    }

    best_match.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_help_token() {
        assert!(is_help_token("help"));
        assert!(is_help_token("--help"));
        assert!(is_help_token("-h"));
        assert!(!is_help_token("--help=version"));
        assert!(!is_help_token("-H"));
    }

    #[test]
    fn test_suggest_similar() {
        let names = ["version", "show-options", "list-commands"];
        assert_eq!(suggest_similar("verison", names), Some("version".into()));
        assert_eq!(suggest_similar("VERSION", names), Some("version".into()));
        assert_eq!(suggest_similar("show-option", names), Some("show-options".into()));
        assert_eq!(suggest_similar("deploy", names), None);
    }

    #[test]
    fn test_suggest_prefers_closest() {
        let names = ["echo", "ecco", "each"];
        assert_eq!(suggest_similar("echo", names), Some("echo".into()));
    }
}
