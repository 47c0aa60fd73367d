//! String and language-tag built-ins

use owlkb_core::Term;
use regex::{Regex, RegexBuilder};

use super::{BuiltInKind, Operand};
use crate::error::{ReasonerError, Result};

/// Compile a `matches` pattern with XPath-style flags (`i`, `m`, `s`, `x`).
///
/// Any other flag character is rejected at construction.
pub(super) fn compile_pattern(pattern: &str, flags: &str) -> Result<Regex> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            c => {
                return Err(ReasonerError::invalid_regex(format!(
                    "Unknown regex flag: '{}'",
                    c
                )));
            }
        }
    }
    builder
        .build()
        .map_err(|e| ReasonerError::invalid_regex(e.to_string()))
}

/// Language range matching after SPARQL `langMatches`
pub(super) fn lang_matches(tag: &str, range: &str) -> bool {
    if range == "*" {
        return !tag.is_empty();
    }
    if range.is_empty() {
        return tag.is_empty();
    }
    if tag.eq_ignore_ascii_case(range) {
        return true;
    }
    tag.len() > range.len()
        && tag.as_bytes()[range.len()] == b'-'
        && tag[..range.len()].eq_ignore_ascii_case(range)
}

pub(super) fn holds(kind: BuiltInKind, left: &Term, operand: &Operand) -> bool {
    let text = left.lexical_form();
    match (kind, operand) {
        (BuiltInKind::Contains, Operand::Text(needle)) => text.contains(needle.as_ref()),
        (BuiltInKind::ContainsIgnoreCase, Operand::Text(needle)) => text
            .to_lowercase()
            .contains(needle.to_lowercase().as_str()),
        (BuiltInKind::StartsWith, Operand::Text(prefix)) => text.starts_with(prefix.as_ref()),
        (BuiltInKind::EndsWith, Operand::Text(suffix)) => text.ends_with(suffix.as_ref()),
        (BuiltInKind::Matches, Operand::Pattern { regex, .. }) => regex.is_match(text),
        (BuiltInKind::LangMatches, Operand::Text(range)) => match left.as_literal() {
            Some(lit) => lang_matches(lit.language().unwrap_or(""), range),
            None => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_matches_ranges() {
        assert!(lang_matches("en", "EN"));
        assert!(lang_matches("en-US", "en"));
        assert!(!lang_matches("eng", "en"));
        assert!(lang_matches("fr", "*"));
        assert!(!lang_matches("", "*"));
        assert!(lang_matches("", ""));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(matches!(
            compile_pattern("a", "q"),
            Err(ReasonerError::InvalidRegex(_))
        ));
        assert!(compile_pattern("^A", "i").unwrap().is_match("abc"));
    }
}
