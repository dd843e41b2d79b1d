//! Text patterns used by global search.

use crate::error::{SiftError, SiftResult};
use regex::{Regex, RegexBuilder};

/// A compiled search term.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// User-supplied regular expression.
    Regex(Regex),
    /// Plain substring. When case-insensitive, `needle` is stored lowercased.
    Literal { needle: String, case_sensitive: bool },
}

impl Pattern {
    /// Compile a search term.
    ///
    /// With `use_regex` off the term is a literal substring and this never
    /// fails. With it on, an invalid expression is returned as
    /// `SiftError::InvalidPattern`; see [`Pattern::compile_or_literal`] for the
    /// lenient variant.
    pub fn compile(term: &str, use_regex: bool, case_sensitive: bool) -> SiftResult<Self> {
        if use_regex {
            build_regex(term, case_sensitive).map(Pattern::Regex)
        } else {
            Ok(Pattern::literal(term, case_sensitive))
        }
    }

    /// Compile a search term, degrading an invalid expression to a
    /// case-insensitive substring match.
    #[must_use]
    pub fn compile_or_literal(term: &str, use_regex: bool, case_sensitive: bool) -> Self {
        match Pattern::compile(term, use_regex, case_sensitive) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::warn!(%err, "search pattern rejected, falling back to plain text");
                Pattern::literal(term, false)
            }
        }
    }

    /// Build a literal substring pattern.
    #[must_use]
    pub fn literal(term: &str, case_sensitive: bool) -> Self {
        let needle = if case_sensitive {
            term.to_string()
        } else {
            term.to_lowercase()
        };
        Pattern::Literal {
            needle,
            case_sensitive,
        }
    }

    /// Test whether the pattern occurs anywhere in `haystack`.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Pattern::Regex(re) => re.is_match(haystack),
            Pattern::Literal {
                needle,
                case_sensitive: true,
            } => haystack.contains(needle.as_str()),
            Pattern::Literal { needle, .. } => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Compile `source` as a regular expression with the given case sensitivity.
pub(crate) fn build_regex(source: &str, case_sensitive: bool) -> SiftResult<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| SiftError::invalid_pattern(source, e))
}

/// Case-insensitive substring test.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
