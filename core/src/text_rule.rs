//! `TextRule` — config-level string match specification
//!
//! This type represents the *intent* for a string match (e.g., "prefix
//! match on /api", "regex on ^user-\d+$"). It compiles to a runtime
//! [`TextMatcher`] via [`compile()`](TextRule::compile), which is where an
//! invalid regex is caught — at rule-compile time, never at evaluation
//! time.
//!
//! Compiled matchers pair naturally with the predicate chain:
//!
//! ```
//! use casewhen::{test, StrCmp, TextRule};
//!
//! let rule = TextRule::Cmp { mode: StrCmp::Prefix, pattern: "/api".into() };
//! let matcher = rule.compile().unwrap();
//!
//! let route = test("/api/users")
//!     .when(|s| matcher.matches(s), |_| "backend")
//!     .or_else(|_| "fallback");
//! assert_eq!(route, "backend");
//! ```

use crate::{ChainError, StrCmp};
use std::fmt;

/// A string match specification, as configuration would express it.
///
/// Two shapes: a literal pattern under one of the eight [`StrCmp`] modes,
/// or a regular expression (Rust `regex` crate syntax, linear time).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextRule {
    /// Literal comparison under a [`StrCmp`] mode.
    Cmp {
        /// How to compare.
        mode: StrCmp,
        /// The pattern to compare against.
        pattern: String,
    },
    /// Regular expression match.
    Regex {
        /// The regex pattern.
        pattern: String,
        /// Case-insensitive matching (prepends `(?i)` at compile time).
        #[cfg_attr(feature = "serde", serde(default))]
        ignore_case: bool,
    },
}

impl TextRule {
    /// Compile this rule into a runtime [`TextMatcher`].
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidPattern`] if the regex is invalid.
    pub fn compile(&self) -> Result<TextMatcher, ChainError> {
        match self {
            Self::Cmp { mode, pattern } => Ok(TextMatcher::Cmp {
                mode: *mode,
                pattern: pattern.clone(),
            }),
            Self::Regex {
                pattern,
                ignore_case,
            } => {
                let source = if *ignore_case {
                    format!("(?i){pattern}")
                } else {
                    pattern.clone()
                };
                regex::Regex::new(&source)
                    .map(TextMatcher::Regex)
                    .map_err(|e| ChainError::InvalidPattern {
                        pattern: pattern.clone(),
                        source: e.to_string(),
                    })
            }
        }
    }
}

impl fmt::Display for TextRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cmp { mode, pattern } => write!(f, "{mode:?}(\"{pattern}\")"),
            Self::Regex {
                pattern,
                ignore_case: false,
            } => write!(f, "Regex(\"{pattern}\")"),
            Self::Regex {
                pattern,
                ignore_case: true,
            } => write!(f, "RegexIgnoreCase(\"{pattern}\")"),
        }
    }
}

/// The runtime form of a [`TextRule`]: what actually evaluates at match
/// time.
#[derive(Debug, Clone)]
pub enum TextMatcher {
    /// Literal comparison under a [`StrCmp`] mode.
    Cmp {
        /// How to compare.
        mode: StrCmp,
        /// The pattern to compare against.
        pattern: String,
    },
    /// Compiled regular expression.
    Regex(regex::Regex),
}

impl TextMatcher {
    /// Does `input` match this rule?
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Cmp { mode, pattern } => mode.compare(input, pattern),
            Self::Regex(re) => re.is_match(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmp_rule_compiles_and_matches() {
        let rule = TextRule::Cmp {
            mode: StrCmp::SuffixIgnoreCase,
            pattern: ".JSON".into(),
        };
        let matcher = rule.compile().unwrap();
        assert!(matcher.matches("data.json"));
        assert!(!matcher.matches("data.xml"));
    }

    #[test]
    fn regex_rule_compiles_and_matches() {
        let rule = TextRule::Regex {
            pattern: r"^user-\d+$".into(),
            ignore_case: false,
        };
        let matcher = rule.compile().unwrap();
        assert!(matcher.matches("user-123"));
        assert!(!matcher.matches("user-abc"));
        assert!(!matcher.matches("USER-123"));
    }

    #[test]
    fn regex_ignore_case_prepends_flag() {
        let rule = TextRule::Regex {
            pattern: r"^user-\d+$".into(),
            ignore_case: true,
        };
        let matcher = rule.compile().unwrap();
        assert!(matcher.matches("USER-123"));
    }

    #[test]
    fn invalid_regex_is_a_compile_time_error() {
        let rule = TextRule::Regex {
            pattern: "[bad".into(),
            ignore_case: false,
        };
        let err = rule.compile().unwrap_err();
        assert!(matches!(err, ChainError::InvalidPattern { .. }));
    }

    #[test]
    fn display() {
        let rule = TextRule::Cmp {
            mode: StrCmp::Prefix,
            pattern: "/api".into(),
        };
        assert_eq!(rule.to_string(), r#"Prefix("/api")"#);

        let rule = TextRule::Regex {
            pattern: "^mcp".into(),
            ignore_case: false,
        };
        assert_eq!(rule.to_string(), r#"Regex("^mcp")"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let rule = TextRule::Cmp {
            mode: StrCmp::ContainsIgnoreCase,
            pattern: "error".into(),
        };
        let json = serde_json::to_string(&rule).unwrap();
        let back: TextRule = serde_json::from_str(&json).unwrap();
        let matcher = back.compile().unwrap();
        assert!(matcher.matches("an ERROR occurred"));
    }
}
