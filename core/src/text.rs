//! `StrCmp` and `TextChain` — string-mode dispatch
//!
//! The comparison mode is fixed when the chain is built; each branch then
//! supplies only a pattern string. An absent subject is a matchable state:
//! it matches the `None` pattern and nothing else, whatever the mode —
//! comparisons never panic on absent operands, they simply fail to match.

use crate::state::MatchState;

/// String comparison modes.
///
/// The `IgnoreCase` variants compare ASCII case-insensitively, matching the
/// usual behavior for protocol-ish strings (paths, headers, identifiers).
///
/// # Example
///
/// ```
/// use casewhen::StrCmp;
///
/// assert!(StrCmp::PrefixIgnoreCase.compare("/API/users", "/api"));
/// assert!(!StrCmp::Exact.compare("Hello", "hello"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrCmp {
    /// Exact equality.
    Exact,
    /// Exact equality, ASCII case-insensitive.
    ExactIgnoreCase,
    /// Substring containment.
    Contains,
    /// Substring containment, ASCII case-insensitive.
    ContainsIgnoreCase,
    /// Prefix match.
    Prefix,
    /// Prefix match, ASCII case-insensitive.
    PrefixIgnoreCase,
    /// Suffix match.
    Suffix,
    /// Suffix match, ASCII case-insensitive.
    SuffixIgnoreCase,
}

impl StrCmp {
    /// Does `input` match `pattern` under this mode?
    ///
    /// The case-insensitive prefix/suffix comparisons window the input by
    /// byte length first; `get` rejects a window that would split a UTF-8
    /// character, which can only happen when the pattern wouldn't match
    /// anyway.
    #[must_use]
    pub fn compare(self, input: &str, pattern: &str) -> bool {
        match self {
            Self::Exact => input == pattern,
            Self::ExactIgnoreCase => input.eq_ignore_ascii_case(pattern),
            Self::Contains => input.contains(pattern),
            Self::ContainsIgnoreCase => input
                .to_ascii_lowercase()
                .contains(&pattern.to_ascii_lowercase()),
            Self::Prefix => input.starts_with(pattern),
            Self::PrefixIgnoreCase => input
                .get(..pattern.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(pattern)),
            Self::Suffix => input.ends_with(pattern),
            Self::SuffixIgnoreCase => input
                .len()
                .checked_sub(pattern.len())
                .and_then(|start| input.get(start..))
                .is_some_and(|tail| tail.eq_ignore_ascii_case(pattern)),
        }
    }
}

/// A chain dispatching on string comparison under a fixed [`StrCmp`] mode.
///
/// Built by [`text()`](crate::text). Patterns are `impl Into<Option<&str>>`,
/// so branches take either a bare `"pattern"` or `None` (the absent
/// pattern). Actions receive the subject as `Option<&str>`.
///
/// # Example
///
/// ```
/// use casewhen::{text, StrCmp};
///
/// let route = text("/api/users", StrCmp::Prefix)
///     .when("/static", |_| "files")
///     .when("/api", |_| "backend")
///     .or_else(|_| "fallback");
/// assert_eq!(route, "backend");
/// ```
#[must_use = "a chain produces nothing until `or_else` is called"]
pub struct TextChain<'a, R> {
    subject: Option<&'a str>,
    mode: StrCmp,
    state: MatchState<R>,
}

impl<'a, R> TextChain<'a, R> {
    pub(crate) fn new(subject: Option<&'a str>, mode: StrCmp) -> Self {
        Self {
            subject,
            mode,
            state: MatchState::new(),
        }
    }

    /// The null rule, applied before the mode table: an absent subject
    /// matches only an absent pattern.
    fn hit(&self, pattern: Option<&str>) -> bool {
        match (self.subject, pattern) {
            (None, None) => true,
            (Some(input), Some(pattern)) => self.mode.compare(input, pattern),
            _ => false,
        }
    }

    /// Commit branch: fires when the subject matches `pattern` under the
    /// chain's mode (or both are `None`).
    pub fn when<'p>(
        mut self,
        pattern: impl Into<Option<&'p str>>,
        action: impl FnOnce(Option<&str>) -> R,
    ) -> Self {
        if self.state.is_open() && self.hit(pattern.into()) {
            let result = action(self.subject);
            self.state = self.state.commit(result);
        }
        self
    }

    /// Fallthrough branch.
    pub fn when_next<'p>(
        mut self,
        pattern: impl Into<Option<&'p str>>,
        action: impl FnOnce(Option<&str>) -> R,
    ) -> Self {
        if self.state.is_open() && self.hit(pattern.into()) {
            let result = action(self.subject);
            self.state = self.state.fallthrough(result);
        }
        self
    }

    /// Commit branch keyed by a precompiled regex instead of the chain's
    /// mode. An absent subject never matches a regex branch.
    ///
    /// The chain never compiles patterns itself; compile once with
    /// [`regex::Regex::new`] and reuse across evaluations.
    pub fn when_matches(mut self, pattern: &regex::Regex, action: impl FnOnce(&str) -> R) -> Self {
        if self.state.is_open() {
            if let Some(input) = self.subject.filter(|s| pattern.is_match(s)) {
                let result = action(input);
                self.state = self.state.commit(result);
            }
        }
        self
    }

    /// Fallthrough counterpart of [`when_matches()`](Self::when_matches).
    pub fn when_next_matches(
        mut self,
        pattern: &regex::Regex,
        action: impl FnOnce(&str) -> R,
    ) -> Self {
        if self.state.is_open() {
            if let Some(input) = self.subject.filter(|s| pattern.is_match(s)) {
                let result = action(input);
                self.state = self.state.fallthrough(result);
            }
        }
        self
    }

    /// Commit branch whose action may fail.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when<'p, E>(
        mut self,
        pattern: impl Into<Option<&'p str>>,
        action: impl FnOnce(Option<&str>) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && self.hit(pattern.into()) {
            let result = action(self.subject)?;
            self.state = self.state.commit(result);
        }
        Ok(self)
    }

    /// Fallthrough branch whose action may fail.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_next<'p, E>(
        mut self,
        pattern: impl Into<Option<&'p str>>,
        action: impl FnOnce(Option<&str>) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && self.hit(pattern.into()) {
            let result = action(self.subject)?;
            self.state = self.state.fallthrough(result);
        }
        Ok(self)
    }

    /// Terminal call: the committed result, or `default(subject)`.
    pub fn or_else(self, default: impl FnOnce(Option<&str>) -> R) -> R {
        let Self { subject, state, .. } = self;
        state.finish(|| default(subject))
    }

    /// Terminal call with a fallible default.
    ///
    /// # Errors
    ///
    /// Returns whatever `default` returns, untouched.
    pub fn try_or_else<E>(
        self,
        default: impl FnOnce(Option<&str>) -> Result<R, E>,
    ) -> Result<R, E> {
        let Self { subject, state, .. } = self;
        state.try_finish(|| default(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::StrCmp;
    use crate::text;

    #[test]
    fn mode_table() {
        assert!(StrCmp::Exact.compare("abc", "abc"));
        assert!(!StrCmp::Exact.compare("abc", "ABC"));
        assert!(StrCmp::ExactIgnoreCase.compare("abc", "ABC"));
        assert!(StrCmp::Contains.compare("an error occurred", "error"));
        assert!(!StrCmp::Contains.compare("an ERROR occurred", "error"));
        assert!(StrCmp::ContainsIgnoreCase.compare("an ERROR occurred", "error"));
        assert!(StrCmp::Prefix.compare("/api/users", "/api"));
        assert!(StrCmp::PrefixIgnoreCase.compare("/API/users", "/api"));
        assert!(StrCmp::Suffix.compare("main.rs", ".rs"));
        assert!(StrCmp::SuffixIgnoreCase.compare("main.RS", ".rs"));
    }

    #[test]
    fn ignore_case_windows_do_not_panic_on_multibyte() {
        // Pattern length lands mid-character in the input; must fail, not panic.
        assert!(!StrCmp::PrefixIgnoreCase.compare("héllo", "he"));
        assert!(!StrCmp::SuffixIgnoreCase.compare("hellé", "le"));
        assert!(!StrCmp::PrefixIgnoreCase.compare("é", "ab"));
    }

    #[test]
    fn longer_pattern_than_input_fails_cleanly() {
        assert!(!StrCmp::PrefixIgnoreCase.compare("ab", "abcdef"));
        assert!(!StrCmp::SuffixIgnoreCase.compare("ab", "abcdef"));
    }

    #[test]
    fn chain_uses_the_fixed_mode() {
        let result = text("payment.failed.retry", StrCmp::Contains)
            .when("success", |_| "ok")
            .when("failed", |_| "alert")
            .or_else(|_| "ignore");
        assert_eq!(result, "alert");
    }

    #[test]
    fn absent_subject_matches_only_absent_pattern() {
        let result = text(None, StrCmp::Contains)
            .when("abcd", |_| "contains")
            .when(None, |_| "absent")
            .or_else(|_| "default");
        assert_eq!(result, "absent");
    }

    #[test]
    fn absent_pattern_does_not_match_present_subject() {
        let result = text("abcd", StrCmp::Exact)
            .when(None, |_| "absent")
            .when("abcd", |_| "exact")
            .or_else(|_| "default");
        assert_eq!(result, "exact");
    }

    #[test]
    fn regex_branch_matches_precompiled_pattern() {
        let id = regex::Regex::new(r"^user-\d+$").unwrap();
        let result = text("user-123", StrCmp::Exact)
            .when("user", |_| "literal")
            .when_matches(&id, |s| format!("id {s}"))
            .or_else(|_| "none".into());
        assert_eq!(result, "id user-123");
    }

    #[test]
    fn regex_branch_never_matches_absent_subject() {
        let any = regex::Regex::new(".*").unwrap();
        let result = text(None, StrCmp::Exact)
            .when_matches(&any, |_| "regex")
            .or_else(|_| "default");
        assert_eq!(result, "default");
    }

    #[test]
    fn fallthrough_then_default_sees_subject() {
        let result = text("abc", StrCmp::Exact)
            .when_next("abc", |s| s.unwrap().len())
            .or_else(|s| s.map_or(0, str::len) + 100);
        assert_eq!(result, 103);
    }

    #[test]
    fn try_when_propagates_error() {
        let outcome: Result<&str, &str> = text("x", StrCmp::Exact)
            .try_when("x", |_| Err("boom"))
            .map(|chain| chain.or_else(|_| "default"));
        assert_eq!(outcome, Err("boom"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn mode_serde_round_trip() {
        let json = serde_json::to_string(&StrCmp::PrefixIgnoreCase).unwrap();
        assert_eq!(json, r#""prefix_ignore_case""#);
        let back: StrCmp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StrCmp::PrefixIgnoreCase);
    }
}
