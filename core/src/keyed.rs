//! `KeyChain` — projection dispatch
//!
//! Branches are keyed by arbitrary values that are first run through a
//! projection fixed at chain construction; the derived value is then
//! compared to the subject by equality. This lets branches be written in
//! terms of a *source* of the subject (an enum discriminant, a config key,
//! a raw code) rather than the subject itself.

use crate::state::MatchState;

/// A chain comparing the subject against a projection of each branch key.
///
/// Built by [`keyed()`](crate::keyed). The projection runs once per branch,
/// and only while the chain is open.
///
/// # Example
///
/// ```
/// use casewhen::keyed;
///
/// // Subject is a status code; branches are keyed by mnemonic.
/// let code_of = |name: &str| -> u16 {
///     match name {
///         "ok" => 200,
///         "not_found" => 404,
///         _ => 500,
///     }
/// };
///
/// let label = keyed(404_u16, code_of)
///     .when("ok", |_| "fine")
///     .when("not_found", |_| "missing")
///     .or_else(|_| "error");
/// assert_eq!(label, "missing");
/// ```
#[must_use = "a chain produces nothing until `or_else` is called"]
pub struct KeyChain<V, P, R> {
    subject: V,
    project: P,
    state: MatchState<R>,
}

impl<V: PartialEq, P, R> KeyChain<V, P, R> {
    pub(crate) fn new(subject: V, project: P) -> Self {
        Self {
            subject,
            project,
            state: MatchState::new(),
        }
    }

    /// Commit branch: fires when `project(key)` equals the subject.
    ///
    /// The projection is not invoked once the chain has committed.
    pub fn when<K>(mut self, key: K, action: impl FnOnce(&V) -> R) -> Self
    where
        P: FnMut(K) -> V,
    {
        if self.state.is_open() && (self.project)(key) == self.subject {
            let result = action(&self.subject);
            self.state = self.state.commit(result);
        }
        self
    }

    /// Fallthrough branch.
    pub fn when_next<K>(mut self, key: K, action: impl FnOnce(&V) -> R) -> Self
    where
        P: FnMut(K) -> V,
    {
        if self.state.is_open() && (self.project)(key) == self.subject {
            let result = action(&self.subject);
            self.state = self.state.fallthrough(result);
        }
        self
    }

    /// Commit branch whose action may fail.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when<K, E>(
        mut self,
        key: K,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E>
    where
        P: FnMut(K) -> V,
    {
        if self.state.is_open() && (self.project)(key) == self.subject {
            let result = action(&self.subject)?;
            self.state = self.state.commit(result);
        }
        Ok(self)
    }

    /// Fallthrough branch whose action may fail.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_next<K, E>(
        mut self,
        key: K,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E>
    where
        P: FnMut(K) -> V,
    {
        if self.state.is_open() && (self.project)(key) == self.subject {
            let result = action(&self.subject)?;
            self.state = self.state.fallthrough(result);
        }
        Ok(self)
    }

    /// Terminal call: the committed result, or `default(subject)`.
    pub fn or_else(self, default: impl FnOnce(&V) -> R) -> R {
        let Self { subject, state, .. } = self;
        state.finish(|| default(&subject))
    }

    /// Terminal call with a fallible default.
    ///
    /// # Errors
    ///
    /// Returns whatever `default` returns, untouched.
    pub fn try_or_else<E>(self, default: impl FnOnce(&V) -> Result<R, E>) -> Result<R, E> {
        let Self { subject, state, .. } = self;
        state.try_finish(|| default(&subject))
    }
}

#[cfg(test)]
mod tests {
    use crate::keyed;
    use std::cell::Cell;

    #[test]
    fn branch_keys_are_projected_before_comparison() {
        let result = keyed(16, |n: i32| n * n)
            .when(3, |_| "three squared")
            .when(4, |v| {
                assert_eq!(*v, 16);
                "four squared"
            })
            .or_else(|_| "no root");
        assert_eq!(result, "four squared");
    }

    #[test]
    fn projection_runs_once_per_branch_until_commit() {
        let calls = Cell::new(0);
        let result = keyed("B".to_string(), |s: &str| {
            calls.set(calls.get() + 1);
            s.to_ascii_uppercase()
        })
        .when("a", |_| 1)
        .when("b", |_| 2)
        .when("c", |_| 3)
        .or_else(|_| 0);
        assert_eq!(result, 2);
        // Two branches tested, then the chain committed.
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn fallthrough_then_default() {
        let result = keyed(10, |n: i32| n + 5)
            .when_next(5, |_| "seen")
            .when(100, |_| "never")
            .or_else(|_| "default");
        assert_eq!(result, "default");
    }

    #[test]
    fn try_when_propagates_error() {
        let outcome: Result<(), String> = keyed(1, |n: i32| n)
            .try_when(1, |_| Err("projected boom".to_string()))
            .map(|chain| chain.or_else(|_| ()));
        assert_eq!(outcome, Err("projected boom".to_string()));
    }
}
