//! `ValueChain` — equality and set-membership dispatch
//!
//! The workhorse chain: branches are keyed by literal values compared with
//! `PartialEq`, by sets of values (`when_in`, first equal element wins), or
//! by an externally computed boolean (`when_if`).
//!
//! Nullability comes for free from the type system: a subject of type
//! `Option<T>` compares `None == None` like any other value, so "the null
//! pattern matches the null subject" is ordinary equality here.

use crate::state::MatchState;

/// A chain dispatching on value equality.
///
/// Built by [`value()`](crate::value). The subject is captured once and is
/// immutable for the chain's lifetime; every branch action receives it by
/// reference.
///
/// # Example
///
/// ```
/// use casewhen::value;
///
/// let label = value(10)
///     .when(1, |_| "one")
///     .when_next(10, |_| "seen, keep going")
///     .when(20, |_| "twenty")
///     .or_else(|_| "default");
///
/// // 10 only matched a fallthrough branch, so the default wins.
/// assert_eq!(label, "default");
/// ```
#[must_use = "a chain produces nothing until `or_else` is called"]
pub struct ValueChain<V, R> {
    subject: V,
    state: MatchState<R>,
}

impl<V: PartialEq, R> ValueChain<V, R> {
    pub(crate) fn new(subject: V) -> Self {
        Self {
            subject,
            state: MatchState::new(),
        }
    }

    /// Shared commit step: pattern test and action run only while open.
    fn step(mut self, hit: impl FnOnce(&V) -> bool, action: impl FnOnce(&V) -> R) -> Self {
        if self.state.is_open() && hit(&self.subject) {
            let result = action(&self.subject);
            self.state = self.state.commit(result);
        }
        self
    }

    /// Shared fallthrough step.
    fn step_next(mut self, hit: impl FnOnce(&V) -> bool, action: impl FnOnce(&V) -> R) -> Self {
        if self.state.is_open() && hit(&self.subject) {
            let result = action(&self.subject);
            self.state = self.state.fallthrough(result);
        }
        self
    }

    fn try_step<E>(
        mut self,
        hit: impl FnOnce(&V) -> bool,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && hit(&self.subject) {
            let result = action(&self.subject)?;
            self.state = self.state.commit(result);
        }
        Ok(self)
    }

    fn try_step_next<E>(
        mut self,
        hit: impl FnOnce(&V) -> bool,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && hit(&self.subject) {
            let result = action(&self.subject)?;
            self.state = self.state.fallthrough(result);
        }
        Ok(self)
    }

    /// Commit branch: if the chain is open and the subject equals `pattern`,
    /// run `action` and stop evaluating.
    pub fn when(self, pattern: V, action: impl FnOnce(&V) -> R) -> Self {
        self.step(|subject| *subject == pattern, action)
    }

    /// Fallthrough branch: if the chain is open and the subject equals
    /// `pattern`, run `action` but keep evaluating later branches.
    pub fn when_next(self, pattern: V, action: impl FnOnce(&V) -> R) -> Self {
        self.step_next(|subject| *subject == pattern, action)
    }

    /// Commit branch on set membership.
    ///
    /// Elements are tested left-to-right and the scan stops at the first
    /// equal element — first match wins, not "any match", which matters if
    /// the caller's `PartialEq` has side effects or duplicates differ in
    /// identity.
    pub fn when_in(
        self,
        patterns: impl IntoIterator<Item = V>,
        action: impl FnOnce(&V) -> R,
    ) -> Self {
        self.step(
            |subject| patterns.into_iter().any(|p| p == *subject),
            action,
        )
    }

    /// Fallthrough branch on set membership. Same first-match-wins scan as
    /// [`when_in()`](Self::when_in).
    pub fn when_next_in(
        self,
        patterns: impl IntoIterator<Item = V>,
        action: impl FnOnce(&V) -> R,
    ) -> Self {
        self.step_next(
            |subject| patterns.into_iter().any(|p| p == *subject),
            action,
        )
    }

    /// Commit branch driven by an externally computed condition instead of a
    /// value comparison — a pattern that always or never matches.
    pub fn when_if(self, hit: bool, action: impl FnOnce(&V) -> R) -> Self {
        self.step(|_| hit, action)
    }

    /// Fallthrough counterpart of [`when_if()`](Self::when_if).
    pub fn when_next_if(self, hit: bool, action: impl FnOnce(&V) -> R) -> Self {
        self.step_next(|_| hit, action)
    }

    /// Commit branch whose action may fail. An `Err` propagates to the
    /// caller immediately, abandoning the rest of the chain.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when<E>(
        self,
        pattern: V,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        self.try_step(|subject| *subject == pattern, action)
    }

    /// Fallthrough branch whose action may fail.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_next<E>(
        self,
        pattern: V,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        self.try_step_next(|subject| *subject == pattern, action)
    }

    /// Fallible-action counterpart of [`when_in()`](Self::when_in).
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_in<E>(
        self,
        patterns: impl IntoIterator<Item = V>,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        self.try_step(
            |subject| patterns.into_iter().any(|p| p == *subject),
            action,
        )
    }

    /// Fallible-action counterpart of [`when_next_in()`](Self::when_next_in).
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_next_in<E>(
        self,
        patterns: impl IntoIterator<Item = V>,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        self.try_step_next(
            |subject| patterns.into_iter().any(|p| p == *subject),
            action,
        )
    }

    /// Fallible-action counterpart of [`when_if()`](Self::when_if).
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_if<E>(
        self,
        hit: bool,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        self.try_step(|_| hit, action)
    }

    /// Fallible-action counterpart of [`when_next_if()`](Self::when_next_if).
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_next_if<E>(
        self,
        hit: bool,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        self.try_step_next(|_| hit, action)
    }

    /// Terminal call: the committed result, or `default(subject)`.
    ///
    /// Mandatory — a chain that is never finished produces nothing.
    pub fn or_else(self, default: impl FnOnce(&V) -> R) -> R {
        let Self { subject, state } = self;
        state.finish(|| default(&subject))
    }

    /// Terminal call with a fallible default.
    ///
    /// # Errors
    ///
    /// Returns whatever `default` returns, untouched.
    pub fn try_or_else<E>(self, default: impl FnOnce(&V) -> Result<R, E>) -> Result<R, E> {
        let Self { subject, state } = self;
        state.try_finish(|| default(&subject))
    }
}
