//! `PredChain` — arbitrary-predicate dispatch
//!
//! The pattern argument *is* the test: each branch supplies a boolean
//! function of the subject. Projections compose into the closure, so
//! "predicate on a derived view of the subject" needs no extra machinery.

use crate::state::MatchState;

/// A chain dispatching on caller-supplied predicates.
///
/// Built by [`test()`](crate::test). Predicates run only while the chain is
/// open — once a branch commits, later predicates are never invoked.
///
/// # Example
///
/// ```
/// use casewhen::test;
///
/// let bucket = test(37)
///     .when(|n| *n < 10, |_| "small")
///     .when(|n| *n < 100, |_| "medium")
///     .or_else(|_| "large");
/// assert_eq!(bucket, "medium");
/// ```
#[must_use = "a chain produces nothing until `or_else` is called"]
pub struct PredChain<V, R> {
    subject: V,
    state: MatchState<R>,
}

impl<V, R> PredChain<V, R> {
    pub(crate) fn new(subject: V) -> Self {
        Self {
            subject,
            state: MatchState::new(),
        }
    }

    /// Commit branch: fires when `pred(subject)` is true.
    pub fn when(mut self, pred: impl FnOnce(&V) -> bool, action: impl FnOnce(&V) -> R) -> Self {
        if self.state.is_open() && pred(&self.subject) {
            let result = action(&self.subject);
            self.state = self.state.commit(result);
        }
        self
    }

    /// Fallthrough branch.
    pub fn when_next(
        mut self,
        pred: impl FnOnce(&V) -> bool,
        action: impl FnOnce(&V) -> R,
    ) -> Self {
        if self.state.is_open() && pred(&self.subject) {
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
    pub fn try_when<E>(
        mut self,
        pred: impl FnOnce(&V) -> bool,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && pred(&self.subject) {
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
    pub fn try_when_next<E>(
        mut self,
        pred: impl FnOnce(&V) -> bool,
        action: impl FnOnce(&V) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && pred(&self.subject) {
            let result = action(&self.subject)?;
            self.state = self.state.fallthrough(result);
        }
        Ok(self)
    }

    /// Terminal call: the committed result, or `default(subject)`.
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
