//! `CondChain` — subject-less boolean chain
//!
//! The degenerate dispatch strategy: there is no subject, every branch is
//! keyed by a condition the caller already computed. Useful when the
//! "patterns" are heterogeneous tests that don't share a common subject,
//! but the commit/fallthrough semantics are still wanted.

use crate::state::MatchState;

/// A chain with no subject; branches are externally computed booleans.
///
/// Built by [`cond()`](crate::cond).
///
/// # Example
///
/// ```
/// use casewhen::cond;
///
/// let (a, b) = (4, 9);
/// let relation = cond()
///     .when(a > b, || "greater")
///     .when(a < b, || "less")
///     .or_else(|| "equal");
/// assert_eq!(relation, "less");
/// ```
#[must_use = "a chain produces nothing until `or_else` is called"]
pub struct CondChain<R> {
    state: MatchState<R>,
}

impl<R> CondChain<R> {
    pub(crate) fn new() -> Self {
        Self {
            state: MatchState::new(),
        }
    }

    /// Commit branch: if the chain is open and `hit` is true, run `action`
    /// and stop evaluating.
    pub fn when(mut self, hit: bool, action: impl FnOnce() -> R) -> Self {
        if self.state.is_open() && hit {
            let result = action();
            self.state = self.state.commit(result);
        }
        self
    }

    /// Fallthrough branch: run `action` on a hit but keep evaluating.
    pub fn when_next(mut self, hit: bool, action: impl FnOnce() -> R) -> Self {
        if self.state.is_open() && hit {
            let result = action();
            self.state = self.state.fallthrough(result);
        }
        self
    }

    /// Commit branch whose action may fail.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when<E>(mut self, hit: bool, action: impl FnOnce() -> Result<R, E>) -> Result<Self, E> {
        if self.state.is_open() && hit {
            let result = action()?;
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
        hit: bool,
        action: impl FnOnce() -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && hit {
            let result = action()?;
            self.state = self.state.fallthrough(result);
        }
        Ok(self)
    }

    /// Terminal call: the committed result, or the default.
    pub fn or_else(self, default: impl FnOnce() -> R) -> R {
        self.state.finish(default)
    }

    /// Terminal call with a fallible default.
    ///
    /// # Errors
    ///
    /// Returns whatever `default` returns, untouched.
    pub fn try_or_else<E>(self, default: impl FnOnce() -> Result<R, E>) -> Result<R, E> {
        self.state.try_finish(default)
    }
}
