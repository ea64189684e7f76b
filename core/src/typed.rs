//! `TypeChain` — exact runtime-type dispatch
//!
//! Branches are keyed by a Rust type; the subject is an erased
//! `&dyn Any`. A branch fires only when the subject's concrete type is
//! exactly the branch type — `downcast_ref` compares `TypeId`s, so there is
//! no subtype matching by construction, preserving the deliberate
//! exact-class-equality semantics of this dispatch mode.
//!
//! An absent subject is a matchable state, not an error: only
//! [`when_absent`](TypeChain::when_absent) fires for it.

use crate::state::MatchState;
use std::any::Any;

/// A chain dispatching on the subject's exact runtime type.
///
/// Built by [`typed()`](crate::typed) or [`typed_opt()`](crate::typed_opt).
/// The matched branch's action receives the subject already downcast.
///
/// # Example
///
/// ```
/// use casewhen::typed;
///
/// let subject = 42_i64;
/// let label = typed(&subject)
///     .when(|s: &String| format!("string: {s}"))
///     .when(|n: &i64| format!("i64: {n}"))
///     .or_else(|_| "unknown".to_string());
/// assert_eq!(label, "i64: 42");
/// ```
#[must_use = "a chain produces nothing until `or_else` is called"]
pub struct TypeChain<'a, R> {
    subject: Option<&'a dyn Any>,
    state: MatchState<R>,
}

impl<'a, R> TypeChain<'a, R> {
    pub(crate) fn new(subject: Option<&'a dyn Any>) -> Self {
        Self {
            subject,
            state: MatchState::new(),
        }
    }

    fn downcast<T: Any>(&self) -> Option<&'a T> {
        self.subject.and_then(<dyn Any>::downcast_ref::<T>)
    }

    /// Commit branch: fires when the subject's concrete type is exactly `T`.
    pub fn when<T: Any>(mut self, action: impl FnOnce(&T) -> R) -> Self {
        if self.state.is_open() {
            if let Some(subject) = self.downcast::<T>() {
                self.state = self.state.commit(action(subject));
            }
        }
        self
    }

    /// Fallthrough branch keyed by type `T`.
    pub fn when_next<T: Any>(mut self, action: impl FnOnce(&T) -> R) -> Self {
        if self.state.is_open() {
            if let Some(subject) = self.downcast::<T>() {
                let result = action(subject);
                self.state = self.state.fallthrough(result);
            }
        }
        self
    }

    /// Commit branch for an absent subject — the null type token.
    pub fn when_absent(mut self, action: impl FnOnce() -> R) -> Self {
        if self.state.is_open() && self.subject.is_none() {
            self.state = self.state.commit(action());
        }
        self
    }

    /// Fallthrough branch for an absent subject.
    pub fn when_next_absent(mut self, action: impl FnOnce() -> R) -> Self {
        if self.state.is_open() && self.subject.is_none() {
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
    pub fn try_when<T: Any, E>(
        mut self,
        action: impl FnOnce(&T) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() {
            if let Some(subject) = self.downcast::<T>() {
                let result = action(subject)?;
                self.state = self.state.commit(result);
            }
        }
        Ok(self)
    }

    /// Fallthrough branch whose action may fail.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_next<T: Any, E>(
        mut self,
        action: impl FnOnce(&T) -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() {
            if let Some(subject) = self.downcast::<T>() {
                let result = action(subject)?;
                self.state = self.state.fallthrough(result);
            }
        }
        Ok(self)
    }

    /// Fallible-action counterpart of [`when_absent()`](Self::when_absent).
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_absent<E>(
        mut self,
        action: impl FnOnce() -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && self.subject.is_none() {
            let result = action()?;
            self.state = self.state.commit(result);
        }
        Ok(self)
    }

    /// Fallible-action counterpart of
    /// [`when_next_absent()`](Self::when_next_absent).
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returns, untouched.
    pub fn try_when_next_absent<E>(
        mut self,
        action: impl FnOnce() -> Result<R, E>,
    ) -> Result<Self, E> {
        if self.state.is_open() && self.subject.is_none() {
            let result = action()?;
            self.state = self.state.fallthrough(result);
        }
        Ok(self)
    }

    /// Terminal call: the committed result, or `default` applied to the
    /// erased subject.
    pub fn or_else(self, default: impl FnOnce(Option<&dyn Any>) -> R) -> R {
        let Self { subject, state } = self;
        state.finish(|| default(subject))
    }

    /// Terminal call with a fallible default.
    ///
    /// # Errors
    ///
    /// Returns whatever `default` returns, untouched.
    pub fn try_or_else<E>(
        self,
        default: impl FnOnce(Option<&dyn Any>) -> Result<R, E>,
    ) -> Result<R, E> {
        let Self { subject, state } = self;
        state.try_finish(|| default(subject))
    }
}
