//! `MatchState` — the two-state core every chain threads through its calls
//!
//! Each chain method consumes the state and returns it, so the
//! commit/fallthrough rule is a pure function of the current state. There is
//! no shared mutable field anywhere: a chain owns exactly one `MatchState`
//! and moves it from call to call.

/// Evaluation state of a chain.
///
/// # INV: `Committed` is monotonic
///
/// Once a branch commits, the state never returns to `Open`. Chain types
/// check [`is_open()`](Self::is_open) before running any pattern test or
/// action, which is what makes a committed chain skip the rest of its
/// branches without evaluating them.
///
/// # Fallthrough
///
/// A fallthrough branch writes its result into `pending` but stays `Open`.
/// The pending value is only ever replaced — by a later fallthrough, a
/// commit, or the terminal default. It is never returned on its own: an
/// open chain always runs its default.
#[derive(Debug)]
pub(crate) enum MatchState<R> {
    /// No branch has committed. `pending` holds the most recent fallthrough
    /// result, if any.
    Open {
        /// Result written by the last matching fallthrough branch.
        pending: Option<R>,
    },
    /// A branch committed; evaluation is over.
    Committed(R),
}

impl<R> MatchState<R> {
    /// Fresh state: open, nothing pending.
    pub(crate) fn new() -> Self {
        Self::Open { pending: None }
    }

    /// `true` until a branch commits.
    pub(crate) fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Fix the result. Callers must check [`is_open()`](Self::is_open)
    /// first; committing twice is a bug in the chain type, not the caller.
    pub(crate) fn commit(self, result: R) -> Self {
        debug_assert!(self.is_open(), "commit on an already-committed chain");
        Self::Committed(result)
    }

    /// Record a fallthrough result without leaving `Open`.
    pub(crate) fn fallthrough(self, result: R) -> Self {
        debug_assert!(self.is_open(), "fallthrough on an already-committed chain");
        Self::Open {
            pending: Some(result),
        }
    }

    /// Consume the state: the committed result, or the default.
    ///
    /// The default runs whenever the chain is still open — even when a
    /// fallthrough branch wrote a pending result. That pending value is
    /// dropped here; it never escapes the chain.
    pub(crate) fn finish(self, default: impl FnOnce() -> R) -> R {
        match self {
            Self::Committed(result) => result,
            Self::Open { .. } => default(),
        }
    }

    /// Like [`finish()`](Self::finish) for a fallible default.
    pub(crate) fn try_finish<E>(self, default: impl FnOnce() -> Result<R, E>) -> Result<R, E> {
        match self {
            Self::Committed(result) => Ok(result),
            Self::Open { .. } => default(),
        }
    }
}
