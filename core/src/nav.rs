//! `Nav` — null-safe chained-field navigation
//!
//! Replaces nested `if let Some(..)` pyramids: each stage computes the next
//! value from a raw source or from an already-accumulated value, and the
//! chain breaks — permanently — the first time a stage comes up empty or a
//! break predicate fires. The break captures a diagnostic message computed
//! lazily from the values accumulated so far; everything downstream of the
//! break is skipped without being evaluated.
//!
//! The accumulator is a typestate over plain Rust tuples: stage `k` turns a
//! `Nav<(T1, …, Tk), M>` into a `Nav<(T1, …, Tk, N), M>`. Stage impls are
//! generated for tuples of up to nine slots; a tenth stage does not
//! typecheck.
//!
//! # Example
//!
//! ```
//! use casewhen::nav;
//!
//! struct Buyer { account: Option<String> }
//! struct Order { buyer: Option<Buyer> }
//!
//! let order = Order { buyer: Some(Buyer { account: None }) };
//!
//! let (buyer, account, message) = nav()
//!     .fetch(Some(&order), |o| o.buyer.as_ref(), || "order has no buyer")
//!     .via(
//!         |(buyer,)| buyer,
//!         |b| b.account.clone(),
//!         |_| "buyer has no account",
//!     )
//!     .or_else("resolved");
//!
//! assert!(buyer.is_some());
//! assert_eq!(account, None);
//! assert_eq!(message, "buyer has no account");
//! ```

use std::fmt;

/// Tuples usable as a `Nav` accumulator: arities 0 through 9.
///
/// Sealed — the stage macros implement it for exactly the supported
/// arities, which is what bounds a chain to nine resolved values.
pub trait Row: sealed::Sealed {
    /// The same tuple with every slot optional; what a broken chain carries.
    type Holes;
}

mod sealed {
    pub trait Sealed {}
}

/// Internal state: either every accumulated value is present, or the chain
/// broke and carries the padded slots plus the captured message.
enum NavState<Acc: Row, M> {
    Active(Acc),
    Broken(Acc::Holes, M),
}

/// A null-safe navigation chain over an accumulated tuple.
///
/// Built by [`nav()`](crate::nav); see the [module docs](self) for the
/// stage vocabulary. Once broken, no later selector, compute, break
/// predicate, or message function runs — stages only widen the tuple with
/// `None`.
#[must_use = "a chain produces nothing until `or_else` is called"]
pub struct Nav<Acc: Row, M> {
    state: NavState<Acc, M>,
}

impl<Acc, M> fmt::Debug for Nav<Acc, M>
where
    Acc: Row + fmt::Debug,
    Acc::Holes: fmt::Debug,
    M: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            NavState::Active(row) => f.debug_tuple("Active").field(row).finish(),
            NavState::Broken(slots, message) => f
                .debug_struct("Broken")
                .field("slots", slots)
                .field("message", message)
                .finish(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// First stage — raw source only, no values accumulated yet
// ═══════════════════════════════════════════════════════════════════════════════

impl<M> Nav<(), M> {
    pub(crate) fn new() -> Self {
        Nav {
            state: NavState::Active(()),
        }
    }

    fn step1<N>(self, op: impl FnOnce() -> Result<N, M>) -> Nav<(N,), M> {
        match self.state {
            NavState::Broken((), message) => Nav {
                state: NavState::Broken((None,), message),
            },
            NavState::Active(()) => match op() {
                Ok(value) => Nav {
                    state: NavState::Active((value,)),
                },
                Err(message) => Nav {
                    state: NavState::Broken((None,), message),
                },
            },
        }
    }

    fn try_step1<N, E>(
        self,
        op: impl FnOnce() -> Result<Result<N, M>, E>,
    ) -> Result<Nav<(N,), M>, E> {
        match self.state {
            NavState::Broken((), message) => Ok(Nav {
                state: NavState::Broken((None,), message),
            }),
            NavState::Active(()) => Ok(match op()? {
                Ok(value) => Nav {
                    state: NavState::Active((value,)),
                },
                Err(message) => Nav {
                    state: NavState::Broken((None,), message),
                },
            }),
        }
    }

    /// First stage: compute the first value from a raw source.
    ///
    /// Breaks with `message()` if `source` is absent or `compute` returns
    /// `None`. The source-absent and compute-empty breaks are deliberately
    /// indistinguishable in the resulting tuple.
    pub fn fetch<S, N>(
        self,
        source: Option<S>,
        compute: impl FnOnce(&S) -> Option<N>,
        message: impl FnOnce() -> M,
    ) -> Nav<(N,), M> {
        self.step1(|| {
            let Some(source) = source else {
                return Err(message());
            };
            match compute(&source) {
                Some(value) => Ok(value),
                None => Err(message()),
            }
        })
    }

    /// First stage with a break predicate: even a present value breaks the
    /// chain when `break_if` says so.
    pub fn fetch_until<S, N>(
        self,
        source: Option<S>,
        compute: impl FnOnce(&S) -> Option<N>,
        break_if: impl FnOnce(&N) -> bool,
        message: impl FnOnce() -> M,
    ) -> Nav<(N,), M> {
        self.step1(|| {
            let Some(source) = source else {
                return Err(message());
            };
            let Some(value) = compute(&source) else {
                return Err(message());
            };
            if break_if(&value) {
                return Err(message());
            }
            Ok(value)
        })
    }

    /// Fallible first stage: `compute` may fail, and the failure propagates
    /// to the caller immediately.
    ///
    /// # Errors
    ///
    /// Returns whatever `compute` returns, untouched.
    pub fn try_fetch<S, N, E>(
        self,
        source: Option<S>,
        compute: impl FnOnce(&S) -> Result<Option<N>, E>,
        message: impl FnOnce() -> M,
    ) -> Result<Nav<(N,), M>, E> {
        self.try_step1(|| {
            let Some(source) = source else {
                return Ok(Err(message()));
            };
            match compute(&source)? {
                Some(value) => Ok(Ok(value)),
                None => Ok(Err(message())),
            }
        })
    }

    /// Fallible first stage with a fallible break predicate.
    ///
    /// # Errors
    ///
    /// Returns whatever `compute` or `break_if` return, untouched.
    pub fn try_fetch_until<S, N, E>(
        self,
        source: Option<S>,
        compute: impl FnOnce(&S) -> Result<Option<N>, E>,
        break_if: impl FnOnce(&N) -> Result<bool, E>,
        message: impl FnOnce() -> M,
    ) -> Result<Nav<(N,), M>, E> {
        self.try_step1(|| {
            let Some(source) = source else {
                return Ok(Err(message()));
            };
            let value = match compute(&source)? {
                Some(value) => value,
                None => return Ok(Err(message())),
            };
            if break_if(&value)? {
                return Ok(Err(message()));
            }
            Ok(Ok(value))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Row impls and the terminal call, arities 0–9
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! nav_row {
    ($($T:ident),*) => {
        impl<$($T),*> sealed::Sealed for ($($T,)*) {}

        impl<$($T),*> Row for ($($T,)*) {
            type Holes = ($(Option<$T>,)*);
        }

        #[allow(non_snake_case)]
        impl<$($T,)* M> Nav<($($T,)*), M> {
            /// Terminal call: the accumulated tuple plus the message slot.
            ///
            /// Every slot up to the break point is `Some`; every slot past
            /// it is `None`. The message slot is the captured break message,
            /// or `default` if the chain never broke.
            pub fn or_else(self, default: M) -> ($(Option<$T>,)* M,) {
                match self.state {
                    NavState::Active(row) => {
                        let ($($T,)*) = row;
                        ($(Some($T),)* default,)
                    }
                    NavState::Broken(slots, message) => {
                        let ($($T,)*) = slots;
                        ($($T,)* message,)
                    }
                }
            }
        }
    };
}

nav_row!();
nav_row!(T1);
nav_row!(T1, T2);
nav_row!(T1, T2, T3);
nav_row!(T1, T2, T3, T4);
nav_row!(T1, T2, T3, T4, T5);
nav_row!(T1, T2, T3, T4, T5, T6);
nav_row!(T1, T2, T3, T4, T5, T6, T7);
nav_row!(T1, T2, T3, T4, T5, T6, T7, T8);
nav_row!(T1, T2, T3, T4, T5, T6, T7, T8, T9);

// ═══════════════════════════════════════════════════════════════════════════════
// Later stages, arities 1–8 (each appends one slot, so chains top out at 9)
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! nav_stage {
    ($($T:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($T,)+ M> Nav<($($T,)+), M> {
            /// Append-one step. A broken chain widens with `None` and keeps
            /// its message without invoking `op`; an active chain appends
            /// `op`'s value or breaks with its message.
            fn step<N>(
                self,
                op: impl FnOnce(&($($T,)+)) -> Result<N, M>,
            ) -> Nav<($($T,)+ N,), M> {
                match self.state {
                    NavState::Broken(slots, message) => {
                        let ($($T,)+) = slots;
                        Nav { state: NavState::Broken(($($T,)+ None,), message) }
                    }
                    NavState::Active(row) => match op(&row) {
                        Ok(value) => {
                            let ($($T,)+) = row;
                            Nav { state: NavState::Active(($($T,)+ value,)) }
                        }
                        Err(message) => {
                            let ($($T,)+) = row;
                            Nav { state: NavState::Broken(($(Some($T),)+ None,), message) }
                        }
                    },
                }
            }

            fn try_step<N, E>(
                self,
                op: impl FnOnce(&($($T,)+)) -> Result<Result<N, M>, E>,
            ) -> Result<Nav<($($T,)+ N,), M>, E> {
                match self.state {
                    NavState::Broken(slots, message) => {
                        let ($($T,)+) = slots;
                        Ok(Nav { state: NavState::Broken(($($T,)+ None,), message) })
                    }
                    NavState::Active(row) => Ok(match op(&row)? {
                        Ok(value) => {
                            let ($($T,)+) = row;
                            Nav { state: NavState::Active(($($T,)+ value,)) }
                        }
                        Err(message) => {
                            let ($($T,)+) = row;
                            Nav { state: NavState::Broken(($(Some($T),)+ None,), message) }
                        }
                    }),
                }
            }

            /// Compute the next value from a fresh raw source, ignoring the
            /// accumulated values. Breaks with `message` (lazily, over the
            /// values so far) if the source is absent or `compute` returns
            /// `None`.
            pub fn fetch<S, N>(
                self,
                source: Option<S>,
                compute: impl FnOnce(&S) -> Option<N>,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Nav<($($T,)+ N,), M> {
                self.step(|row| {
                    let Some(source) = source else {
                        return Err(message(row));
                    };
                    match compute(&source) {
                        Some(value) => Ok(value),
                        None => Err(message(row)),
                    }
                })
            }

            /// [`fetch()`](Self::fetch) with a break predicate.
            pub fn fetch_until<S, N>(
                self,
                source: Option<S>,
                compute: impl FnOnce(&S) -> Option<N>,
                break_if: impl FnOnce(&N) -> bool,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Nav<($($T,)+ N,), M> {
                self.step(|row| {
                    let Some(source) = source else {
                        return Err(message(row));
                    };
                    let Some(value) = compute(&source) else {
                        return Err(message(row));
                    };
                    if break_if(&value) {
                        return Err(message(row));
                    }
                    Ok(value)
                })
            }

            /// Compute the next value from one of the accumulated values,
            /// picked by `select`. Selectors see the plain tuple — values
            /// are only ever absent after a break, and after a break no
            /// selector runs.
            pub fn via<S, N>(
                self,
                select: impl FnOnce(&($($T,)+)) -> &S,
                compute: impl FnOnce(&S) -> Option<N>,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Nav<($($T,)+ N,), M> {
                self.step(|row| match compute(select(row)) {
                    Some(value) => Ok(value),
                    None => Err(message(row)),
                })
            }

            /// [`via()`](Self::via) with a break predicate.
            pub fn via_until<S, N>(
                self,
                select: impl FnOnce(&($($T,)+)) -> &S,
                compute: impl FnOnce(&S) -> Option<N>,
                break_if: impl FnOnce(&N) -> bool,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Nav<($($T,)+ N,), M> {
                self.step(|row| {
                    let Some(value) = compute(select(row)) else {
                        return Err(message(row));
                    };
                    if break_if(&value) {
                        return Err(message(row));
                    }
                    Ok(value)
                })
            }

            /// Fallible [`fetch()`](Self::fetch).
            ///
            /// # Errors
            ///
            /// Returns whatever `compute` returns, untouched.
            pub fn try_fetch<S, N, E>(
                self,
                source: Option<S>,
                compute: impl FnOnce(&S) -> Result<Option<N>, E>,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Result<Nav<($($T,)+ N,), M>, E> {
                self.try_step(|row| {
                    let Some(source) = source else {
                        return Ok(Err(message(row)));
                    };
                    match compute(&source)? {
                        Some(value) => Ok(Ok(value)),
                        None => Ok(Err(message(row))),
                    }
                })
            }

            /// Fallible [`fetch_until()`](Self::fetch_until).
            ///
            /// # Errors
            ///
            /// Returns whatever `compute` or `break_if` return, untouched.
            pub fn try_fetch_until<S, N, E>(
                self,
                source: Option<S>,
                compute: impl FnOnce(&S) -> Result<Option<N>, E>,
                break_if: impl FnOnce(&N) -> Result<bool, E>,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Result<Nav<($($T,)+ N,), M>, E> {
                self.try_step(|row| {
                    let Some(source) = source else {
                        return Ok(Err(message(row)));
                    };
                    let value = match compute(&source)? {
                        Some(value) => value,
                        None => return Ok(Err(message(row))),
                    };
                    if break_if(&value)? {
                        return Ok(Err(message(row)));
                    }
                    Ok(Ok(value))
                })
            }

            /// Fallible [`via()`](Self::via).
            ///
            /// # Errors
            ///
            /// Returns whatever `compute` returns, untouched.
            pub fn try_via<S, N, E>(
                self,
                select: impl FnOnce(&($($T,)+)) -> &S,
                compute: impl FnOnce(&S) -> Result<Option<N>, E>,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Result<Nav<($($T,)+ N,), M>, E> {
                self.try_step(|row| match compute(select(row))? {
                    Some(value) => Ok(Ok(value)),
                    None => Ok(Err(message(row))),
                })
            }

            /// Fallible [`via_until()`](Self::via_until).
            ///
            /// # Errors
            ///
            /// Returns whatever `compute` or `break_if` return, untouched.
            pub fn try_via_until<S, N, E>(
                self,
                select: impl FnOnce(&($($T,)+)) -> &S,
                compute: impl FnOnce(&S) -> Result<Option<N>, E>,
                break_if: impl FnOnce(&N) -> Result<bool, E>,
                message: impl FnOnce(&($($T,)+)) -> M,
            ) -> Result<Nav<($($T,)+ N,), M>, E> {
                self.try_step(|row| {
                    let value = match compute(select(row))? {
                        Some(value) => value,
                        None => return Ok(Err(message(row))),
                    };
                    if break_if(&value)? {
                        return Ok(Err(message(row)));
                    }
                    Ok(Ok(value))
                })
            }
        }
    };
}

nav_stage!(T1);
nav_stage!(T1, T2);
nav_stage!(T1, T2, T3);
nav_stage!(T1, T2, T3, T4);
nav_stage!(T1, T2, T3, T4, T5);
nav_stage!(T1, T2, T3, T4, T5, T6);
nav_stage!(T1, T2, T3, T4, T5, T6, T7);
nav_stage!(T1, T2, T3, T4, T5, T6, T7, T8);
