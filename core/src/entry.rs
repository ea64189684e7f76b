//! Entry points — one constructor per dispatch strategy
//!
//! Each function captures the subject (and, where the strategy needs one,
//! a mode or projection) and returns the first chain node with fresh state.
//! Strategy selection is the function you call; everything after that is
//! the shared evaluation contract.

use crate::{
    CondChain, KeyChain, Nav, PredChain, StrCmp, TextChain, TypeChain, ValueChain,
};
use std::any::Any;

/// Start a chain dispatching on value equality.
///
/// Subjects of type `Option<T>` get null semantics for free: `None` equals
/// `None` and nothing else.
pub fn value<V: PartialEq, R>(subject: V) -> ValueChain<V, R> {
    ValueChain::new(subject)
}

/// Start a subject-less chain; every branch is an externally computed
/// boolean.
pub fn cond<R>() -> CondChain<R> {
    CondChain::new()
}

/// Start a chain dispatching on the subject's exact runtime type.
pub fn typed<R>(subject: &dyn Any) -> TypeChain<'_, R> {
    TypeChain::new(Some(subject))
}

/// Like [`typed()`], for a possibly-absent subject. Only
/// [`when_absent`](TypeChain::when_absent) matches a `None` subject.
pub fn typed_opt<R>(subject: Option<&dyn Any>) -> TypeChain<'_, R> {
    TypeChain::new(subject)
}

/// Start a chain dispatching on string comparison under `mode`.
///
/// The subject is `impl Into<Option<&str>>`, so both `text("abc", mode)`
/// and `text(None, mode)` read naturally.
pub fn text<'a, R>(subject: impl Into<Option<&'a str>>, mode: StrCmp) -> TextChain<'a, R> {
    TextChain::new(subject.into(), mode)
}

/// Start a chain dispatching on arbitrary predicates over the subject.
pub fn test<V, R>(subject: V) -> PredChain<V, R> {
    PredChain::new(subject)
}

/// Start a chain comparing the subject against a projection of each branch
/// key.
pub fn keyed<V: PartialEq, P, R>(subject: V, project: P) -> KeyChain<V, P, R> {
    KeyChain::new(subject, project)
}

/// Start a null-safe navigation chain. See [`Nav`].
pub fn nav<M>() -> Nav<(), M> {
    Nav::new()
}
