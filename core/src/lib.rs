//! casewhen - fluent pattern-matching chains
//!
//! A combinator engine for testing one subject against an ordered sequence
//! of typed branches, with precise control over short-circuiting versus
//! fallthrough, fallible branch actions, and a null-safe field-navigation
//! accumulator.
//!
//! # Architecture
//!
//! Every chain shares one evaluation contract and differs only in how a
//! branch decides "does this pattern match the subject":
//!
//! - [`ValueChain`] — literal equality, set membership, boolean branches
//! - [`CondChain`] — no subject; branches are externally computed booleans
//! - [`TypeChain`] — exact runtime type of an erased subject
//! - [`TextChain`] — string comparison under a fixed [`StrCmp`] mode
//! - [`PredChain`] — arbitrary predicates over the subject
//! - [`KeyChain`] — branch keys run through a projection, then equality
//! - [`Nav`] — the navigation accumulator: "compute next value, break on
//!   absent" staged over a growing tuple
//!
//! # Key Design Insights
//!
//! 1. **State, not flags**: a chain owns a two-state `Open`/`Committed`
//!    value and moves it from call to call. Commit is monotonic; the
//!    short-circuit rule is a pure function of the state.
//!
//! 2. **Commit vs fallthrough**: `when` stops evaluation on a match;
//!    `when_next` runs its action and keeps going. An open chain always
//!    runs its `or_else` default, even after fallthrough actions fired.
//!
//! 3. **Nothing runs after commit**: pattern tests, predicates,
//!    projections, and actions of later branches are never evaluated once
//!    a branch commits. For [`Nav`] this is the whole feature: a broken
//!    chain stops touching fields.
//!
//! 4. **Fallible everything**: every branch and terminal has a `try_`
//!    variant whose closure returns `Result`; errors surface via `?` at
//!    the call site, untouched, exactly as hand-written `match` code would
//!    surface them.
//!
//! # Example
//!
//! ```
//! use casewhen::value;
//!
//! let size = value(47_u32)
//!     .when_in(0..=9, |_| "single digit")
//!     .when_if(47 % 2 == 0, |_| "even")
//!     .when(47, |n| {
//!         assert_eq!(*n, 47);
//!         "forty-seven"
//!     })
//!     .or_else(|_| "something else");
//! assert_eq!(size, "forty-seven");
//! ```
//!
//! The navigation accumulator replaces nested null checks:
//!
//! ```
//! use casewhen::nav;
//!
//! struct Profile { email: Option<String> }
//! struct User { profile: Option<Profile> }
//!
//! let user = User { profile: Some(Profile { email: None }) };
//!
//! let (profile, email, note) = nav()
//!     .fetch(Some(&user), |u| u.profile.as_ref(), || "no profile")
//!     .via(|(p,)| p, |p| p.email.clone(), |_| "no email")
//!     .or_else("ok");
//!
//! assert!(profile.is_some());
//! assert_eq!(email, None);
//! assert_eq!(note, "no email");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod cond;
mod entry;
mod keyed;
mod nav;
mod pred;
mod state;
mod text;
mod text_rule;
mod typed;
mod value;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Chain types
pub use cond::CondChain;
pub use keyed::KeyChain;
pub use nav::{Nav, Row};
pub use pred::PredChain;
pub use text::{StrCmp, TextChain};
pub use text_rule::{TextMatcher, TextRule};
pub use typed::TypeChain;
pub use value::ValueChain;

// Entry points
pub use entry::{cond, keyed, nav, test, text, typed, typed_opt, value};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use casewhen::prelude::*;
/// ```
pub mod prelude {
    // Entry points
    pub use crate::entry::{cond, keyed, nav, test, text, typed, typed_opt, value};
    // Chain types, config types, errors
    pub use crate::{
        ChainError, CondChain, KeyChain, Nav, PredChain, StrCmp, TextChain, TextMatcher,
        TextRule, TypeChain, ValueChain,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from rule compilation.
///
/// The chains themselves never construct errors: branch failures are the
/// caller's own error type, propagated untouched by the `try_` methods.
/// This enum covers the one place the library can fail on its own — turning
/// a [`TextRule`] into a runtime matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A regex pattern is invalid.
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern \"{pattern}\": {source}")
            }
        }
    }
}

impl std::error::Error for ChainError {}
