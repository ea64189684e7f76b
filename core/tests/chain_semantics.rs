//! Cross-chain semantics: the evaluation contract every dispatch strategy
//! shares, exercised end to end with side-effect counters.

use casewhen::prelude::*;
use std::cell::Cell;

/// Counts how often each closure in a chain actually ran.
#[derive(Default)]
struct Calls {
    actions: Cell<u32>,
    default: Cell<u32>,
}

impl Calls {
    fn action(&self) {
        self.actions.set(self.actions.get() + 1);
    }
    fn fallback(&self) {
        self.default.set(self.default.get() + 1);
    }
}

#[test]
fn commit_short_circuits_every_later_branch_and_the_default() {
    let calls = Calls::default();
    let result = value(10)
        .when(10, |_| {
            calls.action();
            "hit"
        })
        .when(10, |_| {
            calls.action();
            "late commit"
        })
        .when_next(10, |_| {
            calls.action();
            "late fallthrough"
        })
        .or_else(|_| {
            calls.fallback();
            "default"
        });

    assert_eq!(result, "hit");
    assert_eq!(calls.actions.get(), 1);
    assert_eq!(calls.default.get(), 0);
}

#[test]
fn fallthrough_runs_but_the_default_decides() {
    // The 10 / "whenNext continues" / default scenario.
    let calls = Calls::default();
    let result = value(10)
        .when(1, |_| "one")
        .when_next(10, |_| {
            calls.action();
            "continue"
        })
        .when(20, |_| "twenty")
        .or_else(|_| {
            calls.fallback();
            "default"
        });

    assert_eq!(result, "default");
    assert_eq!(calls.actions.get(), 1, "fallthrough action must run");
    assert_eq!(calls.default.get(), 1, "default must run on an open chain");
}

#[test]
fn multiple_fallthroughs_all_run_then_default() {
    let order = std::cell::RefCell::new(Vec::new());
    let result = value('x')
        .when_next('x', |_| order.borrow_mut().push("first"))
        .when_next('x', |_| order.borrow_mut().push("second"))
        .or_else(|_| order.borrow_mut().push("default"));
    let () = result;
    assert_eq!(*order.borrow(), ["first", "second", "default"]);
}

#[test]
fn set_membership_matches_none_only_when_present() {
    // Set contains None: a None subject matches.
    let result = value(None::<&str>)
        .when_in([Some("a"), Some("b"), None, Some("c")], |_| "with none")
        .or_else(|_| "default");
    assert_eq!(result, "with none");

    // Set without None: a None subject falls through.
    let result = value(None::<&str>)
        .when_in([Some("a"), Some("b"), Some("c")], |_| "without none")
        .or_else(|_| "default");
    assert_eq!(result, "default");
}

#[test]
fn string_null_rule_holds_for_every_mode() {
    let modes = [
        StrCmp::Exact,
        StrCmp::ExactIgnoreCase,
        StrCmp::Contains,
        StrCmp::ContainsIgnoreCase,
        StrCmp::Prefix,
        StrCmp::PrefixIgnoreCase,
        StrCmp::Suffix,
        StrCmp::SuffixIgnoreCase,
    ];
    for mode in modes {
        let result = text(None, mode)
            .when("abcd", |_| "pattern")
            .when(None, |_| "absent")
            .or_else(|_| "default");
        assert_eq!(result, "absent", "mode {mode:?} broke the null rule");
    }
}

#[test]
fn type_dispatch_is_exact() {
    struct Base;
    struct Derived;

    // Rust has no subtype relation between these; the point the test pins
    // is that nothing but the concrete type matches — not even a type the
    // value could convert into.
    let subject = Derived;
    let result = typed(&subject)
        .when(|_: &Base| "base")
        .or_else(|_| "fallback");
    assert_eq!(result, "fallback");

    let result = typed(&subject)
        .when(|_: &Derived| "derived")
        .or_else(|_| "fallback");
    assert_eq!(result, "derived");
}

#[test]
fn projection_keys_resolve_before_comparison() {
    #[derive(PartialEq)]
    enum Status {
        Active,
        Suspended,
    }
    let code_of = |status: Status| -> u8 {
        match status {
            Status::Active => 1,
            Status::Suspended => 9,
        }
    };

    let result = keyed(9_u8, code_of)
        .when(Status::Active, |_| "running")
        .when(Status::Suspended, |_| "paused")
        .or_else(|_| "unknown");
    assert_eq!(result, "paused");
}

#[test]
fn cond_chain_orders_boolean_branches() {
    let (a, b) = (3, 3);
    let result = cond()
        .when(a < b, || "less")
        .when(a > b, || "greater")
        .or_else(|| "equal");
    assert_eq!(result, "equal");
}

#[derive(Debug, PartialEq)]
struct LookupError(&'static str);

fn lookup(n: i32) -> Result<&'static str, LookupError> {
    value(n)
        .try_when(1, |_| Ok("one"))?
        .try_when(2, |_| Err(LookupError("two is broken")))?
        .try_when_next(3, |_| Ok("three, continuing"))?
        .try_or_else(|_| Err(LookupError("no branch")))
}

#[test]
fn checked_errors_surface_through_question_mark() {
    assert_eq!(lookup(1), Ok("one"));
    assert_eq!(lookup(2), Err(LookupError("two is broken")));
    // 3 matched only a fallthrough branch, so the fallible default decides.
    assert_eq!(lookup(3), Err(LookupError("no branch")));
}

#[test]
fn failing_action_leaves_no_extra_side_effects() {
    let calls = Calls::default();
    let outcome: Result<&str, &str> = value(7)
        .try_when_next(7, |_| {
            calls.action();
            Ok("pending")
        })
        .and_then(|chain| {
            chain.try_when(7, |_| {
                calls.action();
                Err("boom")
            })
        })
        .map(|chain| {
            chain.or_else(|_| {
                calls.fallback();
                "default"
            })
        });

    assert_eq!(outcome, Err("boom"));
    // Both actions before/at the failure ran; the default never did.
    assert_eq!(calls.actions.get(), 2);
    assert_eq!(calls.default.get(), 0);
}

#[test]
fn compiled_rules_drive_predicate_branches() {
    let suffix = TextRule::Cmp {
        mode: StrCmp::SuffixIgnoreCase,
        pattern: ".rs".into(),
    }
    .compile()
    .unwrap();
    let regex = TextRule::Regex {
        pattern: r"^\d+$".into(),
        ignore_case: false,
    }
    .compile()
    .unwrap();

    let classify = |name: &'static str| {
        test(name)
            .when(|s| regex.matches(s), |_| "numeric")
            .when(|s| suffix.matches(s), |_| "rust source")
            .or_else(|_| "other")
    };

    assert_eq!(classify("1234"), "numeric");
    assert_eq!(classify("MAIN.RS"), "rust source");
    assert_eq!(classify("readme.md"), "other");
}
