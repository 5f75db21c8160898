//! Reference scenarios run by `demo scenarios`.
//!
//! Each scenario loads one of the bundled subject fixtures, binds it to the
//! current thread, and checks a list of expression calls against their
//! expected results.

use std::sync::Arc;

use warden_contracts::{error::WardenResult, tokens::TokenSplitter};
use warden_core::ThreadSubjectLookup;
use warden_subject::StaticSubject;
use warden_template::{ExpressionFunctions, FunctionName};

struct Check {
    function: FunctionName,
    argument: Option<&'static str>,
    expected: bool,
}

const fn check(function: FunctionName, argument: Option<&'static str>, expected: bool) -> Check {
    Check {
        function,
        argument,
        expected,
    }
}

struct Scenario {
    title: &'static str,
    fixture: &'static str,
    checks: &'static [Check],
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "Authenticated admin/editor",
        fixture: include_str!("../fixtures/admin_editor.toml"),
        checks: &[
            check(FunctionName::HasAllRoles, Some("admin,editor"), true),
            check(FunctionName::HasAllRoles, Some("admin,superadmin"), false),
            check(FunctionName::HasAnyRoles, Some("superadmin,editor"), true),
            check(FunctionName::LacksRole, Some("superadmin"), true),
            check(FunctionName::IsPermittedAll, Some("\"printer:print,query\", file:read"), true),
            check(FunctionName::IsAuthenticated, None, true),
        ],
    },
    Scenario {
        title: "Guest",
        fixture: include_str!("../fixtures/guest.toml"),
        checks: &[
            check(FunctionName::IsGuest, None, true),
            check(FunctionName::IsUser, None, false),
            check(FunctionName::HasAnyRoles, Some("admin"), false),
            check(FunctionName::HasAnyRoles, Some(""), false),
            check(FunctionName::IsPermittedAny, Some("file:read"), false),
            check(FunctionName::NotAuthenticated, None, true),
        ],
    },
    Scenario {
        title: "Remembered, no fresh login",
        fixture: include_str!("../fixtures/remembered.toml"),
        checks: &[
            check(FunctionName::IsAuthenticated, None, false),
            check(FunctionName::IsRemembered, None, true),
            check(FunctionName::IsUser, None, true),
            check(FunctionName::IsPermitted, Some("file:read"), true),
            check(FunctionName::LacksPermission, Some("file:write"), true),
        ],
    },
    Scenario {
        title: "Administrator running as a customer",
        fixture: include_str!("../fixtures/run_as.toml"),
        checks: &[
            check(FunctionName::IsRunAs, None, true),
            check(FunctionName::HasRole, Some("customer"), true),
            check(FunctionName::IsPermittedAny, Some("order:write, order:read"), true),
        ],
    },
];

/// Run every scenario and return how many checks did not match.
pub fn run_all(splitter: TokenSplitter) -> WardenResult<usize> {
    let functions = ExpressionFunctions::with_splitter(ThreadSubjectLookup, splitter);
    let mut mismatches = 0;

    for scenario in SCENARIOS {
        println!("── {} ──", scenario.title);

        let subject = StaticSubject::from_toml_str(scenario.fixture)?;
        let _guard = ThreadSubjectLookup::bind(Arc::new(subject));

        for check in scenario.checks {
            let actual = functions.call(check.function, check.argument)?;
            let marker = if actual == check.expected {
                "ok"
            } else {
                mismatches += 1;
                "MISMATCH"
            };

            match check.argument {
                Some(argument) => println!(
                    "  [{marker}] {}({:?}) = {actual}",
                    check.function, argument
                ),
                None => println!("  [{marker}] {}() = {actual}", check.function),
            }
        }
        println!();
    }

    Ok(mismatches)
}
