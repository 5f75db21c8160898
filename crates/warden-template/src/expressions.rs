//! String-encoded authorization functions.
//!
//! Expression languages hand every argument over as a string, so multi-value
//! arguments arrive delimited: `hasAnyRoles("superadmin, editor")`.
//! `ExpressionFunctions` splits those strings with its `TokenSplitter` and
//! forwards to `AuthorizationQueries`:
//!
//! - "all" functions split into a set (duplicates and order irrelevant);
//! - "any" functions split into an ordered list and stop at the first match;
//! - single-value functions pass the argument through untouched.
//!
//! A lookup failure is returned unchanged.

use warden_contracts::{
    error::{WardenError, WardenResult},
    tokens::TokenSplitter,
};
use warden_core::{queries::AuthorizationQueries, traits::SubjectLookup};

use crate::function::FunctionName;

/// An argument as it arrives from an expression evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument<'a> {
    /// The expression passed nothing.
    Absent,
    /// A single string, split on the delimiter for list functions.
    Delimited(&'a str),
    /// Tokens the evaluator already separated (e.g. a template array).
    Tokens(&'a [&'a str]),
}

/// The fourteen authorization functions over string arguments.
#[derive(Debug, Clone, Default)]
pub struct ExpressionFunctions<L> {
    queries: AuthorizationQueries<L>,
    splitter: TokenSplitter,
}

impl<L: SubjectLookup> ExpressionFunctions<L> {
    /// Functions splitting on the default delimiter (`,`).
    pub fn new(lookup: L) -> Self {
        Self::with_splitter(lookup, TokenSplitter::default())
    }

    pub fn with_splitter(lookup: L, splitter: TokenSplitter) -> Self {
        Self {
            queries: AuthorizationQueries::new(lookup),
            splitter,
        }
    }

    /// The native-sequence queries underneath.
    pub fn queries(&self) -> &AuthorizationQueries<L> {
        &self.queries
    }

    pub fn splitter(&self) -> &TokenSplitter {
        &self.splitter
    }

    // ── Roles ────────────────────────────────────────────────────────────────

    pub fn has_all_roles(&self, delimited_roles: &str) -> WardenResult<bool> {
        self.queries.has_all_roles(&self.splitter.split(delimited_roles))
    }

    pub fn has_any_roles(&self, delimited_roles: &str) -> WardenResult<bool> {
        self.queries.has_any_roles(&self.splitter.split(delimited_roles))
    }

    pub fn has_role(&self, role: &str) -> WardenResult<bool> {
        self.queries.has_role(role)
    }

    pub fn lacks_role(&self, role: &str) -> WardenResult<bool> {
        self.queries.lacks_role(role)
    }

    // ── Permissions ──────────────────────────────────────────────────────────

    pub fn is_permitted(&self, permission: &str) -> WardenResult<bool> {
        self.queries.is_permitted(permission)
    }

    pub fn is_permitted_all(&self, delimited_permissions: &str) -> WardenResult<bool> {
        self.queries
            .is_permitted_all(&self.splitter.split(delimited_permissions))
    }

    pub fn is_permitted_any(&self, delimited_permissions: &str) -> WardenResult<bool> {
        self.queries
            .is_permitted_any(&self.splitter.split(delimited_permissions))
    }

    pub fn lacks_permission(&self, permission: &str) -> WardenResult<bool> {
        self.queries.lacks_permission(permission)
    }

    // ── Identity state ───────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> WardenResult<bool> {
        self.queries.is_authenticated()
    }

    pub fn not_authenticated(&self) -> WardenResult<bool> {
        self.queries.not_authenticated()
    }

    pub fn is_remembered(&self) -> WardenResult<bool> {
        self.queries.is_remembered()
    }

    pub fn is_run_as(&self) -> WardenResult<bool> {
        self.queries.is_run_as()
    }

    pub fn is_user(&self) -> WardenResult<bool> {
        self.queries.is_user()
    }

    pub fn is_guest(&self) -> WardenResult<bool> {
        self.queries.is_guest()
    }

    // ── Dispatch ─────────────────────────────────────────────────────────────

    /// Evaluate the function called `name` in an expression.
    ///
    /// Returns `WardenError::UnknownFunction` for a name outside the table.
    pub fn evaluate(&self, name: &str, argument: Option<&str>) -> WardenResult<bool> {
        self.call(name.parse()?, argument)
    }

    /// Call `function` with an optional string argument.
    pub fn call(&self, function: FunctionName, argument: Option<&str>) -> WardenResult<bool> {
        let argument = match argument {
            Some(value) => Argument::Delimited(value),
            None => Argument::Absent,
        };
        self.call_with(function, argument)
    }

    /// Call `function` with an argument in any of the accepted shapes.
    ///
    /// Nullary functions ignore whatever argument they are given. Functions
    /// that need an argument return `WardenError::MissingArgument` without
    /// one. Pre-split tokens go straight to the native queries for list
    /// functions; a single-value function accepts them only if there is
    /// exactly one token.
    pub fn call_with(&self, function: FunctionName, argument: Argument<'_>) -> WardenResult<bool> {
        match (function, argument) {
            (FunctionName::IsAuthenticated, _) => self.is_authenticated(),
            (FunctionName::IsGuest, _) => self.is_guest(),
            (FunctionName::IsRemembered, _) => self.is_remembered(),
            (FunctionName::IsRunAs, _) => self.is_run_as(),
            (FunctionName::IsUser, _) => self.is_user(),
            (FunctionName::NotAuthenticated, _) => self.not_authenticated(),

            (_, Argument::Absent) => Err(missing(function)),

            (FunctionName::HasAllRoles, Argument::Delimited(value)) => self.has_all_roles(value),
            (FunctionName::HasAllRoles, Argument::Tokens(tokens)) => self.queries.has_all_roles(tokens),
            (FunctionName::HasAnyRoles, Argument::Delimited(value)) => self.has_any_roles(value),
            (FunctionName::HasAnyRoles, Argument::Tokens(tokens)) => self.queries.has_any_roles(tokens),
            (FunctionName::IsPermittedAll, Argument::Delimited(value)) => {
                self.is_permitted_all(value)
            }
            (FunctionName::IsPermittedAll, Argument::Tokens(tokens)) => {
                self.queries.is_permitted_all(tokens)
            }
            (FunctionName::IsPermittedAny, Argument::Delimited(value)) => {
                self.is_permitted_any(value)
            }
            (FunctionName::IsPermittedAny, Argument::Tokens(tokens)) => {
                self.queries.is_permitted_any(tokens)
            }

            (FunctionName::HasRole, argument) => self.has_role(single_value(function, argument)?),
            (FunctionName::LacksRole, argument) => self.lacks_role(single_value(function, argument)?),
            (FunctionName::IsPermitted, argument) => {
                self.is_permitted(single_value(function, argument)?)
            }
            (FunctionName::LacksPermission, argument) => {
                self.lacks_permission(single_value(function, argument)?)
            }
        }
    }
}

fn missing(function: FunctionName) -> WardenError {
    WardenError::MissingArgument {
        function: function.as_str().to_string(),
    }
}

/// The one value a single-value function was given.
fn single_value<'a>(function: FunctionName, argument: Argument<'a>) -> WardenResult<&'a str> {
    match argument {
        Argument::Absent => Err(missing(function)),
        Argument::Delimited(value) => Ok(value),
        Argument::Tokens([value]) => Ok(*value),
        Argument::Tokens(tokens) => Err(WardenError::InvalidArgument {
            function: function.as_str().to_string(),
            reason: format!("expected exactly one value, got {}", tokens.len()),
        }),
    }
}
