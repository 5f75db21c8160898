//! Authorization queries over the current subject.
//!
//! `AuthorizationQueries` is the native API: multi-value queries take slices
//! of role names or permission expressions. Every operation:
//!
//! 1. resolves the current subject through the injected `SubjectLookup`
//!    (a lookup failure is returned as-is with `?`);
//! 2. asks the subject one question, or a short-circuiting series of them;
//! 3. returns the boolean answer.
//!
//! Nothing is cached between calls and nothing is mutated. The "any" queries
//! deny guests outright: a subject without principals never matches, even
//! for an empty query.

use std::collections::BTreeSet;

use warden_contracts::error::WardenResult;

use crate::traits::SubjectLookup;

/// Boolean authorization checks against the subject resolved by `L`.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationQueries<L> {
    lookup: L,
}

impl<L: SubjectLookup> AuthorizationQueries<L> {
    /// Build the queries around a host-provided lookup.
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// The lookup these queries resolve subjects through.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    // ── Roles ────────────────────────────────────────────────────────────────

    /// True if the subject holds every role in `roles`.
    ///
    /// Duplicates and order are irrelevant. An empty slice is vacuously true,
    /// and the subject's own `has_all_roles` decides that case.
    pub fn has_all_roles<S: AsRef<str>>(&self, roles: &[S]) -> WardenResult<bool> {
        let subject = self.lookup.current()?;
        let roles = distinct(roles);
        Ok(subject.has_all_roles(&roles))
    }

    /// True if the subject holds at least one role in `roles`.
    ///
    /// Guests never match. Roles are tried in order and evaluation stops at
    /// the first match.
    pub fn has_any_roles<S: AsRef<str>>(&self, roles: &[S]) -> WardenResult<bool> {
        let subject = self.lookup.current()?;
        if subject.principals().is_empty() {
            return Ok(false);
        }
        Ok(roles.iter().any(|role| subject.has_role(role.as_ref())))
    }

    pub fn has_role(&self, role: &str) -> WardenResult<bool> {
        Ok(self.lookup.current()?.has_role(role))
    }

    /// Inverse of `has_role`.
    pub fn lacks_role(&self, role: &str) -> WardenResult<bool> {
        Ok(!self.has_role(role)?)
    }

    // ── Permissions ──────────────────────────────────────────────────────────

    pub fn is_permitted(&self, permission: &str) -> WardenResult<bool> {
        Ok(self.lookup.current()?.is_permitted(permission))
    }

    /// True if the subject is permitted every expression in `permissions`.
    pub fn is_permitted_all<S: AsRef<str>>(&self, permissions: &[S]) -> WardenResult<bool> {
        let subject = self.lookup.current()?;
        let permissions = distinct(permissions);
        Ok(subject.is_permitted_all(&permissions))
    }

    /// True if the subject is permitted at least one expression in
    /// `permissions`.
    ///
    /// Guests never match. Expressions are tried in order and evaluation
    /// stops at the first match.
    pub fn is_permitted_any<S: AsRef<str>>(&self, permissions: &[S]) -> WardenResult<bool> {
        let subject = self.lookup.current()?;
        if subject.principals().is_empty() {
            return Ok(false);
        }
        Ok(permissions
            .iter()
            .any(|permission| subject.is_permitted(permission.as_ref())))
    }

    /// Inverse of `is_permitted`.
    pub fn lacks_permission(&self, permission: &str) -> WardenResult<bool> {
        Ok(!self.is_permitted(permission)?)
    }

    // ── Identity state ───────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> WardenResult<bool> {
        Ok(self.lookup.current()?.is_authenticated())
    }

    /// Inverse of `is_authenticated`.
    pub fn not_authenticated(&self) -> WardenResult<bool> {
        Ok(!self.is_authenticated()?)
    }

    pub fn is_remembered(&self) -> WardenResult<bool> {
        Ok(self.lookup.current()?.is_remembered())
    }

    pub fn is_run_as(&self) -> WardenResult<bool> {
        Ok(self.lookup.current()?.is_run_as())
    }

    /// True if the subject holds at least one principal, whether from a
    /// login or from remember-me.
    pub fn is_user(&self) -> WardenResult<bool> {
        Ok(!self.lookup.current()?.principals().is_empty())
    }

    /// Inverse of `is_user`.
    pub fn is_guest(&self) -> WardenResult<bool> {
        Ok(self.lookup.current()?.principals().is_empty())
    }
}

fn distinct<S: AsRef<str>>(tokens: &[S]) -> Vec<&str> {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .collect()
}
