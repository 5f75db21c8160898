//! Core trait definitions.
//!
//! Two traits define the boundary between warden and the host's security
//! framework:
//!
//! - `Subject`       — the identity of whoever is making the current request
//! - `SubjectLookup` — how the host hands that identity to warden
//!
//! Warden never creates, mutates, or destroys subjects. Their lifecycle
//! (login, remember-me restore, run-as, logout) belongs to the host.

use std::sync::Arc;

use warden_contracts::{error::WardenResult, principal::PrincipalCollection};

/// The identity making the current request.
///
/// Implementations are provided by the host's security framework. Every
/// method is a read-only query. How roles and permissions are evaluated
/// (role hierarchies, wildcard permissions, realm lookups) is entirely up to
/// the implementation; warden treats role names and permission expressions
/// as opaque strings.
pub trait Subject: Send + Sync {
    /// The principals attached to this subject.
    ///
    /// Empty for a guest. While running as another identity this returns the
    /// assumed identity's principals.
    fn principals(&self) -> &PrincipalCollection;

    /// Return true if the subject holds `role`.
    fn has_role(&self, role: &str) -> bool;

    /// Return true if the subject holds every role in `roles`.
    ///
    /// An empty slice is vacuously satisfied. Implementations with a batch
    /// query in their backing store should override this.
    fn has_all_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|role| self.has_role(role))
    }

    /// Return true if the subject is permitted to perform `permission`.
    fn is_permitted(&self, permission: &str) -> bool;

    /// Return true if the subject is permitted every expression in `permissions`.
    ///
    /// An empty slice is vacuously satisfied.
    fn is_permitted_all(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|permission| self.is_permitted(permission))
    }

    /// Return true if the subject logged in explicitly during this session.
    fn is_authenticated(&self) -> bool;

    /// Return true if the subject's identity was restored by remember-me
    /// rather than by a fresh login.
    fn is_remembered(&self) -> bool;

    /// Return true if the subject is currently running as an assumed identity.
    fn is_run_as(&self) -> bool;
}

/// Resolves the subject for the current request.
///
/// The host injects an implementation into `AuthorizationQueries`. A lookup
/// that cannot resolve a subject returns an error (usually
/// `WardenError::NoSubjectBound`), which the queries propagate unchanged.
pub trait SubjectLookup: Send + Sync {
    /// Return the subject bound to the current execution context.
    fn current(&self) -> WardenResult<Arc<dyn Subject>>;
}

impl<L: SubjectLookup + ?Sized> SubjectLookup for Arc<L> {
    fn current(&self) -> WardenResult<Arc<dyn Subject>> {
        (**self).current()
    }
}
