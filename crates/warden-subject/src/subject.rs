//! In-memory `Subject` implementation.
//!
//! `StaticSubject` holds a fixed identity: an authentication state,
//! principals, a role set and a permission set. Roles and permissions are
//! compared by exact string equality; this is a fixture for hosts and tests,
//! not an authorization engine.
//!
//! Construct one in code:
//!
//! ```rust,ignore
//! let subject = StaticSubject::authenticated("jsmith")
//!     .with_roles(["admin", "editor"])
//!     .with_permissions(["file:read"]);
//! ```
//!
//! or load it from a TOML fixture with `from_toml_str` / `from_file`.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use warden_contracts::{
    error::{WardenError, WardenResult},
    principal::{Principal, PrincipalCollection},
};
use warden_core::traits::Subject;

use crate::config::{AuthenticationState, SubjectConfig};

/// A subject whose state is fixed at construction.
///
/// While running as another identity, `principals()` reports the assumed
/// identity and `previous_principals()` the original one. The role and
/// permission sets always describe the effective identity.
#[derive(Debug, Clone, Default)]
pub struct StaticSubject {
    state: AuthenticationState,
    principals: PrincipalCollection,
    previous_principals: Option<PrincipalCollection>,
    roles: HashSet<String>,
    permissions: HashSet<String>,
}

impl StaticSubject {
    /// A subject with no principals, roles or permissions.
    pub fn guest() -> Self {
        Self::default()
    }

    /// A subject that logged in as `principal` during this session.
    pub fn authenticated(principal: impl Into<String>) -> Self {
        Self::with_state(AuthenticationState::Authenticated, principal)
    }

    /// A subject restored by remember-me as `principal`, without a login.
    pub fn remembered(principal: impl Into<String>) -> Self {
        Self::with_state(AuthenticationState::Remembered, principal)
    }

    fn with_state(state: AuthenticationState, principal: impl Into<String>) -> Self {
        Self {
            state,
            principals: std::iter::once(Principal::new(principal)).collect(),
            ..Self::default()
        }
    }

    /// Grant roles to this subject.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Grant permission expressions to this subject.
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Assume the identity of `principal`.
    ///
    /// The original principals are kept as the previous principals; assuming
    /// a second identity replaces the first but keeps the original.
    ///
    /// Returns `WardenError::ConfigError` for a guest, which has no identity
    /// to run as someone else from.
    pub fn run_as(mut self, principal: impl Into<String>) -> WardenResult<Self> {
        if self.principals.is_empty() {
            return Err(WardenError::ConfigError {
                reason: "a guest subject cannot run as another identity".to_string(),
            });
        }

        let assumed: PrincipalCollection = std::iter::once(Principal::new(principal)).collect();
        let original = std::mem::replace(&mut self.principals, assumed);
        self.previous_principals.get_or_insert(original);
        Ok(self)
    }

    pub fn state(&self) -> AuthenticationState {
        self.state
    }

    /// The subject's own principals while it runs as another identity.
    pub fn previous_principals(&self) -> Option<&PrincipalCollection> {
        self.previous_principals.as_ref()
    }

    /// Build a subject from a parsed fixture.
    ///
    /// Returns `WardenError::ConfigError` when the fixture is inconsistent:
    /// a guest with principals, a remembered or authenticated subject
    /// without any, or `run_as` on a guest.
    pub fn from_config(config: SubjectConfig) -> WardenResult<Self> {
        match (config.state, config.principals.is_empty()) {
            (AuthenticationState::Guest, false) => {
                return Err(invalid("a guest subject must not carry principals"));
            }
            (AuthenticationState::Remembered | AuthenticationState::Authenticated, true) => {
                return Err(invalid("a remembered or authenticated subject needs at least one principal"));
            }
            _ => {}
        }

        let mut subject = Self {
            state: config.state,
            principals: config.principals.into_iter().map(Principal::new).collect(),
            ..Self::default()
        }
        .with_roles(config.roles)
        .with_permissions(config.permissions);

        if let Some(run_as) = config.run_as {
            if subject.principals.is_empty() {
                return Err(invalid("run_as requires a remembered or authenticated subject"));
            }
            let assumed: PrincipalCollection = run_as.into_iter().map(Principal::new).collect();
            if assumed.is_empty() {
                return Err(invalid("run_as must name at least one principal"));
            }
            let original = std::mem::replace(&mut subject.principals, assumed);
            subject.previous_principals = Some(original);
        }

        debug!(
            state = ?subject.state,
            primary = ?subject.principals.primary(),
            roles = subject.roles.len(),
            permissions = subject.permissions.len(),
            run_as = subject.previous_principals.is_some(),
            "subject fixture loaded"
        );

        Ok(subject)
    }

    /// Parse `s` as a TOML subject fixture.
    ///
    /// Returns `WardenError::ConfigError` if the TOML is malformed, does not
    /// match `SubjectConfig`, or describes an inconsistent subject.
    pub fn from_toml_str(s: &str) -> WardenResult<Self> {
        let config: SubjectConfig = toml::from_str(s).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to parse subject TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a TOML subject fixture.
    pub fn from_file(path: &Path) -> WardenResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to read subject file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents).map_err(|e| {
            warn!(path = %path.display(), error = %e, "rejected subject fixture");
            e
        })
    }
}

fn invalid(reason: &str) -> WardenError {
    WardenError::ConfigError {
        reason: format!("invalid subject fixture: {}", reason),
    }
}

impl Subject for StaticSubject {
    fn principals(&self) -> &PrincipalCollection {
        &self.principals
    }

    fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    fn is_permitted(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    fn is_authenticated(&self) -> bool {
        self.state == AuthenticationState::Authenticated
    }

    fn is_remembered(&self) -> bool {
        self.state == AuthenticationState::Remembered
    }

    fn is_run_as(&self) -> bool {
        self.previous_principals.is_some()
    }
}
